use yew::prelude::*;

mod styles;
mod config;
mod logging;
mod transport;
mod calendar_view;
mod selected_dates;
mod status_message;
mod date_vote;

use crate::date_vote::DateVote;

#[function_component(App)]
fn app() -> Html {
    html! {
        <div class="min-h-screen bg-gray-900">
            <DateVote />
        </div>
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    logging::init();
    tracing::info!("starting date vote widget");
    yew::Renderer::<App>::new().render();
}
