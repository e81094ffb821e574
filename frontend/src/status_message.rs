use yew::prelude::*;
use shared::StatusMessage as Message;
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub message: Message,
}

#[function_component(StatusMessage)]
pub fn status_message(props: &Props) -> Html {
    if props.message.is_idle() {
        return html! {
            <div class={combine_classes(TEXT_MUTED, "italic mt-4")}>{"Ready"}</div>
        };
    }

    html! {
        <div class={message_style(props.message.severity)} role="status">
            {props.message.text.clone()}
        </div>
    }
}
