use yew::prelude::*;
use shared::DateKey;
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub dates: Vec<DateKey>,
    pub on_remove: Callback<DateKey>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(SelectedDates)]
pub fn selected_dates(props: &Props) -> Html {
    if props.dates.is_empty() {
        return html! {
            <p class={combine_classes(TEXT_MUTED, "italic")}>{"No dates selected yet"}</p>
        };
    }

    html! {
        <div class="flex flex-wrap">
            {for props.dates.iter().map(|date| {
                let date = *date;
                let onclick = props.on_remove.reform(move |_: MouseEvent| date);
                html! {
                    <span class={DATE_TAG}>
                        {date.label()}
                        <button type="button" class="text-blue-300 hover:text-white"
                            title="Remove this date" disabled={props.disabled} {onclick}>
                            {"×"}
                        </button>
                    </span>
                }
            })}
        </div>
    }
}
