use yew::prelude::*;
use shared::{calendar::WEEKDAY_HEADERS, CalendarGrid, DateKey, Direction};
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub grid: CalendarGrid,
    pub on_toggle: Callback<DateKey>,
    pub on_navigate: Callback<Direction>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(CalendarView)]
pub fn calendar_view(props: &Props) -> Html {
    let prev = props.on_navigate.reform(|_: MouseEvent| Direction::Previous);
    let next = props.on_navigate.reform(|_: MouseEvent| Direction::Next);

    html! {
        <div class={SPACE_Y_BASE}>
            <div class={FLEX_BETWEEN}>
                <button type="button" class={BUTTON_NAV} onclick={prev} title="Previous month">{"‹"}</button>
                <span class={HEADING_SM}>{props.grid.cursor.label()}</span>
                <button type="button" class={BUTTON_NAV} onclick={next} title="Next month">{"›"}</button>
            </div>
            <div class={GRID_WEEK}>
                {for WEEKDAY_HEADERS.iter().map(|name| html! {
                    <div class="text-center text-xs font-medium text-gray-400">{*name}</div>
                })}
            </div>
            <div class={GRID_WEEK}>
                {for props.grid.cells.iter().map(|cell| {
                    let date = cell.date;
                    let onclick = if cell.interactive() && !props.disabled {
                        Some(props.on_toggle.reform(move |_: MouseEvent| date))
                    } else {
                        None
                    };
                    html! {
                        <div class={cell_style(cell)} data-date={date.to_string()} {onclick}>
                            {cell.day}
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
