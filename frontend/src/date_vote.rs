use std::rc::Rc;
use gloo_timers::callback::Timeout;
use time::{OffsetDateTime, UtcOffset};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use shared::{
    DateKey, Direction, SubmissionOutcome, SubmissionPhase, SubmissionPipeline, VoteForm,
};
use crate::{
    calendar_view::CalendarView,
    config::CONFIG,
    selected_dates::SelectedDates,
    status_message::StatusMessage,
    styles::*,
    transport::build_pipeline,
};

pub enum Msg {
    Toggle(DateKey),
    Remove(DateKey),
    Navigate(Direction),
    UpdateDateInput(String),
    AddFromInput,
    UpdateName(String),
    UpdateEmail(String),
    Submit,
    Phase(SubmissionPhase),
    SubmitResult(SubmissionOutcome),
    ExpireMessage(u64),
    Reset,
}

pub struct DateVote {
    form: VoteForm,
    pipeline: Rc<SubmissionPipeline>,
    date_input: String,
}

impl Component for DateVote {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let offset = UtcOffset::from_hms(CONFIG.utc_offset_hours, 0, 0).unwrap_or(UtcOffset::UTC);
        Self {
            form: VoteForm::new(DateKey::today(offset), offset, CONFIG.validation_policy()),
            pipeline: Rc::new(build_pipeline(&CONFIG)),
            date_input: String::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Toggle(date) => {
                if let Err(e) = self.form.toggle_date(date) {
                    tracing::debug!("date not toggled: {}", e);
                }
                true
            }
            Msg::Remove(date) => {
                self.form.remove_date(date);
                true
            }
            Msg::Navigate(direction) => {
                self.form.navigate(direction);
                true
            }
            Msg::UpdateDateInput(value) => {
                self.date_input = value;
                false
            }
            Msg::AddFromInput => {
                match self.form.add_date_text(&self.date_input) {
                    Ok(change) if change.is_change() => self.date_input.clear(),
                    Ok(_) => {}
                    Err(e) => tracing::debug!("date not added: {}", e),
                }
                true
            }
            Msg::UpdateName(value) => {
                self.form.set_voter_name(value);
                true
            }
            Msg::UpdateEmail(value) => {
                self.form.set_email_address(value);
                true
            }
            Msg::Submit => {
                let batch = match self.form.begin_submission(OffsetDateTime::now_utc()) {
                    Ok(batch) => batch,
                    Err(e) => {
                        tracing::debug!("submission not started: {}", e);
                        return true;
                    }
                };

                let pipeline = self.pipeline.clone();
                let link = ctx.link().clone();
                ctx.link().send_future(async move {
                    let outcome = pipeline
                        .submit(&batch, |phase| link.send_message(Msg::Phase(phase)))
                        .await;
                    Msg::SubmitResult(outcome)
                });
                true
            }
            Msg::Phase(phase) => {
                self.form.record_phase(phase);
                true
            }
            Msg::SubmitResult(outcome) => {
                let generation = self.form.finish_submission(&outcome);
                if let (true, Some(ttl)) = (outcome.is_success(), CONFIG.success_message_ttl) {
                    let link = ctx.link().clone();
                    let millis = u32::try_from(ttl.as_millis()).unwrap_or(u32::MAX);
                    Timeout::new(millis, move || link.send_message(Msg::ExpireMessage(generation))).forget();
                }
                true
            }
            Msg::ExpireMessage(generation) => self.form.clear_message_if_current(generation),
            Msg::Reset => {
                self.form.reset();
                self.date_input.clear();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class={BG_PAGE}>
                <div class={CARD}>
                    <h1 class={HEADING_LG}>{"Pick Your Dates"}</h1>
                    <div class={SPACE_Y_LG}>
                        <CalendarView
                            grid={self.form.grid().clone()}
                            on_toggle={ctx.link().callback(Msg::Toggle)}
                            on_navigate={ctx.link().callback(Msg::Navigate)}
                            disabled={self.form.is_submitting()}
                        />
                        {self.render_date_input(ctx)}
                        <div class={SPACE_Y_BASE}>
                            <label class={TEXT_LABEL}>
                                {format!("Selected dates ({})", self.form.dates().size())}
                            </label>
                            <SelectedDates
                                dates={self.form.sorted_dates()}
                                on_remove={ctx.link().callback(Msg::Remove)}
                                disabled={self.form.is_submitting()}
                            />
                        </div>
                        {self.render_inputs(ctx)}
                    </div>
                    {self.render_controls(ctx)}
                    <StatusMessage message={self.form.message().clone()} />
                </div>
            </div>
        }
    }
}

impl DateVote {
    fn render_date_input(&self, ctx: &Context<Self>) -> Html {
        let busy = self.form.is_submitting();
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateDateInput(input.value())
        });
        let onkeypress = ctx.link().batch_callback(|e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                vec![Msg::AddFromInput]
            } else {
                vec![]
            }
        });

        html! {
            <div class="flex gap-2 items-end">
                <div class={INPUT_GROUP}>
                    <label class={TEXT_LABEL}>{"Add a date"}</label>
                    <input type="date" class={INPUT_BASE}
                        min={self.form.today().to_string()}
                        value={self.date_input.clone()}
                        disabled={busy}
                        {oninput} {onkeypress} />
                </div>
                <button type="button" class={button_primary(false)}
                    disabled={busy}
                    onclick={ctx.link().callback(|_| Msg::AddFromInput)}>
                    {"Add"}
                </button>
            </div>
        }
    }

    fn render_inputs(&self, ctx: &Context<Self>) -> Html {
        let busy = self.form.is_submitting();
        let on_name = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateName(input.value())
        });
        let on_email = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateEmail(input.value())
        });

        html! {
            <>
                <div class={SPACE_Y_BASE}>
                    <label class={TEXT_LABEL}>{"Your name"}</label>
                    <input type="text" class={INPUT_BASE} placeholder="Enter your name"
                        value={self.form.voter_name().to_string()} disabled={busy} oninput={on_name} />
                </div>
                <div class={SPACE_Y_BASE}>
                    <label class={TEXT_LABEL}>{"Email (optional)"}</label>
                    <input type="email" class={INPUT_BASE} placeholder="you@example.com"
                        value={self.form.email_address().to_string()} disabled={busy} oninput={on_email} />
                </div>
            </>
        }
    }

    fn render_controls(&self, ctx: &Context<Self>) -> Html {
        let label = match self.form.phase() {
            SubmissionPhase::SubmittingFallback => "Retrying...",
            phase if phase.in_flight() => "Submitting...",
            _ => "Submit",
        };

        html! {
            <div class="flex gap-4">
                <button type="button" class={button_primary(true)}
                    disabled={!self.form.submit_enabled()}
                    onclick={ctx.link().callback(|_| Msg::Submit)}>
                    {label}
                </button>
                <button type="button" class={combine_classes(BUTTON_BASE, &combine_classes(BUTTON_SECONDARY, "mt-8"))}
                    disabled={self.form.is_submitting()}
                    onclick={ctx.link().callback(|_| Msg::Reset)}>
                    {"Clear"}
                </button>
            </div>
        }
    }
}
