#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, time::Duration};
    use futures::{executor::block_on, future::{self, LocalBoxFuture}};
    use time::{macros::datetime, Month, UtcOffset};
    use crate::{
        calendar::{self, CalendarCursor, Direction, GRID_CELLS},
        date_key::DateKey,
        date_set::{DateSet, SelectionChange, SelectionError},
        error::{Error, ErrorCode},
        form::{VoteForm, MSG_FORM_CLEARED, MSG_SUBMIT_FAILED, MSG_SUBMITTED},
        message::{MessageChannel, Severity},
        models::{build_batch, format_voting_time, SubmitEnvelope, SUBMIT_ACTION, VALIDITY_VALID},
        submission::{SubmissionOutcome, SubmissionPhase, SubmissionPipeline},
        transport::{
            interpret_form_reply, interpret_plain_text_reply, SimulatedTransport, SimulationSettings,
            Sleep, Transport, TransportError, TransportKind,
        },
        validation::{is_valid, validate_form, ValidationError, ValidationPolicy},
    };

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn today() -> DateKey {
        key("2025-05-20")
    }

    fn taipei() -> UtcOffset {
        UtcOffset::from_hms(8, 0, 0).unwrap()
    }

    fn form() -> VoteForm {
        VoteForm::new(today(), taipei(), ValidationPolicy::default())
    }

    fn never() -> Sleep {
        Rc::new(|_| Box::pin(future::pending()))
    }

    fn instant() -> Sleep {
        Rc::new(|_| Box::pin(future::ready(())))
    }

    type Seen = Rc<RefCell<Vec<SubmitEnvelope>>>;

    struct ScriptedTransport {
        kind: TransportKind,
        reply: Option<Result<(), TransportError>>,
        seen: Seen,
    }

    impl ScriptedTransport {
        fn boxed(kind: TransportKind, reply: Result<(), TransportError>, seen: &Seen) -> Box<dyn Transport> {
            Box::new(Self { kind, reply: Some(reply), seen: seen.clone() })
        }

        fn hanging(kind: TransportKind, seen: &Seen) -> Box<dyn Transport> {
            Box::new(Self { kind, reply: None, seen: seen.clone() })
        }
    }

    impl Transport for ScriptedTransport {
        fn kind(&self) -> TransportKind {
            self.kind
        }

        fn deliver<'a>(&'a self, envelope: &'a SubmitEnvelope) -> LocalBoxFuture<'a, Result<(), TransportError>> {
            self.seen.borrow_mut().push(envelope.clone());
            match &self.reply {
                Some(reply) => Box::pin(future::ready(reply.clone())),
                None => Box::pin(future::pending()),
            }
        }
    }

    fn filled_form() -> VoteForm {
        let mut f = form();
        f.add_date(key("2025-06-01")).unwrap();
        f.add_date(key("2025-06-15")).unwrap();
        f.set_voter_name("Alice");
        f
    }

    #[test]
    fn test_past_dates_rejected() {
        let mut set = DateSet::new(today());
        set.add(key("2025-06-01")).unwrap();
        let before = set.clone();

        for past in ["2025-05-19", "2025-01-01", "2024-12-31", "1999-05-20"] {
            assert_eq!(set.add(key(past)), Err(SelectionError::PastDate(key(past))));
            assert_eq!(set, before);
        }

        assert!(matches!(set.add(today()), Ok(SelectionChange::Added(_))), "today is selectable");
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let mut set = DateSet::new(today());
        set.add(key("2025-06-01")).unwrap();
        set.add(key("2025-07-04")).unwrap();

        let err = set.add(key("2025-06-01")).unwrap_err();
        assert_eq!(err, SelectionError::Duplicate(key("2025-06-01")));
        assert_eq!(err.code(), ErrorCode::DuplicateDate);
        assert_eq!(set.size(), 2);
    }

    #[test]
    fn test_add_then_remove_restores_set() {
        let mut set = DateSet::new(today());
        set.add(key("2025-06-01")).unwrap();
        let before = set.clone();

        assert_eq!(set.add(key("2025-08-09")), Ok(SelectionChange::Added(key("2025-08-09"))));
        assert_eq!(set.remove(key("2025-08-09")), SelectionChange::Removed(key("2025-08-09")));
        assert_eq!(set, before);
        assert_eq!(set.remove(key("2025-08-09")), SelectionChange::Unchanged);
    }

    #[test]
    fn test_sorted_list_is_chronological() {
        let mut set = DateSet::new(today());
        for d in ["2025-12-01", "2025-06-15", "2026-01-02", "2025-06-01", "2025-10-31"] {
            set.add(key(d)).unwrap();
        }
        let sorted: Vec<String> = set.to_sorted_list().into_iter().map(String::from).collect();
        assert_eq!(sorted, ["2025-06-01", "2025-06-15", "2025-10-31", "2025-12-01", "2026-01-02"]);
    }

    #[test]
    fn test_date_key_parsing_and_serialization() {
        let d = key("2025-06-01");
        assert_eq!(d.to_string(), "2025-06-01");
        assert_eq!(DateKey::from_ymd(2025, 6, 1), Some(d));
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2025-06-01\"");
        assert_eq!(serde_json::from_str::<DateKey>("\"2025-06-01\"").unwrap(), d);
        assert_eq!(d.label(), "Sun, Jun 1 2025");

        assert!(matches!("not-a-date".parse::<DateKey>(), Err(SelectionError::InvalidDate(_))));
        assert!("2025-02-30".parse::<DateKey>().is_err());
        assert!(key("2025-06-01") < key("2025-06-15"));
        assert!(key("2025-12-31") < key("2026-01-01"));
    }

    #[test]
    fn test_validity_table() {
        assert!(!is_valid("", 0));
        assert!(!is_valid("", 1));
        assert!(!is_valid("Alice", 0));
        assert!(is_valid("Alice", 1));
        assert!(!is_valid("   ", 3));
    }

    #[test]
    fn test_validation_messages_and_email_gate() {
        let open = ValidationPolicy::default();
        assert_eq!(validate_form("", "", 0, open), Err(ValidationError::MissingNameAndDates));
        assert_eq!(validate_form(" ", "", 2, open), Err(ValidationError::MissingName));
        assert_eq!(validate_form("Alice", "", 0, open), Err(ValidationError::NoDatesSelected));
        assert_eq!(validate_form("Alice", "not an email", 1, open), Ok(()));

        let strict = ValidationPolicy { require_valid_email: true };
        assert_eq!(validate_form("Alice", "", 1, strict), Ok(()));
        assert_eq!(validate_form("Alice", "alice@example.com", 1, strict), Ok(()));
        assert_eq!(validate_form("Alice", "alice@", 1, strict), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_form("Alice", "a b@example.com", 1, strict), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_grid_starts_on_sunday_before_first() {
        let set = DateSet::new(today());
        let grid = calendar::render(CalendarCursor::new(2025, Month::March), today(), &set);

        assert_eq!(grid.cells.len(), GRID_CELLS);
        assert_eq!(grid.cells[0].date, key("2025-02-23"));
        assert!(grid.cells[0].other_month);
        assert_eq!(grid.cells[6].date, key("2025-03-01"));
        assert!(!grid.cells[6].other_month);
        assert_eq!(grid.cells[41].date, key("2025-04-05"));
        assert!(grid.cells[41].other_month);
        assert!(grid.cells.iter().all(|c| c.is_past && !c.interactive()));
        assert_eq!(grid.weeks().count(), 6);

        let june = calendar::render(CalendarCursor::new(2025, Month::June), today(), &set);
        assert_eq!(june.cells[0].date, key("2025-06-01"));
    }

    #[test]
    fn test_grid_flags() {
        let mut set = DateSet::new(today());
        set.add(key("2025-05-28")).unwrap();
        let grid = calendar::render(CalendarCursor::containing(today()), today(), &set);

        assert_eq!(grid.cells[0].date, key("2025-04-27"));
        let yesterday = &grid.cells[22];
        let current = &grid.cells[23];
        assert_eq!(current.date, today());
        assert!(current.is_today && !current.is_past && current.interactive());
        assert!(yesterday.is_past && !yesterday.is_today && !yesterday.interactive());
        assert!(grid.cells[31].is_selected);
        assert_eq!(grid.cells.iter().filter(|c| c.is_selected).count(), 1);
        assert_eq!(grid.cells.iter().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut set = DateSet::new(today());
        set.add(key("2025-06-03")).unwrap();
        let cursor = CalendarCursor::new(2025, Month::June);
        assert_eq!(calendar::render(cursor, today(), &set), calendar::render(cursor, today(), &set));
    }

    #[test]
    fn test_navigation_round_trip() {
        for year in [1999, 2024, 2025] {
            for m in 1..=12u8 {
                let cursor = CalendarCursor::new(year, Month::try_from(m).unwrap());
                assert_eq!(cursor.navigate(Direction::Next).navigate(Direction::Previous), cursor);
                assert_eq!(cursor.navigate(Direction::Previous).navigate(Direction::Next), cursor);
            }
        }

        let december = CalendarCursor::new(2024, Month::December);
        assert_eq!(december.navigate(Direction::Next), CalendarCursor::new(2025, Month::January));
        assert_eq!(
            CalendarCursor::new(2025, Month::January).navigate(Direction::Previous),
            december
        );
        assert_eq!(december.label(), "December 2024");
    }

    #[test]
    fn test_selection_refreshes_once() {
        let mut f = form();
        let start = f.revision();

        f.add_date(key("2025-06-01")).unwrap();
        assert_eq!(f.revision(), start + 1);
        assert!(f.grid().cells.iter().any(|c| c.date == key("2025-06-01") && c.is_selected));
        assert!(!f.is_valid());

        f.set_voter_name("Alice");
        assert!(f.is_valid());
        assert_eq!(f.revision(), start + 1);

        assert!(f.add_date(key("2025-06-01")).is_err());
        assert_eq!(f.revision(), start + 1);
        assert_eq!(f.message().severity, Severity::Error);

        assert_eq!(f.remove_date(key("2025-07-01")), SelectionChange::Unchanged);
        assert_eq!(f.revision(), start + 1);

        assert_eq!(f.toggle_date(key("2025-06-01")), Ok(SelectionChange::Removed(key("2025-06-01"))));
        assert_eq!(f.revision(), start + 2);
        assert!(!f.is_valid());
    }

    #[test]
    fn test_selected_cell_marked_after_add() {
        let mut f = form();
        f.add_date(key("2025-05-30")).unwrap();
        let cell = f.grid().cells.iter().find(|c| c.date == key("2025-05-30")).unwrap();
        assert!(cell.is_selected);
        assert_eq!(f.message().text, "Date added");
    }

    #[test]
    fn test_date_text_input() {
        let mut f = form();
        assert!(f.add_date_text(" 2025-09-01 ").is_ok());
        assert!(matches!(f.add_date_text("tomorrow"), Err(SelectionError::InvalidDate(_))));
        assert!(matches!(f.add_date_text("2025-05-01"), Err(SelectionError::PastDate(_))));
        assert_eq!(f.sorted_dates(), vec![key("2025-09-01")]);
        assert_eq!(f.message().severity, Severity::Error);
    }

    #[test]
    fn test_message_channel_last_write_wins() {
        let mut channel = MessageChannel::default();
        assert!(channel.current().is_idle());

        let first = channel.success("Date added");
        let second = channel.error("Date is in the past");
        assert_eq!(channel.current().text, "Date is in the past");
        assert_eq!(channel.current().severity, Severity::Error);

        assert!(!channel.clear_if_current(first));
        assert!(channel.clear_if_current(second));
        assert!(channel.current().is_idle());

        channel.show("   ", Severity::Error);
        assert_eq!(channel.current().severity, Severity::Info);
    }

    #[test]
    fn test_batch_shares_one_timestamp() {
        let f = filled_form();
        let now = datetime!(2025-05-20 04:05:06 UTC);
        let batch = build_batch(f.dates(), "  Alice ", "", now, taipei()).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.envelope.action, SUBMIT_ACTION);
        assert!(batch.envelope.data.iter().all(|r| r.voting_time == "2025/05/20 12:05:06"));
        assert!(batch.envelope.data.iter().all(|r| r.voter_name == "Alice"));
        assert!(batch.envelope.data.iter().all(|r| r.validity_status == VALIDITY_VALID));

        let json: serde_json::Value = serde_json::from_str(&batch.envelope.to_json().unwrap()).unwrap();
        assert_eq!(json["action"], "submitVotes");
        assert_eq!(json["data"][0]["votingDate"], "2025-06-01");
        assert_eq!(json["data"][1]["votingDate"], "2025-06-15");
        assert!(json["data"][0].get("emailAddress").is_none());

        let with_email = build_batch(f.dates(), "Alice", " alice@example.com ", now, taipei()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&with_email.envelope.to_json().unwrap()).unwrap();
        assert_eq!(json["data"][0]["emailAddress"], "alice@example.com");
    }

    #[test]
    fn test_voting_time_format() {
        let now = datetime!(2025-12-31 16:30:00 UTC);
        assert_eq!(format_voting_time(now, taipei()).unwrap(), "2026/01/01 00:30:00");
    }

    #[test]
    fn test_reply_interpretation() {
        assert_eq!(interpret_form_reply(200), Ok(()));
        assert_eq!(interpret_form_reply(500), Err(TransportError::Status(500)));

        assert_eq!(interpret_plain_text_reply(200, r#"{"success":true}"#), Ok(()));
        assert_eq!(
            interpret_plain_text_reply(200, r#"{"success":false,"error":"Sheet not found"}"#),
            Err(TransportError::Rejected("Sheet not found".into()))
        );
        assert!(matches!(interpret_plain_text_reply(200, "{}"), Err(TransportError::Rejected(_))));
        assert_eq!(interpret_plain_text_reply(200, "<html>"), Err(TransportError::Malformed(200)));
        assert_eq!(interpret_plain_text_reply(502, "Bad Gateway"), Err(TransportError::Status(502)));
        assert_eq!(
            interpret_plain_text_reply(500, r#"{"success":false,"error":"quota"}"#),
            Err(TransportError::Rejected("quota".into()))
        );
    }

    #[test]
    fn test_primary_failure_falls_back() {
        let mut f = filled_form();
        let primary_seen = Seen::default();
        let fallback_seen = Seen::default();
        let pipeline = SubmissionPipeline::new(
            vec![
                ScriptedTransport::boxed(TransportKind::FormPost, interpret_form_reply(500), &primary_seen),
                ScriptedTransport::boxed(
                    TransportKind::PlainText,
                    interpret_plain_text_reply(200, r#"{"success":true}"#),
                    &fallback_seen,
                ),
            ],
            Duration::from_secs(15),
            never(),
        );

        let batch = f.begin_submission(datetime!(2025-05-20 04:05:06 UTC)).unwrap();
        assert!(f.is_submitting());
        assert!(!f.submit_enabled());

        let mut phases = Vec::new();
        let outcome = block_on(pipeline.submit(&batch, |p| phases.push(p)));
        phases.iter().for_each(|p| f.record_phase(*p));
        f.finish_submission(&outcome);

        assert_eq!(outcome, SubmissionOutcome::Success { delivered_by: TransportKind::PlainText, records: 2 });
        assert_eq!(phases, [SubmissionPhase::SubmittingPrimary, SubmissionPhase::SubmittingFallback, SubmissionPhase::Success]);
        assert_eq!(f.dates().size(), 0);
        assert_eq!(f.voter_name(), "");
        assert_eq!(f.phase(), SubmissionPhase::Idle);
        assert_eq!(f.message().text, MSG_SUBMITTED);
        assert_eq!(f.message().severity, Severity::Success);

        let sent = fallback_seen.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].data.len(), 2);
        assert!(sent[0].data.iter().all(|r| r.voter_name == "Alice"));
        assert_eq!(sent[0].data[0].voting_time, sent[0].data[1].voting_time);
        assert_eq!(primary_seen.borrow()[0], sent[0]);
    }

    #[test]
    fn test_total_failure_keeps_selection() {
        let mut f = filled_form();
        let seen = Seen::default();
        let pipeline = SubmissionPipeline::new(
            vec![
                ScriptedTransport::boxed(TransportKind::FormPost, Err(TransportError::Network("offline".into())), &seen),
                ScriptedTransport::boxed(TransportKind::PlainText, interpret_plain_text_reply(503, ""), &seen),
            ],
            Duration::from_secs(15),
            never(),
        );

        let batch = f.begin_submission(datetime!(2025-05-20 04:05:06 UTC)).unwrap();
        let outcome = block_on(pipeline.submit(&batch, |_| {}));
        f.finish_submission(&outcome);

        match &outcome {
            SubmissionOutcome::Failure(failure) => {
                assert_eq!(failure.code(), ErrorCode::TransportFailure);
                assert_eq!(failure.attempts.len(), 2);
                assert_eq!(failure.attempts[1], (TransportKind::PlainText, TransportError::Status(503)));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(f.sorted_dates(), vec![key("2025-06-01"), key("2025-06-15")]);
        assert_eq!(f.voter_name(), "Alice");
        assert!(f.submit_enabled());
        assert_eq!(f.message().text, MSG_SUBMIT_FAILED);
        assert!(!f.message().text.contains("offline"));
    }

    #[test]
    fn test_hanging_transport_times_out() {
        let seen = Seen::default();
        let pipeline = SubmissionPipeline::new(
            vec![
                ScriptedTransport::hanging(TransportKind::FormPost, &seen),
                ScriptedTransport::hanging(TransportKind::PlainText, &seen),
            ],
            Duration::from_secs(10),
            instant(),
        );
        let batch = build_batch(filled_form().dates(), "Alice", "", datetime!(2025-05-20 00:00 UTC), taipei()).unwrap();

        let outcome = block_on(pipeline.submit(&batch, |_| {}));
        let expected = TransportError::Timeout(Duration::from_secs(10));
        match outcome {
            SubmissionOutcome::Failure(failure) => {
                assert!(failure.attempts.iter().all(|(_, e)| *e == expected));
                assert_eq!(failure.attempts.len(), 2);
            }
            other => panic!("expected timeout failure, got {:?}", other),
        }
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_invalid_form_never_submits() {
        let mut f = form();
        f.add_date(key("2025-06-01")).unwrap();

        let err = f.begin_submission(datetime!(2025-05-20 00:00 UTC)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(f.phase(), SubmissionPhase::Idle);
        assert_eq!(f.message().text, "Please enter your name");
        assert_eq!(f.dates().size(), 1);
    }

    #[test]
    fn test_second_submission_blocked_while_in_flight() {
        let mut f = filled_form();
        assert!(f.begin_submission(datetime!(2025-05-20 00:00 UTC)).is_ok());
        let err = f.begin_submission(datetime!(2025-05-20 00:00 UTC)).unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionInFlight);

        f.reset();
        assert_eq!(f.dates().size(), 2, "reset is ignored mid-flight");
    }

    #[test]
    fn test_edits_ignored_while_in_flight() {
        let mut f = filled_form();
        f.set_email_address("alice@example.com");
        let batch = f.begin_submission(datetime!(2025-05-20 00:00 UTC)).unwrap();
        let revision = f.revision();

        assert_eq!(f.add_date(key("2025-07-01")), Ok(SelectionChange::Unchanged));
        assert_eq!(f.add_date_text("2025-07-02"), Ok(SelectionChange::Unchanged));
        assert_eq!(f.toggle_date(key("2025-06-01")), Ok(SelectionChange::Unchanged));
        assert_eq!(f.toggle_date(key("2025-07-03")), Ok(SelectionChange::Unchanged));
        assert_eq!(f.remove_date(key("2025-06-15")), SelectionChange::Unchanged);
        f.set_voter_name("Bob");
        f.set_email_address("bob@example.com");

        assert_eq!(f.sorted_dates(), vec![key("2025-06-01"), key("2025-06-15")]);
        assert_eq!(f.voter_name(), "Alice");
        assert_eq!(f.email_address(), "alice@example.com");
        assert_eq!(f.revision(), revision);
        assert_eq!(f.message().text, "Submitting...");

        let sent = batch.envelope.data.iter().map(|r| r.voting_date).collect::<Vec<_>>();
        assert_eq!(sent, f.sorted_dates());
    }

    #[test]
    fn test_success_clears_exactly_what_was_sent() {
        let mut f = filled_form();
        let seen = Seen::default();
        let pipeline = SubmissionPipeline::new(
            vec![ScriptedTransport::boxed(TransportKind::FormPost, Ok(()), &seen)],
            Duration::from_secs(15),
            never(),
        );

        let batch = f.begin_submission(datetime!(2025-05-20 00:00 UTC)).unwrap();
        let before = f.sorted_dates();
        let _ = f.add_date(key("2025-07-01"));
        let outcome = block_on(pipeline.submit(&batch, |p| f.record_phase(p)));
        f.finish_submission(&outcome);

        let sent = seen.borrow()[0].data.iter().map(|r| r.voting_date).collect::<Vec<_>>();
        assert_eq!(sent, before);
        assert!(f.dates().is_empty());
        assert!(f.add_date(key("2025-07-01")).is_ok(), "edits resume after the outcome");
        assert_eq!(f.dates().size(), 1);
    }

    #[test]
    fn test_transport_error_codes_by_position() {
        assert_eq!(TransportError::Status(500).code_at(0), ErrorCode::TransportPrimaryFailure);
        assert_eq!(TransportError::Timeout(Duration::from_secs(15)).code_at(1), ErrorCode::TransportFallbackFailure);
        assert_eq!(TransportError::Simulated.code_at(0), ErrorCode::SimulatedFailure);
    }

    #[test]
    fn test_error_display_carries_code() {
        let err = Error::new(ErrorCode::SubmissionInFlight, "A submission is already in progress");
        assert_eq!(err.to_string(), "Submission already in progress: A submission is already in progress");

        let encoded: Error = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert_eq!(encoded.code, ErrorCode::Encoding);
        assert!(encoded.message.starts_with("could not encode submission: "));
    }

    #[test]
    fn test_reset_clears_form() {
        let mut f = filled_form();
        f.set_email_address("alice@example.com");
        f.reset();

        assert!(f.dates().is_empty());
        assert_eq!(f.voter_name(), "");
        assert_eq!(f.email_address(), "");
        assert!(!f.is_valid());
        assert_eq!(f.message().text, MSG_FORM_CLEARED);
        assert_eq!(f.message().severity, Severity::Info);
    }

    #[test]
    fn test_strict_email_blocks_submit_control() {
        let mut f = VoteForm::new(today(), taipei(), ValidationPolicy { require_valid_email: true });
        f.add_date(key("2025-06-01")).unwrap();
        f.set_voter_name("Alice");
        assert!(f.submit_enabled());

        f.set_email_address("alice@");
        assert!(!f.submit_enabled());
        f.set_email_address("alice@example.com");
        assert!(f.submit_enabled());
    }

    #[test]
    fn test_simulated_transport() {
        let envelope = SubmitEnvelope::new(Vec::new());

        let always = SimulatedTransport::new(SimulationSettings { failure_rate: 0.0, seed: Some(7), ..Default::default() }, instant());
        assert_eq!(block_on(always.deliver(&envelope)), Ok(()));

        let never_ok = SimulatedTransport::new(SimulationSettings { failure_rate: 1.0, seed: Some(7), ..Default::default() }, instant());
        assert_eq!(block_on(never_ok.deliver(&envelope)), Err(TransportError::Simulated));

        let settings = SimulationSettings { failure_rate: 0.5, seed: Some(42), ..Default::default() };
        let a = SimulatedTransport::new(settings, instant());
        let b = SimulatedTransport::new(settings, instant());
        let run = |t: &SimulatedTransport| (0..20).map(|_| block_on(t.deliver(&envelope)).is_ok()).collect::<Vec<_>>();
        assert_eq!(run(&a), run(&b));
    }

    #[test]
    fn test_simulated_pipeline_failure_code() {
        let settings = SimulationSettings { failure_rate: 1.0, seed: Some(1), ..Default::default() };
        let pipeline = SubmissionPipeline::simulated(settings, Duration::from_secs(15), instant());
        assert_eq!(pipeline.transport_kinds(), vec![TransportKind::Simulated]);

        let batch = build_batch(filled_form().dates(), "Alice", "", datetime!(2025-05-20 00:00 UTC), taipei()).unwrap();
        let mut phases = Vec::new();
        match block_on(pipeline.submit(&batch, |p| phases.push(p))) {
            SubmissionOutcome::Failure(failure) => assert_eq!(failure.code(), ErrorCode::SimulatedFailure),
            other => panic!("expected simulated failure, got {:?}", other),
        }
        assert_eq!(phases, [SubmissionPhase::SubmittingPrimary, SubmissionPhase::Failure]);
    }
}
