use super::*;
use crate::error::SimpleError;
use crate::id::WorkflowIdentifier;
use crate::path::NamePath;
use crate::state::ScheduleAt;
use std::time::{Duration, UNIX_EPOCH};

fn computation_state_with(state: State) -> ComputationState {
    ComputationState::new(state, WorkflowIdentifier::new("w1"), NamePath::root(), None)
}

fn fresh() -> State {
    State::fresh(UNIX_EPOCH)
}

#[test]
fn pending_clears_error_and_sets_pending_absent() {
    let mut state = fresh();
    state.error = Some(crate::error::RawError::new("simple", 1, "stale"));
    let cs = computation_state_with(state);
    let result = Results::using(&cs).pending("go", ScheduleHints::default());
    assert!(result.state.error.is_none());
    assert_eq!(result.state.execution_state, ExecutionState::Pending);
    assert_eq!(result.state.result_state, ResultState::Absent);
}

#[test]
fn success_is_stopped_success_with_no_error() {
    let cs = computation_state_with(fresh());
    let result = Results::using(&cs).success("done", ScheduleHints::default());
    assert_eq!(result.state.execution_state, ExecutionState::Stopped);
    assert_eq!(result.state.result_state, ResultState::Success);
    assert!(result.state.error.is_none());
}

#[test]
fn cancelled_is_stopped_cancelled_with_no_error() {
    let cs = computation_state_with(fresh());
    let result = Results::using(&cs).cancelled("bye", ScheduleHints::default());
    assert_eq!(result.state.execution_state, ExecutionState::Stopped);
    assert_eq!(result.state.result_state, ResultState::Cancelled);
    assert!(result.state.error.is_none());
}

#[test]
fn cancelling_is_cancelling_absent() {
    let cs = computation_state_with(fresh());
    let result = Results::using(&cs).cancelling("stop please", ScheduleHints::default());
    assert_eq!(result.state.execution_state, ExecutionState::Cancelling);
    assert_eq!(result.state.result_state, ResultState::Absent);
}

#[test]
fn paused_is_paused_absent() {
    let cs = computation_state_with(fresh());
    let result = Results::using(&cs).paused("hold on", ScheduleHints::default());
    assert_eq!(result.state.execution_state, ExecutionState::Paused);
    assert_eq!(result.state.result_state, ResultState::Absent);
}

#[test]
fn progressing_is_progressing_absent() {
    let cs = computation_state_with(fresh());
    let result = Results::using(&cs).progressing("working", ScheduleHints::default());
    assert_eq!(result.state.execution_state, ExecutionState::Progressing);
    assert_eq!(result.state.result_state, ResultState::Absent);
}

#[test]
fn handled_failure_carries_the_given_error() {
    let cs = computation_state_with(fresh());
    let error = SimpleError {
        serialized: "nope".to_string(),
    };
    let result = Results::using(&cs).handled_failure(&error, "failed", ScheduleHints::default());
    assert_eq!(result.state.execution_state, ExecutionState::Stopped);
    assert_eq!(result.state.result_state, ResultState::HandledFailure);
    assert_eq!(result.state.error, Some(error.raw()));
}

#[test]
fn unhandled_failure_serializes_the_exception() {
    use crate::error::ExceptionSerializer;
    let cs = computation_state_with(fresh());
    let serializer = crate::error::SimpleExceptionSerializer;
    let exc = std::io::Error::other("boom");
    let result = Results::using(&cs).unhandled_failure(&exc, "caught", &serializer, ScheduleHints::default());
    assert_eq!(result.state.result_state, ResultState::UnhandledFailure);
    assert_eq!(result.state.error, Some(serializer.serialize_exception(&exc)));
}

#[test]
fn no_change_preserves_state_when_omitted() {
    let cs = computation_state_with(fresh());
    let result = Results::using(&cs).no_change("", ScheduleHints::default());
    assert_eq!(result.state, fresh());
}

/// Scenario B: `no_change` with no date args carries forward the state's
/// existing non-null hints; passing explicit hints overrides them.
#[test]
fn no_change_carries_over_existing_dates() {
    let mut state = fresh();
    state.due_at = Some(ScheduleAt::At(UNIX_EPOCH + Duration::from_secs(1)));
    state.schedule_next_latest_at = Some(ScheduleAt::At(UNIX_EPOCH + Duration::from_secs(2)));
    let cs = computation_state_with(state.clone());

    let result = Results::using(&cs).no_change("", ScheduleHints::default());
    assert_eq!(result.due_at, Given::Given(state.due_at));
    assert_eq!(
        result.schedule_next_latest_at,
        Given::Given(state.schedule_next_latest_at)
    );

    let explicit_due = Some(ScheduleAt::At(UNIX_EPOCH + Duration::from_secs(3)));
    let explicit_next = Some(ScheduleAt::At(UNIX_EPOCH + Duration::from_secs(4)));
    let result = Results::using(&cs).no_change(
        "",
        ScheduleHints {
            due_at: Given::Given(explicit_due),
            schedule_next_latest_at: Given::Given(explicit_next),
        },
    );
    assert_eq!(result.due_at, Given::Given(explicit_due));
    assert_eq!(result.schedule_next_latest_at, Given::Given(explicit_next));
}

#[test]
fn no_change_keeps_not_given_when_original_hints_are_null() {
    let cs = computation_state_with(fresh());
    let result = Results::using(&cs).no_change("", ScheduleHints::default());
    assert_eq!(result.due_at, Given::NotGiven);
    assert_eq!(result.schedule_next_latest_at, Given::NotGiven);
}
