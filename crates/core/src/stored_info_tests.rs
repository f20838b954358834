use super::*;
use crate::computation_state::ComputationState;
use crate::error::RawError;
use crate::id::WorkflowIdentifier;
use crate::path::NamePath;
use crate::results::{Results, ScheduleHints};
use crate::state::{ExecutionState, ResultState, ScheduleAt};
use std::time::{Duration, UNIX_EPOCH};

fn fresh() -> State {
    State::fresh(UNIX_EPOCH)
}

fn computation_state_with(state: State) -> ComputationState {
    ComputationState::new(state, WorkflowIdentifier::new("w1"), NamePath::root(), None)
}

/// Testable property 9: `merge` preserves `created_at` and carries
/// `error, execution_state, result_state, due_at, schedule_next_latest_at`
/// from the result.
#[test]
fn merge_carries_transition_fields_from_the_result() {
    let stored = StoredInfo::new(fresh());
    let cs = computation_state_with(stored.state.clone());
    let result = Results::using(&cs).success(
        "done",
        ScheduleHints {
            due_at: Given::Given(Some(ScheduleAt::At(UNIX_EPOCH + Duration::from_secs(5)))),
            schedule_next_latest_at: Given::NotGiven,
        },
    );

    let merged = stored.merge(&result);
    assert_eq!(merged.state.created_at, stored.state.created_at);
    assert_eq!(merged.state.execution_state, ExecutionState::Stopped);
    assert_eq!(merged.state.result_state, ResultState::Success);
    assert_eq!(
        merged.state.due_at,
        Some(ScheduleAt::At(UNIX_EPOCH + Duration::from_secs(5)))
    );
    // NotGiven leaves the previously-stored hint untouched (there was none).
    assert_eq!(merged.state.schedule_next_latest_at, None);
}

#[test]
fn merge_not_given_hint_leaves_stored_value_unchanged() {
    let mut state = fresh();
    state.schedule_next_latest_at = Some(ScheduleAt::At(UNIX_EPOCH + Duration::from_secs(9)));
    let stored = StoredInfo::new(state.clone());
    let cs = computation_state_with(state);
    let result = Results::using(&cs).no_change("", ScheduleHints::default());

    let merged = stored.merge(&result);
    assert_eq!(
        merged.state.schedule_next_latest_at,
        Some(ScheduleAt::At(UNIX_EPOCH + Duration::from_secs(9)))
    );
}

#[test]
fn merge_takes_error_from_the_result_state() {
    let stored = StoredInfo::new(fresh());
    let cs = computation_state_with(stored.state.clone());
    let error = RawError::new("simple", 1, "boom");
    let resolved = crate::error::SimpleError {
        serialized: "boom".to_string(),
    };
    let result = Results::using(&cs).handled_failure(&resolved, "nope", ScheduleHints::default());
    let merged = stored.merge(&result);
    assert_eq!(merged.state.error, Some(error));
}
