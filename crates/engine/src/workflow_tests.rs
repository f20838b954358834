use super::*;
use crate::job::{Job, JobRef, JobStatus};
use dwf_core::test_support::{computation_state, epoch_plus, workflow_id};
use dwf_core::{ExecutionState, Given, Name, ResultState, ScheduleAt, State};
use std::collections::HashMap;

fn tracked_job(path_segment: &str, due_in_secs: u64) -> (NamePath, JobStatus) {
    let identifier = workflow_id("w1");
    let name = Name::for_job(path_segment).expect("valid");
    let path = NamePath::from(vec![name.clone()]);
    let state = State {
        error: None,
        execution_state: ExecutionState::Pending,
        result_state: ResultState::Absent,
        created_at: epoch_plus(0),
        due_at: None,
        schedule_next_latest_at: None,
    };
    let result = dwf_core::ComputationResult {
        state: state.clone(),
        audit_message: String::new(),
        due_at: Given::Given(Some(ScheduleAt::At(epoch_plus(due_in_secs)))),
        schedule_next_latest_at: Given::NotGiven,
    };
    let job = JobRef::new(Job::new(name.clone(), computation_state(&identifier, path.clone(), state), result));
    let mut status = JobStatus::fresh(name);
    status.add_execution(job);
    (path, status)
}

#[test]
fn earliest_schedule_hints_aggregates_across_the_tracker() {
    let (path_a, status_a) = tracked_job("a", 500);
    let (path_b, status_b) = tracked_job("b", 50);
    let tracker = JobTracker::new(HashMap::from([(path_a, status_a), (path_b, status_b)]));

    let (due_at, next_schedule_at) = earliest_schedule_hints(&tracker, &NamePath::root(), epoch_plus(0), epoch_plus(0));
    assert_eq!(due_at, Some(epoch_plus(50)));
    assert_eq!(next_schedule_at, None);
}
