use super::*;
use dwf_core::test_support::{computation_state, epoch_plus, name_path, state_in, workflow_id};
use dwf_core::{ExecutionState, Given, Name, ResultState};

/// A status as the prior run's loader would hand it in: a `job_before`
/// snapshot, with nothing executed yet this run.
fn status_at(path: &[&str], state: dwf_core::State) -> (NamePath, JobStatus) {
    let identifier = workflow_id("w1");
    let full_path = name_path(path);
    let name = full_path.segments().last().expect("non-empty").clone();
    let result = ComputationResult {
        state: state.clone(),
        audit_message: String::new(),
        due_at: Given::NotGiven,
        schedule_next_latest_at: Given::NotGiven,
    };
    let job = JobRef::new(Job::new(
        name.clone(),
        computation_state(&identifier, full_path.clone(), state),
        result,
    ));
    let status = JobStatus::from_prior(name, Some(job));
    (full_path, status)
}

#[test]
fn job_status_for_a_fresh_path_is_pending_and_absent() {
    let mut tracker = JobTracker::new(HashMap::new());
    let job_path = dwf_core::test_support::job_path(&workflow_id("w1"), &[], "step");
    let status = tracker.job_status(&job_path);
    assert!(status.job_before.is_none());
    assert!(status.job_executions().is_empty());
}

#[test]
fn job_status_clones_the_prior_run_snapshot_on_first_touch() {
    let state = state_in(ExecutionState::Stopped, ResultState::Success);
    let (full_path, prior_status) = status_at(&["step"], state);
    let mut tracker = JobTracker::new(HashMap::from([(full_path, prior_status)]));

    let job_path = dwf_core::test_support::job_path(&workflow_id("w1"), &[], "step");
    let status = tracker.job_status(&job_path);
    assert!(status.job_before.is_some());
    assert!(status.job_executions().is_empty());
}

#[test]
fn jobs_filters_by_prefix_and_depth() {
    let state = state_in(ExecutionState::Pending, ResultState::Absent);
    let (child_path, child_status) = status_at(&["parent", "child"], state.clone());
    let (grandchild_path, grandchild_status) = status_at(&["parent", "child", "grandchild"], state);
    let mut start = HashMap::new();
    start.insert(child_path, child_status);
    start.insert(grandchild_path, grandchild_status);
    let tracker = JobTracker::new(start);

    let root = name_path(&["parent"]);
    let one_level = tracker.jobs(&root, Some(1));
    assert_eq!(one_level.len(), 1);

    let unbounded = tracker.jobs(&root, None);
    assert_eq!(unbounded.len(), 2);
}

#[test]
fn jobs_excludes_the_root_path_itself() {
    let state = state_in(ExecutionState::Pending, ResultState::Absent);
    let (path, status) = status_at(&["parent"], state);
    let tracker = JobTracker::new(HashMap::from([(path.clone(), status)]));

    assert!(tracker.jobs(&path, None).is_empty());
}

#[test]
fn earliest_due_at_aggregates_the_minimum_across_tracked_jobs() {
    let identifier = workflow_id("w1");
    let name_a = Name::for_job("a").expect("valid");
    let name_b = Name::for_job("b").expect("valid");
    let state = state_in(ExecutionState::Pending, ResultState::Absent);

    let make = |name: Name, offset: u64| {
        let path = NamePath::from(vec![name.clone()]);
        let result = ComputationResult {
            state: state.clone(),
            audit_message: String::new(),
            due_at: Given::Given(Some(dwf_core::ScheduleAt::At(epoch_plus(offset)))),
            schedule_next_latest_at: Given::NotGiven,
        };
        let job = JobRef::new(Job::new(name.clone(), computation_state(&identifier, path.clone(), state.clone()), result));
        let mut status = JobStatus::fresh(name);
        status.add_execution(job);
        (path, status)
    };

    let (path_a, status_a) = make(name_a, 200);
    let (path_b, status_b) = make(name_b, 50);
    let tracker = JobTracker::new(HashMap::from([(path_a, status_a), (path_b, status_b)]));

    let earliest = tracker.earliest_due_at(&NamePath::root(), epoch_plus(0), epoch_plus(0));
    assert_eq!(earliest, Some(epoch_plus(50)));
}
