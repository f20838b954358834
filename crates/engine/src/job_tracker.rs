// SPDX-License-Identifier: MIT

//! Run-scoped registry of every computation touched so far, keyed by full
//! path (§4.4).

use std::collections::HashMap;
use std::time::SystemTime;

use dwf_core::{JobPath, NamePath};

use crate::job::JobStatus;

/// Tracks every [`JobStatus`] touched during one workflow run. `start_jobs`
/// is the snapshot carried in from the prior run (read-only this run);
/// `added_jobs` accumulates as computations are first touched, cloning the
/// corresponding `start_jobs` entry on first read so mutation never leaks
/// back into the prior run's snapshot.
pub struct JobTracker {
    start_jobs: HashMap<NamePath, JobStatus>,
    added_jobs: HashMap<NamePath, JobStatus>,
}

impl JobTracker {
    pub fn new(start_jobs: HashMap<NamePath, JobStatus>) -> Self {
        Self {
            start_jobs,
            added_jobs: HashMap::new(),
        }
    }

    /// The mutable [`JobStatus`] for `job_path`: the already-touched entry
    /// if there is one, else a clone of the prior run's entry, else a fresh
    /// one. Never reads or writes `start_jobs` again once cloned.
    pub fn job_status(&mut self, job_path: &JobPath) -> &mut JobStatus {
        let full_path = job_path.full_path();
        let start_jobs = &self.start_jobs;
        self.added_jobs.entry(full_path.clone()).or_insert_with(|| match start_jobs.get(&full_path) {
            Some(existing) => existing.clone(),
            None => JobStatus::fresh(job_path.job_name.clone()),
        })
    }

    /// Every tracked path under `path`, at most `max_levels` segments below
    /// it (`None` for unbounded), most-recently-touched entries winning
    /// over the prior run's snapshot.
    pub fn jobs(&self, path: &NamePath, max_levels: Option<usize>) -> HashMap<NamePath, &JobStatus> {
        let mut merged: HashMap<&NamePath, &JobStatus> = HashMap::new();
        for (full_path, status) in &self.start_jobs {
            merged.insert(full_path, status);
        }
        for (full_path, status) in &self.added_jobs {
            merged.insert(full_path, status);
        }
        merged
            .into_iter()
            .filter(|(full_path, _)| full_path.starts_with(path))
            .filter_map(|(full_path, status)| {
                let depth_below = full_path.len() - path.len();
                let within_depth = depth_below > 0
                    && match max_levels {
                        Some(max) => depth_below <= max,
                        None => true,
                    };
                within_depth.then(|| (full_path.clone(), status))
            })
            .collect()
    }

    /// Minimum `earliest_due_at` across every job under `path` (§4.4,
    /// aggregated the way `WorkflowInformation.earliest_due_at` is).
    pub fn earliest_due_at(
        &self,
        path: &NamePath,
        delta_base_from: SystemTime,
        must_be_greater_than: SystemTime,
    ) -> Option<SystemTime> {
        self.jobs(path, None)
            .values()
            .filter_map(|status| status.earliest_due_at(delta_base_from, must_be_greater_than))
            .min()
    }

    pub fn earliest_next_schedule_at(
        &self,
        path: &NamePath,
        delta_base_from: SystemTime,
        must_be_greater_than: SystemTime,
    ) -> Option<SystemTime> {
        self.jobs(path, None)
            .values()
            .filter_map(|status| status.earliest_next_schedule_at(delta_base_from, must_be_greater_than))
            .min()
    }

    /// Drain the run's accumulated [`JobStatus`]es for persistence.
    pub fn into_added_jobs(self) -> HashMap<NamePath, JobStatus> {
        self.added_jobs
    }
}

#[cfg(test)]
#[path = "job_tracker_tests.rs"]
mod tests;
