// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dwf-core: the execution core's data model — identifiers, hierarchical
//! addressing, the raw/resolved error model, the per-computation state
//! machine, and the transition factory that enforces it.

pub mod clock;
pub mod computation_state;
pub mod error;
pub mod id;
pub mod path;
pub mod results;
pub mod state;
pub mod stored_info;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use computation_state::ComputationState;
pub use error::{
    ComputationCancelled, ComputationErrored, DefaultErrorResolver, ErrorResolver,
    ExceptionSerializer, RawError, ResolvedError, SimpleError, SimpleExceptionSerializer,
    UnresolvableError,
};
pub use id::{IdGen, SequentialIdGen, UlidIdGen, UuidIdGen, WorkflowIdentifier};
pub use path::{ExternalInputPath, InvalidExternalInputName, InvalidJobName, JobPath, Name, NamePath};
pub use results::{ComputationResult, Results, ScheduleHints};
pub use state::{
    ExecutionState, Given, ResultState, ScheduleAt, ScheduleBy, ScheduleHint, State, StateOverrides,
};
pub use stored_info::StoredInfo;
