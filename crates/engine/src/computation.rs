// SPDX-License-Identifier: MIT

//! The two contracts a host plugs into the engine (§6): the unit of logic
//! it invokes, and the synchronous resolver it calls out to for input that
//! doesn't come from another computation.

use dwf_core::{ComputationResult, ComputationState, ErrorResolver, ExceptionSerializer};

use crate::engine::ComputationExecutor;

/// A piece of logic addressable by a `JobPath` (§6). `execute` may call the
/// executor any number of times before returning; any failure is modeled
/// as `Err`, which the engine converts to `UNHANDLED_FAILURE` rather than
/// letting it propagate out of `Engine::run` (§4.2 step 8).
pub trait Computation: Send + Sync {
    fn execute(
        &self,
        state: &ComputationState,
        executor: &mut ComputationExecutor<'_>,
    ) -> Result<ComputationResult, Box<dyn std::error::Error + Send + Sync>>;

    /// Override to resolve this computation's own errors instead of the
    /// engine's default (§4.2: "the resolver is the computation itself if
    /// it implements `ErrorResolver`"). Rust has no `isinstance` check for
    /// trait objects, so the override is an explicit opt-in hook rather
    /// than a runtime type test.
    fn error_resolver(&self) -> Option<&dyn ErrorResolver> {
        None
    }

    /// Override to serialize this computation's unhandled exceptions
    /// instead of the engine's default (§4.2, same rationale as
    /// [`Computation::error_resolver`]).
    fn exception_serializer(&self) -> Option<&dyn ExceptionSerializer> {
        None
    }
}

/// Resolves a single piece of external input synchronously (§6). Any
/// failure propagates directly to the calling computation — the engine
/// does not intercept it the way it intercepts `Computation::execute`.
pub trait ExternalInputResolver<T> {
    fn resolve(&self) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
