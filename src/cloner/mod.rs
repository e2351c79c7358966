//! Deep planning-clone engine.
//!
//! A planning clone is an independent structural copy of a solution
//! graph: mutable decision state (entities and everything marked deep)
//! is copied, immutable facts are shared, aliasing and cycles are
//! preserved. The solver clones to snapshot a best solution before
//! further search mutates it, and to hand each parallel worker its own
//! working copy.
//!
//! # Key Components
//!
//! - [`SolutionCloner`] — the one-operation interface the solver uses
//! - [`PlanningCloner`] — the default field-plan based implementation
//! - [`CloneDecisionOracle`] — decides deep versus shallow per field
//!   and per runtime class
//! - [`CloneError`] — the fatal failure taxonomy
//!
//! # Concurrency
//!
//! One cloner instance may be used from many solver threads at once;
//! per-call state is never shared and the memoization caches tolerate
//! racing idempotent writes.

mod decision;
mod engine;
mod error;
mod strategy;

pub use decision::CloneDecisionOracle;
pub use engine::PlanningCloner;
pub use error::CloneError;

use crate::domain::ObjRef;

/// Produces planning clones of solution graphs.
///
/// Implementations must be usable from multiple solver threads against
/// one shared instance.
pub trait SolutionCloner: Send + Sync {
    /// Returns an independent planning clone of the solution.
    ///
    /// The original is never mutated. Deep-cloned sub-objects are
    /// distinct from their originals, shallow paths stay shared, and a
    /// sub-object reached twice maps to a single clone.
    fn clone_solution(&self, original: &ObjRef) -> Result<ObjRef, CloneError>;
}

/// Clones one independent working copy per parallel solving worker,
/// fanning the clone calls out on the rayon pool.
#[cfg(feature = "parallel")]
pub fn clone_per_worker<C>(
    cloner: &C,
    solution: &ObjRef,
    workers: usize,
) -> Result<Vec<ObjRef>, CloneError>
where
    C: SolutionCloner + ?Sized,
{
    use rayon::prelude::*;

    (0..workers)
        .into_par_iter()
        .map(|_| cloner.clone_solution(solution))
        .collect()
}
