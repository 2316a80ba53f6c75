//! pc-engine: calculation orchestrator.
//!
//! Owns the current input selections and the derived result set. Each
//! output declares its dependencies on inputs and upstream outputs; the
//! engine builds the dependency graph once, and on every input change marks
//! exactly the transitive closure of dependents stale and recomputes it in
//! topological order — one pass per change, no redundant re-evaluation.
//!
//! A failed upstream (unselected input, lookup miss, domain violation)
//! short-circuits its dependents to the same error; independent chains keep
//! their computed values.

pub mod engine;
pub mod error;
pub mod graph;
pub mod inputs;
pub mod outputs;
pub mod snapshot;

pub use engine::Engine;
pub use error::{EngineError, EngineResult, FailureReason};
pub use inputs::{InputId, Inputs};
pub use outputs::{Dep, OutputId, OutputState};
pub use snapshot::{OutputRecord, OutputStatus};
