//! Cancelable operation bookkeeping shared by the coordinators.
//!
//! Two halves:
//! - [`Generations`] lives in the pure transition code. Every cancelable
//!   operation is issued a [`Ticket`]; a completion is only applied if its
//!   ticket is still current for its [`OpKind`].
//! - [`TaskSet`] lives in the async runner and aborts superseded timer and
//!   fetch tasks so they stop consuming resources.
//!
//! The ticket check alone is sufficient for correctness; aborting is an
//! optimisation that also keeps canceled timers from ever firing.

mod registry;
mod tasks;

pub use registry::{Generations, OpKind, Superseded, Ticket};
pub use tasks::TaskSet;
