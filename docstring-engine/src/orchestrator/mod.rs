//! Run-level control flow and its outcome.

pub mod approval;
pub mod engine;
pub mod report;

pub use approval::{AcceptAll, ApprovalOracle, Decision};
pub use engine::{Engine, RunOptions};
pub use report::{Failure, RunReport, Stage, Undocumented};
