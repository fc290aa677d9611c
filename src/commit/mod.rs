//! Commit flow and candidate selection.

pub mod controller;
pub mod flow;

pub use controller::{Decision, select_message};
pub use flow::{CommitOptions, Outcome, run_commit_flow};
