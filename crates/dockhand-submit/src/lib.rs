//! Submission of an assembled project configuration
//!
//! One [`SubmitClient`] performs the single remote write; the
//! [`SubmitController`] runs it off the caller's task and resolves the
//! [`SubmissionOutcome`] on a watch channel observers subscribe to.

mod client;
mod controller;
mod outcome;

pub use client::{SubmitClient, SubmitError};
pub use controller::SubmitController;
pub use outcome::SubmissionOutcome;
