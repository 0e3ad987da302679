// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod assign;
mod command;
mod error;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{
    SubmissionResult, TransitionResult, record_session_form, settle, submit_appointment,
    submit_test_request,
};
pub use assign::auto_assign_counselor;
pub use command::{AppointmentForm, SettleAction, TestRequestForm};
pub use error::CoreError;
