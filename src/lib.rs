//! WordProblem Coach core: adaptive practice-session building and answer verification,
//! plus the thin HTTP service that exposes them.
//!
//! The two core entry points are plain functions with no I/O:
//!   - [`session::build_session`] picks a standard-diverse, easiest-first problem set
//!   - [`verify::verify_answer`] / [`verify::verify_equation`] grade a free-text answer

pub mod config;
pub mod domain;
pub mod error;
pub mod logic;
pub mod mastery;
pub mod plans;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod verify;

pub use domain::{AnswerType, MasteryRecord, PoolEntry, Problem};
pub use session::{build_session, SessionError};
pub use verify::{verify_answer, verify_equation, Verification};
