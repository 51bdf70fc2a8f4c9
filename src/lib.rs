//! Attendance & leave aggregation engine.
//!
//! The crate covers the rules behind an employee attendance system: the
//! punch-in/punch-out cycle and the daily status it derives, the
//! leave-request lifecycle with its admin-only decisions, and the read-only
//! aggregation that turns raw records plus approved leave intervals into
//! presence statistics (present / half-day / leave / implied-absent counts)
//! over arbitrary date ranges.
//!
//! Storage and identity are collaborator traits ([`store::RecordStore`],
//! [`auth::TokenVerifier`], [`auth::RoleResolver`]); the embedding process
//! wires concrete implementations into the component constructors. An
//! in-memory store is included for tests and fixtures. No HTTP, database, or
//! terminal I/O happens in this crate.

pub mod aggregate;
pub mod attendance;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod error;
pub mod leave;
pub mod model;
pub mod store;

pub use aggregate::{AggregationEngine, AttendanceSummary, DayBucket, ReportScope};
pub use attendance::AttendanceStateMachine;
pub use auth::{AuthGate, Identity, JwtVerifier, RoleResolver, TokenVerifier};
pub use calendar::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{EngineError, ErrorKind, Result};
pub use leave::{LeaveDecision, LeaveFilter, LeaveWorkflow, SubmitLeave};
pub use model::attendance::{AttendanceRecord, AttendanceStatus};
pub use model::employee::Employee;
pub use model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
pub use model::role::Role;
pub use store::memory::MemoryStore;
pub use store::RecordStore;
