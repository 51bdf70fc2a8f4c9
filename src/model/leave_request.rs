use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
pub enum LeaveType {
    /// Whole calendar days.
    Full,
    /// Single date with a start/end time window.
    Half,
    /// Short absence within a day, also with a time window.
    Permission,
}

impl LeaveType {
    pub fn needs_time_window(self) -> bool {
        matches!(self, LeaveType::Half | LeaveType::Permission)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Approved and Rejected are terminal; only Pending can transition.
    pub fn is_terminal(self) -> bool {
        self != LeaveStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason: String,
    pub status: LeaveStatus,
    /// Set once, on the transition out of Pending.
    pub admin_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}
