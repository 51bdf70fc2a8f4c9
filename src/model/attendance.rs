use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
pub enum AttendanceStatus {
    /// Open punch cycle: checked in, not yet checked out.
    PunchedIn,
    Present,
    HalfDay,
    /// Never written by the punch cycle; only reported by aggregation as the
    /// residual of unaccounted employee-days.
    Absent,
}

/// One employee's punch record for one calendar date. At most one record per
/// (employee, date); created on first punch-in, completed in place by
/// punch-out, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: String,
    pub date: NaiveDate,
    /// Immutable once set.
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    /// Elapsed hours rounded to two decimals; set on punch-out.
    pub total_hours: Option<f64>,
}

impl AttendanceRecord {
    pub fn showed_up(&self) -> bool {
        matches!(self.status, AttendanceStatus::Present | AttendanceStatus::HalfDay)
    }
}
