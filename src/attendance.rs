//! One employee's one-day punch cycle: Unpunched → PunchedIn → Closed.
//!
//! Closing the cycle derives the day's status from the elapsed hours. The
//! machine never writes `Absent`; an absence is always implied later by the
//! aggregation engine for employee-days with no record and no covering leave.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::calendar::{self, Clock};
use crate::error::{EngineError, Result};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::store::RecordStore;

/// Below this many worked hours a closed day counts as a half day; exactly
/// at the threshold it is a full present day.
pub const HALF_DAY_THRESHOLD_HOURS: f64 = 4.0;

pub struct AttendanceStateMachine {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl AttendanceStateMachine {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Opens the punch cycle for (employee, date). Fails with
    /// `DuplicatePunch` when a record already exists; the store enforces the
    /// same invariant for concurrent callers, so the pre-check here only
    /// shortcuts the common case.
    pub async fn punch_in(&self, employee_id: &str, date: NaiveDate) -> Result<AttendanceRecord> {
        if self
            .store
            .attendance_for_day(employee_id, date)
            .await?
            .is_some()
        {
            return Err(EngineError::DuplicatePunch);
        }

        let record = AttendanceRecord {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_owned(),
            date,
            check_in: Some(self.clock.now()),
            check_out: None,
            status: AttendanceStatus::PunchedIn,
            total_hours: None,
        };
        self.store.insert_attendance(record.clone()).await?;
        info!(employee_id, %date, "punched in");
        Ok(record)
    }

    /// Closes the punch cycle. `check_in` stays untouched; the record gains
    /// `check_out`, rounded `total_hours`, and its final status.
    pub async fn punch_out(&self, employee_id: &str, date: NaiveDate) -> Result<AttendanceRecord> {
        let mut record = self
            .store
            .attendance_for_day(employee_id, date)
            .await?
            .ok_or(EngineError::NoOpenPunch)?;

        if record.check_out.is_some() {
            return Err(EngineError::NoOpenPunch);
        }
        let check_in = record.check_in.ok_or(EngineError::NoOpenPunch)?;

        let now = self.clock.now();
        // clocks should never run backwards, but a skewed collaborator clock
        // must not produce a negative workday
        if now < check_in {
            return Err(EngineError::NegativeDuration);
        }

        let hours = calendar::round_hours(now - check_in);
        record.check_out = Some(now);
        record.total_hours = Some(hours);
        record.status = if hours < HALF_DAY_THRESHOLD_HOURS {
            AttendanceStatus::HalfDay
        } else {
            AttendanceStatus::Present
        };

        self.store.update_attendance(record.clone()).await?;
        info!(employee_id, %date, hours, status = %record.status, "punched out");
        Ok(record)
    }
}
