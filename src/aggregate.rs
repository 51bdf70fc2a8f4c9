//! Read-only presence statistics over a date range.
//!
//! Absence is never stored; it is the residual of the employee-days the
//! range could hold minus the days accounted for by attendance records and
//! approved leave overlaps. A day carrying both an attendance record and an
//! approved leave is counted on both sides of that subtraction; the floor at
//! zero is the only guard. That matches the source system and is kept as a
//! deliberate approximation rather than a per-employee-day census.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar;
use crate::error::{EngineError, Result};
use crate::model::attendance::AttendanceStatus;
use crate::store::RecordStore;

/// Population a report covers: the whole roster or one employee.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ReportScope {
    AllEmployees,
    Employee(String),
}

impl ReportScope {
    fn employee_id(&self) -> Option<&str> {
        match self {
            ReportScope::AllEmployees => None,
            ReportScope::Employee(id) => Some(id),
        }
    }
}

/// Range-level totals for the dashboard cards and the status pie chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total_employees: u64,
    pub days_in_range: u64,
    /// Days with a full Present record only.
    pub present_only_days: u64,
    pub half_day_days: u64,
    /// Present plus half days: every day the employee showed up.
    pub present_days: u64,
    /// Approved-leave days clamped to the range.
    pub leave_days: u64,
    pub implied_absent_days: u64,
}

/// One bar of the weekly/monthly chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub present: u64,
    pub half_day: u64,
    pub on_leave: u64,
    pub absent: u64,
}

/// The residual absence formula: employee-days the range could hold, minus
/// the ones accounted for by attendance or leave, floored at zero.
pub fn implied_absent(total_employees: u64, days_in_range: u64, accounted_days: u64) -> u64 {
    (total_employees * days_in_range).saturating_sub(accounted_days)
}

pub struct AggregationEngine {
    store: Arc<dyn RecordStore>,
}

impl AggregationEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Totals for `[start, end]` over `scope`. Pure read.
    pub async fn aggregate(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        scope: &ReportScope,
    ) -> Result<AttendanceSummary> {
        if end < start {
            return Err(EngineError::InvalidRange);
        }

        let total_employees = match scope {
            ReportScope::AllEmployees => self.store.employee_count().await?,
            ReportScope::Employee(_) => 1,
        };
        let days_in_range = calendar::days_inclusive(start, end);

        let records = self
            .store
            .attendance_in_range(start, end, scope.employee_id())
            .await?;
        let mut present_only_days = 0u64;
        let mut half_day_days = 0u64;
        for record in &records {
            match record.status {
                AttendanceStatus::Present => present_only_days += 1,
                AttendanceStatus::HalfDay => half_day_days += 1,
                AttendanceStatus::PunchedIn | AttendanceStatus::Absent => {}
            }
        }
        let present_days = present_only_days + half_day_days;

        let leaves = self
            .store
            .approved_leaves_overlapping(start, end, scope.employee_id())
            .await?;
        let leave_days: u64 = leaves
            .iter()
            .map(|l| calendar::overlap_days(l.start_date, l.end_date, start, end))
            .sum();

        let implied_absent_days =
            implied_absent(total_employees, days_in_range, present_days + leave_days);

        debug!(
            %start,
            %end,
            total_employees,
            present_days,
            leave_days,
            implied_absent_days,
            "aggregated attendance"
        );

        Ok(AttendanceSummary {
            total_employees,
            days_in_range,
            present_only_days,
            half_day_days,
            present_days,
            leave_days,
            implied_absent_days,
        })
    }

    /// Per-day counts for `[start, end]` across the whole roster; the same
    /// residual formula applied one day at a time. Pure read.
    pub async fn daily_breakdown(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DayBucket>> {
        if end < start {
            return Err(EngineError::InvalidRange);
        }

        let total_employees = self.store.employee_count().await?;
        let records = self.store.attendance_in_range(start, end, None).await?;
        let leaves = self
            .store
            .approved_leaves_overlapping(start, end, None)
            .await?;

        let mut buckets = Vec::new();
        for day in calendar::date_range(start, end) {
            let mut present = 0u64;
            let mut half_day = 0u64;
            for record in records.iter().filter(|r| r.date == day) {
                match record.status {
                    AttendanceStatus::Present => present += 1,
                    AttendanceStatus::HalfDay => half_day += 1,
                    AttendanceStatus::PunchedIn | AttendanceStatus::Absent => {}
                }
            }
            let on_leave = leaves
                .iter()
                .filter(|l| calendar::covers(l.start_date, l.end_date, day))
                .count() as u64;
            let absent = implied_absent(total_employees, 1, present + half_day + on_leave);
            buckets.push(DayBucket { date: day, present, half_day, on_leave, absent });
        }
        Ok(buckets)
    }
}
