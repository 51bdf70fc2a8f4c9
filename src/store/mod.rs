//! Collaborator contract for the backing record store.
//!
//! The engine mutates records only through this trait. The store is expected
//! to enforce the "(employee, date) → at most one attendance record"
//! invariant itself, so concurrent punch-ins race at the store and the loser
//! gets `DuplicatePunch`, the same shape as a unique-key violation in a
//! relational backend.

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Result;
use crate::leave::LeaveFilter;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveRequest;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts a fresh punch record. Fails with `DuplicatePunch` if a record
    /// already exists for the same (employee, date).
    async fn insert_attendance(&self, record: AttendanceRecord) -> Result<()>;

    async fn attendance_for_day(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>>;

    /// Replaces the stored record with the same id (punch-out completion).
    async fn update_attendance(&self, record: AttendanceRecord) -> Result<()>;

    /// Records with `start <= date <= end`, optionally for one employee.
    async fn attendance_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> Result<Vec<AttendanceRecord>>;

    async fn insert_leave(&self, request: LeaveRequest) -> Result<()>;

    async fn leave_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>>;

    /// Replaces the stored request with the same id (decision).
    async fn update_leave(&self, request: LeaveRequest) -> Result<()>;

    /// Filtered listing, newest first by creation timestamp.
    async fn leaves(&self, filter: &LeaveFilter) -> Result<Vec<LeaveRequest>>;

    /// Approved requests whose `[start_date, end_date]` overlaps
    /// `[start, end]`, optionally for one employee.
    async fn approved_leaves_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> Result<Vec<LeaveRequest>>;

    async fn insert_employee(&self, employee: Employee) -> Result<()>;

    async fn employee_by_id(&self, id: &str) -> Result<Option<Employee>>;

    /// Exact roster size, the `N` of the aggregation formulas.
    async fn employee_count(&self) -> Result<u64>;
}
