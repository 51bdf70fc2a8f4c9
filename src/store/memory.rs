//! In-process [`RecordStore`] backed by hash maps. Used by the test suite
//! and usable as a fixture store by embedding code; it enforces the same
//! uniqueness invariant a relational backend would via a unique key.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::auth::RoleResolver;
use crate::calendar;
use crate::error::{EngineError, Result};
use crate::leave::LeaveFilter;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use crate::store::RecordStore;

#[derive(Default)]
struct Tables {
    // keyed by (employee_id, date): the uniqueness invariant lives here
    attendance: HashMap<(String, NaiveDate), AttendanceRecord>,
    leaves: HashMap<Uuid, LeaveRequest>,
    employees: HashMap<String, Employee>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| EngineError::Store(anyhow!("store lock poisoned")))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| EngineError::Store(anyhow!("store lock poisoned")))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_attendance(&self, record: AttendanceRecord) -> Result<()> {
        let mut tables = self.write()?;
        let key = (record.employee_id.clone(), record.date);
        if tables.attendance.contains_key(&key) {
            return Err(EngineError::DuplicatePunch);
        }
        tables.attendance.insert(key, record);
        Ok(())
    }

    async fn attendance_for_day(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        let tables = self.read()?;
        Ok(tables
            .attendance
            .get(&(employee_id.to_owned(), date))
            .cloned())
    }

    async fn update_attendance(&self, record: AttendanceRecord) -> Result<()> {
        let mut tables = self.write()?;
        let key = (record.employee_id.clone(), record.date);
        match tables.attendance.get_mut(&key) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(EngineError::Store(anyhow!(
                "attendance record vanished during update"
            ))),
        }
    }

    async fn attendance_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> Result<Vec<AttendanceRecord>> {
        let tables = self.read()?;
        let mut records: Vec<AttendanceRecord> = tables
            .attendance
            .values()
            .filter(|r| start <= r.date && r.date <= end)
            .filter(|r| employee_id.is_none_or(|id| r.employee_id == id))
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.date, r.employee_id.clone()));
        Ok(records)
    }

    async fn insert_leave(&self, request: LeaveRequest) -> Result<()> {
        let mut tables = self.write()?;
        tables.leaves.insert(request.id, request);
        Ok(())
    }

    async fn leave_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>> {
        let tables = self.read()?;
        Ok(tables.leaves.get(&id).cloned())
    }

    async fn update_leave(&self, request: LeaveRequest) -> Result<()> {
        let mut tables = self.write()?;
        match tables.leaves.get_mut(&request.id) {
            Some(existing) => {
                *existing = request;
                Ok(())
            }
            None => Err(EngineError::NotFound),
        }
    }

    async fn leaves(&self, filter: &LeaveFilter) -> Result<Vec<LeaveRequest>> {
        let tables = self.read()?;
        let mut requests: Vec<LeaveRequest> = tables
            .leaves
            .values()
            .filter(|l| {
                filter
                    .employee_id
                    .as_deref()
                    .is_none_or(|id| l.employee_id == id)
            })
            .filter(|l| filter.status.is_none_or(|s| l.status == s))
            .cloned()
            .collect();
        requests.sort_by_key(|l| std::cmp::Reverse(l.created_at));
        Ok(requests)
    }

    async fn approved_leaves_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> Result<Vec<LeaveRequest>> {
        let tables = self.read()?;
        Ok(tables
            .leaves
            .values()
            .filter(|l| l.status == LeaveStatus::Approved)
            .filter(|l| calendar::clamp_overlap(l.start_date, l.end_date, start, end).is_some())
            .filter(|l| employee_id.is_none_or(|id| l.employee_id == id))
            .cloned()
            .collect())
    }

    async fn insert_employee(&self, employee: Employee) -> Result<()> {
        let mut tables = self.write()?;
        tables.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    async fn employee_by_id(&self, id: &str) -> Result<Option<Employee>> {
        let tables = self.read()?;
        Ok(tables.employees.get(id).cloned())
    }

    async fn employee_count(&self) -> Result<u64> {
        let tables = self.read()?;
        Ok(tables.employees.len() as u64)
    }
}

// The original system kept roles next to the roster, so the fixture store
// doubles as the role-mapping collaborator.
#[async_trait]
impl RoleResolver for MemoryStore {
    async fn role_of(&self, employee_id: &str) -> Result<Option<Role>> {
        let tables = self.read()?;
        Ok(tables.employees.get(employee_id).map(|e| e.role))
    }
}
