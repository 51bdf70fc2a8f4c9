//! Leave-request lifecycle: Pending → Approved | Rejected, both terminal.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;
use uuid::Uuid;

use crate::auth::Identity;
use crate::calendar::Clock;
use crate::error::{EngineError, Result};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::store::RecordStore;

/// Submission payload as the transport layer hands it over.
#[derive(Debug, Clone)]
pub struct SubmitLeave {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LeaveDecision {
    Approved,
    Rejected,
}

impl From<LeaveDecision> for LeaveStatus {
    fn from(decision: LeaveDecision) -> Self {
        match decision {
            LeaveDecision::Approved => LeaveStatus::Approved,
            LeaveDecision::Rejected => LeaveStatus::Rejected,
        }
    }
}

/// Listing filter; both fields optional, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct LeaveFilter {
    pub employee_id: Option<String>,
    pub status: Option<LeaveStatus>,
}

pub struct LeaveWorkflow {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl LeaveWorkflow {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Validates and files a Pending request on behalf of `employee_id`.
    /// Nothing is written when validation fails.
    pub async fn submit(&self, employee_id: &str, payload: SubmitLeave) -> Result<LeaveRequest> {
        if payload.end_date < payload.start_date {
            return Err(EngineError::InvalidRange);
        }
        if payload.leave_type.needs_time_window()
            && (payload.start_time.is_none() || payload.end_time.is_none())
        {
            return Err(EngineError::MissingTimeWindow);
        }
        if payload.reason.trim().is_empty() {
            return Err(EngineError::EmptyReason);
        }

        let request = LeaveRequest {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_owned(),
            leave_type: payload.leave_type,
            start_date: payload.start_date,
            end_date: payload.end_date,
            start_time: payload.start_time,
            end_time: payload.end_time,
            reason: payload.reason,
            status: LeaveStatus::Pending,
            admin_remarks: None,
            created_at: self.clock.now(),
        };
        self.store.insert_leave(request.clone()).await?;
        info!(
            employee_id,
            request_id = %request.id,
            leave_type = %request.leave_type,
            "leave request submitted"
        );
        Ok(request)
    }

    /// Applies an admin's decision. The status moves out of Pending exactly
    /// once; remarks are stored on that transition and never touched again.
    pub async fn decide(
        &self,
        request_id: Uuid,
        actor: &Identity,
        decision: LeaveDecision,
        remarks: Option<String>,
    ) -> Result<LeaveRequest> {
        actor.require_admin()?;

        let mut request = self
            .store
            .leave_by_id(request_id)
            .await?
            .ok_or(EngineError::NotFound)?;

        if request.status.is_terminal() {
            return Err(EngineError::AlreadyDecided);
        }

        request.status = decision.into();
        request.admin_remarks = remarks;
        self.store.update_leave(request.clone()).await?;
        info!(
            request_id = %request.id,
            decided_by = %actor.employee_id,
            status = %request.status,
            "leave request decided"
        );
        Ok(request)
    }

    /// Pure read; newest first.
    pub async fn list(&self, filter: &LeaveFilter) -> Result<Vec<LeaveRequest>> {
        self.store.leaves(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::model::role::Role;
    use crate::store::memory::MemoryStore;
    use chrono::{DateTime, Duration, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn workflow() -> (LeaveWorkflow, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            DateTime::parse_from_rfc3339("2024-01-05T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        ));
        let store = Arc::new(MemoryStore::new());
        (LeaveWorkflow::new(store, clock.clone()), clock)
    }

    fn full_leave(from: NaiveDate, to: NaiveDate) -> SubmitLeave {
        SubmitLeave {
            leave_type: LeaveType::Full,
            start_date: from,
            end_date: to,
            start_time: None,
            end_time: None,
            reason: "family function".to_owned(),
        }
    }

    fn admin() -> Identity {
        Identity { employee_id: "admin-1".to_owned(), role: Role::Admin }
    }

    fn employee() -> Identity {
        Identity { employee_id: "emp-1".to_owned(), role: Role::Employee }
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let (workflow, _) = workflow();
        let err = workflow
            .submit("e1", full_leave(d(2024, 1, 12), d(2024, 1, 10)))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange));
    }

    #[tokio::test]
    async fn half_day_without_time_window_is_rejected() {
        let (workflow, _) = workflow();
        let mut payload = full_leave(d(2024, 1, 10), d(2024, 1, 10));
        payload.leave_type = LeaveType::Half;
        payload.start_time = Some(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        // end_time missing
        let err = workflow.submit("e1", payload).await.unwrap_err();
        assert!(matches!(err, EngineError::MissingTimeWindow));
    }

    #[tokio::test]
    async fn permission_with_time_window_is_accepted() {
        let (workflow, _) = workflow();
        let mut payload = full_leave(d(2024, 1, 10), d(2024, 1, 10));
        payload.leave_type = LeaveType::Permission;
        payload.start_time = Some(NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        payload.end_time = Some(NaiveTime::from_hms_opt(16, 0, 0).unwrap());
        let request = workflow.submit("e1", payload).await.unwrap();
        assert_eq!(request.status, LeaveStatus::Pending);
        assert!(request.admin_remarks.is_none());
    }

    #[tokio::test]
    async fn blank_reason_is_rejected() {
        let (workflow, _) = workflow();
        let mut payload = full_leave(d(2024, 1, 10), d(2024, 1, 10));
        payload.reason = "   ".to_owned();
        let err = workflow.submit("e1", payload).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyReason));
    }

    #[tokio::test]
    async fn decisions_are_terminal() {
        let (workflow, _) = workflow();
        let request = workflow
            .submit("e1", full_leave(d(2024, 1, 10), d(2024, 1, 12)))
            .await
            .unwrap();

        let approved = workflow
            .decide(request.id, &admin(), LeaveDecision::Approved, Some("ok".to_owned()))
            .await
            .unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.admin_remarks.as_deref(), Some("ok"));

        let err = workflow
            .decide(request.id, &admin(), LeaveDecision::Rejected, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::AlreadyDecided));
    }

    #[tokio::test]
    async fn non_admin_cannot_decide() {
        let (workflow, _) = workflow();
        let request = workflow
            .submit("e1", full_leave(d(2024, 1, 10), d(2024, 1, 12)))
            .await
            .unwrap();
        let err = workflow
            .decide(request.id, &employee(), LeaveDecision::Approved, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Forbidden));

        // untouched by the failed call
        let pending = workflow
            .list(&LeaveFilter { status: Some(LeaveStatus::Pending), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn deciding_an_unknown_request_is_not_found() {
        let (workflow, _) = workflow();
        let err = workflow
            .decide(Uuid::new_v4(), &admin(), LeaveDecision::Approved, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound));
    }

    #[tokio::test]
    async fn listing_filters_and_orders_newest_first() {
        let (workflow, clock) = workflow();
        let first = workflow
            .submit("e1", full_leave(d(2024, 1, 10), d(2024, 1, 10)))
            .await
            .unwrap();
        clock.advance(Duration::minutes(5));
        let second = workflow
            .submit("e2", full_leave(d(2024, 1, 11), d(2024, 1, 11)))
            .await
            .unwrap();

        let all = workflow.list(&LeaveFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);

        let just_e1 = workflow
            .list(&LeaveFilter { employee_id: Some("e1".to_owned()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(just_e1.len(), 1);
        assert_eq!(just_e1[0].id, first.id);
    }
}
