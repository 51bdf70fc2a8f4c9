use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::role::Role;

/// Roster entry. The identity subsystem owns the lifecycle; attendance and
/// leave records reference it by `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque, stable identifier issued by the identity provider.
    pub id: String,
    pub full_name: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    /// Unique when present.
    pub employee_code: Option<String>,
    pub role: Role,
    pub join_date: NaiveDate,
}
