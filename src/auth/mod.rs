//! Token verification, role resolution, and the per-request authorization
//! gate. Both collaborators sit behind traits so deterministic fixtures can
//! stand in for the hosted identity service.

pub mod gate;
pub mod jwt;

pub use gate::{AuthGate, Identity};
pub use jwt::{Claims, JwtVerifier};

use async_trait::async_trait;

use crate::error::Result;
use crate::model::role::Role;

/// Resolves a bearer token to a stable employee identifier.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Fails with `InvalidToken` when the token cannot be verified or names
    /// no identity.
    async fn verify(&self, token: &str) -> Result<String>;
}

/// Maps an employee identifier to its role, `None` when no mapping exists.
#[async_trait]
pub trait RoleResolver: Send + Sync {
    async fn role_of(&self, employee_id: &str) -> Result<Option<Role>>;
}
