//! # Session Context
//!
//! The authenticated-user context for one cashier shift.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Context                                  │
//! │                                                                         │
//! │  login(db, username, password)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session { user, started_at }  ── passed explicitly to every            │
//! │       │                           operation that needs authorization    │
//! │       ▼                                                                 │
//! │  session.require_manage_menu()? ──► Err(UNAUTHORIZED) for employees     │
//! │                                                                         │
//! │  No global "current user" exists anywhere: who is acting is always      │
//! │  an explicit argument, so tests and concurrent shifts stay honest.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::ApiError;
use milktea_core::User;
use milktea_db::Database;

/// An authenticated session. Owns a copy of the user row as of login time.
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Authenticates against the user store and opens a session.
    ///
    /// ## Errors
    /// `UNAUTHORIZED` on bad credentials or an inactive account; the
    /// message does not reveal which.
    pub async fn login(db: &Database, username: &str, password: &str) -> Result<Self, ApiError> {
        let user = db
            .users()
            .authenticate(username, password)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

        info!(username = %user.username, role = %user.role, "Session opened");

        Ok(Session {
            user,
            started_at: Utc::now(),
        })
    }

    /// Builds a session directly from a user, for tests and tooling.
    pub fn for_user(user: User) -> Self {
        Session {
            user,
            started_at: Utc::now(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Requires the admin-only user management permission.
    pub fn require_manage_users(&self) -> Result<(), ApiError> {
        if self.user.can_manage_users() {
            Ok(())
        } else {
            Err(ApiError::unauthorized(format!(
                "{} may not manage user accounts",
                self.user.role
            )))
        }
    }

    /// Requires the reports permission (admin or manager).
    pub fn require_view_reports(&self) -> Result<(), ApiError> {
        if self.user.can_view_reports() {
            Ok(())
        } else {
            Err(ApiError::unauthorized(format!(
                "{} may not view sales reports",
                self.user.role
            )))
        }
    }

    /// Requires the menu management permission (admin or manager).
    pub fn require_manage_menu(&self) -> Result<(), ApiError> {
        if self.user.can_manage_menu() {
            Ok(())
        } else {
            Err(ApiError::unauthorized(format!(
                "{} may not edit the menu",
                self.user.role
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use milktea_core::UserRole;

    fn user_with_role(role: UserRole) -> User {
        User {
            id: uuid::Uuid::new_v4().to_string(),
            username: "test".to_string(),
            password: "pw".to_string(),
            full_name: "Test".to_string(),
            role,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_employee_permissions() {
        let session = Session::for_user(user_with_role(UserRole::Employee));

        assert_eq!(
            session.require_manage_users().unwrap_err().code,
            ErrorCode::Unauthorized
        );
        assert!(session.require_view_reports().is_err());
        assert!(session.require_manage_menu().is_err());
    }

    #[test]
    fn test_manager_permissions() {
        let session = Session::for_user(user_with_role(UserRole::Manager));

        assert!(session.require_manage_users().is_err());
        assert!(session.require_view_reports().is_ok());
        assert!(session.require_manage_menu().is_ok());
    }

    #[test]
    fn test_admin_permissions() {
        let session = Session::for_user(user_with_role(UserRole::Admin));

        assert!(session.require_manage_users().is_ok());
        assert!(session.require_view_reports().is_ok());
        assert!(session.require_manage_menu().is_ok());
    }

    #[tokio::test]
    async fn test_login_against_db() {
        let db = Database::new(milktea_db::DbConfig::in_memory()).await.unwrap();
        db.users()
            .create("admin", "admin123", "Quản trị viên", UserRole::Admin)
            .await
            .unwrap();

        let session = Session::login(&db, "admin", "admin123").await.unwrap();
        assert_eq!(session.username(), "admin");

        let err = Session::login(&db, "admin", "wrong").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
