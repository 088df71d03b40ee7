//! # User Repository
//!
//! Staff account storage and authentication.
//!
//! Accounts are soft-deleted via `is_active`, never removed: receipts
//! reference cashiers by username and history must stay readable.
//!
//! Passwords are stored as the credential collaborator hands them over;
//! hashing strategy is that collaborator's concern, not the repository's.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use milktea_core::{User, UserRole};

const SELECT_COLUMNS: &str = r#"
    SELECT id, username, password, full_name, role,
           is_active, created_at, last_login_at
    FROM users
"#;

/// Repository for staff account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Verifies credentials against an active account.
    ///
    /// On success the account's `last_login_at` is touched and the updated
    /// user is returned. Wrong password and unknown username are
    /// indistinguishable to the caller: both yield `Ok(None)`.
    pub async fn authenticate(&self, username: &str, password: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "{} WHERE username = ?1 AND is_active = 1",
            SELECT_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut user) = user else {
            return Ok(None);
        };
        if user.password != password {
            debug!(username, "Authentication failed: wrong password");
            return Ok(None);
        }

        let now = Utc::now();
        sqlx::query("UPDATE users SET last_login_at = ?2 WHERE id = ?1")
            .bind(&user.id)
            .bind(now)
            .execute(&self.pool)
            .await?;
        user.last_login_at = Some(now);

        debug!(username, role = %user.role, "User authenticated");
        Ok(Some(user))
    }

    /// Gets a user by ID, active or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Gets a user by username, active or not.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("{} WHERE username = ?1", SELECT_COLUMNS))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Lists all accounts, active first, then by username.
    pub async fn list_all(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "{} ORDER BY is_active DESC, username",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Creates and inserts a new active account, returning it.
    pub async fn create(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
        role: UserRole,
    ) -> DbResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
            role,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        };

        debug!(username = %user.username, role = %user.role, "Creating user");

        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, password, full_name, role,
                is_active, created_at, last_login_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.full_name)
        .bind(user.role)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.last_login_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Updates full name and role.
    pub async fn update(&self, user: &User) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET full_name = ?2, role = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&user.id)
        .bind(&user.full_name)
        .bind(user.role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", &user.id));
        }

        Ok(())
    }

    /// Changes a user's password.
    pub async fn change_password(&self, id: &str, new_password: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET password = ?2 WHERE id = ?1")
            .bind(id)
            .bind(new_password)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Deactivates an account (soft delete): it can no longer log in.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id, "Deactivating user");

        let result = sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Checks whether a username is still free.
    pub async fn is_username_available(&self, username: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?1")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;

        Ok(count == 0)
    }

    /// Counts all accounts, active or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_authenticate() {
        let db = test_db().await;
        let users = db.users();
        users
            .create("admin", "admin123", "Quản trị viên", UserRole::Admin)
            .await
            .unwrap();

        let user = users
            .authenticate("admin", "admin123")
            .await
            .unwrap()
            .expect("should authenticate");
        assert_eq!(user.role, UserRole::Admin);
        assert!(user.last_login_at.is_some());

        // wrong password and unknown user look the same
        assert!(users.authenticate("admin", "wrong").await.unwrap().is_none());
        assert!(users.authenticate("ghost", "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deactivated_user_cannot_login() {
        let db = test_db().await;
        let users = db.users();
        let user = users
            .create("thungan01", "secret", "Nguyễn Thị Thu", UserRole::Employee)
            .await
            .unwrap();

        users.deactivate(&user.id).await.unwrap();

        assert!(users
            .authenticate("thungan01", "secret")
            .await
            .unwrap()
            .is_none());
        // Still visible in listings for audit
        assert_eq!(users.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = test_db().await;
        let users = db.users();
        users
            .create("manager", "a", "Một", UserRole::Manager)
            .await
            .unwrap();

        assert!(!users.is_username_available("manager").await.unwrap());
        let err = users
            .create("manager", "b", "Hai", UserRole::Manager)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_change_password() {
        let db = test_db().await;
        let users = db.users();
        let user = users
            .create("emp", "old", "Nhân viên", UserRole::Employee)
            .await
            .unwrap();

        users.change_password(&user.id, "new").await.unwrap();

        assert!(users.authenticate("emp", "old").await.unwrap().is_none());
        assert!(users.authenticate("emp", "new").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_role() {
        let db = test_db().await;
        let users = db.users();
        let mut user = users
            .create("emp2", "pw", "Nhân viên", UserRole::Employee)
            .await
            .unwrap();

        user.role = UserRole::Manager;
        users.update(&user).await.unwrap();

        let reloaded = users.get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.role, UserRole::Manager);
        assert!(reloaded.can_view_reports());
    }
}
