use chrono::{DateTime, Utc};
use postline_core::{
    Email, NewUser, Password, ResetCode, User, UserId, UserStore, UserStoreError, Username,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::password_hash::{compute_password_hash, verify_password_hash};

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }

    async fn fetch_one_by(&self, column: &str, value: &str) -> Result<User, UserStoreError> {
        let query = format!(
            "SELECT id, name, email, username, reset_code, created_at FROM users WHERE {column} = $1"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    username: String,
    reset_code: Option<i64>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let reset_code = row
            .reset_code
            .map(|code| u32::try_from(code).map(ResetCode::from))
            .transpose()
            .map_err(unexpected)?;

        Ok(User {
            id: UserId::from(row.id),
            name: row.name,
            email: Email::parse(&row.email).map_err(unexpected)?,
            username: Username::parse(&row.username).map_err(unexpected)?,
            reset_code,
            created_at: row.created_at,
        })
    }
}

fn unexpected(e: impl ToString) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let created = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            username: user.username,
            reset_code: None,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
                INSERT INTO users (id, name, email, username, password_hash, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(created.id.as_uuid())
        .bind(&created.name)
        .bind(created.email.as_ref())
        .bind(created.username.as_ref())
        .bind(password_hash.expose_secret())
        .bind(created.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        Ok(created)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, username, reset_code, created_at
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.fetch_one_by("email", email.as_ref()).await
    }

    #[tracing::instrument(name = "Retrieving user by username from PostgreSQL", skip_all)]
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        self.fetch_one_by("username", username.as_ref()).await
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate_user(
        &self,
        id: &UserId,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let password_hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;

        let Some(password_hash) = password_hash else {
            return Err(UserStoreError::UserNotFound);
        };

        verify_password_hash(Secret::from(password_hash), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)
    }

    #[tracing::instrument(name = "Storing reset code", skip_all)]
    async fn set_reset_code(&self, id: &UserId, code: ResetCode) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET reset_code = $1 WHERE id = $2")
            .bind(i64::from(code.value()))
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        id: &UserId,
        expected_code: &ResetCode,
        new_password: Password,
        next_code: ResetCode,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1, reset_code = $2
                WHERE id = $3 AND reset_code = $4
            "#,
        )
        .bind(password_hash.expose_secret())
        .bind(i64::from(next_code.value()))
        .bind(id.as_uuid())
        .bind(i64::from(expected_code.value()))
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(unexpected)?;

        if exists {
            Err(UserStoreError::ResetCodeMismatch)
        } else {
            Err(UserStoreError::UserNotFound)
        }
    }
}
