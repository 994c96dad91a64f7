use chrono::{DateTime, Utc};
use postline_core::{
    Comment, CommentEntry, CommentId, CommentStore, CommentStoreError, PostId, UserId,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresCommentStore {
    pool: PgPool,
}

impl PostgresCommentStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresCommentStore { pool }
    }

    async fn record_exists(&self, post: &PostId) -> Result<bool, CommentStoreError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM post_comments WHERE post_id = $1)")
            .bind(post.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    async fn load_comment(&self, post: &PostId) -> Result<Comment, CommentStoreError> {
        if !self.record_exists(post).await? {
            return Err(CommentStoreError::CommentNotFound);
        }

        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
                SELECT id, user_id, text, created_at
                FROM post_comment_entries
                WHERE post_id = $1
                ORDER BY seq
            "#,
        )
        .bind(post.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(Comment {
            post: *post,
            entries: rows.into_iter().map(CommentEntry::from).collect(),
        })
    }

    /// Resolves a zero-row entry update into the matching error.
    async fn no_entry_matched(&self, post: &PostId) -> CommentStoreError {
        match self.record_exists(post).await {
            Ok(true) => CommentStoreError::EntryNotFound,
            Ok(false) => CommentStoreError::CommentNotFound,
            Err(e) => e,
        }
    }
}

#[derive(FromRow)]
struct EntryRow {
    id: Uuid,
    user_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for CommentEntry {
    fn from(row: EntryRow) -> Self {
        CommentEntry {
            id: CommentId::from(row.id),
            user: UserId::from(row.user_id),
            text: row.text,
            created_at: row.created_at,
        }
    }
}

fn unexpected(e: sqlx::Error) -> CommentStoreError {
    CommentStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl CommentStore for PostgresCommentStore {
    #[tracing::instrument(name = "Creating comment record in PostgreSQL", skip_all)]
    async fn create_comment(&self, post: &PostId) -> Result<(), CommentStoreError> {
        sqlx::query("INSERT INTO post_comments (post_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(post.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(name = "Retrieving comment record from PostgreSQL", skip_all)]
    async fn get_comment(&self, post: &PostId) -> Result<Comment, CommentStoreError> {
        self.load_comment(post).await
    }

    #[tracing::instrument(name = "Adding comment entry to PostgreSQL", skip_all)]
    async fn push_entry(
        &self,
        post: &PostId,
        entry: CommentEntry,
    ) -> Result<Comment, CommentStoreError> {
        let mut transaction = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query("INSERT INTO post_comments (post_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(post.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(unexpected)?;

        sqlx::query(
            r#"
                INSERT INTO post_comment_entries (id, post_id, user_id, text, created_at)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(post.as_uuid())
        .bind(entry.user.as_uuid())
        .bind(&entry.text)
        .bind(entry.created_at)
        .execute(&mut *transaction)
        .await
        .map_err(unexpected)?;

        transaction.commit().await.map_err(unexpected)?;

        self.load_comment(post).await
    }

    #[tracing::instrument(name = "Removing comment entry from PostgreSQL", skip_all)]
    async fn remove_entry(
        &self,
        post: &PostId,
        id: &CommentId,
        user: &UserId,
    ) -> Result<Comment, CommentStoreError> {
        let result = sqlx::query(
            "DELETE FROM post_comment_entries WHERE post_id = $1 AND id = $2 AND user_id = $3",
        )
        .bind(post.as_uuid())
        .bind(id.as_uuid())
        .bind(user.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(self.no_entry_matched(post).await);
        }
        self.load_comment(post).await
    }

    #[tracing::instrument(name = "Updating comment entry in PostgreSQL", skip_all)]
    async fn update_entry_text(
        &self,
        post: &PostId,
        id: &CommentId,
        user: &UserId,
        text: &str,
    ) -> Result<Comment, CommentStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE post_comment_entries
                SET text = $4
                WHERE post_id = $1 AND id = $2 AND user_id = $3
            "#,
        )
        .bind(post.as_uuid())
        .bind(id.as_uuid())
        .bind(user.as_uuid())
        .bind(text)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(self.no_entry_matched(post).await);
        }
        self.load_comment(post).await
    }

    #[tracing::instrument(name = "Deleting comment record from PostgreSQL", skip_all)]
    async fn delete_comment(&self, post: &PostId) -> Result<(), CommentStoreError> {
        sqlx::query("DELETE FROM post_comments WHERE post_id = $1")
            .bind(post.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
