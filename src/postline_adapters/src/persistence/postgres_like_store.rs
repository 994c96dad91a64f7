use postline_core::{Like, LikeEntry, LikeStore, LikeStoreError, PostId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresLikeStore {
    pool: PgPool,
}

impl PostgresLikeStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresLikeStore { pool }
    }
}

fn unexpected(e: sqlx::Error) -> LikeStoreError {
    LikeStoreError::UnexpectedError(e.to_string())
}

async fn load_like(pool: &PgPool, post: &PostId) -> Result<Like, LikeStoreError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM post_likes WHERE post_id = $1)")
            .bind(post.as_uuid())
            .fetch_one(pool)
            .await
            .map_err(unexpected)?;
    if !exists {
        return Err(LikeStoreError::LikeNotFound);
    }

    let users: Vec<Uuid> =
        sqlx::query_scalar("SELECT user_id FROM post_like_entries WHERE post_id = $1 ORDER BY seq")
            .bind(post.as_uuid())
            .fetch_all(pool)
            .await
            .map_err(unexpected)?;

    Ok(Like {
        post: *post,
        entries: users
            .into_iter()
            .map(|user| LikeEntry {
                user: UserId::from(user),
            })
            .collect(),
    })
}

#[async_trait::async_trait]
impl LikeStore for PostgresLikeStore {
    #[tracing::instrument(name = "Creating like record in PostgreSQL", skip_all)]
    async fn create_like(&self, post: &PostId) -> Result<(), LikeStoreError> {
        sqlx::query("INSERT INTO post_likes (post_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(post.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(name = "Retrieving like record from PostgreSQL", skip_all)]
    async fn get_like(&self, post: &PostId) -> Result<Like, LikeStoreError> {
        load_like(&self.pool, post).await
    }

    #[tracing::instrument(name = "Removing like from PostgreSQL", skip_all)]
    async fn remove_like(
        &self,
        post: &PostId,
        user: &UserId,
    ) -> Result<Option<Like>, LikeStoreError> {
        let result = sqlx::query("DELETE FROM post_like_entries WHERE post_id = $1 AND user_id = $2")
            .bind(post.as_uuid())
            .bind(user.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        load_like(&self.pool, post).await.map(Some)
    }

    #[tracing::instrument(name = "Adding like to PostgreSQL", skip_all)]
    async fn add_like(&self, post: &PostId, user: &UserId) -> Result<Like, LikeStoreError> {
        let mut transaction = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query("INSERT INTO post_likes (post_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(post.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(unexpected)?;

        sqlx::query(
            r#"
                INSERT INTO post_like_entries (post_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
            "#,
        )
        .bind(post.as_uuid())
        .bind(user.as_uuid())
        .execute(&mut *transaction)
        .await
        .map_err(unexpected)?;

        transaction.commit().await.map_err(unexpected)?;

        load_like(&self.pool, post).await
    }

    #[tracing::instrument(name = "Deleting like record from PostgreSQL", skip_all)]
    async fn delete_like(&self, post: &PostId) -> Result<(), LikeStoreError> {
        sqlx::query("DELETE FROM post_likes WHERE post_id = $1")
            .bind(post.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
