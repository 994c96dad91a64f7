use chrono::{DateTime, Utc};
use postline_core::{Post, PostChanges, PostId, PostStore, PostStoreError, UserId};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresPostStore { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    category: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId::from(row.id),
            owner: UserId::from(row.owner_id),
            title: row.title,
            category: row.category,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const POST_COLUMNS: &str = "id, owner_id, title, category, description, created_at, updated_at";

fn unexpected(e: sqlx::Error) -> PostStoreError {
    PostStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl PostStore for PostgresPostStore {
    #[tracing::instrument(name = "Adding post to PostgreSQL", skip_all)]
    async fn add_post(&self, post: Post) -> Result<(), PostStoreError> {
        sqlx::query(
            r#"
                INSERT INTO posts (id, owner_id, title, category, description, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.owner.as_uuid())
        .bind(&post.title)
        .bind(&post.category)
        .bind(&post.description)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving post from PostgreSQL", skip_all)]
    async fn get_post(&self, id: &PostId) -> Result<Post, PostStoreError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, PostRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(Post::from)
            .ok_or(PostStoreError::PostNotFound)
    }

    #[tracing::instrument(name = "Listing posts from PostgreSQL", skip_all)]
    async fn list_posts(&self) -> Result<Vec<Post>, PostStoreError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY seq");
        let rows = sqlx::query_as::<_, PostRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[tracing::instrument(name = "Listing owned posts from PostgreSQL", skip_all)]
    async fn list_posts_by_owner(&self, owner: &UserId) -> Result<Vec<Post>, PostStoreError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE owner_id = $1 ORDER BY seq");
        let rows = sqlx::query_as::<_, PostRow>(&query)
            .bind(owner.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[tracing::instrument(name = "Retrieving owned post from PostgreSQL", skip_all)]
    async fn get_owned_post(&self, id: &PostId, owner: &UserId) -> Result<Post, PostStoreError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, PostRow>(&query)
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(Post::from)
            .ok_or(PostStoreError::PostNotFound)
    }

    #[tracing::instrument(name = "Updating owned post in PostgreSQL", skip_all)]
    async fn update_owned_post(
        &self,
        id: &PostId,
        owner: &UserId,
        changes: PostChanges,
    ) -> Result<Post, PostStoreError> {
        let query = format!(
            r#"
                UPDATE posts
                SET title = COALESCE($3, title),
                    category = COALESCE($4, category),
                    description = COALESCE($5, description),
                    updated_at = $6
                WHERE id = $1 AND owner_id = $2
                RETURNING {POST_COLUMNS}
            "#
        );
        sqlx::query_as::<_, PostRow>(&query)
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .bind(changes.title)
            .bind(changes.category)
            .bind(changes.description)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(Post::from)
            .ok_or(PostStoreError::PostNotFound)
    }

    #[tracing::instrument(name = "Deleting owned post from PostgreSQL", skip_all)]
    async fn delete_owned_post(&self, id: &PostId, owner: &UserId) -> Result<(), PostStoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND owner_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(PostStoreError::PostNotFound);
        }
        Ok(())
    }
}
