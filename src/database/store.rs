use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{NewPost, Post, PostChanges};

/// Persistence boundary for posts. Every method is a single store-level call.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a post with a freshly generated id and return it
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError>;

    /// Update the post matching both `id` and `author_id`.
    ///
    /// Returns `DatabaseError::NotFound` when no row matches, whether the id
    /// does not exist or belongs to another author.
    async fn update_owned(
        &self,
        id: &str,
        author_id: &str,
        changes: PostChanges,
    ) -> Result<Post, DatabaseError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DatabaseError>;

    /// Cheap liveness check used by `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// `PostStore` over a shared PostgreSQL pool
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        let id = Uuid::new_v4().to_string();

        let created = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, title, content, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author_id
            "#,
        )
        .bind(&id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_owned(
        &self,
        id: &str,
        author_id: &str,
        changes: PostChanges,
    ) -> Result<Post, DatabaseError> {
        let updated = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $1, content = $2, updated_at = now()
            WHERE id = $3 AND author_id = $4
            RETURNING id, title, content, author_id
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DatabaseError::NotFound(format!("post '{}' for author '{}'", id, author_id)))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DatabaseError> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, author_id FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
