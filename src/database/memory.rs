use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewPost, Post, PostChanges};
use super::store::PostStore;

/// In-process `PostStore` for local runs (`STORE_BACKEND=memory`) and tests.
/// Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryPostStore {
    posts: Arc<RwLock<HashMap<String, Post>>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a post as-is, keeping its id. Used to seed fixtures.
    pub async fn insert(&self, post: Post) {
        self.posts.write().await.insert(post.id.clone(), post);
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        let created = Post {
            id: Uuid::new_v4().to_string(),
            title: post.title,
            content: post.content,
            author_id: post.author_id,
        };
        self.posts.write().await.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_owned(
        &self,
        id: &str,
        author_id: &str,
        changes: PostChanges,
    ) -> Result<Post, DatabaseError> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(id) {
            Some(post) if post.author_id == author_id => {
                post.title = changes.title;
                post.content = changes.content;
                Ok(post.clone())
            }
            _ => Err(DatabaseError::NotFound(format!("post '{}' for author '{}'", id, author_id))),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DatabaseError> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(author: &str) -> NewPost {
        NewPost {
            title: "T".to_string(),
            content: "C".to_string(),
            author_id: author.to_string(),
        }
    }

    fn changes(title: &str) -> PostChanges {
        PostChanges {
            title: title.to_string(),
            content: "C2".to_string(),
        }
    }

    #[tokio::test]
    async fn create_generates_distinct_ids() {
        let store = MemoryPostStore::new();
        let a = store.create(new_post("u1")).await.unwrap();
        let b = store.create(new_post("u1")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(store.find_by_id(&a.id).await.unwrap().is_some());
        assert!(store.find_by_id(&b.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_requires_matching_author() {
        let store = MemoryPostStore::new();
        let post = store.create(new_post("u2")).await.unwrap();

        let err = store.update_owned(&post.id, "u1", changes("stolen")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));

        let stored = store.find_by_id(&post.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "T");
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let store = MemoryPostStore::new();
        let err = store.update_owned("missing", "u1", changes("x")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn owner_update_replaces_fields() {
        let store = MemoryPostStore::new();
        let post = store.create(new_post("u1")).await.unwrap();

        let updated = store.update_owned(&post.id, "u1", changes("T2")).await.unwrap();
        assert_eq!(updated.title, "T2");
        assert_eq!(updated.content, "C2");
        assert_eq!(updated.author_id, "u1");
    }

    #[tokio::test]
    async fn find_missing_is_none() {
        let store = MemoryPostStore::new();
        assert!(store.find_by_id("nope").await.unwrap().is_none());
    }
}
