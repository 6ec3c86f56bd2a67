use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A blog post. `author_id` is the subject that created it and is
/// serialized as `authorID` to stay wire-compatible with existing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "authorID")]
    pub author_id: String,
}

/// Fields written by a create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

/// Fields replaced by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}
