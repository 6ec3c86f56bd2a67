pub mod manager;
pub mod memory;
pub mod models;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryPostStore;
pub use models::{NewPost, Post, PostChanges};
pub use store::{PgPostStore, PostStore};
