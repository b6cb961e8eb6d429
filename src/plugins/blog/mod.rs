pub mod handlers;
pub mod memory;
pub mod models;
pub mod plugin;
pub mod repo;
pub mod sanitize;

pub use memory::InMemoryBlogStore;
pub use models::*;
pub use plugin::BlogPlugin;
pub use repo::{open_store, BlogStore, DynBlogStore, PgBlogStore};
