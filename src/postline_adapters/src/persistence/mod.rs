pub mod hashmap_comment_store;
pub mod hashmap_like_store;
pub mod hashmap_post_store;
pub mod hashmap_user_store;
pub mod password_hash;
pub mod postgres_comment_store;
pub mod postgres_like_store;
pub mod postgres_post_store;
pub mod postgres_user_store;

pub use hashmap_comment_store::HashMapCommentStore;
pub use hashmap_like_store::HashMapLikeStore;
pub use hashmap_post_store::HashMapPostStore;
pub use hashmap_user_store::HashMapUserStore;
pub use postgres_comment_store::PostgresCommentStore;
pub use postgres_like_store::PostgresLikeStore;
pub use postgres_post_store::PostgresPostStore;
pub use postgres_user_store::PostgresUserStore;
