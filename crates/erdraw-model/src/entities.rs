//! Record types of the social network data model.
//!
//! Each type declares its table through [`Entity`](erdraw_core::schema::Entity).
//! Rows are never built by this crate; the types exist so the schema is
//! spelled out in Rust rather than in strings.

mod comment;
mod follower;
mod media;
mod post;
mod user;

pub use comment::{Comment, CommentId};
pub use follower::Follower;
pub use media::{Media, MediaId, MediaKind};
pub use post::{Post, PostId};
pub use user::{User, UserId};
