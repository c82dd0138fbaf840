//! The social network data model.
//!
//! Five record types (users, posts, comments, media and follower edges)
//! declare their tables; [`declare`] assembles them into one immutable
//! [`Schema`] and [`validate`] checks a declaration for consistency.
//!
//! # Example
//!
//! ```
//! let schema = erdraw_model::declare();
//!
//! assert_eq!(schema.len(), 5);
//! assert!(erdraw_model::validate(&schema).is_ok());
//! ```

pub mod entities;
pub mod error;

mod validate;

pub use entities::{
    Comment, CommentId, Follower, Media, MediaId, MediaKind, Post, PostId, User, UserId,
};
pub use error::ModelError;
pub use validate::validate;

use log::debug;

use erdraw_core::schema::Schema;

/// Declares the complete social network schema.
///
/// Declaration cannot fail and is deterministic: every call returns an equal
/// value. Callers are expected to do this once at startup and pass the
/// result along.
pub fn declare() -> Schema {
    let schema = Schema::builder()
        .with_entity::<User>()
        .with_entity::<Post>()
        .with_entity::<Comment>()
        .with_entity::<Media>()
        .with_entity::<Follower>()
        .build();

    debug!(
        tables = schema.len(),
        relationships = schema.relationships().len();
        "Schema declared"
    );

    schema
}
