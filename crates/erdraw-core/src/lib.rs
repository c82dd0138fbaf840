//! erdraw Core Types and Definitions
//!
//! This crate provides the foundational types for describing a relational
//! schema and drawing it. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Schema**: Tables, columns, relationships and the [`schema::Schema`] value

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod schema;
