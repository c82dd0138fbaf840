//! Integration tests for the DiagramBuilder API
//!
//! These tests verify that the public API works end to end without needing
//! the Graphviz binaries: the ER text format and the native SVG engine are
//! produced in-process.

use std::fs;

use erdraw::{
    DiagramBuilder, ErdrawError, Format, Renderer,
    config::{AppConfig, Direction, Engine, LayoutConfig, OutputConfig, StyleConfig},
    schema::{Column, ColumnType, Filter, ForeignKey, Schema, Table},
};
use erdraw_model::error::ErrorCode;

fn native_builder(filter: Filter) -> DiagramBuilder {
    DiagramBuilder::new(AppConfig::new(
        LayoutConfig::new(Engine::Native, Direction::LeftRight),
        StyleConfig::default(),
        filter,
        OutputConfig::default(),
    ))
}

#[test]
fn test_builder_api_exists() {
    let builder = DiagramBuilder::default();
    assert_eq!(
        builder.config().output().path().to_str(),
        Some("diagram.png")
    );
}

#[test]
fn test_render_markdown_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.er");
    let schema = erdraw_model::declare();
    let builder = DiagramBuilder::default();

    builder.render(&schema, &path).expect("Failed to render");

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, builder.render_markdown(&schema));
    assert!(written.contains("comment *--1 user"));
    assert!(written.contains("media *--1 post"));
}

#[test]
fn test_render_native_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.svg");
    let schema = erdraw_model::declare();

    native_builder(Filter::default())
        .render(&schema, &path)
        .expect("Failed to render");

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert_eq!(svg.matches("class=\"relationship\"").count(), 6);
}

#[test]
fn test_rendering_twice_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.er");
    let schema = erdraw_model::declare();
    fs::write(&path, "stale content").unwrap();

    let builder = DiagramBuilder::default();
    builder.render(&schema, &path).unwrap();
    let first = fs::read_to_string(&path).unwrap();
    builder.render(&schema, &path).unwrap();
    let second = fs::read_to_string(&path).unwrap();

    assert!(!first.contains("stale content"));
    assert_eq!(first, second);
}

#[test]
fn test_filter_drops_tables_and_their_relationships() {
    let schema = erdraw_model::declare();
    let builder = native_builder(Filter::default().with_exclude_tables(["follower", "media"]));

    let prepared = builder.prepare(&schema).unwrap();

    assert_eq!(prepared.len(), 3);
    assert_eq!(prepared.relationships().len(), 3);
    assert!(prepared.table("follower").is_none());
    assert!(prepared.referencing("post").all(|rel| rel.table() == "comment"));
}

#[test]
fn test_filter_removing_everything_is_an_error() {
    let schema = erdraw_model::declare();
    let builder = native_builder(Filter::default().with_include_tables(["nothing"]));

    let err = builder.prepare(&schema).unwrap_err();
    assert!(matches!(err, ErdrawError::Graph(_)));
}

#[test]
fn test_invalid_schema_is_rejected_with_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.er");
    let schema = Schema::builder()
        .with_table(Table::new("post").with_column(
            Column::new("user_id", ColumnType::Integer).references(ForeignKey::new("user", "id")),
        ))
        .build();

    let err = DiagramBuilder::default()
        .render(&schema, &path)
        .unwrap_err();

    let err = match err {
        ErdrawError::Model { err } => err,
        other => panic!("expected a model error, got {other:?}"),
    };
    let codes: Vec<ErrorCode> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert!(codes.contains(&ErrorCode::E102));
    assert!(codes.contains(&ErrorCode::E200));
    assert!(!path.exists(), "nothing is written for an invalid schema");
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.bmp");

    let err = DiagramBuilder::default()
        .render(&erdraw_model::declare(), &path)
        .unwrap_err();

    assert!(matches!(err, ErdrawError::UnsupportedFormat(_)));
    assert!(!path.exists());
}

#[test]
fn test_native_engine_cannot_rasterize() {
    let schema = erdraw_model::declare();

    let err = native_builder(Filter::default())
        .render_bytes(&schema, Format::Png)
        .unwrap_err();

    assert!(matches!(err, ErdrawError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_directory_is_an_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("diagram.er");

    let err = DiagramBuilder::default()
        .render(&erdraw_model::declare(), &path)
        .unwrap_err();

    assert!(matches!(err, ErdrawError::Export(_)), "{err:?}");
}

#[cfg(feature = "graphviz")]
#[test]
fn test_render_dot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.dot");
    let schema = erdraw_model::declare();
    let builder = DiagramBuilder::default();

    builder.render(&schema, &path).expect("Failed to render");

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, builder.render_dot(&schema).unwrap());
    assert!(written.contains("\"comment\""));
}
