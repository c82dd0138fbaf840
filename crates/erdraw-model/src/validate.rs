//! Consistency checks for schema declarations.
//!
//! These checks look at the declaration only: names, keys, references and
//! column types. Nothing here inspects row data.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use log::{debug, info};

use erdraw_core::{
    identifier::Id,
    schema::{Column, ColumnType, Relationship, Schema, Table},
};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode, ModelError};

/// Checks a schema declaration and reports every inconsistency found.
///
/// Warnings alone do not fail validation; they are logged.
///
/// # Errors
///
/// Returns a [`ModelError`] carrying all diagnostics when at least one of
/// them is an error.
pub fn validate(schema: &Schema) -> Result<(), ModelError> {
    info!(tables = schema.len(); "Validating schema");

    let mut collector = DiagnosticCollector::new();

    check_duplicate_tables(schema, &mut collector);
    for table in schema.tables() {
        check_table(table, &mut collector);
    }
    for relationship in schema.relationships() {
        check_reference(schema, relationship, &mut collector);
    }
    check_relationship_names(schema, &mut collector);
    check_isolated_tables(schema, &mut collector);

    let result = collector.finish();
    debug!(valid = result.is_ok(); "Schema validation finished");
    result
}

fn check_duplicate_tables(schema: &Schema, collector: &mut DiagnosticCollector) {
    let mut counts: IndexMap<Id, usize> = IndexMap::new();
    for table in schema.tables() {
        *counts.entry(table.name()).or_default() += 1;
    }

    for (name, count) in counts.into_iter().filter(|(_, count)| *count > 1) {
        collector.emit(
            Diagnostic::error(format!("table `{name}` is declared {count} times"))
                .with_code(ErrorCode::E100)
                .with_label(name, "duplicate declaration")
                .with_help("remove the duplicate or rename one of the tables"),
        );
    }
}

fn check_table(table: &Table, collector: &mut DiagnosticCollector) {
    let name = table.name();

    if table.columns().is_empty() {
        collector.emit(
            Diagnostic::error(format!("table `{name}` has no columns"))
                .with_code(ErrorCode::E103)
                .with_label(name, "declared here"),
        );
        return;
    }

    if table.primary_key().next().is_none() {
        collector.emit(
            Diagnostic::error(format!("table `{name}` has no primary key"))
                .with_code(ErrorCode::E102)
                .with_label(name, "declared here")
                .with_help("mark one or more columns as primary key"),
        );
    }

    let mut seen = HashSet::new();
    for column in table.columns() {
        let path = name.qualify(column.name());
        if !seen.insert(column.name()) {
            collector.emit(
                Diagnostic::error(format!(
                    "column `{}` is declared more than once in table `{name}`",
                    column.name()
                ))
                .with_code(ErrorCode::E101)
                .with_label(path, "duplicate declaration"),
            );
        }
        check_column_type(path, column, collector);
    }
}

fn check_column_type(path: Id, column: &Column, collector: &mut DiagnosticCollector) {
    match column.column_type() {
        ColumnType::String { max_len: Some(0) } => collector.emit(
            Diagnostic::error(format!("column `{path}` can hold no characters"))
                .with_code(ErrorCode::E301)
                .with_label(path, "length bound is zero")
                .with_help("use a positive length or leave the column unbounded"),
        ),
        ColumnType::Enum { name, variants } if variants.is_empty() => collector.emit(
            Diagnostic::error(format!("enumeration `{name}` has no variants"))
                .with_code(ErrorCode::E300)
                .with_label(path, "used here"),
        ),
        ColumnType::Enum { name, variants } => {
            let mut seen = HashSet::new();
            for variant in variants {
                if !seen.insert(variant.as_str()) {
                    collector.emit(
                        Diagnostic::error(format!(
                            "enumeration `{name}` lists `{variant}` more than once"
                        ))
                        .with_code(ErrorCode::E302)
                        .with_label(path, "used here"),
                    );
                }
            }
        }
        _ => {}
    }
}

fn check_reference(schema: &Schema, relationship: &Relationship, collector: &mut DiagnosticCollector) {
    let path = relationship.table().qualify(relationship.column());
    let parent_name = relationship.parent_table();
    let target = parent_name.qualify(relationship.parent_column());

    let Some(parent) = schema.table(parent_name) else {
        collector.emit(
            Diagnostic::error(format!(
                "foreign key `{path}` references undefined table `{parent_name}`"
            ))
            .with_code(ErrorCode::E200)
            .with_label(path, "declared here")
            .with_help(format!("declare table `{parent_name}` or fix the reference")),
        );
        return;
    };

    let Some(parent_column) = parent.column(relationship.parent_column()) else {
        collector.emit(
            Diagnostic::error(format!(
                "foreign key `{path}` references undefined column `{target}`"
            ))
            .with_code(ErrorCode::E201)
            .with_label(path, "declared here")
            .with_secondary_label(parent_name, "table declared here"),
        );
        return;
    };

    if !parent_column.is_primary_key() && !parent_column.is_unique() {
        collector.emit(
            Diagnostic::error(format!(
                "foreign key `{path}` references `{target}`, which is neither a primary key nor unique"
            ))
            .with_code(ErrorCode::E204)
            .with_label(path, "declared here")
            .with_secondary_label(target, "referenced column")
            .with_help(format!("mark `{target}` as unique or reference the primary key")),
        );
    }

    let Some(child_column) = schema
        .table(relationship.table())
        .and_then(|table| table.column(relationship.column()))
    else {
        return;
    };

    if !child_column
        .column_type()
        .is_compatible_with(parent_column.column_type())
    {
        collector.emit(
            Diagnostic::error(format!(
                "foreign key `{path}` of type {} references `{target}` of type {}",
                child_column.column_type(),
                parent_column.column_type()
            ))
            .with_code(ErrorCode::E202)
            .with_label(path, "declared here")
            .with_secondary_label(target, "referenced column"),
        );
    }
}

fn check_relationship_names(schema: &Schema, collector: &mut DiagnosticCollector) {
    // A table sees its own foreign keys by `name` and incoming ones by `back_name`.
    let mut ends: IndexMap<(Id, Id), Vec<Id>> = IndexMap::new();
    for rel in schema.relationships() {
        ends.entry((rel.table(), rel.name()))
            .or_default()
            .push(rel.table().qualify(rel.column()));
        ends.entry((rel.parent_table(), rel.back_name()))
            .or_default()
            .push(rel.table().qualify(rel.column()));
    }

    for ((table, name), columns) in ends.into_iter().filter(|(_, columns)| columns.len() > 1) {
        let mut diag = Diagnostic::error(format!(
            "table `{table}` has {} relationships named `{name}`",
            columns.len()
        ))
        .with_code(ErrorCode::E203)
        .with_label(columns[0], "first relationship");
        for column in &columns[1..] {
            diag = diag.with_secondary_label(*column, "conflicting relationship");
        }
        collector.emit(diag.with_help("give each relationship end a distinct name"));
    }
}

fn check_isolated_tables(schema: &Schema, collector: &mut DiagnosticCollector) {
    let names: IndexSet<Id> = schema.tables().iter().map(Table::name).collect();
    if names.len() < 2 {
        return;
    }

    for name in names {
        let connected = schema.relationships_from(name).next().is_some()
            || schema.referencing(name).next().is_some();
        if !connected {
            collector.emit(
                Diagnostic::warning(format!("table `{name}` takes part in no relationship"))
                    .with_code(ErrorCode::W001)
                    .with_label(name, "declared here"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use erdraw_core::schema::ForeignKey;

    use super::*;

    fn codes(err: &ModelError) -> Vec<ErrorCode> {
        err.diagnostics().iter().filter_map(|d| d.code()).collect()
    }

    fn keyed(name: &str) -> Table {
        Table::new(name).with_column(Column::new("id", ColumnType::Integer).primary_key())
    }

    #[test]
    fn test_valid_schema() {
        let schema = Schema::builder()
            .with_table(keyed("a"))
            .with_table(
                keyed("b").with_column(
                    Column::new("a_id", ColumnType::Integer).references(ForeignKey::new("a", "id")),
                ),
            )
            .build();

        assert!(validate(&schema).is_ok());
    }

    #[test]
    fn test_duplicate_table() {
        let schema = Schema::builder()
            .with_table(keyed("a"))
            .with_table(keyed("a"))
            .build();

        let err = validate(&schema).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E100]);
    }

    #[test]
    fn test_duplicated_isolated_table_warns_once() {
        let schema = Schema::builder()
            .with_table(keyed("a"))
            .with_table(keyed("a"))
            .with_table(keyed("b"))
            .build();

        let err = validate(&schema).unwrap_err();
        assert_eq!(
            codes(&err),
            vec![ErrorCode::E100, ErrorCode::W001, ErrorCode::W001]
        );
        let warned: Vec<_> = err
            .diagnostics()
            .iter()
            .filter(|d| d.severity().is_warning())
            .map(|d| d.labels()[0].path())
            .collect();
        assert_eq!(warned, vec![Id::new("a"), Id::new("b")]);
    }

    #[test]
    fn test_table_structure_errors() {
        let schema = Schema::builder()
            .with_table(Table::new("empty"))
            .with_table(
                Table::new("keyless")
                    .with_column(Column::new("x", ColumnType::Integer))
                    .with_column(Column::new("x", ColumnType::Integer)),
            )
            .build();

        let err = validate(&schema).unwrap_err();
        let codes = codes(&err);
        assert!(codes.contains(&ErrorCode::E103));
        assert!(codes.contains(&ErrorCode::E102));
        assert!(codes.contains(&ErrorCode::E101));
    }

    #[test]
    fn test_undefined_table_and_column() {
        let schema = Schema::builder()
            .with_table(keyed("a"))
            .with_table(
                keyed("b")
                    .with_column(
                        Column::new("ghost_id", ColumnType::Integer)
                            .references(ForeignKey::new("ghost", "id")),
                    )
                    .with_column(
                        Column::new("a_uuid", ColumnType::Integer)
                            .references(ForeignKey::new("a", "uuid")),
                    ),
            )
            .build();

        let err = validate(&schema).unwrap_err();
        let codes = codes(&err);
        assert!(codes.contains(&ErrorCode::E200));
        assert!(codes.contains(&ErrorCode::E201));
        assert_eq!(err.diagnostics()[0].labels()[0].path(), "b.ghost_id");
    }

    #[test]
    fn test_type_mismatch_and_non_identifying_reference() {
        let schema = Schema::builder()
            .with_table(keyed("a").with_column(Column::new("label", ColumnType::varchar(20))))
            .with_table(
                keyed("b").with_column(
                    Column::new("a_label", ColumnType::Integer)
                        .references(ForeignKey::new("a", "label")),
                ),
            )
            .build();

        let err = validate(&schema).unwrap_err();
        let codes = codes(&err);
        assert!(codes.contains(&ErrorCode::E202));
        assert!(codes.contains(&ErrorCode::E204));
    }

    #[test]
    fn test_column_type_errors() {
        let schema = Schema::builder()
            .with_table(
                keyed("a")
                    .with_column(Column::new("nothing", ColumnType::varchar(0)))
                    .with_column(Column::new(
                        "kind",
                        ColumnType::enumeration("none", Vec::<String>::new()),
                    ))
                    .with_column(Column::new(
                        "twice",
                        ColumnType::enumeration("twice", ["x", "x"]),
                    )),
            )
            .build();

        let err = validate(&schema).unwrap_err();
        assert_eq!(
            codes(&err),
            vec![ErrorCode::E301, ErrorCode::E300, ErrorCode::E302]
        );
    }

    #[test]
    fn test_duplicate_relationship_names() {
        let schema = Schema::builder()
            .with_table(keyed("a"))
            .with_table(
                keyed("b")
                    .with_column(
                        Column::new("first_id", ColumnType::Integer)
                            .references(ForeignKey::new("a", "id").with_names("first", "bs")),
                    )
                    .with_column(
                        Column::new("second_id", ColumnType::Integer)
                            .references(ForeignKey::new("a", "id").with_names("second", "bs")),
                    ),
            )
            .build();

        let err = validate(&schema).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E203]);
        assert_eq!(err.diagnostics()[0].labels().len(), 2);
    }

    #[test]
    fn test_isolated_table_is_only_a_warning() {
        let schema = Schema::builder()
            .with_table(keyed("a"))
            .with_table(keyed("b"))
            .build();

        assert!(validate(&schema).is_ok());
    }
}
