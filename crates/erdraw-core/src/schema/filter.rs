//! Table and column selection for rendering.

use serde::Deserialize;

use crate::identifier::Id;

/// Selects which tables and columns of a schema are drawn.
///
/// Empty include lists mean "everything"; exclusions are applied after
/// inclusions. Column entries may be bare (`id`, matching that column in
/// every table) or qualified (`user.email`).
///
/// # Examples
///
/// ```
/// use erdraw_core::schema::Filter;
///
/// let filter = Filter::default().with_exclude_tables(["follower"]);
/// assert!(filter.keeps_table("user".into()));
/// assert!(!filter.keeps_table("follower".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Filter {
    include_tables: Vec<String>,
    exclude_tables: Vec<String>,
    include_columns: Vec<String>,
    exclude_columns: Vec<String>,
}

impl Filter {
    pub fn with_include_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_tables = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_tables = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_include_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if the filter lets everything through.
    pub fn is_empty(&self) -> bool {
        self.include_tables.is_empty()
            && self.exclude_tables.is_empty()
            && self.include_columns.is_empty()
            && self.exclude_columns.is_empty()
    }

    /// Decides whether `table` is drawn.
    pub fn keeps_table(&self, table: Id) -> bool {
        let included =
            self.include_tables.is_empty() || self.include_tables.iter().any(|t| table == t.as_str());
        included && !self.exclude_tables.iter().any(|t| table == t.as_str())
    }

    /// Decides whether `column` of `table` is drawn.
    pub fn keeps_column(&self, table: Id, column: Id) -> bool {
        let qualified = table.qualify(column);
        let matches = |entry: &String| column == entry.as_str() || qualified == entry.as_str();

        let included = self.include_columns.is_empty() || self.include_columns.iter().any(matches);
        included && !self.exclude_columns.iter().any(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = Filter::default();

        assert!(filter.is_empty());
        assert!(filter.keeps_table(Id::new("user")));
        assert!(filter.keeps_column(Id::new("user"), Id::new("email")));
    }

    #[test]
    fn test_include_then_exclude_tables() {
        let filter = Filter::default()
            .with_include_tables(["user", "post"])
            .with_exclude_tables(["post"]);

        assert!(filter.keeps_table(Id::new("user")));
        assert!(!filter.keeps_table(Id::new("post")));
        assert!(!filter.keeps_table(Id::new("media")));
    }

    #[test]
    fn test_bare_and_qualified_columns() {
        let filter = Filter::default().with_exclude_columns(["firstname", "user.email"]);

        assert!(!filter.keeps_column(Id::new("user"), Id::new("firstname")));
        assert!(!filter.keeps_column(Id::new("user"), Id::new("email")));
        assert!(filter.keeps_column(Id::new("user"), Id::new("username")));
    }

    #[test]
    fn test_include_columns() {
        let filter = Filter::default().with_include_columns(["id"]);

        assert!(filter.keeps_column(Id::new("post"), Id::new("id")));
        assert!(!filter.keeps_column(Id::new("post"), Id::new("user_id")));
    }
}
