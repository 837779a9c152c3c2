use chrono::NaiveDate;
use thiserror::Error;

/// Catalog tables that accept partial updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTable {
    Movies,
    Actors,
}

impl CatalogTable {
    pub fn name(&self) -> &'static str {
        match self {
            CatalogTable::Movies => "movies",
            CatalogTable::Actors => "actors",
        }
    }
}

/// A single value to write. Column names never travel with caller data; they
/// come from the entity's static field list.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryBuildError {
    #[error("{table} id is required for update")]
    MissingId { table: &'static str },

    #[error("no fields provided to update {table} {id}")]
    EmptyWriteSet { table: &'static str, id: i32 },
}

/// Collects `(column, optional value)` candidates for one row.
///
/// Zero values (empty text, no date, `0.0`) are absent and never reach the
/// write set. Candidates keep their declaration order.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: CatalogTable,
    candidates: Vec<(&'static str, Option<FieldValue>)>,
}

impl UpdateBuilder {
    pub fn new(table: CatalogTable) -> Self {
        Self {
            table,
            candidates: Vec::new(),
        }
    }

    pub fn text(mut self, column: &'static str, value: &str) -> Self {
        let value = (!value.is_empty()).then(|| FieldValue::Text(value.to_string()));
        self.candidates.push((column, value));
        self
    }

    pub fn date(mut self, column: &'static str, value: Option<NaiveDate>) -> Self {
        self.candidates.push((column, value.map(FieldValue::Date)));
        self
    }

    pub fn float(mut self, column: &'static str, value: f64) -> Self {
        let value = (value != 0.0).then_some(FieldValue::Float(value));
        self.candidates.push((column, value));
        self
    }

    /// Finish the statement for row `id`.
    ///
    /// Fails with [`QueryBuildError::MissingId`] for id 0 and with
    /// [`QueryBuildError::EmptyWriteSet`] when no candidate carries a value, so
    /// a statement with zero assignments is never produced.
    pub fn build(self, id: i32) -> Result<UpdateStatement, QueryBuildError> {
        let table = self.table;
        if id == 0 {
            return Err(QueryBuildError::MissingId { table: table.name() });
        }

        let assignments: Vec<(&'static str, FieldValue)> = self
            .candidates
            .into_iter()
            .filter_map(|(column, value)| value.map(|v| (column, v)))
            .collect();

        if assignments.is_empty() {
            return Err(QueryBuildError::EmptyWriteSet { table: table.name(), id });
        }

        Ok(UpdateStatement { table, id, assignments })
    }
}

/// A non-empty write set addressed to one row by primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    table: CatalogTable,
    id: i32,
    assignments: Vec<(&'static str, FieldValue)>,
}

impl UpdateStatement {
    pub fn table(&self) -> CatalogTable {
        self.table
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn assignments(&self) -> &[(&'static str, FieldValue)] {
        &self.assignments
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(column, _)| *column).collect()
    }

    /// Parameterized SQL. Assignment values bind as `$1..$n` in order and the
    /// id binds last as the row selector.
    pub fn to_sql(&self) -> String {
        let set_clauses: Vec<String> = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ${}", column, i + 1))
            .collect();

        format!(
            "UPDATE {} SET {} WHERE id = ${}",
            self.table.name(),
            set_clauses.join(", "),
            self.assignments.len() + 1
        )
    }
}
