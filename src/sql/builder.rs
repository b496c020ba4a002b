//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for one audio table.

use crate::model::{AudioFileType, AudioMetadata, Page};
use crate::registry::{TableSpec, ID_COLUMN};
use crate::sql::PgBindValue;

/// Quote identifier for PostgreSQL (identifiers come from the registry or config only).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Schema-qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its placeholder, cast to `pg_type`.
    fn push_param(&mut self, v: PgBindValue, pg_type: &str) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), pg_type)
    }
}

fn select_column_list(table: &TableSpec) -> String {
    table
        .select_columns()
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key.
pub fn select_by_id(kind: AudioFileType, id: i32, schema: &str) -> QueryBuf {
    let spec = kind.table();
    let mut q = QueryBuf::new();
    let ph = q.push_param(PgBindValue::Int(id), "integer");
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(spec),
        qualified_table(schema, spec.name),
        quoted(ID_COLUMN),
        ph
    );
    q
}

/// SELECT a page ordered by primary key.
pub fn select_page(kind: AudioFileType, page: Page, schema: &str) -> QueryBuf {
    let spec = kind.table();
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list(spec),
        qualified_table(schema, spec.name),
        quoted(ID_COLUMN),
        page.limit.min(Page::MAX_LIMIT),
        page.skip
    );
    q
}

/// INSERT id plus every mutable column; `uploaded_time` comes from the column default.
pub fn insert(metadata: &AudioMetadata, schema: &str) -> QueryBuf {
    let spec = metadata.kind().table();
    let mut q = QueryBuf::new();
    let mut cols = vec![quoted(ID_COLUMN)];
    let mut placeholders = vec![q.push_param(PgBindValue::Int(metadata.id()), "integer")];
    for (c, v) in spec.columns.iter().zip(metadata.column_values()) {
        cols.push(quoted(c.name));
        placeholders.push(q.push_param(v, c.pg_type));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        qualified_table(schema, spec.name),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(spec)
    );
    q
}

/// UPDATE by id: SET every mutable column. `id` and `uploaded_time` are never written.
pub fn update(id: i32, metadata: &AudioMetadata, schema: &str) -> QueryBuf {
    let spec = metadata.kind().table();
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(spec.columns.len());
    for (c, v) in spec.columns.iter().zip(metadata.column_values()) {
        let ph = q.push_param(v, c.pg_type);
        sets.push(format!("{} = {}", quoted(c.name), ph));
    }
    let id_ph = q.push_param(PgBindValue::Int(id), "integer");
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        qualified_table(schema, spec.name),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_ph
    );
    q
}

/// DELETE by id.
pub fn delete(kind: AudioFileType, id: i32, schema: &str) -> QueryBuf {
    let spec = kind.table();
    let mut q = QueryBuf::new();
    let ph = q.push_param(PgBindValue::Int(id), "integer");
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        qualified_table(schema, spec.name),
        quoted(ID_COLUMN),
        ph
    );
    q
}
