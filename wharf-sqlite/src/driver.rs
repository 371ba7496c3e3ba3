use crate::SQLiteSqlWriter;
use wharf_core::Driver;

#[derive(Debug, Clone, Copy, Default)]
pub struct SQLiteDriver {}

impl SQLiteDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for SQLiteDriver {
    type SqlWriter = SQLiteSqlWriter;

    const NAME: &'static str = "sqlite";
    fn sql_writer(&self) -> SQLiteSqlWriter {
        SQLiteSqlWriter {}
    }
}
