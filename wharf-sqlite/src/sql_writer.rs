use std::fmt::Write;
use wharf_core::{Result, SqlWriter};

#[derive(Debug, Default)]
pub struct SQLiteSqlWriter {}

impl SqlWriter for SQLiteSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    /// SQLite takes the limit first.
    fn write_limit_offset(&self, out: &mut String, offset: u64, limit: u64) -> Result<()> {
        let _ = write!(out, " LIMIT {} OFFSET {}", limit, offset);
        Ok(())
    }
}
