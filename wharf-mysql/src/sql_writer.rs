use std::fmt::Write;
use wharf_core::{Result, SqlWriter};

#[derive(Debug, Default)]
pub struct MySQLSqlWriter {}

impl SqlWriter for MySQLSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_limit_offset(&self, out: &mut String, offset: u64, limit: u64) -> Result<()> {
        let _ = write!(out, " LIMIT {}, {}", offset, limit);
        Ok(())
    }
}
