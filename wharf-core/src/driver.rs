use crate::{GenericSqlWriter, SqlWriter};

/// A persistence product: its name and its SQL dialect.
pub trait Driver {
    type SqlWriter: SqlWriter;

    /// Product name, also the URL scheme accepted by its connections.
    const NAME: &'static str;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn sql_writer(&self) -> Self::SqlWriter;
}

/// Driver for products without dialect specific behavior.
#[derive(Default, Clone, Copy, Debug)]
pub struct GenericDriver;

impl GenericDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for GenericDriver {
    type SqlWriter = GenericSqlWriter;

    const NAME: &'static str = "generic";

    fn sql_writer(&self) -> GenericSqlWriter {
        GenericSqlWriter::new()
    }
}
