use crate::{
    Driver, Error, Identifier, NativeQuery, Params, Query, QueryResult, Result, RowLabeled,
    RowsAffected, Value,
};

/// The persistence engine seen from the data-access layer.
///
/// Only the statement entry points and the record store primitives are required, row and
/// count helpers are derived from them.
pub trait Executor {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Execute an entity-relative statement, returning rows and modify results in order.
    fn run(&mut self, query: Query) -> Result<Vec<QueryResult>>;

    /// Execute a statement in the product own SQL dialect.
    fn run_native(&mut self, query: NativeQuery) -> Result<Vec<QueryResult>>;

    /// Execute the query and returns the rows.
    fn fetch(&mut self, query: Query) -> Result<Vec<RowLabeled>> {
        Ok(rows_of(self.run(query)?))
    }

    /// First column of the first row.
    fn fetch_scalar(&mut self, query: Query) -> Result<Value> {
        let text = query.text.clone();
        self.fetch(query)?
            .into_iter()
            .next()
            .and_then(|row| row.values.into_vec().into_iter().next())
            .ok_or_else(|| Error::msg(format!("Query returned no value: {}", text)))
    }

    /// Execute the query and return the total number of rows affected.
    fn execute(&mut self, query: Query) -> Result<RowsAffected> {
        Ok(affected_of(self.run(query)?))
    }

    fn fetch_native(&mut self, query: NativeQuery) -> Result<Vec<RowLabeled>> {
        Ok(rows_of(self.run_native(query)?))
    }

    fn execute_native(&mut self, query: NativeQuery) -> Result<RowsAffected> {
        Ok(affected_of(self.run_native(query)?))
    }

    /// Record of `entity_type` with the given identifier.
    fn find(&mut self, entity_type: &str, id: &Identifier) -> Result<Option<RowLabeled>>;

    /// Record of `entity_type` matching every field value.
    fn find_one_by(&mut self, entity_type: &str, fields: &Params) -> Result<Option<RowLabeled>>;

    /// Insert or update the record, writing it through to the storage.
    fn persist(&mut self, entity_type: &str, row: RowLabeled) -> Result<()>;

    fn remove(&mut self, entity_type: &str, id: &Identifier) -> Result<()>;

    /// Detach every managed record, engines without an identity cache have nothing to do.
    fn clear(&mut self) {}
}

fn rows_of(results: Vec<QueryResult>) -> Vec<RowLabeled> {
    results
        .into_iter()
        .filter_map(|v| match v {
            QueryResult::Row(v) => Some(v),
            _ => None,
        })
        .collect()
}

fn affected_of(results: Vec<QueryResult>) -> RowsAffected {
    let mut result = RowsAffected::default();
    result.extend(results.into_iter().filter_map(|v| match v {
        QueryResult::Affected(v) => Some(v),
        _ => None,
    }));
    result
}
