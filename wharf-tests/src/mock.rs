use crate::fixtures;
use std::collections::{BTreeMap, VecDeque};
use url::Url;
use wharf_core::{
    Connection, Driver, Error, Executor, Identifier, MetadataProvider, NativeQuery, Params,
    Query, QueryResult, Result, RowLabeled, RowsAffected, StaticMetadata,
};

/// Engine double: records every statement, answers with scripted results and keeps persisted
/// records in memory.
#[derive(Debug)]
pub struct MockConnection<D: Driver> {
    pub driver: D,
    pub metadata: StaticMetadata,
    /// Entity-relative statements received, in order.
    pub queries: Vec<Query>,
    /// Native statements received, in order.
    pub native: Vec<NativeQuery>,
    /// `begin`, `commit` and `rollback` calls, in order.
    pub transactions: Vec<&'static str>,
    /// Number of times the managed records were detached.
    pub cleared: usize,
    /// Makes every transaction primitive fail.
    pub fail_transactions: bool,
    responses: VecDeque<Result<Vec<QueryResult>>>,
    records: BTreeMap<String, Vec<RowLabeled>>,
}

impl<D: Driver> MockConnection<D> {
    /// A connection over the fixture schema.
    pub fn new(driver: D) -> Self {
        Self::with_metadata(driver, fixtures::schema())
    }

    pub fn with_metadata(driver: D, metadata: StaticMetadata) -> Self {
        Self {
            driver,
            metadata,
            queries: Vec::new(),
            native: Vec::new(),
            transactions: Vec::new(),
            cleared: 0,
            fail_transactions: false,
            responses: VecDeque::new(),
            records: BTreeMap::new(),
        }
    }

    /// Queues the rows returned by the next statement.
    pub fn respond(&mut self, rows: impl IntoIterator<Item = RowLabeled>) -> &mut Self {
        self.responses
            .push_back(Ok(rows.into_iter().map(QueryResult::Row).collect()));
        self
    }

    /// Queues the affected rows reported by the next statement.
    pub fn respond_affected(&mut self, rows_affected: u64) -> &mut Self {
        self.responses
            .push_back(Ok(vec![QueryResult::Affected(RowsAffected {
                rows_affected,
                last_affected_id: None,
            })]));
        self
    }

    /// Makes the next statement fail.
    pub fn fail(&mut self, message: &str) -> &mut Self {
        self.responses.push_back(Err(Error::msg(message.to_string())));
        self
    }

    pub fn records(&self, entity_type: &str) -> &[RowLabeled] {
        self.records
            .get(entity_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Text of the last entity-relative statement.
    pub fn last_query(&self) -> Option<&str> {
        self.queries.last().map(|v| v.text.as_str())
    }

    fn next_response(&mut self) -> Result<Vec<QueryResult>> {
        self.responses.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn matches_identifier(&self, entity_type: &str, row: &RowLabeled, id: &Identifier) -> Result<bool> {
        let fields = self.metadata.identifier_fields(entity_type)?;
        Ok(match id {
            Identifier::Single(value) => {
                fields.len() == 1 && row.get_column(&fields[0]) == Some(value)
            }
            Identifier::Composite(values) => {
                fields.len() == values.len()
                    && fields
                        .iter()
                        .all(|f| values.get(f).is_some() && row.get_column(f) == values.get(f))
            }
        })
    }

    fn position(&self, entity_type: &str, id: &Identifier) -> Result<Option<usize>> {
        for (i, row) in self.records(entity_type).iter().enumerate() {
            if self.matches_identifier(entity_type, row, id)? {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    fn identifier_of(&self, entity_type: &str, row: &RowLabeled) -> Result<Identifier> {
        let values = self
            .metadata
            .identifier_fields(entity_type)?
            .iter()
            .map(|f| {
                row.get_column(f)
                    .map(|v| (f.clone(), v.clone()))
                    .ok_or_else(|| Error::msg(format!("Record has no `{}` identifier", f)))
            })
            .collect::<Result<Params>>()?;
        Ok(Identifier::from_params(values))
    }

    fn transaction(&mut self, action: &'static str) -> Result<()> {
        if self.fail_transactions {
            return Err(Error::msg(format!("Cannot {} the transaction", action)));
        }
        self.transactions.push(action);
        Ok(())
    }
}

impl<D: Driver> Executor for MockConnection<D> {
    type Driver = D;

    fn driver(&self) -> &D {
        &self.driver
    }

    fn run(&mut self, query: Query) -> Result<Vec<QueryResult>> {
        self.queries.push(query);
        self.next_response()
    }

    fn run_native(&mut self, query: NativeQuery) -> Result<Vec<QueryResult>> {
        self.native.push(query);
        self.next_response()
    }

    fn find(&mut self, entity_type: &str, id: &Identifier) -> Result<Option<RowLabeled>> {
        Ok(self
            .position(entity_type, id)?
            .map(|i| self.records(entity_type)[i].clone()))
    }

    fn find_one_by(&mut self, entity_type: &str, fields: &Params) -> Result<Option<RowLabeled>> {
        self.metadata.metadata(entity_type)?;
        Ok(self
            .records(entity_type)
            .iter()
            .find(|row| fields.iter().all(|(k, v)| row.get_column(k) == Some(v)))
            .cloned())
    }

    fn persist(&mut self, entity_type: &str, row: RowLabeled) -> Result<()> {
        let id = self.identifier_of(entity_type, &row)?;
        match self.position(entity_type, &id)? {
            Some(i) => {
                if let Some(records) = self.records.get_mut(entity_type) {
                    records[i] = row;
                }
            }
            None => self
                .records
                .entry(entity_type.to_string())
                .or_default()
                .push(row),
        }
        Ok(())
    }

    fn remove(&mut self, entity_type: &str, id: &Identifier) -> Result<()> {
        let Some(i) = self.position(entity_type, id)? else {
            return Err(Error::msg(format!(
                "No `{}` record with identifier {:?}",
                entity_type, id
            )));
        };
        if let Some(records) = self.records.get_mut(entity_type) {
            records.remove(i);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.cleared += 1;
    }
}

impl<D: Driver + Default> Connection for MockConnection<D> {
    fn connect(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        if url.scheme() != D::NAME {
            return Err(Error::msg(format!(
                "The {} mock cannot open a `{}` URL",
                D::NAME,
                url.scheme()
            )));
        }
        Ok(Self::new(D::default()))
    }

    fn begin(&mut self) -> Result<()> {
        self.transaction("begin")
    }

    fn commit(&mut self) -> Result<()> {
        self.transaction("commit")
    }

    fn rollback(&mut self) -> Result<()> {
        self.transaction("rollback")
    }
}
