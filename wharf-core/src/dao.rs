use crate::{
    AsValue, Connection, Context, DaoConfig, Driver, Entity, Error, ErrorSink,
    ExpressionCompiler, GroupQuery, Identifier, JoinMap, JoinResolver, JoinType, ListQuery,
    Mapping, MetadataProvider, NativeQuery, Params, Projection, Query, QueryLog, Result,
    RowLabeled, SelectItem, Session, SqlWriter, Statement, UsedPaths,
};

/// Data-access facade over one connection.
///
/// Operations address entities with entity-relative expressions: field names, dotted
/// association paths and `:named` parameters. Every failure is recorded in the session
/// before being returned.
pub struct Dao<C: Connection, M: MetadataProvider> {
    connection: C,
    metadata: M,
    config: DaoConfig,
    session: Session,
}

impl<C: Connection, M: MetadataProvider> Dao<C, M> {
    pub fn new(connection: C, metadata: M) -> Self {
        Self::with_config(connection, metadata, Default::default())
    }

    pub fn with_config(connection: C, metadata: M, config: DaoConfig) -> Self {
        Self {
            connection,
            metadata,
            config,
            session: Session::new(),
        }
    }

    /// Connects to `url`, whose scheme must name the connection driver.
    ///
    /// The query string carries the [`DaoConfig`] options.
    pub fn connect(url: &str, metadata: M) -> Result<Self> {
        let driver = <C::Driver as Driver>::NAME;
        let config = DaoConfig::from_connection_url(url, driver)?;
        let connection = C::connect(url)
            .with_context(|| format!("While connecting with the `{}` driver", driver))?;
        Ok(Self::with_config(connection, metadata, config))
    }

    pub fn config(&self) -> &DaoConfig {
        &self.config
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    pub fn mapping(&self) -> Mapping<'_, M> {
        Mapping::new(&self.metadata)
    }

    pub fn transaction_active(&self) -> bool {
        self.session.transaction_active()
    }

    /// Last failure recorded by this facade, context chain included.
    pub fn last_error(&self) -> Option<&str> {
        self.session.recorder.last()
    }

    pub fn set_error_sink(&mut self, sink: impl ErrorSink + 'static) {
        self.session.recorder.set_sink(sink);
    }

    /// Entities matching the query, pagination applies only when both offset and limit are set.
    pub fn list<E: Entity>(&mut self, query: &ListQuery) -> Result<Vec<E>> {
        let result = self.try_list(query);
        self.session.recorder.check(result)
    }

    /// First entity matching the query.
    pub fn get_one<E: Entity>(&mut self, query: &ListQuery) -> Result<Option<E>> {
        let result = self.try_list(query).map(|v| v.into_iter().next());
        self.session.recorder.check(result)
    }

    /// Number of entities matching the filter of the query.
    pub fn count<E: Entity>(&mut self, query: &ListQuery) -> Result<u64> {
        let result = self.try_count::<E>(query);
        self.session.recorder.check(result)
    }

    /// Aggregates grouped by the requested fields.
    ///
    /// Returns `None` without querying when there is neither an aggregate nor a group field.
    pub fn group<E: Entity>(&mut self, query: &GroupQuery) -> Result<Option<Vec<RowLabeled>>> {
        if query.is_empty() {
            return Ok(None);
        }
        let result = self.try_group::<E>(query).map(Some);
        self.session.recorder.check(result)
    }

    /// Sets `values` on every entity matching the filter, returns the affected rows.
    pub fn update_by_filter<E: Entity>(&mut self, values: &Params, query: &ListQuery) -> Result<u64> {
        if values.is_empty() {
            return Ok(0);
        }
        let result = self.try_update::<E>(values, query);
        self.session.recorder.check(result)
    }

    /// Deletes every entity matching the filter, returns the affected rows.
    pub fn delete_by_filter<E: Entity>(&mut self, query: &ListQuery) -> Result<u64> {
        let result = self.try_delete::<E>(query);
        self.session.recorder.check(result)
    }

    pub fn get<E: Entity>(&mut self, id: impl Into<Identifier>) -> Result<Option<E>> {
        let id = id.into();
        let result = self
            .connection
            .find(E::entity_type(), &id)
            .and_then(|v| v.map(E::from_row).transpose());
        self.session.recorder.check(result)
    }

    /// Reloads `entity` from the storage.
    ///
    /// The lookup uses the identifier fields, or `fields` as a unique key when given. Returns
    /// `false`, leaving the entity untouched, when no record matches.
    pub fn load<E: Entity>(&mut self, entity: &mut E, fields: Option<&[&str]>) -> Result<bool> {
        let result = self.try_load(entity, fields);
        self.session.recorder.check(result)
    }

    /// Inserts or updates the entity.
    pub fn persist<E: Entity>(&mut self, entity: &E) -> Result<()> {
        let result = self.connection.persist(E::entity_type(), entity.row());
        self.session.recorder.check(result)
    }

    pub fn delete<E: Entity>(&mut self, entity: &E) -> Result<()> {
        let result = self
            .identifier_of(entity)
            .and_then(|id| self.connection.remove(E::entity_type(), &id));
        self.session.recorder.check(result)
    }

    /// Removes the entity with the given identifier and returns it, `None` when absent.
    pub fn delete_by_id<E: Entity>(&mut self, id: impl Into<Identifier>) -> Result<Option<E>> {
        let id = id.into();
        let result = self.try_delete_by_id(&id);
        self.session.recorder.check(result)
    }

    pub fn begin_transaction(&mut self) -> Result<()> {
        let result = self.session.begin().and_then(|_| {
            self.connection
                .begin()
                .inspect_err(|_| self.session.reset())
        });
        self.session.recorder.check(result)
    }

    pub fn commit_transaction(&mut self) -> Result<()> {
        let result = self
            .session
            .end("commit")
            .and_then(|_| self.connection.commit());
        self.session.recorder.check(result)
    }

    pub fn rollback_transaction(&mut self) -> Result<()> {
        let result = self
            .session
            .end("rollback")
            .and_then(|_| self.connection.rollback());
        self.session.recorder.check(result)
    }

    /// Executes a native modify statement, returns the affected rows.
    pub fn sql_update(&mut self, sql: &str, params: Params) -> Result<u64> {
        let query = NativeQuery::new(sql, params);
        let log = QueryLog::start(&query.sql, &query.params, self.config.log_queries);
        let result = log
            .finish(self.connection.execute_native(query))
            .map(|v| v.rows_affected);
        self.session.recorder.check(result)
    }

    /// Executes a native query, paginated with the product syntax when both offset and limit
    /// are given.
    pub fn sql_query(
        &mut self,
        sql: &str,
        params: Params,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<RowLabeled>> {
        let result = self.try_sql_query(sql, params, offset.zip(limit));
        self.session.recorder.check(result)
    }

    fn resolve(&self, entity_type: &str) -> Result<JoinMap> {
        JoinResolver::from_config(&self.metadata, &self.config)
            .resolve(entity_type)
            .with_context(|| format!("While resolving the joins of `{}`", entity_type))
    }

    fn compiler<'a>(&'a self, entity_type: &str, joins: &'a JoinMap) -> Result<ExpressionCompiler<'a>> {
        ExpressionCompiler::new(&self.metadata, entity_type, &self.config.root_alias, joins)
    }

    fn try_list<E: Entity>(&mut self, query: &ListQuery) -> Result<Vec<E>> {
        let entity_type = E::entity_type();
        let joins = self.resolve(entity_type)?;
        let compiler = self.compiler(entity_type, &joins)?;
        let mut used = UsedPaths::new();
        let filter = compiler.compile_into(query.filter.as_deref().unwrap_or_default(), &mut used);
        let order_by =
            compiler.compile_into(query.order_by.as_deref().unwrap_or_default(), &mut used);
        let group_by =
            compiler.compile_into(query.group_by.as_deref().unwrap_or_default(), &mut used);
        let mut text = String::new();
        self.connection.driver().sql_writer().write_select(
            &mut text,
            &Projection::Entities,
            &Statement {
                entity: entity_type,
                root_alias: &self.config.root_alias,
                join_type: JoinType::Left,
                joins: joins.used(&used),
                filter: &filter,
                group_by: &group_by,
                order_by: &order_by,
            },
        );
        let mut statement = Query::new(text, query.params.clone());
        match query.pagination() {
            Some((offset, limit)) => statement = statement.paginate(offset, limit),
            None if query.offset.is_some() || query.limit.is_some() => {
                log::warn!(
                    "Listing `{}` with only one of offset and limit, pagination is ignored",
                    entity_type
                );
            }
            None => {}
        }
        let log = QueryLog::start(&statement.text, &statement.params, self.config.log_queries);
        let rows = log.finish(self.connection.fetch(statement))?;
        rows.into_iter()
            .map(E::from_row)
            .collect::<Result<_>>()
            .with_context(|| format!("While reading the `{}` entities", entity_type))
    }

    fn try_count<E: Entity>(&mut self, query: &ListQuery) -> Result<u64> {
        let entity_type = E::entity_type();
        let joins = self.resolve(entity_type)?;
        let compiler = self.compiler(entity_type, &joins)?;
        let identifier = self
            .metadata
            .identifier_fields(entity_type)?
            .first()
            .ok_or_else(|| {
                Error::msg(format!("Entity `{}` has no identifier field", entity_type))
            })?;
        let mut used = UsedPaths::new();
        let filter = compiler.compile_into(query.filter.as_deref().unwrap_or_default(), &mut used);
        let mut text = String::new();
        self.connection.driver().sql_writer().write_select(
            &mut text,
            &Projection::Count(format!("{}.{}", self.config.root_alias, identifier)),
            &Statement {
                entity: entity_type,
                root_alias: &self.config.root_alias,
                join_type: JoinType::Left,
                joins: joins.used(&used),
                filter: &filter,
                ..Default::default()
            },
        );
        let statement = Query::new(text, query.params.clone());
        let log = QueryLog::start(&statement.text, &statement.params, self.config.log_queries);
        let value = log.finish(self.connection.fetch_scalar(statement))?;
        u64::try_from_value(value).context("While reading the count")
    }

    fn try_group<E: Entity>(&mut self, query: &GroupQuery) -> Result<Vec<RowLabeled>> {
        let entity_type = E::entity_type();
        let joins = self.resolve(entity_type)?;
        let compiler = self.compiler(entity_type, &joins)?;
        let mut used = UsedPaths::new();
        let mut items = query
            .aggregates
            .iter()
            .map(|v| SelectItem::Aggregate {
                function: v.function.clone(),
                expression: compiler.compile_into(&v.field, &mut used),
                alias: v.label(),
            })
            .collect::<Vec<_>>();
        let group_fields = query
            .group_fields
            .iter()
            .map(|v| compiler.compile_into(v.trim(), &mut used))
            .collect::<Vec<_>>();
        items.extend(group_fields.iter().cloned().map(SelectItem::Column));
        let group_by = group_fields.join(", ");
        let filter = compiler.compile_into(query.filter.as_deref().unwrap_or_default(), &mut used);
        let order_by =
            compiler.compile_into(query.order_by.as_deref().unwrap_or_default(), &mut used);
        let mut text = String::new();
        self.connection.driver().sql_writer().write_select(
            &mut text,
            &Projection::Columns(items),
            &Statement {
                entity: entity_type,
                root_alias: &self.config.root_alias,
                join_type: JoinType::Default,
                joins: joins.used(&used),
                filter: &filter,
                group_by: &group_by,
                order_by: &order_by,
            },
        );
        let statement = Query::new(text, query.params.clone());
        let log = QueryLog::start(&statement.text, &statement.params, self.config.log_queries);
        log.finish(self.connection.fetch(statement))
    }

    fn try_update<E: Entity>(&mut self, values: &Params, query: &ListQuery) -> Result<u64> {
        let entity_type = E::entity_type();
        let joins = self.resolve(entity_type)?;
        let compiler = self.compiler(entity_type, &joins)?;
        let mut params = query.params.clone();
        let mut assignments = Vec::with_capacity(values.len());
        for (field, value) in values {
            self.metadata.field_type(entity_type, field)?;
            let key = (1..)
                .map(|n| format!("_set_{}_{}", field, n))
                .find(|v| !params.contains_key(v))
                .unwrap_or_default();
            params.insert(key.clone(), value.clone());
            assignments.push((field.as_str(), key));
        }
        let mut used = UsedPaths::new();
        let filter = compiler.compile_into(query.filter.as_deref().unwrap_or_default(), &mut used);
        let mut text = String::new();
        self.connection.driver().sql_writer().write_update(
            &mut text,
            &Statement {
                entity: entity_type,
                root_alias: &self.config.root_alias,
                join_type: JoinType::Default,
                joins: joins.used(&used),
                filter: &filter,
                ..Default::default()
            },
            &assignments,
        );
        let statement = Query::new(text, params);
        self.connection.clear();
        let log = QueryLog::start(&statement.text, &statement.params, self.config.log_queries);
        Ok(log.finish(self.connection.execute(statement))?.rows_affected)
    }

    fn try_delete<E: Entity>(&mut self, query: &ListQuery) -> Result<u64> {
        let entity_type = E::entity_type();
        let joins = self.resolve(entity_type)?;
        let compiler = self.compiler(entity_type, &joins)?;
        let mut used = UsedPaths::new();
        let filter = compiler.compile_into(query.filter.as_deref().unwrap_or_default(), &mut used);
        let mut text = String::new();
        self.connection.driver().sql_writer().write_delete(
            &mut text,
            &Statement {
                entity: entity_type,
                root_alias: &self.config.root_alias,
                join_type: JoinType::Default,
                joins: joins.used(&used),
                filter: &filter,
                ..Default::default()
            },
        );
        let statement = Query::new(text, query.params.clone());
        let log = QueryLog::start(&statement.text, &statement.params, self.config.log_queries);
        Ok(log.finish(self.connection.execute(statement))?.rows_affected)
    }

    fn identifier_of<E: Entity>(&self, entity: &E) -> Result<Identifier> {
        let fields = self.metadata.identifier_fields(E::entity_type())?;
        if fields.is_empty() {
            return Err(Error::msg(format!(
                "Entity `{}` has no identifier field",
                E::entity_type()
            )));
        }
        let fields = fields.iter().map(String::as_str).collect::<Vec<_>>();
        Ok(Identifier::from_params(entity.field_values(&fields)?))
    }

    fn try_load<E: Entity>(&mut self, entity: &mut E, fields: Option<&[&str]>) -> Result<bool> {
        let row = match fields {
            None => {
                let id = self.identifier_of(entity)?;
                self.connection.find(E::entity_type(), &id)?
            }
            Some(fields) => {
                let values = entity.field_values(fields)?;
                self.connection.find_one_by(E::entity_type(), &values)?
            }
        };
        let Some(row) = row else {
            return Ok(false);
        };
        *entity = E::from_row(row)?;
        Ok(true)
    }

    fn try_delete_by_id<E: Entity>(&mut self, id: &Identifier) -> Result<Option<E>> {
        let Some(row) = self.connection.find(E::entity_type(), id)? else {
            return Ok(None);
        };
        let entity = E::from_row(row)?;
        self.connection.remove(E::entity_type(), id)?;
        Ok(Some(entity))
    }

    fn try_sql_query(
        &mut self,
        sql: &str,
        params: Params,
        pagination: Option<(u64, u64)>,
    ) -> Result<Vec<RowLabeled>> {
        let mut sql = sql.to_string();
        if let Some((offset, limit)) = pagination {
            self.connection
                .driver()
                .sql_writer()
                .write_limit_offset(&mut sql, offset, limit)?;
        }
        let query = NativeQuery::new(sql, params);
        let log = QueryLog::start(&query.sql, &query.params, self.config.log_queries);
        log.finish(self.connection.fetch_native(query))
    }
}
