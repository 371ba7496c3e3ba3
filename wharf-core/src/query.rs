use crate::{AsValue, Context, Error, Result, Value, truncate_long};
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    sync::Arc,
};

/// Named parameter bindings, keyed by parameter name without the `:` sigil.
pub type Params = BTreeMap<String, Value>;

/// A compiled statement ready to be executed by an [`crate::Executor`].
///
/// The text addresses entities and their fields, never tables and columns. Pagination is
/// carried next to the text so that the engine applies it in its own syntax.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    pub params: Params,
    /// Index of the first row to return.
    pub first_result: Option<u64>,
    /// Maximum number of rows to return.
    pub max_results: Option<u64>,
}

impl Query {
    pub fn new(text: impl Into<String>, params: Params) -> Self {
        Self {
            text: text.into(),
            params,
            ..Default::default()
        }
    }
    pub fn paginate(mut self, offset: u64, limit: u64) -> Self {
        self.first_result = Some(offset);
        self.max_results = Some(limit);
        self
    }
    pub fn is_paginated(&self) -> bool {
        self.first_result.is_some() && self.max_results.is_some()
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Query::new(value, Default::default())
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Query::new(value, Default::default())
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.text))
    }
}

/// How the engine must bind a native parameter.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    #[default]
    Scalar,
    /// Expanded into a comma separated list of placeholders (`IN (:ids)`).
    List,
}

/// A statement in the backend own SQL dialect, passed through untouched.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct NativeQuery {
    pub sql: String,
    pub params: Params,
    pub types: BTreeMap<String, ParamType>,
}

impl NativeQuery {
    /// Builds the statement detecting the parameter types from the bound values.
    pub fn new(sql: impl Into<String>, params: Params) -> Self {
        let types = params
            .iter()
            .filter(|(_, v)| v.is_list())
            .map(|(k, _)| (k.clone(), ParamType::List))
            .collect();
        Self {
            sql: sql.into(),
            params,
            types,
        }
    }
    pub fn param_type(&self, name: &str) -> ParamType {
        self.types.get(name).copied().unwrap_or_default()
    }
}

impl Display for NativeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))
    }
}

/// Metadata about modify operations (INSERT/UPDATE/DELETE).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted / affected identifier when available.
    pub last_affected_id: Option<i64>,
}

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column or field names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values()[i])
    }
    /// Converts the value of column `name`.
    pub fn get_as<T: AsValue>(&self, name: &str) -> Result<T> {
        let value = self
            .get_column(name)
            .ok_or_else(|| Error::msg(format!("Row has no column `{}`", name)))?;
        T::try_from_value(value.clone()).with_context(|| format!("While reading `{}`", name))
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RowLabeled {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let (labels, values): (Vec<String>, Vec<Value>) =
            iter.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self::new(labels.into(), values.into())
    }
}

/// Heterogeneous items emitted by `Executor::run` combining rows and modify results.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// A labeled row.
    Row(RowLabeled),
    /// A modify effect aggregation.
    Affected(RowsAffected),
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
            if elem.last_affected_id.is_some() {
                self.last_affected_id = elem.last_affected_id;
            }
        }
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

impl From<RowLabeled> for QueryResult {
    fn from(value: RowLabeled) -> Self {
        QueryResult::Row(value)
    }
}

impl From<RowsAffected> for QueryResult {
    fn from(value: RowsAffected) -> Self {
        QueryResult::Affected(value)
    }
}
