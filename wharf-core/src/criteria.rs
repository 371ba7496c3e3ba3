use crate::{Params, Value, is_word_char};

/// Filter, ordering, grouping and pagination of a listing, in entity-relative terms.
///
/// ```
/// # use wharf_core::ListQuery;
/// let query = ListQuery::new()
///     .filter("status = :status AND department.name = :department")
///     .param("status", "active")
///     .param("department", "Research")
///     .order_by("name ASC")
///     .page(20, 10);
/// assert_eq!(query.offset, Some(20));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub params: Params,
    pub order_by: Option<String>,
    pub group_by: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl ListQuery {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }
    pub fn group_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
    /// Both offset and limit.
    pub fn page(self, offset: u64, limit: u64) -> Self {
        self.offset(offset).limit(limit)
    }
    /// Offset and limit when both are present.
    pub fn pagination(&self) -> Option<(u64, u64)> {
        self.offset.zip(self.limit)
    }
}

/// An aggregate function applied to an entity-relative expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// Function name as the product spells it (`SUM`, `COUNT`, `BIT_AND`).
    pub function: String,
    pub field: String,
    /// Result label, derived from `field` when absent.
    pub alias: Option<String>,
}

impl Aggregate {
    pub fn new(function: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            field: field.into(),
            alias: None,
        }
    }
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
    /// `department.name` is labeled `department_name` unless an alias was given.
    ///
    /// Only the word characters of the field make the label: `salary * 2` becomes `salary_2`,
    /// a field without any (`*`) is labeled after the function, `count_all`.
    pub fn label(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }
        let label = self
            .field
            .split(|c: char| !is_word_char(&c))
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        if label.is_empty() {
            format!("{}_all", self.function.trim().to_lowercase())
        } else {
            label
        }
    }
}

/// Aggregation request: functions, grouping fields, filter and ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupQuery {
    pub filter: Option<String>,
    pub params: Params,
    pub order_by: Option<String>,
    pub aggregates: Vec<Aggregate>,
    pub group_fields: Vec<String>,
}

impl GroupQuery {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }
    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregates.push(aggregate);
        self
    }
    pub fn group_field(mut self, field: impl Into<String>) -> Self {
        self.group_fields.push(field.into());
        self
    }
    /// Nothing to compute: no aggregate and no grouping field.
    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty() && self.group_fields.is_empty()
    }
}
