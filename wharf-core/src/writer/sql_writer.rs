use crate::{Error, JoinPathEntry, JoinType, Result, separated_by};
use std::{any, fmt::Write};

/// Parts of a statement shared by every orchestrated operation.
///
/// Expressions are already compiled, the joins are the used ones in emission order.
#[derive(Debug, Clone, Default)]
pub struct Statement<'a> {
    pub entity: &'a str,
    pub root_alias: &'a str,
    pub join_type: JoinType,
    pub joins: Vec<&'a JoinPathEntry>,
    pub filter: &'a str,
    pub group_by: &'a str,
    pub order_by: &'a str,
}

/// What a `SELECT` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// The root entity and every joined entity.
    Entities,
    /// `COUNT` of the expression.
    Count(String),
    Columns(Vec<SelectItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    Aggregate {
        function: String,
        expression: String,
        alias: String,
    },
    Column(String),
}

/// Dialect printer turning compiled statements into text.
///
/// Statements produced by the orchestrated operations are written on a single line without the
/// terminating semicolon; only the native statement pagination differs between products.
pub trait SqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter;

    fn write_join_type(&self, out: &mut String, join_type: &JoinType) {
        out.push_str(match join_type {
            JoinType::Default => "JOIN",
            JoinType::Left => "LEFT JOIN",
        });
    }

    /// Render a join clause: `LEFT JOIN _t_0.department _department_1`.
    fn write_join(&self, out: &mut String, join_type: &JoinType, entry: &JoinPathEntry) {
        self.write_join_type(out, join_type);
        let _ = write!(out, " {} {}", entry.join, entry.alias);
    }

    /// Render the entity with its alias followed by the joins.
    fn write_from(&self, out: &mut String, statement: &Statement) {
        let _ = write!(out, "{} {}", statement.entity, statement.root_alias);
        for entry in &statement.joins {
            out.push(' ');
            self.write_join(out, &statement.join_type, entry);
        }
    }

    fn write_where(&self, out: &mut String, filter: &str) {
        if !filter.trim().is_empty() {
            out.push_str(" WHERE ");
            out.push_str(filter);
        }
    }

    fn write_select_item(&self, out: &mut String, item: &SelectItem) {
        match item {
            SelectItem::Aggregate {
                function,
                expression,
                alias,
            } => {
                let _ = write!(out, "{}({}) AS {}", function, expression, alias);
            }
            SelectItem::Column(v) => out.push_str(v),
        }
    }

    fn write_projection(&self, out: &mut String, projection: &Projection, statement: &Statement) {
        match projection {
            Projection::Entities => {
                out.push_str(statement.root_alias);
                for entry in &statement.joins {
                    out.push_str(", ");
                    out.push_str(&entry.alias);
                }
            }
            Projection::Count(expression) => {
                let _ = write!(out, "COUNT({})", expression);
            }
            Projection::Columns(items) => {
                separated_by(out, items, |out, v| self.write_select_item(out, v), ", ");
            }
        }
    }

    fn write_select(&self, out: &mut String, projection: &Projection, statement: &Statement) {
        out.reserve(128 + statement.joins.len() * 32);
        out.push_str("SELECT ");
        self.write_projection(out, projection, statement);
        out.push_str(" FROM ");
        self.write_from(out, statement);
        self.write_where(out, statement.filter);
        if !statement.group_by.trim().is_empty() {
            out.push_str(" GROUP BY ");
            out.push_str(statement.group_by);
        }
        if !statement.order_by.trim().is_empty() {
            out.push_str(" ORDER BY ");
            out.push_str(statement.order_by);
        }
    }

    /// Render a bulk update, `assignments` pairs each field with the parameter holding its value.
    fn write_update(
        &self,
        out: &mut String,
        statement: &Statement,
        assignments: &[(&str, String)],
    ) {
        out.reserve(128 + assignments.len() * 32);
        out.push_str("UPDATE ");
        self.write_from(out, statement);
        out.push_str(" SET ");
        separated_by(
            out,
            assignments,
            |out, (field, key)| {
                let _ = write!(out, "{}.{} = :{}", statement.root_alias, field, key);
            },
            ", ",
        );
        self.write_where(out, statement.filter);
    }

    fn write_delete(&self, out: &mut String, statement: &Statement) {
        out.reserve(128);
        out.push_str("DELETE FROM ");
        self.write_from(out, statement);
        self.write_where(out, statement.filter);
    }

    /// Append the pagination of a native statement, products without a known syntax fail.
    fn write_limit_offset(&self, _out: &mut String, offset: u64, limit: u64) -> Result<()> {
        Err(Error::msg(format!(
            "{} cannot paginate native statements (offset {}, limit {})",
            any::type_name::<Self>(),
            offset,
            limit
        )))
    }
}

/// Fallback writer used by [`crate::GenericDriver`].
#[derive(Default, Clone, Copy, Debug)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
