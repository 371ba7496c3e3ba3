use crate::{AsValue, Error, Params, Result, RowLabeled, Value};

/// A record type backed by an entity registered in the [`crate::MetadataProvider`].
///
/// Rows exchanged with the engine are labeled by field name, associations are resolved by
/// the engine itself and do not appear in [`Entity::row`].
pub trait Entity {
    /// Name the metadata provider knows this entity by.
    fn entity_type() -> &'static str;

    fn from_row(row: RowLabeled) -> Result<Self>
    where
        Self: Sized;

    /// Current field values, labeled by field name.
    fn row(&self) -> RowLabeled;

    /// Values of the requested fields, failing when the entity does not expose one of them.
    fn field_values(&self, fields: &[&str]) -> Result<Params> {
        let row = self.row();
        fields
            .iter()
            .map(|field| {
                row.get_column(field)
                    .map(|v| (field.to_string(), v.clone()))
                    .ok_or_else(|| {
                        Error::msg(format!(
                            "Entity `{}` does not expose the field `{}`",
                            Self::entity_type(),
                            field
                        ))
                    })
            })
            .collect()
    }
}

/// Identifier of a record: a single value or one value per identifier field.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    Single(Value),
    Composite(Params),
}

impl Identifier {
    /// Collapses a single-field map into [`Identifier::Single`].
    pub fn from_params(mut params: Params) -> Self {
        if params.len() == 1 {
            if let Some((_, v)) = params.pop_first() {
                return Identifier::Single(v);
            }
        }
        Identifier::Composite(params)
    }
    pub fn composite<K: Into<String>>(values: impl IntoIterator<Item = (K, Value)>) -> Self {
        Identifier::Composite(values.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<T: AsValue> From<T> for Identifier {
    fn from(value: T) -> Self {
        Identifier::Single(value.as_value())
    }
}

impl From<&'static str> for Identifier {
    fn from(value: &'static str) -> Self {
        Identifier::Single(value.into())
    }
}
