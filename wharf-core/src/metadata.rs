use crate::{Error, Result, Value};
use std::collections::HashMap;

/// Kind of relation an association declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl Cardinality {
    /// The owning row references at most one related row.
    pub fn is_to_one(&self) -> bool {
        matches!(self, Cardinality::OneToOne | Cardinality::ManyToOne)
    }
}

/// Declarative description of an entity field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name, as used in expressions.
    pub name: String,
    /// Column backing the field.
    pub column_name: String,
    /// Empty `Value` describing the field type.
    pub value: Value,
}

/// Relation from an entity field to another entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationDescriptor {
    /// Field of the owning entity holding the association.
    pub field: String,
    pub cardinality: Cardinality,
    /// Entity type on the other side.
    pub target: String,
}

/// Schema facts of one entity type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityMetadata {
    pub name: String,
    pub table: String,
    /// Identifier fields, in declaration order.
    pub identifier: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    pub associations: Vec<AssociationDescriptor>,
}

impl EntityMetadata {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            ..Default::default()
        }
    }
    /// Declares an identifier field.
    pub fn id(mut self, name: impl Into<String>, column: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        self.identifier.push(name.clone());
        self.field(name, column, value)
    }
    pub fn field(
        mut self,
        name: impl Into<String>,
        column: impl Into<String>,
        value: Value,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            column_name: column.into(),
            value: value.as_type(),
        });
        self
    }
    pub fn association(
        mut self,
        field: impl Into<String>,
        cardinality: Cardinality,
        target: impl Into<String>,
    ) -> Self {
        self.associations.push(AssociationDescriptor {
            field: field.into(),
            cardinality,
            target: target.into(),
        });
        self
    }
    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|v| v.name == name)
    }
    fn unknown_field(&self, field: &str) -> Error {
        Error::msg(format!(
            "Unknown field `{}` on entity `{}`",
            field, self.name
        ))
    }
}

/// Source of per-entity schema facts.
///
/// Only [`MetadataProvider::metadata`] is required, every other accessor derives from it.
pub trait MetadataProvider {
    fn metadata(&self, entity_type: &str) -> Result<&EntityMetadata>;

    fn table_name(&self, entity_type: &str) -> Result<&str> {
        Ok(&self.metadata(entity_type)?.table)
    }

    fn identifier_fields(&self, entity_type: &str) -> Result<&[String]> {
        Ok(&self.metadata(entity_type)?.identifier)
    }

    fn field_names(&self, entity_type: &str) -> Result<Vec<&str>> {
        Ok(self
            .metadata(entity_type)?
            .fields
            .iter()
            .map(|v| v.name.as_str())
            .collect())
    }

    fn column_names(&self, entity_type: &str) -> Result<Vec<&str>> {
        Ok(self
            .metadata(entity_type)?
            .fields
            .iter()
            .map(|v| v.column_name.as_str())
            .collect())
    }

    fn column_name(&self, entity_type: &str, field: &str) -> Result<&str> {
        let metadata = self.metadata(entity_type)?;
        metadata
            .get_field(field)
            .map(|v| v.column_name.as_str())
            .ok_or_else(|| metadata.unknown_field(field))
    }

    /// Field backed by `column`.
    fn field_name(&self, entity_type: &str, column: &str) -> Result<&str> {
        let metadata = self.metadata(entity_type)?;
        metadata
            .fields
            .iter()
            .find(|v| v.column_name == column)
            .map(|v| v.name.as_str())
            .ok_or_else(|| {
                Error::msg(format!(
                    "No field of entity `{}` is mapped to the column `{}`",
                    entity_type, column
                ))
            })
    }

    fn field_type(&self, entity_type: &str, field: &str) -> Result<&Value> {
        let metadata = self.metadata(entity_type)?;
        metadata
            .get_field(field)
            .map(|v| &v.value)
            .ok_or_else(|| metadata.unknown_field(field))
    }

    fn associations(&self, entity_type: &str) -> Result<&[AssociationDescriptor]> {
        Ok(&self.metadata(entity_type)?.associations)
    }
}

impl<T: MetadataProvider + ?Sized> MetadataProvider for &T {
    fn metadata(&self, entity_type: &str) -> Result<&EntityMetadata> {
        (**self).metadata(entity_type)
    }
}

/// In-memory registry of already materialized entity metadata.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    entities: HashMap<String, EntityMetadata>,
}

impl StaticMetadata {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn with(mut self, metadata: EntityMetadata) -> Self {
        self.register(metadata);
        self
    }
    /// Registers an entity, replacing a previous registration with the same name.
    pub fn register(&mut self, metadata: EntityMetadata) -> &mut Self {
        if self.entities.contains_key(&metadata.name) {
            log::warn!("Entity `{}` was already registered, replacing it", metadata.name);
        }
        self.entities.insert(metadata.name.clone(), metadata);
        self
    }
    pub fn len(&self) -> usize {
        self.entities.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl MetadataProvider for StaticMetadata {
    fn metadata(&self, entity_type: &str) -> Result<&EntityMetadata> {
        self.entities
            .get(entity_type)
            .ok_or_else(|| Error::msg(format!("Unknown entity type `{}`", entity_type)))
    }
}
