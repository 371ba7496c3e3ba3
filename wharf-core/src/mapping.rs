use crate::{MetadataProvider, Result, Token, Value, tokenize};

/// Product specific functions exposed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    BitAnd,
}

/// Field to column view over the metadata, for code writing native statements.
pub struct Mapping<'a, M: MetadataProvider> {
    metadata: &'a M,
}

impl<'a, M: MetadataProvider> Mapping<'a, M> {
    pub fn new(metadata: &'a M) -> Self {
        Self { metadata }
    }

    pub fn table_name(&self, entity_type: &str) -> Result<&'a str> {
        self.metadata.table_name(entity_type)
    }

    pub fn field_names(&self, entity_type: &str) -> Result<Vec<&'a str>> {
        self.metadata.field_names(entity_type)
    }

    pub fn column_names(&self, entity_type: &str) -> Result<Vec<&'a str>> {
        self.metadata.column_names(entity_type)
    }

    pub fn field_name(&self, entity_type: &str, column: &str) -> Result<&'a str> {
        self.metadata.field_name(entity_type, column)
    }

    pub fn column_name(&self, entity_type: &str, field: &str) -> Result<&'a str> {
        self.metadata.column_name(entity_type, field)
    }

    pub fn field_type(&self, entity_type: &str, field: &str) -> Result<&'a Value> {
        self.metadata.field_type(entity_type, field)
    }

    /// Replaces field names with their columns, prefixed by `alias` when given.
    ///
    /// Only whole words are replaced, parameters and quoted literals are kept as they are.
    pub fn map_sql_expression(
        &self,
        entity_type: &str,
        expression: &str,
        alias: Option<&str>,
    ) -> Result<String> {
        let metadata = self.metadata.metadata(entity_type)?;
        let mut out = String::with_capacity(expression.len() + 16);
        for token in tokenize(expression) {
            let column = match token {
                Token::Word(word) => metadata.get_field(word).map(|v| &v.column_name),
                _ => None,
            };
            match (column, alias) {
                (Some(column), Some(alias)) if !alias.is_empty() => {
                    out.push_str(alias);
                    out.push('.');
                    out.push_str(column);
                }
                (Some(column), _) => out.push_str(column),
                (None, _) => out.push_str(token.as_str()),
            }
        }
        Ok(out)
    }

    pub fn function_name(&self, function: Function) -> &'static str {
        match function {
            Function::BitAnd => "BIT_AND",
        }
    }
}
