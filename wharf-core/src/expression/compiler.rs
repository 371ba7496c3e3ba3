use super::{Token, tokenize};
use crate::{JoinMap, MetadataProvider, Result, UsedPaths};
use std::collections::BTreeSet;

/// Result of compiling one expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledExpression {
    pub text: String,
    pub paths: UsedPaths,
}

impl CompiledExpression {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Rewrites entity-relative expressions into alias-qualified ones.
///
/// Field names of the root entity are prefixed with the root alias, dotted association paths
/// found in the [`JoinMap`] are replaced by the join alias. Parameters, literals and anything
/// that does not resolve are left untouched.
///
/// ```
/// # use wharf_core::*;
/// let metadata = StaticMetadata::new()
///     .with(
///         EntityMetadata::new("Book", "books")
///             .id("id", "id", Value::Int64(None))
///             .field("name", "name", Value::Varchar(None))
///             .association("author", Cardinality::ManyToOne, "Author"),
///     )
///     .with(EntityMetadata::new("Author", "authors").field("name", "name", Value::Varchar(None)));
/// let joins = JoinResolver::new(&metadata, "_t_0", 4).resolve("Book").unwrap();
/// let compiler = ExpressionCompiler::new(&metadata, "Book", "_t_0", &joins).unwrap();
/// let compiled = compiler.compile(Some("name = :name AND author.name = :author"));
/// assert_eq!(compiled.text, "_t_0.name = :name AND _author_1.name = :author");
/// assert!(compiled.paths.contains("author"));
/// ```
pub struct ExpressionCompiler<'a> {
    root_alias: &'a str,
    fields: BTreeSet<&'a str>,
    joins: &'a JoinMap,
}

impl<'a> ExpressionCompiler<'a> {
    pub fn new<M: MetadataProvider>(
        metadata: &'a M,
        entity_type: &str,
        root_alias: &'a str,
        joins: &'a JoinMap,
    ) -> Result<Self> {
        Ok(Self {
            root_alias,
            fields: metadata.field_names(entity_type)?.into_iter().collect(),
            joins,
        })
    }

    pub fn compile(&self, expression: Option<&str>) -> CompiledExpression {
        let mut paths = UsedPaths::new();
        let text = self.compile_into(expression.unwrap_or_default(), &mut paths);
        CompiledExpression { text, paths }
    }

    /// Compiles `expression`, adding the join paths it references to `paths`.
    pub fn compile_into(&self, expression: &str, paths: &mut UsedPaths) -> String {
        if expression.trim().is_empty() {
            return expression.to_string();
        }
        let tokens = tokenize(expression);
        let mut out = String::with_capacity(expression.len() + 16);
        for (i, token) in tokens.iter().enumerate() {
            match token {
                Token::Word(word) => {
                    let is_call = matches!(tokens.get(i + 1), Some(Token::Symbol("(")));
                    self.write_word(&mut out, word, is_call, paths);
                }
                _ => out.push_str(token.as_str()),
            }
        }
        out
    }

    fn write_word(&self, out: &mut String, word: &str, is_call: bool, paths: &mut UsedPaths) {
        if let Some((path, field)) = word.rsplit_once('.') {
            match self.joins.get(path) {
                Some(entry) => {
                    paths.insert_with_prefixes(path);
                    out.push_str(&entry.alias);
                    out.push('.');
                    out.push_str(field);
                }
                None => {
                    log::trace!("`{}` does not resolve to a join path, left as is", word);
                    out.push_str(word);
                }
            }
        } else if !is_call && self.fields.contains(word) {
            out.push_str(self.root_alias);
            out.push('.');
            out.push_str(word);
        } else {
            out.push_str(word);
        }
    }
}
