use crate::{DaoConfig, MetadataProvider, Result};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinType {
    #[default]
    Default,
    Left,
}

/// One implicit join reachable from the root entity through to-one associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPathEntry {
    /// Dotted association path from the root (`manager.department`).
    pub path: String,
    /// Parent alias and association field (`_manager_4.department`).
    pub join: String,
    /// Alias the joined entity gets in the statement (`_department_5`).
    pub alias: String,
}

/// Every to-one join path of a root entity, in discovery order.
///
/// Discovery is depth first so a path always comes after its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinMap {
    entries: Vec<JoinPathEntry>,
    index: BTreeMap<String, usize>,
}

impl JoinMap {
    pub fn get(&self, path: &str) -> Option<&JoinPathEntry> {
        self.index.get(path).map(|i| &self.entries[*i])
    }
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &JoinPathEntry> {
        self.entries.iter()
    }
    /// The entries whose path is in `used`, parents first.
    pub fn used<'a>(&'a self, used: &UsedPaths) -> Vec<&'a JoinPathEntry> {
        self.entries
            .iter()
            .filter(|v| used.contains(&v.path))
            .collect()
    }
    fn push(&mut self, path: String, join: String, alias: String) {
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push(JoinPathEntry { path, join, alias });
    }
}

/// Join paths referenced by one or more compiled expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedPaths(BTreeSet<String>);

impl UsedPaths {
    pub fn new() -> Self {
        Default::default()
    }
    /// Records `path` and all of its ancestors.
    pub fn insert_with_prefixes(&mut self, path: &str) {
        for (i, c) in path.char_indices() {
            if c == '.' {
                self.0.insert(path[..i].to_string());
            }
        }
        self.0.insert(path.to_string());
    }
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }
    pub fn extend(&mut self, other: UsedPaths) {
        self.0.extend(other.0);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for UsedPaths {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut result = UsedPaths::new();
        for path in iter {
            result.insert_with_prefixes(path.as_ref());
        }
        result
    }
}

/// Builds the [`JoinMap`] of a root entity type from its to-one associations.
///
/// The traversal stops at `max_depth` path segments, which bounds self-referencing and cyclic
/// association graphs.
pub struct JoinResolver<'a, M: MetadataProvider> {
    metadata: &'a M,
    root_alias: &'a str,
    max_depth: usize,
}

impl<'a, M: MetadataProvider> JoinResolver<'a, M> {
    pub fn new(metadata: &'a M, root_alias: &'a str, max_depth: usize) -> Self {
        Self {
            metadata,
            root_alias,
            max_depth,
        }
    }

    pub fn from_config(metadata: &'a M, config: &'a DaoConfig) -> Self {
        Self::new(metadata, &config.root_alias, config.max_join_depth)
    }

    pub fn resolve(&self, entity_type: &str) -> Result<JoinMap> {
        let mut result = JoinMap::default();
        self.collect(entity_type, self.root_alias, "", 1, &mut result)?;
        Ok(result)
    }

    fn collect(
        &self,
        entity_type: &str,
        parent_alias: &str,
        parent_path: &str,
        depth: usize,
        map: &mut JoinMap,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Ok(());
        }
        for association in self.metadata.associations(entity_type)? {
            if !association.cardinality.is_to_one() {
                continue;
            }
            let path = if parent_path.is_empty() {
                association.field.clone()
            } else {
                format!("{}.{}", parent_path, association.field)
            };
            let alias = format!("_{}_{}", association.field, map.len() + 1);
            let join = format!("{}.{}", parent_alias, association.field);
            map.push(path.clone(), join, alias.clone());
            self.collect(&association.target, &alias, &path, depth + 1, map)?;
        }
        Ok(())
    }
}
