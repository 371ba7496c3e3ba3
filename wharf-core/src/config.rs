use crate::{Context, Error, Result};
use url::Url;

/// Options of a data-access facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaoConfig {
    /// Alias of the root entity in every generated statement.
    pub root_alias: String,
    /// Longest association path followed by implicit joins.
    pub max_join_depth: usize,
    /// Log each statement in a line broken layout with its elapsed time.
    pub log_queries: bool,
}

impl Default for DaoConfig {
    fn default() -> Self {
        Self {
            root_alias: "_t_0".into(),
            max_join_depth: 4,
            log_queries: false,
        }
    }
}

impl DaoConfig {
    /// Reads the options from the query string of a connection URL.
    ///
    /// ```
    /// # use wharf_core::DaoConfig;
    /// let url = url::Url::parse("mysql://localhost/shop?max_join_depth=2&log_queries=true").unwrap();
    /// let config = DaoConfig::from_url(&url).unwrap();
    /// assert_eq!(config.max_join_depth, 2);
    /// assert!(config.log_queries);
    /// assert_eq!(config.root_alias, "_t_0");
    /// ```
    pub fn from_url(url: &Url) -> Result<Self> {
        let mut result = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "root_alias" => {
                    if value.is_empty() || !value.chars().all(|c| c.is_alphanumeric() || c == '_') {
                        return Err(Error::msg(format!(
                            "Invalid root_alias `{}`, expected a non empty identifier",
                            value
                        )));
                    }
                    result.root_alias = value.into_owned();
                }
                "max_join_depth" => {
                    result.max_join_depth = value.parse().with_context(|| {
                        format!("Invalid max_join_depth `{}`, expected an integer", value)
                    })?;
                }
                "log_queries" => {
                    result.log_queries = match value.as_ref() {
                        "true" | "1" | "yes" => true,
                        "false" | "0" | "no" => false,
                        _ => {
                            return Err(Error::msg(format!(
                                "Invalid log_queries `{}`, expected a boolean",
                                value
                            )));
                        }
                    }
                }
                _ => log::debug!("Ignoring connection option `{}`", key),
            }
        }
        Ok(result)
    }

    /// Parses `url`, checks its scheme against `driver` and reads the options.
    pub fn from_connection_url(url: &str, driver: &str) -> Result<Self> {
        let parsed = Url::parse(url).context("Invalid connection URL")?;
        if parsed.scheme() != driver {
            return Err(Error::msg(format!(
                "Connection URL scheme `{}` does not match the driver `{}`",
                parsed.scheme(),
                driver
            )));
        }
        Self::from_url(&parsed)
    }
}
