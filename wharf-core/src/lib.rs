mod as_value;
mod config;
mod connection;
mod criteria;
mod dao;
mod driver;
mod entity;
mod executor;
mod expression;
mod join;
mod logger;
mod mapping;
mod metadata;
mod query;
mod session;
mod util;
mod value;
mod writer;

pub use ::anyhow::Context;
pub use as_value::*;
pub use config::*;
pub use connection::*;
pub use criteria::*;
pub use dao::*;
pub use driver::*;
pub use entity::*;
pub use executor::*;
pub use expression::*;
pub use join::*;
pub use logger::*;
pub use mapping::*;
pub use metadata::*;
pub use query::*;
pub use session::*;
pub use util::*;
pub use value::*;
pub use writer::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
