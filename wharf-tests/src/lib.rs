mod counting;
mod deleting;
mod fixtures;
mod grouping;
mod listing;
mod mock;
mod native;
mod records;
mod transactions;
mod updating;

pub use fixtures::*;
pub use mock::*;

use crate::{
    counting::counting, deleting::deleting, grouping::grouping, listing::listing,
    native::native, records::records, transactions::transactions, updating::updating,
};
use log::LevelFilter;
use std::env;
use wharf_core::{Dao, Driver, StaticMetadata};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// A facade over a fresh [`MockConnection`] and the fixture schema.
pub fn mock_dao<D: Driver + Clone + Default>(driver: &D) -> Dao<MockConnection<D>, StaticMetadata> {
    Dao::new(MockConnection::new(driver.clone()), schema())
}

/// Runs the orchestration suite against the dialect of `driver`.
pub fn execute_tests<D: Driver + Clone + Default>(driver: D) {
    listing(&driver);
    counting(&driver);
    grouping(&driver);
    updating(&driver);
    deleting(&driver);
    records(&driver);
    transactions(&driver);
    native(&driver);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        let result = { $($code)+ };
        log::set_max_level(level);
        result
    }};
}
