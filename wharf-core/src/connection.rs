use crate::{Executor, Result};

/// An established session with the persistence engine.
pub trait Connection: Executor {
    /// Connect to the given URL, its scheme names the driver.
    fn connect(url: &str) -> Result<Self>
    where
        Self: Sized;

    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;
}
