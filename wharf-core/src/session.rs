use crate::{Error, Result};
use std::fmt::{self, Debug};

/// Receives every failure the data-access layer records.
pub trait ErrorSink {
    fn record(&self, error: &Error);
}

impl<F: Fn(&Error)> ErrorSink for F {
    fn record(&self, error: &Error) {
        self(error)
    }
}

/// Keeps the last failure of a session and forwards it to the configured sink.
#[derive(Default)]
pub struct ExceptionRecorder {
    last: Option<String>,
    sink: Option<Box<dyn ErrorSink>>,
}

impl ExceptionRecorder {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn set_sink(&mut self, sink: impl ErrorSink + 'static) {
        self.sink = Some(Box::new(sink));
    }
    pub fn record(&mut self, error: &Error) {
        log::error!("{:#}", error);
        self.last = Some(format!("{:#}", error));
        if let Some(sink) = &self.sink {
            sink.record(error);
        }
    }
    /// Message of the last recorded failure, with its context chain.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
    /// Passes `result` through, recording the error if any.
    pub fn check<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.record(e);
        }
        result
    }
}

impl Debug for ExceptionRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionRecorder")
            .field("last", &self.last)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

/// State scoped to one data-access facade.
#[derive(Debug, Default)]
pub struct Session {
    transaction: bool,
    pub recorder: ExceptionRecorder,
}

impl Session {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn transaction_active(&self) -> bool {
        self.transaction
    }
    /// Marks the transaction as started, nesting is rejected.
    pub fn begin(&mut self) -> Result<()> {
        if self.transaction {
            let error = Error::msg("A transaction is already active, nested transactions are not supported");
            log::warn!("{}", error);
            return Err(error);
        }
        self.transaction = true;
        Ok(())
    }
    /// Marks the transaction as finished, failing when none is active.
    pub fn end(&mut self, action: &str) -> Result<()> {
        if !self.transaction {
            let error = Error::msg(format!("Cannot {} without an active transaction", action));
            log::warn!("{}", error);
            return Err(error);
        }
        self.transaction = false;
        Ok(())
    }
    /// Clears the transaction flag after the engine refused to start the transaction.
    pub fn reset(&mut self) {
        self.transaction = false;
    }
}
