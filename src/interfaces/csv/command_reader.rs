use crate::domain::command::Command;
use crate::error::{PoolError, Result};
use std::io::Read;

/// Reads pool commands from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<Command>`. It handles whitespace trimming and flexible record
/// lengths automatically.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes commands.
    ///
    /// This allows for processing large files in a streaming fashion without
    /// loading the entire dataset into memory.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PoolError::from))
    }
}
