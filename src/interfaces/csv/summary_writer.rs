use crate::domain::pool::PoolSummary;
use crate::error::Result;
use std::io::Write;

/// Writes final pool summaries as CSV.
///
/// Decimal columns are normalized so balances print without trailing zeros.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes the header plus one row per pool, in the order given.
    pub fn write_summaries(&mut self, summaries: Vec<PoolSummary>) -> Result<()> {
        self.writer.write_record([
            "pool",
            "manager",
            "minimum",
            "balance",
            "approvers",
            "requests",
        ])?;

        for summary in summaries {
            self.writer.write_record([
                summary.pool.to_string(),
                summary.manager.to_string(),
                summary.minimum.to_string(),
                summary.balance.to_string(),
                summary.approvers.to_string(),
                summary.requests.to_string(),
            ])?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
