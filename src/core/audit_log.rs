//! Append-only audit trail of committed trades
//!
//! The log is written strictly after a trade commits and never participates
//! in the atomicity decision: an append failure is surfaced to the caller as
//! an error it may log, but a committed trade is never rolled back for it.

use crate::types::{AuditRecord, MarketError};
use std::sync::Mutex;

/// In-memory append-only audit log
#[derive(Debug, Default)]
pub struct AuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl AuditLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed trade record
    ///
    /// # Errors
    ///
    /// Returns a storage fault if the log's lock is poisoned. The caller is
    /// expected to surface this as a warning, not to roll anything back.
    pub fn append(&self, record: AuditRecord) -> Result<(), MarketError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| MarketError::storage_fault("audit log lock poisoned"))?;
        records.push(record);
        Ok(())
    }

    /// Snapshot of all records in append order
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Number of recorded trades
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
