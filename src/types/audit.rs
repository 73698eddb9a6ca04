//! Audit trail records for committed trades

use super::item::{ItemId, Owner};

/// Kind of committed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeKind {
    /// An unowned item was bought and the buyer debited
    Purchase,

    /// An owned item was returned to the market and the seller credited
    Sale,
}

/// Immutable record of one committed trade
///
/// Appended to the audit log strictly after the ownership transition and the
/// budget adjustment have both applied. Records are never modified after
/// being appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    /// The traded item
    pub item: ItemId,

    /// Ownership state before the trade
    pub from_owner: Owner,

    /// Ownership state after the trade
    pub to_owner: Owner,

    /// Price moved between the account budget and the item
    pub price: u64,

    /// Milliseconds since the Unix epoch at commit time
    pub timestamp_ms: u64,

    /// Whether this was a purchase or a sale
    pub kind: TradeKind,
}
