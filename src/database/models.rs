/// Outcome of a roster sync against the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSyncReport {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}
