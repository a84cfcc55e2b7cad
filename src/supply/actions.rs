/// Custom actions for supply batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplyAction {
    /// Reads the remaining quantity without modifying it.
    CheckStock,
    /// Takes units out of the batch.
    ///
    /// # Errors
    /// Fails if the batch holds fewer units than requested or is inactive.
    Withdraw(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplyActionResult {
    /// Units left in the batch after the action.
    Remaining(u32),
}
