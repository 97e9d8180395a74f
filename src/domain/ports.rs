use crate::domain::model::Pass;
use crate::utils::error::Result;

/// Append-only pass storage.
///
/// Implementations must serialize `append` so that concurrent purchases by
/// the same owner are all persisted, and must never rewrite or drop a
/// stored pass.
pub trait PassLedger: Send + Sync {
    fn append(&self, pass: &Pass) -> impl std::future::Future<Output = Result<()>> + Send;

    /// All passes owned by `owner_id`, in insertion order.
    fn passes_for(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Pass>>> + Send;
}

pub trait LedgerConfig: Send + Sync {
    fn ledger_path(&self) -> &str;
}
