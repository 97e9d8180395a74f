use crate::domain::model::Pass;
use crate::domain::ports::PassLedger;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 行程內帳本，clone 後共享同一份資料
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    passes: Arc<RwLock<HashMap<String, Vec<Pass>>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.passes.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl PassLedger for MemoryLedger {
    async fn append(&self, pass: &Pass) -> Result<()> {
        let mut passes = self.passes.write().await;
        passes
            .entry(pass.owner_id.clone())
            .or_default()
            .push(pass.clone());
        Ok(())
    }

    async fn passes_for(&self, owner_id: &str) -> Result<Vec<Pass>> {
        let passes = self.passes.read().await;
        Ok(passes.get(owner_id).cloned().unwrap_or_default())
    }
}
