use crate::core::catalog::PassCatalog;
use crate::domain::model::{EntitlementStatus, Pass, PurchaseConfirmation};
use crate::domain::ports::PassLedger;
use crate::utils::error::{PassError, Result};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Records purchased passes and answers entitlement queries.
///
/// Passes are only ever appended. Entitlement at `now` holds while any pass
/// owned by the viewer covers `[activated_at, expires_at)`.
pub struct EntitlementStore<L: PassLedger> {
    catalog: PassCatalog,
    ledger: L,
}

impl<L: PassLedger> EntitlementStore<L> {
    pub fn new(catalog: PassCatalog, ledger: L) -> Self {
        Self { catalog, ledger }
    }

    pub fn catalog(&self) -> &PassCatalog {
        &self.catalog
    }

    /// Creates and persists a pass. Overlapping and duplicate passes are
    /// allowed; they only widen the entitled window.
    pub async fn activate(
        &self,
        owner_id: &str,
        tier_id: &str,
        activation_time: DateTime<Utc>,
    ) -> Result<Pass> {
        let tier = self
            .catalog
            .tier_for(tier_id)
            .ok_or_else(|| PassError::InvalidTier {
                tier_id: tier_id.to_string(),
            })?;

        let expires_at = activation_time
            .checked_add_signed(Duration::days(i64::from(tier.duration_days)))
            .ok_or_else(|| PassError::InvalidActivationTime {
                activation_time: activation_time.to_rfc3339(),
            })?;

        let pass = Pass {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            tier_id: tier.id.clone(),
            activated_at: activation_time,
            expires_at,
        };

        self.ledger.append(&pass).await?;

        tracing::info!(
            "Activated {} for {} until {}",
            pass.tier_id,
            pass.owner_id,
            pass.expires_at.to_rfc3339()
        );
        Ok(pass)
    }

    pub async fn record_purchase(&self, purchase: &PurchaseConfirmation) -> Result<Pass> {
        self.activate(
            &purchase.owner_id,
            &purchase.tier_id,
            purchase.activation_time,
        )
        .await
    }

    /// Never errors: if the ledger cannot be read the viewer is treated as
    /// not entitled.
    pub async fn is_entitled(&self, owner_id: &str, now: DateTime<Utc>) -> bool {
        match self.ledger.passes_for(owner_id).await {
            Ok(passes) => passes.iter().any(|pass| pass.covers(now)),
            Err(e) => {
                tracing::warn!("Entitlement lookup for {} failed, locking: {}", owner_id, e);
                false
            }
        }
    }

    /// Like `is_entitled`, but also reports how long coverage lasts from
    /// `now` without a gap.
    pub async fn status(&self, owner_id: &str, now: DateTime<Utc>) -> EntitlementStatus {
        match self.ledger.passes_for(owner_id).await {
            Ok(mut passes) => {
                sort_by_activation(&mut passes);
                coverage_from(&passes, now)
            }
            Err(e) => {
                tracing::warn!("Entitlement lookup for {} failed, locking: {}", owner_id, e);
                EntitlementStatus::Inactive
            }
        }
    }

    /// Every pass the owner ever bought, oldest activation first.
    pub async fn history(&self, owner_id: &str) -> Result<Vec<Pass>> {
        let mut passes = self.ledger.passes_for(owner_id).await?;
        sort_by_activation(&mut passes);
        tracing::debug!("Loaded {} passes for {}", passes.len(), owner_id);
        Ok(passes)
    }
}

fn sort_by_activation(passes: &mut [Pass]) {
    passes.sort_by(|a, b| {
        a.activated_at
            .cmp(&b.activated_at)
            .then(a.expires_at.cmp(&b.expires_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// `passes` 必須已依啟用時間排序
fn coverage_from(passes: &[Pass], now: DateTime<Utc>) -> EntitlementStatus {
    if !passes.iter().any(|pass| pass.covers(now)) {
        return EntitlementStatus::Inactive;
    }

    let mut covered_until = now;
    for pass in passes {
        if pass.activated_at > covered_until {
            break;
        }
        if pass.expires_at > covered_until {
            covered_until = pass.expires_at;
        }
    }
    EntitlementStatus::Active { covered_until }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryLedger;
    use chrono::TimeZone;

    struct FailingLedger;

    impl PassLedger for FailingLedger {
        async fn append(&self, _pass: &Pass) -> Result<()> {
            Err(PassError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }

        async fn passes_for(&self, _owner_id: &str) -> Result<Vec<Pass>> {
            Err(PassError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "unavailable",
            )))
        }
    }

    fn at(day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, min, sec).unwrap()
    }

    fn store() -> EntitlementStore<MemoryLedger> {
        EntitlementStore::new(PassCatalog::standard(), MemoryLedger::new())
    }

    #[tokio::test]
    async fn test_no_passes_means_not_entitled() {
        let store = store();
        assert!(!store.is_entitled("v1", at(1, 0, 0, 0)).await);
        assert_eq!(
            store.status("v1", at(1, 0, 0, 0)).await,
            EntitlementStatus::Inactive
        );
        assert!(store.history("v1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_three_day_pass_window() {
        let store = store();
        let pass = store.activate("v1", "pass-3d", at(1, 0, 0, 0)).await.unwrap();

        assert_eq!(pass.expires_at, at(4, 0, 0, 0));
        assert!(!store.is_entitled("v1", at(1, 0, 0, 0) - Duration::seconds(1)).await);
        assert!(store.is_entitled("v1", at(1, 0, 0, 0)).await);
        assert!(store.is_entitled("v1", at(3, 23, 59, 59)).await);
        assert!(!store.is_entitled("v1", at(4, 0, 0, 0)).await);
    }

    #[tokio::test]
    async fn test_entitlement_is_per_owner() {
        let store = store();
        store.activate("v1", "pass-7d", at(1, 0, 0, 0)).await.unwrap();
        assert!(!store.is_entitled("v2", at(2, 0, 0, 0)).await);
    }

    #[tokio::test]
    async fn test_unknown_tier_is_rejected_and_not_stored() {
        let store = store();
        let err = store
            .activate("v1", "pass-30d", at(1, 0, 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, PassError::InvalidTier { ref tier_id } if tier_id == "pass-30d"));
        assert!(store.history("v1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expiry_overflow_is_rejected() {
        let store = store();
        let err = store
            .activate("v1", "pass-14d", DateTime::<Utc>::MAX_UTC)
            .await
            .unwrap_err();
        assert!(matches!(err, PassError::InvalidActivationTime { .. }));
    }

    #[tokio::test]
    async fn test_disjoint_passes_cover_their_union() {
        let store = store();
        store.activate("v1", "pass-3d", at(1, 0, 0, 0)).await.unwrap();
        store.activate("v1", "pass-3d", at(10, 0, 0, 0)).await.unwrap();

        assert!(store.is_entitled("v1", at(2, 0, 0, 0)).await);
        assert!(!store.is_entitled("v1", at(7, 0, 0, 0)).await);
        assert!(store.is_entitled("v1", at(10, 0, 0, 0)).await);
        assert!(store.is_entitled("v1", at(12, 23, 59, 59)).await);
        assert!(!store.is_entitled("v1", at(13, 0, 0, 0)).await);
    }

    #[tokio::test]
    async fn test_duplicate_pass_is_kept() {
        let store = store();
        store.activate("v1", "pass-3d", at(1, 0, 0, 0)).await.unwrap();
        store.activate("v1", "pass-3d", at(1, 0, 0, 0)).await.unwrap();

        let history = store.history("v1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_ne!(history[0].id, history[1].id);
    }

    #[tokio::test]
    async fn test_history_is_ordered_by_activation() {
        let store = store();
        store.activate("v1", "pass-7d", at(20, 0, 0, 0)).await.unwrap();
        store.activate("v1", "pass-3d", at(1, 0, 0, 0)).await.unwrap();
        store.activate("v1", "pass-14d", at(5, 0, 0, 0)).await.unwrap();

        let tiers: Vec<String> = store
            .history("v1")
            .await
            .unwrap()
            .into_iter()
            .map(|pass| pass.tier_id)
            .collect();
        assert_eq!(tiers, ["pass-3d", "pass-14d", "pass-7d"]);
    }

    #[tokio::test]
    async fn test_status_merges_back_to_back_passes() {
        let store = store();
        store.activate("v1", "pass-3d", at(1, 0, 0, 0)).await.unwrap();
        // Starts exactly when the first one ends.
        store.activate("v1", "pass-7d", at(4, 0, 0, 0)).await.unwrap();
        store.activate("v1", "pass-3d", at(20, 0, 0, 0)).await.unwrap();

        assert_eq!(
            store.status("v1", at(2, 0, 0, 0)).await,
            EntitlementStatus::Active {
                covered_until: at(11, 0, 0, 0)
            }
        );
        assert_eq!(
            store.status("v1", at(15, 0, 0, 0)).await,
            EntitlementStatus::Inactive
        );
    }

    #[tokio::test]
    async fn test_record_purchase_activates() {
        let store = store();
        let purchase = PurchaseConfirmation {
            owner_id: "v1".to_string(),
            tier_id: "pass-7d".to_string(),
            activation_time: at(1, 12, 0, 0),
        };
        let pass = store.record_purchase(&purchase).await.unwrap();
        assert_eq!(pass.expires_at, at(8, 12, 0, 0));
        assert!(store.is_entitled("v1", at(8, 11, 59, 59)).await);
    }

    #[tokio::test]
    async fn test_unreadable_ledger_fails_closed() {
        let store = EntitlementStore::new(PassCatalog::standard(), FailingLedger);
        assert!(!store.is_entitled("v1", at(1, 0, 0, 0)).await);
        assert_eq!(
            store.status("v1", at(1, 0, 0, 0)).await,
            EntitlementStatus::Inactive
        );
        assert!(store.history("v1").await.is_err());
    }

    #[tokio::test]
    async fn test_failed_append_is_surfaced() {
        let store = EntitlementStore::new(PassCatalog::standard(), FailingLedger);
        let err = store
            .activate("v1", "pass-3d", at(1, 0, 0, 0))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
