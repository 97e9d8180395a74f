use crate::core::entitlement::EntitlementStore;
use crate::core::masking;
use crate::domain::model::{Dealer, Listing, MaskedListing};
use crate::domain::ports::PassLedger;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Query surface used by listing pages to decide what a viewer may see.
pub struct UnlockResolver<L: PassLedger> {
    store: Arc<EntitlementStore<L>>,
}

impl<L: PassLedger> Clone for UnlockResolver<L> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<L: PassLedger> UnlockResolver<L> {
    pub fn new(store: Arc<EntitlementStore<L>>) -> Self {
        Self { store }
    }

    /// Whether `viewer_id` may see protected fields of `listing_id` at `now`.
    ///
    /// Passes are marketplace-wide, so `listing_id` does NOT affect the
    /// answer today: the result is exactly `is_entitled(viewer_id, now)`.
    /// The parameter is kept so a per-listing unlock can be added later
    /// without changing callers.
    pub async fn is_listing_unlocked(
        &self,
        viewer_id: &str,
        listing_id: &str,
        now: DateTime<Utc>,
    ) -> bool {
        let unlocked = self.store.is_entitled(viewer_id, now).await;
        tracing::debug!(
            "Listing {} for {}: {}",
            listing_id,
            viewer_id,
            if unlocked { "unlocked" } else { "locked" }
        );
        unlocked
    }

    /// Resolves the viewer once at `now` and returns the projection they may see.
    pub async fn view_listing(
        &self,
        viewer_id: &str,
        listing: &Listing,
        dealer: &Dealer,
        now: DateTime<Utc>,
    ) -> Result<MaskedListing> {
        let unlocked = self.is_listing_unlocked(viewer_id, &listing.id, now).await;
        masking::project(listing, dealer, unlocked)
    }
}
