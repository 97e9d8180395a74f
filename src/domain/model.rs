use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchasable pass tier. Defined at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassTier {
    pub id: String,
    pub name: String,
    pub duration_days: u32,
    /// Minor currency units (cents).
    pub price_cents: u64,
    #[serde(default)]
    pub featured: bool,
}

/// One purchased pass. Appended to the ledger once and kept forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pass {
    pub id: String,
    pub owner_id: String,
    pub tier_id: String,
    pub activated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Pass {
    /// Half-open window: the activation instant is covered, the expiry instant is not.
    pub fn covers(&self, now: DateTime<Utc>) -> bool {
        self.activated_at <= now && now < self.expires_at
    }
}

/// Confirmed purchase handed over by the payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseConfirmation {
    pub owner_id: String,
    pub tier_id: String,
    pub activation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EntitlementStatus {
    /// Entitled; `covered_until` is the end of the unbroken coverage containing `now`.
    #[serde(rename_all = "camelCase")]
    Active { covered_until: DateTime<Utc> },
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub year: u16,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub trim: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub exterior_color: String,
    #[serde(default)]
    pub interior_color: String,
    #[serde(default)]
    pub mileage: u32,
    #[serde(default)]
    pub body_style: String,
    pub vin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub msrp: u64,
    pub selling_price: u64,
    pub discount: u64,
    pub discount_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub stock_number: String,
    pub days_in_stock: u32,
}

/// Listing as supplied by the inventory collaborator. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub dealer_id: String,
    pub vehicle: Vehicle,
    pub pricing: Pricing,
    pub inventory: Inventory,
    #[serde(default)]
    pub dealer_location: String,
    pub deal_heat_score: i32,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub business_name: String,
    pub phone: String,
    pub email: String,
}

/// Dealer block of a projection. Contact fields are absent while locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerView {
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Safe-to-display listing. Recomputed per read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedListing {
    pub listing: Listing,
    pub dealer: DealerView,
    pub heat_tier: HeatTier,
    pub unlocked: bool,
}

/// Presentation tier for a listing's deal heat score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatTier {
    Critical,
    High,
    Medium,
    Low,
}

impl HeatTier {
    pub fn label(&self) -> &'static str {
        match self {
            HeatTier::Critical => "critical",
            HeatTier::High => "high",
            HeatTier::Medium => "medium",
            HeatTier::Low => "low",
        }
    }

    /// 店面徽章顏色
    pub fn accent(&self) -> &'static str {
        match self {
            HeatTier::Critical => "red",
            HeatTier::High => "orange",
            HeatTier::Medium => "yellow",
            HeatTier::Low => "blue",
        }
    }
}

impl std::fmt::Display for HeatTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
