pub use crate::domain::model::HeatTier;

/// Buckets a raw score. Out-of-range scores fall through to `Low`.
pub fn classify(score: i32) -> HeatTier {
    if score > 100 {
        HeatTier::Low
    } else if score >= 90 {
        HeatTier::Critical
    } else if score >= 80 {
        HeatTier::High
    } else if score >= 70 {
        HeatTier::Medium
    } else {
        HeatTier::Low
    }
}
