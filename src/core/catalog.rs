use crate::domain::model::PassTier;
use crate::utils::error::{PassError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number};
use std::collections::HashMap;

/// The fixed set of purchasable tiers, validated once at startup.
#[derive(Debug, Clone)]
pub struct PassCatalog {
    tiers: Vec<PassTier>,
    index: HashMap<String, usize>,
}

impl PassCatalog {
    pub fn new(tiers: Vec<PassTier>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tiers.len());

        for (position, tier) in tiers.iter().enumerate() {
            let field = format!("catalog.tiers[{}]", position);
            validate_non_empty_string(&format!("{}.id", field), &tier.id)?;
            validate_positive_number(
                &format!("{}.duration_days", field),
                u64::from(tier.duration_days),
                1,
            )?;
            validate_positive_number(&format!("{}.price_cents", field), tier.price_cents, 1)?;

            if index.insert(tier.id.clone(), position).is_some() {
                return Err(PassError::InvalidConfigValueError {
                    field: format!("{}.id", field),
                    value: tier.id.clone(),
                    reason: "Duplicate tier id".to_string(),
                });
            }
        }

        Ok(Self { tiers, index })
    }

    /// 店面販售的 3、7、14 天方案
    pub fn standard() -> Self {
        let tiers = vec![
            PassTier {
                id: "pass-3d".to_string(),
                name: "3-Day Access".to_string(),
                duration_days: 3,
                price_cents: 4999,
                featured: false,
            },
            PassTier {
                id: "pass-7d".to_string(),
                name: "7-Day Access".to_string(),
                duration_days: 7,
                price_cents: 7999,
                featured: true,
            },
            PassTier {
                id: "pass-14d".to_string(),
                name: "14-Day Access".to_string(),
                duration_days: 14,
                price_cents: 9999,
                featured: false,
            },
        ];
        let index = tiers
            .iter()
            .enumerate()
            .map(|(position, tier)| (tier.id.clone(), position))
            .collect();
        Self { tiers, index }
    }

    pub fn tier_for(&self, tier_id: &str) -> Option<&PassTier> {
        self.index.get(tier_id).map(|&position| &self.tiers[position])
    }

    /// 依宣告順序列出方案
    pub fn tiers(&self) -> &[PassTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for PassCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(id: &str, days: u32, price: u64) -> PassTier {
        PassTier {
            id: id.to_string(),
            name: format!("{} pass", id),
            duration_days: days,
            price_cents: price,
            featured: false,
        }
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = PassCatalog::standard();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.tier_for("pass-3d").unwrap().duration_days, 3);
        assert_eq!(catalog.tier_for("pass-7d").unwrap().price_cents, 7999);
        assert!(catalog.tier_for("pass-7d").unwrap().featured);
        assert_eq!(catalog.tier_for("pass-14d").unwrap().duration_days, 14);
        assert!(catalog.tier_for("pass-30d").is_none());
    }

    #[test]
    fn test_standard_catalog_passes_validation() {
        let tiers = PassCatalog::standard().tiers().to_vec();
        assert!(PassCatalog::new(tiers).is_ok());
    }

    #[test]
    fn test_custom_tier_is_resolvable() {
        let catalog = PassCatalog::new(vec![tier("weekend", 2, 1999)]).unwrap();
        assert_eq!(catalog.tier_for("weekend").unwrap().duration_days, 2);
    }

    #[test]
    fn test_rejects_zero_duration() {
        let err = PassCatalog::new(vec![tier("broken", 0, 100)]).unwrap_err();
        assert!(err.to_string().contains("duration_days"));
    }

    #[test]
    fn test_rejects_zero_price() {
        assert!(PassCatalog::new(vec![tier("free", 3, 0)]).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = PassCatalog::new(vec![tier("dup", 3, 100), tier("dup", 7, 200)]).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_rejects_blank_id() {
        assert!(PassCatalog::new(vec![tier("  ", 3, 100)]).is_err());
    }
}
