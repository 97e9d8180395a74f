pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;
pub use config::TomlConfig;

pub use crate::adapters::{JsonlLedger, MemoryLedger};
pub use crate::core::{
    catalog::PassCatalog,
    deal_heat::{classify, HeatTier},
    entitlement::EntitlementStore,
    masking::{mask_vin, project},
    resolver::UnlockResolver,
};
pub use crate::domain::model::{
    Dealer, DealerView, EntitlementStatus, Listing, MaskedListing, Pass, PassTier,
    PurchaseConfirmation,
};
pub use crate::utils::error::{PassError, Result};
