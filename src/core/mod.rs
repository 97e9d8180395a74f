pub mod catalog;
pub mod deal_heat;
pub mod entitlement;
pub mod masking;
pub mod resolver;

pub use crate::domain::model::{
    Dealer, EntitlementStatus, Listing, MaskedListing, Pass, PassTier, PurchaseConfirmation,
};
pub use crate::domain::ports::{LedgerConfig, PassLedger};
pub use crate::utils::error::Result;
