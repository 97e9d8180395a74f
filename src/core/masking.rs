use crate::core::deal_heat;
use crate::domain::model::{Dealer, DealerView, Listing, MaskedListing};
use crate::utils::error::{PassError, Result};

pub const VIN_PREFIX_LEN: usize = 10;
pub const VIN_SUFFIX_LEN: usize = 4;
const VIN_ELISION: &str = "...";

/// Builds the view of a listing that a viewer is allowed to see.
///
/// Only the VIN and the dealer's phone and email are gated; every other
/// field is copied as is. Projecting `result.listing` again with the same
/// `unlocked` flag gives back the same result.
pub fn project(listing: &Listing, dealer: &Dealer, unlocked: bool) -> Result<MaskedListing> {
    let mut projected = listing.clone();

    let dealer_view = if unlocked {
        DealerView {
            business_name: dealer.business_name.clone(),
            phone: Some(dealer.phone.clone()),
            email: Some(dealer.email.clone()),
        }
    } else {
        projected.vehicle.vin = mask_vin(&listing.vehicle.vin)?;
        DealerView {
            business_name: dealer.business_name.clone(),
            phone: None,
            email: None,
        }
    };

    Ok(MaskedListing {
        heat_tier: deal_heat::classify(listing.deal_heat_score),
        listing: projected,
        dealer: dealer_view,
        unlocked,
    })
}

/// `first 10 chars + "..." + last 4 chars`.
pub fn mask_vin(vin: &str) -> Result<String> {
    let chars: Vec<char> = vin.chars().collect();
    if chars.len() < VIN_PREFIX_LEN {
        return Err(PassError::MalformedVin {
            length: chars.len(),
            minimum: VIN_PREFIX_LEN,
        });
    }

    let prefix: String = chars[..VIN_PREFIX_LEN].iter().collect();
    let suffix: String = chars[chars.len() - VIN_SUFFIX_LEN..].iter().collect();
    Ok(format!("{}{}{}", prefix, VIN_ELISION, suffix))
}
