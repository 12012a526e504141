use crate::category::{AssetCategory, AssetType};
use crate::model::{Resolution, Verdict};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionViolation {
    #[error(
        "Current resolution for Texture set is {actual},\nwhich is bigger than max allowed for current Asset Type ({asset_type}):\n{budget}"
    )]
    OverBudget {
        asset_type: AssetType,
        actual: Resolution,
        budget: Resolution,
    },
}

/// Category whose budget is used when the asset type is not recognized:
/// the one with the smallest `width + height`.
pub fn fallback_category() -> AssetCategory {
    AssetCategory::ALL
        .into_iter()
        .min_by_key(|c| c.budget().sum())
        .unwrap_or(AssetCategory::Props)
}

/// Resolution budget for `asset_type`. Unknown asset types fall back to the
/// strictest budget and log a warning.
pub fn budget_for(asset_type: &AssetType) -> Resolution {
    match asset_type.category() {
        Some(category) => category.budget(),
        None => {
            let budget = fallback_category().budget();
            warn!(
                asset_type = %asset_type,
                fallback = %budget,
                "no resolution budget for asset type, falling back to the default"
            );
            budget
        }
    }
}

/// Compares `actual` against an already resolved `budget`.
pub fn check_resolution_against(
    asset_type: &AssetType,
    actual: Resolution,
    budget: Resolution,
) -> Result<(), ResolutionViolation> {
    if actual.fits_within(&budget) {
        Ok(())
    } else {
        Err(ResolutionViolation::OverBudget {
            asset_type: asset_type.clone(),
            actual,
            budget,
        })
    }
}

pub fn check_resolution(asset_type: &AssetType, actual: Resolution) -> Result<(), ResolutionViolation> {
    check_resolution_against(asset_type, actual, budget_for(asset_type))
}

/// Passes iff neither axis of `actual` exceeds the budget of `asset_type`.
pub fn validate_resolution(asset_type: &AssetType, actual: Resolution) -> Verdict {
    check_resolution(asset_type, actual).into()
}
