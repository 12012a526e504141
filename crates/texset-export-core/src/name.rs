use crate::category::{AssetCategory, AssetType};
use crate::model::Verdict;
use thiserror::Error;

/// Layout every texture-set name must follow.
pub const NAME_FORMAT: &str = "AssetType_AssetDetail1_AssetDetail2_AssetID";

/// Why a texture-set name was rejected. `Display` is the tooltip text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameViolation {
    #[error(
        "Texture Set name must consist of 4 acronyms separated by underscore symbol _\nValid format: AssetType_AssetDetail1_AssetDetail2_AssetID\nCurrent number of acronyms: {count}"
    )]
    TokenCount { count: usize },
    #[error(
        "Last acronym is used to specify Asset ID\nValid options are any numbers from range 00 to 99. For example: 01, 55, 17\nCurrent acronym is: {found}"
    )]
    AssetId { found: String },
    #[error(
        "First acronym is for Asset Type\nFor asset type '{category}' valid option is '{expected}'\nCurrent acronym is: {found}"
    )]
    TypeAcronym {
        category: AssetCategory,
        expected: &'static str,
        found: String,
    },
    #[error(
        "Second acronym is for Asset Detail #1\nFor '{category}' valid options are {allowed:?}\nCurrent acronym is: {found}"
    )]
    Detail1 {
        category: AssetCategory,
        allowed: &'static [&'static str],
        found: String,
    },
    #[error(
        "Third acronym is for Asset Detail #2\nFor '{category}' valid options are {allowed:?}\nCurrent acronym is: {found}"
    )]
    Detail2 {
        category: AssetCategory,
        allowed: &'static [&'static str],
        found: String,
    },
    #[error(
        "General validation error. Asset type '{asset_type}' is not valid.\nThere is a mismatch between the selectable asset types and the ones known to the naming rules\nPlease contact a tool developer for further assistance"
    )]
    UnknownAssetType { asset_type: String },
}

/// The four acronyms of a texture-set name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameParts<'a> {
    pub type_acronym: &'a str,
    pub detail_1: &'a str,
    pub detail_2: &'a str,
    pub asset_id: &'a str,
}

impl<'a> NameParts<'a> {
    /// Splits `identifier` on `_` and checks the structural rules: exactly four
    /// tokens and a two-digit asset id.
    pub fn parse(identifier: &'a str) -> Result<Self, NameViolation> {
        let tokens: Vec<&str> = identifier.split('_').collect();
        let &[type_acronym, detail_1, detail_2, asset_id] = tokens.as_slice() else {
            return Err(NameViolation::TokenCount {
                count: tokens.len(),
            });
        };
        if asset_id.len() != 2 || !asset_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NameViolation::AssetId {
                found: asset_id.to_string(),
            });
        }
        Ok(Self {
            type_acronym,
            detail_1,
            detail_2,
            asset_id,
        })
    }
}

/// Checks already-split acronyms against the grammar of `category`.
/// Order is fixed: type acronym, detail 1, detail 2; the first failure wins.
pub fn check_grammar(category: AssetCategory, parts: &NameParts<'_>) -> Result<(), NameViolation> {
    let grammar = category.grammar();
    if parts.type_acronym != grammar.type_acronym {
        return Err(NameViolation::TypeAcronym {
            category,
            expected: grammar.type_acronym,
            found: parts.type_acronym.to_string(),
        });
    }
    if !grammar.allows_detail_1(parts.detail_1) {
        return Err(NameViolation::Detail1 {
            category,
            allowed: grammar.detail_1,
            found: parts.detail_1.to_string(),
        });
    }
    if !grammar.allows_detail_2(parts.detail_2) {
        return Err(NameViolation::Detail2 {
            category,
            allowed: grammar.detail_2,
            found: parts.detail_2.to_string(),
        });
    }
    Ok(())
}

/// Full name check. Structural rules run before the category grammar, so an
/// unknown asset type is only reported for otherwise well-formed names.
pub fn check_name(asset_type: &AssetType, identifier: &str) -> Result<(), NameViolation> {
    let parts = NameParts::parse(identifier)?;
    match asset_type.category() {
        Some(category) => check_grammar(category, &parts),
        None => Err(NameViolation::UnknownAssetType {
            asset_type: asset_type.label().to_string(),
        }),
    }
}

/// Validates a texture-set name for `asset_type`, returning pass/fail and a reason.
pub fn validate_name(asset_type: &AssetType, identifier: &str) -> Verdict {
    check_name(asset_type, identifier).into()
}

/// Boolean-only form of [`validate_name`].
pub fn is_name_valid(asset_type: &AssetType, identifier: &str) -> bool {
    check_name(asset_type, identifier).is_ok()
}
