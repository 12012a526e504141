use crate::model::Resolution;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Asset categories known to the naming and resolution rules.
/// Each variant carries its own grammar and resolution budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    /// `PROP_<type>_<size>_<id>`, up to 1024 x 1024.
    Props,
    /// `WPN_<type>_<rarity>_<id>`, up to 2048 x 2048.
    Weapons,
    /// `CHAR_<type>_<gender>_<id>`, up to 4096 x 4096.
    Characters,
}

impl AssetCategory {
    /// All categories, in the order they are offered for selection.
    pub const ALL: [AssetCategory; 3] = [Self::Props, Self::Weapons, Self::Characters];

    pub fn label(self) -> &'static str {
        match self {
            Self::Props => "Props",
            Self::Weapons => "Weapons",
            Self::Characters => "Characters",
        }
    }

    pub fn grammar(self) -> &'static Grammar {
        match self {
            Self::Props => &PROPS_GRAMMAR,
            Self::Weapons => &WEAPONS_GRAMMAR,
            Self::Characters => &CHARACTERS_GRAMMAR,
        }
    }

    /// Maximum texture-set resolution for this category. Lower is always fine.
    pub fn budget(self) -> Resolution {
        match self {
            Self::Props => Resolution::new(1024, 1024),
            Self::Weapons => Resolution::new(2048, 2048),
            Self::Characters => Resolution::new(4096, 4096),
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetCategory {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "props" | "prop" => Ok(Self::Props),
            "weapons" | "weapon" | "wpn" => Ok(Self::Weapons),
            "characters" | "character" | "char" => Ok(Self::Characters),
            _ => Err(()),
        }
    }
}

/// Acronym grammar of a category: `TypeAcronym_Detail1_Detail2_NN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    /// Required first acronym (exact, case-sensitive).
    pub type_acronym: &'static str,
    /// Allowed second acronyms.
    pub detail_1: &'static [&'static str],
    /// Allowed third acronyms.
    pub detail_2: &'static [&'static str],
}

impl Grammar {
    pub fn allows_detail_1(&self, acronym: &str) -> bool {
        self.detail_1.contains(&acronym)
    }

    pub fn allows_detail_2(&self, acronym: &str) -> bool {
        self.detail_2.contains(&acronym)
    }
}

// Props: chair, table, lamp, window / small, medium, large
static PROPS_GRAMMAR: Grammar = Grammar {
    type_acronym: "PROP",
    detail_1: &["CHR", "TBL", "LMP", "WIN"],
    detail_2: &["S", "M", "L"],
};

// Weapons: sword, bow, rifle, explosive / common, rare, epic
static WEAPONS_GRAMMAR: Grammar = Grammar {
    type_acronym: "WPN",
    detail_1: &["SWD", "BOW", "RFL", "EXP"],
    detail_2: &["COM", "RAR", "EPC"],
};

// Characters: player, enemy, civilian / male, female
static CHARACTERS_GRAMMAR: Grammar = Grammar {
    type_acronym: "CHAR",
    detail_1: &["PLR", "ENM", "CIV"],
    detail_2: &["ML", "FL"],
};

/// Asset type as selected by the operator.
///
/// Selections usually name a known [`AssetCategory`], but labels coming from
/// configuration files or host dropdowns are kept verbatim when they don't, so
/// the rule engines can report them instead of guessing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum AssetType {
    Known(AssetCategory),
    Unrecognized(String),
}

impl AssetType {
    pub fn category(&self) -> Option<AssetCategory> {
        match self {
            Self::Known(c) => Some(*c),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Known(c) => c.label(),
            Self::Unrecognized(s) => s,
        }
    }
}

impl Default for AssetType {
    fn default() -> Self {
        Self::Known(AssetCategory::Props)
    }
}

impl From<AssetCategory> for AssetType {
    fn from(c: AssetCategory) -> Self {
        Self::Known(c)
    }
}

impl From<&str> for AssetType {
    fn from(s: &str) -> Self {
        match s.parse::<AssetCategory>() {
            Ok(c) => Self::Known(c),
            Err(()) => Self::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for AssetType {
    fn from(s: String) -> Self {
        match s.parse::<AssetCategory>() {
            Ok(c) => Self::Known(c),
            Err(()) => Self::Unrecognized(s),
        }
    }
}

impl From<AssetType> for String {
    fn from(t: AssetType) -> Self {
        match t {
            AssetType::Known(c) => c.label().to_string(),
            AssetType::Unrecognized(s) => s,
        }
    }
}

impl FromStr for AssetType {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
