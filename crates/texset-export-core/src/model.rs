use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Texture-set resolution in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    /// True if neither axis exceeds `budget` (equality fits).
    pub fn fits_within(&self, budget: &Resolution) -> bool {
        self.width <= budget.width && self.height <= budget.height
    }
    /// `width + height`, used to rank budgets.
    pub fn sum(&self) -> u64 {
        self.width as u64 + self.height as u64
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// A named texture set as reported by the host project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextureSet {
    pub name: String,
    pub resolution: Resolution,
}

impl TextureSet {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            resolution: Resolution::new(width, height),
        }
    }
}

/// Export preset applied to a texture set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ShaderType {
    #[default]
    Basic,
    Armament,
    Morph,
}

impl ShaderType {
    pub const ALL: [ShaderType; 3] = [Self::Basic, Self::Armament, Self::Morph];

    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Armament => "Armament",
            Self::Morph => "Morph",
        }
    }
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShaderType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "armament" => Ok(Self::Armament),
            "morph" => Ok(Self::Morph),
            _ => Err(()),
        }
    }
}

/// Reason attached to every passing verdict.
pub const PASSED_REASON: &str = "All validation checks passed!";

/// Pass/fail result of one rule engine, with a human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    pub reason: String,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: PASSED_REASON.to_string(),
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: reason.into(),
        }
    }
}

impl<E: fmt::Display> From<Result<(), E>> for Verdict {
    fn from(r: Result<(), E>) -> Self {
        match r {
            Ok(()) => Self::pass(),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}

/// Combined verdict of one texture set.
///
/// Resolution is checked first; `name` is `None` when the resolution check
/// failed and the name was never evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub resolution: Verdict,
    pub name: Option<Verdict>,
}

impl ValidationVerdict {
    pub fn resolution_passed(&self) -> bool {
        self.resolution.passed
    }

    pub fn name_passed(&self) -> bool {
        self.name.as_ref().is_some_and(|v| v.passed)
    }

    /// Export eligibility: both rules passed.
    pub fn passed(&self) -> bool {
        self.resolution_passed() && self.name_passed()
    }

    /// Reason of the failing check, or the passing reason.
    pub fn reason(&self) -> &str {
        match &self.name {
            Some(name) if self.resolution.passed => &name.reason,
            _ => &self.resolution.reason,
        }
    }
}
