use crate::category::AssetType;
use crate::error::Result;
use crate::host::TextureSetProvider;
use crate::model::{Resolution, TextureSet, ValidationVerdict, Verdict};
use crate::name::validate_name;
use crate::resolution::{budget_for, check_resolution_against};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Verdict of one texture set within a pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowVerdict {
    /// Position of the texture set in the project.
    pub index: usize,
    pub texture_set: String,
    pub resolution: Resolution,
    pub verdict: ValidationVerdict,
}

impl RowVerdict {
    pub fn eligible(&self) -> bool {
        self.verdict.passed()
    }

    /// Tooltip text for the validation cell of this row.
    pub fn tooltip(&self) -> String {
        let n = self.index + 1;
        if self.eligible() {
            return format!(
                "Texture set validations are OK for texture set {n}\n{}\nGood job!",
                self.texture_set
            );
        }
        let check = if self.verdict.resolution_passed() {
            "Name"
        } else {
            "Resolution"
        };
        format!(
            "Texture set {check} validation is FAILED for texture set {n}\n{}\nReason: {}\nExport of this texture set is forcibly disabled until validation is OK.",
            self.texture_set,
            self.verdict.reason()
        )
    }
}

/// Result of validating every texture set of a project against one asset type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationPass {
    pub asset_type: AssetType,
    /// Budget the resolutions were checked against.
    pub budget: Resolution,
    pub rows: Vec<RowVerdict>,
    /// Texture sets whose resolution exceeded the budget, in project order.
    pub over_budget: Vec<String>,
}

impl ValidationPass {
    pub fn row(&self, texture_set: &str) -> Option<&RowVerdict> {
        self.rows.iter().find(|r| r.texture_set == texture_set)
    }

    pub fn eligible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.eligible()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.rows.len() - self.eligible_count()
    }

    pub fn all_passed(&self) -> bool {
        self.rows.iter().all(RowVerdict::eligible)
    }

    /// Rows whose resolution exceeded the budget, in project order.
    pub fn over_budget_rows(&self) -> impl Iterator<Item = &RowVerdict> {
        self.rows.iter().filter(|r| !r.verdict.resolution_passed())
    }

    /// True when an automatic resolution fix should be offered.
    pub fn offers_auto_fix(&self) -> bool {
        !self.over_budget.is_empty()
    }
}

/// Validates one texture set against an already resolved budget.
/// The name is only checked when the resolution fits.
pub fn validate_texture_set(
    asset_type: &AssetType,
    budget: Resolution,
    texture_set: &TextureSet,
) -> ValidationVerdict {
    let resolution: Verdict =
        check_resolution_against(asset_type, texture_set.resolution, budget).into();
    let name = resolution
        .passed
        .then(|| validate_name(asset_type, &texture_set.name));
    ValidationVerdict { resolution, name }
}

#[instrument(skip_all, fields(asset_type = %asset_type))]
/// Runs both rule engines over every texture set of `project`.
///
/// Each call recomputes everything from the project's current state, so it is
/// safe to call on every lifecycle notification or selection change.
pub fn run_validation_pass<P>(project: &P, asset_type: &AssetType) -> ValidationPass
where
    P: TextureSetProvider + ?Sized,
{
    let budget = budget_for(asset_type);
    let mut rows = Vec::new();
    let mut over_budget = Vec::new();
    for (index, set) in project.texture_sets().into_iter().enumerate() {
        let verdict = validate_texture_set(asset_type, budget, &set);
        debug!(
            texture_set = %set.name,
            resolution = %set.resolution,
            passed = verdict.passed(),
            "validated texture set"
        );
        if !verdict.resolution_passed() {
            over_budget.push(set.name.clone());
        }
        rows.push(RowVerdict {
            index,
            texture_set: set.name,
            resolution: set.resolution,
            verdict,
        });
    }
    ValidationPass {
        asset_type: asset_type.clone(),
        budget,
        rows,
        over_budget,
    }
}

/// Before/after record of one auto-fixed texture set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionChange {
    pub texture_set: String,
    pub before: Resolution,
    pub after: Resolution,
}

#[instrument(skip_all, fields(asset_type = %pass.asset_type, count = pass.over_budget.len()))]
/// Sets every over-budget texture set of `pass` to exactly the budget of the
/// pass. Aspect ratio is not preserved. Run a new pass afterwards.
pub fn apply_budget_resolution<P>(
    project: &mut P,
    pass: &ValidationPass,
) -> Result<Vec<ResolutionChange>>
where
    P: TextureSetProvider + ?Sized,
{
    let mut changes = Vec::with_capacity(pass.over_budget.len());
    for row in pass.over_budget_rows() {
        let before = project.set_resolution(row.index, &row.texture_set, pass.budget)?;
        info!(
            texture_set = %row.texture_set,
            index = row.index,
            was = %before,
            now = %pass.budget,
            "applied required resolution"
        );
        changes.push(ResolutionChange {
            texture_set: row.texture_set.clone(),
            before,
            after: pass.budget,
        });
    }
    Ok(changes)
}
