use crate::export::ExportJob;
use crate::validation::{ResolutionChange, ValidationPass};
use serde_json::{Value, json};

/// Serialize a pass as `{ assetType, budget, summary, rows, overBudget }`.
/// Each row carries both verdicts, the eligibility flag and the tooltip text.
pub fn pass_to_json(pass: &ValidationPass) -> Value {
    let rows = pass
        .rows
        .iter()
        .map(|r| {
            let name = match &r.verdict.name {
                Some(v) => json!({"passed": v.passed, "reason": v.reason}),
                None => Value::Null,
            };
            json!({
                "index": r.index,
                "textureSet": r.texture_set,
                "resolution": {"w": r.resolution.width, "h": r.resolution.height},
                "resolutionCheck": {
                    "passed": r.verdict.resolution.passed,
                    "reason": r.verdict.resolution.reason,
                },
                "nameCheck": name,
                "eligible": r.eligible(),
                "tooltip": r.tooltip(),
            })
        })
        .collect::<Vec<_>>();
    json!({
        "assetType": pass.asset_type.label(),
        "budget": {"w": pass.budget.width, "h": pass.budget.height},
        "summary": {
            "total": pass.rows.len(),
            "eligible": pass.eligible_count(),
            "failed": pass.failed_count(),
        },
        "rows": rows,
        "overBudget": pass.over_budget,
    })
}

/// Shape: `{ changes: [{ textureSet, before: {w,h}, after: {w,h} }] }`.
pub fn changes_to_json(changes: &[ResolutionChange]) -> Value {
    let list = changes
        .iter()
        .map(|c| {
            json!({
                "textureSet": c.texture_set,
                "before": {"w": c.before.width, "h": c.before.height},
                "after": {"w": c.after.width, "h": c.after.height},
            })
        })
        .collect::<Vec<_>>();
    json!({ "changes": list })
}

/// Shape: `{ jobs: [{ textureSet, shader, exportPath }] }`.
pub fn plan_to_json(jobs: &[ExportJob]) -> Value {
    let list = jobs
        .iter()
        .map(|j| {
            json!({
                "textureSet": j.texture_set,
                "shader": j.shader.label(),
                "exportPath": j.export_path,
            })
        })
        .collect::<Vec<_>>();
    json!({ "jobs": list })
}
