use texset_export_core::prelude::*;

fn props() -> AssetType {
    AssetCategory::Props.into()
}

#[test]
fn over_budget_row_short_circuits_name_check() {
    let project = InMemoryProject::new().with_texture_set("PROP_CHR_S_01", 2048, 2048);
    let pass = run_validation_pass(&project, &props());

    assert_eq!(pass.over_budget, vec!["PROP_CHR_S_01".to_string()]);
    let row = &pass.rows[0];
    assert!(!row.eligible());
    assert!(!row.verdict.resolution_passed());
    assert!(row.verdict.name.is_none());
    assert!(pass.offers_auto_fix());
}

#[test]
fn malformed_name_does_not_change_resolution_failure() {
    let good = InMemoryProject::new().with_texture_set("PROP_CHR_S_01", 2048, 2048);
    let bad = InMemoryProject::new().with_texture_set("garbage", 2048, 2048);
    let a = run_validation_pass(&good, &props());
    let b = run_validation_pass(&bad, &props());
    assert_eq!(a.rows[0].verdict, b.rows[0].verdict);
    assert_eq!(b.rows[0].verdict.reason(), a.rows[0].verdict.resolution.reason);
}

#[test]
fn auto_fix_then_rerun_passes() {
    let mut project = InMemoryProject::new().with_texture_set("PROP_CHR_S_01", 2048, 2048);
    let pass = run_validation_pass(&project, &props());

    let changes = apply_budget_resolution(&mut project, &pass).expect("apply");
    assert_eq!(
        changes,
        vec![ResolutionChange {
            texture_set: "PROP_CHR_S_01".into(),
            before: Resolution::new(2048, 2048),
            after: Resolution::new(1024, 1024),
        }]
    );
    assert_eq!(
        project.get("PROP_CHR_S_01").map(|t| t.resolution),
        Some(Resolution::new(1024, 1024))
    );

    let pass = run_validation_pass(&project, &props());
    let row = &pass.rows[0];
    assert!(row.verdict.resolution_passed());
    assert!(row.verdict.name_passed());
    assert!(row.eligible());
    assert!(pass.over_budget.is_empty());
    assert!(!pass.offers_auto_fix());
}

#[test]
fn auto_fix_uses_exact_ceiling_not_aspect_ratio() {
    let mut project = InMemoryProject::new().with_texture_set("PROP_TBL_M_02", 4096, 512);
    let pass = run_validation_pass(&project, &props());
    apply_budget_resolution(&mut project, &pass).expect("apply");
    assert_eq!(
        project.get("PROP_TBL_M_02").map(|t| t.resolution),
        Some(Resolution::new(1024, 1024))
    );
}

#[test]
fn fixed_set_can_still_fail_its_name() {
    let mut project = InMemoryProject::new().with_texture_set("PROP_BKL_M_02", 2048, 1024);
    let pass = run_validation_pass(&project, &props());
    apply_budget_resolution(&mut project, &pass).expect("apply");
    let pass = run_validation_pass(&project, &props());
    let row = &pass.rows[0];
    assert!(row.verdict.resolution_passed());
    assert!(!row.verdict.name_passed());
    assert!(!row.eligible());
    assert!(row.verdict.reason().contains("BKL"));
}

#[test]
fn rows_fail_independently() {
    let project = InMemoryProject::new()
        .with_texture_set("WPN_SWD_RAR_01", 2048, 2048)
        .with_texture_set("WPN_SWD_RAR", 512, 512)
        .with_texture_set("WPN_BOW_EPC_02", 4096, 4096)
        .with_texture_set("WPN_EXP_COM_03", 1024, 2048);
    let pass = run_validation_pass(&project, &AssetCategory::Weapons.into());

    let eligible: Vec<bool> = pass.rows.iter().map(|r| r.eligible()).collect();
    assert_eq!(eligible, vec![true, false, false, true]);
    assert_eq!(pass.over_budget, vec!["WPN_BOW_EPC_02".to_string()]);
    assert_eq!(pass.eligible_count(), 2);
    assert_eq!(pass.failed_count(), 2);
    assert!(!pass.all_passed());
    assert_eq!(pass.rows[2].index, 2);
}

#[test]
fn changing_asset_type_rebuilds_over_budget_list() {
    let project = InMemoryProject::new()
        .with_texture_set("CHAR_PLR_ML_01", 4096, 4096)
        .with_texture_set("CHAR_ENM_FL_02", 2048, 2048);
    let as_props = run_validation_pass(&project, &props());
    assert_eq!(as_props.over_budget.len(), 2);
    let as_chars = run_validation_pass(&project, &AssetCategory::Characters.into());
    assert!(as_chars.over_budget.is_empty());
    assert!(as_chars.all_passed());
}

#[test]
fn repeated_passes_are_identical() {
    let project = InMemoryProject::new()
        .with_texture_set("PROP_CHR_S_01", 2048, 2048)
        .with_texture_set("PROP_LMP_L_03", 512, 512)
        .with_texture_set("PROP_XXX_L_04", 256, 256);
    let first = run_validation_pass(&project, &props());
    let second = run_validation_pass(&project, &props());
    assert_eq!(first, second);
    assert_eq!(first.over_budget, second.over_budget);
}

#[test]
fn unknown_asset_type_fails_every_name_but_checks_fallback_budget() {
    let project = InMemoryProject::new()
        .with_texture_set("PROP_CHR_S_01", 1024, 1024)
        .with_texture_set("PROP_CHR_S_02", 2048, 2048);
    let pass = run_validation_pass(&project, &AssetType::from("Vehicles"));
    assert_eq!(pass.budget, Resolution::new(1024, 1024));
    assert!(pass.rows[0].verdict.resolution_passed());
    assert!(!pass.rows[0].verdict.name_passed());
    assert_eq!(pass.over_budget, vec!["PROP_CHR_S_02".to_string()]);
}

#[test]
fn empty_project_has_nothing_to_fix() {
    let mut project = InMemoryProject::new();
    let pass = run_validation_pass(&project, &props());
    assert!(pass.rows.is_empty());
    assert!(pass.all_passed());
    assert!(apply_budget_resolution(&mut project, &pass).expect("apply").is_empty());
}

#[test]
fn applying_to_a_vanished_texture_set_errors() {
    let project = InMemoryProject::new().with_texture_set("PROP_CHR_S_01", 2048, 2048);
    let pass = run_validation_pass(&project, &props());
    let mut other = InMemoryProject::new();
    let err = apply_budget_resolution(&mut other, &pass).unwrap_err();
    assert!(matches!(
        err,
        texset_export_core::ExporterError::TextureSetNotFound(name) if name == "PROP_CHR_S_01"
    ));
}

#[test]
fn tooltips_name_the_failing_check() {
    let project = InMemoryProject::new()
        .with_texture_set("PROP_CHR_S_01", 512, 512)
        .with_texture_set("PROP_CHR_X_02", 512, 512)
        .with_texture_set("PROP_CHR_S_03", 2048, 512);
    let pass = run_validation_pass(&project, &props());
    assert!(pass.rows[0].tooltip().contains("OK for texture set 1"));
    assert!(pass.rows[1].tooltip().contains("Name validation is FAILED for texture set 2"));
    assert!(pass.rows[2].tooltip().contains("Resolution validation is FAILED for texture set 3"));
    assert!(pass.rows[2].tooltip().contains("forcibly disabled"));
}

#[test]
fn duplicate_names_are_fixed_by_position() {
    let mut project = InMemoryProject::new()
        .with_texture_set("PROP_CHR_S_01", 2048, 2048)
        .with_texture_set("PROP_CHR_S_01", 4096, 4096);
    let pass = run_validation_pass(&project, &props());
    assert_eq!(pass.over_budget.len(), 2);

    let changes = apply_budget_resolution(&mut project, &pass).expect("apply");
    let before: Vec<Resolution> = changes.iter().map(|c| c.before).collect();
    assert_eq!(before, vec![Resolution::new(2048, 2048), Resolution::new(4096, 4096)]);
    let after: Vec<Resolution> = project.texture_sets.iter().map(|t| t.resolution).collect();
    assert_eq!(after, vec![Resolution::new(1024, 1024); 2]);
    assert!(run_validation_pass(&project, &props()).over_budget.is_empty());
}

#[test]
fn applying_a_stale_pass_to_a_reordered_project_errors() {
    let project = InMemoryProject::new()
        .with_texture_set("PROP_LMP_S_01", 512, 512)
        .with_texture_set("PROP_CHR_S_02", 2048, 2048);
    let pass = run_validation_pass(&project, &props());
    let mut reordered = InMemoryProject::new()
        .with_texture_set("PROP_CHR_S_02", 2048, 2048)
        .with_texture_set("PROP_LMP_S_01", 512, 512);
    let err = apply_budget_resolution(&mut reordered, &pass).unwrap_err();
    assert!(matches!(
        err,
        texset_export_core::ExporterError::TextureSetNotFound(name) if name == "PROP_CHR_S_02"
    ));
    assert_eq!(reordered.texture_sets[0].resolution, Resolution::new(2048, 2048));
}
