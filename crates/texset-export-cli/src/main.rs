use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use texset_export_core::prelude::*;
use texset_export_core::{changes_to_json, pass_to_json, plan_to_json};
use tracing::{error, info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "texset-export",
    about = "Validate texture sets against studio naming and resolution rules",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate texture-set manifests and report verdicts
    Validate(ValidateArgs),
    /// Validate, resize over-budget texture sets to the budget, and write manifests back
    Fix(ValidateArgs),
    /// Validate and write the export plan of every texture set that passed
    Export(ExportArgs),
    /// Print the naming grammar and resolution budgets
    Rules(RulesArgs),
}

#[derive(Parser, Debug, Clone)]
struct ValidateArgs {
    // Input/Output
    /// Manifest file (.json/.yaml/.yml) or directory of manifests
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// YAML config file path (overrides session options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Session
    /// Asset type: Props | Weapons | Characters
    #[arg(long, default_value = "Props", help_heading = "Session")]
    asset_type: String,
    /// Export under the personal root instead of the official one
    #[arg(long, default_value_t = false, help_heading = "Session")]
    personal_export: bool,
    /// Personal export root
    #[arg(long, help_heading = "Session")]
    personal_root: Option<String>,
    /// Official export root
    #[arg(long, help_heading = "Session")]
    official_root: Option<String>,
    /// Shader type for every texture set: basic | armament | morph
    #[arg(long, default_value = "basic", help_heading = "Session")]
    shader: String,
    /// Resize over-budget texture sets to the asset type budget
    #[arg(long, default_value_t = false, help_heading = "Session")]
    fix: bool,

    // Report
    /// Report format: text | json | template
    #[arg(long, value_parser = ["text", "json", "template"], default_value = "text", help_heading = "Report")]
    report: String,
    /// External report template file (handlebars), used when --report template
    #[arg(long, help_heading = "Report")]
    template: Option<PathBuf>,
    /// Write the report to this file instead of stdout
    #[arg(short, long, help_heading = "Report")]
    out: Option<PathBuf>,
    /// Fail when any texture set does not pass validation or any manifest cannot be loaded
    #[arg(long, default_value_t = false, help_heading = "Report")]
    strict: bool,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Report")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Report")]
    print_config_format: String,
    /// Dry run: validate and report but do not write any file
    #[arg(long, default_value_t = false, help_heading = "Report")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct ExportArgs {
    #[command(flatten)]
    common: ValidateArgs,
    /// Export plan output file (JSON)
    #[arg(long, default_value = "export_plan.json", help_heading = "Export")]
    plan: PathBuf,
}

#[derive(Parser, Debug, Clone)]
struct RulesArgs {
    /// Output format: text | json
    #[arg(long, value_parser = ["text", "json"], default_value = "text")]
    format: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Validate(args) => run_validate(args, cli.progress && !cli.quiet).map(|_| ()),
        Commands::Fix(args) => {
            let mut a = args.clone();
            a.fix = true;
            run_validate(&a, cli.progress && !cli.quiet).map(|_| ())
        }
        Commands::Export(args) => run_export(args, cli.progress && !cli.quiet),
        Commands::Rules(args) => run_rules(args),
    }
}

/// Outcome of one manifest.
struct ManifestRun {
    path: PathBuf,
    session: ExportSession,
    outcome: RefreshOutcome,
}

fn run_validate(cli: &ValidateArgs, show_progress: bool) -> anyhow::Result<Vec<ManifestRun>> {
    let cfg = build_config(cli)?;
    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(Vec::new());
    }
    if let AssetType::Unrecognized(label) = &cfg.asset_type {
        warn!(asset_type = %label, "asset type is not one of Props, Weapons, Characters");
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    info!(count = paths.len(), "found manifests");
    let (runs, skipped) = validate_with_progress(&paths, &cfg, cli, show_progress)?;

    let rendered = render_report(&runs, cli)?;
    match &cli.out {
        Some(path) if !cli.dry_run => {
            fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
            info!(?path, "report written");
        }
        _ => print!("{rendered}"),
    }

    let failed: usize = runs.iter().map(|r| r.outcome.pass.failed_count()).sum();
    let total: usize = runs.iter().map(|r| r.outcome.pass.rows.len()).sum();
    info!(manifests = runs.len(), skipped, total, failed, "validation finished");
    if runs.is_empty() && skipped > 0 {
        anyhow::bail!("none of the {skipped} manifests could be loaded");
    }
    if cli.strict && skipped > 0 {
        anyhow::bail!("{skipped} manifests could not be loaded");
    }
    if cli.strict && failed > 0 {
        anyhow::bail!("{failed} of {total} texture sets failed validation");
    }
    Ok(runs)
}

fn validate_with_progress(
    paths: &[PathBuf],
    cfg: &ExporterConfig,
    cli: &ValidateArgs,
    progress: bool,
) -> anyhow::Result<(Vec<ManifestRun>, usize)> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} validating {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut runs = Vec::with_capacity(paths.len());
    let mut skipped = 0;
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match validate_manifest(p, cfg, cli) {
            Ok(run) => runs.push(run),
            Err(e) => {
                error!(?p, error = %e, "skip manifest");
                skipped += 1;
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok((runs, skipped))
}

fn validate_manifest(
    path: &Path,
    cfg: &ExporterConfig,
    cli: &ValidateArgs,
) -> anyhow::Result<ManifestRun> {
    let mut project = load_manifest(path)?;
    let mut session = ExportSession::new(cfg.clone())?;
    let mut policy = if cli.fix {
        AutoFixPolicy::Always
    } else {
        AutoFixPolicy::Never
    };
    let outcome = session.handle_event(ProjectEvent::Opened, &mut project, &mut policy)?;
    let outcome = outcome.context("session did not open the project")?;

    if let AutoFixOutcome::Applied(changes) = &outcome.auto_fix {
        if cli.dry_run {
            info!(?path, count = changes.len(), "dry run: manifest not rewritten");
        } else {
            save_manifest(path, &project)?;
            info!(?path, count = changes.len(), "manifest rewritten with budget resolutions");
        }
    }
    Ok(ManifestRun {
        path: path.to_path_buf(),
        session,
        outcome,
    })
}

fn run_export(args: &ExportArgs, show_progress: bool) -> anyhow::Result<()> {
    let runs = run_validate(&args.common, show_progress)?;
    if args.common.print_config {
        return Ok(());
    }
    let mut manifests = Vec::with_capacity(runs.len());
    let mut exported = 0;
    for run in &runs {
        let mut plan = ExportPlan::new();
        exported += run.session.export(&mut plan)?;
        let mut value = plan_to_json(&plan.jobs);
        value["manifest"] = serde_json::json!(run.path.to_string_lossy().replace('\\', "/"));
        manifests.push(value);
    }
    let value = serde_json::json!({ "manifests": manifests });
    if args.common.dry_run {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        fs::write(&args.plan, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("write {}", args.plan.display()))?;
        info!(plan = ?args.plan, exported, "export plan written");
    }
    Ok(())
}

fn run_rules(args: &RulesArgs) -> anyhow::Result<()> {
    match args.format.as_str() {
        "json" => {
            let list: Vec<serde_json::Value> = AssetCategory::ALL
                .iter()
                .map(|c| {
                    let g = c.grammar();
                    let b = c.budget();
                    serde_json::json!({
                        "assetType": c.label(),
                        "typeAcronym": g.type_acronym,
                        "detail1": g.detail_1,
                        "detail2": g.detail_2,
                        "budget": {"w": b.width, "h": b.height},
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        _ => {
            println!("Name format: {}", texset_export_core::NAME_FORMAT);
            for c in AssetCategory::ALL {
                let g = c.grammar();
                println!(
                    "{:<11} {:<5} detail1={:<20} detail2={:<14} max={}",
                    c.label(),
                    g.type_acronym,
                    g.detail_1.join("|"),
                    g.detail_2.join("|"),
                    c.budget()
                );
            }
        }
    }
    Ok(())
}

fn build_config(cli: &ValidateArgs) -> anyhow::Result<ExporterConfig> {
    let shader: ShaderType = cli
        .shader
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown shader type: {}", cli.shader))?;
    let mut builder = ExporterConfig::builder()
        .asset_type(cli.asset_type.as_str())
        .personal_export(cli.personal_export)
        .default_shader(shader);
    if let Some(v) = &cli.personal_root {
        builder = builder.personal_root(v.as_str());
    }
    if let Some(v) = &cli.official_root {
        builder = builder.official_root(v.as_str());
    }
    let mut cfg = builder.build();

    // Load config file if provided; its values win over the flags above
    if let Some(path) = &cli.config {
        let file =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)?;
        cfg = y.into_exporter_config(cfg);
    }
    if cli.fix {
        cfg.suppress_auto_fix_prompt = false;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let filter = ManifestFilter::new(include, exclude)?;
    if path.is_file() {
        return Ok(filter.accepts(path).then(|| path.to_path_buf()).into_iter().collect());
    }
    Ok(WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && filter.accepts(e.path()))
        .map(|e| e.into_path())
        .collect())
}

/// Include/exclude globs plus the manifest extension check.
struct ManifestFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl ManifestFilter {
    fn new(include: &[String], exclude: &[String]) -> anyhow::Result<Self> {
        Ok(Self {
            include: glob_set(include)?,
            exclude: glob_set(exclude)?,
        })
    }

    fn accepts(&self, p: &Path) -> bool {
        let s = p.to_string_lossy().replace('\\', "/");
        let excluded = self.exclude.as_ref().is_some_and(|g| g.is_match(&s));
        let included = self.include.as_ref().is_none_or(|g| g.is_match(&s));
        !excluded && included && is_manifest(p)
    }
}

fn glob_set(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("invalid glob {pat}"))?);
    }
    Ok(Some(b.build()?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifestFormat {
    Json,
    Yaml,
}

fn manifest_format(p: &Path) -> Option<ManifestFormat> {
    match p
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Some(ManifestFormat::Json),
        Some("yaml" | "yml") => Some(ManifestFormat::Yaml),
        _ => None,
    }
}

fn is_manifest(p: &Path) -> bool {
    manifest_format(p).is_some()
}

fn load_manifest(p: &Path) -> anyhow::Result<InMemoryProject> {
    let text = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let project = match manifest_format(p) {
        Some(ManifestFormat::Yaml) => serde_yaml::from_str(&text)?,
        _ => InMemoryProject::from_json_str(&text)?,
    };
    Ok(project)
}

fn save_manifest(p: &Path, project: &InMemoryProject) -> anyhow::Result<()> {
    let text = match manifest_format(p) {
        Some(ManifestFormat::Yaml) => serde_yaml::to_string(project)?,
        _ => project.to_json_string()?,
    };
    fs::write(p, text).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

fn render_report(runs: &[ManifestRun], cli: &ValidateArgs) -> anyhow::Result<String> {
    match cli.report.as_str() {
        "json" => {
            let list: Vec<serde_json::Value> = runs
                .iter()
                .map(|r| {
                    let mut value = pass_to_json(&r.outcome.pass);
                    value["manifest"] =
                        serde_json::json!(r.path.to_string_lossy().replace('\\', "/"));
                    if let AutoFixOutcome::Applied(changes) = &r.outcome.auto_fix {
                        value["autoFix"] = changes_to_json(changes);
                    }
                    value
                })
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&list)?))
        }
        other => {
            let tpl_owned_from_file: Option<String> = match &cli.template {
                Some(path) if other == "template" => Some(
                    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?,
                ),
                None if other == "template" => {
                    anyhow::bail!("--report template requires --template <file>")
                }
                _ => None,
            };
            let tpl_ref: &str = match &tpl_owned_from_file {
                Some(s) => s.as_str(),
                None => include_str!("templates/report.hbs"),
            };
            let mut reg = Handlebars::new();
            reg.set_strict_mode(true);
            reg.register_escape_fn(handlebars::no_escape);
            reg.register_template_string("tpl", tpl_ref)?;
            Ok(reg.render("tpl", &build_report_context(runs))?)
        }
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Serialize)]
struct ReportRow {
    index: usize,
    name: String,
    resolution: String,
    shader: String,
    status: &'static str,
    checked: bool,
    /// Failure reason on one line; empty when the row passed.
    reason: String,
    export_path: String,
}

#[derive(Serialize)]
struct ReportChange {
    texture_set: String,
    before: String,
    after: String,
}

#[derive(Serialize)]
struct ReportManifest {
    path: String,
    asset_type: String,
    budget: String,
    rows: Vec<ReportRow>,
    over_budget: Vec<String>,
    changes: Vec<ReportChange>,
    eligible: usize,
    total: usize,
}

#[derive(Serialize)]
struct ReportContext {
    manifests: Vec<ReportManifest>,
}

fn build_report_context(runs: &[ManifestRun]) -> ReportContext {
    let mut manifests = Vec::with_capacity(runs.len());
    for run in runs {
        let pass = &run.outcome.pass;
        let rows = run
            .session
            .rows()
            .iter()
            .enumerate()
            .map(|(index, r)| ReportRow {
                index: index + 1,
                name: r.texture_set.clone(),
                resolution: r.resolution.to_string(),
                shader: r.shader.to_string(),
                status: if r.enabled { "OK" } else { "FAIL" },
                checked: r.checked,
                reason: if r.enabled {
                    String::new()
                } else {
                    r.verdict.reason().replace('\n', " ")
                },
                export_path: r.export_path.clone(),
            })
            .collect();
        let changes = match &run.outcome.auto_fix {
            AutoFixOutcome::Applied(changes) => changes
                .iter()
                .map(|c| ReportChange {
                    texture_set: c.texture_set.clone(),
                    before: c.before.to_string(),
                    after: c.after.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        };
        manifests.push(ReportManifest {
            path: run.path.to_string_lossy().replace('\\', "/"),
            asset_type: pass.asset_type.to_string(),
            budget: pass.budget.to_string(),
            rows,
            over_budget: pass.over_budget.clone(),
            changes,
            eligible: pass.eligible_count(),
            total: pass.rows.len(),
        });
    }
    ReportContext { manifests }
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    asset_type: Option<String>,
    personal_export: Option<bool>,
    personal_root: Option<String>,
    official_root: Option<String>,
    default_shader: Option<String>,
    suppress_auto_fix_prompt: Option<bool>,
}

impl YamlConfig {
    fn into_exporter_config(self, mut cfg: ExporterConfig) -> ExporterConfig {
        if let Some(v) = self.asset_type {
            cfg.asset_type = AssetType::from(v);
        }
        if let Some(v) = self.personal_export {
            cfg.personal_export = v;
        }
        if let Some(v) = self.personal_root {
            cfg.personal_root = v;
        }
        if let Some(v) = self.official_root {
            cfg.official_root = v;
        }
        if let Some(v) = self.default_shader {
            cfg.default_shader = v.parse().unwrap_or(cfg.default_shader);
        }
        if let Some(v) = self.suppress_auto_fix_prompt {
            cfg.suppress_auto_fix_prompt = v;
        }
        cfg
    }
}
