//! Export session: the state behind the exporter panel, without any widgets.

use crate::category::AssetType;
use crate::config::ExporterConfig;
use crate::error::{ExporterError, Result};
use crate::export::{ExportJob, Exporter};
use crate::host::{ProjectEvent, TextureSetProvider};
use crate::model::{Resolution, ShaderType, ValidationVerdict};
use crate::validation::{ResolutionChange, ValidationPass, apply_budget_resolution, run_validation_pass};
use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use tracing::{info, warn};

/// One table row: a texture set and its export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub texture_set: String,
    pub resolution: Resolution,
    pub shader: ShaderType,
    /// Selected for export. Forced to `enabled` on every refresh.
    pub checked: bool,
    /// False while validation fails; a disabled row cannot be checked.
    pub enabled: bool,
    pub export_path: String,
    pub verdict: ValidationVerdict,
    pub tooltip: String,
}

/// Asks whether over-budget texture sets should be resized automatically.
pub trait AutoFixPrompt {
    fn confirm(&mut self, asset_type: &AssetType, over_budget: &[String]) -> bool;
}

/// Fixed answers for non-interactive hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoFixPolicy {
    Always,
    Never,
}

impl AutoFixPrompt for AutoFixPolicy {
    fn confirm(&mut self, _asset_type: &AssetType, _over_budget: &[String]) -> bool {
        matches!(self, Self::Always)
    }
}

/// What happened to the auto-fix offer during a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoFixOutcome {
    /// Every resolution was within budget.
    NotNeeded,
    /// The prompt was skipped because of the stored preference.
    Suppressed,
    Declined,
    /// Budgets were applied and the project re-validated.
    Applied(Vec<ResolutionChange>),
}

#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// Pass reflected in the rows after the refresh.
    pub pass: ValidationPass,
    pub auto_fix: AutoFixOutcome,
}

/// State of one exporter instance, created and dropped by the host's plugin
/// lifecycle. Every refresh re-reads the project and revalidates all rows.
#[derive(Debug, Clone)]
pub struct ExportSession {
    config: ExporterConfig,
    rows: Vec<ExportRow>,
    last_pass: Option<ValidationPass>,
    open: bool,
}

impl ExportSession {
    pub fn new(config: ExporterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rows: Vec::new(),
            last_pass: None,
            open: false,
        })
    }

    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    pub fn last_pass(&self) -> Option<&ValidationPass> {
        self.last_pass.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Fills the table from a freshly opened or created project.
    pub fn load<P>(&mut self, project: &mut P, prompt: &mut dyn AutoFixPrompt) -> Result<RefreshOutcome>
    where
        P: TextureSetProvider + ?Sized,
    {
        self.rows.clear();
        self.last_pass = None;
        self.open = true;
        self.refresh(project, prompt)
    }

    /// Empties the table; the project is about to close.
    pub fn close(&mut self) {
        self.rows.clear();
        self.last_pass = None;
        self.open = false;
    }

    /// Re-reads the project, recomputes export paths and verdicts, and
    /// resolves the auto-fix offer.
    pub fn refresh<P>(&mut self, project: &mut P, prompt: &mut dyn AutoFixPrompt) -> Result<RefreshOutcome>
    where
        P: TextureSetProvider + ?Sized,
    {
        if !self.open {
            return Err(ExporterError::ProjectNotOpen);
        }
        let pass = self.revalidate(project);
        if !pass.offers_auto_fix() {
            return Ok(RefreshOutcome {
                pass,
                auto_fix: AutoFixOutcome::NotNeeded,
            });
        }
        if self.config.suppress_auto_fix_prompt {
            info!("dialog for resolution auto-fix was not shown as per user settings");
            return Ok(RefreshOutcome {
                pass,
                auto_fix: AutoFixOutcome::Suppressed,
            });
        }
        if !prompt.confirm(&pass.asset_type, &pass.over_budget) {
            warn!(
                count = pass.over_budget.len(),
                "remember to fix the resolution manually in the texture set settings; validation errors will prevent export"
            );
            return Ok(RefreshOutcome {
                pass,
                auto_fix: AutoFixOutcome::Declined,
            });
        }
        let changes = apply_budget_resolution(project, &pass)?;
        let pass = self.revalidate(project);
        Ok(RefreshOutcome {
            pass,
            auto_fix: AutoFixOutcome::Applied(changes),
        })
    }

    fn revalidate<P>(&mut self, project: &P) -> ValidationPass
    where
        P: TextureSetProvider + ?Sized,
    {
        let pass = run_validation_pass(project, &self.config.asset_type);
        let shaders: HashMap<String, ShaderType> = self
            .rows
            .drain(..)
            .map(|r| (r.texture_set, r.shader))
            .collect();
        self.rows = pass
            .rows
            .iter()
            .map(|rv| {
                let shader = shaders
                    .get(&rv.texture_set)
                    .copied()
                    .unwrap_or(self.config.default_shader);
                let eligible = rv.eligible();
                ExportRow {
                    texture_set: rv.texture_set.clone(),
                    resolution: rv.resolution,
                    shader,
                    checked: eligible,
                    enabled: eligible,
                    export_path: self.config.export_path(&rv.texture_set, shader),
                    verdict: rv.verdict.clone(),
                    tooltip: rv.tooltip(),
                }
            })
            .collect();
        self.last_pass = Some(pass.clone());
        pass
    }

    fn refresh_if_open<P>(
        &mut self,
        project: &mut P,
        prompt: &mut dyn AutoFixPrompt,
    ) -> Result<Option<RefreshOutcome>>
    where
        P: TextureSetProvider + ?Sized,
    {
        if self.open {
            self.refresh(project, prompt).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Changes the asset type; all verdicts are recomputed.
    pub fn set_asset_type<P>(
        &mut self,
        asset_type: impl Into<AssetType>,
        project: &mut P,
        prompt: &mut dyn AutoFixPrompt,
    ) -> Result<Option<RefreshOutcome>>
    where
        P: TextureSetProvider + ?Sized,
    {
        self.config.asset_type = asset_type.into();
        self.refresh_if_open(project, prompt)
    }

    pub fn set_personal_export<P>(
        &mut self,
        personal: bool,
        project: &mut P,
        prompt: &mut dyn AutoFixPrompt,
    ) -> Result<Option<RefreshOutcome>>
    where
        P: TextureSetProvider + ?Sized,
    {
        self.config.personal_export = personal;
        self.refresh_if_open(project, prompt)
    }

    /// Stores the "do not show again" answer of the auto-fix prompt.
    pub fn set_suppress_auto_fix_prompt(&mut self, suppress: bool) {
        self.config.suppress_auto_fix_prompt = suppress;
    }

    pub fn set_shader<P>(
        &mut self,
        index: usize,
        shader: ShaderType,
        project: &mut P,
        prompt: &mut dyn AutoFixPrompt,
    ) -> Result<RefreshOutcome>
    where
        P: TextureSetProvider + ?Sized,
    {
        self.row_mut(index)?.shader = shader;
        self.refresh(project, prompt)
    }

    /// Checks or unchecks a row. Eligible rows may be unchecked; rows that
    /// failed validation stay unchecked.
    pub fn set_checked(&mut self, index: usize, checked: bool) -> Result<()> {
        let row = self.row_mut(index)?;
        if checked && !row.enabled {
            return Err(ExporterError::RowDisabled(row.texture_set.clone()));
        }
        row.checked = checked;
        Ok(())
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut ExportRow> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(ExporterError::RowOutOfRange { index, len })
    }

    /// Reacts to a host lifecycle notification.
    pub fn handle_event<P>(
        &mut self,
        event: ProjectEvent,
        project: &mut P,
        prompt: &mut dyn AutoFixPrompt,
    ) -> Result<Option<RefreshOutcome>>
    where
        P: TextureSetProvider + ?Sized,
    {
        match event {
            ProjectEvent::Opened | ProjectEvent::Created => self.load(project, prompt).map(Some),
            ProjectEvent::AboutToClose => {
                self.close();
                Ok(None)
            }
        }
    }

    /// Handles every notification queued on `events` and returns how many
    /// were processed.
    pub fn pump_events<P>(
        &mut self,
        events: &Receiver<ProjectEvent>,
        project: &mut P,
        prompt: &mut dyn AutoFixPrompt,
    ) -> Result<usize>
    where
        P: TextureSetProvider + ?Sized,
    {
        let mut handled = 0;
        for event in events.try_iter() {
            self.handle_event(event, project, prompt)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Jobs for every checked row, in table order.
    pub fn export_jobs(&self) -> Vec<ExportJob> {
        self.rows
            .iter()
            .filter(|r| r.checked)
            .map(|r| ExportJob {
                texture_set: r.texture_set.clone(),
                shader: r.shader,
                export_path: r.export_path.clone(),
            })
            .collect()
    }

    /// Hands every checked row to `exporter` and returns how many were exported.
    pub fn export(&self, exporter: &mut dyn Exporter) -> Result<usize> {
        if !self.open {
            return Err(ExporterError::ProjectNotOpen);
        }
        let jobs = self.export_jobs();
        for job in &jobs {
            info!(texture_set = %job.texture_set, shader = %job.shader, path = %job.export_path, "exporting");
            exporter.export(job)?;
        }
        Ok(jobs.len())
    }
}
