use crate::error::Result;
use crate::model::ShaderType;
use serde::{Deserialize, Serialize};

/// One texture set handed to the export routine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportJob {
    pub texture_set: String,
    pub shader: ShaderType,
    /// Destination folder, see [`crate::ExporterConfig::export_path`].
    pub export_path: String,
}

/// The export routine. Only called with texture sets that passed validation
/// and are checked for export.
pub trait Exporter {
    fn export(&mut self, job: &ExportJob) -> Result<()>;
}

/// Exporter that only records what would be exported.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportPlan {
    pub jobs: Vec<ExportJob>,
}

impl ExportPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl Exporter for ExportPlan {
    fn export(&mut self, job: &ExportJob) -> Result<()> {
        self.jobs.push(job.clone());
        Ok(())
    }
}

impl<F> Exporter for F
where
    F: FnMut(&ExportJob) -> Result<()>,
{
    fn export(&mut self, job: &ExportJob) -> Result<()> {
        self(job)
    }
}
