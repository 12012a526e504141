//! Core library for validating texture sets before a studio export.
//!
//! - Name rules: `TypeAcronym_Detail1_Detail2_NN`, with a fixed acronym grammar per asset category
//! - Resolution rules: a maximum width/height per asset category (lower is always fine)
//! - Validation pass: runs both rules over a project, collects over-budget sets, applies budgets on request
//! - Session: the state of the exporter panel (rows, shader types, export paths, lifecycle events)
//!
//! Quick example:
//! ```
//! use texset_export_core::prelude::*;
//!
//! let project = InMemoryProject::new()
//!     .with_texture_set("WPN_BOW_COM_01", 2048, 2048)
//!     .with_texture_set("WPN_BOW_XXX_02", 1024, 1024);
//! let pass = run_validation_pass(&project, &AssetCategory::Weapons.into());
//! assert_eq!(pass.eligible_count(), 1);
//! assert!(!pass.offers_auto_fix());
//! ```

pub mod category;
pub mod config;
pub mod error;
pub mod export;
pub mod host;
pub mod model;
pub mod name;
pub mod report;
pub mod resolution;
pub mod session;
pub mod validation;

pub use category::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use host::*;
pub use model::*;
pub use name::*;
pub use report::*;
pub use resolution::*;
pub use session::*;
pub use validation::*;

/// Convenience prelude for common types and functions.
/// Importing `texset_export_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::category::{AssetCategory, AssetType, Grammar};
    pub use crate::config::{ExporterConfig, ExporterConfigBuilder};
    pub use crate::export::{ExportJob, ExportPlan, Exporter};
    pub use crate::host::{InMemoryProject, ProjectEvent, ProjectEvents, TextureSetProvider};
    pub use crate::model::{Resolution, ShaderType, TextureSet, ValidationVerdict, Verdict};
    pub use crate::name::{NameViolation, is_name_valid, validate_name};
    pub use crate::resolution::{ResolutionViolation, budget_for, validate_resolution};
    pub use crate::session::{
        AutoFixOutcome, AutoFixPolicy, AutoFixPrompt, ExportRow, ExportSession, RefreshOutcome,
    };
    pub use crate::validation::{
        ResolutionChange, RowVerdict, ValidationPass, apply_budget_resolution, run_validation_pass,
    };
}
