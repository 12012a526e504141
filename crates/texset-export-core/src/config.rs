use crate::category::AssetType;
use crate::model::ShaderType;
use serde::{Deserialize, Serialize};

/// Export session configuration.
/// Key notes:
///   - `asset_type` selects both the naming grammar and the resolution budget
///   - `personal_export` switches the export root between `personal_root` and `official_root`
///   - `suppress_auto_fix_prompt` is the stored "do not show this message again" answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExporterConfig {
    #[serde(default)]
    pub asset_type: AssetType,
    /// Export under the personal root instead of the official one.
    #[serde(default)]
    pub personal_export: bool,
    #[serde(default = "default_personal_root")]
    pub personal_root: String,
    #[serde(default = "default_official_root")]
    pub official_root: String,
    /// Shader type given to texture sets when they first appear.
    #[serde(default)]
    pub default_shader: ShaderType,
    /// Skip the over-budget auto-fix prompt entirely.
    #[serde(default)]
    pub suppress_auto_fix_prompt: bool,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            asset_type: AssetType::default(),
            personal_export: false,
            personal_root: default_personal_root(),
            official_root: default_official_root(),
            default_shader: ShaderType::default(),
            suppress_auto_fix_prompt: false,
        }
    }
}

impl ExporterConfig {
    /// Validates the configuration.
    ///
    /// Returns an error if either export root is empty.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ExporterError;

        for (field, root) in [
            ("personal_root", &self.personal_root),
            ("official_root", &self.official_root),
        ] {
            if root.trim().trim_end_matches('/').is_empty() {
                return Err(ExporterError::InvalidConfig(format!(
                    "{field} must not be empty (got {root:?})"
                )));
            }
        }
        Ok(())
    }

    /// Root folder exports go to, depending on `personal_export`.
    pub fn export_root(&self) -> &str {
        let root = if self.personal_export {
            &self.personal_root
        } else {
            &self.official_root
        };
        root.trim_end_matches('/')
    }

    /// Export folder of a texture set: `{root}/{asset_type}/{texture_set}_{shader}/`.
    pub fn export_path(&self, texture_set: &str, shader: ShaderType) -> String {
        format!(
            "{}/{}/{}_{}/",
            self.export_root(),
            self.asset_type,
            texture_set,
            shader
        )
    }
}

fn default_personal_root() -> String {
    "C:/ProjectName/Personal".into()
}
fn default_official_root() -> String {
    "C:/ProjectName/Assets/Textures".into()
}

/// Builder for `ExporterConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct ExporterConfigBuilder {
    cfg: ExporterConfig,
}

impl ExporterConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: ExporterConfig::default(),
        }
    }
    pub fn asset_type(mut self, v: impl Into<AssetType>) -> Self {
        self.cfg.asset_type = v.into();
        self
    }
    pub fn personal_export(mut self, v: bool) -> Self {
        self.cfg.personal_export = v;
        self
    }
    pub fn personal_root(mut self, v: impl Into<String>) -> Self {
        self.cfg.personal_root = v.into();
        self
    }
    pub fn official_root(mut self, v: impl Into<String>) -> Self {
        self.cfg.official_root = v.into();
        self
    }
    pub fn default_shader(mut self, v: ShaderType) -> Self {
        self.cfg.default_shader = v;
        self
    }
    pub fn suppress_auto_fix_prompt(mut self, v: bool) -> Self {
        self.cfg.suppress_auto_fix_prompt = v;
        self
    }
    pub fn build(self) -> ExporterConfig {
        self.cfg
    }
}

impl ExporterConfig {
    /// Create a fluent builder for `ExporterConfig`.
    pub fn builder() -> ExporterConfigBuilder {
        ExporterConfigBuilder::new()
    }
}
