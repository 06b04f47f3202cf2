//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeviz/treeviz.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `TREEVIZ_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::view::ColorScheme;

/// Raw color overrides; `None` means "inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawColors {
    pub node_fill: Option<String>,
    pub node_stroke: Option<String>,
    pub node_text: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub canvas_width: Option<f64>,
    pub canvas_height: Option<f64>,
    pub simplify_only_child: Option<bool>,
    pub session_file: Option<PathBuf>,
    #[serde(default)]
    pub colors: RawColors,
}

/// Unified configuration for treeviz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Logical canvas width in pixels (drives horizontal spacing)
    pub canvas_width: f64,
    /// Logical canvas height in pixels (drives the fit-to-height zoom)
    pub canvas_height: f64,
    /// Center lone children under their parent; used until a session value exists
    pub simplify_only_child: bool,
    /// Where the build-mode session is kept
    pub session_file: PathBuf,
    /// Node colors
    pub colors: ColorScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            simplify_only_child: true,
            session_file: default_session_file(),
            colors: ColorScheme::default(),
        }
    }
}

fn default_session_file() -> PathBuf {
    ProjectDirs::from("", "", "treeviz")
        .map(|dirs| dirs.data_dir().join("session.json"))
        .unwrap_or_else(|| PathBuf::from("~/.treeviz/session.json"))
}

/// Get the XDG config directory for treeviz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeviz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeviz.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the session path.
    fn expand_paths(&mut self) {
        let raw = self.session_file.to_string_lossy().to_string();
        let expanded = shellexpand::full(&raw)
            .map(|s| s.into_owned())
            .unwrap_or(raw);
        self.session_file = PathBuf::from(expanded);
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            canvas_width: overlay.canvas_width.unwrap_or(self.canvas_width),
            canvas_height: overlay.canvas_height.unwrap_or(self.canvas_height),
            simplify_only_child: overlay
                .simplify_only_child
                .unwrap_or(self.simplify_only_child),
            session_file: overlay
                .session_file
                .clone()
                .unwrap_or_else(|| self.session_file.clone()),
            colors: ColorScheme {
                node_fill: overlay
                    .colors
                    .node_fill
                    .clone()
                    .unwrap_or_else(|| self.colors.node_fill.clone()),
                node_stroke: overlay
                    .colors
                    .node_stroke
                    .clone()
                    .unwrap_or_else(|| self.colors.node_stroke.clone()),
                node_text: overlay
                    .colors
                    .node_text
                    .clone()
                    .unwrap_or_else(|| self.colors.node_text.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file (layer 3)
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply TREEVIZ_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`, e.g. `TREEVIZ_COLORS__NODE_FILL`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TREEVIZ").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_float("canvas_width") {
            settings.canvas_width = val;
        }
        if let Ok(val) = config.get_float("canvas_height") {
            settings.canvas_height = val;
        }
        if let Ok(val) = config.get_bool("simplify_only_child") {
            settings.simplify_only_child = val;
        }
        if let Ok(val) = config.get_string("session_file") {
            settings.session_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("colors.node_fill") {
            settings.colors.node_fill = val;
        }
        if let Ok(val) = config.get_string("colors.node_stroke") {
            settings.colors.node_stroke = val;
        }
        if let Ok(val) = config.get_string("colors.node_text") {
            settings.colors.node_text = val;
        }

        Ok(settings)
    }

    /// Rejects non-positive canvas sizes and malformed colors.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ApplicationError::Config {
                message: format!(
                    "canvas size must be positive, got {}x{}",
                    self.canvas_width, self.canvas_height
                ),
            });
        }
        if let Some((field, value)) = self.colors.invalid_entry() {
            return Err(ApplicationError::Config {
                message: format!("colors.{field}: '{value}' is not a #rgb or #rrggbb color"),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# treeviz configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treeviz/treeviz.toml
#   Local:  file passed with --config
#   Env:    TREEVIZ_* environment variables (TREEVIZ_COLORS__NODE_FILL, ...)

# Logical canvas size in pixels
# canvas_width = 800.0
# canvas_height = 600.0

# Center a lone child directly below its parent (build mode default)
# simplify_only_child = true

# Build-mode session store
# session_file = "~/.local/share/treeviz/session.json"

[colors]
# node_fill = "#2196F3"
# node_stroke = "#1976D2"
# node_text = "#ffffff"
"##
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
