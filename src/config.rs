//! Generator configuration.
//!
//! Loaded from TOML; every key has a default so an empty file is a valid
//! configuration. Sections map to the individual runs:
//!
//! - [`ValidationSettings`] - validation microflows per entity.
//! - [`PageLoggingSettings`] - open-with-log microflows per page.
//! - [`RecolorSettings`] - activity color normalization.
//! - [`NamingSettings`] - microflow name prefix audit.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Branch to commit to; empty means the default branch.
    pub branch: String,
    pub validation: ValidationSettings,
    pub page_logging: PageLoggingSettings,
    pub recolor: RecolorSettings,
    pub naming: NamingSettings,
}

impl GeneratorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Branch argument for a commit: `None` for the default branch.
    pub fn commit_branch(&self) -> Option<&str> {
        if self.branch.is_empty() {
            None
        } else {
            Some(self.branch.as_str())
        }
    }
}

/// Read and parse a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<GeneratorConfig, ConfigError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading generator configuration");
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    GeneratorConfig::from_toml_str(&text)
}

// =============================================================================
// VALIDATION
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Folder, directly under each module, that receives the microflows.
    pub folder_name: String,
    pub microflow_prefix: String,
    /// Boolean variable threaded through every chain and returned at the end.
    pub valid_variable_name: String,
    pub required_field_message: String,
    pub modules: Vec<ModuleSelection>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        ValidationSettings {
            folder_name: "Validation".into(),
            microflow_prefix: "VAL_".into(),
            valid_variable_name: "IsValid".into(),
            required_field_message: "This field is required.".into(),
            modules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSelection {
    pub name: String,
    /// Entities to process; empty selects every entity of the module.
    #[serde(default)]
    pub entities: Vec<String>,
}

impl ModuleSelection {
    pub fn selects(&self, entity: &str) -> bool {
        self.entities.is_empty() || self.entities.iter().any(|e| e == entity)
    }
}

// =============================================================================
// PAGE LOGGING
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageLoggingSettings {
    /// Module that owns the Java actions and receives the microflows.
    pub logging_module: String,
    pub folder_name: String,
    pub ip_address_action: String,
    pub browser_type_action: String,
    pub ip_address_variable: String,
    pub browser_type_variable: String,
    pub log_node: String,
    pub microflow_prefix: String,
    pub microflow_suffix: String,
}

impl Default for PageLoggingSettings {
    fn default() -> Self {
        PageLoggingSettings {
            logging_module: "CustomLogging".into(),
            folder_name: "PageLogging".into(),
            ip_address_action: "CustomLogging.Java_IPAddress".into(),
            browser_type_action: "CustomLogging.Java_BrowserType".into(),
            ip_address_variable: "IPAddress".into(),
            browser_type_variable: "BrowserType".into(),
            log_node: "PageAccess".into(),
            microflow_prefix: "ACT_".into(),
            microflow_suffix: "_OpenWithLog".into(),
        }
    }
}

impl PageLoggingSettings {
    /// `ACT_Order_Edit_OpenWithLog` for page `Sales.Order_Edit`.
    pub fn microflow_name(&self, page_qualified_name: &str) -> String {
        let page_name = page_qualified_name
            .split_once('.')
            .map(|(_, name)| name)
            .unwrap_or(page_qualified_name);
        format!("{}{}{}", self.microflow_prefix, page_name, self.microflow_suffix)
    }
}

// =============================================================================
// RECOLOR & NAMING
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecolorSettings {
    /// Modules whose microflows are recolored; empty selects every module.
    pub modules: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingSettings {
    pub prefixes: Vec<String>,
    /// Modules to audit; empty audits none.
    pub modules: Vec<String>,
}

impl Default for NamingSettings {
    fn default() -> Self {
        NamingSettings {
            prefixes: ["IVK_", "ACT_", "SUB_", "WS_", "ACo_", "ADe_", "BCo_", "BDe_"]
                .into_iter()
                .map(String::from)
                .collect(),
            modules: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config.validation.microflow_prefix, "VAL_");
        assert_eq!(config.validation.valid_variable_name, "IsValid");
        assert_eq!(config.page_logging.logging_module, "CustomLogging");
        assert_eq!(config.naming.prefixes.len(), 8);
        assert_eq!(config.commit_branch(), None);
    }

    #[test]
    fn sections_override_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            branch = "generated"

            [validation]
            microflow_prefix = "Val_"

            [[validation.modules]]
            name = "Sales"
            entities = ["Customer"]

            [[validation.modules]]
            name = "Admin"
            "#,
        )
        .unwrap();
        assert_eq!(config.commit_branch(), Some("generated"));
        assert_eq!(config.validation.microflow_prefix, "Val_");
        assert_eq!(config.validation.folder_name, "Validation");
        assert!(config.validation.modules[0].selects("Customer"));
        assert!(!config.validation.modules[0].selects("Order"));
        assert!(config.validation.modules[1].selects("Anything"));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = GeneratorConfig::from_toml_str("branch = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn page_microflow_name_drops_module() {
        let settings = PageLoggingSettings::default();
        assert_eq!(
            settings.microflow_name("Orders.Page_List"),
            "ACT_Page_List_OpenWithLog"
        );
    }
}
