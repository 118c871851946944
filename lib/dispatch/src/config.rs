//! Dispatcher configuration.
//!
//! Loaded once via the `config` crate and handed to the dispatcher as a
//! snapshot, so a dispatch never observes a flag flipping halfway through.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Installation-wide dispatcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub actions: ActionsSettings,
}

/// Settings of the actions subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionsSettings {
    /// Turns automation off for the whole installation.
    #[serde(default)]
    pub disabled: bool,

    /// Commit message markers that opt a push or pull request out of runs.
    #[serde(default = "default_skip_workflow_strings")]
    pub skip_workflow_strings: Vec<String>,
}

fn default_skip_workflow_strings() -> Vec<String> {
    ["[skip ci]", "[ci skip]", "[no ci]", "[skip actions]", "[actions skip]"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ActionsSettings {
    fn default() -> Self {
        Self {
            disabled: false,
            skip_workflow_strings: default_skip_workflow_strings(),
        }
    }
}

impl DispatchConfig {
    /// Loads configuration from `TRIPWIRE_`-prefixed environment variables.
    ///
    /// Nested keys use `__`, e.g. `TRIPWIRE_ACTIONS__DISABLED=true`;
    /// skip strings are comma separated.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(
            Config::builder().add_source(
                Environment::with_prefix("TRIPWIRE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("actions.skip_workflow_strings"),
            ),
        )
    }

    /// Loads configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is invalid.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        Self::load(Config::builder().add_source(File::from_str(document, FileFormat::Toml)))
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
