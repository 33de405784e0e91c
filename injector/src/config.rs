//! [Injector](crate::injector::Injector) configuration. Created with opinionated default values,
//! which can be overwritten by environment variables prefixed with `INJECTOR_` or the
//! `injector.json` file, when using [InjectorConfig::init_from_environment].

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const CONFIG_ENV_PREFIX: &str = "INJECTOR";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "injector.json";

/// Default name of an injector.
pub const DEFAULT_NAME: &str = "default";

#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InjectorConfig {
    /// Name reported in log events, useful when an application holds multiple injectors.
    pub name: String,
    /// Should every resolution be reported as a trace event.
    pub trace_resolutions: bool,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            trace_resolutions: false,
        }
    }
}

impl From<OptionalInjectorConfig> for InjectorConfig {
    fn from(value: OptionalInjectorConfig) -> Self {
        let default = Self::default();
        Self {
            name: value.name.unwrap_or(default.name),
            trace_resolutions: value
                .trace_resolutions
                .unwrap_or(default.trace_resolutions),
        }
    }
}

impl InjectorConfig {
    /// Creates config from defaults overwritten by `injector.json` and `INJECTOR_*` environment
    /// variables.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        Self::init_from_sources(Config::builder())
    }

    fn init_from_sources(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalInjectorConfig>())
            .map(|config| config.into())
    }

    pub fn with_name<T: ToString>(mut self, name: T) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_trace_resolutions(mut self, trace_resolutions: bool) -> Self {
        self.trace_resolutions = trace_resolutions;
        self
    }
}

#[derive(Deserialize)]
struct OptionalInjectorConfig {
    name: Option<String>,
    trace_resolutions: Option<bool>,
}
