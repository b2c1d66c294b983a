use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Names of the well-known types the resolvers look for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntrospectionConfig {
    /// Marker interface every listener type must extend.
    #[serde(default = "IntrospectionConfig::default_event_listener")]
    pub event_listener: String,
    /// Base class of event objects passed to listener callbacks.
    #[serde(default = "IntrospectionConfig::default_event_object")]
    pub event_object: String,
    /// Listener type whose add/remove pair marks every property as bound.
    #[serde(default = "IntrospectionConfig::default_property_change_listener")]
    pub property_change_listener: String,
    /// Exception that marks a setter's property as constrained.
    #[serde(default = "IntrospectionConfig::default_property_veto_exception")]
    pub property_veto_exception: String,
    /// Exception that marks an add-listener method as unicast.
    #[serde(default = "IntrospectionConfig::default_too_many_listeners_exception")]
    pub too_many_listeners_exception: String,
}

impl IntrospectionConfig {
    fn default_event_listener() -> String {
        "java.util.EventListener".to_owned()
    }

    fn default_event_object() -> String {
        "java.util.EventObject".to_owned()
    }

    fn default_property_change_listener() -> String {
        "java.beans.PropertyChangeListener".to_owned()
    }

    fn default_property_veto_exception() -> String {
        "java.beans.PropertyVetoException".to_owned()
    }

    fn default_too_many_listeners_exception() -> String {
        "java.util.TooManyListenersException".to_owned()
    }
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            event_listener: Self::default_event_listener(),
            event_object: Self::default_event_object(),
            property_change_listener: Self::default_property_change_listener(),
            property_veto_exception: Self::default_property_veto_exception(),
            too_many_listeners_exception: Self::default_too_many_listeners_exception(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Either a simple level (`info`, `debug`, ...) or a full `EnvFilter`
    /// directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "warn".to_owned()
    }

    /// `level` as filter directives. Bare level names match without regard
    /// to case, `warning` included; anything else is passed through.
    pub fn directives(&self) -> String {
        let level = self.level.trim();
        if level.is_empty() {
            return Self::default_level();
        }
        let bare = if level.eq_ignore_ascii_case("warning") { "warn" } else { level };
        match bare.parse::<LevelFilter>() {
            Ok(filter) => filter.to_string().to_ascii_lowercase(),
            Err(_) => level.to_owned(),
        }
    }

    /// The configured filter with `rust_log` directives layered on top. Input
    /// that does not parse degrades to the configured level alone, then to
    /// `warn`.
    pub fn filter_with(&self, rust_log: Option<&str>) -> EnvFilter {
        let configured = self.directives();
        let combined = match rust_log.map(str::trim).filter(|d| !d.is_empty()) {
            Some(extra) => format!("{configured},{extra}"),
            None => configured.clone(),
        };
        EnvFilter::try_new(combined)
            .or_else(|_| EnvFilter::try_new(configured))
            .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::WARN.into()))
    }

    /// [`LoggingConfig::filter_with`] over the process's `RUST_LOG`.
    pub fn env_filter(&self) -> EnvFilter {
        self.filter_with(std::env::var("RUST_LOG").ok().as_deref())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

/// Top-level configuration file (`nova-beans.toml`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeansConfig {
    #[serde(default)]
    pub introspection: IntrospectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a source snippet; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl BeansConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Install a global stderr subscriber for `config`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    use tracing_subscriber::prelude::*;

    let filter = config.env_filter();
    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.is_ok()
}
