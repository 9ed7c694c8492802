pub mod app_config;
pub mod classify;
pub mod config;
pub mod guard;
pub mod label;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use classify::{classify, VariantFacts};
pub use config::{load_app_config, load_app_config_from_env};
pub use guard::{decide_write, WriteDecision};
pub use label::Label;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
