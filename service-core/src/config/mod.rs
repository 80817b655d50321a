use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::de::DeserializeOwned;

/// Environment prefix shared by every service (`APP_SERVER__PORT`, ...).
pub const ENV_PREFIX: &str = "APP";

/// Load layered configuration for a service.
///
/// Sources, lowest precedence first:
/// 1. an optional `<file_stem>.{yaml,toml,json}` file in the working directory
/// 2. environment variables prefixed with `APP_`, nested keys split on `__`
///
/// `.env` is read first so its values participate as environment variables.
pub fn load<T: DeserializeOwned>(file_stem: &str) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let config = Cfg::builder()
        .add_source(File::with_name(file_stem).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
