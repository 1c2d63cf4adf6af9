//! Base settings shared by every service in the workspace. Values come from
//! an optional `configuration` file, overridden by `APP__`-prefixed
//! environment variables (`APP__PORT=9090`); service-specific settings such
//! as the catalog's Mongo and storage endpoints layer on top of this.

use crate::error::AppError;
use config::{Config as Loader, Environment, File};
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Port the HTTP server binds; 0 asks the OS for a free one, which is
    /// how test harnesses spawn isolated instances.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let loaded = Loader::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(loaded.try_deserialize()?)
    }
}
