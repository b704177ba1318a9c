use crate::model::Position;
use crate::store::Placement;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".flowmap.toml";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub service: ServiceConfig,
    pub server: ServerConfig,
    pub canvas: CanvasConfig,
}

/// Where the application directory and graph fetch service lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub base_url: String,
}

/// Settings for `flowmap serve`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
}

/// Default placement of nodes added from the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub spawn_x: f64,
    pub spawn_y: f64,
    pub spacing: f64,
    pub columns: usize,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    service: Option<RawService>,
    server: Option<RawServer>,
    canvas: Option<RawCanvas>,
}

#[derive(Debug, Deserialize)]
struct RawService {
    base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct RawCanvas {
    spawn_x: Option<f64>,
    spawn_y: Option<f64>,
    spacing: Option<f64>,
    columns: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let placement = Placement::default();
        Self {
            spawn_x: placement.origin.x,
            spawn_y: placement.origin.y,
            spacing: placement.spacing,
            columns: placement.columns,
        }
    }
}

impl CanvasConfig {
    pub fn placement(&self) -> Placement {
        Placement {
            origin: Position::new(self.spawn_x, self.spawn_y),
            spacing: self.spacing,
            columns: self.columns,
        }
    }
}

impl Config {
    /// Load `.flowmap.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(&config_path)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let service = match raw.service {
            Some(s) => ServiceConfig {
                base_url: s.base_url.unwrap_or(defaults.service.base_url),
            },
            None => defaults.service,
        };

        let server = match raw.server {
            Some(s) => ServerConfig {
                port: s.port.unwrap_or(DEFAULT_PORT),
            },
            None => defaults.server,
        };

        let canvas = match raw.canvas {
            Some(c) => CanvasConfig {
                spawn_x: c.spawn_x.unwrap_or(defaults.canvas.spawn_x),
                spawn_y: c.spawn_y.unwrap_or(defaults.canvas.spawn_y),
                spacing: c.spacing.unwrap_or(defaults.canvas.spacing),
                columns: c.columns.unwrap_or(defaults.canvas.columns),
            },
            None => defaults.canvas,
        };

        Ok(Self {
            service,
            server,
            canvas,
        })
    }

    /// Path the config would be loaded from for `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }
}

/// Starter file written by `flowmap init`.
pub fn generate_config_template() -> String {
    format!(
        r#"# flowmap configuration

[service]
# Base URL of the application directory / graph service
base_url = "{base_url}"

[server]
# Port used by `flowmap serve`
port = {port}

[canvas]
# Where nodes added from the canvas are placed
spawn_x = 100.0
spawn_y = 100.0
spacing = 80.0
columns = 5
"#,
        base_url = DEFAULT_BASE_URL,
        port = DEFAULT_PORT,
    )
}
