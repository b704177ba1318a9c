mod apps;
mod edit;
mod graph;
mod init;
mod serve;

pub use apps::cmd_apps;
pub use edit::cmd_edit;
pub use graph::cmd_graph;
pub use init::cmd_init;
pub use serve::cmd_serve;

use crate::cli::{OutputFormat, SourceArgs};
use crate::config::Config;
use crate::fixtures::Catalog;
use crate::model::{Application, GraphSnapshot};
use crate::output::{GraphReport, JsonOutput, MarkdownOutput, OutputFormatter};
use crate::style;
use crate::sync::{FetchError, GraphSource, HttpGraphSource, StaticSource};
use std::future::Future;
use std::io::Write;
use std::path::Path;

/// Shared context for command execution.
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    /// Load the config from `--config` or `./.flowmap.toml`.
    /// Returns Err(exit_code) if an explicitly named file cannot be used.
    pub fn new(config_path: Option<&Path>) -> Result<Self, i32> {
        let config = match config_path {
            Some(path) => match Config::load_file(path) {
                Ok(config) => config,
                Err(e) => {
                    style::error(&format!("{} ({})", e, style::path(path)));
                    return Err(1);
                }
            },
            None => Config::load(Path::new(".")).unwrap_or_else(|e| {
                style::warning(&format!("Failed to load config: {}. Using defaults.", e));
                Config::default()
            }),
        };

        Ok(Self { config })
    }

    /// Pick the graph source selected by the command line.
    pub fn source(&self, args: &SourceArgs) -> Result<CommandSource, i32> {
        if args.offline {
            return match Catalog::builtin() {
                Ok(catalog) => Ok(CommandSource::Offline(StaticSource::new(catalog))),
                Err(e) => {
                    style::error(&format!("Built-in catalog is invalid: {}", e));
                    Err(1)
                }
            };
        }
        let base_url = args
            .base_url
            .clone()
            .unwrap_or_else(|| self.config.service.base_url.clone());
        tracing::debug!(%base_url, "using graph service");
        Ok(CommandSource::Remote(HttpGraphSource::new(base_url)))
    }
}

/// Either the HTTP service or the built-in demo data.
pub enum CommandSource {
    Remote(HttpGraphSource),
    Offline(StaticSource),
}

impl GraphSource for CommandSource {
    fn list_applications(&self) -> impl Future<Output = Result<Vec<Application>, FetchError>> + Send {
        async move {
            match self {
                CommandSource::Remote(source) => source.list_applications().await,
                CommandSource::Offline(source) => source.list_applications().await,
            }
        }
    }

    fn fetch_graph(&self, app_id: &str) -> impl Future<Output = Result<GraphSnapshot, FetchError>> + Send {
        async move {
            match self {
                CommandSource::Remote(source) => source.fetch_graph(app_id).await,
                CommandSource::Offline(source) => source.fetch_graph(app_id).await,
            }
        }
    }
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, i32> {
    tokio::runtime::Runtime::new().map_err(|e| {
        style::error(&format!("Failed to start async runtime: {}", e));
        1
    })
}

pub(crate) fn write_graph<W: Write>(format: OutputFormat, report: &GraphReport<'_>, writer: &mut W) -> std::io::Result<()> {
    match format {
        OutputFormat::Markdown => MarkdownOutput::new().graph(report, writer),
        OutputFormat::Json => JsonOutput::new().graph(report, writer),
    }
}

/// Print formatted output, through the markdown renderer when it is markdown.
pub(crate) fn print_formatted(format: OutputFormat, content: &[u8]) -> std::io::Result<()> {
    let text = String::from_utf8_lossy(content);
    let mut stdout = std::io::stdout();
    match format {
        OutputFormat::Markdown => style::render_markdown(&text, &mut stdout),
        OutputFormat::Json => write!(stdout, "{}", text),
    }
}
