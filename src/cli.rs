use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flowmap")]
#[command(about = "Inspect and edit the service graph of an application")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./.flowmap.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the demo application directory and graph service
    Serve(ServeArgs),

    /// List applications from the directory service
    Apps(AppsArgs),

    /// Load an application's graph and print it
    Graph(GraphArgs),

    /// Edit graphs interactively with gesture commands
    Edit(EditArgs),

    /// Generate a starter .flowmap.toml configuration file
    Init(InitArgs),
}

/// Where graph data comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Base URL of the graph service (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Use the built-in demo data instead of a service
    #[arg(long)]
    pub offline: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on (overrides the config file)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct AppsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// Application id
    pub app: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditArgs {
    /// Application to select on start
    pub app: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Do not wait for fetches after `select`/`refresh`
    #[arg(long)]
    pub no_wait: bool,

    /// Output format for `show` and `inspect`
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory where to create .flowmap.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_graph_command() {
        let cli = Cli::parse_from(["flowmap", "-vv", "graph", "auth", "--offline", "-f", "json"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Graph(args) => {
                assert_eq!(args.app, "auth");
                assert!(args.source.offline);
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("expected graph command, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_app_is_optional() {
        let cli = Cli::parse_from(["flowmap", "edit", "--script", "demo.flow"]);
        match cli.command {
            Command::Edit(args) => {
                assert!(args.app.is_none());
                assert_eq!(args.script, Some(PathBuf::from("demo.flow")));
            }
            other => panic!("expected edit command, got {:?}", other),
        }
    }
}
