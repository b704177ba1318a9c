use crate::cli::{EditArgs, OutputFormat};
use crate::console::{ConsoleCommand, HELP};
use crate::editor::GraphEditor;
use crate::model::{Connection, NodeDataPatch};
use crate::output::{GraphReport, JsonOutput, MarkdownOutput, OutputFormatter};
use crate::style;
use crate::sync::{GraphSource, SyncOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{CommandContext, CommandSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    editor: GraphEditor<CommandSource>,
    format: OutputFormat,
    wait: bool,
}

pub fn cmd_edit(args: EditArgs, ctx: &CommandContext) -> i32 {
    let source = match ctx.source(&args.source) {
        Ok(source) => source,
        Err(code) => return code,
    };
    let rt = match super::runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    let script = match &args.script {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                style::error(&format!("Failed to read script {}: {}", style::path(path), e));
                return 1;
            }
        },
        None => None,
    };

    let mut session = Session {
        editor: GraphEditor::with_placement(source, ctx.config.canvas.placement()),
        format: args.format,
        wait: !args.no_wait,
    };

    let result = rt.block_on(async {
        if let Some(app) = &args.app {
            session.execute(ConsoleCommand::Select(app.clone())).await;
        }

        match script {
            Some(content) => {
                for line in content.lines() {
                    if session.run_line(line).await == Flow::Quit {
                        break;
                    }
                }
                // Whatever is still in flight at the end of a script is applied before exit.
                session.settle().await;
                Ok(())
            }
            None => {
                style::hint("type `help` for commands, `quit` to leave");
                let mut lines = BufReader::new(tokio::io::stdin()).lines();
                while let Some(line) = lines.next_line().await? {
                    if session.run_line(&line).await == Flow::Quit {
                        break;
                    }
                }
                Ok::<(), std::io::Error>(())
            }
        }
    });

    if let Err(e) = result {
        style::error(&format!("Failed to read commands: {}", e));
        return 1;
    }

    0
}

impl Session {
    async fn run_line(&mut self, line: &str) -> Flow {
        let arrived = self.editor.poll_outcomes();
        self.report(arrived);

        match ConsoleCommand::parse(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Flow::Continue,
            Err(e) => {
                style::error(&e.to_string());
                Flow::Continue
            }
        }
    }

    async fn settle(&mut self) {
        let outcomes = self.editor.settle().await;
        self.report(outcomes);
    }

    fn report(&self, outcomes: Vec<SyncOutcome>) {
        for outcome in outcomes {
            match outcome {
                SyncOutcome::Applied { app_id, nodes, edges } => {
                    style::status(&format!("loaded {}: {} services, {} connections", app_id, nodes, edges))
                }
                SyncOutcome::Stale { app_id } => {
                    style::hint(&format!("discarded outdated graph for {}", app_id))
                }
                SyncOutcome::Failed { app_id, message } => {
                    style::error(&format!("Failed to load graph for {}: {}", app_id, message))
                }
            }
        }
    }

    async fn execute(&mut self, command: ConsoleCommand) -> Flow {
        let editor = &mut self.editor;
        match command {
            ConsoleCommand::Apps => {
                let listed = editor.source().list_applications().await;
                match listed {
                    Ok(apps) => {
                        let mut buf = Vec::new();
                        let written = match self.format {
                            OutputFormat::Markdown => MarkdownOutput::new().applications(&apps, &mut buf),
                            OutputFormat::Json => JsonOutput::new().applications(&apps, &mut buf),
                        };
                        self.print(written.map(|_| buf));
                    }
                    Err(e) => style::error(&format!("Failed to fetch apps: {}", e)),
                }
            }
            ConsoleCommand::Select(app) => {
                editor.select_application(Some(app.as_str()));
                style::status(&format!("selected application {}", app));
                if self.wait {
                    self.settle().await;
                }
            }
            ConsoleCommand::DeselectApp => {
                editor.select_application(None);
                style::status("no application selected");
            }
            ConsoleCommand::Refresh => {
                if !editor.refresh() {
                    style::warning("select an application first");
                } else if self.wait {
                    self.settle().await;
                }
            }
            ConsoleCommand::Wait => self.settle().await,
            ConsoleCommand::Click(node_id) => {
                if editor.click_node(&node_id) {
                    style::status(&format!("selected {}", node_id));
                } else {
                    style::warning(&format!("cannot select {}", node_id));
                }
            }
            ConsoleCommand::Pane => {
                editor.click_pane();
            }
            ConsoleCommand::Add => match editor.add_node() {
                Some(id) => style::status(&format!("added {}", id)),
                None => style::warning("select an application first"),
            },
            ConsoleCommand::Connect { source, target } => {
                match editor.connect(&Connection::new(source.as_str(), target.as_str())) {
                    Some(edge_id) => style::status(&format!("connected {} → {} ({})", source, target, edge_id)),
                    None => style::warning(&format!("cannot connect {} → {}", source, target)),
                }
            }
            ConsoleCommand::Disconnect(edge_id) => {
                if !editor.disconnect(&edge_id) {
                    style::warning(&format!("no edge {}", edge_id));
                }
            }
            ConsoleCommand::Drag { node_id, position } => {
                editor.drag_node(&node_id, position);
            }
            ConsoleCommand::SetStatus { node_id, status } => {
                if editor.update_node(&node_id, &NodeDataPatch::status(status)) {
                    style::status(&format!("{} is {}", node_id, style::node_status(status)));
                }
            }
            ConsoleCommand::Delete => match editor.delete_selected_node() {
                Some(id) => style::status(&format!("deleted {}", id)),
                None => style::warning("no node selected"),
            },
            ConsoleCommand::Key { key, focus } => {
                if let Some(id) = editor.key_down(key, focus) {
                    style::status(&format!("deleted {}", id));
                }
            }
            ConsoleCommand::Edit => {
                if !editor.begin_edit() {
                    style::warning("no node selected");
                }
            }
            ConsoleCommand::Text(text) => editor.set_edit_text(text),
            ConsoleCommand::Commit => {
                if !editor.commit_edit() {
                    style::hint("edit discarded");
                }
            }
            ConsoleCommand::Cancel => editor.cancel_edit(),
            ConsoleCommand::Rename(label) => {
                if !editor.rename_selected(&label) {
                    style::hint("name unchanged");
                }
            }
            ConsoleCommand::Show => {
                let mut buf = Vec::new();
                let written = super::write_graph(self.format, &GraphReport::from_editor(&self.editor), &mut buf);
                self.print(written.map(|_| buf));
            }
            ConsoleCommand::Inspect => match self.editor.inspect_selected() {
                Some(view) => {
                    let mut buf = Vec::new();
                    let written = match self.format {
                        OutputFormat::Markdown => MarkdownOutput::new().inspector(&view, &mut buf),
                        OutputFormat::Json => JsonOutput::new().inspector(&view, &mut buf),
                    };
                    self.print(written.map(|_| buf));
                }
                None => style::warning("no node selected"),
            },
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn print(&self, rendered: std::io::Result<Vec<u8>>) {
        let result = rendered.and_then(|buf| super::print_formatted(self.format, &buf));
        if let Err(e) = result {
            style::error(&format!("Failed to write output: {}", e));
        }
    }
}
