//! Line-oriented gesture language used by `flowmap edit`.
//!
//! Each line is one gesture, e.g. `select prod-api`, `click node-1`,
//! `connect node-1 node-3`, `key backspace input`. Blank lines and lines
//! starting with `#` are skipped.

use crate::model::{NodeStatus, Position};
use crate::selection::{Focus, Key};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("not a number: {0}")]
    InvalidNumber(String),
    #[error("{0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Apps,
    Select(String),
    DeselectApp,
    Refresh,
    Wait,
    Click(String),
    Pane,
    Add,
    Connect { source: String, target: String },
    Disconnect(String),
    Drag { node_id: String, position: Position },
    SetStatus { node_id: String, status: NodeStatus },
    Delete,
    Key { key: Key, focus: Focus },
    Edit,
    Text(String),
    Commit,
    Cancel,
    Rename(String),
    Show,
    Inspect,
    Help,
    Quit,
}

pub const HELP: &str = "\
apps                         list applications
select <app>                 select an application and load its graph
deselect-app                 clear the application selection
refresh                      fetch the selected application again
wait                         wait for outstanding fetches
click <node>                 select a node
pane                         click the empty canvas (clears node selection)
add                          add a service node
connect <source> <target>    connect two nodes
disconnect <edge>            remove an edge
drag <node> <x> <y>          move a node
status <node> <status>       set healthy | degraded | down
delete                       delete the selected node
key <delete|backspace|other> [canvas|input|textarea]
edit                         start editing the selected node's name
text <name...>               replace the edit text
commit                       save the edit
cancel                       discard the edit
rename <name...>             edit and save in one step
show                         print the graph
inspect                      print the selected node
help                         this text
quit                         leave";

impl ConsoleCommand {
    /// Parse one line. `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>, ConsoleError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_ascii_lowercase().as_str() {
            "apps" => ConsoleCommand::Apps,
            "select" => match args.as_slice() {
                [app] => ConsoleCommand::Select(app.to_string()),
                _ => return Err(ConsoleError::Usage("select <app>")),
            },
            "deselect-app" => ConsoleCommand::DeselectApp,
            "refresh" => ConsoleCommand::Refresh,
            "wait" => ConsoleCommand::Wait,
            "click" => match args.as_slice() {
                [node] => ConsoleCommand::Click(node.to_string()),
                _ => return Err(ConsoleError::Usage("click <node>")),
            },
            "pane" => ConsoleCommand::Pane,
            "add" => ConsoleCommand::Add,
            "connect" => match args.as_slice() {
                [source, target] => ConsoleCommand::Connect {
                    source: source.to_string(),
                    target: target.to_string(),
                },
                _ => return Err(ConsoleError::Usage("connect <source> <target>")),
            },
            "disconnect" => match args.as_slice() {
                [edge] => ConsoleCommand::Disconnect(edge.to_string()),
                _ => return Err(ConsoleError::Usage("disconnect <edge>")),
            },
            "drag" => match args.as_slice() {
                [node, x, y] => ConsoleCommand::Drag {
                    node_id: node.to_string(),
                    position: Position::new(number(x)?, number(y)?),
                },
                _ => return Err(ConsoleError::Usage("drag <node> <x> <y>")),
            },
            "status" => match args.as_slice() {
                [node, status] => ConsoleCommand::SetStatus {
                    node_id: node.to_string(),
                    status: status.parse().map_err(ConsoleError::InvalidArgument)?,
                },
                _ => return Err(ConsoleError::Usage("status <node> <healthy|degraded|down>")),
            },
            "delete" => ConsoleCommand::Delete,
            "key" => {
                let usage = "key <delete|backspace|other> [canvas|input|textarea]";
                let (key, focus) = match args.as_slice() {
                    [key] => (*key, "canvas"),
                    [key, focus] => (*key, *focus),
                    _ => return Err(ConsoleError::Usage(usage)),
                };
                ConsoleCommand::Key {
                    key: parse_key(key)?,
                    focus: parse_focus(focus)?,
                }
            }
            "edit" => ConsoleCommand::Edit,
            "text" => ConsoleCommand::Text(rest.to_string()),
            "commit" => ConsoleCommand::Commit,
            "cancel" => ConsoleCommand::Cancel,
            "rename" => ConsoleCommand::Rename(rest.to_string()),
            "show" => ConsoleCommand::Show,
            "inspect" => ConsoleCommand::Inspect,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => return Err(ConsoleError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn number(s: &str) -> Result<f64, ConsoleError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConsoleError::InvalidNumber(s.to_string()))
}

fn parse_key(s: &str) -> Result<Key, ConsoleError> {
    match s.to_ascii_lowercase().as_str() {
        "delete" | "del" => Ok(Key::Delete),
        "backspace" => Ok(Key::Backspace),
        "other" => Ok(Key::Other),
        other => Err(ConsoleError::InvalidArgument(format!("unknown key: {}", other))),
    }
}

fn parse_focus(s: &str) -> Result<Focus, ConsoleError> {
    match s.to_ascii_lowercase().as_str() {
        "canvas" => Ok(Focus::Canvas),
        "input" => Ok(Focus::TextInput),
        "textarea" => Ok(Focus::TextArea),
        other => Err(ConsoleError::InvalidArgument(format!("unknown focus: {}", other))),
    }
}
