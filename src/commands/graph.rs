use crate::cli::GraphArgs;
use crate::editor::{EditorStatus, GraphEditor};
use crate::output::GraphReport;
use crate::style;

use super::CommandContext;

pub fn cmd_graph(args: GraphArgs, ctx: &CommandContext) -> i32 {
    let source = match ctx.source(&args.source) {
        Ok(source) => source,
        Err(code) => return code,
    };
    let rt = match super::runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    let mut editor = GraphEditor::with_placement(source, ctx.config.canvas.placement());
    rt.block_on(async {
        editor.select_application(Some(args.app.as_str()));
        editor.settle().await;
    });

    if let EditorStatus::Error(message) = editor.status() {
        style::error(&format!("Failed to load graph for {}: {}", args.app, message));
        return 1;
    }

    let report = GraphReport::from_editor(&editor);
    let mut buf = Vec::new();
    if let Err(e) = super::write_graph(args.format, &report, &mut buf) {
        style::error(&format!("Failed to render graph: {}", e));
        return 1;
    }

    match args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, &buf) {
                style::error(&format!("Failed to write output file: {}", e));
                return 1;
            }
            style::success(&format!("Graph written to: {}", style::path(&path)));
        }
        None => {
            if let Err(e) = super::print_formatted(args.format, &buf) {
                style::error(&format!("Failed to write output: {}", e));
                return 1;
            }
        }
    }

    0
}
