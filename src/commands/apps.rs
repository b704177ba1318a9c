use crate::cli::{AppsArgs, OutputFormat};
use crate::output::{JsonOutput, MarkdownOutput, OutputFormatter};
use crate::style;
use crate::sync::GraphSource;

use super::CommandContext;

pub fn cmd_apps(args: AppsArgs, ctx: &CommandContext) -> i32 {
    let source = match ctx.source(&args.source) {
        Ok(source) => source,
        Err(code) => return code,
    };
    let rt = match super::runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    let apps = match rt.block_on(source.list_applications()) {
        Ok(apps) => apps,
        Err(e) => {
            style::error(&format!("Failed to fetch apps: {}", e));
            style::hint("start the demo service with `flowmap serve`, or pass --offline");
            return 1;
        }
    };

    let mut buf = Vec::new();
    let written = match args.format {
        OutputFormat::Markdown => MarkdownOutput::new().applications(&apps, &mut buf),
        OutputFormat::Json => JsonOutput::new().applications(&apps, &mut buf),
    };
    if let Err(e) = written.and_then(|_| super::print_formatted(args.format, &buf)) {
        style::error(&format!("Failed to write output: {}", e));
        return 1;
    }

    0
}
