use crate::cli::ServeArgs;
use crate::fixtures::Catalog;
use crate::style;

use super::CommandContext;

pub fn cmd_serve(args: ServeArgs, ctx: &CommandContext) -> i32 {
    let catalog = match Catalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            style::error(&format!("Built-in catalog is invalid: {}", e));
            return 1;
        }
    };
    let port = args.port.unwrap_or(ctx.config.server.port);

    let rt = match super::runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    println!("Starting flowmap graph service...");
    println!("Applications: {}", style::url(&format!("http://127.0.0.1:{}/api/apps", port)));
    println!("Press Ctrl+C to stop");

    if let Err(e) = rt.block_on(crate::server::serve(catalog, port)) {
        style::error(&format!("Server failed: {}", e));
        return 1;
    }

    0
}
