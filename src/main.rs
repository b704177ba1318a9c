use clap::Parser;
use flowmap::cli::{Cli, Command};
use flowmap::commands::CommandContext;
use flowmap::{cmd_apps, cmd_edit, cmd_graph, cmd_init, cmd_serve, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match cli.command {
        Command::Init(args) => cmd_init(args),
        command => match CommandContext::new(cli.config.as_deref()) {
            Ok(ctx) => match command {
                Command::Serve(args) => cmd_serve(args, &ctx),
                Command::Apps(args) => cmd_apps(args, &ctx),
                Command::Graph(args) => cmd_graph(args, &ctx),
                Command::Edit(args) => cmd_edit(args, &ctx),
                Command::Init(args) => cmd_init(args),
            },
            Err(code) => code,
        },
    };

    std::process::exit(exit_code);
}
