use crate::cli::InitArgs;
use crate::config::{Config, generate_config_template};
use crate::style;

pub fn cmd_init(args: InitArgs) -> i32 {
    let config_path = Config::path_in(&args.path);
    if config_path.exists() {
        style::error(&format!(
            ".flowmap.toml already exists at {}",
            style::path(&config_path)
        ));
        return 1;
    }

    if let Err(e) = std::fs::write(&config_path, generate_config_template()) {
        style::error(&format!("Failed to write config file: {}", e));
        return 1;
    }

    style::success(&format!(
        "Created .flowmap.toml at {}",
        style::path(&config_path)
    ));
    0
}
