use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use stream_overlay::{app, cli::Cli, config, placement};

fn main() {
    let filter =
        EnvFilter::try_from_env("STREAM_OVERLAY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Any explicit argument bypasses the config file.
    let configured = std::env::args_os().len() > 1;
    let cli = Cli::parse();

    let specs = match config::resolve(cli.into_spec(), configured, &config::config_path()) {
        Ok(specs) => specs,
        Err(err) => {
            error!("error reading config file: {err}");
            std::process::exit(1);
        }
    };

    for spec in &specs {
        if let Err(err) = placement::validate_size(spec) {
            error!("invalid window configuration: {err}");
            std::process::exit(1);
        }
    }

    app::run(specs)
}
