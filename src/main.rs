use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = ppe::Args::parse();

    let default_filter = if args.debug { "ppe=debug" } else { "ppe=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let config = args.resolve()?;
    tracing::info!(path = %config.plist_path.display(), "editing preferences");
    ppe::run_gui(config).map_err(|e| anyhow::anyhow!("gui error: {e}"))
}
