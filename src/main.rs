// Entrypoint for the content editor.
// - Keeps `main` small: load config, start logging, hand over to the menu.
// - Logs go to stderr so they never interleave with prompts on stdout.

use anyhow::Context;
use site_content_editor::{config::Config, ui::main_menu};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    tracing::debug!("content root: {}", config.root.display());

    main_menu(&config)
        .with_context(|| format!("editing content in {}", config.root.display()))?;
    Ok(())
}
