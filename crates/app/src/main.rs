use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grimoire_app::config::AppConfig;
use grimoire_app::shell::Shell;
use grimoire_core::Locale;

/// Terminal front-end for the spell catalog.
#[derive(Debug, Parser)]
#[command(name = "grimoire", version, about = "Spell catalog manager")]
struct Cli {
    /// UI locale (`fr` or `en`); overrides the `LOCALE` env var.
    #[arg(long)]
    locale: Option<String>,

    /// Spell API base path; overrides the `API_BASE_URL` env var.
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "grimoire=info,grimoire_app=info,grimoire_client=info,grimoire_auth=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(locale) = cli.locale.as_deref().and_then(Locale::parse) {
        config.locale = locale;
    }
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    tracing::info!(
        api = %config.api_base_url,
        locale = %config.locale.as_str(),
        "starting grimoire shell"
    );

    Shell::new(&config).run().await
}
