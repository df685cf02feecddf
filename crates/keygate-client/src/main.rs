use anyhow::Result;
use eframe::egui;
use keygate_client::config::ClientConfig;
use keygate_client::network::NetworkClient;
use keygate_client::ui::KeygateApp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keygate=debug,keygate_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Keygate client...");

    let config = ClientConfig::load()?;
    tracing::info!("Using API at {}", config.api_base);

    let network = NetworkClient::new(&config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 520.0])
            .with_min_inner_size([360.0, 420.0])
            .with_title("Keygate"),
        ..Default::default()
    };

    eframe::run_native(
        "Keygate",
        options,
        Box::new(move |cc| Ok(Box::new(KeygateApp::new(cc, &config, network, runtime)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {}", e))?;

    Ok(())
}
