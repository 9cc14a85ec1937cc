//! Product gallery browser
//! Built with Rust + egui (eframe)

mod app;

use app::ProductBrowserApp;
use eframe::egui;
use product_gallery::config::Config;
use product_gallery::http::ReqwestClient;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "mimalloc-allocator")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();
    info!("Catalog endpoint: {}", config.catalog_url);

    let client = match ReqwestClient::new(config.client_options()) {
        Ok(client) => client,
        Err(e) => {
            error!("Could not start HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Products")
            .with_min_inner_size([240.0, 320.0])
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "Products",
        options,
        Box::new(move |cc| Ok(Box::new(ProductBrowserApp::new(cc, config, client)))),
    )
}
