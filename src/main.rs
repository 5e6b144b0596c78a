//! TTJ Admin Panel
//!
//! Terminal front end for the dormitory-management admin panel: logs in,
//! fetches the housing-application collection, and renders the filtered
//! review list with per-status badge counts.
//!
//! Usage: `ariza-admin [search-text] [status-filter]`

use std::sync::Arc;

use ariza_admin::client::ApiClient;
use ariza_admin::config::Config;
use ariza_admin::session::SessionStore;
use ariza_admin::view::{ApplicationBrowser, LoadState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ariza_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting TTJ admin panel");
    tracing::info!("Environment: {:?}", config.environment);
    tracing::info!("Backend: {}", config.api_base_url);

    // Search text and status filter from the command line
    let mut args = std::env::args().skip(1);
    let search = args.next().unwrap_or_default();
    let status_filter = args.next().unwrap_or_default();

    let session = Arc::new(SessionStore::new());
    let client = ApiClient::new(&config, Arc::clone(&session));

    // The session starts empty each run, so credentials come from the
    // environment; without them the fetch below surfaces Unauthorized.
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_default();
    if !username.is_empty() {
        let password = std::env::var("ADMIN_PASSWORD").unwrap_or_default();
        client.login(&username, &password).await?;
    }

    let mut browser = ApplicationBrowser::new(client);
    browser.set_search(search);
    browser.set_status_filter(status_filter);
    browser.refresh().await;

    match browser.state() {
        LoadState::Failed(message) => {
            eprintln!("Xatolik: {}", message);
        }
        _ => {
            let view = browser.view();
            println!(
                "Yangi: {}  Ko'rib chiqilmoqda: {}  Qabul qilindi: {}  Rad etilgan: {}",
                view.counts.pending, view.counts.reviewing, view.counts.approved, view.counts.rejected
            );

            if view.filtered.is_empty() {
                println!("Hech qanday ariza topilmadi");
            } else {
                for application in &view.filtered {
                    let date = application
                        .submitted_at()
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "#{:<6} {:<30} {:<16} {:<20} {}",
                        application.id,
                        application.display_name(),
                        application.phone.as_deref().unwrap_or("-"),
                        application.status,
                        date
                    );
                }
            }
        }
    }

    Ok(())
}
