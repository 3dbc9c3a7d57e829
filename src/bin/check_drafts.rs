//! Draft janitor: reports stored proposal drafts and purges those idle
//! beyond the configured retention window.

use std::env;

use chrono::{Duration, Utc};
use config::Config;
use dotenvy::dotenv;

use pushkind_kp::db::establish_connection_pool;
use pushkind_kp::models::config::AppConfig;
use pushkind_kp::repository::draft::DieselDraftRepository;
use pushkind_kp::repository::{DraftReader, DraftWriter};

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let app_config = match settings.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselDraftRepository::new(pool);
    let cutoff = Utc::now().naive_utc() - Duration::days(app_config.draft_retention_days);

    match repo.list_drafts() {
        Ok(drafts) => {
            let stale = drafts
                .iter()
                .filter(|draft| draft.updated_at < cutoff)
                .count();
            log::info!(
                "{} stored drafts, {} idle since before {}",
                drafts.len(),
                stale,
                cutoff
            );
            for draft in drafts.iter().filter(|draft| draft.updated_at < cutoff) {
                log::info!("Stale draft {} last written {}", draft.key, draft.updated_at);
            }
        }
        Err(e) => {
            log::error!("Failed to list drafts: {e}");
            std::process::exit(1);
        }
    }

    match repo.purge_stale_drafts(cutoff) {
        Ok(removed) => log::info!("Purged {removed} stale drafts"),
        Err(e) => {
            log::error!("Failed to purge stale drafts: {e}");
            std::process::exit(1);
        }
    }
}
