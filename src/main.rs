use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use neighborhood_match::config::Settings;
use neighborhood_match::core::Matcher;
use neighborhood_match::routes::{self, handle_json_payload_error, AppState};
use neighborhood_match::services::{Catalog, RankingCache};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting neighborhood matching service...");

    let catalog = match &settings.catalog.path {
        Some(path) => Catalog::load_from(path).map_err(|e| {
            error!("Failed to load catalog: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e)
        })?,
        None => {
            info!("No catalog path configured, using built-in catalog");
            Catalog::canonical()
        }
    };

    info!("Catalog ready with {} neighborhoods", catalog.len());

    let cache = if settings.cache.enabled {
        let capacity = settings.cache.capacity.unwrap_or(1000);
        let ttl_secs = settings.cache.ttl_secs.unwrap_or(300);
        info!("Ranking cache enabled ({} entries, TTL: {}s)", capacity, ttl_secs);
        RankingCache::new(capacity, ttl_secs)
    } else {
        info!("Ranking cache disabled");
        RankingCache::disabled()
    };

    let thresholds = settings.matching.reason_thresholds();
    let matcher = Matcher::new(thresholds);

    info!("Matcher initialized with thresholds: {:?}", thresholds);

    let app_state = AppState {
        catalog: Arc::new(catalog),
        cache,
        matcher,
        default_limit: settings.matching.default_limit,
        max_limit: settings.matching.max_limit,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
