use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use travelmate::config::AppConfig;
use travelmate::middleware::auth::Authentication;
use travelmate::routes;
use travelmate::store::Store;
use travelmate::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);

    let store = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Connected to Postgres");
            Store::postgres(pool)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory store");
            Store::in_memory()
        }
    };

    let app_state = Arc::new(AppState::new(store));
    let bind_addr = config.bind_addr.clone();
    let api_prefix = config.api_prefix.clone();
    info!("Listening on {} (API prefix {})", bind_addr, api_prefix);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Authentication {
                app_config: config.clone(),
            })
            .app_data(web::Data::new(app_state.clone()))
            .service(routes::index)
            .service(routes::health)
            .service(web::scope(&api_prefix).configure(routes::configure))
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
