use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::{Context, Result};

use teampool_be::middleware::RequestId;
use teampool_be::ports::{
    GeocodingPort, NominatimClient, OsrmRoutingClient, RoutingPort,
};
use teampool_be::store::init_store;
use teampool_be::store::repositories::{
    CarpoolRepository, DutyRepository, EventRepository, NotificationRepository, TeamRepository,
};
use teampool_be::{AppState, Config, LifecycleService, Notifier};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("TeamPool API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚗 Starting TeamPool API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize the store, repositories and external ports
    let store = init_store();
    let team_repository = TeamRepository::new(store.clone());
    let event_repository = EventRepository::new(store.clone());
    let carpool_repository = CarpoolRepository::new(store.clone());
    let duty_repository = DutyRepository::new(store.clone());
    let notification_repository = NotificationRepository::new(store.clone());

    let routing: Arc<dyn RoutingPort> = Arc::new(
        OsrmRoutingClient::new(&config.osrm_base_url, config.external_timeout())
            .context("failed to build routing client")?,
    );
    let geocoding: Arc<dyn GeocodingPort> = Arc::new(
        NominatimClient::new(&config.geocoder_base_url, config.external_timeout())
            .context("failed to build geocoding client")?,
    );
    println!("✅ Store and external ports initialized");

    let notifier = Notifier::new(notification_repository.clone());
    let lifecycle_service = LifecycleService::new(
        carpool_repository.clone(),
        event_repository.clone(),
        team_repository.clone(),
        notifier.clone(),
        routing,
    );

    let app_state = web::Data::new(AppState {
        lifecycle_service,
        notifier,
        geocoding,
    });
    let team_repo_data = web::Data::new(team_repository);
    let event_repo_data = web::Data::new(event_repository);
    let carpool_repo_data = web::Data::new(carpool_repository);
    let duty_repo_data = web::Data::new(duty_repository);
    let notification_repo_data = web::Data::new(notification_repository);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(team_repo_data.clone())
            .app_data(event_repo_data.clone())
            .app_data(carpool_repo_data.clone())
            .app_data(duty_repo_data.clone())
            .app_data(notification_repo_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
            .configure(teampool_be::routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await?;

    Ok(())
}
