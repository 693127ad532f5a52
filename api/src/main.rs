use api::routes::routes;
use api::state::AppState;
use axum::Router;
use common::config::Config;
use common::logger::init_logger;
use services::attendance::AttendanceService;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    let config = Config::init(".env");
    init_logger(&config.log_level, &config.log_file);

    // A store-connection failure here is fatal; there is no retry loop.
    let db = db::connect(&config.database_url).await;

    let attendance = AttendanceService::new(
        db.clone(),
        config.geofence_radius_m,
        config.timezone_offset_minutes,
    );
    let app_state = AppState::new(db, attendance);

    // The mobile clients are served from arbitrary origins.
    let cors = CorsLayer::very_permissive();

    let app = Router::new()
        .nest("/api", routes(app_state))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    log::info!(
        "Starting {} on http://{} (geofence radius {}m)",
        config.project_name,
        addr,
        config.geofence_radius_m
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Server crashed");
}
