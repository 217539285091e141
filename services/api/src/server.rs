use crate::cli::ServeArgs;
use crate::infra::{load_catalog, seed_demo_roster, AppState, InMemoryPlayerRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use courtside::config::AppConfig;
use courtside::error::AppError;
use courtside::roster::RosterService;
use courtside::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(load_catalog(&config.development)?);
    let repository = Arc::new(InMemoryPlayerRepository::default());
    let roster_service = Arc::new(RosterService::new(repository, catalog.clone()));
    if config.development.seed_demo_roster {
        seed_demo_roster(roster_service.as_ref())?;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog,
    };

    let app = with_service_routes(roster_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "player development service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
