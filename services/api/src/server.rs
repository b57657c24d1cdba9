use crate::cli::ServeArgs;
use crate::infra::{sample_desk, AppState};
use crate::routes::with_driver_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use driver_hub::config::AppConfig;
use driver_hub::drivers::DriverDirectory;
use driver_hub::error::AppError;
use driver_hub::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let desk = sample_desk(&config.documents);
    let drivers = desk.directory().drivers().len();

    let app = with_driver_routes(desk)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        drivers,
        expiry_window_days = config.documents.expiry_window_days,
        "driver hub ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
