use crate::cli::ServeArgs;
use crate::infra::{AppState, FileReportArchive};
use crate::routes::with_report_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use camreport::config::AppConfig;
use camreport::error::AppError;
use camreport::intake::ReportService;
use camreport::subjects::SubjectCatalog;
use camreport::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let catalog = SubjectCatalog::cambridge();
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: Arc::new(catalog.clone()),
    };

    let archive = Arc::new(FileReportArchive::new(&config.storage.directory)?);
    let report_service = Arc::new(ReportService::new(archive, catalog));

    let app = with_report_routes(report_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, report_dir = %config.storage.directory.display(), "report card service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
