use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;

use hris::config::Config;
use hris::db::{bootstrap_admin, init_db};
use hris::docs::ApiDoc;
use hris::repository::{
    EmployeeRepository, MySqlEmployeeRepository, MySqlReportRepository, ReportRepository,
};
use hris::routes;

use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await?;

    let employees: Arc<dyn EmployeeRepository> =
        Arc::new(MySqlEmployeeRepository::new(pool.clone()));
    let reports: Arc<dyn ReportRepository> = Arc::new(MySqlReportRepository::new(pool));

    if let Some(admin) = &config.bootstrap_admin {
        bootstrap_admin(employees.as_ref(), admin)
            .await
            .context("Failed to create bootstrap admin")?;
    }

    let server_addr = config.server_addr.clone();
    info!(addr = %server_addr, "Listening");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.ui_origin)
            .allow_any_method()
            .allow_any_header()
            .expose_headers(["content-disposition"])
            .supports_credentials();

        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(cors)
            .wrap(NormalizePath::trim())
            .service(
                // wildcard so the UI's JS/CSS assets resolve
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(employees.clone()))
            .app_data(Data::from(reports.clone()))
            .app_data(Data::new(config.clone()))
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
