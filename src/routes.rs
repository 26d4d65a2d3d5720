use crate::{
    api::{employee, report},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_else(GovernorConfig::default);
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let prefix = config.api_prefix.trim_end_matches('/');

    // Malformed JSON bodies answer with the same envelope as other 400s
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }));

    // Public: registered ahead of the protected scope sharing its prefix
    cfg.service(
        web::resource(format!("{prefix}/authenticate"))
            .wrap(build_limiter(config.rate_login_per_min))
            .route(web::post().to(handlers::login)),
    );

    // Protected routes
    cfg.service(
        web::scope(prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(build_limiter(config.rate_protected_per_min)) // rate limiting
            .service(
                web::scope("/employee")
                    // /employee/all
                    .service(web::resource("/all").route(web::get().to(employee::list_employees)))
                    // /employee
                    .service(web::resource("").route(web::post().to(employee::create_employee)))
                    // /employee/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/report")
                    .service(web::resource("/all").route(web::get().to(report::list_reports)))
                    .service(
                        web::resource("/EmployeesHiredWithinLast30Days")
                            .route(web::get().to(report::employees_hired_within_last_30_days)),
                    )
                    .service(
                        web::resource("/TotalEmployees")
                            .route(web::get().to(report::total_employees)),
                    )
                    // /report/{id}
                    .service(web::resource("/{id}").route(web::get().to(report::get_report))),
            ),
    );
}
