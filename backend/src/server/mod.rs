//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AdminSeed, ServerConfig};

use state_builders::{BuiltState, build_states, seed_admin};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;
use backend::inbound::http::activities::list_activities;
use backend::inbound::http::books::{
    create_book, delete_book, get_book, list_books, loan_book, return_book, update_book,
};
use backend::inbound::http::clients::{
    create_client, delete_client, get_client, list_clients, update_client,
};
use backend::inbound::http::dashboard::summary;
use backend::inbound::http::employees::{
    create_employee, delete_employee, get_employee, list_employees, update_employee,
};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{login, logout, me};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(me)
        .service(list_books)
        .service(create_book)
        .service(get_book)
        .service(update_book)
        .service(delete_book)
        .service(loan_book)
        .service(return_book)
        .service(list_clients)
        .service(create_client)
        .service(get_client)
        .service(update_client)
        .service(delete_client)
        .service(list_employees)
        .service(create_employee)
        .service(get_employee)
        .service(update_employee)
        .service(delete_employee)
        .service(list_activities)
        .service(summary);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("library")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Construct an Actix HTTP server from the given configuration.
///
/// Wires repositories and services, seeds the administrator account when one
/// is configured, binds the socket, and flips the readiness probe.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding, binding, or metric
/// registration fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let BuiltState { http_state, users } = build_states(&config);
    if let Some(seed) = &config.admin_seed {
        seed_admin(&users, seed)
            .await
            .map_err(|err| std::io::Error::other(format!("admin seed failed: {err}")))?;
    }

    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    #[cfg(feature = "metrics")]
    let prometheus = make_metrics()?;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
