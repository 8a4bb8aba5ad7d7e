pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::catalog::SoftwareCatalog;
use crate::domain::ports::UnitOfWorkFactory;
use crate::handlers::{accounts, customers, purchased_softwares, software, AppState};

pub use config::AppConfig;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(
    pool: &DbPool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Registers every API route for the given storage backend.
pub fn configure<F: UnitOfWorkFactory>(cfg: &mut web::ServiceConfig) {
    cfg.route("/software", web::get().to(software::list_software::<F>))
        .service(
            web::scope("/customers")
                .route("/{id}", web::get().to(customers::get_customer::<F>)),
        )
        .service(
            web::scope("/accounts")
                .route("/{id}", web::get().to(accounts::get_account::<F>))
                .route("/{id}/orders", web::post().to(software::order_software::<F>)),
        )
        .service(
            web::scope("/purchased-softwares")
                .route(
                    "/{id}/cancel",
                    web::post().to(purchased_softwares::cancel_purchase::<F>),
                )
                .route(
                    "/{id}/quantity",
                    web::put().to(purchased_softwares::change_quantity::<F>),
                )
                .route(
                    "/{id}/valid-to",
                    web::put().to(purchased_softwares::extend_expiry_date::<F>),
                ),
        );
}

/// Build and return an actix-web `Server` bound to `config.host:config.port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(pool: DbPool, config: &AppConfig) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(AppState::new(
        pool,
        SoftwareCatalog::standard(),
        config.license_term(),
    ));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure::<DbPool>)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
    })
    .bind((config.host.clone(), config.port))?
    .run())
}
