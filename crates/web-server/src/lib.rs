use axum::{
    routing::get,
    Router,
};
use configuration::Settings;
use content::SiteContent;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod admin;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub site: SiteContent,
}

impl AppState {
    pub fn new(repo: DbRepository) -> Self {
        Self {
            site: SiteContent::new(repo),
        }
    }
}

/// Builds the full route table.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    let public = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/products", get(handlers::get_products))
        .route("/api/products/featured", get(handlers::get_featured_products))
        .route("/api/products/:slug", get(handlers::get_product))
        .route("/api/solutions", get(handlers::get_solutions))
        .route("/api/solutions/:slug", get(handlers::get_solution))
        .route("/api/case-studies", get(handlers::get_case_studies))
        .route("/api/case-studies/:slug", get(handlers::get_case_study))
        .route("/api/lab-equipment", get(handlers::get_lab_equipment))
        .route("/api/news", get(handlers::get_news))
        .route("/api/news/:slug", get(handlers::get_news_article))
        .route("/api/hero-slides", get(handlers::get_hero_slides))
        .route("/api/navigation", get(handlers::get_navigation))
        .route("/api/pages/:slug", get(handlers::get_page))
        .route("/api/contact", axum::routing::post(handlers::submit_contact))
        .route("/api/newsletter", axum::routing::post(handlers::subscribe_newsletter));

    let admin = Router::new()
        .route("/products", get(admin::list_products).post(admin::create_product))
        .route(
            "/products/:id",
            get(admin::get_product).put(admin::update_product).delete(admin::delete_product),
        )
        .route("/solutions", get(admin::list_solutions).post(admin::create_solution))
        .route(
            "/solutions/:id",
            get(admin::get_solution).put(admin::update_solution).delete(admin::delete_solution),
        )
        .route("/case-studies", get(admin::list_case_studies).post(admin::create_case_study))
        .route(
            "/case-studies/:id",
            get(admin::get_case_study)
                .put(admin::update_case_study)
                .delete(admin::delete_case_study),
        )
        .route(
            "/lab-equipment",
            get(admin::list_lab_equipment).post(admin::create_lab_equipment),
        )
        .route(
            "/lab-equipment/:id",
            get(admin::get_lab_equipment)
                .put(admin::update_lab_equipment)
                .delete(admin::delete_lab_equipment),
        )
        .route("/news", get(admin::list_news).post(admin::create_news))
        .route(
            "/news/:id",
            get(admin::get_news).put(admin::update_news).delete(admin::delete_news),
        )
        .route("/hero-slides", get(admin::list_hero_slides).post(admin::create_hero_slide))
        .route(
            "/hero-slides/:id",
            get(admin::get_hero_slide)
                .put(admin::update_hero_slide)
                .delete(admin::delete_hero_slide),
        );

    public
        .nest("/api/admin", admin)
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Reconciles every declared table once before the first request.
///
/// A failure is logged and otherwise ignored: list pages fall back to the
/// static catalog and the failed tables are retried on their next access.
pub async fn reconcile_at_startup(repo: &DbRepository) {
    let results = repo.ensure_schema().await;
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed == 0 {
        tracing::info!(tables = results.len(), "Schema reconciled");
    } else {
        tracing::warn!(failed, tables = results.len(), "Schema reconciliation incomplete; serving with fallback content");
    }
}

/// The main function to configure and run the web server.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let repo = DbRepository::new(database::shared_pool(&settings.database).clone());
    reconcile_at_startup(&repo).await;

    let app = router(Arc::new(AppState::new(repo)));

    tracing::info!("Web server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
