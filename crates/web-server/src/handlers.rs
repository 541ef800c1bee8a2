use crate::{envelope::ApiResponse, error::AppError, extract::Payload, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use content::Resolved;
use core_types::{
    CaseStudy, ContactRequestInput, HeroSlide, LabEquipment, NavigationItem, NewsArticle,
    NewsletterInput, Product, Solution,
};
use database::{PageDetails, ProductDetails};
use std::sync::Arc;

type ListResponse<T> = Json<Resolved<T>>;

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// # GET /api/products
pub async fn get_products(State(state): State<Arc<AppState>>) -> ListResponse<Product> {
    Json(state.site.products().await)
}

/// # GET /api/products/featured
pub async fn get_featured_products(State(state): State<Arc<AppState>>) -> ListResponse<Product> {
    Json(state.site.featured_products().await)
}

/// # GET /api/products/:slug
/// The product with its specification and application rows.
pub async fn get_product(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProductDetails>, AppError> {
    let details = state.site.repository().get_product_details(&slug).await?;
    Ok(Json(details))
}

/// # GET /api/solutions
pub async fn get_solutions(State(state): State<Arc<AppState>>) -> ListResponse<Solution> {
    Json(state.site.solutions().await)
}

/// # GET /api/solutions/:slug
pub async fn get_solution(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Solution>, AppError> {
    Ok(Json(state.site.repository().get_solution_by_slug(&slug).await?))
}

/// # GET /api/case-studies
pub async fn get_case_studies(State(state): State<Arc<AppState>>) -> ListResponse<CaseStudy> {
    Json(state.site.case_studies().await)
}

/// # GET /api/case-studies/:slug
pub async fn get_case_study(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CaseStudy>, AppError> {
    Ok(Json(state.site.repository().get_case_study_by_slug(&slug).await?))
}

/// # GET /api/lab-equipment
pub async fn get_lab_equipment(State(state): State<Arc<AppState>>) -> ListResponse<LabEquipment> {
    Json(state.site.lab_equipment().await)
}

/// # GET /api/news
pub async fn get_news(State(state): State<Arc<AppState>>) -> ListResponse<NewsArticle> {
    Json(state.site.news().await)
}

/// # GET /api/news/:slug
pub async fn get_news_article(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<NewsArticle>, AppError> {
    Ok(Json(state.site.repository().get_news_by_slug(&slug).await?))
}

/// # GET /api/hero-slides
pub async fn get_hero_slides(State(state): State<Arc<AppState>>) -> ListResponse<HeroSlide> {
    Json(state.site.hero_slides().await)
}

/// # GET /api/navigation
pub async fn get_navigation(State(state): State<Arc<AppState>>) -> ListResponse<NavigationItem> {
    Json(state.site.navigation().await)
}

/// # GET /api/pages/:slug
pub async fn get_page(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PageDetails>, AppError> {
    match state.site.repository().get_page_by_slug(&slug).await {
        Ok(page) => Ok(Json(page)),
        Err(database::DbError::NotFound) => Err(AppError::NotFound(format!("No page named '{slug}'"))),
        Err(e) => Err(e.into()),
    }
}

/// # POST /api/contact
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<ContactRequestInput>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    let request = state.site.repository().create_contact_request(&input).await?;
    tracing::info!(id = request.id, "Contact request received");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Thank you, we will be in touch shortly.")),
    ))
}

/// # POST /api/newsletter
pub async fn subscribe_newsletter(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<NewsletterInput>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let created = state.site.repository().subscribe_newsletter(&input).await?;
    let message = if created {
        "Subscribed to the newsletter."
    } else {
        "This address is already subscribed."
    };
    Ok(Json(ApiResponse::message(message)))
}
