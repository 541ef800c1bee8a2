//! Admin back office endpoints under `/api/admin`.
//!
//! Every response uses the `{ success, data?, message? }` envelope. Records
//! are addressed by numeric id.

use crate::{envelope::ApiResponse, error::AppError, extract::Payload, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_types::{
    CaseStudy, CaseStudyInput, ContentEntity, HeroSlide, HeroSlideInput, LabEquipment,
    LabEquipmentInput, NewsArticle, NewsInput, Product, ProductInput, Solution, SolutionInput,
};
use std::sync::Arc;

type Envelope<T> = Result<Json<ApiResponse<T>>, AppError>;
type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

fn created<T>(record: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::ok(record)))
}

fn removed(entity: ContentEntity, id: i32) -> Json<ApiResponse<()>> {
    tracing::info!(%entity, id, "Record deleted");
    Json(ApiResponse::message(format!("Deleted record {id} from {entity}")))
}

// --- Products ---------------------------------------------------------------

pub async fn list_products(State(state): State<Arc<AppState>>) -> Envelope<Vec<Product>> {
    let products = state.site.repository().admin_list_products().await?;
    Ok(Json(ApiResponse::ok(products)))
}

pub async fn get_product(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<Product> {
    Ok(Json(ApiResponse::ok(state.site.repository().admin_get_product(id).await?)))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<ProductInput>,
) -> Created<Product> {
    Ok(created(state.site.repository().create_product(&input).await?))
}

pub async fn update_product(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<ProductInput>,
) -> Envelope<Product> {
    Ok(Json(ApiResponse::ok(state.site.repository().update_product(id, &input).await?)))
}

pub async fn delete_product(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<()> {
    state.site.repository().delete_product(id).await?;
    Ok(removed(ContentEntity::Products, id))
}

// --- Solutions --------------------------------------------------------------

pub async fn list_solutions(State(state): State<Arc<AppState>>) -> Envelope<Vec<Solution>> {
    let solutions = state.site.repository().admin_list_solutions().await?;
    Ok(Json(ApiResponse::ok(solutions)))
}

pub async fn get_solution(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<Solution> {
    Ok(Json(ApiResponse::ok(state.site.repository().admin_get_solution(id).await?)))
}

pub async fn create_solution(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<SolutionInput>,
) -> Created<Solution> {
    Ok(created(state.site.repository().create_solution(&input).await?))
}

pub async fn update_solution(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<SolutionInput>,
) -> Envelope<Solution> {
    Ok(Json(ApiResponse::ok(state.site.repository().update_solution(id, &input).await?)))
}

pub async fn delete_solution(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<()> {
    state.site.repository().delete_solution(id).await?;
    Ok(removed(ContentEntity::Solutions, id))
}

// --- Case studies -----------------------------------------------------------

pub async fn list_case_studies(State(state): State<Arc<AppState>>) -> Envelope<Vec<CaseStudy>> {
    let case_studies = state.site.repository().admin_list_case_studies().await?;
    Ok(Json(ApiResponse::ok(case_studies)))
}

pub async fn get_case_study(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<CaseStudy> {
    Ok(Json(ApiResponse::ok(state.site.repository().admin_get_case_study(id).await?)))
}

pub async fn create_case_study(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<CaseStudyInput>,
) -> Created<CaseStudy> {
    Ok(created(state.site.repository().create_case_study(&input).await?))
}

pub async fn update_case_study(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<CaseStudyInput>,
) -> Envelope<CaseStudy> {
    Ok(Json(ApiResponse::ok(state.site.repository().update_case_study(id, &input).await?)))
}

pub async fn delete_case_study(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<()> {
    state.site.repository().delete_case_study(id).await?;
    Ok(removed(ContentEntity::CaseStudies, id))
}

// --- Lab equipment ----------------------------------------------------------

pub async fn list_lab_equipment(State(state): State<Arc<AppState>>) -> Envelope<Vec<LabEquipment>> {
    let equipment = state.site.repository().admin_list_lab_equipment().await?;
    Ok(Json(ApiResponse::ok(equipment)))
}

pub async fn get_lab_equipment(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Envelope<LabEquipment> {
    Ok(Json(ApiResponse::ok(state.site.repository().get_lab_equipment_by_id(id).await?)))
}

pub async fn create_lab_equipment(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<LabEquipmentInput>,
) -> Created<LabEquipment> {
    Ok(created(state.site.repository().create_lab_equipment(&input).await?))
}

pub async fn update_lab_equipment(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<LabEquipmentInput>,
) -> Envelope<LabEquipment> {
    Ok(Json(ApiResponse::ok(
        state.site.repository().update_lab_equipment(id, &input).await?,
    )))
}

pub async fn delete_lab_equipment(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<()> {
    state.site.repository().delete_lab_equipment(id).await?;
    Ok(removed(ContentEntity::LabEquipment, id))
}

// --- News -------------------------------------------------------------------

pub async fn list_news(State(state): State<Arc<AppState>>) -> Envelope<Vec<NewsArticle>> {
    let articles = state.site.repository().admin_list_news().await?;
    Ok(Json(ApiResponse::ok(articles)))
}

pub async fn get_news(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<NewsArticle> {
    Ok(Json(ApiResponse::ok(state.site.repository().admin_get_news(id).await?)))
}

pub async fn create_news(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<NewsInput>,
) -> Created<NewsArticle> {
    Ok(created(state.site.repository().create_news(&input).await?))
}

pub async fn update_news(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<NewsInput>,
) -> Envelope<NewsArticle> {
    Ok(Json(ApiResponse::ok(state.site.repository().update_news(id, &input).await?)))
}

pub async fn delete_news(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<()> {
    state.site.repository().delete_news(id).await?;
    Ok(removed(ContentEntity::News, id))
}

// --- Hero slides ------------------------------------------------------------

pub async fn list_hero_slides(State(state): State<Arc<AppState>>) -> Envelope<Vec<HeroSlide>> {
    let slides = state.site.repository().admin_list_hero_slides().await?;
    Ok(Json(ApiResponse::ok(slides)))
}

pub async fn get_hero_slide(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<HeroSlide> {
    Ok(Json(ApiResponse::ok(state.site.repository().get_hero_slide_by_id(id).await?)))
}

pub async fn create_hero_slide(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<HeroSlideInput>,
) -> Created<HeroSlide> {
    Ok(created(state.site.repository().create_hero_slide(&input).await?))
}

pub async fn update_hero_slide(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<HeroSlideInput>,
) -> Envelope<HeroSlide> {
    Ok(Json(ApiResponse::ok(state.site.repository().update_hero_slide(id, &input).await?)))
}

pub async fn delete_hero_slide(Path(id): Path<i32>, State(state): State<Arc<AppState>>) -> Envelope<()> {
    state.site.repository().delete_hero_slide(id).await?;
    Ok(removed(ContentEntity::HeroSlides, id))
}
