use crate::DbError;
use crate::schema::descriptors::{
    CONTACT_REQUESTS, HERO_SLIDES, NEWS, NEWSLETTER_SUBSCRIPTIONS, PRODUCTS,
};
use crate::schema::{all_descriptors, EntityDescriptor, Reconciliation, SchemaEngine};
use core_types::{
    CaseStudy, ContactRequest, ContactRequestInput, ContentBlock, HeroSlide, LabEquipment,
    NavigationItem, NewsArticle, NewsletterInput, Page, Product, ProductApplication,
    ProductSpecification, Solution,
};
use serde::Serialize;
use sqlx::postgres::PgPool;
use std::sync::Arc;

const HERO_SLIDES_SQL: &str =
    "SELECT * FROM hero_slides WHERE is_active = TRUE ORDER BY position ASC, id ASC";

/// The slug is always bound, never formatted in.
const PRODUCT_BY_SLUG_SQL: &str = "SELECT * FROM products WHERE slug = $1 AND is_active = TRUE";

/// A product together with the rows shown on its detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetails {
    pub product: Product,
    pub specifications: Vec<ProductSpecification>,
    pub applications: Vec<ProductApplication>,
}

/// A page with its content blocks in display order.
#[derive(Debug, Clone, Serialize)]
pub struct PageDetails {
    pub page: Page,
    pub blocks: Vec<ContentBlock>,
}

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
///
/// Every value reaches the store as a bind parameter. Reads of tables whose
/// shape changed across releases (`products`, `news`, `hero_slides`) reconcile
/// the table first; the reconciliation runs once per repository lifetime.
///
/// Single-record lookups return `DbError::NotFound` for a missing record and
/// never substitute static content.
#[derive(Clone)]
pub struct DbRepository {
    pub(crate) pool: PgPool,
    schema: Arc<SchemaEngine<PgPool>>,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        let schema = Arc::new(SchemaEngine::new(pool.clone()));
        Self { pool, schema }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn schema(&self) -> &SchemaEngine<PgPool> {
        &self.schema
    }

    /// Reconciles every declared table. Used at cold start and by the CLI.
    pub async fn ensure_schema(&self) -> Vec<(&'static str, Result<Reconciliation, DbError>)> {
        self.schema.ensure_all(&all_descriptors()).await
    }

    pub(crate) async fn ensure(&self, descriptor: &EntityDescriptor) -> Result<(), DbError> {
        self.schema.ensure_table(descriptor).await?;
        Ok(())
    }

    /// Brings the `news` table up to the current article shape.
    pub async fn ensure_news_schema(&self) -> Result<(), DbError> {
        self.ensure(&NEWS).await
    }

    pub async fn ensure_hero_slides_schema(&self) -> Result<(), DbError> {
        self.ensure(&HERO_SLIDES).await
    }

    pub async fn ensure_products_schema(&self) -> Result<(), DbError> {
        self.ensure(&PRODUCTS).await
    }

    // --- Products -----------------------------------------------------------

    /// Fetches all active products, newest first.
    pub async fn get_products(&self) -> Result<Vec<Product>, DbError> {
        self.ensure_products_schema().await?;
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE is_active = TRUE ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn get_featured_products(&self) -> Result<Vec<Product>, DbError> {
        self.ensure_products_schema().await?;
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE is_active = TRUE AND is_featured = TRUE ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Product, DbError> {
        self.ensure_products_schema().await?;
        let product = sqlx::query_as::<_, Product>(PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        product.ok_or(DbError::NotFound)
    }

    pub async fn get_product_specifications(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductSpecification>, DbError> {
        let specifications = sqlx::query_as::<_, ProductSpecification>(
            "SELECT id, product_id, label, value, position FROM product_specifications WHERE product_id = $1 ORDER BY position ASC, id ASC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(specifications)
    }

    pub async fn get_product_applications(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductApplication>, DbError> {
        let applications = sqlx::query_as::<_, ProductApplication>(
            "SELECT id, product_id, title, description, position FROM product_applications WHERE product_id = $1 ORDER BY position ASC, id ASC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// Fetches a product and its data sheet rows concurrently.
    pub async fn get_product_details(&self, slug: &str) -> Result<ProductDetails, DbError> {
        let product = self.get_product_by_slug(slug).await?;
        let (specifications, applications) = tokio::join!(
            self.get_product_specifications(product.id),
            self.get_product_applications(product.id)
        );
        Ok(ProductDetails {
            product,
            specifications: specifications?,
            applications: applications?,
        })
    }

    // --- Solutions ----------------------------------------------------------

    /// Fetches all active solutions in the order they were authored.
    pub async fn get_solutions(&self) -> Result<Vec<Solution>, DbError> {
        let solutions = sqlx::query_as::<_, Solution>(
            "SELECT * FROM solutions WHERE is_active = TRUE ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(solutions)
    }

    pub async fn get_solution_by_slug(&self, slug: &str) -> Result<Solution, DbError> {
        sqlx::query_as::<_, Solution>("SELECT * FROM solutions WHERE slug = $1 AND is_active = TRUE")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    // --- Case studies -------------------------------------------------------

    pub async fn get_case_studies(&self) -> Result<Vec<CaseStudy>, DbError> {
        let case_studies = sqlx::query_as::<_, CaseStudy>(
            "SELECT * FROM case_studies WHERE is_active = TRUE ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(case_studies)
    }

    pub async fn get_case_study_by_slug(&self, slug: &str) -> Result<CaseStudy, DbError> {
        sqlx::query_as::<_, CaseStudy>(
            "SELECT * FROM case_studies WHERE slug = $1 AND is_active = TRUE",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    // --- Lab equipment ------------------------------------------------------

    pub async fn get_lab_equipment(&self) -> Result<Vec<LabEquipment>, DbError> {
        let equipment = sqlx::query_as::<_, LabEquipment>(
            "SELECT * FROM lab_equipment WHERE is_active = TRUE ORDER BY position ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(equipment)
    }

    pub async fn get_lab_equipment_by_id(&self, id: i32) -> Result<LabEquipment, DbError> {
        sqlx::query_as::<_, LabEquipment>("SELECT * FROM lab_equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    // --- News ---------------------------------------------------------------

    /// Fetches published articles, most recent publish date first. Articles
    /// without a publish date sort after dated ones, by creation time.
    pub async fn get_news(&self) -> Result<Vec<NewsArticle>, DbError> {
        self.ensure_news_schema().await?;
        let articles = sqlx::query_as::<_, NewsArticle>(
            r#"
            SELECT * FROM news
            WHERE is_published = TRUE
            ORDER BY publish_date DESC NULLS LAST, created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    pub async fn get_news_by_slug(&self, slug: &str) -> Result<NewsArticle, DbError> {
        self.ensure_news_schema().await?;
        sqlx::query_as::<_, NewsArticle>("SELECT * FROM news WHERE slug = $1 AND is_published = TRUE")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    // --- Hero slides --------------------------------------------------------

    /// Fetches active hero slides in ascending `position`.
    pub async fn get_hero_slides(&self) -> Result<Vec<HeroSlide>, DbError> {
        self.ensure_hero_slides_schema().await?;
        let slides = sqlx::query_as::<_, HeroSlide>(HERO_SLIDES_SQL)
            .fetch_all(&self.pool)
        .await?;
        Ok(slides)
    }

    pub async fn get_hero_slide_by_id(&self, id: i32) -> Result<HeroSlide, DbError> {
        self.ensure_hero_slides_schema().await?;
        sqlx::query_as::<_, HeroSlide>("SELECT * FROM hero_slides WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    // --- Pages & navigation -------------------------------------------------

    pub async fn get_navigation(&self) -> Result<Vec<NavigationItem>, DbError> {
        let items = sqlx::query_as::<_, NavigationItem>(
            "SELECT id, label, url, parent_id, position, is_active FROM navigation WHERE is_active = TRUE ORDER BY position ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn get_page_by_slug(&self, slug: &str) -> Result<PageDetails, DbError> {
        let page = sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE slug = $1 AND is_active = TRUE")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)?;
        let blocks = sqlx::query_as::<_, ContentBlock>(
            "SELECT id, page_id, block_type, title, body, position FROM content_blocks WHERE page_id = $1 ORDER BY position ASC, id ASC",
        )
        .bind(page.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(PageDetails { page, blocks })
    }

    // --- Public forms -------------------------------------------------------

    pub async fn create_contact_request(
        &self,
        input: &ContactRequestInput,
    ) -> Result<ContactRequest, DbError> {
        input.validate()?;
        self.ensure(&CONTACT_REQUESTS).await?;
        let request = sqlx::query_as::<_, ContactRequest>(
            r#"
            INSERT INTO contact_requests (name, email, company, phone, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, company, phone, message, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.email.trim())
        .bind(input.company.as_deref())
        .bind(input.phone.as_deref())
        .bind(&input.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    /// Subscribes an address to the newsletter.
    /// Returns `false` when the address was already subscribed.
    pub async fn subscribe_newsletter(&self, input: &NewsletterInput) -> Result<bool, DbError> {
        input.validate()?;
        self.ensure(&NEWSLETTER_SUBSCRIPTIONS).await?;
        let result = sqlx::query(
            "INSERT INTO newsletter_subscriptions (email) VALUES ($1) ON CONFLICT (email) DO NOTHING",
        )
        .bind(input.email.trim().to_lowercase())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
