//! Create, update and delete operations used by the admin back office.
//!
//! Admin listings include inactive and unpublished records, newest first.
//! Every write validates its input before touching the store and refreshes
//! `updated_at` on update.

use crate::repository::DbRepository;
use crate::schema::descriptors::{CASE_STUDIES, HERO_SLIDES, LAB_EQUIPMENT, NEWS, PRODUCTS, SOLUTIONS};
use crate::DbError;
use core_types::{
    CaseStudy, CaseStudyInput, HeroSlide, HeroSlideInput, LabEquipment, LabEquipmentInput,
    NewsArticle, NewsInput, Product, ProductInput, Solution, SolutionInput,
};

/// Maps "no row came back" from an `UPDATE .. RETURNING` or `DELETE`.
fn found<T>(row: Option<T>) -> Result<T, DbError> {
    row.ok_or(DbError::NotFound)
}

/// A unique violation on an admin write means the slug belongs to another
/// record. Any other failure passes through unchanged.
pub(crate) fn slug_conflict(slug: &str, error: sqlx::Error) -> DbError {
    match &error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DbError::Conflict(format!("slug '{slug}' is already in use"))
        }
        _ => DbError::ConnectionError(error),
    }
}

fn deleted(rows_affected: u64) -> Result<(), DbError> {
    if rows_affected == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

impl DbRepository {
    // --- Products -----------------------------------------------------------

    pub async fn admin_list_products(&self) -> Result<Vec<Product>, DbError> {
        self.ensure(&PRODUCTS).await?;
        let rows = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn admin_get_product(&self, id: i32) -> Result<Product, DbError> {
        self.ensure(&PRODUCTS).await?;
        let row = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found(row)
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, DbError> {
        input.validate()?;
        self.ensure(&PRODUCTS).await?;
        let row = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, slug, category, short_description, description, image_url, is_featured, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.category.as_deref())
        .bind(input.short_description.as_deref())
        .bind(input.description.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.is_featured)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| slug_conflict(&input.slug, e))?;
        tracing::info!(id = row.id, slug = %row.slug, "Product created");
        Ok(row)
    }

    pub async fn update_product(&self, id: i32, input: &ProductInput) -> Result<Product, DbError> {
        input.validate()?;
        self.ensure(&PRODUCTS).await?;
        let row = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, slug = $3, category = $4, short_description = $5, description = $6,
                image_url = $7, is_featured = $8, is_active = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.category.as_deref())
        .bind(input.short_description.as_deref())
        .bind(input.description.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.is_featured)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| slug_conflict(&input.slug, e))?;
        found(row)
    }

    pub async fn delete_product(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        deleted(result.rows_affected())
    }

    // --- Solutions ----------------------------------------------------------

    pub async fn admin_list_solutions(&self) -> Result<Vec<Solution>, DbError> {
        self.ensure(&SOLUTIONS).await?;
        let rows = sqlx::query_as::<_, Solution>("SELECT * FROM solutions ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn admin_get_solution(&self, id: i32) -> Result<Solution, DbError> {
        let row = sqlx::query_as::<_, Solution>("SELECT * FROM solutions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found(row)
    }

    pub async fn create_solution(&self, input: &SolutionInput) -> Result<Solution, DbError> {
        input.validate()?;
        self.ensure(&SOLUTIONS).await?;
        let row = sqlx::query_as::<_, Solution>(
            r#"
            INSERT INTO solutions (title, slug, summary, description, icon, image_url, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.slug)
        .bind(input.summary.as_deref())
        .bind(input.description.as_deref())
        .bind(input.icon.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| slug_conflict(&input.slug, e))?;
        tracing::info!(id = row.id, slug = %row.slug, "Solution created");
        Ok(row)
    }

    pub async fn update_solution(&self, id: i32, input: &SolutionInput) -> Result<Solution, DbError> {
        input.validate()?;
        let row = sqlx::query_as::<_, Solution>(
            r#"
            UPDATE solutions
            SET title = $2, slug = $3, summary = $4, description = $5, icon = $6,
                image_url = $7, is_active = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.slug)
        .bind(input.summary.as_deref())
        .bind(input.description.as_deref())
        .bind(input.icon.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| slug_conflict(&input.slug, e))?;
        found(row)
    }

    pub async fn delete_solution(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM solutions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        deleted(result.rows_affected())
    }

    // --- Case studies -------------------------------------------------------

    pub async fn admin_list_case_studies(&self) -> Result<Vec<CaseStudy>, DbError> {
        self.ensure(&CASE_STUDIES).await?;
        let rows = sqlx::query_as::<_, CaseStudy>("SELECT * FROM case_studies ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn admin_get_case_study(&self, id: i32) -> Result<CaseStudy, DbError> {
        let row = sqlx::query_as::<_, CaseStudy>("SELECT * FROM case_studies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found(row)
    }

    pub async fn create_case_study(&self, input: &CaseStudyInput) -> Result<CaseStudy, DbError> {
        input.validate()?;
        self.ensure(&CASE_STUDIES).await?;
        let row = sqlx::query_as::<_, CaseStudy>(
            r#"
            INSERT INTO case_studies (title, slug, client, location, summary, content, image_url, is_featured, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.slug)
        .bind(input.client.as_deref())
        .bind(input.location.as_deref())
        .bind(input.summary.as_deref())
        .bind(input.content.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.is_featured)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| slug_conflict(&input.slug, e))?;
        tracing::info!(id = row.id, slug = %row.slug, "Case study created");
        Ok(row)
    }

    pub async fn update_case_study(&self, id: i32, input: &CaseStudyInput) -> Result<CaseStudy, DbError> {
        input.validate()?;
        let row = sqlx::query_as::<_, CaseStudy>(
            r#"
            UPDATE case_studies
            SET title = $2, slug = $3, client = $4, location = $5, summary = $6, content = $7,
                image_url = $8, is_featured = $9, is_active = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.slug)
        .bind(input.client.as_deref())
        .bind(input.location.as_deref())
        .bind(input.summary.as_deref())
        .bind(input.content.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.is_featured)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| slug_conflict(&input.slug, e))?;
        found(row)
    }

    pub async fn delete_case_study(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM case_studies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        deleted(result.rows_affected())
    }

    // --- Lab equipment ------------------------------------------------------

    pub async fn admin_list_lab_equipment(&self) -> Result<Vec<LabEquipment>, DbError> {
        self.ensure(&LAB_EQUIPMENT).await?;
        let rows = sqlx::query_as::<_, LabEquipment>("SELECT * FROM lab_equipment ORDER BY position ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create_lab_equipment(&self, input: &LabEquipmentInput) -> Result<LabEquipment, DbError> {
        input.validate()?;
        self.ensure(&LAB_EQUIPMENT).await?;
        let row = sqlx::query_as::<_, LabEquipment>(
            r#"
            INSERT INTO lab_equipment (name, description, image_url, position, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.position)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(id = row.id, "Lab equipment created");
        Ok(row)
    }

    pub async fn update_lab_equipment(&self, id: i32, input: &LabEquipmentInput) -> Result<LabEquipment, DbError> {
        input.validate()?;
        let row = sqlx::query_as::<_, LabEquipment>(
            r#"
            UPDATE lab_equipment
            SET name = $2, description = $3, image_url = $4, position = $5, is_active = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.position)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await?;
        found(row)
    }

    pub async fn delete_lab_equipment(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM lab_equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        deleted(result.rows_affected())
    }

    // --- News ---------------------------------------------------------------

    pub async fn admin_list_news(&self) -> Result<Vec<NewsArticle>, DbError> {
        self.ensure(&NEWS).await?;
        let rows = sqlx::query_as::<_, NewsArticle>("SELECT * FROM news ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn admin_get_news(&self, id: i32) -> Result<NewsArticle, DbError> {
        self.ensure(&NEWS).await?;
        let row = sqlx::query_as::<_, NewsArticle>("SELECT * FROM news WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found(row)
    }

    pub async fn create_news(&self, input: &NewsInput) -> Result<NewsArticle, DbError> {
        input.validate()?;
        self.ensure(&NEWS).await?;
        let row = sqlx::query_as::<_, NewsArticle>(
            r#"
            INSERT INTO news (title, slug, description, summary, content, image_url, publish_date, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.slug)
        .bind(input.description.as_deref())
        .bind(input.summary.as_deref())
        .bind(input.content.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.publish_date)
        .bind(input.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| slug_conflict(&input.slug, e))?;
        tracing::info!(id = row.id, slug = %row.slug, "News article created");
        Ok(row)
    }

    pub async fn update_news(&self, id: i32, input: &NewsInput) -> Result<NewsArticle, DbError> {
        input.validate()?;
        self.ensure(&NEWS).await?;
        let row = sqlx::query_as::<_, NewsArticle>(
            r#"
            UPDATE news
            SET title = $2, slug = $3, description = $4, summary = $5, content = $6,
                image_url = $7, publish_date = $8, is_published = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.slug)
        .bind(input.description.as_deref())
        .bind(input.summary.as_deref())
        .bind(input.content.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.publish_date)
        .bind(input.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| slug_conflict(&input.slug, e))?;
        found(row)
    }

    pub async fn delete_news(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        deleted(result.rows_affected())
    }

    // --- Hero slides --------------------------------------------------------

    pub async fn admin_list_hero_slides(&self) -> Result<Vec<HeroSlide>, DbError> {
        self.ensure(&HERO_SLIDES).await?;
        let rows = sqlx::query_as::<_, HeroSlide>("SELECT * FROM hero_slides ORDER BY position ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create_hero_slide(&self, input: &HeroSlideInput) -> Result<HeroSlide, DbError> {
        input.validate()?;
        self.ensure(&HERO_SLIDES).await?;
        let row = sqlx::query_as::<_, HeroSlide>(
            r#"
            INSERT INTO hero_slides (title, subtitle, image_url, position, is_active, button_text, button_link)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(input.subtitle.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.position)
        .bind(input.is_active)
        .bind(input.button_text.as_deref())
        .bind(input.button_link.as_deref())
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(id = row.id, position = row.position, "Hero slide created");
        Ok(row)
    }

    pub async fn update_hero_slide(&self, id: i32, input: &HeroSlideInput) -> Result<HeroSlide, DbError> {
        input.validate()?;
        self.ensure(&HERO_SLIDES).await?;
        let row = sqlx::query_as::<_, HeroSlide>(
            r#"
            UPDATE hero_slides
            SET title = $2, subtitle = $3, image_url = $4, position = $5, is_active = $6,
                button_text = $7, button_link = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(input.subtitle.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.position)
        .bind(input.is_active)
        .bind(input.button_text.as_deref())
        .bind(input.button_link.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        found(row)
    }

    pub async fn delete_hero_slide(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM hero_slides WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        deleted(result.rows_affected())
    }
}
