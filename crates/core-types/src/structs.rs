use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A battery storage product shown in the product range.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Added after the first release; older rows and the static catalog leave it empty.
    pub category: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single key/value line in a product's technical data sheet.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProductSpecification {
    pub id: i32,
    pub product_id: i32,
    pub label: String,
    pub value: String,
    pub position: i32,
}

/// A use case listed on a product's detail page.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProductApplication {
    pub id: i32,
    pub product_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Solution {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct CaseStudy {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub client: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A piece of test equipment in the company laboratory.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct LabEquipment {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A news article.
///
/// The first release of the `news` table only carried a title, slug and short
/// description. Everything between `summary` and `is_published` was added by
/// later deployments, so rows read from an older table (and the static catalog)
/// may have them unset.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub is_published: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A slide in the home page hero carousel. Slides render in ascending `position`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct HeroSlide {
    pub id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Page {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: i32,
    pub page_id: i32,
    pub block_type: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct NavigationItem {
    pub id: i32,
    pub label: String,
    pub url: String,
    pub parent_id: Option<i32>,
    pub position: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ContactRequest {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
