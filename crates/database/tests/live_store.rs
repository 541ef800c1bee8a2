//! Repository tests against a real PostgreSQL instance.
//!
//! Run with `TEST_DATABASE_URL=postgres://... cargo test -p database -- --ignored`.
//! Each test works in its own schema so they can run in parallel.

use chrono::NaiveDate;
use core_types::{ContactRequestInput, HeroSlideInput, NewsInput, NewsletterInput, ProductInput};
use database::{DbError, DbRepository};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;

async fn isolated_repository(name: &str) -> DbRepository {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let admin = PgPool::connect(&url).await.unwrap();
    let schema = format!("gv_test_{name}_{}", std::process::id());
    sqlx::query(&format!("DROP SCHEMA IF EXISTS {schema} CASCADE"))
        .execute(&admin)
        .await
        .unwrap();
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .unwrap();

    let options = PgConnectOptions::from_str(&url)
        .unwrap()
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .unwrap();
    DbRepository::new(pool)
}

fn slide(title: &str, position: i32) -> HeroSlideInput {
    HeroSlideInput {
        title: title.to_string(),
        subtitle: None,
        image_url: None,
        position,
        is_active: true,
        button_text: None,
        button_link: None,
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn hero_slides_come_back_in_position_order() {
    let repo = isolated_repository("hero").await;
    for (title, position) in [("third", 3), ("first", 1), ("second", 2)] {
        repo.create_hero_slide(&slide(title, position)).await.unwrap();
    }

    let slides = repo.get_hero_slides().await.unwrap();
    let positions: Vec<i32> = slides.iter().map(|s| s.position).collect();
    assert_eq!(positions, [1, 2, 3]);
    assert_eq!(slides[0].title, "first");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn legacy_news_table_is_backfilled() {
    let repo = isolated_repository("news").await;
    sqlx::query(
        r#"
        CREATE TABLE news (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            slug VARCHAR(255) NOT NULL UNIQUE,
            description TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(repo.pool())
    .await
    .unwrap();
    sqlx::query("INSERT INTO news (title, slug, description) VALUES ('Plant opens', 'plant-opens', 'Old row')")
        .execute(repo.pool())
        .await
        .unwrap();

    repo.ensure_news_schema().await.unwrap();

    let columns: Vec<String> = sqlx::query_scalar(
        "SELECT column_name::TEXT FROM information_schema.columns WHERE table_schema = current_schema() AND table_name = 'news'",
    )
    .fetch_all(repo.pool())
    .await
    .unwrap();
    for column in ["summary", "content", "image_url", "publish_date", "is_published"] {
        assert!(columns.iter().any(|c| c == column), "missing {column}");
    }

    let old = repo.get_news_by_slug("plant-opens").await.unwrap();
    assert_eq!(old.description.as_deref(), Some("Old row"));
    assert_eq!(old.is_published, Some(true));
    assert!(old.summary.is_none());

    let created = repo
        .create_news(&NewsInput {
            title: "Second line commissioned".into(),
            slug: "second-line-commissioned".into(),
            description: Some("Capacity doubles".into()),
            summary: Some("The second cell line is running.".into()),
            content: Some("Full article body.".into()),
            image_url: Some("/images/news/line-2.jpg".into()),
            publish_date: NaiveDate::from_ymd_opt(2024, 5, 2),
            is_published: true,
        })
        .await
        .unwrap();
    assert_eq!(created.publish_date, NaiveDate::from_ymd_opt(2024, 5, 2));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn unknown_product_slug_is_not_found() {
    let repo = isolated_repository("products").await;
    let err = repo.get_product_by_slug("nonexistent-slug").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn reusing_a_product_slug_is_a_conflict() {
    let repo = isolated_repository("slugs").await;
    let input = ProductInput {
        name: "GridCube 215".into(),
        slug: "gridcube-215".into(),
        short_description: None,
        description: None,
        image_url: None,
        category: None,
        is_featured: false,
        is_active: true,
    };
    repo.create_product(&input).await.unwrap();

    let err = repo.create_product(&input).await.unwrap_err();
    assert!(matches!(err, DbError::Conflict(ref message) if message.contains("gridcube-215")), "{err:?}");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn newsletter_subscription_is_idempotent() {
    let repo = isolated_repository("newsletter").await;
    let input = NewsletterInput {
        email: "Ops@Example.com".into(),
    };
    assert!(repo.subscribe_newsletter(&input).await.unwrap());
    assert!(!repo.subscribe_newsletter(&input).await.unwrap());
}

#[tokio::test]
async fn invalid_contact_request_is_rejected_before_any_query() {
    // Port 1 is never listening; validation must fail before a connection is attempted.
    let pool = PgPoolOptions::new()
        .connect_lazy_with(PgConnectOptions::new().host("127.0.0.1").port(1));
    let repo = DbRepository::new(pool);

    let err = repo
        .create_contact_request(&ContactRequestInput {
            name: "Ana".into(),
            email: "not-an-address".into(),
            company: None,
            phone: None,
            message: "Hello".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
}
