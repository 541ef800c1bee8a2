use configuration::DatabaseSettings;
use content::SiteContent;
use core_types::inputs::validate_slug;
use core_types::ContentSource;
use database::{connect_lazy, DbError, DbRepository};
use std::time::{Duration, Instant};

/// A repository whose store refuses every connection.
fn unreachable_site() -> SiteContent {
    let settings = DatabaseSettings {
        host: "127.0.0.1".into(),
        port: 1,
        username: "postgres".into(),
        password: String::new(),
        database_name: "gridvault".into(),
        pool_size: 1,
        acquire_timeout_secs: 1,
    };
    SiteContent::new(DbRepository::new(connect_lazy(&settings)))
}

#[tokio::test]
async fn solutions_page_renders_static_solutions_during_an_outage() {
    let site = unreachable_site();

    let solutions = site.solutions().await;

    assert_eq!(solutions.source, ContentSource::Static);
    assert_eq!(solutions.items.len(), 5);
    for solution in &solutions.items {
        validate_slug(&solution.slug).unwrap();
    }
}

#[tokio::test]
async fn evolved_tables_fall_back_when_reconciliation_cannot_reach_the_store() {
    let site = unreachable_site();

    let (news, slides) = tokio::join!(site.news(), site.hero_slides());

    assert!(!news.is_live());
    assert!(!news.items.is_empty());
    assert!(news.items.iter().all(|a| a.is_published.is_none()));
    let positions: Vec<_> = slides.items.iter().map(|s| s.position).collect();
    assert_eq!(positions, [1, 2, 3]);
}

#[tokio::test]
async fn detail_reads_are_not_answered_from_the_catalog() {
    let site = unreachable_site();

    let result = site.repository().get_solution_by_slug("microgrids").await;

    assert!(matches!(result, Err(DbError::ConnectionError(_))));
}

#[tokio::test]
async fn resolved_lists_serialize_with_their_source() {
    let site = unreachable_site();

    let navigation = site.navigation().await;
    let json = serde_json::to_value(&navigation).unwrap();

    assert_eq!(json["source"], "static");
    assert_eq!(json["items"][0]["url"], "/");
}

#[tokio::test]
async fn fallback_waits_no_longer_than_the_acquire_timeout() {
    let site = unreachable_site();

    let started = Instant::now();
    let (slides, featured, news) = tokio::join!(site.hero_slides(), site.featured_products(), site.news());
    let elapsed = started.elapsed();

    assert!(!slides.is_live() && !featured.is_live() && !news.is_live());
    assert!(elapsed < Duration::from_secs(3), "fallback took {elapsed:?}");
}
