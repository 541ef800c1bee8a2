use crate::catalog;
use crate::resolver::{resolve, Resolved};
use core_types::{CaseStudy, HeroSlide, LabEquipment, NavigationItem, NewsArticle, Product, Solution};
use database::DbRepository;

/// The content a public page renders.
///
/// Each list read pairs one repository call with its static catalog entry.
/// Detail reads are not offered here; callers go to the repository directly
/// so that a missing record stays a "not found".
#[derive(Clone)]
pub struct SiteContent {
    repo: DbRepository,
}

impl SiteContent {
    pub fn new(repo: DbRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &DbRepository {
        &self.repo
    }

    pub async fn products(&self) -> Resolved<Product> {
        resolve("products", self.repo.get_products(), catalog::products).await
    }

    pub async fn featured_products(&self) -> Resolved<Product> {
        resolve(
            "featured_products",
            self.repo.get_featured_products(),
            catalog::featured_products,
        )
        .await
    }

    pub async fn solutions(&self) -> Resolved<Solution> {
        resolve("solutions", self.repo.get_solutions(), catalog::solutions).await
    }

    pub async fn case_studies(&self) -> Resolved<CaseStudy> {
        resolve("case_studies", self.repo.get_case_studies(), catalog::case_studies).await
    }

    pub async fn lab_equipment(&self) -> Resolved<LabEquipment> {
        resolve("lab_equipment", self.repo.get_lab_equipment(), catalog::lab_equipment).await
    }

    pub async fn news(&self) -> Resolved<NewsArticle> {
        resolve("news", self.repo.get_news(), catalog::news).await
    }

    pub async fn hero_slides(&self) -> Resolved<HeroSlide> {
        resolve("hero_slides", self.repo.get_hero_slides(), catalog::hero_slides).await
    }

    pub async fn navigation(&self) -> Resolved<NavigationItem> {
        resolve("navigation", self.repo.get_navigation(), catalog::navigation).await
    }
}
