//! Hand-authored content shown whenever the store cannot supply any.
//!
//! Records are written in the shape each table had at its first release.
//! Columns added later (a product's `category`, the article fields of `news`,
//! hero slide buttons) are left unset when a record is converted into its
//! live type, so pages must render without them.

use chrono::{DateTime, TimeZone, Utc};
use core_types::{CaseStudy, HeroSlide, LabEquipment, NavigationItem, NewsArticle, Product, Solution};

/// The timestamp carried by every static record.
fn published_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Builds the live type for a static record; `index` is its place in the catalog.
trait IntoRecord<T> {
    fn into_record(&self, index: usize) -> T;
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

pub struct StaticProduct {
    pub name: &'static str,
    pub slug: &'static str,
    pub short_description: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
    pub is_featured: bool,
}

pub const PRODUCTS: &[StaticProduct] = &[
    StaticProduct {
        name: "GridCube 215",
        slug: "gridcube-215",
        short_description: "215 kWh outdoor cabinet for commercial and industrial sites.",
        description: "An all-in-one LFP storage cabinet with integrated PCS, fire suppression and liquid cooling. Cabinets parallel up to 1.7 MWh on a single AC bus for peak shaving and backup.",
        image_url: "/images/products/gridcube-215.jpg",
        is_featured: true,
    },
    StaticProduct {
        name: "HomeVault 10",
        slug: "homevault-10",
        short_description: "10 kWh wall-mounted battery for homes with rooftop solar.",
        description: "A quiet, wall-mounted home battery that stores daytime solar for the evening and switches to backup power in under 20 ms. Stack up to three units for 30 kWh.",
        image_url: "/images/products/homevault-10.jpg",
        is_featured: true,
    },
    StaticProduct {
        name: "RackCell 51",
        slug: "rackcell-51",
        short_description: "5.12 kWh rack module for telecom and UPS rooms.",
        description: "A 19-inch, 3U lithium iron phosphate module with a built-in BMS and CAN/RS485 communication. Designed as a drop-in replacement for lead-acid strings.",
        image_url: "/images/products/rackcell-51.jpg",
        is_featured: false,
    },
    StaticProduct {
        name: "GridCube Container 3.7",
        slug: "gridcube-container-3-7",
        short_description: "3.72 MWh containerised system for utility-scale projects.",
        description: "A 20-foot container with 3.72 MWh of LFP cells, thermal management and a station controller, delivered pre-commissioned for grid-scale frequency response and energy shifting.",
        image_url: "/images/products/gridcube-container.jpg",
        is_featured: false,
    },
    StaticProduct {
        name: "VoltStack Hybrid Inverter 12",
        slug: "voltstack-hybrid-inverter-12",
        short_description: "12 kW hybrid inverter pairing solar, battery and grid.",
        description: "A three-phase hybrid inverter with two MPPT inputs, seamless off-grid transfer and remote monitoring, matched to the HomeVault and RackCell ranges.",
        image_url: "/images/products/voltstack-12.jpg",
        is_featured: false,
    },
];

impl IntoRecord<Product> for StaticProduct {
    fn into_record(&self, index: usize) -> Product {
        Product {
            id: index as i32 + 1,
            name: self.name.to_string(),
            slug: self.slug.to_string(),
            short_description: text(self.short_description),
            description: text(self.description),
            image_url: text(self.image_url),
            category: None,
            is_featured: self.is_featured,
            is_active: true,
            created_at: published_at(),
            updated_at: published_at(),
        }
    }
}

pub struct StaticSolution {
    pub title: &'static str,
    pub slug: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const SOLUTIONS: &[StaticSolution] = &[
    StaticSolution {
        title: "Residential Storage",
        slug: "residential-storage",
        summary: "Keep your solar power for the evening and the lights on during outages.",
        description: "Home batteries sized to your consumption, installed by certified partners and monitored from your phone.",
        icon: "home",
    },
    StaticSolution {
        title: "Commercial & Industrial",
        slug: "commercial-industrial",
        summary: "Cut demand charges and protect critical loads.",
        description: "Cabinet systems that shave peaks, shift tariffs and provide backup for factories, warehouses and retail sites.",
        icon: "factory",
    },
    StaticSolution {
        title: "Utility-Scale Storage",
        slug: "utility-scale-storage",
        summary: "Containerised storage for grid operators and renewable developers.",
        description: "Megawatt-hour systems for frequency response, capacity firming and energy arbitrage, delivered turnkey.",
        icon: "grid",
    },
    StaticSolution {
        title: "Microgrids",
        slug: "microgrids",
        summary: "Reliable power for islands, mines and remote communities.",
        description: "Storage, solar and generator control combined into a single microgrid that runs with or without the main grid.",
        icon: "network",
    },
    StaticSolution {
        title: "EV Charging Support",
        slug: "ev-charging-support",
        summary: "Add fast chargers without upgrading the grid connection.",
        description: "Batteries buffer charging peaks so sites can install high-power chargers on their existing supply.",
        icon: "bolt",
    },
];

impl IntoRecord<Solution> for StaticSolution {
    fn into_record(&self, index: usize) -> Solution {
        Solution {
            id: index as i32 + 1,
            title: self.title.to_string(),
            slug: self.slug.to_string(),
            summary: text(self.summary),
            description: text(self.description),
            icon: text(self.icon),
            image_url: Some(format!("/images/solutions/{}.jpg", self.slug)),
            is_active: true,
            created_at: published_at(),
            updated_at: published_at(),
        }
    }
}

pub struct StaticCaseStudy {
    pub title: &'static str,
    pub slug: &'static str,
    pub client: &'static str,
    pub location: &'static str,
    pub summary: &'static str,
}

pub const CASE_STUDIES: &[StaticCaseStudy] = &[
    StaticCaseStudy {
        title: "Peak shaving for a cold-storage warehouse",
        slug: "cold-storage-peak-shaving",
        client: "Nordfrost Logistics",
        location: "Hamburg, Germany",
        summary: "Four GridCube 215 cabinets cut the site's monthly demand charge by 38%.",
    },
    StaticCaseStudy {
        title: "Island microgrid on Ilha Verde",
        slug: "ilha-verde-microgrid",
        client: "Ilha Verde Municipality",
        location: "Azores, Portugal",
        summary: "A 3.7 MWh container and 2 MW of solar replaced 70% of diesel generation.",
    },
    StaticCaseStudy {
        title: "Backup power for a regional data centre",
        slug: "regional-data-centre-backup",
        client: "Cloudline DC",
        location: "Leeds, United Kingdom",
        summary: "RackCell strings replaced end-of-life lead-acid batteries in half the floor space.",
    },
];

impl IntoRecord<CaseStudy> for StaticCaseStudy {
    fn into_record(&self, index: usize) -> CaseStudy {
        CaseStudy {
            id: index as i32 + 1,
            title: self.title.to_string(),
            slug: self.slug.to_string(),
            client: text(self.client),
            location: text(self.location),
            summary: text(self.summary),
            content: None,
            image_url: Some(format!("/images/case-studies/{}.jpg", self.slug)),
            is_featured: index == 0,
            is_active: true,
            created_at: published_at(),
            updated_at: published_at(),
        }
    }
}

pub struct StaticLabEquipment {
    pub name: &'static str,
    pub description: &'static str,
}

pub const LAB_EQUIPMENT: &[StaticLabEquipment] = &[
    StaticLabEquipment {
        name: "Multi-channel battery cycler",
        description: "128 channels of charge/discharge cycling for cell qualification and lifetime testing.",
    },
    StaticLabEquipment {
        name: "Climatic test chamber",
        description: "Temperature and humidity cycling from -40 °C to +85 °C for module validation.",
    },
    StaticLabEquipment {
        name: "Electrochemical impedance analyser",
        description: "Impedance spectroscopy to track cell ageing and screen incoming batches.",
    },
    StaticLabEquipment {
        name: "Abuse test bunker",
        description: "Nail penetration, overcharge and thermal runaway propagation tests in a sealed enclosure.",
    },
];

impl IntoRecord<LabEquipment> for StaticLabEquipment {
    fn into_record(&self, index: usize) -> LabEquipment {
        LabEquipment {
            id: index as i32 + 1,
            name: self.name.to_string(),
            description: text(self.description),
            image_url: None,
            position: index as i32 + 1,
            is_active: true,
            created_at: published_at(),
            updated_at: published_at(),
        }
    }
}

pub struct StaticNews {
    pub title: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
}

pub const NEWS: &[StaticNews] = &[
    StaticNews {
        title: "Second cell assembly line enters production",
        slug: "second-assembly-line",
        description: "Annual manufacturing capacity doubles to 2 GWh.",
    },
    StaticNews {
        title: "GridCube 215 receives UL 9540 certification",
        slug: "gridcube-ul-9540",
        description: "The cabinet range is now certified for the North American market.",
    },
    StaticNews {
        title: "Meet us at The smarter E Europe",
        slug: "smarter-e-europe",
        description: "Visit our stand to see the new container platform.",
    },
];

impl IntoRecord<NewsArticle> for StaticNews {
    fn into_record(&self, index: usize) -> NewsArticle {
        NewsArticle {
            id: index as i32 + 1,
            title: self.title.to_string(),
            slug: self.slug.to_string(),
            description: text(self.description),
            summary: None,
            content: None,
            image_url: None,
            publish_date: None,
            is_published: None,
            created_at: published_at(),
            updated_at: published_at(),
        }
    }
}

pub struct StaticHeroSlide {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub image_url: &'static str,
    pub position: i32,
}

pub const HERO_SLIDES: &[StaticHeroSlide] = &[
    StaticHeroSlide {
        title: "Energy storage for every scale",
        subtitle: "From a single home to the grid.",
        image_url: "/images/hero/every-scale.jpg",
        position: 1,
    },
    StaticHeroSlide {
        title: "Built on LFP chemistry",
        subtitle: "Safe, long-lasting cells designed and tested in-house.",
        image_url: "/images/hero/lfp.jpg",
        position: 2,
    },
    StaticHeroSlide {
        title: "Turnkey from design to service",
        subtitle: "One partner for engineering, installation and monitoring.",
        image_url: "/images/hero/turnkey.jpg",
        position: 3,
    },
];

impl IntoRecord<HeroSlide> for StaticHeroSlide {
    fn into_record(&self, index: usize) -> HeroSlide {
        HeroSlide {
            id: index as i32 + 1,
            title: self.title.to_string(),
            subtitle: text(self.subtitle),
            image_url: text(self.image_url),
            position: self.position,
            is_active: true,
            button_text: None,
            button_link: None,
            created_at: published_at(),
            updated_at: published_at(),
        }
    }
}

pub const NAVIGATION: &[(&str, &str)] = &[
    ("Home", "/"),
    ("Products", "/products"),
    ("Solutions", "/solutions"),
    ("Case Studies", "/case-studies"),
    ("Laboratory", "/laboratory"),
    ("News", "/news"),
    ("Contact", "/contact"),
];

fn convert<S, T>(records: &[S]) -> Vec<T>
where
    S: IntoRecord<T>,
{
    records
        .iter()
        .enumerate()
        .map(|(index, record)| record.into_record(index))
        .collect()
}

pub fn products() -> Vec<Product> {
    convert(PRODUCTS)
}

pub fn featured_products() -> Vec<Product> {
    products().into_iter().filter(|p| p.is_featured).collect()
}

pub fn solutions() -> Vec<Solution> {
    convert(SOLUTIONS)
}

pub fn case_studies() -> Vec<CaseStudy> {
    convert(CASE_STUDIES)
}

pub fn lab_equipment() -> Vec<LabEquipment> {
    convert(LAB_EQUIPMENT)
}

pub fn news() -> Vec<NewsArticle> {
    convert(NEWS)
}

pub fn hero_slides() -> Vec<HeroSlide> {
    let mut slides: Vec<HeroSlide> = convert(HERO_SLIDES);
    slides.sort_by_key(|slide| slide.position);
    slides
}

pub fn navigation() -> Vec<NavigationItem> {
    NAVIGATION
        .iter()
        .enumerate()
        .map(|(index, (label, url))| NavigationItem {
            id: index as i32 + 1,
            label: label.to_string(),
            url: url.to_string(),
            parent_id: None,
            position: index as i32 + 1,
            is_active: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::inputs::validate_slug;
    use std::collections::HashSet;

    #[test]
    fn there_are_five_solutions_with_usable_slugs() {
        let solutions = solutions();
        assert_eq!(solutions.len(), 5);
        let slugs: HashSet<_> = solutions.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs.len(), 5);
        for slug in slugs {
            validate_slug(slug).unwrap();
        }
    }

    #[test]
    fn every_addressable_record_has_a_valid_unique_slug() {
        let slugs: Vec<String> = products()
            .into_iter()
            .map(|p| p.slug)
            .chain(case_studies().into_iter().map(|c| c.slug))
            .chain(news().into_iter().map(|n| n.slug))
            .collect();
        for slug in &slugs {
            validate_slug(slug).unwrap();
        }
        let unique: HashSet<_> = slugs.iter().collect();
        assert_eq!(unique.len(), slugs.len());
    }

    #[test]
    fn static_records_leave_later_columns_unset() {
        assert!(products().iter().all(|p| p.category.is_none()));
        assert!(news().iter().all(|n| n.summary.is_none() && n.publish_date.is_none()));
        assert!(hero_slides().iter().all(|s| s.button_text.is_none()));
    }

    #[test]
    fn records_are_numbered_in_catalog_order() {
        let ids: Vec<_> = products().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        let first = &case_studies()[0];
        assert_eq!(first.slug, CASE_STUDIES[0].slug);
        assert!(first.is_featured);
    }

    #[test]
    fn hero_slides_are_position_ordered() {
        let positions: Vec<_> = hero_slides().iter().map(|s| s.position).collect();
        assert_eq!(positions, [1, 2, 3]);
    }

    #[test]
    fn featured_products_are_a_subset() {
        let featured = featured_products();
        assert!(!featured.is_empty());
        assert!(featured.iter().all(|p| p.is_featured));
    }

    #[test]
    fn no_placeholder_copy() {
        let all_text: Vec<String> = products()
            .into_iter()
            .filter_map(|p| p.description)
            .chain(solutions().into_iter().filter_map(|s| s.description))
            .collect();
        assert!(all_text.iter().all(|t| !t.to_lowercase().contains("lorem")));
    }
}
