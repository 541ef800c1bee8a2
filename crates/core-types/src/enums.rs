use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a resolved collection of content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Live,
    Static,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Live => f.write_str("live"),
            ContentSource::Static => f.write_str("static"),
        }
    }
}

/// The content entities that the admin back office manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentEntity {
    Products,
    Solutions,
    CaseStudies,
    LabEquipment,
    News,
    HeroSlides,
}

impl ContentEntity {
    /// The path segment used by the admin API (`/api/admin/{segment}`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            ContentEntity::Products => "products",
            ContentEntity::Solutions => "solutions",
            ContentEntity::CaseStudies => "case-studies",
            ContentEntity::LabEquipment => "lab-equipment",
            ContentEntity::News => "news",
            ContentEntity::HeroSlides => "hero-slides",
        }
    }
}

impl fmt::Display for ContentEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_are_distinct() {
        let all = [
            ContentEntity::Products,
            ContentEntity::Solutions,
            ContentEntity::CaseStudies,
            ContentEntity::LabEquipment,
            ContentEntity::News,
            ContentEntity::HeroSlides,
        ];
        let mut segments: Vec<_> = all.iter().map(|e| e.path_segment()).collect();
        segments.sort_unstable();
        segments.dedup();
        assert_eq!(segments.len(), all.len());
        assert_eq!(ContentEntity::CaseStudies.to_string(), "case-studies");
    }

    #[test]
    fn content_source_serializes_lowercase() {
        let json = serde_json::to_string(&ContentSource::Static).unwrap();
        assert_eq!(json, "\"static\"");
    }
}
