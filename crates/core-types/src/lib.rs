//! # GridVault Core Types
//!
//! The shared vocabulary of the workspace: one struct per content entity as it
//! is read back from the store, the admin write payloads that create and update
//! those entities, and the validation rules applied to them.
//!
//! This crate has no knowledge of where a record comes from. A `Product` built
//! from a live row and a `Product` built from the static catalog are the same
//! type; the fields added after the first release are `Option`s so that both
//! shapes fit.

pub mod enums;
pub mod error;
pub mod inputs;
pub mod structs;

pub use enums::{ContentEntity, ContentSource};
pub use error::CoreError;
pub use inputs::{
    CaseStudyInput, ContactRequestInput, HeroSlideInput, LabEquipmentInput, NewsInput,
    NewsletterInput, ProductInput, SolutionInput,
};
pub use structs::{
    CaseStudy, ContactRequest, ContentBlock, HeroSlide, LabEquipment, NavigationItem, NewsArticle,
    Page, Product, ProductApplication, ProductSpecification, Solution,
};
