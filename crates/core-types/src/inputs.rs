//! Write payloads accepted by the admin back office and the public forms.
//!
//! Every input is validated before it reaches the database. Validation never
//! rewrites a value: a missing title is rejected, not replaced with a placeholder.

use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(field, "is required"));
    }
    Ok(())
}

/// Slugs appear in public URLs, so only lowercase ASCII letters, digits and
/// single hyphens between words are accepted.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    require("slug", slug)?;
    let well_formed = slug
        .split('-')
        .all(|word| !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    if !well_formed {
        return Err(CoreError::invalid(
            "slug",
            format!("'{slug}' must be lowercase words separated by single hyphens"),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    require("email", email)?;
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(CoreError::invalid("email", format!("'{email}' is not a valid address"))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        validate_slug(&self.slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionInput {
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl SolutionInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("title", &self.title)?;
        validate_slug(&self.slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudyInput {
    pub title: String,
    pub slug: String,
    pub client: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CaseStudyInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("title", &self.title)?;
        validate_slug(&self.slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabEquipmentInput {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl LabEquipmentInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        if self.position < 0 {
            return Err(CoreError::invalid("position", "must not be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsInput {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub publish_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

impl NewsInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("title", &self.title)?;
        validate_slug(&self.slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroSlideInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
}

impl HeroSlideInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("title", &self.title)?;
        if self.position < 0 {
            return Err(CoreError::invalid("position", "must not be negative"));
        }
        // A button without a target (or the reverse) renders as a dead control.
        if self.button_text.is_some() != self.button_link.is_some() {
            return Err(CoreError::invalid(
                "button_link",
                "button_text and button_link must be provided together",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequestInput {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: String,
}

impl ContactRequestInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        validate_email(&self.email)?;
        require("message", &self.message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterInput {
    pub email: String,
}

impl NewsletterInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_email(&self.email)
    }
}
