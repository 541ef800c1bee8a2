//! # GridVault Content Crate
//!
//! Turns repository reads into something a page can always render. A list
//! read that fails, or that comes back empty, is answered from the static
//! catalog instead, and the substitution is logged once.
//!
//! - `resolve` / `Resolved`: the composition of a live fetch with a fallback.
//! - `catalog`: the hand-authored records used when the store has nothing.
//! - `SiteContent`: one resolved list read per public collection.

pub mod catalog;
pub mod resolver;
pub mod site;

pub use resolver::{resolve, Resolved};
pub use site::SiteContent;
