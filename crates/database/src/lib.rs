//! # GridVault Database Crate
//!
//! This crate is the only place that talks to PostgreSQL. It owns three things:
//!
//! - **Schema reconciliation:** tables are declared in code (`schema::descriptors`)
//!   and created or extended at runtime by the `SchemaEngine`. Columns are only
//!   ever added, never altered or dropped.
//! - **Data access:** `DbRepository` exposes one read-all / read-by-key pair per
//!   content entity, the public form writes, and the admin CRUD operations.
//! - **The connection pool:** one lazily-connecting `PgPool` per process,
//!   handed to the repository explicitly.
//!
//! Nothing here falls back to static content. Callers that need a page to
//! render regardless of store health compose these functions with the
//! `content` crate's resolver.
//!
//! ## Public API
//!
//! - `shared_pool` / `connect_lazy` / `connect`: pool construction.
//! - `DbRepository`: all data access methods.
//! - `SchemaEngine`, `EntityDescriptor`: reconciliation and table declarations.
//! - `DbError`: the error type returned from this crate.

// Declare the modules that constitute this crate.
pub mod admin;
pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_lazy, shared_pool};
pub use error::DbError;
pub use repository::{DbRepository, PageDetails, ProductDetails};
pub use schema::{EntityDescriptor, Reconciliation, SchemaEngine};
