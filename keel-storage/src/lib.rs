//! # Keel Storage
//!
//! A thin convenience layer over sea-orm: a named-engine registry with
//! explicit lifecycle, a count-aware pagination helper, and a repository
//! base that binds to a named engine at construction time.
//!
//! The pagination helper derives the `total` for a page by stripping
//! ordering and limits from the base select and counting over a subquery
//! wrap, which stays correct for joined and grouped queries.

pub mod error;
pub mod manager;
pub mod paginate;
pub mod repository;
pub mod schema;

pub use error::StorageError;
pub use manager::{DbManager, EngineConfig, DEFAULT_ENGINE};
pub use paginate::{paginate, paginate_into, paginate_map};
pub use repository::SqlRepository;
pub use schema::create_table;
