//! Marks Module
//!
//! Idempotent "marked item" collections: a client marks an external catalog
//! item (a movie or a series) as a favorite or as watched, lists its marks,
//! and unmarks them.
//!
//! # Collections
//!
//! - [`Collection::Favorites`] backed by `favorite_items`
//! - [`Collection::Watched`] backed by `watched_items`
//!
//! Both share one store implementation. Within a collection an
//! `external_id` appears at most once, whatever its category; marking it
//! again returns the stored mark unchanged.
//!
//! # Usage
//!
//! ```rust,ignore
//! use movieworld::marks::{self, Collection, MarkStore};
//!
//! let app = Router::new()
//!     .nest("/favorites", marks::routes(Collection::Favorites))
//!     .nest("/watched", marks::routes(Collection::Watched))
//!     .with_state(app_state);
//!
//! let conn = db.connect().await?;
//! let store = MarkStore::new(&conn, Collection::Favorites);
//! let mark = store.mark(new_mark).await?;
//! ```

mod handler;
mod routes;
mod store;
mod validate;

pub use routes::routes;
pub use store::*;
pub use validate::*;

/// Schema for both collection tables, applied at startup.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[("marks_001_schema.sql", include_str!("migrations/001_schema.sql"))]
}
