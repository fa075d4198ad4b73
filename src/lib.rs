//! Praxis — backend for a public doctor directory.
//!
//! The API exposes filterable, paginated listings of doctors and
//! specialties. Listing queries are assembled from three pieces: a
//! [`SelectQuery`](orm::SelectQuery) builder, a [`FilterSet`](orm::FilterSet)
//! of caller-supplied predicates, and one of the two paginator styles in
//! [`pagination`].

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod orm;
pub mod pagination;
