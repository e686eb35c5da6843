//! PostgreSQL repository implementations.
//!
//! - [`PgLinkRepository`] - Link storage, click counting and search

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
