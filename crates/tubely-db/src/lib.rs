//! Database repositories for data access layer
//!
//! The upload pipeline only needs to read a video record and write it back, so
//! the store is abstracted behind [`VideoRepository`]. The PostgreSQL
//! implementation is used in production; an in-memory one is available with the
//! `test-utils` feature.

#[cfg(feature = "test-utils")]
pub mod memory;
pub mod video;

#[cfg(feature = "test-utils")]
pub use memory::MemoryVideoRepository;
pub use video::{PgVideoRepository, VideoRepository, VideoRow};
