//! Asset upload pipeline
//!
//! One pipeline serves every asset class: authorize → extract → validate →
//! derive key → write → resolve URL → commit. Thumbnails and videos differ only
//! in the [`AssetClass`] passed in.

mod pipeline;
mod types;

pub use pipeline::UploadPipeline;
pub use types::{AssetClass, ExtractedFile};
