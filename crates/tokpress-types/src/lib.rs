#![warn(clippy::pedantic)]

pub mod classification;
pub mod content_type;
pub mod meta;
pub mod preset;
pub mod result;

pub use classification::{Classification, ContentFeatures};
pub use content_type::ContentType;
pub use meta::{PassMeta, PassOutput, Preserved};
pub use preset::Preset;
pub use result::PipelineResult;
