// src/extractors/mod.rs
pub mod fields;
pub mod officers;
pub mod shareholders;
pub mod visura;

// Re-export key extraction types for convenience
pub use fields::{FieldRule, FIELD_RULES};
pub use visura::{extract_visura, ExtractedVisura};
