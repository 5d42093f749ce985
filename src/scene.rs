pub(crate) mod color;
/// Wire document and scene loading.
pub mod document;
/// Typed layer records.
pub mod layer;
pub(crate) mod payload;
