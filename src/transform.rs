/// Editor-space to source-space layer mapping.
pub mod mapper;
/// Editor-to-source scale factor resolution.
pub mod scale;
