pub(crate) mod cpu;
/// Per-layer rendering: native content, resize, flip, rotate.
pub mod layer;
/// Premultiplied RGBA8 buffers.
pub mod raster;
pub(crate) mod resample;
pub(crate) mod shape;
pub(crate) mod text;
