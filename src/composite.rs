/// Premultiplied source-over blending.
pub mod blend;
/// Fixed-size output canvas and paint loop.
pub mod canvas;
/// Polygon crop masks.
pub mod crop;
