use rayon::prelude::*;

use crate::composite::blend::mask_in_place;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{LayercastError, LayercastResult};
use crate::foundation::math::clip_origin;
use crate::foundation::warning::ComposeWarning;
use crate::render::raster::Raster;

/// Binary, canvas-sized clip mask built from a crop polygon.
///
/// Coverage is sampled at pixel centers with the even-odd rule, so self-intersecting paths are
/// accepted. Every value is either 0 or 255, which makes applying the same mask twice identical to
/// applying it once.
#[derive(Clone, PartialEq, Eq)]
pub struct CropMask {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl std::fmt::Debug for CropMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CropMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("covered", &self.covered_pixels())
            .finish()
    }
}

/// Warning for a crop path that is present but too short to enclose anything.
pub fn invalid_crop_warning(layer_id: Option<&str>, path: &[Point]) -> Option<ComposeWarning> {
    (1..3).contains(&path.len()).then(|| ComposeWarning::InvalidPolygon {
        layer_id: layer_id.map(str::to_owned),
        vertices: path.len(),
    })
}

impl CropMask {
    /// Rasterize `path` (canvas coordinates) over `canvas`.
    ///
    /// Returns `None` when the path has fewer than 3 vertices; such a crop is a no-op.
    pub fn rasterize(canvas: Canvas, path: &[Point]) -> Option<Self> {
        if path.len() < 3 {
            return None;
        }
        let width = canvas.width as usize;
        let mut coverage = vec![0u8; width * canvas.height as usize];
        coverage
            .par_chunks_mut(width)
            .enumerate()
            .for_each_init(Vec::new, |crossings, (y, row)| {
                fill_row(path, y as f64 + 0.5, row, crossings);
            });
        Some(Self {
            width: canvas.width,
            height: canvas.height,
            coverage,
        })
    }

    /// Mask size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Coverage (0 or 255) at canvas pixel `(x, y)`; 0 outside the canvas.
    pub fn coverage_at(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }

    /// Number of pixels inside the crop region.
    pub fn covered_pixels(&self) -> usize {
        self.coverage.iter().filter(|&&c| c != 0).count()
    }

    /// Clip a layer buffer that will be pasted with its top-left corner at `origin`.
    pub fn apply_to_layer(&self, raster: &mut Raster, origin: Point) {
        let ox = clip_origin(origin.x, self.width, raster.width);
        let oy = clip_origin(origin.y, self.height, raster.height);
        let stride = raster.stride();
        if stride == 0 {
            return;
        }
        raster
            .data
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(ly, row)| {
                let cy = oy + ly as i64;
                for (lx, px) in row.chunks_exact_mut(4).enumerate() {
                    if self.coverage_at(ox + lx as i64, cy) == 0 {
                        px.fill(0);
                    }
                }
            });
    }

    /// Clip a finished canvas-sized composition.
    pub fn apply_to_canvas(&self, raster: &mut Raster) -> LayercastResult<()> {
        if raster.width != self.width || raster.height != self.height {
            return Err(LayercastError::evaluation(format!(
                "crop mask is {}x{} but the canvas is {}x{}",
                self.width, self.height, raster.width, raster.height
            )));
        }
        let stride = raster.stride();
        let width = self.width as usize;
        raster
            .data
            .par_chunks_mut(stride)
            .zip(self.coverage.par_chunks(width))
            .for_each(|(row, mask)| mask_in_place(row, mask));
        Ok(())
    }
}

// Even-odd span fill of one row; a pixel is inside when its center lies between a pair of
// crossings.
fn fill_row(path: &[Point], yc: f64, row: &mut [u8], crossings: &mut Vec<f64>) {
    crossings.clear();
    let n = path.len();
    for i in 0..n {
        let a = path[i];
        let b = path[(i + 1) % n];
        if (a.y <= yc) != (b.y <= yc) {
            crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
        }
    }
    crossings.sort_by(f64::total_cmp);

    let width = row.len() as f64;
    for span in crossings.chunks_exact(2) {
        let start = (span[0] - 0.5).ceil().clamp(0.0, width) as usize;
        let end = (span[1] - 0.5).ceil().clamp(0.0, width) as usize;
        if start < end {
            row[start..end].fill(255);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/crop.rs"]
mod tests;
