use bitvec::prelude::{bitvec, BitVec};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// One-bit image of star markers on a black background, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointRaster {
    width: u32,
    height: u32,
    mask: BitVec,
}

impl PointRaster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mask: bitvec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.mask[self.index(x, y)]
    }

    pub fn lit_pixels(&self) -> usize {
        self.mask.count_ones()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Stamps a four-armed star centred on `(x, y)`.
    ///
    /// The arms reach `size` along both axes. Between them the body is the
    /// `size` square with a disc of radius `size` carved out of each corner,
    /// which leaves concave edges running tip to tip.
    pub fn draw_star(&mut self, x: f64, y: f64, size: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }

        let reach = size.max(0.5);
        let min_x = (x - reach).floor().max(0.0);
        let min_y = (y - reach).floor().max(0.0);
        let max_x = (x + reach).ceil().min(self.width as f64);
        let max_y = (y + reach).ceil().min(self.height as f64);

        for py in min_y as u32..max_y as u32 {
            for px in min_x as u32..max_x as u32 {
                let dx = (px as f64 + 0.5 - x).abs();
                let dy = (py as f64 + 0.5 - y).abs();
                if star_covers(dx, dy, size) {
                    let index = self.index(px, py);
                    self.mask.set(index, true);
                }
            }
        }

        // The pixel under the point itself, however small the marker.
        if x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64 {
            let index = self.index(x as u32, y as u32);
            self.mask.set(index, true);
        }
    }

    /// 8-bit grayscale, 255 where lit.
    pub fn to_luma8(&self) -> Vec<u8> {
        self.mask
            .iter()
            .map(|bit| if *bit { 255 } else { 0 })
            .collect()
    }

    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let file_writer = BufWriter::new(file);

        let mut encoder = png::Encoder::new(file_writer, self.width, self.height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);

        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.to_luma8())?;
        png_writer.finish()?;

        info!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            lit = self.lit_pixels(),
            "wrote starfield png"
        );
        Ok(())
    }
}

fn star_covers(dx: f64, dy: f64, size: f64) -> bool {
    if dx > size || dy > size {
        return false;
    }
    let on_arm = dx <= 0.5 || dy <= 0.5;
    let cx = size - dx;
    let cy = size - dy;
    on_arm || cx * cx + cy * cy >= size * size
}

/// Draws a star of half-size `marker_size` at every `(x, y)` pair of the flat
/// `points` list. A trailing unpaired value is ignored.
pub fn rasterize(points: &[f64], width: u32, height: u32, marker_size: f64) -> PointRaster {
    let mut raster = PointRaster::new(width, height);
    for pair in points.chunks_exact(2) {
        raster.draw_star(pair[0], pair[1], marker_size);
    }
    raster
}
