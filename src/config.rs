use crate::error::{Error, Result};
use crate::poisson::{grid_extent, poisson_disk_sampling, MAX_GRID_CELLS};
use crate::raster::{rasterize, PointRaster};

/// Largest image [`GeneratorConfig::render`] will allocate.
pub const MAX_IMAGE_PIXELS: usize = 1 << 28;

/// Parameters for one starfield generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub width: f64,
    pub height: f64,
    pub seed: u32,
    pub min_distance: f64,
    /// Candidates tried around an active sample before it is retired.
    pub k: u32,
    /// Half-length of a star's arms, in pixels.
    pub marker_size: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 512.0,
            height: 512.0,
            seed: 0,
            min_distance: 20.0,
            k: 30,
            marker_size: 1.0,
        }
    }
}

impl GeneratorConfig {
    /// Rejects inputs the sampler would loop on or misbehave with.
    pub fn validate(&self) -> Result<()> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;

        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(Error::InvalidMinDistance(self.min_distance));
        }
        if self.k == 0 {
            return Err(Error::InvalidAttempts(self.k));
        }
        if !self.marker_size.is_finite() || self.marker_size < 0.0 {
            return Err(Error::InvalidMarkerSize(self.marker_size));
        }

        let (columns, rows) = grid_extent(self.width, self.height, self.min_distance);
        if columns * rows > MAX_GRID_CELLS as f64 {
            return Err(Error::GridTooLarge {
                columns,
                rows,
                limit: MAX_GRID_CELLS,
            });
        }

        let (width, height) = (self.width.ceil(), self.height.ceil());
        if width * height > MAX_IMAGE_PIXELS as f64 {
            return Err(Error::ImageTooLarge {
                width,
                height,
                limit: MAX_IMAGE_PIXELS,
            });
        }
        Ok(())
    }

    /// Flat `[x0, y0, x1, y1, ...]` sample list.
    pub fn sample(&self) -> Result<Vec<f64>> {
        self.validate()?;
        Ok(poisson_disk_sampling(
            self.width,
            self.height,
            self.seed,
            self.min_distance,
            self.k,
        ))
    }

    /// Pixel size covering the whole domain. Only meaningful once
    /// [`validate`](Self::validate) has passed.
    pub fn image_size(&self) -> (u32, u32) {
        (self.width.ceil() as u32, self.height.ceil() as u32)
    }

    pub fn render(&self, points: &[f64]) -> Result<PointRaster> {
        self.validate()?;
        let (width, height) = self.image_size();
        Ok(rasterize(points, width, height, self.marker_size))
    }
}

fn check_dimension(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDimension { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_dimensions() {
        let config = GeneratorConfig {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidDimension { name: "width", .. })
        ));

        let config = GeneratorConfig {
            height: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidDimension { name: "height", .. })
        ));
    }

    #[test]
    fn rejects_bad_min_distance() {
        let config = GeneratorConfig {
            min_distance: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidMinDistance(_))));

        let config = GeneratorConfig {
            min_distance: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidMinDistance(_))));
    }

    #[test]
    fn rejects_zero_attempts() {
        let config = GeneratorConfig {
            k: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidAttempts(0))));
    }

    #[test]
    fn rejects_negative_marker() {
        let config = GeneratorConfig {
            marker_size: -0.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidMarkerSize(_))));
    }

    #[test]
    fn rejects_domains_too_large_to_grid() {
        let config = GeneratorConfig {
            width: 1e300,
            height: 1e300,
            min_distance: 1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::GridTooLarge { .. })));
        assert!(matches!(config.sample(), Err(Error::GridTooLarge { .. })));
        assert!(config.render(&[]).is_err());
    }

    #[test]
    fn rejects_images_too_large_to_allocate() {
        // a coarse grid but a huge canvas
        let config = GeneratorConfig {
            width: 1e6,
            height: 1e6,
            min_distance: 1e4,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ImageTooLarge { .. })));
        assert!(matches!(config.render(&[]), Err(Error::ImageTooLarge { .. })));
    }

    #[test]
    fn accepts_large_bounded_domain() {
        // 11586 x 11586 grid cells and 8192 x 8192 pixels, both under the caps
        let config = GeneratorConfig {
            width: 8192.0,
            height: 8192.0,
            min_distance: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sample_refuses_invalid_config() {
        let config = GeneratorConfig {
            k: 0,
            ..Default::default()
        };
        assert!(config.sample().is_err());
    }

    #[test]
    fn render_covers_fractional_domain() {
        let config = GeneratorConfig {
            width: 100.5,
            height: 40.2,
            min_distance: 10.0,
            ..Default::default()
        };
        let points = config.sample().unwrap();
        let raster = config.render(&points).unwrap();
        assert_eq!((raster.width(), raster.height()), (101, 41));
        assert!(raster.lit_pixels() >= points.len() / 2);
    }
}
