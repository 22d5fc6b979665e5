use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{GeoPoint, Position};

/// The drawable area. Origin at the top-left, y grows downwards. Only built through `new`, so the
/// padding always fits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    width: f64,
    height: f64,
    padding: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, padding: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "viewport must have positive size, not {width}x{height}"
            )));
        }
        if !(padding >= 0.0) || 2.0 * padding > width || 2.0 * padding > height {
            return Err(Error::InvalidArgument(format!(
                "padding {padding} doesn't fit in a {width}x{height} viewport"
            )));
        }
        Ok(Self {
            width,
            height,
            padding,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPt {
    pub x: f64,
    pub y: f64,
}

/// How to pick the bounding box that gets stretched over the viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsMode {
    /// Every track fills the whole viewport by itself, so overlaid tracks don't share a scale
    PerTrack,
    /// One box covering all tracks, so they line up geographically
    Shared,
}

impl Default for BoundsMode {
    fn default() -> Self {
        BoundsMode::PerTrack
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Starts out inverted, so the first update sets everything
    pub fn new() -> Self {
        Self {
            min_lat: f64::MAX,
            max_lat: f64::MIN,
            min_lon: f64::MAX,
            max_lon: f64::MIN,
        }
    }

    pub fn from_points(points: &[GeoPoint]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InvalidArgument(
                "can't compute bounds of an empty track".to_string(),
            ));
        }
        let mut bounds = Self::new();
        for pt in points {
            bounds.update(pt.longitude, pt.latitude);
        }
        Ok(bounds)
    }

    pub fn update(&mut self, lon: f64, lat: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
    }

    pub fn union(&mut self, other: &GeoBounds) {
        self.update(other.min_lon, other.min_lat);
        self.update(other.max_lon, other.max_lat);
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::new()
    }
}

/// A linear (equirectangular) mapping from longitude/latitude to the viewport. Not a real map
/// projection; distances aren't preserved.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
    bounds: GeoBounds,
    viewport: Viewport,
    scale_x: f64,
    scale_y: f64,
}

impl Transform {
    /// When the box has no width (or height), that scale is 0 and every point lands on the
    /// padding: x = padding, y = height - padding.
    pub fn new(bounds: GeoBounds, viewport: Viewport) -> Self {
        let scale_x = scale(
            viewport.width - 2.0 * viewport.padding,
            bounds.max_lon - bounds.min_lon,
        );
        let scale_y = scale(
            viewport.height - 2.0 * viewport.padding,
            bounds.max_lat - bounds.min_lat,
        );
        Self {
            bounds,
            viewport,
            scale_x,
            scale_y,
        }
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    pub fn apply(&self, lon: f64, lat: f64) -> ScreenPt {
        let x = (lon - self.bounds.min_lon) * self.scale_x + self.viewport.padding;
        let y = self.viewport.height
            - ((lat - self.bounds.min_lat) * self.scale_y + self.viewport.padding);
        ScreenPt { x, y }
    }

    pub fn apply_position(&self, pos: &Position) -> ScreenPt {
        self.apply(pos.longitude, pos.latitude)
    }

    pub fn apply_path(&self, points: &[GeoPoint]) -> Vec<ScreenPt> {
        points
            .iter()
            .map(|pt| self.apply(pt.longitude, pt.latitude))
            .collect()
    }
}

fn scale(screen_extent: f64, geo_extent: f64) -> f64 {
    if geo_extent == 0.0 {
        0.0
    } else {
        screen_extent / geo_extent
    }
}

/// Fits one track's own bounding box into the padded viewport.
pub fn compute_transform(points: &[GeoPoint], viewport: Viewport) -> Result<Transform> {
    Ok(Transform::new(GeoBounds::from_points(points)?, viewport))
}
