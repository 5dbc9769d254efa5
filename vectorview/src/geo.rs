//! Geographic types shared across the viewer core.
//!
//! Provides the Web Mercator valid ranges, a lon/lat bounding box, and the
//! fit-to-bounds zoom computation used for the initial viewport.

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom levels the viewer will request
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 22;

/// Errors that can occur when validating geographic values.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Latitude is outside valid range (-85.05112878 to 85.05112878)
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// Bounds are inverted (min greater than max)
    InvertedBounds,
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            GeoError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
            GeoError::InvertedBounds => write!(f, "Bounds are inverted (min > max)"),
        }
    }
}

impl std::error::Error for GeoError {}

/// Geographic bounding box in degrees.
///
/// Carried by archive headers and used to compute the initial camera fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Western edge
    pub min_lon: f64,
    /// Southern edge
    pub min_lat: f64,
    /// Eastern edge
    pub max_lon: f64,
    /// Northern edge
    pub max_lat: f64,
}

impl Bounds {
    /// Create bounds, validating ranges and orientation.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, GeoError> {
        for lon in [min_lon, max_lon] {
            if !(MIN_LON..=MAX_LON).contains(&lon) {
                return Err(GeoError::InvalidLongitude(lon));
            }
        }
        for lat in [min_lat, max_lat] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(GeoError::InvalidLatitude(lat));
            }
        }
        if min_lon > max_lon || min_lat > max_lat {
            return Err(GeoError::InvertedBounds);
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Bounds covering the whole Web Mercator world.
    pub fn world() -> Self {
        Self {
            min_lon: MIN_LON,
            min_lat: MIN_LAT,
            max_lon: MAX_LON,
            max_lat: MAX_LAT,
        }
    }

    /// Center point as (lon, lat).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Whether a point lies inside (edges inclusive).
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

/// Latitude clamped into the Web Mercator valid range.
#[inline]
fn mercator_lat(lat: f64) -> f64 {
    lat.clamp(MIN_LAT, MAX_LAT)
}

/// Project latitude to Web Mercator Y in [0, 1], 0 at the north edge.
#[inline]
fn lat_to_unit_y(lat: f64) -> f64 {
    let rad = mercator_lat(lat).to_radians();
    let y = (rad.tan() + 1.0 / rad.cos()).ln();
    (1.0 - y / std::f64::consts::PI) / 2.0
}

/// Project longitude to Web Mercator X in [0, 1], 0 at the west edge.
#[inline]
fn lon_to_unit_x(lon: f64) -> f64 {
    (lon + 180.0) / 360.0
}

/// Camera placement that fits a bounding box into a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFit {
    /// Center longitude
    pub lon: f64,
    /// Center latitude
    pub lat: f64,
    /// Integer zoom level
    pub zoom: u8,
}

/// Compute the camera fit for `bounds` in a viewport of `width` x `height`
/// pixels, assuming 256 px tiles.
///
/// Picks the largest integer zoom at which the projected bounds still fit
/// both viewport dimensions, clamped to the viewer's zoom range. Degenerate
/// (point) bounds fit at the maximum zoom.
pub fn fit_bounds(bounds: &Bounds, width: u32, height: u32) -> CameraFit {
    let (lon, lat) = bounds.center();

    let span_x = lon_to_unit_x(bounds.max_lon) - lon_to_unit_x(bounds.min_lon);
    let span_y = lat_to_unit_y(bounds.min_lat) - lat_to_unit_y(bounds.max_lat);

    let mut zoom = MAX_ZOOM;
    for z in MIN_ZOOM..=MAX_ZOOM {
        let world_px = 256.0 * f64::from(1u32 << z.min(22));
        if span_x * world_px > f64::from(width) || span_y * world_px > f64::from(height) {
            zoom = z.saturating_sub(1);
            break;
        }
    }

    CameraFit { lon, lat, zoom }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_validation_rejects_bad_longitude() {
        let result = Bounds::new(-181.0, 0.0, 10.0, 10.0);
        assert_eq!(result, Err(GeoError::InvalidLongitude(-181.0)));
    }

    #[test]
    fn bounds_validation_rejects_inverted() {
        let result = Bounds::new(10.0, 10.0, -10.0, 20.0);
        assert_eq!(result, Err(GeoError::InvertedBounds));
    }

    #[test]
    fn bounds_center_is_midpoint() {
        let bounds = Bounds::new(10.0, -20.0, 30.0, 40.0).unwrap();
        assert_eq!(bounds.center(), (20.0, 10.0));
    }

    #[test]
    fn bounds_contains_edges() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(bounds.contains(0.0, 0.0));
        assert!(bounds.contains(10.0, 10.0));
        assert!(!bounds.contains(10.1, 5.0));
    }

    #[test]
    fn fit_world_bounds_is_low_zoom() {
        let fit = fit_bounds(&Bounds::world(), 512, 512);
        assert!(fit.zoom <= 1, "world should fit at zoom 0-1, got {}", fit.zoom);
        assert_eq!(fit.lon, 0.0);
    }

    #[test]
    fn fit_small_bounds_is_high_zoom() {
        let bounds = Bounds::new(15.29, -4.34, 15.32, -4.31).unwrap();
        let fit = fit_bounds(&bounds, 1024, 768);
        assert!(fit.zoom >= 10, "city block should fit deep, got {}", fit.zoom);
        assert!(bounds.contains(fit.lon, fit.lat));
    }

    #[test]
    fn fit_degenerate_bounds_clamps_to_max_zoom() {
        let bounds = Bounds::new(15.3, -4.3, 15.3, -4.3).unwrap();
        let fit = fit_bounds(&bounds, 800, 600);
        assert_eq!(fit.zoom, MAX_ZOOM);
    }

    #[test]
    fn error_display_mentions_value() {
        let msg = GeoError::InvalidLatitude(99.0).to_string();
        assert!(msg.contains("99"));
    }
}
