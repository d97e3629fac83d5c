//! Shared type definitions and newtypes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default map center (main campus) used when nothing better is known
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    latitude: 35.0266,
    longitude: 135.7809,
};

/// A point on the map in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Both components are finite and inside the WGS84 range
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// A visible map area: center plus span in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn around(center: Coordinate, delta: f64) -> Self {
        Region {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Server-assigned identifier of a found-item report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned identifier of a submitted lost-item query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(pub i64);

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a local image as returned by the image picker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        ImageRef(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name component of the reference, used as the multipart file name
    pub fn file_name(&self) -> &str {
        self.0
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("image.jpg")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_name() {
        assert_eq!(ImageRef::new("file:///tmp/pics/IMG_0012.jpg").file_name(), "IMG_0012.jpg");
        assert_eq!(ImageRef::new("wallet.png").file_name(), "wallet.png");
        assert_eq!(ImageRef::new("file:///tmp/").file_name(), "image.jpg");
    }

    #[test]
    fn test_coordinate_range() {
        assert!(Coordinate::new(34.99, 135.75).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }
}
