//! Map-tapped candidate locations for a lost-item query

use finders_core::{Coordinate, Error, Result};
use tracing::debug;

/// Most locations a user may mark for one query
pub const MAX_LOCATIONS: usize = 3;

/// Accumulates up to three map coordinates in tap order.
///
/// Tapping the map adds a point; tapping an existing marker removes it
/// by index, and later markers shift down by one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPicker {
    points: Vec<Coordinate>,
}

impl LocationPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, returning its index.
    ///
    /// Fails with `CapacityExceeded` once three points are held; the
    /// sequence is left untouched in that case.
    pub fn add_point(&mut self, coord: Coordinate) -> Result<usize> {
        if self.points.len() >= MAX_LOCATIONS {
            debug!("Rejected location {}: already holding {}", coord, MAX_LOCATIONS);
            return Err(Error::CapacityExceeded { max: MAX_LOCATIONS });
        }
        if !coord.is_valid() {
            return Err(Error::InvalidData(format!("coordinate out of range: {}", coord)));
        }

        self.points.push(coord);
        Ok(self.points.len() - 1)
    }

    /// Remove the point at `index`; out-of-range indices are ignored
    pub fn remove_point(&mut self, index: usize) -> Option<Coordinate> {
        if index < self.points.len() {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= MAX_LOCATIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    #[test]
    fn test_fourth_point_is_rejected() {
        let mut picker = LocationPicker::new();
        for i in 0..3 {
            assert_eq!(picker.add_point(c(35.0 + i as f64 * 0.001, 135.78)).unwrap(), i);
        }

        let err = picker.add_point(c(35.1, 135.7)).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { max: 3 }));
        assert_eq!(picker.len(), 3);
        assert!(picker.is_full());
    }

    #[test]
    fn test_remove_shifts_later_points() {
        let mut picker = LocationPicker::new();
        picker.add_point(c(1.0, 1.0)).unwrap();
        picker.add_point(c(2.0, 2.0)).unwrap();
        picker.add_point(c(3.0, 3.0)).unwrap();

        assert_eq!(picker.remove_point(1), Some(c(2.0, 2.0)));
        assert_eq!(picker.points(), &[c(1.0, 1.0), c(3.0, 3.0)]);
    }

    #[test]
    fn test_remove_invalid_index_is_noop() {
        let mut picker = LocationPicker::new();
        picker.add_point(c(1.0, 1.0)).unwrap();
        assert_eq!(picker.remove_point(5), None);
        assert_eq!(picker.len(), 1);
    }

    #[test]
    fn test_room_again_after_removal() {
        let mut picker = LocationPicker::new();
        for i in 0..3 {
            picker.add_point(c(i as f64, 0.0)).unwrap();
        }
        picker.remove_point(0);
        assert_eq!(picker.add_point(c(9.0, 9.0)).unwrap(), 2);
        picker.clear();
        assert!(picker.is_empty());
    }

    #[test]
    fn test_out_of_range_coordinate() {
        let mut picker = LocationPicker::new();
        assert!(matches!(picker.add_point(c(120.0, 0.0)), Err(Error::InvalidData(_))));
        assert!(picker.is_empty());
    }
}
