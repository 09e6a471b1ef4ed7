//! Location of a photographed subject
//!
//! A [`Location`] holds exactly one [`Coordinate`]. It is the point where the
//! rest of the photo model (photos, cars, persistence) attaches to the
//! coordinate types.

use serde::{Deserialize, Serialize};

use crate::coordinates::Coordinate;
use crate::validation::require_not_null;
use crate::Result;

/// A position in a coordinate system, identified by its coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    coordinate: Coordinate,
}

impl Location {
    /// Creates a location at `coordinate`
    ///
    /// # Errors
    ///
    /// [`ContractViolation::NullValue`](crate::ContractViolation::NullValue)
    /// when `coordinate` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wahlzeit_coordinates::{Coordinate, Location};
    ///
    /// let here = Coordinate::cartesian(1.23, 2.34, 3.45).unwrap();
    /// let location = Location::new(here.clone()).unwrap();
    /// assert!(Coordinate::ptr_eq(location.coordinate(), &here));
    ///
    /// assert!(Location::new(None).is_err());
    /// ```
    pub fn new(coordinate: impl Into<Option<Coordinate>>) -> Result<Self> {
        let coordinate = require_not_null(coordinate.into(), "location coordinate")?;
        Ok(Location { coordinate })
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Moves the location to `coordinate`
    ///
    /// The location is left unchanged when `coordinate` is `None`.
    pub fn set_coordinate(&mut self, coordinate: impl Into<Option<Coordinate>>) -> Result<()> {
        self.coordinate = require_not_null(coordinate.into(), "location coordinate")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContractViolation;

    fn coordinate() -> Coordinate {
        Coordinate::cartesian(1.23, 2.34, 3.45).unwrap()
    }

    #[test]
    fn test_new_rejects_none() {
        assert_eq!(
            Location::new(None),
            Err(ContractViolation::NullValue {
                context: "location coordinate"
            })
        );
    }

    #[test]
    fn test_new_holds_coordinate_instance() {
        let c = coordinate();
        let location = Location::new(c.clone()).unwrap();
        assert!(Coordinate::ptr_eq(location.coordinate(), &c));
    }

    #[test]
    fn test_set_coordinate() {
        let mut location = Location::new(coordinate()).unwrap();
        let moved = Coordinate::spheric(0.1, 0.2, 0.3).unwrap();

        location.set_coordinate(moved.clone()).unwrap();
        assert!(Coordinate::ptr_eq(location.coordinate(), &moved));
    }

    #[test]
    fn test_set_coordinate_rejects_none() {
        let mut location = Location::new(coordinate()).unwrap();
        assert!(location.set_coordinate(None).is_err());
        assert!(Coordinate::ptr_eq(location.coordinate(), &coordinate()));
    }

    #[test]
    fn test_serde_round_trip_keeps_sharing() {
        let location = Location::new(coordinate()).unwrap();
        let json = serde_json::to_string(&location).unwrap();
        assert_eq!(
            json,
            r#"{"coordinate":{"cartesian":{"x":1.23,"y":2.34,"z":3.45}}}"#
        );

        let parsed: Location = serde_json::from_str(&json).unwrap();
        assert!(Coordinate::ptr_eq(parsed.coordinate(), location.coordinate()));
    }

    #[test]
    fn test_deserialize_rejects_missing_coordinate() {
        assert!(serde_json::from_str::<Location>(r#"{"coordinate":null}"#).is_err());
        assert!(serde_json::from_str::<Location>(r#"{}"#).is_err());
    }
}
