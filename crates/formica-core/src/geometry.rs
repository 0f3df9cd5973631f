//! Geometry: positions, home-relative coordinates, distances and bearings.
//!
//! The host reports absolute positions. Agents never exchange those: every
//! location that goes into memory or onto the wire is an integer offset
//! from the colony's home, so that all members of the colony agree on it.
//!
//! Bearings follow the host's turn primitive: `0°` points along +x and
//! angles grow toward +y, normalized into `[0, 360)`.

use serde::{Deserialize, Serialize};

/// An absolute position as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Integer distance between two absolute positions, truncated toward zero.
pub fn distance_between(a: &Position, b: &Position) -> u32 {
    a.distance_to(b) as u32
}

/// An integer offset from the home reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RelativeCoordinate {
    pub x: i32,
    pub y: i32,
}

impl RelativeCoordinate {
    /// The home itself.
    pub const ORIGIN: RelativeCoordinate = RelativeCoordinate { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate of `position` relative to `home`, rounded to the
    /// nearest integer on each axis.
    pub fn between(home: &Position, position: &Position) -> Self {
        Self {
            x: (position.x - home.x).round() as i32,
            y: (position.y - home.y).round() as i32,
        }
    }

    /// Integer Euclidean distance, truncated toward zero.
    pub fn distance_to(&self, other: &RelativeCoordinate) -> u32 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy) as u32
    }

    /// Bearing from `self` toward `other` in whole degrees, or `None` when
    /// both coordinates coincide.
    pub fn bearing_to(&self, other: &RelativeCoordinate) -> Option<u16> {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        let degrees = dy.atan2(dx).to_degrees().rem_euclid(360.0);
        Some((degrees as u16) % 360)
    }

    /// Polar form of this coordinate as seen from home.
    pub fn to_polar(&self) -> PolarCoordinate {
        let distance = RelativeCoordinate::ORIGIN.distance_to(self);
        let bearing = RelativeCoordinate::ORIGIN.bearing_to(self).unwrap_or(0);
        PolarCoordinate { distance, bearing }
    }
}

impl From<PolarCoordinate> for RelativeCoordinate {
    fn from(polar: PolarCoordinate) -> Self {
        let radians = f64::from(polar.bearing).to_radians();
        let distance = f64::from(polar.distance);
        Self {
            x: (distance * radians.cos()).round() as i32,
            y: (distance * radians.sin()).round() as i32,
        }
    }
}

/// Distance and bearing from home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolarCoordinate {
    pub distance: u32,
    /// Degrees in `[0, 360)`.
    pub bearing: u16,
}

impl PolarCoordinate {
    /// Normalizes its inputs: negative distances clamp to zero and the
    /// bearing wraps into `[0, 360)`.
    pub fn new(distance: i32, bearing: i32) -> Self {
        Self {
            distance: distance.max(0) as u32,
            bearing: bearing.rem_euclid(360) as u16,
        }
    }
}

/// A turn-and-advance movement vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Degrees in `[0, 360)`.
    pub bearing: u16,
    pub distance: u32,
}

impl Heading {
    /// The vector leading from `from` to `to`. Coinciding points produce no
    /// heading at all.
    pub fn toward(from: &RelativeCoordinate, to: &RelativeCoordinate) -> Option<Heading> {
        let bearing = from.bearing_to(to)?;
        let distance = from.distance_to(to);
        if distance == 0 {
            return None;
        }
        Some(Heading { bearing, distance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_coordinate_rounds_offset_from_home() {
        let home = Position::new(100.0, 200.0);
        let item = Position::new(150.4, 139.6);
        assert_eq!(RelativeCoordinate::between(&home, &item), RelativeCoordinate::new(50, -60));
    }

    #[test]
    fn distance_is_truncated() {
        let a = RelativeCoordinate::new(0, 0);
        let b = RelativeCoordinate::new(3, 4);
        assert_eq!(a.distance_to(&b), 5);
        // sqrt(2) = 1.41...
        assert_eq!(a.distance_to(&RelativeCoordinate::new(1, 1)), 1);
    }

    #[test]
    fn bearings_cover_all_quadrants() {
        let o = RelativeCoordinate::ORIGIN;
        assert_eq!(o.bearing_to(&RelativeCoordinate::new(10, 0)), Some(0));
        assert_eq!(o.bearing_to(&RelativeCoordinate::new(0, 10)), Some(90));
        assert_eq!(o.bearing_to(&RelativeCoordinate::new(-10, 0)), Some(180));
        assert_eq!(o.bearing_to(&RelativeCoordinate::new(0, -10)), Some(270));
        assert_eq!(o.bearing_to(&RelativeCoordinate::new(-10, -10)), Some(225));
        assert_eq!(o.bearing_to(&RelativeCoordinate::new(-10, 10)), Some(135));
    }

    #[test]
    fn zero_delta_has_no_bearing_or_heading() {
        let p = RelativeCoordinate::new(7, -3);
        assert_eq!(p.bearing_to(&p), None);
        assert_eq!(Heading::toward(&p, &p), None);
    }

    #[test]
    fn heading_points_from_observer_to_target() {
        let from = RelativeCoordinate::new(10, 10);
        let to = RelativeCoordinate::new(10, -30);
        assert_eq!(
            Heading::toward(&from, &to),
            Some(Heading { bearing: 270, distance: 40 })
        );
    }

    #[test]
    fn polar_normalizes_inputs() {
        let polar = PolarCoordinate::new(-5, -90);
        assert_eq!(polar.distance, 0);
        assert_eq!(polar.bearing, 270);
        assert_eq!(PolarCoordinate::new(10, 725).bearing, 5);
    }

    #[test]
    fn polar_conversion_recovers_coordinate() {
        let coordinate = RelativeCoordinate::new(0, -250);
        let polar = coordinate.to_polar();
        assert_eq!(polar, PolarCoordinate { distance: 250, bearing: 270 });
        assert_eq!(RelativeCoordinate::from(polar), coordinate);
    }
}
