//! Angle-defined polygon outlines
//!
//! A shape is an ordered list of vertex angles (radians). Placed at a
//! position with a radius and a heading, each angle becomes one vertex on the
//! circle of that radius.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

pub const TRIANGLE: [f32; 3] = [0.0, 3.0 * PI / 4.0, 5.0 * PI / 4.0];
pub const DIAMOND: [f32; 5] = [0.0, 2.0 * PI / 3.0, 5.0 * PI / 6.0, 7.0 * PI / 6.0, 4.0 * PI / 3.0];
pub const PENTAGON: [f32; 5] = [0.0, 2.0 * PI / 5.0, 4.0 * PI / 5.0, 6.0 * PI / 5.0, 8.0 * PI / 5.0];
pub const HEXAGON: [f32; 6] = [
    PI / 6.0,
    PI / 2.0,
    5.0 * PI / 6.0,
    7.0 * PI / 6.0,
    3.0 * PI / 2.0,
    11.0 * PI / 6.0,
];
pub const OCTAGON: [f32; 8] = [
    0.0,
    PI / 4.0,
    PI / 2.0,
    3.0 * PI / 4.0,
    PI,
    5.0 * PI / 4.0,
    3.0 * PI / 2.0,
    7.0 * PI / 4.0,
];

/// Polygon outline as vertex angles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub angles: Vec<f32>,
}

impl Shape {
    pub fn new(angles: &[f32]) -> Self {
        Self {
            angles: angles.to_vec(),
        }
    }

    /// Shape with every vertex nudged by up to ±1/N radians (N = vertex count),
    /// so no two rocks look alike
    pub fn jittered(angles: &[f32], rng: &mut impl Rng) -> Self {
        let spread = 1.0 / angles.len().max(1) as f32;
        Self {
            angles: angles
                .iter()
                .map(|a| a + rng.random_range(-1.0f32..1.0) * spread)
                .collect(),
        }
    }

    /// No outline: drawn as a stroke instead of a polygon
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// World-space vertices for a body at `pos` with `radius`, rotated by `heading`
    pub fn points(&self, pos: Vec2, radius: f32, heading: f32) -> Vec<Vec2> {
        self.angles
            .iter()
            .map(|a| pos + polar_to_cartesian(radius, a + heading))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_points_lie_on_radius() {
        let shape = Shape::new(&OCTAGON);
        let center = Vec2::new(100.0, 50.0);
        let points = shape.points(center, 20.0, 0.3);
        assert_eq!(points.len(), 8);
        for p in points {
            assert!(((p - center).length() - 20.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_heading_rotates_first_vertex() {
        let shape = Shape::new(&TRIANGLE);
        let points = shape.points(Vec2::ZERO, 10.0, PI / 2.0);
        // Nose of the triangle points along the heading
        assert!(points[0].x.abs() < 1e-4);
        assert!((points[0].y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_jitter_stays_within_spread() {
        let mut rng = Pcg32::seed_from_u64(7);
        let shape = Shape::jittered(&OCTAGON, &mut rng);
        for (a, base) in shape.angles.iter().zip(OCTAGON.iter()) {
            assert!((a - base).abs() <= 1.0 / 8.0 + 1e-6);
        }
    }
}
