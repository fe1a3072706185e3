//! Collision / geometry oracle.
//!
//! Движение разделено по осям: сначала X + resolve, потом Y + resolve.
//! Так actor скользит вдоль стены вместо того, чтобы залипнуть.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Spatial queries the simulation needs. Positions are top-left corners in
/// screen space (+y down).
pub trait GeometryOracle {
    fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        a.distance(b)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    fn intersects(&self, a: Rect, b: Rect) -> bool {
        a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
    }

    /// Pushes `body` out of any wall it overlaps along `axis`.
    ///
    /// `direction` is the sign of the movement that produced the overlap.
    /// Returns the corrected min coordinate on that axis, `None` if no wall was hit.
    fn resolve_axis_collision(&self, body: Rect, axis: Axis, direction: i32) -> Option<f32>;
}

/// Axis-aligned walls of the current room.
#[derive(Resource, Debug, Clone, Default)]
pub struct RoomWalls {
    pub walls: Vec<Rect>,
}

impl RoomWalls {
    pub fn new(walls: Vec<Rect>) -> Self {
        Self { walls }
    }

    /// Four walls of `thickness` just outside a `width × height` room.
    pub fn enclosing(width: f32, height: f32, thickness: f32) -> Self {
        Self::new(vec![
            Rect::new(-thickness, -thickness, width + thickness, 0.0),
            Rect::new(-thickness, height, width + thickness, height + thickness),
            Rect::new(-thickness, 0.0, 0.0, height),
            Rect::new(width, 0.0, width + thickness, height),
        ])
    }
}

impl GeometryOracle for RoomWalls {
    fn resolve_axis_collision(&self, body: Rect, axis: Axis, direction: i32) -> Option<f32> {
        let size = body.size();
        let mut resolved = None;
        let mut current = body;

        for wall in &self.walls {
            if !self.intersects(current, *wall) {
                continue;
            }

            // direction == 0: стена наехала на стоящего actor'а, выталкиваем как при движении вперёд
            let min = match (axis, direction < 0) {
                (Axis::X, false) => wall.min.x - size.x,
                (Axis::X, true) => wall.max.x,
                (Axis::Y, false) => wall.min.y - size.y,
                (Axis::Y, true) => wall.max.y,
            };

            current = match axis {
                Axis::X => Rect::from_corners(Vec2::new(min, current.min.y), Vec2::new(min + size.x, current.max.y)),
                Axis::Y => Rect::from_corners(Vec2::new(current.min.x, min), Vec2::new(current.max.x, min + size.y)),
            };
            resolved = Some(min);
        }

        resolved
    }
}

/// Footprint rectangle at top-left `position`.
pub fn footprint(position: Vec2, size: Vec2) -> Rect {
    Rect::from_corners(position, position + size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_is_strict() {
        let walls = RoomWalls::default();
        let a = footprint(Vec2::ZERO, Vec2::splat(10.0));
        let touching = footprint(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let overlapping = footprint(Vec2::new(9.0, 9.0), Vec2::splat(10.0));

        assert!(!walls.intersects(a, touching));
        assert!(walls.intersects(a, overlapping));
    }

    #[test]
    fn test_resolve_pushes_back_against_motion() {
        let walls = RoomWalls::new(vec![Rect::new(100.0, 0.0, 120.0, 500.0)]);

        // шли вправо, залезли в стену на 5px
        let body = footprint(Vec2::new(55.0, 10.0), Vec2::splat(50.0));
        assert_eq!(walls.resolve_axis_collision(body, Axis::X, 1), Some(50.0));

        // шли влево из-за стены
        let body = footprint(Vec2::new(115.0, 10.0), Vec2::splat(50.0));
        assert_eq!(walls.resolve_axis_collision(body, Axis::X, -1), Some(120.0));

        // Y ось не задета
        let body = footprint(Vec2::new(10.0, 10.0), Vec2::splat(50.0));
        assert_eq!(walls.resolve_axis_collision(body, Axis::Y, 1), None);
    }

    #[test]
    fn test_enclosing_walls_stop_at_edges() {
        let walls = RoomWalls::enclosing(1280.0, 960.0, 32.0);
        let body = footprint(Vec2::new(1140.0, 100.0), Vec2::splat(144.0));
        assert_eq!(walls.resolve_axis_collision(body, Axis::X, 1), Some(1136.0));

        let body = footprint(Vec2::new(100.0, -2.0), Vec2::splat(144.0));
        assert_eq!(walls.resolve_axis_collision(body, Axis::Y, -1), Some(0.0));
    }
}
