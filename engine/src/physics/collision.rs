//! Collision shapes for point-sampled intersection tests
//!
//! Bodies never carry analytic collision geometry. Instead a single
//! [`CollisionShape`] is shared by every pair tested in one step: its sample
//! points (vertices of a reference mesh in the unit frame) are pushed through
//! one body's drawn transform into another body's unit frame and checked
//! against a unit sphere or unit cube, inflated by a leeway margin.
//!
//! A finer sample mesh is more accurate and proportionally more expensive.
//!
//! # Example
//!
//! ```ignore
//! use rasengan_engine::physics::collision::{ColliderSet, CollisionShape, IntersectTest};
//! use glam::Vec3;
//!
//! let shape = CollisionShape::sphere(1, 0.5);
//! assert!(shape.contains(Vec3::ZERO));
//!
//! let mut colliders = ColliderSet::standard();
//! colliders.next();
//! assert_eq!(colliders.selected(), 1);
//! ```

use std::collections::HashMap;

use super::error::PhysicsError;
use super::types::Vec3;

// =============================================================================
// Intersection predicates
// =============================================================================

/// Analytic test volume a sample point is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectTest {
    /// Unit sphere at the origin: inside iff `p·p < 1 + margin`.
    Sphere,
    /// Unit cube at the origin: inside iff every `|p_i| <= 1 + margin`.
    Cube,
}

impl IntersectTest {
    /// Returns true if `point` lies inside the unit volume grown by `margin`.
    pub fn contains(self, point: Vec3, margin: f32) -> bool {
        match self {
            Self::Sphere => point.dot(point) < 1.0 + margin,
            Self::Cube => point.abs().max_element() <= 1.0 + margin,
        }
    }
}

// =============================================================================
// CollisionShape
// =============================================================================

/// A point-sampling test: predicate, sample points and leeway.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionShape {
    /// Volume the transformed points are tested against
    pub test: IntersectTest,
    /// Sample points in the unit frame
    points: Vec<Vec3>,
    /// Margin added to the unit volume (never negative)
    pub leeway: f32,
}

impl CollisionShape {
    /// Creates a shape from explicit sample points.
    ///
    /// Negative leeway is clamped to zero.
    pub fn new(test: IntersectTest, points: Vec<Vec3>, leeway: f32) -> Self {
        Self {
            test,
            points,
            leeway: leeway.max(0.0),
        }
    }

    /// Sphere test sampled at the vertices of a subdivided tetrahedron.
    pub fn sphere(subdivisions: u32, leeway: f32) -> Self {
        Self::new(IntersectTest::Sphere, subdivision_sphere(subdivisions), leeway)
    }

    /// Cube test sampled at the eight unit cube corners.
    pub fn cube(leeway: f32) -> Self {
        Self::new(IntersectTest::Cube, cube_corners(), leeway)
    }

    /// Sample points in the unit frame.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Tests a single point using this shape's predicate and leeway.
    pub fn contains(&self, point: Vec3) -> bool {
        self.test.contains(point, self.leeway)
    }
}

// =============================================================================
// Sample meshes
// =============================================================================

/// Seed tetrahedron for the subdivision sphere.
const TETRAHEDRON: [Vec3; 4] = [
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(0.0, 0.9428, 0.3333),
    Vec3::new(-0.8165, -0.4714, 0.3333),
    Vec3::new(0.8165, -0.4714, 0.3333),
];

/// Vertices of a unit sphere built by repeatedly splitting each triangle of a
/// tetrahedron into four and projecting the new edge midpoints onto the sphere.
///
/// Shared edges produce one midpoint, so the point count is
/// 4, 10, 34, 130, ... for 0, 1, 2, 3 subdivisions.
pub fn subdivision_sphere(subdivisions: u32) -> Vec<Vec3> {
    let mut vertices: Vec<Vec3> = TETRAHEDRON.iter().map(|v| v.normalize()).collect();
    let mut triangles: Vec<[usize; 3]> = vec![[0, 1, 2], [3, 2, 1], [1, 0, 3], [0, 2, 3]];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut next = Vec::with_capacity(triangles.len() * 4);

        for [a, b, c] in triangles {
            let ab = midpoint(&mut vertices, &mut midpoints, a, b);
            let bc = midpoint(&mut vertices, &mut midpoints, b, c);
            let ac = midpoint(&mut vertices, &mut midpoints, a, c);
            next.extend([[a, ab, ac], [ab, b, bc], [ac, bc, c], [ab, bc, ac]]);
        }

        triangles = next;
    }

    vertices
}

fn midpoint(
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(usize, usize), usize>,
    a: usize,
    b: usize,
) -> usize {
    *cache.entry((a.min(b), a.max(b))).or_insert_with(|| {
        let point = ((vertices[a] + vertices[b]) * 0.5).normalize();
        vertices.push(point);
        vertices.len() - 1
    })
}

/// The eight corners of the cube spanning `[-1, 1]` on every axis.
pub fn cube_corners() -> Vec<Vec3> {
    let mut corners = Vec::with_capacity(8);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                corners.push(Vec3::new(x, y, z));
            }
        }
    }
    corners
}

// =============================================================================
// ColliderSet - the fixed choice of shapes a world tests with
// =============================================================================

/// A small fixed set of collision shapes with one selected for all pair tests.
#[derive(Debug, Clone)]
pub struct ColliderSet {
    shapes: Vec<CollisionShape>,
    selected: usize,
}

impl ColliderSet {
    /// Coarse sphere, fine sphere and cube, coarse sphere selected.
    pub fn standard() -> Self {
        Self {
            shapes: vec![
                CollisionShape::sphere(1, 0.5),
                CollisionShape::sphere(2, 0.3),
                CollisionShape::cube(0.1),
            ],
            selected: 0,
        }
    }

    /// Number of shapes in the set.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if the set holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Index of the selected shape.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The shape used for every pair test.
    pub fn active(&self) -> &CollisionShape {
        &self.shapes[self.selected]
    }

    /// Selects a shape by index.
    pub fn select(&mut self, index: usize) -> Result<(), PhysicsError> {
        if index >= self.shapes.len() {
            return Err(PhysicsError::UnknownCollider {
                index,
                available: self.shapes.len(),
            });
        }
        self.selected = index;
        Ok(())
    }

    /// Cycles to the next shape, wrapping around.
    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.shapes.len();
    }

    /// Cycles to the previous shape, wrapping around.
    pub fn previous(&mut self) {
        self.selected = (self.selected + self.shapes.len() - 1) % self.shapes.len();
    }
}

impl Default for ColliderSet {
    fn default() -> Self {
        Self::standard()
    }
}
