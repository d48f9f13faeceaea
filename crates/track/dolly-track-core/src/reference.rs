//! World transforms and the resolver seam for locked poses.
//!
//! A locked pose stores its value in the local frame of some external object.
//! Hosts implement [`ReferenceResolver`] and hand it to evaluation; the core
//! never keeps a live handle to the object itself.

use std::collections::HashMap;

use nalgebra::{Affine3, Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};

use crate::ids::ReferenceId;

/// Affine world transform of a reference object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldTransform(Affine3<f64>);

impl WorldTransform {
    pub fn identity() -> Self {
        Self(Affine3::identity())
    }

    /// Build from a homogeneous matrix; `None` if it is not an invertible affine map.
    pub fn from_matrix(matrix: Matrix4<f64>) -> Option<Self> {
        let last_row_affine = matrix[(3, 0)] == 0.0
            && matrix[(3, 1)] == 0.0
            && matrix[(3, 2)] == 0.0
            && matrix[(3, 3)] == 1.0;
        if !last_row_affine || matrix.try_inverse().is_none() {
            return None;
        }
        Some(Self(Affine3::from_matrix_unchecked(matrix)))
    }

    pub fn from_isometry(isometry: &Isometry3<f64>) -> Self {
        Self(Affine3::from_matrix_unchecked(isometry.to_homogeneous()))
    }

    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self::from_isometry(&Isometry3::from_parts(
            Translation3::from(translation),
            UnitQuaternion::identity(),
        ))
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix4<f64> {
        self.0.matrix()
    }

    /// Local point -> world point (rotation, scale and translation).
    #[inline]
    pub fn transform_point(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.0.transform_point(&Point3::from(*local)).coords
    }

    /// Local direction -> world direction (no translation).
    #[inline]
    pub fn transform_direction(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.0.transform_vector(local)
    }

    /// World point -> local point.
    #[inline]
    pub fn inverse_transform_point(&self, world: &Vector3<f64>) -> Vector3<f64> {
        self.0.inverse_transform_point(&Point3::from(*world)).coords
    }

    /// World direction -> local direction.
    #[inline]
    pub fn inverse_transform_direction(&self, world: &Vector3<f64>) -> Vector3<f64> {
        self.0.inverse_transform_vector(world)
    }
}

impl From<Isometry3<f64>> for WorldTransform {
    fn from(isometry: Isometry3<f64>) -> Self {
        Self::from_isometry(&isometry)
    }
}

/// Trait for resolving reference ids to their current world transform.
/// Adapters implement this and pass it into evaluation and capture calls.
pub trait ReferenceResolver {
    fn resolve(&self, id: ReferenceId) -> Option<WorldTransform>;
}

impl<F> ReferenceResolver for F
where
    F: Fn(ReferenceId) -> Option<WorldTransform>,
{
    fn resolve(&self, id: ReferenceId) -> Option<WorldTransform> {
        self(id)
    }
}

/// Resolver for hosts without lockable objects; every lookup fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReferences;

impl ReferenceResolver for NoReferences {
    fn resolve(&self, _id: ReferenceId) -> Option<WorldTransform> {
        None
    }
}

/// In-memory id -> transform table.
#[derive(Clone, Debug, Default)]
pub struct ReferenceTable {
    transforms: HashMap<ReferenceId, WorldTransform>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the transform for a reference.
    pub fn upsert(&mut self, id: ReferenceId, transform: WorldTransform) {
        self.transforms.insert(id, transform);
    }

    pub fn get(&self, id: ReferenceId) -> Option<&WorldTransform> {
        self.transforms.get(&id)
    }

    pub fn remove(&mut self, id: ReferenceId) -> Option<WorldTransform> {
        self.transforms.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl ReferenceResolver for ReferenceTable {
    fn resolve(&self, id: ReferenceId) -> Option<WorldTransform> {
        self.transforms.get(&id).copied()
    }
}
