//! Scene container and closest-hit queries.

use crate::{HitRecord, Hittable, Primitive, Ray};
use prism_math::Interval;
use thiserror::Error;

/// Default maximum number of primitives in a scene.
pub const DEFAULT_SCENE_CAPACITY: usize = 200;

/// Errors that can occur while populating a scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Scene is full: capacity of {capacity} primitives exceeded")]
    CapacityExceeded { capacity: usize },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// An ordered, append-only list of primitives.
///
/// Primitives are tested in insertion order. The capacity is fixed at
/// construction and insertions past it are rejected.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    capacity: usize,
}

impl Scene {
    /// Create an empty scene with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SCENE_CAPACITY)
    }

    /// Create an empty scene holding at most `capacity` primitives.
    ///
    /// The limit is not an allocation; storage grows as primitives are added.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            primitives: Vec::with_capacity(capacity.min(DEFAULT_SCENE_CAPACITY)),
            capacity,
        }
    }

    /// Append a primitive, returning its index.
    pub fn add(&mut self, primitive: impl Into<Primitive>) -> SceneResult<usize> {
        if self.primitives.len() >= self.capacity {
            return Err(SceneError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let index = self.primitives.len();
        self.primitives.push(primitive.into());
        log::debug!("Added primitive {} to scene", index);
        Ok(index)
    }

    /// Find the closest hit along the ray, with the index of the primitive hit.
    ///
    /// Each primitive is tested against `[ray_t.min, closest_so_far)`, so a
    /// later primitive only wins if it is strictly nearer. On equal `t` the
    /// earlier primitive is kept.
    pub fn closest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<(HitRecord, usize)> {
        self.primitives
            .iter()
            .enumerate()
            .fold(None, |closest: Option<(HitRecord, usize)>, (index, primitive)| {
                let closest_so_far = closest.map_or(ray_t.max, |(rec, _)| rec.t);
                match primitive.hit(ray, ray_t.with_max(closest_so_far)) {
                    Some(rec) => Some((rec, index)),
                    None => closest,
                }
            })
    }

    /// Get the primitive at `index`.
    pub fn get(&self, index: usize) -> Option<&Primitive> {
        self.primitives.get(index)
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Maximum number of primitives this scene accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.closest_hit(ray, ray_t).map(|(rec, _)| rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;
    use prism_math::Vec3;

    fn forward() -> Interval {
        Interval::new(0.0, f32::INFINITY)
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(scene.is_empty());
        assert!(scene.closest_hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_nearest_wins_regardless_of_order() {
        let near = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5);
        let far = Sphere::new(Vec3::new(0.0, 0.0, -6.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let mut near_first = Scene::new();
        near_first.add(near).unwrap();
        near_first.add(far).unwrap();

        let mut far_first = Scene::new();
        far_first.add(far).unwrap();
        far_first.add(near).unwrap();

        let (rec_a, index_a) = near_first.closest_hit(&ray, forward()).unwrap();
        let (rec_b, index_b) = far_first.closest_hit(&ray, forward()).unwrap();

        assert!((rec_a.t - 1.5).abs() < 1e-5);
        assert_eq!(rec_a, rec_b);
        assert_eq!(index_a, 0);
        assert_eq!(index_b, 1);
    }

    #[test]
    fn test_equal_t_keeps_first_added() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0);
        let mut scene = Scene::new();
        scene.add(sphere).unwrap();
        scene.add(sphere).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let (_, index) = scene.closest_hit(&ray, forward()).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_interval_upper_bound_culls() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0)).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(scene.hit(&ray, Interval::new(0.0, 5.0)).is_none());
        assert!(scene.hit(&ray, forward()).is_some());
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut scene = Scene::with_capacity(2);
        let sphere = Sphere::new(Vec3::ZERO, 1.0);

        assert_eq!(scene.add(sphere), Ok(0));
        assert_eq!(scene.add(sphere), Ok(1));
        assert_eq!(
            scene.add(sphere),
            Err(SceneError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_huge_capacity_is_only_a_limit() {
        let mut scene = Scene::with_capacity(usize::MAX);
        let index = scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5)).unwrap();

        assert_eq!(index, 0);
        assert_eq!(scene.capacity(), usize::MAX);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(scene.hit(&ray, forward()).is_some());
    }

    #[test]
    fn test_get_returns_inserted_primitive() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let mut scene = Scene::new();
        let index = scene.add(sphere).unwrap();

        assert_eq!(scene.get(index), Some(&Primitive::Sphere(sphere)));
        assert_eq!(scene.get(index + 1), None);
        assert_eq!(scene.capacity(), DEFAULT_SCENE_CAPACITY);
    }
}
