//! Ray/sphere intersection for comet targeting.

use glam::Vec3;

/// First intersection of a ray with a sphere, or `None` if the ray misses.
///
/// `direction` must be unit length. An origin inside the sphere yields the
/// exit point; the hit is always at a non-negative ray parameter (no hits
/// behind the origin).
pub fn ray_sphere_intersection(
    origin: Vec3,
    direction: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<Vec3> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let t = if near >= 0.0 { near } else { -b + sqrt_d };
    (t >= 0.0).then(|| origin + direction * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_on_hit() {
        let hit = ray_sphere_intersection(
            Vec3::new(-10.0, 0.0, 0.0),
            Vec3::X,
            Vec3::ZERO,
            2.0,
        )
        .unwrap();
        assert!((hit - Vec3::new(-2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_miss_returns_none() {
        let hit = ray_sphere_intersection(
            Vec3::new(-10.0, 5.0, 0.0),
            Vec3::X,
            Vec3::ZERO,
            2.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_sphere_behind_origin_returns_none() {
        let hit = ray_sphere_intersection(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::X,
            Vec3::ZERO,
            2.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_origin_inside_sphere_yields_exit_point() {
        let hit = ray_sphere_intersection(Vec3::ZERO, Vec3::X, Vec3::ZERO, 2.0).unwrap();
        assert!((hit - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_diagonal_ray_hits_offset_sphere() {
        let direction = Vec3::new(1.0, 1.0, 0.0).normalize();
        let center = Vec3::new(50.0, 50.0, 0.0);
        let hit = ray_sphere_intersection(Vec3::ZERO, direction, center, 5.0).unwrap();
        // Hit lies on the sphere surface, short of the center.
        assert!((hit.distance(center) - 5.0).abs() < 1e-4);
        assert!(hit.length() < center.length());
    }
}
