use serde::{Deserialize, Serialize};

/// Segments shorter than this are treated as degenerate (occluded or
/// collapsed landmarks) and produce no angle.
const MIN_SEGMENT_LEN: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn sub(self, other: Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

/// Interior angle in degrees at vertex `b` formed by the segments `b->a` and
/// `b->c`. Returns `None` when either segment is shorter than
/// `MIN_SEGMENT_LEN`, which would make the cosine numerically unstable.
pub fn joint_angle_deg(a: Point3, b: Point3, c: Point3) -> Option<f64> {
    let ba = a.sub(b);
    let bc = c.sub(b);

    let na = ba.norm();
    let nc = bc.norm();
    if na < MIN_SEGMENT_LEN || nc < MIN_SEGMENT_LEN {
        return None;
    }

    // Rounding can push the cosine slightly outside [-1, 1]; clamp before acos.
    let cos_angle = (ba.dot(bc) / (na * nc)).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_leg_is_180_degrees() {
        let hip = Point3::new(0.0, 0.0, 0.0);
        let knee = Point3::new(0.0, 0.5, 0.0);
        let ankle = Point3::new(0.0, 1.0, 0.0);
        let angle = joint_angle_deg(hip, knee, ankle).unwrap();
        assert!((angle - 180.0).abs() < 1e-6);
    }

    #[test]
    fn right_angle_bend() {
        let hip = Point3::new(0.0, 0.0, 0.0);
        let knee = Point3::new(0.0, 0.5, 0.0);
        let ankle = Point3::new(0.5, 0.5, 0.0);
        let angle = joint_angle_deg(hip, knee, ankle).unwrap();
        assert!((angle - 90.0).abs() < 1e-6);
    }

    #[test]
    fn angle_is_symmetric_in_outer_points() {
        let a = Point3::new(0.12, -0.4, 0.33);
        let b = Point3::new(-0.05, 0.2, 0.1);
        let c = Point3::new(0.6, 0.7, -0.2);
        let lhs = joint_angle_deg(a, b, c).unwrap();
        let rhs = joint_angle_deg(c, b, a).unwrap();
        assert!((lhs - rhs).abs() < 1e-9);
    }

    #[test]
    fn degenerate_segment_yields_none() {
        let b = Point3::new(0.3, 0.3, 0.3);
        let near_b = Point3::new(0.3 + 5e-9, 0.3, 0.3);
        let c = Point3::new(1.0, 0.0, 0.0);
        assert_eq!(joint_angle_deg(near_b, b, c), None);
        assert_eq!(joint_angle_deg(c, b, near_b), None);
    }

    #[test]
    fn collinear_overshoot_is_clamped() {
        // Exactly collinear points can produce a dot/norm ratio a hair above
        // 1.0; the clamp keeps acos in-domain instead of returning NaN.
        let a = Point3::new(0.1, 0.2, 0.3);
        let b = Point3::new(0.2, 0.4, 0.6);
        let c = Point3::new(0.4, 0.8, 1.2);
        let angle = joint_angle_deg(a, b, c).unwrap();
        assert!(angle.is_finite());
        assert!((angle - 180.0).abs() < 1e-6);
    }
}
