//! Core types: math re-exports, Transform, curve trajectories, scene state.

pub use glam::{EulerRot, Mat4, Quat, Vec3, vec3};

pub mod curve;
pub mod scene;
pub mod transform;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = transform::Transform::identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_then_scale_matrix() {
        let t = transform::Transform::from_trs(vec3(1.0, 2.0, 3.0), vec3(0.0, 0.0, 0.0), 2.0);
        // Проверяем пару элементов: последний столбец translation,
        // диагональ scale (при нулевой ротации).
        let m = t.matrix().to_cols_array();
        assert!((m[12] - 1.0).abs() < 1e-6);
        assert!((m[13] - 2.0).abs() < 1e-6);
        assert!((m[14] - 3.0).abs() < 1e-6);
        assert!((m[0] - 2.0).abs() < 1e-6);
        assert!((m[5] - 2.0).abs() < 1e-6);
        assert!((m[10] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn trajectory_positions_are_finite() {
        let control = [
            vec3(0.0, 0.0, 0.0),
            vec3(4.0, 0.0, 0.0),
            vec3(4.0, 4.0, 0.0),
            vec3(0.0, 4.0, 0.0),
        ];
        let mut tr = curve::Trajectory::from_control_points(&control, 0.05).expect("trajectory");
        for _ in 0..500 {
            let p = tr.advance(1.0 / 60.0);
            assert!(p.is_finite());
        }
    }
}
