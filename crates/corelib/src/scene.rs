//! Scene state: dense object list plus selection, advanced once per tick.
//! The render loop owns one `Scene` value; there are no ambient globals.

use crate::curve::Trajectory;
use crate::transform::Transform;

/// Step applied by translation nudges.
pub const POSITION_STEP: f32 = 0.05;

/// Uniform-scale step and bounds.
pub const SCALE_STEP: f32 = 0.05;
pub const SCALE_MIN: f32 = 0.05;
pub const SCALE_MAX: f32 = 10.0;

/// Rotation rate for spinning axes, radians per second.
pub const SPIN_RATE: f32 = 1.0;

/// Upper bound on scene population.
pub const MAX_OBJECTS: usize = 99;

/// Axis selector for spin toggles and position nudges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Marker component: which vertex buffer this object draws with.
/// The buffer list itself lives with whoever owns the GPU resources.
#[derive(Clone, Copy, Debug)]
pub struct Renderable {
    pub buffer: usize,
}

/// Per-object record: placement, spin flags, optional trajectory.
#[derive(Clone, Debug, Default)]
pub struct SceneObject {
    pub transform: Transform,
    pub spin: [bool; 3],
    pub trajectory: Option<Trajectory>,
    pub renderable: Option<Renderable>,
}

/// Owned scene state: object list and the selected index.
#[derive(Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selected: usize,
}

impl Scene {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            selected: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&SceneObject> {
        self.objects.get(self.selected)
    }

    pub fn selected_mut(&mut self) -> Option<&mut SceneObject> {
        self.objects.get_mut(self.selected)
    }

    /// Iterate over objects in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Select by index; out-of-range requests clamp to the last object.
    pub fn select(&mut self, index: usize) {
        if !self.objects.is_empty() {
            self.selected = index.min(self.objects.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        self.select(self.selected + 1);
    }

    /// Flip continuous rotation around `axis` for the selected object.
    pub fn toggle_spin(&mut self, axis: Axis) {
        if let Some(object) = self.selected_mut() {
            let flag = &mut object.spin[axis as usize];
            *flag = !*flag;
        }
    }

    /// Step the selected object's translation along `axis`.
    pub fn nudge_position(&mut self, axis: Axis, direction: i32) {
        if let Some(object) = self.selected_mut() {
            let delta = direction.signum() as f32 * POSITION_STEP;
            match axis {
                Axis::X => object.transform.translation.x += delta,
                Axis::Y => object.transform.translation.y += delta,
                Axis::Z => object.transform.translation.z += delta,
            }
        }
    }

    /// Step the selected object's uniform scale, staying inside the bounds.
    pub fn adjust_scale(&mut self, direction: i32) {
        if let Some(object) = self.selected_mut() {
            let scale = object.transform.scale + direction.signum() as f32 * SCALE_STEP;
            object.transform.scale = scale.clamp(SCALE_MIN, SCALE_MAX);
        }
    }

    /// Step the selected object's trajectory speed; no-op without a trajectory.
    pub fn adjust_speed(&mut self, direction: i32) {
        if let Some(trajectory) = self.selected_mut().and_then(|o| o.trajectory.as_mut()) {
            trajectory.nudge_speed(direction);
        }
    }

    /// Spawn a fresh object sharing the first object's buffer, default
    /// placement, no trajectory. Selection moves to the new object.
    pub fn push_clone(&mut self) {
        if self.objects.is_empty() || self.objects.len() >= MAX_OBJECTS {
            return;
        }
        let clone = SceneObject {
            renderable: self.objects[0].renderable,
            ..SceneObject::default()
        };
        self.objects.push(clone);
        self.selected = self.objects.len() - 1;
    }

    /// Remove the last object, keeping at least one. Selection follows.
    pub fn pop(&mut self) {
        if self.objects.len() > 1 {
            self.objects.pop();
            self.selected = self.selected.min(self.objects.len() - 1);
        }
    }

    /// One animation tick: spin flagged axes, then follow active trajectories.
    /// Inactive trajectories are left untouched.
    pub fn advance(&mut self, dt: f32) {
        for object in &mut self.objects {
            let [sx, sy, sz] = object.spin;
            if sx {
                object.transform.rotation_euler.x += SPIN_RATE * dt;
            }
            if sy {
                object.transform.rotation_euler.y += SPIN_RATE * dt;
            }
            if sz {
                object.transform.rotation_euler.z += SPIN_RATE * dt;
            }

            if let Some(trajectory) = &mut object.trajectory {
                if trajectory.is_active() {
                    object.transform.translation = trajectory.advance(dt);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{SPEED_MAX, Trajectory};
    use crate::vec3;

    fn traveling_object() -> SceneObject {
        let control = [
            vec3(0.0, 0.0, 0.0),
            vec3(2.0, 0.0, 0.0),
            vec3(2.0, 2.0, 0.0),
            vec3(0.0, 2.0, 0.0),
        ];
        SceneObject {
            trajectory: Trajectory::from_control_points(&control, 0.05),
            renderable: Some(Renderable { buffer: 0 }),
            ..SceneObject::default()
        }
    }

    #[test]
    fn selection_clamps_to_population() {
        let mut scene = Scene::new(vec![SceneObject::default(), SceneObject::default()]);
        scene.select(17);
        assert_eq!(scene.selected_index(), 1);
        scene.select_next();
        assert_eq!(scene.selected_index(), 1);
        scene.select_prev();
        scene.select_prev();
        assert_eq!(scene.selected_index(), 0);
    }

    #[test]
    fn scale_stays_in_bounds() {
        let mut scene = Scene::new(vec![SceneObject::default()]);
        for _ in 0..1_000 {
            scene.adjust_scale(1);
        }
        assert_eq!(scene.selected().unwrap().transform.scale, SCALE_MAX);
        for _ in 0..1_000 {
            scene.adjust_scale(-1);
        }
        assert_eq!(scene.selected().unwrap().transform.scale, SCALE_MIN);
    }

    #[test]
    fn speed_adjustment_needs_a_trajectory() {
        let mut scene = Scene::new(vec![SceneObject::default(), traveling_object()]);
        // No trajectory on the first object: silently ignored.
        scene.adjust_speed(1);
        assert!(scene.selected().unwrap().trajectory.is_none());

        scene.select(1);
        for _ in 0..1_000 {
            scene.adjust_speed(1);
        }
        let speed = scene.selected().unwrap().trajectory.as_ref().unwrap().speed();
        assert_eq!(speed, SPEED_MAX);
    }

    #[test]
    fn pop_keeps_at_least_one_object() {
        let mut scene = Scene::new(vec![SceneObject::default(), SceneObject::default()]);
        scene.select(1);
        scene.pop();
        scene.pop();
        scene.pop();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.selected_index(), 0);
    }

    #[test]
    fn clone_shares_buffer_but_resets_placement() {
        let mut first = traveling_object();
        first.transform.translation = vec3(5.0, 0.0, 0.0);
        let mut scene = Scene::new(vec![first]);

        scene.push_clone();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.selected_index(), 1);

        let clone = scene.selected().unwrap();
        assert_eq!(clone.renderable.unwrap().buffer, 0);
        assert_eq!(clone.transform.translation, vec3(0.0, 0.0, 0.0));
        assert!(clone.trajectory.is_none());
    }

    #[test]
    fn advance_follows_trajectory_and_spins() {
        let mut object = traveling_object();
        object.spin = [false, true, false];
        let expected = object.trajectory.clone().unwrap().advance(1.0);

        let mut scene = Scene::new(vec![object]);
        scene.advance(1.0);

        let moved = scene.selected().unwrap();
        assert!((moved.transform.translation - expected).length() < 1e-6);
        assert!((moved.transform.rotation_euler.y - SPIN_RATE).abs() < 1e-6);
        assert_eq!(moved.transform.rotation_euler.x, 0.0);
    }

    #[test]
    fn inactive_trajectory_is_not_advanced() {
        let mut object = traveling_object();
        object.trajectory.as_mut().unwrap().set_active(false);
        let mut scene = Scene::new(vec![object]);

        scene.advance(1.0);
        let still = scene.selected().unwrap();
        assert_eq!(still.transform.translation, vec3(0.0, 0.0, 0.0));
        assert_eq!(still.trajectory.as_ref().unwrap().progress(), 0.0);
    }
}
