//! Bezier trajectories: a precomputed polyline plus per-tick position queries.

use thiserror::Error;

use crate::Vec3;

/// Segments in a precomputed sample table; the table holds `CURVE_SEGMENTS + 1` points.
pub const CURVE_SEGMENTS: usize = 100;

/// Control polygons below this size do not activate trajectory motion.
pub const MIN_CONTROL_POINTS: usize = 4;

/// Trajectory speed bounds, in curve loops per second.
pub const SPEED_MIN: f32 = 0.001;
pub const SPEED_MAX: f32 = 0.1;
/// Increment used when stepping speed up or down.
pub const SPEED_STEP: f32 = 0.001;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("Bezier curve needs at least {MIN_CONTROL_POINTS} control points, got {0}")]
    TooFewControlPoints(usize),
}

/// Dense polyline approximation of a Bezier curve. Immutable after construction.
#[derive(Clone, Debug)]
pub struct SampleTable {
    points: Vec<Vec3>,
}

impl SampleTable {
    /// Evaluate the Bernstein-weighted control point sum at
    /// `CURVE_SEGMENTS + 1` evenly spaced parameter values.
    pub fn build(control: &[Vec3]) -> Result<Self, CurveError> {
        if control.len() < MIN_CONTROL_POINTS {
            return Err(CurveError::TooFewControlPoints(control.len()));
        }

        let n = control.len() - 1;
        let piece = 1.0 / CURVE_SEGMENTS as f32;
        let mut points = Vec::with_capacity(CURVE_SEGMENTS + 1);

        for j in 0..=CURVE_SEGMENTS {
            let t = j as f32 * piece;
            let mut point = Vec3::ZERO;
            for (i, c) in control.iter().enumerate() {
                let bernstein = binomial(n, i) * (1.0 - t).powi((n - i) as i32) * t.powi(i as i32);
                point += *c * bernstein;
            }
            points.push(point);
        }

        Ok(Self { points })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

/// Binomial coefficient via factorials. The control polygons we expect are
/// small, so plain floating factorials are accurate enough.
fn binomial(n: usize, k: usize) -> f32 {
    (factorial(n) / (factorial(k) * factorial(n - k))) as f32
}

fn factorial(n: usize) -> f64 {
    (2..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// Mutable per-object motion state along a sampled curve.
///
/// Progress wraps in [0, 1) and the neighbor index wraps last -> first, so the
/// motion is a closed loop even though the sample table itself is open.
#[derive(Clone, Debug)]
pub struct Trajectory {
    table: SampleTable,
    progress: f32,
    speed: f32,
    active: bool,
}

impl Trajectory {
    /// Returns `None` for control polygons too short to activate motion.
    /// Speed is clamped into `[SPEED_MIN, SPEED_MAX]`.
    pub fn from_control_points(control: &[Vec3], speed: f32) -> Option<Self> {
        if control.len() < MIN_CONTROL_POINTS {
            return None;
        }
        let table = SampleTable::build(control).ok()?;
        Some(Self {
            table,
            progress: 0.0,
            speed: speed.clamp(SPEED_MIN, SPEED_MAX),
            active: true,
        })
    }

    /// Advance progress by `speed * dt` (wrapping past 1.0, multi-loop jumps
    /// included) and return the new interpolated position.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.progress += self.speed * dt;
        if self.progress >= 1.0 {
            self.progress %= 1.0;
        }
        self.position()
    }

    /// Interpolated position at the current progress. Index arithmetic is
    /// modular, so no progress value can read out of bounds.
    pub fn position(&self) -> Vec3 {
        let points = self.table.points();
        let float_index = self.progress * (points.len() - 1) as f32;
        let index = (float_index as usize).min(points.len() - 1);
        let next = (index + 1) % points.len();
        let t = float_index - index as f32;
        points[index].lerp(points[next], t)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
    }

    /// Step speed by `SPEED_STEP` in the given direction, staying in bounds.
    pub fn nudge_speed(&mut self, direction: i32) {
        self.set_speed(self.speed + direction.signum() as f32 * SPEED_STEP);
    }

    #[inline]
    pub fn table(&self) -> &SampleTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    fn square_loop() -> Vec<Vec3> {
        vec![
            vec3(0.0, 0.0, 0.0),
            vec3(2.0, 0.0, 0.0),
            vec3(2.0, 2.0, 0.0),
            vec3(0.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn table_has_fixed_length_and_matching_endpoints() {
        let table = SampleTable::build(&square_loop()).expect("build table");
        assert_eq!(table.len(), CURVE_SEGMENTS + 1);
        assert!((table.points()[0] - vec3(0.0, 0.0, 0.0)).length() < 1e-5);
        assert!((table.points()[CURVE_SEGMENTS] - vec3(0.0, 2.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn too_few_control_points_is_an_error() {
        let err = SampleTable::build(&[Vec3::ZERO; 3]).unwrap_err();
        assert!(matches!(err, CurveError::TooFewControlPoints(3)));
    }

    #[test]
    fn short_polygon_does_not_activate() {
        assert!(Trajectory::from_control_points(&[Vec3::ZERO; 3], 0.01).is_none());
        assert!(Trajectory::from_control_points(&square_loop(), 0.01).is_some());
    }

    #[test]
    fn full_loop_returns_to_start() {
        // 1/16 is exact in binary, so 16 unit-dt steps sum to exactly 1.0
        // and progress wraps back to 0.
        let mut tr = Trajectory::from_control_points(&square_loop(), 0.0625).expect("trajectory");
        let start = tr.position();
        for _ in 0..16 {
            tr.advance(1.0);
        }
        assert!((tr.position() - start).length() < 1e-6);
        assert!(tr.progress() < 1e-6);
    }

    #[test]
    fn giant_step_wraps_without_indexing_errors() {
        let mut tr = Trajectory::from_control_points(&square_loop(), 0.1).expect("trajectory");
        let p = tr.advance(12_345.678);
        assert!(p.is_finite());
        assert!(tr.progress() >= 0.0 && tr.progress() < 1.0);
    }

    #[test]
    fn position_interpolates_between_neighboring_samples() {
        let mut tr = Trajectory::from_control_points(&square_loop(), 0.1).expect("trajectory");
        tr.advance(0.031);
        let points = tr.table().points().to_vec();
        let float_index = tr.progress() * (points.len() - 1) as f32;
        let index = float_index as usize;
        let p = tr.position();
        let lo = points[index].min(points[index + 1]);
        let hi = points[index].max(points[index + 1]);
        assert!(p.cmpge(lo - 1e-5).all() && p.cmple(hi + 1e-5).all());
    }

    #[test]
    fn speed_is_clamped() {
        let mut tr = Trajectory::from_control_points(&square_loop(), 5.0).expect("trajectory");
        assert_eq!(tr.speed(), SPEED_MAX);
        for _ in 0..1_000 {
            tr.nudge_speed(-1);
        }
        assert_eq!(tr.speed(), SPEED_MIN);
    }
}
