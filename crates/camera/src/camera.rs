use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use viewrig_common::{Rotation, direction_from_yaw_pitch, yaw_pitch_from_direction};

use crate::projection::Projection;

/// Pitch band for orbiting cameras: one degree short of either pole, so the
/// world up axis never lines up with the look direction.
pub const ORBIT_PITCH_LIMIT: f32 = FRAC_PI_2 - PI / 180.0;

/// Unit look vectors this close to the up axis have no usable view basis.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Errors from deriving a view transform.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("position and target coincide at {0}")]
    CoincidentPoints(Vec3),
    #[error("look direction {0} is parallel to the up axis")]
    LookAlongUp(Vec3),
}

/// Which endpoint stays put when the camera rotates or zooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// The eye is the pivot; the target swings around it.
    #[default]
    FirstPerson,
    /// The target is the pivot; the eye orbits it with pitch held inside
    /// [`ORBIT_PITCH_LIMIT`].
    ThirdPerson,
}

impl std::fmt::Display for CameraMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstPerson => f.write_str("first-person"),
            Self::ThirdPerson => f.write_str("third-person"),
        }
    }
}

/// Look-at camera driven by yaw/pitch rotation and an arm length.
///
/// Position and target are kept `length` apart. Every rotation or length
/// change holds the pivot (see [`CameraMode`]) and recomputes the other
/// endpoint from the rotation's direction. [`Camera::move_by`] translates
/// both points rigidly.
///
/// The view matrix is never stored; [`Camera::view`] derives it each call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    mode: CameraMode,
    position: Vec3,
    target: Vec3,
    rotation: Rotation,
    length: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraMode::FirstPerson, Vec3::ZERO, Vec3::ZERO)
    }
}

impl Camera {
    /// Create a camera from an eye position and a look-at target.
    ///
    /// Rotation and length are derived from the two points. An orbiting camera
    /// placed outside the pitch band is snapped onto its edge.
    pub fn new(mode: CameraMode, position: Vec3, target: Vec3) -> Self {
        let arm = match mode {
            CameraMode::FirstPerson => target - position,
            CameraMode::ThirdPerson => position - target,
        };
        let mut camera = Self {
            mode,
            position,
            target,
            rotation: yaw_pitch_from_direction(arm),
            length: position.distance(target),
        };
        if mode == CameraMode::ThirdPerson && camera.rotation.pitch.abs() > ORBIT_PITCH_LIMIT {
            camera.set_rotation(camera.rotation);
        }
        camera
    }

    pub fn first_person(position: Vec3, target: Vec3) -> Self {
        Self::new(CameraMode::FirstPerson, position, target)
    }

    pub fn third_person(position: Vec3, target: Vec3) -> Self {
        Self::new(CameraMode::ThirdPerson, position, target)
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Eye location in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Look-at point in world space.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Distance between position and target.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Translate position and target by the same offset.
    pub fn move_by(&mut self, direction: Vec3) {
        self.position += direction;
        self.target += direction;
    }

    /// Add angle deltas to the current rotation.
    pub fn rotate(&mut self, yaw: f32, pitch: f32, roll: f32) {
        self.set_rotation(self.rotation + Rotation::new(yaw, pitch, roll));
    }

    /// Point the camera along `rotation`, keeping the current distance.
    ///
    /// Orbiting cameras clamp the pitch to [`ORBIT_PITCH_LIMIT`]. Roll is
    /// stored as given. A rotation with a non-finite angle is ignored.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        if !(rotation.yaw.is_finite() && rotation.pitch.is_finite() && rotation.roll.is_finite()) {
            tracing::debug!(?rotation, "non-finite rotation ignored");
            return;
        }
        let rotation = match self.mode {
            CameraMode::FirstPerson => rotation,
            CameraMode::ThirdPerson => {
                let clamped = rotation.with_pitch_clamped(ORBIT_PITCH_LIMIT);
                if clamped.pitch != rotation.pitch {
                    tracing::debug!(
                        requested = rotation.pitch,
                        clamped = clamped.pitch,
                        "orbit pitch clamped"
                    );
                }
                clamped
            }
        };
        self.rotation = rotation;
        self.length = self.position.distance(self.target);
        self.place_dependent(self.rotation_direction());
    }

    /// Value-returning form of [`Camera::set_rotation`].
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Change the distance between position and target, clamped to
    /// `[0, f32::MAX]`. NaN is treated as 0.
    ///
    /// A first-person camera keeps its current look direction. When position
    /// and target coincide it falls back to the direction of the stored
    /// rotation. A length that would push the moving endpoint past the `f32`
    /// range is ignored.
    pub fn set_length(&mut self, length: f32) {
        let clamped = length.max(0.0).min(f32::MAX);
        if clamped != length {
            tracing::debug!(requested = length, clamped, "camera length clamped");
        }

        let direction = match self.mode {
            CameraMode::FirstPerson => (self.target - self.position)
                .try_normalize()
                .unwrap_or_else(|| {
                    tracing::debug!(
                        rotation = ?self.rotation,
                        "position equals target, using rotation direction"
                    );
                    self.rotation_direction()
                }),
            CameraMode::ThirdPerson => self.rotation_direction(),
        };
        if !(self.pivot() + direction * clamped).is_finite() {
            tracing::debug!(
                length = clamped,
                pivot = %self.pivot(),
                "camera length overflows world coordinates, ignored"
            );
            return;
        }
        self.length = clamped;
        self.place_dependent(direction);
    }

    /// Value-returning form of [`Camera::set_length`].
    pub fn with_length(mut self, length: f32) -> Self {
        self.set_length(length);
        self
    }

    /// Left-handed look-at transform from position toward target with +Y up.
    pub fn view(&self) -> Result<Mat4, CameraError> {
        let Some(look) = (self.target - self.position).try_normalize() else {
            return Err(CameraError::CoincidentPoints(self.position));
        };
        if Vec3::Y.cross(look).length() <= DEGENERATE_EPSILON {
            return Err(CameraError::LookAlongUp(look));
        }
        Ok(Mat4::look_at_lh(self.position, self.target, Vec3::Y))
    }

    /// `projection * view`.
    pub fn view_projection(&self, projection: &impl Projection) -> Result<Mat4, CameraError> {
        Ok(projection.projection() * self.view()?)
    }

    /// The endpoint that stays fixed under rotation and length changes.
    fn pivot(&self) -> Vec3 {
        match self.mode {
            CameraMode::FirstPerson => self.position,
            CameraMode::ThirdPerson => self.target,
        }
    }

    fn rotation_direction(&self) -> Vec3 {
        direction_from_yaw_pitch(self.rotation.yaw, self.rotation.pitch).normalize_or_zero()
    }

    /// Put the non-pivot endpoint `length` away from the pivot along `direction`.
    fn place_dependent(&mut self, direction: Vec3) {
        match self.mode {
            CameraMode::FirstPerson => self.target = self.position + direction * self.length,
            CameraMode::ThirdPerson => self.position = self.target + direction * self.length,
        }
        tracing::trace!(
            mode = %self.mode,
            position = %self.position,
            target = %self.target,
            "camera endpoint recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Perspective;

    const TOLERANCE: f32 = 1e-4;

    fn assert_length_invariant(cam: &Camera) {
        let actual = cam.position().distance(cam.target());
        assert!(
            (actual - cam.length()).abs() < TOLERANCE,
            "stored length {} but points are {} apart",
            cam.length(),
            actual
        );
    }

    #[test]
    fn first_person_derives_length_and_rotation() {
        let cam = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(cam.length(), 5.0);
        assert!(cam.rotation().yaw.abs() < TOLERANCE);
        assert!(cam.rotation().pitch.abs() < TOLERANCE);
    }

    #[test]
    fn first_person_length_moves_target() {
        let mut cam = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        cam.set_length(10.0);
        assert!(cam.target().abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), TOLERANCE));
        assert_eq!(cam.position(), Vec3::ZERO);
        assert_length_invariant(&cam);
    }

    #[test]
    fn third_person_quarter_turn_orbits_target() {
        let mut cam = Camera::third_person(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        cam.rotate(90.0_f32.to_radians(), 0.0, 0.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), TOLERANCE));
        assert_eq!(cam.target(), Vec3::ZERO);
        assert_length_invariant(&cam);
    }

    #[test]
    fn third_person_length_follows_rotation() {
        let mut cam = Camera::third_person(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        cam.rotate(90.0_f32.to_radians(), 0.0, 0.0);
        cam.set_length(2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), TOLERANCE));
        assert_length_invariant(&cam);
    }

    #[test]
    fn move_translates_both_points() {
        let mut cam = Camera::first_person(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 8.0));
        let rotation = cam.rotation();
        let length = cam.length();

        cam.move_by(Vec3::X);

        assert_eq!(cam.position(), Vec3::new(2.0, 2.0, 3.0));
        assert_eq!(cam.target(), Vec3::new(2.0, 2.0, 8.0));
        assert_eq!(cam.rotation(), rotation);
        assert_eq!(cam.length(), length);
    }

    #[test]
    fn length_invariant_holds_through_mixed_updates() {
        for mode in [CameraMode::FirstPerson, CameraMode::ThirdPerson] {
            let mut cam = Camera::new(mode, Vec3::new(3.0, 1.0, -2.0), Vec3::new(-1.0, 0.5, 4.0));
            assert_length_invariant(&cam);
            cam.rotate(0.4, 0.2, 0.0);
            assert_length_invariant(&cam);
            cam.move_by(Vec3::new(-7.0, 3.0, 0.5));
            assert_length_invariant(&cam);
            cam.set_length(12.5);
            assert_length_invariant(&cam);
            cam.rotate(-2.5, -0.9, 0.1);
            assert_length_invariant(&cam);
            cam.set_length(0.25);
            assert_length_invariant(&cam);
        }
    }

    #[test]
    fn third_person_pitch_is_clamped() {
        let mut cam = Camera::third_person(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        cam.set_rotation(Rotation::new(0.0, FRAC_PI_2, 0.0));
        assert!(cam.rotation().pitch <= ORBIT_PITCH_LIMIT);

        for _ in 0..20 {
            cam.rotate(0.0, -0.3, 0.0);
        }
        assert!(cam.rotation().pitch >= -ORBIT_PITCH_LIMIT);
        assert!(cam.view().is_ok());
    }

    #[test]
    fn first_person_pitch_is_unclamped() {
        let mut cam = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        cam.rotate(0.0, 120.0_f32.to_radians(), 0.0);
        assert!((cam.rotation().pitch - 120.0_f32.to_radians()).abs() < TOLERANCE);
        assert_length_invariant(&cam);
    }

    #[test]
    fn roll_is_stored_but_ignored() {
        let mut a = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        let mut b = a;
        a.rotate(0.5, 0.1, 0.0);
        b.rotate(0.5, 0.1, 1.2);
        assert_eq!(b.rotation().roll, 1.2);
        assert!(a.target().abs_diff_eq(b.target(), TOLERANCE));
    }

    #[test]
    fn third_person_above_target_snaps_into_band() {
        let cam = Camera::third_person(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        assert!((cam.rotation().pitch + ORBIT_PITCH_LIMIT).abs() < TOLERANCE);
        assert!((cam.length() - 10.0).abs() < TOLERANCE);
        assert!(cam.position().y > 9.9);
        assert!(cam.view().is_ok());
    }

    #[test]
    fn negative_length_clamps_to_zero() {
        let mut cam = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        cam.set_length(-3.0);
        assert_eq!(cam.length(), 0.0);
        assert_eq!(cam.target(), cam.position());
    }

    #[test]
    fn nan_length_is_zero() {
        let cam = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0)).with_length(f32::NAN);
        assert_eq!(cam.length(), 0.0);
    }

    #[test]
    fn collapsed_camera_regrows_along_rotation() {
        let mut cam = Camera::first_person(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        cam.set_length(0.0);
        cam.set_length(4.0);
        assert!(cam.target().abs_diff_eq(Vec3::new(4.0, 0.0, 0.0), TOLERANCE));
        assert_length_invariant(&cam);
    }

    #[test]
    fn default_camera_grows_forward() {
        let cam = Camera::default().with_length(2.0);
        assert!(cam.target().abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), TOLERANCE));
    }

    #[test]
    fn with_rotation_leaves_original_untouched() {
        let cam = Camera::third_person(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let turned = cam.with_rotation(Rotation::from_degrees(180.0, 0.0, 0.0));
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), TOLERANCE));
        assert!(turned.position().abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), TOLERANCE));
    }

    #[test]
    fn view_puts_target_on_positive_z() {
        let cam = Camera::first_person(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 2.0, 7.0));
        let view = cam.view().unwrap();
        let local = view.transform_point3(cam.target());
        assert!(local.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), TOLERANCE));
        assert!(view.transform_point3(cam.position()).abs_diff_eq(Vec3::ZERO, TOLERANCE));
    }

    #[test]
    fn view_rejects_coincident_points() {
        let cam = Camera::default();
        assert_eq!(cam.view(), Err(CameraError::CoincidentPoints(Vec3::ZERO)));
    }

    #[test]
    fn non_finite_rotation_is_ignored() {
        let mut cam = Camera::third_person(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let before = cam;
        cam.rotate(0.0, f32::NAN, 0.0);
        cam.set_rotation(Rotation::new(f32::INFINITY, 0.0, 0.0));
        assert_eq!(cam, before);
        assert_length_invariant(&cam);

        let mut fp = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        fp.rotate(0.0, 0.0, f32::NAN);
        assert_eq!(fp.target(), Vec3::new(0.0, 0.0, 5.0));
        assert!(!fp.rotation().roll.is_nan());
    }

    #[test]
    fn overflowing_length_is_ignored() {
        let mut cam = Camera::first_person(Vec3::new(0.0, 0.0, 1e38), Vec3::new(0.0, 0.0, 2e38));
        let before = cam;
        cam.set_length(f32::INFINITY);
        assert_eq!(cam, before);
        assert!(cam.target().is_finite());
    }

    #[test]
    fn infinite_length_from_origin_saturates() {
        let mut cam = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        cam.set_length(f32::INFINITY);
        assert_eq!(cam.length(), f32::MAX);
        assert_eq!(cam.target(), Vec3::new(0.0, 0.0, f32::MAX));
    }

    #[test]
    fn view_accepts_tiny_but_distinct_points() {
        let cam = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5e-7));
        assert!(cam.view().is_ok());
    }

    #[test]
    fn view_rejects_looking_straight_up() {
        let cam = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));
        assert!(matches!(cam.view(), Err(CameraError::LookAlongUp(_))));
    }

    #[test]
    fn view_projection_composes() {
        let cam = Camera::first_person(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        let projection = Perspective::default();
        let vp = cam.view_projection(&projection).unwrap();
        let expected = projection.projection() * cam.view().unwrap();
        assert!(vp.abs_diff_eq(expected, TOLERANCE));
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn mode_deserializes_snake_case() {
        let mode: CameraMode = serde_json::from_str("\"third_person\"").unwrap();
        assert_eq!(mode, CameraMode::ThirdPerson);
        assert_eq!(mode.to_string(), "third-person");
    }
}
