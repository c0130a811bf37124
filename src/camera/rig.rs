use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Camera parented to a parallax group.
///
/// The group only moves in X/Y following the cursor; the camera sits at
/// `(0, height, distance)` inside the group, looking down -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    group: Vec3,
    height: f32,
    distance: f32,
    aspect: f32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl CameraRig {
    /// Rig at the origin with the given projection.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let mut rig = Self {
            group: Vec3::ZERO,
            height: 0.0,
            distance: 0.0,
            aspect,
            fovy: 0.0,
            znear: 0.0,
            zfar: 0.0,
        };
        rig.configure(options);
        rig
    }

    /// Re-read projection parameters and camera distance.
    pub fn configure(&mut self, options: &CameraOptions) {
        self.distance = options.distance;
        self.fovy = options.fovy;
        self.znear = options.znear;
        self.zfar = options.zfar;
    }

    /// Camera height inside the group.
    pub fn set_camera_height(&mut self, height: f32) {
        self.height = height;
    }

    /// Camera height inside the group.
    #[must_use]
    pub fn camera_height(&self) -> f32 {
        self.height
    }

    /// Move the group `factor` of the way toward `target` in X and Y.
    pub fn approach_parallax(&mut self, target: Vec2, factor: f32) {
        self.group.x += (target.x - self.group.x) * factor;
        self.group.y += (target.y - self.group.y) * factor;
    }

    /// Group (parallax) position.
    #[must_use]
    pub fn group_position(&self) -> Vec3 {
        self.group
    }

    /// Projection aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// World-space camera.
    #[must_use]
    pub fn camera(&self) -> Camera {
        let eye = self.group + Vec3::new(0.0, self.height, self.distance);
        Camera {
            eye,
            target: eye - Vec3::Z,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_combines_group_and_height() {
        let mut rig = CameraRig::new(&CameraOptions::default(), 2.0);
        rig.set_camera_height(-4.0);
        rig.approach_parallax(Vec2::new(0.25, -0.5), 1.0);
        let camera = rig.camera();
        assert_eq!(camera.eye, Vec3::new(0.25, -4.5, 6.0));
        assert_eq!(camera.target - camera.eye, -Vec3::Z);
        assert_eq!(camera.aspect, 2.0);
        assert_eq!(camera.fovy, 35.0);
    }

    #[test]
    fn partial_approach_moves_part_way() {
        let mut rig = CameraRig::new(&CameraOptions::default(), 1.0);
        rig.approach_parallax(Vec2::new(1.0, 1.0), 0.25);
        assert_eq!(rig.group_position(), Vec3::new(0.25, 0.25, 0.0));
    }
}
