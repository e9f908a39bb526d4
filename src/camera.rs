//! Editor fly camera
//!
//! A free camera driven by the continuous command set: WASD movement in the
//! yaw frame, Q/E yaw rotation, shift speed boost, and mouse look while the
//! right button holds camera movement active. Produces the view and
//! projection matrices the picker and renderer consume.

use glam::{Mat4, Vec2, Vec3};

use crate::input::FrameCommands;

/// Window client area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Window client point + depth to normalized device coordinates
    /// (x, y in [-1, 1] with y up; z passed through).
    #[must_use]
    pub fn to_ndc(&self, screen: Vec2, depth: f32) -> Vec3 {
        Vec3::new(
            screen.x / self.width.max(1.0) * 2.0 - 1.0,
            1.0 - screen.y / self.height.max(1.0) * 2.0,
            depth,
        )
    }
}

/// Free camera state and tuning.
#[derive(Debug, Clone)]
pub struct EditorCamera {
    pub position: Vec3,
    /// Heading in degrees; 0 looks down -Z
    pub yaw_degrees: f32,
    /// Elevation in degrees, clamped shy of the poles
    pub pitch_degrees: f32,

    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,

    /// Movement speed in world units per second
    pub move_speed: f32,
    /// Q/E rotation speed in degrees per second
    pub rotate_speed: f32,
    /// Multiplier applied while shift is held
    pub boost_multiplier: f32,
    /// Mouse look sensitivity in degrees per pixel
    pub look_sensitivity: f32,

    last_mouse: Option<Vec2>,
}

impl EditorCamera {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 20.0),
            yaw_degrees: 0.0,
            pitch_degrees: -15.0,
            fov_degrees: 70.0,
            near: 0.01,
            far: 1000.0,
            move_speed: 30.0,
            rotate_speed: 90.0,
            boost_multiplier: 3.0,
            look_sensitivity: 0.2,
            last_mouse: None,
        }
    }

    /// Unit forward vector for the current yaw/pitch.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw_degrees.to_radians();
        let pitch = self.pitch_degrees.to_radians();
        Vec3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
    }

    /// Applies one tick of the continuous commands.
    ///
    /// The mouse position is tracked every tick regardless of button state
    /// so look deltas never jump when the right button goes down.
    pub fn update(&mut self, commands: &FrameCommands, dt: f32) {
        if commands.rotate_left {
            self.yaw_degrees -= self.rotate_speed * dt;
        }
        if commands.rotate_right {
            self.yaw_degrees += self.rotate_speed * dt;
        }

        if let Some(last) = self.last_mouse
            && commands.camera_active
        {
            let delta = commands.mouse - last;
            self.yaw_degrees += delta.x * self.look_sensitivity;
            self.pitch_degrees =
                (self.pitch_degrees - delta.y * self.look_sensitivity).clamp(-89.0, 89.0);
        }
        self.last_mouse = Some(commands.mouse);

        let mut speed = self.move_speed;
        if commands.speed_boost {
            speed *= self.boost_multiplier;
        }

        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);

        let mut movement = Vec3::ZERO;
        if commands.forward {
            movement += forward;
        }
        if commands.back {
            movement -= forward;
        }
        if commands.left {
            movement -= right;
        }
        if commands.right {
            movement += right;
        }

        self.position += movement.normalize_or_zero() * speed * dt;
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Perspective projection with [0, 1] depth. The vertical field of view
    /// doubles in portrait aspect so the scene stays framed.
    #[must_use]
    pub fn projection_matrix(&self, viewport: &Viewport) -> Mat4 {
        let aspect = viewport.aspect();
        let mut fov = self.fov_degrees.to_radians();
        if aspect < 1.0 {
            fov *= 2.0;
        }
        Mat4::perspective_rh(fov, aspect, self.near, self.far)
    }
}

impl Default for EditorCamera {
    fn default() -> Self {
        Self::new()
    }
}
