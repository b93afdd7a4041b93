use crate::math::{Matrix3, Vector3};

/// A Camera object. Represents a viewable area that a scene can be rendered to.
///
/// Pixel coordinates land on a viewport rectangle sitting at
/// `projection_plane_z` in camera space, then get rotated into world space
/// by the orientation basis.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Output image width, in pixels.
    pub vw: i32,
    /// Output image height, in pixels.
    pub vh: i32,
    pub origin: Vector3,
    pub rotation: Matrix3,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub projection_plane_z: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            vw: 300,
            vh: 300,
            origin: Vector3::default(),
            rotation: Matrix3::identity(),
            viewport_width: 1.,
            viewport_height: 1.,
            projection_plane_z: 1.,
        }
    }
}

impl Camera {
    /// Calculate the world-space ray direction for a pixel, where the
    /// top-left of the image is (0, 0).
    ///
    /// The direction is left unnormalized; `t = 1` along it corresponds to
    /// the projection plane.
    pub fn direction_at(&self, x: i32, y: i32) -> Vector3 {
        let cx = x as f64 - self.vw as f64 * 0.5;
        let cy = self.vh as f64 * 0.5 - y as f64 - 1.;
        self.rotation * self.canvas_to_viewport(cx, cy)
    }

    /// Map centered canvas coordinates onto the viewport rectangle.
    fn canvas_to_viewport(&self, cx: f64, cy: f64) -> Vector3 {
        Vector3::new(
            cx * self.viewport_width / self.vw as f64,
            cy * self.viewport_height / self.vh as f64,
            self.projection_plane_z,
        )
    }
}
