// src/renderer/camera.rs
use glam::Mat4;

/// Maps canvas units (origin top-left, y down) onto clip space, stretching
/// the canvas over the whole viewport.
#[derive(Debug, Clone)]
pub struct Camera {
    view_projection_matrix: Mat4,
}

impl Camera {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        // top and bottom swapped so y grows downwards
        let view_projection_matrix =
            Mat4::orthographic_rh(0.0, canvas_width, canvas_height, 0.0, -1.0, 1.0);
        Self { view_projection_matrix }
    }

    pub fn get_view_projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix
    }
}
