//! Fixed perspective camera looking at the origin

use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

const FOV_Y_DEGREES: f32 = 75.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;
/// Far enough back that a fully opened radius-10 pattern stays in frame
pub const CAMERA_DISTANCE: f32 = 30.0;

#[derive(Clone, Debug)]
pub struct Camera {
    eye: Point3<f32>,
    aspect: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, CAMERA_DISTANCE),
            aspect: aspect_ratio(width, height),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view(&self) -> Matrix4<f32> {
        Isometry3::look_at_rh(&self.eye, &Point3::origin(), &Vector3::y()).to_homogeneous()
    }

    pub fn projection(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect, FOV_Y_DEGREES.to_radians(), Z_NEAR, Z_FAR).to_homogeneous()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view().into(),
            projection: self.projection().into(),
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width.max(1) as f32 / height as f32
    }
}

/// View and projection kept separate so the shader can billboard in view space
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}
