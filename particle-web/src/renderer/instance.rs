//! Per-particle GPU data - one billboard quad instance per particle

use crate::particles::ParticleEngine;

/// World-space half-width of a particle quad at size 1.0
pub const POINT_SIZE: f32 = 0.15;
const POINT_ALPHA: f32 = 0.8;

/// Corner of the unit billboard quad, shared by every instance
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub corner: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![
        0 => Float32x2
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Two triangles covering [-1, 1]²
pub const QUAD_VERTICES: [QuadVertex; 6] = [
    QuadVertex { corner: [-1.0, -1.0] },
    QuadVertex { corner: [1.0, -1.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [-1.0, -1.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [-1.0, 1.0] },
];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    /// Rendered position, float offset included
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl ParticleInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x3,
        2 => Float32,
        3 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Snapshot the engine into instance data for this frame
pub fn build_instances(engine: &ParticleEngine) -> Vec<ParticleInstance> {
    let buffers = engine.buffers();
    (0..buffers.len())
        .map(|i| {
            let p = buffers.rendered_position(i);
            let [r, g, b] = buffers.base_colors[i].to_array();
            ParticleInstance {
                position: [p.x, p.y, p.z],
                size: buffers.sizes[i] * POINT_SIZE,
                color: [r, g, b, POINT_ALPHA],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::EngineParams;

    #[test]
    fn instance_layout_has_no_padding() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
        assert_eq!(std::mem::size_of::<QuadVertex>(), 8);
    }

    #[test]
    fn one_instance_per_particle() {
        let mut engine = ParticleEngine::create(EngineParams { count: 64, ..EngineParams::default() });
        engine.advance(10.0);
        let instances = build_instances(&engine);
        assert_eq!(instances.len(), 64);

        let buffers = engine.buffers();
        for (i, instance) in instances.iter().enumerate() {
            let p = buffers.rendered_position(i);
            assert_eq!(instance.position, [p.x, p.y, p.z]);
            assert!(instance.size >= 0.5 * POINT_SIZE && instance.size <= 1.5 * POINT_SIZE);
            assert_eq!(&instance.color[..3], &buffers.base_colors[i].to_array()[..]);
            assert_eq!(instance.color[3], POINT_ALPHA);
        }
    }

    #[test]
    fn disposed_engine_draws_nothing() {
        let mut engine = ParticleEngine::create(EngineParams { count: 10, ..EngineParams::default() });
        engine.dispose();
        assert!(build_instances(&engine).is_empty());
    }
}
