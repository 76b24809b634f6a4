use bytemuck::{Pod, Zeroable};

/// Both cubes are drawn as non-indexed triangle lists.
pub const CUBE_VERTEX_COUNT: u32 = 36;

/// Position + normal, used by the lit cube and the light marker.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Position + texture coordinate, used by the spinning textured cubes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl LitVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LitVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl TexturedVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Unit cube centred on the origin with per-face normals.
pub fn lit_cube_vertices() -> Vec<LitVertex> {
    let p = 0.5_f32;
    let v = |position: [f32; 3], normal: [f32; 3]| LitVertex { position, normal };
    #[rustfmt::skip]
    let vertices = vec![
        // -Z face
        v([-p, -p, -p], [0.0, 0.0, -1.0]), v([ p, -p, -p], [0.0, 0.0, -1.0]), v([ p,  p, -p], [0.0, 0.0, -1.0]),
        v([ p,  p, -p], [0.0, 0.0, -1.0]), v([-p,  p, -p], [0.0, 0.0, -1.0]), v([-p, -p, -p], [0.0, 0.0, -1.0]),
        // +Z face
        v([-p, -p,  p], [0.0, 0.0, 1.0]), v([ p, -p,  p], [0.0, 0.0, 1.0]), v([ p,  p,  p], [0.0, 0.0, 1.0]),
        v([ p,  p,  p], [0.0, 0.0, 1.0]), v([-p,  p,  p], [0.0, 0.0, 1.0]), v([-p, -p,  p], [0.0, 0.0, 1.0]),
        // -X face
        v([-p,  p,  p], [-1.0, 0.0, 0.0]), v([-p,  p, -p], [-1.0, 0.0, 0.0]), v([-p, -p, -p], [-1.0, 0.0, 0.0]),
        v([-p, -p, -p], [-1.0, 0.0, 0.0]), v([-p, -p,  p], [-1.0, 0.0, 0.0]), v([-p,  p,  p], [-1.0, 0.0, 0.0]),
        // +X face
        v([ p,  p,  p], [1.0, 0.0, 0.0]), v([ p,  p, -p], [1.0, 0.0, 0.0]), v([ p, -p, -p], [1.0, 0.0, 0.0]),
        v([ p, -p, -p], [1.0, 0.0, 0.0]), v([ p, -p,  p], [1.0, 0.0, 0.0]), v([ p,  p,  p], [1.0, 0.0, 0.0]),
        // -Y face
        v([-p, -p, -p], [0.0, -1.0, 0.0]), v([ p, -p, -p], [0.0, -1.0, 0.0]), v([ p, -p,  p], [0.0, -1.0, 0.0]),
        v([ p, -p,  p], [0.0, -1.0, 0.0]), v([-p, -p,  p], [0.0, -1.0, 0.0]), v([-p, -p, -p], [0.0, -1.0, 0.0]),
        // +Y face
        v([-p,  p, -p], [0.0, 1.0, 0.0]), v([ p,  p, -p], [0.0, 1.0, 0.0]), v([ p,  p,  p], [0.0, 1.0, 0.0]),
        v([ p,  p,  p], [0.0, 1.0, 0.0]), v([-p,  p,  p], [0.0, 1.0, 0.0]), v([-p,  p, -p], [0.0, 1.0, 0.0]),
    ];
    vertices
}

/// Unit cube centred on the origin with per-face texture coordinates.
pub fn textured_cube_vertices() -> Vec<TexturedVertex> {
    let p = 0.5_f32;
    let v = |position: [f32; 3], uv: [f32; 2]| TexturedVertex { position, uv };
    #[rustfmt::skip]
    let vertices = vec![
        v([-p, -p, -p], [0.0, 0.0]), v([ p, -p, -p], [1.0, 0.0]), v([ p,  p, -p], [1.0, 1.0]),
        v([ p,  p, -p], [1.0, 1.0]), v([-p,  p, -p], [0.0, 1.0]), v([-p, -p, -p], [0.0, 0.0]),

        v([-p, -p,  p], [0.0, 0.0]), v([ p, -p,  p], [1.0, 0.0]), v([ p,  p,  p], [1.0, 1.0]),
        v([ p,  p,  p], [1.0, 1.0]), v([-p,  p,  p], [0.0, 1.0]), v([-p, -p,  p], [0.0, 0.0]),

        v([-p,  p,  p], [1.0, 0.0]), v([-p,  p, -p], [1.0, 1.0]), v([-p, -p, -p], [0.0, 1.0]),
        v([-p, -p, -p], [0.0, 1.0]), v([-p, -p,  p], [0.0, 0.0]), v([-p,  p,  p], [1.0, 0.0]),

        v([ p,  p,  p], [1.0, 0.0]), v([ p,  p, -p], [1.0, 1.0]), v([ p, -p, -p], [0.0, 1.0]),
        v([ p, -p, -p], [0.0, 1.0]), v([ p, -p,  p], [0.0, 0.0]), v([ p,  p,  p], [1.0, 0.0]),

        v([-p, -p, -p], [0.0, 1.0]), v([ p, -p, -p], [1.0, 1.0]), v([ p, -p,  p], [1.0, 0.0]),
        v([ p, -p,  p], [1.0, 0.0]), v([-p, -p,  p], [0.0, 0.0]), v([-p, -p, -p], [0.0, 1.0]),

        v([-p,  p, -p], [0.0, 1.0]), v([ p,  p, -p], [1.0, 1.0]), v([ p,  p,  p], [1.0, 0.0]),
        v([ p,  p,  p], [1.0, 0.0]), v([-p,  p,  p], [0.0, 0.0]), v([-p,  p, -p], [0.0, 1.0]),
    ];
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubes_have_expected_vertex_count() {
        assert_eq!(lit_cube_vertices().len() as u32, CUBE_VERTEX_COUNT);
        assert_eq!(textured_cube_vertices().len() as u32, CUBE_VERTEX_COUNT);
    }

    #[test]
    fn lit_normals_point_out_of_their_face() {
        for vertex in lit_cube_vertices() {
            let n = vertex.normal;
            let axis = n.iter().position(|c| *c != 0.0).unwrap();
            assert_eq!(vertex.position[axis], 0.5 * n[axis]);
        }
    }

    #[test]
    fn positions_are_unit_cube_corners() {
        for vertex in textured_cube_vertices() {
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
            assert!(vertex.uv.iter().all(|c| *c == 0.0 || *c == 1.0));
        }
    }

    #[test]
    fn vertex_layouts_match_struct_sizes() {
        assert_eq!(LitVertex::layout().array_stride, 24);
        assert_eq!(TexturedVertex::layout().array_stride, 20);
    }
}
