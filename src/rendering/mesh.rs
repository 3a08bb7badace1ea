use crate::internal_prelude::*;
use crate::rendering::data::Vertex;

const WHITE: glm::Vec3 = glm::Vec3::new(1.0, 1.0, 1.0);

/// two triangles spanning [-0.5, 0.5] on both axes, uv (0, 0) in the bottom left
pub const UNIT_QUAD_VERTICES: [Vertex; QUAD_VERTEX_COUNT as usize] = [
    Vertex::new(glm::Vec3::new(-0.5, 0.5, 0.0), WHITE, glm::Vec2::new(0.0, 1.0)),
    Vertex::new(glm::Vec3::new(0.5, -0.5, 0.0), WHITE, glm::Vec2::new(1.0, 0.0)),
    Vertex::new(glm::Vec3::new(-0.5, -0.5, 0.0), WHITE, glm::Vec2::new(0.0, 0.0)),
    Vertex::new(glm::Vec3::new(-0.5, 0.5, 0.0), WHITE, glm::Vec2::new(0.0, 1.0)),
    Vertex::new(glm::Vec3::new(0.5, 0.5, 0.0), WHITE, glm::Vec2::new(1.0, 1.0)),
    Vertex::new(glm::Vec3::new(0.5, -0.5, 0.0), WHITE, glm::Vec2::new(1.0, 0.0)),
];

/// the quad mesh every sprite is drawn with
pub struct QuadMesh {
    vao: GLuint,
    vbo: GLuint,
    backend: Rc<dyn GpuBackend>,
}

impl QuadMesh {
    /// uploads the unit quad
    pub fn unit_quad(backend: &Rc<dyn GpuBackend>) -> Self {
        let (vao, vbo) = backend.create_vertex_array(&UNIT_QUAD_VERTICES);
        Self {
            vao,
            vbo,
            backend: Rc::clone(backend),
        }
    }

    #[inline]
    pub fn vao(&self) -> GLuint {
        self.vao
    }

    /// draws the quad with whatever program and texture are bound and unbinds the vertex array afterwards
    pub(crate) fn draw(&self) {
        self.backend.bind_vertex_array(self.vao);
        self.backend.draw_triangles(0, QUAD_VERTEX_COUNT);
        self.backend.bind_vertex_array(NO_OBJECT);
    }
}

impl Debug for QuadMesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadMesh")
            .field("vao", &self.vao)
            .field("vbo", &self.vbo)
            .finish()
    }
}

impl Drop for QuadMesh {
    fn drop(&mut self) {
        self.backend.delete_vertex_array(self.vao, self.vbo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_quad_bounds_test() {
        for vertex in UNIT_QUAD_VERTICES.iter() {
            assert_eq!(vertex.position.x.abs(), 0.5);
            assert_eq!(vertex.position.y.abs(), 0.5);
            assert_eq!(vertex.position.z, 0.0);
            // uv follows the position
            assert_eq!(vertex.uv_coords.x, vertex.position.x + 0.5);
            assert_eq!(vertex.uv_coords.y, vertex.position.y + 0.5);
        }
    }

    #[test]
    fn quad_mesh_lifetime_test() {
        let recording = Rc::new(RecordingBackend::new());
        let backend: Rc<dyn GpuBackend> = recording.clone();
        let mesh = QuadMesh::unit_quad(&backend);
        let (vao, vbo) = (mesh.vao, mesh.vbo);
        mesh.draw();
        drop(mesh);

        assert_eq!(
            recording.commands(),
            vec![
                GpuCommand::CreateVertexArray {
                    vao,
                    vbo,
                    vertices: 6
                },
                GpuCommand::BindVertexArray(vao),
                GpuCommand::DrawTriangles { first: 0, count: 6 },
                GpuCommand::BindVertexArray(NO_OBJECT),
                GpuCommand::DeleteVertexArray { vao, vbo },
            ]
        );
    }
}
