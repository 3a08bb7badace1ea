use crate::glm;
use crate::utils::constants::{FAR_PLANE_SPRITE, NEAR_PLANE_SPRITE, Z_AXIS};

/// Converts a ``Vec3`` to a ``Vec4`` by adding a ``1.0`` in the ``w`` slot.
pub fn to_vec4(v: &glm::Vec3) -> glm::Vec4 {
    glm::vec4(v.x, v.y, v.z, 1.0)
}

/// Converts ``v`` to a ``Vec4`` and right-multiplies it to ``m`` and returns the result converted back to a ``Vec3``.
pub fn mult_mat4_vec3(m: &glm::Mat4, v: &glm::Vec3) -> glm::Vec3 {
    (m * to_vec4(v)).xyz()
}

/// Builds ``translate(position) * rotate(rotation around z) * scale(size)``, so a unit quad is scaled and rotated around its own center before it is placed.
pub fn model_transform(position: &glm::Vec2, size: &glm::Vec2, rotation: f32) -> glm::Mat4 {
    let model = glm::translate(&glm::Mat4::identity(), &glm::vec3(position.x, position.y, 0.0));
    let model = glm::rotate(&model, rotation.to_radians(), &Z_AXIS);
    glm::scale(&model, &glm::vec3(size.x, size.y, 1.0))
}

/// Orthographic projection over the window pixels with the origin in the top left corner.
pub fn ortho_projection(width: u32, height: u32) -> glm::Mat4 {
    glm::ortho(
        0.0,
        width as f32,
        height as f32,
        0.0,
        NEAR_PLANE_SPRITE,
        FAR_PLANE_SPRITE,
    )
}
