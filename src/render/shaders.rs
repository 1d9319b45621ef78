/// Vertex shader for image cards
pub const CARD_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out vec2 v_uv;
out float v_view_depth;

void main() {
    vec4 world_pos = u_model * vec4(a_position, 1.0);
    vec4 view_pos = u_view * world_pos;

    v_normal = mat3(u_model) * a_normal;
    v_uv = a_uv;
    v_view_depth = -view_pos.z;

    gl_Position = u_projection * view_pos;
}
"#;

/// Fragment shader: textured card with ambient + directional light and linear fog
pub const CARD_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec2 v_uv;
in float v_view_depth;

uniform sampler2D u_texture;
uniform float u_ambient_strength;
uniform vec3 u_light_dir;
uniform float u_light_strength;
uniform vec3 u_fog_color;
uniform float u_fog_near;
uniform float u_fog_far;

out vec4 frag_color;

void main() {
    vec4 albedo = texture(u_texture, v_uv);

    vec3 normal = normalize(v_normal);
    if (!gl_FrontFacing) {
        normal = -normal;
    }
    float diffuse = max(dot(normal, normalize(u_light_dir)), 0.0) * u_light_strength;
    vec3 lit = albedo.rgb * min(u_ambient_strength + diffuse, 1.5);

    float fog = smoothstep(u_fog_near, u_fog_far, v_view_depth);
    frag_color = vec4(mix(lit, u_fog_color, fog), albedo.a);
}
"#;
