use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext, WebGlBuffer, WebGlProgram,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};
use crate::data::CameraConfig;
use crate::error::{CarouselError, Result};
use crate::math::{Mat4, Vec3};
use crate::mesh::{Mesh, Placement, CARD_HEIGHT, CARD_WIDTH};
use super::shaders::{CARD_FRAGMENT_SHADER, CARD_VERTEX_SHADER};
use super::surface::{MeshId, RendererSurface};
use super::webgl::WebGLContext;

/// Highest device pixel ratio the drawing buffer follows
const MAX_PIXEL_RATIO: f32 = 2.0;

// Scene lighting and fog
const AMBIENT_STRENGTH: f32 = 0.8;
const LIGHT_DIRECTION: Vec3 = Vec3::new(0.0, 1.0, 0.5);
const LIGHT_STRENGTH: f32 = 1.0;
const FOG_NEAR: f32 = 1.0;
const FOG_FAR: f32 = 5.0;
const PLACEHOLDER_RGBA: [u8; 4] = [48, 48, 48, 255];

/// Cached uniform locations for the card shader
struct CardUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
    ambient_strength: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
    light_strength: Option<WebGlUniformLocation>,
    fog_color: Option<WebGlUniformLocation>,
    fog_near: Option<WebGlUniformLocation>,
    fog_far: Option<WebGlUniformLocation>,
}

/// Per-card draw state
struct CardSlot {
    model: Mat4,
    /// `None` until the card's image has loaded
    texture: Option<WebGlTexture>,
}

/// WebGL2 renderer for the carousel's image cards
pub struct RenderPipeline {
    ctx: WebGLContext,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    uniforms: CardUniforms,

    // Shared card quad
    quad_vao: WebGlVertexArrayObject,
    _quad_vertex_buffer: WebGlBuffer,
    _quad_index_buffer: WebGlBuffer,
    quad_index_count: i32,

    placeholder: WebGlTexture,
    cards: Vec<CardSlot>,

    // Drawing buffer size in device pixels
    width: i32,
    height: i32,
    aspect: f32,

    camera_position: Vec3,
    camera_target: Vec3,
    fov: f32,
    near: f32,
    far: f32,
}

impl RenderPipeline {
    /// Set up the WebGL2 context on `canvas` with room for `card_count` cards
    pub fn new(canvas: HtmlCanvasElement, card_count: usize, camera: &CameraConfig) -> Result<Self> {
        let gl = canvas
            .get_context("webgl2")
            .map_err(|e| CarouselError::BrowserApi(format!("getContext failed: {:?}", e)))?
            .ok_or_else(|| CarouselError::BrowserApi("WebGL2 not supported".to_string()))?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| CarouselError::BrowserApi("context is not WebGL2".to_string()))?;
        let ctx = WebGLContext::new(gl);

        let program = ctx.create_program(CARD_VERTEX_SHADER, CARD_FRAGMENT_SHADER)?;
        let uniforms = CardUniforms {
            model: ctx.get_uniform_location(&program, "u_model"),
            view: ctx.get_uniform_location(&program, "u_view"),
            projection: ctx.get_uniform_location(&program, "u_projection"),
            texture: ctx.get_uniform_location(&program, "u_texture"),
            ambient_strength: ctx.get_uniform_location(&program, "u_ambient_strength"),
            light_dir: ctx.get_uniform_location(&program, "u_light_dir"),
            light_strength: ctx.get_uniform_location(&program, "u_light_strength"),
            fog_color: ctx.get_uniform_location(&program, "u_fog_color"),
            fog_near: ctx.get_uniform_location(&program, "u_fog_near"),
            fog_far: ctx.get_uniform_location(&program, "u_fog_far"),
        };

        let quad = Mesh::card(CARD_WIDTH, CARD_HEIGHT);
        let (quad_vao, quad_vertex_buffer, quad_index_buffer) = Self::upload_quad(&ctx, &quad)?;

        let placeholder = ctx.create_solid_texture(PLACEHOLDER_RGBA)?;
        let cards = (0..card_count)
            .map(|_| CardSlot {
                model: Mat4::identity(),
                texture: None,
            })
            .collect();

        let width = canvas.width() as i32;
        let height = canvas.height() as i32;
        let camera_position = camera.position();

        Ok(Self {
            ctx,
            canvas,
            program,
            uniforms,
            quad_vao,
            _quad_vertex_buffer: quad_vertex_buffer,
            _quad_index_buffer: quad_index_buffer,
            quad_index_count: quad.index_data().len() as i32,
            placeholder,
            cards,
            width,
            height,
            aspect: width.max(1) as f32 / height.max(1) as f32,
            camera_position,
            // looks down -Z like a default perspective camera
            camera_target: camera_position - Vec3::FORWARD,
            fov: camera.fov_radians(),
            near: camera.near,
            far: camera.far,
        })
    }

    fn upload_quad(
        ctx: &WebGLContext,
        quad: &Mesh,
    ) -> Result<(WebGlVertexArrayObject, WebGlBuffer, WebGlBuffer)> {
        let gl = &ctx.gl;

        let vao = ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = ctx.create_buffer_f32(&quad.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        let index_buffer = ctx.create_index_buffer(quad.index_data(), WebGl2RenderingContext::STATIC_DRAW)?;

        // Layout: position(3) + normal(3) + uv(2) = 8 floats
        let stride = 8 * 4;

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));
        gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));

        // Position (location 0)
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, WebGl2RenderingContext::FLOAT, false, stride, 0);

        // Normal (location 1)
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 3, WebGl2RenderingContext::FLOAT, false, stride, 12);

        // UV (location 2)
        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_with_i32(2, 2, WebGl2RenderingContext::FLOAT, false, stride, 24);

        gl.bind_vertex_array(None);

        Ok((vao, vertex_buffer, index_buffer))
    }

    /// Give a card its image. Cards without one keep drawing the placeholder.
    pub fn set_card_image(&mut self, mesh: MeshId, image: &HtmlImageElement) -> Result<()> {
        let slot = self
            .cards
            .get_mut(mesh)
            .ok_or_else(|| CarouselError::Graphics(format!("no card with id {}", mesh)))?;
        let texture = self.ctx.create_image_texture(image)?;
        if let Some(old) = slot.texture.replace(texture) {
            self.ctx.gl.delete_texture(Some(&old));
        }
        Ok(())
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

impl RendererSurface for RenderPipeline {
    fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    fn place_mesh(&mut self, mesh: MeshId, placement: &Placement) {
        if let Some(slot) = self.cards.get_mut(mesh) {
            slot.model = placement.model;
        }
    }

    fn render(&mut self) {
        let gl = &self.ctx.gl;

        let projection = Mat4::perspective(self.fov, self.aspect, self.near, self.far);
        let view = Mat4::look_at(self.camera_position, self.camera_target, Vec3::UP);

        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(0.0, 0.0, 0.0, 1.0);
        self.ctx.enable_depth_test();

        gl.use_program(Some(&self.program));

        let u = &self.uniforms;
        self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
        self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
        self.ctx.uniform_1f(u.ambient_strength.as_ref(), AMBIENT_STRENGTH);
        self.ctx.uniform_3f(u.light_dir.as_ref(), LIGHT_DIRECTION.x, LIGHT_DIRECTION.y, LIGHT_DIRECTION.z);
        self.ctx.uniform_1f(u.light_strength.as_ref(), LIGHT_STRENGTH);
        self.ctx.uniform_3f(u.fog_color.as_ref(), 0.0, 0.0, 0.0);
        self.ctx.uniform_1f(u.fog_near.as_ref(), FOG_NEAR);
        self.ctx.uniform_1f(u.fog_far.as_ref(), FOG_FAR);

        gl.active_texture(WebGl2RenderingContext::TEXTURE0);
        self.ctx.uniform_1i(u.texture.as_ref(), 0);

        gl.bind_vertex_array(Some(&self.quad_vao));
        for card in &self.cards {
            let texture = card.texture.as_ref().unwrap_or(&self.placeholder);
            gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, Some(texture));
            self.ctx.uniform_matrix4fv(u.model.as_ref(), card.model.as_slice());
            gl.draw_elements_with_i32(
                WebGl2RenderingContext::TRIANGLES,
                self.quad_index_count,
                WebGl2RenderingContext::UNSIGNED_INT,
                0,
            );
        }
        gl.bind_vertex_array(None);
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) -> Result<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };

        let buffer_width = (width as f32 * ratio).round() as u32;
        let buffer_height = (height as f32 * ratio).round() as u32;
        self.canvas.set_width(buffer_width);
        self.canvas.set_height(buffer_height);

        self.width = buffer_width as i32;
        self.height = buffer_height as i32;
        self.aspect = width as f32 / height as f32;
        Ok(())
    }
}
