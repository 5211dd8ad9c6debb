use cogs_scene::{FrameData, Renderer, SurfaceSize, VectorVertex};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject,
};

const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 a_position;
in vec4 a_color;
uniform vec2 u_resolution;
out vec4 v_color;

void main() {
    // Surface pixels (origin top-left, Y down) to clip space.
    vec2 clip = (a_position / u_resolution) * 2.0 - 1.0;
    gl_Position = vec4(clip.x, -clip.y, 0.0, 1.0);
    v_color = a_color;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
in vec4 v_color;
out vec4 out_color;

void main() {
    out_color = v_color;
}
"#;

/// WebGL2 backend: clears to the scene background and draws the
/// tessellated stroke triangles in one call.
pub struct WebGlRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    resolution: Option<WebGlUniformLocation>,
    /// Device pixels per CSS pixel for the backing store.
    pixel_ratio: f64,
}

impl WebGlRenderer {
    /// Create a detached canvas with an antialiased WebGL2 context.
    pub fn new(document: &Document, pixel_ratio: f64) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("antialias"), &JsValue::TRUE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        let vertex = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));

        let vao = gl.create_vertex_array().ok_or("could not create vertex array")?;
        let buffer = gl.create_buffer().ok_or("could not create buffer")?;
        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));

        let stride = VectorVertex::STRIDE_BYTES as i32;
        let position = attrib_location(&gl, &program, "a_position")?;
        gl.enable_vertex_attrib_array(position);
        gl.vertex_attrib_pointer_with_i32(position, 2, GL::FLOAT, false, stride, 0);
        let color = attrib_location(&gl, &program, "a_color")?;
        gl.enable_vertex_attrib_array(color);
        gl.vertex_attrib_pointer_with_i32(color, 4, GL::FLOAT, false, stride, 2 * 4);
        gl.bind_vertex_array(None);

        let resolution = gl.get_uniform_location(&program, "u_resolution");

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);

        Ok(Self {
            canvas,
            gl,
            program,
            vao,
            buffer,
            resolution,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
        })
    }

    /// The canvas element. Not attached to the document until the host fades in.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Renderer for WebGlRenderer {
    fn backend(&self) -> &'static str {
        "webgl2"
    }

    fn draw(&mut self, frame: &FrameData) {
        let gl = &self.gl;
        let bg = frame.background;
        gl.clear_color(bg.r, bg.g, bg.b, bg.a);
        gl.clear(GL::COLOR_BUFFER_BIT);

        let count = frame.vertex_count();
        if count == 0 {
            return;
        }

        gl.use_program(Some(&self.program));
        gl.uniform2f(
            self.resolution.as_ref(),
            frame.surface.width as f32,
            frame.surface.height as f32,
        );
        gl.bind_vertex_array(Some(&self.vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffer));
        // SAFETY: the view aliases wasm memory; it is consumed by
        // buffer_data before anything can allocate and move the slice.
        unsafe {
            let view = js_sys::Float32Array::view(frame.vertices);
            gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::DYNAMIC_DRAW);
        }
        gl.draw_arrays(GL::TRIANGLES, 0, count as i32);
        gl.bind_vertex_array(None);
    }

    fn resize(&mut self, size: SurfaceSize) {
        let width = ((size.width as f64 * self.pixel_ratio).round() as u32).max(1);
        let height = ((size.height as f64 * self.pixel_ratio).round() as u32).max(1);
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        let css = style
            .set_property("width", &format!("{}px", size.width))
            .and_then(|_| style.set_property("height", &format!("{}px", size.height)));
        if let Err(err) = css {
            log::error!("webgl2: failed to size canvas: {err:?}");
        }

        self.gl.viewport(0, 0, width as i32, height as i32);
    }
}

fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or("could not create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(JsValue::from(gl.get_shader_info_log(&shader).unwrap_or_default()))
    }
}

fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl.create_program().ok_or("could not create program")?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(JsValue::from(gl.get_program_info_log(&program).unwrap_or_default()))
    }
}

fn attrib_location(gl: &GL, program: &WebGlProgram, name: &str) -> Result<u32, JsValue> {
    let location = gl.get_attrib_location(program, name);
    if location < 0 {
        return Err(JsValue::from(format!("attribute {name} not found")));
    }
    Ok(location as u32)
}
