//! A [`GraphicsContext`] that records calls instead of talking to a GPU.
//!
//! Handles are sequential integers. Attribute and uniform names are read from
//! the declarations in the linked GLSL, so location lookups behave like a real
//! driver would for the shaders the crate ships.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::context::*;

/// One recorded context call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, usize),
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    VertexAttribPointer {
        index: u32,
        components: i32,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttribArray(u32),
    CreateTexture(u32),
    ActiveTexture(u32),
    BindTexture(Option<u32>),
    TexImage {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
    SamplerParams(SamplerParams),
    GenerateMipmap,
    DeleteTexture(u32),
    UniformMatrix4(u32, [f32; 16]),
    UniformI32(u32, i32),
    Clear { color: [f32; 4], depth: f32 },
    EnableDepthTest(DepthFunc),
    DrawElements {
        mode: Primitive,
        count: i32,
        index_type: IndexType,
        offset: i32,
    },
    DrawArrays {
        mode: Primitive,
        first: i32,
        count: i32,
    },
    SetViewport(i32, i32),
}

#[derive(Default)]
struct State {
    next_handle: u32,
    calls: Vec<Call>,
    shaders: HashMap<u32, (ShaderStage, String, bool)>,
    programs: HashMap<u32, Vec<u32>>,
    linked: HashMap<u32, (Vec<String>, Vec<String>)>,
    uniform_handles: HashMap<(u32, String), u32>,
    live: HashSet<u32>,
    viewport: (i32, i32),
    fail_link: bool,
}

impl State {
    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.live.insert(self.next_handle);
        self.next_handle
    }
}

/// Records every call made through [`GraphicsContext`].
pub struct RecordingContext {
    state: RefCell<State>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State {
                viewport: (640, 480),
                ..State::default()
            }),
        }
    }

    /// Makes every subsequent link fail with a diagnostic log.
    pub fn failing_link() -> Self {
        let ctx = Self::new();
        ctx.state.borrow_mut().fail_link = true;
        ctx
    }

    pub fn with_viewport(width: i32, height: i32) -> Self {
        let ctx = Self::new();
        ctx.state.borrow_mut().viewport = (width, height);
        ctx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Number of handles created and not yet deleted.
    pub fn live_objects(&self) -> usize {
        self.state.borrow().live.len()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn release(&self, handle: u32) {
        self.state.borrow_mut().live.remove(&handle);
    }
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A very small stand-in for a GLSL front end: a source must declare `main`
/// and keep its brackets balanced.
fn check_source(source: &str) -> Result<(), String> {
    if !source.contains("void main") {
        return Err("0:0: error: missing entry point `main`".to_string());
    }
    let mut stack = Vec::new();
    for (line_no, line) in source.lines().enumerate() {
        for c in line.chars() {
            match c {
                '(' | '{' | '[' => stack.push(c),
                ')' | '}' | ']' => {
                    let open = match c {
                        ')' => '(',
                        '}' => '{',
                        _ => '[',
                    };
                    if stack.pop() != Some(open) {
                        return Err(format!("0:{}: syntax error: unexpected '{}'", line_no + 1, c));
                    }
                }
                _ => {}
            }
        }
    }
    if let Some(open) = stack.pop() {
        return Err(format!("0:0: syntax error: unclosed '{}'", open));
    }
    Ok(())
}

/// Names declared with the given storage qualifier, e.g. `in vec3 a_position;`.
fn declared(source: &str, qualifier: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(qualifier))
        .filter(|rest| rest.starts_with(' '))
        .filter_map(|rest| rest.trim().trim_end_matches(';').split_whitespace().last())
        .map(str::to_string)
        .collect()
}

impl GraphicsContext for RecordingContext {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type Texture = u32;
    type UniformLocation = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.handle();
        state.shaders.insert(id, (stage, String::new(), false));
        state.calls.push(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(entry) = self.state.borrow_mut().shaders.get_mut(&shader) {
            entry.1 = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        if let Some(entry) = state.shaders.get_mut(&shader) {
            entry.2 = check_source(&entry.1).is_ok();
        }
        state.calls.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|entry| entry.2)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .and_then(|entry| check_source(&entry.1).err())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.release(shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.handle();
        state.programs.insert(id, Vec::new());
        state.calls.push(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        if let Some(attached) = state.programs.get_mut(&program) {
            attached.push(shader);
        }
        state.calls.push(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::LinkProgram(program));
        if state.fail_link {
            return;
        }
        let mut attributes = Vec::new();
        let mut uniforms = Vec::new();
        for shader in state.programs.get(&program).cloned().unwrap_or_default() {
            if let Some((stage, source, _)) = state.shaders.get(&shader) {
                if *stage == ShaderStage::Vertex {
                    attributes.extend(declared(source, "in"));
                }
                uniforms.extend(declared(source, "uniform"));
            }
        }
        state.linked.insert(program, (attributes, uniforms));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().linked.contains_key(&program)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: vertex outputs do not match fragment inputs".to_string()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.release(program);
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let state = self.state.borrow();
        let (attributes, _) = state.linked.get(&program)?;
        attributes
            .iter()
            .position(|attribute| attribute == name)
            .map(|index| index as u32)
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        let mut state = self.state.borrow_mut();
        let declared = state
            .linked
            .get(&program)?
            .1
            .iter()
            .any(|uniform| uniform == name);
        if !declared {
            return None;
        }
        let key = (program, name.to_string());
        if let Some(location) = state.uniform_handles.get(&key) {
            return Some(*location);
        }
        let location = state.uniform_handles.len() as u32;
        state.uniform_handles.insert(key, location);
        Some(location)
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.handle();
        state.calls.push(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_static_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.release(buffer);
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.handle();
        state.calls.push(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
        self.release(vertex_array);
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::VertexAttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn create_texture(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.handle();
        state.calls.push(Call::CreateTexture(id));
        Ok(id)
    }

    fn active_texture_unit(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture_2d(&self, texture: Option<u32>) {
        self.record(Call::BindTexture(texture));
    }

    fn tex_image_2d_rgba(&self, width: u32, height: u32, pixels: &[u8]) {
        self.record(Call::TexImage {
            width,
            height,
            pixels: pixels.to_vec(),
        });
    }

    fn tex_sampler_params(&self, params: SamplerParams) {
        self.record(Call::SamplerParams(params));
    }

    fn generate_mipmap_2d(&self) {
        self.record(Call::GenerateMipmap);
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
        self.release(texture);
    }

    fn uniform_matrix4(&self, location: &u32, columns: &[f32; 16]) {
        self.record(Call::UniformMatrix4(*location, *columns));
    }

    fn uniform_i32(&self, location: &u32, value: i32) {
        self.record(Call::UniformI32(*location, value));
    }

    fn clear_color_and_depth(&self, color: [f32; 4], depth: f32) {
        self.record(Call::Clear { color, depth });
    }

    fn enable_depth_test(&self, func: DepthFunc) {
        self.record(Call::EnableDepthTest(func));
    }

    fn draw_elements(&self, mode: Primitive, count: i32, index_type: IndexType, offset: i32) {
        self.record(Call::DrawElements {
            mode,
            count,
            index_type,
            offset,
        });
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        self.record(Call::DrawArrays { mode, first, count });
    }

    fn viewport_size(&self) -> (i32, i32) {
        self.state.borrow().viewport
    }

    fn set_viewport(&self, width: i32, height: i32) {
        let mut state = self.state.borrow_mut();
        state.viewport = (width, height);
        state.calls.push(Call::SetViewport(width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unbalanced_source() {
        assert!(check_source("void main() { }").is_ok());
        assert!(check_source("void main() { vec4(1.0; }").is_err());
        assert!(check_source("int x;").is_err());
    }

    #[test]
    fn reads_declared_names() {
        let source = "#version 330 core\nin vec3 a_position;\nin vec2 a_tex_coord;\nuniform mat4 u_projection;\nvoid main() {}";
        assert_eq!(declared(source, "in"), vec!["a_position", "a_tex_coord"]);
        assert_eq!(declared(source, "uniform"), vec!["u_projection"]);
    }
}
