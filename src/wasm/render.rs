use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, Clamped, JsCast};
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, ImageData,
    WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject, Window,
};

use super::scroll::{viewport_height, WindowScroll};
use super::sections::WordReveal;
use crate::config::SiteConfig;
use crate::dissolve::{rasterize, DissolveShape, ShaderParameters};
use crate::driver::{RevealDriver, Surface, SurfaceSize};
use crate::error::{Result, SiteError};
use crate::progress::{Geometry, ProgressSource};
use crate::shaders::{DISSOLVE_FRAGMENT, FULLSCREEN_VERTEX};

/// Widest buffer the software fallback will shade per frame.
const CPU_MAX_WIDTH: u32 = 240;

struct Uniforms {
    progress: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    spread: Option<WebGlUniformLocation>,
    bias: Option<WebGlUniformLocation>,
    frequency: Option<WebGlUniformLocation>,
}

/// The dissolve drawn by WebGL2 as one full-screen triangle.
pub struct GlSurface {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    uniforms: Uniforms,
    shape: DissolveShape,
}

impl GlSurface {
    pub fn new(canvas: &HtmlCanvasElement, shape: DissolveShape) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(SiteError::ContextUnavailable("webgl2"))?
            .dyn_into()
            .map_err(|_| SiteError::ContextUnavailable("webgl2"))?;

        let program = link_program(&gl, FULLSCREEN_VERTEX, DISSOLVE_FRAGMENT)?;
        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| SiteError::Js("failed to create vertex array".into()))?;

        let uniforms = Uniforms {
            progress: gl.get_uniform_location(&program, "uProgress"),
            resolution: gl.get_uniform_location(&program, "uResolution"),
            color: gl.get_uniform_location(&program, "uColor"),
            spread: gl.get_uniform_location(&program, "uSpread"),
            bias: gl.get_uniform_location(&program, "uBias"),
            frequency: gl.get_uniform_location(&program, "uFrequency"),
        };

        gl.disable(GL::DEPTH_TEST);
        gl.disable(GL::BLEND);

        Ok(Self {
            canvas: canvas.clone(),
            gl,
            program,
            vao,
            uniforms,
            shape,
        })
    }
}

impl Surface for GlSurface {
    fn resize(&mut self, size: SurfaceSize) {
        let (w, h) = (size.backing_width(), size.backing_height());
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.gl.viewport(0, 0, w as i32, h as i32);
    }

    fn render(&mut self, params: &ShaderParameters) {
        let gl = &self.gl;
        let u = &self.uniforms;
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.uniform1f(u.progress.as_ref(), params.progress);
        gl.uniform2f(u.resolution.as_ref(), params.resolution[0], params.resolution[1]);
        gl.uniform3f(u.color.as_ref(), params.color.r, params.color.g, params.color.b);
        gl.uniform1f(u.spread.as_ref(), params.spread);
        gl.uniform1f(u.bias.as_ref(), self.shape.forward_bias);
        gl.uniform1f(u.frequency.as_ref(), self.shape.frequency_scale);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLES, 0, 3);
        gl.bind_vertex_array(None);
    }
}

/// The dissolve shaded on the CPU into a small buffer that the browser
/// stretches over the hero. Only redraws when something changed.
pub struct CpuSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    shape: DissolveShape,
    drawn: Option<ShaderParameters>,
}

impl CpuSurface {
    pub fn new(canvas: &HtmlCanvasElement, shape: DissolveShape) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(SiteError::ContextUnavailable("2d"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SiteError::ContextUnavailable("2d"))?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
            pixels: Vec::new(),
            width: 0,
            height: 0,
            shape,
            drawn: None,
        })
    }

    fn blit(&self) -> Result<()> {
        let image =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(self.pixels.as_slice()), self.width, self.height)?;
        self.ctx.put_image_data(&image, 0.0, 0.0)?;
        Ok(())
    }
}

impl Surface for CpuSurface {
    fn resize(&mut self, size: SurfaceSize) {
        let (bw, bh) = (size.backing_width(), size.backing_height());
        let w = bw.min(CPU_MAX_WIDTH);
        let h = ((bh as u64 * w as u64) / bw as u64).max(1) as u32;
        self.width = w;
        self.height = h;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.pixels.resize((w * h * 4) as usize, 0);
        self.drawn = None;
    }

    fn render(&mut self, params: &ShaderParameters) {
        if self.width == 0 {
            return;
        }
        // Anti-alias over one buffer pixel rather than one CSS pixel.
        let mut local = *params;
        local.set_resolution(self.width as f32, self.height as f32);
        if self.drawn == Some(local) {
            return;
        }
        rasterize(
            &mut self.pixels,
            self.width as usize,
            self.height as usize,
            &local,
            &self.shape,
        );
        match self.blit() {
            Ok(()) => self.drawn = Some(local),
            Err(err) => log::warn!("software hero blit failed: {}", err),
        }
    }
}

/// Whatever backend the hero canvas could get.
pub enum HeroSurface {
    Gl(GlSurface),
    Cpu(CpuSurface),
    Disabled,
}

impl HeroSurface {
    fn create(canvas: Option<HtmlCanvasElement>, shape: DissolveShape) -> Self {
        let Some(canvas) = canvas else {
            log::warn!("hero dissolve disabled: no .hero-canvas");
            return HeroSurface::Disabled;
        };
        match GlSurface::new(&canvas, shape) {
            Ok(s) => {
                log::info!("hero dissolve on webgl2");
                return HeroSurface::Gl(s);
            }
            Err(err) => log::warn!("webgl2 unavailable ({}), falling back to 2d", err),
        }
        match CpuSurface::new(&canvas, shape) {
            Ok(s) => HeroSurface::Cpu(s),
            Err(err) => {
                log::warn!("hero dissolve disabled: {}", err);
                HeroSurface::Disabled
            }
        }
    }
}

impl Surface for HeroSurface {
    fn resize(&mut self, size: SurfaceSize) {
        match self {
            HeroSurface::Gl(s) => s.resize(size),
            HeroSurface::Cpu(s) => s.resize(size),
            HeroSurface::Disabled => {}
        }
    }

    fn render(&mut self, params: &ShaderParameters) {
        match self {
            HeroSurface::Gl(s) => s.render(params),
            HeroSurface::Cpu(s) => s.render(params),
            HeroSurface::Disabled => {}
        }
    }
}

type Driver = RevealDriver<WindowScroll, HeroSurface>;

fn hero_geometry(window: &Window, hero: Option<&HtmlElement>) -> Geometry {
    let viewport_height = viewport_height(window);
    match hero {
        Some(hero) => Geometry {
            region_top: hero.offset_top() as f64,
            region_height: hero.offset_height() as f64,
            viewport_height,
        },
        None => Geometry {
            viewport_height,
            ..Geometry::default()
        },
    }
}

fn resize_to_hero(driver: &RefCell<Driver>, window: &Window, hero: Option<&HtmlElement>) {
    let Some(hero) = hero else {
        return;
    };
    driver.borrow_mut().resize(
        hero.offset_width() as f64,
        hero.offset_height() as f64,
        window.device_pixel_ratio(),
    );
}

fn request_frame(window: &Window, f: &Closure<dyn FnMut(f64)>) -> Result<()> {
    window.request_animation_frame(f.as_ref().unchecked_ref())?;
    Ok(())
}

/// Build the hero surface and run the frame loop for the lifetime of the
/// page. The loop also steps smooth scrolling and the word reveal, so it
/// runs even when the hero itself is disabled.
pub fn start(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
    scroll: WindowScroll,
    words: Option<WordReveal>,
) -> Result<()> {
    let canvas = document
        .query_selector(".hero-canvas")?
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    let config = match &canvas {
        Some(c) => config.clone().with_overrides(|name| c.get_attribute(name)),
        None => config.clone(),
    };
    let hero = document
        .query_selector(".hero")?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let surface = HeroSurface::create(canvas, config.shape);
    let driver = Rc::new(RefCell::new(RevealDriver::new(
        scroll,
        surface,
        ProgressSource::new(config.speed),
        ShaderParameters::new(config.rgb(), config.spread),
        config.max_pixel_ratio,
    )));

    if let Some(mut words) = words {
        driver
            .borrow_mut()
            .register_update_handler(move |frame| words.update(frame));
    }

    resize_to_hero(&driver, window, hero.as_ref());
    let on_resize = {
        let driver = driver.clone();
        let window = window.clone();
        let hero = hero.clone();
        Closure::wrap(Box::new(move || resize_to_hero(&driver, &window, hero.as_ref())) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    // `f` holds the frame closure so it can schedule itself again.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let loop_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let geometry = hero_geometry(&loop_window, hero.as_ref());
        driver.borrow_mut().tick(now, &geometry);

        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = request_frame(&loop_window, next) {
                log::error!("frame loop stopped: {}", err);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(first) = g.borrow().as_ref() {
        request_frame(window, first)?;
    }
    Ok(())
}

fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;
    let program = gl
        .create_program()
        .ok_or_else(|| SiteError::ProgramLink("failed to create program".into()))?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    gl.detach_shader(&program, &vertex);
    gl.detach_shader(&program, &fragment);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));
    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program error".to_string());
        Err(SiteError::ProgramLink(info))
    }
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| SiteError::ShaderCompile("failed to create shader".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".to_string());
        Err(SiteError::ShaderCompile(info))
    }
}
