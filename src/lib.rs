mod utils;
pub mod canvas;
pub mod color;
pub mod config;
pub mod field;
pub mod frame;
pub mod particle;
pub mod surface;

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Window};

use crate::canvas::CanvasSurface;
use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::frame::{Animation, AnimationFrames, FrameState};
use crate::surface::{Surface, SurfaceError};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Everything a frame touches. Frames and resizes each take the whole scene
// mutably, so neither can observe the other half done.
struct Scene<S: Surface> {
    field: ParticleField,
    surface: S,
    profiling: bool,
    skipped_frames: u32,
}

impl<S: Surface> Scene<S> {
    fn new(field: ParticleField, surface: S) -> Scene<S> {
        Scene {
            field,
            surface,
            profiling: false,
            skipped_frames: 0,
        }
    }

    // The animation is decoration: a bad frame is dropped and counted, never
    // thrown. Only the first failure is handed back, for logging.
    fn draw_frame(&mut self) -> Option<S::Error> {
        match self.field.tick(&mut self.surface) {
            Ok(_) => None,
            Err(err) => {
                self.skipped_frames += 1;
                if self.skipped_frames == 1 {
                    Some(err)
                } else {
                    None
                }
            }
        }
    }
}

impl Scene<CanvasSurface> {
    fn frame(&mut self) {
        let _timer = if self.profiling {
            Some(Timer::new("NetworkCanvas::frame"))
        } else {
            None
        };
        if let Some(err) = self.draw_frame() {
            console::warn_2(&"Skipping particle network frame:".into(), &err);
        }
    }

    fn fit_to_container(&mut self) {
        // A collapsed or detached container keeps the last good size
        if let Ok((width, height)) = self.surface.usable_container_size() {
            self.field.on_resize(&mut self.surface, width, height);
        }
    }
}

// Handle held by the page. Drawing starts on construction and runs until
// stop() is called or the handle is freed.
#[wasm_bindgen]
pub struct NetworkCanvas {
    window: Window,
    scene: Rc<RefCell<Scene<CanvasSurface>>>,
    animation: Animation<AnimationFrames>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl NetworkCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<NetworkCanvas, JsValue> {
        NetworkCanvas::attach(canvas_id, FieldConfig::default())
    }

    pub fn with_node_count(canvas_id: &str, node_count: usize) -> Result<NetworkCanvas, JsValue> {
        NetworkCanvas::attach(canvas_id, FieldConfig::default().with_node_count(node_count))
    }

    pub fn with_settings(
        canvas_id: &str,
        node_count: usize,
        max_speed: f64,
        min_radius: f64,
        max_radius: f64,
        link_distance: f64,
    ) -> Result<NetworkCanvas, JsValue> {
        let config = FieldConfig::default()
            .with_node_count(node_count)
            .with_max_speed(max_speed)
            .with_radius_range(min_radius, max_radius)
            .with_link_distance(link_distance);
        NetworkCanvas::attach(canvas_id, config)
    }

    // Re-reads the container size; the window resize listener calls the same thing
    pub fn resize(&mut self) {
        self.scene.borrow_mut().fit_to_container();
    }

    pub fn stop(&mut self) {
        self.animation.stop();
        if let Some(listener) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
    }

    pub fn is_running(&self) -> bool {
        self.animation.state() == FrameState::Running
    }

    pub fn particle_count(&self) -> usize {
        self.scene.borrow().field.particles().len()
    }

    pub fn width(&self) -> u32 {
        self.scene.borrow().surface.width()
    }

    pub fn height(&self) -> u32 {
        self.scene.borrow().surface.height()
    }

    pub fn skipped_frames(&self) -> u32 {
        self.scene.borrow().skipped_frames
    }

    // Logs a console timer around every frame
    pub fn set_profiling(&mut self, profiling: bool) {
        self.scene.borrow_mut().profiling = profiling;
    }
}

impl NetworkCanvas {
    pub fn attach(canvas_id: &str, config: FieldConfig) -> Result<NetworkCanvas, JsValue> {
        let _timer = Timer::new("NetworkCanvas::attach");
        let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
        let mut surface = CanvasSurface::from_element_id(&window, canvas_id)?;
        let (width, height) = surface.usable_container_size()?;
        surface.resize(width, height);
        surface.set_line_width(config.line_width);

        let field = ParticleField::with_config(width, height, config);
        let scene = Rc::new(RefCell::new(Scene::new(field, surface)));

        let frame_scene = scene.clone();
        let animation = Animation::start(
            AnimationFrames::new(window.clone()),
            Box::new(move || frame_scene.borrow_mut().frame()),
        )?;

        let resize_scene = scene.clone();
        let on_resize = Closure::wrap(
            Box::new(move || resize_scene.borrow_mut().fit_to_container()) as Box<dyn FnMut()>,
        );
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        Ok(NetworkCanvas {
            window,
            scene,
            animation,
            on_resize: Some(on_resize),
        })
    }
}

impl Drop for NetworkCanvas {
    fn drop(&mut self) {
        self.stop();
    }
}
