// Surface backed by a <canvas> element and its 2d context. The canvas is
// sized to its parent element, the way the hero section lays it out.

use crate::color::Color;
use crate::surface::{Surface, SurfaceError};
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Window};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    line_width: f64,
}

impl CanvasSurface {
    // Grabs the canvas with the given id from the DOM along with its 2d context
    pub fn from_element_id(
        window: &Window,
        canvas_id: &str,
    ) -> Result<CanvasSurface, SurfaceError> {
        let document = window.document().ok_or(SurfaceError::NoDocument)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SurfaceError::MissingCanvas(canvas_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::NotACanvas(canvas_id.to_owned()))?;
        CanvasSurface::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasSurface, SurfaceError> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(SurfaceError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::NoContext)?;
        Ok(CanvasSurface {
            canvas,
            context,
            line_width: 1.0,
        })
    }

    // Layout size of the containing element, in whole pixels
    pub fn container_size(&self) -> Result<(u32, u32), SurfaceError> {
        let container = self
            .canvas
            .parent_element()
            .ok_or(SurfaceError::NoContainer)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SurfaceError::NoContainer)?;
        let width = container.offset_width().max(0) as u32;
        let height = container.offset_height().max(0) as u32;
        Ok((width, height))
    }

    // Container size, rejecting an empty layout box
    pub fn usable_container_size(&self) -> Result<(u32, u32), SurfaceError> {
        match self.container_size()? {
            (width, height) if width == 0 || height == 0 => {
                Err(SurfaceError::ZeroSize { width, height })
            }
            size => Ok(size),
        }
    }

    pub fn set_line_width(&mut self, line_width: f64) {
        self.line_width = line_width;
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn clear(&mut self) -> Result<(), JsValue> {
        self.context.set_line_width(self.line_width);
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        Ok(())
    }

    fn draw_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        fill: Color,
    ) -> Result<(), JsValue> {
        self.context.set_fill_style_str(&fill.to_css());
        self.context.begin_path();
        self.context.arc(center[0], center[1], radius, 0.0, 2.0 * PI)?;
        self.context.fill();
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        stroke: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.context.set_stroke_style_str(&stroke.to_css_with_alpha(alpha));
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
        Ok(())
    }

    // Setting the canvas size also resets the context state; line width is
    // reapplied on the next clear
    fn resize(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }
}
