// Drawing surface abstraction.
//
// The simulation only needs four capabilities from whatever it paints on,
// so the browser canvas is one implementation among any others (tests use
// an in-memory recorder).

use crate::color::Color;
use std::fmt;
use vecmath::Vector2;

// Pixel dimensions of a surface, stored as floats for the bounce tests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Bounds {
        Bounds {
            width: width as f64,
            height: height as f64,
        }
    }
}

pub trait Surface {
    type Error;

    // Clears every pixel to fully transparent.
    fn clear(&mut self) -> Result<(), Self::Error>;

    // Filled circle with no stroke.
    fn draw_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        fill: Color,
    ) -> Result<(), Self::Error>;

    // Line in `stroke`'s rgb with `alpha` on the 0-255 scale.
    fn draw_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        stroke: Color,
        alpha: f64,
    ) -> Result<(), Self::Error>;

    fn resize(&mut self, width: u32, height: u32);
}

// Reasons a drawing surface could not be set up. Any of these means the
// animation is unavailable and the page should carry on without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    // No global `window` (not running in a browser).
    NoWindow,
    NoDocument,
    // No element with the given id.
    MissingCanvas(String),
    // The element exists but is not a `<canvas>`.
    NotACanvas(String),
    // The canvas did not hand out a 2d context.
    NoContext,
    // The canvas has no parent element to size against.
    NoContainer,
    ZeroSize { width: u32, height: u32 },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::NoWindow => write!(f, "No global window available"),
            SurfaceError::NoDocument => write!(f, "Window has no document"),
            SurfaceError::MissingCanvas(id) => write!(f, "No element with id '{}'", id),
            SurfaceError::NotACanvas(id) => write!(f, "Element '{}' is not a canvas", id),
            SurfaceError::NoContext => write!(f, "Failed to get a 2d rendering context"),
            SurfaceError::NoContainer => write!(f, "Canvas has no containing element"),
            SurfaceError::ZeroSize { width, height } => {
                write!(f, "Container has no area ({}x{})", width, height)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

impl From<SurfaceError> for wasm_bindgen::JsValue {
    fn from(err: SurfaceError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
