// Frame scheduling: something that calls a closure once per display frame,
// and a small driver that tracks whether that is still happening.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub trait FrameSource {
    type Error;

    // Starts calling `on_frame` once per frame until unregistered
    fn register(&mut self, on_frame: Box<dyn FnMut()>) -> Result<(), Self::Error>;

    // No call to the registered closure happens after this returns
    fn unregister(&mut self);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameState {
    Running,
    Stopped,
}

// Owns a frame source with a registered callback. Stopped is final; resuming
// takes a new field and a new animation.
pub struct Animation<F: FrameSource> {
    frames: F,
    state: FrameState,
}

impl<F: FrameSource> Animation<F> {
    pub fn start(mut frames: F, on_frame: Box<dyn FnMut()>) -> Result<Animation<F>, F::Error> {
        frames.register(on_frame)?;
        Ok(Animation {
            frames,
            state: FrameState::Running,
        })
    }

    pub fn stop(&mut self) {
        if self.state == FrameState::Running {
            self.frames.unregister();
            self.state = FrameState::Stopped;
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }
}

impl<F: FrameSource> Drop for Animation<F> {
    fn drop(&mut self) {
        self.stop();
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

// requestAnimationFrame loop. The callback re-requests itself after every
// frame; unregistering cancels the pending request and drops the closure.
pub struct AnimationFrames {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationFrames {
    pub fn new(window: Window) -> AnimationFrames {
        AnimationFrames {
            window,
            handle: Rc::new(Cell::new(None)),
            callback: Rc::new(RefCell::new(None)),
        }
    }
}

impl FrameSource for AnimationFrames {
    type Error = JsValue;

    fn register(&mut self, mut on_frame: Box<dyn FnMut()>) -> Result<(), JsValue> {
        let window = self.window.clone();
        let handle = self.handle.clone();
        let next = self.callback.clone();
        let closure = Closure::wrap(Box::new(move || {
            handle.set(None);
            on_frame();
            // Gone if unregister ran while this frame was pending
            if let Some(callback) = next.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => handle.set(Some(id)),
                    Err(err) => {
                        web_sys::console::error_2(&"requestAnimationFrame failed".into(), &err)
                    }
                }
            }
        }) as Box<dyn FnMut()>);

        let id = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())?;
        self.handle.set(Some(id));
        *self.callback.borrow_mut() = Some(closure);
        Ok(())
    }

    fn unregister(&mut self) {
        if let Some(id) = self.handle.take() {
            // Only fails for a detached window, in which case nothing is pending
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the closure -> callback cell -> closure cycle
        self.callback.borrow_mut().take();
    }
}
