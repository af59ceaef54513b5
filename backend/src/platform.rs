//! The calls the render loop makes into the windowing library and into OpenGL.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoEvent {
    // close button, window manager close request
    Quit,
    // framebuffer width, height in pixels
    FramebufferResized(i32, i32),
    KeyDown(Key),
    KeyUp(Key),
}

/// Maps normalized device coordinates to framebuffer pixels, lower left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// A viewport covering the whole framebuffer.
    pub fn full(width: i32, height: i32) -> Self {
        Viewport {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ClearColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        ClearColor { r, g, b, a }
    }
}

/// A window with a current OpenGL context and a close flag.
pub trait Platform {
    fn should_close(&self) -> bool;

    fn set_should_close(&mut self, value: bool);

    /// Current key state, independent of queued events.
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Size of the drawable area in pixels. May differ from the window size on HiDPI displays.
    fn framebuffer_size(&self) -> (i32, i32);

    /// Presents the back buffer.
    fn swap_buffers(&mut self);

    /// Appends every pending event to `events`.
    fn poll_events(&mut self, events: &mut Vec<IoEvent>);
}

pub trait Renderer {
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clears the color buffer to `color`.
    fn clear(&mut self, color: ClearColor);
}
