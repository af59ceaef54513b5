use std::time::Duration;

use crate::platform::ClearColor;

/// Everything needed to open the window and bring up its OpenGL context.
///
/// The defaults describe the classic "hello window" setup: an 800x600 window
/// titled `LearnOpenGL`, an OpenGL 3.3 core profile context and a dark teal
/// clear color.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    // major, minor
    pub gl_version: (u8, u8),
    pub clear_color: ClearColor,
    pub resizable: bool,
    pub vsync: bool,
    /// Sleep inserted after every buffer swap, `None` to rely on vsync only.
    pub frame_delay: Option<Duration>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 600,
            title: "LearnOpenGL".to_string(),
            gl_version: (3, 3),
            clear_color: ClearColor::new(0.2, 0.3, 0.3, 1.0),
            resizable: true,
            vsync: true,
            frame_delay: None,
        }
    }
}

impl WindowConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_clear_color(mut self, color: ClearColor) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Caps the loop at roughly `fps` frames per second by sleeping after each swap.
    pub fn with_frame_limit(mut self, fps: u32) -> Self {
        self.frame_delay = if fps == 0 {
            None
        } else {
            Some(Duration::new(0, 1_000_000_000u32 / fps))
        };
        self
    }
}
