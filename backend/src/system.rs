use log::{debug, info, warn};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::video::{GLProfile, SwapInterval};

use crate::config::WindowConfig;
use crate::error::SetupError;
use crate::glutils;
use crate::platform::{ClearColor, IoEvent, Key, Platform, Renderer, Viewport};

/// An SDL window with a current OpenGL context and loaded function pointers.
pub struct System {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_ctx: sdl2::video::GLContext,
    event_pump: sdl2::EventPump,
    should_close: bool,
    frame_delay: Option<std::time::Duration>,
}

impl System {
    pub fn new(config: &WindowConfig) -> Result<System, SetupError> {
        let sdl_context = sdl2::init().map_err(SetupError::Init)?;
        let video_subsystem = sdl_context.video().map_err(SetupError::Init)?;

        let (major, minor) = config.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(major, minor);
        gl_attr.set_double_buffer(true);

        let mut builder = video_subsystem.window(&config.title, config.width, config.height);
        builder.opengl();
        if config.resizable {
            builder.resizable();
        }
        let window = builder
            .build()
            .map_err(|e| SetupError::Window(e.to_string()))?;
        info!(
            "created window \"{}\" {}x{}",
            config.title, config.width, config.height
        );

        let gl_ctx = window.gl_create_context().map_err(SetupError::Context)?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(SetupError::MakeCurrent)?;

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug!(
            "OpenGL {}.{} core context is current",
            gl_attr.context_version().0,
            gl_attr.context_version().1
        );

        glutils::load_gl(|name| video_subsystem.gl_get_proc_address(name) as *const _)?;
        glutils::log_opengl_info();

        let interval = if config.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            warn!("could not set swap interval {interval:?}: {e}");
        }

        let event_pump = sdl_context.event_pump().map_err(SetupError::EventPump)?;

        Ok(System {
            sdl_context,
            video_subsystem,
            window,
            gl_ctx,
            event_pump,
            should_close: false,
            frame_delay: config.frame_delay,
        })
    }
}

fn to_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

fn to_scancode(key: Key) -> Option<Scancode> {
    match key {
        Key::Escape => Some(Scancode::Escape),
        Key::Other => None,
    }
}

fn pixels(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

impl Platform for System {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        match to_scancode(key) {
            Some(sc) => self.event_pump.keyboard_state().is_scancode_pressed(sc),
            None => false,
        }
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        let (w, h) = self.window.drawable_size();
        (pixels(w), pixels(h))
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
        if let Some(delay) = self.frame_delay {
            ::std::thread::sleep(delay);
        }
    }

    fn poll_events(&mut self, events: &mut Vec<IoEvent>) {
        let window_id = self.window.id();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(IoEvent::Quit),
                Event::Window {
                    window_id: id,
                    win_event,
                    ..
                } if id == window_id => match win_event {
                    WindowEvent::Close => events.push(IoEvent::Quit),
                    // SizeChanged fires for user resizes and programmatic ones alike
                    WindowEvent::SizeChanged(..) => {
                        let (w, h) = self.window.drawable_size();
                        events.push(IoEvent::FramebufferResized(pixels(w), pixels(h)));
                    }
                    _ => {}
                },
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(IoEvent::KeyDown(to_key(k))),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => events.push(IoEvent::KeyUp(to_key(k))),
                _ => {}
            }
        }
    }
}

impl Renderer for System {
    fn set_viewport(&mut self, viewport: Viewport) {
        unsafe {
            gl::Viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        }
        glutils::check_gl_err("glViewport");
    }

    fn clear(&mut self, color: ClearColor) {
        unsafe {
            gl::ClearColor(color.r, color.g, color.b, color.a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        if cfg!(debug_assertions) {
            glutils::check_gl_err("glClear");
        }
    }
}
