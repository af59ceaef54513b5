use std::ffi::{c_void, CStr};

use gl::types::*;
use log::{debug, error, info};

use crate::error::SetupError;

// glGetError keeps one flag per error kind, so a handful of calls drains it.
const MAX_QUEUED_ERRORS: usize = 8;

/// Entry points the program calls, checked after loading.
const REQUIRED_ENTRY_POINTS: [(&str, fn() -> bool); 5] = [
    ("glViewport", gl::Viewport::is_loaded),
    ("glClearColor", gl::ClearColor::is_loaded),
    ("glClear", gl::Clear::is_loaded),
    ("glGetError", gl::GetError::is_loaded),
    ("glGetString", gl::GetString::is_loaded),
];

/// Resolves the OpenGL function pointers through `loader`.
///
/// The context the pointers belong to must be current on this thread. Fails with
/// [`SetupError::Loader`] naming the first required entry point that did not resolve.
pub fn load_gl<F>(loader: F) -> Result<(), SetupError>
where
    F: FnMut(&'static str) -> *const c_void,
{
    gl::load_with(loader);

    for (name, is_loaded) in REQUIRED_ENTRY_POINTS {
        if !is_loaded() {
            return Err(SetupError::Loader { missing: name });
        }
        debug!("loaded {name}");
    }
    Ok(())
}

pub fn gl_error_name(err: GLenum) -> &'static str {
    match err {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

/// Drains the GL error queue, logging every entry. Returns `true` when nothing was queued.
pub fn check_gl_err(context: &str) -> bool {
    let mut clean = true;
    for _ in 0..MAX_QUEUED_ERRORS {
        let err = unsafe { gl::GetError() };
        if err == gl::NO_ERROR {
            break;
        }
        error!("{context}: {} (0x{err:04x})", gl_error_name(err));
        clean = false;
    }
    clean
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unavailable>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn log_opengl_info() {
    info!("GL_VENDOR = {}", gl_string(gl::VENDOR));
    info!("GL_RENDERER = {}", gl_string(gl::RENDERER));
    info!("GL_VERSION = {}", gl_string(gl::VERSION));
}
