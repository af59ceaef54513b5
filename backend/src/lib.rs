pub mod config;
pub mod error;
pub mod glutils;
pub mod platform;
pub mod render_loop;
pub mod system;
