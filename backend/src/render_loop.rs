use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::WindowConfig;
use crate::error::SetupError;
use crate::platform::{IoEvent, Key, Platform, Renderer, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopStats {
    pub frames: u64,
    pub elapsed: Duration,
}

/// Requests loop termination when Escape is held down.
pub fn process_input<P: Platform>(platform: &mut P) {
    if platform.is_key_pressed(Key::Escape) {
        platform.set_should_close(true);
    }
}

pub fn framebuffer_size_changed<R: Renderer>(renderer: &mut R, width: i32, height: i32) {
    debug!("framebuffer resized to {width}x{height}");
    renderer.set_viewport(Viewport::full(width, height));
}

pub fn handle_event<P: Platform + Renderer>(system: &mut P, event: IoEvent) {
    match event {
        IoEvent::Quit => system.set_should_close(true),
        IoEvent::FramebufferResized(w, h) => framebuffer_size_changed(system, w, h),
        // Escape is read from the key state in process_input
        IoEvent::KeyDown(_) | IoEvent::KeyUp(_) => {}
    }
}

/// Runs frames until the close flag is set: input, clear, swap, then events.
pub fn render_loop<P: Platform + Renderer>(system: &mut P, config: &WindowConfig) -> LoopStats {
    let start = Instant::now();
    let (w, h) = system.framebuffer_size();
    system.set_viewport(Viewport::full(w, h));

    let mut events = Vec::new();
    let mut frames = 0u64;
    while !system.should_close() {
        process_input(system);

        system.clear(config.clear_color);
        system.swap_buffers();

        system.poll_events(&mut events);
        for event in events.drain(..) {
            handle_event(system, event);
        }
        frames += 1;
    }

    LoopStats {
        frames,
        elapsed: start.elapsed(),
    }
}

/// Brings up the window with `init` and runs the render loop on it.
///
/// An `init` failure is returned as is and the loop never starts.
pub fn run<P, F>(config: &WindowConfig, init: F) -> Result<LoopStats, SetupError>
where
    P: Platform + Renderer,
    F: FnOnce(&WindowConfig) -> Result<P, SetupError>,
{
    let mut system = init(config)?;
    let stats = render_loop(&mut system, config);
    info!(
        "render loop finished after {} frames in {:.2?}",
        stats.frames, stats.elapsed
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ClearColor;
    use std::collections::VecDeque;

    /// One scripted frame: key state seen by process_input and events returned by the poll.
    #[derive(Default)]
    struct Frame {
        escape_down: bool,
        events: Vec<IoEvent>,
    }

    #[derive(Default)]
    struct MockSystem {
        frames: VecDeque<Frame>,
        escape_down: bool,
        should_close: bool,
        framebuffer: (i32, i32),
        viewports: Vec<Viewport>,
        clears: Vec<ClearColor>,
        swaps: usize,
        polls: usize,
    }

    impl MockSystem {
        fn scripted(frames: Vec<Frame>) -> Self {
            let mut mock = MockSystem {
                frames: frames.into(),
                framebuffer: (800, 600),
                ..Default::default()
            };
            mock.load_next_frame();
            mock
        }

        fn load_next_frame(&mut self) {
            self.escape_down = self.frames.front().map_or(false, |f| f.escape_down);
        }
    }

    impl Platform for MockSystem {
        fn should_close(&self) -> bool {
            self.should_close
        }

        fn set_should_close(&mut self, value: bool) {
            self.should_close = value;
        }

        fn is_key_pressed(&self, key: Key) -> bool {
            key == Key::Escape && self.escape_down
        }

        fn framebuffer_size(&self) -> (i32, i32) {
            self.framebuffer
        }

        fn swap_buffers(&mut self) {
            self.swaps += 1;
        }

        fn poll_events(&mut self, events: &mut Vec<IoEvent>) {
            self.polls += 1;
            match self.frames.pop_front() {
                Some(frame) => events.extend(frame.events),
                // script exhausted, behave like the user closed the window
                None => events.push(IoEvent::Quit),
            }
            self.load_next_frame();
        }
    }

    impl Renderer for MockSystem {
        fn set_viewport(&mut self, viewport: Viewport) {
            self.viewports.push(viewport);
        }

        fn clear(&mut self, color: ClearColor) {
            self.clears.push(color);
        }
    }

    fn idle() -> Frame {
        Frame::default()
    }

    fn escape() -> Frame {
        Frame {
            escape_down: true,
            events: vec![IoEvent::KeyDown(Key::Escape)],
        }
    }

    fn events(events: Vec<IoEvent>) -> Frame {
        Frame {
            escape_down: false,
            events,
        }
    }

    #[test]
    fn test_escape_terminates_loop() {
        let mut sys = MockSystem::scripted(vec![idle(), idle(), escape(), idle(), idle()]);
        let stats = render_loop(&mut sys, &WindowConfig::default());

        assert!(sys.should_close);
        assert_eq!(stats.frames, 3);
        assert_eq!(sys.swaps, 3);
        // the remaining scripted frames were never reached
        assert_eq!(sys.frames.len(), 2);
    }

    #[test]
    fn test_escape_frame_is_still_presented() {
        let mut sys = MockSystem::scripted(vec![escape()]);
        let stats = render_loop(&mut sys, &WindowConfig::default());

        assert_eq!(stats.frames, 1);
        assert_eq!(sys.clears.len(), 1);
        assert_eq!(sys.swaps, 1);
        assert_eq!(sys.polls, 1);
    }

    #[test]
    fn test_escape_key_event_alone_does_not_close() {
        let mut sys = MockSystem::scripted(vec![
            events(vec![IoEvent::KeyDown(Key::Escape), IoEvent::KeyUp(Key::Escape)]),
            idle(),
        ]);
        let stats = render_loop(&mut sys, &WindowConfig::default());

        // closed by the Quit the exhausted script emits, not by the key events
        assert_eq!(stats.frames, 3);
    }

    #[test]
    fn test_other_keys_do_not_close() {
        let mut sys = MockSystem::scripted(vec![events(vec![IoEvent::KeyDown(Key::Other)])]);
        sys.framebuffer = (640, 480);
        let mut config = WindowConfig::default();
        config.clear_color = ClearColor::new(0.0, 0.0, 0.0, 1.0);

        let stats = render_loop(&mut sys, &config);

        assert_eq!(stats.frames, 2);
        assert!(sys
            .clears
            .iter()
            .all(|c| *c == ClearColor::new(0.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_quit_event_terminates_loop() {
        let mut sys = MockSystem::scripted(vec![idle(), events(vec![IoEvent::Quit]), idle()]);
        let stats = render_loop(&mut sys, &WindowConfig::default());

        assert_eq!(stats.frames, 2);
        assert_eq!(sys.frames.len(), 1);
    }

    #[test]
    fn test_initial_viewport_matches_framebuffer() {
        let mut sys = MockSystem::scripted(vec![escape()]);
        sys.framebuffer = (1600, 1200);
        render_loop(&mut sys, &WindowConfig::default());

        assert_eq!(sys.viewports, vec![Viewport::full(1600, 1200)]);
    }

    #[test]
    fn test_resize_resets_viewport() {
        let mut sys = MockSystem::scripted(vec![
            events(vec![IoEvent::FramebufferResized(1024, 768)]),
            idle(),
            events(vec![
                IoEvent::FramebufferResized(300, 200),
                IoEvent::FramebufferResized(0, 0),
            ]),
            escape(),
        ]);
        render_loop(&mut sys, &WindowConfig::default());

        assert_eq!(
            sys.viewports,
            vec![
                Viewport::full(800, 600),
                Viewport::full(1024, 768),
                Viewport::full(300, 200),
                Viewport::full(0, 0),
            ]
        );
        assert!(sys.viewports.iter().all(|v| v.x == 0 && v.y == 0));
    }

    #[test]
    fn test_clear_uses_configured_color() {
        let color = ClearColor::new(0.6, 0.0, 0.7, 1.0);
        let config = WindowConfig::default().with_clear_color(color);
        let mut sys = MockSystem::scripted(vec![idle(), escape()]);
        render_loop(&mut sys, &config);

        assert_eq!(sys.clears, vec![color, color]);
    }

    #[test]
    fn test_close_flag_set_before_loop_skips_frames() {
        let mut sys = MockSystem::scripted(vec![idle()]);
        sys.should_close = true;
        let stats = render_loop(&mut sys, &WindowConfig::default());

        assert_eq!(stats.frames, 0);
        assert_eq!(sys.swaps, 0);
        assert_eq!(sys.polls, 0);
    }

    #[test]
    fn test_run_context_failure_skips_loop() {
        let result = run::<MockSystem, _>(&WindowConfig::default(), |_| {
            Err(SetupError::Context("OpenGL 3.3 unsupported".into()))
        });

        let err = result.unwrap_err();
        assert_eq!(err.stage(), crate::error::SetupStage::ContextCreation);
        assert_ne!(err.exit_status(), 0);
    }

    #[test]
    fn test_run_loader_failure_skips_loop() {
        let result = run::<MockSystem, _>(&WindowConfig::default(), |_| {
            Err(SetupError::Loader { missing: "glClear" })
        });

        let err = result.unwrap_err();
        assert_eq!(err.stage(), crate::error::SetupStage::FunctionLoading);
        assert_ne!(err.exit_status(), 0);
    }

    #[test]
    fn test_run_passes_config_to_init() {
        let config = WindowConfig::default().with_size(320, 240);
        let stats = run(&config, |cfg| {
            let mut sys = MockSystem::scripted(vec![idle(), escape()]);
            sys.framebuffer = (cfg.width as i32, cfg.height as i32);
            Ok(sys)
        })
        .unwrap();

        assert_eq!(stats.frames, 2);
    }
}
