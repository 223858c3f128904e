use crate::gfx::d3d11::RenderSystem;
use crate::os::win32::Window;
use crate::os::{WindowEventHandler, WindowInfo};
use crate::time::{Clock, FpsCounter};
use crate::{AppInfo, Error, UserConfig};

use maths_rs::Vec4f;

/// Per frame state passed to `App::on_update`.
pub struct Frame<'a> {
    /// The application's main window.
    pub window: &'a mut Window,
    /// Clock for the current iteration, ticked at the top of the frame.
    pub clock: &'a Clock,
    /// Smoothed frames per second.
    pub fps: f32,
    quit: &'a mut bool,
}

impl<'a> Frame<'a> {
    /// Requests the main loop to stop; the loop exits once the current
    /// iteration has presented.
    pub fn quit(&mut self) {
        *self.quit = true;
    }
}

/// Implement to supply the application lifecycle callbacks. They are
/// invoked synchronously on the thread that calls `Application::run`;
/// window hooks come from the `WindowEventHandler` supertrait and default
/// to no-ops.
pub trait App: WindowEventHandler {
    /// Called once after the window and renderer have initialised.
    fn on_initialise(&mut self, renderer: &mut RenderSystem);

    /// Called every frame before the backbuffer clears.
    fn on_update(&mut self, frame: &mut Frame);

    /// Called every frame between clear and present.
    fn on_render(&mut self, renderer: &mut RenderSystem, clock: &Clock);
}

/// Owns the main window, the render system and the clock and drives the
/// frame loop.
pub struct Application {
    window: Window,
    renderer: RenderSystem,
    clock: Clock,
    fps: FpsCounter,
    clear_colour: Vec4f,
    running: bool,
    initialised: bool,
}

impl Application {
    /// Creates an application from `info`. A `user_config.json` next to
    /// the executable overrides the requested window size when present.
    pub fn new(info: AppInfo) -> Self {
        let mut width = info.width;
        let mut height = info.height;
        if let Some(config) = UserConfig::load(&crate::get_data_path("user_config.json")) {
            width = config.window_width;
            height = config.window_height;
        }

        Application {
            window: Window::new(WindowInfo {
                title: info.name,
                width,
                height,
                style: info.style,
            }),
            renderer: RenderSystem::new(),
            clock: Clock::new(),
            fps: FpsCounter::new(),
            clear_colour: info.clear_colour,
            running: false,
            initialised: false,
        }
    }

    /// Creates an application with the given client size and title and
    /// default style.
    pub fn with_size(width: u32, height: u32, title: &str) -> Self {
        Application::new(AppInfo {
            name: title.to_string(),
            width,
            height,
            ..Default::default()
        })
    }

    /// Creates the native window and then the renderer against it; the
    /// first failure returns without attempting the second step. On
    /// success the delegate's `on_initialise` runs once.
    pub fn initialise(&mut self, delegate: &mut impl App) -> Result<(), Error> {
        self.window.initialise()?;
        self.renderer.initialise(&self.window)?;
        delegate.on_initialise(&mut self.renderer);
        self.initialised = true;
        Ok(())
    }

    /// Runs the main loop, blocking until the window close is requested or
    /// a callback calls `Frame::quit`.
    pub fn run(&mut self, delegate: &mut impl App) {
        assert!(self.initialised, "application not initialised");

        self.window.set_visible(true);
        self.clock.start();
        self.fps.reset();
        self.running = true;

        while self.running {
            self.clock.tick();
            self.fps.tick(self.clock.get_delta_seconds());

            // system messages dispatch window hooks on the delegate
            self.window.handle_messages(delegate);

            let mut quit = false;
            {
                let mut frame = Frame {
                    window: &mut self.window,
                    clock: &self.clock,
                    fps: self.fps.get_fps(),
                    quit: &mut quit,
                };
                delegate.on_update(&mut frame);
            }

            self.renderer.clear(self.clear_colour);
            delegate.on_render(&mut self.renderer, &self.clock);
            self.renderer.present();

            if quit || self.window.is_close_requested() {
                self.running = false;
            }
        }

        self.clock.stop();
        self.save_user_config();
    }

    pub fn get_fps(&self) -> f32 {
        self.fps.get_fps()
    }

    pub fn get_window(&self) -> &Window {
        &self.window
    }

    pub fn get_window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn get_renderer_mut(&mut self) -> &mut RenderSystem {
        &mut self.renderer
    }

    pub fn get_clock(&self) -> &Clock {
        &self.clock
    }

    // persist the window size for the next launch
    fn save_user_config(&self) {
        let config = UserConfig {
            window_width: self.window.get_width(),
            window_height: self.window.get_height(),
        };
        config.save(&crate::get_data_path("user_config.json"));
    }
}
