#[cfg(target_os = "windows")]
use dxlib_rs::{
    app::{App, Application, Frame},
    gfx::d3d11::RenderSystem,
    os::WindowEventHandler,
    time::Clock,
    AppInfo,
};

#[cfg(target_os = "windows")]
struct HelloWindow;

#[cfg(target_os = "windows")]
impl WindowEventHandler for HelloWindow {}

#[cfg(target_os = "windows")]
impl App for HelloWindow {
    fn on_initialise(&mut self, _renderer: &mut RenderSystem) {}

    fn on_update(&mut self, frame: &mut Frame) {
        let title = format!("hello_window  fps: {}", frame.fps as i32);
        frame.window.set_title(&title);
    }

    fn on_render(&mut self, _renderer: &mut RenderSystem, _clock: &Clock) {}
}

#[cfg(target_os = "windows")]
fn main() {
    let mut hello = HelloWindow;
    let mut application = Application::new(AppInfo {
        name: String::from("hello_window"),
        width: 800,
        height: 600,
        ..Default::default()
    });

    if let Err(error) = application.initialise(&mut hello) {
        println!("initialisation failed: {}", error);
        return;
    }

    application.run(&mut hello);
}

#[cfg(not(target_os = "windows"))]
fn main() {}
