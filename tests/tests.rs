// currently windows only because these need a real window and device
#![cfg(target_os = "windows")]

use dxlib_rs::app::{App, Application, Frame};
use dxlib_rs::gfx::d3d11::RenderSystem;
use dxlib_rs::os::win32::Window;
use dxlib_rs::os::{WindowEventHandler, WindowInfo, WindowStyleFlags};
use dxlib_rs::time::Clock;
use dxlib_rs::Error;

use maths_rs::Vec4f;

use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{SendMessageA, WM_CLOSE};

fn test_window(title: &str, width: u32, height: u32) -> Window {
    Window::new(WindowInfo {
        title: String::from(title),
        width,
        height,
        style: WindowStyleFlags::default(),
    })
}

struct NullHandler;
impl WindowEventHandler for NullHandler {}

#[test]
fn create_window() {
    let mut win = test_window("create_window", 1280, 720);
    win.initialise().unwrap();

    assert_eq!(win.get_width(), 1280);
    assert_eq!(win.get_height(), 720);
    assert_eq!(win.get_title(), "create_window");
    assert!(!win.is_visible());
    assert!(!win.is_close_requested());

    // the outer window includes chrome on top of the client area
    assert!(win.get_real_width() >= win.get_width());
    assert!(win.get_real_height() > win.get_height());
}

#[test]
fn window_set_size_round_trips() {
    let mut win = test_window("window_set_size", 1280, 720);
    win.initialise().unwrap();

    win.set_size(640, 480);
    assert_eq!(win.get_width(), 640);
    assert_eq!(win.get_height(), 480);
}

#[test]
fn window_initialise_twice_is_guarded() {
    let mut win = test_window("window_initialise_twice", 320, 240);
    win.initialise().unwrap();
    let handle = win.get_native_handle();

    // a second initialise must not create a second native window
    assert_eq!(win.initialise(), Err(Error::WindowAlreadyCreated));
    assert_eq!(win.get_native_handle(), handle);
    assert_eq!(win.get_width(), 320);
}

#[test]
fn window_set_title() {
    let mut win = test_window("window_set_title", 320, 240);
    win.initialise().unwrap();

    win.set_title("renamed");
    assert_eq!(win.get_title(), "renamed");
}

#[test]
fn window_close_invokes_hook_then_sets_flag() {
    struct CloseRecorder {
        closes: i32,
    }
    impl WindowEventHandler for CloseRecorder {
        fn on_close(&mut self) {
            self.closes += 1;
        }
    }

    let mut win = test_window("window_close", 320, 240);
    win.initialise().unwrap();
    assert!(!win.is_close_requested());

    unsafe {
        SendMessageA(win.get_native_handle(), WM_CLOSE, WPARAM(0), LPARAM(0));
    }

    let mut recorder = CloseRecorder { closes: 0 };
    win.handle_messages(&mut recorder);

    assert_eq!(recorder.closes, 1);
    assert!(win.is_close_requested());

    // the flag is monotonic
    win.handle_messages(&mut recorder);
    assert!(win.is_close_requested());
}

#[test]
fn render_system_initialise() {
    let mut win = test_window("render_system_initialise", 640, 480);
    win.initialise().unwrap();

    let mut renderer = RenderSystem::new();
    assert!(!renderer.is_initialised());

    renderer.initialise(&win).unwrap();
    assert!(renderer.is_initialised());
    assert!(renderer.get_msaa_quality() > 0);

    // levels below 11_0 are rejected during initialise
    use windows::Win32::Graphics::Direct3D::D3D_FEATURE_LEVEL_11_0;
    assert!(renderer.get_feature_level().0 >= D3D_FEATURE_LEVEL_11_0.0);

    // an initialised render system can clear and present
    renderer.clear(Vec4f::new(1.0, 0.0, 1.0, 1.0));
    renderer.present();
}

#[test]
fn clock_ticks_on_qpc() {
    let mut clock = Clock::new();
    clock.start();
    assert!(clock.is_high_precision());

    clock.tick();
    assert!(clock.get_total_seconds() >= 0.0);

    let mut previous = clock.get_total_seconds();
    for _ in 0..100 {
        clock.tick();
        assert!(clock.get_total_seconds() >= previous);
        previous = clock.get_total_seconds();
    }
}

#[test]
fn clock_resume_has_no_inflated_delta() {
    let mut clock = Clock::new();
    clock.start();
    clock.tick();

    clock.pause();
    std::thread::sleep(std::time::Duration::from_millis(100));
    clock.resume();
    clock.tick();

    // the paused interval must not appear in the first delta after resume
    assert!(clock.get_delta_seconds() < 0.05);
}

#[test]
fn application_runs_one_frame_then_quits() {
    struct OneFrame {
        initialises: i32,
        updates: i32,
        renders: i32,
    }
    impl WindowEventHandler for OneFrame {}
    impl App for OneFrame {
        fn on_initialise(&mut self, renderer: &mut RenderSystem) {
            assert!(renderer.is_initialised());
            self.initialises += 1;
        }

        fn on_update(&mut self, frame: &mut Frame) {
            self.updates += 1;
            frame.quit();
        }

        fn on_render(&mut self, _renderer: &mut RenderSystem, clock: &Clock) {
            assert!(clock.is_running());
            self.renders += 1;
        }
    }

    let mut delegate = OneFrame {
        initialises: 0,
        updates: 0,
        renders: 0,
    };
    let mut application = Application::with_size(800, 600, "application_one_frame");
    application.initialise(&mut delegate).unwrap();
    application.run(&mut delegate);

    // quitting on the first update still renders and presents that frame
    assert_eq!(delegate.initialises, 1);
    assert_eq!(delegate.updates, 1);
    assert_eq!(delegate.renders, 1);
}

#[test]
fn frame_exposes_window_and_clock() {
    struct TitleSetter {
        seen_fps: f32,
    }
    impl WindowEventHandler for TitleSetter {}
    impl App for TitleSetter {
        fn on_initialise(&mut self, _renderer: &mut RenderSystem) {}

        fn on_update(&mut self, frame: &mut Frame) {
            frame.window.set_title("from on_update");
            self.seen_fps = frame.fps;
            frame.quit();
        }

        fn on_render(&mut self, _renderer: &mut RenderSystem, _clock: &Clock) {}
    }

    let mut delegate = TitleSetter { seen_fps: -1.0 };
    let mut application = Application::with_size(640, 480, "frame_access");
    application.initialise(&mut delegate).unwrap();
    application.run(&mut delegate);

    assert_eq!(application.get_window().get_title(), "from on_update");
    assert!(delegate.seen_fps >= 0.0);
}
