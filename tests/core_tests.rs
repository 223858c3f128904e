// platform neutral tests, these run on any host
use dxlib_rs::gfx::Viewport;
use dxlib_rs::os::{Rect, WindowStyleFlags};
use dxlib_rs::time::{Clock, FpsCounter};
use dxlib_rs::{Error, UserConfig};

#[test]
fn clock_total_is_monotonic() {
    let mut clock = Clock::new();
    assert!(!clock.is_running());

    clock.start();
    assert!(clock.is_running());
    assert!(!clock.is_paused());

    clock.tick();
    assert!(clock.get_total_seconds() >= 0.0);

    let mut previous = clock.get_total_seconds();
    for _ in 0..50 {
        clock.tick();
        assert!(clock.get_total_seconds() >= previous);
        previous = clock.get_total_seconds();
    }
}

#[test]
fn clock_paused_ticks_change_nothing() {
    let mut clock = Clock::new();
    clock.start();
    clock.tick();
    clock.pause();

    let total = clock.get_total_seconds();
    let delta = clock.get_delta_seconds();
    for _ in 0..10 {
        clock.tick();
        assert_eq!(clock.get_total_seconds(), total);
        assert_eq!(clock.get_delta_seconds(), delta);
    }

    clock.resume();
    assert!(!clock.is_paused());
}

#[test]
fn clock_stop_keeps_accumulators() {
    let mut clock = Clock::new();
    clock.start();
    clock.tick();

    let total = clock.get_total_seconds();
    clock.stop();
    assert!(!clock.is_running());
    assert_eq!(clock.get_total_seconds(), total);
}

#[test]
fn clock_unit_conversions_agree() {
    let mut clock = Clock::new();
    clock.start();
    std::thread::sleep(std::time::Duration::from_millis(5));
    clock.tick();

    let seconds = clock.get_total_seconds();
    assert!((clock.get_total_millis() - seconds * 1000.0).abs() < 1e-9);
    assert!((clock.get_total_minutes() - seconds / 60.0).abs() < 1e-9);
    assert!((clock.get_total_hours() - seconds / 3600.0).abs() < 1e-9);

    let delta = clock.get_delta_seconds();
    assert!((clock.get_delta_millis() - delta * 1000.0).abs() < 1e-9);
    assert!((clock.get_delta_minutes() - delta / 60.0).abs() < 1e-9);
    assert!((clock.get_delta_hours() - delta / 3600.0).abs() < 1e-9);
}

#[test]
fn fps_converges_on_fixed_delta() {
    // 60 frames per second of synthetic time for ten seconds
    let delta = 1.0 / 60.0;
    let mut fps = FpsCounter::new();
    for _ in 0..600 {
        fps.tick(delta);
    }

    // the bucket boundary can land one frame either side of a second
    assert!((fps.get_fps() - 60.0).abs() < 1.5);
    assert!((fps.get_tpf() - delta as f32).abs() < 0.002);
}

#[test]
fn fps_tracks_rate_change() {
    let mut fps = FpsCounter::new();
    for _ in 0..300 {
        fps.tick(1.0 / 30.0);
    }
    assert!((fps.get_fps() - 30.0).abs() < 1.5);

    // after a rate change the smoothed value settles on the new rate
    for _ in 0..1200 {
        fps.tick(1.0 / 120.0);
    }
    assert!((fps.get_fps() - 120.0).abs() < 2.0);

    fps.reset();
    assert_eq!(fps.get_fps(), 0.0);
}

#[test]
fn error_display_is_descriptive() {
    let errors = [
        Error::WindowClassRegistration,
        Error::WindowCreation,
        Error::WindowAlreadyCreated,
        Error::RenderInit,
        Error::FeatureLevelTooLow,
        Error::FormatNotSupported,
    ];
    for error in errors {
        assert!(!error.to_string().is_empty());
    }
    assert_ne!(Error::WindowCreation, Error::RenderInit);
}

#[test]
fn user_config_round_trips() {
    let path = std::env::temp_dir().join("dxlib_user_config_test.json");
    let path = path.to_string_lossy().to_string();

    let config = UserConfig {
        window_width: 1024,
        window_height: 576,
    };
    config.save(&path);

    let loaded = UserConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn user_config_load_tolerates_missing_and_malformed() {
    assert!(UserConfig::load("does_not_exist.json").is_none());

    let path = std::env::temp_dir().join("dxlib_user_config_bad.json");
    let path = path.to_string_lossy().to_string();
    std::fs::write(&path, b"not json").unwrap();
    assert!(UserConfig::load(&path).is_none());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn rect_converts_to_full_viewport() {
    let viewport = Viewport::from(Rect {
        x: 0,
        y: 0,
        width: 640,
        height: 480,
    });
    assert_eq!(viewport.x, 0.0);
    assert_eq!(viewport.y, 0.0);
    assert_eq!(viewport.width, 640.0);
    assert_eq!(viewport.height, 480.0);
    assert_eq!(viewport.min_depth, 0.0);
    assert_eq!(viewport.max_depth, 1.0);
}

#[test]
fn default_style_has_caption_and_sys_menu() {
    let style = WindowStyleFlags::default();
    assert!(style.contains(WindowStyleFlags::CAPTION));
    assert!(style.contains(WindowStyleFlags::SYS_MENU));
    assert!(!style.contains(WindowStyleFlags::VISIBLE));
    assert!(!style.contains(WindowStyleFlags::SIZEABLE));
}
