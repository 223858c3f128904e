/// Operating system window module.
pub mod os;

/// Graphics device and render target module.
pub mod gfx;

/// High precision clock and frame statistics module.
pub mod time;

/// Application harness which owns a window, a render system and a clock
/// and drives the main loop.
#[cfg(target_os = "windows")]
pub mod app;

/// Use bitmask for window style flags
#[macro_use]
extern crate bitflags;

use maths_rs::Vec4f;
use serde::{Deserialize, Serialize};

/// Errors returned by value from window and renderer initialisation. Once
/// initialisation has succeeded the per frame operations do not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Failed to register the shared window class.
    WindowClassRegistration,
    /// The native window could not be created.
    WindowCreation,
    /// Initialise was called on a window which already has a native handle.
    WindowAlreadyCreated,
    /// Generic renderer initialisation failure.
    RenderInit,
    /// The device does not meet the minimum required feature level.
    FeatureLevelTooLow,
    /// The default colour format cannot be used as a render target.
    FormatNotSupported,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Error::WindowClassRegistration => "failed to register the shared window class",
            Error::WindowCreation => "failed to create the native window",
            Error::WindowAlreadyCreated => "window has already been created",
            Error::RenderInit => "failed to initialise the render system",
            Error::FeatureLevelTooLow => "device feature level is below the supported minimum",
            Error::FormatNotSupported => "default colour format is not supported",
        };
        write!(f, "{}", msg)
    }
}

impl std::error::Error for Error {}

// conversion for windows-rs win32 errors; initialisation paths which
// propagate with ? report any underlying hresult as a generic failure
#[cfg(target_os = "windows")]
impl From<windows::core::Error> for Error {
    fn from(_: windows::core::Error) -> Error {
        Error::RenderInit
    }
}

/// Information to create an application, its main window and renderer.
pub struct AppInfo {
    /// Name of the application, used as the window title.
    pub name: String,
    /// Requested width of the window client area.
    pub width: u32,
    /// Requested height of the window client area.
    pub height: u32,
    /// Style flags for the main window.
    pub style: os::WindowStyleFlags,
    /// Colour the backbuffer is cleared to at the start of each frame.
    pub clear_colour: Vec4f,
}

/// Useful defaults for quick AppInfo initialisation.
impl Default for AppInfo {
    fn default() -> Self {
        AppInfo {
            name: "dxlib".to_string(),
            width: 1280,
            height: 720,
            style: os::WindowStyleFlags::default(),
            clear_colour: Vec4f::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}

/// Serialisable user configuration settings saved between runs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserConfig {
    pub window_width: u32,
    pub window_height: u32,
}

impl UserConfig {
    /// Reads a config from `path`, missing or malformed files yield `None`.
    pub fn load(path: &str) -> Option<UserConfig> {
        let data = std::fs::read(path).ok()?;
        serde_json::from_slice(&data).ok()
    }

    /// Writes the config as json, best effort.
    pub fn save(&self, path: &str) {
        if let Ok(data) = serde_json::to_vec_pretty(self) {
            let _ = std::fs::write(path, data);
        }
    }
}

/// Returns the path of `file` located next to the current executable.
pub fn get_data_path(file: &str) -> String {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join(file).to_string_lossy().to_string();
        }
    }
    file.to_string()
}
