/// Implements this interface for the windows win32 platform.
#[cfg(target_os = "windows")]
pub mod win32;

use serde::{Deserialize, Serialize};

/// Describes a rectangle starting at the top left corner specified by x,y
/// with the size of width and height.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

bitflags! {
    /// Window style flags controlling chrome and behaviour.
    pub struct WindowStyleFlags: u32 {
        /// Title bar showing the window name.
        const CAPTION = 1 << 0;
        /// System menu with the close button.
        const SYS_MENU = 1 << 1;
        /// Minimise button.
        const MINIMISE_BOX = 1 << 2;
        /// Maximise button.
        const MAXIMISE_BOX = 1 << 3;
        /// Sizing border.
        const SIZEABLE = 1 << 4;
        /// Window is visible as soon as it is created.
        const VISIBLE = 1 << 5;
    }
}

impl Default for WindowStyleFlags {
    fn default() -> Self {
        WindowStyleFlags::CAPTION | WindowStyleFlags::SYS_MENU
    }
}

/// Filled out to specify various window parameters when a window is created.
pub struct WindowInfo {
    /// Title appears in the window caption.
    pub title: String,
    /// Requested width of the client area.
    pub width: u32,
    /// Requested height of the client area.
    pub height: u32,
    /// Style flags for chrome and behaviour.
    pub style: WindowStyleFlags,
}

/// Events raised by the system message pump, delivered to a
/// `WindowEventHandler` once per `handle_messages` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindowEvent {
    Close,
    GainFocus,
    LostFocus,
    Minimise,
    Maximise,
}

/// Implement to receive window lifecycle events, all hooks default to
/// no-ops so only the events of interest need overriding.
pub trait WindowEventHandler {
    /// The user attempted to close the window; runs before the close
    /// request flag becomes observable.
    fn on_close(&mut self) {}
    fn on_gain_focus(&mut self) {}
    fn on_lost_focus(&mut self) {}
    fn on_minimise(&mut self) {}
    fn on_maximise(&mut self) {}
}
