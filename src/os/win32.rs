use crate::os::{WindowEvent, WindowEventHandler, WindowInfo, WindowStyleFlags};
use crate::Error;

use std::ffi::CString;
use std::sync::atomic::{AtomicBool, Ordering};

use windows::{
    core::{s, PCSTR},
    Win32::Foundation::*,
    Win32::Graphics::Gdi::ValidateRect,
    Win32::System::LibraryLoader::*,
    Win32::UI::WindowsAndMessaging::*,
};

/// Class shared by every window in the process, registered lazily at most
/// once.
const WINDOW_CLASS: PCSTR = s!("dxlib_window");

static CLASS_REGISTERED: AtomicBool = AtomicBool::new(false);

/// Registers the shared window class on first use; calling again once the
/// class exists is a no-op.
fn ensure_class_registered(instance: HMODULE) -> Result<(), Error> {
    if CLASS_REGISTERED.load(Ordering::Relaxed) {
        return Ok(());
    }

    let wc = WNDCLASSA {
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }
            .map_err(|_| Error::WindowClassRegistration)?,
        hInstance: instance.into(),
        lpszClassName: WINDOW_CLASS,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc),
        ..Default::default()
    };

    if unsafe { RegisterClassA(&wc) } == 0 {
        // the class only needs to exist, a repeat registration is a no-op
        if unsafe { GetLastError() } != ERROR_CLASS_ALREADY_EXISTS {
            return Err(Error::WindowClassRegistration);
        }
    }

    CLASS_REGISTERED.store(true, Ordering::Relaxed);
    Ok(())
}

// Receives events from the shared wndproc. Boxed by the owning window so
// the address stays stable while the window itself moves.
struct MessageState {
    events: Vec<WindowEvent>,
}

/// An operating system window backed by a win32 HWND. No native resources
/// exist until `initialise` is called.
pub struct Window {
    info: WindowInfo,
    hwnd: HWND,
    close_requested: bool,
    messages: Box<MessageState>,
}

impl Window {
    /// Creates an idle window object with the requested client size and
    /// title.
    pub fn new(info: WindowInfo) -> Self {
        Window {
            info,
            hwnd: HWND::default(),
            close_requested: false,
            messages: Box::new(MessageState { events: Vec::new() }),
        }
    }

    /// Creates the native window, sized so the client area matches the
    /// requested dimensions. The window is created hidden unless the
    /// `VISIBLE` style flag is set.
    pub fn initialise(&mut self) -> Result<(), Error> {
        if self.hwnd != HWND::default() {
            return Err(Error::WindowAlreadyCreated);
        }

        let instance = unsafe { GetModuleHandleA(None) }.map_err(|_| Error::WindowCreation)?;
        ensure_class_registered(instance)?;

        // expand the requested client size to the outer window size
        let style = window_style(self.info.style);
        let (w, h) = adjusted_window_size(self.info.width, self.info.height, style);

        let title = CString::new(self.info.title.as_str()).unwrap_or_default();
        let hwnd = unsafe {
            CreateWindowExA(
                WINDOW_EX_STYLE::default(),
                WINDOW_CLASS,
                PCSTR(title.as_ptr() as _),
                style,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                w,
                h,
                None,
                None,
                instance,
                Some(&mut *self.messages as *mut MessageState as _),
            )
        }
        .map_err(|_| Error::WindowCreation)?;

        if hwnd == HWND::default() {
            return Err(Error::WindowCreation);
        }

        self.hwnd = hwnd;
        Ok(())
    }

    /// Returns the native window handle, the window must have been
    /// initialised.
    pub fn get_native_handle(&self) -> HWND {
        assert!(self.hwnd != HWND::default(), "window not created");
        self.hwnd
    }

    /// Returns the width of the client area.
    pub fn get_width(&self) -> u32 {
        self.info.width
    }

    /// Returns the height of the client area.
    pub fn get_height(&self) -> u32 {
        self.info.height
    }

    /// Returns the width of the whole window including chrome.
    pub fn get_real_width(&self) -> u32 {
        let style = window_style(self.info.style);
        adjusted_window_size(self.info.width, self.info.height, style).0 as u32
    }

    /// Returns the height of the whole window including chrome.
    pub fn get_real_height(&self) -> u32 {
        let style = window_style(self.info.style);
        adjusted_window_size(self.info.width, self.info.height, style).1 as u32
    }

    /// Sets the size of the client area; the outer window grows to fit and
    /// keeps its position on screen.
    pub fn set_size(&mut self, width: u32, height: u32) {
        assert!(self.hwnd != HWND::default(), "window not created");
        self.info.width = width;
        self.info.height = height;

        let style = window_style(self.info.style);
        let (w, h) = adjusted_window_size(width, height, style);
        unsafe {
            let _ = SetWindowPos(self.hwnd, None, 0, 0, w, h, SWP_NOMOVE);
        }
    }

    pub fn get_title(&self) -> &str {
        &self.info.title
    }

    pub fn set_title(&mut self, title: &str) {
        assert!(self.hwnd != HWND::default(), "window not created");
        self.info.title = title.to_string();
        let title = CString::new(title).unwrap_or_default();
        unsafe {
            let _ = SetWindowTextA(self.hwnd, PCSTR(title.as_ptr() as _));
        }
    }

    pub fn is_visible(&self) -> bool {
        assert!(self.hwnd != HWND::default(), "window not created");
        unsafe { IsWindowVisible(self.hwnd) }.as_bool()
    }

    pub fn set_visible(&mut self, visible: bool) {
        assert!(self.hwnd != HWND::default(), "window not created");
        let show = if visible { SW_SHOW } else { SW_HIDE };
        unsafe {
            let _ = ShowWindow(self.hwnd, show);
        }
    }

    /// Drains all pending system messages without blocking and dispatches
    /// the resulting window events to `handler`. A close event raises the
    /// close request flag after the close hook has run.
    pub fn handle_messages(&mut self, handler: &mut dyn WindowEventHandler) {
        assert!(self.hwnd != HWND::default(), "window not created");
        unsafe {
            let mut msg = MSG::default();
            while PeekMessageA(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageA(&msg);
            }
        }

        for event in self.messages.events.drain(..) {
            match event {
                WindowEvent::Close => {
                    handler.on_close();
                    self.close_requested = true;
                }
                WindowEvent::GainFocus => handler.on_gain_focus(),
                WindowEvent::LostFocus => handler.on_lost_focus(),
                WindowEvent::Minimise => handler.on_minimise(),
                WindowEvent::Maximise => handler.on_maximise(),
            }
        }
    }

    /// Set once the user has attempted to close the window, never reset;
    /// recreate the window if a restart is required.
    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if self.hwnd != HWND::default() {
            unsafe {
                SetWindowLongPtrA(self.hwnd, GWLP_USERDATA, 0);
                let _ = DestroyWindow(self.hwnd);
            }
            self.hwnd = HWND::default();
        }
    }
}

fn window_style(flags: WindowStyleFlags) -> WINDOW_STYLE {
    let mut style = WS_OVERLAPPED;
    if flags.contains(WindowStyleFlags::CAPTION) {
        style |= WS_CAPTION;
    }
    if flags.contains(WindowStyleFlags::SYS_MENU) {
        style |= WS_SYSMENU;
    }
    if flags.contains(WindowStyleFlags::MINIMISE_BOX) {
        style |= WS_MINIMIZEBOX;
    }
    if flags.contains(WindowStyleFlags::MAXIMISE_BOX) {
        style |= WS_MAXIMIZEBOX;
    }
    if flags.contains(WindowStyleFlags::SIZEABLE) {
        style |= WS_THICKFRAME;
    }
    if flags.contains(WindowStyleFlags::VISIBLE) {
        style |= WS_VISIBLE;
    }
    style
}

// Expands a client size to the outer window size for the given styles.
fn adjusted_window_size(width: u32, height: u32, style: WINDOW_STYLE) -> (i32, i32) {
    let mut rect = RECT {
        left: 0,
        top: 0,
        right: width as i32,
        bottom: height as i32,
    };
    unsafe {
        let _ = AdjustWindowRect(&mut rect, style, false);
    }
    (rect.right - rect.left, rect.bottom - rect.top)
}

fn push_event(hwnd: HWND, event: WindowEvent) {
    let user_data = unsafe { GetWindowLongPtrA(hwnd, GWLP_USERDATA) };
    if let Some(mut state) = std::ptr::NonNull::<MessageState>::new(user_data as _) {
        unsafe { state.as_mut() }.events.push(event);
    }
}

extern "system" fn wndproc(hwnd: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match message {
        WM_CREATE => {
            let create_struct: &CREATESTRUCTA = unsafe { std::mem::transmute(lparam) };
            unsafe { SetWindowLongPtrA(hwnd, GWLP_USERDATA, create_struct.lpCreateParams as _) };
            LRESULT(0)
        }
        WM_CLOSE => {
            // destruction is deferred to the owning Window drop
            push_event(hwnd, WindowEvent::Close);
            LRESULT(0)
        }
        WM_ACTIVATE => {
            let active = (wparam.0 & 0xffff) as u32 != WA_INACTIVE;
            push_event(
                hwnd,
                if active {
                    WindowEvent::GainFocus
                } else {
                    WindowEvent::LostFocus
                },
            );
            unsafe { DefWindowProcA(hwnd, message, wparam, lparam) }
        }
        WM_SIZE => {
            match wparam.0 as u32 {
                SIZE_MINIMIZED => push_event(hwnd, WindowEvent::Minimise),
                SIZE_MAXIMIZED => push_event(hwnd, WindowEvent::Maximise),
                _ => {}
            }
            unsafe { DefWindowProcA(hwnd, message, wparam, lparam) }
        }
        WM_PAINT => {
            unsafe {
                let _ = ValidateRect(hwnd, None);
            }
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcA(hwnd, message, wparam, lparam) },
    }
}
