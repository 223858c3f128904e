use crate::gfx::Viewport;
use crate::os;
use crate::os::win32 as platform;
use crate::Error;

use maths_rs::Vec4f;

use windows::{
    core::Interface, Win32::Foundation::*, Win32::Graphics::Direct3D::*,
    Win32::Graphics::Direct3D11::*, Win32::Graphics::Dxgi::Common::*, Win32::Graphics::Dxgi::*,
};

/// Backbuffer format for every swap chain created by the render system.
const DEFAULT_FORMAT: DXGI_FORMAT = DXGI_FORMAT_R8G8B8A8_UNORM;

/// Multisample anti aliasing sample count for the backbuffer and the depth
/// stencil buffer.
const MSAA_SAMPLES: u32 = 4;

// Feature levels we're interested in, highest first.
const FEATURE_LEVELS: [D3D_FEATURE_LEVEL; 4] = [
    D3D_FEATURE_LEVEL_11_0,
    D3D_FEATURE_LEVEL_10_1,
    D3D_FEATURE_LEVEL_10_0,
    D3D_FEATURE_LEVEL_9_3,
];

// Devices which only reach a level below this are rejected outright.
const MIN_FEATURE_LEVEL: D3D_FEATURE_LEVEL = D3D_FEATURE_LEVEL_11_0;

/// Owns the device, immediate context, swap chain and output views for a
/// single window. All graphics resources are created together by
/// `initialise` and released together; a partially initialised state is
/// never observable.
pub struct RenderSystem {
    resources: Option<DeviceResources>,
}

// Field order is the release order: views and swap chain go before the
// device, the context is released last.
struct DeviceResources {
    depth_stencil_view: ID3D11DepthStencilView,
    swap_chain: IDXGISwapChain,
    render_target_view: ID3D11RenderTargetView,
    device: ID3D11Device,
    context: ID3D11DeviceContext,
    feature_level: D3D_FEATURE_LEVEL,
    msaa_quality: u32,
}

impl RenderSystem {
    /// Creates an empty render system; no graphics resources exist until
    /// `initialise` succeeds.
    pub fn new() -> Self {
        RenderSystem { resources: None }
    }

    pub fn is_initialised(&self) -> bool {
        self.resources.is_some()
    }

    /// Creates the device, swap chain, render target and depth stencil
    /// against the window's client area and binds them as the active
    /// output. On any failure everything acquired so far is released
    /// before the error returns.
    pub fn initialise(&mut self, window: &platform::Window) -> Result<(), Error> {
        assert!(
            self.resources.is_none(),
            "render system already initialised"
        );

        // device + immediate context at the highest supported feature level
        let (device, context, feature_level) = create_device_and_context()?;

        // the backbuffer format must support render target binding
        let mut format_support = 0u32;
        unsafe { device.CheckFormatSupport(DEFAULT_FORMAT, &mut format_support) }
            .map_err(|_| Error::FormatNotSupported)?;
        if format_support & D3D11_FORMAT_SUPPORT_RENDER_TARGET.0 as u32 == 0 {
            return Err(Error::FormatNotSupported);
        }

        // highest multisample quality for the fixed sample count
        let mut msaa_quality = 0u32;
        unsafe {
            device.CheckMultisampleQualityLevels(DEFAULT_FORMAT, MSAA_SAMPLES, &mut msaa_quality)
        }?;
        assert!(
            msaa_quality > 0,
            "no multisample quality levels for the default format"
        );

        let swap_chain = create_swap_chain(&device, window, msaa_quality)?;

        // render target view over the swap chain backbuffer
        let back_buffer: ID3D11Texture2D = unsafe { swap_chain.GetBuffer(0) }?;
        let mut rtv = None;
        unsafe { device.CreateRenderTargetView(&back_buffer, None, Some(&mut rtv)) }?;
        let render_target_view = rtv.ok_or(Error::RenderInit)?;

        let depth_stencil_view = create_depth_stencil_buffer(
            &device,
            window.get_width(),
            window.get_height(),
            msaa_quality,
        )?;

        // bind the outputs and a viewport covering the whole client area
        let viewport = Viewport::from(os::Rect {
            x: 0,
            y: 0,
            width: window.get_width() as i32,
            height: window.get_height() as i32,
        });
        unsafe {
            context.OMSetRenderTargets(
                Some(&[Some(render_target_view.clone())]),
                &depth_stencil_view,
            );
            context.RSSetViewports(Some(&[D3D11_VIEWPORT {
                TopLeftX: viewport.x,
                TopLeftY: viewport.y,
                Width: viewport.width,
                Height: viewport.height,
                MinDepth: viewport.min_depth,
                MaxDepth: viewport.max_depth,
            }]));
        }

        self.resources = Some(DeviceResources {
            depth_stencil_view,
            swap_chain,
            render_target_view,
            device,
            context,
            feature_level,
            msaa_quality,
        });
        Ok(())
    }

    /// Returns the feature level the device was created with.
    pub fn get_feature_level(&self) -> D3D_FEATURE_LEVEL {
        let res = self.resources.as_ref().expect("render system not initialised");
        res.feature_level
    }

    /// Returns the multisample quality level in use for the default format.
    pub fn get_msaa_quality(&self) -> u32 {
        let res = self.resources.as_ref().expect("render system not initialised");
        res.msaa_quality
    }

    /// Clears the bound render target to `colour` and resets the depth
    /// stencil to depth 0.0, stencil 0.
    pub fn clear(&self, colour: Vec4f) {
        let res = self.resources.as_ref().expect("render system not initialised");
        unsafe {
            res.context.ClearRenderTargetView(
                &res.render_target_view,
                &[colour.x, colour.y, colour.z, colour.w],
            );
            res.context.ClearDepthStencilView(
                &res.depth_stencil_view,
                (D3D11_CLEAR_DEPTH.0 | D3D11_CLEAR_STENCIL.0) as u32,
                0.0,
                0,
            );
        }
    }

    /// Presents the swap chain immediately with no synchronisation wait.
    pub fn present(&self) {
        let res = self.resources.as_ref().expect("render system not initialised");
        let hr = unsafe { res.swap_chain.Present(0, DXGI_PRESENT(0)) };
        debug_assert!(hr.is_ok(), "present failed: {:?}", hr);
    }
}

impl Default for RenderSystem {
    fn default() -> Self {
        RenderSystem::new()
    }
}

impl Drop for RenderSystem {
    fn drop(&mut self) {
        // unbind everything before the views and swap chain release
        if let Some(res) = &self.resources {
            unsafe {
                res.context.ClearState();
                res.context.Flush();
            }
        }
    }
}

fn create_device_and_context(
) -> Result<(ID3D11Device, ID3D11DeviceContext, D3D_FEATURE_LEVEL), Error> {
    let mut flags = D3D11_CREATE_DEVICE_SINGLETHREADED;
    if cfg!(debug_assertions) {
        flags |= D3D11_CREATE_DEVICE_DEBUG;
    }

    let mut device = None;
    let mut context = None;
    let mut feature_level = D3D_FEATURE_LEVEL::default();
    unsafe {
        D3D11CreateDevice(
            None,
            D3D_DRIVER_TYPE_HARDWARE,
            HMODULE::default(),
            flags,
            Some(&FEATURE_LEVELS),
            D3D11_SDK_VERSION,
            Some(&mut device),
            Some(&mut feature_level),
            Some(&mut context),
        )
    }?;

    if feature_level.0 < MIN_FEATURE_LEVEL.0 {
        return Err(Error::FeatureLevelTooLow);
    }

    let device = device.ok_or(Error::RenderInit)?;
    let context = context.ok_or(Error::RenderInit)?;
    Ok((device, context, feature_level))
}

fn create_swap_chain(
    device: &ID3D11Device,
    window: &platform::Window,
    msaa_quality: u32,
) -> Result<IDXGISwapChain, Error> {
    let desc = DXGI_SWAP_CHAIN_DESC {
        BufferDesc: DXGI_MODE_DESC {
            Width: window.get_width(),
            Height: window.get_height(),
            RefreshRate: DXGI_RATIONAL {
                Numerator: 60,
                Denominator: 1,
            },
            Format: DEFAULT_FORMAT,
            ScanlineOrdering: DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED,
            Scaling: DXGI_MODE_SCALING_UNSPECIFIED,
        },
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: MSAA_SAMPLES,
            Quality: msaa_quality - 1,
        },
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        BufferCount: 1,
        OutputWindow: window.get_native_handle(),
        Windowed: TRUE,
        SwapEffect: DXGI_SWAP_EFFECT_DISCARD,
        Flags: 0,
    };

    // walk up from the device to the factory that created its adapter
    let dxgi_device: IDXGIDevice = device.cast()?;
    let adapter = unsafe { dxgi_device.GetAdapter() }?;
    let factory: IDXGIFactory = unsafe { adapter.GetParent() }?;

    let mut swap_chain = None;
    unsafe { factory.CreateSwapChain(device, &desc, &mut swap_chain) }.ok()?;
    swap_chain.ok_or(Error::RenderInit)
}

fn create_depth_stencil_buffer(
    device: &ID3D11Device,
    width: u32,
    height: u32,
    msaa_quality: u32,
) -> Result<ID3D11DepthStencilView, Error> {
    let desc = D3D11_TEXTURE2D_DESC {
        Width: width,
        Height: height,
        MipLevels: 1,
        ArraySize: 1,
        Format: DXGI_FORMAT_D24_UNORM_S8_UINT,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: MSAA_SAMPLES,
            Quality: msaa_quality - 1,
        },
        Usage: D3D11_USAGE_DEFAULT,
        BindFlags: D3D11_BIND_DEPTH_STENCIL.0 as u32,
        CPUAccessFlags: 0,
        MiscFlags: 0,
    };

    let mut buffer = None;
    unsafe { device.CreateTexture2D(&desc, None, Some(&mut buffer)) }?;
    let buffer = buffer.ok_or(Error::RenderInit)?;

    let mut dsv = None;
    unsafe { device.CreateDepthStencilView(&buffer, None, Some(&mut dsv)) }?;
    dsv.ok_or(Error::RenderInit)
}
