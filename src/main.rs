use std::io::Write;
use std::time::Instant;

use clap::Parser;
use line_fractals::config::{Args, Config};
use line_fractals::curve::Curve;
use line_fractals::error::{RenderError, RenderResult};
use line_fractals::raster::Rgba;
use line_fractals::write_listing;
use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

const BACKGROUND: Rgba = Rgba::WHITE;
const STROKE: Rgba = Rgba::RED;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_args(Args::parse())?;
    let mut curve = Curve::new(&config.rule, vec![config.seed], config.generations);
    if curve.rule().is_none() {
        warn!(
            "unknown rule {:?} (expected C, Dragon or Koch); the curve will be empty after the seed",
            config.rule
        );
    }
    info!(
        "Starting {} curve: {} generations, {:?} per frame",
        config.rule, config.generations, config.delay
    );

    let event_loop = EventLoop::new();
    let window = build_window(&event_loop, &config)?;
    // The buffer stays in logical window pixels, which is the space the seed
    // lives in; only the surface follows the physical size.
    let (width, height) = (config.width, config.height);
    let mut pixels = create_pixels(&window, width, height)?;

    show_generation(&window, &curve, config.dump);
    let mut deadline = Instant::now() + hold_time(&curve, &config);
    let mut idle = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = if idle {
            ControlFlow::Wait
        } else {
            ControlFlow::WaitUntil(deadline)
        };
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput { input, .. } => {
                    if is_escape(&input) {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(e) = resize(&mut pixels, new_size) {
                        error!("Resize surface error: {e}");
                    }
                    window.request_redraw();
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    if let Err(e) = resize(&mut pixels, *new_inner_size) {
                        error!("Scale factor resize surface error: {e}");
                    }
                    window.request_redraw();
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                if idle || Instant::now() < deadline {
                    return;
                }
                if curve.advance() {
                    show_generation(&window, &curve, config.dump);
                    deadline = Instant::now() + hold_time(&curve, &config);
                    *control_flow = ControlFlow::WaitUntil(deadline);
                } else if config.hold {
                    idle = true;
                    *control_flow = ControlFlow::Wait;
                } else {
                    info!("Finished after generation {}", curve.generation());
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::RedrawRequested(_) => {
                // Resizes only need the existing buffer presented again
                curve.render(pixels.frame_mut(), width, height, BACKGROUND, STROKE);
                if let Err(e) = pixels.render() {
                    error!("pixels.render() failed: {e}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}

fn build_window(event_loop: &EventLoop<()>, config: &Config) -> RenderResult<Window> {
    let window = WindowBuilder::new()
        .with_title(format!("Line Fractals - {}", config.rule))
        .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
        .build(event_loop)?;
    Ok(window)
}

fn create_pixels(window: &Window, width: u32, height: u32) -> RenderResult<Pixels> {
    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
    Ok(Pixels::new(width, height, surface_texture)?)
}

fn resize(pixels: &mut Pixels, size: PhysicalSize<u32>) -> Result<(), RenderError> {
    pixels.resize_surface(size.width.max(1), size.height.max(1))?;
    Ok(())
}

fn is_escape(input: &KeyboardInput) -> bool {
    input.state == ElementState::Pressed && input.virtual_keycode == Some(VirtualKeyCode::Escape)
}

/// The last generation stays up for an extra delay before the window closes.
fn hold_time(curve: &Curve, config: &Config) -> std::time::Duration {
    if curve.is_finished() && !config.hold {
        config.delay * 2
    } else {
        config.delay
    }
}

fn show_generation(window: &Window, curve: &Curve, dump: bool) {
    info!(
        "Generation {}: {} segments",
        curve.generation(),
        curve.lines().len()
    );
    window.set_title(&format!("Line Fractals - {}", curve.info_string()));
    if dump {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = write_listing(&mut out, curve.lines()).and_then(|_| out.flush()) {
            error!("Failed to dump generation {}: {e}", curve.generation());
        }
    }
    window.request_redraw();
}
