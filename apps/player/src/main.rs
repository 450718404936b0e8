//! The Chime desktop player binary.
//!
//! Startup order: window and surface, render backend and font, audio
//! backend, library scan, UI tree. Teardown happens in reverse through
//! drop order. The frame loop clears, dispatches input, ticks playback,
//! updates and renders the tree, then presents; vsync through `pixels`
//! paces it.

mod config;

use chime_graphics::{CoordKind, RenderStyle};
use chime_playback::{Library, Player, RodioBackend};
use chime_render::{RenderBackend, SoftwareBackend};
use chime_ui::prelude::*;
use chime_ui::widgets::{PlayPauseButton, SkipBackButton, SkipForwardButton, SongList, VolumeBar};
use log::{error, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::window::WindowBuilder;

use config::AppConfig;

fn build_ui(config: &AppConfig, library: &Library) -> InteractableManager {
    let mut root = InteractableManager::new();

    let mut songs = SongList::new(config.row_height);
    songs.state_mut().set_x(CoordKind::Pixel, 0.0);
    songs.state_mut().set_y(CoordKind::Pixel, 0.0);
    songs.state_mut().set_w(CoordKind::Percent, 1.0);
    songs.state_mut().set_h(CoordKind::PixelFromBottom, 150.0);
    songs.add_music(library.entries());
    root.add(Box::new(songs));

    let mut controls = Container::new();
    controls.state_mut().set_x(CoordKind::Percent, 0.5);
    controls.state_mut().set_y(CoordKind::PixelFromBottom, 75.0);
    controls.state_mut().set_w(CoordKind::Pixel, 400.0);
    controls.state_mut().set_h(CoordKind::Pixel, 125.0);
    controls.state_mut().set_render_style(RenderStyle::Centered);

    let mut back = SkipBackButton::new(config.skip_back_icon.clone());
    back.state_mut().set_x(CoordKind::Percent, 0.25);
    back.state_mut().set_y(CoordKind::Pixel, 40.0);
    back.state_mut().set_w(CoordKind::Pixel, 50.0);
    back.state_mut().set_h(CoordKind::Pixel, 50.0);
    back.state_mut().set_render_style(RenderStyle::Centered);
    controls.add(Box::new(back));

    let mut toggle = PlayPauseButton::new(config.play_icon.clone(), config.pause_icon.clone());
    toggle.state_mut().set_x(CoordKind::Percent, 0.5);
    toggle.state_mut().set_y(CoordKind::Pixel, 40.0);
    toggle.state_mut().set_w(CoordKind::Pixel, 50.0);
    toggle.state_mut().set_h(CoordKind::Pixel, 50.0);
    toggle.state_mut().set_render_style(RenderStyle::Centered);
    controls.add(Box::new(toggle));

    let mut forward = SkipForwardButton::new(config.skip_forward_icon.clone());
    forward.state_mut().set_x(CoordKind::Percent, 0.75);
    forward.state_mut().set_y(CoordKind::Pixel, 40.0);
    forward.state_mut().set_w(CoordKind::Pixel, 50.0);
    forward.state_mut().set_h(CoordKind::Pixel, 50.0);
    forward.state_mut().set_render_style(RenderStyle::Centered);
    controls.add(Box::new(forward));

    let mut volume = VolumeBar::new();
    volume.state_mut().set_x(CoordKind::Percent, 0.5);
    volume.state_mut().set_y(CoordKind::Pixel, 100.0);
    volume.state_mut().set_w(CoordKind::Pixel, 300.0);
    volume.state_mut().set_h(CoordKind::Pixel, 40.0);
    volume.state_mut().set_render_style(RenderStyle::Centered);
    controls.add(Box::new(volume));

    root.add(Box::new(controls));
    root
}

fn main() {
    env_logger::init();
    let config = AppConfig::default();

    let event_loop = EventLoopBuilder::new().build();
    let window = WindowBuilder::new()
        .with_title("Chime")
        .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
        .with_min_inner_size(LogicalSize::new(
            config.min_width as f64,
            config.min_height as f64,
        ))
        .build(&event_loop)
        .expect("window");
    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture).expect("pixels");

    let mut backend = SoftwareBackend::new(size.width as i32, size.height as i32);
    if let Err(err) = backend.load_font(&config.font_path) {
        error!("{err}; song titles will not render");
    }

    let audio = match RodioBackend::new() {
        Ok(audio) => audio,
        Err(err) => {
            error!("{err}");
            return;
        }
    };

    let library = Library::scan(&config.music_dir).unwrap_or_else(|err| {
        warn!("{err}; starting with an empty library");
        Library::default()
    });
    let mut player = Player::new(library, Box::new(audio));
    if let Err(err) = player.set_volume(config.start_volume) {
        warn!("{err}");
    }

    let mut root = build_ui(&config, player.library());

    let mut cursor = (0, 0);
    let mut lmb_down = false;
    let mut size_changed = false;
    let mut skip_present = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        let viewport = {
            let (w, h) = backend.root_size();
            Viewport {
                width: w,
                height: h,
                size_changed,
            }
        };
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        error!("failed to resize surface: {err}");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                        error!("failed to resize buffer: {err}");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    backend.resize_root(new_size.width as i32, new_size.height as i32);
                    size_changed = true;
                    skip_present = true;
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = (position.x as i32, position.y as i32);
                }
                WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } => match state {
                    ElementState::Pressed => lmb_down = true,
                    ElementState::Released => {
                        lmb_down = false;
                        let mut ctx = EventCtx {
                            viewport,
                            player: &mut player,
                        };
                        if let Err(err) = root.click(&mut ctx, cursor.0, cursor.1) {
                            warn!("click ignored: {err}");
                        }
                    }
                },
                WindowEvent::MouseWheel { delta, .. } => {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                    };
                    let mut ctx = EventCtx {
                        viewport,
                        player: &mut player,
                    };
                    let speed = -lines * config.scroll_factor;
                    if let Err(err) = root.scroll(&mut ctx, cursor.0, cursor.1, speed) {
                        warn!("scroll ignored: {err}");
                    }
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    if input.state != ElementState::Pressed {
                        return;
                    }
                    match input.virtual_keycode {
                        Some(VirtualKeyCode::NextTrack) => {
                            if let Err(err) = player.play_next() {
                                warn!("{err}");
                            }
                        }
                        Some(VirtualKeyCode::PrevTrack) => {
                            if let Err(err) = player.play_previous() {
                                warn!("{err}");
                            }
                        }
                        Some(VirtualKeyCode::PlayPause) => player.toggle(),
                        Some(VirtualKeyCode::MediaStop) => player.halt(),
                        _ => {}
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                window.request_redraw();
            }
            Event::RedrawRequested(_) => {
                backend.set_draw_color(config.clear_color);
                backend.clear();

                if lmb_down {
                    let mut ctx = EventCtx {
                        viewport,
                        player: &mut player,
                    };
                    if let Err(err) = root.mouse_down(&mut ctx, cursor.0, cursor.1) {
                        warn!("drag ignored: {err}");
                    }
                }

                player.tick();

                let mut update = UpdateCtx {
                    viewport,
                    backend: &mut backend,
                    player: &mut player,
                };
                root.update(&mut update);
                let mut render = RenderCtx {
                    viewport,
                    backend: &mut backend,
                };
                root.render(&mut render);
                size_changed = false;

                let frame = pixels.frame_mut();
                let rgba = backend.root_rgba();
                if frame.len() == rgba.len() {
                    frame.copy_from_slice(rgba);
                } else {
                    warn!("surface and frame sizes disagree; dropping frame");
                }

                // The present right after a resize would flash a stale
                // surface.
                if skip_present {
                    skip_present = false;
                } else if let Err(err) = pixels.render() {
                    error!("pixels render failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
