use std::path::PathBuf;
use std::time::Instant;

use cubescene::abs::{GraphicsContext, ImageTextureProvider};
use cubescene::config::SceneConfig;
use cubescene::logging::init_logging;
use cubescene::render::{AnimationLoop, RenderSession, VsyncScheduler};
use cubescene::Result;

use crate::app::App;

mod app;

fn main() {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match SceneConfig::resolve(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = init_logging(config.level_filter()) {
        eprintln!("could not install logger: {}", e);
    }

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &SceneConfig) -> Result<()> {
    let mut app = App::new(config)?;
    let (width, height) = app.window.drawable_size();
    app.gl.set_viewport(width as i32, height as i32);

    let session = RenderSession::load(
        &app.gl,
        config.variant,
        &ImageTextureProvider,
        &config.texture,
    )?;

    let epoch = Instant::now();
    let now_ms = || epoch.elapsed().as_secs_f64() * 1000.0;

    let mut animation = AnimationLoop::new(VsyncScheduler::new());
    animation.start(now_ms());

    'running: loop {
        for event in app.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. } => {
                    animation.stop();
                    break 'running;
                }
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => {
                    app.gl.set_viewport(w, h);
                }
                _ => {}
            }
        }

        let Some(request) = animation.scheduler_mut().take_due() else {
            continue;
        };
        animation.tick(request, now_ms(), |angle| {
            session.render_frame(config.fixed_angle.unwrap_or(angle));
        });
        app.window.gl_swap_window();
    }

    log::info!(
        "{:?} closed after {:.2}s",
        session.variant(),
        epoch.elapsed().as_secs_f32()
    );
    Ok(())
}
