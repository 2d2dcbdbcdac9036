use anyhow::Result;
use circle_collisions::engine::game_loop::GameLoop;
use circle_collisions::engine::input::InputManager;
use circle_collisions::game::{Game, SCREEN_HEIGHT, SCREEN_WIDTH};
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Circle Collisions...");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Circle Collisions")
        .with_inner_size(winit::dpi::LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let scale = window.scale_factor();
    let size = window.inner_size().to_logical::<f64>(scale);
    let mut game = Game::new(size.width, size.height);
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    let size = physical_size.to_logical::<f64>(window.scale_factor());
                    info!("Window resized to {}x{}", size.width, size.height);
                    game.resize(size.width, size.height);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let position = position.to_logical::<f64>(window.scale_factor());
                    input.process_cursor_moved(position.x, position.y);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::Focused(false) => {
                    input.reset();
                }
                WindowEvent::RedrawRequested => {
                    for _ in 0..game_loop.begin_frame() {
                        game.update(input.state());
                        // Edges are consumed by the first tick of the frame
                        input.update();
                    }
                    if game_loop.frame_count() % 600 == 0 {
                        log::debug!(
                            "FPS: {:.1}, frames: {}",
                            game_loop.fps(),
                            game_loop.frame_count()
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
