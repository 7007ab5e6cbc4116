//! Terminal A* visualizer.
//!
//! Run: cargo run -- [ROWS] [--auto]

use astar_core::app::{App, AppConfig};
use astar_crossterm::CrosstermDriver;
use astar_viz::{InteractionController, from_args};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = from_args(std::env::args().skip(1))?;
    let driver = CrosstermDriver::new().with_mouse(config.mouse);
    let tick = config.tick();
    let mut app = App::new(AppConfig {
        model: InteractionController::new(config),
        driver,
        tick,
    });
    app.run()?;
    if let Some(status) = app.model().outcome() {
        match app.model().last_path_len() {
            Some(len) => println!("last search: {status:?}, path of {len} steps"),
            None => println!("last search: {status:?}, no path found"),
        }
    }
    Ok(())
}
