//! The cooperative application loop: [`Model`], [`Driver`], [`App`].
//!
//! One loop iteration polls input, feeds every pending message to the model,
//! advances the model by exactly one [`tick`](Model::tick), then diffs the
//! grid and flushes the changes to the driver. Nothing runs on other threads.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::cell::CellState;
use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Signal the application loop to stop.
    End,
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model.
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Advance by one scheduling turn.
    fn tick(&mut self);

    /// The grid to render.
    fn grid(&self) -> &Grid;
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver: input source plus renderer.
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait at most `timeout` for input and send every available message
    /// through `tx`.
    fn poll_msgs(
        &mut self,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Draw the changed cells.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub tick: Duration,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    tick: Duration,
    prev: Vec<CellState>,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            tick: config.tick,
            prev: Vec::new(),
        }
    }

    /// The model, e.g. for inspection after [`run`](App::run) returns.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run until the model returns [`Effect::End`] or the driver fails.
    ///
    /// The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        let result = self.run_loop();
        self.driver.close();
        result
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        loop {
            if self.process_pending(&rx) {
                log::info!("app loop ending");
                return Ok(());
            }
            self.model.tick();
            self.draw()?;
            self.driver.poll_msgs(self.tick, &tx)?;
        }
    }

    /// Drain queued messages into the model. Returns `true` if the app should
    /// stop.
    fn process_pending(&mut self, rx: &Receiver<Msg>) -> bool {
        while let Ok(msg) = rx.try_recv() {
            if let Some(Effect::End) = self.model.update(msg) {
                return true;
            }
        }
        false
    }

    /// Diff the model's grid against the last drawn state and flush.
    fn draw(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let grid = self.model.grid();
        let frame = compute_frame(&self.prev, grid);
        if !frame.cells.is_empty() {
            self.driver.flush(frame)?;
        }
        self.prev = grid.snapshot();
        Ok(())
    }
}
