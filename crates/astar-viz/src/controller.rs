//! The [`InteractionController`]: grid editing plus search
//! start/pause/resume/reset.
//!
//! Every command checks its preconditions first; a refused command changes
//! nothing.

use astar_core::{
    CellState, Effect, Grid, Model, Point,
    messages::{Key, Msg, MouseAction},
};
use astar_search::{NoopObserver, SearchEngine, SearchStatus};

use crate::config::Config;

/// Controller mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// No search in flight; the grid can be edited freely.
    Editing,
    /// A search advances one step per tick.
    Running,
    /// A search is in flight but not advancing.
    Paused,
}

/// A user command, already resolved to grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Primary action: place start, end, or a barrier.
    Place(Point),
    /// Secondary action: clear a cell.
    Erase(Point),
    /// Start a search, or pause/resume the running one.
    Toggle,
    /// Discard everything and start over with an empty grid.
    Reset,
}

/// Top-level state machine over the grid and the search engine.
#[derive(Debug)]
pub struct InteractionController {
    config: Config,
    grid: Grid,
    start: Option<Point>,
    end: Option<Point>,
    engine: Option<SearchEngine>,
    mode: Mode,
    outcome: Option<SearchStatus>,
    last_path_len: Option<usize>,
}

impl InteractionController {
    /// A controller in [`Mode::Editing`] over an empty grid.
    pub fn new(config: Config) -> Self {
        let grid = Grid::new(config.rows, config.pixel_width);
        Self {
            config,
            grid,
            start: None,
            end: None,
            engine: None,
            mode: Mode::Editing,
            outcome: None,
            last_path_len: None,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// The search in flight, if any.
    #[inline]
    pub fn engine(&self) -> Option<&SearchEngine> {
        self.engine.as_ref()
    }

    /// How the last finished search ended.
    #[inline]
    pub fn outcome(&self) -> Option<SearchStatus> {
        self.outcome
    }

    /// Edge count of the last found path.
    #[inline]
    pub fn last_path_len(&self) -> Option<usize> {
        self.last_path_len
    }

    /// Apply a command. Returns whether it was accepted.
    pub fn apply(&mut self, cmd: Command) -> bool {
        let accepted = match cmd {
            Command::Place(p) => self.place(p),
            Command::Erase(p) => self.erase(p),
            Command::Toggle => self.toggle(),
            Command::Reset => self.reset(),
        };
        if !accepted {
            log::debug!("{cmd:?} refused in {:?}", self.mode);
        }
        accepted
    }

    fn place(&mut self, p: Point) -> bool {
        let Some(state) = self.grid.state(p) else {
            return false;
        };
        match self.mode {
            Mode::Editing => {
                if self.start.is_none() && self.end != Some(p) {
                    self.grid.set_state(p, CellState::Start);
                    self.start = Some(p);
                } else if self.end.is_none() && self.start != Some(p) {
                    self.grid.set_state(p, CellState::End);
                    self.end = Some(p);
                } else if self.start != Some(p) && self.end != Some(p) {
                    self.grid.set_state(p, CellState::Barrier);
                } else {
                    return false;
                }
                true
            }
            Mode::Paused if state == CellState::Unchecked => {
                self.grid.set_state(p, CellState::Barrier);
                self.grid.update_neighbors_around(p);
                true
            }
            Mode::Paused | Mode::Running => false,
        }
    }

    fn erase(&mut self, p: Point) -> bool {
        let Some(state) = self.grid.state(p) else {
            return false;
        };
        match self.mode {
            Mode::Editing => {
                if self.start == Some(p) {
                    self.start = None;
                } else if self.end == Some(p) {
                    self.end = None;
                }
                self.grid.reset(p);
                true
            }
            Mode::Paused
                if state == CellState::Barrier && self.grid.neighbors_untouched(p) =>
            {
                self.grid.reset(p);
                self.grid.update_neighbors_around(p);
                true
            }
            Mode::Paused | Mode::Running => false,
        }
    }

    fn toggle(&mut self) -> bool {
        match self.mode {
            Mode::Editing => self.begin_search(),
            Mode::Running => {
                self.mode = Mode::Paused;
                true
            }
            Mode::Paused => {
                self.mode = Mode::Running;
                true
            }
        }
    }

    fn begin_search(&mut self) -> bool {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return false;
        };
        self.grid.clear_search_marks();
        match SearchEngine::initialize(&mut self.grid, start, end) {
            Ok(engine) => {
                self.engine = Some(engine);
                self.outcome = None;
                self.last_path_len = None;
                self.mode = Mode::Running;
                true
            }
            Err(e) => {
                log::warn!("cannot start search: {e}");
                false
            }
        }
    }

    fn reset(&mut self) -> bool {
        if self.mode == Mode::Running {
            return false;
        }
        log::info!("reset to an empty {0}x{0} grid", self.config.rows);
        *self = Self::new(self.config.clone());
        true
    }

    /// Advance the search by one step when running. In auto mode the whole
    /// search completes in this call.
    pub fn tick(&mut self) {
        if self.mode != Mode::Running {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            self.mode = Mode::Editing;
            return;
        };
        let status = if self.config.auto_run {
            engine.run_to_completion(&mut self.grid, &mut NoopObserver)
        } else {
            engine.step(&mut self.grid)
        };
        if status.is_finished() {
            self.outcome = Some(status);
            self.last_path_len = engine.path_len();
            self.engine = None;
            self.mode = Mode::Editing;
        }
    }

    /// Map an input message to a command.
    pub fn command_for(msg: &Msg) -> Option<Command> {
        match msg {
            Msg::Mouse {
                action: MouseAction::Main,
                pos,
                ..
            } => Some(Command::Place(*pos)),
            Msg::Mouse {
                action: MouseAction::Secondary,
                pos,
                ..
            } => Some(Command::Erase(*pos)),
            Msg::KeyDown {
                key: Key::Space, ..
            } => Some(Command::Toggle),
            Msg::KeyDown {
                key: Key::Char('c'),
                ..
            } => Some(Command::Reset),
            _ => None,
        }
    }
}

impl Model for InteractionController {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Quit
            | Msg::KeyDown {
                key: Key::Escape | Key::Char('q'),
                ..
            } => return Some(Effect::End),
            _ => {}
        }
        if let Some(cmd) = Self::command_for(&msg) {
            self.apply(cmd);
        }
        None
    }

    fn tick(&mut self) {
        InteractionController::tick(self);
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(rows: i32) -> InteractionController {
        InteractionController::new(Config::default().with_rows(rows))
    }

    fn run_until_done(c: &mut InteractionController) {
        for _ in 0..c.grid().len() + 1 {
            c.tick();
            if c.mode() != Mode::Running {
                return;
            }
        }
        panic!("search did not finish");
    }

    #[test]
    fn placement_order_is_start_end_barrier() {
        let mut c = controller(5);
        let (a, b, w) = (Point::new(0, 0), Point::new(4, 4), Point::new(2, 2));
        assert!(c.apply(Command::Place(a)));
        assert!(c.apply(Command::Place(b)));
        assert!(c.apply(Command::Place(w)));
        assert_eq!(c.grid().state(a), Some(CellState::Start));
        assert_eq!(c.grid().state(b), Some(CellState::End));
        assert_eq!(c.grid().state(w), Some(CellState::Barrier));
        // Clicking start again is refused rather than turning it into a wall.
        assert!(!c.apply(Command::Place(a)));
        assert_eq!(c.grid().state(a), Some(CellState::Start));
    }

    #[test]
    fn erasing_start_frees_the_slot() {
        let mut c = controller(5);
        c.apply(Command::Place(Point::new(0, 0)));
        c.apply(Command::Place(Point::new(1, 1)));
        assert!(c.apply(Command::Erase(Point::new(0, 0))));
        assert_eq!(c.start(), None);
        assert_eq!(c.end(), Some(Point::new(1, 1)));
        // Next primary click places a new start, not a barrier.
        c.apply(Command::Place(Point::new(3, 3)));
        assert_eq!(c.start(), Some(Point::new(3, 3)));
        assert_eq!(c.grid().count(CellState::Start), 1);
        assert_eq!(c.grid().count(CellState::End), 1);
    }

    #[test]
    fn out_of_bounds_commands_are_refused() {
        let mut c = controller(3);
        assert!(!c.apply(Command::Place(Point::new(3, 0))));
        assert!(!c.apply(Command::Erase(Point::new(-1, 0))));
        assert_eq!(c.start(), None);
    }

    #[test]
    fn toggle_without_endpoints_is_ignored() {
        let mut c = controller(4);
        assert!(!c.apply(Command::Toggle));
        c.apply(Command::Place(Point::new(0, 0)));
        assert!(!c.apply(Command::Toggle));
        assert_eq!(c.mode(), Mode::Editing);
        assert!(c.engine().is_none());
    }

    #[test]
    fn search_runs_one_step_per_tick_and_finishes() {
        let mut c = controller(5);
        c.apply(Command::Place(Point::new(0, 0)));
        c.apply(Command::Place(Point::new(4, 4)));
        assert!(c.apply(Command::Toggle));
        assert_eq!(c.mode(), Mode::Running);

        c.tick();
        assert_eq!(c.engine().map(SearchEngine::steps), Some(1));
        c.tick();
        assert_eq!(c.engine().map(SearchEngine::steps), Some(2));

        run_until_done(&mut c);
        assert_eq!(c.mode(), Mode::Editing);
        assert_eq!(c.outcome(), Some(SearchStatus::Succeeded));
        assert_eq!(c.last_path_len(), Some(8));
        assert_eq!(c.grid().count(CellState::Path), 7);
        assert!(c.engine().is_none());
    }

    #[test]
    fn pause_stops_ticking() {
        let mut c = controller(6);
        c.apply(Command::Place(Point::new(0, 0)));
        c.apply(Command::Place(Point::new(5, 5)));
        c.apply(Command::Toggle);
        c.tick();
        assert!(c.apply(Command::Toggle));
        assert_eq!(c.mode(), Mode::Paused);
        let before = c.grid().snapshot();
        for _ in 0..5 {
            c.tick();
        }
        assert_eq!(c.grid().snapshot(), before);
        assert_eq!(c.engine().map(SearchEngine::steps), Some(1));
        assert!(c.apply(Command::Toggle));
        assert_eq!(c.mode(), Mode::Running);
    }

    #[test]
    fn edits_refused_while_running() {
        let mut c = controller(5);
        c.apply(Command::Place(Point::new(0, 0)));
        c.apply(Command::Place(Point::new(4, 4)));
        c.apply(Command::Toggle);
        let before = c.grid().snapshot();
        assert!(!c.apply(Command::Place(Point::new(2, 2))));
        assert!(!c.apply(Command::Erase(Point::new(4, 4))));
        assert!(!c.apply(Command::Reset));
        assert_eq!(c.grid().snapshot(), before);
        assert_eq!(c.mode(), Mode::Running);
    }

    #[test]
    fn paused_barrier_on_unchecked_cell_is_avoided() {
        let mut c = controller(7);
        c.apply(Command::Place(Point::new(3, 0)));
        c.apply(Command::Place(Point::new(3, 6)));
        c.apply(Command::Toggle);
        c.tick();
        c.tick();
        c.apply(Command::Toggle);

        let wall = Point::new(3, 4);
        assert!(c.apply(Command::Place(wall)));
        assert!(!c.grid().neighbors(Point::new(3, 3)).contains(&wall));

        c.apply(Command::Toggle);
        run_until_done(&mut c);
        assert_eq!(c.outcome(), Some(SearchStatus::Succeeded));
        assert_eq!(c.grid().state(wall), Some(CellState::Barrier));
        assert!(c.last_path_len().unwrap() >= 6);
    }

    #[test]
    fn paused_edits_on_touched_cells_are_refused() {
        let mut c = controller(5);
        let start = Point::new(2, 2);
        c.apply(Command::Place(start));
        c.apply(Command::Place(Point::new(4, 4)));
        // Wall right next to start, placed while editing.
        let wall = Point::new(1, 2);
        c.apply(Command::Place(wall));
        c.apply(Command::Toggle);
        c.tick();
        c.apply(Command::Toggle);
        assert_eq!(c.mode(), Mode::Paused);

        let before = c.grid().snapshot();
        // Open cell: not unchecked.
        assert!(!c.apply(Command::Place(Point::new(3, 2))));
        // Start cell.
        assert!(!c.apply(Command::Place(start)));
        // Barrier whose neighbour is the start.
        assert!(!c.apply(Command::Erase(wall)));
        // Unchecked cell is not a barrier; nothing to erase.
        assert!(!c.apply(Command::Erase(Point::new(0, 0))));
        assert_eq!(c.grid().snapshot(), before);
    }

    #[test]
    fn paused_erase_of_far_barrier_reopens_it() {
        let mut c = controller(6);
        c.apply(Command::Place(Point::new(0, 0)));
        c.apply(Command::Place(Point::new(0, 5)));
        let wall = Point::new(5, 5);
        c.apply(Command::Place(wall));
        c.apply(Command::Toggle);
        c.tick();
        c.apply(Command::Toggle);

        assert!(c.apply(Command::Erase(wall)));
        assert_eq!(c.grid().state(wall), Some(CellState::Unchecked));
        assert!(c.grid().neighbors(Point::new(4, 5)).contains(&wall));
        assert!(c.grid().neighbors(Point::new(5, 4)).contains(&wall));
    }

    #[test]
    fn walled_off_end_exhausts_without_path() {
        let mut c = controller(3);
        c.apply(Command::Place(Point::new(0, 0)));
        c.apply(Command::Place(Point::new(0, 2)));
        for r in 0..3 {
            c.apply(Command::Place(Point::new(r, 1)));
        }
        c.apply(Command::Toggle);
        run_until_done(&mut c);
        assert_eq!(c.outcome(), Some(SearchStatus::Exhausted));
        assert_eq!(c.last_path_len(), None);
        assert_eq!(c.grid().count(CellState::Path), 0);
    }

    #[test]
    fn reset_from_paused_or_editing_gives_empty_grid() {
        let mut c = controller(5);
        c.apply(Command::Place(Point::new(0, 0)));
        c.apply(Command::Place(Point::new(4, 4)));
        c.apply(Command::Toggle);
        c.tick();
        c.apply(Command::Toggle);
        assert!(c.apply(Command::Reset));
        assert_eq!(c.mode(), Mode::Editing);
        assert_eq!(c.start(), None);
        assert_eq!(c.end(), None);
        assert!(c.engine().is_none());
        assert_eq!(c.grid().count(CellState::Unchecked), 25);

        assert!(c.apply(Command::Reset));
        assert_eq!(c.grid().count(CellState::Unchecked), 25);
    }

    #[test]
    fn second_run_clears_previous_marks() {
        let mut c = controller(5);
        c.apply(Command::Place(Point::new(0, 0)));
        c.apply(Command::Place(Point::new(0, 4)));
        c.apply(Command::Toggle);
        run_until_done(&mut c);
        assert!(c.grid().count(CellState::Path) > 0);

        assert!(c.apply(Command::Toggle));
        assert_eq!(c.grid().count(CellState::Path), 0);
        assert_eq!(c.grid().count(CellState::Closed), 0);
        assert_eq!(c.grid().count(CellState::Open), 0);
        run_until_done(&mut c);
        assert_eq!(c.last_path_len(), Some(4));
    }

    #[test]
    fn auto_run_finishes_in_one_tick() {
        let mut c = InteractionController::new(Config::default().with_rows(8).with_auto_run(true));
        c.apply(Command::Place(Point::new(0, 0)));
        c.apply(Command::Place(Point::new(7, 7)));
        c.apply(Command::Toggle);
        c.tick();
        assert_eq!(c.mode(), Mode::Editing);
        assert_eq!(c.last_path_len(), Some(14));
    }

    #[test]
    fn messages_map_to_commands() {
        let mut c = controller(4);
        assert!(c.update(Msg::mouse(MouseAction::Main, Point::new(1, 1))).is_none());
        assert_eq!(c.start(), Some(Point::new(1, 1)));
        c.update(Msg::mouse(MouseAction::Secondary, Point::new(1, 1)));
        assert_eq!(c.start(), None);
        assert_eq!(
            InteractionController::command_for(&Msg::key(Key::Space)),
            Some(Command::Toggle)
        );
        assert_eq!(
            InteractionController::command_for(&Msg::key(Key::Char('c'))),
            Some(Command::Reset)
        );
        assert_eq!(InteractionController::command_for(&Msg::Init), None);
        assert_eq!(c.update(Msg::key(Key::Char('q'))), Some(Effect::End));
        assert_eq!(c.update(Msg::Quit), Some(Effect::End));
    }
}
