use astar_core::Grid;

/// Observer invoked after every step of
/// [`SearchEngine::run_to_completion`](crate::SearchEngine::run_to_completion).
///
/// It only sees the grid immutably and has no access to the engine, so it can
/// render or record but never steer the search.
pub trait StepObserver {
    fn on_step(&mut self, grid: &Grid);
}

impl<F: FnMut(&Grid)> StepObserver for F {
    #[inline]
    fn on_step(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// Observer that ignores every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    #[inline]
    fn on_step(&mut self, _grid: &Grid) {}
}
