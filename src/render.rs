use image::RgbaImage;

use crate::coord::{Region, Resolution};
use crate::painter::{ColorScale, EscapePainter, Painter};
use crate::solver::{default_solver, EscapeSolver, EscapeState, Solver};

/// Full-frame pipeline: pixel grid to plane coordinates, escape values
/// across the worker pool, then an RGBA buffer rebuilt from scratch.
pub struct Renderer {
    solver: Box<dyn Solver<EscapeState> + Send>,
}

impl Renderer {
    pub fn new(solver: Box<dyn Solver<EscapeState> + Send>) -> Self {
        Self { solver }
    }

    /// Pool sized to the physical CPUs.
    pub fn threaded() -> Self {
        Self::new(Box::new(default_solver()))
    }

    pub fn single_threaded() -> Self {
        Self::new(Box::new(EscapeSolver::default()))
    }

    pub fn render<S>(
        &self,
        region: &Region,
        resolution: Resolution,
        limit: u32,
        scale: S,
    ) -> RgbaImage
    where
        S: ColorScale,
    {
        let state = EscapeState::initialize(region, resolution, limit);
        let solved = self.solver.solve(state);
        EscapePainter::new(scale, limit).paint(solved.values())
    }
}
