use std::f64::consts::LN_2;
use std::sync::Arc;

use ndarray::{concatenate, s, Array2, Axis, Zip};

use crate::complex::C;
use crate::coord::{Region, Resolution};
use crate::threads::{Call, Join, RangeSplitter, Split, WorkerPool};

pub trait Solver<T> {
    fn solve(&self, state: T) -> T;

    fn threaded(self, n: usize) -> WorkerPool<T, T>
    where
        Self: Sized + Clone + Send + 'static,
        T: Split + Join + Send + 'static,
    {
        WorkerPool::with(n, || {
            let solver = self.clone();
            move |state| solver.solve(state)
        })
    }
}

impl<T> Solver<T> for WorkerPool<T, T>
where
    T: Split + Join + Send + 'static,
{
    fn solve(&self, state: T) -> T {
        self.call(state)
    }
}

/// One frame's worth of work: the coordinate grid and, after solving, the
/// escape value of every pixel. Splits into row bands for the worker pool.
#[derive(Clone, Debug)]
pub struct EscapeState {
    width: usize,
    height: usize,
    limit: u32,
    ca: Arc<Array2<C<f64>>>,
    va: Arc<Array2<f64>>,
}

impl EscapeState {
    pub fn initialize(region: &Region, resolution: Resolution, limit: u32) -> Self {
        assert!(limit > 0, "iteration limit must be positive");
        Self {
            width: resolution.width,
            height: resolution.height,
            limit,
            ca: Arc::new(region.coordinates(resolution)),
            va: Arc::new(Array2::zeros((resolution.height, resolution.width))),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.va
    }

    pub fn value(&self, x: usize, y: usize) -> f64 {
        self.va[[y, x]]
    }
}

impl Split for EscapeState {
    fn split_to_vec(self, n: usize) -> Vec<Self> {
        let mut parts = vec![];
        for (start, end) in RangeSplitter::split(0, self.height, n) {
            let slice = s![start..end, ..];
            let ca: Array2<C<f64>> = self.ca.slice(slice).into_owned();
            let va: Array2<f64> = self.va.slice(slice).into_owned();
            parts.push(Self {
                width: self.width,
                height: end - start,
                limit: self.limit,
                ca: Arc::new(ca),
                va: Arc::new(va),
            })
        }
        parts
    }
}

impl Join for EscapeState {
    fn join_vec(parts: Vec<Self>) -> Self {
        let width = parts[0].width;
        let limit = parts[0].limit;
        let mut height = 0;
        let mut cas = vec![];
        let mut vas = vec![];
        for part in &parts {
            assert!(part.width == width, "different width");
            assert!(part.limit == limit, "different limit");
            height += part.height;
            cas.push(part.ca.as_ref().view());
            vas.push(part.va.as_ref().view());
        }
        Self {
            width,
            height,
            limit,
            ca: Arc::new(concatenate(Axis(0), &cas).unwrap()),
            va: Arc::new(concatenate(Axis(0), &vas).unwrap()),
        }
    }
}

#[derive(Clone)]
pub struct EscapeSolver {
    threshold: f64,
}

impl EscapeSolver {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Smoothed escape-time estimate: exactly `limit` when the orbit stays
    /// bounded, otherwise the renormalized count `n + 1 - ln(ln|z|)/ln 2`.
    /// The correction is deliberately unclamped; it can push the value just
    /// past either integer neighbor of n.
    pub fn escape_value(&self, c: C<f64>, limit: u32) -> f64 {
        let mut z = c;
        let mut n = 1u32;
        while n < limit && z.norm() < self.threshold {
            z = (z * z) + c;
            n += 1;
        }
        if n == limit {
            f64::from(limit)
        } else {
            f64::from(n) + 1.0 - z.norm().ln().ln() / LN_2
        }
    }
}

impl Default for EscapeSolver {
    fn default() -> Self {
        Self { threshold: 2.0 }
    }
}

impl Solver<EscapeState> for EscapeSolver {
    fn solve(&self, state: EscapeState) -> EscapeState {
        let va = Zip::from(state.ca.as_ref()).map_collect(|&c| self.escape_value(c, state.limit));
        EscapeState {
            va: Arc::new(va),
            ..state
        }
    }
}

pub fn default_solver() -> WorkerPool<EscapeState, EscapeState> {
    EscapeSolver::default().threaded(num_cpus::get_physical())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::complex::{c, ci, cr};

    fn initial() -> Region {
        Region::new(c(-2.0, 1.0), c(1.0, -1.0))
    }

    #[test]
    fn test_interior_point_never_escapes() {
        let solver = EscapeSolver::default();
        for limit in [1, 2, 50, 200] {
            assert_eq!(solver.escape_value(c(0.0, 0.0), limit), f64::from(limit));
        }
    }

    #[test]
    fn test_far_exterior_escapes_on_first_check() {
        let solver = EscapeSolver::default();
        let value = solver.escape_value(c(2.0, 2.0), 50);
        assert!(value >= 1.0);
        assert!(value < 2.0);
    }

    #[test]
    fn test_escaping_point_stays_below_limit() {
        let solver = EscapeSolver::default();
        let value = solver.escape_value(c(0.5, 0.5), 100);
        assert!(value > 1.0);
        assert!(value < 100.0);
    }

    #[test]
    fn test_axis_points() {
        let solver = EscapeSolver::default();
        assert!(solver.escape_value(cr(-2.5), 40) < 40.0);
        let value = solver.escape_value(ci(1.2), 30);
        assert!(value > 1.0);
        assert!(value < 30.0);
    }

    #[test]
    fn test_state_split_join_roundtrip() {
        let state = EscapeState::initialize(&initial(), Resolution::new(8, 6), 30);
        let solved = EscapeSolver::default().solve(state);
        let rejoined = EscapeState::join_vec(solved.clone().split_to_vec(4));
        assert_eq!(rejoined.width(), solved.width());
        assert_eq!(rejoined.height(), solved.height());
        assert_eq!(rejoined.limit(), solved.limit());
        assert_eq!(rejoined.values(), solved.values());
    }

    #[test]
    fn test_split_handles_more_parts_than_rows() {
        let state = EscapeState::initialize(&initial(), Resolution::new(5, 3), 10);
        let parts = state.clone().split_to_vec(8);
        assert_eq!(parts.len(), 8);
        let rejoined = EscapeState::join_vec(parts);
        assert_eq!(rejoined.height(), 3);
    }

    #[test]
    fn test_threaded_solve_matches_single() {
        let state = EscapeState::initialize(&initial(), Resolution::new(31, 17), 60);
        let single = EscapeSolver::default().solve(state.clone());
        let pooled = EscapeSolver::default().threaded(3).solve(state);
        assert_eq!(single.values(), pooled.values());
    }

    #[test]
    fn test_solved_values_indexed_row_major() {
        let resolution = Resolution::new(7, 4);
        let state = EscapeState::initialize(&initial(), resolution, 25);
        let solved = EscapeSolver::default().solve(state);
        let solver = EscapeSolver::default();
        let expected = solver.escape_value(initial().point_at(6, 3, resolution), 25);
        assert_eq!(solved.value(6, 3), expected);
    }
}
