use crate::complex::C;
use crate::coord::Region;

#[derive(Copy, Clone, Debug)]
pub enum Command {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    MoreDetail,
    LessDetail,
    Reset,
}

/// Interactive navigation state: zoom factor, zoom center and iteration
/// limit. The displayed region is always re-derived from the fixed initial
/// region, never accumulated.
#[derive(Clone, Debug)]
pub struct Viewport {
    initial: Region,
    default_limit: u32,
    zoom_factor: f64,
    center: C<f64>,
    limit: u32,
}

impl Viewport {
    pub fn new(initial: Region, limit: u32) -> Self {
        assert!(limit > 0, "iteration limit must be positive");
        Self {
            initial,
            default_limit: limit,
            zoom_factor: 1.0,
            center: initial.center(),
            limit,
        }
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn center(&self) -> C<f64> {
        self.center
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn region(&self) -> Region {
        self.initial.zoom(self.zoom_factor, self.center)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PanLeft => self.center.re -= self.pan_step() / 1.3,
            Command::PanRight => self.center.re += self.pan_step() / 1.3,
            Command::PanUp => self.center.im += self.pan_step(),
            Command::PanDown => self.center.im -= self.pan_step(),
            Command::ZoomIn => {
                self.zoom_factor *= 1.1;
                self.limit += 2;
            }
            Command::ZoomOut => {
                self.zoom_factor /= 1.1;
                self.lower_limit(2);
            }
            Command::MoreDetail => self.limit += 4,
            Command::LessDetail => self.lower_limit(4),
            Command::Reset => {
                self.zoom_factor = 1.0;
                self.center = self.initial.center();
                self.limit = self.default_limit;
            }
        }
    }

    // step shrinks with the zoom factor so apparent pan speed stays constant
    // on screen
    fn pan_step(&self) -> f64 {
        1.0 / self.zoom_factor
    }

    fn lower_limit(&mut self, n: u32) {
        // floor of 1 keeps the escape loop well-defined
        self.limit = self.limit.saturating_sub(n).max(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::complex::c;

    fn viewport() -> Viewport {
        Viewport::new(Region::new(c(-2.0, 1.0), c(1.0, -1.0)), 50)
    }

    #[test]
    fn test_ten_zoom_ins() {
        let mut vp = viewport();
        for _ in 0..10 {
            vp.apply(Command::ZoomIn);
        }
        assert!((vp.zoom_factor() - 1.1f64.powi(10)).abs() < 1e-12);
        assert_eq!(vp.limit(), 70);
    }

    #[test]
    fn test_pan_step_shrinks_with_zoom() {
        let mut vp = viewport();
        let start = vp.center();
        vp.apply(Command::PanLeft);
        let step_flat = start.re - vp.center().re;
        assert!((step_flat - 1.0 / 1.3).abs() < 1e-12);

        let mut vp = viewport();
        for _ in 0..10 {
            vp.apply(Command::ZoomIn);
        }
        let start = vp.center();
        vp.apply(Command::PanLeft);
        let step_zoomed = start.re - vp.center().re;
        assert!((step_zoomed - 1.0 / vp.zoom_factor() / 1.3).abs() < 1e-12);
        assert!(step_zoomed < step_flat);
    }

    #[test]
    fn test_vertical_pan_step() {
        let mut vp = viewport();
        vp.apply(Command::PanUp);
        assert!((vp.center().im - 1.0).abs() < 1e-12);
        vp.apply(Command::PanDown);
        vp.apply(Command::PanDown);
        assert!((vp.center().im + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_detail_commands() {
        let mut vp = viewport();
        vp.apply(Command::MoreDetail);
        assert_eq!(vp.limit(), 54);
        vp.apply(Command::LessDetail);
        assert_eq!(vp.limit(), 50);
    }

    #[test]
    fn test_zoom_commands_adjust_limit() {
        let mut vp = viewport();
        vp.apply(Command::ZoomIn);
        assert_eq!(vp.limit(), 52);
        vp.apply(Command::ZoomOut);
        assert_eq!(vp.limit(), 50);
    }

    #[test]
    fn test_limit_clamped_at_one() {
        let mut vp = viewport();
        for _ in 0..40 {
            vp.apply(Command::LessDetail);
        }
        assert_eq!(vp.limit(), 1);
        vp.apply(Command::ZoomOut);
        assert_eq!(vp.limit(), 1);
    }

    #[test]
    fn test_reset() {
        let mut vp = viewport();
        for _ in 0..5 {
            vp.apply(Command::ZoomIn);
            vp.apply(Command::PanRight);
        }
        vp.apply(Command::Reset);
        assert_eq!(vp.zoom_factor(), 1.0);
        assert_eq!(vp.center(), c(-0.5, 0.0));
        assert_eq!(vp.limit(), 50);
    }

    #[test]
    fn test_region_at_defaults_is_initial() {
        let region = viewport().region();
        assert!((region.width() - 3.0).abs() < 1e-12);
        assert_eq!(region.center(), c(-0.5, 0.0));
    }

    #[test]
    fn test_zoomed_region_shrinks() {
        let mut vp = viewport();
        vp.apply(Command::ZoomIn);
        assert!((vp.region().width() - 3.0 / 1.1).abs() < 1e-12);
    }
}
