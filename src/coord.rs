use ndarray::Array2;

use crate::complex::{c, C};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "degenerate resolution");
        Self { width, height }
    }

    pub fn pixels(&self) -> usize {
        self.width * self.height
    }
}

/// Axis-aligned rectangle in the complex plane, held as its top-left and
/// bottom-right corners. Every operation returns a new value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    top_left: C<f64>,
    bottom_right: C<f64>,
}

impl Region {
    pub fn new(top_left: C<f64>, bottom_right: C<f64>) -> Self {
        assert!(
            top_left.re < bottom_right.re && top_left.im > bottom_right.im,
            "inverted or degenerate region"
        );
        Self {
            top_left,
            bottom_right,
        }
    }

    pub fn top_left(&self) -> C<f64> {
        self.top_left
    }

    pub fn bottom_right(&self) -> C<f64> {
        self.bottom_right
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.re - self.top_left.re
    }

    pub fn height(&self) -> f64 {
        self.top_left.im - self.bottom_right.im
    }

    pub fn center(&self) -> C<f64> {
        c(
            (self.top_left.re + self.bottom_right.re) / 2.0,
            (self.top_left.im + self.bottom_right.im) / 2.0,
        )
    }

    /// Factor > 1 shrinks the region (zoom in), factor < 1 grows it.
    pub fn zoom(&self, factor: f64, center: C<f64>) -> Self {
        assert!(factor > 0.0, "zoom factor must be positive");
        Self::new(
            center + (self.top_left - center) / factor,
            center + (self.bottom_right - center) / factor,
        )
    }

    /// Plane coordinate under pixel (x, y); (0, 0) lands on the top-left
    /// corner and rows advance toward negative imaginary values.
    pub fn point_at(&self, x: usize, y: usize, resolution: Resolution) -> C<f64> {
        let re = x as f64 / resolution.width as f64 * self.width() + self.top_left.re;
        let im = self.top_left.im - y as f64 / resolution.height as f64 * self.height();
        c(re, im)
    }

    pub fn coordinates(&self, resolution: Resolution) -> Array2<C<f64>> {
        Array2::from_shape_fn((resolution.height, resolution.width), |(y, x)| {
            self.point_at(x, y, resolution)
        })
    }
}
