use image::{Rgba, RgbaImage};
use ndarray::Array2;

pub trait ColorScale {
    fn escape_color(&self, value: f64, limit: u32) -> Rgba<u8>;
}

/// Hue wheel at 50% saturation; points that never escape are painted black.
#[derive(Copy, Clone, Debug)]
pub struct Hsl;

impl ColorScale for Hsl {
    fn escape_color(&self, value: f64, limit: u32) -> Rgba<u8> {
        if value == f64::from(limit) {
            return Rgba([0, 0, 0, 0xff]);
        }
        let hue = value / f64::from(limit) * 360.0;
        let [r, g, b] = hsl_to_rgb(hue, 0.5, 0.5);
        Rgba([r, g, b, 0xff])
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Greyscale;

impl ColorScale for Greyscale {
    fn escape_color(&self, value: f64, limit: u32) -> Rgba<u8> {
        if value == f64::from(limit) {
            return Rgba([0, 0, 0, 0xff]);
        }
        let frac = (value / f64::from(limit)).clamp(0.0, 1.0);
        let v = 255 - (frac * 255.0).round() as u8;
        Rgba([v, v, v, 0xff])
    }
}

// standard piecewise conversion; hue in degrees (wrapped mod 360), s and l
// in [0, 1]. A NaN hue falls through to the last sector and saturates to 0
// channels instead of panicking.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };
    [channel(r + m), channel(g + m), channel(b + m)]
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round() as u8
}

pub trait Painter {
    fn paint(&self, values: &Array2<f64>) -> RgbaImage;
}

pub struct EscapePainter<C> {
    scale: C,
    limit: u32,
}

impl<C> EscapePainter<C>
where
    C: ColorScale,
{
    pub fn new(scale: C, limit: u32) -> Self {
        Self { scale, limit }
    }
}

impl<C> Painter for EscapePainter<C>
where
    C: ColorScale,
{
    fn paint(&self, values: &Array2<f64>) -> RgbaImage {
        let width: u32 = values.ncols().try_into().unwrap();
        let height: u32 = values.nrows().try_into().unwrap();

        let mut img = RgbaImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let value = values[[y as usize, x as usize]];
                img.put_pixel(x, y, self.scale.escape_color(value, self.limit));
            }
        }
        img
    }
}
