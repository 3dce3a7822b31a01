use std::sync::Arc;

use druid::piet::ImageFormat;
use druid::ImageBuf;
use image::RgbaImage;

pub mod widget;

pub fn convert_image(img: RgbaImage) -> ImageBuf {
    let raw: Arc<[u8]> = img.as_raw().clone().into();

    ImageBuf::from_raw(
        raw,
        ImageFormat::RgbaSeparate,
        img.width() as usize,
        img.height() as usize,
    )
}
