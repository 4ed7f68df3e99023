// icon.rs
use image::{Rgba, RgbaImage};

pub const ICON_SIZE: u32 = 32;

/// White square on black, drawn at runtime so no icon file has to ship.
pub fn icon_image(size: u32) -> RgbaImage {
    let lo = size / 4;
    let hi = size - lo;
    RgbaImage::from_fn(size, size, |x, y| {
        if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

pub fn window_icon() -> egui::IconData {
    let image = icon_image(ICON_SIZE);
    egui::IconData {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_has_white_center_and_black_border() {
        let image = icon_image(64);
        assert_eq!(image.dimensions(), (64, 64));
        assert_eq!(image.get_pixel(32, 32), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(15, 32), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(16, 16), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn window_icon_buffer_matches_dimensions() {
        let icon = window_icon();
        assert_eq!(icon.rgba.len(), (icon.width * icon.height * 4) as usize);
    }
}
