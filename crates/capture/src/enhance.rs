//! Frame pre-enhancement for OCR.
//!
//! Printed sticker numbers are dark digits on a light patch, so a light
//! blur followed by Otsu binarization is enough to hand the recognizer
//! clean black-on-white text. Anything fancier belongs behind the
//! recognizer seam, not here.

use image::GrayImage;

/// Crop the centered third of the frame (the aim rectangle the user
/// lines the sticker up with). Frames smaller than 3x3 are returned
/// as-is.
pub fn center_crop(frame: &GrayImage) -> GrayImage {
    let (w, h) = frame.dimensions();
    if w < 3 || h < 3 {
        return frame.clone();
    }
    let (cw, ch) = (w / 3, h / 3);
    let (x, y) = (w / 2 - cw / 2, h / 2 - ch / 2);
    image::imageops::crop_imm(frame, x, y, cw, ch).to_image()
}

/// Blur then binarize with Otsu's threshold.
pub fn enhance(frame: &GrayImage) -> GrayImage {
    let blurred = box_blur3(frame);
    let threshold = otsu_threshold(&histogram(&blurred));
    let mut out = blurred;
    for pixel in out.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { 255 } else { 0 };
    }
    out
}

/// 3x3 box blur with edge clamping.
fn box_blur3(frame: &GrayImage) -> GrayImage {
    let (w, h) = frame.dimensions();
    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0u32;
            let mut n = 0u32;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx >= 0 && ny >= 0 && (nx as u32) < w && (ny as u32) < h {
                        sum += frame.get_pixel(nx as u32, ny as u32).0[0] as u32;
                        n += 1;
                    }
                }
            }
            out.get_pixel_mut(x, y).0[0] = (sum / n) as u8;
        }
    }
    out
}

fn histogram(frame: &GrayImage) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for pixel in frame.pixels() {
        hist[pixel.0[0] as usize] += 1;
    }
    hist
}

/// Otsu's method: the threshold that maximizes between-class variance.
pub fn otsu_threshold(hist: &[u32; 256]) -> u8 {
    let total: u64 = hist.iter().map(|&c| c as u64).sum();
    if total == 0 {
        return 127;
    }
    let weighted_total: u64 = hist
        .iter()
        .enumerate()
        .map(|(level, &c)| level as u64 * c as u64)
        .sum();

    let mut best_threshold = 0u8;
    let mut best_variance = 0.0f64;
    let mut background_count = 0u64;
    let mut background_sum = 0u64;

    for level in 0..256usize {
        background_count += hist[level] as u64;
        if background_count == 0 {
            continue;
        }
        let foreground_count = total - background_count;
        if foreground_count == 0 {
            break;
        }
        background_sum += level as u64 * hist[level] as u64;

        let mean_bg = background_sum as f64 / background_count as f64;
        let mean_fg = (weighted_total - background_sum) as f64 / foreground_count as f64;
        let variance = background_count as f64 * foreground_count as f64
            * (mean_bg - mean_fg)
            * (mean_bg - mean_fg);

        if variance > best_variance {
            best_variance = variance;
            best_threshold = level as u8;
        }
    }

    best_threshold
}
