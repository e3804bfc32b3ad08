//! Sobel edge-gradient engine with static work partitioning.
//!
//! The image is divided into disjoint contiguous spans of linear pixel
//! indices, one per worker thread; each worker convolves its span and writes
//! into its own exclusive sub-slice of the destination buffer. Workers are
//! plain OS threads spawned fresh per call and joined before the call
//! returns, so the caller always observes a fully populated result. The
//! source buffer is shared read-only; destination disjointness is structural
//! (successive `split_at_mut`), so no locks or atomics are involved.
//!
//! Border policy: taps whose coordinates fall outside the image are omitted
//! from the convolution sum entirely — not zero-padded and not clamped to
//! the edge. This changes the effective kernel weight near borders and is
//! kept deliberately for bit-exact output against the reference images.

use std::ops::Range;
use std::thread;

use imgref::ImgVec;

use crate::convert::rgb_to_grayscale;
use crate::error::PnmError;
use crate::pixel::{GrayImage, RgbImage};

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Compute the Sobel gradient magnitude of an RGB image.
///
/// Converts to grayscale first (truncating channel average), then runs
/// [`sobel_grayscale`] across `thread_count` workers.
pub fn sobel(image: &RgbImage, thread_count: usize) -> Result<GrayImage, PnmError> {
    let gray = rgb_to_grayscale(image);
    sobel_grayscale(&gray, thread_count)
}

/// Compute the Sobel gradient magnitude of a grayscale image.
///
/// Output dimensions and scale match the input; every output intensity is
/// `round(sqrt(gx² + gy²))` clamped to `[0, scale]`. Fails with
/// [`PnmError::Config`] if `thread_count` is zero. A `thread_count` of 1
/// runs inline without spawning.
pub fn sobel_grayscale(image: &GrayImage, thread_count: usize) -> Result<GrayImage, PnmError> {
    if thread_count < 1 {
        return Err(PnmError::Config(format!(
            "thread count must be at least 1, got {thread_count}"
        )));
    }

    let (w, h) = (image.width(), image.height());
    let len = w * h;
    let mut out = vec![0u16; len];

    if len > 0 {
        if thread_count == 1 {
            fill_span(image, 0..len, &mut out);
        } else {
            thread::scope(|scope| {
                let mut rest = out.as_mut_slice();
                for span in partition(len, thread_count) {
                    let (chunk, tail) = rest.split_at_mut(span.len());
                    rest = tail;
                    scope.spawn(move || fill_span(image, span, chunk));
                }
            });
        }
    }

    Ok(GrayImage {
        pixels: ImgVec::new(out, w, h),
        scale: image.scale,
    })
}

/// Divide `[0, len)` into contiguous spans of `max(1, len / thread_count)`
/// indices each, the last clamped to `len`.
///
/// Completeness and disjointness hold for every input: each span starts
/// where the previous one ended, the first starts at 0, and spans are
/// emitted until one ends at `len`. With `step >= 1` the loop always
/// terminates; the `max(1)` guards the `thread_count > len` case, where the
/// untruncated quotient would be zero.
fn partition(len: usize, thread_count: usize) -> Vec<Range<usize>> {
    let step = (len / thread_count).max(1);
    let mut spans = Vec::with_capacity(len.div_ceil(step));
    let mut start = 0;
    while start < len {
        let end = (start + step).min(len);
        spans.push(start..end);
        start = end;
    }
    spans
}

/// Convolve every linear index in `span`, writing into `dest` (which holds
/// exactly the destination cells for that span).
fn fill_span(image: &GrayImage, span: Range<usize>, dest: &mut [u16]) {
    let w = image.width();
    for (cell, idx) in dest.iter_mut().zip(span) {
        *cell = sobel_at(image, idx % w, idx / w);
    }
}

/// Gradient magnitude at `(x, y)`, with out-of-range taps omitted.
fn sobel_at(image: &GrayImage, x: usize, y: usize) -> u16 {
    let w = image.width() as isize;
    let h = image.height() as isize;
    let mut gx: i64 = 0;
    let mut gy: i64 = 0;

    for a in 0..3usize {
        for b in 0..3usize {
            let yn = y as isize + a as isize - 1;
            let xn = x as isize + b as isize - 1;
            if yn < 0 || yn >= h || xn < 0 || xn >= w {
                continue;
            }
            let v = image.get(xn as usize, yn as usize) as i64;
            gx += v * SOBEL_KERNEL_X[a][b] as i64;
            gy += v * SOBEL_KERNEL_Y[a][b] as i64;
        }
    }

    let magnitude = ((gx * gx + gy * gy) as f64).sqrt().round() as u64;
    magnitude.min(image.scale as u64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::RgbPixel;

    /// Left half 0, right half `high`, tall enough to have interior rows.
    fn step_image(width: usize, height: usize, high: u16, scale: u16) -> GrayImage {
        let mut img = GrayImage::new(width, height, scale);
        for y in 0..height {
            for x in width / 2..width {
                img.pixels.buf_mut()[y * width + x] = high;
            }
        }
        img
    }

    #[test]
    fn rejects_zero_threads() {
        let img = GrayImage::new(4, 4, 255);
        assert!(matches!(
            sobel_grayscale(&img, 0),
            Err(PnmError::Config(_))
        ));
    }

    #[test]
    fn black_image_has_zero_gradient() {
        for (w, h, threads) in [(1, 1, 1), (5, 4, 1), (8, 8, 3), (3, 7, 16)] {
            let img = GrayImage::new(w, h, 255);
            let result = sobel_grayscale(&img, threads).unwrap();
            assert!(
                result.pixels.buf().iter().all(|&v| v == 0),
                "{w}x{h} with {threads} threads"
            );
        }
    }

    #[test]
    fn uniform_image_has_zero_gradient_in_the_interior() {
        // Border pixels see a truncated kernel whose surviving weights do
        // not cancel, so only the interior is guaranteed flat.
        let mut img = GrayImage::new(8, 6, 1000);
        img.pixels.buf_mut().fill(77);
        let result = sobel_grayscale(&img, 3).unwrap();
        for y in 1..5 {
            for x in 1..7 {
                assert_eq!(result.get(x, y), 0, "({x}, {y})");
            }
        }
        // One-sided column at the left edge: gx = 77 * (1 + 2 + 1).
        assert_eq!(result.get(0, 2), 308);
    }

    #[test]
    fn step_edge_magnitudes_match_hand_computation() {
        // 6 wide: columns 0-2 are 0, columns 3-5 are 255. For an interior
        // row, a pixel one column left of the boundary sees the 255 column
        // through GX weights 1,2,1 -> gx = 1020, and symmetric rows cancel
        // gy. Same value one column right of the boundary.
        let img = step_image(6, 5, 255, 2000);
        let result = sobel_grayscale(&img, 1).unwrap();
        for y in 1..4 {
            assert_eq!(result.get(2, y), 1020);
            assert_eq!(result.get(3, y), 1020);
            // Away from the boundary the neighborhood is uniform.
            assert_eq!(result.get(0, y), 0);
            assert_eq!(result.get(1, y), 0);
            assert_eq!(result.get(4, y), 0);
            // The rightmost column loses its positive GX taps, leaving the
            // one-sided -1020; the magnitude is 1020 again.
            assert_eq!(result.get(5, y), 1020);
        }
        // Top row: the y-1 taps are omitted, so gx = 255*(2+1) = 765 and
        // gy picks up the surviving row below: sqrt(765^2 + 255^2) = 806.4.
        assert_eq!(result.get(2, 0), 806);
    }

    #[test]
    fn output_clamps_to_scale() {
        let img = step_image(6, 5, 255, 255);
        let result = sobel_grayscale(&img, 2).unwrap();
        assert!(result.pixels.buf().iter().all(|&v| v <= 255));
        // The raw boundary magnitude is 1020; it must clamp, not wrap.
        assert_eq!(result.get(2, 2), 255);
    }

    #[test]
    fn threaded_output_matches_single_threaded() {
        // Deterministic pseudo-random image.
        let (w, h) = (23, 17);
        let mut img = GrayImage::new(w, h, 255);
        let mut state = 0x2545F4914F6CDD1Du64;
        for v in img.pixels.buf_mut() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            *v = (state >> 56) as u16;
        }
        let reference = sobel_grayscale(&img, 1).unwrap();
        for threads in [2, 3, 7, 64, w * h] {
            let result = sobel_grayscale(&img, threads).unwrap();
            assert_eq!(result, reference, "{threads} threads");
        }
    }

    #[test]
    fn more_threads_than_pixels() {
        let mut img = GrayImage::new(2, 2, 255);
        img.pixels.buf_mut().copy_from_slice(&[0, 255, 255, 0]);
        let single = sobel_grayscale(&img, 1).unwrap();
        let many = sobel_grayscale(&img, 16).unwrap();
        assert_eq!(single, many);
    }

    #[test]
    fn rgb_entry_point_converts_first() {
        let mut img = RgbImage::new(6, 5, 255);
        for (i, px) in img.pixels.buf_mut().iter_mut().enumerate() {
            *px = RgbPixel {
                r: (i as u16 * 7) % 256,
                g: (i as u16 * 13) % 256,
                b: (i as u16 * 29) % 256,
            };
        }
        let via_rgb = sobel(&img, 2).unwrap();
        let via_gray = sobel_grayscale(&crate::convert::rgb_to_grayscale(&img), 2).unwrap();
        assert_eq!(via_rgb, via_gray);
        assert_eq!(via_rgb.scale, 255);
    }

    #[test]
    fn partition_tiles_the_index_space() {
        let mut state = 0x9E3779B97F4A7C15u64;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        for _ in 0..200 {
            let len = (next() % 500 + 1) as usize;
            let threads = (next() % (len as u64)) as usize + 1;
            let spans = partition(len, threads);
            let mut expected_start = 0;
            for span in &spans {
                assert_eq!(span.start, expected_start, "len={len} threads={threads}");
                assert!(span.end > span.start);
                expected_start = span.end;
            }
            assert_eq!(expected_start, len, "len={len} threads={threads}");
        }
    }

    #[test]
    fn partition_step_never_zero() {
        // thread_count greater than the pixel count degenerates to one
        // single-index span per pixel instead of dividing by zero.
        let spans = partition(3, 10);
        assert_eq!(spans, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn empty_image_yields_empty_result() {
        let img = GrayImage::new(0, 0, 255);
        let result = sobel_grayscale(&img, 4).unwrap();
        assert_eq!(result.pixels.buf().len(), 0);
    }
}
