use crate::error::Result;
use crate::sift::image::{GradientImage, GrayImage};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Dispatches the per-pixel, data-parallel kernels used by pyramid
/// construction, DoG, and gradient-field computation.
pub trait ComputeBackend {
    /// Gaussian blur with the given standard deviation, reflecting
    /// boundary pixels (no padding artifacts at image edges).
    fn blur(&self, src: &GrayImage, sigma: f32) -> Result<GrayImage>;

    /// Nearest-neighbor 2x upsample (octave 0 seeding).
    fn upsample2x(&self, src: &GrayImage) -> Result<GrayImage>;

    /// Nearest-neighbor 1/2 downsample (octave o+1 seeding).
    fn downsample_half(&self, src: &GrayImage) -> Result<GrayImage>;

    /// Per-pixel difference `b - a`, used to build one DoG level.
    fn difference(&self, a: &GrayImage, b: &GrayImage) -> Result<GrayImage>;

    /// Per-pixel gradient magnitude/orientation field (C7).
    fn gradient_field(&self, src: &GrayImage) -> Result<GradientImage>;

    /// 3D extremum test over interior pixels of `curr` against its own
    /// 8 neighbors and the 9 neighbors (including itself) in `prev` and
    /// `next`, with a soft pre-threshold applied before a candidate is
    /// emitted. Returns interior `(x, y)` pixel coordinates.
    fn find_extrema(
        &self,
        prev: &GrayImage,
        curr: &GrayImage,
        next: &GrayImage,
        soft_threshold: f32,
    ) -> Result<Vec<(usize, usize)>>;
}

/// Deterministic CPU implementation. Kernels expressible as an
/// independent per-pixel/per-row map are parallelized with `rayon`, the
/// same data-parallel granularity a GPU grid dispatch would use (one
/// workgroup row per thread).
pub struct CpuBackend;

impl CpuBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = ((4.0 * sigma).ceil() as i64).max(1);
    let size = (2 * radius + 1) as usize;
    let mut kernel = vec![0.0f32; size];
    let mut sum = 0.0f32;
    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        let v = (-x * x / (2.0 * sigma * sigma)).exp();
        *k = v;
        sum += v;
    }
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Mirror-reflect an out-of-range index back into `[0, len)`.
fn reflect(i: i64, len: usize) -> usize {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut m = i % period;
    if m < 0 {
        m += period;
    }
    (if m < len { m } else { period - m }) as usize
}

fn convolve_rows(src: &GrayImage, kernel: &[f32]) -> Vec<Vec<f32>> {
    let (w, h) = (src.width(), src.height());
    let radius = (kernel.len() / 2) as i64;
    let rows: Vec<usize> = (0..h).collect();
    rows.par_iter()
        .map(|&y| {
            let mut row = vec![0.0f32; w];
            for (x, slot) in row.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (k, &weight) in kernel.iter().enumerate() {
                    let sx = reflect(x as i64 + k as i64 - radius, w);
                    acc += weight * src.at(sx, y);
                }
                *slot = acc;
            }
            row
        })
        .collect()
}

fn convolve_cols(src: &GrayImage, kernel: &[f32]) -> Vec<Vec<f32>> {
    let (w, h) = (src.width(), src.height());
    let radius = (kernel.len() / 2) as i64;
    let cols: Vec<usize> = (0..w).collect();
    cols.par_iter()
        .map(|&x| {
            let mut col = vec![0.0f32; h];
            for (y, slot) in col.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (k, &weight) in kernel.iter().enumerate() {
                    let sy = reflect(y as i64 + k as i64 - radius, h);
                    acc += weight * src.at(x, sy);
                }
                *slot = acc;
            }
            col
        })
        .collect()
}

impl ComputeBackend for CpuBackend {
    fn blur(&self, src: &GrayImage, sigma: f32) -> Result<GrayImage> {
        if sigma <= 0.0 {
            return Ok(src.clone());
        }
        let kernel = gaussian_kernel(sigma);
        let (w, h) = (src.width(), src.height());

        let mut horizontal = GrayImage::new(w, h)?;
        for (y, row) in convolve_rows(src, &kernel).into_iter().enumerate() {
            for (x, v) in row.into_iter().enumerate() {
                horizontal.set(x, y, v);
            }
        }

        let mut output = GrayImage::new(w, h)?;
        for (x, col) in convolve_cols(&horizontal, &kernel).into_iter().enumerate() {
            for (y, v) in col.into_iter().enumerate() {
                output.set(x, y, v);
            }
        }

        Ok(output)
    }

    fn upsample2x(&self, src: &GrayImage) -> Result<GrayImage> {
        let (w, h) = (src.width() * 2, src.height() * 2);
        let mut dst = GrayImage::new(w, h)?;
        for y in 0..h {
            let sy = (y / 2).min(src.height() - 1);
            for x in 0..w {
                let sx = (x / 2).min(src.width() - 1);
                dst.set(x, y, src.at(sx, sy));
            }
        }
        Ok(dst)
    }

    fn downsample_half(&self, src: &GrayImage) -> Result<GrayImage> {
        let w = (src.width() / 2).max(1);
        let h = (src.height() / 2).max(1);
        let mut dst = GrayImage::new(w, h)?;
        for y in 0..h {
            let sy = (y * 2).min(src.height() - 1);
            for x in 0..w {
                let sx = (x * 2).min(src.width() - 1);
                dst.set(x, y, src.at(sx, sy));
            }
        }
        Ok(dst)
    }

    fn difference(&self, a: &GrayImage, b: &GrayImage) -> Result<GrayImage> {
        let (w, h) = (a.width(), a.height());
        let mut dst = GrayImage::new(w, h)?;
        for y in 0..h {
            for x in 0..w {
                dst.set(x, y, b.at(x, y) - a.at(x, y));
            }
        }
        Ok(dst)
    }

    fn gradient_field(&self, src: &GrayImage) -> Result<GradientImage> {
        let (w, h) = (src.width(), src.height());
        let mut field = GradientImage::new(w, h)?;
        for y in 1..h.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                let dx = src.at(x + 1, y) - src.at(x - 1, y);
                let dy = src.at(x, y + 1) - src.at(x, y - 1);
                let magnitude = (dx * dx + dy * dy).sqrt() / 2.0;
                let orientation = dy.atan2(dx);
                field.set(x, y, magnitude, orientation);
            }
        }
        Ok(field)
    }

    fn find_extrema(
        &self,
        prev: &GrayImage,
        curr: &GrayImage,
        next: &GrayImage,
        soft_threshold: f32,
    ) -> Result<Vec<(usize, usize)>> {
        let (w, h) = (curr.width(), curr.height());
        if w < 3 || h < 3 {
            return Ok(Vec::new());
        }

        let rows: Vec<usize> = (1..h - 1).collect();
        let candidates: Vec<(usize, usize)> = rows
            .par_iter()
            .flat_map(|&y| {
                let mut row = Vec::new();
                for x in 1..w - 1 {
                    let value = curr.at(x, y);
                    if value.abs() <= 0.8 * soft_threshold {
                        continue;
                    }

                    let mut is_max = true;
                    let mut is_min = true;
                    for slice in [prev, curr, next] {
                        let skip_center = std::ptr::eq(slice, curr);
                        for ny in y - 1..=y + 1 {
                            for nx in x - 1..=x + 1 {
                                if skip_center && nx == x && ny == y {
                                    continue;
                                }
                                let neighbor = slice.at(nx, ny);
                                if neighbor >= value {
                                    is_max = false;
                                }
                                if neighbor <= value {
                                    is_min = false;
                                }
                            }
                        }
                    }

                    if is_max || is_min {
                        row.push((x, y));
                    }
                }
                row
            })
            .collect();

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_preserves_constant_image() {
        let backend = CpuBackend::new();
        let mut img = GrayImage::new(8, 8).unwrap();
        for v in img.as_mut_slice() {
            *v = 5.0;
        }
        let blurred = backend.blur(&img, 1.2).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                assert!((blurred.at(x, y) - 5.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn blur_with_nonpositive_sigma_is_identity() {
        let backend = CpuBackend::new();
        let mut img = GrayImage::new(4, 4).unwrap();
        img.set(1, 1, 9.0);
        let out = backend.blur(&img, 0.0).unwrap();
        assert_eq!(out.at(1, 1), 9.0);
    }

    #[test]
    fn downsample_then_upsample_preserves_size() {
        let backend = CpuBackend::new();
        let img = GrayImage::new(10, 12).unwrap();
        let down = backend.downsample_half(&img).unwrap();
        assert_eq!((down.width(), down.height()), (5, 6));
        let up = backend.upsample2x(&down).unwrap();
        assert_eq!((up.width(), up.height()), (10, 12));
    }

    #[test]
    fn difference_matches_manual_subtraction() {
        let backend = CpuBackend::new();
        let mut a = GrayImage::new(2, 2).unwrap();
        let mut b = GrayImage::new(2, 2).unwrap();
        a.set(0, 0, 1.0);
        b.set(0, 0, 3.0);
        let d = backend.difference(&a, &b).unwrap();
        assert_eq!(d.at(0, 0), 2.0);
    }

    #[test]
    fn gradient_field_zero_on_border() {
        let backend = CpuBackend::new();
        let img = GrayImage::new(5, 5).unwrap();
        let field = backend.gradient_field(&img).unwrap();
        assert_eq!(field.at(0, 0), (0.0, 0.0));
        assert_eq!(field.at(4, 4), (0.0, 0.0));
    }

    #[test]
    fn constant_image_has_no_extrema() {
        let backend = CpuBackend::new();
        let mut a = GrayImage::new(6, 6).unwrap();
        let mut b = GrayImage::new(6, 6).unwrap();
        let mut c = GrayImage::new(6, 6).unwrap();
        for v in a
            .as_mut_slice()
            .iter_mut()
            .chain(b.as_mut_slice())
            .chain(c.as_mut_slice())
        {
            *v = 0.02;
        }
        let candidates = backend.find_extrema(&a, &b, &c, 0.0133).unwrap();
        assert!(candidates.is_empty());
    }
}
