use std::ops::Range;

use rand::Rng;

/// Number of stars rendered behind the page.
pub const STAR_COUNT: usize = 150;

const POSITION_PCT: Range<f64> = 0.0..100.0;
const SIZE_PX: Range<f64> = 1.0..3.0;
const DURATION_SECS: Range<f64> = 2.0..5.0;
const DELAY_SECS: Range<f64> = 0.0..2.0;

/// One twinkling star in the page background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorativePoint {
    pub id: usize,
    /// Horizontal offset as a percentage of the viewport width.
    pub left_pct: f64,
    /// Vertical offset as a percentage of the viewport height.
    pub top_pct: f64,
    pub size_px: f64,
    pub duration_secs: f64,
    pub delay_secs: f64,
}

impl DecorativePoint {
    /// Blur radius of the glow shadow.
    pub fn glow_blur_px(&self) -> f64 {
        self.size_px * 2.0
    }

    /// Spread radius of the glow shadow.
    pub fn glow_spread_px(&self) -> f64 {
        self.size_px / 2.0
    }
}

/// Generates `count` points with every attribute drawn independently from `rng`.
pub fn generate_points<R>(rng: &mut R, count: usize) -> Vec<DecorativePoint>
where
    R: Rng + ?Sized,
{
    (0..count)
        .map(|id| DecorativePoint {
            id,
            left_pct: rng.gen_range(POSITION_PCT),
            top_pct: rng.gen_range(POSITION_PCT),
            size_px: rng.gen_range(SIZE_PX),
            duration_secs: rng.gen_range(DURATION_SECS),
            delay_secs: rng.gen_range(DELAY_SECS),
        })
        .collect()
}

/// Generates the page starfield from the thread-local RNG.
pub fn generate_starfield() -> Vec<DecorativePoint> {
    generate_points(&mut rand::thread_rng(), STAR_COUNT)
}
