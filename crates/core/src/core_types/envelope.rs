//! Lifespan envelope functions
//!
//! A particle's visual attributes (opacity, depth offset) are not driven by
//! its raw lifespan directly but by a two-ramp envelope over it: a ramp-in
//! near birth, a full-value plateau, and a ramp-out near death. The plateau
//! width is controlled by a `[min, max]` range in `[0, 1]`.

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range for envelope tuning, both ends in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f32,
    pub max: f32,
}

impl MinMax {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Linearly remap `x` from `[in_start, in_end]` to `[out_start, out_end]`,
/// clamping outside the input interval. The input interval may be reversed
/// (`in_end < in_start`); the output follows the same orientation.
pub fn remap_clamped(x: f32, in_start: f32, in_end: f32, out_start: f32, out_end: f32) -> f32 {
    let t = ((x - in_start) / (in_end - in_start)).clamp(0.0, 1.0);
    out_start + (out_end - out_start) * t
}

/// Two-ramp envelope over a normalized lifespan.
///
/// For lifespan `l` (1.0 at birth, 0.0 at death) and a range `[min, max]`,
/// the value ramps from 0 up to 1 as `l` falls from 1.0 to `1 - min`, holds
/// at 1, then ramps back down to 0 as `l` falls from `1 - max` to 0.
///
/// Both ramp endpoints are clamped into `[0.001, 0.999]` so the remap
/// denominators can never reach zero.
pub fn fade_envelope(lifespan: f32, range: MinMax) -> f32 {
    let lower = (1.0 - range.max).clamp(0.001, 0.999);
    let upper = (1.0 - range.min).clamp(0.001, 0.999);
    remap_clamped(lifespan, 1.0, upper, 0.0, 1.0) * remap_clamped(lifespan, lower, 0.0, 1.0, 0.0)
}
