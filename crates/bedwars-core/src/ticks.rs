//! Conversion from wall-clock seconds to host ticks.
//!
//! The conversion runs in Q32.32 fixed point so that the same configuration
//! always yields the same tick threshold, independent of float rounding.

use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Ticks are the host's atomic unit of time.
pub type Ticks = u64;

/// The host's fixed tick rate.
pub const TICKS_PER_SECOND: u32 = 20;

/// Convert seconds to the nearest whole number of ticks.
///
/// Returns `None` for negative, non-finite or out-of-range input.
pub fn seconds_to_ticks(seconds: f64) -> Option<Ticks> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Fixed64::checked_from_num(seconds)?
        .checked_mul_int(i64::from(TICKS_PER_SECOND))?
        .checked_round()?
        .checked_to_num::<Ticks>()
}
