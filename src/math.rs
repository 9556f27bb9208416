//! Floating-point helpers that need `libm` without `std`.

use crate::rules::RoundingMode;

#[cfg(feature = "std")]
pub fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

#[cfg(feature = "std")]
pub fn powf(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub fn powf(base: f64, exponent: f64) -> f64 {
    libm::pow(base, exponent)
}

pub const fn abs(value: f64) -> f64 {
    if value < 0.0 { -value } else { value }
}
