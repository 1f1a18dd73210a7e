//! Math function wrappers for std/no_std compatibility
//!
//! Uses standard library math when available, falls back to libm for no_std.

#[cfg(all(feature = "statistics", feature = "std"))]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(all(feature = "statistics", not(feature = "std")))]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(all(feature = "quantiles", feature = "std"))]
#[inline]
pub fn floor(x: f64) -> f64 {
    x.floor()
}

#[cfg(all(feature = "quantiles", not(feature = "std")))]
#[inline]
pub fn floor(x: f64) -> f64 {
    libm::floor(x)
}
