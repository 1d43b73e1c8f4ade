//! JSON representation of prices

use serde::Serializer;

// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write whole prices as JSON integers (`1200`, not `1200.0`)
///
/// Payloads carry plain JSON numbers, so a price submitted as `1200` is
/// returned as `1200` and `12.5` stays `12.5`.
#[allow(clippy::trivially_copy_pass_by_ref, clippy::float_cmp)]
pub fn serialize<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}
