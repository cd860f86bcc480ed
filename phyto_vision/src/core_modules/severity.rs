// THEORY:
// The aggregator collapses a `DiseaseMask` into one number: the percentage of
// the leaf covered by disease colours. Confidence is then derived from that
// severity by a fixed, inverse heuristic. It is not a statistical probability;
// it only drops as more of the image looks diseased.

use crate::core_modules::disease_mask::DiseaseMask;

/// Percentage of pixels carrying a disease colour, in [0, 100].
pub type Severity = f64;
/// Severity-derived heuristic score, in [0, 100], two decimal places.
pub type Confidence = f64;

/// `flagged / total * 100`, or 0 when there are no pixels.
pub fn severity(mask: &DiseaseMask, total_pixels: usize) -> Severity {
    if total_pixels == 0 {
        return 0.0;
    }
    // Divide first, then scale: the last bit of the ratio feeds confidence rounding.
    mask.flagged_count() as f64 / total_pixels as f64 * 100.0
}

/// `max(0, 100 - severity / 2)`, rounded half-to-even to two decimals.
pub fn confidence(severity: Severity) -> Confidence {
    round_to_hundredths((100.0 - severity / 2.0).max(0.0))
}

/// Rounds the exact binary value of `value` to hundredths, ties to even, and
/// returns the double nearest that decimal.
///
/// Scaling by 100 in floating point first would round twice: 99.975 is stored as
/// 99.97499999..., which must round down, yet `99.975 * 100.0` lands on 9997.5.
fn round_to_hundredths(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.abs().to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };

    // Whole numbers are already exact.
    if exponent >= 0 {
        return value;
    }

    // value * 100 == scaled / 2^shift exactly.
    let scaled = mantissa as u128 * 100;
    let shift = exponent.unsigned_abs();
    if shift > 64 {
        // scaled < 2^60, so value * 100 < 1/2.
        return 0.0_f64.copysign(value);
    }

    let mut hundredths = scaled >> shift;
    let remainder = scaled - (hundredths << shift);
    let half = 1u128 << (shift - 1);
    if remainder > half || (remainder == half && hundredths & 1 == 1) {
        hundredths += 1;
    }

    (hundredths as f64 / 100.0).copysign(value)
}
