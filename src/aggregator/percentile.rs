//! Linear-interpolation percentile estimate over wall-time samples.

use crate::utils::config::MIN_PERCENTILE_SAMPLES;

/// Estimate the `p` percentile of `values`
///
/// **Public** - used by finalization, exposed for testing
///
/// Sorts the values, takes `rank = n * p` and interpolates between the values
/// at `floor(rank)` and the next index, clamping to `values[floor(rank)]`
/// when there is no next index.
///
/// # Returns
/// `None` when fewer than [`MIN_PERCENTILE_SAMPLES`] values are given or `p`
/// is outside (0, 1)
pub fn estimate_percentile(values: &mut [f64], p: f64) -> Option<f64> {
    let n = values.len();
    if n < MIN_PERCENTILE_SAMPLES || !(p > 0.0 && p < 1.0) {
        return None;
    }

    values.sort_by(f64::total_cmp);

    let rank = n as f64 * p;
    let lo = rank.floor() as usize;
    let hi = lo + 1;

    if hi >= n {
        return Some(values[lo]);
    }

    Some(values[lo] + (values[hi] - values[lo]) * (rank - lo as f64))
}
