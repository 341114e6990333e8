use crate::error::{PipelineError, PipelineResult};

/// Half-width used to widen a zero-width value range.
const DEGENERATE_HALF_WIDTH: f64 = 0.5;

/// One equal-width interval and the number of values in it.
///
/// Intervals are half-open `[lower, upper)` except the last one, which also
/// holds `upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    /// Bar position for rendering.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Partition `values` into `bin_count` equal-width bins over `[min, max]`.
///
/// When every value is identical the range has no width; the result is then
/// a single bin `[v - 0.5, v + 0.5]` holding all values, whatever `bin_count`.
pub fn bin(values: &[f64], bin_count: usize) -> PipelineResult<Vec<HistogramBin>> {
    if bin_count == 0 {
        return Err(PipelineError::InvalidArgument(
            "histogram needs at least one bin".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(PipelineError::EmptyInput("histogram over zero values"));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(PipelineError::InvalidArgument(format!(
            "cannot bin non-finite value {bad}"
        )));
    }

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if lo == hi {
        return Ok(vec![HistogramBin {
            lower: lo - DEGENERATE_HALF_WIDTH,
            upper: hi + DEGENERATE_HALF_WIDTH,
            count: values.len(),
        }]);
    }

    let width = (hi - lo) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + i as f64 * width,
            // Pin the last edge to the true maximum so rounding cannot leave a gap.
            upper: if i + 1 == bin_count {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count,
        })
        .collect())
}
