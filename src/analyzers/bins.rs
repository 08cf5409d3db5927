//! Bin layouts for the histogram-style views.

use crate::analyzers::utility::{round2, round_to};

/// Number of equal-width bins in the price histogram.
pub const PRICE_BIN_COUNT: usize = 20;

/// Significant fractional digits kept on histogram edges when labelling.
const EDGE_PRECISION: i32 = 3;

/// Odometer buckets as `(inclusive upper bound, label)`. Each bucket covers
/// `(previous upper, upper]`; the first one also takes every reading at or
/// below zero.
pub static ODOMETER_BUCKETS: &[(f64, &str)] = &[
    (25_000.0, "0-25K"),
    (50_000.0, "25K-50K"),
    (75_000.0, "50K-75K"),
    (100_000.0, "75K-100K"),
    (150_000.0, "100K-150K"),
    (200_000.0, "150K-200K"),
    (f64::INFINITY, "200K+"),
];

/// Index into [`ODOMETER_BUCKETS`] for an odometer reading.
pub fn odometer_bucket(odometer: f64) -> usize {
    ODOMETER_BUCKETS
        .iter()
        .position(|(upper, _)| odometer <= *upper)
        .unwrap_or(ODOMETER_BUCKETS.len() - 1)
}

/// Equal-width, right-closed bins spanning an observed value range.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualWidthBins {
    edges: Vec<f64>,
    display_edges: Vec<f64>,
}

impl EqualWidthBins {
    /// Builds `count` bins over `[min, max]`.
    ///
    /// The lowest edge sits 0.1% of the range below `min` so the minimum
    /// lands in the first `(L, R]` bin. A zero-width range is widened by
    /// 0.1% of its magnitude on both sides.
    pub fn spanning(min: f64, max: f64, count: usize) -> Self {
        let count = count.max(1);
        let (lo, hi) = if min == max {
            let widen = |v: f64| if v == 0.0 { 0.001 } else { 0.001 * v.abs() };
            (min - widen(min), max + widen(max))
        } else {
            (min, max)
        };

        let step = (hi - lo) / count as f64;
        let mut edges: Vec<f64> = (0..=count).map(|i| lo + i as f64 * step).collect();
        edges[count] = hi;
        if min != max {
            edges[0] -= (max - min) * 0.001;
        }

        let display_edges = display_edges(&edges);
        Self {
            edges,
            display_edges,
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the bin holding `value`, clamped to the outer bins.
    pub fn index_of(&self, value: f64) -> usize {
        self.edges[1..]
            .iter()
            .position(|right| value <= *right)
            .unwrap_or(self.len() - 1)
    }

    /// `"$L-$R"` with whole-dollar, comma-grouped bounds.
    pub fn label(&self, index: usize) -> String {
        let left = self.display_edges[index].trunc() as i64;
        let right = self.display_edges[index + 1].trunc() as i64;
        format!("${}-${}", group_thousands(left), group_thousands(right))
    }

    /// Midpoint of the displayed bounds, to cents.
    pub fn center(&self, index: usize) -> f64 {
        round2((self.display_edges[index] + self.display_edges[index + 1]) / 2.0)
    }
}

/// Rounds edges for display, raising precision until no two edges collide.
fn display_edges(edges: &[f64]) -> Vec<f64> {
    for precision in EDGE_PRECISION..20 {
        let rounded: Vec<f64> = edges.iter().map(|e| round_frac(*e, precision)).collect();
        if rounded.windows(2).all(|w| w[0] != w[1]) {
            return rounded;
        }
    }
    edges.iter().map(|e| round_frac(*e, EDGE_PRECISION)).collect()
}

/// Keeps `precision` decimals, or `precision` significant digits when the
/// value has no whole part.
fn round_frac(value: f64, precision: i32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let whole = value.trunc();
    let digits = if whole == 0.0 {
        let frac = value - whole;
        -(frac.abs().log10().floor() as i32) - 1 + precision
    } else {
        precision
    };
    round_to(value, digits)
}

/// Formats an integer with `,` between groups of three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-28000), "-28,000");
    }

    #[test]
    fn test_odometer_bucket_boundaries() {
        assert_eq!(odometer_bucket(0.0), 0);
        assert_eq!(odometer_bucket(-5.0), 0);
        assert_eq!(odometer_bucket(25_000.0), 0);
        assert_eq!(odometer_bucket(25_000.5), 1);
        assert_eq!(odometer_bucket(100_000.0), 3);
        assert_eq!(odometer_bucket(150_000.0), 4);
        assert_eq!(odometer_bucket(200_000.0), 5);
        assert_eq!(odometer_bucket(999_999.0), 6);
    }

    #[test]
    fn test_price_bins_cover_range() {
        let bins = EqualWidthBins::spanning(1000.0, 21000.0, PRICE_BIN_COUNT);

        assert_eq!(bins.len(), 20);
        assert_eq!(bins.index_of(1000.0), 0);
        assert_eq!(bins.index_of(2000.0), 0);
        assert_eq!(bins.index_of(2000.5), 1);
        assert_eq!(bins.index_of(21000.0), 19);
    }

    #[test]
    fn test_price_bin_labels_and_centers() {
        let bins = EqualWidthBins::spanning(1000.0, 21000.0, PRICE_BIN_COUNT);

        // first edge lowered by 0.1% of the 20,000 range
        assert_eq!(bins.label(0), "$980-$2,000");
        assert_eq!(bins.center(0), 1490.0);
        assert_eq!(bins.label(19), "$20,000-$21,000");
        assert_eq!(bins.center(19), 20500.0);
    }

    #[test]
    fn test_zero_width_range() {
        let bins = EqualWidthBins::spanning(500.0, 500.0, PRICE_BIN_COUNT);

        assert_eq!(bins.len(), 20);
        assert_eq!(bins.label(0), "$499-$499");
        assert_eq!(bins.index_of(500.0), 9);
    }

    #[test]
    fn test_round_frac_small_values() {
        assert_eq!(round_frac(0.000123456, 3), 0.000123);
        assert_eq!(round_frac(12.34567, 3), 12.346);
        assert_eq!(round_frac(0.0, 3), 0.0);
    }
}
