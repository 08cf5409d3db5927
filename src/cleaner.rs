//! Cleaning pipeline: grouped imputation, text normalization, and outlier
//! removal over a whole raw dataset.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::analyzers::utility::{mean, quantile};
use crate::record::{CategoricalField, NumericField, RawRecord, Record};

/// Tukey fence multiplier.
pub const FENCE_K: f64 = 1.5;

/// Placeholder for a text column whose make group has no values at all.
pub const UNKNOWN: &str = "Unknown";

/// Inclusive bounds `[Q1 - k·IQR, Q3 + k·IQR]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fence {
    pub lower: f64,
    pub upper: f64,
}

impl Fence {
    /// Fence over `values`, or `None` when there are none.
    pub fn tukey(values: &[f64]) -> Option<Self> {
        let q1 = quantile(values, 0.25)?;
        let q3 = quantile(values, 0.75)?;
        let iqr = q3 - q1;
        Some(Fence {
            lower: q1 - FENCE_K * iqr,
            upper: q3 + FENCE_K * iqr,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// What each cleaning step did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub imputed_numeric: usize,
    pub imputed_categorical: usize,
    pub transmissions_corrected: usize,
    pub dropped_incomplete: usize,
    pub price_fence: Option<Fence>,
    pub removed_price_outliers: usize,
    pub condition_fence: Option<Fence>,
    pub removed_condition_outliers: usize,
    pub output_rows: usize,
}

/// Cleans `raw` into complete, outlier-free records. `raw` is left untouched.
pub fn clean(raw: &[RawRecord]) -> Vec<Record> {
    clean_with_report(raw).0
}

/// Like [`clean`], also returning the [`CleaningReport`].
#[tracing::instrument(skip(raw), fields(rows = raw.len()))]
pub fn clean_with_report(raw: &[RawRecord]) -> (Vec<Record>, CleaningReport) {
    let mut report = CleaningReport {
        input_rows: raw.len(),
        ..Default::default()
    };
    let mut rows = raw.to_vec();

    report.imputed_numeric = impute_numeric(&mut rows);
    report.imputed_categorical = impute_categorical(&mut rows);
    report.transmissions_corrected = normalize_transmissions(&mut rows);

    let mut records: Vec<Record> = rows.into_iter().filter_map(RawRecord::into_complete).collect();
    report.dropped_incomplete = raw.len() - records.len();
    debug!(
        dropped = report.dropped_incomplete,
        "Dropped records with unrecoverable gaps"
    );

    let before = records.len();
    report.price_fence = remove_outliers(&mut records, |r| r.sellingprice);
    report.removed_price_outliers = before - records.len();

    let before = records.len();
    report.condition_fence = remove_outliers(&mut records, |r| r.condition);
    report.removed_condition_outliers = before - records.len();

    report.output_rows = records.len();
    info!(
        input = report.input_rows,
        output = report.output_rows,
        price_outliers = report.removed_price_outliers,
        condition_outliers = report.removed_condition_outliers,
        "Cleaned dataset"
    );

    (records, report)
}

/// Fills missing numeric values with the mean of the record's make group.
/// Returns the number of cells filled.
fn impute_numeric(rows: &mut [RawRecord]) -> usize {
    let mut filled = 0;

    for field in NumericField::ALL {
        let mut present: HashMap<String, Vec<f64>> = HashMap::new();
        for row in rows.iter() {
            if let (Some(make), Some(v)) = (&row.make, field.get(row)) {
                present.entry(make.clone()).or_default().push(v);
            }
        }
        let means: HashMap<String, f64> = present
            .into_iter()
            .filter_map(|(make, values)| mean(&values).map(|m| (make, m)))
            .collect();

        for row in rows.iter_mut() {
            if field.get(row).is_some() {
                continue;
            }
            if let Some(m) = row.make.as_ref().and_then(|make| means.get(make)) {
                *field.slot(row) = Some(*m);
                filled += 1;
            }
        }
        debug!(?field, "Imputed group means");
    }

    filled
}

/// Fills missing text values with the most frequent value of the record's
/// make group, or [`UNKNOWN`] when the group has none.
/// Returns the number of cells filled.
fn impute_categorical(rows: &mut [RawRecord]) -> usize {
    let mut filled = 0;

    for field in CategoricalField::ALL.into_iter().filter(|f| f.is_imputed()) {
        let mut counts: HashMap<String, HashMap<String, usize>> = HashMap::new();
        for row in rows.iter() {
            if let Some(make) = &row.make {
                let group = counts.entry(make.clone()).or_default();
                if let Some(v) = field.get(row) {
                    *group.entry(v.to_string()).or_default() += 1;
                }
            }
        }
        let modes: HashMap<String, String> = counts
            .into_iter()
            .map(|(make, group)| (make, mode(group).unwrap_or_else(|| UNKNOWN.to_string())))
            .collect();

        for row in rows.iter_mut() {
            if field.get(row).is_some() {
                continue;
            }
            if let Some(m) = row.make.as_ref().and_then(|make| modes.get(make)) {
                *field.slot(row) = Some(m.clone());
                filled += 1;
            }
        }
        debug!(?field, "Imputed group modes");
    }

    filled
}

/// Most frequent value; ties go to the smallest value.
fn mode(counts: HashMap<String, usize>) -> Option<String> {
    counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
        .map(|(value, _)| value)
}

/// Lowercases transmissions and rewrites the misfiled `sedan` to `manual`.
/// Returns the number of rewrites.
fn normalize_transmissions(rows: &mut [RawRecord]) -> usize {
    let mut corrected = 0;
    for row in rows.iter_mut() {
        if let Some(t) = row.transmission.as_mut() {
            *t = t.to_lowercase();
            if *t == "sedan" {
                *t = "manual".to_string();
                corrected += 1;
            }
        }
    }
    corrected
}

/// Keeps records whose value lies inside the Tukey fence computed once over
/// the current set. Returns the fence used.
fn remove_outliers(records: &mut Vec<Record>, value: impl Fn(&Record) -> f64) -> Option<Fence> {
    let values: Vec<f64> = records.iter().map(&value).collect();
    let fence = Fence::tukey(&values)?;
    records.retain(|r| fence.contains(value(r)));
    Some(fence)
}
