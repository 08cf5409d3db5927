use std::collections::HashSet;
use tracing::{debug, info};

use crate::analyzers::bins::{EqualWidthBins, ODOMETER_BUCKETS, PRICE_BIN_COUNT, odometer_bucket};
use crate::analyzers::body::{BodyCategory, classify_body};
use crate::analyzers::types::{
    AgeVsPrice, BodyTypeStats, ColorShare, ConditionPrice, InteriorColors, MakeCondition,
    OdometerPrice, PriceDistribution, StateSales, Summary, TopMakes, TopModelsPrice,
    TransmissionStats, VehicleReport,
};
use crate::analyzers::utility::{group_by, mean, median, pct, round2, round_to, value_counts};
use crate::record::Record;

/// Placeholder the source feed uses for an absent color.
pub const ABSENT_MARKER: &str = "—";

const TOP_COLORS: usize = 10;
const TOP_MAKES: usize = 15;
const MIN_CONDITION_SALES: usize = 100;
const MIN_MODEL_SALES: usize = 500;
const TOP_MODELS: usize = 15;
const TOP_STATES: usize = 20;
const MAKE_CONDITION_MAKES: usize = 20;

/// Selling price statistics for one group of records.
struct PriceGroup<K> {
    key: K,
    mean: f64,
    median: f64,
    count: usize,
}

/// Groups records by `key` in ascending key order and summarizes each
/// group's selling prices.
fn price_groups<'a, K: Ord>(
    records: &'a [Record],
    key: impl Fn(&'a Record) -> K,
) -> Vec<PriceGroup<K>> {
    group_by(records, key, |r| r.sellingprice)
        .into_iter()
        .filter_map(|(key, prices)| {
            Some(PriceGroup {
                key,
                mean: mean(&prices)?,
                median: median(&prices)?,
                count: prices.len(),
            })
        })
        .collect()
}

fn sort_by_count_desc<K>(groups: &mut [PriceGroup<K>]) {
    groups.sort_by(|a, b| b.count.cmp(&a.count));
}

fn sort_by_mean_desc<K>(groups: &mut [PriceGroup<K>]) {
    groups.sort_by(|a, b| b.mean.total_cmp(&a.mean));
}

/// Computes every view of the report over a cleaned dataset.
///
/// `current_year` is the reference date for vehicle ages.
#[tracing::instrument(skip(records), fields(rows = records.len()))]
pub fn aggregate(records: &[Record], current_year: i64) -> VehicleReport {
    let total_vehicles = records.len();

    info!("Processing vehicle age vs selling price");
    let age_vs_price = age_vs_price(records, current_year);
    info!("Processing body type comparison");
    let body_type = body_type(records);
    info!("Processing exterior colors");
    let colors = colors(records, total_vehicles);
    info!("Processing top makes by sales volume");
    let top_makes = top_makes(records);
    info!("Processing condition vs selling price");
    let condition_price = condition_price(records);
    info!("Processing transmission types");
    let transmission = transmission(records);
    info!("Processing price distribution");
    let price_distribution = price_distribution(records);
    info!("Processing top models by average price");
    let top_models_price = top_models_price(records);
    info!("Processing state sales");
    let state_sales = state_sales(records);
    info!("Processing odometer vs price");
    let odometer_price = odometer_price(records);
    info!("Processing interior colors");
    let interior_colors = interior_colors(records, total_vehicles);
    info!("Processing make vs average condition");
    let make_condition = make_condition(records);
    info!("Generating summary statistics");
    let summary = summary(records);

    VehicleReport {
        age_vs_price,
        body_type,
        colors,
        top_makes,
        condition_price,
        transmission,
        price_distribution,
        top_models_price,
        state_sales,
        odometer_price,
        interior_colors,
        make_condition,
        summary,
    }
}

/// Price by model year, oldest first.
pub fn age_vs_price(records: &[Record], current_year: i64) -> AgeVsPrice {
    let mut view = AgeVsPrice::default();
    for g in price_groups(records, |r| r.year.trunc() as i64) {
        view.years.push(g.key);
        view.mean_prices.push(round2(g.mean));
        view.median_prices.push(round2(g.median));
        view.counts.push(g.count);
        view.ages.push(current_year - g.key);
    }
    view
}

/// Price by body category, excluding `Other`, most expensive first.
pub fn body_type(records: &[Record]) -> BodyTypeStats {
    let mut groups = price_groups(records, |r| classify_body(&r.body).as_str());
    groups.retain(|g| g.key != BodyCategory::Other.as_str());
    sort_by_mean_desc(&mut groups);

    let mut view = BodyTypeStats::default();
    for g in groups {
        view.types.push(g.key.to_string());
        view.mean_prices.push(round2(g.mean));
        view.median_prices.push(round2(g.median));
        view.counts.push(g.count);
    }
    view
}

/// Top values of a text column by frequency, skipping [`ABSENT_MARKER`].
fn top_shares<'a>(
    records: &'a [Record],
    column: impl Fn(&'a Record) -> &'a str,
    total: usize,
) -> (Vec<String>, Vec<usize>, Vec<f64>) {
    let ranked: Vec<(&str, usize)> = value_counts(records, column)
        .into_iter()
        .filter(|(value, _)| *value != ABSENT_MARKER)
        .take(TOP_COLORS)
        .collect();

    let values = ranked.iter().map(|(v, _)| v.to_string()).collect();
    let counts = ranked.iter().map(|(_, c)| *c).collect();
    let percentages = ranked.iter().map(|(_, c)| round2(pct(*c, total))).collect();
    (values, counts, percentages)
}

/// Most common exterior colors with their share of all vehicles.
pub fn colors(records: &[Record], total_vehicles: usize) -> ColorShare {
    let (colors, counts, percentages) = top_shares(records, |r| r.color.as_str(), total_vehicles);
    ColorShare {
        colors,
        counts,
        percentages,
        total: total_vehicles,
    }
}

/// Makes with the most sales.
pub fn top_makes(records: &[Record]) -> TopMakes {
    let mut groups = price_groups(records, |r| r.make.as_str());
    sort_by_count_desc(&mut groups);
    groups.truncate(TOP_MAKES);

    let mut view = TopMakes::default();
    for g in groups {
        view.makes.push(g.key.to_string());
        view.counts.push(g.count);
        view.avg_prices.push(round2(g.mean));
    }
    view
}

/// Price by condition rounded to one decimal, for well-populated grades only.
pub fn condition_price(records: &[Record]) -> ConditionPrice {
    let mut view = ConditionPrice::default();
    for g in price_groups(records, |r| (r.condition * 10.0).round_ties_even() as i64) {
        if g.count < MIN_CONDITION_SALES {
            continue;
        }
        view.conditions.push(g.key as f64 / 10.0);
        view.avg_prices.push(round2(g.mean));
        view.counts.push(g.count);
    }
    view
}

/// Price by transmission, most common first.
pub fn transmission(records: &[Record]) -> TransmissionStats {
    let mut groups = price_groups(records, |r| r.transmission.as_str());
    sort_by_count_desc(&mut groups);

    let mut view = TransmissionStats::default();
    for g in groups {
        view.types.push(g.key.to_string());
        view.mean_prices.push(round2(g.mean));
        view.median_prices.push(round2(g.median));
        view.counts.push(g.count);
    }
    view
}

/// Histogram of selling prices over equal-width bins. Empty bins are omitted.
pub fn price_distribution(records: &[Record]) -> PriceDistribution {
    let prices: Vec<f64> = records.iter().map(|r| r.sellingprice).collect();
    let (Some(min), Some(max)) = (
        prices.iter().copied().reduce(f64::min),
        prices.iter().copied().reduce(f64::max),
    ) else {
        return PriceDistribution::default();
    };

    let bins = EqualWidthBins::spanning(min, max, PRICE_BIN_COUNT);
    let mut counts = vec![0usize; bins.len()];
    for price in &prices {
        counts[bins.index_of(*price)] += 1;
    }
    debug!(min, max, "Price histogram range");

    let mut view = PriceDistribution::default();
    for (i, count) in counts.into_iter().enumerate() {
        if count == 0 {
            continue;
        }
        view.labels.push(bins.label(i));
        view.counts.push(count);
        view.bin_centers.push(bins.center(i));
    }
    view
}

/// Highest average prices among make/model pairs with enough sales.
pub fn top_models_price(records: &[Record]) -> TopModelsPrice {
    let mut groups = price_groups(records, |r| (r.make.as_str(), r.model.as_str()));
    groups.retain(|g| g.count >= MIN_MODEL_SALES);
    sort_by_mean_desc(&mut groups);
    groups.truncate(TOP_MODELS);

    let mut view = TopModelsPrice::default();
    for g in groups {
        let (make, model) = g.key;
        view.models.push(format!("{make} {model}"));
        view.avg_prices.push(round2(g.mean));
        view.counts.push(g.count);
    }
    view
}

/// States with the most sales.
pub fn state_sales(records: &[Record]) -> StateSales {
    let mut groups = price_groups(records, |r| r.state.as_str());
    sort_by_count_desc(&mut groups);
    groups.truncate(TOP_STATES);

    let mut view = StateSales::default();
    for g in groups {
        view.states.push(g.key.to_string());
        view.counts.push(g.count);
        view.avg_prices.push(round2(g.mean));
    }
    view
}

/// Price by odometer bucket, lowest mileage first. Empty buckets are omitted.
pub fn odometer_price(records: &[Record]) -> OdometerPrice {
    let mut view = OdometerPrice::default();
    for g in price_groups(records, |r| odometer_bucket(r.odometer)) {
        view.ranges.push(ODOMETER_BUCKETS[g.key].1.to_string());
        view.avg_prices.push(round2(g.mean));
        view.counts.push(g.count);
    }
    view
}

/// Most common interior colors with their share of all vehicles.
pub fn interior_colors(records: &[Record], total_vehicles: usize) -> InteriorColors {
    let (colors, counts, percentages) = top_shares(records, |r| r.interior.as_str(), total_vehicles);
    InteriorColors {
        colors,
        counts,
        percentages,
    }
}

/// Average condition and price for the highest-volume makes, best kept first.
pub fn make_condition(records: &[Record]) -> MakeCondition {
    let leaders: HashSet<&str> = value_counts(records, |r| r.make.as_str())
        .into_iter()
        .take(MAKE_CONDITION_MAKES)
        .map(|(make, _)| make)
        .collect();

    let mut rows: Vec<(&str, f64, f64)> = group_by(
        records,
        |r| r.make.as_str(),
        |r| (r.condition, r.sellingprice),
    )
    .into_iter()
    .filter(|(make, _)| leaders.contains(make))
    .filter_map(|(make, pairs)| {
        let conditions: Vec<f64> = pairs.iter().map(|(c, _)| *c).collect();
        let prices: Vec<f64> = pairs.iter().map(|(_, p)| *p).collect();
        Some((make, mean(&conditions)?, mean(&prices)?))
    })
    .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut view = MakeCondition::default();
    for (make, avg_condition, avg_price) in rows {
        view.makes.push(make.to_string());
        view.avg_conditions.push(round2(avg_condition));
        view.avg_prices.push(round2(avg_price));
    }
    view
}

fn distinct<'a>(records: &'a [Record], column: impl Fn(&'a Record) -> &'a str) -> usize {
    records.iter().map(column).collect::<HashSet<_>>().len()
}

/// Whole-dataset headline figures.
pub fn summary(records: &[Record]) -> Summary {
    let prices: Vec<f64> = records.iter().map(|r| r.sellingprice).collect();
    let conditions: Vec<f64> = records.iter().map(|r| r.condition).collect();
    let odometers: Vec<f64> = records.iter().map(|r| r.odometer).collect();

    // Summary figures round on the scaled value, unlike the views.
    let cents = |v: f64| round_to(v, 2);

    let years = records.iter().map(|r| r.year);
    let year_range = match (years.clone().reduce(f64::min), years.reduce(f64::max)) {
        (Some(lo), Some(hi)) => Some(format!("{} - {}", lo.trunc() as i64, hi.trunc() as i64)),
        _ => None,
    };

    Summary {
        total_vehicles: records.len(),
        total_makes: distinct(records, |r| r.make.as_str()),
        total_models: distinct(records, |r| r.model.as_str()),
        avg_price: mean(&prices).map(cents),
        median_price: median(&prices).map(cents),
        min_price: prices.iter().copied().reduce(f64::min).map(cents),
        max_price: prices.iter().copied().reduce(f64::max).map(cents),
        avg_condition: mean(&conditions).map(cents),
        avg_odometer: mean(&odometers).map(cents),
        year_range,
        total_states: distinct(records, |r| r.state.as_str()),
    }
}
