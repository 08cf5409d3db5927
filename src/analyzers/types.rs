//! Output document produced by the aggregation stage.
//!
//! Every view is a set of parallel arrays; field order here is the key
//! order of the serialized document.

use serde::Serialize;

/// Mean and median price plus sale count per model year.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgeVsPrice {
    pub years: Vec<i64>,
    pub mean_prices: Vec<f64>,
    pub median_prices: Vec<f64>,
    pub counts: Vec<usize>,
    pub ages: Vec<i64>,
}

/// Price statistics per body category, most expensive first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BodyTypeStats {
    pub types: Vec<String>,
    pub mean_prices: Vec<f64>,
    pub median_prices: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Most common exterior colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColorShare {
    pub colors: Vec<String>,
    pub counts: Vec<usize>,
    pub percentages: Vec<f64>,
    pub total: usize,
}

/// Best-selling makes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopMakes {
    pub makes: Vec<String>,
    pub counts: Vec<usize>,
    pub avg_prices: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConditionPrice {
    pub conditions: Vec<f64>,
    pub avg_prices: Vec<f64>,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransmissionStats {
    pub types: Vec<String>,
    pub mean_prices: Vec<f64>,
    pub median_prices: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Selling price histogram.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceDistribution {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
    pub bin_centers: Vec<f64>,
}

/// Priciest make/model pairs with enough sales to be meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopModelsPrice {
    pub models: Vec<String>,
    pub avg_prices: Vec<f64>,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateSales {
    pub states: Vec<String>,
    pub counts: Vec<usize>,
    pub avg_prices: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OdometerPrice {
    pub ranges: Vec<String>,
    pub avg_prices: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Most common interior colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InteriorColors {
    pub colors: Vec<String>,
    pub counts: Vec<usize>,
    pub percentages: Vec<f64>,
}

/// Average condition and price for the highest-volume makes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MakeCondition {
    pub makes: Vec<String>,
    pub avg_conditions: Vec<f64>,
    pub avg_prices: Vec<f64>,
}

/// Whole-dataset figures. Statistics are `None` for an empty dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_vehicles: usize,
    pub total_makes: usize,
    pub total_models: usize,
    pub avg_price: Option<f64>,
    pub median_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub avg_condition: Option<f64>,
    pub avg_odometer: Option<f64>,
    pub year_range: Option<String>,
    pub total_states: usize,
}

/// The complete document consumed by the visualization front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleReport {
    pub age_vs_price: AgeVsPrice,
    pub body_type: BodyTypeStats,
    pub colors: ColorShare,
    pub top_makes: TopMakes,
    pub condition_price: ConditionPrice,
    pub transmission: TransmissionStats,
    pub price_distribution: PriceDistribution,
    pub top_models_price: TopModelsPrice,
    pub state_sales: StateSales,
    pub odometer_price: OdometerPrice,
    pub interior_colors: InteriorColors,
    pub make_condition: MakeCondition,
    pub summary: Summary,
}
