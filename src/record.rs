//! Vehicle sale records before and after cleaning.

use serde::Deserialize;

/// Column names every input file must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "year",
    "make",
    "model",
    "trim",
    "body",
    "transmission",
    "vin",
    "state",
    "condition",
    "odometer",
    "color",
    "interior",
    "seller",
    "mmr",
    "sellingprice",
    "saledate",
];

/// One sale row as read from the input file. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub year: Option<f64>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub body: Option<String>,
    pub transmission: Option<String>,
    pub vin: Option<String>,
    pub state: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub condition: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub odometer: Option<f64>,
    pub color: Option<String>,
    pub interior: Option<String>,
    pub seller: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub mmr: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sellingprice: Option<f64>,
    pub saledate: Option<String>,
}

/// A sale row with every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: f64,
    pub make: String,
    pub model: String,
    pub trim: String,
    pub body: String,
    pub transmission: String,
    pub vin: String,
    pub state: String,
    pub condition: f64,
    pub odometer: f64,
    pub color: String,
    pub interior: String,
    pub seller: String,
    pub mmr: f64,
    pub sellingprice: f64,
    pub saledate: String,
}

/// Numeric columns, in the order the cleaner imputes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Year,
    Condition,
    Odometer,
    Mmr,
    SellingPrice,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Year,
        NumericField::Condition,
        NumericField::Odometer,
        NumericField::Mmr,
        NumericField::SellingPrice,
    ];

    pub fn get(self, record: &RawRecord) -> Option<f64> {
        match self {
            NumericField::Year => record.year,
            NumericField::Condition => record.condition,
            NumericField::Odometer => record.odometer,
            NumericField::Mmr => record.mmr,
            NumericField::SellingPrice => record.sellingprice,
        }
    }

    pub fn slot(self, record: &mut RawRecord) -> &mut Option<f64> {
        match self {
            NumericField::Year => &mut record.year,
            NumericField::Condition => &mut record.condition,
            NumericField::Odometer => &mut record.odometer,
            NumericField::Mmr => &mut record.mmr,
            NumericField::SellingPrice => &mut record.sellingprice,
        }
    }
}

/// Text columns, in the order the cleaner imputes them.
///
/// `Make` is the grouping key and `Vin` is a unique identifier; neither is
/// ever imputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalField {
    Make,
    Model,
    Trim,
    Body,
    Transmission,
    Vin,
    State,
    Color,
    Interior,
    Seller,
    SaleDate,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 11] = [
        CategoricalField::Make,
        CategoricalField::Model,
        CategoricalField::Trim,
        CategoricalField::Body,
        CategoricalField::Transmission,
        CategoricalField::Vin,
        CategoricalField::State,
        CategoricalField::Color,
        CategoricalField::Interior,
        CategoricalField::Seller,
        CategoricalField::SaleDate,
    ];

    /// Whether missing values of this column are filled from the make group.
    pub fn is_imputed(self) -> bool {
        !matches!(self, CategoricalField::Make | CategoricalField::Vin)
    }

    pub fn get(self, record: &RawRecord) -> Option<&str> {
        let value = match self {
            CategoricalField::Make => &record.make,
            CategoricalField::Model => &record.model,
            CategoricalField::Trim => &record.trim,
            CategoricalField::Body => &record.body,
            CategoricalField::Transmission => &record.transmission,
            CategoricalField::Vin => &record.vin,
            CategoricalField::State => &record.state,
            CategoricalField::Color => &record.color,
            CategoricalField::Interior => &record.interior,
            CategoricalField::Seller => &record.seller,
            CategoricalField::SaleDate => &record.saledate,
        };
        value.as_deref()
    }

    pub fn slot(self, record: &mut RawRecord) -> &mut Option<String> {
        match self {
            CategoricalField::Make => &mut record.make,
            CategoricalField::Model => &mut record.model,
            CategoricalField::Trim => &mut record.trim,
            CategoricalField::Body => &mut record.body,
            CategoricalField::Transmission => &mut record.transmission,
            CategoricalField::Vin => &mut record.vin,
            CategoricalField::State => &mut record.state,
            CategoricalField::Color => &mut record.color,
            CategoricalField::Interior => &mut record.interior,
            CategoricalField::Seller => &mut record.seller,
            CategoricalField::SaleDate => &mut record.saledate,
        }
    }
}

impl RawRecord {
    /// Converts into a [`Record`] if no field is missing.
    pub fn into_complete(self) -> Option<Record> {
        Some(Record {
            year: self.year?,
            make: self.make?,
            model: self.model?,
            trim: self.trim?,
            body: self.body?,
            transmission: self.transmission?,
            vin: self.vin?,
            state: self.state?,
            condition: self.condition?,
            odometer: self.odometer?,
            color: self.color?,
            interior: self.interior?,
            seller: self.seller?,
            mmr: self.mmr?,
            sellingprice: self.sellingprice?,
            saledate: self.saledate?,
        })
    }
}
