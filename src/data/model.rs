use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Car – one row of the source table
// ---------------------------------------------------------------------------

/// A single automobile record.
///
/// Records are immutable after loading; the loader has already dropped any
/// row missing one of the required fields (mpg, horsepower, weight, year,
/// origin), so the numeric fields here are always populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub name: String,
    /// Fuel economy in miles per gallon.
    pub mpg: f64,
    pub cylinders: u32,
    /// Engine displacement in cubic inches.
    pub displacement: f64,
    pub horsepower: f64,
    /// Curb weight in pounds.
    pub weight: f64,
    /// 0–60 mph time in seconds (lower is quicker).
    pub acceleration: f64,
    /// Model year, truncated to an integer at load time even when the
    /// source encodes it as a date string like "1970-01-01".
    pub year: i32,
    /// Region of origin: "USA", "Europe", "Japan".
    pub origin: String,
}

// ---------------------------------------------------------------------------
// NumericField – addressable numeric attributes
// ---------------------------------------------------------------------------

/// The numeric attributes of a [`Car`], so aggregation and chart code can
/// pick fields by value instead of hard-wiring accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericField {
    Mpg,
    Cylinders,
    Displacement,
    Horsepower,
    Weight,
    Acceleration,
}

impl NumericField {
    /// Axis / legend label.
    pub fn label(self) -> &'static str {
        match self {
            NumericField::Mpg => "Miles per Gallon",
            NumericField::Cylinders => "Cylinders",
            NumericField::Displacement => "Displacement",
            NumericField::Horsepower => "Horsepower",
            NumericField::Weight => "Weight (lbs)",
            NumericField::Acceleration => "Acceleration (s)",
        }
    }
}

impl Car {
    /// Read the given numeric attribute.
    pub fn value(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Mpg => self.mpg,
            NumericField::Cylinders => f64::from(self.cylinders),
            NumericField::Displacement => self.displacement,
            NumericField::Horsepower => self.horsepower,
            NumericField::Weight => self.weight,
            NumericField::Acceleration => self.acceleration,
        }
    }
}

// ---------------------------------------------------------------------------
// CarDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset with pre-computed unique value lists for the
/// three filterable dimensions.
#[derive(Debug, Clone, Default)]
pub struct CarDataset {
    /// All retained records.
    pub cars: Vec<Car>,
    /// Sorted unique manufacturer names (first token of the car name).
    pub manufacturers: Vec<String>,
    /// Sorted unique model years.
    pub years: Vec<i32>,
    /// Sorted unique origin regions.
    pub origins: Vec<String>,
}

impl CarDataset {
    /// Build the unique-value indices from the cleaned records.
    pub fn from_cars(cars: Vec<Car>) -> Self {
        let mut manufacturers: BTreeSet<String> = BTreeSet::new();
        let mut years: BTreeSet<i32> = BTreeSet::new();
        let mut origins: BTreeSet<String> = BTreeSet::new();

        for car in &cars {
            manufacturers.insert(super::aggregate::manufacturer_of(&car.name).to_string());
            years.insert(car.year);
            origins.insert(car.origin.clone());
        }

        CarDataset {
            cars,
            manufacturers: manufacturers.into_iter().collect(),
            years: years.into_iter().collect(),
            origins: origins.into_iter().collect(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}
