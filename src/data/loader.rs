use std::path::Path;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Car, CarDataset};

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Failure to fetch or parse the dataset.  Surfaced to the UI as a
/// "data unavailable" status; there is no retry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("{0}")]
    Schema(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the car dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "Name": ..., "Miles_per_Gallon": ..., ... }, ...]`
///   (the classic cars.json record schema)
/// * `.csv`  – header row with the same column names
///
/// Rows missing any of {mpg, horsepower, weight, year, origin} are dropped
/// here, once, and never reconsidered.
pub fn load_file(path: &Path) -> Result<CarDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path)?;
            parse_json(&text)
        }
        "csv" => {
            let file = std::fs::File::open(path)?;
            parse_csv(file)
        }
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Raw record – the on-disk shape, every field optional
// ---------------------------------------------------------------------------

/// The year column is an integer in some exports and a date string
/// ("1970-01-01") in others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawYear {
    Int(i64),
    Text(String),
}

impl RawYear {
    /// Truncate to the leading integer year.
    fn to_year(&self) -> Option<i32> {
        match self {
            RawYear::Int(y) => i32::try_from(*y).ok(),
            RawYear::Text(s) => parse_year_text(s),
        }
    }
}

fn parse_year_text(s: &str) -> Option<i32> {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Deserialize)]
struct RawCar {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Miles_per_Gallon")]
    mpg: Option<f64>,
    #[serde(rename = "Cylinders")]
    cylinders: Option<f64>,
    #[serde(rename = "Displacement")]
    displacement: Option<f64>,
    #[serde(rename = "Horsepower")]
    horsepower: Option<f64>,
    #[serde(rename = "Weight_in_lbs")]
    weight: Option<f64>,
    #[serde(rename = "Acceleration")]
    acceleration: Option<f64>,
    #[serde(rename = "Year")]
    year: Option<RawYear>,
    #[serde(rename = "Origin")]
    origin: Option<String>,
}

impl RawCar {
    /// Apply the field-presence rule: a record is retained only when all of
    /// {mpg, horsepower, weight, year, origin} are present and non-null.
    /// Missing descriptive fields default rather than dropping the row.
    fn into_car(self) -> Option<Car> {
        let mpg = self.mpg?;
        let horsepower = self.horsepower?;
        let weight = self.weight?;
        let year = self.year.as_ref().and_then(RawYear::to_year)?;
        let origin = self.origin?;

        Some(Car {
            name: self.name.unwrap_or_default(),
            mpg,
            cylinders: self.cylinders.map(|c| c.max(0.0) as u32).unwrap_or(0),
            displacement: self.displacement.unwrap_or(0.0),
            horsepower,
            weight,
            acceleration: self.acceleration.unwrap_or(0.0),
            year,
            origin,
        })
    }
}

/// Run the presence filter over the raw rows and log what was dropped.
fn clean(raw: Vec<RawCar>) -> CarDataset {
    let total = raw.len();
    let cars: Vec<Car> = raw.into_iter().filter_map(RawCar::into_car).collect();

    let dropped = total - cars.len();
    if dropped > 0 {
        log::warn!("dropped {dropped} of {total} records with missing required fields");
    }

    CarDataset::from_cars(cars)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Parse the records-oriented JSON form.
pub fn parse_json(text: &str) -> Result<CarDataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Schema("expected a top-level JSON array".into()))?;

    let mut raw = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        if !rec.is_object() {
            return Err(LoadError::Schema(format!("row {i} is not a JSON object")));
        }
        raw.push(serde_json::from_value(rec.clone())?);
    }

    Ok(clean(raw))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse the CSV form.  Header row with the same column names as the JSON
/// schema; empty cells count as missing.
pub fn parse_csv<R: std::io::Read>(input: R) -> Result<CarDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let col = |name: &str| headers.iter().position(|h| h == name);
    let name_idx = col("Name");
    let mpg_idx = col("Miles_per_Gallon");
    let cyl_idx = col("Cylinders");
    let disp_idx = col("Displacement");
    let hp_idx = col("Horsepower");
    let weight_idx = col("Weight_in_lbs");
    let accel_idx = col("Acceleration");
    let year_idx = col("Year");
    let origin_idx = col("Origin");

    if mpg_idx.is_none() || hp_idx.is_none() || weight_idx.is_none()
        || year_idx.is_none() || origin_idx.is_none()
    {
        return Err(LoadError::Schema(
            "CSV is missing one of the required columns \
             Miles_per_Gallon, Horsepower, Weight_in_lbs, Year, Origin"
                .into(),
        ));
    }

    let cell = |record: &csv::StringRecord, idx: Option<usize>| -> Option<String> {
        let s = idx.and_then(|i| record.get(i))?.trim();
        if s.is_empty() { None } else { Some(s.to_string()) }
    };

    let mut raw = Vec::new();
    for result in reader.records() {
        let record = result?;
        raw.push(RawCar {
            name: cell(&record, name_idx),
            mpg: cell(&record, mpg_idx).and_then(|s| s.parse().ok()),
            cylinders: cell(&record, cyl_idx).and_then(|s| s.parse().ok()),
            displacement: cell(&record, disp_idx).and_then(|s| s.parse().ok()),
            horsepower: cell(&record, hp_idx).and_then(|s| s.parse().ok()),
            weight: cell(&record, weight_idx).and_then(|s| s.parse().ok()),
            acceleration: cell(&record, accel_idx).and_then(|s| s.parse().ok()),
            year: cell(&record, year_idx).map(RawYear::Text),
            origin: cell(&record, origin_idx),
        });
    }

    Ok(clean(raw))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_row_with_null_horsepower_is_dropped() {
        let text = r#"[
            {"Name":"ford pinto","Miles_per_Gallon":25.0,"Cylinders":4,"Displacement":98.0,"Horsepower":75.0,"Weight_in_lbs":2046.0,"Acceleration":19.0,"Year":1971,"Origin":"USA"},
            {"Name":"citroen ds-21 pallas","Miles_per_Gallon":16.0,"Cylinders":4,"Displacement":133.0,"Horsepower":null,"Weight_in_lbs":3090.0,"Acceleration":17.5,"Year":1970,"Origin":"Europe"},
            {"Name":"toyota corona","Miles_per_Gallon":24.0,"Cylinders":4,"Displacement":113.0,"Horsepower":95.0,"Weight_in_lbs":2372.0,"Acceleration":15.0,"Year":1970,"Origin":"Japan"},
            {"Name":"volkswagen 1131 deluxe sedan","Miles_per_Gallon":26.0,"Cylinders":4,"Displacement":97.0,"Horsepower":46.0,"Weight_in_lbs":1835.0,"Acceleration":20.5,"Year":1970,"Origin":"Europe"}
        ]"#;

        let dataset = parse_json(text).unwrap();
        assert_eq!(dataset.len(), 3);
        assert!(dataset.cars.iter().all(|c| c.name != "citroen ds-21 pallas"));
    }

    #[test]
    fn date_like_year_string_is_truncated() {
        let text = r#"[
            {"Name":"amc rebel sst","Miles_per_Gallon":16.0,"Horsepower":150.0,"Weight_in_lbs":3433.0,"Year":"1970-01-01","Origin":"USA"}
        ]"#;

        let dataset = parse_json(text).unwrap();
        assert_eq!(dataset.cars[0].year, 1970);
        // Descriptive fields absent from the row default instead of dropping it.
        assert_eq!(dataset.cars[0].cylinders, 0);
    }

    #[test]
    fn unique_value_indices_are_sorted() {
        let text = r#"[
            {"Name":"toyota corolla","Miles_per_Gallon":29.0,"Horsepower":75.0,"Weight_in_lbs":2171.0,"Year":1975,"Origin":"Japan"},
            {"Name":"ford maverick","Miles_per_Gallon":15.0,"Horsepower":72.0,"Weight_in_lbs":3158.0,"Year":1973,"Origin":"USA"},
            {"Name":"fiat 124b","Miles_per_Gallon":30.0,"Horsepower":76.0,"Weight_in_lbs":2065.0,"Year":1971,"Origin":"Europe"}
        ]"#;

        let dataset = parse_json(text).unwrap();
        assert_eq!(dataset.manufacturers, vec!["fiat", "ford", "toyota"]);
        assert_eq!(dataset.years, vec![1971, 1973, 1975]);
        assert_eq!(dataset.origins, vec!["Europe", "Japan", "USA"]);
    }

    #[test]
    fn top_level_object_is_a_schema_error() {
        let err = parse_json(r#"{"Name":"not an array"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn csv_with_empty_cells_applies_presence_filter() {
        let csv = "\
Name,Miles_per_Gallon,Cylinders,Displacement,Horsepower,Weight_in_lbs,Acceleration,Year,Origin
chevrolet impala,14.0,8,454.0,220.0,4354.0,9.0,1970,USA
ford mustang boss 302,,8,302.0,140.0,3353.0,8.0,1970,USA
datsun pl510,27.0,4,97.0,88.0,2130.0,14.5,1971,Japan
";
        let dataset = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.origins, vec!["Japan", "USA"]);
    }

    #[test]
    fn csv_without_required_columns_fails() {
        let csv = "Name,Horsepower\nsomething,100\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("cars.parquet")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "parquet"));
    }
}
