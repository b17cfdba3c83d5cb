use std::collections::BTreeMap;

use super::model::{Car, NumericField};
use crate::state::Selection;

// ---------------------------------------------------------------------------
// GroupStat – a derived per-group statistic
// ---------------------------------------------------------------------------

/// Arithmetic means of the requested fields over one group, plus the group's
/// record count.  Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStat {
    pub key: String,
    pub count: usize,
    means: BTreeMap<NumericField, f64>,
}

impl GroupStat {
    /// Mean of the given field, 0.0 when the field was not requested.
    pub fn mean(&self, field: NumericField) -> f64 {
        self.means.get(&field).copied().unwrap_or(0.0)
    }
}

/// First whitespace token of a car name, used as its manufacturer.
pub fn manufacturer_of(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

// ---------------------------------------------------------------------------
// Aggregation functions
// ---------------------------------------------------------------------------

/// Partition records by a derived key and compute per-group means of the
/// requested fields.  Groups with zero records are never emitted, and no
/// ordering is guaranteed beyond key order; callers sort as needed.
pub fn group_average<'a, I, K>(cars: I, key_fn: K, fields: &[NumericField]) -> Vec<GroupStat>
where
    I: IntoIterator<Item = &'a Car>,
    K: Fn(&Car) -> String,
{
    let mut groups: BTreeMap<String, (usize, BTreeMap<NumericField, f64>)> = BTreeMap::new();

    for car in cars {
        let entry = groups
            .entry(key_fn(car))
            .or_insert_with(|| (0, BTreeMap::new()));
        entry.0 += 1;
        for &field in fields {
            *entry.1.entry(field).or_insert(0.0) += car.value(field);
        }
    }

    groups
        .into_iter()
        .map(|(key, (count, sums))| GroupStat {
            key,
            count,
            means: sums
                .into_iter()
                .map(|(field, sum)| (field, sum / count as f64))
                .collect(),
        })
        .collect()
}

/// (min, max) of a field, or `None` over an empty sequence.  Callers must
/// guard before turning the extent into an axis range.
pub fn extent<'a, I>(cars: I, field: NumericField) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a Car>,
{
    let mut result: Option<(f64, f64)> = None;
    for car in cars {
        let v = car.value(field);
        result = Some(match result {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    result
}

/// Arithmetic mean of a field, or `None` over an empty sequence.
pub fn mean<'a, I>(cars: I, field: NumericField) -> Option<f64>
where
    I: IntoIterator<Item = &'a Car>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for car in cars {
        sum += car.value(field);
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

// ---------------------------------------------------------------------------
// Selection filtering
// ---------------------------------------------------------------------------

/// Whether a record matches every active filter of the selection.
///
/// Year matching is exact integer equality.  (The system this viewer
/// reimplements matched years by string prefix, which also matches any
/// longer run of digits starting with the filter value; that behavior is
/// deliberately not reproduced.)
pub fn matches_selection(car: &Car, selection: &Selection) -> bool {
    if let Some(manufacturer) = selection.manufacturer() {
        if manufacturer_of(&car.name) != manufacturer {
            return false;
        }
    }
    if let Some(year) = selection.year() {
        if car.year != year {
            return false;
        }
    }
    if let Some(origin) = selection.origin() {
        if car.origin != origin {
            return false;
        }
    }
    true
}

/// Indices of records passing all active filters.  Identity (`0..len`) when
/// every filter is `None`.  An empty result is a valid state; renderers show
/// an empty-state message instead of failing.
pub fn filtered_indices(cars: &[Car], selection: &Selection) -> Vec<usize> {
    cars.iter()
        .enumerate()
        .filter(|(_, car)| matches_selection(car, selection))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn car(name: &str, mpg: f64, horsepower: f64, year: i32, origin: &str) -> Car {
        Car {
            name: name.to_string(),
            mpg,
            cylinders: 4,
            displacement: 100.0,
            horsepower,
            weight: 2500.0,
            acceleration: 15.0,
            year,
            origin: origin.to_string(),
        }
    }

    fn sample() -> Vec<Car> {
        vec![
            car("toyota corona", 30.0, 95.0, 1970, "Japan"),
            car("toyota corolla", 20.0, 75.0, 1974, "Japan"),
            car("ford maverick", 10.0, 72.0, 1974, "USA"),
            car("fiat 124b", 30.0, 76.0, 1982, "Europe"),
        ]
    }

    #[test]
    fn group_counts_sum_to_input_length() {
        let cars = sample();
        let stats = group_average(&cars, |c| c.origin.clone(), &[NumericField::Mpg]);
        let total: usize = stats.iter().map(|s| s.count).sum();
        assert_eq!(total, cars.len());
    }

    #[test]
    fn group_average_by_first_name_token() {
        let cars = vec![
            car("Toyota X", 30.0, 90.0, 1970, "Japan"),
            car("Toyota Y", 20.0, 80.0, 1971, "Japan"),
            car("Ford Z", 10.0, 120.0, 1972, "USA"),
        ];
        let stats = group_average(
            &cars,
            |c| manufacturer_of(&c.name).to_string(),
            &[NumericField::Mpg],
        );

        let toyota = stats.iter().find(|s| s.key == "Toyota").unwrap();
        assert_eq!(toyota.count, 2);
        assert_eq!(toyota.mean(NumericField::Mpg), 25.0);

        let ford = stats.iter().find(|s| s.key == "Ford").unwrap();
        assert_eq!(ford.count, 1);
        assert_eq!(ford.mean(NumericField::Mpg), 10.0);
    }

    #[test]
    fn group_average_over_empty_input_is_empty() {
        let stats = group_average(&[], |c: &Car| c.origin.clone(), &[NumericField::Mpg]);
        assert!(stats.is_empty());
    }

    #[test]
    fn extent_of_single_record_is_value_value() {
        let cars = vec![car("honda civic", 33.0, 53.0, 1975, "Japan")];
        assert_eq!(extent(&cars, NumericField::Mpg), Some((33.0, 33.0)));
        assert_eq!(extent(&[], NumericField::Mpg), None);
    }

    #[test]
    fn mean_of_empty_input_is_none() {
        assert_eq!(mean(&[], NumericField::Horsepower), None);
        let cars = sample();
        assert_eq!(mean(&cars, NumericField::Mpg), Some(22.5));
    }

    #[test]
    fn no_active_filters_is_the_identity() {
        let cars = sample();
        let selection = Selection::default();
        assert_eq!(
            filtered_indices(&cars, &selection),
            (0..cars.len()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn year_filter_is_exact_integer_equality() {
        let cars = sample();
        let mut selection = Selection::default();
        selection.set_year(Some(1974));

        let indices = filtered_indices(&cars, &selection);
        assert_eq!(indices, vec![1, 2]);
        assert!(indices.iter().all(|&i| cars[i].year == 1974));
    }

    #[test]
    fn filters_compose_conjunctively() {
        let cars = sample();
        let mut selection = Selection::default();
        selection.set_year(Some(1974));
        selection.set_origin(Some("Japan".to_string()));
        assert_eq!(filtered_indices(&cars, &selection), vec![1]);

        selection.set_manufacturer(Some("ford".to_string()));
        assert!(filtered_indices(&cars, &selection).is_empty());
    }

    #[test]
    fn manufacturer_is_first_token() {
        assert_eq!(manufacturer_of("toyota corona mark ii"), "toyota");
        assert_eq!(manufacturer_of("subaru"), "subaru");
        assert_eq!(manufacturer_of(""), "");
    }
}
