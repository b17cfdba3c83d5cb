//! Generates a deterministic sample `data/cars.json` in the classic cars
//! record schema, including a few rows with missing horsepower so the
//! loader's presence filter has something to drop.

use anyhow::{Context, Result};
use serde_json::{json, Value};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform float in [0, 1).
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.uniform()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() as usize) % items.len()]
    }
}

struct Region {
    origin: &'static str,
    manufacturers: &'static [&'static str],
    models: &'static [&'static str],
    /// Baseline MPG and horsepower around 1970.
    base_mpg: f64,
    base_hp: f64,
}

const REGIONS: [Region; 3] = [
    Region {
        origin: "USA",
        manufacturers: &["ford", "chevrolet", "plymouth", "amc", "dodge", "buick"],
        models: &["custom", "deluxe", "wagon", "gt", "brougham", "sst"],
        base_mpg: 15.0,
        base_hp: 150.0,
    },
    Region {
        origin: "Europe",
        manufacturers: &["volkswagen", "fiat", "peugeot", "volvo", "audi", "saab"],
        models: &["1131", "124b", "504", "145e", "100ls", "99e"],
        base_mpg: 25.0,
        base_hp: 85.0,
    },
    Region {
        origin: "Japan",
        manufacturers: &["toyota", "datsun", "honda", "mazda", "subaru"],
        models: &["corona", "pl510", "civic", "rx2", "corolla"],
        base_mpg: 28.0,
        base_hp: 90.0,
    },
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(1973);
    let mut records: Vec<Value> = Vec::new();

    for year in 1970..=1982 {
        // Fuel economy improves through the decade while horsepower falls,
        // sharply so after the 1973 oil crisis.
        let drift = f64::from(year - 1970);
        let crisis = if year >= 1974 { 1.0 } else { 0.0 };

        for region in &REGIONS {
            for _ in 0..3 {
                let manufacturer = rng.pick(region.manufacturers);
                let model = rng.pick(region.models);

                let mpg = region.base_mpg + drift * 0.8 + crisis * 2.0 + rng.range(-3.0, 3.0);
                let hp = region.base_hp - drift * 2.0 - crisis * 10.0 + rng.range(-15.0, 15.0);
                let weight = 1600.0 + hp * 14.0 + rng.range(-200.0, 200.0);
                let cylinders = if hp > 130.0 { 8 } else if hp > 95.0 { 6 } else { 4 };
                let displacement = f64::from(cylinders) * rng.range(22.0, 30.0);
                let acceleration = 24.0 - hp * 0.08 + rng.range(-1.5, 1.5);

                // Roughly one row in twenty-five lacks a horsepower reading,
                // as the real dataset does.
                let horsepower = if rng.uniform() < 0.04 {
                    Value::Null
                } else {
                    json!((hp.max(40.0) * 10.0).round() / 10.0)
                };

                records.push(json!({
                    "Name": format!("{manufacturer} {model}"),
                    "Miles_per_Gallon": (mpg.max(8.0) * 10.0).round() / 10.0,
                    "Cylinders": cylinders,
                    "Displacement": (displacement * 10.0).round() / 10.0,
                    "Horsepower": horsepower,
                    "Weight_in_lbs": weight.round(),
                    "Acceleration": (acceleration.max(7.0) * 10.0).round() / 10.0,
                    "Year": format!("{year}-01-01"),
                    "Origin": region.origin,
                }));
            }
        }
    }

    let path = "data/cars.json";
    std::fs::create_dir_all("data").context("creating data directory")?;
    std::fs::write(path, serde_json::to_string_pretty(&records)?)
        .with_context(|| format!("writing {path}"))?;

    println!("wrote {} records to {path}", records.len());
    Ok(())
}
