use serde::Serialize;

/// One CSV row, using the column names of the public rental dataset.
#[derive(Serialize)]
struct Row<'a> {
    city: &'a str,
    area: u32,
    rooms: u32,
    animal: &'a str,
    #[serde(rename = "rent amount (R$)")]
    rent_amount: u32,
}

/// City name, rent per m² and typical area.
const CITIES: [(&str, f64, f64); 5] = [
    ("São Paulo", 45.0, 160.0),
    ("Rio de Janeiro", 40.0, 110.0),
    ("Belo Horizonte", 28.0, 200.0),
    ("Porto Alegre", 26.0, 100.0),
    ("Campinas", 24.0, 140.0),
];

const LISTINGS_PER_CITY: usize = 400;

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_listings.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    let mut written = 0usize;
    for &(city, per_m2, typical_area) in &CITIES {
        for _ in 0..LISTINGS_PER_CITY {
            let area = rng.gauss(typical_area, typical_area * 0.5).max(15.0);
            // Roughly one room per 35 m², capped like the source data.
            let rooms = ((area / 35.0).round() as u32).clamp(1, 10);
            let rent = (area * per_m2 * rng.gauss(1.0, 0.25).max(0.3)).max(450.0);
            let animal = if rng.next_f64() < 0.78 { "acept" } else { "not acept" };

            writer.serialize(Row {
                city,
                area: area.round() as u32,
                rooms,
                animal,
                rent_amount: rent.round() as u32,
            })?;
            written += 1;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {written} listings across {} cities to {output_path}",
        CITIES.len()
    );
    Ok(())
}
