use doping_scatter::{RaceTime, Record};

/// Seeded splitmix64 stream; enough spread for a demo dataset.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Bell-shaped draw in `[lo, hi]`: the mean of three uniforms.
    fn bell(&mut self, lo: f64, hi: f64) -> f64 {
        let mean = (self.unit() + self.unit() + self.unit()) / 3.0;
        lo + mean * (hi - lo)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

const NATIONALITIES: [&str; 8] = ["ITA", "FRA", "ESP", "USA", "GER", "COL", "SUI", "KAZ"];
const ALLEGATIONS: [&str; 4] = [
    "Alleged drug use due to high hematocrit levels",
    "Admitted doping",
    "Suspended for a positive test",
    "Implicated in a doping investigation",
];

fn main() -> anyhow::Result<()> {
    let mut rng = SampleRng(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample-cyclist-data.json".to_string());

    let mut records: Vec<Record> = (0..35)
        .map(|i| {
            let year = 1994 + rng.below(22) as i32;
            // Climbs cluster around 38 minutes.
            let secs = rng.bell(2190.0, 2400.0).round() as u32;
            let time = RaceTime::from_secs(secs)
                .map(|t| t.to_string())
                .unwrap_or_else(|| "38:00".to_string());
            // Roughly the published share: most of the field has an allegation.
            let doping = if rng.unit() < 0.55 {
                rng.pick(&ALLEGATIONS).to_string()
            } else {
                String::new()
            };
            Record {
                name: format!("Rider {:02}", i + 1),
                nationality: rng.pick(&NATIONALITIES).to_string(),
                year,
                time,
                doping,
                seconds: Some(secs),
                place: None,
                url: Some(String::new()),
            }
        })
        .collect();

    records.sort_by_key(|r| r.seconds);
    for (place, record) in records.iter_mut().enumerate() {
        record.place = Some(place as u32 + 1);
    }

    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(&output_path, json)?;

    println!("Wrote {} riders to {output_path}", records.len());
    Ok(())
}
