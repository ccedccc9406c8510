use std::path::Path;

use anyhow::{Context, Result};

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const MODIFIERS: [&str; 8] = [
    "best", "cheap", "waterproof", "women's", "men's", "lightweight", "vegan", "kids",
];
const PRODUCTS: [&str; 6] = [
    "running shoes", "trail shoes", "hiking boots", "sandals", "sneakers", "socks",
];
const SERP_FEATURES: [&str; 4] = ["Sitelinks", "Reviews", "Image pack", "People also ask"];

struct Keyword {
    text: String,
    volume: u64,
    difficulty: u64,
    cpc: f64,
    features: &'static str,
}

fn all_keywords(rng: &mut SimpleRng) -> Vec<Keyword> {
    let mut out = Vec::new();
    for product in PRODUCTS {
        for modifier in MODIFIERS {
            out.push(Keyword {
                text: format!("{modifier} {product}"),
                volume: rng.range(10, 20_000),
                difficulty: rng.range(0, 95),
                cpc: (rng.next_f64() * 300.0).round() / 100.0,
                features: SERP_FEATURES[rng.range(0, SERP_FEATURES.len() as u64 - 1) as usize],
            });
        }
    }
    out
}

fn write_positions(path: &Path, keywords: &[Keyword], rng: &mut SimpleRng) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "Keyword",
        "Position",
        "Search Volume",
        "Keyword Difficulty",
        "CPC",
        "URL",
        "SERP Features by Keyword",
    ])?;

    let mut rows = 0;
    for kw in keywords {
        if !rng.chance(0.5) {
            continue;
        }
        let position = rng.range(1, 120).to_string();
        let volume = kw.volume.to_string();
        let difficulty = kw.difficulty.to_string();
        let cpc = format!("{:.2}", kw.cpc);
        let url = format!("https://shop.example/{}", kw.text.replace(' ', "-"));
        writer.write_record([
            kw.text.as_str(),
            position.as_str(),
            volume.as_str(),
            difficulty.as_str(),
            cpc.as_str(),
            url.as_str(),
            kw.features,
        ])?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

fn write_ideas(path: &Path, keywords: &[Keyword], rng: &mut SimpleRng, share: f64) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["Keyword", "Volume", "Keyword Difficulty", "CPC (USD)", "SERP Features"])?;

    let mut rows = 0;
    for kw in keywords {
        if !rng.chance(share) {
            continue;
        }
        // Idea exports sometimes capitalise differently from the positions report.
        let text = if rng.chance(0.1) {
            kw.text.to_uppercase()
        } else {
            kw.text.clone()
        };
        let volume = kw.volume.to_string();
        let difficulty = kw.difficulty.to_string();
        let cpc = format!("{:.2}", kw.cpc);
        writer.write_record([
            text.as_str(),
            volume.as_str(),
            difficulty.as_str(),
            cpc.as_str(),
            kw.features,
        ])?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let keywords = all_keywords(&mut rng);

    let positions = write_positions(Path::new("sample_positions.csv"), &keywords, &mut rng)?;
    let ideas_a = write_ideas(Path::new("sample_ideas_a.csv"), &keywords, &mut rng, 0.6)?;
    let ideas_b = write_ideas(Path::new("sample_ideas_b.csv"), &keywords, &mut rng, 0.4)?;

    println!(
        "Wrote {positions} positions rows, {ideas_a} + {ideas_b} keyword idea rows \
         (sample_positions.csv, sample_ideas_a.csv, sample_ideas_b.csv)"
    );
    Ok(())
}
