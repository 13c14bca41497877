//! Synthetic Catalog Generator
//!
//! Produces plausible-looking items for `POST /seed` so a fresh index can be
//! explored without a real data feed.

use super::types::Item;
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_SEED_COUNT: usize = 100;
pub const MAX_SEED_COUNT: usize = 10_000;

const ADJECTIVES: &[&str] = &[
    "Premium", "Compact", "Deluxe", "Rugged", "Classic", "Smart", "Portable", "Wireless",
];

const NOUNS: &[(&str, &str)] = &[
    ("Widget", "Tools"),
    ("Gadget", "Electronics"),
    ("Lamp", "Home"),
    ("Backpack", "Outdoors"),
    ("Speaker", "Electronics"),
    ("Kettle", "Kitchen"),
    ("Wrench", "Tools"),
    ("Tent", "Outdoors"),
    ("Blender", "Kitchen"),
    ("Chair", "Home"),
];

const FEATURES: &[&str] = &[
    "built to last",
    "with a two year warranty",
    "in a sleek matte finish",
    "designed for everyday use",
    "made from recycled materials",
    "with an ergonomic grip",
];

/// Generates `count` synthetic items.
///
/// Names follow `"<Adjective> <Noun> <n>"` with `n` running from 1, so every
/// name in one batch is distinct. Prices are in `1.00..=500.00`, rounded to cents.
pub fn generate_items<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Item> {
    (1..=count)
        .map(|n| {
            let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Premium");
            let (noun, category) = NOUNS.choose(rng).copied().unwrap_or(("Widget", "Tools"));
            let feature = FEATURES.choose(rng).copied().unwrap_or("built to last");
            let cents: u32 = rng.gen_range(100..=50_000);

            Item {
                id: uuid::Uuid::new_v4().to_string(),
                name: format!("{} {} {}", adjective, noun, n),
                description: format!(
                    "A {} {} {}.",
                    adjective.to_lowercase(),
                    noun.to_lowercase(),
                    feature
                ),
                category: category.to_string(),
                price: f64::from(cents) / 100.0,
            }
        })
        .collect()
}
