//! Catch resolution.
//!
//! A cast picks a random water tile within range, rolls whether the fish
//! stays on the hook, then draws a species weighted by rarity and luck and
//! rolls its size and sale price. Every random draw comes from the generator
//! passed in, so a seeded generator replays the same catches.

use common::{GameError, GameResult, Point};
use data::Species;
use mapgen::Map;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Catch chance lost per tile of casting distance.
pub const DISTANCE_PENALTY: f64 = 0.03;
pub const MIN_CHANCE: f64 = 0.01;
pub const MAX_CHANCE: f64 = 0.95;
const MIN_WEIGHT: f64 = 0.01;
const SIZE_PRICE_FACTOR: f64 = 1.5;

/// Equipment-derived parameters for one cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Loadout {
    /// Maximum Euclidean distance, in tiles, the line can land.
    pub casting_range: u32,
    pub base_catch_chance: f64,
    /// Additive bonus to catch chance and rare species weight. May be negative.
    pub luck: f64,
}

/// Water tile the line landed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastTarget {
    pub point: Point,
    pub distance: f64,
}

/// A landed fish.
#[derive(Clone, Debug, PartialEq)]
pub struct CaughtFish {
    pub species: Species,
    /// Weight in kg, rounded to two decimals.
    pub size: f64,
    pub price: u32,
}

/// Result of [`attempt_catch`].
#[derive(Clone, Debug, PartialEq)]
pub enum CatchOutcome {
    /// No water within casting range.
    NoBite,
    /// A fish bit at `target` but could not be reeled in.
    Escaped { target: CastTarget },
    Caught { target: CastTarget, fish: CaughtFish },
}

/// Lists every water tile within `range` of `origin`, excluding `origin`,
/// in row-major order.
///
/// The origin never counts as a target, so a lone water tile ringed by land
/// has nothing to cast at and a range of 0 always comes back empty.
pub fn reachable_water(map: &Map, origin: Point, range: u32) -> Vec<CastTarget> {
    let r = range as i32;
    let max = f64::from(range);
    let mut targets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx == 0 && dy == 0 {
                continue;
            }
            let point = origin.offset(dx, dy);
            if !map.is_water(point) {
                continue;
            }
            let distance = f64::from(dx * dx + dy * dy).sqrt();
            if distance <= max {
                targets.push(CastTarget { point, distance });
            }
        }
    }
    targets
}

/// Success chance for a cast landing `distance` tiles away.
///
/// The penalty and luck are summed first and only the total is clamped.
pub fn catch_chance(base_catch_chance: f64, distance: f64, luck: f64) -> f64 {
    let raw = base_catch_chance - DISTANCE_PENALTY * distance + luck;
    // max/min rather than clamp so a NaN input lands on the floor
    raw.max(MIN_CHANCE).min(MAX_CHANCE)
}

/// Draw weight of `species`; positive luck pulls rare species up toward 1.
pub fn species_weight(species: &Species, luck: f64) -> f64 {
    (species.rarity + luck * (1.0 - species.rarity)).max(MIN_WEIGHT)
}

/// Weighted draw over `table` in table order.
///
/// Returns the first species whose running weight reaches the draw, the
/// last species if rounding leaves none, and `None` for an empty table.
pub fn choose_species<'a, R>(table: &'a [Species], luck: f64, rng: &mut R) -> Option<&'a Species>
where
    R: Rng + ?Sized,
{
    let weights: Vec<f64> = table.iter().map(|s| species_weight(s, luck)).collect();
    let total: f64 = weights.iter().sum();
    let draw = rng.gen::<f64>() * total;
    let mut upto = 0.0;
    for (species, weight) in table.iter().zip(&weights) {
        upto += weight;
        if upto >= draw {
            return Some(species);
        }
    }
    table.last()
}

/// Rolls a size between the species bounds, rounded to two decimals.
pub fn roll_size<R: Rng + ?Sized>(species: &Species, rng: &mut R) -> f64 {
    let size = species.min_size + (species.max_size - species.min_size) * rng.gen::<f64>();
    (size * 100.0).round() / 100.0
}

/// Sale price of a fish of `size`; bigger fish sell for up to 2.5x base.
pub fn sale_price(species: &Species, size: f64) -> u32 {
    let scale = 1.0 + (size / (species.max_size + 0.01)) * SIZE_PRICE_FACTOR;
    (f64::from(species.base_price) * scale).floor() as u32
}

/// Resolves one cast from `origin`.
///
/// `origin` must be an in-bounds water tile and `species` must not be
/// empty; violating either is reported as an error rather than an outcome.
pub fn attempt_catch<R>(
    map: &Map,
    origin: Point,
    loadout: Loadout,
    species: &[Species],
    rng: &mut R,
) -> GameResult<CatchOutcome>
where
    R: Rng + ?Sized,
{
    if !map.is_water(origin) {
        return Err(GameError::InvalidState(format!(
            "cannot fish from ({}, {}): not a water tile",
            origin.x, origin.y
        )));
    }
    if species.is_empty() {
        return Err(GameError::InvalidOperation);
    }

    let reachable = reachable_water(map, origin, loadout.casting_range);
    let Some(&target) = reachable.choose(rng) else {
        debug!(range = loadout.casting_range, "no water within casting range");
        return Ok(CatchOutcome::NoBite);
    };

    let chance = catch_chance(loadout.base_catch_chance, target.distance, loadout.luck);
    let roll = rng.gen::<f64>();
    if roll > chance {
        debug!(chance, roll, distance = target.distance, "fish escaped");
        return Ok(CatchOutcome::Escaped { target });
    }

    let species = choose_species(species, loadout.luck, rng).ok_or(GameError::InvalidOperation)?;
    let size = roll_size(species, rng);
    let price = sale_price(species, size);
    debug!(species = %species.name, size, price, "fish caught");
    Ok(CatchOutcome::Caught {
        target,
        fish: CaughtFish {
            species: species.clone(),
            size,
            price,
        },
    })
}
