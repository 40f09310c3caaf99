//! Data loading utilities for KalaMang.

use common::{GameError, GameResult};
use serde::Deserialize;

/// Fish species parameters loaded from JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Species {
    pub id: String,
    pub name: String,
    pub base_price: u32,
    /// Base draw weight in `0..=1`; lower is rarer.
    pub rarity: f64,
    /// Smallest catch in kg.
    pub min_size: f64,
    /// Largest catch in kg.
    pub max_size: f64,
}

/// Fishing rod sold in shops.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Rod {
    pub name: String,
    pub price: u32,
    /// How many tiles away the line can land.
    pub casting_range: u32,
    pub base_catch_chance: f64,
}

/// Boat needed to move across water.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Boat {
    pub name: String,
    pub price: u32,
    pub speed: u32,
    pub durability: u32,
}

/// Bonuses granted by a learned [`Skill`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkillEffect {
    pub casting_range: u32,
    pub luck: f64,
    /// Reeling bonus. Carried for display; catch resolution does not read it.
    pub reel: f64,
}

/// Skill that can be learned at a harbor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub price: u32,
    pub description: String,
    #[serde(default)]
    pub effect: SkillEffect,
}

/// All static reference data used by the game.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Catalog {
    pub species: Vec<Species>,
    pub rods: Vec<Rod>,
    #[serde(default)]
    pub boats: Vec<Boat>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Catalog {
    pub fn rod(&self, name: &str) -> Option<&Rod> {
        self.rods.iter().find(|r| r.name == name)
    }

    pub fn boat(&self, name: &str) -> Option<&Boat> {
        self.boats.iter().find(|b| b.name == name)
    }

    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }
}

/// Loads a [`Catalog`] from the given JSON file path.
pub fn load_catalog(path: &str) -> GameResult<Catalog> {
    let data = std::fs::read_to_string(path)?;
    parse_catalog(&data)
}

/// Loads the [`Catalog`] embedded at compile time.
pub fn load_catalog_embedded() -> GameResult<Catalog> {
    parse_catalog(include_str!("../../../assets/catalog.json"))
}

fn parse_catalog(data: &str) -> GameResult<Catalog> {
    let catalog: Catalog =
        serde_json::from_str(data).map_err(|e| GameError::Parse(e.to_string()))?;
    if catalog.species.is_empty() || catalog.rods.is_empty() {
        return Err(GameError::InvalidOperation);
    }
    for s in &catalog.species {
        if !(0.0..=1.0).contains(&s.rarity) {
            return Err(GameError::Parse(format!(
                "{}: rarity {} outside 0..=1",
                s.id, s.rarity
            )));
        }
        if s.min_size > s.max_size {
            return Err(GameError::Parse(format!(
                "{}: min_size {} above max_size {}",
                s.id, s.min_size, s.max_size
            )));
        }
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sample_data() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/catalog.json");
        let catalog = load_catalog(path).expect("catalog");
        assert_eq!(catalog.species.len(), 5);
        assert_eq!(catalog.rods.len(), 3);
    }

    #[test]
    fn embedded_catalog_loads() {
        let catalog = load_catalog_embedded().expect("catalog");
        assert_eq!(catalog.boats.len(), 2);
        assert_eq!(catalog.skills.len(), 3);
        let rod = catalog.rod("Long Rod").expect("rod");
        assert_eq!(rod.casting_range, 5);
        assert_eq!(rod.price, 120);
    }

    #[test]
    fn skill_effects_default_missing_fields() {
        let catalog = load_catalog_embedded().unwrap();
        let mastery = catalog.skill("Casting Mastery").unwrap();
        assert_eq!(mastery.effect.casting_range, 2);
        assert_eq!(mastery.effect.luck, 0.0);
        let hook = catalog.skill("Lucky Hook").unwrap();
        assert!((hook.effect.luck - 0.07).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_failure_when_empty() {
        let res = parse_catalog(r#"{ "species": [], "rods": [] }"#);
        assert!(matches!(res, Err(GameError::InvalidOperation)));
    }

    #[test]
    fn parse_failure_on_bad_json() {
        let res = parse_catalog("{");
        assert!(matches!(res, Err(GameError::Parse(_))));
    }

    #[test]
    fn rejects_inverted_sizes() {
        let json = r#"{
            "species": [{ "id": "a", "name": "A", "base_price": 1, "rarity": 0.5, "min_size": 2.0, "max_size": 1.0 }],
            "rods": [{ "name": "R", "price": 0, "casting_range": 1, "base_catch_chance": 0.5 }]
        }"#;
        assert!(matches!(parse_catalog(json), Err(GameError::Parse(_))));
    }

    #[test]
    fn parse_simple_data() {
        let json = r#"{
            "species": [{ "id": "a", "name": "A", "base_price": 10, "rarity": 1.0, "min_size": 1.0, "max_size": 1.0 }],
            "rods": [{ "name": "R", "price": 0, "casting_range": 1, "base_catch_chance": 0.5 }]
        }"#;
        let catalog = parse_catalog(json).expect("catalog");
        assert_eq!(catalog.species[0].base_price, 10);
        assert!(catalog.boats.is_empty());
        assert!(catalog.skill("anything").is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let res = load_catalog("/no/such/catalog.json");
        assert!(matches!(res, Err(GameError::Io(_))));
    }
}
