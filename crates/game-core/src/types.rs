use common::Point;
use data::{Boat, Rod, Skill};
use fishing::{CaughtFish, Loadout};

/// Player entity with position, wallet and gear.
#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Point,
    pub money: u32,
    /// Caught fish grouped by species name, in first-catch order.
    pub inventory: Vec<(String, Vec<CaughtFish>)>,
    pub rod: Rod,
    pub boat: Option<Boat>,
    pub skills: Vec<Skill>,
}

impl Player {
    /// Creates a player on foot with an empty inventory.
    pub fn new(pos: Point, money: u32, rod: Rod) -> Self {
        Self {
            pos,
            money,
            inventory: Vec::new(),
            rod,
            boat: None,
            skills: Vec::new(),
        }
    }

    pub fn add_fish(&mut self, fish: CaughtFish) {
        let name = fish.species.name.clone();
        match self.inventory.iter_mut().find(|(n, _)| *n == name) {
            Some((_, fishes)) => fishes.push(fish),
            None => self.inventory.push((name, vec![fish])),
        }
    }

    pub fn inventory_value(&self) -> u32 {
        self.inventory
            .iter()
            .flat_map(|(_, fishes)| fishes)
            .map(|f| f.price)
            .sum()
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s.name == name)
    }

    /// Rod range plus every learned range bonus.
    pub fn casting_range(&self) -> u32 {
        self.rod.casting_range
            + self
                .skills
                .iter()
                .map(|s| s.effect.casting_range)
                .sum::<u32>()
    }

    pub fn luck(&self) -> f64 {
        self.skills.iter().map(|s| s.effect.luck).sum()
    }

    /// Parameters handed to the catch resolver for the next cast.
    pub fn loadout(&self) -> Loadout {
        Loadout {
            casting_range: self.casting_range(),
            base_catch_chance: self.rod.base_catch_chance,
            luck: self.luck(),
        }
    }
}
