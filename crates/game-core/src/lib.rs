//! Game engine entry point.
//!
//! [`Game`] owns the generated world, the player and the random generator
//! that every catch draws from. Commands come in as parsed [`Command`]s and
//! go out as text, so the same engine drives the stdin loop in [`run`] and
//! scripted sessions in tests.

mod config;
mod input;
mod types;

use std::io::{BufRead, Write};

use common::{GameError, GameResult, Point};
use data::{Catalog, Skill};
use fishing::{attempt_catch, CatchOutcome};
use mapgen::Map;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub use config::GameConfig;
pub use input::{parse_command, Category, Command, Direction};
pub use types::Player;

const CONFIG_PATH: &str = "kalamang.json";
const CONFIG_ENV: &str = "KALAMANG_CONFIG";

/// Where a new boat is put in the water, checked in this order.
const LAUNCH_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Result of a move attempt. Blocked moves leave the player in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { location: Option<String> },
    OutOfBounds,
    /// Target is water and the player has no boat.
    NeedBoat,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FishReport {
    /// Fishing is only possible from a water tile.
    OnLand,
    Cast(CatchOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoatLaunch {
    AlreadyAfloat,
    Launched(Point),
    NoWaterNearby,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Purchase {
    Rod(String),
    Boat { name: String, launch: BoatLaunch },
    Skill(Skill),
}

/// Fish sold by [`Game::sell`]: species name, size, price.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaleReceipt {
    pub items: Vec<(String, f64, u32)>,
    pub total: u32,
}

/// Complete state of one running game.
pub struct Game {
    map: Map,
    player: Player,
    catalog: Catalog,
    rng: ChaCha8Rng,
    running: bool,
}

impl Game {
    /// Generates a world from `config` and places the player on it.
    ///
    /// The player starts at a random named location, else on the first land
    /// tile, else at the origin.
    pub fn new(config: &GameConfig, catalog: Catalog) -> GameResult<Self> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let map = mapgen::generate_with_rng(
            config.map_width,
            config.map_height,
            config.land_probability,
            &config.location_names,
            &mut rng,
        )?;
        let start = find_start(&map, &mut rng);
        info!(
            width = map.width,
            height = map.height,
            seed = ?config.seed,
            locations = map.locations().len(),
            x = start.x,
            y = start.y,
            "world ready"
        );
        Self::assemble(map, catalog, start, config.start_money, &config.start_rod, rng)
    }

    /// Builds a game on an existing map with a seeded generator.
    pub fn from_map(
        map: Map,
        catalog: Catalog,
        start: Point,
        start_money: u32,
        start_rod: &str,
        seed: u64,
    ) -> GameResult<Self> {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::assemble(map, catalog, start, start_money, start_rod, rng)
    }

    fn assemble(
        map: Map,
        catalog: Catalog,
        start: Point,
        start_money: u32,
        start_rod: &str,
        rng: ChaCha8Rng,
    ) -> GameResult<Self> {
        let rod = catalog
            .rod(start_rod)
            .cloned()
            .ok_or_else(|| GameError::UnknownItem {
                category: "rod".into(),
                name: start_rod.into(),
            })?;
        Ok(Self {
            map,
            player: Player::new(start, start_money, rod),
            catalog,
            rng,
            running: true,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// `false` once the player has quit.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Moves the player one tile. Land is always walkable, water needs a boat.
    pub fn move_by(&mut self, dir: Direction) -> MoveOutcome {
        let delta = dir.delta();
        let target = self.player.pos.offset(delta.x, delta.y);
        if !self.map.in_bounds(target) {
            return MoveOutcome::OutOfBounds;
        }
        if !self.map.is_land(target) && self.player.boat.is_none() {
            return MoveOutcome::NeedBoat;
        }
        self.player.pos = target;
        MoveOutcome::Moved {
            location: self.map.location_name_at(target).map(String::from),
        }
    }

    /// Casts from the player's tile and keeps anything caught.
    pub fn fish(&mut self) -> GameResult<FishReport> {
        if !self.map.is_water(self.player.pos) {
            return Ok(FishReport::OnLand);
        }
        let outcome = attempt_catch(
            &self.map,
            self.player.pos,
            self.player.loadout(),
            &self.catalog.species,
            &mut self.rng,
        )?;
        if let CatchOutcome::Caught { fish, .. } = &outcome {
            self.player.add_fish(fish.clone());
        }
        Ok(FishReport::Cast(outcome))
    }

    /// Sells the whole inventory.
    pub fn sell(&mut self) -> SaleReceipt {
        let mut receipt = SaleReceipt::default();
        for (name, fishes) in self.player.inventory.drain(..) {
            for f in fishes {
                receipt.total = receipt.total.saturating_add(f.price);
                receipt.items.push((name.clone(), f.size, f.price));
            }
        }
        self.player.money = self.player.money.saturating_add(receipt.total);
        debug!(total = receipt.total, count = receipt.items.len(), "sold fish");
        receipt
    }

    /// Buys an item. Boats and skills are only sold at named locations.
    pub fn buy(&mut self, category: Category, name: &str) -> GameResult<Purchase> {
        if matches!(category, Category::Boat | Category::Skill)
            && self.map.location_name_at(self.player.pos).is_none()
        {
            return Err(GameError::NotAtShop);
        }
        let purchase = match category {
            Category::Rod => {
                let rod = self.catalog.rod(name).cloned().ok_or_else(|| unknown("rod", name))?;
                self.charge(&rod.name, rod.price)?;
                let name = rod.name.clone();
                self.player.rod = rod;
                Purchase::Rod(name)
            }
            Category::Boat => {
                let boat = self.catalog.boat(name).cloned().ok_or_else(|| unknown("boat", name))?;
                self.charge(&boat.name, boat.price)?;
                let name = boat.name.clone();
                self.player.boat = Some(boat);
                Purchase::Boat {
                    name,
                    launch: self.launch_boat(),
                }
            }
            Category::Skill => {
                let skill = self
                    .catalog
                    .skill(name)
                    .cloned()
                    .ok_or_else(|| unknown("skill", name))?;
                if self.player.has_skill(&skill.name) {
                    return Err(GameError::AlreadyOwned(skill.name));
                }
                self.charge(&skill.name, skill.price)?;
                self.player.skills.push(skill.clone());
                Purchase::Skill(skill)
            }
        };
        debug!(?purchase, money = self.player.money, "purchase");
        Ok(purchase)
    }

    /// Equips any rod from the catalog.
    pub fn equip_rod(&mut self, name: &str) -> GameResult<()> {
        let rod = self.catalog.rod(name).cloned().ok_or_else(|| unknown("rod", name))?;
        self.player.rod = rod;
        Ok(())
    }

    pub fn status(&self) -> String {
        let view = ui::StatusView {
            pos: self.player.pos,
            money: self.player.money,
            rod: &self.player.rod,
            boat: self.player.boat.as_ref(),
            skills: &self.player.skills,
            inventory: &self.player.inventory,
        };
        ui::status_report(&self.map, &view)
    }

    /// Runs one command and returns the text to show the player.
    pub fn execute(&mut self, cmd: Command) -> GameResult<String> {
        let text = match cmd {
            Command::Move(dir) => match self.move_by(dir) {
                MoveOutcome::Moved {
                    location: Some(name),
                } => format!("You arrive at {name}."),
                MoveOutcome::Moved { location: None } => "You moved.".to_string(),
                MoveOutcome::OutOfBounds => "Out of bounds.".to_string(),
                MoveOutcome::NeedBoat => {
                    "You can't walk on water. Buy a boat to move on water tiles.".to_string()
                }
            },
            Command::Map => ui::render_viewport(&self.map, self.player.pos, ui::VIEW_RADIUS),
            Command::Look => ui::look_report(&self.map, self.player.pos),
            Command::Fish => match self.fish()? {
                FishReport::OnLand => "You can't catch fish from land. You must be on a water \
                                       tile (in a boat) to fish."
                    .to_string(),
                FishReport::Cast(outcome) => ui::describe_outcome(&outcome),
            },
            Command::Sell => {
                let receipt = self.sell();
                if receipt.items.is_empty() {
                    "You have no fish to sell.".to_string()
                } else {
                    let mut lines = vec!["Selling all fish in inventory:".to_string()];
                    for (name, size, price) in &receipt.items {
                        lines.push(format!("  Sold {name} ({size} kg) for {price} coins."));
                    }
                    lines.push(format!(
                        "You earned {} coins. You now have {} coins.",
                        receipt.total, self.player.money
                    ));
                    lines.join("\n")
                }
            }
            Command::Shop => match self.map.location_name_at(self.player.pos) {
                Some(name) => format!(
                    "Welcome to {name} Shop! What would you like to see?\n\
                     Items available: boats, rods, skills.\n\
                     Type 'buy <category> <item>' (e.g. buy rod Long Rod)"
                ),
                None => "No shop here. Shops are located in named harbor locations.".to_string(),
            },
            Command::ShopList => ui::shop_list(&self.catalog),
            Command::Buy { category, name } => match self.buy(category, &name)? {
                Purchase::Rod(name) => format!("You bought and equipped {name}."),
                Purchase::Boat { name, launch } => {
                    let launch = match launch {
                        BoatLaunch::AlreadyAfloat => None,
                        BoatLaunch::Launched(_) => Some("You launched your new boat into the water!"),
                        BoatLaunch::NoWaterNearby => Some(
                            "You bought the boat, but couldn't place it at this location. \
                             Move to a dock to launch later.",
                        ),
                    };
                    match launch {
                        Some(msg) => format!("{msg}\nYou bought {name}."),
                        None => format!("You bought {name}."),
                    }
                }
                Purchase::Skill(skill) => {
                    format!("You learned the skill: {} - {}", skill.name, skill.description)
                }
            },
            Command::EquipRod(name) => {
                self.equip_rod(&name)?;
                format!("Equipped rod: {name}")
            }
            Command::Status => self.status(),
            Command::Help => ui::help_text().to_string(),
            Command::Quit => {
                self.running = false;
                "Thanks for playing KalaMang!".to_string()
            }
        };
        Ok(text)
    }

    fn charge(&mut self, name: &str, price: u32) -> GameResult<()> {
        let money = self.player.money;
        self.player.money = money.checked_sub(price).ok_or_else(|| GameError::CannotAfford {
            name: name.to_string(),
            price,
            money,
        })?;
        Ok(())
    }

    /// Moves a player standing on land onto the first adjacent water tile.
    fn launch_boat(&mut self) -> BoatLaunch {
        if !self.map.is_land(self.player.pos) {
            return BoatLaunch::AlreadyAfloat;
        }
        let pos = self.player.pos;
        for (dx, dy) in LAUNCH_OFFSETS {
            let pt = pos.offset(dx, dy);
            if self.map.is_water(pt) {
                self.player.pos = pt;
                return BoatLaunch::Launched(pt);
            }
        }
        BoatLaunch::NoWaterNearby
    }
}

fn unknown(category: &str, name: &str) -> GameError {
    GameError::UnknownItem {
        category: category.to_string(),
        name: name.to_string(),
    }
}

fn find_start<R: Rng + ?Sized>(map: &Map, rng: &mut R) -> Point {
    if let Some((_, pt)) = map.locations().choose(rng) {
        return *pt;
    }
    map.points()
        .find(|&pt| map.is_land(pt))
        .unwrap_or(Point::new(0, 0))
}

/// Feeds `input` line by line into `game`, writing replies to `out`.
///
/// Stops on `quit` or end of input. Command errors are shown to the player
/// and the loop continues; only IO failures end it early.
pub fn play<R: BufRead, W: Write>(game: &mut Game, input: R, out: &mut W) -> GameResult<()> {
    writeln!(out, "Welcome to KalaMang! Type 'help' for a list of commands.")?;
    writeln!(out, "{}", game.status())?;
    write!(out, "\n> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        let reply = parse_command(&line).and_then(|cmd| match cmd {
            Some(cmd) => game.execute(cmd).map(Some),
            None => Ok(None),
        });
        match reply {
            Ok(Some(text)) => writeln!(out, "{text}")?,
            Ok(None) => {}
            Err(e @ (GameError::Io(_) | GameError::InvalidState(_))) => return Err(e),
            Err(e) => writeln!(out, "{e}")?,
        }
        if !game.is_running() {
            return Ok(());
        }
        write!(out, "\n> ")?;
        out.flush()?;
    }
    writeln!(out, "\nExiting.")?;
    Ok(())
}

/// Runs the game on stdin/stdout.
pub fn run() -> GameResult<()> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| CONFIG_PATH.to_string());
    let config = GameConfig::load(&path)?;
    let catalog = config.catalog()?;
    let mut game = Game::new(&config, catalog)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    play(&mut game, stdin.lock(), &mut stdout)
}
