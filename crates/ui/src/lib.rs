//! Text rendering for the command-line game.
//!
//! Every function here builds a string; printing is left to the caller.
use common::Point;
use data::{Boat, Catalog, Rod, Skill};
use fishing::{CatchOutcome, CaughtFish};
use mapgen::Map;

/// Tiles shown on each side of the player by [`render_viewport`].
pub const VIEW_RADIUS: i32 = 10;

const DIRECTIONS: [(&str, i32, i32); 4] = [("N", 0, -1), ("S", 0, 1), ("E", 1, 0), ("W", -1, 0)];

const HELP: &str = "
Commands:
  move n/s/e/w     - move north/south/east/west (can't walk on water)
  map              - show local map around you
  look             - describe your current tile and neighbors
  fish             - attempt to fish (must be on water)
  sell             - sell all fish in inventory
  shop             - open shop menu if at a harbor/location
  shoplist         - show all items available in shops
  buy <cat> <name> - buy an item. cat = rod|boat|skill  (e.g. buy rod Long Rod)
  equip rod <name> - equip a rod
  status           - show player status and inventory
  help             - show this message
  quit             - exit game
";

/// Player details needed by [`status_report`].
#[derive(Debug)]
pub struct StatusView<'a> {
    pub pos: Point,
    pub money: u32,
    pub rod: &'a Rod,
    pub boat: Option<&'a Boat>,
    pub skills: &'a [Skill],
    pub inventory: &'a [(String, Vec<CaughtFish>)],
}

/// Draws the map around `center`, clipped to the map edges.
///
/// `P` marks the player, `L` a named location, `.` land and `~` water.
pub fn render_viewport(map: &Map, center: Point, radius: i32) -> String {
    let left = (center.x - radius).max(0);
    let right = (center.x + radius).min(map.width as i32 - 1);
    let top = (center.y - radius).max(0);
    let bottom = (center.y + radius).min(map.height as i32 - 1);
    let mut rows = Vec::new();
    for y in top..=bottom {
        let row: String = (left..=right)
            .map(|x| {
                let pt = Point::new(x, y);
                if pt == center {
                    'P'
                } else if map.location_name_at(pt).is_some() {
                    'L'
                } else if map.is_land(pt) {
                    '.'
                } else {
                    '~'
                }
            })
            .collect();
        rows.push(row);
    }
    rows.join("\n")
}

/// Describes the tile at `pos` and its four neighbours.
pub fn look_report(map: &Map, pos: Point) -> String {
    let mut out = Vec::new();
    if map.is_land(pos) {
        out.push(format!("You are on land at ({},{}).", pos.x, pos.y));
        if let Some(name) = map.location_name_at(pos) {
            out.push(format!("This place is called {name}. You can access a shop here."));
        }
    } else {
        out.push(format!("You are on water at ({},{}). Cast away!", pos.x, pos.y));
    }
    out.push("Surroundings (N,S,E,W):".to_string());
    for (label, dx, dy) in DIRECTIONS {
        let pt = pos.offset(dx, dy);
        if !map.in_bounds(pt) {
            out.push(format!("  {label}: Out of bounds"));
            continue;
        }
        let kind = if map.is_land(pt) { "Land" } else { "Water" };
        match map.location_name_at(pt) {
            Some(name) => out.push(format!("  {label}: {kind} - {name}")),
            None => out.push(format!("  {label}: {kind}")),
        }
    }
    out.join("\n")
}

pub fn status_report(map: &Map, view: &StatusView) -> String {
    let mut out = Vec::new();
    let terrain = if map.is_land(view.pos) { "Land" } else { "Water" };
    out.push(format!("Location: ({},{}) - {terrain}", view.pos.x, view.pos.y));
    if let Some(name) = map.location_name_at(view.pos) {
        out.push(format!("At location: {name}"));
    }
    out.push(format!("Money: {}", view.money));
    out.push(format!(
        "Equipped rod: {} (Range: {})",
        view.rod.name, view.rod.casting_range
    ));
    out.push(format!(
        "Boat: {}",
        view.boat.map(|b| b.name.as_str()).unwrap_or("None")
    ));
    out.push("Skills:".to_string());
    if view.skills.is_empty() {
        out.push("  None".to_string());
    }
    for s in view.skills {
        out.push(format!("  {} - {}", s.name, s.description));
    }
    out.push("Fish inventory:".to_string());
    if view.inventory.is_empty() {
        out.push("  Empty".to_string());
    }
    for (name, fishes) in view.inventory {
        for f in fishes {
            out.push(format!("  {name} ({} kg) - sell value {}", f.size, f.price));
        }
    }
    out.join("\n")
}

/// Lists every rod, boat and skill in the catalog.
pub fn shop_list(catalog: &Catalog) -> String {
    let mut out = vec!["Rods:".to_string()];
    for r in &catalog.rods {
        out.push(format!(
            "  {}: Price {}, Range {}, Catch {:.0}%",
            r.name,
            r.price,
            r.casting_range,
            r.base_catch_chance * 100.0
        ));
    }
    out.push("Boats:".to_string());
    for b in &catalog.boats {
        out.push(format!("  {}: Price {}, Speed {}", b.name, b.price, b.speed));
    }
    out.push("Skills:".to_string());
    for s in &catalog.skills {
        out.push(format!("  {}: Price {} - {}", s.name, s.price, s.description));
    }
    out.join("\n")
}

pub fn describe_outcome(outcome: &CatchOutcome) -> String {
    match outcome {
        CatchOutcome::NoBite => "No water within casting range.".to_string(),
        CatchOutcome::Escaped { .. } => {
            "A fish bit... but you failed to reel it in. Try again.".to_string()
        }
        CatchOutcome::Caught { fish, .. } => format!(
            "You caught a {} ({} kg) worth {} coins!",
            fish.species.name, fish.size, fish.price
        ),
    }
}

pub fn help_text() -> &'static str {
    HELP
}
