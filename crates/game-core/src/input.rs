use common::{GameError, GameResult, Point};

/// Compass direction for `move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::South => Point::new(0, 1),
            Direction::East => Point::new(1, 0),
            Direction::West => Point::new(-1, 0),
        }
    }
}

/// Shop category for `buy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Rod,
    Boat,
    Skill,
}

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Map,
    Look,
    Fish,
    Sell,
    Shop,
    ShopList,
    Buy { category: Category, name: String },
    EquipRod(String),
    Status,
    Help,
    Quit,
}

/// Parses a command line. Blank input yields `Ok(None)`.
pub fn parse_command(line: &str) -> GameResult<Option<Command>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(op) = parts.first() else {
        return Ok(None);
    };
    let cmd = match (op.to_ascii_lowercase().as_str(), parts.len()) {
        ("move", n) if n >= 2 => {
            let dir = parse_direction(parts[1])
                .ok_or_else(|| GameError::Command("Unknown direction. Use n/s/e/w.".into()))?;
            Command::Move(dir)
        }
        ("map", _) => Command::Map,
        ("look", _) => Command::Look,
        ("fish", _) => Command::Fish,
        ("sell", _) => Command::Sell,
        ("shop", _) => Command::Shop,
        ("shoplist", _) => Command::ShopList,
        ("buy", n) if n >= 3 => {
            let category = parse_category(parts[1]).ok_or_else(|| {
                GameError::Command("Unknown category. Use rod, boat, or skill.".into())
            })?;
            Command::Buy {
                category,
                name: parts[2..].join(" "),
            }
        }
        ("equip", n) if n >= 3 => {
            if !parts[1].eq_ignore_ascii_case("rod") {
                return Err(GameError::Command(
                    "You can only equip rods currently.".into(),
                ));
            }
            Command::EquipRod(parts[2..].join(" "))
        }
        ("status", _) => Command::Status,
        ("help", _) => Command::Help,
        ("quit", _) => Command::Quit,
        _ => {
            return Err(GameError::Command(format!(
                "Unknown command '{}'. Type 'help' for commands.",
                line.trim()
            )))
        }
    };
    Ok(Some(cmd))
}

fn parse_direction(name: &str) -> Option<Direction> {
    match name.to_ascii_lowercase().as_str() {
        "n" | "north" => Some(Direction::North),
        "s" | "south" => Some(Direction::South),
        "e" | "east" => Some(Direction::East),
        "w" | "west" => Some(Direction::West),
        _ => None,
    }
}

fn parse_category(name: &str) -> Option<Category> {
    match name.to_ascii_lowercase().as_str() {
        "rod" => Some(Category::Rod),
        "boat" => Some(Category::Boat),
        "skill" => Some(Category::Skill),
        _ => None,
    }
}
