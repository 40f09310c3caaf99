//! Map generation utilities.
//!
//! Worlds are built in three steps: random land/water noise, a few rounds of
//! majority smoothing so land and water clump together, and finally placing
//! named locations (harbors, docks) on land that touches water.
use common::{GameError, GameResult, Point};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Number of smoothing passes applied after the noise step.
pub const SMOOTHING_PASSES: usize = 3;

/// Land tiles (self included) needed in a 3x3 block for the centre to stay land.
const LAND_THRESHOLD: usize = 5;

const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Kind of a tile on the game map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    /// Walkable land tile.
    Land,
    /// Water tile where fish can be caught.
    Water,
}

/// One cell of the world grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    /// Name of the harbor or dock placed on this tile, if any.
    pub location_name: Option<String>,
}

impl Tile {
    /// Creates an unnamed tile of the given kind.
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            location_name: None,
        }
    }

    pub fn is_land(&self) -> bool {
        self.kind == TileKind::Land
    }
}

/// Simple map representation.
///
/// Coordinates outside the map are never land, never in bounds and carry no
/// name; every query below follows that rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    pub width: u32,
    pub height: u32,
    tiles: Vec<Tile>,
    locations: Vec<(String, Point)>,
}

impl Map {
    /// Creates a new map filled with [`TileKind::Land`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TileKind::Land)
    }

    /// Creates a new map where every tile is `kind`.
    pub fn filled(width: u32, height: u32, kind: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(kind); width as usize * height as usize],
            locations: Vec::new(),
        }
    }

    /// Returns tile index from coordinates.
    ///
    /// The point must be in bounds.
    pub fn idx(&self, pt: Point) -> usize {
        (pt.y as usize) * self.width as usize + pt.x as usize
    }

    pub fn in_bounds(&self, pt: Point) -> bool {
        pt.x >= 0 && pt.y >= 0 && (pt.x as u32) < self.width && (pt.y as u32) < self.height
    }

    /// Returns the tile at `pt`, or `None` outside the map.
    pub fn tile(&self, pt: Point) -> Option<&Tile> {
        if self.in_bounds(pt) {
            Some(&self.tiles[self.idx(pt)])
        } else {
            None
        }
    }

    pub fn is_land(&self, pt: Point) -> bool {
        self.tile(pt).is_some_and(Tile::is_land)
    }

    /// Returns `true` for in-bounds water tiles.
    pub fn is_water(&self, pt: Point) -> bool {
        self.tile(pt).is_some_and(|t| !t.is_land())
    }

    pub fn location_name_at(&self, pt: Point) -> Option<&str> {
        self.tile(pt).and_then(|t| t.location_name.as_deref())
    }

    /// Named locations in placement order.
    pub fn locations(&self) -> &[(String, Point)] {
        &self.locations
    }

    /// Looks up a named location by name.
    pub fn location(&self, name: &str) -> Option<Point> {
        self.locations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, pt)| *pt)
    }

    /// Changes the kind of an in-bounds tile. Out-of-bounds points are ignored.
    pub fn set_kind(&mut self, pt: Point, kind: TileKind) {
        if self.in_bounds(pt) {
            let idx = self.idx(pt);
            self.tiles[idx].kind = kind;
        }
    }

    /// Iterates over every coordinate in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    pub fn land_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_land()).count()
    }

    /// Counts land tiles in the 3x3 block centred on `pt`, itself included.
    pub fn land_neighbors(&self, pt: Point) -> usize {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if self.is_land(pt.offset(dx, dy)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Returns `true` for land with at least one orthogonal water neighbour.
    pub fn is_shoreline(&self, pt: Point) -> bool {
        self.is_land(pt)
            && ORTHOGONAL
                .iter()
                .any(|&(dx, dy)| self.is_water(pt.offset(dx, dy)))
    }

    /// Runs one smoothing pass and returns the resulting map.
    ///
    /// Every tile is decided from `self` alone, so the result does not depend
    /// on the order tiles are visited in.
    pub fn smooth(&self) -> Map {
        let mut next = Map::filled(self.width, self.height, TileKind::Water);
        for pt in self.points() {
            if self.land_neighbors(pt) >= LAND_THRESHOLD {
                next.set_kind(pt, TileKind::Land);
            }
        }
        next
    }

    /// Names the shoreline tile at `pt`.
    ///
    /// Returns `false` and changes nothing if `pt` is not shoreline, already
    /// named, or `name` is taken.
    pub fn add_location(&mut self, name: &str, pt: Point) -> bool {
        if !self.is_shoreline(pt)
            || self.location_name_at(pt).is_some()
            || self.location(name).is_some()
        {
            return false;
        }
        let idx = self.idx(pt);
        self.tiles[idx].location_name = Some(name.to_string());
        self.locations.push((name.to_string(), pt));
        true
    }
}

/// Generates a [`Map`] with named locations.
///
/// With `seed` set the output is fully reproducible; without it the
/// generator is seeded from system entropy.
pub fn generate<S: AsRef<str>>(
    width: u32,
    height: u32,
    land_probability: f64,
    seed: Option<u64>,
    location_names: &[S],
) -> GameResult<Map> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    generate_with_rng(width, height, land_probability, location_names, &mut rng)
}

/// Same as [`generate`] but draws from a caller supplied generator.
pub fn generate_with_rng<S, R>(
    width: u32,
    height: u32,
    land_probability: f64,
    location_names: &[S],
    rng: &mut R,
) -> GameResult<Map>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    if width == 0 || height == 0 || !(0.0..=1.0).contains(&land_probability) {
        return Err(GameError::InvalidDimensions {
            width,
            height,
            land_probability,
        });
    }

    let mut map = Map::filled(width, height, TileKind::Water);
    for pt in map.points().collect::<Vec<_>>() {
        if rng.gen::<f64>() < land_probability {
            map.set_kind(pt, TileKind::Land);
        }
    }
    for _ in 0..SMOOTHING_PASSES {
        map = map.smooth();
    }
    place_locations(&mut map, location_names, rng);

    debug!(
        width,
        height,
        land = map.land_count(),
        locations = map.locations.len(),
        "generated map"
    );
    Ok(map)
}

/// Assigns names to shuffled shoreline tiles until names or tiles run out.
fn place_locations<S, R>(map: &mut Map, names: &[S], rng: &mut R)
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut candidates: Vec<Point> = map.points().filter(|&pt| map.is_shoreline(pt)).collect();
    candidates.shuffle(rng);
    let mut slots = candidates.into_iter();
    for name in names {
        let name = name.as_ref();
        if map.location(name).is_some() {
            debug!(name, "skipping duplicate location name");
            continue;
        }
        let Some(pt) = slots.next() else {
            break;
        };
        map.add_location(name, pt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NAMES: [&str; 5] = [
        "Vagle Harbor",
        "Old Pier",
        "Seabreeze Town",
        "Pärnu Dock",
        "Northwatch",
    ];

    fn map_from_rows(rows: &[&str]) -> Map {
        let mut map = Map::filled(rows[0].len() as u32, rows.len() as u32, TileKind::Water);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    map.set_kind(Point::new(x as i32, y as i32), TileKind::Land);
                }
            }
        }
        map
    }

    #[test]
    fn generate_map() {
        let map = generate(40, 20, 0.6, Some(1), &NAMES).expect("map");
        assert_eq!(map.width, 40);
        assert_eq!(map.height, 20);
        assert_eq!(map.points().count(), 800);
    }

    #[test]
    fn index_calculation() {
        let map = Map::new(10, 10);
        let idx = map.idx(Point::new(3, 2));
        assert_eq!(idx, 2 * 10 + 3);
    }

    #[test]
    fn long_strip_has_every_tile() {
        let map = Map::filled(70_000, 2, TileKind::Water);
        let last = Point::new(69_999, 1);
        assert_eq!(map.idx(last), 139_999);
        assert!(map.is_water(last));
        assert!(map.tile(Point::new(70_000, 1)).is_none());
        assert_eq!(map.points().count(), 140_000);
    }

    #[test]
    fn rejects_empty_dimensions() {
        let res = generate(0, 10, 0.5, Some(1), &NAMES);
        assert!(matches!(res, Err(GameError::InvalidDimensions { .. })));
        let res = generate(10, 0, 0.5, Some(1), &NAMES);
        assert!(matches!(res, Err(GameError::InvalidDimensions { .. })));
    }

    #[test]
    fn rejects_bad_probability() {
        for p in [-0.1, 1.5, f64::NAN] {
            let res = generate(5, 5, p, Some(1), &NAMES);
            assert!(matches!(res, Err(GameError::InvalidDimensions { .. })));
        }
    }

    #[test]
    fn same_seed_same_world() {
        let a = generate(40, 20, 0.6, Some(7), &NAMES).unwrap();
        let b = generate(40, 20, 0.6, Some(7), &NAMES).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.locations(), b.locations());
    }

    #[test]
    fn small_seeded_world_is_reproducible() {
        let a = generate(10, 10, 0.6, Some(42), &["Dock A"]).unwrap();
        let b = generate(10, 10, 0.6, Some(42), &["Dock A"]).unwrap();
        let land_a: Vec<bool> = a.points().map(|pt| a.is_land(pt)).collect();
        let land_b: Vec<bool> = b.points().map(|pt| b.is_land(pt)).collect();
        assert_eq!(land_a, land_b);
        assert_eq!(a.location("Dock A"), b.location("Dock A"));
    }

    #[test]
    fn named_locations_sit_on_shoreline() {
        for seed in 0..20 {
            let map = generate(30, 15, 0.6, Some(seed), &NAMES).unwrap();
            for (name, pt) in map.locations() {
                assert!(map.is_land(*pt), "{name} placed on water");
                assert!(map.is_shoreline(*pt), "{name} has no water neighbour");
                assert_eq!(map.location_name_at(*pt), Some(name.as_str()));
            }
        }
    }

    #[test]
    fn location_names_are_unique() {
        let map = generate(40, 20, 0.6, Some(3), &NAMES).unwrap();
        let mut points: Vec<Point> = map.locations().iter().map(|(_, pt)| *pt).collect();
        points.sort();
        points.dedup();
        assert_eq!(points.len(), map.locations().len());
    }

    #[test]
    fn all_water_has_no_locations() {
        let map = generate(8, 8, 0.0, Some(5), &NAMES).unwrap();
        assert_eq!(map.land_count(), 0);
        assert!(map.locations().is_empty());
    }

    #[test]
    fn all_land_erodes_only_corners() {
        let map = generate(6, 4, 1.0, Some(5), &NAMES).unwrap();
        // corners see four land tiles, edges six, so only corners flip
        assert!(!map.is_land(Point::new(0, 0)));
        assert!(!map.is_land(Point::new(5, 3)));
        assert!(map.is_land(Point::new(1, 0)));
        assert!(map.is_land(Point::new(2, 2)));
    }

    #[test]
    fn fewer_slots_than_names() {
        let mut map = map_from_rows(&["#~~"]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        place_locations(&mut map, &["A", "B"], &mut rng);
        assert_eq!(map.locations(), &[("A".to_string(), Point::new(0, 0))]);
        assert_eq!(map.location("B"), None);
    }

    #[test]
    fn duplicate_names_are_skipped() {
        let mut map = map_from_rows(&["#~#", "~~~", "#~#"]);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        place_locations(&mut map, &["A", "A", "B"], &mut rng);
        let names: Vec<&str> = map.locations().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn add_location_requires_shoreline() {
        let mut map = map_from_rows(&["###~", "###~", "###~"]);
        assert!(!map.add_location("Inland", Point::new(0, 1)));
        assert!(!map.add_location("Wet", Point::new(3, 0)));
        assert!(map.add_location("Pier", Point::new(2, 1)));
        assert!(!map.add_location("Pier", Point::new(2, 0)));
        assert!(!map.add_location("Other", Point::new(2, 1)));
        assert_eq!(map.location("Pier"), Some(Point::new(2, 1)));
    }

    #[test]
    fn isolated_land_disappears() {
        let map = map_from_rows(&["~~~~~", "~~~~~", "~~#~~", "~~~~~", "~~~~~"]);
        assert_eq!(map.smooth().land_count(), 0);
    }

    #[test]
    fn majority_block_survives() {
        let map = map_from_rows(&["###~", "###~", "###~", "~~~~"]);
        let next = map.smooth();
        assert!(next.is_land(Point::new(1, 1)));
        assert!(next.is_land(Point::new(1, 0)));
        // corner of the block sees exactly four land tiles
        assert!(!next.is_land(Point::new(2, 2)));
        assert!(!next.is_land(Point::new(0, 0)));
    }

    #[test]
    fn smoothing_ignores_visit_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut map = Map::filled(16, 12, TileKind::Water);
        for pt in map.points().collect::<Vec<_>>() {
            if rng.gen::<f64>() < 0.55 {
                map.set_kind(pt, TileKind::Land);
            }
        }
        let forward = map.smooth();

        let mut reversed = Map::filled(map.width, map.height, TileKind::Water);
        let mut order: Vec<Point> = map.points().collect();
        order.reverse();
        for pt in order {
            if map.land_neighbors(pt) >= LAND_THRESHOLD {
                reversed.set_kind(pt, TileKind::Land);
            }
        }
        assert_eq!(forward, reversed);
    }

    #[test]
    fn out_of_bounds_queries() {
        let map = Map::new(3, 3);
        let outside = Point::new(-1, 0);
        assert!(!map.in_bounds(outside));
        assert!(!map.is_land(outside));
        assert!(!map.is_water(outside));
        assert_eq!(map.location_name_at(Point::new(3, 3)), None);
        assert!(map.tile(Point::new(0, 3)).is_none());
    }
}
