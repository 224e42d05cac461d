//! ASCII-map world shared by the demos.
//!
//! A map is a block of text, one character per world unit, top row first:
//!
//! | Char | Meaning |
//! |---|---|
//! | `#` | wall (unwalkable) |
//! | `.` | open floor |
//! | `,` | grass, terrain `"grass"` |
//! | `~` | mud, terrain `"mud"` |
//! | `S` / `G` | optional start and goal, on open floor |
//!
//! The map's bottom-left corner sits at the world origin and +y points up,
//! so the first text row is the top of the world.

use anyhow::{Context, bail};
use gridnav_core::{Point, Vec2};
use gridnav_paths::{NavConfig, ObstacleSampler, TerrainClassifier};

pub const DEFAULT_MAP: &str = "\
########################################
#S.....,,,,,,.........#................#
#......,,,,,,.........#.....~~~~~......#
#......,,,,,,...#######.....~~~~~......#
#...............#...........~~~~~......#
#.......#########...........~~~~~......#
#.......#..............................#
#.......#.......~~~~~~~~.......#########
#.......#.......~~~~~~~~...............#
#...............~~~~~~~~.......,,,,,...#
#######.........~~~~~~~~.......,,,,,...#
#..............................,,,,,..G#
########################################";

/// Default penalties for the map's terrain categories.
pub fn with_map_terrain(config: NavConfig) -> NavConfig {
    config
        .with_terrain_penalty("grass", 5)
        .with_terrain_penalty("mud", 40)
}

/// A parsed ASCII map.
#[derive(Debug, Clone)]
pub struct AsciiMap {
    width: i32,
    height: i32,
    /// Row-major, bottom row first.
    tiles: Vec<u8>,
    start: Option<Point>,
    goal: Option<Point>,
}

impl AsciiMap {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            bail!("map is empty");
        };
        let width = first.len();
        let height = rows.len();

        let mut tiles = vec![b'.'; width * height];
        let mut start = None;
        let mut goal = None;
        for (row, line) in rows.iter().enumerate() {
            if line.len() != width {
                bail!(
                    "map row {} has {} columns, expected {width}",
                    row + 1,
                    line.len()
                );
            }
            let y = height - 1 - row;
            for (x, ch) in line.bytes().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let tile = match ch {
                    b'#' | b'.' | b',' | b'~' => ch,
                    b'S' => {
                        start = Some(p);
                        b'.'
                    }
                    b'G' => {
                        goal = Some(p);
                        b'.'
                    }
                    _ => bail!(
                        "unknown map character {:?} at row {}, column {}",
                        ch as char,
                        row + 1,
                        x + 1
                    ),
                };
                tiles[y * width + x] = tile;
            }
        }

        Ok(Self {
            width: width as i32,
            height: height as i32,
            tiles,
            start,
            goal,
        })
    }

    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading map {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing map {}", path.display()))
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// World-space centre of the `S` tile, if any.
    pub fn start(&self) -> Option<Vec2> {
        self.start.map(tile_centre)
    }

    /// World-space centre of the `G` tile, if any.
    pub fn goal(&self) -> Option<Vec2> {
        self.goal.map(tile_centre)
    }

    /// Tile at `p`; outside the map everything is wall.
    pub fn tile(&self, p: Point) -> u8 {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return b'#';
        }
        self.tiles[(p.y * self.width + p.x) as usize]
    }

    fn tile_at_world(&self, v: Vec2) -> u8 {
        self.tile(Point::new(v.x.floor() as i32, v.y.floor() as i32))
    }

    /// `base` resized so the world rectangle covers the map exactly.
    pub fn nav_config(&self, base: NavConfig) -> NavConfig {
        let size = Vec2::new(self.width as f32, self.height as f32);
        base.with_world(size * 0.5, size)
    }

    /// Draw the map with `path` and the positions `trail` passed through.
    ///
    /// Look points are `o`, the trail is `*`, and the first and last trail
    /// positions are `S` and `G`.
    pub fn render(&self, path: &[Vec2], trail: &[Vec2]) -> String {
        let mut chars = self.tiles.clone();
        let mut mark = |v: Vec2, ch: u8| {
            let x = (v.x.floor() as i32).clamp(0, self.width - 1);
            let y = (v.y.floor() as i32).clamp(0, self.height - 1);
            chars[(y * self.width + x) as usize] = ch;
        };
        for &v in trail {
            mark(v, b'*');
        }
        for &v in path {
            mark(v, b'o');
        }
        if let (Some(&first), Some(&last)) = (trail.first(), trail.last()) {
            mark(first, b'S');
            mark(last, b'G');
        }

        let mut out = String::with_capacity(chars.len() + self.height as usize);
        for y in (0..self.height).rev() {
            let row = &chars[(y * self.width) as usize..((y + 1) * self.width) as usize];
            out.extend(row.iter().map(|&b| b as char));
            out.push('\n');
        }
        out
    }
}

fn tile_centre(p: Point) -> Vec2 {
    Vec2::new(p.x as f32 + 0.5, p.y as f32 + 0.5)
}

impl ObstacleSampler for AsciiMap {
    fn overlaps(&self, centre: Vec2, radius: f32) -> bool {
        // Shrink slightly so a cell touching a wall edge does not count.
        let r = (radius - 1e-3).max(0.0);
        let x0 = (centre.x - r).floor() as i32;
        let x1 = (centre.x + r).floor() as i32;
        let y0 = (centre.y - r).floor() as i32;
        let y1 = (centre.y + r).floor() as i32;
        (y0..=y1).any(|y| (x0..=x1).any(|x| self.tile(Point::new(x, y)) == b'#'))
    }
}

impl TerrainClassifier for AsciiMap {
    fn classify(&self, point: Vec2) -> Option<&str> {
        match self.tile_at_world(point) {
            b',' => Some("grass"),
            b'~' => Some("mud"),
            _ => None,
        }
    }
}
