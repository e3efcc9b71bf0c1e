//! Shared pieces of the mazepath demo: config loading and ASCII rendering.
//!
//! A rendered maze draws each cell as two characters framed by `+`, `-` and
//! `|` walls. Open borders are left blank.
//!
//! ```text
//! +--+--+
//! |**   |
//! +  +--+
//! |**|**|
//! +  +  +
//! |*****|
//! +--+--+
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use mazepath_core::{GridConfig, Point, Terrain};
use mazepath_maze::{Borders, Side};
use mazepath_paths::Graph;

/// A `WIDTHxHEIGHT` override from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `24x16`.
pub fn parse_size(s: &str) -> Result<GridSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad dimension {v:?}: {e}"))
    };
    Ok(GridSize {
        width: parse(w)?,
        height: parse(h)?,
    })
}

/// Read a JSON [`GridConfig`]. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<GridConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let cfg: GridConfig = serde_json::from_str(&text)?;
    Ok(cfg)
}

fn cell_body(graph: &Graph, path: &HashSet<Point>, p: Point) -> &'static str {
    if path.contains(&p) {
        return "**";
    }
    let terrain = graph
        .vertex_at(p)
        .and_then(|id| graph.vertex(id))
        .map(|v| v.terrain());
    match terrain {
        Some(Terrain::Wall) => "##",
        Some(Terrain::Sand) => "..",
        Some(Terrain::Space) => "  ",
        None => "??",
    }
}

/// Draw the maze with `path` overlaid.
pub fn render(graph: &Graph, borders: &Borders, path: &[Point]) -> String {
    let bounds = borders.bounds();
    let on_path: HashSet<Point> = path.iter().copied().collect();
    let mut out = String::new();

    out.push('+');
    for _ in bounds.min.x..bounds.max.x {
        out.push_str("--+");
    }
    out.push('\n');

    for y in bounds.min.y..bounds.max.y {
        out.push('|');
        for x in bounds.min.x..bounds.max.x {
            let p = Point::new(x, y);
            out.push_str(cell_body(graph, &on_path, p));
            let joined = borders.is_open(p, Side::Right);
            // Fill the gap between two path cells so the route reads as a line.
            let q = Point::new(x + 1, y);
            out.push(match (joined, on_path.contains(&p) && on_path.contains(&q)) {
                (true, true) => '*',
                (true, false) => ' ',
                (false, _) => '|',
            });
        }
        out.push('\n');

        out.push('+');
        for x in bounds.min.x..bounds.max.x {
            let p = Point::new(x, y);
            out.push_str(if borders.is_open(p, Side::Bottom) { "  " } else { "--" });
            out.push('+');
        }
        out.push('\n');
    }
    out
}
