//! Board persistence.
//!
//! Only the tiles an operator placed that matter for a search are stored;
//! a freshly built grid already starts empty.
//!
//! ## File format (`*.pth`)
//!
//! ```text
//! <size>
//! Tile(<col>, <row>, <CODE>)
//! ...
//! ```
//!
//! One `Tile` line per `Block` (`B`) or `Target` (`T`) tile, written in scan
//! order. Loading accepts the lines in any order and skips blank lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::geom::Point;
use crate::grid::Grid;
use crate::tile::TileKind;

/// Conventional board file extension.
pub const EXTENSION: &str = "pth";

/// Errors that can occur when reading a board.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("board i/o: {0}")]
    Io(#[from] io::Error),
    /// The file has no size line.
    #[error("board is missing its size line")]
    MissingSize,
    /// The size line is not a number, or the number is not a valid size.
    #[error("invalid board size \u{201c}{0}\u{201d}")]
    InvalidSize(String),
    /// A tile line does not follow `Tile(<col>, <row>, <CODE>)`.
    #[error("line {line}: malformed tile entry \u{201c}{text}\u{201d}")]
    MalformedLine { line: usize, text: String },
    /// A well-formed line names a kind that is not stored in boards.
    #[error("line {line}: unsupported tile kind \u{201c}{code}\u{201d}")]
    UnknownKind { line: usize, code: String },
    /// A tile lies outside the declared size.
    #[error("line {line}: tile {pos} is outside a board of size {size}")]
    OutOfBounds { line: usize, pos: Point, size: i32 },
}

/// Write `grid` in board format.
pub fn encode<W: Write>(grid: &Grid, mut w: W) -> io::Result<()> {
    writeln!(w, "{}", grid.size())?;
    for tile in grid.iter().filter(|t| t.kind.is_persisted()) {
        writeln!(w, "{tile}")?;
    }
    w.flush()
}

/// Parse a board into a new grid.
///
/// Nothing is returned unless the whole input is valid, so callers can swap
/// the result in without ever seeing a half-loaded board.
pub fn decode<R: BufRead>(r: R) -> Result<Grid, BoardError> {
    let mut lines = r.lines();

    let size_line = lines.next().ok_or(BoardError::MissingSize)??;
    let size_text = size_line.trim();
    if size_text.is_empty() {
        return Err(BoardError::MissingSize);
    }
    let size: i32 = size_text
        .parse()
        .map_err(|_| BoardError::InvalidSize(size_text.to_string()))?;
    let mut grid = Grid::new(size).map_err(|_| BoardError::InvalidSize(size_text.to_string()))?;

    for (i, line) in lines.enumerate() {
        let line = line?;
        let lineno = i + 2;
        let text = line.trim_end();
        if text.is_empty() {
            continue;
        }
        let Some((pos, code)) = parse_tile(text) else {
            return Err(BoardError::MalformedLine {
                line: lineno,
                text: text.to_string(),
            });
        };
        let kind = match code {
            "B" => TileKind::Block,
            "T" => TileKind::Target,
            _ => {
                return Err(BoardError::UnknownKind {
                    line: lineno,
                    code: code.to_string(),
                });
            }
        };
        if !grid.contains(pos) {
            return Err(BoardError::OutOfBounds {
                line: lineno,
                pos,
                size,
            });
        }
        grid.set_kind(pos, kind);
    }

    Ok(grid)
}

/// Save `grid` to `path`.
pub fn save(grid: &Grid, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    encode(grid, BufWriter::new(File::create(path)?))?;
    log::debug!("saved {}x{} board to {}", grid.size(), grid.size(), path.display());
    Ok(())
}

/// Load a grid from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Grid, BoardError> {
    let path = path.as_ref();
    let grid = decode(BufReader::new(File::open(path)?))?;
    log::debug!("loaded {}x{} board from {}", grid.size(), grid.size(), path.display());
    Ok(grid)
}

/// Match `Tile(<digits>, <digits>, <UPPERCASE_LETTERS>)`.
fn parse_tile(s: &str) -> Option<(Point, &str)> {
    let body = s.strip_prefix("Tile(")?.strip_suffix(')')?;
    let mut parts = body.split(", ");
    let x = parse_digits(parts.next()?)?;
    let y = parse_digits(parts.next()?)?;
    let code = parts.next()?;
    if parts.next().is_some() || code.is_empty() || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    Some((Point::new(x, y), code))
}

fn parse_digits(s: &str) -> Option<i32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        let mut g = Grid::new(5).unwrap();
        g.set_kind(Point::new(0, 0), TileKind::Target);
        g.set_kind(Point::new(4, 4), TileKind::Target);
        g.set_kind(Point::new(2, 1), TileKind::Block);
        g.set_kind(Point::new(2, 3), TileKind::Block);
        g.set_kind(Point::new(1, 1), TileKind::Visited);
        g.set_kind(Point::new(3, 3), TileKind::Path);
        g.set_label(Point::new(3, 3), Some(2));
        g
    }

    fn encoded(g: &Grid) -> String {
        let mut out = Vec::new();
        encode(g, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn encode_writes_blocks_and_targets_in_scan_order() {
        assert_eq!(
            encoded(&sample()),
            "5\nTile(0, 0, T)\nTile(2, 1, B)\nTile(2, 3, B)\nTile(4, 4, T)\n"
        );
    }

    #[test]
    fn decode_restores_user_tiles_only() {
        let g = decode(encoded(&sample()).as_bytes()).unwrap();
        let mut expected = sample();
        expected.reset(true);
        assert_eq!(g, expected);
    }

    #[test]
    fn decode_accepts_any_order_and_blank_lines() {
        let g = decode("3\n\nTile(2, 2, T)\r\nTile(0, 0, T)\n\n".as_bytes()).unwrap();
        assert_eq!(g.targets(), vec![Point::new(0, 0), Point::new(2, 2)]);
    }

    #[test]
    fn empty_input_is_missing_size() {
        assert!(matches!(decode("".as_bytes()), Err(BoardError::MissingSize)));
        assert!(matches!(decode("\n".as_bytes()), Err(BoardError::MissingSize)));
    }

    #[test]
    fn bad_sizes() {
        assert!(matches!(decode("abc\n".as_bytes()), Err(BoardError::InvalidSize(s)) if s == "abc"));
        assert!(matches!(decode("1\n".as_bytes()), Err(BoardError::InvalidSize(_))));
        assert!(matches!(decode("46341\n".as_bytes()), Err(BoardError::InvalidSize(s)) if s == "46341"));
        assert!(matches!(decode("40000\nTile(0, 0, T)\n".as_bytes()), Err(BoardError::InvalidSize(_))));
    }

    #[test]
    fn malformed_lines_report_line_number() {
        for bad in [
            "Tile(1,1,B)",
            "Tile(1, 1, b)",
            "Tile(-1, 1, B)",
            "Tile(1, 1, B",
            "tile(1, 1, B)",
            "Tile(1, 1, B, T)",
            "Tile(1, 1, )",
        ] {
            let input = format!("4\nTile(0, 0, T)\n{bad}\n");
            match decode(input.as_bytes()) {
                Err(BoardError::MalformedLine { line, text }) => {
                    assert_eq!(line, 3);
                    assert_eq!(text, bad);
                }
                other => panic!("{bad}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn unsupported_kind() {
        let err = decode("4\nTile(1, 1, V)\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BoardError::UnknownKind { line: 2, code } if code == "V"));
    }

    #[test]
    fn out_of_bounds_tile() {
        let err = decode("3\nTile(3, 0, B)\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            BoardError::OutOfBounds { line: 2, pos, size: 3 } if pos == Point::new(3, 0)
        ));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("board.{EXTENSION}"));
        let g = sample();
        save(&g, &path).unwrap();
        let back = load(&path).unwrap();
        assert_eq!(back.size(), g.size());
        assert_eq!(back.targets(), g.targets());
        assert_eq!(
            back.positions_of(TileKind::Block),
            g.positions_of(TileKind::Block)
        );
        assert!(
            back.iter()
                .filter(|t| !t.kind.is_persisted())
                .all(|t| t.kind == TileKind::Empty && t.label.is_none())
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path().join("nope.pth")),
            Err(BoardError::Io(_))
        ));
    }
}
