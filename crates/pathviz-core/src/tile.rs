//! The [`Tile`] type: a single grid cell with a kind and a display label.

use std::fmt;

use crate::geom::Point;

/// What a tile currently is.
///
/// `Empty`, `Block` and `Target` are set by the operator; `Visited`,
/// `VisitedAlt` and `Path` are written by a running search and wiped by a
/// search reset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Empty,
    Block,
    Target,
    /// Closed by a search.
    Visited,
    /// On the A* open frontier.
    VisitedAlt,
    Path,
}

impl TileKind {
    /// One-letter code used by the board format and text dumps.
    pub const fn code(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Block => 'B',
            Self::Target => 'T',
            Self::Visited => 'V',
            Self::VisitedAlt => 'O',
            Self::Path => 'P',
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            '.' => Self::Empty,
            'B' => Self::Block,
            'T' => Self::Target,
            'V' => Self::Visited,
            'O' => Self::VisitedAlt,
            'P' => Self::Path,
            _ => return None,
        })
    }

    /// Kinds an operator may paint onto the board.
    #[inline]
    pub const fn is_user_kind(self) -> bool {
        matches!(self, Self::Empty | Self::Block | Self::Target)
    }

    /// Kinds produced by a search and cleared by a search reset.
    #[inline]
    pub const fn is_search_kind(self) -> bool {
        matches!(self, Self::Visited | Self::VisitedAlt | Self::Path)
    }

    /// Kinds written to board files.
    #[inline]
    pub const fn is_persisted(self) -> bool {
        matches!(self, Self::Block | Self::Target)
    }
}

/// One addressable grid cell.
///
/// The position is fixed at creation; only the kind and label change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pos: Point,
    pub kind: TileKind,
    /// Search distance or step number. Display only.
    pub label: Option<i32>,
}

impl Tile {
    /// Create an empty, unlabeled tile at `pos`.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            kind: TileKind::Empty,
            label: None,
        }
    }

    /// Set the kind (builder).
    #[inline]
    pub const fn with_kind(mut self, kind: TileKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    /// The label as display text; empty when unset.
    pub fn label_text(&self) -> String {
        self.label.map(|l| l.to_string()).unwrap_or_default()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}, {}, {})", self.pos.x, self.pos.y, self.kind.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in [
            TileKind::Empty,
            TileKind::Block,
            TileKind::Target,
            TileKind::Visited,
            TileKind::VisitedAlt,
            TileKind::Path,
        ] {
            assert_eq!(TileKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(TileKind::from_code('x'), None);
    }

    #[test]
    fn kind_classes_are_disjoint() {
        assert!(TileKind::Block.is_user_kind());
        assert!(!TileKind::Block.is_search_kind());
        assert!(TileKind::VisitedAlt.is_search_kind());
        assert!(!TileKind::Path.is_user_kind());
        assert!(!TileKind::Empty.is_persisted());
    }

    #[test]
    fn display_matches_board_grammar() {
        let t = Tile::new(Point::new(3, 12)).with_kind(TileKind::Target);
        assert_eq!(t.to_string(), "Tile(3, 12, T)");
    }

    #[test]
    fn label_text() {
        let mut t = Tile::new(Point::ZERO);
        assert_eq!(t.label_text(), "");
        t.label = Some(-1);
        assert_eq!(t.label_text(), "-1");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn tile_round_trip() {
        let mut t = Tile::new(Point::new(2, 5)).with_kind(TileKind::Path);
        t.label = Some(3);
        let json = serde_json::to_string(&t).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
