//! Level hint data.
//!
//! A level provides up to three kinds of hints: pieces already placed on the
//! board, obligatory tiles that constrain what may be stamped on a square,
//! and the subset of obligatory point tiles that start the level open (not
//! yet covered by a hint piece). Coordinates are 0-based (i, j) with
//! i in 0..8 and j in 0..4; connection directions use the clockwise
//! right/down/left/up encoding.
//!
//! The retail game numbers its expert levels 49 to 120. Levels without an
//! encoded entry resolve to an empty hint set, which turns the solver into a
//! plain exhaustive search over the full inventory.

use crate::geometry::{Direction, Pos};
use crate::pieces::{TileType, CORNER_1, SQUARE};

/// First level number accepted by the solver.
pub const FIRST_LEVEL: u32 = 49;
/// Last level number accepted by the solver.
pub const LAST_LEVEL: u32 = 120;

/// Maximum number of open obligatory point tiles a level can declare.
pub const MAX_NB_OF_OPEN_POINT_TILES_PER_LEVEL: usize = 6;

/// Inputs of one pre-placed piece, in `Board::add_piece` argument order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PieceAddInfo {
    pub piece_idx: usize,
    pub side_idx: usize,
    pub base_pos: Pos,
    pub rotation: u8,
}

/// One obligatory tile constraint from the level sheet.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HintTile {
    pub tile_type: TileType,
    pub pos: Pos,
    /// Ordered connection directions; empty for point hints, whose single
    /// connection may face any direction.
    pub connections: &'static [Direction],
}

/// All hints for one level.
#[derive(Clone, Debug, Default)]
pub struct LevelHints {
    pub pieces: Vec<PieceAddInfo>,
    pub tiles: Vec<HintTile>,
    /// Indices into `tiles` of the obligatory point tiles that start open.
    pub open_point_indices: Vec<usize>,
}

impl LevelHints {
    /// Positions of the open obligatory point tiles.
    pub fn open_point_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.open_point_indices.iter().map(|&idx| self.tiles[idx].pos)
    }
}

/// Returns the hints for `level_num`, or `None` outside the supported range.
///
/// Levels inside the range without encoded data yield an empty hint set.
pub fn level_hints(level_num: u32) -> Option<LevelHints> {
    if !(FIRST_LEVEL..=LAST_LEVEL).contains(&level_num) {
        return None;
    }

    let hints = match level_num {
        83 => LevelHints {
            pieces: vec![
                PieceAddInfo {
                    piece_idx: CORNER_1,
                    side_idx: 0,
                    base_pos: Pos::new(2, 1),
                    rotation: 2,
                },
                PieceAddInfo {
                    piece_idx: SQUARE,
                    side_idx: 0,
                    base_pos: Pos::new(6, 0),
                    rotation: 1,
                },
            ],
            tiles: vec![
                HintTile { tile_type: TileType::Point, pos: Pos::new(0, 3), connections: &[] },
                HintTile { tile_type: TileType::Point, pos: Pos::new(7, 3), connections: &[] },
                HintTile { tile_type: TileType::Point, pos: Pos::new(2, 1), connections: &[] },
                HintTile { tile_type: TileType::Point, pos: Pos::new(6, 0), connections: &[] },
            ],
            open_point_indices: vec![0, 1],
        },
        _ => LevelHints::default(),
    };

    Some(hints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{NB_OF_PIECES, PIECES};

    #[test]
    fn test_level_range() {
        assert!(level_hints(48).is_none());
        assert!(level_hints(121).is_none());
        assert!(level_hints(49).is_some());
        assert!(level_hints(120).is_some());
    }

    #[test]
    fn test_level_83_hints() {
        let hints = level_hints(83).unwrap();
        assert_eq!(hints.pieces.len(), 2);
        assert_eq!(hints.tiles.len(), 4);
        assert_eq!(
            hints.open_point_positions().collect::<Vec<_>>(),
            vec![Pos::new(0, 3), Pos::new(7, 3)],
        );
    }

    #[test]
    fn test_encoded_hints_are_well_formed() {
        for level_num in FIRST_LEVEL..=LAST_LEVEL {
            let hints = level_hints(level_num).unwrap();
            for info in &hints.pieces {
                assert!(info.piece_idx < NB_OF_PIECES);
                assert!(info.side_idx < PIECES[info.piece_idx].sides.len());
                assert!(info.rotation < 4);
                assert!(info.base_pos.is_inside_board());
            }
            for tile in &hints.tiles {
                assert!(tile.pos.is_inside_board());
            }
            for &idx in &hints.open_point_indices {
                assert_eq!(hints.tiles[idx].tile_type, TileType::Point);
            }
            // every open point must be coverable by an unplaced point piece
            let placed: Vec<usize> = hints.pieces.iter().map(|p| p.piece_idx).collect();
            let unplaced_point_pieces = PIECES
                .iter()
                .enumerate()
                .filter(|(idx, p)| p.has_point_on_first_side && !placed.contains(idx))
                .count();
            assert!(hints.open_point_indices.len() <= unplaced_point_pieces);
        }
    }
}
