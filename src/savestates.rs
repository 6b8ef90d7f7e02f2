//! Per-depth board snapshots for an external visualiser.
//!
//! A snapshot records the add inputs of every search-placed piece (hint
//! pieces are never recorded, the level always restores them). The
//! visualiser saves one snapshot per accepted board at each depth, then
//! scrubs back and forth by replaying them.

use log::warn;

use crate::board::{Board, Cursor, PlacementError};
use crate::levels::PieceAddInfo;
use crate::pieces::NB_OF_PIECES;

/// One snapshot slot per possible search depth.
pub const MAX_DEPTH: usize = NB_OF_PIECES;
/// Snapshots kept per depth before new ones are dropped.
pub const MAX_SAVESTATES_PER_DEPTH: usize = 1500;

type SaveState = Vec<PieceAddInfo>;

/// Bounded store of board snapshots, bucketed by search depth.
#[derive(Debug)]
pub struct SaveStates {
    per_depth: Vec<Vec<SaveState>>,
}

impl Default for SaveStates {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveStates {
    pub fn new() -> Self {
        SaveStates {
            per_depth: (0..MAX_DEPTH).map(|_| Vec::new()).collect(),
        }
    }

    pub fn nb_at_depth(&self, depth: usize) -> usize {
        self.per_depth[depth].len()
    }

    /// Records the current board at `depth` (its number of added pieces,
    /// hint pieces included). Drops the snapshot when the depth bucket is
    /// full.
    pub fn save(&mut self, board: &Board, depth: usize) {
        let bucket = &mut self.per_depth[depth];
        if bucket.len() >= MAX_SAVESTATES_PER_DEPTH {
            warn!("savestate bucket full at depth {depth}");
            return;
        }

        let snapshot: SaveState = board.added_records()[board.nb_of_level_pieces()..depth]
            .iter()
            .map(|record| {
                let placement = board
                    .piece(record.piece_idx)
                    .placement
                    .expect("recorded piece is placed");
                PieceAddInfo {
                    piece_idx: record.piece_idx,
                    side_idx: placement.side_idx,
                    base_pos: placement.base_pos,
                    rotation: placement.rotation,
                }
            })
            .collect();
        bucket.push(snapshot);
    }

    /// Forgets every snapshot strictly deeper than `similarity_depth`.
    pub fn reset_from_depth(&mut self, similarity_depth: usize) {
        for bucket in self.per_depth.iter_mut().skip(similarity_depth + 1) {
            bucket.clear();
        }
    }

    /// Clears all buckets.
    pub fn reset_all(&mut self) {
        for bucket in &mut self.per_depth {
            bucket.clear();
        }
    }

    /// Rebuilds the board from the chosen snapshot: strips it back to its
    /// hint pieces, then replays the recorded placements.
    pub fn restore(
        &self,
        board: &mut Board,
        depth: usize,
        savestate_idx: usize,
    ) -> Result<(), PlacementError> {
        clean_board_pieces(board);
        for info in &self.per_depth[depth][savestate_idx] {
            board.add_piece(info.piece_idx, info.side_idx, info.base_pos, info.rotation)?;
        }
        Ok(())
    }
}

/// Undoes every search-placed piece, leaving only the level's hint pieces,
/// and resets the cursors of the removed pieces.
pub fn clean_board_pieces(board: &mut Board) {
    while board.nb_of_added_pieces() > board.nb_of_level_pieces() {
        let piece_idx = board.last_added_piece().expect("pieces remain to undo");
        board.undo_last_piece();
        board.piece_mut(piece_idx).cursor = Cursor::default();
    }
}
