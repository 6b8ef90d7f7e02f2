//! The search: start combinations and the depth-first placement loop.
//!
//! Pieces with a point must land on the level's open point tiles, but there
//! are more point pieces than open points. The driver therefore enumerates
//! every way to assign point pieces to open points; each assignment becomes
//! the prefix of a piece priority list for one depth-first attempt. Prefix
//! pieces may only play their point side, later pieces play everything but
//! their point side, so no placement is ever tried twice across phases.
//!
//! The depth-first search itself keeps no recursion stack. Each piece owns a
//! resume cursor (side, i, j, rotation); descending resets nothing, and
//! backtracking into a piece undoes its placement and resumes iteration
//! right after the spot it previously accepted.

use log::debug;

use crate::board::{Board, Cursor};
use crate::checks::run_all_checks;
use crate::geometry::{Pos, BOARD_HEIGHT, BOARD_WIDTH};
use crate::pieces::{
    CORNER_1, CORNER_2, LINE2_1, LINE2_2, LINE3_1, LINE3_2, L_PIECE, MAX_NB_OF_SIDES_PER_PIECE,
    NB_OF_PIECES, PIECES, SQUARE, T_PIECE, Z_PIECE,
};

/// Upper bound on start combinations: 8 point pieces over at most 4 open
/// points peaks at C(8,4) = 70.
pub const MAX_NB_OF_COMBINATIONS: usize = 70;

/// Piece order used after the point-piece prefix: bulky, constrained pieces
/// first so contradictions surface near the root of the search tree.
const DEFAULT_PIECE_PRIORITY: [usize; NB_OF_PIECES] = [
    CORNER_1, Z_PIECE, SQUARE, CORNER_2, T_PIECE, L_PIECE, LINE3_2, LINE3_1, LINE2_2, LINE2_1,
];

/// All assignments of unplaced point pieces to the level's open points.
#[derive(Clone, Debug)]
pub struct StartCombinations {
    combinations: Vec<Vec<usize>>,
}

impl StartCombinations {
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    pub fn get(&self, combination_idx: usize) -> &[usize] {
        &self.combinations[combination_idx]
    }
}

/// Lexicographic k-subsets of `items`, in order. A k of zero yields the
/// single empty subset.
fn k_subsets(items: &[usize], k: usize) -> Vec<Vec<usize>> {
    let n = items.len();
    let mut subsets = Vec::new();
    if k == 0 {
        subsets.push(Vec::new());
        return subsets;
    }
    if k > n {
        return subsets;
    }

    let mut comb: Vec<usize> = (0..k).collect();
    loop {
        subsets.push(comb.iter().map(|&idx| items[idx]).collect());

        // advance to the next combination
        let mut slot = k - 1;
        loop {
            comb[slot] += 1;
            if comb[slot] <= n - k + slot {
                break;
            }
            if slot == 0 {
                return subsets;
            }
            slot -= 1;
        }
        for follow in slot + 1..k {
            comb[follow] = comb[follow - 1] + 1;
        }
    }
}

/// Enumerates the assignments of point-bearing pieces onto the level's open
/// points, for the given freshly initialised board.
pub fn determine_start_combinations(board: &Board) -> StartCombinations {
    let playable_point_pieces: Vec<usize> = (0..NB_OF_PIECES)
        .filter(|&piece_idx| {
            PIECES[piece_idx].has_point_on_first_side
                && board.piece(piece_idx).placement.is_none()
        })
        .collect();

    let nb_of_open_points = board.open_point_positions().len();
    let combinations = k_subsets(&playable_point_pieces, nb_of_open_points);
    debug_assert!(combinations.len() <= MAX_NB_OF_COMBINATIONS);

    StartCombinations { combinations }
}

/// Piece priority list and per-piece playable-side mask for one combination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinationData {
    /// Playable pieces in the order the search adds them: the combination's
    /// point pieces first, then the rest in the default priority order.
    pub piece_priority: Vec<usize>,
    /// `playable_sides[piece][side]`: prefix pieces may only play their point
    /// side, the others every side except a point side.
    pub playable_sides: [[bool; MAX_NB_OF_SIDES_PER_PIECE]; NB_OF_PIECES],
}

/// Builds the priority list and side masks for combination `combination_idx`.
///
/// Pieces already placed by level hints appear in neither the list nor the
/// masks.
pub fn load_combination_data(
    board: &Board,
    combinations: &StartCombinations,
    combination_idx: usize,
) -> CombinationData {
    let mut data = CombinationData {
        piece_priority: Vec::with_capacity(NB_OF_PIECES),
        playable_sides: [[false; MAX_NB_OF_SIDES_PER_PIECE]; NB_OF_PIECES],
    };

    let prefix = combinations.get(combination_idx);
    for &piece_idx in prefix {
        data.piece_priority.push(piece_idx);
        data.playable_sides[piece_idx] = [true, false, false];
    }

    for &piece_idx in &DEFAULT_PIECE_PRIORITY {
        if prefix.contains(&piece_idx) {
            continue;
        }
        if board.piece(piece_idx).placement.is_some() {
            // already on the board from the level hints
            continue;
        }
        data.piece_priority.push(piece_idx);
        data.playable_sides[piece_idx] =
            [!PIECES[piece_idx].has_point_on_first_side, true, true];
    }

    data
}

/// Final verdict of a solve.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolveOutcome {
    /// Every playable piece is on the board.
    Solved,
    /// Every combination was exhausted without filling the board.
    NoSolution,
    /// The observer asked to stop.
    Aborted,
}

/// Counters accumulated over one solve.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Placements that passed the validator and all enabled checks.
    pub valid_boards: u64,
    /// Calls into the board validator.
    pub attempted_placements: u64,
    /// Combinations entered, including the one that solved.
    pub combinations_tried: u32,
}

/// The depth-first solver for one board.
pub struct Solver {
    board: Board,
    combinations: StartCombinations,
    combination_idx: usize,
    data: CombinationData,
    piece_selected: i32,
    backtrack_iteration: bool,
    slow_checks_enabled: bool,
    stats: SearchStats,
}

impl Solver {
    /// Prepares a solve of `board`. With `slow_checks_enabled` false the
    /// pathfinding-based dead-end check is skipped after each placement.
    pub fn new(mut board: Board, slow_checks_enabled: bool) -> Self {
        let combinations = determine_start_combinations(&board);
        board.reset_cursors();
        let data = if combinations.is_empty() {
            CombinationData {
                piece_priority: Vec::new(),
                playable_sides: [[false; MAX_NB_OF_SIDES_PER_PIECE]; NB_OF_PIECES],
            }
        } else {
            load_combination_data(&board, &combinations, 0)
        };

        let stats = SearchStats {
            combinations_tried: if combinations.is_empty() { 0 } else { 1 },
            ..SearchStats::default()
        };

        Solver {
            board,
            combinations,
            combination_idx: 0,
            data,
            piece_selected: 0,
            backtrack_iteration: false,
            slow_checks_enabled,
            stats,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Runs the search to completion.
    pub fn solve(&mut self) -> SolveOutcome {
        self.solve_with(|_| true)
    }

    /// Runs the search, handing the board to `observer` after every accepted
    /// placement. Returning `false` from the observer aborts the solve; this
    /// is the hook the interactive visualiser paces and cancels through.
    pub fn solve_with(&mut self, mut observer: impl FnMut(&Board) -> bool) -> SolveOutcome {
        loop {
            if self.combination_idx >= self.combinations.len() {
                debug!(
                    "no solution: {} combinations exhausted",
                    self.combinations.len()
                );
                return SolveOutcome::NoSolution;
            }

            if self.piece_selected < 0 {
                // the first piece ran out of positions: this combination has
                // no solution, move on to the next one
                self.combination_idx += 1;
                if self.combination_idx >= self.combinations.len() {
                    continue;
                }
                debug!(
                    "combination {}/{}",
                    self.combination_idx + 1,
                    self.combinations.len()
                );
                self.data =
                    load_combination_data(&self.board, &self.combinations, self.combination_idx);
                self.board.reset_cursors();
                self.piece_selected = 0;
                self.backtrack_iteration = false;
                self.stats.combinations_tried += 1;
                continue;
            }

            if self.piece_selected as usize == self.data.piece_priority.len() {
                debug!(
                    "solved after {} valid boards, {} attempts",
                    self.stats.valid_boards, self.stats.attempted_placements
                );
                return SolveOutcome::Solved;
            }

            // re-entering a piece while backtracking: remove it before
            // iterating past its previous spot
            if self.backtrack_iteration {
                self.board.undo_last_piece();
            }

            let piece_idx = self.data.piece_priority[self.piece_selected as usize];
            if self.try_place(piece_idx) {
                self.piece_selected += 1;
                self.stats.valid_boards += 1;
                if !observer(&self.board) {
                    return SolveOutcome::Aborted;
                }
            } else {
                self.piece_selected -= 1;
                self.backtrack_iteration = true;
            }
        }
    }

    /// Iterates the piece's candidate placements in (side, i, j, rotation)
    /// order from its resume cursor. On success the cursor holds the accepted
    /// position state; on exhaustion every cursor field is back to zero.
    fn try_place(&mut self, piece_idx: usize) -> bool {
        let piece = &PIECES[piece_idx];
        let nb_of_sides = piece.sides.len();

        let mut side_idx = self.board.piece(piece_idx).cursor.side_idx;
        while side_idx < nb_of_sides {
            if self.data.playable_sides[piece_idx][side_idx] {
                let max_rotations = piece.sides[side_idx].max_nb_of_rotations;

                let mut i = self.board.piece(piece_idx).cursor.i;
                while i < BOARD_WIDTH {
                    let mut j = self.board.piece(piece_idx).cursor.j;
                    while j < BOARD_HEIGHT {
                        let base_pos = Pos::new(i, j);
                        // a base square already holding a normal tile can
                        // never accept the side's own base tile
                        if !self.board.is_position_occupied(base_pos) {
                            let mut rotation = self.board.piece(piece_idx).cursor.rotation;
                            while rotation < max_rotations {
                                // first iteration after a backtrack lands on
                                // the placement just undone; skip it
                                if self.backtrack_iteration {
                                    self.backtrack_iteration = false;
                                    rotation += 1;
                                    continue;
                                }

                                self.stats.attempted_placements += 1;
                                if self
                                    .board
                                    .add_piece(piece_idx, side_idx, base_pos, rotation)
                                    .is_ok()
                                {
                                    if run_all_checks(&self.board, self.slow_checks_enabled)
                                        .is_ok()
                                    {
                                        self.board.piece_mut(piece_idx).cursor = Cursor {
                                            side_idx,
                                            i,
                                            j,
                                            rotation,
                                        };
                                        return true;
                                    }
                                    self.board.undo_last_piece();
                                }
                                rotation += 1;
                            }
                        }
                        self.board.piece_mut(piece_idx).cursor.rotation = 0;
                        j += 1;
                    }
                    self.board.piece_mut(piece_idx).cursor.j = 0;
                    i += 1;
                }
                self.board.piece_mut(piece_idx).cursor.i = 0;
            }
            side_idx += 1;
        }
        self.board.piece_mut(piece_idx).cursor.side_idx = 0;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Placement;
    use crate::levels::{level_hints, LevelHints};

    fn board_for(level_num: u32) -> Board {
        Board::new(&level_hints(level_num).unwrap()).unwrap()
    }

    #[test]
    fn test_k_subsets_lexicographic() {
        let items = [10, 20, 30, 40];
        assert_eq!(
            k_subsets(&items, 2),
            vec![
                vec![10, 20],
                vec![10, 30],
                vec![10, 40],
                vec![20, 30],
                vec![20, 40],
                vec![30, 40],
            ]
        );
        assert_eq!(k_subsets(&items, 0), vec![Vec::<usize>::new()]);
        assert_eq!(k_subsets(&items, 5), Vec::<Vec<usize>>::new());
        assert_eq!(k_subsets(&items, 4), vec![vec![10, 20, 30, 40]]);
    }

    #[test]
    fn test_empty_hints_give_one_empty_combination() {
        let board = Board::new(&LevelHints::default()).unwrap();
        let combinations = determine_start_combinations(&board);

        assert_eq!(combinations.len(), 1);
        assert!(combinations.get(0).is_empty());

        let data = load_combination_data(&board, &combinations, 0);
        // every piece is playable, in the default priority order
        assert_eq!(data.piece_priority, DEFAULT_PIECE_PRIORITY.to_vec());
        // no prefix: point sides are off everywhere, other sides on
        for piece_idx in 0..NB_OF_PIECES {
            assert_eq!(
                data.playable_sides[piece_idx][0],
                !PIECES[piece_idx].has_point_on_first_side,
                "piece {piece_idx}",
            );
            assert!(data.playable_sides[piece_idx][1]);
        }
    }

    #[test]
    fn test_level_83_combinations() {
        let board = board_for(83);
        let combinations = determine_start_combinations(&board);

        // corner-1 and square are hint-placed; 6 point pieces remain for the
        // 2 open points
        assert_eq!(combinations.len(), 15);
        assert_eq!(combinations.get(0), &[LINE2_1, LINE2_2]);
        assert_eq!(combinations.get(14), &[CORNER_2, Z_PIECE]);
    }

    #[test]
    fn test_combination_prefix_masks() {
        let board = board_for(83);
        let combinations = determine_start_combinations(&board);
        let data = load_combination_data(&board, &combinations, 0);

        // prefix pieces first, then the default order minus placed pieces
        assert_eq!(
            data.piece_priority,
            vec![LINE2_1, LINE2_2, Z_PIECE, CORNER_2, T_PIECE, L_PIECE, LINE3_2, LINE3_1]
        );
        // prefix: point side only
        assert_eq!(data.playable_sides[LINE2_1], [true, false, false]);
        assert_eq!(data.playable_sides[LINE2_2], [true, false, false]);
        // point piece outside the prefix: everything but the point side
        assert_eq!(data.playable_sides[Z_PIECE], [false, true, true]);
        // no point anywhere: every side
        assert_eq!(data.playable_sides[T_PIECE], [true, true, true]);
        // hint-placed pieces are absent
        assert_eq!(data.playable_sides[CORNER_1], [false, false, false]);
        assert!(!data.piece_priority.contains(&CORNER_1));
        assert!(!data.piece_priority.contains(&SQUARE));
    }

    #[test]
    fn test_level_83_solves() {
        let mut solver = Solver::new(board_for(83), true);
        assert_eq!(solver.solve(), SolveOutcome::Solved);

        let board = solver.board();
        assert!(board.is_complete());
        assert_eq!(board.nb_of_added_pieces(), NB_OF_PIECES);
        for piece_idx in 0..NB_OF_PIECES {
            assert!(board.piece(piece_idx).placement.is_some(), "piece {piece_idx}");
        }
        // a complete board has exactly one normal tile per square and every
        // missing connection satisfied
        for flat in 0..crate::geometry::BOARD_TILES {
            let pos = Pos::from_flat(flat);
            let normal_tiles = board
                .tiles_at(pos)
                .filter(|t| !t.is_missing_connection())
                .count();
            assert_eq!(normal_tiles, 1, "square {pos:?}");
        }
        assert_eq!(crate::checks::run_all_checks(board, true), Ok(()));
    }

    #[test]
    fn test_level_83_solve_is_deterministic() {
        let run = || {
            let mut placements: Vec<(usize, Placement)> = Vec::new();
            let mut solver = Solver::new(board_for(83), true);
            let outcome = solver.solve_with(|board| {
                let piece_idx = board.last_added_piece().expect("observer runs after a placement");
                placements.push((
                    piece_idx,
                    board.piece(piece_idx).placement.expect("last added piece is placed"),
                ));
                true
            });
            (outcome, placements)
        };

        let (first_outcome, first_placements) = run();
        let (second_outcome, second_placements) = run();
        assert_eq!(first_outcome, SolveOutcome::Solved);
        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first_placements, second_placements);
    }

    #[test]
    fn test_smoke_empty_hints_runs_cleanly() {
        // with no hints there are no open points: every point side is masked
        // off and the search degenerates to an exhaustive sweep. Budget it
        // and require reproducible behaviour inside the budget.
        let run = || {
            let mut nb_of_boards = 0u32;
            let mut solver = Solver::new(Board::new(&LevelHints::default()).unwrap(), true);
            let outcome = solver.solve_with(|_| {
                nb_of_boards += 1;
                nb_of_boards < 5_000
            });
            (outcome, nb_of_boards)
        };

        let (first_outcome, first_count) = run();
        assert!(matches!(
            first_outcome,
            SolveOutcome::Solved | SolveOutcome::NoSolution | SolveOutcome::Aborted
        ));
        let (second_outcome, second_count) = run();
        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first_count, second_count);
    }

    #[test]
    fn test_observer_abort() {
        let mut solver = Solver::new(board_for(83), true);
        let outcome = solver.solve_with(|_| false);
        assert_eq!(outcome, SolveOutcome::Aborted);
    }
}
