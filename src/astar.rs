//! Bounded A* pathfinding over the board.
//!
//! Used by the dead-end check to prove that two open path endpoints can
//! still be linked. The search runs over a caller-owned classification
//! matrix: squares start as `NoInfo` and are resolved against the board on
//! first contact (a square holding a normal tile is a wall), so repeated
//! calls on the same board share the discovered walls. Reaching any `Target`
//! square ends the search, not just the nominal target, which only steers
//! the heuristic.
//!
//! The open set is a singly-linked list kept sorted by ascending f-score,
//! ties broken by ascending h-score, drawn from a fixed arena. With the
//! g-score comparison preventing re-expansion, the arena bound of ten nodes
//! per square is never approached in practice.

use crate::board::Board;
use crate::geometry::{Pos, BOARD_TILES, DIRECTIONS};

/// Pathfinding view of one square.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SquareKind {
    /// Not resolved yet; the board decides on first contact.
    #[default]
    NoInfo,
    /// Traversable.
    Clear,
    /// Not traversable (the square holds a normal tile).
    Wall,
    /// Traversable, and reaching it ends the search.
    Target,
}

/// Per-square classification shared between pathfinding calls.
pub type ClassificationMatrix = [SquareKind; BOARD_TILES];

const ARENA_CAPACITY: usize = BOARD_TILES * 10;

#[derive(Clone, Copy)]
struct OpenSetNode {
    f: i32,
    h: i32,
    pos: Pos,
    next: Option<u16>,
}

const PLACEHOLDER_NODE: OpenSetNode = OpenSetNode {
    f: 0,
    h: 0,
    pos: Pos::new(0, 0),
    next: None,
};

/// Finds a path from `start_pos` to any `Target` square of the
/// classification matrix, steering towards `target_pos`.
///
/// Returns the position the search terminated on, or `None` when the open
/// set drains without reaching a target. Unknown squares are classified
/// against `board` and cached back into `classification`.
pub fn find_a_path(
    board: &Board,
    start_pos: Pos,
    target_pos: Pos,
    classification: &mut ClassificationMatrix,
) -> Option<Pos> {
    let start_flat = start_pos.flat()?;

    let mut g_score = [i32::MAX; BOARD_TILES];
    g_score[start_flat] = 0;

    let mut arena = [PLACEHOLDER_NODE; ARENA_CAPACITY];
    let start_h = start_pos.manhattan_dist(target_pos);
    arena[0] = OpenSetNode {
        f: start_h,
        h: start_h,
        pos: start_pos,
        next: None,
    };
    let mut nb_of_nodes: usize = 1;
    let mut first: Option<u16> = Some(0);

    while let Some(current_idx) = first {
        let current = arena[current_idx as usize];
        let current_flat = current.pos.flat().expect("open-set positions are on the board");

        if classification[current_flat] == SquareKind::Target {
            return Some(current.pos);
        }

        first = current.next;

        for direction in DIRECTIONS {
            let neighbour_pos = current.pos.step(direction);
            let Some(neighbour_flat) = neighbour_pos.flat() else {
                continue;
            };

            if classification[neighbour_flat] == SquareKind::Target {
                return Some(neighbour_pos);
            }

            // anti-backtracking: only strictly better g-scores go on
            let tentative_g = g_score[current_flat] + 1;
            if tentative_g >= g_score[neighbour_flat] {
                continue;
            }

            match classification[neighbour_flat] {
                SquareKind::Wall => continue,
                SquareKind::NoInfo => {
                    if board.is_position_occupied(neighbour_pos) {
                        classification[neighbour_flat] = SquareKind::Wall;
                        continue;
                    }
                    classification[neighbour_flat] = SquareKind::Clear;
                }
                SquareKind::Clear | SquareKind::Target => {}
            }

            g_score[neighbour_flat] = tentative_g;

            if nb_of_nodes == ARENA_CAPACITY {
                // unreachable under the g-score guard; bail out rather than wrap
                debug_assert!(false, "a-star arena exhausted");
                return None;
            }
            let new_idx = nb_of_nodes as u16;
            nb_of_nodes += 1;

            let h = neighbour_pos.manhattan_dist(target_pos);
            let mut node = OpenSetNode {
                f: tentative_g + h,
                h,
                pos: neighbour_pos,
                next: None,
            };

            // sorted insert: ascending f, then ascending h among equal f
            let Some(head_idx) = first else {
                arena[new_idx as usize] = node;
                first = Some(new_idx);
                continue;
            };
            let head = &arena[head_idx as usize];
            if node.f < head.f || (node.f == head.f && node.h <= head.h) {
                node.next = first;
                arena[new_idx as usize] = node;
                first = Some(new_idx);
                continue;
            }

            let mut prev = head_idx;
            while let Some(next_idx) = arena[prev as usize].next {
                if node.f <= arena[next_idx as usize].f {
                    break;
                }
                prev = next_idx;
            }
            while let Some(next_idx) = arena[prev as usize].next {
                if node.f < arena[next_idx as usize].f {
                    break;
                }
                if node.h <= arena[next_idx as usize].h {
                    break;
                }
                prev = next_idx;
            }
            node.next = arena[prev as usize].next;
            arena[new_idx as usize] = node;
            arena[prev as usize].next = Some(new_idx);
        }
    }

    // every reachable square explored, no target found
    None
}
