//! Circuit Puzzle Solver Library
//!
//! Solver core for an 8x4 circuit-building puzzle: a level pre-places some
//! pieces and pins down obligatory tiles, and the solver stamps the rest of
//! the fixed 10-piece inventory so that every square is covered, every point
//! terminates exactly one path, every connection demand is met and no path
//! closes into a loop.
//!
//! The search is a cursor-based depth-first sweep over placements, driven
//! per assignment of point pieces to the level's open points. Three
//! post-placement checks (isolated empty squares, endpoint reachability via
//! pathfinding, loop detection) prune it down to milliseconds on real
//! levels.

pub mod astar;
pub mod board;
pub mod checks;
pub mod geometry;
pub mod levels;
pub mod pieces;
pub mod savestates;
pub mod solver;
