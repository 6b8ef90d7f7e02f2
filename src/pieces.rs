//! The game piece catalogue and the placement transform.
//!
//! Each of the 10 pieces is an ordered list of playable sides; each side is a
//! rigid cluster of tiles built from a small set of elementary tile types
//! (point, line, bend, empty), plus the missing-connection tiles it stamps
//! down and a halo of border positions used by the post-placement checks.
//!
//! All of this is static data. The catalogue holds relative positions and
//! base-orientation connection directions; [`Side::blit`] turns a side into
//! absolute board tiles for a given base position and rotation. Live state
//! (where a piece currently sits, search cursors) belongs to the board, not
//! to the catalogue.

use crate::geometry::Direction::{Down, Left, Right, Up};
use crate::geometry::{Direction, Pos};

/// Elementary tile types.
///
/// `MissingConnection` is special: it does not occupy a square by itself, it
/// declares that a future neighbouring tile must connect into this square
/// from a specific direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileType {
    /// Endpoint of a path, exactly one connection.
    Point,
    /// Two aligned connections.
    Line,
    /// Two connections at a right angle.
    Bend,
    /// No connections at all.
    Empty,
    /// Placeholder demanding a future connection; carries exactly one direction.
    MissingConnection,
}

/// Maximum number of connections a single tile can carry.
pub const MAX_NB_OF_CONNECTIONS_PER_TILE: usize = 4;
/// Maximum number of normal tiles on one side.
pub const MAX_NB_OF_TILES_PER_SIDE: usize = 4;
/// Maximum number of missing-connection tiles on one side.
pub const MAX_NB_OF_MISSING_CONNECTIONS_PER_SIDE: usize = 4;
/// Maximum number of playable sides per piece.
pub const MAX_NB_OF_SIDES_PER_PIECE: usize = 3;

/// Number of pieces in the game inventory.
pub const NB_OF_PIECES: usize = 10;

pub const LINE2_1: usize = 0;
pub const LINE2_2: usize = 1;
pub const LINE3_1: usize = 2;
pub const LINE3_2: usize = 3;
pub const CORNER_1: usize = 4;
pub const CORNER_2: usize = 5;
pub const SQUARE: usize = 6;
pub const L_PIECE: usize = 7;
pub const T_PIECE: usize = 8;
pub const Z_PIECE: usize = 9;

/// A catalogue tile: side-relative position, base-orientation connections.
#[derive(Clone, Copy)]
pub struct RelTile {
    pub tile_type: TileType,
    pub rel_pos: Pos,
    pub connections: &'static [Direction],
}

const fn tile(tile_type: TileType, i: i32, j: i32, connections: &'static [Direction]) -> RelTile {
    RelTile {
        tile_type,
        rel_pos: Pos::new(i, j),
        connections,
    }
}

const fn missing(i: i32, j: i32, connection: &'static [Direction]) -> RelTile {
    tile(TileType::MissingConnection, i, j, connection)
}

/// One playable side of a piece.
///
/// `max_nb_of_rotations` is below 4 for sides whose stamp maps onto itself
/// under a half turn, so the search never tries isomorphic rotations.
///
/// `loop_prone_missing_connections` indexes into `missing_connections`: the
/// tiles from which the side's internal path exits at another open end of the
/// same side. Only these can close a connection loop when the side is placed,
/// so only these are walked by the loop check.
#[derive(Clone, Copy)]
pub struct Side {
    pub tiles: &'static [RelTile],
    pub missing_connections: &'static [RelTile],
    pub border: &'static [Pos],
    pub max_nb_of_rotations: u8,
    pub loop_prone_missing_connections: &'static [usize],
}

/// A piece is an ordered list of sides.
///
/// In the actual game inventory there is at most one point per piece, always
/// on the first side when present.
#[derive(Clone, Copy)]
pub struct Piece {
    pub name: &'static str,
    pub has_point_on_first_side: bool,
    pub sides: &'static [Side],
}

const fn pos(i: i32, j: i32) -> Pos {
    Pos::new(i, j)
}

/// The full 10-piece game inventory.
///
/// Connection directions are always encoded in clockwise priority order
/// (right, down, left, up); the obligatory-tile comparison in the board
/// validator relies on this ordering being consistent across the catalogue
/// and the level data.
pub static PIECES: [Piece; NB_OF_PIECES] = [
    // two-cell piece: point + bend, an all-empty back, a full straight line
    Piece {
        name: "line2-1",
        has_point_on_first_side: true,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Point, 0, 0, &[Right]),
                    tile(TileType::Bend, 1, 0, &[Down, Left]),
                ],
                missing_connections: &[missing(1, 1, &[Up])],
                border: &[pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, 0), pos(1, 1), pos(0, 1)],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Empty, 0, 0, &[]),
                    tile(TileType::Empty, 1, 0, &[]),
                ],
                missing_connections: &[],
                border: &[pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, 0), pos(1, 1), pos(0, 1)],
                max_nb_of_rotations: 2,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Line, 0, 0, &[Right, Left]),
                    tile(TileType::Line, 1, 0, &[Right, Left]),
                ],
                missing_connections: &[missing(-1, 0, &[Right]), missing(2, 0, &[Left])],
                border: &[pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, 0), pos(1, 1), pos(0, 1)],
                max_nb_of_rotations: 2,
                loop_prone_missing_connections: &[0, 1],
            },
        ],
    },
    // two-cell piece: point + line, and the single-tile straight that is the
    // only filler for a line-shaped double missing connection
    Piece {
        name: "line2-2",
        has_point_on_first_side: true,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Point, 0, 0, &[Right]),
                    tile(TileType::Line, 1, 0, &[Right, Left]),
                ],
                missing_connections: &[missing(2, 0, &[Left])],
                border: &[pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, 0), pos(1, 1), pos(0, 1)],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Empty, 0, 0, &[]),
                    tile(TileType::Empty, 1, 0, &[]),
                ],
                missing_connections: &[],
                border: &[pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, 0), pos(1, 1), pos(0, 1)],
                max_nb_of_rotations: 2,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Line, 0, 0, &[Down, Up]),
                    tile(TileType::Empty, 1, 0, &[]),
                ],
                missing_connections: &[missing(0, -1, &[Down]), missing(0, 1, &[Up])],
                border: &[pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, 0), pos(1, 1), pos(0, 1)],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
        ],
    },
    // three-cell straight piece with a point at one end
    Piece {
        name: "line3-1",
        has_point_on_first_side: true,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Point, 0, 0, &[Right]),
                    tile(TileType::Line, 1, 0, &[Right, Left]),
                    tile(TileType::Line, 2, 0, &[Right, Left]),
                ],
                missing_connections: &[missing(3, 0, &[Left])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, -1),
                    pos(3, 0), pos(2, 1), pos(1, 1), pos(0, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Empty, 0, 0, &[]),
                    tile(TileType::Empty, 1, 0, &[]),
                    tile(TileType::Empty, 2, 0, &[]),
                ],
                missing_connections: &[],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, -1),
                    pos(3, 0), pos(2, 1), pos(1, 1), pos(0, 1),
                ],
                max_nb_of_rotations: 2,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Line, 0, 0, &[Right, Left]),
                    tile(TileType::Line, 1, 0, &[Right, Left]),
                    tile(TileType::Bend, 2, 0, &[Left, Up]),
                ],
                missing_connections: &[missing(-1, 0, &[Right]), missing(2, -1, &[Down])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, -1),
                    pos(3, 0), pos(2, 1), pos(1, 1), pos(0, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
        ],
    },
    // three-cell straight piece with the point in the middle
    Piece {
        name: "line3-2",
        has_point_on_first_side: true,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Empty, 0, 0, &[]),
                    tile(TileType::Point, 1, 0, &[Right]),
                    tile(TileType::Bend, 2, 0, &[Left, Up]),
                ],
                missing_connections: &[missing(2, -1, &[Down])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, -1),
                    pos(3, 0), pos(2, 1), pos(1, 1), pos(0, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Empty, 0, 0, &[]),
                    tile(TileType::Empty, 1, 0, &[]),
                    tile(TileType::Empty, 2, 0, &[]),
                ],
                missing_connections: &[],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, -1),
                    pos(3, 0), pos(2, 1), pos(1, 1), pos(0, 1),
                ],
                max_nb_of_rotations: 2,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Empty, 0, 0, &[]),
                    tile(TileType::Bend, 1, 0, &[Right, Down]),
                    tile(TileType::Line, 2, 0, &[Right, Left]),
                ],
                missing_connections: &[missing(1, 1, &[Up]), missing(3, 0, &[Left])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, -1),
                    pos(3, 0), pos(2, 1), pos(1, 1), pos(0, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
        ],
    },
    // corner piece, point on the short arm
    Piece {
        name: "corner-1",
        has_point_on_first_side: true,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Point, 0, 0, &[Right]),
                    tile(TileType::Line, 0, 1, &[Right, Left]),
                    tile(TileType::Line, 1, 1, &[Right, Left]),
                ],
                missing_connections: &[
                    missing(1, 0, &[Left]),
                    missing(-1, 1, &[Right]),
                    missing(2, 1, &[Left]),
                ],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, 0), pos(2, 1),
                    pos(1, 2), pos(0, 2), pos(-1, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[1, 2],
            },
            Side {
                tiles: &[
                    tile(TileType::Line, 0, 0, &[Down, Up]),
                    tile(TileType::Bend, 0, 1, &[Left, Up]),
                    tile(TileType::Bend, -1, 1, &[Right, Up]),
                ],
                missing_connections: &[missing(0, -1, &[Down]), missing(-1, 0, &[Down])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, 0), pos(1, 1),
                    pos(0, 2), pos(-1, 2), pos(-2, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
        ],
    },
    // corner piece, point on the long arm
    Piece {
        name: "corner-2",
        has_point_on_first_side: true,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Point, 0, 0, &[Down]),
                    tile(TileType::Bend, 0, 1, &[Right, Up]),
                    tile(TileType::Line, 1, 1, &[Right, Left]),
                ],
                missing_connections: &[missing(2, 1, &[Left])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, 0), pos(2, 1),
                    pos(1, 2), pos(0, 2), pos(-1, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Line, 0, 0, &[Down, Up]),
                    tile(TileType::Bend, 0, 1, &[Left, Up]),
                    tile(TileType::Line, -1, 1, &[Right, Left]),
                ],
                missing_connections: &[missing(0, -1, &[Down]), missing(-2, 1, &[Right])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, 0), pos(1, 1),
                    pos(0, 2), pos(-1, 2), pos(-2, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
        ],
    },
    // 2x2 square piece
    Piece {
        name: "square",
        has_point_on_first_side: true,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Point, 0, 0, &[Down]),
                    tile(TileType::Line, 0, 1, &[Down, Up]),
                    tile(TileType::Bend, 1, 0, &[Right, Down]),
                    tile(TileType::Line, 1, 1, &[Down, Up]),
                ],
                missing_connections: &[
                    missing(0, 2, &[Up]),
                    missing(1, 2, &[Up]),
                    missing(2, 0, &[Left]),
                ],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, 0),
                    pos(2, 1), pos(1, 2), pos(0, 2), pos(-1, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[1, 2],
            },
            Side {
                tiles: &[
                    tile(TileType::Bend, 1, 0, &[Left, Up]),
                    tile(TileType::Bend, 0, 0, &[Right, Down]),
                    tile(TileType::Bend, 0, 1, &[Right, Up]),
                    tile(TileType::Line, 1, 1, &[Right, Left]),
                ],
                missing_connections: &[missing(1, -1, &[Down]), missing(2, 1, &[Left])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, 0),
                    pos(2, 1), pos(1, 2), pos(0, 2), pos(-1, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
        ],
    },
    // L-shaped piece, no point
    Piece {
        name: "l-piece",
        has_point_on_first_side: false,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Bend, 0, 0, &[Down, Left]),
                    tile(TileType::Line, 0, 1, &[Down, Up]),
                    tile(TileType::Bend, 0, 2, &[Right, Up]),
                    tile(TileType::Bend, 1, 2, &[Left, Up]),
                ],
                missing_connections: &[missing(-1, 0, &[Right]), missing(1, 1, &[Down])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, 0), pos(1, 1), pos(2, 2),
                    pos(1, 3), pos(0, 3), pos(-1, 2), pos(-1, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
            Side {
                tiles: &[
                    tile(TileType::Bend, 0, 0, &[Down, Left]),
                    tile(TileType::Line, 0, 1, &[Down, Up]),
                    tile(TileType::Bend, 0, 2, &[Left, Up]),
                    tile(TileType::Line, -1, 2, &[Right, Left]),
                ],
                missing_connections: &[missing(-1, 0, &[Right]), missing(-2, 2, &[Right])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, 0), pos(1, 1), pos(1, 2),
                    pos(0, 3), pos(-1, 3), pos(-2, 2), pos(-1, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
        ],
    },
    // T-shaped piece, no point; its second side carries the only bend tile
    // that can fill a bend-shaped double missing connection
    Piece {
        name: "t-piece",
        has_point_on_first_side: false,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Bend, 0, 0, &[Right, Down]),
                    tile(TileType::Bend, 1, 0, &[Down, Left]),
                    tile(TileType::Line, 0, 1, &[Down, Up]),
                    tile(TileType::Empty, -1, 0, &[]),
                ],
                missing_connections: &[missing(0, 2, &[Up]), missing(1, 1, &[Up])],
                border: &[
                    pos(-2, 0), pos(-1, -1), pos(0, -1), pos(1, -1),
                    pos(2, 0), pos(1, 1), pos(0, 2), pos(-1, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
            Side {
                tiles: &[
                    tile(TileType::Line, 0, 0, &[Right, Left]),
                    tile(TileType::Line, -1, 0, &[Right, Left]),
                    tile(TileType::Bend, 1, 0, &[Down, Left]),
                    tile(TileType::Bend, 0, 1, &[Down, Left]),
                ],
                missing_connections: &[
                    missing(1, 1, &[Up]),
                    missing(0, 2, &[Up]),
                    missing(-1, 1, &[Right]),
                    missing(-2, 0, &[Right]),
                ],
                border: &[
                    pos(-2, 0), pos(-1, -1), pos(0, -1), pos(1, -1),
                    pos(2, 0), pos(1, 1), pos(0, 2), pos(-1, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1, 2, 3],
            },
        ],
    },
    // Z-shaped piece with a point
    Piece {
        name: "z-piece",
        has_point_on_first_side: true,
        sides: &[
            Side {
                tiles: &[
                    tile(TileType::Bend, 0, 0, &[Right, Down]),
                    tile(TileType::Point, 1, 0, &[Left]),
                    tile(TileType::Line, 0, 1, &[Down, Up]),
                    tile(TileType::Empty, -1, 1, &[]),
                ],
                missing_connections: &[missing(0, 2, &[Up])],
                border: &[
                    pos(-1, 0), pos(0, -1), pos(1, -1), pos(2, 0),
                    pos(1, 1), pos(0, 2), pos(-1, 2), pos(-2, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[],
            },
            Side {
                tiles: &[
                    tile(TileType::Line, 0, 0, &[Right, Left]),
                    tile(TileType::Bend, -1, 0, &[Right, Down]),
                    tile(TileType::Empty, 0, 1, &[]),
                    tile(TileType::Empty, 1, 1, &[]),
                ],
                missing_connections: &[missing(-1, 1, &[Up]), missing(1, 0, &[Left])],
                border: &[
                    pos(-2, 0), pos(-1, -1), pos(0, -1), pos(1, 0),
                    pos(2, 1), pos(1, 2), pos(0, 2), pos(-1, 1),
                ],
                max_nb_of_rotations: 4,
                loop_prone_missing_connections: &[0, 1],
            },
        ],
    },
];

/// An ordered list of connection directions, rotated to board orientation.
#[derive(Clone, Copy, Debug)]
pub struct Connections {
    dirs: [Direction; MAX_NB_OF_CONNECTIONS_PER_TILE],
    len: u8,
}

impl Connections {
    pub const EMPTY: Self = Self {
        dirs: [Right; MAX_NB_OF_CONNECTIONS_PER_TILE],
        len: 0,
    };

    /// Builds the list from catalogue directions rotated by `rotation`
    /// quarter turns. Rotation permutes each entry in place, preserving the
    /// encoding order of the catalogue.
    pub fn rotated(base: &[Direction], rotation: u8) -> Self {
        let mut dirs = [Right; MAX_NB_OF_CONNECTIONS_PER_TILE];
        for (slot, dir) in dirs.iter_mut().zip(base) {
            *slot = dir.rotate(rotation);
        }
        Self {
            dirs,
            len: base.len() as u8,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Direction] {
        &self.dirs[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, dir: Direction) -> bool {
        self.as_slice().contains(&dir)
    }

    /// First listed direction; only valid for tiles with connections.
    #[inline]
    pub fn first(&self) -> Direction {
        self.dirs[0]
    }
}

impl PartialEq for Connections {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Connections {}

/// A tile blitted to absolute board coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tile {
    pub tile_type: TileType,
    pub pos: Pos,
    pub connections: Connections,
}

impl Tile {
    #[inline]
    pub fn is_missing_connection(&self) -> bool {
        self.tile_type == TileType::MissingConnection
    }
}

impl RelTile {
    /// Absolute position of this tile for a base position and rotation.
    #[inline]
    pub fn blit_pos(&self, base_pos: Pos, rotation: u8) -> Pos {
        self.rel_pos.rotate(rotation).translate(base_pos)
    }

    /// Connection directions rotated to board orientation.
    ///
    /// Kept separate from [`RelTile::blit_pos`] so the validator can bail on
    /// an out-of-bounds position before paying for the direction rotation.
    #[inline]
    pub fn blit_connections(&self, rotation: u8) -> Connections {
        Connections::rotated(self.connections, rotation)
    }
}

/// A fully transformed side: every normal and missing-connection tile at
/// absolute board coordinates.
#[derive(Clone, Copy, Debug)]
pub struct BlitSide {
    tiles: [Tile; MAX_NB_OF_TILES_PER_SIDE],
    nb_of_tiles: u8,
    missing_connections: [Tile; MAX_NB_OF_MISSING_CONNECTIONS_PER_SIDE],
    nb_of_missing_connections: u8,
}

impl BlitSide {
    pub const EMPTY: Self = Self {
        tiles: [EMPTY_TILE; MAX_NB_OF_TILES_PER_SIDE],
        nb_of_tiles: 0,
        missing_connections: [EMPTY_TILE; MAX_NB_OF_MISSING_CONNECTIONS_PER_SIDE],
        nb_of_missing_connections: 0,
    };

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles[..self.nb_of_tiles as usize]
    }

    #[inline]
    pub fn missing_connections(&self) -> &[Tile] {
        &self.missing_connections[..self.nb_of_missing_connections as usize]
    }

    #[inline]
    pub(crate) fn push_tile(&mut self, tile: Tile) {
        self.tiles[self.nb_of_tiles as usize] = tile;
        self.nb_of_tiles += 1;
    }

    #[inline]
    pub(crate) fn push_missing_connection(&mut self, tile: Tile) {
        self.missing_connections[self.nb_of_missing_connections as usize] = tile;
        self.nb_of_missing_connections += 1;
    }
}

const EMPTY_TILE: Tile = Tile {
    tile_type: TileType::Empty,
    pos: Pos::new(0, 0),
    connections: Connections::EMPTY,
};

impl Side {
    /// Rotates and translates every tile of the side to absolute board
    /// coordinates.
    ///
    /// Returns `None` the moment any tile leaves the board; no partial result
    /// escapes in that case.
    pub fn blit(&self, base_pos: Pos, rotation: u8) -> Option<BlitSide> {
        let mut out = BlitSide::EMPTY;

        for rel in self.missing_connections {
            let pos = rel.blit_pos(base_pos, rotation);
            if !pos.is_inside_board() {
                return None;
            }
            out.push_missing_connection(Tile {
                tile_type: rel.tile_type,
                pos,
                connections: rel.blit_connections(rotation),
            });
        }
        for rel in self.tiles {
            let pos = rel.blit_pos(base_pos, rotation);
            if !pos.is_inside_board() {
                return None;
            }
            out.push_tile(Tile {
                tile_type: rel.tile_type,
                pos,
                connections: rel.blit_connections(rotation),
            });
        }

        Some(out)
    }

    /// Absolute positions of the side's border halo. Positions that fall
    /// outside the board are yielded as-is; callers skip them.
    pub fn border_positions(&self, base_pos: Pos, rotation: u8) -> impl Iterator<Item = Pos> + '_ {
        self.border
            .iter()
            .map(move |rel| rel.rotate(rotation).translate(base_pos))
    }
}
