//! 2D positioning and direction utilities.
//!
//! A board square can be addressed two ways: as a `Pos` (i horizontal,
//! j vertical, like pixel coordinates with (0,0) top-left and j growing
//! downwards), or as a flat index obtained by laying every row end to end.
//! `Pos` is what the rotation matrices operate on; flat indices are what the
//! board iterates over.

/// Board width in squares.
pub const BOARD_WIDTH: i32 = 8;
/// Board height in squares.
pub const BOARD_HEIGHT: i32 = 4;
/// Total number of squares on the board.
pub const BOARD_TILES: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// A 2D square position (or a displacement between squares).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Pos {
    pub i: i32,
    pub j: i32,
}

impl Pos {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// True when the position lands inside the 8x4 board.
    #[inline]
    pub fn is_inside_board(self) -> bool {
        self.i >= 0 && self.j >= 0 && self.i < BOARD_WIDTH && self.j < BOARD_HEIGHT
    }

    /// Converts to a flat index, or `None` when outside the board.
    #[inline]
    pub fn flat(self) -> Option<usize> {
        if self.is_inside_board() {
            Some((self.i + self.j * BOARD_WIDTH) as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Pos::flat`]; `flat_pos` must be in `0..BOARD_TILES`.
    #[inline]
    pub fn from_flat(flat_pos: usize) -> Self {
        Self {
            i: flat_pos as i32 % BOARD_WIDTH,
            j: flat_pos as i32 / BOARD_WIDTH,
        }
    }

    /// Rotates the position by `rotation` quarter turns clockwise around the origin.
    #[inline]
    pub fn rotate(self, rotation: u8) -> Self {
        ROTATION_MATRICES[rotation as usize].apply(self)
    }

    #[inline]
    pub fn translate(self, vector: Pos) -> Self {
        Self {
            i: self.i + vector.i,
            j: self.j + vector.j,
        }
    }

    /// One step in `direction`; may leave the board.
    #[inline]
    pub fn step(self, direction: Direction) -> Self {
        self.translate(direction.offset())
    }

    #[inline]
    pub fn manhattan_dist(self, other: Pos) -> i32 {
        (self.i - other.i).abs() + (self.j - other.j).abs()
    }
}

/// 2x2 integer rotation matrix.
#[derive(Clone, Copy)]
pub struct RotationMatrix {
    pub m0: i32,
    pub m1: i32,
    pub m2: i32,
    pub m3: i32,
}

impl RotationMatrix {
    #[inline]
    fn apply(self, pos: Pos) -> Pos {
        Pos {
            i: pos.i * self.m0 + pos.j * self.m1,
            j: pos.i * self.m2 + pos.j * self.m3,
        }
    }
}

/// Rotation matrices from the base direction (right) to each direction,
/// indexed by the number of clockwise quarter turns.
///
/// The 90-degree entry maps the i unit vector to j and the j unit vector to
/// -i; the others are its powers.
pub const ROTATION_MATRICES: [RotationMatrix; 4] = [
    RotationMatrix { m0: 1, m1: 0, m2: 0, m3: 1 },
    RotationMatrix { m0: 0, m1: -1, m2: 1, m3: 0 },
    RotationMatrix { m0: -1, m1: 0, m2: 0, m3: -1 },
    RotationMatrix { m0: 0, m1: 1, m2: -1, m3: 0 },
];

/// Number of elementary directions.
pub const NB_OF_DIRECTIONS: u8 = 4;

/// One of the four cardinal directions, encoded as indexes increasing
/// clockwise starting from right.
///
/// Tile connections, rotation amounts and neighbour offsets all share this
/// encoding, so a direction doubles as an index into the movement table and
/// the rotation matrices.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Direction {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

/// All four directions in clockwise order, starting from right.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

impl Direction {
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_index(index: u8) -> Self {
        DIRECTIONS[(index % NB_OF_DIRECTIONS) as usize]
    }

    /// Opposite direction, e.g. `Right.reverse() == Left`.
    #[inline]
    pub fn reverse(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Rotates clockwise by `nb_of_quarter_turns`, e.g. `Right.rotate(1) == Down`.
    #[inline]
    pub fn rotate(self, nb_of_quarter_turns: u8) -> Self {
        Self::from_index(self.index() + nb_of_quarter_turns)
    }

    /// Unit displacement of one step in this direction.
    #[inline]
    pub fn offset(self) -> Pos {
        match self {
            Direction::Right => Pos::new(1, 0),
            Direction::Down => Pos::new(0, 1),
            Direction::Left => Pos::new(-1, 0),
            Direction::Up => Pos::new(0, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_conversion_roundtrip() {
        for flat_pos in 0..BOARD_TILES {
            let pos = Pos::from_flat(flat_pos);
            assert!(pos.is_inside_board());
            assert_eq!(pos.flat(), Some(flat_pos), "roundtrip failed for {flat_pos}");
        }
    }

    #[test]
    fn test_flat_rejects_outside_positions() {
        assert_eq!(Pos::new(-1, 0).flat(), None);
        assert_eq!(Pos::new(0, -1).flat(), None);
        assert_eq!(Pos::new(BOARD_WIDTH, 0).flat(), None);
        assert_eq!(Pos::new(0, BOARD_HEIGHT).flat(), None);
    }

    #[test]
    fn test_rotation_and_inverse_is_identity() {
        let samples = [Pos::new(0, 0), Pos::new(2, 1), Pos::new(-1, 2), Pos::new(3, -2)];
        for k in 0..NB_OF_DIRECTIONS {
            for &pos in &samples {
                assert_eq!(pos.rotate(k).rotate((4 - k) % 4), pos, "rotation {k}");
            }
        }
    }

    #[test]
    fn test_direction_rotation_matches_position_rotation() {
        // a direction rotated by k must equal the rotated offset vector
        for dir in DIRECTIONS {
            for k in 0..NB_OF_DIRECTIONS {
                assert_eq!(dir.rotate(k).offset(), dir.offset().rotate(k));
            }
        }
    }

    #[test]
    fn test_reverse_direction() {
        assert_eq!(Direction::Right.reverse(), Direction::Left);
        assert_eq!(Direction::Down.reverse(), Direction::Up);
        assert_eq!(Direction::Left.reverse(), Direction::Right);
        assert_eq!(Direction::Up.reverse(), Direction::Down);
    }

    #[test]
    fn test_step_follows_screen_coordinates() {
        // j grows downwards, like pixel coordinates
        let pos = Pos::new(3, 2);
        assert_eq!(pos.step(Direction::Right), Pos::new(4, 2));
        assert_eq!(pos.step(Direction::Down), Pos::new(3, 3));
        assert_eq!(pos.step(Direction::Left), Pos::new(2, 2));
        assert_eq!(pos.step(Direction::Up), Pos::new(3, 1));
    }
}
