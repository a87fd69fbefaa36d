use std::convert::TryFrom;

/// Any of the directions needed for Sokoban.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// All directions
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Return the opposite direction.
    pub fn reverse(self) -> Self {
        use self::Direction::*;
        match self {
            Left => Right,
            Right => Left,
            Up => Down,
            Down => Up,
        }
    }

    /// The unit step as `(rows, columns)`.
    pub fn offset(self) -> (isize, isize) {
        use self::Direction::*;
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    /// The letter used in the move log.
    pub fn to_char(self) -> char {
        use self::Direction::*;
        match self {
            Up => 'U',
            Down => 'D',
            Left => 'L',
            Right => 'R',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = char;

    /// Accepts both cases, so moves and pushes in LURD notation map to their direction.
    fn try_from(c: char) -> Result<Direction, char> {
        use self::Direction::*;
        Ok(match c {
            'u' | 'U' => Up,
            'd' | 'D' => Down,
            'l' | 'L' => Left,
            'r' | 'R' => Right,
            _ => return Err(c),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reverse_cancels_offset() {
        for &dir in &DIRECTIONS {
            let (dr, dc) = dir.offset();
            let (rr, rc) = dir.reverse().offset();
            assert_eq!((dr + rr, dc + rc), (0, 0));
            assert_eq!(dir.reverse().reverse(), dir);
        }
    }

    #[test]
    fn letters() {
        for &dir in &DIRECTIONS {
            assert_eq!(Direction::try_from(dir.to_char()), Ok(dir));
            assert_eq!(
                Direction::try_from(dir.to_char().to_ascii_lowercase()),
                Ok(dir)
            );
        }
        assert_eq!(Direction::try_from('x'), Err('x'));
    }
}
