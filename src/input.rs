use macroquad::input::KeyCode;

/// Facing / movement direction. Discriminants index the sprite's frame strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the top of the screen
    Up = 0,
    /// Towards the right of the screen
    Right = 1,
    /// Towards the bottom of the screen
    Down = 2,
    /// Towards the left of the screen
    Left = 3,
}

impl Direction {
    /// All directions in strip order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Strip index, `0..4`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Map an arrow key to its direction; every other key maps to `None`.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            _ => None,
        }
    }

    /// Arrow key bound to this direction.
    pub const fn key(self) -> KeyCode {
        match self {
            Direction::Up => KeyCode::Up,
            Direction::Right => KeyCode::Right,
            Direction::Down => KeyCode::Down,
            Direction::Left => KeyCode::Left,
        }
    }
}
