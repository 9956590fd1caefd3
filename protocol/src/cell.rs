//! 棋子、格子与位置定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, BOARD_WIDTH};
use crate::error::GameError;

/// 玩家（执 X 或执 O）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 先手
    X,
    /// 后手
    O,
}

impl Player {
    /// 获取对方
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// 棋子符号
    pub fn symbol(&self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// 从符号解析（不区分大小写）
    pub fn from_symbol(c: char) -> Option<Player> {
        match c {
            'X' | 'x' => Some(Player::X),
            'O' | 'o' => Some(Player::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 格子状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// 占据该格的玩家
    pub fn occupant(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    /// 显示字符，空格用 `_`
    pub fn symbol(&self) -> char {
        self.occupant().map_or('_', |p| p.symbol())
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl From<Option<Player>> for Cell {
    fn from(player: Option<Player>) -> Self {
        player.map_or(Cell::Empty, Cell::from)
    }
}

impl From<Cell> for Option<Player> {
    fn from(cell: Cell) -> Self {
        cell.occupant()
    }
}

/// 棋盘位置（行优先索引 0..9）
///
/// 线上格式为单个整数，反序列化时同样检查边界。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    /// 创建新位置，越界返回 None
    pub fn new(index: usize) -> Option<Self> {
        if index < BOARD_SIZE {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(index: u8) -> Self {
        Self(index)
    }

    /// 从行列创建
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_WIDTH && col < BOARD_WIDTH {
            Self::new(row * BOARD_WIDTH + col)
        } else {
            None
        }
    }

    /// 数组索引
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// 行 (0-2)
    pub fn row(&self) -> usize {
        self.index() / BOARD_WIDTH
    }

    /// 列 (0-2)
    pub fn col(&self) -> usize {
        self.index() % BOARD_WIDTH
    }

    /// 遍历全部 9 个位置（升序）
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8).map(Position)
    }
}

impl TryFrom<u8> for Position {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index as usize).ok_or(GameError::InvalidPosition {
            index: index as usize,
        })
    }
}

impl From<Position> for u8 {
    fn from(pos: Position) -> Self {
        pos.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.0, self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
    }

    #[test]
    fn test_player_symbol() {
        assert_eq!(Player::from_symbol('x'), Some(Player::X));
        assert_eq!(Player::from_symbol('O'), Some(Player::O));
        assert_eq!(Player::from_symbol('_'), None);
        assert_eq!(Player::X.to_string(), "X");
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(Cell::from(Player::O), Cell::O);
        assert_eq!(Cell::from(None), Cell::Empty);
        assert_eq!(Option::<Player>::from(Cell::X), Some(Player::X));
        assert!(Cell::default().is_empty());
        assert_eq!(Cell::Empty.symbol(), '_');
    }

    #[test]
    fn test_position_valid() {
        assert!(Position::new(0).is_some());
        assert!(Position::new(8).is_some());
        assert!(Position::new(9).is_none());
    }

    #[test]
    fn test_position_row_col() {
        let pos = Position::new(5).unwrap();
        assert_eq!((pos.row(), pos.col()), (1, 2));
        assert_eq!(Position::from_row_col(2, 0), Position::new(6));
        assert_eq!(Position::from_row_col(3, 0), None);
        assert_eq!(Position::all().count(), 9);
    }

    #[test]
    fn test_position_wire_checks_bounds() {
        let pos: Position = serde_json::from_str("8").unwrap();
        assert_eq!(pos.index(), 8);
        assert_eq!(serde_json::to_string(&pos).unwrap(), "8");

        assert!(serde_json::from_str::<Position>("9").is_err());
        assert!(serde_json::from_str::<Position>("200").is_err());
        assert_eq!(
            Position::try_from(200u8),
            Err(GameError::InvalidPosition { index: 200 })
        );
    }
}
