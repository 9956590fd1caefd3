//! 棋盘状态
//!
//! 所有查询都是对棋盘的纯读取，胜负结果每次按需重新计算。

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Player, Position};
use crate::constants::{BOARD_SIZE, BOARD_WIDTH, FIRST_PLAYER, WINNING_LINES};
use crate::error::GameError;

/// 获胜连线（三个位置）
pub type WinningLine = [Position; 3];

/// 对局结果（由棋盘推导，不单独存储）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// 进行中
    InProgress,
    /// 某方获胜
    Win(Player),
    /// 和棋
    Draw,
}

impl GameOutcome {
    /// 是否已分出结果
    pub fn is_concluded(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(*player),
            _ => None,
        }
    }
}

/// 棋盘
///
/// 线上格式为长度 9 的数组，元素是 `"X"`、`"O"` 或 `null`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Option<Player>>", try_from = "Vec<Option<Player>>")]
pub struct Board {
    /// 3x3 棋盘，索引为 row * 3 + col
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self::default()
    }

    /// 从格子数组创建
    pub fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// 获取指定位置的格子
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// 设置指定位置的格子（不检查规则）
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// 落子，格子已被占用时返回错误
    pub fn place(&mut self, pos: Position, player: Player) -> Result<(), GameError> {
        if !self.get(pos).is_empty() {
            return Err(GameError::CellOccupied { index: pos.index() });
        }
        self.set(pos, player.into());
        Ok(())
    }

    /// 返回落子后的新棋盘，原棋盘不变（不检查规则）
    pub fn with_move(&self, pos: Position, player: Player) -> Board {
        let mut next = *self;
        next.set(pos, player.into());
        next
    }

    /// 所有格子
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// 指定玩家的棋子数
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| c.occupant() == Some(player))
            .count()
    }

    /// 所有空格（升序）
    pub fn legal_moves(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.get(pos).is_empty()).collect()
    }

    /// 按固定顺序扫描 8 条连线，返回第一条被同一方占满的连线及其占有者
    fn first_completed_line(&self) -> Option<(WinningLine, Player)> {
        WINNING_LINES.iter().find_map(|&line| {
            let [a, b, c] = line;
            let player = self.get(a).occupant()?;
            if self.get(b).occupant() == Some(player) && self.get(c).occupant() == Some(player) {
                Some((line, player))
            } else {
                None
            }
        })
    }

    /// 胜者
    pub fn winner(&self) -> Option<Player> {
        self.first_completed_line().map(|(_, player)| player)
    }

    /// 获胜连线（用于高亮显示）
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.first_completed_line().map(|(line, _)| line)
    }

    /// 和棋：棋盘已满且无人获胜
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// 当前结果
    pub fn outcome(&self) -> GameOutcome {
        match self.winner() {
            Some(player) => GameOutcome::Win(player),
            None if self.is_full() => GameOutcome::Draw,
            None => GameOutcome::InProgress,
        }
    }

    /// 转换为线上格式
    pub fn to_wire(&self) -> Vec<Option<Player>> {
        self.cells.iter().map(|c| c.occupant()).collect()
    }
}

impl From<Board> for Vec<Option<Player>> {
    fn from(board: Board) -> Self {
        board.to_wire()
    }
}

impl TryFrom<Vec<Option<Player>>> for Board {
    type Error = GameError;

    fn try_from(cells: Vec<Option<Player>>) -> Result<Self, Self::Error> {
        if cells.len() != BOARD_SIZE {
            return Err(GameError::InvalidBoard {
                reason: format!("expected {} cells, got {}", BOARD_SIZE, cells.len()),
            });
        }
        let mut board = Board::empty();
        for (pos, player) in Position::all().zip(cells) {
            board.set(pos, player.into());
        }
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, chunk) in self.cells.chunks(BOARD_WIDTH).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// 完整的棋盘状态（包含走子方、步数）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub current_turn: Player,
    /// 已走步数
    pub move_count: u32,
}

impl BoardState {
    /// 创建初始状态
    pub fn initial() -> Self {
        Self {
            board: Board::empty(),
            current_turn: FIRST_PLAYER,
            move_count: 0,
        }
    }

    /// 从棋盘创建状态
    pub fn from_board(board: Board, current_turn: Player) -> Self {
        let move_count = (board.count(Player::X) + board.count(Player::O)) as u32;
        Self {
            board,
            current_turn,
            move_count,
        }
    }

    /// 切换走子方
    pub fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// 当前结果
    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}
