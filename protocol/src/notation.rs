//! 棋盘记法解析和生成
//!
//! 格式：`<棋盘> [走子方]`
//!
//! 示例：
//! `XO_/_X_/__O o`
//!
//! 棋盘按行从上到下，`/` 分隔可省略；走子方省略时按双方棋子数推断。

use crate::board::{Board, BoardState};
use crate::cell::{Cell, Player, Position};
use crate::constants::{BOARD_SIZE, BOARD_WIDTH};
use crate::error::GameError;

/// 空棋盘记法
pub const EMPTY_NOTATION: &str = "___/___/___ x";

/// 棋盘记法处理
pub struct Notation;

impl Notation {
    /// 解析记法字符串为棋盘状态
    pub fn parse(text: &str) -> Result<BoardState, GameError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.is_empty() || parts.len() > 2 {
            return Err(GameError::InvalidNotation {
                reason: format!("expected `<board> [side]`, got {:?}", text),
            });
        }

        let board = Self::parse_board(parts[0])?;

        let current_turn = match parts.get(1) {
            Some(side) => {
                let mut chars = side.chars();
                match (chars.next().and_then(Player::from_symbol), chars.next()) {
                    (Some(player), None) => player,
                    _ => {
                        return Err(GameError::InvalidNotation {
                            reason: format!("invalid side to move: {}", side),
                        })
                    }
                }
            }
            None => Self::infer_turn(&board),
        };

        Ok(BoardState::from_board(board, current_turn))
    }

    /// 解析棋盘部分
    pub fn parse_board(board_str: &str) -> Result<Board, GameError> {
        let rows: Vec<&str> = board_str.split('/').collect();
        if rows.len() != 1 && rows.len() != BOARD_WIDTH {
            return Err(GameError::InvalidNotation {
                reason: format!("expected {} rows, got {}", BOARD_WIDTH, rows.len()),
            });
        }
        if rows.len() == BOARD_WIDTH {
            if let Some((idx, row)) = rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.chars().count() != BOARD_WIDTH)
            {
                return Err(GameError::InvalidNotation {
                    reason: format!("row {} has {} cells, expected 3", idx, row.chars().count()),
                });
            }
        }

        let symbols: Vec<char> = rows.concat().chars().collect();
        if symbols.len() != BOARD_SIZE {
            return Err(GameError::InvalidNotation {
                reason: format!("expected {} cells, got {}", BOARD_SIZE, symbols.len()),
            });
        }

        let mut board = Board::empty();
        for (pos, c) in Position::all().zip(symbols) {
            let cell = match c {
                '_' | '.' | '-' => Cell::Empty,
                _ => match Player::from_symbol(c) {
                    Some(player) => player.into(),
                    None => {
                        return Err(GameError::InvalidNotation {
                            reason: format!("invalid cell character: {}", c),
                        })
                    }
                },
            };
            board.set(pos, cell);
        }

        Ok(board)
    }

    /// 将棋盘状态转换为记法字符串
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {}",
            Self::board_to_string(&state.board),
            state.current_turn.symbol().to_ascii_lowercase()
        )
    }

    /// 将棋盘转换为记法（不含走子方）
    pub fn board_to_string(board: &Board) -> String {
        board
            .cells()
            .chunks(BOARD_WIDTH)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// 按棋子数推断走子方：数量相等时轮到先手
    fn infer_turn(board: &Board) -> Player {
        if board.count(Player::X) > board.count(Player::O) {
            Player::O
        } else {
            Player::X
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let state = Notation::parse(EMPTY_NOTATION).unwrap();
        assert_eq!(state, BoardState::initial());
    }

    #[test]
    fn test_parse_with_side() {
        let state = Notation::parse("OO_/XX_/___ o").unwrap();
        assert_eq!(state.current_turn, Player::O);
        assert_eq!(state.move_count, 4);
        assert_eq!(state.board.get(Position::new(0).unwrap()), Cell::O);
        assert_eq!(state.board.get(Position::new(4).unwrap()), Cell::X);
        assert_eq!(state.board.get(Position::new(2).unwrap()), Cell::Empty);
    }

    #[test]
    fn test_parse_flat_and_inferred_side() {
        let state = Notation::parse("X___O___X").unwrap();
        assert_eq!(state.current_turn, Player::O);

        let state = Notation::parse("X___O____").unwrap();
        assert_eq!(state.current_turn, Player::X);
    }

    #[test]
    fn test_roundtrip() {
        let text = "XO_/_X_/__O x";
        let state = Notation::parse(text).unwrap();
        assert_eq!(Notation::to_string(&state), text);
    }

    #[test]
    fn test_invalid() {
        assert!(Notation::parse("").is_err());
        assert!(Notation::parse("XO_/___").is_err());
        assert!(Notation::parse("XO__/__/___").is_err());
        assert!(Notation::parse("XQ_/___/___").is_err());
        assert!(Notation::parse("___/___/___ z").is_err());
        assert!(Notation::parse("___/___/___ x extra").is_err());
    }
}
