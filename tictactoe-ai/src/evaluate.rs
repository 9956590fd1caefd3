//! 局面评估
//!
//! 只对终局打分：电脑胜 +10，对手胜 -10，和棋 0，不按深度折扣。

use protocol::{Board, GameOutcome, Player, Position};

/// 电脑获胜得分
pub const WIN_SCORE: i32 = 10;

/// 电脑落败得分
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// 和棋得分
pub const DRAW_SCORE: i32 = 0;

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 终局得分（`computer` 视角），未结束返回 None
    pub fn terminal_score(board: &Board, computer: Player) -> Option<i32> {
        match board.outcome() {
            GameOutcome::InProgress => None,
            GameOutcome::Win(winner) if winner == computer => Some(WIN_SCORE),
            GameOutcome::Win(_) => Some(LOSS_SCORE),
            GameOutcome::Draw => Some(DRAW_SCORE),
        }
    }

    /// `player` 一步即可获胜的第一个格子（按升序扫描）
    pub fn find_winning_move(board: &Board, player: Player) -> Option<Position> {
        board
            .legal_moves()
            .into_iter()
            .find(|&pos| board.with_move(pos, player).winner() == Some(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Notation;

    fn board(text: &str) -> Board {
        Notation::parse_board(text).unwrap()
    }

    #[test]
    fn test_terminal_score() {
        assert_eq!(Evaluator::terminal_score(&board("XXX/OO_/___"), Player::X), Some(WIN_SCORE));
        assert_eq!(Evaluator::terminal_score(&board("XXX/OO_/___"), Player::O), Some(LOSS_SCORE));
        assert_eq!(Evaluator::terminal_score(&board("XOX/XOO/OXX"), Player::O), Some(DRAW_SCORE));
        assert_eq!(Evaluator::terminal_score(&board("XO_/___/___"), Player::O), None);
    }

    #[test]
    fn test_winning_moves() {
        // X 在 2（第一行）和 8（对角线）都能一步获胜
        let b = board("XX_/_X_/OO_");
        assert_eq!(Evaluator::find_winning_move(&b, Player::X), Position::new(2));
        assert_eq!(Evaluator::find_winning_move(&b, Player::O), Position::new(8));
    }

    #[test]
    fn test_no_winning_move() {
        assert_eq!(Evaluator::find_winning_move(&Board::empty(), Player::X), None);
    }
}
