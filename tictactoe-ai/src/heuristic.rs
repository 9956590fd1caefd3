//! 规则优先级策略
//!
//! 依次尝试：自己一步获胜 > 堵住对手一步获胜 > 中心 > 角（0, 2, 6, 8）> 第一个空格。

use protocol::{Board, Player, Position, CENTER, CORNERS};

use crate::evaluate::Evaluator;
use crate::strategy::MoveStrategy;

/// 规则优先级策略
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    /// 按优先级列表选择落子，第一条命中的规则生效
    pub fn heuristic_move(board: &Board, computer: Player, opponent: Player) -> Option<Position> {
        Evaluator::find_winning_move(board, computer)
            .or_else(|| Evaluator::find_winning_move(board, opponent))
            .or_else(|| Some(CENTER).filter(|&pos| board.get(pos).is_empty()))
            .or_else(|| CORNERS.into_iter().find(|&pos| board.get(pos).is_empty()))
            .or_else(|| board.legal_moves().first().copied())
    }
}

impl MoveStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn select_move(&self, board: &Board, computer: Player) -> Option<Position> {
        Self::heuristic_move(board, computer, computer.opponent())
    }
}
