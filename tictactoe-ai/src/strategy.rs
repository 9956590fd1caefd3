//! 电脑走棋策略抽象

use protocol::{Board, Player, Position, StrategyKind};

use crate::heuristic::HeuristicStrategy;
use crate::minimax::{MinimaxStrategy, TieBreak};

/// 电脑走棋策略
///
/// 每次调用拿到的都是棋盘快照，策略本身不保留棋盘。
/// 棋盘已满时返回 None，调用方应在调用前确认还有空格。
pub trait MoveStrategy: Send + Sync {
    /// 策略名称（用于日志）
    fn name(&self) -> &'static str;

    /// 为 `computer` 选择落子位置
    fn select_move(&self, board: &Board, computer: Player) -> Option<Position>;
}

/// 按策略类型创建策略实例
pub fn build_strategy(kind: StrategyKind, tie_break: TieBreak) -> Box<dyn MoveStrategy> {
    match kind {
        StrategyKind::Minimax => Box::new(MinimaxStrategy::new(tie_break)),
        StrategyKind::Heuristic => Box::new(HeuristicStrategy),
    }
}
