//! AI 引擎
//!
//! 按配置选择走棋策略，对外只暴露"给局面、出走法"。

use protocol::{Board, BoardState, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::minimax::TieBreak;
use crate::strategy::{build_strategy, MoveStrategy};

// 重导出 StrategyKind 以便外部使用
pub use protocol::StrategyKind;

/// AI 配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AiConfig {
    pub strategy: StrategyKind,
    pub tie_break: TieBreak,
}

impl AiConfig {
    pub fn from_strategy(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    strategy: Box<dyn MoveStrategy>,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            strategy: build_strategy(config.strategy, config.tie_break),
        }
    }

    /// 从策略类型创建
    pub fn from_strategy(strategy: StrategyKind) -> Self {
        Self::new(AiConfig::from_strategy(strategy))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 策略名称
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// 为当前走子方选择走法
    pub fn search(&self, state: &BoardState) -> Option<Position> {
        self.best_move(&state.board, state.current_turn)
    }

    /// 为 `computer` 选择走法
    ///
    /// 已分胜负或棋盘已满时返回 None。
    pub fn best_move(&self, board: &Board, computer: Player) -> Option<Position> {
        if board.outcome().is_concluded() {
            warn!("对局已结束，AI 不再走棋");
            return None;
        }

        let mv = self.strategy.select_move(board, computer);
        debug!(
            "AI ({}) 为 {} 选择: {:?}",
            self.strategy.name(),
            computer,
            mv.map(|p| p.index())
        );
        mv
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Notation;

    #[test]
    fn test_default_config() {
        let config = AiConfig::default();
        assert_eq!(config.strategy, StrategyKind::Minimax);
        assert_eq!(config.tie_break, TieBreak::First);

        let engine = AiEngine::default();
        assert_eq!(engine.strategy_name(), "minimax");
    }

    #[test]
    fn test_config_json() {
        let config = AiConfig {
            strategy: StrategyKind::Heuristic,
            tie_break: TieBreak::Last,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"strategy":"Heuristic","tie_break":"Last"}"#);
    }

    #[test]
    fn test_search_uses_side_to_move() {
        let state = Notation::parse("XX_/OO_/X__ o").unwrap();
        for strategy in [StrategyKind::Minimax, StrategyKind::Heuristic] {
            let engine = AiEngine::from_strategy(strategy);
            assert_eq!(engine.search(&state), Position::new(5));
        }
    }

    #[test]
    fn test_concluded_board() {
        let engine = AiEngine::from_strategy(StrategyKind::Heuristic);

        let won = Notation::parse("XXX/OO_/___ o").unwrap();
        assert_eq!(engine.search(&won), None);

        let full = Notation::parse("XOX/XOO/OXX x").unwrap();
        assert_eq!(engine.search(&full), None);
    }

    #[test]
    fn test_heuristic_and_minimax_differ() {
        // 对角两子：规则策略走角（会被双杀），Minimax 走边
        let state = Notation::parse("X__/_O_/__X o").unwrap();
        assert_eq!(
            AiEngine::from_strategy(StrategyKind::Heuristic).search(&state),
            Position::new(2)
        );
        assert_eq!(
            AiEngine::from_strategy(StrategyKind::Minimax).search(&state),
            Position::new(1)
        );
    }
}
