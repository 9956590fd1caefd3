//! 井字棋 AI
//!
//! 包含:
//! - 终局评估
//! - 完整 Minimax 搜索（无剪枝）
//! - 规则优先级策略
//! - 可互换的策略接口

mod evaluate;
mod heuristic;
mod minimax;
mod search;
mod strategy;

pub use evaluate::{Evaluator, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
pub use heuristic::HeuristicStrategy;
pub use minimax::{MinimaxStrategy, SearchResult, TieBreak};
pub use search::{AiConfig, AiEngine, StrategyKind};
pub use strategy::{build_strategy, MoveStrategy};
