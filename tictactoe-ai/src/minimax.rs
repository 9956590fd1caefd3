//! Minimax 搜索
//!
//! 完整穷举搜索，不做 Alpha-Beta 剪枝，也不做置换表。
//! 每层递归拿到的是棋盘副本（`Board` 是 `Copy`），没有共享的可变棋盘，
//! 结果与"落子-递归-撤销"的写法完全一致。

use std::sync::atomic::{AtomicU64, Ordering};

use protocol::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluate::{Evaluator, DRAW_SCORE};
use crate::strategy::MoveStrategy;

/// 多个走法同分时的取舍
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieBreak {
    /// 保留最先找到的最高分走法（严格大于才替换）
    #[default]
    First,
    /// 保留最后找到的最高分走法（大于等于即替换）
    Last,
}

/// 一次搜索的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// 最佳走法，棋盘已满时为 None
    pub best_move: Option<Position>,
    /// 最佳走法的得分
    pub score: i32,
    /// 每个候选走法的得分（升序位置）
    pub scored_moves: Vec<(Position, i32)>,
    /// 搜索的节点数
    pub nodes: u64,
}

/// Minimax 策略
#[derive(Debug, Default)]
pub struct MinimaxStrategy {
    tie_break: TieBreak,
    /// 最近一次搜索的节点数
    last_nodes: AtomicU64,
}

impl MinimaxStrategy {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            tie_break,
            last_nodes: AtomicU64::new(0),
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// 最近一次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.last_nodes.load(Ordering::Relaxed)
    }

    /// 为 `computer` 搜索最佳走法
    ///
    /// 每个空格先落 `computer`，再以对手走子（minimizing）递归打分。
    pub fn search(&self, board: &Board, computer: Player) -> SearchResult {
        let mut nodes = 0;
        let scored_moves: Vec<(Position, i32)> = board
            .legal_moves()
            .into_iter()
            .map(|pos| {
                let score = Self::minimax(board.with_move(pos, computer), computer, false, &mut nodes);
                (pos, score)
            })
            .collect();

        let mut best: Option<(Position, i32)> = None;
        for &(pos, score) in &scored_moves {
            let better = match (best, self.tie_break) {
                (None, _) => true,
                (Some((_, best_score)), TieBreak::First) => score > best_score,
                (Some((_, best_score)), TieBreak::Last) => score >= best_score,
            };
            if better {
                best = Some((pos, score));
            }
        }

        self.last_nodes.store(nodes, Ordering::Relaxed);

        SearchResult {
            best_move: best.map(|(pos, _)| pos),
            score: best.map_or(DRAW_SCORE, |(_, score)| score),
            scored_moves,
            nodes,
        }
    }

    /// 返回最佳走法
    pub fn best_move(&self, board: &Board, computer: Player) -> Option<Position> {
        self.search(board, computer).best_move
    }

    /// 递归打分：maximizing 时落 `computer`，否则落对手
    fn minimax(board: Board, computer: Player, maximizing: bool, nodes: &mut u64) -> i32 {
        *nodes += 1;

        if let Some(score) = Evaluator::terminal_score(&board, computer) {
            return score;
        }

        let mover = if maximizing { computer } else { computer.opponent() };
        let scores = board
            .legal_moves()
            .into_iter()
            .map(|pos| Self::minimax(board.with_move(pos, mover), computer, !maximizing, nodes));

        let combined = if maximizing { scores.max() } else { scores.min() };
        // 非终局必然还有空格
        combined.unwrap_or(DRAW_SCORE)
    }
}

impl MoveStrategy for MinimaxStrategy {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn select_move(&self, board: &Board, computer: Player) -> Option<Position> {
        let result = self.search(board, computer);
        debug!(
            "minimax: computer={} best={:?} score={} nodes={}",
            computer, result.best_move, result.score, result.nodes
        );
        result.best_move
    }
}
