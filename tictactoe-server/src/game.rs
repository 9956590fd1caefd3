//! 对局管理

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use protocol::{
    BoardState, GameError, GameId, GameMode, GameOutcome, GameSession, GameSnapshot, Player,
    PlayerId, Position, ScoreBoard, StrategyKind, TurnResult, COMPUTER_PLAYER,
};
use tracing::debug;

/// 每名玩家同时保留的未结束对局上限
pub const MAX_GAMES_PER_PLAYER: usize = 8;

/// 对局
#[derive(Debug, Clone)]
pub struct Game {
    pub id: GameId,
    /// 创建对局的玩家，只有他可以落子
    pub owner: PlayerId,
    pub mode: GameMode,
    /// 棋盘与走子方；战绩按连接保存在 `PlayerManager`，不在这里统计
    session: GameSession,
    /// 落子历史
    pub history: Vec<Position>,
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// 创建新对局（空棋盘，X 先手）
    pub fn new(id: GameId, owner: PlayerId, mode: GameMode) -> Self {
        Self {
            id,
            owner,
            mode,
            session: GameSession::new(),
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn state(&self) -> &BoardState {
        self.session.state()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.session.outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_concluded()
    }

    /// 人机对战中电脑使用的策略
    pub fn computer_strategy(&self) -> Option<StrategyKind> {
        match self.mode {
            GameMode::PvP => None,
            GameMode::PvE(kind) => Some(kind),
        }
    }

    /// 人机对战中电脑执的棋子
    pub fn computer_player(&self) -> Option<Player> {
        self.computer_strategy().map(|_| COMPUTER_PLAYER)
    }

    /// 当前走子方落子
    pub fn play(&mut self, position: Position) -> Result<TurnResult, GameError> {
        let result = self.session.play_turn(position)?;
        self.history.push(position);

        Ok(result)
    }

    /// 生成快照
    pub fn snapshot(&self, score: ScoreBoard, computer_move: Option<Position>) -> GameSnapshot {
        let board = *self.session.board();
        GameSnapshot {
            id: self.id,
            mode: self.mode,
            board,
            current_player: self.session.current_turn(),
            winner: board.winner(),
            is_draw: board.is_draw(),
            winning_line: board
                .winning_line()
                .map(|line| line.map(|pos| pos.index() as u8)),
            computer_move: computer_move.map(|pos| pos.index() as u8),
            score,
            created_at: self.created_at,
        }
    }
}

/// 对局管理器
pub struct GameManager {
    games: HashMap<GameId, Game>,
    next_id: AtomicU64,
}

impl GameManager {
    pub fn new() -> Self {
        Self {
            games: HashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// 生成新的对局 ID
    fn generate_id(&self) -> GameId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// 创建对局
    ///
    /// 先清掉该玩家已结束的对局；未结束的对局达到上限时移除最早的一局。
    pub fn create(&mut self, owner: PlayerId, mode: GameMode) -> &Game {
        self.games
            .retain(|_, game| game.owner != owner || !game.is_finished());

        let mut open: Vec<GameId> = self
            .games
            .values()
            .filter(|game| game.owner == owner)
            .map(|game| game.id)
            .collect();
        if open.len() >= MAX_GAMES_PER_PLAYER {
            open.sort_unstable();
            for id in &open[..=open.len() - MAX_GAMES_PER_PLAYER] {
                self.games.remove(id);
                debug!("玩家 {} 的对局过多，移除对局 {}", owner, id);
            }
        }

        let id = self.generate_id();
        self.games
            .entry(id)
            .or_insert_with(|| Game::new(id, owner, mode))
    }

    pub fn get(&self, game_id: GameId) -> Option<&Game> {
        self.games.get(&game_id)
    }

    pub fn get_mut(&mut self, game_id: GameId) -> Option<&mut Game> {
        self.games.get_mut(&game_id)
    }

    /// 移除玩家创建的所有对局，返回移除数量
    pub fn remove_owned_by(&mut self, owner: PlayerId) -> usize {
        let before = self.games.len();
        self.games.retain(|_, game| game.owner != owner);
        before - self.games.len()
    }

    pub fn count(&self) -> usize {
        self.games.len()
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}
