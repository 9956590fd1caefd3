//! 玩家（连接）管理
//!
//! 每个连接是一名玩家，战绩随连接保存，断开后清除。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use protocol::{GameOutcome, PlayerId, ScoreBoard};

/// 玩家会话
#[derive(Debug, Clone)]
pub struct PlayerSession {
    pub id: PlayerId,
    /// 远端地址
    pub peer: Option<String>,
    pub score: ScoreBoard,
    pub connected_at: DateTime<Utc>,
}

impl PlayerSession {
    pub fn new(id: PlayerId, peer: Option<String>) -> Self {
        Self {
            id,
            peer,
            score: ScoreBoard::default(),
            connected_at: Utc::now(),
        }
    }
}

/// 玩家管理器
pub struct PlayerManager {
    players: HashMap<PlayerId, PlayerSession>,
    /// ID 生成器
    next_id: AtomicU64,
}

impl PlayerManager {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// 生成新的玩家 ID
    fn generate_id(&self) -> PlayerId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// 新连接
    pub fn connect(&mut self, peer: Option<String>) -> PlayerId {
        let id = self.generate_id();
        self.players.insert(id, PlayerSession::new(id, peer));
        id
    }

    /// 断开连接
    pub fn disconnect(&mut self, player_id: PlayerId) -> Option<PlayerSession> {
        self.players.remove(&player_id)
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&PlayerSession> {
        self.players.get(&player_id)
    }

    pub fn exists(&self, player_id: PlayerId) -> bool {
        self.players.contains_key(&player_id)
    }

    /// 玩家战绩（未知玩家返回空战绩）
    pub fn score(&self, player_id: PlayerId) -> ScoreBoard {
        self.get(player_id)
            .map(|player| player.score)
            .unwrap_or_default()
    }

    /// 记录对局结果
    pub fn record(&mut self, player_id: PlayerId, outcome: GameOutcome) {
        if let Some(player) = self.players.get_mut(&player_id) {
            player.score.record(outcome);
        }
    }

    /// 清空战绩
    pub fn reset_score(&mut self, player_id: PlayerId) -> ScoreBoard {
        match self.players.get_mut(&player_id) {
            Some(player) => {
                player.score.reset();
                player.score
            }
            None => ScoreBoard::default(),
        }
    }

    pub fn count(&self) -> usize {
        self.players.len()
    }
}

impl Default for PlayerManager {
    fn default() -> Self {
        Self::new()
    }
}
