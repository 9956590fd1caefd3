//! 消息类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cell::Player;
use crate::session::ScoreBoard;

/// 玩家（连接）ID
pub type PlayerId = u64;

/// 对局 ID
pub type GameId = u64;

/// 电脑走棋策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    /// 完整 Minimax 搜索（不会输）
    #[default]
    Minimax,
    /// 规则优先级：赢 > 堵 > 中心 > 角 > 任意
    Heuristic,
}

/// 对局模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// 双人同屏对战
    PvP,
    /// 人机对战（玩家执 X 先手）
    PvE(StrategyKind),
}

/// 错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// 对局不存在
    GameNotFound,
    /// 位置越界
    InvalidPosition,
    /// 格子已被占用
    CellOccupied,
    /// 对局已结束
    GameOver,
    /// 不是自己创建的对局
    NotYourGame,
    /// 请求数据无效
    InvalidRequest,
    /// 服务端内部错误
    Internal,
}

/// 对局快照（服务端每次操作后返回）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: GameId,
    pub mode: GameMode,
    pub board: Board,
    /// 下一步的走子方
    pub current_player: Player,
    pub winner: Option<Player>,
    pub is_draw: bool,
    /// 获胜连线的格子索引
    pub winning_line: Option<[u8; 3]>,
    /// 本次请求中电脑的落子（仅人机对战）
    pub computer_move: Option<u8>,
    /// 请求方的战绩
    pub score: ScoreBoard,
    pub created_at: DateTime<Utc>,
}

impl GameSnapshot {
    /// 对局是否已结束
    pub fn is_finished(&self) -> bool {
        self.winner.is_some() || self.is_draw
    }
}

/// 客户端发送给服务端的消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientMessage {
    /// 新建对局
    NewGame { mode: GameMode },
    /// 落子
    MakeMove { game_id: GameId, position: u8 },
    /// 查询对局
    GetGame { game_id: GameId },
    /// 查询战绩
    GetScore,
    /// 清空战绩
    ResetScore,
    /// 心跳请求
    Ping,
}

/// 服务端发送给客户端的消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    /// 对局状态
    Game(GameSnapshot),
    /// 战绩
    Score(ScoreBoard),
    /// 错误
    Error { code: ErrorCode, message: String },
    /// 心跳响应
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            id: 7,
            mode: GameMode::PvE(StrategyKind::Heuristic),
            board: Board::empty(),
            current_player: Player::X,
            winner: None,
            is_draw: false,
            winning_line: None,
            computer_move: None,
            score: ScoreBoard::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_json_shape() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["current_player"], "X");
        assert_eq!(value["winner"], serde_json::Value::Null);
        assert_eq!(value["is_draw"], false);
        assert_eq!(value["board"].as_array().map(|a| a.len()), Some(9));
    }

    #[test]
    fn test_message_bincode_roundtrip() {
        let msg = ServerMessage::Game(snapshot());
        let bytes = bincode::serialize(&msg).unwrap();
        match bincode::deserialize::<ServerMessage>(&bytes).unwrap() {
            ServerMessage::Game(decoded) => assert_eq!(decoded, snapshot_like(&decoded)),
            other => panic!("Unexpected message: {:?}", other),
        }
    }

    // created_at 每次不同，只比较其余字段
    fn snapshot_like(decoded: &GameSnapshot) -> GameSnapshot {
        GameSnapshot {
            created_at: decoded.created_at,
            ..snapshot()
        }
    }

    #[test]
    fn test_finished() {
        let mut snap = snapshot();
        assert!(!snap.is_finished());
        snap.winner = Some(Player::O);
        assert!(snap.is_finished());
    }
}
