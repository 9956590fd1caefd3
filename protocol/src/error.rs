//! 错误类型定义

use thiserror::Error;

use crate::message::ErrorCode;

/// 井字棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 无效的位置
    #[error("Invalid position: {index} (expected 0..9)")]
    InvalidPosition { index: usize },

    /// 格子已被占用
    #[error("Cell {index} is already taken")]
    CellOccupied { index: usize },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的棋盘数据
    #[error("Invalid board: {reason}")]
    InvalidBoard { reason: String },

    /// 无效的棋盘记法
    #[error("Invalid notation: {reason}")]
    InvalidNotation { reason: String },
}

impl GameError {
    /// 对应的协议错误码
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::InvalidPosition { .. } => ErrorCode::InvalidPosition,
            GameError::CellOccupied { .. } => ErrorCode::CellOccupied,
            GameError::GameOver => ErrorCode::GameOver,
            GameError::InvalidBoard { .. } | GameError::InvalidNotation { .. } => {
                ErrorCode::InvalidRequest
            }
        }
    }
}

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误（bincode）
    #[error("Bincode serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 协议版本不匹配
    #[error("Protocol version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u8, actual: u8 },

    /// 帧大小超限
    #[error("Frame too large: {size} bytes (max: {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// 连接超时
    #[error("Connection timeout")]
    ConnectionTimeout,

    /// 连接已关闭
    #[error("Connection closed")]
    ConnectionClosed,

    /// 服务端返回的错误
    #[error("Server error ({code:?}): {message}")]
    Server { code: ErrorCode, message: String },

    /// 收到了不符合预期的回复
    #[error("Unexpected reply: {0}")]
    UnexpectedMessage(String),

    /// 井字棋规则错误
    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
