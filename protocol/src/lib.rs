//! 井字棋共享协议库
//!
//! 包含:
//! - 玩家、格子、位置、棋盘等核心数据结构
//! - 胜负判定与回合/战绩控制
//! - 棋盘记法
//! - 消息类型定义 (ClientMessage, ServerMessage)
//! - 传输层抽象 (Connector, Connection, Listener traits) 与帧编解码
//! - 远程游戏客户端

mod board;
mod cell;
mod client;
mod constants;
mod error;
mod message;
mod notation;
mod session;
mod transport;

pub use board::{Board, BoardState, GameOutcome, WinningLine};
pub use cell::{Cell, Player, Position};
pub use client::GameClient;
pub use constants::*;
pub use error::{GameError, ProtocolError, Result};
pub use message::{
    ClientMessage, ErrorCode, GameId, GameMode, GameSnapshot, PlayerId, ServerMessage,
    StrategyKind,
};
pub use notation::{Notation, EMPTY_NOTATION};
pub use session::{GameSession, ScoreBoard, TurnController, TurnResult};
pub use transport::{
    Connection, Connector, FrameReader, FrameWriter, Listener, TcpConnection, TcpConnector,
    TcpListener,
};
