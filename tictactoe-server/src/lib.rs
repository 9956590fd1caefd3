//! 井字棋服务端
//!
//! 包含:
//! - 对局管理
//! - 玩家（连接）与战绩
//! - 人机对战的电脑应答
//! - 配置文件

pub mod config;
pub mod error;
pub mod game;
pub mod player;
pub mod server;

pub use config::{ServerConfig, CONFIG_ENV};
pub use error::ServiceError;
pub use game::{Game, GameManager, MAX_GAMES_PER_PLAYER};
pub use player::{PlayerManager, PlayerSession};
pub use server::{handle_connection, serve, MessageHandler, ServerState};
