//! 远程游戏客户端
//!
//! 对游戏服务的"新建对局"与"落子"等能力做一层请求/响应封装。

use tracing::debug;

use crate::cell::Position;
use crate::error::{ProtocolError, Result};
use crate::message::{ClientMessage, GameId, GameMode, GameSnapshot, ServerMessage};
use crate::session::ScoreBoard;
use crate::transport::{Connection, Connector, TcpConnection, TcpConnector};

/// 游戏服务客户端
pub struct GameClient<C> {
    conn: C,
}

impl GameClient<TcpConnection> {
    /// 通过 TCP 连接游戏服务
    pub async fn connect(addr: &str) -> Result<Self> {
        let conn = TcpConnector.connect(addr).await?;
        debug!("已连接游戏服务: {}", addr);
        Ok(Self::new(conn))
    }
}

impl<C: Connection> GameClient<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    /// 发送请求并等待回复，服务端错误转换为 `ProtocolError::Server`
    async fn request(&mut self, msg: ClientMessage) -> Result<ServerMessage> {
        self.conn.send(&msg).await?;
        match self.conn.recv().await? {
            ServerMessage::Error { code, message } => Err(ProtocolError::Server { code, message }),
            reply => Ok(reply),
        }
    }

    async fn request_game(&mut self, msg: ClientMessage) -> Result<GameSnapshot> {
        match self.request(msg).await? {
            ServerMessage::Game(snapshot) => Ok(snapshot),
            other => Err(ProtocolError::UnexpectedMessage(format!("{:?}", other))),
        }
    }

    async fn request_score(&mut self, msg: ClientMessage) -> Result<ScoreBoard> {
        match self.request(msg).await? {
            ServerMessage::Score(score) => Ok(score),
            other => Err(ProtocolError::UnexpectedMessage(format!("{:?}", other))),
        }
    }

    /// 新建对局，返回空棋盘
    pub async fn create_game(&mut self, mode: GameMode) -> Result<GameSnapshot> {
        self.request_game(ClientMessage::NewGame { mode }).await
    }

    /// 落子，返回更新后的对局（人机对战时包含电脑的应着）
    pub async fn submit_move(&mut self, game_id: GameId, position: Position) -> Result<GameSnapshot> {
        self.request_game(ClientMessage::MakeMove {
            game_id,
            position: position.index() as u8,
        })
        .await
    }

    /// 查询对局
    pub async fn get_game(&mut self, game_id: GameId) -> Result<GameSnapshot> {
        self.request_game(ClientMessage::GetGame { game_id }).await
    }

    /// 查询战绩
    pub async fn score(&mut self) -> Result<ScoreBoard> {
        self.request_score(ClientMessage::GetScore).await
    }

    /// 清空战绩
    pub async fn reset_score(&mut self) -> Result<ScoreBoard> {
        self.request_score(ClientMessage::ResetScore).await
    }

    /// 心跳
    pub async fn ping(&mut self) -> Result<()> {
        match self.request(ClientMessage::Ping).await? {
            ServerMessage::Pong => Ok(()),
            other => Err(ProtocolError::UnexpectedMessage(format!("{:?}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ErrorCode;
    use crate::transport::{Listener, TcpListener};

    #[tokio::test]
    async fn test_server_error_is_surfaced() {
        let mut listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let mut conn = listener.accept().await.unwrap();
            let msg: ClientMessage = conn.recv().await.unwrap();
            assert!(matches!(msg, ClientMessage::GetGame { game_id: 42 }));
            conn.send(&ServerMessage::Error {
                code: ErrorCode::GameNotFound,
                message: "对局不存在".to_string(),
            })
            .await
            .unwrap();

            let msg: ClientMessage = conn.recv().await.unwrap();
            assert!(matches!(msg, ClientMessage::GetScore));
            conn.send(&ServerMessage::Pong).await.unwrap();
        });

        let mut client = GameClient::connect(&addr).await.unwrap();

        let err = client.get_game(42).await.unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Server {
                code: ErrorCode::GameNotFound,
                ..
            }
        ));

        let err = client.score().await.unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedMessage(_)));

        server.await.unwrap();
    }
}
