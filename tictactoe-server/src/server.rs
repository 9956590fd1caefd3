//! 服务器主逻辑

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use protocol::{
    ClientMessage, Connection, ErrorCode, GameError, GameId, GameMode, GameSnapshot, Listener,
    PlayerId, Position, ProtocolError, ServerMessage,
};
use tictactoe_ai::AiEngine;

use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::game::GameManager;
use crate::player::PlayerManager;

/// 服务器状态
pub struct ServerState {
    pub players: PlayerManager,
    pub games: GameManager,
    pub config: ServerConfig,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            players: PlayerManager::new(),
            games: GameManager::new(),
            config,
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// 消息处理器
pub struct MessageHandler;

impl MessageHandler {
    /// 处理客户端消息
    pub fn handle(state: &mut ServerState, player_id: PlayerId, msg: ClientMessage) -> ServerMessage {
        let result = match msg {
            ClientMessage::NewGame { mode } => {
                Ok(ServerMessage::Game(Self::handle_new_game(state, player_id, mode)))
            }
            ClientMessage::MakeMove { game_id, position } => {
                Self::handle_make_move(state, player_id, game_id, position).map(ServerMessage::Game)
            }
            ClientMessage::GetGame { game_id } => {
                Self::handle_get_game(state, player_id, game_id).map(ServerMessage::Game)
            }
            ClientMessage::GetScore => Ok(ServerMessage::Score(state.players.score(player_id))),
            ClientMessage::ResetScore => {
                info!("玩家 {} 清空战绩", player_id);
                Ok(ServerMessage::Score(state.players.reset_score(player_id)))
            }
            ClientMessage::Ping => Ok(ServerMessage::Pong),
        };

        result.unwrap_or_else(|e| {
            warn!("玩家 {} 的请求被拒绝: {}", player_id, e);
            e.into()
        })
    }

    /// 新建对局
    fn handle_new_game(state: &mut ServerState, player_id: PlayerId, mode: GameMode) -> GameSnapshot {
        let score = state.players.score(player_id);
        let game = state.games.create(player_id, mode);
        info!("玩家 {} 创建对局 {} ({:?})", player_id, game.id, mode);
        game.snapshot(score, None)
    }

    /// 落子，人机对战时电脑随后应答
    fn handle_make_move(
        state: &mut ServerState,
        player_id: PlayerId,
        game_id: GameId,
        position: u8,
    ) -> Result<GameSnapshot, ServiceError> {
        let position = Position::new(position as usize).ok_or(GameError::InvalidPosition {
            index: position as usize,
        })?;

        let game = state
            .games
            .get_mut(game_id)
            .ok_or(ServiceError::GameNotFound(game_id))?;
        if game.owner != player_id {
            return Err(ServiceError::NotYourGame(game_id));
        }

        let mut outcome = game.play(position)?.outcome;
        debug!("对局 {}: 玩家落子 {}", game_id, position);

        let mut computer_move = None;
        if let Some(kind) = game.computer_strategy() {
            if !outcome.is_concluded() {
                let engine = AiEngine::new(state.config.ai_config(kind));
                match engine.search(game.state()) {
                    Some(mv) => {
                        outcome = game.play(mv)?.outcome;
                        computer_move = Some(mv);
                        debug!("对局 {}: 电脑落子 {}", game_id, mv);
                    }
                    None => warn!("对局 {}: 棋盘已满，电脑无法落子", game_id),
                }
            }
        }

        if outcome.is_concluded() {
            info!("对局 {} 结束: {:?}", game_id, outcome);
            state.players.record(player_id, outcome);
        }

        let score = state.players.score(player_id);
        Ok(game.snapshot(score, computer_move))
    }

    /// 查询对局
    fn handle_get_game(
        state: &ServerState,
        player_id: PlayerId,
        game_id: GameId,
    ) -> Result<GameSnapshot, ServiceError> {
        let game = state
            .games
            .get(game_id)
            .ok_or(ServiceError::GameNotFound(game_id))?;
        Ok(game.snapshot(state.players.score(player_id), None))
    }

    /// 处理玩家断线
    pub fn handle_disconnect(state: &mut ServerState, player_id: PlayerId) {
        let removed = state.games.remove_owned_by(player_id);
        state.players.disconnect(player_id);
        info!("玩家 {} 断开连接，清理对局 {} 个", player_id, removed);
    }
}

/// 接受连接并为每个连接启动一个任务
pub async fn serve<L: Listener>(mut listener: L, state: Arc<Mutex<ServerState>>) {
    info!("游戏服务已启动: {:?}", listener.local_addr());

    loop {
        match listener.accept().await {
            Ok(conn) => {
                let state = Arc::clone(&state);
                tokio::spawn(handle_connection(conn, state));
            }
            Err(e) => warn!("接受连接失败: {}", e),
        }
    }
}

/// 处理单个连接：按顺序读取请求并回复
pub async fn handle_connection<C: Connection>(mut conn: C, state: Arc<Mutex<ServerState>>) {
    let peer = conn.peer_addr();
    let (player_id, delay) = {
        let mut state = state.lock().await;
        let id = state.players.connect(peer.clone());
        (id, state.config.computer_delay())
    };
    info!("玩家 {} 已连接: {:?}", player_id, peer);

    loop {
        let reply = match conn.recv::<ClientMessage>().await {
            Ok(msg) => {
                debug!("玩家 {} 请求: {:?}", player_id, msg);
                let mut state = state.lock().await;
                MessageHandler::handle(&mut state, player_id, msg)
            }
            Err(ProtocolError::ConnectionClosed) => break,
            Err(ProtocolError::Bincode(e)) => {
                warn!("玩家 {} 发送了无法解析的消息: {}", player_id, e);
                ServerMessage::Error {
                    code: ErrorCode::InvalidRequest,
                    message: e.to_string(),
                }
            }
            Err(e) => {
                warn!("玩家 {} 连接出错: {}", player_id, e);
                break;
            }
        };

        if !delay.is_zero()
            && matches!(&reply, ServerMessage::Game(snapshot) if snapshot.computer_move.is_some())
        {
            tokio::time::sleep(delay).await;
        }

        if let Err(e) = conn.send(&reply).await {
            warn!("玩家 {} 回复发送失败: {}", player_id, e);
            break;
        }
    }

    let mut state = state.lock().await;
    MessageHandler::handle_disconnect(&mut state, player_id);
}
