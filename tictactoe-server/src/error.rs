//! 服务端错误

use protocol::{ErrorCode, GameError, GameId, ServerMessage};
use thiserror::Error;

/// 请求处理错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("对局不存在: {0}")]
    GameNotFound(GameId),

    #[error("不是你的对局: {0}")]
    NotYourGame(GameId),

    #[error(transparent)]
    Game(#[from] GameError),
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::GameNotFound(_) => ErrorCode::GameNotFound,
            ServiceError::NotYourGame(_) => ErrorCode::NotYourGame,
            ServiceError::Game(e) => e.code(),
        }
    }
}

impl From<ServiceError> for ServerMessage {
    fn from(err: ServiceError) -> Self {
        ServerMessage::Error {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reply() {
        let reply: ServerMessage = ServiceError::Game(GameError::CellOccupied { index: 4 }).into();
        match reply {
            ServerMessage::Error { code, message } => {
                assert_eq!(code, ErrorCode::CellOccupied);
                assert_eq!(message, "Cell 4 is already taken");
            }
            other => panic!("unexpected reply: {:?}", other),
        }

        assert_eq!(ServiceError::GameNotFound(7).code(), ErrorCode::GameNotFound);
        assert_eq!(ServiceError::NotYourGame(7).code(), ErrorCode::NotYourGame);
    }
}
