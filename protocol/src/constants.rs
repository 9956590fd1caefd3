//! 协议常量定义

use std::time::Duration;

use crate::board::WinningLine;
use crate::cell::{Player, Position};

/// 协议版本号
pub const PROTOCOL_VERSION: u8 = 1;

/// 棋盘边长
pub const BOARD_WIDTH: usize = 3;

/// 格子总数
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_WIDTH;

/// 中心格
pub const CENTER: Position = Position::new_unchecked(4);

/// 四个角（按检查顺序）
pub const CORNERS: [Position; 4] = [
    Position::new_unchecked(0),
    Position::new_unchecked(2),
    Position::new_unchecked(6),
    Position::new_unchecked(8),
];

/// 8 条获胜连线：三行（上到下）、三列（左到右）、两条对角线
pub const WINNING_LINES: [WinningLine; 8] = [
    line(0, 1, 2),
    line(3, 4, 5),
    line(6, 7, 8),
    line(0, 3, 6),
    line(1, 4, 7),
    line(2, 5, 8),
    line(0, 4, 8),
    line(2, 4, 6),
];

const fn line(a: u8, b: u8, c: u8) -> WinningLine {
    [
        Position::new_unchecked(a),
        Position::new_unchecked(b),
        Position::new_unchecked(c),
    ]
}

/// 先手
pub const FIRST_PLAYER: Player = Player::X;

/// 人机对战中电脑执的棋子（玩家总是先手 X）
pub const COMPUTER_PLAYER: Player = Player::O;

/// 消息帧最大大小
pub const MAX_FRAME_SIZE: usize = 65536;

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 9527;

/// 连接超时（秒）
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// 连接超时 Duration
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(CONNECT_TIMEOUT_SECS);
