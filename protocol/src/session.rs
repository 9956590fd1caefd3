//! 回合与战绩控制
//!
//! - `TurnController`：落子并重新推导胜负
//! - `ScoreBoard`：胜场与连胜统计（纯状态迁移）
//! - `GameSession`：一局游戏的显式会话状态，新开一局时保留战绩

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState, GameOutcome, WinningLine};
use crate::cell::{Player, Position};
use crate::error::GameError;

/// 一次落子的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnResult {
    /// 落子后的棋盘
    pub board: Board,
    /// 落子位置
    pub position: Position,
    /// 落子方
    pub mover: Player,
    /// 落子后的结果
    pub outcome: GameOutcome,
    /// 获胜连线（如果有）
    pub winning_line: Option<WinningLine>,
}

impl TurnResult {
    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == GameOutcome::Draw
    }
}

/// 回合控制器
pub struct TurnController;

impl TurnController {
    /// 在棋盘上为 `mover` 落子，返回新棋盘及其结果
    ///
    /// 对局已结束或格子已被占用时拒绝落子，原棋盘不变。
    pub fn apply(board: &Board, position: Position, mover: Player) -> Result<TurnResult, GameError> {
        if board.outcome().is_concluded() {
            return Err(GameError::GameOver);
        }

        let mut next = *board;
        next.place(position, mover)?;

        Ok(TurnResult {
            board: next,
            position,
            mover,
            outcome: next.outcome(),
            winning_line: next.winning_line(),
        })
    }
}

/// 战绩统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// 最近一局的胜者（和棋后清空）
    pub last_winner: Option<Player>,
    /// X 当前连胜
    pub streak_x: u32,
    /// O 当前连胜
    pub streak_o: u32,
    /// X 总胜场
    pub wins_x: u32,
    /// O 总胜场
    pub wins_o: u32,
    /// 和棋数
    pub draws: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一局结果
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::InProgress => {}
            GameOutcome::Win(Player::X) => {
                self.streak_x += 1;
                self.streak_o = 0;
                self.wins_x += 1;
                self.last_winner = Some(Player::X);
            }
            GameOutcome::Win(Player::O) => {
                self.streak_o += 1;
                self.streak_x = 0;
                self.wins_o += 1;
                self.last_winner = Some(Player::O);
            }
            GameOutcome::Draw => {
                self.streak_x = 0;
                self.streak_o = 0;
                self.draws += 1;
                self.last_winner = None;
            }
        }
    }

    /// 指定玩家的当前连胜
    pub fn streak(&self, player: Player) -> u32 {
        match player {
            Player::X => self.streak_x,
            Player::O => self.streak_o,
        }
    }

    /// 指定玩家的总胜场
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.wins_x,
            Player::O => self.wins_o,
        }
    }

    /// 已完成的对局数
    pub fn games_played(&self) -> u32 {
        self.wins_x + self.wins_o + self.draws
    }

    /// 清空战绩
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 游戏会话
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    state: BoardState,
    score: ScoreBoard,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有局面恢复会话
    pub fn from_state(state: BoardState, score: ScoreBoard) -> Self {
        Self { state, score }
    }

    /// 当前局面
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn current_turn(&self) -> Player {
        self.state.current_turn
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut ScoreBoard {
        &mut self.score
    }

    /// 当前结果
    pub fn outcome(&self) -> GameOutcome {
        self.state.outcome()
    }

    /// 当前走子方落子
    ///
    /// 对局结束时把结果计入战绩（每局只计一次，之后的落子会被拒绝）。
    pub fn play(&mut self, position: Position) -> Result<TurnResult, GameError> {
        let result = self.play_turn(position)?;

        if result.outcome.is_concluded() {
            self.score.record(result.outcome);
        }

        Ok(result)
    }

    /// 当前走子方落子并交换走子方，不计入战绩
    ///
    /// 战绩由调用方另行保存时使用（例如服务端按连接统计）。
    pub fn play_turn(&mut self, position: Position) -> Result<TurnResult, GameError> {
        let result = TurnController::apply(&self.state.board, position, self.state.current_turn)?;

        self.state.board = result.board;
        self.state.move_count += 1;
        self.state.switch_turn();

        Ok(result)
    }

    /// 新开一局（保留战绩）
    pub fn new_game(&mut self) {
        self.state = BoardState::initial();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::Notation;

    fn pos(index: usize) -> Position {
        Position::new(index).unwrap()
    }

    /// 按顺序落子，X 先手
    fn play_all(session: &mut GameSession, moves: &[usize]) -> TurnResult {
        let mut last = None;
        for &m in moves {
            last = Some(session.play(pos(m)).unwrap());
        }
        last.unwrap()
    }

    // X 走 0,1,2 获胜
    const X_WINS: [usize; 5] = [0, 3, 1, 4, 2];
    // O 走 3,4,5 获胜
    const O_WINS: [usize; 6] = [0, 3, 1, 4, 8, 5];
    // 和棋
    const DRAW: [usize; 9] = [0, 1, 2, 4, 3, 5, 7, 6, 8];

    #[test]
    fn test_apply_reports_winner() {
        let state = Notation::parse("XX_/OO_/___ x").unwrap();
        let result = TurnController::apply(&state.board, pos(2), Player::X).unwrap();
        assert_eq!(result.winner(), Some(Player::X));
        assert_eq!(result.winning_line, Some([pos(0), pos(1), pos(2)]));
        assert!(!result.is_draw());
    }

    #[test]
    fn test_apply_rejects_occupied_and_finished() {
        let state = Notation::parse("XX_/OO_/___ x").unwrap();
        assert_eq!(
            TurnController::apply(&state.board, pos(0), Player::X),
            Err(GameError::CellOccupied { index: 0 })
        );

        let finished = Notation::parse("XXX/OO_/___ o").unwrap();
        assert_eq!(
            TurnController::apply(&finished.board, pos(5), Player::O),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn test_session_alternates_turns() {
        let mut session = GameSession::new();
        assert_eq!(session.current_turn(), Player::X);

        let result = session.play(pos(4)).unwrap();
        assert_eq!(result.mover, Player::X);
        assert_eq!(session.current_turn(), Player::O);
        assert_eq!(session.state().move_count, 1);
    }

    #[test]
    fn test_session_records_outcome_once() {
        let mut session = GameSession::new();
        let result = play_all(&mut session, &X_WINS);
        assert_eq!(result.winner(), Some(Player::X));
        assert_eq!(session.score().wins_x, 1);

        assert_eq!(session.play(pos(8)), Err(GameError::GameOver));
        assert_eq!(session.score().wins_x, 1);
    }

    #[test]
    fn test_play_turn_leaves_score_alone() {
        let mut session = GameSession::new();
        let mut last = None;
        for m in X_WINS {
            last = Some(session.play_turn(pos(m)).unwrap());
        }
        assert_eq!(last.unwrap().winner(), Some(Player::X));
        assert_eq!(session.state().move_count, 5);
        assert_eq!(session.current_turn(), Player::O);
        assert_eq!(*session.score(), ScoreBoard::default());

        assert_eq!(session.play_turn(pos(8)), Err(GameError::GameOver));
        assert_eq!(session.state().move_count, 5);
    }

    #[test]
    fn test_session_draw() {
        let mut session = GameSession::new();
        let result = play_all(&mut session, &DRAW);
        assert!(result.is_draw());
        assert_eq!(session.outcome(), GameOutcome::Draw);
        assert_eq!(session.score().draws, 1);
    }

    #[test]
    fn test_new_game_keeps_score() {
        let mut session = GameSession::new();
        play_all(&mut session, &X_WINS);
        session.new_game();

        assert_eq!(session.outcome(), GameOutcome::InProgress);
        assert_eq!(session.current_turn(), Player::X);
        assert_eq!(session.score().streak_x, 1);
    }

    #[test]
    fn test_streak_sequence() {
        let mut session = GameSession::new();
        for _ in 0..3 {
            play_all(&mut session, &X_WINS);
            session.new_game();
        }
        assert_eq!(session.score().streak_x, 3);

        play_all(&mut session, &O_WINS);
        session.new_game();
        let score = *session.score();
        assert_eq!(score.streak_x, 0);
        assert_eq!(score.streak_o, 1);
        assert_eq!(score.wins_x, 3);
        assert_eq!(score.wins_o, 1);
        assert_eq!(score.last_winner, Some(Player::O));

        play_all(&mut session, &DRAW);
        let score = *session.score();
        assert_eq!(score.streak_x, 0);
        assert_eq!(score.streak_o, 0);
        assert_eq!(score.last_winner, None);
        assert_eq!(score.games_played(), 5);
    }

    #[test]
    fn test_scoreboard_in_progress_is_noop() {
        let mut score = ScoreBoard::new();
        score.record(GameOutcome::Win(Player::O));
        score.record(GameOutcome::InProgress);
        assert_eq!(score.streak(Player::O), 1);
        assert_eq!(score.wins(Player::O), 1);

        score.reset();
        assert_eq!(score, ScoreBoard::default());
    }
}
