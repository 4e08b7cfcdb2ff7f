//! Match controller - round sequencing, scoring and persistence hand-off.
//!
//! A round ends in a "round over" phase carrying an [`AdvanceTicket`]. The
//! caller shows the result, then redeems the ticket with
//! [`MatchController::advance_round`] (usually after a delay). Tickets are
//! single-use and abandoning the match invalidates them, so a late timer can
//! never count a round twice.

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, instrument, warn};

use crate::action::InvalidMove;
use crate::match_state::{MatchConfig, MatchState};
use crate::rules::Outcome;
use crate::scores::{HighScoreRecord, HighScoreStore};
use crate::strategy::{Opponent, Strategy};
use crate::types::{Board, Mark};

/// Token that advances the match once after a round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(u64);

/// Where the match currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// No match running; waiting for [`MatchController::start`].
    Menu,
    /// The player is to move.
    InRound,
    /// The round is decided and waiting for its ticket to be redeemed.
    RoundOver {
        /// How the round ended.
        outcome: Outcome,
        /// Ticket that advances past this round.
        ticket: AdvanceTicket,
    },
}

/// What happened during one player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct TurnReport {
    player_move: usize,
    opponent_move: Option<usize>,
    outcome: Outcome,
    ticket: Option<AdvanceTicket>,
}

/// Final totals of a completed match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct MatchSummary {
    state: MatchState,
    record: HighScoreRecord,
    saved: bool,
}

/// Result of redeeming an advance ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundAdvance {
    /// A fresh board is ready for this round number.
    NextRound {
        /// One-based round number.
        round: u32,
    },
    /// The last round was played and the match is back at the menu.
    MatchComplete(MatchSummary),
}

/// Error from a match operation used in the wrong phase.
///
/// The match is unchanged when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MatchError {
    /// The board refused the move.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMove),

    /// No round is being played.
    #[display("No round in progress")]
    NotInRound,

    /// The round is not over yet.
    #[display("Round is still in progress")]
    RoundInProgress,

    /// The ticket does not belong to the pending round.
    #[display("Stale advance ticket {:?}", _0)]
    StaleTicket(AdvanceTicket),

    /// A match is already running.
    #[display("A match is already running")]
    MatchRunning,

    /// The opponent strategy picked a cell the board refused.
    #[display("Opponent chose an illegal move: {}", _0)]
    OpponentMove(InvalidMove),
}

impl std::error::Error for MatchError {}

impl From<InvalidMove> for MatchError {
    fn from(err: InvalidMove) -> Self {
        MatchError::InvalidMove(err)
    }
}

/// Owns one match: its state, board and opponent.
///
/// The opponent defaults to the difficulty-selected [`Opponent`]; any
/// [`Strategy`] can stand in, which tests use to script replies.
#[derive(Debug, Clone)]
pub struct MatchController<S = Opponent> {
    state: MatchState,
    board: Board,
    opponent: S,
    phase: MatchPhase,
    seed: Option<u64>,
    next_ticket: u64,
}

impl MatchController<Opponent> {
    /// Starts a match against the opponent for the configured difficulty.
    #[instrument]
    pub fn new(config: MatchConfig, player_name: String, seed: Option<u64>) -> Self {
        let opponent = Opponent::for_difficulty(*config.difficulty(), seed);
        let mut controller = Self::with_opponent(config, player_name, opponent);
        controller.seed = seed;
        controller
    }

    /// Starts a new match from the menu.
    ///
    /// # Errors
    ///
    /// [`MatchError::MatchRunning`] unless the controller is at the menu.
    #[instrument(skip(self))]
    pub fn start(&mut self, config: MatchConfig, player_name: String) -> Result<(), MatchError> {
        if self.phase != MatchPhase::Menu {
            return Err(MatchError::MatchRunning);
        }
        self.opponent = Opponent::for_difficulty(*config.difficulty(), self.seed);
        self.state = MatchState::new(config, player_name);
        self.board.reset();
        self.phase = MatchPhase::InRound;
        info!(mode = %config.mode(), difficulty = %config.difficulty(), "Match started");
        Ok(())
    }
}

impl<S: Strategy> MatchController<S> {
    /// Starts a match against a specific opponent.
    #[instrument(skip(opponent))]
    pub fn with_opponent(config: MatchConfig, player_name: String, opponent: S) -> Self {
        info!(
            mode = %config.mode(),
            difficulty = %config.difficulty(),
            player = %player_name,
            "Match started"
        );
        Self {
            state: MatchState::new(config, player_name),
            board: Board::new(),
            opponent,
            phase: MatchPhase::InRound,
            seed: None,
            next_ticket: 0,
        }
    }

    /// Scores and configuration.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Outcome of the live board.
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Plays the player's move and, if the round continues, the opponent's
    /// reply.
    ///
    /// Both moves, the outcome checks and the score update happen together;
    /// on error nothing changes.
    ///
    /// # Errors
    ///
    /// [`MatchError::NotInRound`] outside a round,
    /// [`MatchError::InvalidMove`] if the board refuses the cell, or
    /// [`MatchError::OpponentMove`] if the strategy's reply is refused.
    #[instrument(skip(self))]
    pub fn play(&mut self, index: usize) -> Result<TurnReport, MatchError> {
        if self.phase != MatchPhase::InRound {
            return Err(MatchError::NotInRound);
        }

        let mut board = self.board;
        board.place(index, Mark::Player)?;
        let mut outcome = board.outcome();

        let mut opponent_move = None;
        if !outcome.is_terminal()
            && let Some(reply) = self.opponent.select_move(&board)
        {
            board.place(reply, Mark::Opponent).map_err(|e| {
                warn!(reply, error = %e, "Opponent strategy chose an illegal move");
                MatchError::OpponentMove(e)
            })?;
            opponent_move = Some(reply);
            outcome = board.outcome();
        }

        self.board = board;
        debug!(
            player_move = index,
            opponent_move = ?opponent_move,
            outcome = %outcome,
            board = %self.board,
            "Turn played"
        );

        let ticket = if outcome.is_terminal() {
            self.state.record_outcome(&outcome);
            let ticket = self.issue_ticket();
            self.phase = MatchPhase::RoundOver { outcome, ticket };
            info!(
                outcome = %outcome,
                round = self.state.round_number(),
                player = self.state.player_score(),
                opponent = self.state.opponent_score(),
                "Round over"
            );
            Some(ticket)
        } else {
            None
        };

        Ok(TurnReport {
            player_move: index,
            opponent_move,
            outcome,
            ticket,
        })
    }

    /// Redeems a round-over ticket.
    ///
    /// Counts the round. If the match is complete, appends the player's
    /// record to `store` (exactly once per match), resets the counters and
    /// returns to [`MatchPhase::Menu`]. A failed write is logged and reported
    /// in the summary; it does not keep the match open.
    ///
    /// # Errors
    ///
    /// [`MatchError::RoundInProgress`] or [`MatchError::NotInRound`] if no
    /// round is waiting, [`MatchError::StaleTicket`] if `ticket` is not the
    /// pending one.
    #[instrument(skip(self, store))]
    pub fn advance_round(
        &mut self,
        ticket: AdvanceTicket,
        store: &mut dyn HighScoreStore,
    ) -> Result<RoundAdvance, MatchError> {
        let pending = match self.phase {
            MatchPhase::RoundOver { ticket, .. } => ticket,
            MatchPhase::InRound => return Err(MatchError::RoundInProgress),
            MatchPhase::Menu => return Err(MatchError::NotInRound),
        };
        if pending != ticket {
            warn!(?ticket, ?pending, "Ignoring stale advance ticket");
            return Err(MatchError::StaleTicket(ticket));
        }

        self.state.complete_round();

        if self.state.is_complete() {
            let final_state = self.state.clone();
            let record = final_state.to_record();
            let mode = *final_state.config().mode();
            let saved = match store.append_and_resort(mode, record.clone()) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Failed to save high score");
                    false
                }
            };
            info!(
                player = final_state.player_score(),
                opponent = final_state.opponent_score(),
                rounds = final_state.rounds_played(),
                saved,
                "Match complete"
            );
            self.return_to_menu();
            return Ok(RoundAdvance::MatchComplete(MatchSummary::new(
                final_state,
                record,
                saved,
            )));
        }

        self.board.reset();
        self.phase = MatchPhase::InRound;
        let round = self.state.round_number();
        info!(round, target = self.state.target(), "Next round");
        Ok(RoundAdvance::NextRound { round })
    }

    /// Clears the board mid-round without touching the score.
    ///
    /// # Errors
    ///
    /// [`MatchError::NotInRound`] once the round is decided or no match is
    /// running.
    #[instrument(skip(self))]
    pub fn restart_round(&mut self) -> Result<(), MatchError> {
        if self.phase != MatchPhase::InRound {
            return Err(MatchError::NotInRound);
        }
        self.board.reset();
        debug!("Board reset");
        Ok(())
    }

    /// Drops the match without saving and returns to the menu.
    ///
    /// Any outstanding ticket becomes stale.
    #[instrument(skip(self))]
    pub fn abandon(&mut self) {
        info!(
            rounds = self.state.rounds_played(),
            phase = ?self.phase,
            "Match abandoned"
        );
        self.return_to_menu();
    }

    fn issue_ticket(&mut self) -> AdvanceTicket {
        self.next_ticket += 1;
        AdvanceTicket(self.next_ticket)
    }

    fn return_to_menu(&mut self) {
        self.state.reset_counters();
        self.board.reset();
        self.phase = MatchPhase::Menu;
    }
}
