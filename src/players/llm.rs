//! Language-model opponent.

use super::{MoveSource, MoveSourceError, SourceKind, parse_move};
use crate::llm_client::{LlmClient, LlmError};
use strictly_sos_rules::{GameState, Move};
use tracing::{debug, info, instrument, warn};

const SYSTEM_PROMPT: &str = "You are an expert SOS player. \
     When asked for a move, respond with ONLY row,col,letter and nothing else.";

/// Text completion service behind an [`LlmSource`].
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the model's reply to a system prompt and user message.
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError>;
}

#[async_trait::async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        self.generate(system_prompt, user_message).await
    }
}

/// Asks a language model for moves, retrying on bad answers.
///
/// Every request counts against `max_attempts`, whether it failed in
/// transport, produced no parsable move, or named a cell that cannot be
/// played. Earlier failures are fed back into the next prompt.
#[derive(Debug, Clone)]
pub struct LlmSource<B = LlmClient> {
    name: String,
    backend: B,
    max_attempts: u32,
}

impl<B: CompletionBackend> LlmSource<B> {
    /// Creates a source allowed `max_attempts` requests per move (at least one).
    pub fn new(name: impl Into<String>, backend: B, max_attempts: u32) -> Self {
        let name = name.into();
        let max_attempts = max_attempts.max(1);
        info!(llm = %name, max_attempts, "Creating LLM player");
        Self {
            name,
            backend,
            max_attempts,
        }
    }

    /// Requests allowed per move.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn check(game: &GameState, mv: Move) -> Result<Move, String> {
        game.validate(mv.row, mv.col)
            .map(|()| mv)
            .map_err(|e| format!("{} is not playable: {}", mv, e))
    }
}

/// Rough stage of the game from the share of empty cells.
pub fn game_phase(game: &GameState) -> &'static str {
    let total = game.size() * game.size();
    let empty = game.board().empty_cells().count();
    if empty * 10 > total * 7 {
        "early"
    } else if empty * 10 > total * 3 {
        "mid"
    } else {
        "late"
    }
}

/// Builds the user message for one request.
///
/// `failures` lists what went wrong on earlier attempts for this move.
pub fn build_prompt(game: &GameState, failures: &[String]) -> String {
    let player = game.current_player();
    let size = game.size();
    let mut prompt = format!(
        "You are the {player} player.\n\n\
         GAME RULES:\n\
         - Goal: create S-O-S sequences in straight lines (horizontal, vertical, diagonal)\n\
         - {rules}\n\n\
         CURRENT STATE:\n\
         Board: {size}x{size} | Phase: {phase} game\n\
         Scores: Blue={blue}, Red={red}\n\
         You are: {player}\n\n\
         BOARD (. = empty, rows and columns numbered from 0):\n\
         {board}\n\n\
         STRATEGY:\n\
         1. ATTACK: complete any S-O or O-S partial sequence in any of the 8 directions.\n\
         2. DEFEND: avoid leaving S . S or S O . open for your opponent.\n\
         3. SETUP: an O between two S letters can score in several directions at once.\n",
        rules = game.variant().describe(),
        phase = game_phase(game),
        blue = game.blue_score(),
        red = game.red_score(),
        board = game.board(),
    );

    if !failures.is_empty() {
        prompt.push_str("\nYOUR EARLIER ANSWERS WERE REJECTED:\n");
        for failure in failures {
            prompt.push_str("- ");
            prompt.push_str(failure);
            prompt.push('\n');
        }
        prompt.push_str("Pick an empty cell inside the board.\n");
    }

    prompt.push_str("\nRESPONSE: Output ONLY: row,col,letter\nExample: 2,3,O\n\nYour move:");
    prompt
}

#[async_trait::async_trait]
impl<B: CompletionBackend> MoveSource for LlmSource<B> {
    #[instrument(skip(self, game), fields(llm = %self.name, player = %game.current_player()))]
    async fn get_move(&mut self, game: &GameState) -> Result<Option<Move>, MoveSourceError> {
        if game.is_over() {
            return Err(MoveSourceError::GameOver);
        }
        if game.board().is_full() {
            return Err(MoveSourceError::NoMovesAvailable);
        }

        let mut failures: Vec<String> = Vec::new();
        for attempt in 1..=self.max_attempts {
            debug!(attempt, "Requesting move from LLM");
            let prompt = build_prompt(game, &failures);

            let outcome = match self.backend.complete(SYSTEM_PROMPT, &prompt).await {
                Err(e) => Err(format!("request failed: {}", e.message)),
                Ok(reply) => {
                    debug!(attempt, reply = %reply.trim(), "LLM replied");
                    match parse_move(&reply) {
                        None => Err(format!("no row,col,letter found in {:?}", reply.trim())),
                        Some(mv) => Self::check(game, mv),
                    }
                }
            };

            match outcome {
                Ok(mv) => {
                    info!(attempt, %mv, "LLM chose move");
                    return Ok(Some(mv));
                }
                Err(reason) => {
                    warn!(attempt, %reason, "LLM attempt failed");
                    failures.push(reason);
                }
            }
        }

        Err(MoveSourceError::Exhausted {
            source_name: self.name.clone(),
            attempts: self.max_attempts,
            last_error: failures.pop().unwrap_or_default(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Llm
    }
}
