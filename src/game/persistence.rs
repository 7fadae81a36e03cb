//! Session persistence
//!
//! Serializes the durable part of a session into its storage slot and rebuilds
//! a session from it on mount.
//!
//! # Format
//!
//! One JSON object, no version field:
//!
//! ```json
//! {
//!   "pgn": "1. e4 e5",
//!   "position": "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
//!   "moveLog": ["White: e4", "Black: e5"],
//!   "whiteCaptured": [],
//!   "blackCaptured": []
//! }
//! ```
//!
//! The PGN is authoritative. Everything else is rebuilt from replaying it and
//! only compared against the stored copies.
//!
//! # Error Handling
//!
//! - Save failures are logged and never interrupt play
//! - Restore failures are returned to the caller, which falls back to a fresh session

use crate::core::error::CoreError;
use crate::core::storage::SessionStorage;
use crate::game::error::{GameError, GameResult};
use crate::game::resources::{CapturedPieces, MoveHistory};
use crate::game::rules::RulesEngine;
use crate::game::types::{MoveRecord, PieceType};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// What the storage slot holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    /// Move history, with FEN headers for non-standard starts
    pub pgn: String,
    /// Position after the last move
    pub position: String,
    /// Display strings, e.g. `"White: e4"`
    pub move_log: Vec<String>,
    /// Piece codes of Black pieces captured by White
    pub white_captured: Vec<String>,
    /// Piece codes of White pieces captured by Black
    pub black_captured: Vec<String>,
}

impl PersistedSession {
    /// Snapshot of a live session
    pub fn capture<E: RulesEngine>(
        engine: &E,
        history: &MoveHistory,
        captured: &CapturedPieces,
    ) -> Self {
        Self {
            pgn: engine.pgn(),
            position: engine.fen(),
            move_log: history.display_lines(),
            white_captured: piece_codes(&captured.white_captured),
            black_captured: piece_codes(&captured.black_captured),
        }
    }

    pub fn to_json(&self) -> GameResult<String> {
        serde_json::to_string(self).map_err(|e| GameError::Core(CoreError::from(e)))
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        serde_json::from_str(json).map_err(|e| GameError::Core(CoreError::from(e)))
    }
}

/// Session state rebuilt from a snapshot
#[derive(Debug)]
pub struct Restored<E> {
    pub engine: E,
    pub history: MoveHistory,
    pub captured: CapturedPieces,
}

fn piece_codes(pieces: &[PieceType]) -> Vec<String> {
    pieces.iter().map(|p| p.to_char().to_string()).collect()
}

/// Write the session into the slot, overwriting whatever was there
///
/// Failures are logged; the in-memory session stays authoritative.
pub fn save<S: SessionStorage>(storage: &mut S, snapshot: &PersistedSession) {
    let json = match snapshot.to_json() {
        Ok(json) => json,
        Err(e) => {
            error!("[PERSIST] Failed to serialize session: {}", e);
            return;
        }
    };

    match storage.save(&json) {
        Ok(()) => debug!(
            "[PERSIST] Saved session ({} moves)",
            snapshot.move_log.len()
        ),
        Err(e) => error!("[PERSIST] Failed to write session slot: {}", e),
    }
}

/// Delete the slot
pub fn clear<S: SessionStorage>(storage: &mut S) {
    match storage.clear() {
        Ok(()) => debug!("[PERSIST] Cleared session slot"),
        Err(e) => error!("[PERSIST] Failed to clear session slot: {}", e),
    }
}

/// Read and parse the slot; `Ok(None)` when it is absent
pub fn load_snapshot<S: SessionStorage>(storage: &S) -> GameResult<Option<PersistedSession>> {
    let Some(json) = storage.load()? else {
        return Ok(None);
    };
    PersistedSession::from_json(&json).map(Some)
}

/// Rebuild engine, move log and capture lists by replaying the snapshot's PGN
pub fn rehydrate<E: RulesEngine>(snapshot: &PersistedSession) -> GameResult<Restored<E>> {
    let mut engine = E::default();
    let records = engine.load_pgn(&snapshot.pgn)?;

    let mut history = MoveHistory::default();
    let mut captured = CapturedPieces::default();
    for record in records {
        record_capture(&mut captured, &record);
        history.add_move(record);
    }

    if engine.fen() != snapshot.position {
        warn!(
            "[PERSIST] Stored position '{}' disagrees with replayed '{}'; using replay",
            snapshot.position,
            engine.fen()
        );
    }
    if history.display_lines() != snapshot.move_log {
        warn!("[PERSIST] Stored move log disagrees with replayed history; using replay");
    }
    if piece_codes(&captured.white_captured) != snapshot.white_captured
        || piece_codes(&captured.black_captured) != snapshot.black_captured
    {
        warn!("[PERSIST] Stored capture lists disagree with replayed history; using replay");
    }

    info!("[PERSIST] Restored session with {} moves", history.len());
    Ok(Restored {
        engine,
        history,
        captured,
    })
}

/// Credit a record's capture to the side that made the move
pub(crate) fn record_capture(captured: &mut CapturedPieces, record: &MoveRecord) {
    if let Some(piece) = record.captured {
        captured.add_capture(record.piece_color.opposite(), piece);
    }
}
