//! Pawn promotion interstitial
//!
//! When a move has been validated as reaching the back rank, the session stores
//! it here instead of committing it. The UI then asks the player for a piece and
//! either resolves or cancels the request.

use crate::game::types::{PieceColor, Square};

/// A validated promotion move waiting for its piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRequest {
    pub from: Square,
    pub to: Square,
    pub color: PieceColor,
}

/// Pending promotion slot; empty when no choice is outstanding
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingPromotion {
    request: Option<PromotionRequest>,
}

impl PendingPromotion {
    /// Start a new promotion
    pub fn start(&mut self, from: Square, to: Square, color: PieceColor) {
        self.request = Some(PromotionRequest { from, to, color });
    }

    /// Clear the pending promotion (after player selects or cancels)
    pub fn clear(&mut self) {
        self.request = None;
    }

    /// Remove and return the request
    pub fn take(&mut self) -> Option<PromotionRequest> {
        self.request.take()
    }

    pub fn request(&self) -> Option<PromotionRequest> {
        self.request
    }

    /// Check if a promotion is pending
    pub fn is_active(&self) -> bool {
        self.request.is_some()
    }
}
