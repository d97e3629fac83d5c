//! Per-candidate claim confirmation

use crate::service::MatchingService;
use finders_core::{ClaimReceipt, Error, ItemId, Result};
use tracing::{error, info};

/// Question shown on the confirmation screen
pub const CONFIRM_PROMPT: &str = "これはあなたのものですか？";

#[derive(Debug, Clone)]
pub enum ClaimState {
    AwaitingConfirmation,
    Claiming,
    Claimed(ClaimReceipt),
    Declined,
    /// Remote call failed; confirming again retries
    Failed(String),
}

impl ClaimState {
    fn name(&self) -> &'static str {
        match self {
            ClaimState::AwaitingConfirmation => "awaiting confirmation",
            ClaimState::Claiming => "claiming",
            ClaimState::Claimed(_) => "claimed",
            ClaimState::Declined => "declined",
            ClaimState::Failed(_) => "failed",
        }
    }
}

/// Confirmation step between "this might be mine" and the claim call
#[derive(Debug, Clone)]
pub struct ClaimGate {
    item_id: ItemId,
    state: ClaimState,
}

impl ClaimGate {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            state: ClaimState::AwaitingConfirmation,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn state(&self) -> &ClaimState {
        &self.state
    }

    pub fn prompt(&self) -> &'static str {
        CONFIRM_PROMPT
    }

    /// "Yes": ask the server to mark the item claimed
    pub async fn confirm<S: MatchingService>(&mut self, service: &S) -> Result<ClaimReceipt> {
        match self.state {
            ClaimState::AwaitingConfirmation | ClaimState::Failed(_) => {}
            _ => {
                return Err(Error::InvalidTransition {
                    state: self.state.name(),
                    action: "confirm the claim",
                })
            }
        }

        self.state = ClaimState::Claiming;
        match service.claim_item(self.item_id).await {
            Ok(receipt) => {
                info!("Claimed item {}", self.item_id);
                self.state = ClaimState::Claimed(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                error!("Claim for item {} failed: {}", self.item_id, e);
                self.state = ClaimState::Failed(e.notice());
                Err(e)
            }
        }
    }

    /// "No": back out without contacting the server
    pub fn decline(&mut self) -> Result<()> {
        match self.state {
            ClaimState::AwaitingConfirmation | ClaimState::Failed(_) => {
                self.state = ClaimState::Declined;
                Ok(())
            }
            _ => Err(Error::InvalidTransition {
                state: self.state.name(),
                action: "decline the claim",
            }),
        }
    }
}
