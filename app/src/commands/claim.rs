//! `finders claim`: confirm that a candidate is yours

use super::{LineSource, Prompt};
use crate::state::AppState;
use anyhow::{anyhow, Result};
use clap::Args;
use finders_core::ItemId;
use finders_engine::ClaimGate;

#[derive(Args, Debug)]
pub struct ClaimArgs {
    /// Candidate item to claim
    #[arg(long)]
    pub item_id: i64,
}

pub async fn run(state: &AppState, args: ClaimArgs) -> Result<()> {
    let client = state.client()?;
    let mut gate = ClaimGate::new(ItemId(args.item_id));
    let mut prompt = Prompt::new();

    if !prompt.confirm(gate.prompt()).await? {
        gate.decline()?;
        println!("Not claimed");
        return Ok(());
    }

    let receipt = gate.confirm(&client).await.map_err(|e| anyhow!(e.notice()))?;
    println!("Item {} claimed. {}", receipt.item_id, receipt.message);
    Ok(())
}
