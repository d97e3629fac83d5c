//! `finders results`: list candidate matches for a submitted query

use crate::state::AppState;
use anyhow::Result;
use clap::Args;
use finders_core::QueryId;
use finders_engine::{FetchStatus, MatchResultsView};

#[derive(Args, Debug)]
pub struct ResultsArgs {
    /// Identifier returned when the search was submitted
    #[arg(long)]
    pub query_id: i64,
}

pub async fn run(state: &AppState, args: ResultsArgs) -> Result<()> {
    let client = state.client()?;
    let mut view = MatchResultsView::new(state.config.default_center);
    view.enter(&client, QueryId(args.query_id)).await;
    print_markers(&view);
    Ok(())
}

pub fn print_markers(view: &MatchResultsView) {
    if let FetchStatus::Failed(reason) = view.status() {
        println!("No candidates could be loaded ({})", reason);
        return;
    }
    if view.markers().is_empty() {
        println!("No candidates yet");
        return;
    }

    for marker in view.markers() {
        println!("#{} at {}", marker.item_id, marker.coordinate);
        if !marker.location_notes.is_empty() {
            println!("    {}", marker.location_notes);
        }
        if let Some(url) = &marker.image_url {
            println!("    photo: {}", url);
        }
        println!("    [{}] finders claim --item-id {}", marker.action.label, marker.action.item_id);
    }
}
