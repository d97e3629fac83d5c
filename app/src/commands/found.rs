//! `finders report-found`: register an item someone picked up

use super::{parse_coordinate, parse_date};
use crate::state::AppState;
use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use finders_core::{Category, Coordinate, ImageRef};
use finders_engine::FoundReportDraft;

#[derive(Args, Debug)]
pub struct FoundArgs {
    /// Item category (phone, wallet, bag, keys, other)
    #[arg(short, long, default_value = "other")]
    pub category: String,

    /// Day it was found (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Where it was found as LAT,LON
    #[arg(short, long, value_parser = parse_coordinate)]
    pub location: Option<Coordinate>,

    /// Where it was found, in words
    #[arg(short, long, default_value = "")]
    pub notes: String,

    /// Photo of the item (exactly two)
    #[arg(short, long = "image")]
    pub images: Vec<String>,
}

pub async fn run(state: &AppState, args: FoundArgs) -> Result<()> {
    let draft = draft_from(args)?;
    let client = state.client()?;
    let receipt = draft.submit(&client).await.map_err(|e| anyhow!(e.notice()))?;
    println!("Registered as item {}. {}", receipt.item_id, receipt.message);
    Ok(())
}

fn draft_from(args: FoundArgs) -> Result<FoundReportDraft> {
    let today = Local::now().date_naive();
    let category: Category = args
        .category
        .parse()
        .map_err(|e: finders_core::Error| anyhow!(e.notice()))?;

    let mut draft = FoundReportDraft::with_date(today);
    draft.set_category(category);
    if let Some(date) = args.date {
        draft.set_date_found(date, today).map_err(|e| anyhow!(e.notice()))?;
    }
    if let Some(point) = args.location {
        draft.tap_map(point)?;
    }
    draft.set_location_notes(args.notes);
    draft.extend(args.images.into_iter().map(ImageRef::new));
    Ok(draft)
}
