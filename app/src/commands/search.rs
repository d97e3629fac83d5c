//! `finders search`: compose a lost-item query, answer the quiz, submit

use super::{parse_coordinate, parse_date, results, LineSource, Prompt};
use crate::state::AppState;
use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use clap::Args;
use finders_core::{Category, Coordinate, ErrorKind, ImageRef};
use finders_engine::{
    MatchResultsView, MatchingService, QuizGenerator, SearchHandoff, SearchSession,
    SearchWorkflow, SubmitProgress, WorkflowState,
};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Item category (phone, wallet, bag, keys, other)
    #[arg(short, long, default_value = "other")]
    pub category: String,

    /// Free-text description of the item
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Where it might have been lost, in words
    #[arg(short, long, default_value = "")]
    pub notes: String,

    /// Day it was lost (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Candidate location as LAT,LON (repeat up to three times)
    #[arg(short, long = "location", value_parser = parse_coordinate)]
    pub locations: Vec<Coordinate>,

    /// Photo of the item (repeatable)
    #[arg(short, long = "image")]
    pub images: Vec<String>,
}

pub async fn run(state: &AppState, args: SearchArgs) -> Result<()> {
    let category: Category = args
        .category
        .parse()
        .map_err(|e: finders_core::Error| anyhow!(e.notice()))?;
    let client = state.client()?;

    let workflow = SearchWorkflow::new(QuizGenerator::new(state.config.quiz_policy))
        .with_default_center(state.config.default_center);
    let mut session = SearchSession::new(workflow, client.clone());

    {
        let wf = session.workflow_mut();
        wf.set_category(category)?;
        wf.set_description(args.description)?;
        wf.set_location_notes(args.notes)?;
        if let Some(date) = args.date {
            wf.set_date_lost(date).map_err(|e| anyhow!(e.notice()))?;
        }
        for point in args.locations {
            wf.add_location(point).map_err(|e| anyhow!(e.notice()))?;
        }
        wf.add_attachments(args.images.into_iter().map(ImageRef::new))?;
    }

    let handoff = submit_search(&mut session, &mut Prompt::new()).await?;

    println!("Search registered as query {}", handoff.query_id);
    let mut view = MatchResultsView::from_handoff(&handoff);
    view.enter(&client, handoff.query_id).await;
    results::print_markers(&view);
    Ok(())
}

/// Press submit until the query is accepted.
///
/// Validation notices while the quiz is open send the user back to the
/// questions with the query intact. Remote failures offer a retry.
pub async fn submit_search<S, L>(
    session: &mut SearchSession<S>,
    input: &mut L,
) -> Result<SearchHandoff>
where
    S: MatchingService,
    L: LineSource,
{
    loop {
        let progress = match session.press_submit().await {
            Ok(progress) => progress,
            Err(e)
                if e.kind() == ErrorKind::Validation
                    && session.workflow().state() == &WorkflowState::QuizPending =>
            {
                println!("{}", e.notice());
                answer_quiz(session, input).await?;
                continue;
            }
            Err(e) => bail!(e.notice()),
        };

        match progress {
            SubmitProgress::QuizReady { questions } => {
                info!("Quiz generated with {} question(s)", questions);
                answer_quiz(session, input).await?;
            }
            SubmitProgress::Submitted(handoff) => return Ok(handoff),
            SubmitProgress::Failed { notice, kind } => {
                warn!("Submission failed ({:?})", kind);
                println!("Submission failed: {}", notice);
                if !input.confirm("Try again?").await? {
                    bail!("search not submitted");
                }
            }
            SubmitProgress::Discarded => bail!("search abandoned"),
        }
    }
}

async fn answer_quiz<S, L>(session: &mut SearchSession<S>, input: &mut L) -> Result<()>
where
    S: MatchingService,
    L: LineSource,
{
    let questions: Vec<String> = session
        .workflow()
        .query()
        .quiz()
        .map(|q| q.questions().to_vec())
        .unwrap_or_default();

    for (index, question) in questions.iter().enumerate() {
        let answer = input
            .ask(&format!("Q{}: {}", index + 1, question))
            .await?
            .ok_or_else(|| anyhow!("input closed before the quiz was answered"))?;
        session.workflow_mut().set_answer(index, answer)?;
    }
    Ok(())
}
