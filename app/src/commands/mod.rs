//! Subcommand handlers

pub mod claim;
pub mod found;
pub mod results;
pub mod search;

use chrono::NaiveDate;
use finders_core::Coordinate;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

/// Parse `LAT,LON` as given on the command line
pub fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{}'", raw))?;
    let latitude: f64 = lat.trim().parse().map_err(|_| format!("bad latitude '{}'", lat))?;
    let longitude: f64 = lon.trim().parse().map_err(|_| format!("bad longitude '{}'", lon))?;

    let coord = Coordinate::new(latitude, longitude);
    if !coord.is_valid() {
        return Err(format!("coordinate out of range: {}", coord));
    }
    Ok(coord)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM-DD but got '{}'", raw))
}

/// Where interactive answers come from
pub trait LineSource {
    /// Show `question` and read one line; `None` on end of input
    async fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>>;

    /// Yes/no question; anything but an explicit yes counts as no
    async fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        let answer = self.ask(&format!("{} [はい=y / いいえ=n]", question)).await?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "はい")
        ))
    }
}

/// Line-oriented terminal prompt
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

}

impl LineSource for Prompt {
    async fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(question.as_bytes()).await?;
        stdout.write_all(b" ").await?;
        stdout.flush().await?;
        Ok(self.lines.next_line().await?)
    }
}
