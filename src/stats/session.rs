//! Session detection.
//!
//! The Riot API has no notion of a play session, so the current one is inferred from
//! match timing: walking back from the most recent match, the session ends at the first
//! break between two matches longer than the configured gap.

use std::time::Duration;

use serde::Serialize;

use super::MatchFact;

/// Aggregated results of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub wins: u32,
    pub losses: u32,
    pub games: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// `(kills + assists) / max(1, deaths)` with one decimal
    pub kda: String,
}

impl Default for SessionSummary {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            games: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
            kda: format_kda(0, 0, 0),
        }
    }
}

impl<'a> FromIterator<&'a MatchFact> for SessionSummary {
    fn from_iter<I: IntoIterator<Item = &'a MatchFact>>(iter: I) -> Self {
        let mut summary = iter.into_iter().fold(Self::default(), |mut acc, fact| {
            if fact.win {
                acc.wins += 1;
            } else {
                acc.losses += 1;
            }
            acc.kills += fact.kills;
            acc.deaths += fact.deaths;
            acc.assists += fact.assists;
            acc
        });

        summary.games = summary.wins + summary.losses;
        summary.kda = format_kda(summary.kills, summary.deaths, summary.assists);
        summary
    }
}

/// Matches of the current session, most recent first.
///
/// Matches missing either timestamp are ignored.
pub fn current_session(facts: &[MatchFact], gap: Duration) -> Vec<&MatchFact> {
    let threshold = i64::try_from(gap.as_millis()).unwrap_or(i64::MAX);

    let mut timed: Vec<(i64, i64, &MatchFact)> = facts
        .iter()
        .filter_map(|fact| Some((fact.started_at?, fact.ended_at?, fact)))
        .collect();
    timed.sort_by(|a, b| b.0.cmp(&a.0));

    let boundary = timed
        .windows(2)
        .position(|pair| {
            let (newer_start, _, _) = pair[0];
            let (_, older_end, _) = pair[1];
            newer_start.saturating_sub(older_end) > threshold
        })
        .map(|idx| idx + 1)
        .unwrap_or(timed.len());

    timed
        .into_iter()
        .take(boundary)
        .map(|(_, _, fact)| fact)
        .collect()
}

pub fn summarize_session(facts: &[MatchFact], gap: Duration) -> SessionSummary {
    current_session(facts, gap).into_iter().collect()
}

pub fn format_kda(kills: u32, deaths: u32, assists: u32) -> String {
    let ratio = f64::from(kills + assists) / f64::from(deaths.max(1));
    format!("{:.1}", (ratio * 10.0).round() / 10.0)
}
