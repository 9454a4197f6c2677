//! Arithmetic aggregation feeding the radar and bar charts.
//!
//! The same competency formula is applied to the respondent's own answers and
//! to the pooled evaluator rows, producing two parallel series for radar
//! comparison. All functions here are pure and total: empty input yields
//! empty or zero output, never an error.

use serde::Serialize;

use super::domain::{Competency, Question, QuestionId, SCALE_MAX};

/// Radar charts with fewer than this many axes are visually degenerate and
/// must be suppressed by the caller.
pub const RADAR_MIN_COMPETENCIES: usize = 3;

/// One labelled percentage entry of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyScore {
    pub label: String,
    pub percentage: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage per competency over the questions attached to `survey_questions`.
///
/// For each competency with at least one question on the survey:
/// `sum(scale values) / (question_count * 10) * 100`, rounded to two
/// decimals; scores with no scale value contribute zero. Competencies with no
/// question on the survey are excluded entirely. `scores` may carry several
/// rows per question when multiple evaluators scored the same response.
pub fn competency_scores(
    competencies: &[Competency],
    survey_questions: &[Question],
    scores: &[(QuestionId, Option<u8>)],
) -> Vec<CompetencyScore> {
    let mut series = Vec::new();

    for competency in competencies {
        let question_ids: Vec<QuestionId> = survey_questions
            .iter()
            .filter(|question| question.competency == Some(competency.id))
            .map(|question| question.id)
            .collect();

        if question_ids.is_empty() {
            continue;
        }

        let max_total = (question_ids.len() as u32) * u32::from(SCALE_MAX);
        let total: u32 = scores
            .iter()
            .filter(|(question, _)| question_ids.contains(question))
            .filter_map(|(_, scale)| scale.map(u32::from))
            .sum();

        series.push(CompetencyScore {
            label: competency.name.clone(),
            percentage: round2(f64::from(total) / f64::from(max_total) * 100.0),
        });
    }

    series
}

/// Overall percentage over the scored (non-null) values only, or 0 when
/// nothing was scored.
pub fn overall_percentage<I>(scales: I) -> f64
where
    I: IntoIterator<Item = Option<u8>>,
{
    let scored: Vec<u32> = scales.into_iter().flatten().map(u32::from).collect();
    if scored.is_empty() {
        return 0.0;
    }

    let total: u32 = scored.iter().sum();
    let max_total = (scored.len() as u32) * u32::from(SCALE_MAX);
    round2(f64::from(total) / f64::from(max_total) * 100.0)
}

/// Whether a radar chart should be rendered for a series of this length.
pub fn show_radar(series_len: usize) -> bool {
    series_len >= RADAR_MIN_COMPETENCIES
}
