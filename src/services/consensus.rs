//! Consensus grading over the scoring service.
//!
//! The scoring service is nondeterministic, so each subjective criterion
//! is sampled several times and the top scores are averaged. The
//! best-of-N / top-K policy damps outlier low scores from a single noisy
//! generation without letting one high outlier dominate.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{GenerateRequest, ScoringClient};

/// System instruction framing every scoring request.
const SYSTEM_PROMPT: &str = "You are an expert venture capital evaluator. \
You evaluate applicants to a selective deeptech program. \
Output ONLY a single integer score from 0 to 100. \
0 is terrible, 100 is world-class/exceptional. \
Do not explain. Just the number.";

/// The four subjective criteria graded by consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Community,
    HackProject,
    Research,
    Startup,
}

impl Criterion {
    pub const ALL: [Criterion; 4] =
        [Self::Community, Self::HackProject, Self::Research, Self::Startup];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Community => "Community",
            Self::HackProject => "Hack/Personal Project",
            Self::Research => "Research",
            Self::Startup => "Startup",
        }
    }

    /// Criterion-specific instruction block appended to the context.
    pub fn instructions(&self) -> &'static str {
        match self {
            Self::Community => {
                "Look for roles in associations, community involvement, connections to fellows.\n\
                 Keywords: 'association', 'president', 'founder', 'fellow', 'community'.\n\
                 High grade for leadership roles and strong community spirit."
            }
            Self::HackProject => {
                "Look for won hackathons, code repositories, personal projects.\n\
                 Verify if they are technical/deeptech enough.\n\
                 Evidence like 'won', '1st place', repository links, 'built'.\n\
                 High grade for winning major hacks or complex technical projects."
            }
            Self::Research => {
                "Look for publications, preprints, deeptech research ambition.\n\
                 Links to papers are a plus.\n\
                 Must be deeptech research, not just fine-tuning existing models.\n\
                 High grade for published papers or serious research involvement."
            }
            Self::Startup => {
                "Looking for website, money raised, VC backing.\n\
                 Standard rule: high grade for raised funds + deeptech focus + live product.\n\
                 OVERRIDE RULE: if the applicant mentions raising 1 million or more \
                 (e.g. \"raised 2.1 million\", \"1M\", \"1000k\", \"$1M\", \"\u{20ac}1M\"), \
                 the grade MUST be 100. Ignore all other criteria: raising >= 1M means 100."
            }
        }
    }
}

/// Best-of-N sampler over the scoring service.
pub struct ConsensusGrader<C: ScoringClient> {
    client: Arc<C>,
    samples: usize,
    top_k: usize,
}

impl<C: ScoringClient> ConsensusGrader<C> {
    pub fn new(client: Arc<C>, samples: usize, top_k: usize) -> Self {
        Self { client, samples, top_k }
    }

    /// Grade one criterion. Invalid or failed samples are dropped; only
    /// total sample exhaustion yields a zero.
    pub async fn grade(&self, criterion: Criterion, context: &str) -> f64 {
        let prompt = format!(
            "Evaluate the following applicant for the criteria: {}.\n\n\
             Context:\n{}\n\n\
             Specific Instructions:\n{}\n\n\
             Grade (0-100):",
            criterion.label(),
            context,
            criterion.instructions(),
        );

        let mut scores = Vec::with_capacity(self.samples);
        for sample in 0..self.samples {
            let request = GenerateRequest::new(prompt.clone()).with_system(SYSTEM_PROMPT);
            match self.client.generate(request).await {
                Ok(response) => match extract_score(&response.text) {
                    Some(score) => scores.push(score),
                    None => debug!(
                        criterion = criterion.label(),
                        sample, "scoring response carried no valid integer, dropping sample"
                    ),
                },
                Err(err) => {
                    warn!(criterion = criterion.label(), sample, error = %err, "scoring call failed, dropping sample");
                }
            }
        }

        if scores.is_empty() {
            return 0.0;
        }

        scores.sort_unstable_by(|a, b| b.cmp(a));
        let best = &scores[..scores.len().min(self.top_k)];
        #[allow(clippy::cast_precision_loss)]
        let mean = f64::from(best.iter().sum::<u32>()) / best.len() as f64;
        mean
    }
}

/// Extract the last standalone 1-3 digit integer in `[0, 100]` from a
/// response. Longer digit runs (years, phone numbers) never match.
pub fn extract_score(text: &str) -> Option<u32> {
    let mut last = None;
    let mut run_start = None;
    let bytes = text.as_bytes();

    for (i, byte) in bytes.iter().enumerate() {
        if byte.is_ascii_digit() {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take() {
            consider_run(&text[start..i], &mut last);
        }
    }
    if let Some(start) = run_start {
        consider_run(&text[start..], &mut last);
    }
    last
}

fn consider_run(run: &str, last: &mut Option<u32>) {
    if (1..=3).contains(&run.len()) {
        if let Ok(value) = run.parse::<u32>() {
            if value <= 100 {
                *last = Some(value);
            }
        }
    }
}
