//! Mental-health quiz questions, responses and scores.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::checkin::Range;
use crate::lenient;

/// Answer scale shared by every question.
pub const ANSWER_SCALE: Range = Range::new(1.0, 10.0, 1.0);

/// Initial answer for every question, so the quiz is submittable untouched.
pub const ANSWER_MIDPOINT: u8 = 5;

/// Question id → answer on the 1–10 scale.
pub type ResponseMap = IndexMap<String, u8>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub scale: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
}

/// Envelope of the question listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionList {
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub questions: Vec<QuizQuestion>,
}

/// Body of a quiz submission.
#[derive(Debug, Serialize)]
pub struct QuizSubmission<'a> {
    pub responses: &'a ResponseMap,
}

/// Per-dimension scores returned after a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::number_map")]
    pub scores: IndexMap<String, f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
}

impl QuizResult {
    /// Score lines in service order, e.g. `stress: 7/10`.
    pub fn score_lines(&self) -> Vec<String> {
        self.scores
            .iter()
            .map(|(key, value)| format!("{}: {}/10", key, value))
            .collect()
    }
}
