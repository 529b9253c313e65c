//! Daily check-in form values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Stressed,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Neutral, Mood::Sad, Mood::Stressed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
            Self::Stressed => "stressed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Neutral => "Neutral",
            Self::Sad => "Sad",
            Self::Stressed => "Stressed",
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mood: {}", s))
    }
}

/// A bounded, stepped numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamp into `[min, max]` and snap to the nearest step from `min`.
    /// Non-finite input becomes `min`.
    pub fn constrain(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

pub const MOOD_SCORE: Range = Range::new(1.0, 10.0, 1.0);
pub const APPETITE: Range = Range::new(0.0, 10.0, 0.5);
pub const ENERGY: Range = Range::new(0.0, 10.0, 0.5);
pub const SLEEP_HOURS: Range = Range::new(0.0, 24.0, 0.5);
pub const ADHERENCE: Range = Range::new(0.0, 100.0, 1.0);

/// Check-in form state. Numeric fields are only reachable through setters,
/// so they never leave their ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckIn {
    mood: Mood,
    mood_score: u8,
    appetite: f64,
    energy: f64,
    sleep_hours: f64,
    adherence: u8,
    pub ingredients: String,
    pub notes: String,
}

impl Default for CheckIn {
    fn default() -> Self {
        Self {
            mood: Mood::Neutral,
            mood_score: 5,
            appetite: 5.0,
            energy: 5.0,
            sleep_hours: 7.0,
            adherence: 50,
            ingredients: String::new(),
            notes: String::new(),
        }
    }
}

impl CheckIn {
    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn mood_score(&self) -> u8 {
        self.mood_score
    }

    pub fn appetite(&self) -> f64 {
        self.appetite
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours
    }

    pub fn adherence(&self) -> u8 {
        self.adherence
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
    }

    pub fn set_mood_score(&mut self, score: i64) {
        self.mood_score = MOOD_SCORE.constrain(score as f64) as u8;
    }

    pub fn set_appetite(&mut self, appetite: f64) {
        self.appetite = APPETITE.constrain(appetite);
    }

    pub fn set_energy(&mut self, energy: f64) {
        self.energy = ENERGY.constrain(energy);
    }

    pub fn set_sleep_hours(&mut self, hours: f64) {
        self.sleep_hours = SLEEP_HOURS.constrain(hours);
    }

    pub fn set_adherence(&mut self, adherence: i64) {
        self.adherence = ADHERENCE.constrain(adherence as f64) as u8;
    }

    /// Ingredients as entered, split on commas with blanks dropped.
    pub fn ingredient_list(&self) -> Vec<&str> {
        self.ingredients
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let check_in = CheckIn::default();
        assert_eq!(check_in.mood(), Mood::Neutral);
        assert_eq!(check_in.mood_score(), 5);
        assert_eq!(check_in.sleep_hours(), 7.0);
        assert_eq!(check_in.adherence(), 50);
    }

    #[test]
    fn test_setters_clamp_and_snap() {
        let mut check_in = CheckIn::default();

        check_in.set_mood_score(0);
        assert_eq!(check_in.mood_score(), 1);
        check_in.set_mood_score(42);
        assert_eq!(check_in.mood_score(), 10);

        check_in.set_appetite(7.3);
        assert_eq!(check_in.appetite(), 7.5);
        check_in.set_energy(-3.0);
        assert_eq!(check_in.energy(), 0.0);
        check_in.set_sleep_hours(30.0);
        assert_eq!(check_in.sleep_hours(), 24.0);
        check_in.set_sleep_hours(f64::NAN);
        assert_eq!(check_in.sleep_hours(), 0.0);

        check_in.set_adherence(150);
        assert_eq!(check_in.adherence(), 100);
        check_in.set_adherence(-5);
        assert_eq!(check_in.adherence(), 0);
    }

    #[test]
    fn test_wire_format() {
        let mut check_in = CheckIn::default();
        check_in.set_mood(Mood::Stressed);
        check_in.ingredients = "rice,lentils".to_string();

        let body = serde_json::to_value(&check_in).unwrap();
        assert_eq!(body["mood"], "stressed");
        assert_eq!(body["mood_score"], 5);
        assert_eq!(body["sleep_hours"], 7.0);
        assert_eq!(body["ingredients"], "rice,lentils");
    }

    #[test]
    fn test_ingredient_list() {
        let mut check_in = CheckIn::default();
        check_in.ingredients = " rice, ,lentils ,".to_string();
        assert_eq!(check_in.ingredient_list(), vec!["rice", "lentils"]);
    }

    #[test]
    fn test_mood_from_str() {
        assert_eq!("Happy".parse::<Mood>().unwrap(), Mood::Happy);
        assert!("ecstatic".parse::<Mood>().is_err());
    }
}
