//! Dashboard payloads: overview statistics, trend series and top items.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient;

/// One dated value of a trend series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub value: f64,
}

impl TrendPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// An ordered series of points, kept in the order received.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn new(points: Vec<TrendPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'de> Deserialize<'de> for TrendSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::new(lenient::vec_or_empty(deserializer)?))
    }
}

impl FromIterator<TrendPoint> for TrendSeries {
    fn from_iter<I: IntoIterator<Item = TrendPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Named series from the trends endpoint (adherence, stress, motivation, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendSet {
    series: IndexMap<String, TrendSeries>,
}

impl TrendSet {
    pub fn get(&self, name: &str) -> Option<&TrendSeries> {
        self.series.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, series: TrendSeries) {
        self.series.insert(name.into(), series);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    #[serde(default, deserialize_with = "lenient::record_or_default")]
    pub yoga: YogaStats,
    #[serde(default, deserialize_with = "lenient::record_or_default")]
    pub nutrition: NutritionStats,
    #[serde(default, deserialize_with = "lenient::record_or_default")]
    pub wellness: WellnessStats,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub period: Option<Period>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YogaStats {
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub streak: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub consistency_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionStats {
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub protein_total: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub fiber_total: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub calcium_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellnessStats {
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub stress_reduction: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub adherence_avg: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub adherence_improvement: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(default, deserialize_with = "lenient::string")]
    pub start: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopItems {
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub top_meals: Vec<TopMeal>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub recent_videos: Vec<RecentVideo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopMeal {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub count: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentVideo {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub session_type: Option<String>,
}
