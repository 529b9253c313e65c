//! Progress dashboard: stat cards, trend charts and top items.

use std::fmt;
use std::sync::Arc;

use gateway_client::GatewayClient;
use wellness_core::aggregate::{self, StatCard};
use wellness_core::dashboard::{RecentVideo, TopMeal};
use wellness_core::trend::{
    self, Chart, ChartPoint, PairedPoint, ADHERENCE_CHART, PROTEIN_CHART, STRESS_MOTIVATION_CHART,
};
use wellness_core::{DashboardOverview, Outcome, RequestState, TopItems, TrendSet};

use crate::panel::{Panel, ViewGuard};

/// Days of history requested for the trend charts.
pub const TREND_DAYS: u32 = 30;

/// Everything one dashboard load fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub overview: DashboardOverview,
    pub trends: TrendSet,
    pub top_items: TopItems,
}

impl Dashboard {
    pub fn stat_cards(&self) -> [StatCard; 4] {
        aggregate::stat_cards(&self.overview)
    }

    pub fn adherence_chart(&self) -> Chart<ChartPoint> {
        trend::line_chart(&self.trends, &ADHERENCE_CHART)
    }

    pub fn stress_motivation_chart(&self) -> Chart<PairedPoint> {
        trend::paired_chart(&self.trends, &STRESS_MOTIVATION_CHART)
    }

    pub fn protein_chart(&self) -> Chart<ChartPoint> {
        trend::line_chart(&self.trends, &PROTEIN_CHART)
    }

    pub fn top_meals(&self) -> &[TopMeal] {
        aggregate::leading(&self.top_items.top_meals)
    }

    pub fn recent_videos(&self) -> &[RecentVideo] {
        aggregate::leading(&self.top_items.recent_videos)
    }
}

fn write_line_chart(f: &mut fmt::Formatter<'_>, title: &str, chart: &Chart<ChartPoint>) -> fmt::Result {
    writeln!(f, "{}", title)?;
    match chart {
        Chart::NoData(message) => writeln!(f, "  {}", message),
        Chart::Ready(points) => {
            for point in points {
                writeln!(f, "  {}: {}", point.label, point.value)?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.stat_cards() {
            writeln!(f, "{}", card)?;
        }

        writeln!(f)?;
        write_line_chart(f, ADHERENCE_CHART.title, &self.adherence_chart())?;

        writeln!(f, "{}", STRESS_MOTIVATION_CHART.title)?;
        match self.stress_motivation_chart() {
            Chart::NoData(message) => writeln!(f, "  {}", message)?,
            Chart::Ready(points) => {
                for point in points {
                    writeln!(
                        f,
                        "  {}: stress {}, motivation {}",
                        point.label, point.primary, point.secondary
                    )?;
                }
            }
        }

        write_line_chart(f, PROTEIN_CHART.title, &self.protein_chart())?;

        writeln!(f, "\nFavorite Meals")?;
        for meal in self.top_meals() {
            writeln!(f, "  {} ({}x)", meal.name, meal.count)?;
        }
        write!(f, "Recent Videos")?;
        for video in self.recent_videos() {
            write!(f, "\n  {}", video.title.as_deref().unwrap_or("Untitled"))?;
            if let Some(session_type) = &video.session_type {
                write!(f, " ({})", session_type)?;
            }
        }
        Ok(())
    }
}

/// Loads the dashboard's three fetches together; any failure fails the load.
pub struct DashboardPanel {
    gateway: Arc<dyn GatewayClient>,
    user_id: i64,
    panel: Panel<Dashboard>,
    guard: ViewGuard,
}

impl DashboardPanel {
    pub fn new(gateway: Arc<dyn GatewayClient>, user_id: i64) -> Self {
        let guard = ViewGuard::new();
        Self {
            gateway,
            user_id,
            panel: Panel::new("dashboard", guard.clone()),
            guard,
        }
    }

    pub async fn load(&self) -> Outcome {
        self.panel
            .run(async {
                let (overview, trends, top_items) = tokio::try_join!(
                    self.gateway.dashboard_overview(self.user_id),
                    self.gateway.trends(self.user_id, TREND_DAYS),
                    self.gateway.top_items(self.user_id),
                )
                .map_err(|err| format!("Failed to load dashboard: {}", err.user_message()))?;

                Ok(Dashboard {
                    overview,
                    trends,
                    top_items,
                })
            })
            .await
    }

    pub async fn state(&self) -> RequestState<Dashboard> {
        self.panel.state().await
    }

    pub async fn dashboard(&self) -> Option<Dashboard> {
        self.panel.value().await
    }

    pub async fn error(&self) -> Option<String> {
        self.panel.error().await
    }

    pub fn teardown(&self) {
        self.guard.teardown();
    }
}
