//! Integration tests for wellness-core against realistic service payloads.
//!
//! Run with:
//!   cargo test -p wellness-core --test payloads

use serde_json::json;
use wellness_core::render::{render_plan_result, render_today, render_trace, TraceSection};
use wellness_core::trend::{self, Chart};
use wellness_core::{
    aggregate, CheckIn, DashboardOverview, DecisionTrace, Mood, NutritionMeal, PlanResult,
    QuestionList, TopItems, TrendSet, UserIntake, YogaPlan,
};

// ============================================================================
// Request bodies
// ============================================================================

mod request_body_tests {
    use super::*;

    #[test]
    fn test_check_in_body_shape() {
        let mut check_in = CheckIn::default();
        check_in.set_mood(Mood::Stressed);
        check_in.set_energy(3.26);
        check_in.set_adherence(140);
        check_in.ingredients = "rice,lentils".to_string();

        let body = serde_json::to_value(&check_in).unwrap();
        assert_eq!(
            body,
            json!({
                "mood": "stressed",
                "mood_score": 5,
                "appetite": 5.0,
                "energy": 3.5,
                "sleep_hours": 7.0,
                "adherence": 100,
                "ingredients": "rice,lentils",
                "notes": ""
            })
        );
    }

    #[test]
    fn test_intake_body_shape() {
        let mut intake = UserIntake::default();
        intake.name = "Asha".to_string();
        intake.email = "asha@example.com".to_string();
        intake.goals.toggle(wellness_core::Goal::StressRelief);
        intake.goals.toggle(wellness_core::Goal::Flexibility);
        intake.goals.toggle(wellness_core::Goal::StressRelief);

        let body = serde_json::to_value(&intake).unwrap();
        assert_eq!(body["age"], 25);
        assert_eq!(body["goals"], json!(["flexibility"]));
        assert_eq!(body["allergies"], json!([]));
        assert_eq!(body["activity_level"], "moderate");
    }
}

// ============================================================================
// Check-in replies
// ============================================================================

mod plan_tests {
    use super::*;

    fn reply() -> PlanResult {
        serde_json::from_value(json!({
            "checkin_id": 41,
            "reasoning": {
                "explanation": "Stress is elevated; favouring calming practice.",
                "energy_trend": "declining",
                "appetite_trend": "stable"
            },
            "plans": {
                "yoga": {
                    "id": 9,
                    "session_type": "stress_relief",
                    "duration_minutes": 20,
                    "youtube_url": "https://www.youtube.com/watch?v=v7AYKMP6rOE",
                    "youtube_title": "Yoga For Stress",
                    "youtube_video_id": "v7AYKMP6rOE",
                    "description": "A slow, grounding flow."
                },
                "nutrition": [
                    {
                        "meal_type": "breakfast",
                        "recipe_name": "Rice Porridge",
                        "ingredients": ["rice", "milk", "cardamom"],
                        "nutrients": {"calories": 310.2, "protein": 8.4, "fiber": 1.2},
                        "sattvic_score": 9,
                        "simplicity_index": 8,
                        "instructions": "Simmer rice in milk."
                    },
                    {
                        "meal_type": "lunch",
                        "recipe_name": "Lentil Khichdi",
                        "ingredients": ["rice", "lentils"],
                        "nutrients": {"calories": "420", "protein": 16.1, "fiber": null},
                        "sattvic_score": 10
                    },
                    {
                        "meal_type": "dinner",
                        "recipe_name": "Steamed Vegetables",
                        "nutrients": null
                    }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_totals_over_mixed_meals() {
        let result = reply();
        let totals = aggregate::totals(result.nutrition_meals());

        assert_eq!(totals.meal_count, 3);
        assert_eq!(totals.calories_display(), "730");
        assert_eq!(totals.protein_display(), "24.5g");
        assert_eq!(totals.fiber_display(), "1.2g");
        assert_eq!(aggregate::average_sattvic(result.nutrition_meals()), 9.5);
    }

    #[test]
    fn test_rendered_plan() {
        let view = render_plan_result(&reply());
        assert_eq!(view.meals.len(), 3);
        assert_eq!(view.meals[2].details, "No instructions available.");
        assert!(view.meals[2].nutrients.is_none());

        let text = view.to_string();
        assert!(text.contains("Energy trend: declining | Appetite trend: stable"));
        assert!(text.contains("Watch: Yoga For Stress"));
        assert!(text.contains("lunch: Lentil Khichdi"));
        assert!(text.contains("Total Calories: 730"));
    }

    #[test]
    fn test_plan_without_yoga() {
        let result: PlanResult = serde_json::from_value(json!({
            "checkin_id": 42,
            "plans": {"yoga": null, "nutrition": []}
        }))
        .unwrap();

        let view = render_plan_result(&result);
        assert!(view.yoga.is_none());
        assert!(view.totals.is_none());
    }

    #[test]
    fn test_today_listing_field_names() {
        let meals: Vec<NutritionMeal> = serde_json::from_value(json!([{
            "id": 3,
            "meal_type": "breakfast",
            "recipe_name": "Upma",
            "ingredients": ["semolina", "peas", "carrot", "ginger", "curry leaves",
                            "mustard seeds", "ghee", "salt", "lemon"],
            "nutrients": {"calories": 280},
            "sattvic_score": 8.5,
            "meal_simplicity_index": 7,
            "recipe_instructions": "Roast semolina.\nAdd vegetables.",
            "date": "2025-03-04"
        }]))
        .unwrap();
        let yoga = YogaPlan {
            duration_minutes: Some(15),
            session_type: Some("energizing".to_string()),
            ..Default::default()
        };

        let view = render_today(Some(&yoga), &meals);
        assert_eq!(meals[0].simplicity_index, Some(7.0));
        assert!(view.meals[0].ingredients.as_ref().unwrap().ends_with("salt..."));
        assert_eq!(view.meals[0].details, "Roast semolina.\nAdd vegetables.");
        assert_eq!(view.summary.yoga_label(), "15 min");
        assert_eq!(view.summary.sattvic_label(), "8.5/10");
    }
}

// ============================================================================
// Dashboard
// ============================================================================

mod dashboard_tests {
    use super::*;

    #[test]
    fn test_trends_payload_to_charts() {
        let trends: TrendSet = serde_json::from_value(json!({
            "adherence": [
                {"date": "2025-03-01T08:00:00", "value": 60},
                {"date": "2025-03-02T08:00:00", "value": 75}
            ],
            "stress": [
                {"date": "2025-03-01T09:00:00", "value": 7},
                {"date": "2025-03-03T09:00:00", "value": 5}
            ],
            "motivation": [
                {"date": "2025-03-01T09:00:00", "value": 4}
            ],
            "protein": []
        }))
        .unwrap();

        let adherence = trend::line_chart(&trends, &trend::ADHERENCE_CHART);
        assert_eq!(adherence.points()[1].label, "3/2/2025");
        assert_eq!(adherence.points()[1].value, 75.0);

        let paired = trend::paired_chart(&trends, &trend::STRESS_MOTIVATION_CHART);
        assert_eq!(paired.points()[1].primary, 5.0);
        assert_eq!(paired.points()[1].secondary, 0.0);

        assert_eq!(
            trend::line_chart(&trends, &trend::PROTEIN_CHART),
            Chart::NoData(trend::PROTEIN_CHART.empty_message)
        );
    }

    #[test]
    fn test_overview_and_top_items() {
        let overview: DashboardOverview = serde_json::from_value(json!({
            "yoga": {"streak": 4, "consistency_percentage": 71.4},
            "nutrition": {"protein_total": 320.5, "fiber_total": 80, "calcium_total": 900},
            "wellness": {"stress_reduction": 55.0, "adherence_avg": 80, "adherence_improvement": 5},
            "period": {"start": "2025-02-02", "end": "2025-03-04"}
        }))
        .unwrap();

        let cards = aggregate::stat_cards(&overview);
        assert!(cards
            .iter()
            .all(|card| card.direction == aggregate::Direction::Up));
        assert_eq!(cards[0].to_string(), "Yoga Consistency: 71.4% (Improving)");

        let items: TopItems = serde_json::from_value(json!({
            "top_meals": [
                {"name": "Khichdi", "count": 6},
                {"name": "Poha", "count": 4},
                {"name": "Upma", "count": 3},
                {"name": "Dal", "count": 1}
            ],
            "recent_videos": "unavailable"
        }))
        .unwrap();
        assert_eq!(aggregate::leading(&items.top_meals).len(), 3);
        assert!(items.recent_videos.is_empty());
    }
}

// ============================================================================
// Quiz and traces
// ============================================================================

mod quiz_and_trace_tests {
    use super::*;

    #[test]
    fn test_question_list_skips_unusable_questions() {
        let list: QuestionList = serde_json::from_value(json!({
            "questions": [
                {"id": "stress", "question": "How stressed do you feel?", "scale": "1-10", "category": "mental"},
                {"question": "missing id"},
                {"id": "sleep", "question": "How well did you sleep?"}
            ]
        }))
        .unwrap();

        let ids: Vec<_> = list.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["stress", "sleep"]);
    }

    #[test]
    fn test_full_trace() {
        let trace: DecisionTrace = serde_json::from_value(json!({
            "id": 77,
            "agent_name": "PlannerAgent",
            "date": "2025-03-04T18:45:10.552",
            "explanation": "High stress with low energy.",
            "triggered_rules": [
                {"rule_id": "low_energy_gentle", "condition": "energy < 4", "action": "gentle session"},
                "legacy rule text"
            ],
            "memory_retrieved": [
                {"type": "preference", "content": {"likes": ["khichdi"]}, "last_accessed": "2025-03-01"}
            ],
            "plan_chosen": {"yoga": "stress_relief"},
            "tools_called": {"youtube_search": 1, "recipe_db": 0}
        }))
        .unwrap();

        let sections = render_trace(&trace);
        assert_eq!(sections.len(), 6);
        assert_eq!(
            sections[0],
            TraceSection::Header {
                agent: Some("PlannerAgent".to_string()),
                date: Some("3/4/2025, 6:45:10 PM".to_string()),
            }
        );
        let TraceSection::Rules(rules) = &sections[2] else {
            panic!("expected rules");
        };
        assert_eq!(rules[0].title, "low_energy_gentle");
        assert_eq!(rules[1].title, "legacy rule text");

        let TraceSection::Tools(tools) = &sections[5] else {
            panic!("expected tools");
        };
        assert!(tools[0].used);
        assert!(!tools[1].used);
    }
}
