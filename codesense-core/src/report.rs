//! Projection of a loaded review and its view state into a render tree.
//!
//! [`build`] is pure: the same `(ReviewSession, ViewState)` always yields the
//! same [`ReportTree`], and nothing in it re-reads or re-validates the
//! payload. The tree borrows every string from the session, so building one
//! per frame costs a handful of small vectors.

use crate::model::{Category, Severity};
use crate::score::{classify, Tier};
use crate::store::ReviewSession;
use crate::view_state::{ComparisonTab, Section, ViewState};

/// Text of the comparison panel when there are no corrections.
pub const NO_CORRECTIONS: &str = "No code corrections available";

/// Everything the report view draws, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTree<'a> {
    pub metrics: Vec<MetricCard<'a>>,
    pub comparison: ComparisonPanel<'a>,
    /// Structure, Implementation, Best Practices.
    pub categories: Vec<CategoryPanel<'a>>,
    pub recommendations: RecommendationsPanel<'a>,
}

/// One card of the metrics grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricCard<'a> {
    pub label: &'a str,
    pub value: i64,
    pub tier: Tier,
}

impl MetricCard<'_> {
    /// Number of filled cells for a track `track` cells wide.
    ///
    /// Values above 100 give more cells than the track holds; negative values
    /// give none.
    pub fn fill_cells(&self, track: u16) -> usize {
        let filled = self.value.max(0).saturating_mul(i64::from(track)) / 100;
        usize::try_from(filled).unwrap_or(usize::MAX)
    }
}

/// The code-comparison panel. The tab strip is always shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPanel<'a> {
    pub active_tab: ComparisonTab,
    pub body: ComparisonBody<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonBody<'a> {
    /// No corrections: the [`NO_CORRECTIONS`] placeholder, whatever the tab.
    Empty,
    /// Preformatted source shown verbatim.
    Source(&'a str),
    /// One card per change, in payload order.
    Changes(Vec<ChangeCard<'a>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeCard<'a> {
    pub kind: &'a str,
    pub location: &'a str,
    pub original: &'a str,
    pub correction: &'a str,
    pub explanation: &'a str,
}

/// A scored, collapsible finding category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPanel<'a> {
    pub category: Category,
    pub title: &'static str,
    pub score: i64,
    pub tier: Tier,
    pub expanded: bool,
    /// `None` while collapsed; `Some(vec![])` for an expanded empty category.
    pub findings: Option<Vec<FindingCard<'a>>>,
}

impl CategoryPanel<'_> {
    pub fn section(&self) -> Section {
        self.category.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindingCard<'a> {
    pub title: &'a str,
    pub explanation: &'a str,
    pub recommendation: Option<&'a str>,
    pub severity: Severity,
}

/// The unscored recommendations section.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationsPanel<'a> {
    pub expanded: bool,
    /// `None` while collapsed.
    pub items: Option<Vec<RecommendationCard<'a>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationCard<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// Renders a score the way every panel prints it.
pub fn score_label(score: i64) -> String {
    format!("{score}/100")
}

/// Builds the render tree for `session` under `view`.
pub fn build<'a>(session: &'a ReviewSession, view: &ViewState) -> ReportTree<'a> {
    let result = &session.result;

    let metrics = result
        .metrics
        .iter()
        .map(|m| MetricCard { label: &m.name, value: m.value, tier: classify(m.value) })
        .collect();

    let categories = Category::ALL
        .into_iter()
        .map(|category| {
            let group = result.category(category);
            let expanded = view.is_expanded(category.into());
            CategoryPanel {
                category,
                title: category.title(),
                score: group.score,
                tier: classify(group.score),
                expanded,
                findings: expanded.then(|| {
                    group
                        .findings
                        .iter()
                        .map(|f| FindingCard {
                            title: f.title(),
                            explanation: &f.explanation,
                            recommendation: f.recommendation(),
                            severity: f.severity,
                        })
                        .collect()
                }),
            }
        })
        .collect();

    let rec_expanded = view.is_expanded(Section::Recommendations);
    let recommendations = RecommendationsPanel {
        expanded: rec_expanded,
        items: rec_expanded.then(|| {
            result
                .recommendations
                .iter()
                .map(|r| RecommendationCard { title: &r.title, description: &r.description })
                .collect()
        }),
    };

    ReportTree {
        metrics,
        comparison: comparison_panel(session, view.active_tab),
        categories,
        recommendations,
    }
}

fn comparison_panel(session: &ReviewSession, active_tab: ComparisonTab) -> ComparisonPanel<'_> {
    let body = match session.result.available_corrections() {
        None => ComparisonBody::Empty,
        Some(corrections) => match active_tab {
            ComparisonTab::Original => ComparisonBody::Source(&session.original_code),
            ComparisonTab::Corrected => ComparisonBody::Source(&corrections.corrected_code),
            ComparisonTab::Changes => ComparisonBody::Changes(
                corrections
                    .changes
                    .iter()
                    .map(|c| ChangeCard {
                        kind: &c.kind,
                        location: &c.location,
                        original: &c.original,
                        correction: &c.correction,
                        explanation: &c.explanation,
                    })
                    .collect(),
            ),
        },
    };
    ComparisonPanel { active_tab, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{load, MemoryStore, ORIGINAL_CODE_KEY, REVIEW_RESULT_KEY};

    fn session(payload: serde_json::Value, original: &str) -> ReviewSession {
        let store = MemoryStore::new()
            .with(REVIEW_RESULT_KEY, payload.to_string())
            .with(ORIGINAL_CODE_KEY, original);
        load(&store).unwrap()
    }

    fn base_payload() -> serde_json::Value {
        serde_json::json!({
            "metrics": {"Quality": 85},
            "structureAnalysis": {"score": 90, "findings": []},
            "implementationReview": {"score": 65, "findings": [
                {"issue": "Unused import", "explanation": "Remove it", "severity": "warning"}
            ]},
            "bestPractices": {"score": 40, "findings": [
                {"aspect": "Naming", "explanation": "Use snake_case",
                 "recommendation": "Rename fooBar", "severity": "error"},
                {"explanation": "No title here"}
            ]},
            "recommendations": [
                {"title": "Add tests", "description": "Cover the parser"},
                {"title": "Document", "description": "Explain the API"}
            ]
        })
    }

    fn with_corrections(mut payload: serde_json::Value) -> serde_json::Value {
        payload["corrections"] = serde_json::json!({
            "hasCorrections": true,
            "correctedCode": "def f(): pass",
            "changes": [{
                "type": "rename", "location": "line 3",
                "original": "x", "correction": "y", "explanation": "clarity"
            }]
        });
        payload
    }

    #[test]
    fn no_corrections_shows_empty_state_on_every_tab() {
        let s = session(base_payload(), "print('hi')");
        for tab in ComparisonTab::ALL {
            let mut view = ViewState::default();
            view.select_tab(tab);
            let tree = build(&s, &view);
            assert_eq!(tree.comparison.active_tab, tab);
            assert_eq!(tree.comparison.body, ComparisonBody::Empty);
        }
    }

    #[test]
    fn gated_off_corrections_show_empty_state() {
        let mut payload = with_corrections(base_payload());
        payload["corrections"]["hasCorrections"] = serde_json::json!(false);
        let s = session(payload, "code");
        for tab in ComparisonTab::ALL {
            let mut view = ViewState::default();
            view.select_tab(tab);
            assert_eq!(build(&s, &view).comparison.body, ComparisonBody::Empty);
        }
    }

    #[test]
    fn metric_card_carries_value_and_tier() {
        let s = session(base_payload(), "");
        let tree = build(&s, &ViewState::default());
        assert_eq!(tree.metrics.len(), 1);
        let card = tree.metrics[0];
        assert_eq!(card.label, "Quality");
        assert_eq!(score_label(card.value), "85/100");
        assert_eq!(card.tier, Tier::Good);
        assert_eq!(card.fill_cells(100), 85);
        assert_eq!(card.fill_cells(20), 17);
    }

    #[test]
    fn out_of_range_metrics_are_not_clamped() {
        let over = MetricCard { label: "x", value: 150, tier: classify(150) };
        assert_eq!(over.fill_cells(10), 15);
        let under = MetricCard { label: "x", value: -5, tier: classify(-5) };
        assert_eq!(under.fill_cells(10), 0);
        assert_eq!(under.tier, Tier::Critical);
    }

    #[test]
    fn changes_tab_lists_change_cards() {
        let s = session(with_corrections(base_payload()), "x = 1");
        let mut view = ViewState::default();
        view.select_tab(ComparisonTab::Changes);
        let tree = build(&s, &view);
        assert_eq!(
            tree.comparison.body,
            ComparisonBody::Changes(vec![ChangeCard {
                kind: "rename",
                location: "line 3",
                original: "x",
                correction: "y",
                explanation: "clarity",
            }])
        );
    }

    #[test]
    fn source_tabs_show_code_verbatim() {
        let s = session(with_corrections(base_payload()), "  x = 1\n\ty = 2\n");
        let mut view = ViewState::default();
        assert_eq!(build(&s, &view).comparison.body, ComparisonBody::Source("  x = 1\n\ty = 2\n"));
        view.select_tab(ComparisonTab::Corrected);
        assert_eq!(build(&s, &view).comparison.body, ComparisonBody::Source("def f(): pass"));
    }

    #[test]
    fn categories_in_order_with_scores() {
        let s = session(base_payload(), "");
        let tree = build(&s, &ViewState::default());
        let summary: Vec<(&str, i64, Tier)> =
            tree.categories.iter().map(|c| (c.title, c.score, c.tier)).collect();
        assert_eq!(
            summary,
            [
                ("Structure Analysis", 90, Tier::Good),
                ("Implementation Review", 65, Tier::Warning),
                ("Best Practices", 40, Tier::Critical),
            ]
        );
        assert_eq!(tree.categories[0].findings, Some(vec![]));
    }

    #[test]
    fn finding_without_recommendation() {
        let s = session(base_payload(), "");
        let tree = build(&s, &ViewState::default());
        let findings = tree.categories[1].findings.as_ref().unwrap();
        assert_eq!(
            findings[0],
            FindingCard {
                title: "Unused import",
                explanation: "Remove it",
                recommendation: None,
                severity: Severity::Warning,
            }
        );
    }

    #[test]
    fn malformed_finding_renders_with_empty_title() {
        let s = session(base_payload(), "");
        let tree = build(&s, &ViewState::default());
        let findings = tree.categories[2].findings.as_ref().unwrap();
        assert_eq!(findings[0].recommendation, Some("Rename fooBar"));
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[1].title, "");
        assert_eq!(findings[1].severity, Severity::Info);
    }

    #[test]
    fn collapsed_sections_hide_their_lists() {
        let s = session(base_payload(), "");
        let mut view = ViewState::default();
        view.toggle_section(Section::Implementation);
        view.toggle_section(Section::Recommendations);
        let tree = build(&s, &view);

        assert!(tree.categories[0].expanded);
        assert!(!tree.categories[1].expanded);
        assert_eq!(tree.categories[1].findings, None);
        // Score stays visible while collapsed.
        assert_eq!(tree.categories[1].score, 65);
        assert_eq!(tree.recommendations.items, None);

        view.toggle_section(Section::Recommendations);
        let tree = build(&s, &view);
        let titles: Vec<&str> =
            tree.recommendations.items.unwrap().iter().map(|r| r.title).collect();
        assert_eq!(titles, ["Add tests", "Document"]);
    }

    #[test]
    fn category_panel_maps_to_section() {
        let s = session(base_payload(), "");
        let tree = build(&s, &ViewState::default());
        let sections: Vec<Section> = tree.categories.iter().map(|c| c.section()).collect();
        assert_eq!(sections, [Section::Structure, Section::Implementation, Section::BestPractices]);
    }
}
