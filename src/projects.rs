use crate::format::{format_datetime, format_number, format_signed, format_timestamp};
use crate::markup::{safe_href, Markup};
use crate::models::{ProjectCard, ProjectEntry, ProjectSample, ProjectsDocument, ProjectsResponse};
use chrono::{DateTime, FixedOffset};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const WAITING_MESSAGE: &str = "Waiting for the first GitHub Action run to populate data.";
pub const NO_CHANGE: &str = "No change since last check";
const DEFAULT_KIND: &str = "Project";
const DEFAULT_NAME: &str = "Unnamed project";
const NOT_AVAILABLE: &str = "N/A";

/// Sorts by name ignoring case and accents first, then with accents;
/// ties keep their input order.
pub fn sort_projects(projects: &mut [ProjectEntry]) {
    projects.sort_by_cached_key(|project| collation_key(project.name.as_deref().unwrap_or("")));
}

fn collation_key(name: &str) -> (String, String) {
    let base = name
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .to_lowercase();
    (base, name.nfc().collect::<String>().to_lowercase())
}

/// Pre-formatted display string first, then the numeric approximation.
pub fn display_value(sample: Option<&ProjectSample>) -> String {
    let Some(sample) = sample else {
        return NOT_AVAILABLE.to_string();
    };
    if let Some(display) = sample.download_display.as_deref().filter(|text| !text.is_empty()) {
        return display.to_string();
    }
    sample
        .download_approx
        .map(format_number)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn delta(latest: Option<&ProjectSample>, previous: Option<&ProjectSample>) -> Option<f64> {
    let latest = latest?.download_approx?;
    let previous = previous?.download_approx?;
    Some(latest - previous)
}

/// A zero delta and an unknown delta share the same text.
pub fn delta_text(delta: Option<f64>) -> String {
    match delta {
        Some(value) if value != 0.0 => format!("{} since last check", format_signed(value)),
        _ => NO_CHANGE.to_string(),
    }
}

pub fn build_card(project: &ProjectEntry) -> ProjectCard {
    let history = &project.history;
    let latest = history.last();
    let previous = history.len().checked_sub(2).map(|index| &history[index]);
    let delta = delta(latest, previous);

    ProjectCard {
        name: non_empty(project.name.as_deref()).unwrap_or(DEFAULT_NAME).to_string(),
        kind: non_empty(project.kind.as_deref()).unwrap_or(DEFAULT_KIND).to_string(),
        display_value: display_value(latest),
        delta,
        delta_text: delta_text(delta),
        link: non_empty(project.curseforge_url.as_deref()).unwrap_or("#").to_string(),
        logo_url: project.logo_url.clone(),
    }
}

/// Text for the page-wide "last updated" region.
pub fn global_text(
    document: &ProjectsDocument,
    now: DateTime<FixedOffset>,
    offset: FixedOffset,
) -> String {
    if document.projects.is_empty() {
        return WAITING_MESSAGE.to_string();
    }
    let when = match document.last_updated.as_deref() {
        Some(raw) => format_timestamp(Some(raw), offset),
        None => format_datetime(&now, offset),
    };
    format!("Last updated: {when}")
}

pub fn build_projects(
    document: &ProjectsDocument,
    now: DateTime<FixedOffset>,
    offset: FixedOffset,
) -> ProjectsResponse {
    let mut projects = document.projects.clone();
    sort_projects(&mut projects);

    ProjectsResponse {
        last_updated: global_text(document, now, offset),
        projects: projects.iter().map(build_card).collect(),
    }
}

pub fn render_card(card: &ProjectCard, with_logo: bool) -> Markup {
    let mut article = Markup::element("article").class("project-card");

    if with_logo {
        if let Some(logo) = card.logo_url.as_deref() {
            article = article.child(
                Markup::element("img")
                    .class("project-logo")
                    .attr("src", safe_href(logo))
                    .attr("alt", &format!("{} logo", card.name))
                    .attr("loading", "lazy")
                    .void(),
            );
        }
    }

    article
        .child(Markup::element("span").class("project-type").text(&card.kind))
        .child(Markup::element("h3").class("project-name").text(&card.name))
        .child(Markup::element("p").class("project-downloads").text(&card.display_value))
        .child(Markup::element("p").class("project-delta").text(&card.delta_text))
        .child(
            Markup::element("a")
                .class("project-link")
                .attr("href", safe_href(&card.link))
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text("View on CurseForge"),
        )
        .build()
}

pub fn render_grid(cards: &[ProjectCard], with_logo: bool) -> Markup {
    if cards.is_empty() {
        return placeholder_card(
            "No projects yet",
            "Projects will appear here after the first scheduled update.",
        );
    }
    cards.iter().map(|card| render_card(card, with_logo)).collect()
}

pub fn placeholder_card(title: &str, detail: &str) -> Markup {
    Markup::element("article")
        .class("project-card placeholder")
        .child(Markup::element("h3").class("project-name").text(title))
        .child(Markup::element("p").class("project-delta").text(detail))
        .build()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-02-01T08:00:00Z").unwrap()
    }

    fn document(value: serde_json::Value) -> ProjectsDocument {
        ProjectsDocument::from_value(&value).unwrap()
    }

    #[test]
    fn projects_are_sorted_by_name() {
        let doc = document(json!({
            "projects": [
                { "name": "Zeta", "history": [] },
                { "name": "alpha", "history": [] },
                { "history": [] }
            ]
        }));
        let response = build_projects(&doc, now(), utc());
        let names: Vec<_> = response.projects.iter().map(|card| card.name.as_str()).collect();
        assert_eq!(names, vec![DEFAULT_NAME, "alpha", "Zeta"]);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let doc = document(json!({
            "projects": [
                { "name": "Zeta" },
                { "name": "Émile" },
                { "name": "Alpha" },
                { "name": "emile" }
            ]
        }));
        let response = build_projects(&doc, now(), utc());
        let names: Vec<_> = response.projects.iter().map(|card| card.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "emile", "Émile", "Zeta"]);
    }

    #[test]
    fn delta_text_covers_single_and_double_history() {
        let doc = document(json!({
            "projects": [
                { "name": "One", "history": [{ "downloadApprox": 100 }] },
                { "name": "Two", "history": [{ "downloadApprox": 100 }, { "downloadApprox": 120 }] },
                { "name": "Three", "history": [{ "downloadApprox": 120 }, { "downloadApprox": 95 }] }
            ]
        }));
        let response = build_projects(&doc, now(), utc());
        let by_name = |name: &str| {
            response
                .projects
                .iter()
                .find(|card| card.name == name)
                .map(|card| card.delta_text.clone())
                .unwrap()
        };

        assert_eq!(by_name("One"), NO_CHANGE);
        assert_eq!(by_name("Two"), "+20 since last check");
        assert_eq!(by_name("Three"), "-25 since last check");
    }

    #[test]
    fn display_value_prefers_preformatted_text() {
        let with_display = ProjectSample {
            download_display: Some("1.2M".into()),
            download_approx: Some(1_200_000.0),
            timestamp: None,
        };
        assert_eq!(display_value(Some(&with_display)), "1.2M");

        let approx_only = ProjectSample {
            download_approx: Some(1_234_567.0),
            ..ProjectSample::default()
        };
        assert_eq!(display_value(Some(&approx_only)), "1,234,567");

        assert_eq!(display_value(Some(&ProjectSample::default())), NOT_AVAILABLE);
        assert_eq!(display_value(None), NOT_AVAILABLE);
    }

    #[test]
    fn card_defaults_fill_missing_fields() {
        let card = build_card(&ProjectEntry::default());
        assert_eq!(card.name, DEFAULT_NAME);
        assert_eq!(card.kind, DEFAULT_KIND);
        assert_eq!(card.link, "#");
        assert_eq!(card.display_value, NOT_AVAILABLE);
        assert_eq!(card.delta, None);
    }

    #[test]
    fn global_text_falls_back_to_render_time() {
        let doc = document(json!({ "projects": [{ "name": "A" }] }));
        assert_eq!(global_text(&doc, now(), utc()), "Last updated: 2/1/2026, 8:00:00 AM");

        let doc = document(json!({ "lastUpdated": "2026-01-10T20:15:00Z", "projects": [{ "name": "A" }] }));
        assert_eq!(global_text(&doc, now(), utc()), "Last updated: 1/10/2026, 8:15:00 PM");

        let doc = document(json!({ "lastUpdated": "2026-01-10T20:15:00Z", "projects": [] }));
        assert_eq!(global_text(&doc, now(), utc()), WAITING_MESSAGE);
    }

    #[test]
    fn logo_is_only_emitted_when_present_and_enabled() {
        let mut card = build_card(&ProjectEntry {
            name: Some("Mod".into()),
            logo_url: Some("https://media.example/logo.png".into()),
            ..ProjectEntry::default()
        });
        assert!(render_card(&card, true).as_str().contains("<img class=\"project-logo\""));
        assert!(!render_card(&card, false).as_str().contains("<img"));

        card.logo_url = None;
        assert!(!render_card(&card, true).as_str().contains("<img"));
    }

    #[test]
    fn card_fields_are_escaped() {
        let card = build_card(&ProjectEntry {
            name: Some("<img src=x onerror=alert(1)>".into()),
            curseforge_url: Some("javascript:alert(1)".into()),
            ..ProjectEntry::default()
        });
        let html = render_card(&card, true).into_string();
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("href=\"#\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn empty_grid_renders_placeholder_card() {
        let html = render_grid(&[], false).into_string();
        assert!(html.contains("No projects yet"));
        assert_eq!(html.matches("<article").count(), 1);
    }
}
