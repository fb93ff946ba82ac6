//! One renderer for every dashboard page.
//!
//! A [`Dashboard`] is a layout (which shape the document has and how cards
//! look) plus a guard (what happens when the page lacks some of the layout's
//! regions). A render pass checks the regions, fetches the document once,
//! derives everything it shows from that snapshot and then writes each
//! region, falling back to the error state when the fetch, the decode or the
//! shape check fails.

use crate::errors::RenderError;
use crate::history::{build_history, entries_from_value, placeholder_row, render_rows};
use crate::markup::Markup;
use crate::models::{HistoryResponse, ProjectsDocument, ProjectsResponse};
use crate::page::Page;
use crate::projects::{build_projects, placeholder_card, render_grid, WAITING_MESSAGE};
use crate::source::{load_document, DataSource};
use chrono::{DateTime, FixedOffset, Local};
use serde_json::Value;
use tracing::{debug, error, warn};

pub const CURRENT_COUNT: &str = "current-count";
pub const LAST_UPDATED: &str = "last-updated";
pub const HISTORY_BODY: &str = "history-body";
pub const GLOBAL_LAST_UPDATED: &str = "global-last-updated";
pub const PROJECTS_GRID: &str = "projects-grid";

pub const LOAD_FAILED: &str = "Could not load data. Check the browser console for details.";

const SINGLE_METRIC_TARGETS: &[&str] = &[CURRENT_COUNT, LAST_UPDATED, HISTORY_BODY];
const PROJECT_TARGETS: &[&str] = &[GLOBAL_LAST_UPDATED, PROJECTS_GRID];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    SingleMetric,
    ProjectGrid { logos: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetGuard {
    /// Every target must exist; a missing one fails before fetching.
    Strict,
    /// Only existing targets are written; with none, nothing is fetched.
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    Empty,
    Failed,
    Skipped,
}

/// Clock and display offset for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub now: DateTime<FixedOffset>,
    pub offset: FixedOffset,
}

impl RenderContext {
    pub fn at(now: DateTime<FixedOffset>, offset: FixedOffset) -> Self {
        Self {
            now: now.with_timezone(&offset),
            offset,
        }
    }

    /// The current time, shown in `offset` or in the local offset.
    pub fn current(offset: Option<FixedOffset>) -> Self {
        let local = Local::now().fixed_offset();
        let offset = offset.unwrap_or(*local.offset());
        Self::at(local, offset)
    }
}

enum Derived {
    NoData,
    History(HistoryResponse),
    Projects(ProjectsResponse),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dashboard {
    pub layout: Layout,
    pub guard: TargetGuard,
}

impl Dashboard {
    pub const fn single_metric() -> Self {
        Self {
            layout: Layout::SingleMetric,
            guard: TargetGuard::Strict,
        }
    }

    pub const fn project_grid() -> Self {
        Self {
            layout: Layout::ProjectGrid { logos: false },
            guard: TargetGuard::Strict,
        }
    }

    /// Project grid with logos that also works on partial pages.
    pub const fn project_showcase() -> Self {
        Self {
            layout: Layout::ProjectGrid { logos: true },
            guard: TargetGuard::Lenient,
        }
    }

    pub fn targets(&self) -> &'static [&'static str] {
        match self.layout {
            Layout::SingleMetric => SINGLE_METRIC_TARGETS,
            Layout::ProjectGrid { .. } => PROJECT_TARGETS,
        }
    }

    pub async fn render<S: DataSource>(
        &self,
        source: &S,
        page: &mut Page,
        ctx: &RenderContext,
    ) -> Result<RenderOutcome, RenderError> {
        let present: Vec<&'static str> = self
            .targets()
            .iter()
            .copied()
            .filter(|id| page.contains(id))
            .collect();

        match self.guard {
            TargetGuard::Strict => {
                if let Some(missing) = self.targets().iter().find(|id| !page.contains(id)) {
                    warn!("page is missing required element '{missing}'");
                    return Err(RenderError::MissingElement((*missing).to_string()));
                }
            }
            TargetGuard::Lenient => {
                if present.is_empty() {
                    debug!("no dashboard regions on page, skipping fetch");
                    return Ok(RenderOutcome::Skipped);
                }
            }
        }

        let derived = match load_document(source).await.and_then(|value| self.derive(&value, ctx)) {
            Ok(derived) => derived,
            Err(err) => {
                error!("failed to render dashboard: {err}");
                for id in &present {
                    page.set_markup(id, self.error_markup(id))?;
                }
                return Ok(RenderOutcome::Failed);
            }
        };

        for id in &present {
            page.set_markup(id, self.region_markup(id, &derived))?;
        }

        Ok(match derived {
            Derived::NoData => RenderOutcome::Empty,
            Derived::Projects(ref response) if response.projects.is_empty() => RenderOutcome::Empty,
            _ => RenderOutcome::Rendered,
        })
    }

    fn derive(&self, value: &Value, ctx: &RenderContext) -> Result<Derived, RenderError> {
        match self.layout {
            Layout::SingleMetric => match entries_from_value(value) {
                Some(entries) => Ok(Derived::History(build_history(entries, ctx.offset)?)),
                None => Ok(Derived::NoData),
            },
            Layout::ProjectGrid { .. } => {
                let document = ProjectsDocument::from_value(value)
                    .ok_or_else(|| RenderError::shape("document is null"))?;
                Ok(Derived::Projects(build_projects(&document, ctx.now, ctx.offset)))
            }
        }
    }

    fn region_markup(&self, id: &str, derived: &Derived) -> Markup {
        match (id, derived) {
            (CURRENT_COUNT, Derived::History(history)) => Markup::text(&history.current_count),
            (CURRENT_COUNT, _) => Markup::text("No data yet"),
            (LAST_UPDATED, Derived::History(history)) => Markup::text(&history.last_updated),
            (LAST_UPDATED, _) => Markup::text(WAITING_MESSAGE),
            (HISTORY_BODY, Derived::History(history)) => render_rows(&history.rows),
            (HISTORY_BODY, _) => placeholder_row("No entries yet"),
            (GLOBAL_LAST_UPDATED, Derived::Projects(response)) => Markup::text(&response.last_updated),
            (PROJECTS_GRID, Derived::Projects(response)) => render_grid(&response.projects, self.logos()),
            _ => Markup::new(),
        }
    }

    fn error_markup(&self, id: &str) -> Markup {
        match id {
            CURRENT_COUNT => Markup::text("Error"),
            LAST_UPDATED | GLOBAL_LAST_UPDATED => Markup::text(LOAD_FAILED),
            HISTORY_BODY => placeholder_row("Error loading data"),
            PROJECTS_GRID => placeholder_card("Error loading projects", LOAD_FAILED),
            _ => Markup::new(),
        }
    }

    fn logos(&self) -> bool {
        matches!(self.layout, Layout::ProjectGrid { logos: true })
    }
}
