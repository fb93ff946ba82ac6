use crate::dashboard::Dashboard;
use crate::errors::AppError;
use crate::history::{build_history, entries_from_value};
use crate::models::{HistoryResponse, ProjectsDocument, ProjectsResponse};
use crate::page::Page;
use crate::projects::build_projects;
use crate::source::{load_document, DataSource};
use crate::state::AppState;
use crate::ui;
use crate::year::stamp_year;
use axum::{
    extract::State,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{Html, IntoResponse},
    Json,
};
use tracing::error;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_page(&state, Dashboard::single_metric(), ui::single_metric_page()).await
}

pub async fn projects(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_page(&state, Dashboard::project_grid(), ui::project_grid_page()).await
}

pub async fn showcase(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_page(&state, Dashboard::project_showcase(), ui::project_showcase_page()).await
}

pub async fn badge(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_page(&state, Dashboard::project_showcase(), ui::badge_page()).await
}

/// Passes the shared document through so browsers can fetch it directly.
pub async fn raw_document(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bytes = state.source.fetch().await.map_err(|err| {
        error!("failed to serve download-data.json: {err}");
        AppError::from(err)
    })?;
    Ok((
        [(CONTENT_TYPE, "application/json"), (CACHE_CONTROL, "no-cache")],
        bytes,
    ))
}

pub async fn get_history(State(state): State<AppState>) -> Result<Json<Option<HistoryResponse>>, AppError> {
    let ctx = state.render_context();
    let value = load_document(state.source.as_ref()).await?;
    let history = entries_from_value(&value)
        .map(|entries| build_history(entries, ctx.offset))
        .transpose()?;
    Ok(Json(history))
}

pub async fn get_projects(State(state): State<AppState>) -> Result<Json<ProjectsResponse>, AppError> {
    let ctx = state.render_context();
    let value = load_document(state.source.as_ref()).await?;
    let document = ProjectsDocument::from_value(&value)
        .ok_or_else(|| AppError::bad_gateway("download-data.json is null"))?;
    Ok(Json(build_projects(&document, ctx.now, ctx.offset)))
}

async fn render_page(state: &AppState, dashboard: Dashboard, mut page: Page) -> Result<Html<String>, AppError> {
    let ctx = state.render_context();
    stamp_year(&mut page, ctx.now);
    dashboard.render(state.source.as_ref(), &mut page, &ctx).await?;
    Ok(Html(page.finish()))
}
