use crate::config::Config;
use crate::dashboard::RenderContext;
use crate::source::DocumentSource;
use chrono::FixedOffset;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<DocumentSource>,
    pub display_offset: Option<FixedOffset>,
}

impl AppState {
    pub fn new(source: DocumentSource, display_offset: Option<FixedOffset>) -> Self {
        Self {
            source: Arc::new(source),
            display_offset,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.source.clone(), config.display_offset)
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::current(self.display_offset)
    }
}
