//! Pipeline — raw log text in, rendered artifacts out.
//!
//! Stages run in order and the first error stops the run. The renderer only
//! ever sees a fully built, sorted series.

use chrono::NaiveDateTime;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::builder::build_timeseries;
use crate::config::ParseConfig;
use crate::error::Result;
use crate::normalizer::normalize;
use crate::render::{ChartRenderer, RenderConfig, RenderRequest};
use crate::types::{HostIdentity, Timeseries};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub series: Timeseries,
    /// Paths the renderer reported writing. Empty when there were no rows.
    pub written: Vec<PathBuf>,
}

pub struct Pipeline<R> {
    parse: ParseConfig,
    render: RenderConfig,
    renderer: R,
}

impl<R: ChartRenderer> Pipeline<R> {
    pub fn new(parse: ParseConfig, render: RenderConfig, renderer: R) -> Self {
        Self {
            parse,
            render,
            renderer,
        }
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Normalize and build without rendering.
    pub fn build(&self, raw: &str) -> Result<Timeseries> {
        self.build_normalized(&self.normalize(raw))
    }

    /// Tab → comma stage on its own, for callers that persist the text.
    pub fn normalize(&self, raw: &str) -> String {
        let normalized = normalize(raw);
        debug!(bytes = raw.len(), lines = normalized.lines().count(), "normalized log");
        normalized
    }

    pub fn build_normalized(&self, normalized: &str) -> Result<Timeseries> {
        build_timeseries(normalized, &self.parse)
    }

    /// Run every stage. A log with no data rows is not an error; it simply
    /// renders nothing.
    pub fn run(
        &self,
        raw: &str,
        host: &HostIdentity,
        generated_at: NaiveDateTime,
    ) -> Result<RunReport> {
        self.run_normalized(&self.normalize(raw), host, generated_at)
    }

    /// [`Pipeline::run`] starting from already-normalized text.
    pub fn run_normalized(
        &self,
        normalized: &str,
        host: &HostIdentity,
        generated_at: NaiveDateTime,
    ) -> Result<RunReport> {
        let series = self.build_normalized(normalized)?;

        if series.is_empty() {
            warn!("log has no data rows; nothing to render");
            return Ok(RunReport {
                series,
                written: Vec::new(),
            });
        }

        let request = RenderRequest::new(&series, host, generated_at, &self.render)?;
        let written = self.renderer.render(&request)?;
        info!(rows = series.len(), artifacts = written.len(), "run complete");

        Ok(RunReport { series, written })
    }
}
