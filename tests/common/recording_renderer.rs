//! RecordingRenderer — a [`ChartRenderer`] that remembers what it was asked
//! to draw instead of writing anything.

use perfplot::render::{Artifact, ChartRenderer, RenderRequest};
use perfplot::{HostIdentity, Result, Timeseries};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// What a single `render` call received.
#[derive(Debug, Clone)]
pub struct RecordedRender {
    pub series: Timeseries,
    pub host: HostIdentity,
    pub artifacts: Vec<Artifact>,
}

/// Cloneable handle; clones share the same log of calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Rc<RefCell<Vec<RecordedRender>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedRender> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<PathBuf>> {
        self.calls.borrow_mut().push(RecordedRender {
            series: request.series.clone(),
            host: request.host.clone(),
            artifacts: request.artifacts.clone(),
        });
        Ok(request.artifacts.iter().map(|a| a.path.clone()).collect())
    }
}
