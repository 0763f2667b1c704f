//! Multi-panel renderer seam.
//!
//! Rendering pixels is not this crate's job. It decides *what* gets drawn
//! (which panels, titles, colours, data points) and *where* each image goes,
//! then hands a [`RenderRequest`] to a [`ChartRenderer`]. The built-in
//! [`PlotSpecRenderer`] writes that plan out as JSON so an external plotting
//! tool can produce the images.
//!
//! Artifact names follow `<Label>_<stamp>.<ext>`, e.g.
//! `MemoryPlot_30Sep2020_101500.jpg`.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{PerfError, Result};
use crate::types::{HostIdentity, Metric, Timeseries};

const X_LABEL: &str = "Date time";
const DEFAULT_LINE_WIDTH: f64 = 1.5;
const BOLD_LINE_WIDTH: f64 = 3.0;

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// One image the renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Panel {
    /// Three stacked axes, one per metric.
    Combined,
    Memory,
    Disk,
    Cpu,
    /// All three metrics on a single axes.
    Overlay,
}

impl Panel {
    /// Panels planned by default, in write order.
    pub const STANDARD: [Panel; 4] = [Panel::Combined, Panel::Memory, Panel::Disk, Panel::Cpu];

    /// File name prefix.
    pub fn label(self) -> &'static str {
        match self {
            Panel::Combined => "CombinePlot",
            Panel::Memory => "MemoryPlot",
            Panel::Disk => "DiskPlot",
            Panel::Cpu => "CPUPlot",
            Panel::Overlay => "plot",
        }
    }

    fn single_metric(self) -> Option<Metric> {
        match self {
            Panel::Memory => Some(Metric::Memory),
            Panel::Disk => Some(Metric::Disk),
            Panel::Cpu => Some(Metric::Cpu),
            Panel::Combined | Panel::Overlay => None,
        }
    }
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Everything a renderer needs to know besides the data.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Figure size in inches.
    pub figure_width: f64,
    pub figure_height: f64,
    pub created_format: String,
    pub axis_format: String,
    pub output_dir: PathBuf,
    pub extension: String,
    pub stamp_format: String,
    pub panels: Vec<Panel>,
}

impl RenderConfig {
    pub fn from_config(config: &Config) -> Self {
        let mut panels = Panel::STANDARD.to_vec();
        if config.render.overlay {
            panels.push(Panel::Overlay);
        }
        Self {
            figure_width: config.render.figure_width,
            figure_height: config.render.figure_height,
            created_format: config.render.created_format.clone(),
            axis_format: config.render.axis_format.clone(),
            output_dir: config.output.directory.clone(),
            extension: config.output.extension.clone(),
            stamp_format: config.output.stamp_format.clone(),
            panels,
        }
    }

    /// Same config writing into `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// `<Label>_<stamp>.<ext>` for one panel.
    pub fn artifact_name(&self, panel: Panel, generated_at: NaiveDateTime) -> Result<String> {
        let stamp = format_time(generated_at, &self.stamp_format)?;
        Ok(format!("{}_{}.{}", panel.label(), stamp, self.extension))
    }

    /// Where each configured panel's image goes.
    pub fn plan(&self, generated_at: NaiveDateTime) -> Result<Vec<Artifact>> {
        self.panels
            .iter()
            .map(|&panel| {
                Ok(Artifact {
                    panel,
                    path: self.output_dir.join(self.artifact_name(panel, generated_at)?),
                })
            })
            .collect()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from_config(&Config::defaults())
    }
}

/// A planned image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub panel: Panel,
    pub path: PathBuf,
}

/// Format `ts`, reporting a bad format string instead of panicking.
pub fn format_time(ts: NaiveDateTime, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", ts.format(format)).map_err(|_| PerfError::TimeFormat {
        format: format.to_string(),
    })?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Request + renderer trait
// ---------------------------------------------------------------------------

/// Input to a [`ChartRenderer`]. The series is sorted and fully numeric.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub series: &'a Timeseries,
    pub host: &'a HostIdentity,
    pub generated_at: NaiveDateTime,
    pub config: &'a RenderConfig,
    pub artifacts: Vec<Artifact>,
}

impl<'a> RenderRequest<'a> {
    pub fn new(
        series: &'a Timeseries,
        host: &'a HostIdentity,
        generated_at: NaiveDateTime,
        config: &'a RenderConfig,
    ) -> Result<Self> {
        Ok(Self {
            series,
            host,
            generated_at,
            config,
            artifacts: config.plan(generated_at)?,
        })
    }

    /// Describe every planned artifact.
    pub fn plot_specs(&self) -> Result<Vec<PlotSpec>> {
        let created = format_time(self.generated_at, &self.config.created_format)?;
        // Validate the axis format once up front.
        format_time(self.generated_at, &self.config.axis_format)?;

        Ok(self
            .artifacts
            .iter()
            .map(|artifact| self.plot_spec(artifact, &created))
            .collect())
    }

    fn plot_spec(&self, artifact: &Artifact, created: &str) -> PlotSpec {
        let host_lines = format!("Host name: {}\nHost IP: {}", self.host.hostname, self.host.ip);
        let (title, axes) = match (artifact.panel, artifact.panel.single_metric()) {
            (_, Some(metric)) => {
                let style = single_style(metric);
                let title = format!("{}\n{host_lines}", metric_title(metric));
                (None, vec![self.axes(style, &title)])
            }
            (Panel::Combined, None) => (
                Some(format!("Created Date: {created}\n{host_lines}")),
                Metric::ALL
                    .iter()
                    .map(|&metric| self.axes(combined_style(metric), metric_title(metric)))
                    .collect(),
            ),
            (_, None) => (
                None,
                vec![AxesSpec {
                    title: None,
                    x_label: None,
                    y_label: None,
                    grid: false,
                    x_format: None,
                    legend: true,
                    series: Metric::ALL
                        .iter()
                        .map(|&metric| self.series_spec(metric, None, DEFAULT_LINE_WIDTH))
                        .collect(),
                }],
            ),
        };

        let annotation = artifact
            .panel
            .single_metric()
            .map(|_| format!("Created date:{created}"));

        PlotSpec {
            panel: artifact.panel,
            image: artifact.path.clone(),
            figure: FigureSize {
                width: self.config.figure_width,
                height: self.config.figure_height,
            },
            title,
            annotation,
            axes,
        }
    }

    fn axes(&self, style: Style, title: &str) -> AxesSpec {
        AxesSpec {
            title: Some(title.to_string()),
            x_label: Some(X_LABEL.to_string()),
            y_label: Some(style.y_label.to_string()),
            grid: style.grid,
            x_format: Some(self.config.axis_format.clone()),
            legend: false,
            series: vec![self.series_spec(style.metric, style.colour, style.line_width)],
        }
    }

    fn series_spec(&self, metric: Metric, colour: Option<&str>, line_width: f64) -> SeriesSpec {
        SeriesSpec {
            metric,
            label: metric.label(),
            colour: colour.map(str::to_string),
            line_width,
            points: self
                .series
                .points(metric)
                .map(|(t, v)| Point { t, v })
                .collect(),
        }
    }
}

/// Consumer of a [`RenderRequest`]. Returns the paths it wrote.
pub trait ChartRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<PathBuf>>;
}

// ---------------------------------------------------------------------------
// Styling table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Style {
    metric: Metric,
    colour: Option<&'static str>,
    line_width: f64,
    y_label: &'static str,
    grid: bool,
}

fn metric_title(metric: Metric) -> &'static str {
    match metric {
        Metric::Memory => "Memory Consumption",
        Metric::Disk => "Disk IO Consumption",
        Metric::Cpu => "CPU Consumption",
    }
}

fn combined_style(metric: Metric) -> Style {
    let (colour, y_label) = match metric {
        Metric::Memory => (Some("green"), "Memory Consumption in %"),
        Metric::Disk => (None, "Disk IO Consumption in %"),
        Metric::Cpu => (Some("red"), "CPU Consumption in %"),
    };
    Style {
        metric,
        colour,
        line_width: BOLD_LINE_WIDTH,
        y_label,
        grid: true,
    }
}

fn single_style(metric: Metric) -> Style {
    match metric {
        Metric::Memory => Style {
            metric,
            colour: None,
            line_width: DEFAULT_LINE_WIDTH,
            y_label: "Memory Consumption in %",
            grid: true,
        },
        Metric::Disk => Style {
            metric,
            colour: Some("#d62728"),
            line_width: BOLD_LINE_WIDTH,
            y_label: "Disk Consumption in %",
            grid: false,
        },
        Metric::Cpu => Style {
            metric,
            colour: Some("#9467bd"),
            line_width: BOLD_LINE_WIDTH,
            y_label: "CPU Consumption in %",
            grid: false,
        },
    }
}

// ---------------------------------------------------------------------------
// Plot descriptions
// ---------------------------------------------------------------------------

/// Serializable description of one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub panel: Panel,
    /// Image file the plotting tool should write.
    pub image: PathBuf,
    pub figure: FigureSize,
    /// Figure-level title (combined panel only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Text placed above the axes (single-metric panels).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    pub axes: Vec<AxesSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxesSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub grid: bool,
    /// chrono format for x tick labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_format: Option<String>,
    pub legend: bool,
    pub series: Vec<SeriesSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub metric: Metric,
    pub label: &'static str,
    /// `None` leaves the colour to the plotting tool's cycle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    pub line_width: f64,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub t: NaiveDateTime,
    pub v: f64,
}

// ---------------------------------------------------------------------------
// PlotSpecRenderer
// ---------------------------------------------------------------------------

/// Writes each [`PlotSpec`] as pretty JSON to `<image path>.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotSpecRenderer;

impl PlotSpecRenderer {
    /// Description file for an image path.
    pub fn spec_path(image: &Path) -> PathBuf {
        let mut name = image.as_os_str().to_owned();
        name.push(".json");
        PathBuf::from(name)
    }
}

impl ChartRenderer for PlotSpecRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<PathBuf>> {
        let specs = request.plot_specs()?;
        std::fs::create_dir_all(&request.config.output_dir)
            .map_err(|e| PerfError::io(&request.config.output_dir, e))?;

        let mut written = Vec::with_capacity(specs.len());
        for spec in &specs {
            let path = Self::spec_path(&spec.image);
            let json = serde_json::to_vec_pretty(spec).map_err(|e| PerfError::Render {
                panel: spec.panel.to_string(),
                reason: e.to_string(),
            })?;
            std::fs::write(&path, json).map_err(|e| PerfError::io(&path, e))?;
            tracing::info!(panel = %spec.panel, path = %path.display(), "wrote plot description");
            written.push(path);
        }
        Ok(written)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeseriesRow;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn generated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 9, 30)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap()
    }

    fn series() -> Timeseries {
        Timeseries::from_unsorted(vec![TimeseriesRow {
            timestamp: generated(),
            memory_pct: 45.0,
            disk_pct: 12.0,
            cpu_pct: 30.0,
        }])
    }

    #[test]
    fn artifact_names_follow_label_and_stamp() {
        let cfg = RenderConfig::default();
        assert_eq!(
            cfg.artifact_name(Panel::Memory, generated()).unwrap(),
            "MemoryPlot_30Sep2020_101500.jpg"
        );
        assert_eq!(
            cfg.artifact_name(Panel::Combined, generated()).unwrap(),
            "CombinePlot_30Sep2020_101500.jpg"
        );
    }

    #[test]
    fn default_plan_has_four_panels_in_output_dir() {
        let cfg = RenderConfig::default().with_output_dir("/charts");
        let plan = cfg.plan(generated()).unwrap();
        let panels: Vec<Panel> = plan.iter().map(|a| a.panel).collect();
        assert_eq!(panels, Panel::STANDARD.to_vec());
        assert_eq!(plan[3].path, PathBuf::from("/charts/CPUPlot_30Sep2020_101500.jpg"));
    }

    #[test]
    fn overlay_is_opt_in() {
        let mut config = Config::defaults();
        config.render.overlay = true;
        let cfg = RenderConfig::from_config(&config);
        assert_eq!(cfg.panels.last(), Some(&Panel::Overlay));
        assert_eq!(
            cfg.artifact_name(Panel::Overlay, generated()).unwrap(),
            "plot_30Sep2020_101500.jpg"
        );
    }

    #[test]
    fn bad_stamp_format_is_an_error_not_a_panic() {
        let mut cfg = RenderConfig::default();
        cfg.stamp_format = "%Y%".to_string();
        assert!(matches!(
            cfg.artifact_name(Panel::Disk, generated()),
            Err(PerfError::TimeFormat { .. })
        ));
    }

    #[test]
    fn combined_spec_has_three_axes_and_host_title() {
        let cfg = RenderConfig::default();
        let series = series();
        let host = HostIdentity::new("box-1", "10.0.0.7");
        let request = RenderRequest::new(&series, &host, generated(), &cfg).unwrap();
        let specs = request.plot_specs().unwrap();

        let combined = &specs[0];
        assert_eq!(combined.panel, Panel::Combined);
        assert_eq!(combined.axes.len(), 3);
        assert_eq!(
            combined.title.as_deref(),
            Some("Created Date: 30 Sep 2020 10:15:00\nHost name: box-1\nHost IP: 10.0.0.7")
        );
        assert_eq!(combined.axes[2].series[0].colour.as_deref(), Some("red"));
        assert_eq!(combined.axes[1].series[0].points[0].v, 12.0);
    }

    #[test]
    fn single_specs_carry_annotation_and_own_y_label() {
        let cfg = RenderConfig::default();
        let series = series();
        let host = HostIdentity::unresolved();
        let request = RenderRequest::new(&series, &host, generated(), &cfg).unwrap();
        let specs = request.plot_specs().unwrap();

        let disk = specs.iter().find(|s| s.panel == Panel::Disk).unwrap();
        assert_eq!(disk.annotation.as_deref(), Some("Created date:30 Sep 2020 10:15:00"));
        assert_eq!(disk.axes[0].y_label.as_deref(), Some("Disk Consumption in %"));
        assert!(!disk.axes[0].grid);
        assert!(disk.axes[0]
            .title
            .as_deref()
            .unwrap()
            .ends_with("Host IP: Unable to get Host IP"));
    }

    #[test]
    fn spec_renderer_writes_json_next_to_images() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RenderConfig::default().with_output_dir(dir.path().join("out"));
        let series = series();
        let host = HostIdentity::unresolved();
        let request = RenderRequest::new(&series, &host, generated(), &cfg).unwrap();

        let written = PlotSpecRenderer.render(&request).unwrap();
        assert_eq!(written.len(), 4);
        let first = std::fs::read_to_string(&written[0]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert_eq!(json["panel"], "Combined");
        assert!(json["image"]
            .as_str()
            .unwrap()
            .ends_with("CombinePlot_30Sep2020_101500.jpg"));
        assert_eq!(json["figure"]["width"], 25.0);
    }
}
