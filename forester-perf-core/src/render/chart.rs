//! Chart output.
//!
//! Each chart is first laid out as an SVG document written with `format!`,
//! then rasterised to a PNG at the fixed size from [`ChartConfig`]. Charts
//! with nothing to plot are skipped.

use crate::conf::ChartConfig;
use crate::error::ReportError;
use crate::metrics::{HistogramBin, PerformanceReport, seconds_between};
use crate::pipeline::{EventStore, Timestamp, constants::UNKNOWN_PROOF_TYPE};
use resvg::{tiny_skia, usvg};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub(crate) const MARGIN_LEFT: f64 = 80.0;
pub(crate) const MARGIN_RIGHT: f64 = 160.0;
pub(crate) const MARGIN_TOP: f64 = 50.0;
pub(crate) const MARGIN_BOTTOM: f64 = 60.0;
const TICKS: usize = 5;

const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy)]
enum SeriesStyle {
    Line,
    Step,
    Scatter,
}

//-----------------------------------------------------------------------------
// Canvas
//-----------------------------------------------------------------------------

struct Canvas {
    width: f64,
    height: f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
    body: String,
}

fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Canvas {
    fn new(cfg: &ChartConfig, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            width: cfg.width as f64,
            height: cfg.height as f64,
            x_range: padded_range(x_range.0, x_range.1),
            y_range: padded_range(y_range.0, y_range.1),
            body: String::new(),
        }
    }

    fn plot_width(&self) -> f64 {
        self.width - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height(&self) -> f64 {
        self.height - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn x(&self, v: f64) -> f64 {
        let (lo, hi) = self.x_range;
        MARGIN_LEFT + (v - lo) / (hi - lo) * self.plot_width()
    }

    fn y(&self, v: f64) -> f64 {
        let (lo, hi) = self.y_range;
        MARGIN_TOP + self.plot_height() - (v - lo) / (hi - lo) * self.plot_height()
    }

    fn axes(&mut self, title: &str, x_label: &str, y_label: &str) {
        let (x0, y0) = (MARGIN_LEFT, MARGIN_TOP + self.plot_height());
        let (x1, y1) = (MARGIN_LEFT + self.plot_width(), MARGIN_TOP);

        self.body.push_str(&format!(
            r#"<text x="{:.1}" y="28" font-size="18" text-anchor="middle" font-weight="bold">{}</text>"#,
            self.width / 2.0,
            escape(title)
        ));
        self.body.push_str(&format!(
            r#"<line x1="{x0:.1}" y1="{y0:.1}" x2="{x1:.1}" y2="{y0:.1}" stroke="black"/><line x1="{x0:.1}" y1="{y0:.1}" x2="{x0:.1}" y2="{y1:.1}" stroke="black"/>"#
        ));

        for i in 0..=TICKS {
            let t = i as f64 / TICKS as f64;
            let xv = self.x_range.0 + t * (self.x_range.1 - self.x_range.0);
            let yv = self.y_range.0 + t * (self.y_range.1 - self.y_range.0);
            let (px, py) = (self.x(xv), self.y(yv));

            self.body.push_str(&format!(
                r#"<line x1="{px:.1}" y1="{y0:.1}" x2="{px:.1}" y2="{:.1}" stroke="black"/><text x="{px:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
                y0 + 5.0,
                y0 + 18.0,
                tick_label(xv)
            ));
            self.body.push_str(&format!(
                r##"<line x1="{x0:.1}" y1="{py:.1}" x2="{x1:.1}" y2="{py:.1}" stroke="#dddddd"/><text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{}</text>"##,
                x0 - 6.0,
                py + 4.0,
                tick_label(yv)
            ));
        }

        self.body.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">{}</text>"#,
            MARGIN_LEFT + self.plot_width() / 2.0,
            self.height - 15.0,
            escape(x_label)
        ));
        self.body.push_str(&format!(
            r#"<text x="20" y="{:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 20 {:.1})">{}</text>"#,
            MARGIN_TOP + self.plot_height() / 2.0,
            MARGIN_TOP + self.plot_height() / 2.0,
            escape(y_label)
        ));
    }

    fn series(&mut self, series: &[Series], style: SeriesStyle) {
        for (i, s) in series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];

            match style {
                SeriesStyle::Scatter => {
                    for (x, y) in &s.points {
                        self.body.push_str(&format!(
                            r#"<circle cx="{:.1}" cy="{:.1}" r="2.5" fill="{color}" fill-opacity="0.7"/>"#,
                            self.x(*x),
                            self.y(*y)
                        ));
                    }
                }
                SeriesStyle::Line | SeriesStyle::Step => {
                    let mut path = String::new();
                    let mut prev_y: Option<f64> = None;
                    for (x, y) in &s.points {
                        let (px, py) = (self.x(*x), self.y(*y));
                        match prev_y {
                            None => path.push_str(&format!("M{px:.1},{py:.1}")),
                            Some(last) if matches!(style, SeriesStyle::Step) => {
                                path.push_str(&format!(" L{px:.1},{last:.1} L{px:.1},{py:.1}"))
                            }
                            Some(_) => path.push_str(&format!(" L{px:.1},{py:.1}")),
                        }
                        prev_y = Some(py);
                    }
                    self.body.push_str(&format!(
                        r#"<path d="{path}" fill="none" stroke="{color}" stroke-width="1.5"/>"#
                    ));
                }
            }

            let ly = MARGIN_TOP + 10.0 + i as f64 * 18.0;
            let lx = MARGIN_LEFT + self.plot_width() + 15.0;
            self.body.push_str(&format!(
                r#"<rect x="{lx:.1}" y="{:.1}" width="12" height="12" fill="{color}"/><text x="{:.1}" y="{ly:.1}" font-size="12">{}</text>"#,
                ly - 10.0,
                lx + 18.0,
                escape(&s.name)
            ));
        }
    }

    fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif"><rect width="100%" height="100%" fill="white"/>{body}</svg>
"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

fn tick_label(v: f64) -> String {
    if v.abs() >= 10_000.0 {
        format!("{:.0}k", v / 1000.0)
    } else if v.abs() >= 10.0 || v == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn bounds(series: &[Series]) -> Option<((f64, f64), (f64, f64))> {
    let mut points = series.iter().flat_map(|s| s.points.iter().copied());
    let (x, y) = points.next()?;
    let init = ((x, x), (y.min(0.0), y.max(0.0)));
    Some(points.fold(init, |((xl, xh), (yl, yh)), (x, y)| {
        ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
    }))
}

//-----------------------------------------------------------------------------
// Charts
//-----------------------------------------------------------------------------

pub fn histogram_svg(bins: &[HistogramBin], cfg: &ChartConfig) -> Option<String> {
    let peak = bins.iter().map(|b| b.count).max()?;
    if peak == 0 {
        return None;
    }

    let mut canvas = Canvas::new(cfg, (0.0, bins.len() as f64), (0.0, peak as f64 * 1.05));
    canvas.axes("Round trip distribution", "bin", "completions");

    let slot = canvas.plot_width() / bins.len() as f64;
    for (i, bin) in bins.iter().enumerate() {
        let (top, base) = (canvas.y(bin.count as f64), canvas.y(0.0));
        canvas.body.push_str(&format!(
            r##"<rect x="{:.1}" y="{top:.1}" width="{:.1}" height="{:.1}" fill="#1f77b4"/><text x="{:.1}" y="{:.1}" font-size="10" text-anchor="middle">{}</text>"##,
            canvas.x(i as f64) + slot * 0.1,
            slot * 0.8,
            base - top,
            canvas.x(i as f64) + slot / 2.0,
            top - 4.0,
            escape(&bin.label())
        ));
    }

    Some(canvas.finish())
}

pub fn series_svg(
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[Series],
    cfg: &ChartConfig,
) -> Option<String> {
    render_series(title, x_label, y_label, series, SeriesStyle::Line, cfg)
}

fn render_series(
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[Series],
    style: SeriesStyle,
    cfg: &ChartConfig,
) -> Option<String> {
    let (x_range, (y_lo, y_hi)) = bounds(series)?;
    let mut canvas = Canvas::new(cfg, x_range, (y_lo, y_hi * 1.05));
    canvas.axes(title, x_label, y_label);
    canvas.series(series, style);
    Some(canvas.finish())
}

pub fn round_trip_series(store: &EventStore, start: Timestamp) -> Vec<Series> {
    let mut by_type: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for c in store.completions() {
        by_type
            .entry(c.proof_type.as_deref().unwrap_or(UNKNOWN_PROOF_TYPE))
            .or_default()
            .push((seconds_between(start, c.timestamp), c.round_trip_ms as f64));
    }
    by_type
        .into_iter()
        .map(|(name, points)| Series {
            name: name.to_string(),
            points,
        })
        .collect()
}

pub fn queue_series(store: &EventStore, start: Timestamp) -> Vec<Series> {
    let mut trees: Vec<Series> = Vec::new();
    for u in store.queue_updates() {
        let point = (seconds_between(start, u.timestamp), u.items as f64);
        match trees.iter_mut().find(|s| s.name == u.tree) {
            Some(s) => s.points.push(point),
            None => trees.push(Series {
                name: u.tree.clone(),
                points: vec![point],
            }),
        }
    }
    trees
}

fn chart_path(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Rasterises an SVG document to PNG bytes at exactly `cfg.width` x `cfg.height`.
pub fn rasterize(
    svg: &str,
    options: &usvg::Options<'_>,
    cfg: &ChartConfig,
) -> Result<Vec<u8>, String> {
    let tree = usvg::Tree::from_str(svg, options).map_err(|e| e.to_string())?;
    let mut pixmap = tiny_skia::Pixmap::new(cfg.width, cfg.height)
        .ok_or_else(|| format!("invalid chart size {}x{}", cfg.width, cfg.height))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(|e| e.to_string())
}

fn chart_options() -> usvg::Options<'static> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    options
}

/// Writes every chart that has data to `<base>_<name>.png`.
pub fn write_charts(
    report: &PerformanceReport,
    store: &EventStore,
    cfg: &ChartConfig,
    base: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    let mut charts: Vec<(&str, Option<String>)> = vec![(
        "_latency.png",
        histogram_svg(&report.proofs.histogram, cfg),
    )];

    if let Some(window) = &report.window {
        charts.push((
            "_round_trip.png",
            render_series(
                "Proof round trip",
                "seconds since start",
                "round trip (ms)",
                &round_trip_series(store, window.start),
                SeriesStyle::Scatter,
                cfg,
            ),
        ));
        charts.push((
            "_queues.png",
            render_series(
                "Queue depth",
                "seconds since start",
                "items",
                &queue_series(store, window.start),
                SeriesStyle::Step,
                cfg,
            ),
        ));
    }

    if let Some(in_flight) = &report.in_flight {
        let series = [Series {
            name: "in flight".to_string(),
            points: in_flight
                .bins
                .iter()
                .map(|b| (b.offset_secs, b.in_flight as f64))
                .collect(),
        }];
        charts.push((
            "_in_flight.png",
            series_svg(
                "Proofs in flight",
                "seconds since first proof event",
                "submitted − completed",
                &series,
                cfg,
            ),
        ));
    }

    let options = chart_options();
    let mut written = Vec::new();
    for (suffix, svg) in charts {
        let Some(svg) = svg else {
            continue;
        };
        let path = chart_path(base, suffix);
        let png = rasterize(&svg, &options, cfg).map_err(|e| ReportError::render_chart(&path, e))?;
        fs::write(&path, png).map_err(|e| ReportError::write_chart(&path, e))?;
        info!(path = %path.display(), "chart written");
        written.push(path);
    }

    Ok(written)
}
