//! Chart export to image files
//!
//! Renders a [`ChartPlan`] with [`plotters`], one file per chart. Layout
//! (bar order, y range, wedge angles, colors) comes from the plan, so the
//! files match what is drawn on screen.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;
use tracing::info;

use sc_core::{ChartConfig, ChartKind};

use crate::plan::{ChartPlan, ChartSpec, Wedge};
use crate::plots::utils::{categorical_rgb, BAR_EDGE, BAR_FILL};

const FONT_FAMILY: &str = "sans-serif";

/// Errors that can occur while exporting charts
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),

    #[error("Failed to write chart file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to export")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ExportError>;

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Drawing(e.to_string())
}

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn filter_name(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG Image",
            ExportFormat::Svg => "SVG Vector Graphics",
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}

fn pixel_dims(config: &ChartConfig) -> (u32, u32) {
    let (w, h) = config.pixel_size();
    (w.round() as u32, h.round() as u32)
}

/// Render one chart to an SVG document.
pub fn render_svg(spec: &ChartSpec, kind: ChartKind, config: &ChartConfig) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, pixel_dims(config)).into_drawing_area();
        draw_chart(&root, spec, kind, config)?;
        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

/// Render one chart to a PNG file.
pub fn render_png(spec: &ChartSpec, kind: ChartKind, config: &ChartConfig, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, pixel_dims(config)).into_drawing_area();
    draw_chart(&root, spec, kind, config)?;
    root.present().map_err(draw_err)
}

/// Write every chart of `plan` into `dir`, returning the written paths.
///
/// A single chart is written as `<stem>.<ext>`; charts of a split get the
/// group label appended, e.g. `<stem>_group_2.<ext>`.
pub fn export_plan(
    plan: &ChartPlan,
    config: &ChartConfig,
    dir: &Path,
    stem: &str,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    if plan.charts.is_empty() {
        return Err(ExportError::Empty);
    }
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(plan.charts.len());
    for spec in &plan.charts {
        let path = dir.join(file_name(stem, spec.group.as_deref(), format));
        match format {
            ExportFormat::Svg => std::fs::write(&path, render_svg(spec, plan.kind, config)?)?,
            ExportFormat::Png => render_png(spec, plan.kind, config, &path)?,
        }
        written.push(path);
    }

    info!("Exported {} chart(s) to {}", written.len(), dir.display());
    Ok(written)
}

fn file_name(stem: &str, group: Option<&str>, format: ExportFormat) -> String {
    let base = match group {
        Some(group) => format!("{}_group_{}", sanitize(stem), sanitize(group)),
        None => sanitize(stem),
    };
    format!("{}.{}", base, format.extension())
}

/// Keep file names portable: letters, digits, `-` and `_` only.
fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "chart".to_string()
    } else {
        cleaned
    }
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    kind: ChartKind,
    config: &ChartConfig,
) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;
    match kind {
        ChartKind::Bar => draw_bar(root, spec, config),
        ChartKind::Pie => draw_pie(root, spec, config),
    }
}

fn draw_bar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    config: &ChartConfig,
) -> Result<()> {
    let font_size = config.font_size as f64;
    let title_style = (FONT_FAMILY, config.title_font_size() as f64);

    if spec.slices.is_empty() {
        root.titled(&spec.title, title_style).map_err(draw_err)?;
        return Ok(());
    }

    let n = spec.slices.len();
    let labels = spec.labels();

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, title_style)
        .margin(10)
        .x_label_area_size((font_size * 3.0) as u32)
        .y_label_area_size((font_size * 4.0) as u32)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..spec.y_top())
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n)
        .x_label_formatter(&|value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .label_style((FONT_FAMILY, font_size))
        .axis_desc_style((FONT_FAMILY, font_size))
        .draw()
        .map_err(draw_err)?;

    let bar = |i: usize, count: usize, style: ShapeStyle| {
        let mut rect = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), count as f64)],
            style,
        );
        rect.set_margin(0, 0, 5, 5);
        rect
    };

    chart
        .draw_series(spec.slices.iter().enumerate().map(|(i, s)| bar(i, s.count, rgb(BAR_FILL).filled())))
        .map_err(draw_err)?;
    chart
        .draw_series(spec.slices.iter().enumerate().map(|(i, s)| bar(i, s.count, rgb(BAR_EDGE).stroke_width(1))))
        .map_err(draw_err)?;

    let count_style = TextStyle::from((FONT_FAMILY, font_size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(spec.slices.iter().enumerate().map(|(i, s)| {
            Text::new(s.count.to_string(), (SegmentValue::CenterOf(i), s.count as f64), count_style.clone())
        }))
        .map_err(draw_err)?;

    Ok(())
}

fn draw_pie<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    config: &ChartConfig,
) -> Result<()> {
    let font_size = config.font_size as f64;
    let area = root
        .titled(&spec.title, (FONT_FAMILY, config.title_font_size() as f64))
        .map_err(draw_err)?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 / 2.0 * 0.75;

    let centered = |size: f64, color: &'static RGBColor| {
        TextStyle::from((FONT_FAMILY, size).into_font())
            .color(color)
            .pos(Pos::new(HPos::Center, VPos::Center))
    };
    let at = |r: f64, angle: f64| {
        let (dx, dy) = Wedge::direction(angle);
        ((center.0 + dx * r).round() as i32, (center.1 + dy * r).round() as i32)
    };

    let wedges = spec.wedges();
    if wedges.is_empty() {
        area.draw(&Text::new("No responses", at(0.0, 0.0), centered(font_size, &BLACK)))
            .map_err(draw_err)?;
        return Ok(());
    }

    for wedge in &wedges {
        let sweep = wedge.end_angle - wedge.start_angle;
        let steps = ((sweep / std::f64::consts::TAU) * 128.0).ceil().max(1.0) as usize;
        let mut points = vec![at(0.0, 0.0)];
        points.extend((0..=steps).map(|i| at(radius, wedge.start_angle + sweep * i as f64 / steps as f64)));

        area.draw(&Polygon::new(points, rgb(categorical_rgb(wedge.color_index)).filled()))
            .map_err(draw_err)?;
    }

    for wedge in &wedges {
        let mid = wedge.mid_angle();
        area.draw(&Text::new(wedge.percent_label(), at(radius * 0.6, mid), centered(font_size, &WHITE)))
            .map_err(draw_err)?;
        area.draw(&Text::new(wedge.label.clone(), at(radius * 1.15, mid), centered(font_size, &BLACK)))
            .map_err(draw_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::{tabulate, tabulate_grouped, CategorySet, ResponseSeries, ResponseValue};

    fn series(values: &[i64]) -> ResponseSeries {
        values.iter().map(|&v| ResponseValue::from(v)).collect()
    }

    fn bar_spec() -> ChartSpec {
        let t = tabulate(&series(&[1, 2, 2, 3]), &CategorySet::range(3));
        ChartSpec::from_tabulation("Ratings".into(), None, &t, None)
    }

    #[test]
    fn test_bar_svg_has_title_and_counts() {
        let svg = render_svg(&bar_spec(), ChartKind::Bar, &ChartConfig::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Ratings"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("width=\"600\""));
    }

    #[test]
    fn test_pie_svg_has_percent_labels() {
        let svg = render_svg(&bar_spec(), ChartKind::Pie, &ChartConfig::default()).unwrap();
        assert!(svg.contains("50.0%"));
        assert!(svg.contains("25.0%"));
        assert!(svg.contains("<polygon"));
    }

    #[test]
    fn test_empty_pie_still_renders() {
        let t = tabulate(&ResponseSeries::default(), &CategorySet::range(2));
        let spec = ChartSpec::from_tabulation("Empty".into(), None, &t, None);
        let svg = render_svg(&spec, ChartKind::Pie, &ChartConfig::default()).unwrap();
        assert!(svg.contains("No responses"));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(file_name("My chart", None, ExportFormat::Svg), "My_chart.svg");
        assert_eq!(file_name("q1", Some("2"), ExportFormat::Png), "q1_group_2.png");
        assert_eq!(file_name("  ", Some("a/b"), ExportFormat::Png), "chart_group_a_b.png");
    }

    #[test]
    fn test_export_plan_writes_one_file_per_group() {
        let g = tabulate_grouped(&series(&[1, 2, 2]), &series(&[1, 1, 2]), &CategorySet::range(2));
        let config = ChartConfig::default();
        let plan = ChartPlan::grouped(&g, &config);

        let dir = std::env::temp_dir().join(format!("sc-export-{}", std::process::id()));
        let paths = export_plan(&plan, &config, &dir, "q1", ExportFormat::Svg).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("q1_group_1.svg"));
        assert!(paths.iter().all(|p| p.exists()));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_empty_plan_fails() {
        let plan = ChartPlan { kind: ChartKind::Bar, charts: Vec::new() };
        let result = export_plan(&plan, &ChartConfig::default(), Path::new("."), "x", ExportFormat::Svg);
        assert!(matches!(result, Err(ExportError::Empty)));
    }
}
