use std::f32::consts::FRAC_PI_2;
use std::f64::consts::TAU;

use eframe::egui::{self, Color32, FontId, Pos2, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, PlotResponse, Points,
    Polygon, Text,
};

use crate::report::chart::{
    BarEntry, Chart, ChartBody, HistogramPanel, LineSeries, PieSlice, ScatterSeries, StripPoint,
};

/// Vertical space kept under a plot for rotated category labels.
const LABEL_MARGIN: f32 = 120.0;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Draw one chart into the available space.
pub fn chart_plot(ui: &mut Ui, chart: &Chart) {
    match &chart.body {
        ChartBody::Lines { series } => lines(ui, chart, series),
        ChartBody::Pie { slices } => pie(ui, slices),
        ChartBody::Strip {
            categories, points, ..
        } => strip(ui, chart, categories, points),
        ChartBody::Scatter { x_labels, series } => scatter(ui, chart, x_labels, series),
        ChartBody::Bar { color, bars } => bar(ui, chart, color.to_color32(), bars),
        ChartBody::Histograms {
            shared_y_max,
            panels,
            ..
        } => histograms(ui, chart, *shared_y_max, panels),
    }
}

fn base_plot(id: &str, chart: &Chart) -> Plot<'static> {
    Plot::new(id.to_string())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
}

// ---------------------------------------------------------------------------
// Line plot with legend
// ---------------------------------------------------------------------------

fn lines(ui: &mut Ui, chart: &Chart, series: &[LineSeries]) {
    base_plot("lines", chart)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for s in series {
                let points: PlotPoints = s.points.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&s.name)
                        .color(s.color.to_color32())
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart, wedges as polygons
// ---------------------------------------------------------------------------

fn pie(ui: &mut Ui, slices: &[PieSlice]) {
    Plot::new("pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Counter-clockwise from 12 o'clock.
            let mut start = 0.25 * TAU;
            for s in slices {
                let sweep = s.share * TAU;
                let steps = ((sweep / TAU) * 120.0).ceil().max(2.0) as usize;
                let mut outline = vec![[0.0, 0.0]];
                outline.extend((0..=steps).map(|i| {
                    let a = start + sweep * i as f64 / steps as f64;
                    [a.cos(), a.sin()]
                }));
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(outline))
                        .name(&s.label)
                        .fill_color(s.color.to_color32())
                        .stroke(egui::Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = start + sweep / 2.0;
                plot_ui.text(
                    Text::new(PlotPoint::new(0.7 * mid.cos(), 0.7 * mid.sin()), s.text.clone())
                        .color(Color32::BLACK),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                    s.label.clone(),
                ));
                start += sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Jittered strip plot
// ---------------------------------------------------------------------------

fn strip(ui: &mut Ui, chart: &Chart, categories: &[String], points: &[StripPoint]) {
    let labels = categories.to_vec();
    base_plot("strip", chart)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .include_x(-0.5)
        .include_x(categories.len() as f64 - 0.5)
        .show(ui, |plot_ui| {
            for (i, name) in categories.iter().enumerate() {
                let pts: PlotPoints = points
                    .iter()
                    .filter(|p| p.category == i)
                    .map(|p| [i as f64 + p.offset, p.y])
                    .collect();
                plot_ui.points(
                    Points::new(pts)
                        .name(name)
                        .shape(MarkerShape::Circle)
                        .radius(2.5),
                );
            }
        });
}

/// Label for an integer grid mark, blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Category-coloured scatter over many countries
// ---------------------------------------------------------------------------

fn scatter(ui: &mut Ui, chart: &Chart, x_labels: &[String], series: &[ScatterSeries]) {
    let response = base_plot("scatter", chart)
        .legend(Legend::default())
        .height(ui.available_height() - LABEL_MARGIN)
        .x_axis_formatter(|_, _| String::new())
        .show(ui, |plot_ui| {
            for s in series {
                let pts: PlotPoints = s
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| [i as f64, v])
                    .collect();
                plot_ui.points(
                    Points::new(pts)
                        .name(&s.name)
                        .color(s.color.to_color32())
                        .shape(MarkerShape::Cross)
                        .radius(4.0),
                );
            }
        });
    rotated_labels(ui, &response, x_labels);
}

// ---------------------------------------------------------------------------
// Bar chart with rotated labels
// ---------------------------------------------------------------------------

fn bar(ui: &mut Ui, chart: &Chart, color: Color32, bars: &[BarEntry]) {
    let response = base_plot("bar", chart)
        .height(ui.available_height() - LABEL_MARGIN)
        .x_axis_formatter(|_, _| String::new())
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = bars
                .iter()
                .enumerate()
                .map(|(i, b)| Bar::new(i as f64, b.value).width(0.8).name(&b.label))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });
    let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
    rotated_labels(ui, &response, &labels);
}

/// Paint `labels[i]` vertically under x = i, reading top to bottom.
fn rotated_labels(ui: &Ui, response: &PlotResponse<()>, labels: &[String]) {
    let painter = ui.painter();
    let color = ui.visuals().text_color();
    let bottom = response.response.rect.bottom();
    for (i, label) in labels.iter().enumerate() {
        let anchor = response
            .transform
            .position_from_point(&PlotPoint::new(i as f64, 0.0));
        if anchor.x < response.response.rect.left() || anchor.x > response.response.rect.right() {
            continue;
        }
        let galley = painter.layout_no_wrap(label.clone(), FontId::proportional(11.0), color);
        let pos = Pos2::new(anchor.x + galley.size().y / 2.0, bottom + 4.0);
        painter.add(egui::epaint::TextShape::new(pos, galley, color).with_angle(FRAC_PI_2));
    }
}

// ---------------------------------------------------------------------------
// Side-by-side histograms with a shared y-axis
// ---------------------------------------------------------------------------

fn histograms(ui: &mut Ui, chart: &Chart, shared_y_max: usize, panels: &[HistogramPanel]) {
    ui.columns(panels.len().max(1), |cols| {
        for (col, panel) in cols.iter_mut().zip(panels) {
            col.vertical_centered(|ui| {
                ui.label(egui::RichText::new(&panel.title).strong());
            });
            let bars: Vec<Bar> = panel
                .bins
                .iter()
                .map(|b| {
                    let width = (b.end - b.start) as f64;
                    Bar::new(b.start as f64 + width / 2.0, b.count as f64)
                        .width(width)
                        .name(format!("{}–{}", b.start, b.end))
                })
                .collect();
            base_plot(&format!("hist-{}", panel.title), chart)
                .link_axis("histograms", [false, true])
                .include_y(0.0)
                .include_y(shared_y_max as f64)
                .show(col, |plot_ui| {
                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .color(panel.color.to_color32())
                            .name(&panel.title),
                    );
                });
        }
    });
}
