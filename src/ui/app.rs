use anyhow::{anyhow, Result};
use eframe::egui;

use crate::report::chart::Chart;
use crate::report::sink::ChartSink;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// eframe App showing a single chart
// ---------------------------------------------------------------------------

pub struct ChartWindow {
    chart: Chart,
}

impl ChartWindow {
    pub fn new(chart: Chart) -> Self {
        Self { chart }
    }
}

impl eframe::App for ChartWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.heading(&self.chart.title);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_plot(ui, &self.chart);
        });
    }
}

// ---------------------------------------------------------------------------
// Sink that blocks on one native window per chart
// ---------------------------------------------------------------------------

/// Opens a window for each chart and returns when the user closes it.
#[derive(Debug, Default)]
pub struct WindowSink;

impl ChartSink for WindowSink {
    fn present(&mut self, chart: &Chart) -> Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 600.0])
                .with_min_inner_size([600.0, 400.0]),
            run_and_return: true,
            ..Default::default()
        };

        log::info!("Showing chart '{}', close the window to continue", chart.title);
        let window = ChartWindow::new(chart.clone());
        eframe::run_native(
            &chart.title,
            options,
            Box::new(|_cc| Ok(Box::new(window))),
        )
        .map_err(|e| anyhow!("chart window '{}' failed: {e}", chart.title))
    }
}
