/// Native chart windows (eframe + egui_plot).
pub mod app;
pub mod plot;
