//! The eframe application: one window with a header, a sidebar holding the
//! indicator selector and country filters, a central chart-and-table area,
//! and a status bar. The whole page is re-laid-out every frame; the only
//! cross-frame state is widget selections and the two loader caches.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, ComboBox, RichText};
use egui_extras::{Column, Size, StripBuilder, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use tracing::{info, warn};

use crate::catalog::{Indicator, ViewKind, INDICATORS};
use crate::content::ContentCache;
use crate::reshape::{latest_snapshot, melt, LongTable};
use crate::view::{
    default_selection, filter_long, generation_mix, share_percent, year_order, MixEntry,
};
use crate::workbook::{CellValue, SheetCache, WideRow, WideTable};

const APP_TITLE: &str = "Global Energy Transition Explorer";
const APP_CAPTION: &str = "Interactive visuals for key energy and emissions indicators. \
     Data sourced from the 2025 Country Transition Tracker workbook.";
const EMPTY_SELECTION_PROMPT: &str = "Select at least one country to see the trend.";
const MIX_TITLE: &str = "Power Sector Decarbonisation (generation mix share)";
const CHART_HEIGHT: f32 = 420.0;

// --- Palette of distinct series colors ---
const PLOT_COLORS: [Color32; 8] = [
    Color32::from_rgb(100, 143, 255), // Blueish
    Color32::from_rgb(250, 120, 120), // Reddish
    Color32::from_rgb(140, 230, 140), // Greenish
    Color32::from_rgb(255, 180, 80),  // Orangey
    Color32::from_rgb(160, 160, 255), // Purplish
    Color32::from_rgb(255, 255, 120), // Yellowish
    Color32::from_rgb(120, 200, 200), // Cyanish
    Color32::from_rgb(220, 140, 220), // Pinkish
];

/// Fixed asset locations, resolved relative to the working directory.
pub struct AssetPaths {
    pub workbook: PathBuf,
    pub logo: PathBuf,
    /// Directory holding the supplementary content files.
    pub content_dir: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("2025 Country Transition Tracker Data.xlsx"),
            logo: PathBuf::from("logo.png"),
            content_dir: PathBuf::from("."),
        }
    }
}

// --- Application State ---
pub struct ExplorerApp {
    assets: AssetPaths,
    indicator_idx: usize,
    sheets: SheetCache,
    content: ContentCache,
    /// Time-series country filter, kept in lexicographic order.
    selected_countries: Vec<String>,
    /// Composition-view country.
    mix_country: String,
    /// Sheet the selections were last seeded for.
    seeded_sheet: Option<String>,
    logo: Option<egui::TextureHandle>,
    status: String,
    last_load_ms: f64,
}

impl ExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui::Context::set_visuals(&cc.egui_ctx, egui::Visuals::dark());
        let assets = AssetPaths::default();
        let logo = load_logo(&cc.egui_ctx, &assets.logo);
        Self {
            assets,
            indicator_idx: 0,
            sheets: SheetCache::default(),
            content: ContentCache::default(),
            selected_countries: Vec::new(),
            mix_country: String::new(),
            seeded_sheet: None,
            logo,
            status: "Ready".to_string(),
            last_load_ms: 0.0,
        }
    }

    /// Resolves the current indicator's sheet through the cache. The missing
    /// workbook case short-circuits before the cache so the app recovers if
    /// the file appears later.
    fn resolve_sheet(&mut self, indicator: &Indicator) -> Result<WideTable, String> {
        if !self.assets.workbook.exists() {
            return Err(format!(
                "Data file not found at {}",
                self.assets.workbook.display()
            ));
        }
        let fresh = !self.sheets.contains(indicator.sheet);
        let start = Instant::now();
        let result = self
            .sheets
            .get(&self.assets.workbook, indicator.sheet)
            .map(Clone::clone);
        if fresh {
            self.last_load_ms = start.elapsed().as_secs_f64() * 1000.0;
            match &result {
                Ok(table) => info!(sheet = indicator.sheet, rows = table.rows.len(), "sheet loaded"),
                Err(e) => warn!(sheet = indicator.sheet, error = %e, "sheet load failed"),
            }
        }
        result
    }

    /// Re-seeds the country selections whenever the resolved sheet changes,
    /// and surfaces the melt drop diagnostic once per sheet.
    fn seed_selection(&mut self, indicator: &Indicator, table: &WideTable) {
        if self.seeded_sheet.as_deref() == Some(indicator.sheet) {
            return;
        }
        let countries = table.countries();
        self.selected_countries = default_selection(&countries);
        self.mix_country = countries.first().cloned().unwrap_or_default();
        let dropped = melt(table).dropped;
        self.status = if dropped > 0 {
            warn!(sheet = indicator.sheet, dropped, "non-numeric cells ignored");
            format!("{} non-numeric cells ignored in {:?}", dropped, indicator.sheet)
        } else {
            "Ready".to_string()
        };
        self.seeded_sheet = Some(indicator.sheet.to_string());
    }

    fn country_filter_ui(&mut self, ui: &mut egui::Ui, table: &WideTable) {
        ui.label("Countries");
        egui::ScrollArea::vertical()
            .id_source("country_filter_scroll")
            .max_height(320.0)
            .show(ui, |ui| {
                for country in &table.countries() {
                    let mut checked = self.selected_countries.iter().any(|c| c == country);
                    if ui.checkbox(&mut checked, country).changed() {
                        if checked {
                            self.selected_countries.push(country.clone());
                            self.selected_countries.sort();
                        } else {
                            self.selected_countries.retain(|c| c != country);
                        }
                    }
                }
            });
    }

    fn mix_country_ui(&mut self, ui: &mut egui::Ui, table: &WideTable) {
        ui.label("Country");
        ComboBox::from_id_source("mix_country_select")
            .width(200.0)
            .selected_text(self.mix_country.clone())
            .show_ui(ui, |ui| {
                for country in table.countries() {
                    ui.selectable_value(&mut self.mix_country, country.clone(), &country);
                }
            });
    }

    fn time_series_view(&mut self, ui: &mut egui::Ui, table: &WideTable) {
        let long = melt(table);
        let filtered = filter_long(&long, &self.selected_countries);
        let selected = self.selected_countries.clone();

        StripBuilder::new(ui)
            .size(Size::relative(0.64))
            .size(Size::remainder())
            .horizontal(|mut strip| {
                strip.cell(|ui| {
                    if selected.is_empty() || filtered.rows.is_empty() {
                        ui.label(EMPTY_SELECTION_PROMPT);
                    } else {
                        trend_chart(ui, &filtered, &selected);
                    }
                });
                strip.cell(|ui| {
                    snapshot_table(ui, table);
                });
            });

        ui.add_space(8.0);
        egui::CollapsingHeader::new("Data table").show(ui, |ui| {
            raw_data_table(ui, table, &selected);
        });
    }

    fn generation_mix_view(&mut self, ui: &mut egui::Ui, table: &WideTable) {
        let mix = generation_mix(table, &self.mix_country);
        mix_chart(ui, &mix);
        ui.add_space(8.0);
        mix_table(ui, &mix);
    }

    fn supplement_ui(&mut self, ui: &mut egui::Ui, file: &str) {
        let path = self.assets.content_dir.join(file);
        let text = self.content.get(&path).to_string();
        if text.is_empty() {
            ui.add_space(8.0);
            ui.colored_label(
                Color32::YELLOW,
                format!("Supplementary markdown not found at {}", path.display()),
            );
        } else {
            ui.separator();
            ui.label(text);
        }
    }
}

// --- eframe::App Implementation ---
impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- Header Panel ---
        egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.heading(APP_TITLE);
                    ui.label(RichText::new(APP_CAPTION).small().weak());
                });
                if let Some(logo) = &self.logo {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add(egui::Image::new(logo).max_height(48.0));
                    });
                }
            });
            ui.add_space(4.0);
        });

        // --- Status Bar Panel ---
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Status: {}", self.status));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("[{:.1} ms]", self.last_load_ms));
                });
            });
        });

        // --- Sidebar: indicator selection + per-view country filter ---
        let mut resolved: Option<(Indicator, Result<WideTable, String>)> = None;
        egui::SidePanel::left("sidebar_panel")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.label("Indicator");
                ComboBox::from_id_source("indicator_select")
                    .width(220.0)
                    .selected_text(INDICATORS[self.indicator_idx].label)
                    .show_ui(ui, |ui| {
                        for (i, ind) in INDICATORS.iter().enumerate() {
                            ui.selectable_value(&mut self.indicator_idx, i, ind.label);
                        }
                    });
                ui.label(
                    RichText::new("Use filters below to focus on specific countries.").small(),
                );
                ui.separator();

                let indicator = INDICATORS[self.indicator_idx];
                let result = self.resolve_sheet(&indicator);
                if let Ok(table) = &result {
                    self.seed_selection(&indicator, table);
                    match indicator.view {
                        ViewKind::TimeSeries => self.country_filter_ui(ui, table),
                        ViewKind::GenerationMix => self.mix_country_ui(ui, table),
                    }
                }
                resolved = Some((indicator, result));
            });

        // --- Central Panel: description + dispatched view ---
        egui::CentralPanel::default().show(ctx, |ui| {
            let (indicator, result) = match resolved {
                Some(r) => r,
                None => return,
            };
            egui::ScrollArea::vertical().show(ui, |ui| {
                match indicator.view {
                    ViewKind::TimeSeries => ui.heading(indicator.label),
                    ViewKind::GenerationMix => ui.heading(MIX_TITLE),
                };
                if !indicator.description.is_empty() {
                    ui.label(indicator.description);
                }
                ui.add_space(6.0);
                match &result {
                    Err(msg) => {
                        ui.colored_label(Color32::RED, msg);
                    }
                    Ok(table) => {
                        match indicator.view {
                            ViewKind::TimeSeries => self.time_series_view(ui, table),
                            ViewKind::GenerationMix => self.generation_mix_view(ui, table),
                        }
                        if let Some(file) = indicator.supplement {
                            self.supplement_ui(ui, file);
                        }
                    }
                }
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn load_logo(ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
    let bytes = std::fs::read(path).ok()?;
    let decoded = image::load_from_memory(&bytes).ok()?.to_rgba8();
    let size = [decoded.width() as usize, decoded.height() as usize];
    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, decoded.as_raw());
    Some(ctx.load_texture("logo", pixels, egui::TextureOptions::LINEAR))
}

/// Multi-country line chart over the melted table. Years are plotted at
/// their index in the numeric year order; the axis formatter maps indices
/// back to year labels.
fn trend_chart(ui: &mut egui::Ui, long: &LongTable, selected: &[String]) {
    let years = year_order(long);
    let axis_years = years.clone();
    let hover_years = years.clone();

    let plot = Plot::new("trend_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .auto_bounds_y()
        .x_axis_formatter(move |mark, _max_chars, _range| {
            if mark.value < -0.5 {
                return String::new();
            }
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-3 {
                return String::new();
            }
            axis_years.get(idx as usize).cloned().unwrap_or_default()
        })
        .label_formatter(move |name, value| {
            let idx = value.x.round().max(0.0) as usize;
            let year = hover_years.get(idx).cloned().unwrap_or_default();
            if name.is_empty() {
                format!("{}: {:.3}", year, value.y)
            } else {
                format!("{}\n{}: {:.3}", name, year, value.y)
            }
        });

    plot.show(ui, |plot_ui| {
        for (series_idx, country) in selected.iter().enumerate() {
            let points: Vec<[f64; 2]> = years
                .iter()
                .enumerate()
                .filter_map(|(x, year)| {
                    long.rows
                        .iter()
                        .find(|r| &r.country == country && &r.year == year)
                        .map(|r| [x as f64, r.value])
                })
                .collect();
            if points.is_empty() {
                continue;
            }
            let color = PLOT_COLORS[series_idx % PLOT_COLORS.len()];
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(country)
                    .color(color),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(2.5)
                    .name(country)
                    .color(color),
            );
        }
    });
}

/// Latest-year ranking beside the chart. Independent of the country filter:
/// always shows all countries.
fn snapshot_table(ui: &mut egui::Ui, table: &WideTable) {
    let snap = match latest_snapshot(table) {
        Some(snap) => snap,
        None => return,
    };
    ui.label(RichText::new(format!("Latest year snapshot ({})", snap.year)).small());
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Country");
            });
            header.col(|ui| {
                ui.strong(format!("{} value", snap.year));
            });
        })
        .body(|mut body| {
            for entry in &snap.entries {
                body.row(16.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&entry.country);
                    });
                    row.col(|ui| {
                        ui.label(entry.value.map_or(String::new(), |v| format!("{}", v)));
                    });
                });
            }
        });
}

/// Expandable raw-data grid: the filtered subset when countries are
/// selected, the full table otherwise.
fn raw_data_table(ui: &mut egui::Ui, table: &WideTable, selected: &[String]) {
    let rows: Vec<&WideRow> = if selected.is_empty() {
        table.rows.iter().collect()
    } else {
        table
            .rows
            .iter()
            .filter(|r| selected.iter().any(|c| c == &r.country))
            .collect()
    };
    egui::ScrollArea::horizontal()
        .id_source("raw_table_scroll")
        .show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::auto().at_least(90.0))
                .columns(Column::auto().at_least(56.0), table.columns.len())
                .header(18.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Country");
                    });
                    for label in &table.columns {
                        header.col(|ui| {
                            ui.strong(label.to_string());
                        });
                    }
                })
                .body(|mut body| {
                    for wide_row in rows {
                        body.row(16.0, |mut row| {
                            row.col(|ui| {
                                ui.label(&wide_row.country);
                            });
                            for value in &wide_row.values {
                                row.col(|ui| {
                                    ui.label(fmt_cell(value));
                                });
                            }
                        });
                    }
                });
        });
}

/// Single-country generation mix, one bar per source in sheet column order.
fn mix_chart(ui: &mut egui::Ui, mix: &[MixEntry]) {
    let sources: Vec<String> = mix.iter().map(|e| e.source.clone()).collect();

    let plot = Plot::new("mix_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_formatter(move |mark, _max_chars, _range| {
            if mark.value < -0.5 {
                return String::new();
            }
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-3 {
                return String::new();
            }
            sources.get(idx as usize).cloned().unwrap_or_default()
        });

    plot.show(ui, |plot_ui| {
        for (source_idx, entry) in mix.iter().enumerate() {
            if let Some(share) = entry.share {
                let bar = Bar::new(source_idx as f64, share)
                    .width(0.6)
                    .name(format!("{}: {:.2}%", entry.source, share * 100.0));
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(&entry.source)
                        .color(PLOT_COLORS[source_idx % PLOT_COLORS.len()]),
                );
            }
        }
    });
}

fn mix_table(ui: &mut egui::Ui, mix: &[MixEntry]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Source");
            });
            header.col(|ui| {
                ui.strong("Share (%)");
            });
        })
        .body(|mut body| {
            for entry in mix {
                body.row(16.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&entry.source);
                    });
                    row.col(|ui| {
                        ui.label(
                            entry
                                .share
                                .map_or(String::new(), |s| format!("{:.2}", share_percent(s))),
                        );
                    });
                });
            }
        });
}

fn fmt_cell(value: &CellValue) -> String {
    match value {
        CellValue::Missing => String::new(),
        CellValue::Number(v) => format!("{}", v),
        CellValue::Text(s) => s.clone(),
    }
}
