//! Main application: load lifecycle, header and the sticky total bar

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, RichText};
use tracing::{info, warn};

use quote_app::app::{LoadState, LoadTicket, LoadTracker};
use quote_app::config::Config;
use quote_app::export::ReceiptHeader;
use quote_app::repository::open_price_repo;
use quote_domain::model::PriceTable;
use quote_domain::service::{
    build_summary, format_amount, quote_totals, QuoteSelection, QuoteTotals,
};
use quote_types::Result;

use crate::quote_panel::QuotePanel;
use crate::summary_window::SummaryWindow;

const ACCENT: Color32 = Color32::from_rgb(0xD9, 0x9A, 0x5B);

/// Result of one background load
struct LoadMessage {
    ticket: LoadTicket,
    result: Result<PriceTable>,
}

/// Main application state
pub struct QuoteApp {
    config: Config,
    tracker: LoadTracker,
    selection: QuoteSelection,
    quote_panel: QuotePanel,
    summary_window: SummaryWindow,
    /// Title computed once per session
    title: String,
    sender: Sender<LoadMessage>,
    receiver: Receiver<LoadMessage>,
}

impl QuoteApp {
    /// Create a new application instance and start the first load
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();

        if let Some(font_data) = Self::load_system_font() {
            fonts.font_data.insert(
                "cjk".to_owned(),
                egui::FontData::from_owned(font_data).into(),
            );

            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .insert(0, "cjk".to_owned());

            fonts
                .families
                .entry(egui::FontFamily::Monospace)
                .or_default()
                .insert(0, "cjk".to_owned());
        } else {
            warn!("no CJK system font found; labels may not render");
        }

        cc.egui_ctx.set_fonts(fonts);

        let mut style = (*cc.egui_ctx.style()).clone();
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        let config = Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        });
        let title = config.quote_title();
        let (sender, receiver) = channel();

        let mut app = Self {
            config,
            tracker: LoadTracker::new(),
            selection: QuoteSelection::new(),
            quote_panel: QuotePanel::new(),
            summary_window: SummaryWindow::new(),
            title,
            sender,
            receiver,
        };
        app.start_load(&cc.egui_ctx);
        app
    }

    /// Load a system font with Traditional Chinese glyphs
    fn load_system_font() -> Option<Vec<u8>> {
        let font_paths = [
            "C:/Windows/Fonts/msjh.ttc",
            "C:/Windows/Fonts/mingliu.ttc",
            "C:/Windows/Fonts/YuGothM.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/PingFang.ttc",
        ];

        for path in &font_paths {
            if let Ok(data) = std::fs::read(path) {
                return Some(data);
            }
        }
        None
    }

    /// Fetch the sheet on a background thread
    fn start_load(&mut self, ctx: &egui::Context) {
        let ticket = self.tracker.begin();
        let config = self.config.clone();
        let sender = self.sender.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let result = open_price_repo(&config).and_then(|repo| {
                info!(source = %repo.describe(), "loading price sheet");
                repo.load()
            });
            let _ = sender.send(LoadMessage { ticket, result });
            ctx.request_repaint();
        });
    }

    /// Reload from scratch: selection and summary are reset
    fn reload(&mut self, ctx: &egui::Context) {
        self.selection = QuoteSelection::new();
        self.summary_window.close();
        self.start_load(ctx);
    }

    fn poll_load(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => {
                    self.tracker.complete(message.ticket, message.result);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) -> bool {
        let mut reload_clicked = false;
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(&self.config.shop_name).size(20.0).strong());
                ui.label(RichText::new(&self.title).color(ACCENT));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let button = egui::Button::new("🔄 重新整理");
                if ui.add_enabled(!self.tracker.is_loading(), button).clicked() {
                    reload_clicked = true;
                }
            });
        });
        reload_clicked
    }

    fn render_total_bar(&mut self, ui: &mut egui::Ui, totals: QuoteTotals, complete: bool) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(totals.caption()).small().color(Color32::GRAY));
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format_amount(totals.final_price))
                            .size(26.0)
                            .strong()
                            .color(ACCENT),
                    );
                    ui.label("元");
                });
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(complete, egui::Button::new("明細"))
                    .clicked()
                {
                    self.summary_window.open();
                }
            });
        });
    }
}

impl eframe::App for QuoteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        if let Some(table) = self.tracker.table() {
            self.selection.reconcile(table);
        }

        let mut reload = false;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            reload = self.render_header(ui);
            ui.add_space(6.0);
        });

        let (totals, complete) = match self.tracker.table() {
            Some(table) => (
                quote_totals(table, &self.selection),
                self.selection.is_complete(table),
            ),
            None => (QuoteTotals::default(), false),
        };

        egui::TopBottomPanel::bottom("total_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_total_bar(ui, totals, complete);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tracker.state() {
            LoadState::Idle | LoadState::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.horizontal_centered(|ui| {
                        ui.spinner();
                        ui.label("正在翻閱報價單...");
                    });
                });
            }
            LoadState::Failed { message, detail } => {
                let (message, detail) = (message.clone(), detail.clone());
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(RichText::new(message).color(Color32::RED).strong());
                    ui.label(RichText::new(detail).small().color(Color32::GRAY));
                    ui.add_space(8.0);
                    if ui.button("重試").clicked() {
                        reload = true;
                    }
                });
            }
            LoadState::Ready(table) if table.is_empty() => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(RichText::new("目前沒有報價資料").color(Color32::GRAY));
                });
            }
            LoadState::Ready(table) => {
                self.quote_panel.ui(ui, table, &self.selection);
            }
        });

        if self.quote_panel.apply_actions(&mut self.selection) {
            ctx.request_repaint();
        }

        if self.summary_window.is_open() {
            let summary = self
                .tracker
                .table()
                .and_then(|table| build_summary(table, &self.selection));
            match summary {
                Some(summary) => {
                    let header = ReceiptHeader {
                        shop_name: self.config.shop_name.clone(),
                        title: self.title.clone(),
                    };
                    self.summary_window.show(ctx, &summary, &header);
                }
                None => self.summary_window.close(),
            }
        }

        if reload {
            self.reload(ctx);
        }
    }
}
