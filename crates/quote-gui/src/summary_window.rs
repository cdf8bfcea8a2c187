//! Quote summary dialog with copy and save actions

use std::path::Path;

use eframe::egui::{self, Color32, RichText};
use tracing::{info, warn};

use quote_app::export::{export_quote_to_excel, ReceiptHeader};
use quote_domain::service::{format_amount, render_receipt, QuoteSummary};

const SOFT_RED: Color32 = Color32::from_rgb(0xE0, 0x6C, 0x6C);

/// Outcome of the last copy/save, shown under the buttons
#[derive(Debug, Clone)]
enum Status {
    Done(String),
    Failed(String),
}

pub struct SummaryWindow {
    open: bool,
    status: Option<Status>,
}

impl SummaryWindow {
    pub fn new() -> Self {
        Self {
            open: false,
            status: None,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.status = None;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show(&mut self, ctx: &egui::Context, summary: &QuoteSummary, header: &ReceiptHeader) {
        let mut open = self.open;
        let mut close_clicked = false;

        egui::Window::new("報價明細")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&header.shop_name).strong());
                    ui.label(RichText::new(&header.title).small().color(Color32::GRAY));
                });
                ui.separator();

                egui::Grid::new("summary_grid")
                    .num_columns(2)
                    .spacing([24.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("車種");
                        ui.label(format!("{} {}", summary.model, summary.version));
                        ui.end_row();

                        ui.label("方案");
                        ui.label(&summary.plan_label);
                        ui.end_row();

                        ui.label("售價");
                        ui.label(format!("{} 元", format_amount(summary.base_price)));
                        ui.end_row();
                    });

                if !summary.discounts.is_empty() {
                    ui.add_space(6.0);
                    ui.label(RichText::new("包含折扣：").strong());
                    egui::Grid::new("discount_grid")
                        .num_columns(2)
                        .spacing([24.0, 4.0])
                        .show(ui, |ui| {
                            for line in &summary.discounts {
                                ui.label(&line.label);
                                ui.label(
                                    RichText::new(format!("-{}", format_amount(line.amount)))
                                        .color(SOFT_RED),
                                );
                                ui.end_row();
                            }
                            ui.label(RichText::new("共省下").strong());
                            ui.label(
                                RichText::new(format!("{} 元", format_amount(summary.total_saved)))
                                    .strong()
                                    .color(SOFT_RED),
                            );
                            ui.end_row();
                        });
                }

                if let Some(ref note) = summary.gift_note {
                    ui.add_space(6.0);
                    ui.label(format!("贈品活動：{}", note));
                }

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(RichText::new("車輛價格").strong());
                    ui.label(
                        RichText::new(format!("{} 元", format_amount(summary.final_price)))
                            .size(22.0)
                            .strong(),
                    );
                });
                ui.label(RichText::new("實際價格依門市為主").small().color(Color32::GRAY));

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("📋 複製文字").clicked() {
                        ctx.copy_text(receipt_text(summary, header));
                        self.status = Some(Status::Done("已複製到剪貼簿".to_string()));
                    }
                    if ui.button("💾 儲存文字檔").clicked() {
                        self.save_text(summary, header);
                    }
                    if ui.button("📊 匯出 Excel").clicked() {
                        self.save_excel(summary, header);
                    }
                    if ui.button("關閉").clicked() {
                        close_clicked = true;
                    }
                });

                match &self.status {
                    Some(Status::Done(msg)) => {
                        ui.label(RichText::new(msg).color(Color32::GREEN));
                    }
                    Some(Status::Failed(msg)) => {
                        ui.label(RichText::new(msg).color(Color32::RED));
                    }
                    None => {}
                }
            });

        self.open = open && !close_clicked;
    }

    fn save_text(&mut self, summary: &QuoteSummary, header: &ReceiptHeader) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Text", &["txt"])
            .set_file_name(default_file_name(summary, "txt"))
            .save_file()
        else {
            return;
        };

        self.status = Some(match std::fs::write(&path, receipt_text(summary, header)) {
            Ok(()) => {
                info!(path = %path.display(), "receipt saved");
                saved_status(&path)
            }
            Err(e) => {
                warn!("Failed to save receipt: {}", e);
                Status::Failed(format!("儲存失敗: {}", e))
            }
        });
    }

    fn save_excel(&mut self, summary: &QuoteSummary, header: &ReceiptHeader) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel", &["xlsx"])
            .set_file_name(default_file_name(summary, "xlsx"))
            .save_file()
        else {
            return;
        };

        self.status = Some(match export_quote_to_excel(summary, header, &path) {
            Ok(()) => saved_status(&path),
            Err(e) => {
                warn!("Failed to export receipt: {}", e);
                Status::Failed(format!("匯出失敗: {}", e))
            }
        });
    }
}

fn saved_status(path: &Path) -> Status {
    Status::Done(format!("已儲存: {}", path.display()))
}

/// Receipt text with the shop header on top
fn receipt_text(summary: &QuoteSummary, header: &ReceiptHeader) -> String {
    format!(
        "{}\n{}\n\n{}",
        header.shop_name,
        header.title,
        render_receipt(summary)
    )
}

fn default_file_name(summary: &QuoteSummary, extension: &str) -> String {
    let stem: String = format!("{}_{}", summary.model, summary.version)
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("報價單_{}.{}", stem, extension)
}
