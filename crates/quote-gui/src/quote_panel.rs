//! Quotation panel: model, version, plan and rebate selection

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use quote_domain::model::{DiscountField, PlanCategory, PlanOption, PriceTable, VersionRecord};
use quote_domain::service::{classify_plans, format_amount, QuoteSelection};

const ACCENT: Color32 = Color32::from_rgb(0xD9, 0x9A, 0x5B);
const SOFT_RED: Color32 = Color32::from_rgb(0xE0, 0x6C, 0x6C);

/// A user interaction, applied to the selection after the frame is drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    Model(String),
    Version(String),
    Plan(String),
    Toggle(DiscountField),
}

impl SelectionAction {
    pub fn apply(self, selection: &mut QuoteSelection) {
        match self {
            SelectionAction::Model(name) => selection.set_model(&name),
            SelectionAction::Version(name) => selection.set_version(&name),
            SelectionAction::Plan(key) => selection.set_plan_key(&key),
            SelectionAction::Toggle(field) => selection.toggle_discount(field),
        }
    }
}

/// Panel for picking what to quote
pub struct QuotePanel {
    /// Actions collected while rendering
    pending_actions: Vec<SelectionAction>,
}

impl QuotePanel {
    pub fn new() -> Self {
        Self {
            pending_actions: Vec::new(),
        }
    }

    /// Take the actions collected during the last `ui` call
    pub fn take_actions(&mut self) -> Vec<SelectionAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Apply collected actions; true when the selection changed and the
    /// frame must be redrawn
    pub fn apply_actions(&mut self, selection: &mut QuoteSelection) -> bool {
        let actions = self.take_actions();
        let changed = !actions.is_empty();
        for action in actions {
            action.apply(selection);
        }
        changed
    }

    pub fn ui(&mut self, ui: &mut Ui, table: &PriceTable, selection: &QuoteSelection) {
        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            self.render_model_step(ui, table, selection);

            if selection.model.is_empty() {
                return;
            }
            ui.add_space(12.0);
            self.render_version_step(ui, table, selection);

            if let Some(record) = selection.current_record(table) {
                ui.add_space(12.0);
                self.render_discount_section(ui, record, selection);
            }
        });
    }

    fn render_model_step(&mut self, ui: &mut Ui, table: &PriceTable, selection: &QuoteSelection) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("步驟 1").small().color(Color32::GRAY));
            ui.label(RichText::new("選擇車款").strong());
            ui.add_space(4.0);

            let selected_text = if selection.model.is_empty() {
                "請點擊選擇..."
            } else {
                selection.model.as_str()
            };

            egui::ComboBox::from_id_salt("model_select")
                .selected_text(selected_text)
                .width(ui.available_width() - 8.0)
                .show_ui(ui, |ui| {
                    for name in table.model_names() {
                        if ui.selectable_label(selection.model == name, name).clicked()
                            && selection.model != name
                        {
                            self.pending_actions
                                .push(SelectionAction::Model(name.to_string()));
                        }
                    }
                });
        });
    }

    fn render_version_step(&mut self, ui: &mut Ui, table: &PriceTable, selection: &QuoteSelection) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("步驟 2").small().color(Color32::GRAY));
            ui.label(RichText::new("車款版本").strong());
            ui.add_space(4.0);

            ScrollArea::horizontal()
                .id_salt("version_chips")
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for version in table.version_names(&selection.model) {
                            let is_selected = selection.version == version;
                            let text = if is_selected {
                                RichText::new(version).strong().color(ACCENT)
                            } else {
                                RichText::new(version)
                            };
                            if ui.selectable_label(is_selected, text).clicked() {
                                self.pending_actions
                                    .push(SelectionAction::Version(version.to_string()));
                            }
                        }
                    });
                });

            let Some(record) = selection.current_record(table) else {
                return;
            };

            ui.add_space(8.0);
            let options = classify_plans(record);
            if options.is_empty() {
                ui.label(
                    RichText::new("此版本目前沒有可選方案")
                        .color(Color32::GRAY)
                        .italics(),
                );
                return;
            }

            if !options.cash.is_empty() {
                ui.label(RichText::new(PlanCategory::Cash.label()).small().strong());
                for opt in &options.cash {
                    self.render_cash_option(ui, opt, &selection.plan_key);
                }
            }

            if !options.installment.is_empty() {
                ui.add_space(6.0);
                ui.label(RichText::new(PlanCategory::Installment.label()).small().strong());
                for opt in &options.installment {
                    self.render_installment_option(ui, opt, &selection.plan_key);
                }
            }
        });
    }

    fn render_cash_option(&mut self, ui: &mut Ui, opt: &PlanOption, selected_key: &str) {
        let checked = selected_key == opt.key;
        if ui.radio(checked, RichText::new(&opt.label).strong()).clicked() && !checked {
            self.pending_actions
                .push(SelectionAction::Plan(opt.key.clone()));
        }
    }

    fn render_installment_option(&mut self, ui: &mut Ui, opt: &PlanOption, selected_key: &str) {
        let checked = selected_key == opt.key;
        ui.horizontal(|ui| {
            if ui
                .radio(checked, RichText::new(format!("{} 期", opt.period_count)).strong())
                .clicked()
                && !checked
            {
                self.pending_actions
                    .push(SelectionAction::Plan(opt.key.clone()));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("每期 {}元", format_amount(opt.per_period_amount)))
                        .color(SOFT_RED),
                );
                ui.label(RichText::new(format!("{}元 /", format_amount(opt.amount))).strong());
            });
        });
    }

    fn render_discount_section(
        &mut self,
        ui: &mut Ui,
        record: &VersionRecord,
        selection: &QuoteSelection,
    ) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("補助與贈品").small().color(Color32::GRAY));
            ui.add_space(4.0);

            for field in DiscountField::ALL {
                let value = field.value(record);
                let is_zero = value == 0;
                let enabled = selection.discounts.is_enabled(field);

                ui.horizontal(|ui| {
                    // zero-valued rebates are shown but cannot be toggled
                    let mut checked = enabled && !is_zero;
                    let response = ui.add_enabled(
                        !is_zero,
                        egui::Checkbox::new(&mut checked, field.label()),
                    );
                    if response.changed() {
                        self.pending_actions.push(SelectionAction::Toggle(field));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let text = if is_zero {
                            RichText::new("0").color(Color32::GRAY)
                        } else {
                            RichText::new(format!("-{}", format_amount(value.saturating_abs())))
                                .strong()
                                .color(SOFT_RED)
                        };
                        ui.label(text);
                    });
                });
                ui.separator();
            }

            ui.add_space(6.0);
            let note = if record.gift_note.is_empty() {
                RichText::new("此版本無特殊贈品備註。").color(Color32::GRAY)
            } else {
                RichText::new(format!("🎁 {}", record.gift_note)).strong()
            };
            ui.label(note);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_apply_reset_cascade() {
        let mut selection = QuoteSelection::new();
        SelectionAction::Model("ModelX".to_string()).apply(&mut selection);
        SelectionAction::Version("V1".to_string()).apply(&mut selection);
        SelectionAction::Plan("現金".to_string()).apply(&mut selection);
        SelectionAction::Toggle(DiscountField::TaxNew).apply(&mut selection);

        assert_eq!(selection.plan_key, "現金");
        assert!(!selection.discounts.is_enabled(DiscountField::TaxNew));

        SelectionAction::Version("V2".to_string()).apply(&mut selection);
        assert_eq!(selection.model, "ModelX");
        assert!(selection.plan_key.is_empty());
    }

    #[test]
    fn test_apply_actions_reports_change() {
        let mut panel = QuotePanel::new();
        let mut selection = QuoteSelection::new();
        assert!(!panel.apply_actions(&mut selection));

        panel
            .pending_actions
            .push(SelectionAction::Model("ModelX".to_string()));
        assert!(panel.apply_actions(&mut selection));
        assert_eq!(selection.model, "ModelX");
        assert!(!panel.apply_actions(&mut selection));
    }

    #[test]
    fn test_take_actions_drains() {
        let mut panel = QuotePanel::new();
        panel
            .pending_actions
            .push(SelectionAction::Plan("12#期".to_string()));
        assert_eq!(panel.take_actions().len(), 1);
        assert!(panel.take_actions().is_empty());
    }
}
