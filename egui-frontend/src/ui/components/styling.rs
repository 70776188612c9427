use eframe::egui;

use crate::ui::app_state::NoticeKind;

/// Configure the global egui style
pub fn setup_style(ctx: &egui::Context) {
    ctx.set_style({
        let mut style = (*ctx.style()).clone();

        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(22.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(15.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::new(15.0, egui::FontFamily::Proportional),
        );

        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);

        style
    });
}

/// Title and accent color of a notice window
pub fn notice_style(kind: NoticeKind) -> (&'static str, egui::Color32) {
    match kind {
        NoticeKind::Success => ("Success", egui::Color32::from_rgb(46, 139, 87)),
        NoticeKind::Warning => ("Warning", egui::Color32::from_rgb(218, 165, 32)),
        NoticeKind::Error => ("Error", egui::Color32::from_rgb(200, 50, 50)),
    }
}
