use eframe::egui;

use container_tracker_backend::domain::InputMask;

/// Single line text edit that re-masks its content on every edit.
///
/// After masking the cursor is moved to the end of the field.
pub fn masked_text_edit(ui: &mut egui::Ui, text: &mut String, mask: InputMask, hint: &str) -> egui::Response {
    let mut output = egui::TextEdit::singleline(text)
        .hint_text(hint)
        .desired_width(180.0)
        .show(ui);

    if output.response.changed() {
        let masked = mask.apply(text);
        *text = masked.text;

        output
            .state
            .cursor
            .set_char_range(Some(egui::text::CCursorRange::one(egui::text::CCursor::new(masked.cursor))));
        output.state.store(ui.ctx(), output.response.id);
    }

    output.response
}
