//! Keystroke masks for the tax ID and date fields.
//!
//! Each mask keeps the digits of whatever the field holds, truncates them and
//! re-inserts the separators. A separator only appears once a digit follows
//! it, so the mask grows as the user types. Running a mask on its own output
//! returns the same text.

use super::validation::{digits_only, TAX_ID_DIGITS};

const TAX_ID_SEPARATORS: &[(usize, char)] = &[(2, '.'), (5, '.'), (8, '/'), (12, '-')];

const DATE_DIGITS: usize = 8;
const DATE_SEPARATORS: &[(usize, char)] = &[(2, '/'), (4, '/')];

/// Mask a tax ID as `NN.NNN.NNN/NNNN-NN`
pub fn format_tax_id(raw: &str) -> String {
    mask(raw, TAX_ID_DIGITS, TAX_ID_SEPARATORS)
}

/// Mask a date as `DD/MM/YYYY`
pub fn format_date(raw: &str) -> String {
    mask(raw, DATE_DIGITS, DATE_SEPARATORS)
}

fn mask(raw: &str, max_digits: usize, separators: &[(usize, char)]) -> String {
    let mut formatted = String::with_capacity(max_digits + separators.len());
    for (index, digit) in digits_only(raw).chars().take(max_digits).enumerate() {
        if let Some((_, separator)) = separators.iter().find(|(position, _)| *position == index) {
            formatted.push(*separator);
        }
        formatted.push(digit);
    }
    formatted
}

/// Field text after masking, with where the cursor goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedText {
    pub text: String,
    /// Cursor position in characters; always the end of `text`
    pub cursor: usize,
}

/// The masked input fields of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMask {
    TaxId,
    Date,
}

impl InputMask {
    pub fn apply(&self, raw: &str) -> MaskedText {
        let text = match self {
            InputMask::TaxId => format_tax_id(raw),
            InputMask::Date => format_date(raw),
        };
        let cursor = text.chars().count();
        MaskedText { text, cursor }
    }
}
