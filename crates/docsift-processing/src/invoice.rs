//! Invoice field heuristics
//!
//! Line-oriented pattern matching over converted markdown. Nothing here can
//! fail: a field with no matching line stays `None`. Every qualifying line
//! overwrites the previous value, so each field reports its last match.

use docsift_core::models::InvoiceData;
use regex::Regex;
use std::sync::LazyLock;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").expect("date pattern is a valid regex")
});

static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\s*\d+[,.]?\d*\.?\d{0,2}").expect("amount pattern is a valid regex")
});

/// Pull invoice number, date and total amount out of `text`.
///
/// `vendor` and `line_items` are never populated.
pub fn extract_invoice_fields(text: &str) -> InvoiceData {
    let mut invoice = InvoiceData::new(text);

    for line in text.lines() {
        let lower = line.to_lowercase();

        if lower.contains("invoice") && line.contains('#') {
            if let Some(number) = invoice_number(line) {
                invoice.invoice_number = Some(number);
            }
        }

        if lower.contains("date") {
            if let Some(m) = DATE_PATTERN.find(line) {
                invoice.date = Some(m.as_str().to_string());
            }
        }

        if lower.contains("total") || lower.contains("amount") {
            if let Some(amount) = AMOUNT_PATTERN.find(line).and_then(|m| parse_amount(m.as_str()))
            {
                invoice.total_amount = Some(amount);
            }
        }
    }

    tracing::debug!(
        invoice_number = invoice.invoice_number.as_deref(),
        date = invoice.date.as_deref(),
        total_amount = invoice.total_amount,
        "Extracted invoice fields"
    );

    invoice
}

/// First token of the segment between the first `#` and the next one.
fn invoice_number(line: &str) -> Option<String> {
    line.split('#')
        .nth(1)
        .and_then(|segment| segment.split_whitespace().next())
        .map(str::to_string)
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok()
}
