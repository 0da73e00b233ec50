use chrono::NaiveDate;
use rand::{distr::Alphanumeric, Rng};

use crate::records::InvoiceType;

const SUFFIX_LEN: usize = 4;

/// Generates a document number `MM-DD-YYYY-{INV|Q|R}-XXXX` where `XXXX` is
/// four random uppercase alphanumerics.
pub fn generate_invoice_number(invoice_type: InvoiceType, date: NaiveDate) -> String {
    format_invoice_number(invoice_type, date, &random_suffix(&mut rand::rng()))
}

fn random_suffix<R: Rng>(rng: &mut R) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

fn format_invoice_number(invoice_type: InvoiceType, date: NaiveDate, suffix: &str) -> String {
    format!(
        "{}-{}-{}",
        date.format("%m-%d-%Y"),
        invoice_type.number_suffix(),
        suffix
    )
}
