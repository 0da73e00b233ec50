use super::error::InvoiceError;
use crate::records::{LineItem, ServiceItem};

/// A single field edit on a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemField {
    Name(String),
    Description(String),
    Quantity(f64),
    Rate(f64),
}

/// A new, empty line: quantity 1 at rate 0.
pub fn blank_line_item() -> LineItem {
    LineItem {
        name: String::new(),
        description: None,
        quantity: 1.0,
        rate: 0.0,
        amount: 0.0,
    }
}

/// Appends a blank line item and returns its index.
pub fn add_line_item(items: &mut Vec<LineItem>) -> usize {
    items.push(blank_line_item());
    items.len() - 1
}

/// Edits one field of the item at `index`.
///
/// Quantity and rate edits recompute `amount = quantity * rate`.
pub fn update_line_item(
    items: &mut [LineItem],
    index: usize,
    field: LineItemField,
) -> Result<(), InvoiceError> {
    let len = items.len();
    let item = items
        .get_mut(index)
        .ok_or(InvoiceError::LineItemOutOfRange { index, len })?;

    match field {
        LineItemField::Name(name) => item.name = name,
        LineItemField::Description(description) => {
            item.description = Some(description).filter(|d| !d.is_empty());
        }
        LineItemField::Quantity(quantity) => {
            item.quantity = quantity;
            item.amount = item.quantity * item.rate;
        }
        LineItemField::Rate(rate) => {
            item.rate = rate;
            item.amount = item.quantity * item.rate;
        }
    }
    Ok(())
}

/// Removes and returns the item at `index`.
pub fn remove_line_item(
    items: &mut Vec<LineItem>,
    index: usize,
) -> Result<LineItem, InvoiceError> {
    if index >= items.len() {
        return Err(InvoiceError::LineItemOutOfRange {
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

pub fn subtotal(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}

/// Prefills invoice lines from a client's booked services.
pub fn line_items_from_services(services: &[ServiceItem]) -> Vec<LineItem> {
    services
        .iter()
        .map(|service| LineItem {
            name: service.name.clone(),
            description: service.description.clone(),
            quantity: service.quantity,
            rate: service.rate,
            amount: service.amount,
        })
        .collect()
}
