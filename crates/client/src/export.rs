//! CSV rendering of orders for the admin summary views.
//!
//! Format: a header row, then one row per order, every field wrapped in
//! double quotes (embedded quotes doubled). The `Items` field is a
//! semicolon-joined `name ($price)` list with two-decimal prices.

use crate::models::Order;

const HEADERS: [&str; 6] = [
    "Order ID",
    "Customer Name",
    "Date",
    "Items",
    "Total Amount",
    "Status",
];

/// Render orders as CSV, one line per order after the header.
#[must_use]
pub fn orders_csv(orders: &[Order]) -> String {
    let header = HEADERS.map(quote).join(",");

    let rows = orders.iter().map(|order| {
        let items = order
            .items
            .iter()
            .map(|item| format!("{} (${})", item.name, item.price))
            .collect::<Vec<_>>()
            .join("; ");

        [
            order.id.to_string(),
            order.user_name.clone(),
            order.date.to_string(),
            items,
            order.total_amount.to_string(),
            order.status.to_string(),
        ]
        .map(|field| quote(&field))
        .join(",")
    });

    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
