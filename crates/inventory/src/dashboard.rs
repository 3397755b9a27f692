//! Dashboard figures derived from fetched resources.

use crate::{MovementKind, Product, StockMovement};

/// Headline numbers for the dashboard panel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_products: usize,
    pub out_of_stock: usize,
    pub inbound_units: i64,
    pub outbound_units: i64,
}

impl Summary {
    pub fn compute(products: &[Product], movements: &[StockMovement]) -> Self {
        let mut summary = Summary {
            total_products: products.len(),
            out_of_stock: products.iter().filter(|p| p.quantity_on_hand <= 0).count(),
            ..Summary::default()
        };

        for movement in movements {
            match movement.kind {
                MovementKind::Inbound => summary.inbound_units += movement.quantity,
                MovementKind::Outbound => summary.outbound_units += movement.quantity,
            }
        }

        summary
    }

    pub fn net_units(&self) -> i64 {
        self.inbound_units - self.outbound_units
    }
}

/// The `limit` most recent movements, newest first.
pub fn recent_movements(movements: &[StockMovement], limit: usize) -> Vec<&StockMovement> {
    let mut sorted: Vec<&StockMovement> = movements.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    sorted.truncate(limit);
    sorted
}

/// Products whose name contains `search` (case-insensitive), optionally
/// restricted to one category name.
pub fn filter_products<'a>(
    products: &'a [Product],
    search: &str,
    category: Option<&str>,
) -> Vec<&'a Product> {
    let needle = search.trim().to_lowercase();
    products
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .filter(|p| match category {
            None => true,
            Some(wanted) => p.category.as_deref() == Some(wanted),
        })
        .collect()
}
