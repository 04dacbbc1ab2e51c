//! Consolidation of a table's open orders into a single bill.
//!
//! A table may accumulate several open orders before it is closed; the
//! waiter-facing bill merges their line items and sums their totals. The
//! aggregation is keyed by product id, so two products that happen to share
//! a display name never collapse into one line.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::dto::orders::{ConsolidatedBill, ConsolidatedItem, IndividualOrder};
use crate::entity::orders;

/// One order line joined with its product's display name.
#[derive(Debug, Clone)]
pub struct BillLine {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// An open (non-CLOSED) order with its creator's name and its lines.
#[derive(Debug, Clone)]
pub struct OpenOrder {
    pub order: orders::Model,
    pub garcom: String,
    pub lines: Vec<BillLine>,
}

/// Aggregate the open orders of a table, oldest first, into the consolidated
/// bill. The grand total is the sum of the per-order totals. Quantities of
/// the same product are summed across orders; the most recently seen snapshot
/// price wins; items keep the order of first encounter.
pub fn consolidate(table_id: i32, open_orders: &[OpenOrder]) -> ConsolidatedBill {
    let mut total = Decimal::ZERO;
    let mut items: Vec<ConsolidatedItem> = Vec::new();
    let mut by_product: HashMap<i32, usize> = HashMap::new();
    let mut individual_orders = Vec::with_capacity(open_orders.len());

    for open in open_orders {
        total += open.order.total;

        for line in &open.lines {
            match by_product.get(&line.product_id) {
                Some(&slot) => {
                    items[slot].quantity += line.quantity;
                    items[slot].price = line.price;
                }
                None => {
                    by_product.insert(line.product_id, items.len());
                    items.push(ConsolidatedItem {
                        product_id: line.product_id,
                        name: line.product_name.clone(),
                        quantity: line.quantity,
                        price: line.price,
                    });
                }
            }
        }

        individual_orders.push(IndividualOrder {
            id: open.order.id,
            status: open.order.status,
            total: open.order.total,
            garcom: open.garcom.clone(),
            created_at: open.order.created_at.with_timezone(&Utc),
        });
    }

    ConsolidatedBill {
        table_id,
        total,
        items,
        individual_orders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use sea_orm::prelude::DateTimeWithTimeZone;

    fn order(id: i32, total: Decimal) -> orders::Model {
        let now: DateTimeWithTimeZone = Utc::now().into();
        orders::Model {
            id,
            table_id: 1,
            user_id: 1,
            status: OrderStatus::Pending,
            total,
            created_at: now,
            updated_at: now,
            ready_at: None,
            closed_at: None,
        }
    }

    fn line(product_id: i32, name: &str, quantity: i32, price: Decimal) -> BillLine {
        BillLine {
            product_id,
            product_name: name.to_string(),
            quantity,
            price,
        }
    }

    #[test]
    fn empty_table_yields_zero_total() {
        let bill = consolidate(7, &[]);
        assert_eq!(bill.table_id, 7);
        assert_eq!(bill.total, Decimal::ZERO);
        assert!(bill.items.is_empty());
        assert!(bill.individual_orders.is_empty());
    }

    #[test]
    fn quantities_sum_across_orders_and_totals_accumulate() {
        let water = Decimal::new(300, 2);
        let open = vec![
            OpenOrder {
                order: order(1, Decimal::new(600, 2)),
                garcom: "João".into(),
                lines: vec![line(10, "Água", 2, water)],
            },
            OpenOrder {
                order: order(2, Decimal::new(300, 2)),
                garcom: "João".into(),
                lines: vec![line(10, "Água", 1, water)],
            },
        ];

        let bill = consolidate(1, &open);
        assert_eq!(bill.total, Decimal::new(900, 2));
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0].quantity, 3);
        assert_eq!(bill.items[0].name, "Água");
        assert_eq!(bill.individual_orders.len(), 2);
        assert_eq!(bill.individual_orders[0].id, 1);
    }

    #[test]
    fn same_name_different_products_stay_separate() {
        let open = vec![OpenOrder {
            order: order(1, Decimal::new(1000, 2)),
            garcom: "Maria".into(),
            lines: vec![
                line(10, "Suco", 1, Decimal::new(400, 2)),
                line(11, "Suco", 1, Decimal::new(600, 2)),
            ],
        }];

        let bill = consolidate(2, &open);
        assert_eq!(bill.items.len(), 2);
        assert_eq!(bill.items[0].product_id, 10);
        assert_eq!(bill.items[1].product_id, 11);
    }

    #[test]
    fn latest_price_snapshot_wins_and_first_encounter_order_is_kept() {
        let open = vec![
            OpenOrder {
                order: order(1, Decimal::new(700, 2)),
                garcom: "Maria".into(),
                lines: vec![
                    line(20, "Coca-cola", 1, Decimal::new(700, 2)),
                    line(10, "Água", 1, Decimal::new(300, 2)),
                ],
            },
            OpenOrder {
                order: order(2, Decimal::new(750, 2)),
                garcom: "Maria".into(),
                lines: vec![line(20, "Coca-cola", 1, Decimal::new(750, 2))],
            },
        ];

        let bill = consolidate(3, &open);
        assert_eq!(bill.items[0].product_id, 20);
        assert_eq!(bill.items[0].quantity, 2);
        assert_eq!(bill.items[0].price, Decimal::new(750, 2));
        assert_eq!(bill.items[1].product_id, 10);
    }
}
