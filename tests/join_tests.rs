//! Inner, group and left outer joins over the product/sales fixtures.


use std::cell::Cell;

use sequery::{from, Evaluation, KeyComparer};
use test_data_gen::{products, sales, Product, SalesOrderDetail};

fn three_products() -> Vec<Product> {
    let mut items = products();
    for (p, id) in items.iter_mut().zip([1, 2, 3]) {
        p.product_id = id;
    }
    items.truncate(3);
    items
}

fn three_sales() -> Vec<SalesOrderDetail> {
    let mut lines = sales();
    for (s, id) in lines.iter_mut().zip([2, 2, 3]) {
        s.product_id = id;
    }
    lines.truncate(3);
    lines
}

#[test]
fn test_inner_join_emits_one_row_per_match() {
    let rows = from(three_products())
        .join(
            three_sales(),
            |p| p.product_id,
            |s| s.product_id,
            |p, s| (p.product_id, s.sales_order_id),
        )
        .to_vec();

    assert_eq!(rows, vec![(2, 43659), (2, 43659), (3, 43661)]);
}

#[test]
fn test_join_over_full_catalogue() {
    let products = products();
    let sales = sales();
    let rows = from(&products)
        .join(
            &sales,
            |p| p.product_id,
            |s| s.product_id,
            |p, s| (p.product_id, s.line_total),
        )
        .to_vec();

    assert_eq!(rows.len(), sales.len());
    // Left order first, right order within a key.
    let ids: Vec<i32> = rows.iter().map(|r| r.0).collect();
    assert_eq!(ids, vec![706, 706, 707, 707, 708, 709, 715, 716]);
    assert!((rows[0].1 - 1431.50 * 6.0).abs() < 1e-9);
    assert!((rows[1].1 - 1431.50).abs() < 1e-9);
}

#[test]
fn test_join_on_composite_key() {
    let products = products();
    let sales = sales();
    let rows = from(&products)
        .join(
            &sales,
            |p| (p.product_id, 6i16),
            |s| (s.product_id, s.order_qty),
            |p, s| (p.product_id, s.sales_order_id),
        )
        .to_vec();

    assert_eq!(rows, vec![(706, 43659), (709, 43665)]);
}

#[test]
fn test_join_with_key_comparer() {
    // Keys are names; compare them case-insensitively.
    let left = vec!["Red", "BLUE", "green"];
    let right = vec![("red", 1), ("blue", 2), ("Blue", 3)];
    let ci = KeyComparer::new(|s: &String| s.to_ascii_lowercase());

    let rows = from(left)
        .join_with(
            right,
            |l| l.to_string(),
            |r| r.0.to_string(),
            |l, r| (*l, r.1),
            ci,
        )
        .to_vec();

    assert_eq!(rows, vec![("Red", 1), ("BLUE", 2), ("BLUE", 3)]);
}

#[test]
fn test_join_defers_right_side_until_first_pull() {
    let pulled = Cell::new(0);
    let sales = sales();
    let right = from(&sales).inspect(|_| pulled.set(pulled.get() + 1));

    let joined = from(products()).join(
        right,
        |p| p.product_id,
        |s| s.product_id,
        |p, s| (p.product_id, s.order_qty),
    );
    assert_eq!(joined.evaluation(), Evaluation::Buffered);
    assert_eq!(pulled.get(), 0);

    let mut iter = joined.into_iter();
    assert!(iter.next().is_some());
    assert_eq!(pulled.get(), sales.len());

    // The right side is read once, not per left element.
    let rest = iter.count();
    assert_eq!(rest, sales.len() - 1);
    assert_eq!(pulled.get(), sales.len());
}

#[test]
fn test_join_with_empty_side() {
    let none: Vec<SalesOrderDetail> = Vec::new();
    let rows = from(products())
        .join(none, |p| p.product_id, |s| s.product_id, |p, _| p.product_id)
        .count();
    assert_eq!(rows, 0);
}

#[test]
fn test_group_join_emits_one_row_per_left() {
    let groups = from(three_products())
        .group_join(
            three_sales(),
            |p| p.product_id,
            |s| s.product_id,
            |p, g| (p.product_id, *g.key(), g.len()),
        )
        .to_vec();

    assert_eq!(groups, vec![(1, 1, 0), (2, 2, 2), (3, 3, 1)]);
}

#[test]
fn test_group_join_members_keep_right_order() {
    let products = products();
    let orders = from(&products)
        .filter(|p| p.product_id == 707)
        .group_join(
            sales(),
            |p| p.product_id,
            |s| s.product_id,
            |_, g| g.iter().map(|s| s.sales_order_id).collect::<Vec<_>>(),
        )
        .to_vec();

    assert_eq!(orders, vec![vec![43659, 43670]]);
}

#[test]
fn test_left_outer_join_pads_missing_right() {
    let rows = from(three_products())
        .left_outer_join(
            three_sales(),
            |p| p.product_id,
            |s| s.product_id,
            |p, s| (p.product_id, s.map(|s| s.sales_order_id)),
        )
        .to_vec();

    assert_eq!(
        rows,
        vec![
            (1, None),
            (2, Some(43659)),
            (2, Some(43659)),
            (3, Some(43661)),
        ]
    );
}

#[test]
fn test_left_outer_join_over_full_catalogue() {
    let products = products();
    let rows = from(&products)
        .left_outer_join(
            sales(),
            |p| p.product_id,
            |s| s.product_id,
            |p, s| (p.product_id, s.map(|s| s.order_qty)),
        )
        .to_vec();

    // 8 matched lines plus one padded row each for 680, 712, 711, 717.
    assert_eq!(rows.len(), 12);
    let unmatched: Vec<i32> = rows
        .iter()
        .filter(|(_, qty)| qty.is_none())
        .map(|(id, _)| *id)
        .collect();
    assert_eq!(unmatched, vec![680, 712, 711, 717]);
}

#[test]
fn test_left_outer_join_descriptor() {
    let joined = from(three_products()).left_outer_join(
        three_sales(),
        |p| p.product_id,
        |s| s.product_id,
        |p, _| p.product_id,
    );
    assert_eq!(joined.stage_name(), "left_outer_join");
    assert_eq!(joined.evaluation(), Evaluation::Buffered);
}

#[test]
fn test_join_over_unbounded_left() {
    let letters = from(1..)
        .join(
            vec![(2, 'b'), (4, 'd')],
            |n| *n,
            |r| r.0,
            |_, r| r.1,
        )
        .take(2)
        .to_vec();
    assert_eq!(letters, vec!['b', 'd']);
}

#[test]
fn test_group_join_with_key_comparer() {
    let colors = vec!["Red", "BLACK", "green"];
    let items = products();
    let ci = KeyComparer::new(|s: &String| s.to_ascii_lowercase());

    let groups = from(colors)
        .group_join_with(
            &items,
            |c| c.to_string(),
            |p| p.color.to_uppercase(),
            |c, g| (c, g.iter().map(|p| p.product_id).collect::<Vec<_>>()),
            ci,
        )
        .to_vec();

    assert_eq!(
        groups,
        vec![
            ("Red", vec![706, 707]),
            ("BLACK", vec![680, 708]),
            ("green", vec![]),
        ]
    );
}
