//! Reductions and per-key totals.


use sequery::{apply_key_totals, from, Evaluation};
use test_data_gen::{products, sales, Product};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Totals the slow way: re-filter the sales for each product.
fn naive_totals(items: &[Product]) -> Vec<(i32, f64)> {
    let lines = sales();
    items
        .iter()
        .map(|p| {
            let total = lines
                .iter()
                .filter(|s| s.product_id == p.product_id)
                .map(|s| s.line_total)
                .sum();
            (p.product_id, total)
        })
        .collect()
}

#[test]
fn test_sum_and_sum_by() {
    assert_eq!(from(1..=10).sum::<i32>(), 55);
    assert_eq!(from(Vec::<i64>::new()).sum::<i64>(), 0);

    let qty: i32 = from(sales()).sum_by(|s| i32::from(s.order_qty));
    assert_eq!(qty, 24);
}

#[test]
fn test_fold() {
    let names = from(vec!["a", "b", "c"]).fold(String::new(), |mut acc, s| {
        acc.push_str(s);
        acc
    });
    assert_eq!(names, "abc");
}

#[test]
fn test_with_key_totals_matches_naive() {
    let items = products();
    let totals: Vec<(&Product, f64)> = from(&items)
        .with_key_totals(
            sales(),
            |p| p.product_id,
            |s| s.product_id,
            |s| s.line_total,
        )
        .to_vec();

    let expected = naive_totals(&items);
    assert_eq!(totals.len(), expected.len());
    for ((p, got), (want_id, want)) in totals.iter().zip(&expected) {
        let id = p.product_id;
        assert_eq!(id, *want_id);
        assert!(close(*got, *want), "{id}: {got} != {want}");
    }
}

#[test]
fn test_with_key_totals_zero_for_no_sales() {
    let items = products();
    let totals: Vec<(&Product, f64)> = from(&items)
        .filter(|p| p.product_id == 712)
        .with_key_totals(
            sales(),
            |p| p.product_id,
            |s| s.product_id,
            |s| s.line_total,
        )
        .to_vec();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].1, 0.0);
}

#[test]
fn test_with_key_totals_is_buffered() {
    let totals = from(products()).with_key_totals(
        sales(),
        |p| p.product_id,
        |s| s.product_id,
        |s| s.line_total,
    );
    assert_eq!(totals.evaluation(), Evaluation::Buffered);
    let rows: Vec<(Product, f64)> = totals.to_vec();
    assert_eq!(rows.len(), 10);
}

#[test]
fn test_apply_key_totals_in_place() {
    let mut items = products();
    apply_key_totals(
        &mut items,
        sales(),
        |p: &Product| p.product_id,
        |s| s.product_id,
        |s| s.line_total,
        |p: &mut Product, total: f64| p.total_sales = total,
    );

    let expected = naive_totals(&products());
    for (p, (id, want)) in items.iter().zip(&expected) {
        assert_eq!(p.product_id, *id);
        assert!(close(p.total_sales, *want));
    }

    let cap = items.iter().find(|p| p.product_id == 712).unwrap();
    assert_eq!(cap.total_sales, 0.0);
    let frame = items.iter().find(|p| p.product_id == 706).unwrap();
    assert!(close(frame.total_sales, 1431.50 * 7.0));
}

#[test]
fn test_apply_key_totals_matches_reference_fixture() {
    // Reference values for the fixture: product id -> sum of line totals.
    let mut items = products();
    apply_key_totals(
        &mut items,
        &sales(),
        |p: &Product| p.product_id,
        |s| s.product_id,
        |s| s.line_total,
        |p: &mut Product, total: f64| p.total_sales = total,
    );
    let by_id: Vec<(i32, f64)> = items.iter().map(|p| (p.product_id, p.total_sales)).collect();

    let expect = [
        (680, 0.0),
        (706, 10020.50),
        (712, 0.0),
        (707, 100.95),
        (708, 40.38),
        (711, 0.0),
        (709, 34.20),
        (715, 159.00),
        (716, 86.52),
        (717, 0.0),
    ];
    for ((id, got), (want_id, want)) in by_id.iter().zip(expect.iter()) {
        assert_eq!(id, want_id);
        assert!(close(*got, *want), "{id}: {got} != {want}");
    }
}
