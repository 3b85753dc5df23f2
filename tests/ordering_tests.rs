
use sequery::{from, Direction, OrderKeySpec};
use test_data_gen::products;

#[test]
fn test_order_by_name() {
    let items = products();
    let names = from(&items)
        .order_by(|p| p.name.clone())
        .select(|p| p.name.as_str())
        .to_vec();

    let mut expected: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
    expected.sort();
    assert_eq!(names, expected);
    assert_eq!(names[0], "AWC Logo Cap");
}

#[test]
fn test_order_by_descending() {
    let prices = from(products())
        .order_by_descending(|p| (p.list_price * 100.0) as i64)
        .select(|p| p.product_id)
        .take(2)
        .to_vec();
    // 680 and 706 share the top price; input order is kept.
    assert_eq!(prices, vec![680, 706]);
}

#[test]
fn test_order_is_stable_for_equal_keys() {
    let tagged = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'e')];
    let sorted = from(tagged.clone()).order_by(|t| t.0).to_vec();
    assert_eq!(sorted, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'e')]);

    let desc = from(tagged).order_by_descending(|t| t.0).to_vec();
    assert_eq!(desc, vec![(2, 'a'), (2, 'c'), (2, 'e'), (1, 'b'), (1, 'd')]);
}

#[test]
fn test_then_by_breaks_ties() {
    let items = products();
    let rows = from(&items)
        .order_by(|p| p.color.clone())
        .then_by(|p| p.name.clone())
        .select(|p| (p.color.as_str(), p.product_id))
        .to_vec();

    let reds: Vec<i32> = rows
        .iter()
        .filter(|(c, _)| *c == "Red")
        .map(|(_, id)| *id)
        .collect();
    // "HL Road Frame - Red, 58" < "Sport-100 Helmet, Red"
    assert_eq!(reds, vec![706, 707]);

    let colors: Vec<&str> = rows.iter().map(|(c, _)| *c).collect();
    let mut sorted = colors.clone();
    sorted.sort();
    assert_eq!(colors, sorted);
}

#[test]
fn test_then_by_descending() {
    let items = products();
    let ids = from(&items)
        .order_by(|p| p.color.clone())
        .then_by_descending(|p| p.product_id)
        .filter(|p| p.color == "Black" || p.color == "Silver")
        .select(|p| p.product_id)
        .to_vec();
    assert_eq!(ids, vec![708, 680, 717, 715]);
}

#[test]
fn test_mixed_direction_keys() {
    let rows = vec![("x", 1), ("y", 2), ("x", 3), ("y", 1)];
    let sorted = from(rows)
        .order_by_descending(|r| r.0)
        .then_by(|r| r.1)
        .to_vec();
    assert_eq!(sorted, vec![("y", 1), ("y", 2), ("x", 1), ("x", 3)]);
}

#[test]
fn test_prebuilt_key_spec() {
    let spec = OrderKeySpec::by(|n: &i32| n % 3, Direction::Ascending)
        .then(|n: &i32| *n, Direction::Descending);
    assert_eq!(
        spec.directions().collect::<Vec<_>>(),
        vec![Direction::Ascending, Direction::Descending]
    );

    let sorted = from(vec![1, 2, 3, 4, 5, 6]).ordered(spec).to_vec();
    assert_eq!(sorted, vec![6, 3, 4, 1, 5, 2]);
}

#[test]
fn test_order_then_take_lowest_costs() {
    let cheapest = from(products())
        .order_by(|p| (p.standard_cost * 100.0) as i64)
        .take(3)
        .select(|p| p.product_id)
        .to_vec();
    assert_eq!(cheapest, vec![717, 709, 712]);
}

#[test]
fn test_order_by_empty_and_single() {
    let empty: Vec<i32> = Vec::new();
    assert!(from(empty).order_by(|n| *n).to_vec().is_empty());
    assert_eq!(from(vec![9]).order_by_descending(|n| *n).to_vec(), vec![9]);
}
