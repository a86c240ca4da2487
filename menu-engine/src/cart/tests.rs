use super::*;

fn pizza() -> MenuItem {
    MenuItem::new("pz", "Margherita", 200.0)
        .with_sizes(vec![
            PricedOption::new("Small", 100.0),
            PricedOption::new("Large", 150.0),
        ])
        .with_addons(vec![
            PricedOption::new("Extra Cheese", 30.0),
            PricedOption::new("Olives", 20.0),
        ])
}

#[test]
fn test_same_variant_twice_merges() {
    let item = MenuItem::new("p1", "Paneer Roll", 100.0);
    let mut cart = Cart::new();

    assert_eq!(cart.add_item(&item, None, &[]).unwrap(), 0);
    assert_eq!(cart.add_item(&item, None, &[]).unwrap(), 0);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.lines()[0].item_total, 100.0);
    assert_eq!(cart.totals(), CartTotals { count: 2, total: 200.0 });
}

#[test]
fn test_different_sizes_are_distinct_lines() {
    let item = pizza();
    let mut cart = Cart::new();

    cart.add_item(&item, Some("Large"), &[]).unwrap();
    cart.add_item(&item, Some("Small"), &[]).unwrap();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.lines()[0].item_total, 150.0);
    assert_eq!(cart.lines()[1].item_total, 100.0);
    assert_eq!(cart.totals().total, 250.0);
}

#[test]
fn test_addon_set_ignores_order() {
    let item = pizza();
    let mut cart = Cart::new();

    cart.add_item(&item, Some("Small"), &["Olives", "Extra Cheese"]).unwrap();
    cart.add_item(&item, Some("Small"), &["Extra Cheese", "Olives"]).unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.lines()[0].item_total, 150.0); // 100 + 30 + 20
    // display order follows the first addition
    assert_eq!(cart.lines()[0].selected_addons[0].name, "Olives");
}

#[test]
fn test_duplicate_addon_counted_once() {
    let item = pizza();
    let mut cart = Cart::new();

    cart.add_item(&item, Some("Large"), &["Olives", "Olives"]).unwrap();

    assert_eq!(cart.lines()[0].selected_addons.len(), 1);
    assert_eq!(cart.lines()[0].item_total, 170.0);
}

#[test]
fn test_addon_subset_is_distinct_line() {
    let item = pizza();
    let mut cart = Cart::new();

    cart.add_item(&item, Some("Large"), &["Olives"]).unwrap();
    cart.add_item(&item, Some("Large"), &["Olives", "Extra Cheese"]).unwrap();

    assert_eq!(cart.len(), 2);
}

#[test]
fn test_missing_price_fails_fast() {
    let mut item = MenuItem::new("t1", "Thali", 0.0);
    item.base_price = None;
    let mut cart = Cart::new();

    let err = cart.add_item(&item, None, &[]).unwrap_err();
    assert_eq!(err, CartError::InvalidItem { item_id: "t1".to_string() });
    assert!(cart.is_empty());
}

#[test]
fn test_size_only_item_priced_from_size() {
    let mut item = pizza();
    item.base_price = None;
    let mut cart = Cart::new();

    cart.add_item(&item, Some("Large"), &[]).unwrap();
    assert_eq!(cart.lines()[0].item_total, 150.0);
    assert_eq!(cart.lines()[0].base_price, None);
}

#[test]
fn test_sized_item_requires_size() {
    let mut cart = Cart::new();
    let err = cart.add_item(&pizza(), None, &[]).unwrap_err();
    assert!(matches!(err, CartError::InvalidSelection { .. }));
}

#[test]
fn test_unknown_size_or_addon_rejected() {
    let mut cart = Cart::new();
    assert!(matches!(
        cart.add_item(&pizza(), Some("Medium"), &[]),
        Err(CartError::InvalidSelection { .. })
    ));
    assert!(matches!(
        cart.add_item(&pizza(), Some("Large"), &["Pineapple"]),
        Err(CartError::InvalidSelection { .. })
    ));
    assert!(cart.is_empty());
}

#[test]
fn test_update_quantity_to_zero_removes_line() {
    let item = MenuItem::new("p1", "Samosa", 20.0);
    let mut cart = Cart::new();
    cart.add_item(&item, None, &[]).unwrap();
    cart.add_item(&item, None, &[]).unwrap();
    cart.add_item(&item, None, &[]).unwrap();

    cart.update_quantity(0, -3).unwrap();
    assert!(cart.is_empty());
}

#[test]
fn test_update_quantity_below_zero_removes_line() {
    let item = MenuItem::new("p1", "Samosa", 20.0);
    let mut cart = Cart::new();
    cart.add_item(&item, None, &[]).unwrap();

    cart.update_quantity(0, -5).unwrap();
    assert!(cart.is_empty());
    assert!(cart.lines().iter().all(|l| l.quantity > 0));
}

#[test]
fn test_update_quantity_positive() {
    let item = MenuItem::new("p1", "Samosa", 20.0);
    let mut cart = Cart::new();
    cart.add_item(&item, None, &[]).unwrap();

    cart.update_quantity(0, 4).unwrap();
    assert_eq!(cart.lines()[0].quantity, 5);
    assert_eq!(cart.totals().total, 100.0);
}

#[test]
fn test_update_quantity_out_of_range_is_error() {
    let mut cart = Cart::new();
    assert_eq!(
        cart.update_quantity(0, 1),
        Err(CartError::LineNotFound { index: 0, len: 0 })
    );

    cart.add_item(&MenuItem::new("p1", "Samosa", 20.0), None, &[]).unwrap();
    assert_eq!(
        cart.update_quantity(3, -1),
        Err(CartError::LineNotFound { index: 3, len: 1 })
    );
    assert_eq!(cart.lines()[0].quantity, 1);
}

#[test]
fn test_zero_delta_rejected() {
    let mut cart = Cart::new();
    cart.add_item(&MenuItem::new("p1", "Samosa", 20.0), None, &[]).unwrap();
    assert_eq!(cart.update_quantity(0, 0), Err(CartError::InvalidDelta));
}

#[test]
fn test_quantity_limit() {
    let mut cart = Cart::new();
    cart.add_item(&MenuItem::new("p1", "Samosa", 20.0), None, &[]).unwrap();

    let err = cart.update_quantity(0, MAX_LINE_QUANTITY).unwrap_err();
    assert!(matches!(err, CartError::QuantityLimit { .. }));
    assert_eq!(cart.lines()[0].quantity, 1);

    // i32 overflow is still a limit error, never a wrap
    cart.update_quantity(0, MAX_LINE_QUANTITY - 1).unwrap();
    assert!(matches!(
        cart.update_quantity(0, i32::MAX),
        Err(CartError::QuantityLimit { .. })
    ));
}

#[test]
fn test_remove_one_unit_hits_first_matching_line() {
    let item = pizza();
    let mut cart = Cart::new();
    cart.add_item(&item, Some("Large"), &[]).unwrap();
    cart.add_item(&item, Some("Small"), &[]).unwrap();
    cart.add_item(&item, Some("Small"), &[]).unwrap();

    assert!(cart.remove_one_unit("pz"));
    // Large line (first) had quantity 1 and is gone
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].selected_size.as_ref().unwrap().name, "Small");
    assert_eq!(cart.get_quantity("pz"), 2);
}

#[test]
fn test_remove_one_unit_no_match_is_noop() {
    let mut cart = Cart::new();
    cart.add_item(&MenuItem::new("p1", "Samosa", 20.0), None, &[]).unwrap();
    let before = cart.clone();

    assert!(!cart.remove_one_unit("nope"));
    assert_eq!(cart, before);
}

#[test]
fn test_get_quantity_sums_all_variants() {
    let item = pizza();
    let mut cart = Cart::new();
    cart.add_item(&item, Some("Large"), &[]).unwrap();
    cart.add_item(&item, Some("Large"), &[]).unwrap();
    cart.add_item(&item, Some("Small"), &["Olives"]).unwrap();
    cart.add_item(&MenuItem::new("p1", "Samosa", 20.0), None, &[]).unwrap();

    assert_eq!(cart.get_quantity("pz"), 3);
    assert_eq!(cart.get_quantity("p1"), 1);
    assert_eq!(cart.get_quantity("zz"), 0);
}

#[test]
fn test_item_total_is_snapshotted() {
    let mut item = MenuItem::new("p1", "Filter Coffee", 40.0);
    let mut cart = Cart::new();
    cart.add_item(&item, None, &[]).unwrap();

    // catalog price changes after the line exists
    item.base_price = Some(55.0);
    cart.add_item(&item, None, &[]).unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.lines()[0].item_total, 40.0);
    assert_eq!(cart.totals().total, 80.0);
}

#[test]
fn test_totals_precision() {
    let item = MenuItem::new("p1", "Cookie", 0.1);
    let mut cart = Cart::new();
    cart.add_item(&item, None, &[]).unwrap();
    cart.update_quantity(0, 2).unwrap();
    cart.add_item(&MenuItem::new("p2", "Tea", 0.2), None, &[]).unwrap();

    assert_eq!(cart.totals(), CartTotals { count: 4, total: 0.5 });
}

#[test]
fn test_clear() {
    let mut cart = Cart::new();
    cart.add_item(&MenuItem::new("p1", "Samosa", 20.0), None, &[]).unwrap();
    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.totals(), CartTotals { count: 0, total: 0.0 });
}

#[test]
fn test_cart_serde_round_trip_keeps_snapshot_prices() {
    let mut cart = Cart::new();
    cart.add_item(&pizza(), Some("Large"), &["Extra Cheese"]).unwrap();

    let json = serde_json::to_string(&cart).unwrap();
    let restored: Cart = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, cart);
    assert_eq!(restored.lines()[0].item_total, 180.0);
}

#[test]
fn test_to_order_line() {
    let mut cart = Cart::new();
    cart.add_item(&pizza(), Some("Large"), &["Olives"]).unwrap();
    let line = cart.lines()[0].to_order_line();

    assert_eq!(line.item_id, "pz");
    assert_eq!(line.base_price, Some(200.0));
    assert_eq!(line.selected_size, Some(PricedOption::new("Large", 150.0)));
    assert_eq!(line.selected_addons, vec![PricedOption::new("Olives", 20.0)]);
    assert_eq!(line.item_total, 170.0);
}

fn stored_line(instance_id: &str, quantity: i32, item_total: f64) -> serde_json::Value {
    serde_json::json!({
        "instance_id": instance_id,
        "item_id": "p1",
        "name": "Paneer Roll",
        "base_price": 40.0,
        "quantity": quantity,
        "selected_addons": [],
        "item_total": item_total
    })
}

#[test]
fn test_restore_drops_out_of_range_lines() {
    let json = serde_json::json!({
        "lines": [
            stored_line("a", 0, 40.0),
            stored_line("b", -4, 40.0),
            stored_line("c", MAX_LINE_QUANTITY + 1, 40.0),
            stored_line("d", 1, -5.0),
        ]
    });
    let cart: Cart = serde_json::from_value(json).unwrap();

    assert!(cart.is_empty());
    assert_eq!(cart.totals(), CartTotals { count: 0, total: 0.0 });
}

#[test]
fn test_restore_rekeys_and_merges_lines() {
    let json = serde_json::json!({
        "lines": [stored_line("stale", 2, 40.0), stored_line("also-stale", 3, 40.0)]
    });
    let mut cart: Cart = serde_json::from_value(json).unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 5);
    assert_eq!(
        cart.lines()[0].instance_id,
        generate_instance_id("p1", None, std::iter::empty::<&str>())
    );

    cart.add_item(&MenuItem::new("p1", "Paneer Roll", 40.0), None, &[])
        .unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get_quantity("p1"), 6);
}

#[test]
fn test_restore_caps_merged_quantity() {
    let json = serde_json::json!({
        "lines": [stored_line("x", MAX_LINE_QUANTITY, 40.0), stored_line("y", 5, 40.0)]
    });
    let cart: Cart = serde_json::from_value(json).unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, MAX_LINE_QUANTITY);
}
