use bistro_core::costs::aggregate;
use bistro_core::*;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn recipe(costs: &[i64]) -> Vec<Ingredient> {
    costs
        .iter()
        .enumerate()
        .map(|(index, cents)| Ingredient::new(format!("i-{index}"), "item", Money::from_cents(*cents), "un"))
        .collect()
}

fn product_strategy() -> impl Strategy<Value = (i64, Vec<i64>)> {
    (0i64..200_000, prop::collection::vec(0i64..50_000, 0..12))
}

fn fixed_costs(entries: &[(u8, i64, bool)]) -> Vec<GlobalFixedCost> {
    let categories = ["rent", "employees", "utilities", "marketing"];
    entries
        .iter()
        .enumerate()
        .map(|(index, (category, cents, active))| {
            let mut cost = GlobalFixedCost::new(
                format!("c-{index}"),
                categories[usize::from(*category) % categories.len()],
                "cost",
                Money::from_cents(*cents),
            );
            cost.is_active = *active;
            cost
        })
        .collect()
}

fn snapshot(products: &[(i64, Vec<i64>)], costs: &[(u8, i64, bool)]) -> FinancialSnapshot {
    FinancialSnapshot {
        brands: vec![
            Brand::new("b-1", "Smash Co", BrandType::Popular),
            Brand::new("b-2", "Gourmet", BrandType::Premium),
        ],
        products: products
            .iter()
            .enumerate()
            .map(|(index, (price, ingredients))| {
                Product::new(
                    format!("p-{index}"),
                    format!("Burger {index}"),
                    if index % 2 == 0 { "b-1" } else { "b-2" },
                    Money::from_cents(*price),
                    recipe(ingredients),
                )
            })
            .collect(),
        fixed_costs: fixed_costs(costs),
        cost_categories: vec![],
        latest_metrics: None,
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// A free product never yields NaN or infinity: margin is 0 and the
    /// loss is the whole CMV.
    #[test]
    fn zero_price_margin_is_zero(costs in prop::collection::vec(0i64..50_000, 0..12)) {
        let product = Product::new("p-1", "Free", "b-1", Money::zero(), recipe(&costs));
        let economics = compute_economics(&product);

        prop_assert_eq!(economics.margin_pct, 0.0);
        prop_assert_eq!(economics.profit, -product.live_cmv());
    }

    /// Live CMV is the ingredient sum, also after recipe edits.
    #[test]
    fn live_cmv_is_ingredient_sum(
        costs in prop::collection::vec(0i64..50_000, 0..12),
        extra in 0i64..50_000,
    ) {
        let mut product = Product::new("p-1", "Classic", "b-1", Money::from_cents(2000), recipe(&costs));
        let expected: i64 = costs.iter().sum();
        prop_assert_eq!(product.live_cmv().cents(), expected);
        prop_assert!(!product.is_cmv_stale());

        product.add_ingredient(Ingredient::new("extra", "Sauce", Money::from_cents(extra), "ml"));
        prop_assert_eq!(product.live_cmv().cents(), expected + extra);

        if !costs.is_empty() {
            let removed = product.remove_ingredient("i-0").unwrap();
            prop_assert_eq!(product.live_cmv().cents(), expected + extra - removed.cost_cents);
        }
        prop_assert_eq!(product.cmv_cents, product.live_cmv().cents());
    }

    /// Category shares add up to 100% whenever there is an active total.
    #[test]
    fn cost_percentages_sum_to_hundred(
        entries in prop::collection::vec((0u8..4, 0i64..1_000_000, any::<bool>()), 0..20),
    ) {
        let breakdown = aggregate(&fixed_costs(&entries));
        let sum: f64 = breakdown.by_category.iter().map(|slice| slice.percentage).sum();

        if breakdown.total.is_positive() {
            prop_assert!((sum - 100.0).abs() < 1e-6, "sum was {}", sum);
        } else {
            prop_assert_eq!(sum, 0.0);
        }
    }

    /// The daily target always covers the monthly one.
    #[test]
    fn daily_units_cover_monthly_units(
        products in prop::collection::vec(product_strategy(), 0..6),
        entries in prop::collection::vec((0u8..4, 0i64..1_000_000, any::<bool>()), 0..8),
        days in 1u32..=31,
    ) {
        let snapshot = snapshot(&products, &entries);
        let settings = EngineSettings { days_per_month: days, ..Default::default() };
        let breakeven = Dashboard::new(&snapshot, &settings).breakeven();

        prop_assert!(breakeven.daily_units * u64::from(days) >= breakeven.monthly_units);
        if !breakeven.reachable {
            prop_assert_eq!(breakeven.monthly_units, 0);
            prop_assert_eq!(breakeven.status, StatusBand::Critical);
        }
    }

    /// Same snapshot, same settings, same plan: same report.
    #[test]
    fn report_is_idempotent(
        products in prop::collection::vec(product_strategy(), 0..6),
        entries in prop::collection::vec((0u8..4, 0i64..1_000_000, any::<bool>()), 0..8),
        daily_sales in 10u32..=200,
        multiplier in 0.7f64..=1.5,
    ) {
        let snapshot = snapshot(&products, &entries);
        let settings = EngineSettings::default();
        let dashboard = Dashboard::new(&snapshot, &settings);
        let params = ScenarioParams::new(daily_sales, multiplier).unwrap();
        let plan = ScenarioPlan::uniform(&snapshot.products, params);

        prop_assert_eq!(dashboard.report(&plan), dashboard.report(&plan));
    }
}
