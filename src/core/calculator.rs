use crate::domain::model::{MarketPrices, Modifier, ProfitRecord, SeedDefinition};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Modifiers keyed by item name, built once per computation.
///
/// The first modifier listed for an item wins; later entries for the same
/// item are kept aside so callers can report them.
#[derive(Debug, Clone, Default)]
pub struct ModifierTable {
    by_item: HashMap<String, Modifier>,
    duplicates: Vec<String>,
}

impl ModifierTable {
    pub fn new(modifiers: &[Modifier]) -> Self {
        let mut table = Self::default();
        for modifier in modifiers {
            if table.by_item.contains_key(&modifier.item) {
                table.duplicates.push(modifier.item.clone());
            } else {
                table.by_item.insert(modifier.item.clone(), modifier.clone());
            }
        }
        table
    }

    pub fn get(&self, item: &str) -> Option<&Modifier> {
        self.by_item.get(item)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.by_item.keys().map(String::as_str)
    }

    /// Items that had more than one modifier; only the first one is applied.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ProfitCalculator {
    rate: f64,
    modifiers: ModifierTable,
}

impl ProfitCalculator {
    /// `coin_rate` is the currency received per 1000 coins.
    pub fn new(coin_rate: f64, modifiers: &[Modifier]) -> Self {
        Self {
            rate: coin_rate / 1000.0,
            modifiers: ModifierTable::new(modifiers),
        }
    }

    pub fn modifiers(&self) -> &ModifierTable {
        &self.modifiers
    }

    /// Profit records for every priced seed, best profit per minute first.
    pub fn calculate(
        &self,
        seeds: &[SeedDefinition],
        prices: &MarketPrices,
        multiplier: f64,
    ) -> Vec<ProfitRecord> {
        let mut results: Vec<ProfitRecord> = seeds
            .iter()
            .filter_map(|seed| {
                let sell_price = prices.get(&seed.name)?;
                Some(self.evaluate(seed, sell_price, multiplier))
            })
            .collect();

        results.sort_by(by_profit_per_minute_desc);
        results
    }

    fn evaluate(&self, seed: &SeedDefinition, sell_price: f64, multiplier: f64) -> ProfitRecord {
        let modifier = self.modifiers.get(&seed.name);

        let price = modifier
            .and_then(Modifier::seed_override)
            .unwrap_or(seed.price);
        let amount = modifier
            .and_then(Modifier::yield_override)
            .unwrap_or_else(|| seed.effective_base_yield());
        let seconds = modifier
            .and_then(Modifier::time_override)
            .unwrap_or(seed.seconds);

        let seed_cost = price * self.rate;
        let total_sell = sell_price * amount * multiplier;
        let profit = total_sell - seed_cost;
        // zero grow time gives +/-inf (or NaN for zero profit); both are kept
        let profit_per_minute = profit / (seconds / 60.0);

        ProfitRecord {
            name: seed.name.clone(),
            seed_cost,
            sell_price,
            profit,
            profit_per_minute,
            seconds: seconds.round(),
            tolerance_seconds: None,
        }
    }
}

/// Descending by profit per minute; NaN sorts after every number.
fn by_profit_per_minute_desc(a: &ProfitRecord, b: &ProfitRecord) -> Ordering {
    let (x, y) = (a.profit_per_minute, b.profit_per_minute);
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
    }
}

pub fn calculate_profit(
    seeds: &[SeedDefinition],
    prices: &MarketPrices,
    coin_rate: f64,
    multiplier: f64,
    modifiers: &[Modifier],
) -> Vec<ProfitRecord> {
    ProfitCalculator::new(coin_rate, modifiers).calculate(seeds, prices, multiplier)
}

/// Extra seconds `current` could take per cycle and still earn at least as
/// much per second as `next`.
///
/// Works on the rounded `seconds` stored in the records.
pub fn tolerance_time(current: &ProfitRecord, next: &ProfitRecord) -> f64 {
    let diff_profit = current.profit - next.profit * (current.seconds / next.seconds);
    let next_profit_per_second = next.profit / next.seconds;
    diff_profit / next_profit_per_second
}

/// Fills `tolerance_seconds` for an already ranked list. The last entry gets 0.
pub fn apply_tolerance(records: &mut [ProfitRecord]) {
    for i in 0..records.len() {
        let tolerance = match records.get(i + 1) {
            Some(next) => tolerance_time(&records[i], next),
            None => 0.0,
        };
        records[i].tolerance_seconds = Some(tolerance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(name: &str, price: f64, base_yield: Option<f64>, seconds: f64) -> SeedDefinition {
        SeedDefinition {
            name: name.to_string(),
            price,
            base_yield,
            seconds,
        }
    }

    fn record(name: &str, profit: f64, seconds: f64) -> ProfitRecord {
        ProfitRecord {
            name: name.to_string(),
            seed_cost: 0.0,
            sell_price: 0.0,
            profit,
            profit_per_minute: profit / (seconds / 60.0),
            seconds,
            tolerance_seconds: None,
        }
    }

    #[test]
    fn test_carrot_break_even() {
        let seeds = vec![seed("Carrot", 100.0, Some(2.0), 60.0)];
        let prices: MarketPrices = vec![("Carrot", 50.0)].into_iter().collect();

        let result = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[]);

        assert_eq!(result.len(), 1);
        let carrot = &result[0];
        assert_eq!(carrot.seed_cost, 100.0);
        assert_eq!(carrot.sell_price, 50.0);
        assert_eq!(carrot.profit, 0.0);
        assert_eq!(carrot.profit_per_minute, 0.0);
        assert_eq!(carrot.seconds, 60.0);
    }

    #[test]
    fn test_unpriced_seeds_are_excluded() {
        let seeds = vec![
            seed("Sunflower", 0.01, None, 60.0),
            seed("Potato", 0.1, None, 300.0),
            seed("Pumpkin", 0.2, None, 1800.0),
        ];
        let prices: MarketPrices = vec![("Sunflower", 0.02), ("Pumpkin", 0.0)]
            .into_iter()
            .collect();

        let result = calculate_profit(&seeds, &prices, 500.0, 1.0, &[]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Sunflower");
    }

    #[test]
    fn test_sorted_by_profit_per_minute_desc() {
        let seeds = vec![
            seed("Sunflower", 0.01, None, 60.0),
            seed("Potato", 0.1, None, 300.0),
            seed("Pumpkin", 0.2, None, 1800.0),
            seed("Carrot", 0.5, None, 3600.0),
        ];
        let prices: MarketPrices = vec![
            ("Sunflower", 0.00002),
            ("Potato", 0.0014),
            ("Pumpkin", 0.004),
            ("Carrot", 0.01),
        ]
        .into_iter()
        .collect();

        let result = calculate_profit(&seeds, &prices, 0.5, 3.0, &[]);

        assert_eq!(result.len(), 4);
        for pair in result.windows(2) {
            assert!(pair[0].profit_per_minute >= pair[1].profit_per_minute);
        }
    }

    #[test]
    fn test_base_yield_defaults_to_one() {
        let seeds = vec![seed("Wheat", 0.0, None, 60.0)];
        let prices: MarketPrices = vec![("Wheat", 2.0)].into_iter().collect();

        let result = calculate_profit(&seeds, &prices, 1000.0, 3.0, &[]);
        assert_eq!(result[0].profit, 6.0);
        assert_eq!(result[0].profit_per_minute, 6.0);
    }

    #[test]
    fn test_modifier_overrides_each_field_independently() {
        let seeds = vec![seed("Carrot", 100.0, Some(2.0), 60.0)];
        let prices: MarketPrices = vec![("Carrot", 50.0)].into_iter().collect();

        let mut only_seed = Modifier::new("Carrot");
        only_seed.seed = 40.0;
        let result = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[only_seed]);
        assert_eq!(result[0].seed_cost, 40.0);
        assert_eq!(result[0].profit, 60.0);
        assert_eq!(result[0].seconds, 60.0);

        let mut only_yield = Modifier::new("Carrot");
        only_yield.yield_amount = 3.0;
        let result = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[only_yield]);
        assert_eq!(result[0].seed_cost, 100.0);
        assert_eq!(result[0].profit, 50.0);

        let mut only_time = Modifier::new("Carrot");
        only_time.time = 120.0;
        only_time.seed = 90.0;
        let result = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[only_time]);
        assert_eq!(result[0].seconds, 120.0);
        assert_eq!(result[0].profit, 10.0);
        assert_eq!(result[0].profit_per_minute, 5.0);
    }

    #[test]
    fn test_non_positive_modifier_fields_keep_base_values() {
        let seeds = vec![seed("Carrot", 100.0, Some(2.0), 60.0)];
        let prices: MarketPrices = vec![("Carrot", 50.0)].into_iter().collect();

        let modifier = Modifier {
            item: "Carrot".to_string(),
            seed: 0.0,
            yield_amount: -1.0,
            time: f64::NAN,
        };
        let with = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[modifier]);
        let without = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[]);
        assert_eq!(with, without);
    }

    #[test]
    fn test_unknown_modifier_has_no_effect() {
        let seeds = vec![seed("Carrot", 100.0, Some(2.0), 60.0)];
        let prices: MarketPrices = vec![("Carrot", 50.0)].into_iter().collect();

        let mut modifier = Modifier::new("Dragonfruit");
        modifier.seed = 1.0;
        let with = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[modifier]);
        let without = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[]);
        assert_eq!(with, without);
    }

    #[test]
    fn test_first_duplicate_modifier_wins() {
        let mut first = Modifier::new("Carrot");
        first.seed = 10.0;
        let mut second = Modifier::new("Carrot");
        second.seed = 20.0;

        let table = ModifierTable::new(&[first, second]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Carrot").map(|m| m.seed), Some(10.0));
        assert_eq!(table.duplicates(), ["Carrot".to_string()]);
    }

    #[test]
    fn test_negative_profit_is_kept() {
        let seeds = vec![seed("Kale", 1000.0, None, 60.0)];
        let prices: MarketPrices = vec![("Kale", 0.1)].into_iter().collect();

        let result = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[]);
        assert_eq!(result.len(), 1);
        assert!(result[0].profit < 0.0);
        assert!(result[0].profit_per_minute < 0.0);
    }

    #[test]
    fn test_zero_grow_time_is_degenerate_not_fatal() {
        let seeds = vec![
            seed("Instant", 0.0, None, 0.0),
            seed("Free", 1.0, None, 0.0),
            seed("Normal", 0.0, None, 60.0),
        ];
        let prices: MarketPrices = vec![("Instant", 1.0), ("Free", 1.0), ("Normal", 1.0)]
            .into_iter()
            .collect();

        let result = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[]);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].name, "Instant");
        assert!(result[0].profit_per_minute.is_infinite());
        assert_eq!(result[1].name, "Normal");
        // 0 profit over 0 seconds
        assert_eq!(result[2].name, "Free");
        assert!(result[2].profit_per_minute.is_nan());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let seeds = vec![
            seed("A", 0.0, None, 60.0),
            seed("B", 0.0, None, 60.0),
            seed("C", 0.0, None, 60.0),
        ];
        let prices: MarketPrices = vec![("A", 1.0), ("B", 1.0), ("C", 1.0)]
            .into_iter()
            .collect();

        let names: Vec<String> = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[])
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_grow_time_is_rounded() {
        let seeds = vec![seed("Beetroot", 0.0, None, 59.6)];
        let prices: MarketPrices = vec![("Beetroot", 1.0)].into_iter().collect();

        let result = calculate_profit(&seeds, &prices, 1000.0, 1.0, &[]);
        assert_eq!(result[0].seconds, 60.0);
        assert!((result[0].profit_per_minute - 1.0 / (59.6 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance_time() {
        let a = record("A", 10.0, 60.0);
        let b = record("B", 4.0, 30.0);
        assert!((tolerance_time(&a, &b) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_tolerance_last_is_zero() {
        let mut records = vec![
            record("A", 10.0, 60.0),
            record("B", 4.0, 30.0),
            record("C", 1.0, 60.0),
        ];
        apply_tolerance(&mut records);

        assert!(records.iter().all(|r| r.tolerance_seconds.is_some()));
        assert!((records[0].tolerance_seconds.unwrap() - 15.0).abs() < 1e-9);
        // 4 - 1 * (30 / 60) = 3.5 profit over 1/60 per second
        assert!((records[1].tolerance_seconds.unwrap() - 210.0).abs() < 1e-9);
        assert_eq!(records[2].tolerance_seconds, Some(0.0));
    }

    #[test]
    fn test_apply_tolerance_single_and_empty() {
        let mut single = vec![record("Only", 5.0, 60.0)];
        apply_tolerance(&mut single);
        assert_eq!(single[0].tolerance_seconds, Some(0.0));

        let mut empty: Vec<ProfitRecord> = Vec::new();
        apply_tolerance(&mut empty);
        assert!(empty.is_empty());
    }
}
