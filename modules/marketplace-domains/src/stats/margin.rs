/// `(price - cost) / cost`, defined only for a positive cost.
pub fn profit_margin(price: f64, cost: Option<f64>) -> Option<f64> {
    match cost {
        Some(cost) if cost > 0.0 => Some((price - cost) / cost),
        _ => None,
    }
}

/// Pair each item with its margin, excluding items without a positive cost
/// and, when `min_margin` is given, items below it.
pub fn filter_by_margin<T, F>(items: Vec<T>, min_margin: Option<f64>, price_cost: F) -> Vec<(T, f64)>
where
    F: Fn(&T) -> (f64, Option<f64>),
{
    items
        .into_iter()
        .filter_map(|item| {
            let (price, cost) = price_cost(&item);
            let margin = profit_margin(price, cost)?;
            match min_margin {
                Some(min) if margin < min => None,
                _ => Some((item, margin)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_is_relative_to_cost() {
        assert_eq!(profit_margin(150.0, Some(100.0)), Some(0.5));
        assert_eq!(profit_margin(80.0, Some(100.0)), Some(-0.2));
    }

    #[test]
    fn missing_or_non_positive_cost_has_no_margin() {
        assert_eq!(profit_margin(10.0, None), None);
        assert_eq!(profit_margin(10.0, Some(0.0)), None);
        assert_eq!(profit_margin(10.0, Some(-5.0)), None);
    }

    #[test]
    fn filter_excludes_costless_items_regardless_of_price() {
        let items = vec![
            ("a", 1_000_000.0, None),
            ("b", 20.0, Some(10.0)),
            ("c", 5.0, Some(0.0)),
            ("d", 12.0, Some(10.0)),
        ];
        let kept = filter_by_margin(items, None, |(_, p, c)| (*p, *c));
        let names: Vec<_> = kept.iter().map(|((n, _, _), _)| *n).collect();
        assert_eq!(names, vec!["b", "d"]);
    }

    #[test]
    fn filter_applies_min_margin() {
        let items = vec![("b", 20.0, Some(10.0)), ("d", 12.0, Some(10.0))];
        let kept = filter_by_margin(items, Some(0.5), |(_, p, c)| (*p, *c));
        assert_eq!(kept.len(), 1);
        assert_eq!((kept[0].0).0, "b");
        assert!((kept[0].1 - 1.0).abs() < 1e-9);
    }
}
