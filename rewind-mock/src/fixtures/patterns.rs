use rewind_core::Candle;
use rust_decimal::Decimal;

/// One bullish gap confirmed at index 2 and cleared at index 4, then one bearish gap
/// confirmed at index 7 that stays valid.
#[must_use]
pub fn bullish_then_bearish() -> Vec<Candle> {
    build(&[
        ("100", "101", "99", "100", 1_000),
        ("100", "106", "100", "105", 4_000),
        ("105", "107", "103", "106", 2_500),
        ("106", "107", "102", "103", 1_800),
        ("103", "103", "99", "100", 2_200),
        ("100", "102", "98", "99", 1_500),
        ("99", "99", "92", "93", 5_000),
        ("93", "95", "91", "94", 2_000),
        ("94", "95", "92", "93", 1_200),
        ("93", "94", "92", "93", 1_100),
    ])
}

/// Bars from `(open, high, low, close, volume)` rows, one minute apart from epoch 0.
#[must_use]
pub fn build(rows: &[(&str, &str, &str, &str, u64)]) -> Vec<Candle> {
    rows.iter()
        .enumerate()
        .map(|(i, &(o, h, l, c, v))| {
            Candle::new(i as i64 * 60, price(o), price(h), price(l), price(c), v)
        })
        .collect()
}

fn price(s: &str) -> Decimal {
    s.parse().expect("fixture price")
}
