/// Fixed-width OHLC aggregation of sampled spot prices
///
/// Input samples come from external storage and are not trusted: times may
/// be in seconds or milliseconds, and old buggy builds may have persisted
/// nonsense values. Everything is validated before bucketing.

use std::collections::BTreeMap;

use launch_types::{
    Candle, PricePoint, CANDLE_INTERVAL_SECS, CANDLE_MIN_RANGE, MILLIS_THRESHOLD,
    PRICE_UPPER_BOUND,
};

/// Normalize a sample time to epoch seconds. Values above the threshold
/// are milliseconds (a 15-second "candle" bug class upstream).
fn to_epoch_secs(time: i64) -> i64 {
    if time > MILLIS_THRESHOLD {
        time.div_euclid(1000)
    } else {
        time
    }
}

/// Aggregate an unordered list of price samples into 1-minute candles.
///
/// Non-finite values and values outside `(0, 1000)` are discarded, the
/// rest are sorted ascending by time and folded into OHLC buckets keyed by
/// `floor(time_sec / 60) * 60`. Flat candles get their high/low nudged
/// apart so every candle has a non-degenerate range.
pub fn aggregate(samples: &[PricePoint]) -> Vec<Candle> {
    let mut points: Vec<(i64, f64)> = samples
        .iter()
        .filter(|p| p.value.is_finite() && p.value > 0.0 && p.value < PRICE_UPPER_BOUND)
        .map(|p| (to_epoch_secs(p.time), p.value))
        .collect();
    points.sort_by_key(|&(time_sec, _)| time_sec);

    let mut buckets: BTreeMap<i64, Candle> = BTreeMap::new();
    for (time_sec, value) in points {
        let bucket_start = time_sec.div_euclid(CANDLE_INTERVAL_SECS) * CANDLE_INTERVAL_SECS;
        buckets
            .entry(bucket_start)
            .and_modify(|candle| {
                candle.high = candle.high.max(value);
                candle.low = candle.low.min(value);
                candle.close = value;
            })
            .or_insert(Candle {
                bucket_start,
                open: value,
                high: value,
                low: value,
                close: value,
            });
    }

    let mut candles: Vec<Candle> = buckets.into_values().collect();
    for candle in &mut candles {
        if candle.high == candle.low {
            let eps = CANDLE_MIN_RANGE.max(candle.close.abs() * 0.01);
            candle.high += eps;
            candle.low -= eps;
        }
    }
    candles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: i64, value: f64) -> PricePoint {
        PricePoint { time, value }
    }

    #[test]
    fn test_bucketing() {
        let candles = aggregate(&[point(0, 1.0), point(30, 2.0), point(59, 0.5), point(60, 3.0)]);
        assert_eq!(candles.len(), 2);

        let first = &candles[0];
        assert_eq!(first.bucket_start, 0);
        assert_eq!(first.open, 1.0);
        assert_eq!(first.high, 2.0);
        assert_eq!(first.low, 0.5);
        assert_eq!(first.close, 0.5);

        let second = &candles[1];
        assert_eq!(second.bucket_start, 60);
        assert_eq!(second.open, 3.0);
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        let candles = aggregate(&[point(59, 0.5), point(0, 1.0), point(30, 2.0)]);
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].open, 1.0);
        assert_eq!(candles[0].close, 0.5);
    }

    #[test]
    fn test_millisecond_times_are_detected() {
        // Same instant expressed in seconds and milliseconds must land in
        // the same bucket.
        let secs = 1_700_000_000i64;
        let candles = aggregate(&[point(secs, 1.0), point(secs * 1000 + 500, 2.0)]);
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].bucket_start, secs / 60 * 60);
        assert_eq!(candles[0].close, 2.0);
    }

    #[test]
    fn test_invalid_samples_discarded() {
        let candles = aggregate(&[
            point(0, f64::NAN),
            point(1, f64::INFINITY),
            point(2, 0.0),
            point(3, -1.0),
            point(4, 1000.0),
            point(5, 2500.0),
            point(6, 1.5),
        ]);
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].open, 1.5);
        assert_eq!(candles[0].high, candles[0].open + 0.015);
    }

    #[test]
    fn test_flat_candle_gets_widened() {
        let candles = aggregate(&[point(0, 2.0), point(30, 2.0)]);
        assert_eq!(candles.len(), 1);
        let candle = &candles[0];
        assert!(candle.high > candle.low);
        assert_eq!(candle.high, 2.0 + 0.02);
        assert_eq!(candle.low, 2.0 - 0.02);
        assert_eq!(candle.close, 2.0);
    }

    #[test]
    fn test_tiny_flat_candle_uses_min_range() {
        let candles = aggregate(&[point(0, 1e-9)]);
        let candle = &candles[0];
        assert!(candle.high - candle.low >= 2.0 * CANDLE_MIN_RANGE);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }
}
