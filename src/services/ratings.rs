//! Indicator ratings.
//!
//! Turns a row of TradingView scanner values into per-indicator votes and
//! the overall recommendation label, the same way TradingView's technicals
//! widget summarizes oscillators and moving averages.

use crate::types::{Recommendation, VoteCounts};
use std::collections::HashMap;

/// Scanner columns requested for every analysis (without interval suffix).
pub const COLUMNS: &[&str] = &[
    "Recommend.Other",
    "Recommend.All",
    "Recommend.MA",
    "RSI",
    "RSI[1]",
    "Stoch.K",
    "Stoch.D",
    "Stoch.K[1]",
    "Stoch.D[1]",
    "CCI20",
    "CCI20[1]",
    "ADX",
    "ADX+DI",
    "ADX-DI",
    "ADX+DI[1]",
    "ADX-DI[1]",
    "AO",
    "AO[1]",
    "AO[2]",
    "Mom",
    "Mom[1]",
    "MACD.macd",
    "MACD.signal",
    "Rec.Stoch.RSI",
    "Stoch.RSI.K",
    "Rec.WR",
    "W.R",
    "Rec.BBPower",
    "BBPower",
    "Rec.UO",
    "UO",
    "EMA10",
    "SMA10",
    "EMA20",
    "SMA20",
    "EMA30",
    "SMA30",
    "EMA50",
    "SMA50",
    "EMA100",
    "SMA100",
    "EMA200",
    "SMA200",
    "Rec.Ichimoku",
    "Ichimoku.BLine",
    "Rec.VWMA",
    "VWMA",
    "Rec.HullMA9",
    "HullMA9",
    "close",
    "open",
    "high",
    "low",
    "volume",
    "change",
];

/// Moving averages compared against the close.
const MOVING_AVERAGES: &[&str] = &[
    "EMA10", "SMA10", "EMA20", "SMA20", "EMA30", "SMA30", "EMA50", "SMA50", "EMA100", "SMA100",
    "EMA200", "SMA200",
];

/// A single indicator's opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Buy,
    Sell,
    Neutral,
}

/// Aggregated ratings for one scanner row.
#[derive(Debug, Clone, PartialEq)]
pub struct Ratings {
    pub recommendation: Option<Recommendation>,
    pub oscillators: VoteCounts,
    pub moving_averages: VoteCounts,
}

impl Ratings {
    /// Combined oscillator and moving-average votes.
    pub fn summary(&self) -> VoteCounts {
        self.oscillators + self.moving_averages
    }

    /// Recommendation label, `"ERROR"` when the rating was missing or out of range.
    pub fn recommendation_label(&self) -> &'static str {
        self.recommendation.map(|r| r.as_str()).unwrap_or("ERROR")
    }
}

/// Rate a scanner row keyed by column name.
pub fn rate(values: &HashMap<String, f64>) -> Ratings {
    let get = |key: &str| values.get(key).copied();

    let oscillators = tally([
        zip2(get("RSI"), get("RSI[1]")).map(|(v, prev)| rsi(v, prev)),
        zip4(get("Stoch.K"), get("Stoch.D"), get("Stoch.K[1]"), get("Stoch.D[1]"))
            .map(|(k, d, k1, d1)| stoch(k, d, k1, d1)),
        zip2(get("CCI20"), get("CCI20[1]")).map(|(v, prev)| cci(v, prev)),
        zip4(get("ADX+DI"), get("ADX-DI"), get("ADX+DI[1]"), get("ADX-DI[1]"))
            .and_then(|di| get("ADX").map(|adx| (adx, di)))
            .map(|(adx, (pdi, mdi, pdi1, mdi1))| adx_di(adx, pdi, mdi, pdi1, mdi1)),
        zip2(get("AO"), get("AO[1]")).map(|(ao0, ao1)| ao(ao0, ao1, get("AO[2]"))),
        zip2(get("Mom"), get("Mom[1]")).map(|(v, prev)| momentum(v, prev)),
        zip2(get("MACD.macd"), get("MACD.signal")).map(|(m, s)| macd(m, s)),
        get("Rec.Stoch.RSI").map(precomputed),
        get("Rec.WR").map(precomputed),
        get("Rec.BBPower").map(precomputed),
        get("Rec.UO").map(precomputed),
    ]);

    let close = get("close");
    let moving_averages = tally(
        MOVING_AVERAGES
            .iter()
            .map(|key| zip2(get(*key), close).map(|(ma, c)| moving_average(ma, c)))
            .chain([
                get("Rec.Ichimoku").map(precomputed),
                get("Rec.VWMA").map(precomputed),
                get("Rec.HullMA9").map(precomputed),
            ]),
    );

    Ratings {
        recommendation: get("Recommend.All").and_then(Recommendation::from_rating),
        oscillators,
        moving_averages,
    }
}

/// Count the votes that were cast, skipping indicators with missing inputs.
pub fn tally<I>(votes: I) -> VoteCounts
where
    I: IntoIterator<Item = Option<Vote>>,
{
    votes
        .into_iter()
        .flatten()
        .fold(VoteCounts::default(), |mut counts, vote| {
            match vote {
                Vote::Buy => counts.buy += 1,
                Vote::Sell => counts.sell += 1,
                Vote::Neutral => counts.neutral += 1,
            }
            counts
        })
}

/// Oversold and turning up is a buy, overbought and turning down a sell.
pub fn rsi(value: f64, previous: f64) -> Vote {
    if value < 30.0 && previous < value {
        Vote::Buy
    } else if value > 70.0 && previous > value {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// %K crossing %D inside the oversold or overbought band.
pub fn stoch(k: f64, d: f64, k1: f64, d1: f64) -> Vote {
    if k < 20.0 && d < 20.0 && k > d && k1 < d1 {
        Vote::Buy
    } else if k > 80.0 && d > 80.0 && k < d && k1 > d1 {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

pub fn cci(value: f64, previous: f64) -> Vote {
    if value < -100.0 && value > previous {
        Vote::Buy
    } else if value > 100.0 && value < previous {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// Directional indicator crossover while ADX shows a trend.
pub fn adx_di(adx: f64, pdi: f64, mdi: f64, pdi1: f64, mdi1: f64) -> Vote {
    if adx > 20.0 && pdi1 < mdi1 && pdi > mdi {
        Vote::Buy
    } else if adx > 20.0 && pdi1 > mdi1 && pdi < mdi {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// Awesome Oscillator zero-line cross or saucer.
pub fn ao(value: f64, previous: f64, before_previous: Option<f64>) -> Vote {
    let saucer_up = before_previous
        .map(|ao2| value > 0.0 && previous > 0.0 && value > previous && ao2 > previous)
        .unwrap_or(false);
    let saucer_down = before_previous
        .map(|ao2| value < 0.0 && previous < 0.0 && value < previous && ao2 < previous)
        .unwrap_or(false);

    if (value > 0.0 && previous < 0.0) || saucer_up {
        Vote::Buy
    } else if (value < 0.0 && previous > 0.0) || saucer_down {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

pub fn momentum(value: f64, previous: f64) -> Vote {
    if value > previous {
        Vote::Buy
    } else if value < previous {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

pub fn macd(macd: f64, signal: f64) -> Vote {
    if macd > signal {
        Vote::Buy
    } else if macd < signal {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// Moving average below the close is bullish.
pub fn moving_average(ma: f64, close: f64) -> Vote {
    if ma < close {
        Vote::Buy
    } else if ma > close {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// Scanner `Rec.*` columns already hold `1`, `-1` or `0`.
pub fn precomputed(value: f64) -> Vote {
    if value == 1.0 {
        Vote::Buy
    } else if value == -1.0 {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

fn zip2(a: Option<f64>, b: Option<f64>) -> Option<(f64, f64)> {
    Some((a?, b?))
}

fn zip4(
    a: Option<f64>,
    b: Option<f64>,
    c: Option<f64>,
    d: Option<f64>,
) -> Option<(f64, f64, f64, f64)> {
    Some((a?, b?, c?, d?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_recommendation_thresholds() {
        assert_eq!(Recommendation::from_rating(-1.0), Some(Recommendation::StrongSell));
        assert_eq!(Recommendation::from_rating(-0.5), Some(Recommendation::Sell));
        assert_eq!(Recommendation::from_rating(-0.1), Some(Recommendation::Neutral));
        assert_eq!(Recommendation::from_rating(0.1), Some(Recommendation::Neutral));
        assert_eq!(Recommendation::from_rating(0.3), Some(Recommendation::Buy));
        assert_eq!(Recommendation::from_rating(0.5), Some(Recommendation::Buy));
        assert_eq!(Recommendation::from_rating(0.51), Some(Recommendation::StrongBuy));
        assert_eq!(Recommendation::from_rating(1.0), Some(Recommendation::StrongBuy));
        assert_eq!(Recommendation::from_rating(1.5), None);
        assert_eq!(Recommendation::from_rating(f64::NAN), None);
    }

    #[test]
    fn test_rsi_votes() {
        assert_eq!(rsi(25.0, 20.0), Vote::Buy);
        assert_eq!(rsi(25.0, 28.0), Vote::Neutral);
        assert_eq!(rsi(75.0, 80.0), Vote::Sell);
        assert_eq!(rsi(50.0, 40.0), Vote::Neutral);
    }

    #[test]
    fn test_stoch_votes() {
        assert_eq!(stoch(15.0, 10.0, 8.0, 12.0), Vote::Buy);
        assert_eq!(stoch(85.0, 90.0, 92.0, 88.0), Vote::Sell);
        assert_eq!(stoch(50.0, 40.0, 30.0, 45.0), Vote::Neutral);
    }

    #[test]
    fn test_cci_votes() {
        assert_eq!(cci(-150.0, -180.0), Vote::Buy);
        assert_eq!(cci(-150.0, -120.0), Vote::Neutral);
        assert_eq!(cci(150.0, 180.0), Vote::Sell);
        assert_eq!(cci(150.0, 120.0), Vote::Neutral);
        assert_eq!(cci(20.0, -20.0), Vote::Neutral);
    }

    #[test]
    fn test_adx_di_votes() {
        assert_eq!(adx_di(25.0, 22.0, 18.0, 17.0, 19.0), Vote::Buy);
        assert_eq!(adx_di(25.0, 18.0, 22.0, 19.0, 17.0), Vote::Sell);
        // Crossover without a trend.
        assert_eq!(adx_di(15.0, 22.0, 18.0, 17.0, 19.0), Vote::Neutral);
        // Trend without a crossover.
        assert_eq!(adx_di(25.0, 22.0, 18.0, 21.0, 19.0), Vote::Neutral);
    }

    #[test]
    fn test_ao_votes() {
        assert_eq!(ao(1.0, -1.0, None), Vote::Buy);
        assert_eq!(ao(2.0, 1.0, Some(3.0)), Vote::Buy);
        assert_eq!(ao(-1.0, 1.0, None), Vote::Sell);
        assert_eq!(ao(2.0, 1.0, None), Vote::Neutral);
    }

    #[test]
    fn test_moving_average_votes() {
        assert_eq!(moving_average(90.0, 100.0), Vote::Buy);
        assert_eq!(moving_average(110.0, 100.0), Vote::Sell);
        assert_eq!(moving_average(100.0, 100.0), Vote::Neutral);
    }

    #[test]
    fn test_precomputed_votes() {
        assert_eq!(precomputed(1.0), Vote::Buy);
        assert_eq!(precomputed(-1.0), Vote::Sell);
        assert_eq!(precomputed(0.0), Vote::Neutral);
    }

    #[test]
    fn test_missing_inputs_cast_no_vote() {
        let ratings = rate(&row(&[("RSI", 25.0), ("close", 100.0)]));
        assert_eq!(ratings.oscillators.total(), 0);
        assert_eq!(ratings.moving_averages.total(), 0);
        assert_eq!(ratings.recommendation, None);
        assert_eq!(ratings.recommendation_label(), "ERROR");
    }

    #[test]
    fn test_rate_row() {
        let ratings = rate(&row(&[
            ("Recommend.All", 0.6),
            ("RSI", 25.0),
            ("RSI[1]", 20.0),
            ("MACD.macd", -2.0),
            ("MACD.signal", -1.0),
            ("Mom", 5.0),
            ("Mom[1]", 5.0),
            ("close", 100.0),
            ("EMA20", 95.0),
            ("SMA20", 97.0),
            ("SMA200", 120.0),
            ("Rec.VWMA", 1.0),
        ]));

        assert_eq!(ratings.recommendation, Some(Recommendation::StrongBuy));
        assert_eq!(ratings.oscillators, VoteCounts::new(1, 1, 1));
        assert_eq!(ratings.moving_averages, VoteCounts::new(3, 1, 0));
        assert_eq!(ratings.summary(), VoteCounts::new(4, 2, 1));
    }
}
