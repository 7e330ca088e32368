use crate::error::CtdesignErr;
use crate::prior_feed::types::{HistoricalEstimate, PriorQuery};
use crate::util::error::InvalidParameterError;
use crate::util::validate::{check_finite, check_positive, check_rate};

/// Dropout assumed when neither the caller nor a feed supplies one
pub const DEFAULT_DROPOUT_RATE: f64 = 0.1;

/// Source of effect and dropout estimates from comparable past trials.
///
/// Implementations may be backed by anything; the calculators only ever see
/// the resolved numbers.
pub trait HistoricalPriorFeed {
    fn effect_estimate(&self, query: &PriorQuery) -> Option<HistoricalEstimate>;

    /// Historical dropout rate in [0, 1)
    fn dropout_estimate(&self, query: &PriorQuery) -> Option<f64>;
}

/// Feed with no history; every lookup misses
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistoricalFeed;

impl HistoricalPriorFeed for NoHistoricalFeed {
    fn effect_estimate(&self, _query: &PriorQuery) -> Option<HistoricalEstimate> {
        None
    }

    fn dropout_estimate(&self, _query: &PriorQuery) -> Option<f64> {
        None
    }
}

/// Explicit effect first, then the feed's point estimate
pub fn resolve_effect<F: HistoricalPriorFeed + ?Sized>(
    explicit: Option<f64>,
    feed: &F,
    query: &PriorQuery,
) -> Result<f64, CtdesignErr> {
    let effect = match explicit {
        Some(effect) => effect,
        None => match feed.effect_estimate(query) {
            Some(estimate) => {
                tracing::debug!(?estimate, indication = %query.indication, "effect from historical feed");
                estimate.point_estimate()
            }
            None => return Err(InvalidParameterError::MissingInput { name: "effect" }.into()),
        },
    };
    check_finite("effect", effect)?;
    Ok(effect)
}

/// Explicit sigma first, then the spread of the feed's estimate
pub fn resolve_variability<F: HistoricalPriorFeed + ?Sized>(
    explicit: Option<f64>,
    feed: &F,
    query: &PriorQuery,
) -> Result<f64, CtdesignErr> {
    let sigma = match explicit {
        Some(sigma) => sigma,
        None => match feed.effect_estimate(query).and_then(|estimate| estimate.variability()) {
            Some(sigma) => {
                tracing::debug!(sigma, indication = %query.indication, "variability from historical feed");
                sigma
            }
            None => return Err(InvalidParameterError::MissingInput { name: "variability" }.into()),
        },
    };
    check_positive("variability", sigma)?;
    Ok(sigma)
}

/// Explicit dropout first, then the feed, then `fallback` (usually the
/// configured default, [`DEFAULT_DROPOUT_RATE`] out of the box)
pub fn resolve_dropout<F: HistoricalPriorFeed + ?Sized>(
    explicit: Option<f64>,
    feed: &F,
    query: &PriorQuery,
    fallback: f64,
) -> Result<f64, CtdesignErr> {
    let dropout = explicit
        .or_else(|| feed.dropout_estimate(query))
        .unwrap_or(fallback);
    check_rate("dropout rate", dropout)?;
    Ok(dropout)
}
