//! Bet sizing: the per-strategy stake rule and the safety clamp.

use crate::{config::Strategy, snapshot::RoundRecord};

/// Kelly stakes this fraction of the balance on a confident prediction.
pub const KELLY_STAKE_FRACTION: f64 = 0.05;
/// Confidence must exceed this for Kelly to size up.
pub const KELLY_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Everything a sizing rule may look at for one tick.
#[derive(Debug, Clone, Copy)]
pub struct SizingInputs<'a> {
    pub current_bet:   f64,
    pub base_bet:      f64,
    pub balance:       f64,
    /// Most recent round; `None` on the first tick after construction/reset.
    pub last_round:    Option<&'a RoundRecord>,
    pub predicted_win: bool,
    pub confidence:    f64,
}

/// Pre-clamp stake for this tick.
///
/// With no prior round the current stake is used as-is. `Flat` has no rule
/// of its own and carries the previous stake forward, even if an earlier
/// clamp or strategy moved it away from the base bet.
pub fn size_bet(strategy: Strategy, inputs: &SizingInputs<'_>) -> f64 {
    let Some(last) = inputs.last_round else {
        return inputs.current_bet;
    };

    match strategy {
        Strategy::Martingale => {
            if last.result.is_win() {
                inputs.base_bet
            } else {
                last.stake() * 2.0
            }
        }
        Strategy::Kelly => {
            if inputs.predicted_win && inputs.confidence > KELLY_CONFIDENCE_THRESHOLD {
                inputs.balance * KELLY_STAKE_FRACTION
            } else {
                inputs.base_bet
            }
        }
        Strategy::Flat => inputs.current_bet,
    }
}

/// Cap the stake at the balance, then replace a non-positive stake with the
/// base bet. The order matters: a balance at or below zero caps the stake to
/// a non-positive value, which the second step then corrects.
pub fn clamp_bet(bet: f64, balance: f64, base_bet: f64) -> f64 {
    let mut bet = bet;
    if bet > balance {
        bet = balance;
    }
    if bet <= 0.0 {
        bet = base_bet;
    }
    bet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RoundResult;

    fn round(result: RoundResult, stake: f64) -> RoundRecord {
        let profit = if result.is_win() { stake } else { -stake };
        RoundRecord {
            roll: if result.is_win() { 80.0 } else { 20.0 },
            result,
            profit,
            timestamp: 0,
            balance_after_round: 1000.0 + profit,
        }
    }

    fn inputs(last_round: Option<&RoundRecord>) -> SizingInputs<'_> {
        SizingInputs {
            current_bet: 3.0,
            base_bet: 1.0,
            balance: 1000.0,
            last_round,
            predicted_win: false,
            confidence: 0.0,
        }
    }

    #[test]
    fn first_tick_keeps_current_bet_for_every_strategy() {
        for strategy in Strategy::ALL {
            assert_eq!(size_bet(strategy, &inputs(None)), 3.0, "{strategy}");
        }
    }

    #[test]
    fn martingale_doubles_after_loss() {
        let last = round(RoundResult::Loss, 4.0);
        assert_eq!(size_bet(Strategy::Martingale, &inputs(Some(&last))), 8.0);
    }

    #[test]
    fn martingale_resets_after_win() {
        let last = round(RoundResult::Win, 4.0);
        assert_eq!(size_bet(Strategy::Martingale, &inputs(Some(&last))), 1.0);
    }

    #[test]
    fn kelly_stakes_five_percent_when_confident() {
        let last = round(RoundResult::Win, 1.0);
        let mut i = inputs(Some(&last));
        i.predicted_win = true;
        i.confidence = 0.85;
        assert!((size_bet(Strategy::Kelly, &i) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn kelly_needs_both_prediction_and_confidence() {
        let last = round(RoundResult::Win, 1.0);

        let mut low_confidence = inputs(Some(&last));
        low_confidence.predicted_win = true;
        low_confidence.confidence = 0.7; // threshold is strict
        assert_eq!(size_bet(Strategy::Kelly, &low_confidence), 1.0);

        let mut predicted_lower = inputs(Some(&last));
        predicted_lower.confidence = 0.95;
        assert_eq!(size_bet(Strategy::Kelly, &predicted_lower), 1.0);
    }

    #[test]
    fn flat_carries_previous_stake() {
        let last = round(RoundResult::Loss, 3.0);
        assert_eq!(size_bet(Strategy::Flat, &inputs(Some(&last))), 3.0);
    }

    #[test]
    fn clamp_caps_at_balance() {
        assert_eq!(clamp_bet(500.0, 120.0, 1.0), 120.0);
    }

    #[test]
    fn clamp_replaces_non_positive_with_base_bet() {
        assert_eq!(clamp_bet(0.0, 100.0, 1.0), 1.0);
        assert_eq!(clamp_bet(-5.0, 100.0, 2.0), 2.0);
    }

    #[test]
    fn clamp_with_negative_balance_falls_back_to_base_bet() {
        // Upper cap first drives the stake to -10, then the floor corrects it.
        assert_eq!(clamp_bet(4.0, -10.0, 1.0), 1.0);
    }

    #[test]
    fn clamp_with_non_positive_base_bet_is_not_corrected() {
        assert_eq!(clamp_bet(0.0, 100.0, -1.0), -1.0);
    }

    #[test]
    fn clamp_leaves_in_range_stake_alone() {
        assert_eq!(clamp_bet(7.5, 100.0, 1.0), 7.5);
    }
}
