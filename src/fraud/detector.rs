//! Rule-based fraud risk evaluation.
//!
//! A candidate transaction is checked against a location blacklist, its own
//! amount and the account's prior transactions. A blacklisted location ends
//! the evaluation with a fixed score; every other rule adds its contribution.

use crate::config::FraudRulesConfig;
use crate::fraud::rules::{Assessment, FraudRule};
use crate::types::result::FraudResult;
use crate::types::transaction::Transaction;
use chrono::Duration;
use std::collections::HashSet;
use tracing::debug;

/// Evaluates transactions with a fixed rule configuration
#[derive(Debug, Clone, Default)]
pub struct FraudDetector {
    rules: FraudRulesConfig,
}

impl FraudDetector {
    /// Create a detector with custom rule settings
    pub fn new(rules: FraudRulesConfig) -> Self {
        Self { rules }
    }

    /// Rule settings in use
    pub fn rules(&self) -> &FraudRulesConfig {
        &self.rules
    }

    /// Score `tx` and return only the result
    pub fn evaluate(
        &self,
        tx: &Transaction,
        previous: &[Transaction],
        blacklist: &HashSet<String>,
    ) -> FraudResult {
        self.assess(tx, previous, blacklist).result
    }

    /// Score `tx` and report which rules fired.
    ///
    /// Entries of `previous` dated after `tx` are not prior transactions and
    /// are ignored by the history rules.
    pub fn assess(
        &self,
        tx: &Transaction,
        previous: &[Transaction],
        blacklist: &HashSet<String>,
    ) -> Assessment {
        if blacklist.contains(&tx.location) {
            debug!(location = %tx.location, "Location is blacklisted");
            return Assessment {
                result: FraudResult::blocked(self.rules.blacklist_score),
                triggered: vec![FraudRule::BlacklistedLocation],
            };
        }

        let mut result = FraudResult::default();
        let mut triggered = Vec::new();

        if tx.amount > self.rules.high_value_threshold {
            debug!(amount = %tx.amount, "High value transaction");
            result.is_fraudulent = true;
            result.verification_required = true;
            result.risk_score = result.risk_score.saturating_add(self.rules.high_value_score);
            triggered.push(FraudRule::HighValue);
        }

        let recent = self.recent_count(tx, previous);
        if recent > self.rules.frequency_limit {
            debug!(recent, limit = self.rules.frequency_limit, "Too many recent transactions");
            result.is_blocked = true;
            result.risk_score = result.risk_score.saturating_add(self.rules.frequency_score);
            triggered.push(FraudRule::HighFrequency);
        }

        if let Some(last) = last_prior(tx, previous) {
            let age = tx.timestamp - last.timestamp;
            if age < window(self.rules.location_window_minutes)
                && last.location != tx.location
            {
                debug!(
                    from = %last.location,
                    to = %tx.location,
                    age_secs = age.num_seconds(),
                    "Rapid location change"
                );
                result.is_fraudulent = true;
                result.verification_required = true;
                result.risk_score = result
                    .risk_score
                    .saturating_add(self.rules.location_change_score);
                triggered.push(FraudRule::LocationChange);
            }
        }

        Assessment { result, triggered }
    }

    /// Number of prior transactions inside the frequency window (window end inclusive)
    fn recent_count(&self, tx: &Transaction, previous: &[Transaction]) -> usize {
        let window = window(self.rules.frequency_window_minutes);
        previous
            .iter()
            .filter(|prev| prev.timestamp <= tx.timestamp)
            .filter(|prev| tx.timestamp - prev.timestamp <= window)
            .count()
    }
}

/// Window length in minutes, clamped to the representable range
fn window(minutes: i64) -> Duration {
    Duration::try_minutes(minutes).unwrap_or(if minutes < 0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

/// Most recent transaction not dated after `tx`
fn last_prior<'a>(tx: &Transaction, previous: &'a [Transaction]) -> Option<&'a Transaction> {
    previous
        .iter()
        .filter(|prev| prev.timestamp <= tx.timestamp)
        .max_by_key(|prev| prev.timestamp)
}

/// Evaluate with the default rule settings
pub fn evaluate(
    tx: &Transaction,
    previous: &[Transaction],
    blacklist: &HashSet<String>,
) -> FraudResult {
    FraudDetector::default().evaluate(tx, previous, blacklist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn tx(amount: Decimal, at: DateTime<Utc>, location: &str) -> Transaction {
        Transaction::new(amount, at, location).unwrap()
    }

    fn blacklist(locations: &[&str]) -> HashSet<String> {
        locations.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_normal_transaction() {
        let result = evaluate(&tx(dec!(500), now(), "BR"), &[], &blacklist(&["US"]));

        assert!(!result.is_fraudulent);
        assert!(!result.is_blocked);
        assert!(!result.verification_required);
        assert_eq!(result.risk_score, 0);
    }

    #[test]
    fn test_high_value_boundary_is_exclusive() {
        let result = evaluate(&tx(dec!(10000), now(), "BR"), &[], &HashSet::new());
        assert!(!result.is_fraudulent);
        assert_eq!(result.risk_score, 0);

        let result = evaluate(&tx(dec!(10000.01), now(), "BR"), &[], &HashSet::new());
        assert!(result.is_fraudulent);
    }

    #[test]
    fn test_high_value_transaction() {
        let result = evaluate(&tx(dec!(10001), now(), "BR"), &[], &HashSet::new());

        assert!(result.is_fraudulent);
        assert!(result.verification_required);
        assert!(!result.is_blocked);
        assert_eq!(result.risk_score, 50);
    }

    #[test]
    fn test_frequent_transactions_block() {
        let prev: Vec<_> = (0..11)
            .map(|i| tx(dec!(100), now() - Duration::minutes(i * 5), "BR"))
            .collect();

        let result = evaluate(&tx(dec!(100), now(), "BR"), &prev, &HashSet::new());

        assert!(result.is_blocked);
        assert!(!result.is_fraudulent);
        assert_eq!(result.risk_score, 30);
    }

    #[test]
    fn test_frequency_window_limit_case() {
        let mut prev: Vec<_> = (0..10)
            .map(|_| tx(dec!(100), now() - Duration::minutes(59), "BR"))
            .collect();
        prev.push(tx(
            dec!(100),
            now() - Duration::minutes(60) - Duration::seconds(1),
            "BR",
        ));

        let result = evaluate(&tx(dec!(100), now(), "BR"), &prev, &HashSet::new());

        assert!(!result.is_blocked);
        assert_eq!(result.risk_score, 0);
    }

    #[test]
    fn test_frequency_window_end_counts() {
        let mut prev: Vec<_> = (0..10)
            .map(|_| tx(dec!(100), now() - Duration::minutes(59), "BR"))
            .collect();
        prev.push(tx(dec!(100), now() - Duration::minutes(60), "BR"));

        let result = evaluate(&tx(dec!(100), now(), "BR"), &prev, &HashSet::new());

        assert!(result.is_blocked);
        assert_eq!(result.risk_score, 30);
    }

    #[test]
    fn test_location_change() {
        let last = [tx(dec!(100), now() - Duration::minutes(10), "US")];
        let result = evaluate(&tx(dec!(100), now(), "BR"), &last, &HashSet::new());

        assert!(result.is_fraudulent);
        assert!(result.verification_required);
        assert_eq!(result.risk_score, 20);
    }

    #[test]
    fn test_location_change_boundary_is_exclusive() {
        let at_window = [tx(dec!(100), now() - Duration::minutes(30), "US")];
        let result = evaluate(&tx(dec!(100), now(), "BR"), &at_window, &HashSet::new());
        assert!(!result.is_fraudulent);
        assert_eq!(result.risk_score, 0);

        let inside = [tx(
            dec!(100),
            now() - Duration::minutes(29) - Duration::seconds(59),
            "US",
        )];
        let result = evaluate(&tx(dec!(100), now(), "BR"), &inside, &HashSet::new());
        assert!(result.is_fraudulent);
        assert_eq!(result.risk_score, 20);
    }

    #[test]
    fn test_location_change_uses_most_recent_by_timestamp() {
        // Unordered history: the newest entry is in the same location
        let prev = [
            tx(dec!(100), now() - Duration::minutes(20), "US"),
            tx(dec!(100), now() - Duration::minutes(5), "BR"),
            tx(dec!(100), now() - Duration::minutes(25), "AR"),
        ];

        let result = evaluate(&tx(dec!(100), now(), "BR"), &prev, &HashSet::new());
        assert_eq!(result.risk_score, 0);
    }

    #[test]
    fn test_same_location_does_not_trigger() {
        let last = [tx(dec!(100), now() - Duration::minutes(1), "BR")];
        let result = evaluate(&tx(dec!(100), now(), "BR"), &last, &HashSet::new());
        assert_eq!(result, FraudResult::default());
    }

    #[test]
    fn test_later_dated_history_is_ignored() {
        let prev = [tx(dec!(100), now() + Duration::minutes(5), "US")];
        let result = evaluate(&tx(dec!(100), now(), "BR"), &prev, &HashSet::new());
        assert_eq!(result.risk_score, 0);
    }

    #[test]
    fn test_blacklisted_location_short_circuits() {
        let prev: Vec<_> = (0..12)
            .map(|i| tx(dec!(100), now() - Duration::minutes(i), "BR"))
            .collect();

        let assessment = FraudDetector::default().assess(
            &tx(dec!(50000), now(), "US"),
            &prev,
            &blacklist(&["US"]),
        );

        assert!(assessment.result.is_blocked);
        assert!(!assessment.result.is_fraudulent);
        assert!(!assessment.result.verification_required);
        assert_eq!(assessment.result.risk_score, 100);
        assert_eq!(assessment.triggered, vec![FraudRule::BlacklistedLocation]);
    }

    #[test]
    fn test_contributions_sum() {
        let last = [tx(dec!(100), now() - Duration::minutes(10), "US")];
        let assessment =
            FraudDetector::default().assess(&tx(dec!(10001), now(), "BR"), &last, &HashSet::new());

        assert_eq!(assessment.result.risk_score, 70);
        assert_eq!(
            assessment.triggered,
            vec![FraudRule::HighValue, FraudRule::LocationChange]
        );
    }

    #[test]
    fn test_all_additive_rules_fire() {
        let mut prev: Vec<_> = (0..11)
            .map(|i| tx(dec!(100), now() - Duration::minutes(10 + i), "BR"))
            .collect();
        prev.push(tx(dec!(100), now() - Duration::minutes(2), "AR"));

        let result = evaluate(&tx(dec!(20000), now(), "BR"), &prev, &HashSet::new());

        assert!(result.is_fraudulent);
        assert!(result.is_blocked);
        assert!(result.verification_required);
        assert_eq!(result.risk_score, 100);
    }

    #[test]
    fn test_custom_rules() {
        let detector = FraudDetector::new(FraudRulesConfig {
            high_value_threshold: dec!(1000),
            high_value_score: 40,
            ..FraudRulesConfig::default()
        });

        let result = detector.evaluate(&tx(dec!(1500), now(), "BR"), &[], &HashSet::new());
        assert_eq!(result.risk_score, 40);
        assert_eq!(detector.rules().high_value_threshold, dec!(1000));
    }

    #[test]
    fn test_large_scores_saturate() {
        let detector = FraudDetector::new(FraudRulesConfig {
            high_value_score: u32::MAX,
            ..FraudRulesConfig::default()
        });
        let last = [tx(dec!(100), now() - Duration::minutes(1), "US")];

        let result = detector.evaluate(&tx(dec!(20000), now(), "BR"), &last, &HashSet::new());
        assert!(result.is_fraudulent);
        assert_eq!(result.risk_score, u32::MAX);
    }

    #[test]
    fn test_unbounded_windows_do_not_panic() {
        let detector = FraudDetector::new(FraudRulesConfig {
            frequency_window_minutes: i64::MAX,
            frequency_limit: 0,
            location_window_minutes: i64::MAX,
            ..FraudRulesConfig::default()
        });
        let last = [tx(dec!(100), now() - Duration::days(400), "US")];

        let result = detector.evaluate(&tx(dec!(100), now(), "BR"), &last, &HashSet::new());
        assert!(result.is_blocked);
        assert!(result.is_fraudulent);
        assert_eq!(result.risk_score, 50);
    }
}
