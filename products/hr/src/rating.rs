//! Criterion ratings and the arithmetic derived from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// A single criterion score, 1 through 5 inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> HrResult<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(HrError::RatingOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = HrError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Ratings keyed by criterion name. Unset criteria are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaRatings(BTreeMap<String, Rating>);

impl CriteriaRatings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, criterion: &str) -> Option<Rating> {
        self.0.get(criterion).copied()
    }

    /// Sets a rating, returning the previous one.
    pub fn set(&mut self, criterion: impl Into<String>, rating: Rating) -> Option<Rating> {
        self.0.insert(criterion.into(), rating)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rating)> {
        self.0.iter().map(|(name, rating)| (name.as_str(), *rating))
    }

    /// Rounded mean of the present ratings, see [`average`].
    pub fn average(&self) -> f64 {
        average(self)
    }
}

impl<K: Into<String>> FromIterator<(K, Rating)> for CriteriaRatings {
    fn from_iter<I: IntoIterator<Item = (K, Rating)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Arithmetic mean of the present ratings rounded to one decimal place
/// (`round(mean * 10) / 10`). An empty mapping averages to 0.
pub fn average(ratings: &CriteriaRatings) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.iter().map(|(_, r)| u32::from(r.get())).sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    round_tenth(mean)
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// True when every criterion has a rating above zero. An empty criterion
/// list is vacuously complete.
pub fn is_complete(criteria: &[&str], ratings: &CriteriaRatings) -> bool {
    criteria
        .iter()
        .all(|criterion| ratings.get(criterion).is_some_and(|r| r.get() > 0))
}

/// Criteria still lacking a rating, in criterion-list order.
pub fn missing_criteria(criteria: &[&str], ratings: &CriteriaRatings) -> Vec<String> {
    criteria
        .iter()
        .filter(|criterion| !ratings.get(criterion).is_some_and(|r| r.get() > 0))
        .map(|criterion| criterion.to_string())
        .collect()
}

/// Filled stars shown for a score badge.
pub fn filled_stars(score: f64) -> u8 {
    score.round().clamp(0.0, f64::from(Rating::MAX)) as u8
}

/// One-decimal label for a score, `-` when there is nothing to show.
/// Ties round half up, the same as [`average`].
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{:.1}", round_tenth(value)),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ratings(values: &[(&str, i64)]) -> CriteriaRatings {
        values
            .iter()
            .map(|(name, value)| (*name, Rating::new(*value).unwrap()))
            .collect()
    }

    #[test]
    fn rating_bounds_are_enforced() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(-1), Err(HrError::RatingOutOfRange(-1)));
        assert_eq!(Rating::new(1).unwrap().get(), 1);
        assert_eq!(Rating::new(5).unwrap().get(), 5);
    }

    #[test]
    fn empty_mapping_averages_to_zero() {
        assert_eq!(average(&CriteriaRatings::new()), 0.0);
    }

    #[test]
    fn half_tenths_round_up() {
        assert_eq!(average(&ratings(&[("a", 3), ("b", 4)])), 3.5);
        assert_eq!(average(&ratings(&[("a", 4), ("b", 4), ("c", 5)])), 4.3);
        assert_eq!(average(&ratings(&[("a", 5), ("b", 4), ("c", 5)])), 4.7);
    }

    #[test]
    fn field_scenario_averages_four_point_six() {
        let scored = ratings(&[
            ("Work Quality", 5),
            ("Safety Compliance", 4),
            ("Equipment Handling", 5),
            ("Teamwork", 4),
            ("Punctuality", 5),
        ]);
        assert_eq!(scored.average(), 4.6);
        assert_eq!(filled_stars(scored.average()), 5);
    }

    #[test]
    fn completeness_requires_every_criterion() {
        let criteria = crate::criteria_for("Field");
        let mut scored = ratings(&[
            ("Work Quality", 5),
            ("Safety Compliance", 4),
            ("Equipment Handling", 5),
            ("Teamwork", 4),
        ]);
        assert!(!is_complete(criteria, &scored));
        assert_eq!(missing_criteria(criteria, &scored), vec!["Punctuality"]);

        scored.set("Punctuality", Rating::new(1).unwrap());
        assert!(is_complete(criteria, &scored));
        assert!(missing_criteria(criteria, &scored).is_empty());
    }

    #[test]
    fn ratings_outside_the_list_do_not_complete_it() {
        let criteria = crate::criteria_for("Packing");
        let scored = ratings(&[
            ("Work Quality", 5),
            ("Safety Compliance", 5),
            ("Equipment Handling", 5),
            ("Teamwork", 5),
            ("Punctuality", 5),
        ]);
        assert!(!is_complete(criteria, &scored));
        assert_eq!(missing_criteria(criteria, &scored).len(), 5);
    }

    #[test]
    fn empty_criteria_list_is_complete() {
        assert!(is_complete(&[], &CriteriaRatings::new()));
    }

    #[test]
    fn labels_use_placeholder_without_data() {
        assert_eq!(format_score(None), "-");
        assert_eq!(format_score(Some(4.0)), "4.0");
        assert_eq!(format_score(Some(3.5)), "3.5");
    }

    #[test]
    fn labels_round_ties_up() {
        assert_eq!(format_score(Some(4.25)), "4.3");
        assert_eq!(format_score(Some(0.25)), "0.3");
        assert_eq!(format_score(Some(4.24)), "4.2");
    }

    #[test]
    fn stars_round_and_clamp() {
        assert_eq!(filled_stars(0.0), 0);
        assert_eq!(filled_stars(2.5), 3);
        assert_eq!(filled_stars(4.4), 4);
        assert_eq!(filled_stars(7.0), 5);
    }

    #[test]
    fn deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("0").is_err());
        let parsed: CriteriaRatings = serde_json::from_str(r#"{"Teamwork": 4}"#).unwrap();
        assert_eq!(parsed.get("Teamwork").map(Rating::get), Some(4));
    }

    proptest! {
        #[test]
        fn average_stays_within_bounds(values in prop::collection::vec(1i64..=5, 1..12)) {
            let scored: CriteriaRatings = values
                .iter()
                .enumerate()
                .map(|(idx, value)| (format!("c{idx}"), Rating::new(*value).unwrap()))
                .collect();
            let min = *values.iter().min().unwrap() as f64;
            let max = *values.iter().max().unwrap() as f64;
            let avg = average(&scored);
            prop_assert!(avg >= min && avg <= max, "{avg} outside [{min}, {max}]");
        }
    }
}
