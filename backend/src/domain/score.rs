//! Score values and the aggregate derived from them.
//!
//! A [`Score`] belongs jointly to one user and one movie. The movie's
//! displayed rating is never stored independently of its scores: it is always
//! the output of [`recompute_aggregate`] over the current score set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MovieId, UserId};

/// Lowest accepted score.
pub const SCORE_MIN: f64 = 0.0;
/// Highest accepted score.
pub const SCORE_MAX: f64 = 10.0;

/// Validation errors returned by [`ScoreValue::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScoreValidationError {
    /// The value was NaN or infinite.
    #[error("score must be a finite number")]
    NotFinite,
    /// The value fell outside the accepted scale.
    #[error("score must be between {min} and {max}, got {value}")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

/// A single user's rating, bounded to `[SCORE_MIN, SCORE_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ScoreValue(f64);

impl ScoreValue {
    /// Validate and wrap a raw score.
    ///
    /// # Examples
    /// ```
    /// use movie_ratings::domain::ScoreValue;
    ///
    /// assert!(ScoreValue::new(7.5).is_ok());
    /// assert!(ScoreValue::new(11.0).is_err());
    /// ```
    pub fn new(value: f64) -> Result<Self, ScoreValidationError> {
        if !value.is_finite() {
            return Err(ScoreValidationError::NotFinite);
        }
        if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            return Err(ScoreValidationError::OutOfRange {
                value,
                min: SCORE_MIN,
                max: SCORE_MAX,
            });
        }
        Ok(Self(value))
    }

    /// The raw numeric value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ScoreValue {
    type Error = ScoreValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScoreValue> for f64 {
    fn from(value: ScoreValue) -> Self {
        value.0
    }
}

/// One user's score for one movie, identified by the `(user, movie)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    user_id: UserId,
    movie_id: MovieId,
    value: ScoreValue,
}

impl Score {
    /// Build a score for the given pair.
    pub fn new(user_id: UserId, movie_id: MovieId, value: ScoreValue) -> Self {
        Self {
            user_id,
            movie_id,
            value,
        }
    }

    /// User who submitted the score.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Movie being scored.
    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    /// Submitted value.
    pub fn value(&self) -> ScoreValue {
        self.value
    }

    /// Replace the value in place, keeping the identity.
    pub fn set_value(&mut self, value: ScoreValue) {
        self.value = value;
    }

    /// Whether this score belongs to `user_id`.
    pub fn is_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Mean score and number of scores for a movie.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    average: f64,
    count: u32,
}

impl ScoreSummary {
    /// Arithmetic mean of every score; `0.0` when nobody has scored.
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Number of scores contributing to the mean.
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Recompute a movie's aggregate from its full score set.
///
/// Pure and order independent; call it after every mutation of the set.
///
/// # Examples
/// ```
/// use movie_ratings::domain::{recompute_aggregate, MovieId, Score, ScoreValue, UserId};
///
/// let movie = MovieId::new(1).unwrap();
/// let scores: Vec<Score> = [(1, 8.0), (2, 6.0), (3, 10.0)]
///     .into_iter()
///     .map(|(user, value)| {
///         Score::new(UserId::new(user).unwrap(), movie, ScoreValue::new(value).unwrap())
///     })
///     .collect();
///
/// let summary = recompute_aggregate(&scores);
/// assert_eq!(summary.count(), 3);
/// assert_eq!(summary.average(), 8.0);
/// ```
pub fn recompute_aggregate(scores: &[Score]) -> ScoreSummary {
    if scores.is_empty() {
        return ScoreSummary::default();
    }
    let count = u32::try_from(scores.len()).unwrap_or(u32::MAX);
    let total: f64 = scores.iter().map(|score| score.value.get()).sum();
    ScoreSummary {
        average: total / f64::from(count),
        count,
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for score validation and aggregation.
    use super::*;
    use rstest::rstest;

    fn score(user: i64, value: f64) -> Score {
        Score::new(
            UserId::new(user).expect("valid user id"),
            MovieId::new(1).expect("valid movie id"),
            ScoreValue::new(value).expect("valid score"),
        )
    }

    #[rstest]
    #[case(SCORE_MIN)]
    #[case(SCORE_MAX)]
    #[case(4.5)]
    fn accepts_values_on_the_scale(#[case] value: f64) {
        assert_eq!(ScoreValue::new(value).map(ScoreValue::get), Ok(value));
    }

    #[rstest]
    #[case(-0.5)]
    #[case(10.01)]
    fn rejects_values_off_the_scale(#[case] value: f64) {
        assert!(matches!(
            ScoreValue::new(value),
            Err(ScoreValidationError::OutOfRange { .. })
        ));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_non_finite_values(#[case] value: f64) {
        assert_eq!(ScoreValue::new(value), Err(ScoreValidationError::NotFinite));
    }

    #[rstest]
    fn empty_set_has_zero_summary() {
        let summary = recompute_aggregate(&[]);
        assert_eq!(summary.count(), 0);
        assert_eq!(summary.average(), 0.0);
    }

    #[rstest]
    fn single_score_is_its_own_mean() {
        let summary = recompute_aggregate(&[score(1, 4.0)]);
        assert_eq!(summary.count(), 1);
        assert_eq!(summary.average(), 4.0);
    }

    #[rstest]
    fn mean_covers_every_score() {
        let summary = recompute_aggregate(&[score(1, 8.0), score(2, 6.0), score(3, 10.0)]);
        assert_eq!(summary.count(), 3);
        assert_eq!(summary.average(), 8.0);
    }

    #[rstest]
    fn aggregate_ignores_order() {
        let forward = recompute_aggregate(&[score(1, 2.0), score(2, 9.0), score(3, 5.5)]);
        let backward = recompute_aggregate(&[score(3, 5.5), score(2, 9.0), score(1, 2.0)]);
        assert_eq!(forward, backward);
    }

    #[rstest]
    fn score_value_deserialisation_validates_range() {
        assert!(serde_json::from_str::<ScoreValue>("12.0").is_err());
        let value: ScoreValue = serde_json::from_str("3.0").expect("valid score");
        assert_eq!(value.get(), 3.0);
    }
}
