//! Movie entity, its editable details, and the view returned to callers.
//!
//! A [`Movie`] owns its score set. Every mutation of that set goes through
//! [`Movie::record_score`], which keeps the [`ScoreSummary`] in step with the
//! scores it summarises.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Score, ScoreSummary, ScoreValue, UserId, recompute_aggregate};

/// Earliest release year accepted for a movie.
pub const EARLIEST_YEAR: i32 = 1888;

/// Validation errors returned while building movie values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieValidationError {
    /// Identifier was zero or negative.
    NonPositiveId,
    /// Title was missing or blank once trimmed.
    EmptyTitle,
    /// Release year predates cinema.
    YearTooEarly { min: i32 },
}

impl fmt::Display for MovieValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "movie id must be positive"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::YearTooEarly { min } => write!(f, "year must be {min} or later"),
        }
    }
}

impl std::error::Error for MovieValidationError {}

/// Stable movie identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MovieId(i64);

impl MovieId {
    /// Validate and construct a [`MovieId`].
    pub fn new(id: i64) -> Result<Self, MovieValidationError> {
        if id <= 0 {
            return Err(MovieValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for MovieId {
    type Error = MovieValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MovieId> for i64 {
    fn from(value: MovieId) -> Self {
        value.0
    }
}

/// Raw movie payload supplied by a caller for insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    /// Display title.
    pub title: String,
    /// Release year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Poster image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Short plot summary.
    #[serde(default)]
    pub synopsis: Option<String>,
}

impl MovieInput {
    /// Input carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Validated, caller-editable movie fields.
///
/// ## Invariants
/// - `title` is trimmed and non-empty.
/// - `year`, when present, is at least [`EARLIEST_YEAR`].
/// - blank `image` and `synopsis` values are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetails {
    title: String,
    year: Option<i32>,
    image: Option<String>,
    synopsis: Option<String>,
}

impl MovieDetails {
    /// Details with a title and nothing else.
    pub fn titled(title: impl AsRef<str>) -> Result<Self, MovieValidationError> {
        Self::try_from(MovieInput::titled(title.as_ref()))
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Release year.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Poster image URL.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Short plot summary.
    pub fn synopsis(&self) -> Option<&str> {
        self.synopsis.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

impl TryFrom<MovieInput> for MovieDetails {
    type Error = MovieValidationError;

    fn try_from(value: MovieInput) -> Result<Self, Self::Error> {
        let MovieInput {
            title,
            year,
            image,
            synopsis,
        } = value;

        let title = title.trim();
        if title.is_empty() {
            return Err(MovieValidationError::EmptyTitle);
        }
        if year.is_some_and(|year| year < EARLIEST_YEAR) {
            return Err(MovieValidationError::YearTooEarly { min: EARLIEST_YEAR });
        }

        Ok(Self {
            title: title.to_owned(),
            year,
            image: non_blank(image),
            synopsis: non_blank(synopsis),
        })
    }
}

/// Catalogue entry with its scores and the aggregate derived from them.
///
/// ## Invariants
/// - at most one score per user.
/// - `summary == recompute_aggregate(scores)` after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    id: MovieId,
    details: MovieDetails,
    scores: Vec<Score>,
    summary: ScoreSummary,
}

impl Movie {
    /// A movie nobody has scored yet.
    pub fn new(id: MovieId, details: MovieDetails) -> Self {
        Self {
            id,
            details,
            scores: Vec::new(),
            summary: ScoreSummary::default(),
        }
    }

    /// Rebuild a movie from stored parts.
    ///
    /// Scores belonging to other movies are dropped and later scores by the
    /// same user replace earlier ones.
    pub fn from_parts(
        id: MovieId,
        details: MovieDetails,
        scores: impl IntoIterator<Item = Score>,
    ) -> Self {
        let mut movie = Self::new(id, details);
        for score in scores.into_iter().filter(|score| score.movie_id() == id) {
            movie.upsert(score.user_id(), score.value());
        }
        movie.summary = recompute_aggregate(&movie.scores);
        movie
    }

    /// Stable identifier.
    pub fn id(&self) -> MovieId {
        self.id
    }

    /// Editable details.
    pub fn details(&self) -> &MovieDetails {
        &self.details
    }

    /// Every score submitted for this movie.
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// Current aggregate.
    pub fn summary(&self) -> ScoreSummary {
        self.summary
    }

    /// Score previously submitted by `user_id`, if any.
    pub fn score_by(&self, user_id: UserId) -> Option<&Score> {
        self.scores.iter().find(|score| score.is_by(user_id))
    }

    /// Overwrite the editable details, leaving scores untouched.
    pub fn apply_details(&mut self, details: MovieDetails) {
        self.details = details;
    }

    /// Insert or replace `user_id`'s score and recompute the aggregate.
    ///
    /// Returns the stored score.
    ///
    /// # Examples
    /// ```
    /// use movie_ratings::domain::{Movie, MovieDetails, MovieId, ScoreValue, UserId};
    ///
    /// let mut movie = Movie::new(MovieId::new(1).unwrap(), MovieDetails::titled("Heat").unwrap());
    /// let user = UserId::new(9).unwrap();
    /// movie.record_score(user, ScoreValue::new(4.0).unwrap());
    /// movie.record_score(user, ScoreValue::new(5.0).unwrap());
    ///
    /// assert_eq!(movie.summary().count(), 1);
    /// assert_eq!(movie.summary().average(), 5.0);
    /// ```
    pub fn record_score(&mut self, user_id: UserId, value: ScoreValue) -> Score {
        let score = self.upsert(user_id, value);
        self.summary = recompute_aggregate(&self.scores);
        score
    }

    fn upsert(&mut self, user_id: UserId, value: ScoreValue) -> Score {
        match self.scores.iter_mut().find(|score| score.is_by(user_id)) {
            Some(existing) => {
                existing.set_value(value);
                existing.clone()
            }
            None => {
                let score = Score::new(user_id, self.id, value);
                self.scores.push(score.clone());
                score
            }
        }
    }

    /// Projection returned by catalogue and scoring operations.
    pub fn view(&self) -> MovieView {
        MovieView::from(self)
    }
}

/// Caller-facing projection of a movie and its aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieView {
    /// Stable identifier.
    pub id: MovieId,
    /// Display title.
    pub title: String,
    /// Mean of all submitted scores.
    pub score: f64,
    /// Number of submitted scores.
    pub count: u32,
    /// Release year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Poster image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Short plot summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
}

impl From<&Movie> for MovieView {
    fn from(movie: &Movie) -> Self {
        let details = &movie.details;
        Self {
            id: movie.id,
            title: details.title.clone(),
            score: movie.summary.average(),
            count: movie.summary.count(),
            year: details.year,
            image: details.image.clone(),
            synopsis: details.synopsis.clone(),
        }
    }
}

impl From<Movie> for MovieView {
    fn from(movie: Movie) -> Self {
        Self::from(&movie)
    }
}
