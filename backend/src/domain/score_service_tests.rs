//! Tests for the score aggregation service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockMovieRepository, MockScoreRepository, MockUserResolution};
use crate::domain::{ErrorCode, Movie, MovieDetails, Role, Score, User, UserId, Username};
use rstest::{fixture, rstest};

const MOVIE: i64 = 1;
const MISSING: i64 = 1000;
const CALLER: i64 = 3;

type Service = ScoreService<MockMovieRepository, MockScoreRepository, MockUserResolution>;

fn movie_id(raw: i64) -> MovieId {
    MovieId::new(raw).expect("valid movie id")
}

fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}

fn value(raw: f64) -> ScoreValue {
    ScoreValue::new(raw).expect("valid score")
}

/// Movie already scored 8 and 6 by two other users.
fn scored_movie() -> Movie {
    Movie::from_parts(
        movie_id(MOVIE),
        MovieDetails::titled("The Witcher").expect("valid details"),
        [
            Score::new(user_id(1), movie_id(MOVIE), value(8.0)),
            Score::new(user_id(2), movie_id(MOVIE), value(6.0)),
        ],
    )
}

#[fixture]
fn caller() -> User {
    User::new(
        user_id(CALLER),
        Username::new("maria@gmail.com").expect("valid username"),
        [Role::new(1, "ROLE_CLIENT").expect("valid role")],
    )
}

fn resolving(user: User) -> MockUserResolution {
    let mut users = MockUserResolution::new();
    users
        .expect_authenticated()
        .times(1)
        .return_once(move || Ok(user));
    users
}

/// Score store that commits onto `stored`, the way a real gateway would.
fn committing_onto(stored: Movie) -> MockScoreRepository {
    let mut scores = MockScoreRepository::new();
    scores
        .expect_save_and_flush()
        .times(1)
        .return_once(move |score: &Score| {
            let mut committed = stored;
            committed.record_score(score.user_id(), score.value());
            Ok(committed)
        });
    scores
}

fn make_service(
    movies: MockMovieRepository,
    scores: MockScoreRepository,
    users: MockUserResolution,
) -> Service {
    ScoreService::new(Arc::new(movies), Arc::new(scores), Arc::new(users))
}

#[rstest]
#[tokio::test]
async fn new_scorer_joins_the_aggregate(caller: User) {
    let mut movies = MockMovieRepository::new();
    movies
        .expect_find_by_id()
        .withf(|id: &MovieId| id.get() == MOVIE)
        .times(1)
        .return_once(|_| Ok(Some(scored_movie())));
    let mut scores = MockScoreRepository::new();
    scores
        .expect_save_and_flush()
        .withf(|score: &Score| {
            score.user_id().get() == CALLER
                && score.movie_id().get() == MOVIE
                && score.value().get() == 10.0
        })
        .times(1)
        .return_once(|score: &Score| {
            let mut committed = scored_movie();
            committed.record_score(score.user_id(), score.value());
            Ok(committed)
        });

    let view = make_service(movies, scores, resolving(caller))
        .save_score(ScoreInput {
            movie_id: movie_id(MOVIE),
            score: 10.0,
        })
        .await
        .expect("score saved");

    assert_eq!(view.id, movie_id(MOVIE));
    assert_eq!(view.count, 3);
    assert_eq!(view.score, 8.0);
}

#[rstest]
#[tokio::test]
async fn first_score_sets_the_aggregate(caller: User) {
    let unscored = Movie::new(
        movie_id(MOVIE),
        MovieDetails::titled("Dune").expect("valid details"),
    );
    let stored = unscored.clone();
    let mut movies = MockMovieRepository::new();
    movies
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(unscored)));

    let view = make_service(movies, committing_onto(stored), resolving(caller))
        .save_score(ScoreInput {
            movie_id: movie_id(MOVIE),
            score: 4.0,
        })
        .await
        .expect("score saved");

    assert_eq!(view.count, 1);
    assert_eq!(view.score, 4.0);
}

#[rstest]
#[tokio::test]
async fn rescoring_replaces_the_callers_score(caller: User) {
    let mut stored = scored_movie();
    stored.record_score(user_id(CALLER), value(1.0));
    let fetched = stored.clone();
    let mut movies = MockMovieRepository::new();
    movies
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(fetched)));

    let view = make_service(movies, committing_onto(stored), resolving(caller))
        .save_score(ScoreInput {
            movie_id: movie_id(MOVIE),
            score: 10.0,
        })
        .await
        .expect("score saved");

    assert_eq!(view.count, 3);
    assert_eq!(view.score, 8.0);
}

#[rstest]
#[tokio::test]
async fn missing_movie_is_not_found_and_nothing_is_saved(caller: User) {
    let mut movies = MockMovieRepository::new();
    movies
        .expect_find_by_id()
        .withf(|id: &MovieId| id.get() == MISSING)
        .times(1)
        .return_once(|_| Ok(None));
    let mut scores = MockScoreRepository::new();
    scores.expect_save_and_flush().times(0);

    let error = make_service(movies, scores, resolving(caller))
        .save_score(ScoreInput {
            movie_id: movie_id(MISSING),
            score: 4.0,
        })
        .await
        .expect_err("movie is missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(-1.0)]
#[case(10.5)]
#[case(f64::NAN)]
#[tokio::test]
async fn off_scale_scores_are_rejected_before_any_write(caller: User, #[case] raw: f64) {
    let mut movies = MockMovieRepository::new();
    movies
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(scored_movie())));
    let mut scores = MockScoreRepository::new();
    scores.expect_save_and_flush().times(0);

    let error = make_service(movies, scores, resolving(caller))
        .save_score(ScoreInput {
            movie_id: movie_id(MOVIE),
            score: raw,
        })
        .await
        .expect_err("score is off the scale");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(11.0)]
#[case(f64::INFINITY)]
#[tokio::test]
async fn missing_movie_wins_over_an_off_scale_score(caller: User, #[case] raw: f64) {
    let mut movies = MockMovieRepository::new();
    movies
        .expect_find_by_id()
        .withf(|id: &MovieId| id.get() == MISSING)
        .times(1)
        .return_once(|_| Ok(None));
    let mut scores = MockScoreRepository::new();
    scores.expect_save_and_flush().times(0);

    let error = make_service(movies, scores, resolving(caller))
        .save_score(ScoreInput {
            movie_id: movie_id(MISSING),
            score: raw,
        })
        .await
        .expect_err("movie is missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn unresolved_caller_stops_before_the_movie_lookup() {
    let mut users = MockUserResolution::new();
    users
        .expect_authenticated()
        .times(1)
        .return_once(|| Err(Error::username_not_found("invalid user")));
    let mut movies = MockMovieRepository::new();
    movies.expect_find_by_id().times(0);
    let mut scores = MockScoreRepository::new();
    scores.expect_save_and_flush().times(0);

    let error = make_service(movies, scores, users)
        .save_score(ScoreInput {
            movie_id: movie_id(MOVIE),
            score: 5.0,
        })
        .await
        .expect_err("caller unknown");

    assert_eq!(error.code(), ErrorCode::UsernameNotFound);
}

#[rstest]
#[tokio::test]
async fn movie_deleted_before_commit_is_not_found(caller: User) {
    let mut movies = MockMovieRepository::new();
    movies
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(scored_movie())));
    let mut scores = MockScoreRepository::new();
    scores
        .expect_save_and_flush()
        .times(1)
        .return_once(|score: &Score| {
            Err(ScoreRepositoryError::movie_not_found(score.movie_id()))
        });

    let error = make_service(movies, scores, resolving(caller))
        .save_score(ScoreInput {
            movie_id: movie_id(MOVIE),
            score: 5.0,
        })
        .await
        .expect_err("movie vanished");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
