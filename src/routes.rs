use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    AppState,
    error::{AppError, AppResult},
    forms::{AddMovieForm, FieldError, RateMovieForm},
    store::NewMovie,
    templates,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/edit", get(edit_form).post(edit_submit))
        .route("/add", get(add_form).post(add_submit))
        .route("/delete", get(delete_movie))
        .route("/select", get(select_movie))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    movie_id: Option<String>,
}

fn parse_id(raw: Option<String>, name: &str) -> AppResult<i32> {
    let raw = raw.ok_or_else(|| AppError::InvalidInput(format!("missing {name} parameter")))?;
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("{name} must be an integer")))
}

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let mut movies = state.store.list_by_rating().await?;

    // Ranking is the 1-based position under the current rating order,
    // rewritten on every listing so it tracks rating changes.
    let rankings: Vec<(i32, i32)> =
        movies.iter().enumerate().map(|(i, m)| (m.id, i as i32 + 1)).collect();
    state.store.persist_rankings(&rankings).await?;

    for (movie, &(_, rank)) in movies.iter_mut().zip(&rankings) {
        movie.ranking = Some(rank);
    }

    Ok(Html(templates::list_page(&movies)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Html<String>> {
    let id = parse_id(q.id, "id")?;
    let movie = state.store.get(id).await?;
    Ok(Html(templates::edit_page(&movie, &RateMovieForm::default(), &[])))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
    Form(form): Form<RateMovieForm>,
) -> AppResult<Response> {
    let id = parse_id(q.id, "id")?;
    let movie = state.store.get(id).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(Html(templates::edit_page(&movie, &form, &errors)).into_response());
        }
    };

    // Numeric conversion stays out of the schema so a bad value can
    // round-trip the form instead of touching the store.
    let rating: f64 = match input.rating.parse() {
        Ok(rating) => rating,
        Err(_) => {
            let errors =
                vec![FieldError { field: "rating", message: "Rating must be a number like 7.5." }];
            return Ok(Html(templates::edit_page(&movie, &form, &errors)).into_response());
        }
    };

    state.store.set_rating(id, rating, input.review).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page(&AddMovieForm::default(), &[]))
}

pub async fn add_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Html<String>> {
    match form.validate() {
        Ok(title) => {
            let candidates = state.tmdb.search(&title).await?;
            Ok(Html(templates::select_page(&title, &candidates)))
        }
        Err(errors) => Ok(Html(templates::add_page(&form, &errors))),
    }
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    let id = parse_id(q.id, "id")?;
    state.store.delete(id).await?;
    Ok(Redirect::to("/"))
}

pub async fn select_movie(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SelectQuery>,
) -> AppResult<Redirect> {
    let tmdb_id = parse_id(q.movie_id, "movie_id")?;
    let details = state.tmdb.movie_details(tmdb_id).await?;

    // No duplicate pre-check; the store's unique title constraint turns a
    // repeat selection into a Conflict page.
    let id = state
        .store
        .insert(NewMovie {
            title: details.title,
            year: details.year,
            description: details.description,
            img_url: Some(details.poster_url),
        })
        .await?;

    Ok(Redirect::to(&format!("/edit?id={id}")))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use sea_orm::{ConnectOptions, Database};
    use tower::ServiceExt;

    use super::*;
    use crate::{store::MovieStore, tmdb::TmdbClient};

    async fn test_state() -> Arc<AppState> {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        crate::db::migrate(&db).await.unwrap();

        // Points at a closed port; fine for routes that never call out.
        let tmdb = TmdbClient::new(
            reqwest::Client::new(),
            "test-key".to_string(),
            "http://127.0.0.1:1".to_string(),
            "https://image.tmdb.org/t/p/w500".to_string(),
        );

        Arc::new(AppState { store: MovieStore::new(db), tmdb: Arc::new(tmdb) })
    }

    async fn seed(state: &AppState, title: &str, rating: Option<f64>) -> i32 {
        let id = state
            .store
            .insert(NewMovie {
                title: title.to_string(),
                year: Some(2000),
                description: None,
                img_url: None,
            })
            .await
            .unwrap();
        if let Some(rating) = rating {
            state.store.set_rating(id, rating, "seed review".to_string()).await.unwrap();
        }
        id
    }

    fn form_post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn list_assigns_rankings_by_rating_descending() {
        let state = test_state().await;
        let a = seed(&state, "A", Some(9.0)).await;
        let b = seed(&state, "B", Some(7.0)).await;
        let c = seed(&state, "C", Some(8.5)).await;

        let resp = router(state.clone())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        assert_eq!(state.store.get(a).await.unwrap().ranking, Some(1));
        assert_eq!(state.store.get(c).await.unwrap().ranking, Some(2));
        assert_eq!(state.store.get(b).await.unwrap().ranking, Some(3));
    }

    #[tokio::test]
    async fn listing_twice_without_changes_is_idempotent() {
        let state = test_state().await;
        let a = seed(&state, "A", Some(6.0)).await;
        let b = seed(&state, "B", Some(8.0)).await;

        for _ in 0..2 {
            let resp = router(state.clone())
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(state.store.get(b).await.unwrap().ranking, Some(1));
            assert_eq!(state.store.get(a).await.unwrap().ranking, Some(2));
        }
    }

    #[tokio::test]
    async fn non_numeric_rating_rerenders_form_and_skips_store() {
        let state = test_state().await;
        let id = seed(&state, "Heat", None).await;

        let resp = router(state.clone())
            .oneshot(form_post(&format!("/edit?id={id}"), "rating=abc&review=great"))
            .await
            .unwrap();

        // Form view, not a redirect.
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.store.get(id).await.unwrap().rating, None);
    }

    #[tokio::test]
    async fn valid_rating_updates_and_redirects_to_list() {
        let state = test_state().await;
        let id = seed(&state, "Heat", None).await;

        let resp = router(state.clone())
            .oneshot(form_post(&format!("/edit?id={id}"), "rating=8.5&review=tense"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        let movie = state.store.get(id).await.unwrap();
        assert_eq!(movie.rating, Some(8.5));
        assert_eq!(movie.review.as_deref(), Some("tense"));
    }

    #[tokio::test]
    async fn empty_rate_form_rerenders_with_errors() {
        let state = test_state().await;
        let id = seed(&state, "Heat", None).await;

        let resp = router(state.clone())
            .oneshot(form_post(&format!("/edit?id={id}"), "rating=&review="))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.store.get(id).await.unwrap().review, None);
    }

    #[tokio::test]
    async fn edit_unknown_id_is_404() {
        let state = test_state().await;
        let resp = router(state)
            .oneshot(Request::builder().uri("/edit?id=99").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_id_parameter_is_400() {
        let state = test_state().await;
        let resp = router(state)
            .oneshot(Request::builder().uri("/edit").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_integer_id_parameter_is_400() {
        let state = test_state().await;
        let resp = router(state)
            .oneshot(Request::builder().uri("/delete?id=abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_404_not_silent() {
        let state = test_state().await;
        let resp = router(state)
            .oneshot(Request::builder().uri("/delete?id=42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_existing_movie_redirects_to_list() {
        let state = test_state().await;
        let id = seed(&state, "Alien", Some(9.0)).await;

        let resp = router(state.clone())
            .oneshot(
                Request::builder().uri(format!("/delete?id={id}")).body(Body::empty()).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(matches!(state.store.get(id).await.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn blank_search_title_rerenders_form() {
        let state = test_state().await;
        let resp = router(state).oneshot(form_post("/add", "title=+")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn select_without_movie_id_is_400() {
        let state = test_state().await;
        let resp = router(state)
            .oneshot(Request::builder().uri("/select").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
