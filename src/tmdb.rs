use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

/// One row of a TMDB search response, passed through verbatim so the user
/// can pick the movie they meant.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchCandidate {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MovieDetails {
    pub title: String,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub poster_url: String,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
    ) -> Self {
        Self { client, api_key, base_url, image_base_url }
    }

    /// Title search. Zero results is an empty list, not an error.
    pub async fn search(&self, title: &str) -> AppResult<Vec<SearchCandidate>> {
        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));

        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.results)
    }

    pub async fn movie_details(&self, tmdb_id: i32) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);

        let payload: DetailPayload = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        details_from(payload, &self.image_base_url)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchCandidate>,
}

#[derive(Debug, Deserialize)]
struct DetailPayload {
    original_title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
}

fn details_from(payload: DetailPayload, image_base_url: &str) -> AppResult<MovieDetails> {
    let poster_path = payload
        .poster_path
        .ok_or_else(|| AppError::Lookup("movie detail response has no poster_path".to_string()))?;

    // TMDB release dates are YYYY-MM-DD; the year is the first four chars.
    let year = payload
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse::<i32>().ok());

    let description = payload.overview.filter(|o| !o.trim().is_empty());

    Ok(MovieDetails {
        title: payload.original_title,
        year,
        description,
        poster_url: format!(
            "{}/{}",
            image_base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        ),
    })
}
