use serde::Deserialize;

#[derive(Debug)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors.iter().find(|e| e.field == field).map(|e| e.message)
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RateMovieForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

/// Presence-validated rate-form input. The rating is still raw text here;
/// the handler converts it to a float so a bad number re-renders the form
/// instead of reaching the store.
#[derive(Debug)]
pub struct RateInput {
    pub rating: String,
    pub review: String,
}

impl RateMovieForm {
    pub fn validate(&self) -> Result<RateInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        let rating = self.rating.trim();
        if rating.is_empty() {
            errors.push(FieldError { field: "rating", message: "A rating is required." });
        }

        let review = self.review.trim();
        if review.is_empty() {
            errors.push(FieldError { field: "review", message: "A review is required." });
        }

        if errors.is_empty() {
            Ok(RateInput { rating: rating.to_string(), review: review.to_string() })
        } else {
            Err(errors)
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddMovieForm {
    #[serde(default)]
    pub title: String,
}

impl AddMovieForm {
    pub fn validate(&self) -> Result<String, Vec<FieldError>> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(vec![FieldError { field: "title", message: "A movie title is required." }]);
        }
        Ok(title.to_string())
    }
}
