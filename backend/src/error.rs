use crate::analyzer::AnalyzeError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::{ErrorDetail, MAX_FILES};

/// Failures of the analyze endpoint. Each renders as `{"detail": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("OpenAI API key not configured")]
    NotConfigured,

    #[error("No images provided")]
    NoImages,

    #[error("Invalid file: {name}. Must be JPG, PNG, or BMP under {max_mb}MB")]
    InvalidFile { name: String, max_mb: u64 },

    #[error("Maximum {} images allowed", MAX_FILES)]
    TooManyImages(usize),

    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalyzeError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotConfigured | ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NoImages
            | ApiError::InvalidFile { .. }
            | ApiError::TooManyImages(_)
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::ProviderError;

    #[test]
    fn maps_status_codes() {
        assert_eq!(ApiError::NotConfigured.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::NoImages.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::TooManyImages(4).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Analysis(AnalyzeError::Recipes(ProviderError::EmptyResponse)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_match_client_expectations() {
        let invalid = ApiError::InvalidFile {
            name: "cat.gif".into(),
            max_mb: 10,
        };
        assert_eq!(
            invalid.to_string(),
            "Invalid file: cat.gif. Must be JPG, PNG, or BMP under 10MB"
        );
        assert_eq!(ApiError::TooManyImages(5).to_string(), "Maximum 3 images allowed");

        let failed = ApiError::from(AnalyzeError::Ingredients(ProviderError::RequestFailed(
            "timed out".into(),
        )));
        assert_eq!(
            failed.to_string(),
            "Analysis failed: Failed to analyze images: API request failed: timed out"
        );
    }
}
