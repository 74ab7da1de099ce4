use crate::analyzer::{ImageAnalyzer, UploadedImage};
use crate::error::ApiError;
use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use log::{error, info, warn};
use shared::client::ANALYZE_PATH;
use shared::MAX_FILES;
use std::path::PathBuf;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Shared by every worker. `analyzer` is `None` when no API key is configured.
#[derive(Clone)]
pub struct AnalyzeState {
    pub analyzer: Option<ImageAnalyzer>,
    pub max_upload_size: u64,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: Option<PathBuf>) {
    cfg.service(web::resource(ANALYZE_PATH).route(web::post().to(analyze_images)));
    if let Some(dir) = frontend_dir {
        cfg.service(Files::new("/", dir).index_file("index.html"));
    }
}

async fn analyze_images(
    state: web::Data<AnalyzeState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let analyzer = state.analyzer.as_ref().ok_or_else(|| {
        error!("Rejecting analyze request: OPENAI_API_KEY is not set");
        ApiError::NotConfigured
    })?;

    let images = read_images(payload, state.max_upload_size).await?;
    if images.is_empty() {
        return Err(ApiError::NoImages);
    }

    info!(
        "Analyzing {} images with {}",
        images.len(),
        analyzer.provider_name()
    );
    let result = analyzer.analyze(&images).await.map_err(|e| {
        error!("Analysis failed: {}", e);
        ApiError::from(e)
    })?;

    info!(
        "Found {} ingredients and {} recipes",
        result.ingredients.len(),
        result.recipes.len()
    );
    Ok(HttpResponse::Ok().json(result))
}

/// Reads every file field, validating each one as it arrives. Fields without a
/// filename are drained and skipped. A file field past [`MAX_FILES`] ends the
/// read before any of its bytes are buffered.
async fn read_images(mut payload: Multipart, max_size: u64) -> Result<Vec<UploadedImage>, ApiError> {
    let mut images = Vec::new();

    while let Some(mut field) = payload.try_next().await? {
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);
        let Some(name) = filename else {
            while field.try_next().await?.is_some() {}
            continue;
        };
        if images.len() >= MAX_FILES {
            warn!("Rejecting upload: {:?} is past the {} file limit", name, MAX_FILES);
            return Err(ApiError::TooManyImages(images.len() + 1));
        }
        let content_type = field.content_type().map(|mime| mime.essence_str().to_owned());

        // Stop buffering once the limit is passed; the rest is only counted.
        let mut data = Vec::new();
        let mut oversized = false;
        while let Some(chunk) = field.try_next().await? {
            if oversized {
                continue;
            }
            data.extend_from_slice(&chunk);
            oversized = data.len() as u64 > max_size;
        }

        let image = UploadedImage::validate(name.clone(), content_type.as_deref(), data, max_size)
            .map_err(|rejection| {
                warn!("Rejected upload {:?}: {}", name, rejection);
                ApiError::InvalidFile {
                    name: name.clone(),
                    max_mb: max_size.div_ceil(BYTES_PER_MB),
                }
            })?;
        images.push(image);
    }

    Ok(images)
}
