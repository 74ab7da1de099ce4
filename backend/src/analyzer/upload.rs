use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageReader;
use shared::ImageType;
use std::io::Cursor;

/// Why an uploaded file was refused. Only logged; clients get one generic
/// message per file.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("{size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: u64 },
    #[error("content type {0:?} is not allowed")]
    UnsupportedType(Option<String>),
    #[error("bytes are not a readable image: {0}")]
    Unreadable(String),
}

/// An image that passed validation.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub name: String,
    pub image_type: ImageType,
    pub data: Vec<u8>,
}

impl UploadedImage {
    /// Checks size, declared content type and that the bytes parse as an image.
    pub fn validate(
        name: String,
        content_type: Option<&str>,
        data: Vec<u8>,
        max_size: u64,
    ) -> Result<Self, UploadRejection> {
        if data.len() as u64 > max_size {
            return Err(UploadRejection::TooLarge {
                size: data.len(),
                limit: max_size,
            });
        }

        let image_type = content_type
            .and_then(ImageType::from_mime)
            .ok_or_else(|| UploadRejection::UnsupportedType(content_type.map(str::to_owned)))?;

        ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .map_err(|e| UploadRejection::Unreadable(e.to_string()))?
            .into_dimensions()
            .map_err(|e| UploadRejection::Unreadable(e.to_string()))?;

        Ok(Self {
            name,
            image_type,
            data,
        })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.image_type.mime(), STANDARD.encode(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(2, 2))
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    #[test]
    fn accepts_real_images() {
        for (format, mime) in [
            (ImageFormat::Png, "image/png"),
            (ImageFormat::Jpeg, "image/jpeg"),
            (ImageFormat::Bmp, "image/bmp"),
        ] {
            let image =
                UploadedImage::validate("pic".into(), Some(mime), encoded(format), 1024 * 1024).unwrap();
            assert_eq!(image.image_type.mime(), mime);
        }
    }

    #[test]
    fn rejects_wrong_content_type() {
        let err = UploadedImage::validate("a.gif".into(), Some("image/gif"), encoded(ImageFormat::Png), 1024)
            .unwrap_err();
        assert_eq!(err, UploadRejection::UnsupportedType(Some("image/gif".into())));

        let err = UploadedImage::validate("a".into(), None, encoded(ImageFormat::Png), 1024).unwrap_err();
        assert_eq!(err, UploadRejection::UnsupportedType(None));
    }

    #[test]
    fn rejects_oversized_files() {
        let data = encoded(ImageFormat::Png);
        let limit = data.len() as u64 - 1;
        let err = UploadedImage::validate("a.png".into(), Some("image/png"), data, limit).unwrap_err();
        assert!(matches!(err, UploadRejection::TooLarge { .. }));
    }

    #[test]
    fn rejects_bytes_that_are_not_images() {
        let err = UploadedImage::validate("a.png".into(), Some("image/png"), b"definitely not a png".to_vec(), 1024)
            .unwrap_err();
        assert!(matches!(err, UploadRejection::Unreadable(_)));
    }

    #[test]
    fn encodes_as_data_url() {
        let image = UploadedImage {
            name: "a.png".into(),
            image_type: ImageType::Png,
            data: vec![1, 2, 3],
        };
        assert_eq!(image.to_data_url(), "data:image/png;base64,AQID");
    }
}
