use derive_more::Display;
use std::fmt;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};
use strum_macros::EnumString;
use uuid::Uuid;

/// Most photos a single analysis call accepts.
pub const MAX_FILES: usize = 3;
/// Per-file upload limit in bytes (10 MiB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Image formats the analysis endpoint accepts, keyed by MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum ImageType {
    #[strum(serialize = "image/jpeg")]
    Jpeg,
    #[strum(serialize = "image/png")]
    Png,
    #[strum(serialize = "image/bmp")]
    Bmp,
}

impl ImageType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        mime.trim().to_ascii_lowercase().parse().ok()
    }

    pub fn mime(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            ImageType::Jpeg => "JPG",
            ImageType::Png => "PNG",
            ImageType::Bmp => "BMP",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        ImageType::iter().map(ImageType::label).collect()
    }

    /// Comma separated list for `<input accept=...>`.
    pub fn accept_list() -> String {
        ImageType::iter()
            .map(ImageType::mime)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A file the user picked, staged for upload.
///
/// `P` is whatever carries the bytes: a browser `File` handle on the frontend,
/// raw bytes elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<P> {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    pub media_type: String,
    pub payload: P,
}

impl<P> SelectedFile<P> {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>, payload: P) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size,
            media_type: media_type.into(),
            payload,
        }
    }

    pub fn image_type(&self) -> Option<ImageType> {
        ImageType::from_mime(&self.media_type)
    }
}

/// One violated intake constraint.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Rejection {
    #[display(
        fmt = "Maximum {} images allowed ({} already selected, {} more attempted).",
        MAX_FILES,
        already_selected,
        attempted
    )]
    TooManyFiles {
        already_selected: usize,
        attempted: usize,
    },
    #[display(fmt = "{} is not a JPG, PNG, or BMP image.", name)]
    UnsupportedType { name: String, media_type: String },
    #[display(fmt = "{} is larger than 10 MB.", name)]
    TooLarge { name: String, size: u64 },
}

/// A rejected batch, with every reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeError {
    pub reasons: Vec<Rejection>,
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .reasons
            .iter()
            .map(Rejection::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&message)
    }
}

impl std::error::Error for IntakeError {}

/// The accepted set: files that passed validation, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct FileIntake<P> {
    files: Vec<SelectedFile<P>>,
}

impl<P> Default for FileIntake<P> {
    fn default() -> Self {
        Self { files: Vec::new() }
    }
}

impl<P> FileIntake<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[SelectedFile<P>] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn remaining_slots(&self) -> usize {
        MAX_FILES.saturating_sub(self.files.len())
    }

    /// Checks a batch against the accepted set without changing anything.
    pub fn check(&self, batch: &[SelectedFile<P>]) -> Result<(), IntakeError> {
        let mut reasons = Vec::new();

        if self.files.len() + batch.len() > MAX_FILES {
            reasons.push(Rejection::TooManyFiles {
                already_selected: self.files.len(),
                attempted: batch.len(),
            });
        }

        for file in batch {
            if file.image_type().is_none() {
                reasons.push(Rejection::UnsupportedType {
                    name: file.name.clone(),
                    media_type: file.media_type.clone(),
                });
            }
            if file.size > MAX_FILE_BYTES {
                reasons.push(Rejection::TooLarge {
                    name: file.name.clone(),
                    size: file.size,
                });
            }
        }

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(IntakeError { reasons })
        }
    }

    /// Appends the whole batch, or nothing if any constraint fails.
    pub fn accept(&mut self, batch: Vec<SelectedFile<P>>) -> Result<usize, IntakeError> {
        self.check(&batch)?;
        let added = batch.len();
        self.files.extend(batch);
        Ok(added)
    }

    pub fn remove(&mut self, index: usize) -> Option<SelectedFile<P>> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64, mime: &str) -> SelectedFile<()> {
        SelectedFile::new(name, size, mime, ())
    }

    fn names(intake: &FileIntake<()>) -> Vec<&str> {
        intake.files().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn accepts_supported_images() {
        let mut intake = FileIntake::new();
        let added = intake
            .accept(vec![
                file("a.jpg", 1_000, "image/jpeg"),
                file("b.png", 2_000, "image/png"),
                file("c.bmp", MAX_FILE_BYTES, "image/bmp"),
            ])
            .unwrap();

        assert_eq!(added, 3);
        assert_eq!(names(&intake), vec!["a.jpg", "b.png", "c.bmp"]);
        assert_eq!(intake.remaining_slots(), 0);
    }

    #[test]
    fn rejects_batch_over_limit_without_mutation() {
        let mut intake = FileIntake::new();
        intake.accept(vec![file("a.jpg", 10, "image/jpeg")]).unwrap();

        let err = intake
            .accept(vec![
                file("b.jpg", 10, "image/jpeg"),
                file("c.jpg", 10, "image/jpeg"),
                file("d.jpg", 10, "image/jpeg"),
            ])
            .unwrap_err();

        assert_eq!(
            err.reasons,
            vec![Rejection::TooManyFiles {
                already_selected: 1,
                attempted: 3
            }]
        );
        assert_eq!(names(&intake), vec!["a.jpg"]);
    }

    #[test]
    fn four_files_at_once_are_rejected() {
        let mut intake = FileIntake::new();
        let batch = (0..4)
            .map(|i| file(&format!("{i}.png"), 10, "image/png"))
            .collect();

        assert!(intake.accept(batch).is_err());
        assert!(intake.is_empty());
    }

    #[test]
    fn names_each_offending_file() {
        let mut intake = FileIntake::new();
        intake.accept(vec![file("keep.png", 10, "image/png")]).unwrap();

        let err = intake
            .accept(vec![
                file("huge.jpg", MAX_FILE_BYTES + 1, "image/jpeg"),
                file("anim.gif", 10, "image/gif"),
            ])
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("huge.jpg is larger than 10 MB."));
        assert!(message.contains("anim.gif is not a JPG, PNG, or BMP image."));
        assert_eq!(err.reasons.len(), 2);
        assert_eq!(names(&intake), vec!["keep.png"]);
    }

    #[test]
    fn reports_every_violated_constraint() {
        let intake = FileIntake::new();
        let batch = vec![
            file("a.webp", MAX_FILE_BYTES * 2, "image/webp"),
            file("b.png", 1, "image/png"),
            file("c.png", 1, "image/png"),
            file("d.png", 1, "image/png"),
        ];

        let err = intake.check(&batch).unwrap_err();
        assert_eq!(err.reasons.len(), 3);
        assert!(err.to_string().starts_with("Maximum 3 images allowed"));
    }

    #[test]
    fn remove_preserves_order() {
        let mut intake = FileIntake::new();
        intake
            .accept(vec![
                file("a.png", 1, "image/png"),
                file("b.png", 1, "image/png"),
                file("c.png", 1, "image/png"),
            ])
            .unwrap();

        let removed = intake.remove(1).unwrap();
        assert_eq!(removed.name, "b.png");
        assert_eq!(names(&intake), vec!["a.png", "c.png"]);
        assert!(intake.remove(5).is_none());
        assert_eq!(intake.len(), 2);
    }

    #[test]
    fn parses_mime_types() {
        assert_eq!(ImageType::from_mime("image/jpeg"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_mime(" IMAGE/PNG "), Some(ImageType::Png));
        assert_eq!(ImageType::from_mime("image/bmp"), Some(ImageType::Bmp));
        assert_eq!(ImageType::from_mime("image/gif"), None);
        assert_eq!(ImageType::from_mime(""), None);
        assert_eq!(ImageType::accept_list(), "image/jpeg,image/png,image/bmp");
        assert_eq!(ImageType::labels(), vec!["JPG", "PNG", "BMP"]);
    }
}
