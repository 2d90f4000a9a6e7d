//! Gallery normalization: mixed image/caption inputs to one markup block.
//!
//! The three accepted input shapes all collapse to an ordered sequence of
//! (filename, caption) entries. In-memory images are written to generated
//! filenames as a side effect of normalization; file-backed references pass
//! through untouched.

use std::path::Path;

use rand::{distr::Alphanumeric, Rng};

use crate::artifact::{GalleryInput, ImageFormat, ImageRef};
use crate::error::LogResult;

/// Caption used when the caller supplies none.
pub const PLACEHOLDER_CAPTION: &str = "no caption given";

/// Length of generated image filenames (before the extension).
///
/// Long enough that collisions within one document are an accepted risk
/// rather than an expected event; not meant to be cryptographically unique.
pub const ID_LENGTH: usize = 20;

/// A generated random alphanumeric identifier of the given length.
pub fn generate_id(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// One canonical gallery entry: an on-disk filename and its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub filename: String,
    pub caption: String,
}

/// Write an in-memory image to a generated filename in `dir`; file-backed
/// references are returned as-is. Returns the filename the document should
/// reference.
pub fn materialize(image: ImageRef, format: ImageFormat, dir: &Path) -> LogResult<String> {
    match image {
        ImageRef::File(name) => Ok(name),
        ImageRef::Data(data) => {
            let filename = format!("{}.{}", generate_id(ID_LENGTH), format.extension());
            std::fs::write(dir.join(&filename), &data.bytes)?;
            Ok(filename)
        }
    }
}

/// Normalize any gallery input shape into ordered entries, materializing
/// in-memory images into `dir` along the way.
pub fn normalize(
    input: GalleryInput,
    format: ImageFormat,
    dir: &Path,
) -> LogResult<Vec<GalleryEntry>> {
    let pairs: Vec<(ImageRef, Option<String>)> = match input {
        GalleryInput::Images(images) => images.into_iter().map(|img| (img, None)).collect(),
        GalleryInput::Captioned(pairs) => pairs,
    };

    pairs
        .into_iter()
        .map(|(image, caption)| {
            let filename = materialize(image, format, dir)?;
            Ok(GalleryEntry {
                filename,
                caption: caption.unwrap_or_else(|| PLACEHOLDER_CAPTION.to_string()),
            })
        })
        .collect()
}

/// Render entries as a single `<gallery>` block, one `File:name|caption`
/// line per entry, in order.
pub fn render(entries: &[GalleryEntry]) -> String {
    let mut s = String::from("<gallery>\n");
    for entry in entries {
        s.push_str(&format!("File:{}|{}\n", entry.filename, entry.caption));
    }
    s.push_str("</gallery>\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ImageData;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_id_length_and_alphabet() {
        let id = generate_id(ID_LENGTH);
        assert_eq!(id.len(), 20);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_image_list_gets_placeholder_captions() {
        let dir = tempfile::tempdir().unwrap();
        let input = GalleryInput::Images(vec![
            ImageData::new(vec![1u8]).into(),
            ImageData::new(vec![2u8]).into(),
            ImageData::new(vec![3u8]).into(),
        ]);

        let entries = normalize(input, ImageFormat::Png, dir.path()).unwrap();
        assert_eq!(entries.len(), 3);
        for entry in &entries {
            assert_eq!(entry.caption, PLACEHOLDER_CAPTION);
            assert!(entry.filename.ends_with(".png"));
            assert!(dir.path().join(&entry.filename).exists());
        }

        // Distinct generated names.
        assert_ne!(entries[0].filename, entries[1].filename);
        assert_ne!(entries[1].filename, entries[2].filename);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_filename_mapping_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = GalleryInput::Captioned(vec![
            ("00.jpg".into(), Some("0th image".to_string())),
            ("01.jpg".into(), Some("1th image".to_string())),
        ]);

        let entries = normalize(input, ImageFormat::Jpg, dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                GalleryEntry {
                    filename: "00.jpg".to_string(),
                    caption: "0th image".to_string(),
                },
                GalleryEntry {
                    filename: "01.jpg".to_string(),
                    caption: "1th image".to_string(),
                },
            ]
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_captioned_in_memory_image_is_materialized() {
        let dir = tempfile::tempdir().unwrap();
        let input = GalleryInput::Captioned(vec![(
            ImageData::new(vec![0xFFu8, 0xD8]).into(),
            Some("a plot".to_string()),
        )]);

        let entries = normalize(input, ImageFormat::Jpg, dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].filename.ends_with(".jpg"));
        assert_eq!(entries[0].caption, "a plot");
        assert_eq!(
            std::fs::read(dir.path().join(&entries[0].filename)).unwrap(),
            vec![0xFFu8, 0xD8]
        );
    }

    #[test]
    fn test_none_caption_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let input = GalleryInput::Captioned(vec![("a.png".into(), None)]);
        let entries = normalize(input, ImageFormat::Png, dir.path()).unwrap();
        assert_eq!(entries[0].caption, PLACEHOLDER_CAPTION);
    }

    #[test]
    fn test_render_block_shape() {
        let entries = vec![
            GalleryEntry {
                filename: "a.png".to_string(),
                caption: "first".to_string(),
            },
            GalleryEntry {
                filename: "b.png".to_string(),
                caption: "second".to_string(),
            },
        ];
        assert_eq!(
            render(&entries),
            "<gallery>\nFile:a.png|first\nFile:b.png|second\n</gallery>\n"
        );
    }
}
