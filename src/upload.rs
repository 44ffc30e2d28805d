//! Object keys for uploaded images.

use uuid::Uuid;

/// Extension used when the uploaded file name has none.
const FALLBACK_EXTENSION: &str = "bin";

/// Key of a freshly uploaded file: `{table}/{uuid}.{ext}`.
///
/// The original file name only contributes its (lowercased) extension, so two
/// uploads of `photo.JPG` never collide and user-supplied names never reach the
/// bucket.
pub fn object_key(table: &str, file_name: &str) -> String {
    format!("{table}/{}.{}", Uuid::new_v4(), extension(file_name))
}

fn extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.to_ascii_lowercase()))
        .filter(|(stem, ext)| {
            !stem.is_empty() && !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|(_, ext)| ext)
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let key = object_key("concerts", "Affiche Été.JPG");
        let (table, name) = key.split_once('/').unwrap();
        assert_eq!(table, "concerts");
        let (id, ext) = name.split_once('.').unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(ext, "jpg");

        assert_ne!(object_key("concerts", "a.png"), object_key("concerts", "a.png"));
    }

    #[test]
    fn test_odd_names_fall_back() {
        assert_eq!(extension("README"), "bin");
        assert_eq!(extension(".png"), "bin");
        assert_eq!(extension("archive."), "bin");
        assert_eq!(extension("x.p/ng"), "bin");
        assert_eq!(extension("photo.webp"), "webp");
    }
}
