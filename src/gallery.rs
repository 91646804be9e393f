//! Gallery: append-only list of images.

use serde_json::Map;

use crate::config::{image_path, Config};
use crate::error::Result;
use crate::models::{next_id, GalleryImage};
use crate::store;

/// Operator input for a new gallery image.
#[derive(Debug, Clone, Default)]
pub struct NewImage {
    /// Bare file name inside the images directory.
    pub file_name: String,
    pub photographer: String,
    pub alt: String,
}

/// Append an image with the next free id and persist the gallery.
pub fn add_image(config: &Config, input: NewImage) -> Result<GalleryImage> {
    let mut gallery: Vec<GalleryImage> = store::load(&config.gallery)?;
    let image = GalleryImage {
        id: next_id(gallery.iter().map(|img| img.id)),
        alt: input.alt,
        src: image_path(&input.file_name),
        photographer: input.photographer,
        extra: Map::new(),
    };
    gallery.push(image.clone());
    store::save(&config.gallery, &gallery)?;
    tracing::info!(id = image.id, "added gallery image");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_image_in_empty_gallery_gets_id_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        std::fs::write(&config.gallery, "[]").unwrap();

        let image = add_image(
            &config,
            NewImage {
                file_name: "sunset.jpg".into(),
                photographer: "Asha".into(),
                alt: "Sunset over the lake".into(),
            },
        )
        .unwrap();

        assert_eq!(image.id, 1);
        assert_eq!(image.src, "/images/sunset.jpg");
    }

    #[test]
    fn new_image_is_appended_after_highest_id() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        let existing = json!([
            {"id": 4, "alt": "a", "src": "/images/a.jpg", "photographer": "p"},
            {"id": 2, "alt": "b", "src": "/images/b.jpg", "photographer": "q"}
        ]);
        std::fs::write(&config.gallery, existing.to_string()).unwrap();

        add_image(&config, NewImage { file_name: "c.jpg".into(), ..Default::default() }).unwrap();

        let gallery: Vec<GalleryImage> = store::load(&config.gallery).unwrap();
        assert_eq!(gallery.len(), 3);
        assert_eq!(gallery.last().map(|img| img.id), Some(5));
    }
}
