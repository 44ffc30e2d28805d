//! Image galleries and their primary image.
//!
//! Entities with a gallery keep two fields: `images` (ordered) and `image_url`
//! (the primary image shown in lists). The first image **is** the primary image:
//! every operation here re-derives `image_url` from `images`, so the two can never
//! drift apart.

/// A record or draft carrying a gallery.
pub trait Gallery {
    /// Primary image and gallery, borrowed together.
    fn gallery_parts(&mut self) -> (&mut Option<String>, &mut Vec<String>);
}

fn sync(primary: &mut Option<String>, images: &[String]) {
    *primary = images.first().cloned();
}

/// Restores the invariant.
///
/// A row saved with a primary image but an empty gallery gets a one-image gallery;
/// otherwise the primary image is taken from the gallery.
pub fn normalize<G: Gallery + ?Sized>(gallery: &mut G) {
    let (primary, images) = gallery.gallery_parts();
    images.retain(|url| !url.trim().is_empty());
    if images.is_empty() {
        if let Some(url) = primary.take().filter(|url| !url.trim().is_empty()) {
            images.push(url);
        }
    }
    sync(primary, images);
}

/// Applies the gallery half of an update patch.
///
/// A new `images` list decides the primary image, so emptying it clears both
/// fields. A list emptied while `image_url` is set in the same patch becomes that
/// one image. A patch setting only `image_url` moves that image to the front, or
/// clears the gallery when it is `None`. A patch touching neither field only
/// restores the invariant.
pub fn patch<G: Gallery + ?Sized>(
    gallery: &mut G,
    image_url: Option<Option<String>>,
    new_images: Option<Vec<String>>,
) {
    let (primary, images) = gallery.gallery_parts();
    let url = image_url.map(|url| url.filter(|url| !url.trim().is_empty()));
    match (url, new_images) {
        (url, Some(list)) => {
            *images = list;
            images.retain(|u| !u.trim().is_empty());
            if images.is_empty() {
                if let Some(Some(url)) = url {
                    images.push(url);
                }
            }
            sync(primary, images);
        }
        (Some(Some(url)), None) => {
            images.retain(|u| *u != url);
            images.insert(0, url);
            sync(primary, images);
        }
        (Some(None), None) => {
            images.clear();
            sync(primary, images);
        }
        (None, None) => normalize(gallery),
    }
}

/// Appends an image. The first image added becomes the primary image.
pub fn add_image<G: Gallery + ?Sized>(gallery: &mut G, url: impl Into<String>) {
    let (primary, images) = gallery.gallery_parts();
    images.push(url.into());
    sync(primary, images);
}

/// Removes the image at `index`, returning it.
pub fn remove_image<G: Gallery + ?Sized>(gallery: &mut G, index: usize) -> Option<String> {
    let (primary, images) = gallery.gallery_parts();
    if index >= images.len() {
        return None;
    }
    let removed = images.remove(index);
    sync(primary, images);
    Some(removed)
}

/// Moves the image at `from` to position `to`.
pub fn move_image<G: Gallery + ?Sized>(gallery: &mut G, from: usize, to: usize) -> bool {
    let (primary, images) = gallery.gallery_parts();
    if from >= images.len() || to >= images.len() {
        return false;
    }
    let url = images.remove(from);
    images.insert(to, url);
    sync(primary, images);
    true
}

/// Makes the image at `index` the primary image by moving it to the front.
pub fn set_primary<G: Gallery + ?Sized>(gallery: &mut G, index: usize) -> bool {
    move_image(gallery, index, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Pics {
        image_url: Option<String>,
        images: Vec<String>,
    }

    impl Gallery for Pics {
        fn gallery_parts(&mut self) -> (&mut Option<String>, &mut Vec<String>) {
            (&mut self.image_url, &mut self.images)
        }
    }

    fn holds(p: &Pics) -> bool {
        p.image_url.as_ref() == p.images.first()
    }

    #[test]
    fn test_every_operation_keeps_primary_first() {
        let mut p = Pics::default();
        add_image(&mut p, "a.png");
        assert_eq!(p.image_url.as_deref(), Some("a.png"));
        add_image(&mut p, "b.png");
        add_image(&mut p, "c.png");
        assert!(holds(&p));

        assert!(set_primary(&mut p, 2));
        assert_eq!(p.images, vec!["c.png", "a.png", "b.png"]);
        assert_eq!(p.image_url.as_deref(), Some("c.png"));

        assert!(move_image(&mut p, 0, 2));
        assert_eq!(p.image_url.as_deref(), Some("a.png"));
        assert!(holds(&p));

        assert_eq!(remove_image(&mut p, 0).as_deref(), Some("a.png"));
        assert_eq!(p.image_url.as_deref(), Some("b.png"));

        remove_image(&mut p, 0);
        remove_image(&mut p, 0);
        assert!(p.images.is_empty());
        assert_eq!(p.image_url, None);
    }

    #[test]
    fn test_out_of_range_is_a_no_op() {
        let mut p = Pics::default();
        add_image(&mut p, "a.png");
        assert_eq!(remove_image(&mut p, 5), None);
        assert!(!move_image(&mut p, 0, 3));
        assert!(!set_primary(&mut p, 1));
        assert!(holds(&p));
    }

    fn two() -> Pics {
        Pics {
            image_url: Some("a.png".into()),
            images: vec!["a.png".into(), "b.png".into()],
        }
    }

    #[test]
    fn test_patch_emptying_the_gallery_clears_the_primary() {
        let mut p = two();
        patch(&mut p, None, Some(Vec::new()));
        assert!(p.images.is_empty());
        assert_eq!(p.image_url, None);
    }

    #[test]
    fn test_patch_follows_the_patched_fields() {
        let mut reordered = two();
        patch(&mut reordered, None, Some(vec!["b.png".into(), "a.png".into()]));
        assert_eq!(reordered.image_url.as_deref(), Some("b.png"));

        let mut promoted = two();
        patch(&mut promoted, Some(Some("b.png".into())), None);
        assert_eq!(promoted.images, vec!["b.png", "a.png"]);
        assert!(holds(&promoted));

        let mut fresh = two();
        patch(&mut fresh, Some(Some("c.png".into())), None);
        assert_eq!(fresh.images, vec!["c.png", "a.png", "b.png"]);

        let mut cleared = two();
        patch(&mut cleared, Some(None), None);
        assert!(cleared.images.is_empty());
        assert_eq!(cleared.image_url, None);

        let mut single = two();
        patch(&mut single, Some(Some("logo.png".into())), Some(Vec::new()));
        assert_eq!(single.images, vec!["logo.png"]);
        assert!(holds(&single));

        let mut untouched = two();
        patch(&mut untouched, None, None);
        assert_eq!(untouched.images, vec!["a.png", "b.png"]);
        assert!(holds(&untouched));
    }

    #[test]
    fn test_normalize_seeds_gallery_from_legacy_primary() {
        let mut legacy = Pics {
            image_url: Some("main.png".into()),
            images: Vec::new(),
        };
        normalize(&mut legacy);
        assert_eq!(legacy.images, vec!["main.png"]);
        assert!(holds(&legacy));

        let mut stale = Pics {
            image_url: Some("old.png".into()),
            images: vec!["".into(), "new.png".into()],
        };
        normalize(&mut stale);
        assert_eq!(stale.images, vec!["new.png"]);
        assert_eq!(stale.image_url.as_deref(), Some("new.png"));

        let mut blank = Pics {
            image_url: Some(" ".into()),
            images: Vec::new(),
        };
        normalize(&mut blank);
        assert_eq!(blank.image_url, None);
    }
}
