//! Photos picked for a report

use finders_core::ImageRef;

/// Ordered collection of local image references.
///
/// Each entry can be removed on its own; the picker may add several at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaAttachmentSet {
    images: Vec<ImageRef>,
}

impl MediaAttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, image: ImageRef) {
        self.images.push(image);
    }

    /// Append everything the image picker returned, in picker order
    pub fn extend<I>(&mut self, images: I)
    where
        I: IntoIterator<Item = ImageRef>,
    {
        self.images.extend(images);
    }

    pub fn remove(&mut self, index: usize) -> Option<ImageRef> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove_independently() {
        let mut set = MediaAttachmentSet::new();
        set.extend(["a.jpg", "b.jpg", "c.jpg"].map(ImageRef::new));
        assert_eq!(set.remove(1), Some(ImageRef::new("b.jpg")));
        assert_eq!(set.as_slice(), &[ImageRef::new("a.jpg"), ImageRef::new("c.jpg")]);
        assert_eq!(set.remove(7), None);
        assert_eq!(set.len(), 2);
    }
}
