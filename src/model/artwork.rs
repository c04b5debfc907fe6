//! Artwork candidates and the selection state machine.

use std::fmt;
use std::io::Cursor;

use image::ImageReader;

/// One downloadable image offered as cover art.
#[derive(Clone, PartialEq, Eq)]
pub struct ArtworkCandidate {
    /// Where the image came from ("MusicBrainz", "iTunes", ...)
    pub source_label: String,
    pub image_bytes: Vec<u8>,
    /// Width and height read from the image header
    pub dimensions: Option<(u32, u32)>,
}

impl ArtworkCandidate {
    /// Build a candidate, probing the image header for its size.
    ///
    /// Returns `None` when the bytes are empty or not a recognizable image.
    pub fn decode(source_label: impl Into<String>, image_bytes: Vec<u8>) -> Option<Self> {
        if image_bytes.is_empty() {
            return None;
        }
        let dimensions = probe_dimensions(&image_bytes)?;
        Some(Self {
            source_label: source_label.into(),
            image_bytes,
            dimensions: Some(dimensions),
        })
    }

    /// Human readable size, e.g. "600×600".
    pub fn dimensions_label(&self) -> String {
        match self.dimensions {
            Some((w, h)) => format!("{w}×{h}"),
            None => "unknown size".to_string(),
        }
    }
}

// Image bytes are noise in debug output
impl fmt::Debug for ArtworkCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtworkCandidate")
            .field("source_label", &self.source_label)
            .field("bytes", &self.image_bytes.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Which candidate, if any, will be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoneSelected,
    Selected(usize),
}

/// Append-only, arrival-ordered set of artwork candidates.
///
/// The first arrival is selected automatically. Once something is selected
/// the set never returns to [`Selection::NoneSelected`].
#[derive(Debug, Clone, Default)]
pub struct ArtworkSet {
    candidates: Vec<ArtworkCandidate>,
    selection: Selection,
}

impl ArtworkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate, returning its index.
    pub fn push(&mut self, candidate: ArtworkCandidate) -> usize {
        self.candidates.push(candidate);
        if self.selection == Selection::NoneSelected {
            self.selection = Selection::Selected(0);
        }
        self.candidates.len() - 1
    }

    /// Select the candidate at `index`. Out-of-range picks are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.candidates.len() {
            self.selection = Selection::Selected(index);
            true
        } else {
            false
        }
    }

    /// Move the selection by `delta`, wrapping around.
    pub fn cycle(&mut self, delta: isize) {
        let len = self.candidates.len();
        if let Selection::Selected(current) = self.selection
            && len > 0
        {
            let next = (current as isize + delta).rem_euclid(len as isize) as usize;
            self.selection = Selection::Selected(next);
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<&ArtworkCandidate> {
        match self.selection {
            Selection::Selected(i) => self.candidates.get(i),
            Selection::NoneSelected => None,
        }
    }

    pub fn candidates(&self) -> &[ArtworkCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::png_bytes;

    fn candidate(label: &str) -> ArtworkCandidate {
        ArtworkCandidate::decode(label, png_bytes(4, 3)).expect("valid png")
    }

    #[test]
    fn test_empty_set_has_no_selection() {
        let set = ArtworkSet::new();
        assert!(set.is_empty());
        assert_eq!(set.selection(), Selection::NoneSelected);
        assert!(set.selected().is_none());
    }

    #[test]
    fn test_first_arrival_is_auto_selected() {
        let mut set = ArtworkSet::new();
        set.push(candidate("iTunes"));
        set.push(candidate("MusicBrainz"));
        assert_eq!(set.selection(), Selection::Selected(0));
        assert_eq!(set.selected().unwrap().source_label, "iTunes");
    }

    #[test]
    fn test_explicit_pick_and_invalid_pick() {
        let mut set = ArtworkSet::new();
        set.push(candidate("a"));
        set.push(candidate("b"));
        assert!(set.select(1));
        assert_eq!(set.selected().unwrap().source_label, "b");
        assert!(!set.select(5));
        assert_eq!(set.selection(), Selection::Selected(1));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut set = ArtworkSet::new();
        set.push(candidate("a"));
        set.push(candidate("b"));
        set.push(candidate("c"));
        set.cycle(-1);
        assert_eq!(set.selection(), Selection::Selected(2));
        set.cycle(1);
        assert_eq!(set.selection(), Selection::Selected(0));
    }

    #[test]
    fn test_decode_reads_dimensions() {
        let c = candidate("x");
        assert_eq!(c.dimensions, Some((4, 3)));
        assert_eq!(c.dimensions_label(), "4×3");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(ArtworkCandidate::decode("x", vec![]).is_none());
        assert!(ArtworkCandidate::decode("x", b"<html>not found</html>".to_vec()).is_none());
    }
}
