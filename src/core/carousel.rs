//! Cyclic cursor over a fixed, non-empty list of slides.
//!
//! [`Carousel`] owns its items and a single `active` index.  Every
//! navigation method wraps with modulo arithmetic, so once construction
//! succeeds the index is valid by construction and navigation cannot fail.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Contract violations surfaced by [`Carousel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// Navigation is undefined over zero slides.
    #[error("carousel requires at least one item")]
    InvalidInput,
    /// Direct selection outside `[0, len)`.
    #[error("index {index} out of range for carousel of {len} items")]
    OutOfRange { index: usize, len: usize },
}

/// One slide: what it is, and where selecting it leads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CarouselItem {
    pub title: String,
    pub description: String,
    pub link: Url,
}

impl AsRef<CarouselItem> for CarouselItem {
    fn as_ref(&self) -> &CarouselItem {
        self
    }
}

/// Bounded wraparound cursor over `items`.
///
/// Invariant: `items` is non-empty and `active < items.len()`.
#[derive(Debug, Clone)]
pub struct Carousel<T = CarouselItem> {
    items: Vec<T>,
    active: usize,
}

impl<T> Carousel<T> {
    /// Build a carousel positioned on the first item.
    pub fn new(items: Vec<T>) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::InvalidInput);
        }
        Ok(Self { items, active: 0 })
    }

    /// Advance one slide, wrapping from the last back to the first.
    pub fn next(&mut self) -> usize {
        self.active = (self.active + 1) % self.items.len();
        self.active
    }

    /// Step back one slide, wrapping from the first to the last.
    pub fn previous(&mut self) -> usize {
        let len = self.items.len();
        self.active = (self.active + len - 1) % len;
        self.active
    }

    /// Jump straight to `index`.  Leaves the cursor untouched on error.
    pub fn go_to(&mut self, index: usize) -> Result<(), CarouselError> {
        if index >= self.items.len() {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.active = index;
        Ok(())
    }

    pub fn current(&self) -> &T {
        &self.items[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false` once constructed; kept alongside [`Carousel::len`].
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abc() -> Carousel<&'static str> {
        Carousel::new(vec!["A", "B", "C"]).unwrap()
    }

    #[test]
    fn empty_list_is_invalid_input() {
        let err = Carousel::<u8>::new(Vec::new()).unwrap_err();
        assert_eq!(err, CarouselError::InvalidInput);
    }

    #[test]
    fn starts_on_first_item() {
        let c = abc();
        assert!(!c.is_empty());
        assert_eq!(c.active_index(), 0);
        assert_eq!(*c.current(), "A");
    }

    #[test]
    fn previous_then_next_walkthrough() {
        let mut c = abc();
        assert_eq!(c.previous(), 2);
        assert_eq!(*c.current(), "C");
        assert_eq!(c.next(), 0);
        assert_eq!(*c.current(), "A");
        assert_eq!(c.next(), 1);
        assert_eq!(*c.current(), "B");
    }

    #[test]
    fn single_item_wraps_onto_itself() {
        let mut c = Carousel::new(vec!["only"]).unwrap();
        assert_eq!(c.next(), 0);
        assert_eq!(c.previous(), 0);
    }

    #[test]
    fn go_to_out_of_range_leaves_cursor() {
        let mut c = abc();
        c.next();
        let err = c.go_to(3).unwrap_err();
        assert_eq!(err, CarouselError::OutOfRange { index: 3, len: 3 });
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn go_to_in_range_moves_cursor() {
        let mut c = abc();
        c.go_to(2).unwrap();
        assert_eq!(*c.current(), "C");
    }

    proptest! {
        #[test]
        fn n_nexts_return_to_start(len in 1usize..64, start in 0usize..64) {
            let mut c = Carousel::new((0..len).collect::<Vec<_>>()).unwrap();
            c.go_to(start % len).unwrap();
            let origin = c.active_index();
            for _ in 0..len {
                c.next();
            }
            prop_assert_eq!(c.active_index(), origin);
        }

        #[test]
        fn previous_undoes_next(len in 1usize..64, start in 0usize..64) {
            let mut c = Carousel::new((0..len).collect::<Vec<_>>()).unwrap();
            c.go_to(start % len).unwrap();
            let origin = c.active_index();
            c.next();
            c.previous();
            prop_assert_eq!(c.active_index(), origin);
        }

        #[test]
        fn go_to_succeeds_iff_in_range(len in 1usize..32, index in 0usize..64) {
            let mut c = Carousel::new((0..len).collect::<Vec<_>>()).unwrap();
            let result = c.go_to(index);
            prop_assert_eq!(result.is_ok(), index < len);
            if result.is_err() {
                prop_assert_eq!(c.active_index(), 0);
            }
        }
    }
}
