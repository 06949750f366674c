use std::num::NonZeroU32;

/// Number of questions shown per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Slice one page out of an ordered sequence.
///
/// Pages are 1-indexed. Asking for a page past the end yields an empty slice
/// rather than an error, and a `page_size` of zero always yields an empty page.
///
/// # Examples
///
/// ```
/// # use std::num::NonZeroU32;
/// # use trivia_core::pagination::paginate;
/// let items: Vec<u32> = (1..=23).collect();
/// let third = paginate(&items, NonZeroU32::new(3).unwrap(), 10);
/// assert_eq!(third, &[21, 22, 23]);
/// assert!(paginate(&items, NonZeroU32::new(4).unwrap(), 10).is_empty());
/// ```
#[must_use]
pub fn paginate<T>(items: &[T], page: NonZeroU32, page_size: usize) -> &[T] {
    let index = usize::try_from(page.get() - 1).unwrap_or(usize::MAX);
    let Some(start) = index.checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn twenty_three_items_split_ten_ten_three() {
        let items: Vec<u32> = (0..23).collect();
        let counts: Vec<usize> = (1..=4)
            .map(|n| paginate(&items, page(n), QUESTIONS_PER_PAGE).len())
            .collect();
        assert_eq!(counts, vec![10, 10, 3, 0]);
    }

    #[test]
    fn page_length_matches_remaining_items() {
        for len in [0_usize, 1, 9, 10, 11, 20, 37] {
            let items: Vec<usize> = (0..len).collect();
            for n in 1..=6_u32 {
                let offset = (n as usize - 1) * QUESTIONS_PER_PAGE;
                let expected = QUESTIONS_PER_PAGE.min(len.saturating_sub(offset));
                assert_eq!(
                    paginate(&items, page(n), QUESTIONS_PER_PAGE).len(),
                    expected,
                    "len={len} page={n}"
                );
            }
        }
    }

    #[test]
    fn preserves_input_order() {
        let items = ["c", "a", "b", "d"];
        assert_eq!(paginate(&items, page(1), 3), &["c", "a", "b"]);
        assert_eq!(paginate(&items, page(2), 3), &["d"]);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let items = [1, 2, 3];
        assert!(paginate(&items, page(u32::MAX), usize::MAX).is_empty());
    }

    #[test]
    fn zero_page_size_is_always_empty() {
        let items = [1, 2, 3];
        assert!(paginate(&items, page(1), 0).is_empty());
    }
}
