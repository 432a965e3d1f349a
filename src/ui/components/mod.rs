pub mod number_input;
pub mod popup;

/// Index after `current` in a list of `len` items, wrapping to the top
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

/// Index before `current`, wrapping to the bottom
pub fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i > 0 && i < len => i - 1,
        Some(_) => len - 1,
        None => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        assert_eq!(next_index(Some(2), 3), Some(0));
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(previous_index(Some(0), 3), Some(2));
        assert_eq!(previous_index(Some(1), 3), Some(0));
        assert_eq!(next_index(Some(0), 0), None);
        assert_eq!(previous_index(None, 0), None);
    }
}
