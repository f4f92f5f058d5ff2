//! core/selection.rs
//!
//! Index expressions typed by the user to pick files from a numbered list:
//! - "all"           -> every index
//! - "1,3,5"         -> single numbers
//! - "2-4"           -> inclusive range
//! - "1-3, 5"        -> any mix
//!
//! Indices are 1-based. The result is de-duplicated and ascending, whatever
//! order the user typed them in.

use std::collections::BTreeSet;

use super::error::SelectionError;

pub fn parse_selection(input: &str, count: usize) -> Result<Vec<usize>, SelectionError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") {
        return Ok((1..=count).collect());
    }

    let malformed = || SelectionError::Malformed(input.to_string());
    let mut picked: BTreeSet<usize> = BTreeSet::new();

    for part in input.split(',') {
        let part = part.trim();
        match part.split_once('-') {
            Some((start, end)) => {
                let start: usize = start.trim().parse().map_err(|_| malformed())?;
                let end: usize = end.trim().parse().map_err(|_| malformed())?;
                // bounds first: the span is only materialised once it fits in the list
                if start <= end && (start == 0 || end > count) {
                    return Err(SelectionError::OutOfRange { count });
                }
                picked.extend(start..=end);
            }
            None => {
                picked.insert(part.parse().map_err(|_| malformed())?);
            }
        }
    }

    if picked.iter().any(|&i| i == 0 || i > count) {
        return Err(SelectionError::OutOfRange { count });
    }
    if picked.is_empty() {
        return Err(SelectionError::Empty);
    }

    Ok(picked.into_iter().collect())
}

/// Map 1-based indices back onto the displayed list.
pub fn pick<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices
        .iter()
        .filter_map(|&i| i.checked_sub(1).and_then(|i| items.get(i)).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singles_ranges_and_mixes() {
        assert_eq!(parse_selection("1,3,5", 5), Ok(vec![1, 3, 5]));
        assert_eq!(parse_selection("2-4", 5), Ok(vec![2, 3, 4]));
        assert_eq!(parse_selection("1-3,5", 5), Ok(vec![1, 2, 3, 5]));
        assert_eq!(parse_selection(" 1 - 2 , 4 ", 5), Ok(vec![1, 2, 4]));
    }

    #[test]
    fn all_is_case_insensitive() {
        assert_eq!(parse_selection("ALL", 3), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn duplicates_collapse_and_order_is_ascending() {
        assert_eq!(parse_selection("5,1,3-5,1", 5), Ok(vec![1, 3, 4, 5]));
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(
            parse_selection("9", 5),
            Err(SelectionError::OutOfRange { count: 5 })
        );
        assert_eq!(
            parse_selection("0", 5),
            Err(SelectionError::OutOfRange { count: 5 })
        );
        assert_eq!(
            parse_selection("4-6", 5),
            Err(SelectionError::OutOfRange { count: 5 })
        );
    }

    #[test]
    fn huge_range_is_rejected_without_expanding() {
        assert_eq!(
            parse_selection(&format!("1-{}", usize::MAX), 5),
            Err(SelectionError::OutOfRange { count: 5 })
        );
        assert_eq!(
            parse_selection("2,1-100000000", 5),
            Err(SelectionError::OutOfRange { count: 5 })
        );
        assert_eq!(
            parse_selection("0-3", 5),
            Err(SelectionError::OutOfRange { count: 5 })
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(parse_selection("one", 5), Err(SelectionError::Malformed(_))));
        assert!(matches!(parse_selection("1,,2", 5), Err(SelectionError::Malformed(_))));
        assert!(matches!(parse_selection("1-2-3", 5), Err(SelectionError::Malformed(_))));
        assert!(matches!(parse_selection("", 5), Err(SelectionError::Malformed(_))));
    }

    #[test]
    fn reversed_range_selects_nothing() {
        assert_eq!(parse_selection("4-2", 5), Err(SelectionError::Empty));
    }

    #[test]
    fn pick_maps_indices_to_items() {
        let files = ["a", "b", "c", "d"];
        assert_eq!(pick(&files, &[1, 3]), vec!["a", "c"]);
    }
}
