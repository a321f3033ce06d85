//! Zero-based page slicing

use crate::error::QueryError;

/// Rows per page when the caller does not choose
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Return page `page_index` of `records`
///
/// Pages past the end are empty. A negative index or a zero page size is a
/// caller defect and is rejected rather than clamped.
pub fn apply_pagination<T: Clone>(
    records: &[T],
    page_index: i64,
    page_size: usize,
) -> Result<Vec<T>, QueryError> {
    let index = usize::try_from(page_index).map_err(|_| QueryError::NegativePage(page_index))?;
    if page_size == 0 {
        return Err(QueryError::ZeroPageSize);
    }

    let start = index.saturating_mul(page_size);
    if start >= records.len() {
        return Ok(Vec::new());
    }
    let end = start.saturating_add(page_size).min(records.len());

    Ok(records[start..end].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let rows: Vec<u32> = (0..25).collect();
        assert_eq!(
            apply_pagination(&rows, 0, DEFAULT_PAGE_SIZE).unwrap(),
            (0..10).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_remainder_then_empty() {
        let rows = vec!["a", "b", "c", "d", "e"];
        assert_eq!(apply_pagination(&rows, 2, 2).unwrap(), vec!["e"]);
        assert!(apply_pagination(&rows, 3, 2).unwrap().is_empty());
    }

    #[test]
    fn test_far_past_end_is_empty() {
        let rows = vec![1, 2, 3];
        assert!(apply_pagination(&rows, i64::MAX, 10).unwrap().is_empty());
        assert!(apply_pagination::<u8>(&[], 0, 10).unwrap().is_empty());
    }

    #[test]
    fn test_negative_page_rejected() {
        let rows = vec![1, 2, 3];
        assert_eq!(
            apply_pagination(&rows, -1, 10),
            Err(QueryError::NegativePage(-1))
        );
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let rows = vec![1, 2, 3];
        assert_eq!(apply_pagination(&rows, 0, 0), Err(QueryError::ZeroPageSize));
    }
}
