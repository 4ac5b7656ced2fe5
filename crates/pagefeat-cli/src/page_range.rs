use std::collections::BTreeSet;

/// Parse a page range string like "1,3-5" into sorted, deduplicated page
/// indices.
///
/// Pages are 1-based on both sides, matching the indices of `PAGE` records.
/// Returns an error for page 0, pages past `last_page`, reversed ranges and
/// malformed numbers.
pub fn parse_page_range(input: &str, last_page: usize) -> Result<Vec<usize>, String> {
    let mut pages = BTreeSet::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (start, end) = match part.split_once('-') {
            Some((start, end)) => (parse_page(start, last_page)?, parse_page(end, last_page)?),
            None => {
                let page = parse_page(part, last_page)?;
                (page, page)
            }
        };
        if start > end {
            return Err(format!("reversed page range: '{part}'"));
        }
        pages.extend(start..=end);
    }

    if pages.is_empty() {
        return Err(format!("empty page range: '{input}'"));
    }
    Ok(pages.into_iter().collect())
}

fn parse_page(text: &str, last_page: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    if page > last_page {
        return Err(format!(
            "page {page} exceeds document page count ({last_page})"
        ));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page() {
        assert_eq!(parse_page_range("1", 5).unwrap(), vec![1]);
        assert_eq!(parse_page_range("3", 5).unwrap(), vec![3]);
    }

    #[test]
    fn page_range() {
        assert_eq!(parse_page_range("2-4", 5).unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn mixed() {
        assert_eq!(
            parse_page_range("1-3,7,10-12", 12).unwrap(),
            vec![1, 2, 3, 7, 10, 11, 12]
        );
    }

    #[test]
    fn page_zero_invalid() {
        let err = parse_page_range("0", 5).unwrap_err();
        assert!(err.contains("invalid"));
    }

    #[test]
    fn page_exceeds_count() {
        let err = parse_page_range("2-6", 5).unwrap_err();
        assert!(err.contains("exceeds"));
    }

    #[test]
    fn reversed_range_invalid() {
        let err = parse_page_range("4-2", 5).unwrap_err();
        assert!(err.contains("reversed"));
    }

    #[test]
    fn malformed_number() {
        let err = parse_page_range("1,x", 5).unwrap_err();
        assert!(err.contains("'x'"));
    }

    #[test]
    fn empty_range_invalid() {
        assert!(parse_page_range(" , ", 5).is_err());
    }

    #[test]
    fn duplicates_removed_and_sorted() {
        assert_eq!(parse_page_range("3,1,1-2", 5).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn whitespace_tolerance() {
        assert_eq!(parse_page_range(" 1 , 3 - 5 ", 5).unwrap(), vec![1, 3, 4, 5]);
    }
}
