//! HTTP Range request parsing module
//!
//! Range header parsing for resumable downloads, compliant with RFC 7233.
//! Parsing is independent of any file; a parsed range is resolved against a
//! concrete size only when the responder knows it.

/// Byte range as sent by the client, before resolution against a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// `bytes=start-` or `bytes=start-end` (end inclusive)
    Span { start: u64, end: Option<u64> },
    /// `bytes=-n`, the last n bytes
    Suffix(u64),
}

/// Range resolved against a concrete file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeResolution {
    /// Serve bytes `start..=end`, both within the file
    Satisfiable { start: u64, end: u64 },
    /// No byte of the requested range exists - should return 416
    Unsatisfiable,
}

impl ByteRange {
    /// Parse an HTTP Range header value (single range only, bytes unit)
    ///
    /// Supported formats:
    /// - `bytes=start-end` - Specific range
    /// - `bytes=start-` - From start to end of file
    /// - `bytes=-suffix` - Last suffix bytes
    ///
    /// Returns `None` for a missing unit, multi-range sets, or anything
    /// malformed; the caller serves the full content in that case.
    ///
    /// # Examples
    /// ```
    /// use staticd::http::range::ByteRange;
    ///
    /// assert_eq!(
    ///     ByteRange::parse("bytes=0-99"),
    ///     Some(ByteRange::Span { start: 0, end: Some(99) })
    /// );
    /// assert_eq!(ByteRange::parse("items=0-99"), None);
    /// ```
    pub fn parse(header: &str) -> Option<Self> {
        let header = header.strip_prefix("bytes=")?;

        // Only support single range (not multi-range)
        if header.contains(',') {
            return None;
        }

        let (start_str, end_str) = header.split_once('-')?;
        let (start_str, end_str) = (start_str.trim(), end_str.trim());

        if start_str.is_empty() {
            return end_str.parse().ok().map(Self::Suffix);
        }

        let start = start_str.parse().ok()?;
        let end = if end_str.is_empty() {
            None
        } else {
            Some(end_str.parse().ok()?)
        };

        // An inverted span never identifies any byte
        if let Some(e) = end {
            if start > e {
                return None;
            }
        }

        Some(Self::Span { start, end })
    }

    /// Resolve the range against a file size, clamping the end
    ///
    /// Policy: a start at or past the file size is unsatisfiable, while an
    /// end past the last byte is clamped to it. A suffix longer than the
    /// file covers the whole file; a zero suffix and any range against an
    /// empty file are unsatisfiable.
    pub fn resolve(&self, size: u64) -> RangeResolution {
        match *self {
            Self::Span { start, end } => {
                if start >= size {
                    return RangeResolution::Unsatisfiable;
                }
                RangeResolution::Satisfiable {
                    start,
                    end: end.map_or(size - 1, |e| e.min(size - 1)),
                }
            }
            Self::Suffix(n) => {
                if n == 0 || size == 0 {
                    return RangeResolution::Unsatisfiable;
                }
                RangeResolution::Satisfiable {
                    start: size.saturating_sub(n),
                    end: size - 1,
                }
            }
        }
    }
}

impl RangeResolution {
    /// Number of bytes covered by a satisfiable range
    pub const fn len(&self) -> u64 {
        match *self {
            Self::Satisfiable { start, end } => end - start + 1,
            Self::Unsatisfiable => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_range() {
        let range = ByteRange::parse("bytes=0-9").unwrap();
        assert_eq!(
            range,
            ByteRange::Span {
                start: 0,
                end: Some(9)
            }
        );
        assert_eq!(
            range.resolve(100),
            RangeResolution::Satisfiable { start: 0, end: 9 }
        );
        assert_eq!(range.resolve(100).len(), 10);
    }

    #[test]
    fn test_open_range() {
        let range = ByteRange::parse("bytes=50-").unwrap();
        assert_eq!(range, ByteRange::Span { start: 50, end: None });
        assert_eq!(
            range.resolve(100),
            RangeResolution::Satisfiable { start: 50, end: 99 }
        );
    }

    #[test]
    fn test_suffix_range() {
        let range = ByteRange::parse("bytes=-20").unwrap();
        assert_eq!(range, ByteRange::Suffix(20));
        assert_eq!(
            range.resolve(100),
            RangeResolution::Satisfiable { start: 80, end: 99 }
        );
        // Suffix larger than the file covers the whole file
        assert_eq!(
            range.resolve(5),
            RangeResolution::Satisfiable { start: 0, end: 4 }
        );
    }

    #[test]
    fn test_end_clamped_to_file_size() {
        let range = ByteRange::parse("bytes=10-9999").unwrap();
        assert_eq!(
            range.resolve(100),
            RangeResolution::Satisfiable { start: 10, end: 99 }
        );
    }

    #[test]
    fn test_not_satisfiable() {
        assert_eq!(
            ByteRange::parse("bytes=200-").unwrap().resolve(100),
            RangeResolution::Unsatisfiable
        );
        assert_eq!(
            ByteRange::parse("bytes=100-").unwrap().resolve(100),
            RangeResolution::Unsatisfiable
        );
        assert_eq!(
            ByteRange::parse("bytes=-0").unwrap().resolve(100),
            RangeResolution::Unsatisfiable
        );
        // Any range against an empty file
        assert_eq!(
            ByteRange::parse("bytes=0-").unwrap().resolve(0),
            RangeResolution::Unsatisfiable
        );
    }

    #[test]
    fn test_invalid_format() {
        assert!(ByteRange::parse("bytes=a-b").is_none());
        assert!(ByteRange::parse("bytes=0-9,20-29").is_none());
        assert!(ByteRange::parse("bytes=9-0").is_none());
        assert!(ByteRange::parse("items=0-9").is_none());
        assert!(ByteRange::parse("bytes=").is_none());
    }
}
