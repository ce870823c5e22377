use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters gets encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encode a single path segment so reserved characters cannot alter the route.
///
/// # Example
/// ```rust
/// use torque_util::path::encode_path_segment;
///
/// assert_eq!(encode_path_segment("aws_instance.web_1"), "aws_instance.web_1");
/// assert_eq!(encode_path_segment("parent/child"), "parent%2Fchild");
/// assert_eq!(encode_path_segment("03 Live?"), "03%20Live%3F");
/// ```
pub fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Join a base URL and raw segments, encoding each segment.
///
/// Trailing slashes on `base` are ignored.
pub fn join_encoded_path(base: &str, segments: &[&str]) -> String {
    let mut joined = base.trim_end_matches('/').to_string();
    for segment in segments {
        joined.push('/');
        joined.push_str(&encode_path_segment(segment));
    }
    joined
}
