use url::form_urlencoded;

/// Percent-encode one path segment. Spaces become `%20` and every reserved
/// character, `/` included, is escaped.
pub fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}

/// Join `segments` into an absolute path, encoding each one.
///
/// `encode_path(["song", "Who Do You Love?"])` is `/song/Who%20Do%20You%20Love%3F`.
pub fn encode_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments.into_iter().fold(String::new(), |mut path, segment| {
        path.push('/');
        path.push_str(&encode_segment(segment));
        path
    })
}
