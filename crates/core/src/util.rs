use std::collections::HashMap;

use url::Url;

pub trait UrlExt {
    fn with_segments<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;
}

impl UrlExt for Url {
    /// Append path segments, percent-encoding each one. A trailing slash on the
    /// base is not kept as an empty segment.
    #[inline]
    fn with_segments<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = self.clone();
        if let Ok(mut path) = out.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        out
    }
}

/// Decode a raw query string, keeping blank values. For repeated keys the first
/// value wins.
pub fn query_map(query: Option<&str>) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for (k, v) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        out.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    out
}
