use http::{HeaderName, HeaderValue};

/// An extension header as a name-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: HeaderName,
    pub value: HeaderValue,
}

impl Header {
    pub fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }
}

/// Extension headers not otherwise modelled, keyed by header name.
///
/// Names compare case-insensitively (`HeaderName` is normalized to
/// lowercase). Each name holds one value: inserting an existing name
/// overwrites it, so building from a sequence of pairs is last-write-wins.
/// Entries keep the position of their first insertion for rendering, but
/// equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct HeaderFields {
    entries: Vec<Header>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or overwrite. Returns the previous value for `name`, if any.
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) -> Option<HeaderValue> {
        match self.entries.iter_mut().find(|h| h.name == name) {
            Some(existing) => Some(std::mem::replace(&mut existing.value, value)),
            None => {
                self.entries.push(Header::new(name, value));
                None
            }
        }
    }

    /// Get the value stored for `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|h| h.name.as_str().eq_ignore_ascii_case(name))
            .map(|h| &h.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Header> {
        self.entries
    }
}

impl PartialEq for HeaderFields {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|h| other.get(h.name.as_str()) == Some(&h.value))
    }
}

impl Eq for HeaderFields {}

impl FromIterator<Header> for HeaderFields {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        let mut fields = HeaderFields::new();
        for header in iter {
            fields.insert(header.name, header.value);
        }
        fields
    }
}

impl FromIterator<(HeaderName, HeaderValue)> for HeaderFields {
    fn from_iter<I: IntoIterator<Item = (HeaderName, HeaderValue)>>(iter: I) -> Self {
        iter.into_iter().map(|(n, v)| Header::new(n, v)).collect()
    }
}

impl From<Vec<(HeaderName, HeaderValue)>> for HeaderFields {
    fn from(pairs: Vec<(HeaderName, HeaderValue)>) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> HeaderName {
        HeaderName::from_bytes(s.as_bytes()).unwrap()
    }

    #[test]
    fn header_new() {
        let h = Header::new(name("X-Trace"), HeaderValue::from_static("abc"));
        assert_eq!(h.name.as_str(), "x-trace");
        assert_eq!(h.value, "abc");
    }

    #[test]
    fn insert_and_get_case_insensitive() {
        let mut fields = HeaderFields::new();
        fields.insert(name("X-Request-Id"), HeaderValue::from_static("1"));
        assert_eq!(fields.get("x-request-id").unwrap(), "1");
        assert_eq!(fields.get("X-REQUEST-ID").unwrap(), "1");
        assert!(fields.contains("X-Request-Id"));
    }

    #[test]
    fn get_missing() {
        let fields = HeaderFields::new();
        assert_eq!(fields.get("X-Missing"), None);
    }

    #[test]
    fn last_write_wins_across_case() {
        let fields: HeaderFields = vec![
            (name("X-Mode"), HeaderValue::from_static("a")),
            (name("x-other"), HeaderValue::from_static("o")),
            (name("X-MODE"), HeaderValue::from_static("b")),
        ]
        .into();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("x-mode").unwrap(), "b");
    }

    #[test]
    fn insert_returns_previous() {
        let mut fields = HeaderFields::new();
        assert!(fields.insert(name("a"), HeaderValue::from_static("1")).is_none());
        let prev = fields.insert(name("A"), HeaderValue::from_static("2"));
        assert_eq!(prev.unwrap(), "1");
    }

    #[test]
    fn equality_ignores_order() {
        let left: HeaderFields = vec![
            (name("a"), HeaderValue::from_static("1")),
            (name("b"), HeaderValue::from_static("2")),
        ]
        .into();
        let right: HeaderFields = vec![
            (name("B"), HeaderValue::from_static("2")),
            (name("A"), HeaderValue::from_static("1")),
        ]
        .into();
        assert_eq!(left, right);

        let different: HeaderFields = vec![(name("a"), HeaderValue::from_static("1"))].into();
        assert_ne!(left, different);
    }

    #[test]
    fn into_vec_keeps_first_insertion_position() {
        let fields: HeaderFields = vec![
            (name("a"), HeaderValue::from_static("1")),
            (name("b"), HeaderValue::from_static("2")),
            (name("a"), HeaderValue::from_static("3")),
        ]
        .into();

        let vec = fields.into_vec();
        assert_eq!(vec.len(), 2);
        assert_eq!(vec[0].name.as_str(), "a");
        assert_eq!(vec[0].value, "3");
        assert_eq!(vec[1].name.as_str(), "b");
    }
}
