//! Request parameters passed to an API method

use url::form_urlencoded;

/// Ordered key/value parameters of one API call.
///
/// Keys keep their insertion order so the encoded body is stable, which
/// matters for request signing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiParams {
    pairs: Vec<(String, String)>,
}

impl ApiParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing a previous value for the same key
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Set `key` only when a value is present
    pub fn with_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-urlencoded body
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Form-urlencoded body with the nonce as first field
    pub(crate) fn encode_with_nonce(&self, nonce: u64) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("nonce", &nonce.to_string());
        for (key, value) in self.pairs.iter().filter(|(k, _)| k != "nonce") {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ApiParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ApiParams::new();
        for (key, value) in iter {
            let key: String = key.into();
            params.set(&key, value.into());
        }
        params
    }
}
