//! URL joining and query-string handling.

use crate::Result;
use std::collections::{BTreeMap, HashMap};
use url::form_urlencoded::Serializer;
use url::Url;

/// Joins a base URL and a relative path with exactly one `/` between them.
///
/// Leading slashes on `path` and trailing slashes on `base` are normalized
/// away, so `join("https://h/api/", "/v1")` and `join("https://h/api", "v1")`
/// both yield `https://h/api/v1`.
pub fn join(base: &Url, path: &str) -> Result<Url> {
    let base = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    let joined = if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    };
    Ok(Url::parse(&joined)?)
}

/// Query parameters, in any of the four accepted shapes.
///
/// All shapes carrying equivalent key/value pairs encode to the same query
/// string. Use the `From` impls for strings, pair sequences and mappings, or
/// [`Query::builder`] to assemble a pre-encoded query incrementally.
#[derive(Debug, Clone)]
pub enum Query {
    /// A pre-encoded query string, used verbatim (a leading `?` is stripped).
    Raw(String),
    /// Key/value pairs, encoded in sequence order.
    Pairs(Vec<(String, String)>),
    /// A mapping; keys with a `None` value are dropped before encoding.
    Map(BTreeMap<String, Option<String>>),
}

impl Query {
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    /// Encodes to a query string without the leading `?`.
    pub fn encode(&self) -> String {
        match self {
            Query::Raw(raw) => raw.trim_start_matches('?').to_string(),
            Query::Pairs(pairs) => {
                let mut serializer = Serializer::new(String::new());
                for (key, value) in pairs {
                    serializer.append_pair(key, value);
                }
                serializer.finish()
            }
            Query::Map(map) => {
                let mut serializer = Serializer::new(String::new());
                for (key, value) in map {
                    if let Some(value) = value {
                        serializer.append_pair(key, value);
                    }
                }
                serializer.finish()
            }
        }
    }

    /// Appends the encoded parameters to `url`'s query component, preserving
    /// any query the URL already carries.
    pub fn apply(&self, url: &mut Url) {
        let encoded = self.encode();
        if encoded.is_empty() {
            return;
        }
        match url.query() {
            Some(existing) if !existing.is_empty() => {
                let combined = format!("{}&{}", existing, encoded);
                url.set_query(Some(&combined));
            }
            _ => url.set_query(Some(&encoded)),
        }
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Query::Raw(raw.to_string())
    }
}

impl From<String> for Query {
    fn from(raw: String) -> Self {
        Query::Raw(raw)
    }
}

impl From<Vec<(String, String)>> for Query {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Query::Pairs(pairs)
    }
}

impl From<&[(&str, &str)]> for Query {
    fn from(pairs: &[(&str, &str)]) -> Self {
        Query::Pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Query {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Query::from(&pairs[..])
    }
}

impl From<BTreeMap<String, Option<String>>> for Query {
    fn from(map: BTreeMap<String, Option<String>>) -> Self {
        Query::Map(map)
    }
}

impl From<BTreeMap<String, String>> for Query {
    fn from(map: BTreeMap<String, String>) -> Self {
        Query::Map(map.into_iter().map(|(k, v)| (k, Some(v))).collect())
    }
}

impl From<HashMap<String, String>> for Query {
    fn from(map: HashMap<String, String>) -> Self {
        Query::Map(map.into_iter().map(|(k, v)| (k, Some(v))).collect())
    }
}

impl From<HashMap<String, Option<String>>> for Query {
    fn from(map: HashMap<String, Option<String>>) -> Self {
        Query::Map(map.into_iter().collect())
    }
}

/// Builds a pre-encoded [`Query`] one pair at a time.
///
/// # Examples
///
/// ```
/// use wicket::Query;
///
/// let query = Query::builder().append("q", "rust").append("page", "2").build();
/// assert_eq!(query.encode(), "q=rust&page=2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> Query {
        let mut serializer = Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        Query::Raw(serializer.finish())
    }
}
