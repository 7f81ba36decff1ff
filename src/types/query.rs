use bon::Builder;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Query parameters accepted by the user listing endpoint.
///
/// Only `query`, `page` and `per_page` are ever forwarded. Deserializing from an arbitrary
/// JSON mapping silently drops every other key. `page` and `per_page` accept numbers or
/// numeric strings.
///
/// ```
/// use synapse_pay_rest::types::QueryOptions;
///
/// let options: QueryOptions = serde_json::from_value(serde_json::json!({
///     "query": "a",
///     "page": null,
///     "per_page": 10,
///     "sort": "desc",
/// }))
/// .unwrap();
///
/// assert_eq!(options.to_query_string(), "query=a&per_page=10");
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Name or email substring to match.
    #[builder(into)]
    pub query: Option<String>,
    /// Page number, starting at 1.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub page: Option<u32>,
    /// Page size. The API default applies when unset.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub per_page: Option<u32>,
}

impl QueryOptions {
    /// Names of the recognized parameters, in the order they are emitted.
    pub const VALID_PARAMS: [&'static str; 3] = ["query", "page", "per_page"];

    fn pairs(&self) -> impl Iterator<Item = (&'static str, String)> {
        let values = [
            self.query.clone(),
            self.page.map(|p| p.to_string()),
            self.per_page.map(|p| p.to_string()),
        ];
        Self::VALID_PARAMS
            .into_iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|value| (key, value)))
    }

    /// Encode the set parameters as `key=value` pairs joined by `&`.
    ///
    /// Unset parameters are omitted. Values are form-url-encoded.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    /// Append the encoded parameters to `path`, adding `?` only when at least one is set.
    pub fn apply_to(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Number(u32),
    Text(String),
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(s)) => s.trim().parse().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("expected a non-negative integer, got {s:?}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_skips_unset_and_keeps_order() {
        let options = QueryOptions::builder().per_page(10).query("a").build();
        assert_eq!(options.to_query_string(), "query=a&per_page=10");

        let all = QueryOptions::builder()
            .query("x")
            .page(2)
            .per_page(5)
            .build();
        assert_eq!(all.to_query_string(), "query=x&page=2&per_page=5");
    }

    #[test]
    fn test_empty_options_leave_path_untouched() {
        let options = QueryOptions::default();
        assert_eq!(options.to_query_string(), "");
        assert_eq!(options.apply_to("/users"), "/users");
    }

    #[test]
    fn test_values_are_escaped() {
        let options = QueryOptions::builder().query("jane doe&co=1").build();
        assert_eq!(
            options.apply_to("/users"),
            "/users?query=jane+doe%26co%3D1"
        );
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let options: QueryOptions = serde_json::from_value(serde_json::json!({
            "page": "2",
            "per_page": "10",
        }))
        .unwrap();
        assert_eq!(options.to_query_string(), "page=2&per_page=10");

        let invalid = serde_json::from_value::<QueryOptions>(serde_json::json!({
            "per_page": "ten",
        }));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let options: QueryOptions = serde_json::from_value(serde_json::json!({
            "user_id": "abc",
            "page": 3,
        }))
        .unwrap();

        assert_eq!(options, QueryOptions::builder().page(3).build());
        assert_eq!(options.to_query_string(), "page=3");
    }
}
