//! Encode, decode and normalise operations.
//!
//! These are pure functions: they hold no state between calls and never touch storage.

use crate::{ListFieldError, ListFieldResult, ListItem};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Encode an ordered list of items as a transport string.
///
/// The output is a single-line JSON array (newlines inside items are escaped), so it can be
/// carried as the value of one hidden form input. An empty slice encodes as `[]`.
///
/// # Arguments
///
/// * `field` - Name of the form field, used to tag any error.
/// * `items` - Items to encode, in display order.
///
/// # Errors
///
/// Returns [`ListFieldError::Encode`] if an item's `Serialize` implementation fails.
pub fn encode<T: Serialize>(field: &str, items: &[T]) -> ListFieldResult<String> {
    serde_json::to_string(items).map_err(|e| ListFieldError::Encode {
        field: field.to_owned(),
        message: e.to_string(),
    })
}

/// Decode a transport string into an ordered list of items.
///
/// Empty and whitespace-only input decodes to an empty list. Anything else must be a JSON
/// array whose elements deserialize as `T`. No item-level rules are applied here: blank items
/// survive decoding and are removed by [`normalize`].
///
/// # Arguments
///
/// * `field` - Name of the form field the string came from.
/// * `raw` - The submitted transport string, possibly tampered with.
///
/// # Errors
///
/// - [`ListFieldError::Decode`] if `raw` is not valid JSON or is not an array.
/// - [`ListFieldError::Shape`] if an element does not match `T` (missing sub-field, wrong
///   primitive kind, unknown sub-field for strict record types).
pub fn decode<T: DeserializeOwned>(field: &str, raw: &str) -> ListFieldResult<Vec<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|e| ListFieldError::Decode {
        field: field.to_owned(),
        message: format!("Enter a valid list ({e})."),
    })?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(ListFieldError::Decode {
                field: field.to_owned(),
                message: format!(
                    "Enter a valid list (expected an array, found {}).",
                    kind_of(&other)
                ),
            })
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| decode_element(field, index, element))
        .collect()
}

/// Drop blank items, keeping the remaining items in their original order.
///
/// Idempotent: normalising an already normalised list returns it unchanged.
pub fn normalize<T: ListItem>(items: Vec<T>) -> Vec<T> {
    items.into_iter().filter(|item| !item.is_blank()).collect()
}

fn decode_element<T: DeserializeOwned>(
    field: &str,
    index: usize,
    element: Value,
) -> ListFieldResult<T> {
    serde_path_to_error::deserialize::<_, T>(element).map_err(|err| {
        let inner_path = err.path().to_string();
        let source = err.into_inner();
        let path = if inner_path.is_empty() || inner_path == "." {
            format!("[{index}]")
        } else {
            format!("[{index}].{inner_path}")
        };
        ListFieldError::Shape {
            field: field.to_owned(),
            path,
            message: format!("Item {} is not valid: {source}", index + 1),
        }
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct TitledItem {
        title: String,
        description: String,
    }

    impl ListItem for TitledItem {
        fn is_blank(&self) -> bool {
            self.title.trim().is_empty() && self.description.trim().is_empty()
        }

        fn max_text_chars(&self) -> usize {
            self.title.chars().count().max(self.description.chars().count())
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_list_encodes_as_empty_array() {
        let encoded = encode::<String>("activities_json", &[]).expect("encode");
        assert_eq!(encoded, "[]");
    }

    #[test]
    fn round_trips_strings_in_order() {
        let items = strings(&["z first", "a second", "m third", "a second"]);
        let encoded = encode("activities_json", &items).expect("encode");
        let decoded: Vec<String> = decode("activities_json", &encoded).expect("decode");
        assert_eq!(decoded, items);
    }

    #[test]
    fn round_trips_text_with_structural_characters() {
        let items = strings(&[
            "line one\nline two",
            "quote \" and backslash \\",
            "[not, a, list]",
            "<b>markup</b> & ampersand",
            "",
        ]);
        let encoded = encode("impact_json", &items).expect("encode");
        assert!(!encoded.contains('\n'));

        let decoded: Vec<String> = decode("impact_json", &encoded).expect("decode");
        assert_eq!(decoded, items);
    }

    #[test]
    fn empty_and_blank_input_decode_to_empty_list() {
        let empty: Vec<String> = decode("activities_json", "").expect("empty input");
        assert!(empty.is_empty());

        let blank: Vec<String> = decode("activities_json", "   ").expect("blank input");
        assert!(blank.is_empty());

        let array: Vec<String> = decode("activities_json", " [] ").expect("empty array");
        assert!(array.is_empty());
    }

    #[test]
    fn malformed_input_is_a_decode_error_tagged_with_field() {
        let err = decode::<String>("activities_json", "{not valid list}")
            .expect_err("should reject malformed input");
        match &err {
            ListFieldError::Decode { field, message } => {
                assert_eq!(field, "activities_json");
                assert!(message.starts_with("Enter a valid list"));
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
        assert_eq!(err.field(), "activities_json");
    }

    #[test]
    fn non_array_json_is_a_decode_error() {
        let err = decode::<String>("activities_json", r#"{"a": 1}"#).expect_err("object root");
        match err {
            ListFieldError::Decode { message, .. } => assert!(message.contains("an object")),
            other => panic!("expected Decode error, got {other:?}"),
        }

        let err = decode::<String>("activities_json", r#""just text""#).expect_err("string root");
        assert!(matches!(err, ListFieldError::Decode { .. }));
    }

    #[test]
    fn wrong_primitive_kind_is_a_shape_error() {
        let err = decode::<String>("activities_json", r#"["ok", 5]"#).expect_err("number item");
        match err {
            ListFieldError::Shape { field, path, .. } => {
                assert_eq!(field, "activities_json");
                assert_eq!(path, "[1]");
            }
            other => panic!("expected Shape error, got {other:?}"),
        }
    }

    #[test]
    fn record_missing_sub_field_is_a_shape_error() {
        let raw = r#"[{"title":"Cooperation","description":"Working together"},{"title":"Inclusivity"}]"#;
        let err = decode::<TitledItem>("core_values_json", raw).expect_err("missing description");
        match err {
            ListFieldError::Shape { path, message, .. } => {
                assert!(path.starts_with("[1]"), "path was {path}");
                assert!(message.contains("description"), "message was {message}");
            }
            other => panic!("expected Shape error, got {other:?}"),
        }
    }

    #[test]
    fn record_sub_field_of_wrong_kind_reports_its_path() {
        let raw = r#"[{"title":7,"description":"x"}]"#;
        let err = decode::<TitledItem>("core_values_json", raw).expect_err("numeric title");
        match err {
            ListFieldError::Shape { path, .. } => assert_eq!(path, "[0].title"),
            other => panic!("expected Shape error, got {other:?}"),
        }
    }

    #[test]
    fn record_scenario_decodes_and_re_encodes_equivalently() {
        let raw = r#"[{"title":"Cooperation","description":"Working together"}]"#;
        let decoded: Vec<TitledItem> = decode("core_values_json", raw).expect("decode");
        assert_eq!(
            decoded,
            vec![TitledItem {
                title: "Cooperation".into(),
                description: "Working together".into(),
            }]
        );

        let encoded = encode("core_values_json", &decoded).expect("encode");
        let again: Vec<TitledItem> = decode("core_values_json", &encoded).expect("decode again");
        assert_eq!(again, decoded);
    }

    #[test]
    fn normalize_drops_blank_items_and_keeps_order() {
        let items = strings(&["a", "", "  ", "b"]);
        assert_eq!(normalize(items), strings(&["a", "b"]));
    }

    #[test]
    fn normalize_is_idempotent() {
        let items = strings(&["", "x", " ", "y", "\t", "x"]);
        let once = normalize(items);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once, strings(&["x", "y", "x"]));
    }

    #[test]
    fn tree_planting_scenario_decodes_then_normalizes() {
        let raw = r#"["Tree planting","","  ","Waste management"]"#;
        let decoded: Vec<String> = decode("activities_json", raw).expect("decode");
        assert_eq!(decoded.len(), 4);
        assert_eq!(
            normalize(decoded),
            strings(&["Tree planting", "Waste management"])
        );
    }

    #[test]
    fn normalize_drops_records_with_only_blank_text() {
        let items = vec![
            TitledItem {
                title: " ".into(),
                description: String::new(),
            },
            TitledItem {
                title: "Holistic".into(),
                description: String::new(),
            },
        ];
        let normalized = normalize(items);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].title, "Holistic");
    }
}
