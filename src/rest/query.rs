//! Turns option structs into ordered query parameters.

use serde::Serialize;
use serde_json::Value;

use crate::clients::HttpError;

/// Serializes a params struct into query pairs.
///
/// `None` fields are skipped and arrays become repeated keys
/// (`brandIds=1&brandIds=2`). Keys come out in field-name order.
pub(crate) fn to_query_pairs<T: Serialize>(params: &T) -> Result<Vec<(String, String)>, HttpError> {
    let value = serde_json::to_value(params).map_err(HttpError::Serialize)?;

    let mut pairs = Vec::new();
    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = scalar_to_string(&item) {
                            pairs.push((key.clone(), text));
                        }
                    }
                }
                other => {
                    if let Some(text) = scalar_to_string(&other) {
                        pairs.push((key, text));
                    } else {
                        pairs.push((key, other.to_string()));
                    }
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    struct Params {
        #[serde(skip_serializing_if = "Option::is_none")]
        approved: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        barcode: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        brand_ids: Vec<i64>,
        page: u32,
        note: Option<String>,
    }

    #[test]
    fn test_scalars_and_repeated_arrays() {
        let params = Params {
            approved: Some(true),
            barcode: Some("A 1".to_string()),
            brand_ids: vec![10, 20],
            page: 3,
            note: None,
        };

        let pairs = to_query_pairs(&params).unwrap();

        assert_eq!(
            pairs,
            vec![
                ("approved".to_string(), "true".to_string()),
                ("barcode".to_string(), "A 1".to_string()),
                ("brandIds".to_string(), "10".to_string()),
                ("brandIds".to_string(), "20".to_string()),
                ("page".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_params() {
        let pairs = to_query_pairs(&Params::default()).unwrap();
        assert_eq!(pairs, vec![("page".to_string(), "0".to_string())]);
    }
}
