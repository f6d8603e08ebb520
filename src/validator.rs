//! Input contract checks: raw JSON in, typed flow input out.

use crate::error::{BotError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Decode a raw JSON payload into a flow's input type.
///
/// For the news flow that type is [`TechNewsBotInput`](crate::models::TechNewsBotInput),
/// i.e. `{ "query": string }`. Fields the type does not declare are dropped.
///
/// # Arguments
///
/// * `raw` - The payload as received from the caller
///
/// # Returns
///
/// The decoded input, or [`BotError::Validation`] carrying serde's
/// description of the mismatch (missing field, wrong type, not an object).
pub fn validate_input<I: DeserializeOwned>(raw: &Value) -> Result<I> {
    let input = serde_json::from_value(raw.clone())
        .map_err(|e| BotError::Validation(e.to_string()))?;
    debug!("Input validated");
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TechNewsBotInput;
    use serde_json::json;

    fn validate(raw: Value) -> Result<TechNewsBotInput> {
        validate_input(&raw)
    }

    #[test]
    fn test_valid_query() {
        let input = validate(json!({"query": "AI chips"})).unwrap();
        assert_eq!(input.query, "AI chips");
    }

    #[test]
    fn test_empty_query_is_valid() {
        let input = validate(json!({"query": ""})).unwrap();
        assert_eq!(input.query, "");
    }

    #[test]
    fn test_extra_fields_are_dropped() {
        let input = validate(json!({"query": "rust", "verbose": true})).unwrap();
        assert_eq!(input, TechNewsBotInput { query: "rust".to_string() });
    }

    #[test]
    fn test_missing_query() {
        let err = validate(json!({})).unwrap_err();
        assert!(matches!(err, BotError::Validation(ref m) if m.contains("missing field `query`")));
    }

    #[test]
    fn test_non_string_query() {
        for bad in [json!({"query": 42}), json!({"query": null}), json!({"query": ["a"]})] {
            assert!(matches!(validate(bad), Err(BotError::Validation(_))));
        }
    }

    #[test]
    fn test_non_object_payload() {
        let err = validate(json!("AI chips")).unwrap_err();
        assert!(matches!(err, BotError::Validation(ref m) if m.contains("invalid type")));
    }
}
