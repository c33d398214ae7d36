//! Shared helpers: binary-content guard and parameter coercion.

pub mod binary;

use serde::de::{self, Deserializer, Visitor};

pub(crate) const fn default_true() -> bool {
    true
}

/// Deserialize a boolean that may arrive as a JSON bool, a number, or a
/// textual truthy/falsy form (true/false, yes/no, y/n, on/off, 1/0,
/// case-insensitive).
pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct TruthyVisitor;

    impl Visitor<'_> for TruthyVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a boolean or a truthy/falsy string")
        }

        fn visit_bool<E>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            Ok(v != 0.0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "on" | "1" => Ok(true),
                "false" | "no" | "n" | "off" | "0" | "" => Ok(false),
                other => Err(E::custom(format!("not a recognized boolean: {other:?}"))),
            }
        }
    }

    deserializer.deserialize_any(TruthyVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(deserialize_with = "super::truthy")]
        value: bool,
    }

    fn parse(v: serde_json::Value) -> Option<bool> {
        serde_json::from_value::<Flag>(serde_json::json!({ "value": v }))
            .ok()
            .map(|f| f.value)
    }

    #[test]
    fn test_accepts_json_bool() {
        assert_eq!(parse(serde_json::json!(true)), Some(true));
        assert_eq!(parse(serde_json::json!(false)), Some(false));
    }

    #[test]
    fn test_accepts_textual_forms() {
        assert_eq!(parse(serde_json::json!("true")), Some(true));
        assert_eq!(parse(serde_json::json!("Yes")), Some(true));
        assert_eq!(parse(serde_json::json!("on")), Some(true));
        assert_eq!(parse(serde_json::json!("FALSE")), Some(false));
        assert_eq!(parse(serde_json::json!("no")), Some(false));
        assert_eq!(parse(serde_json::json!("0")), Some(false));
    }

    #[test]
    fn test_accepts_numbers() {
        assert_eq!(parse(serde_json::json!(1)), Some(true));
        assert_eq!(parse(serde_json::json!(0)), Some(false));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse(serde_json::json!("maybe")), None);
    }
}
