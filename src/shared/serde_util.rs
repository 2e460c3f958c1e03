//! Custom serde helpers for backend wire formats.

/// Serializes a `Decimal` as a JSON number and accepts either a number or a
/// numeric string when deserializing.
///
/// The backend exchanges `BigDecimal` prices as bare JSON numbers
/// (`12.5`), not the quoted strings `rust_decimal` produces by default.
pub mod decimal_number {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value.to_f64() {
            Some(f) => serializer.serialize_f64(f),
            None => serializer.serialize_str(&value.to_string()),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        from_value(&raw).map_err(serde::de::Error::custom)
    }

    pub(crate) fn from_value(raw: &serde_json::Value) -> Result<Decimal, String> {
        let text = match raw {
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.trim().to_string(),
            other => return Err(format!("Invalid decimal: {}", other)),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|e| format!("Invalid decimal {}: {}", text, e))
    }
}

/// `Option<Decimal>` variant of [`decimal_number`]; `null` maps to `None`.
pub mod opt_decimal_number {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => super::decimal_number::serialize(d, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(None);
        }
        super::decimal_number::from_value(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};
    use std::str::FromStr;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Priced {
        #[serde(with = "super::decimal_number")]
        price: Decimal,
        #[serde(default, with = "super::opt_decimal_number")]
        floor: Option<Decimal>,
    }

    #[test]
    fn test_number_and_string_both_accepted() {
        let a: Priced = serde_json::from_str(r#"{"price": 12.35, "floor": "2"}"#).unwrap();
        assert_eq!(a.price, Decimal::from_str("12.35").unwrap());
        assert_eq!(a.floor, Some(Decimal::from(2)));

        let b: Priced = serde_json::from_str(r#"{"price": "7.5", "floor": null}"#).unwrap();
        assert_eq!(b.price, Decimal::from_str("7.5").unwrap());
        assert_eq!(b.floor, None);
    }

    #[test]
    fn test_serializes_as_json_number() {
        let p = Priced {
            price: Decimal::from_str("45.5").unwrap(),
            floor: None,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["price"], serde_json::json!(45.5));
        assert!(json["floor"].is_null());
    }

    #[test]
    fn test_rejects_non_numeric() {
        let res: Result<Priced, _> = serde_json::from_str(r#"{"price": true}"#);
        assert!(res.is_err());
    }
}
