//! A single `data` / `stringData` value

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::de::{self, DeserializeSeed, Deserializer, EnumAccess, VariantAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// YAML tag carrying bytes that are not UTF-8, written as `!binary <base64>`
pub const BINARY_TAG: &str = "binary";

/// Raw payload of one secret entry.
///
/// Decoded secrets are usually text, but keystores and certificates in DER
/// form are not. Those are kept as bytes so that encoding them again
/// reproduces the original base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretValue {
    Text(String),
    Binary(Vec<u8>),
}

impl SecretValue {
    /// Text when the bytes are UTF-8, binary otherwise
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => SecretValue::Text(text),
            Err(err) => SecretValue::Binary(err.into_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SecretValue::Text(text) => text.as_bytes(),
            SecretValue::Binary(bytes) => bytes,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, SecretValue::Binary(_))
    }
}

impl Default for SecretValue {
    fn default() -> Self {
        SecretValue::Text(String::new())
    }
}

impl From<String> for SecretValue {
    fn from(text: String) -> Self {
        SecretValue::Text(text)
    }
}

impl From<&str> for SecretValue {
    fn from(text: &str) -> Self {
        SecretValue::Text(text.to_string())
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        matches!(self, SecretValue::Text(text) if text == other)
    }
}

impl PartialEq<&str> for SecretValue {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SecretValue::Text(text) => serializer.serialize_str(text),
            SecretValue::Binary(bytes) => serializer.serialize_newtype_variant(
                "SecretValue",
                1,
                BINARY_TAG,
                &STANDARD.encode(bytes),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Scalars come back as unit variants named by their source text,
        // tagged scalars as a newtype variant named by the tag.
        deserializer.deserialize_enum("SecretValue", &[BINARY_TAG], SecretValueVisitor)
    }
}

struct SecretValueVisitor;

impl<'de> Visitor<'de> for SecretValueVisitor {
    type Value = SecretValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar or a !binary scalar")
    }

    fn visit_enum<A>(self, data: A) -> Result<SecretValue, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (head, variant) = data.variant_seed(HeadSeed)?;
        match head {
            Head::Scalar(text) => {
                variant.unit_variant()?;
                Ok(SecretValue::Text(text))
            }
            Head::Tag(tag) if tag == BINARY_TAG => {
                let encoded: String = variant.newtype_variant()?;
                let compact: Vec<u8> = encoded
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                STANDARD
                    .decode(compact)
                    .map(SecretValue::Binary)
                    .map_err(|e| de::Error::custom(format!("invalid !{} value: {}", tag, e)))
            }
            Head::Tag(tag) => Err(de::Error::custom(format!("unsupported tag !{}", tag))),
        }
    }
}

enum Head {
    Scalar(String),
    Tag(String),
}

/// Tells a tag name apart from scalar content.
///
/// The tag arrives as a bare string, while scalar content still sits in the
/// document and is offered through `visit_some` (or `visit_none` for null).
struct HeadSeed;

impl<'de> DeserializeSeed<'de> for HeadSeed {
    type Value = Head;

    fn deserialize<D>(self, deserializer: D) -> Result<Head, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(HeadVisitor)
    }
}

struct HeadVisitor;

impl<'de> Visitor<'de> for HeadVisitor {
    type Value = Head;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar value")
    }

    fn visit_str<E: de::Error>(self, tag: &str) -> Result<Head, E> {
        Ok(Head::Tag(tag.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Head, E> {
        Ok(Head::Scalar(String::new()))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Head, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Head::Scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn parse(yaml: &str) -> BTreeMap<String, SecretValue> {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(SecretValue::from_bytes(b"admin".to_vec()), "admin");
        assert_eq!(
            SecretValue::from_bytes(vec![0xff, 0x00]),
            SecretValue::Binary(vec![0xff, 0x00])
        );
    }

    #[test]
    fn test_scalars_keep_source_text() {
        let values = parse("a: 1.10\nb: 0x1F\nc: 1e10\nd: true\ne: 0123\nf: 'quoted'\n");

        assert_eq!(values["a"], "1.10");
        assert_eq!(values["b"], "0x1F");
        assert_eq!(values["c"], "1e10");
        assert_eq!(values["d"], "true");
        assert_eq!(values["e"], "0123");
        assert_eq!(values["f"], "quoted");
    }

    #[test]
    fn test_null_is_empty_text() {
        let values = parse("a:\nb: ~\nc: null\nd: 'null'\n");

        assert_eq!(values["a"], "");
        assert_eq!(values["b"], "");
        assert_eq!(values["c"], "");
        assert_eq!(values["d"], "null");
    }

    #[test]
    fn test_binary_tag() {
        let values = parse("keystore: !binary /w==\n");
        assert_eq!(values["keystore"], SecretValue::Binary(vec![0xff]));

        let mut map = BTreeMap::new();
        map.insert("keystore".to_string(), SecretValue::Binary(vec![0xff, 0xfe]));
        let yaml = serde_yaml::to_string(&map).unwrap();
        assert!(yaml.starts_with("keystore: !binary "));
        assert_eq!(parse(&yaml), map);
    }

    #[test]
    fn test_rejected_values() {
        assert!(serde_yaml::from_str::<BTreeMap<String, SecretValue>>("a: [1, 2]\n").is_err());
        assert!(serde_yaml::from_str::<BTreeMap<String, SecretValue>>("a: {b: c}\n").is_err());
        assert!(serde_yaml::from_str::<BTreeMap<String, SecretValue>>("a: !other x\n").is_err());
        assert!(
            serde_yaml::from_str::<BTreeMap<String, SecretValue>>("a: !binary '%%'\n").is_err()
        );
    }
}
