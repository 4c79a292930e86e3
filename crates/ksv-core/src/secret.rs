//! Secret domain model

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::value::SecretValue;

/// A Kubernetes-style Secret manifest (`data` / `stringData` shape)
///
/// `apiVersion`, `kind`, `metadata` and `type` are carried through
/// untouched. The two value maps are always present, so an empty map is
/// emitted as `{}` rather than dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    #[serde(
        rename = "apiVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text_map"
    )]
    pub metadata: Option<BTreeMap<String, String>>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub secret_type: Option<String>,

    /// Values understood to be base64-encoded (`data`)
    #[serde(rename = "data", default, deserialize_with = "value_map")]
    pub encoded_data: BTreeMap<String, SecretValue>,

    /// Values understood to be plaintext (`stringData`)
    #[serde(rename = "stringData", default, deserialize_with = "value_map")]
    pub plaintext_data: BTreeMap<String, SecretValue>,
}

impl Secret {
    /// Whether any entry holds bytes that are not UTF-8
    pub fn has_binary(&self) -> bool {
        self.encoded_data
            .values()
            .chain(self.plaintext_data.values())
            .any(SecretValue::is_binary)
    }
}

/// A `null` map reads as empty
fn value_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, SecretValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, SecretValue>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scalars keep their source text (`version: 1.10` stays `"1.10"`), null becomes `""`.
fn optional_text_map<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<BTreeMap<String, Option<String>>>::deserialize(deserializer)?;
    Ok(map.map(|entries| {
        entries
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect()
    }))
}
