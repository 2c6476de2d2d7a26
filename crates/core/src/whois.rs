use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::LookupError;

/// Response envelope returned by the WhoisXML API
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct WhoisResponse {
    #[serde(rename = "WhoisRecord", default, deserialize_with = "lenient")]
    pub whois_record: Option<WhoisRecord>,
}

/// WHOIS record from the provider
///
/// The provider guarantees nothing: every field may be missing, null or of
/// the wrong type. A mistyped field degrades to absent instead of failing
/// the record; mistyped dates are kept as raw text so they render as invalid.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhoisRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub domain_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub registrar_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub created_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expires_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_days")]
    pub estimated_domain_age: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact_email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name_servers: Option<NameServers>,
    #[serde(default, deserialize_with = "lenient")]
    pub registrant: Option<Contact>,
    #[serde(default, deserialize_with = "lenient")]
    pub technical_contact: Option<Contact>,
    #[serde(default, deserialize_with = "lenient")]
    pub administrative_contact: Option<Contact>,
}

/// Nameserver block of a WHOIS record
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NameServers {
    #[serde(default, deserialize_with = "lenient_host_names")]
    pub host_names: Option<Vec<String>>,
}

/// Registrant, technical or administrative contact
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

impl WhoisRecord {
    pub fn registrant_name(&self) -> Option<&str> {
        contact_name(self.registrant.as_ref())
    }

    pub fn technical_contact_name(&self) -> Option<&str> {
        contact_name(self.technical_contact.as_ref())
    }

    pub fn administrative_contact_name(&self) -> Option<&str> {
        contact_name(self.administrative_contact.as_ref())
    }

    /// Nameserver hostnames, empty when the block is missing
    pub fn host_names(&self) -> &[String] {
        self.name_servers
            .as_ref()
            .and_then(|ns| ns.host_names.as_deref())
            .unwrap_or_default()
    }
}

fn contact_name(contact: Option<&Contact>) -> Option<&str> {
    contact.and_then(|c| c.name.as_deref())
}

/// Decode `T` when the JSON value has the right shape, otherwise absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Keep any non-null date as text; non-strings fail to parse later
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accept the domain age as a JSON number or a numeric string
///
/// Anything else (booleans, objects, garbage strings) is treated as absent
/// rather than failing the whole record.
fn lenient_days<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Hostname list with non-string entries dropped; a non-list is absent
fn lenient_host_names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(host) => Some(host),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Parse a provider response body into its WHOIS record
///
/// An envelope without a usable `WhoisRecord` yields an empty record. Only a
/// body that is not a JSON object is [`LookupError::UpstreamMalformed`].
pub fn parse_whois_response(body: &str) -> Result<WhoisRecord, LookupError> {
    let response: WhoisResponse =
        serde_json::from_str(body).map_err(|e| LookupError::UpstreamMalformed(e.to_string()))?;

    Ok(response.whois_record.unwrap_or_default())
}
