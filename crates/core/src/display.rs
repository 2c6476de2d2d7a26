use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LookupError;
use crate::format::{format_age, format_date, truncate, HOSTNAME_MAX_LEN};
use crate::whois::WhoisRecord;

pub const DOMAIN_NAME: &str = "Domain Name";
pub const REGISTRAR: &str = "Registrar";
pub const REGISTRATION_DATE: &str = "Registration Date";
pub const EXPIRATION_DATE: &str = "Expiration Date";
pub const ESTIMATED_DOMAIN_AGE: &str = "Estimated Domain Age";
pub const HOSTNAMES: &str = "Hostnames";

pub const REGISTRANT_NAME: &str = "Registrant Name";
pub const TECHNICAL_CONTACT_NAME: &str = "Technical Contact Name";
pub const ADMINISTRATIVE_CONTACT_NAME: &str = "Administrative Contact Name";
pub const CONTACT_EMAIL: &str = "Contact Email";

/// Which subset of the WHOIS record a lookup returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Domain,
    Contact,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Contact => "contact",
        }
    }

    /// Heading shown above the rendered table
    pub fn title(&self) -> &'static str {
        match self {
            Self::Domain => "Domain Information",
            Self::Contact => "Contact Information",
        }
    }

    /// Labels emitted for this view, in display order
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::Domain => &[
                DOMAIN_NAME,
                REGISTRAR,
                REGISTRATION_DATE,
                EXPIRATION_DATE,
                ESTIMATED_DOMAIN_AGE,
                HOSTNAMES,
            ],
            Self::Contact => &[
                REGISTRANT_NAME,
                TECHNICAL_CONTACT_NAME,
                ADMINISTRATIVE_CONTACT_NAME,
                CONTACT_EMAIL,
            ],
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = LookupError;

    /// Case-insensitive; anything but `domain` or `contact` is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "domain" => Ok(Self::Domain),
            "contact" => Ok(Self::Contact),
            _ => Err(LookupError::InvalidViewMode(s.to_string())),
        }
    }
}

/// A single display value: a scalar (possibly absent) or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(Option<String>),
    List(Vec<String>),
}

impl DisplayValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }

    fn passthrough(value: Option<&str>) -> Self {
        Self::Text(value.map(str::to_string))
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(Some(text)) => f.write_str(text),
            Self::Text(None) => Ok(()),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Ordered label → value mapping handed to the presentation layer
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRecord {
    fields: Vec<(String, DisplayValue)>,
}

impl DisplayRecord {
    pub fn fields(&self) -> impl Iterator<Item = (&str, &DisplayValue)> {
        self.fields.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(label, _)| label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&DisplayValue> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, DisplayValue)> for DisplayRecord {
    fn from_iter<I: IntoIterator<Item = (L, DisplayValue)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        }
    }
}

impl Serialize for DisplayRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DisplayRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = DisplayRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of display labels to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, value)) = access.next_entry::<String, DisplayValue>()? {
                    fields.push((label, value));
                }
                Ok(DisplayRecord { fields })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Shape a provider record into the display record for `mode`
///
/// Total over every combination of missing fields: absent passthrough values
/// become null, absent dates and ages become their sentinels.
pub fn shape_record(record: &WhoisRecord, mode: ViewMode) -> DisplayRecord {
    let display = match mode {
        ViewMode::Domain => shape_domain(record),
        ViewMode::Contact => shape_contact(record),
    };
    debug_assert!(display.labels().eq(mode.labels().iter().copied()));

    display
}

fn shape_domain(record: &WhoisRecord) -> DisplayRecord {
    let host_names = record
        .host_names()
        .iter()
        .map(|host| truncate(host, HOSTNAME_MAX_LEN))
        .collect();

    DisplayRecord::from_iter([
        (
            DOMAIN_NAME,
            DisplayValue::passthrough(record.domain_name.as_deref()),
        ),
        (
            REGISTRAR,
            DisplayValue::passthrough(record.registrar_name.as_deref()),
        ),
        (
            REGISTRATION_DATE,
            DisplayValue::text(format_date(record.created_date.as_deref())),
        ),
        (
            EXPIRATION_DATE,
            DisplayValue::text(format_date(record.expires_date.as_deref())),
        ),
        (
            ESTIMATED_DOMAIN_AGE,
            DisplayValue::text(format_age(record.estimated_domain_age)),
        ),
        (HOSTNAMES, DisplayValue::List(host_names)),
    ])
}

fn shape_contact(record: &WhoisRecord) -> DisplayRecord {
    DisplayRecord::from_iter([
        (
            REGISTRANT_NAME,
            DisplayValue::passthrough(record.registrant_name()),
        ),
        (
            TECHNICAL_CONTACT_NAME,
            DisplayValue::passthrough(record.technical_contact_name()),
        ),
        (
            ADMINISTRATIVE_CONTACT_NAME,
            DisplayValue::passthrough(record.administrative_contact_name()),
        ),
        (
            CONTACT_EMAIL,
            DisplayValue::passthrough(record.contact_email.as_deref()),
        ),
    ])
}
