use serde::{self, Deserialize, Deserializer, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Parses a date in the plain `YYYY-MM-DD` form the API uses for `TxnDate`,
/// `DueDate` and friends. Tolerates a trailing time component.
pub fn parse_qb_date(date_str: &str) -> Result<Date, String> {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(date_part, &format)
        .map_err(|e| format!("failed to parse date '{date_str}': {e}"))
}

/// Parses the timestamps the API uses in `MetaData`, e.g.
/// `2015-07-24T10:35:08-07:00`. Timestamps without an offset are assumed UTC.
pub fn parse_qb_datetime(datetime_str: &str) -> Result<OffsetDateTime, String> {
    if let Ok(datetime) = OffsetDateTime::parse(datetime_str, &Rfc3339) {
        return Ok(datetime);
    }

    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(datetime) = PrimitiveDateTime::parse(datetime_str, &format) {
        return Ok(datetime.assume_utc());
    }

    Err(format!(
        "failed to parse datetime '{datetime_str}': no matching format"
    ))
}

/// Serde adapter for optional `YYYY-MM-DD` date fields.
pub mod qb_date_format_option {
    use super::{Date, Deserialize, Deserializer, Serializer, format_description, serde};

    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => {
                let formatted = date
                    .format(&format_description!("[year]-[month]-[day]"))
                    .map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<String>::deserialize(deserializer)?;
        match opt {
            Some(s) if !s.is_empty() => super::parse_qb_date(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

/// Serde adapter for optional RFC3339 timestamp fields.
pub mod qb_datetime_format_option {
    use super::{Deserialize, Deserializer, OffsetDateTime, Rfc3339, Serializer, serde};

    pub fn serialize<S>(
        datetime: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match datetime {
            Some(datetime) => {
                let formatted = datetime.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<String>::deserialize(deserializer)?;
        match opt {
            Some(s) if !s.is_empty() => super::parse_qb_datetime(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
