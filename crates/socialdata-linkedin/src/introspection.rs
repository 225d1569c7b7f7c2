//! Readable rendering of `oauth/v2/introspectToken` responses.

use chrono::{DateTime, Utc};
use serde_json::Value;

const DATE_FIELDS: [&str; 3] = ["authorized_at", "created_at", "expires_at"];

/// Day, date and time, e.g. `Thu, Dec 25, 1975 2:15 PM`.
pub const DAY_DATE_TIME_FORMAT: &str = "%a, %b %-d, %Y %-I:%M %p";

/// Replaces the epoch-second date fields of an introspection body with
/// readable UTC dates. Fields that are absent or not numeric are left alone.
pub fn format_introspection_dates(data: &mut Value) {
    let Some(object) = data.as_object_mut() else {
        return;
    };
    for field in DATE_FIELDS {
        let Some(value) = object.get_mut(field) else {
            continue;
        };
        let seconds = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if let Some(formatted) = seconds.and_then(format_epoch) {
            *value = Value::String(formatted);
        }
    }
}

/// Formats epoch seconds with [`DAY_DATE_TIME_FORMAT`], or `None` when out
/// of range.
#[must_use]
pub fn format_epoch(seconds: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|at| at.format(DAY_DATE_TIME_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn epoch_renders_day_date_time() {
        assert_eq!(
            format_epoch(188_748_900).as_deref(),
            Some("Thu, Dec 25, 1975 2:15 PM")
        );
        assert_eq!(format_epoch(i64::MAX), None);
    }

    #[test]
    fn date_fields_are_rewritten_and_others_kept() {
        let mut data = json!({
            "active": true,
            "authorized_at": 188_748_900,
            "created_at": "1700000000",
            "expires_at": "never",
            "scope": "r_organization_social"
        });
        format_introspection_dates(&mut data);

        assert_eq!(data["authorized_at"], "Thu, Dec 25, 1975 2:15 PM");
        assert_eq!(data["created_at"], "Tue, Nov 14, 2023 10:13 PM");
        assert_eq!(data["expires_at"], "never");
        assert_eq!(data["scope"], "r_organization_social");
        assert_eq!(data["active"], true);
    }

    #[test]
    fn non_object_body_is_untouched() {
        let mut data = json!([188_748_900]);
        format_introspection_dates(&mut data);
        assert_eq!(data, json!([188_748_900]));
    }
}
