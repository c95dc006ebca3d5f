//! `createAt` normalization.

use crate::error::AppError;
use crate::model::RawDate;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalize a client date to a UTC instant. Missing means now; offset-less input is read as UTC.
pub fn normalize_create_at(raw: Option<&RawDate>) -> Result<DateTime<Utc>, AppError> {
    match raw {
        None => Ok(Utc::now()),
        Some(RawDate::Millis(ms)) => Utc
            .timestamp_millis_opt(*ms)
            .single()
            .ok_or_else(|| AppError::BadRequest(format!("createAt inválido: {}", ms))),
        Some(RawDate::Text(s)) => parse_text(s.trim())
            .ok_or_else(|| AppError::BadRequest(format!("createAt inválido: {}", s))),
        Some(RawDate::Other(v)) => Err(AppError::BadRequest(format!("createAt inválido: {}", v))),
    }
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|ndt| Utc.from_utc_datetime(&ndt));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[rstest]
    #[case("2024-01-01", "2024-01-01T00:00:00Z")]
    #[case("2024-01-01T10:30", "2024-01-01T10:30:00Z")]
    #[case("2024-01-01T10:30:15.250", "2024-01-01T10:30:15.250Z")]
    #[case("2024-01-01 10:30:15", "2024-01-01T10:30:15Z")]
    #[case("2024-01-01T10:30:00+02:00", "2024-01-01T08:30:00Z")]
    #[case(" 2024-01-01 ", "2024-01-01T00:00:00Z")]
    fn text_dates_normalize_to_utc(#[case] input: &str, #[case] expected: &str) {
        let got = normalize_create_at(Some(&RawDate::Text(input.into()))).unwrap();
        assert_eq!(got, utc(expected));
    }

    #[test]
    fn millis_are_epoch_milliseconds() {
        let got = normalize_create_at(Some(&RawDate::Millis(1_704_067_200_000))).unwrap();
        assert_eq!(got, utc("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn missing_date_is_now() {
        let before = Utc::now();
        let got = normalize_create_at(None).unwrap();
        assert!(got >= before && got <= Utc::now());
    }

    #[test]
    fn garbage_is_a_bad_request() {
        let err = normalize_create_at(Some(&RawDate::Text("mañana".into()))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "createAt inválido: mañana"));
    }

    #[test]
    fn non_date_json_is_a_bad_request() {
        let err = normalize_create_at(Some(&RawDate::Other(serde_json::Value::Bool(true)))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "createAt inválido: true"));
    }
}
