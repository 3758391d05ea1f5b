//! 사용자 입력 시각 해석.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{CoreError, CoreResult};

/// 시각 문자열을 UTC 시각으로 해석합니다.
///
/// 지원 형식:
/// - RFC 3339 (`2019-02-01T00:00:00Z`)
/// - `YYYY-MM-DD HH:MM` / `YYYY-MM-DDTHH:MM` (UTC로 간주)
/// - `YYYY-MM-DD` (해당 일자 00:00 UTC)
pub fn parse_instant(s: &str) -> CoreResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| CoreError::InvalidTime(s.to_string()))
}

/// 유닉스 초를 UTC 시각으로 변환합니다.
pub fn from_unix(secs: i64) -> CoreResult<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| CoreError::InvalidTime(secs.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_formats() {
        let expected = Utc.with_ymd_and_hms(2019, 2, 1, 23, 59, 0).unwrap();
        assert_eq!(parse_instant("2019-02-01T23:59:00Z").unwrap(), expected);
        assert_eq!(parse_instant("2019-02-01 23:59").unwrap(), expected);
        assert_eq!(parse_instant("2019-02-01T23:59").unwrap(), expected);
        assert_eq!(
            parse_instant("2019-02-02").unwrap(),
            Utc.with_ymd_and_hms(2019, 2, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_instant_offset_is_normalized() {
        let parsed = parse_instant("2019-02-02T09:00:00+09:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2019, 2, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert_eq!(
            parse_instant("yesterday"),
            Err(CoreError::InvalidTime("yesterday".to_string()))
        );
    }

    #[test]
    fn test_from_unix() {
        assert_eq!(from_unix(1549066320).unwrap().timestamp(), 1549066320);
    }
}
