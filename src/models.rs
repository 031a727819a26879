use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layout of the `expire` field returned by `/v1/access_token`.
///
/// No offset, no fractional seconds.
pub const EXPIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Credential returned by [`Client::get_token`](crate::Client::get_token).
///
/// The client never caches tokens: track [`expire`](Self::expire) yourself and
/// fetch a new one when it lapses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAccessToken")]
pub struct AccessToken {
    pub token: String,
    /// Expiry as sent by the API. Qencode reports it in UTC.
    pub expire: NaiveDateTime,
}

impl AccessToken {
    /// [`expire`](Self::expire) pinned to UTC.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expire.and_utc()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// Wire shape of the token response before the timestamp is parsed.
#[derive(Deserialize)]
struct RawAccessToken {
    token: String,
    expire: String,
}

/// Why an `expire` value was rejected.
#[derive(Error, Debug)]
pub enum ExpireError {
    #[error("expire {0:?} is not laid out as YYYY-MM-DDThh:mm:ss")]
    Layout(String),

    #[error("invalid expire: {0}")]
    Parse(#[from] chrono::ParseError),
}

impl TryFrom<RawAccessToken> for AccessToken {
    type Error = ExpireError;

    fn try_from(raw: RawAccessToken) -> Result<Self, Self::Error> {
        Ok(Self {
            token: raw.token,
            expire: parse_expire(&raw.expire)?,
        })
    }
}

/// Parses `YYYY-MM-DDThh:mm:ss` with every field at fixed width.
///
/// chrono alone accepts short fields, padding and a signed year, so the
/// layout is checked byte by byte first.
pub(crate) fn parse_expire(value: &str) -> Result<NaiveDateTime, ExpireError> {
    let fixed_layout = value.len() == 19
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            10 => b == b'T',
            13 | 16 => b == b':',
            _ => b.is_ascii_digit(),
        });
    if !fixed_layout {
        return Err(ExpireError::Layout(value.to_string()));
    }

    Ok(NaiveDateTime::parse_from_str(value, EXPIRE_FORMAT)?)
}

/// `POST /v1/create_task` response.
///
/// `error` is the API's own status code and is not turned into a
/// [`QencodeError`](crate::QencodeError); anything other than `0` means the
/// task was not created, and the API then usually omits the other fields,
/// which decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateTaskResponse {
    pub error: i64,
    /// Where source media can be uploaded before starting the task.
    pub upload_url: String,
    pub task_token: String,
}

/// `POST /v1/start_encode2` response.
///
/// As with [`CreateTaskResponse`], a non-zero `error` is left for the caller
/// and missing fields decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StartTaskResponse {
    pub error: i64,
    /// Poll this to follow encoding progress.
    pub status_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expected_expire() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 9, 19)
            .unwrap()
            .and_hms_opt(1, 35, 57)
            .unwrap()
    }

    #[test]
    fn decodes_token_with_custom_timestamp() {
        let body = r#"
            {
                "token": "1357924680",
                "expire": "2021-09-19T01:35:57"
            }"#;

        let token: AccessToken = serde_json::from_str(body).unwrap();

        assert_eq!(
            token,
            AccessToken {
                token: "1357924680".into(),
                expire: expected_expire(),
            }
        );
        assert_eq!(
            token.expires_at().to_rfc3339(),
            "2021-09-19T01:35:57+00:00"
        );
    }

    #[test]
    fn rejects_malformed_timestamps() {
        for expire in [
            "invalid time",
            "2021-09-19T01:35:57Z",
            "2021-09-19T01:35:57+02:00",
            "2021-09-19T01:35:57.123",
            "2021-09-19 01:35:57",
            "2021-09-19",
            "2021-9-19T1:35:57",
            "2021-09-19T01:35:5",
            " 2021-09-19T01:35:57",
            "+2021-09-19T01:35:57",
            "2021-09-19T01:35:57 ",
            "2021-13-19T01:35:57",
            "2021-02-30T01:35:57",
            "2021-09-19T24:35:57",
            "２021-09-19T01:35:57",
        ] {
            let body = serde_json::json!({ "token": "1357924680", "expire": expire });
            let result = serde_json::from_value::<AccessToken>(body);
            assert!(result.is_err(), "{expire:?} should not parse");
        }
    }

    #[test]
    fn reports_layout_and_calendar_errors_separately() {
        assert!(matches!(
            parse_expire("2021-09-19T01:35:5"),
            Err(ExpireError::Layout(_))
        ));
        assert!(matches!(
            parse_expire("2021-02-30T01:35:57"),
            Err(ExpireError::Parse(_))
        ));
        assert_eq!(parse_expire("2021-09-19T01:35:57").unwrap(), expected_expire());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(serde_json::from_str::<AccessToken>("invalid").is_err());
        assert!(serde_json::from_str::<AccessToken>(r#"{"token":"abc"}"#).is_err());
    }

    #[test]
    fn expiry_check_is_inclusive() {
        let token = AccessToken {
            token: "t".into(),
            expire: expected_expire(),
        };
        let at = expected_expire().and_utc();

        assert!(!token.is_expired_at(at - chrono::Duration::seconds(1)));
        assert!(token.is_expired_at(at));
    }

    #[test]
    fn task_responses_keep_embedded_error_code() {
        let created: CreateTaskResponse = serde_json::from_str(
            r#"{"error": 3, "upload_url": "", "task_token": ""}"#,
        )
        .unwrap();
        assert_eq!(created.error, 3);

        let started: StartTaskResponse =
            serde_json::from_str(r#"{"error": 7, "status_url": ""}"#).unwrap();
        assert_eq!(started.error, 7);
    }

    #[test]
    fn task_responses_keep_error_code_without_other_fields() {
        let created: CreateTaskResponse =
            serde_json::from_str(r#"{"error": 1, "message": "token expired"}"#).unwrap();
        assert_eq!(
            created,
            CreateTaskResponse {
                error: 1,
                ..Default::default()
            }
        );

        let started: StartTaskResponse =
            serde_json::from_str(r#"{"error": 2, "message": "bad query"}"#).unwrap();
        assert_eq!(
            started,
            StartTaskResponse {
                error: 2,
                status_url: String::new(),
            }
        );
    }
}
