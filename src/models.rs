use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::error::ValidationError;

/// 显示主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// 一条问答记录，插入后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(serialize_with = "serialize_millis")]
    pub created_at: DateTime<Utc>,
}

/// 固定毫秒精度，字典序与时间序一致
fn serialize_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl QuestionRecord {
    /// 去掉首尾空白后校验并创建记录
    pub fn new(
        question: &str,
        answer: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        if answer.is_empty() {
            return Err(ValidationError::EmptyAnswer);
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            created_at,
        })
    }

    /// 本地时间的简短显示
    pub fn created_display(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_theme_toggle_is_an_involution() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn test_theme_wire_format() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<Theme>("\"light\"").unwrap(),
            Theme::Light
        );
        assert!(serde_json::from_str::<Theme>("\"sepia\"").is_err());
    }

    #[test]
    fn test_record_trims_and_validates() {
        let now = Utc::now();
        let record = QuestionRecord::new("  What is Rust?  ", "\tA language.\n", now).unwrap();
        assert_eq!(record.question, "What is Rust?");
        assert_eq!(record.answer, "A language.");
        assert_eq!(record.created_at, now);

        assert_eq!(
            QuestionRecord::new("   ", "x", now),
            Err(ValidationError::EmptyQuestion)
        );
        assert_eq!(
            QuestionRecord::new("q", "", now),
            Err(ValidationError::EmptyAnswer)
        );
    }

    #[test]
    fn test_record_wire_format() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 20).unwrap();
        let record = QuestionRecord::new("q", "a", created_at).unwrap();
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], record.id.as_str());
        assert_eq!(json["question"], "q");
        assert_eq!(json["answer"], "a");
        assert_eq!(json["createdAt"], "2024-05-01T10:00:20.000Z");
    }

    #[test]
    fn test_created_at_sorts_lexically() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 20).unwrap();
        let times = [
            base,
            base + Duration::milliseconds(100),
            base + Duration::milliseconds(100) + Duration::nanoseconds(1),
            base + Duration::nanoseconds(123_456_789),
            base + Duration::seconds(1),
        ];

        let encoded: Vec<String> = times
            .iter()
            .map(|&at| {
                let record = QuestionRecord::new("q", "a", at).unwrap();
                serde_json::to_value(&record).unwrap()["createdAt"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert!(encoded.iter().all(|s| s.len() == "2024-05-01T10:00:20.000Z".len()));
        for pair in encoded.windows(2) {
            assert!(pair[0] <= pair[1], "{} sorts after {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_reads_browser_style_timestamps() {
        let raw = r#"{"id":"1","question":"q","answer":"a","createdAt":"2024-05-01T10:00:00.000Z"}"#;
        let record: QuestionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }
}
