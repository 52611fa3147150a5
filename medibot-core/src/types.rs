use serde::{Deserialize, Deserializer, Serialize};

/// `action` value that asks the client to offer a video call with the provider.
pub const ACTION_VIDEO_CALL: &str = "video_call";

/// Body of `POST /chat`.
///
/// `language` is the wire code of the language selected when the user submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
    pub language: String,
}

/// A matched provider as sent by the backend. Display-only on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Provider {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialty: String, // raw, possibly unlocalized
    #[serde(default, deserialize_with = "display_string")]
    pub experience: String, // "10 yrs", or a bare number in older doctor records
    #[serde(default)]
    pub meet_link: String,
}

/// Terminal reply of a triage conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub message: String,
    pub action: Option<String>,
    pub doctor: Option<Provider>,
    /// Canonical specialty identifier, not localized.
    pub specialty: Option<String>,
}

impl Diagnosis {
    /// True when the backend asks for a video call and named a provider for it.
    pub fn offers_video_call(&self) -> bool {
        self.action.as_deref() == Some(ACTION_VIDEO_CALL) && self.doctor.is_some()
    }
}

/// A reply from the diagnostic backend, classified by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticReply {
    /// The backend needs more information; `message` is the next question.
    Question { message: String },
    Diagnosis(Diagnosis),
    /// Parsed, but `type` is not one this client knows. Rendered as nothing.
    Unrecognized { kind: String },
}

#[derive(Deserialize)]
struct WireReply {
    #[serde(rename = "type", default, deserialize_with = "kind_string")]
    kind: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    doctor: Option<Provider>,
    #[serde(default)]
    specialty: Option<String>,
    #[serde(default)]
    data: Option<WireEnvelope>,
}

/// The `data` envelope some backend versions wrap diagnosis details in.
#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(default)]
    specialty: Option<String>,
    #[serde(default)]
    doctor: Option<Provider>,
    #[serde(default)]
    recommended_action: Option<String>,
}

impl DiagnosticReply {
    /// Decodes a reply body.
    ///
    /// Top-level `action` / `doctor` / `specialty` take precedence over the
    /// same details inside a `data` envelope. `question` and `diagnosis`
    /// replies must carry a `message`; any other `type` decodes to
    /// [`DiagnosticReply::Unrecognized`] regardless of its other fields.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` for malformed JSON or a known reply type
    /// without a `message`.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let wire: WireReply = serde_json::from_str(body)?;
        match wire.kind.as_str() {
            "question" => Ok(DiagnosticReply::Question {
                message: require_message(wire.message)?,
            }),
            "diagnosis" => {
                let message = require_message(wire.message)?;
                let (data_specialty, data_doctor, data_action) = match wire.data {
                    Some(d) => (d.specialty, d.doctor, d.recommended_action),
                    None => (None, None, None),
                };
                Ok(DiagnosticReply::Diagnosis(Diagnosis {
                    message,
                    action: non_blank(wire.action).or(non_blank(data_action)),
                    doctor: wire.doctor.or(data_doctor),
                    specialty: non_blank(wire.specialty).or(non_blank(data_specialty)),
                }))
            }
            other => Ok(DiagnosticReply::Unrecognized { kind: other.to_owned() }),
        }
    }
}

fn require_message(message: Option<String>) -> Result<String, serde_json::Error> {
    message.ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field("message"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reads `type`; a non-string value (null, number, object) becomes `""` so
/// the reply classifies as unrecognized instead of failing to decode.
fn kind_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

/// Accepts a string, number, or null and renders it as display text.
fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Who a transcript turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// Display fields of a matched provider, already localized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCard {
    pub heading: String,        // localized "Match Found"
    pub doctor_name: String,
    pub specialty_label: String,
    pub experience: String,
    pub meet_link: String,
    pub join_label: String,     // localized "Join Video Call"
}

/// One rendered transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub sender: Sender,
    pub body: String,
    pub attachment: Option<MatchCard>,
}

impl Turn {
    pub fn user(body: impl Into<String>) -> Self {
        Self { sender: Sender::User, body: body.into(), attachment: None }
    }

    pub fn assistant(body: impl Into<String>) -> Self {
        Self { sender: Sender::Assistant, body: body.into(), attachment: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_reply_decodes() {
        let reply = DiagnosticReply::from_json(
            r#"{"type":"question","message":"How long have you had the fever?","data":null}"#,
        )
        .unwrap();
        assert_eq!(
            reply,
            DiagnosticReply::Question { message: "How long have you had the fever?".into() }
        );
    }

    #[test]
    fn flat_diagnosis_decodes() {
        let reply = DiagnosticReply::from_json(
            r#"{"type":"diagnosis","message":"Please consult a specialist","action":"video_call",
                "specialty":"Cardiology",
                "doctor":{"name":"Dr. A","specialty":"Cardiology","experience":"10 yrs","meet_link":"https://x"}}"#,
        )
        .unwrap();
        let DiagnosticReply::Diagnosis(diagnosis) = reply else {
            panic!("expected diagnosis, got {reply:?}");
        };
        assert!(diagnosis.offers_video_call());
        assert_eq!(diagnosis.specialty.as_deref(), Some("Cardiology"));
        assert_eq!(diagnosis.doctor.unwrap().meet_link, "https://x");
    }

    #[test]
    fn enveloped_diagnosis_fills_missing_fields() {
        let reply = DiagnosticReply::from_json(
            r#"{"type":"diagnosis","message":"Diagnosis complete.",
                "data":{"specialty":"Neurology","specialty_translated":"न्यूरोलॉजी",
                        "doctor":{"name":"Dr. B","specialty":"Neurology","experience":12,"meet_link":"https://y"},
                        "recommended_action":"video_call"}}"#,
        )
        .unwrap();
        let DiagnosticReply::Diagnosis(diagnosis) = reply else {
            panic!("expected diagnosis, got {reply:?}");
        };
        assert_eq!(diagnosis.action.as_deref(), Some(ACTION_VIDEO_CALL));
        assert_eq!(diagnosis.specialty.as_deref(), Some("Neurology"));
        assert_eq!(diagnosis.doctor.unwrap().experience, "12");
    }

    #[test]
    fn schedule_visit_without_doctor_does_not_offer_a_call() {
        let reply = DiagnosticReply::from_json(
            r#"{"type":"diagnosis","message":"Done","data":{"specialty":"Dentistry","doctor":null,"recommended_action":"schedule_visit"}}"#,
        )
        .unwrap();
        let DiagnosticReply::Diagnosis(diagnosis) = reply else {
            panic!("expected diagnosis, got {reply:?}");
        };
        assert!(!diagnosis.offers_video_call());
    }

    #[test]
    fn unknown_type_is_unrecognized_not_an_error() {
        let reply = DiagnosticReply::from_json(r#"{"type":"triage_update","progress":0.5}"#).unwrap();
        assert_eq!(reply, DiagnosticReply::Unrecognized { kind: "triage_update".into() });
    }

    #[test]
    fn non_string_type_is_unrecognized() {
        for body in [
            r#"{"type":null,"message":"x"}"#,
            r#"{"type":5,"message":"x"}"#,
            r#"{"type":{"name":"question"},"message":"x"}"#,
            r#"{"message":"x"}"#,
        ] {
            let reply = DiagnosticReply::from_json(body).unwrap();
            assert_eq!(reply, DiagnosticReply::Unrecognized { kind: String::new() }, "{body}");
        }
    }

    #[test]
    fn question_without_message_is_rejected() {
        assert!(DiagnosticReply::from_json(r#"{"type":"question"}"#).is_err());
        assert!(DiagnosticReply::from_json("<html>502</html>").is_err());
    }
}
