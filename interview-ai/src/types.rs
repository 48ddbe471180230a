use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

/// Parameters of one interview-questions request, already validated.
///
/// `experience` is kept as the caller sent it (a number or free text), so it
/// is rendered into the prompt unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionsParams {
    pub role: String,
    pub experience: String,
    pub focus_topics: String,
    pub question_count: u32,
}

/// One generated interview question with its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// The object shape the explanation prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConceptExplanation {
    pub title: String,
    pub explanation: String,
}

/// Body of a successful explanation request: the model text, unparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub explanation: String,
}

/// Outcome of decoding model text.
///
/// Serializes as:
/// - `Structured(t)` → `t`
/// - `Json(v)` → `v` (valid JSON in an unexpected shape, passed through)
/// - `RawText(s)` → `{"result": s}`
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedPayload<T> {
    Structured(T),
    Json(serde_json::Value),
    RawText(String),
}

impl<T> GeneratedPayload<T> {
    pub fn is_structured(&self) -> bool {
        matches!(self, GeneratedPayload::Structured(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GeneratedPayload::Structured(_) => "structured",
            GeneratedPayload::Json(_) => "json",
            GeneratedPayload::RawText(_) => "raw_text",
        }
    }
}

impl<T: Serialize> Serialize for GeneratedPayload<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GeneratedPayload::Structured(t) => t.serialize(serializer),
            GeneratedPayload::Json(v) => v.serialize(serializer),
            GeneratedPayload::RawText(text) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("result", text)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_serializes_per_variant() {
        let structured: GeneratedPayload<Vec<QaPair>> = GeneratedPayload::Structured(vec![QaPair {
            question: "Q1".into(),
            answer: "A1".into(),
        }]);
        assert_eq!(
            serde_json::to_string(&structured).unwrap(),
            r#"[{"question":"Q1","answer":"A1"}]"#
        );

        let passthrough: GeneratedPayload<Vec<QaPair>> =
            GeneratedPayload::Json(json!({ "questions": [] }));
        assert_eq!(serde_json::to_value(&passthrough).unwrap(), json!({ "questions": [] }));

        let raw: GeneratedPayload<Vec<QaPair>> = GeneratedPayload::RawText("not json".into());
        assert_eq!(serde_json::to_string(&raw).unwrap(), r#"{"result":"not json"}"#);
    }
}
