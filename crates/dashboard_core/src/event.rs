use serde_json::{Number, Value};

/// Prefix marking an SSE data line.
pub const DATA_PREFIX: &str = "data: ";

/// One decoded operation event from the SSE stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A line of operation output.
    Output { line: String },
    /// The operation finished; `exit_code` is the number as sent, `None` if omitted.
    Complete { exit_code: Option<Number> },
    /// The backend failed to run the operation.
    Error { message: Option<String> },
    /// Any other (or missing) `type`; carries the raw tag for logging.
    Ignored { kind: Option<String> },
}

impl StreamEvent {
    /// Decode the JSON payload of a `data:` line.
    pub fn parse(payload: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(payload)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        match value.get("type").and_then(Value::as_str) {
            Some("output") => StreamEvent::Output {
                line: match value.get("line") {
                    Some(Value::String(line)) => line.clone(),
                    None | Some(Value::Null) => String::new(),
                    Some(other) => other.to_string(),
                },
            },
            Some("complete") => StreamEvent::Complete {
                exit_code: match value.get("exitCode") {
                    Some(Value::Number(code)) => Some(code.clone()),
                    _ => None,
                },
            },
            Some("error") => StreamEvent::Error {
                message: value
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|message| !message.is_empty())
                    .map(ToOwned::to_owned),
            },
            other => StreamEvent::Ignored {
                kind: other.map(ToOwned::to_owned),
            },
        }
    }
}

/// Classification of one raw line from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    Event(StreamEvent),
    Malformed { line: String },
    /// Not a `data:` line (comments, `event:` fields, blank separators).
    Skip,
}

impl SseLine {
    pub fn classify(line: &str) -> Self {
        match line.strip_prefix(DATA_PREFIX) {
            Some(payload) => match StreamEvent::parse(payload) {
                Ok(event) => SseLine::Event(event),
                Err(_) => SseLine::Malformed {
                    line: line.to_string(),
                },
            },
            None => SseLine::Skip,
        }
    }
}
