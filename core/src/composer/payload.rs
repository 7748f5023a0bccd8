use serde_json::Value;

use crate::error::LabError;

pub const DEFAULT_EXECUTION_PAYLOAD: &str = r#"{
  "contract_type": "ESCROW",
  "method": "release",
  "params": {
    "recipient": "0xabc",
    "amountUsd": 250000
  }
}"#;

/// Raw execution payload buffer. The text is authoritative; parsing happens only at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPayload {
    text: String,
}

impl Default for ExecutionPayload {
    fn default() -> Self {
        Self::new(DEFAULT_EXECUTION_PAYLOAD)
    }
}

impl ExecutionPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn parse(&self) -> Result<Value, LabError> {
        serde_json::from_str(&self.text).map_err(LabError::MalformedPayload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arbitrary_json_documents_are_accepted() {
        for text in ["[1, 2, 3]", "\"release\"", "null", "42", "{\"nested\": {\"a\": [true]}}"] {
            assert!(ExecutionPayload::new(text).parse().is_ok(), "{text}");
        }
    }

    #[test]
    fn empty_and_truncated_buffers_are_malformed() {
        for text in ["", "   ", "{ invalid", "{\"a\": 1,}"] {
            assert!(
                matches!(ExecutionPayload::new(text).parse(), Err(LabError::MalformedPayload(_))),
                "{text:?}"
            );
        }
    }
}
