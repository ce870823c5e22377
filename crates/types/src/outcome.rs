use serde_json::Value;

/// Response payload as received from the API.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// No bytes, or whitespace only.
    Empty,
    /// Body parsed as JSON.
    Json(Value),
    /// Body that is not valid JSON, kept verbatim.
    Text(String),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Convert into a JSON value suitable for a result record.
    ///
    /// Text bodies become JSON strings; empty bodies yield `None`.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Empty => None,
            Self::Json(value) => Some(value),
            Self::Text(text) => Some(Value::String(text)),
        }
    }
}

/// A classified API response. Created once per invocation and consumed by the reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiOutcome {
    pub status_code: u16,
    pub body: ResponseBody,
    pub succeeded: bool,
}

impl ApiOutcome {
    pub fn success(status_code: u16, body: ResponseBody) -> Self {
        Self {
            status_code,
            body,
            succeeded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_value_maps_each_body_kind() {
        assert_eq!(ResponseBody::Empty.into_value(), None);
        assert_eq!(ResponseBody::Json(json!({"id": 1})).into_value(), Some(json!({"id": 1})));
        assert_eq!(ResponseBody::Text("accepted".into()).into_value(), Some(json!("accepted")));
    }
}
