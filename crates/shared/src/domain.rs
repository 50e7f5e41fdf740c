use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies one input of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Email,
    Number,
}

impl FormField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Number => "number",
        }
    }
}

/// Raw field values as typed by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub email: String,
    pub number: Option<String>,
}

impl FormInput {
    pub fn new(email: impl Into<String>, number: Option<String>) -> Self {
        Self {
            email: email.into(),
            number,
        }
    }
}

/// A validated search request. Only [`FormInput::validate`] builds one, so an
/// instance always carries a non-empty email and, when present, a well-formed
/// number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<String>,
}

impl SearchQuery {
    pub(crate) fn new(email: String, number: Option<String>) -> Self {
        Self { email, number }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Query string pairs in wire order. `number` is left out entirely when
    /// absent; it is never sent as an empty value.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![(FormField::Email.name(), self.email.as_str())];
        if let Some(number) = self.number.as_deref() {
            pairs.push((FormField::Number.name(), number));
        }
        pairs
    }
}

/// One row returned by the search service. The shape is owned by the service,
/// so the record is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRecord(pub Value);

impl ResultRecord {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ResultRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
