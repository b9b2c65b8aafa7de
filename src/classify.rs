use std::fmt;

const DUPLICATE_ENTRY: &str = "23000";
const AUTHENTICATION_FAILED: &str = "28000";
const SYNTAX_ERROR: &str = "42000";

/// Category assigned to a driver error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// SQLSTATE 23000. `key` names the unique field the message mentions, if any.
    DuplicateEntry { key: Option<String> },
    /// SQLSTATE 28000
    AuthenticationFailed,
    /// SQLSTATE 42000
    SyntaxError,
    /// Any other code, or no code at all.
    Unclassified,
}

/// A driver error message together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    category: ErrorCategory,
    sqlstate: Option<String>,
    raw: String,
}

impl ErrorRecord {
    /// Classifies `raw` with the default classifier.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        ErrorClassifier::default().classify(raw)
    }

    pub fn category(&self) -> &ErrorCategory {
        &self.category
    }

    /// The five-character SQLSTATE found in the message, if any.
    pub fn sqlstate(&self) -> Option<&str> {
        self.sqlstate.as_deref()
    }

    /// The message exactly as the driver reported it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Human readable message. Unclassified errors pass the raw text through.
    pub fn message(&self) -> String {
        match &self.category {
            ErrorCategory::DuplicateEntry { key: Some(key) } => {
                format!("Duplicate entry for key '{}'", key)
            }
            ErrorCategory::DuplicateEntry { key: None } => "Duplicate entry".to_string(),
            ErrorCategory::AuthenticationFailed => "Authentication failed".to_string(),
            ErrorCategory::SyntaxError => "SQL syntax error".to_string(),
            ErrorCategory::Unclassified => self.raw.clone(),
        }
    }

    pub fn is_duplicate_entry(&self) -> bool {
        matches!(self.category, ErrorCategory::DuplicateEntry { .. })
    }

    pub fn is_authentication_failure(&self) -> bool {
        self.category == ErrorCategory::AuthenticationFailed
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Classifies raw driver messages by the SQLSTATE they carry.
///
/// Duplicate-entry messages are sub-classified by looking for the configured
/// unique field names anywhere in the message. This is a substring heuristic,
/// not a parse: a field name that happens to appear in the duplicated value
/// will match too.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier {
    unique_keys: Vec<String>,
}

impl ErrorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field names backed by unique constraints, checked in order.
    pub fn unique_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn classify(&self, raw: impl Into<String>) -> ErrorRecord {
        let raw = raw.into();
        let sqlstate = extract_sqlstate(&raw).map(str::to_string);

        let category = match sqlstate.as_deref() {
            Some(DUPLICATE_ENTRY) => ErrorCategory::DuplicateEntry {
                key: self.duplicate_key(&raw),
            },
            Some(AUTHENTICATION_FAILED) => ErrorCategory::AuthenticationFailed,
            Some(SYNTAX_ERROR) => ErrorCategory::SyntaxError,
            _ => ErrorCategory::Unclassified,
        };

        ErrorRecord {
            category,
            sqlstate,
            raw,
        }
    }

    fn duplicate_key(&self, raw: &str) -> Option<String> {
        if let Some(key) = self.unique_keys.iter().find(|key| raw.contains(key.as_str())) {
            return Some(key.clone());
        }

        // MySQL: "Duplicate entry 'x' for key 'users.email'"
        let (_, rest) = raw.split_once("for key '")?;
        let (key, _) = rest.split_once('\'')?;
        Some(key.to_string())
    }
}

/// Classifies a raw driver message with the default classifier.
pub fn classify_error(raw: &str) -> ErrorRecord {
    ErrorClassifier::default().classify(raw)
}

/// Picks the code from the PDO-style `SQLSTATE[xxxxx]` markers in `raw`.
///
/// Wrapped messages can carry several markers; the first one with a known
/// category wins, otherwise the first well-formed one.
fn extract_sqlstate(raw: &str) -> Option<&str> {
    let codes: Vec<&str> = sqlstate_markers(raw).collect();
    codes
        .iter()
        .find(|code| matches!(**code, DUPLICATE_ENTRY | AUTHENTICATION_FAILED | SYNTAX_ERROR))
        .or_else(|| codes.first())
        .copied()
}

/// Every well-formed `SQLSTATE[xxxxx]` code in `raw`, in order.
fn sqlstate_markers(raw: &str) -> impl Iterator<Item = &str> {
    raw.split("SQLSTATE[").skip(1).filter_map(|rest| {
        let (code, _) = rest.split_once(']')?;
        (code.len() == 5 && code.chars().all(|c| c.is_ascii_alphanumeric())).then_some(code)
    })
}
