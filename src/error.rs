//! Unified editor error type used across all phases.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Classify,
    Elements,
    Load,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Classify => write!(f, "Classify"),
            Phase::Elements => write!(f, "Elements"),
            Phase::Load => write!(f, "Load"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub parameter_key: Option<String>,
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.parameter_key {
            Some(key) => write!(
                f,
                "[{}:{}] {} (parameter '{}')",
                self.phase, self.code, self.message, key
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl std::error::Error for EditorError {}

impl EditorError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        EditorError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            parameter_key: None,
        }
    }

    pub fn classify(code: &str, message: impl Into<String>, parameter_key: Option<String>) -> Self {
        EditorError {
            code: code.into(),
            phase: Phase::Classify,
            message: message.into(),
            parameter_key,
        }
    }

    /// Structural problem in the built graph elements. Not tied to a parameter.
    pub fn elements(code: &str, message: impl Into<String>) -> Self {
        EditorError {
            code: code.into(),
            phase: Phase::Elements,
            message: message.into(),
            parameter_key: None,
        }
    }

    pub fn load(code: &str, message: impl Into<String>) -> Self {
        EditorError {
            code: code.into(),
            phase: Phase::Load,
            message: message.into(),
            parameter_key: None,
        }
    }
}

/// Failure of an asynchronous editor load.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("editor load was cancelled")]
    Cancelled,
    #[error("{} parameter(s) could not be classified", .0.len())]
    Classify(Vec<EditorError>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_parameter_key() {
        let err = EditorError::classify("C001", "Unrecognized parameter type 'x'", Some("p1".into()));
        assert_eq!(
            err.to_string(),
            "[Classify:C001] Unrecognized parameter type 'x' (parameter 'p1')"
        );
    }

    #[test]
    fn display_without_parameter_key() {
        let err = EditorError::parse("P001", "bad json");
        assert_eq!(err.to_string(), "[Parse:P001] bad json");
    }

    #[test]
    fn load_error_counts_classify_failures() {
        let err = LoadError::Classify(vec![
            EditorError::classify("C001", "a", None),
            EditorError::classify("C001", "b", None),
        ]);
        assert_eq!(err.to_string(), "2 parameter(s) could not be classified");
    }
}
