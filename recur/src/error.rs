use thiserror::Error;

/// All errors produced by recur.
///
/// The evaluator itself never fails; these come from parsing rule
/// descriptors, dates, times and session documents at the input boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecurError {
    #[error("invalid rule '{input}': {message}")]
    InvalidRule {
        message: String,
        input: String,
        suggestion: Option<String>,
    },

    #[error("invalid monthly pattern '{input}': {message}")]
    InvalidPattern {
        message: String,
        input: String,
        suggestion: Option<String>,
    },

    #[error("unknown weekday '{0}'")]
    InvalidWeekday(String),

    #[error("interval must be a positive integer, got '{0}'")]
    InvalidInterval(String),

    #[error("invalid date '{input}': {message}")]
    InvalidDate { input: String, message: String },

    #[error("invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("unknown date format '{0}'")]
    UnknownFormat(String),

    #[error("unknown locale '{0}'")]
    UnknownLocale(String),

    #[cfg(feature = "serde")]
    #[error("invalid session: {0}")]
    Session(#[from] serde_json::Error),

    #[error("cannot read session: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecurError>;

impl RecurError {
    pub fn rule(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::InvalidRule {
            message: message.into(),
            input: input.into(),
            suggestion: None,
        }
    }

    pub fn pattern(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::InvalidPattern {
            message: message.into(),
            input: input.into(),
            suggestion: None,
        }
    }

    pub fn date(input: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidDate {
            input: input.into(),
            message: err.to_string(),
        }
    }

    /// Attach a "try: ..." hint to rule and pattern errors.
    pub fn with_suggestion(mut self, hint: impl Into<String>) -> Self {
        match &mut self {
            Self::InvalidRule { suggestion, .. } | Self::InvalidPattern { suggestion, .. } => {
                *suggestion = Some(hint.into());
            }
            _ => {}
        }
        self
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::InvalidRule { suggestion, .. } | Self::InvalidPattern { suggestion, .. } => {
                suggestion.as_deref()
            }
            _ => None,
        }
    }

    /// Format the error for a terminal, with the suggestion if there is one.
    pub fn display_rich(&self) -> String {
        match self.suggestion() {
            Some(sug) => format!("error: {self}\n  try: \"{sug}\""),
            None => format!("error: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rich_with_suggestion() {
        let err = RecurError::rule("unknown frequency 'wekly'", "wekly/2").with_suggestion("weekly/2");
        assert_eq!(
            err.display_rich(),
            "error: invalid rule 'wekly/2': unknown frequency 'wekly'\n  try: \"weekly/2\""
        );
    }

    #[test]
    fn test_suggestion_ignored_for_other_variants() {
        let err = RecurError::InvalidTime("25:00".into()).with_suggestion("09:00");
        assert_eq!(err.suggestion(), None);
        assert_eq!(err.display_rich(), "error: invalid time '25:00': expected HH:MM");
    }
}
