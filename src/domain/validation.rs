use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    OutOfRange {
        field: &'static str,
        min: u8,
        max: u8,
        actual: u8,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidCampaignId {
        input: String,
    },
    InvalidSendTime {
        input: String,
    },
    EndBeforeStart {
        start: String,
        end: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => {
                write!(
                    f,
                    "{field} out of range: {actual} (expected {min}..={max})"
                )
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidCampaignId { input } => {
                write!(f, "campaign id must contain only digits: {input}")
            }
            Self::InvalidSendTime { input } => {
                write!(f, "invalid send time (expected YYYY-MM-DD HH:MM:SS): {input}")
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "end time {end} is earlier than start time {start}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "login" };
        assert_eq!(err.to_string(), "login must not be empty");

        let err = ValidationError::OutOfRange {
            field: "rate",
            min: 1,
            max: 120,
            actual: 121,
        };
        assert_eq!(err.to_string(), "rate out of range: 121 (expected 1..=120)");

        let err = ValidationError::InvalidCampaignId {
            input: "12a".to_owned(),
        };
        assert_eq!(err.to_string(), "campaign id must contain only digits: 12a");

        let err = ValidationError::InvalidSendTime {
            input: "tomorrow".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid send time (expected YYYY-MM-DD HH:MM:SS): tomorrow"
        );

        let err = ValidationError::EndBeforeStart {
            start: "2024-01-02 10:00:00".to_owned(),
            end: "2024-01-01 10:00:00".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "end time 2024-01-01 10:00:00 is earlier than start time 2024-01-02 10:00:00"
        );
    }
}
