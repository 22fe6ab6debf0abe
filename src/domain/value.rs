use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS-Fly account login.
///
/// Invariant: non-empty after trimming.
pub struct Login(String);

impl Login {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// SMS-Fly account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The `Debug` output never contains the password itself.
pub struct Password(String);

impl Password {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Login/password pair sent as HTTP basic authentication.
pub struct Credentials {
    login: Login,
    password: Password,
}

impl Credentials {
    /// Validate both parts and build the credentials.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    pub fn login(&self) -> &Login {
        &self.login
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`<body>`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved;
/// XML escaping happens when the request is encoded.
pub struct MessageText(String);

impl MessageText {
    /// XML element carrying the text.
    pub const FIELD: &'static str = "body";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Alphanumeric sender name ("alfaname"), used as `source` when sending and as the subject of
/// alfaname management commands.
///
/// Invariant: non-empty after trimming. Only names registered for the account are accepted by
/// SMS-Fly.
pub struct Alfaname(String);

impl Alfaname {
    /// XML attribute name used by SMS-Fly (`alfaname`).
    pub const FIELD: &'static str = "alfaname";

    /// Sender used when none is configured.
    pub const DEFAULT_SOURCE: &'static str = "InfoCentr";

    /// Create a validated [`Alfaname`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Alfaname {
    fn default() -> Self {
        Self(Self::DEFAULT_SOURCE.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Campaign (mailing) identifier returned by `SENDSMS`.
///
/// Invariant: non-empty, ASCII digits only.
pub struct CampaignId(String);

impl CampaignId {
    /// XML attribute name used by SMS-Fly (`campaignID`).
    pub const FIELD: &'static str = "campaignID";

    /// Create a validated [`CampaignId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidCampaignId {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for CampaignId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number as sent to SMS-Fly (`<recipient>`).
///
/// Every character other than ASCII digits and `+` is dropped, so `+38 (050) 123-45-67`
/// becomes `+380501234567`. Invariant: non-empty after stripping.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// XML element/attribute name used by SMS-Fly (`recipient`).
    pub const FIELD: &'static str = "recipient";

    /// Strip formatting characters and validate that something is left.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let stripped: String = value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        if stripped.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(stripped))
    }

    /// Stripped value as sent to SMS-Fly.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to its E.164 form.
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "recipient";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix
    /// (for SMS-Fly this is usually [`country::Id::UA`]).
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Sending speed in messages per minute (`rate`).
///
/// Invariant: `1..=120`.
pub struct Rate(u8);

impl Rate {
    /// XML attribute name used by SMS-Fly (`rate`).
    pub const FIELD: &'static str = "rate";

    /// Minimum allowed rate.
    pub const MIN: u8 = 1;
    /// Maximum allowed rate.
    pub const MAX: u8 = 120;

    /// Create a validated rate.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How long SMS-Fly keeps trying to deliver a message, in hours (`lifetime`).
///
/// Invariant: `1..=24`.
pub struct LifetimeHours(u8);

impl LifetimeHours {
    /// XML attribute name used by SMS-Fly (`lifetime`).
    pub const FIELD: &'static str = "lifetime";

    pub const MIN: u8 = 1;
    pub const MAX: u8 = 24;
    /// Value used when none is configured.
    pub const DEFAULT: u8 = 4;

    /// Create a validated lifetime.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for LifetimeHours {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
/// Start or end time of a campaign (`start_time` / `end_time`).
///
/// Either `AUTO` (the server picks: "now" for the start, a computed value for the end) or an
/// explicit local time formatted as `YYYY-MM-DD HH:MM:SS`.
pub struct SendTime(Option<String>);

impl SendTime {
    /// Wire value for [`SendTime::auto`].
    pub const AUTO: &'static str = "AUTO";

    /// Let the server choose the time.
    pub fn auto() -> Self {
        Self(None)
    }

    /// Explicit time in `YYYY-MM-DD HH:MM:SS` form.
    ///
    /// Each field is range-checked on its own; day-of-month is not checked against the month.
    pub fn at(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if !is_timestamp(trimmed) {
            return Err(ValidationError::InvalidSendTime {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(Some(trimmed.to_owned())))
    }

    pub fn is_auto(&self) -> bool {
        self.0.is_none()
    }

    /// Wire representation.
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or(Self::AUTO)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS-Fly state code (`state/@code`).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct StateCode(String);

impl StateCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as provided by SMS-Fly.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known(&self) -> Option<KnownStateCode> {
        KnownStateCode::from_code(&self.0)
    }

    pub fn is_accepted(&self) -> bool {
        self.known() == Some(KnownStateCode::Accept)
    }

    /// Human-readable description for known codes.
    pub fn description(&self) -> Option<&'static str> {
        self.known().map(KnownStateCode::description)
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known `SENDSMS` state codes.
pub enum KnownStateCode {
    Accept,
    XmlError,
    ErrPhones,
    ErrStartTime,
    ErrEndTime,
    ErrLifetime,
    ErrSpeed,
    ErrAlfaname,
    ErrText,
    InsufficientFunds,
}

impl KnownStateCode {
    /// Convert a raw SMS-Fly code into a known variant.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code.trim() {
            "ACCEPT" => Self::Accept,
            "XMLERROR" => Self::XmlError,
            "ERRPHONES" => Self::ErrPhones,
            "ERRSTARTTIME" => Self::ErrStartTime,
            "ERRENDTIME" => Self::ErrEndTime,
            "ERRLIFETIME" => Self::ErrLifetime,
            "ERRSPEED" => Self::ErrSpeed,
            "ERRALFANAME" => Self::ErrAlfaname,
            "ERRTEXT" => Self::ErrText,
            "INSUFFICIENTFUNDS" => Self::InsufficientFunds,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "ACCEPT",
            Self::XmlError => "XMLERROR",
            Self::ErrPhones => "ERRPHONES",
            Self::ErrStartTime => "ERRSTARTTIME",
            Self::ErrEndTime => "ERRENDTIME",
            Self::ErrLifetime => "ERRLIFETIME",
            Self::ErrSpeed => "ERRSPEED",
            Self::ErrAlfaname => "ERRALFANAME",
            Self::ErrText => "ERRTEXT",
            Self::InsufficientFunds => "INSUFFICIENTFUNDS",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Accept => "Message accepted and queued for the campaign.",
            Self::XmlError => "Malformed XML request.",
            Self::ErrPhones => "Invalid recipient phone number.",
            Self::ErrStartTime => "Invalid campaign start time.",
            Self::ErrEndTime => "Invalid campaign end time.",
            Self::ErrLifetime => "Invalid message lifetime.",
            Self::ErrSpeed => "Invalid sending rate.",
            Self::ErrAlfaname => "This sender name is not allowed or is invalid.",
            Self::ErrText => "Invalid message text.",
            Self::InsufficientFunds => {
                "Insufficient funds. Only checked when sending to a single recipient."
            }
        }
    }
}

fn is_timestamp(value: &str) -> bool {
    const PATTERN: &[u8] = b"dddd-dd-dd dd:dd:dd";

    let bytes = value.as_bytes();
    let shaped = bytes.len() == PATTERN.len()
        && bytes.iter().zip(PATTERN).all(|(&b, &p)| match p {
            b'd' => b.is_ascii_digit(),
            sep => b == sep,
        });
    if !shaped {
        return false;
    }

    let field = |at: usize| u32::from(bytes[at] - b'0') * 10 + u32::from(bytes[at + 1] - b'0');
    (1..=12).contains(&field(5))
        && (1..=31).contains(&field(8))
        && field(11) <= 23
        && field(14) <= 59
        && field(17) <= 59
}
