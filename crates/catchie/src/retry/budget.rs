//! Retry budget coercion.
//!
//! Callers hand the executor a loosely typed retry count: an integer, some
//! text, or nothing at all. [`RetryCount::resolve`] turns that into the number
//! of retries allowed after the initial attempt.

/// Requested number of retries, before coercion.
///
/// # Examples
///
/// ```rust
/// use catchie::retry::RetryCount;
///
/// assert_eq!(RetryCount::from(4).resolve(None), 4);
/// assert_eq!(RetryCount::from("4").resolve(None), 4);
/// assert_eq!(RetryCount::from("").resolve(Some("10")), 10);
/// assert_eq!(RetryCount::Default.resolve(Some("garbage")), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RetryCount {
    /// No count given; use the configured default.
    #[default]
    Default,
    /// An explicit integer count.
    Count(i64),
    /// A count given as text, parsed on resolution.
    Text(String),
}

impl RetryCount {
    /// Resolve the number of retries to perform.
    ///
    /// `fallback` is the configured default budget, as raw text. It is used
    /// when no count was given or the given text is empty or unparseable. If
    /// the fallback is missing or unparseable too, the budget is 0. Negative
    /// counts mean no retries.
    pub fn resolve(&self, fallback: Option<&str>) -> u32 {
        let requested = match self {
            Self::Count(n) => Some(*n),
            Self::Text(text) => parse_int(text),
            Self::Default => None,
        };

        let count = requested
            .or_else(|| fallback.and_then(parse_int))
            .unwrap_or(0);

        u32::try_from(count.max(0)).unwrap_or(u32::MAX)
    }
}

impl From<i64> for RetryCount {
    fn from(count: i64) -> Self {
        Self::Count(count)
    }
}

impl From<i32> for RetryCount {
    fn from(count: i32) -> Self {
        Self::Count(i64::from(count))
    }
}

impl From<u32> for RetryCount {
    fn from(count: u32) -> Self {
        Self::Count(i64::from(count))
    }
}

impl From<usize> for RetryCount {
    fn from(count: usize) -> Self {
        Self::Count(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

impl From<&str> for RetryCount {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RetryCount {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<()> for RetryCount {
    fn from(_: ()) -> Self {
        Self::Default
    }
}

impl<T: Into<RetryCount>> From<Option<T>> for RetryCount {
    fn from(count: Option<T>) -> Self {
        count.map_or(Self::Default, Into::into)
    }
}

/// Parse the leading integer of `text`.
///
/// Leading whitespace is skipped, an optional sign is accepted, and parsing
/// stops at the first non-digit. Returns `None` when no digit follows.
/// Values beyond the `i64` range saturate.
pub fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}
