//! Issue number normalization.
//!
//! GCD stores issue numbers as free text: `001`, `12.5`, `3a`, `-1`, `[nn]`.
//! The host compares normalized strings, so the numeric part is split from any
//! suffix and re-rendered without zero padding.
//!
//! ```
//! use gcd_talker_catalog::IssueNumber;
//!
//! assert_eq!(IssueNumber::parse("001").as_string(), "1");
//! assert_eq!(IssueNumber::parse("12.50").as_string(), "12.5");
//! assert_eq!(IssueNumber::parse("3a").as_string(), "3a");
//! assert_eq!(IssueNumber::parse("[nn]").as_string(), "[nn]");
//! ```

/// The GCD label for issues without a printed number (TPBs, one-shots).
pub const NO_NUMBER: &str = "[nn]";

/// An issue number split into its numeric part and trailing suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueNumber {
    num: Option<f64>,
    suffix: String,
}

impl IssueNumber {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self {
                num: None,
                suffix: String::new(),
            };
        }
        if text == "½" {
            return Self {
                num: Some(0.5),
                suffix: String::new(),
            };
        }

        let bytes = text.as_bytes();
        let start = usize::from(bytes[0] == b'-');
        let leads_numeric = bytes
            .get(start)
            .is_some_and(|b| b.is_ascii_digit() || *b == b'.');
        if !leads_numeric {
            return Self {
                num: None,
                suffix: text.to_string(),
            };
        }

        // Split at the first non-numeric byte, or at a second decimal point.
        let mut split = bytes.len();
        let mut decimals = 0;
        for (i, b) in bytes.iter().enumerate().skip(start) {
            if *b == b'.' {
                decimals += 1;
                if decimals > 1 {
                    split = i;
                    break;
                }
            } else if !b.is_ascii_digit() {
                split = i;
                break;
            }
        }

        // A trailing '.' belongs to the suffix when something follows it.
        if split > 0 && bytes[split - 1] == b'.' && split != bytes.len() {
            split -= 1;
        }
        // A lone '-' with nothing numeric after it is just text.
        if split == 1 && start == 1 {
            split = 0;
        }

        let (numeric, suffix) = text.split_at(split);
        let num = if numeric.is_empty() {
            None
        } else {
            numeric.parse::<f64>().ok()
        };
        match num {
            Some(n) => Self {
                num: Some(n),
                suffix: suffix.to_string(),
            },
            None => Self {
                num: None,
                suffix: text.to_string(),
            },
        }
    }

    /// Numeric part, if the issue number starts with one.
    pub fn as_float(&self) -> Option<f64> {
        self.num
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// True for the GCD "no number" label.
    pub fn is_unnumbered(&self) -> bool {
        self.num.is_none() && self.suffix.eq_ignore_ascii_case(NO_NUMBER)
    }

    /// Render the normalized form: integer part without padding, the
    /// fraction only when non-zero, then the suffix.
    pub fn as_string(&self) -> String {
        let Some(num) = self.num else {
            return self.suffix.clone();
        };
        let magnitude = num.abs();
        let mut rendered = if magnitude.fract() == 0.0 {
            format!("{}", magnitude as i64)
        } else {
            format!("{magnitude}")
        };
        rendered.push_str(&self.suffix);
        if num < 0.0 {
            rendered.insert(0, '-');
        }
        rendered
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}
