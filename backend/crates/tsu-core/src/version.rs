use crate::{CoreError, CoreResult};

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Dotted numeric version such as `3.0.13.5`.
///
/// Ordering is segment by segment with missing trailing segments read as
/// zero, so `3.0.13` < `3.0.13.5` and `3.0` == `3.0.0`.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
}

impl Version {
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// True when `self` strictly precedes `latest`.
    pub fn is_older_than(&self, latest: &Version) -> bool {
        self < latest
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for Version {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(CoreError::invalid_version(s, "empty version"));
        }

        let mut segments = Vec::new();
        for part in digits.split('.') {
            if part.is_empty() {
                return Err(CoreError::invalid_version(s, "empty segment"));
            }
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CoreError::invalid_version(
                    s,
                    format!("segment '{}' is not a number", part),
                ));
            }
            let value = part.parse::<u64>().map_err(|_| {
                CoreError::invalid_version(s, format!("segment '{}' is too large", part))
            })?;
            segments.push(value);
        }

        Ok(Self { segments })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}
