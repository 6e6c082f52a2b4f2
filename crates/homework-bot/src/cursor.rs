use chrono::Utc;

/// Lower bound (epoch seconds) of the next review API query window.
///
/// Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(u64);

impl Cursor {
    pub fn new(timestamp: u64) -> Self {
        Self(timestamp)
    }

    pub fn now() -> Self {
        Self(Utc::now().timestamp().max(0) as u64)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Move the cursor to `timestamp`. Returns false and leaves the cursor
    /// alone if that would move it backwards.
    pub fn advance_to(&mut self, timestamp: u64) -> bool {
        if timestamp < self.0 {
            return false;
        }
        self.0 = timestamp;
        true
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_never_goes_back() {
        let mut cursor = Cursor::new(1000);

        assert!(cursor.advance_to(1500));
        assert_eq!(cursor.value(), 1500);

        assert!(!cursor.advance_to(900));
        assert_eq!(cursor.value(), 1500);

        assert!(cursor.advance_to(1500));
        assert_eq!(cursor.value(), 1500);
    }

    #[test]
    fn test_now_is_recent() {
        // 2023-11-14, well before any run of this test
        assert!(Cursor::now().value() > 1_700_000_000);
    }
}
