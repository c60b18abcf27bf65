/// Values that can be stored in a database row or used as query parameters.
///
/// ```rust
/// use headphones_db::prelude::*;
///
/// let params = vec![
///     RowValues::Text("5b11f4ce-a62d-471e-81fc-a69a8278c7da".into()),
///     RowValues::Int(12),
///     RowValues::Null,
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
    /// NULL value
    Null,
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_int() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Loose truthiness used for legacy flag columns: zero, empty and NULL are false.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            RowValues::Int(i) => *i != 0,
            RowValues::Float(f) => *f != 0.0,
            RowValues::Text(s) => !s.is_empty(),
            RowValues::Blob(b) => !b.is_empty(),
            RowValues::Null => false,
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_owned())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_follows_legacy_flag_rules() {
        assert!(RowValues::Int(1).is_truthy());
        assert!(RowValues::Int(-3).is_truthy());
        assert!(RowValues::Text("0".into()).is_truthy());
        assert!(!RowValues::Int(0).is_truthy());
        assert!(!RowValues::Text(String::new()).is_truthy());
        assert!(!RowValues::Float(0.0).is_truthy());
        assert!(!RowValues::Null.is_truthy());
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(RowValues::from(None::<i64>), RowValues::Null);
        assert_eq!(RowValues::from(Some("x")), RowValues::Text("x".into()));
        assert_eq!(RowValues::from(7_i64).as_bool(), None);
        assert_eq!(RowValues::from(1_i64).as_bool(), Some(true));
    }
}
