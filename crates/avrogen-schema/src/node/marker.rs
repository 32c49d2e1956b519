use thiserror::Error as ThisError;

///
/// PositionError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum PositionError {
    #[error("field position {0} is negative")]
    Negative(i64),

    #[error("field position {0} is too large")]
    Overflow(i64),
}

///
/// FieldMarker
///
/// Per-field annotation: the ordinal position plus optional wire-name,
/// underlying-type and logical-type overrides. A marker can only be built
/// with a non-negative position.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMarker {
    position: u32,
    pub wire_name: Option<String>,
    pub underlying: Option<String>,
    pub logical: Option<String>,
}

impl FieldMarker {
    pub fn new(position: i64) -> Result<Self, PositionError> {
        if position < 0 {
            return Err(PositionError::Negative(position));
        }
        let position = u32::try_from(position).map_err(|_| PositionError::Overflow(position))?;

        Ok(Self {
            position,
            wire_name: None,
            underlying: None,
            logical: None,
        })
    }

    #[must_use]
    pub const fn at(position: u32) -> Self {
        Self {
            position,
            wire_name: None,
            underlying: None,
            logical: None,
        }
    }

    #[must_use]
    pub fn with_wire_name(mut self, name: impl Into<String>) -> Self {
        self.wire_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_underlying(mut self, underlying: impl Into<String>) -> Self {
        self.underlying = Some(underlying.into());
        self
    }

    #[must_use]
    pub fn with_logical(mut self, logical: impl Into<String>) -> Self {
        self.logical = Some(logical.into());
        self
    }

    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_positions_are_rejected() {
        assert_eq!(FieldMarker::new(-1), Err(PositionError::Negative(-1)));
        assert_eq!(
            FieldMarker::new(i64::from(u32::MAX) + 1),
            Err(PositionError::Overflow(i64::from(u32::MAX) + 1))
        );
    }

    #[test]
    fn overrides_are_optional() {
        let marker = FieldMarker::new(6)
            .unwrap()
            .with_underlying("long")
            .with_logical("timestamp-micros");

        assert_eq!(marker.position(), 6);
        assert_eq!(marker.wire_name, None);
        assert_eq!(marker.logical.as_deref(), Some("timestamp-micros"));
    }
}
