use core::any::Any;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An unexpected, non-domain failure: a panic, an invariant violation, or an
/// error raised by collaborator code that was never part of the typed error set.
///
/// The original payload is not kept; only its rendered message survives, which
/// keeps defects cloneable, comparable and serializable.
///
/// # Examples
///
/// ```
/// use outcome_rail::Defect;
///
/// let payload = std::panic::catch_unwind(|| panic!("index out of range")).unwrap_err();
/// let defect = Defect::from_panic(&*payload);
/// assert_eq!(defect.message(), "index out of range");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Defect {
    message: String,
}

impl Defect {
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Builds a defect from a panic payload as returned by
    /// [`std::panic::catch_unwind`] or a joined task.
    ///
    /// `&str` and `String` payloads keep their text; anything else is opaque.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        if let Some(message) = payload.downcast_ref::<&'static str>() {
            Self::new(*message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Self::new(message.clone())
        } else {
            Self::new("panic with a non-string payload")
        }
    }

    /// Builds a defect from an error, joining its `source()` chain with `": "`.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        Self { message }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Defect {}

impl From<&str> for Defect {
    #[inline]
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Defect {
    #[inline]
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
