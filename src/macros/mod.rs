//! Macros for declaring tagged error types.
//!
//! - [`macro@crate::tagged_error`] - Declares an enum and implements
//!   [`Tagged`](crate::traits::Tagged) for it, using each variant's name as its tag.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::tagged_error;
//! use outcome_rail::traits::Tagged;
//!
//! tagged_error! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum PaymentError {
//!         CardDeclined { reason: String },
//!         InsufficientFunds(u64),
//!         Expired,
//!     }
//! }
//!
//! assert_eq!(PaymentError::Expired.tag(), "Expired");
//! assert_eq!(PaymentError::InsufficientFunds(10).tag(), "InsufficientFunds");
//! assert_eq!(PaymentError::TAGS, &["CardDeclined", "InsufficientFunds", "Expired"]);
//! ```

/// Declares an error enum and implements [`Tagged`](crate::traits::Tagged) for it.
///
/// Unit, tuple and struct variants are accepted; attributes on the enum and
/// on variants are passed through. The tag of a variant is its name, and
/// [`Tagged::TAGS`](crate::traits::Tagged::TAGS) lists the variants in
/// declaration order.
///
/// # Examples
///
/// ```
/// use outcome_rail::{tagged_error, AsyncResult};
///
/// tagged_error! {
///     #[derive(Debug)]
///     enum SessionError {
///         Expired,
///         Revoked { by: String },
///     }
/// }
///
/// let result =
///     AsyncResult::<(), SessionError>::fail(SessionError::Revoked { by: "admin".into() });
/// let who = result
///     .builder()
///     .on_error_tag("Expired", |_, _| String::from("nobody"))
///     .on_error(|e, _| match e {
///         SessionError::Revoked { by } => by.clone(),
///         _ => String::new(),
///     })
///     .or_else(String::new);
/// assert_eq!(who, "admin");
/// ```
#[macro_export]
macro_rules! tagged_error {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( ( $($tuple:tt)* ) )? $( { $($fields:tt)* } )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $( ( $($tuple)* ) )? $( { $($fields)* } )?
            ),*
        }

        impl $crate::traits::Tagged for $name {
            const TAGS: &'static [&'static str] = &[$(stringify!($variant)),*];

            fn tag(&self) -> &'static str {
                match self {
                    $( Self::$variant { .. } => stringify!($variant), )*
                }
            }
        }
    };
}

/// Emits a `tracing` event when the `tracing` feature is on; expands to nothing otherwise.
#[doc(hidden)]
#[macro_export]
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::$level!($($arg)+);
        }
    };
}
