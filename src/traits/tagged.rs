/// Typed errors that carry a discriminant tag.
///
/// The tag drives [`Builder::on_error_tag`](crate::builder::Builder::on_error_tag),
/// and [`TAGS`](Tagged::TAGS) lets a builder report which tags a chain has not
/// covered yet. Implement it by hand or generate it with
/// [`tagged_error!`](crate::tagged_error).
///
/// # Examples
///
/// ```
/// use outcome_rail::traits::Tagged;
///
/// enum StorageError {
///     Missing(String),
///     Corrupt,
/// }
///
/// impl Tagged for StorageError {
///     const TAGS: &'static [&'static str] = &["Missing", "Corrupt"];
///
///     fn tag(&self) -> &'static str {
///         match self {
///             StorageError::Missing(_) => "Missing",
///             StorageError::Corrupt => "Corrupt",
///         }
///     }
/// }
///
/// assert_eq!(StorageError::Corrupt.tag(), "Corrupt");
/// ```
pub trait Tagged {
    /// Every tag a value of this type can carry.
    const TAGS: &'static [&'static str];

    fn tag(&self) -> &'static str;
}

impl<T: Tagged + ?Sized> Tagged for Box<T> {
    const TAGS: &'static [&'static str] = T::TAGS;

    #[inline]
    fn tag(&self) -> &'static str {
        (**self).tag()
    }
}
