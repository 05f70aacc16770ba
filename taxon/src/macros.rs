/// Declare a variant whose codes are known at compile time.
///
/// Generates a newtype over [`VariantError`](crate::VariantError) with one
/// creator and one predicate per code. The underlying
/// [`ErrorVariant`](crate::ErrorVariant) is created on first use and shared
/// by every instance of the generated type.
///
/// The stack capture policy defaults to [`StackCapture::Backtrace`]; name a
/// [`StackCapture`](crate::StackCapture) variant after the type to change it,
/// as in `pub struct TraceError(capture = Force) { .. }`.
///
/// [`StackCapture::Backtrace`]: crate::StackCapture::Backtrace
///
/// ```rust
/// use serde_json::json;
///
/// taxon::define_variant! {
///     /// Failures of the record store.
///     pub struct StorageError {
///         NotFound(not_found, is_not_found) => "record not found",
///         Conflict(conflict, is_conflict) => "write conflict",
///     }
/// }
///
/// let err = StorageError::not_found(json!({ "id": 7 }));
/// assert!(err.is_not_found());
/// assert!(!err.is_conflict());
/// assert_eq!(err.code(), "NotFound");
/// assert_eq!(err.to_string(), "StorageError: record not found");
/// ```
#[macro_export]
macro_rules! define_variant {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(( capture = $capture:ident ))? {
            $(
                $(#[$code_meta:meta])*
                $code:ident ( $creator:ident , $predicate:ident ) => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        $vis struct $name($crate::VariantError);

        #[allow(dead_code)]
        impl $name {
            /// The variant backing this type
            pub fn error_variant() -> &'static $crate::ErrorVariant {
                static VARIANT: ::std::sync::OnceLock<$crate::ErrorVariant> =
                    ::std::sync::OnceLock::new();
                VARIANT.get_or_init(|| {
                    #[allow(unused_variables)]
                    let capture = $crate::StackCapture::default();
                    $( let capture = $crate::StackCapture::$capture; )?
                    $crate::ErrorVariant::__from_static(
                        stringify!($name),
                        &[$((stringify!($code), $message)),*],
                        capture,
                    )
                })
            }

            /// True when `err` was built through this type
            pub fn owns(err: &$crate::VariantError) -> bool {
                Self::error_variant().owns(err)
            }

            /// Unwrap into the untyped instance
            pub fn into_inner(self) -> $crate::VariantError {
                self.0
            }

            $(
                $(#[$code_meta])*
                #[track_caller]
                pub fn $creator(details: impl Into<$crate::Details>) -> Self {
                    Self(Self::error_variant().new_error(stringify!($code), details))
                }

                pub fn $predicate(&self) -> bool {
                    self.0.is(stringify!($code))
                }
            )*
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::VariantError;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.0, f)
            }
        }

        impl ::std::error::Error for $name {
            fn source(&self) -> ::std::option::Option<&(dyn ::std::error::Error + 'static)> {
                ::std::error::Error::source(&self.0)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl ::std::convert::From<$name> for $crate::VariantError {
            fn from(err: $name) -> Self {
                err.0
            }
        }

        impl ::std::convert::From<$name> for $crate::Cause {
            fn from(err: $name) -> Self {
                $crate::Cause::Variant(err.0)
            }
        }

        impl ::std::convert::From<$name> for $crate::Details {
            fn from(err: $name) -> Self {
                $crate::Details::new().with_cause(err.0)
            }
        }

        impl ::std::convert::TryFrom<$crate::VariantError> for $name {
            type Error = $crate::VariantError;

            fn try_from(err: $crate::VariantError) -> ::std::result::Result<Self, Self::Error> {
                if Self::owns(&err) {
                    Ok(Self(err))
                } else {
                    Err(err)
                }
            }
        }
    };
}
