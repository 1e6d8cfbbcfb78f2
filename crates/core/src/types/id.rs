//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! IDs are timestamp-derived millisecond strings, matching the records
//! the store persists. [`next_timestamp_id`] is monotonic within a process
//! so two IDs minted in the same millisecond never collide.

use std::sync::atomic::{AtomicI64, Ordering};

/// Last issued timestamp ID, used to keep generation monotonic.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Mint a timestamp-derived ID string.
///
/// Returns the current unix time in milliseconds, bumped past the
/// previously issued value when two calls land in the same millisecond.
#[must_use]
pub fn next_timestamp_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let issued = LAST_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    issued.to_string()
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `generate()` for minting a fresh timestamp-derived ID
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use lunchbox_core::define_id;
/// define_id!(ItemId);
/// define_id!(OrderId);
///
/// let item_id = ItemId::new("1");
/// let order_id = OrderId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: ItemId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh timestamp-derived ID.
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::types::id::next_timestamp_id())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ItemId);
define_id!(OrderId);
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        let item_id = ItemId::new("42");
        assert_eq!(item_id.as_str(), "42");
        assert_eq!(item_id.to_string(), "42");
    }

    #[test]
    fn test_generate_is_unique_within_a_millisecond() {
        let a = OrderId::generate();
        let b = OrderId::generate();
        let c = OrderId::generate();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_generate_is_numeric_timestamp() {
        let id = UserId::generate();
        let millis: i64 = id.as_str().parse().expect("id should be numeric");
        assert!(millis > 0);
    }
}
