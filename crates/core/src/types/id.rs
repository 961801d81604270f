//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The remote store
//! assigns opaque UUIDs, so the wrappers hold a [`uuid::Uuid`].

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `Uuid` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_uuid()`, and `random()` for tests
/// - `From<Uuid>` and `Into<Uuid>` implementations
///
/// # Example
///
/// ```rust
/// # use stylehub_core::define_id;
/// define_id!(UserId);
/// define_id!(ProductId);
///
/// let user_id = UserId::random();
/// let product_id = ProductId::random();
///
/// // These are different types, so this won't compile:
/// // let _: UserId = product_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Create a new ID from a UUID value.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random ID.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Get the underlying UUID value.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(ProductId);
