//! `define_port_error!` declares the error enum a repository port returns.
//!
//! Every variant carries named fields, even if that set is empty (`Offline {}`),
//! and a display message that may interpolate them:
//!
//! ```ignore
//! define_port_error! {
//!     /// Failures of the user store.
//!     pub enum UserPersistenceError {
//!         Query { message: String } => "query failed: {message}",
//!         DuplicateEmail { email: String } => "email {email} is already registered",
//!     }
//! }
//! ```
//!
//! The enum derives `thiserror::Error` and gains one snake_case constructor per
//! variant taking each field as `impl Into<Field>`, so adapters can write
//! `UserPersistenceError::duplicate_email(&email)`.

macro_rules! define_port_error {
    (
        $(#[$enum_attr:meta])*
        pub enum $error:ident {
            $(
                $(#[$attr:meta])*
                $kind:ident { $($field:ident : $field_ty:ty),* $(,)? } => $display:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_attr])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $error {
            $(
                $(#[$attr])*
                #[error($display)]
                $kind { $($field: $field_ty),* },
            )+
        }

        ::paste::paste! {
            impl $error {
                $(
                    #[doc = "Build [`" $error "::" $kind "`]."]
                    pub fn [<$kind:snake>]($($field: impl Into<$field_ty>),*) -> Self {
                        Self::$kind { $($field: $field.into()),* }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
