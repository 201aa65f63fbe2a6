//! Helper macro for generating port error enums with snake_case constructors.

macro_rules! define_port_error {
    (@ctor $name:ident $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $name:ident $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $name $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $name:ident $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $name:ident $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $name
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($(#[$field_meta:meta])* $field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($(#[$field_meta])* $field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $name $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum UploadPortError {
            Missing => "upload missing",
            TooLarge { limit: u64 } => "upload exceeds {limit} bytes",
            Refused {
                /// HTTP status returned.
                status: u16,
                message: String,
            } => "upload refused ({status}): {message}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(UploadPortError::missing().to_string(), "upload missing");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        assert_eq!(
            UploadPortError::too_large(1024_u64).to_string(),
            "upload exceeds 1024 bytes"
        );
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = UploadPortError::refused(413_u16, "file too big");
        assert_eq!(err.to_string(), "upload refused (413): file too big");
        assert!(matches!(err, UploadPortError::Refused { status: 413, .. }));
    }
}
