//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
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
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum VendorError {
            Timeout { message: String } => "vendor timed out: {message}",
            Rejected { status: u16, message: String } => "vendor rejected ({status}): {message}",
            Unavailable => "vendor unavailable",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        assert_eq!(VendorError::timeout("10s").to_string(), "vendor timed out: 10s");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = VendorError::rejected(503_u16, "busy");
        assert_eq!(err, VendorError::Rejected { status: 503, message: "busy".to_owned() });
        assert_eq!(err.to_string(), "vendor rejected (503): busy");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(VendorError::unavailable(), VendorError::Unavailable);
    }
}
