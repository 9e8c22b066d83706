//! Helper macro for port error enums.
//!
//! `define_port_error!` expands a compact variant list into a `thiserror`
//! enum plus one snake_case constructor per variant. String-like fields take
//! `impl Into<T>` so call sites can pass `&str`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            /// Construct this variant.
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_args $variant [] [] $( $field : $ty, )*);
    };

    (@ctor_args $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            /// Construct this variant.
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_args $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_args
            $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
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
        pub enum SamplePortError {
            Missing => "record missing",
            Timeout { operation: String } => "{operation} timed out",
            Busy { operation: String, attempts: u32 } => "{operation} busy after {attempts}",
        }
    }

    #[test]
    fn unit_variant_constructor() {
        assert_eq!(SamplePortError::missing().to_string(), "record missing");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::timeout("insert goal");
        assert_eq!(err.to_string(), "insert goal timed out");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::busy("list quotes", 3_u32);
        assert_eq!(err.to_string(), "list quotes busy after 3");
    }
}
