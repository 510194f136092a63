//! Helper macro for declaring port error enums with snake-case constructors.

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
    //! Constructor coverage for generated port errors.
    use crate::domain::MovieId;

    define_port_error! {
        pub enum CataloguePortError {
            Offline => "catalogue offline",
            Rejected { message: String } => "rejected: {message}",
            Missing { id: MovieId } => "movie {id} missing",
            Stale { message: String, attempts: u32 } => "stale: {message} after {attempts}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(CataloguePortError::offline().to_string(), "catalogue offline");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = CataloguePortError::rejected("dependent scores");
        assert_eq!(err.to_string(), "rejected: dependent scores");
    }

    #[test]
    fn constructors_preserve_domain_types() {
        let id = MovieId::new(12).expect("valid id");
        assert_eq!(CataloguePortError::missing(id).to_string(), "movie 12 missing");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = CataloguePortError::stale("snapshot", 3_u32);
        assert_eq!(err.to_string(), "stale: snapshot after 3");
    }
}
