//! Helper macro for port error enums whose variants carry a message.

/// Define a `thiserror` enum where every variant is `Variant { message }`,
/// plus a snake_case constructor per variant accepting `impl Into<String>`.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $format:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($format)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*

            /// Message carried by any variant.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message.as_str(),)*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ExamplePortError {
            Connection => "connection failed: {message}",
            Query => "query failed: {message}",
        }
    }

    #[test]
    fn constructors_accept_str() {
        let err = ExamplePortError::connection("refused");
        assert_eq!(err.to_string(), "connection failed: refused");
        assert_eq!(err.message(), "refused");
    }

    #[test]
    fn variants_stay_distinct() {
        assert_ne!(ExamplePortError::query("x"), ExamplePortError::connection("x"));
    }
}
