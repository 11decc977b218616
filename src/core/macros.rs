//! Macros for ergonomic lifecycle enum definitions.

/// Generate a `State` trait implementation for simple enums.
///
/// # Example
///
/// ```
/// use reverso::state_enum;
///
/// state_enum! {
///     pub enum OrderState {
///         Pending,
///         Payment,
///         Delivered,
///         Cancelled,
///     }
///     terminal: [Delivered, Cancelled]
/// }
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(terminal: [$($terminal:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_terminal(&self) -> bool {
                match self {
                    $($(Self::$terminal => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
