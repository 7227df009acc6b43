//! Macro for implementing Display and FromStr for label enums
//!
//! Landing destinations and gate states are logged and configured by their
//! lowercase label. This macro keeps both directions of that mapping in one
//! place.
//!
//! # Example
//!
//! ```rust
//! use waypoint_domain::impl_domain_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Screen {
//!     Splash,
//!     Login,
//! }
//!
//! impl_domain_label_conversions!(Screen {
//!     Splash => "splash",
//!     Login => "login",
//! });
//!
//! assert_eq!(Screen::Login.to_string(), "login");
//! assert_eq!("SPLASH".parse::<Screen>(), Ok(Screen::Splash));
//! ```

/// Implements Display and FromStr for a fieldless enum from a label table.
///
/// Parsing is case-insensitive; display always emits the label as written.
#[macro_export]
macro_rules! impl_domain_label_conversions {
    ($enum_name:ident { $($variant:ident => $label:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Stable label used in logs and configuration.
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
