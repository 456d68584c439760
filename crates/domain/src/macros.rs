//! Macro for implementing Display and FromStr for wire enums
//!
//! Collector enums travel as fixed upper-case tokens (`"FILE_EDIT"`,
//! `"VSCODE"`). This macro keeps the Display output identical to the wire
//! token and parses it back case-insensitively, so hand-typed values such as
//! command identifiers and environment variables are forgiving.
//!
//! # Example
//!
//! ```rust
//! use devtracker_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Stable,
//!     Insiders,
//! }
//!
//! impl_wire_enum_conversions!(Channel {
//!     Stable => "STABLE",
//!     Insiders => "INSIDERS",
//! });
//!
//! assert_eq!(Channel::Insiders.to_string(), "INSIDERS");
//! assert_eq!("stable".parse::<Channel>(), Ok(Channel::Stable));
//! ```

/// Implements Display and FromStr traits for wire enums
///
/// This macro generates:
/// - Display trait: writes the exact wire token
/// - FromStr trait: parses the token ignoring ASCII case
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::core::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::core::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $(
                    if s.trim().eq_ignore_ascii_case($str) {
                        return ::core::result::Result::Ok(Self::$variant);
                    }
                )+
                ::core::result::Result::Err(::std::format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
