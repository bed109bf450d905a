//! Macro for implementing Display and FromStr for code enums
//!
//! Generates a single mapping between enum variants and their canonical wire
//! code. Parsing ignores ASCII case, rendering always emits the canonical code.
//!
//! # Example
//!
//! ```rust
//! use picnic_domain::impl_domain_code_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Region {
//!     North,
//!     South,
//! }
//!
//! impl_domain_code_conversions!(Region {
//!     North => "N",
//!     South => "S",
//! });
//!
//! assert_eq!("n".parse::<Region>().unwrap(), Region::North);
//! assert_eq!(Region::South.to_string(), "S");
//! ```

/// Implements Display, FromStr and `as_str` for code enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $code` - Mapping of enum variants to their canonical code
#[macro_export]
macro_rules! impl_domain_code_conversions {
    ($enum_name:ident { $($variant:ident => $code:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant),+];

            /// Canonical code for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(if trimmed.eq_ignore_ascii_case($code) {
                    return Ok(Self::$variant);
                })+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
