//! Macros to reduce boilerplate in the codebase

/// Macro to generate `as_str`, `ALL`, Display and FromStr implementations for
/// closed string enums.
///
/// Parsing is ASCII case-insensitive, so `"AU"`, `"au"` and `"Au"` all map to
/// the same variant.
///
/// # Usage
///
/// ```rust,ignore
/// use crate::error::UserdexError;
///
/// enum_display_fromstr!(
///     MyEnum,
///     UserdexError::InvalidMyEnum,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_variant:path,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant,)+];

            /// Wire representation of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::UserdexError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok($enum_name::$variant);
                    }
                )+
                Err($error_variant(s.to_string()))
            }
        }
    };
}

#[cfg(test)]
mod test {
    use crate::error::UserdexError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestEnum {
        A,
        B,
        C,
    }

    enum_display_fromstr!(TestEnum, UserdexError::Other, { A => "a", B => "b", C => "CC" });

    #[test]
    fn test_display() {
        assert_eq!(TestEnum::A.to_string(), "a");
        assert_eq!(TestEnum::C.to_string(), "CC");
    }

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!("A".parse::<TestEnum>().unwrap(), TestEnum::A);
        assert_eq!("cc".parse::<TestEnum>().unwrap(), TestEnum::C);
        assert_eq!(" b ".parse::<TestEnum>().unwrap(), TestEnum::B);
        assert!("d".parse::<TestEnum>().is_err());
    }

    #[test]
    fn test_all_in_declaration_order() {
        assert_eq!(TestEnum::ALL, &[TestEnum::A, TestEnum::B, TestEnum::C]);
    }
}
