/// Define an enum with stable numeric values, string representations and a default variant.
///
/// Conversions from numbers and strings fail with a configuration error naming the offending
/// value.
macro_rules! enum_mode {
    (
        $(#[$meta:meta])* $vis:vis $name:ident ($what:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $str:literal, )+
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl Default for $name {
            fn default() -> Self { Self::$default }
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $str, )+
                }
            }

            pub fn value(&self) -> u32 {
                *self as u32
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::convert::TryFrom<u32> for $name {
            type Error = $crate::Error;

            #[track_caller]
            fn try_from(value: u32) -> $crate::Result<Self> {
                match value {
                    $( $value => Ok(Self::$variant), )+
                    other => Err($crate::Error::configuration(
                        format!(concat!("invalid ", $what, " value \"<unknown ({})>\""), other),
                        $crate::CallSite::caller("try_from"),
                    )),
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            #[track_caller]
            fn from_str(s: &str) -> $crate::Result<Self> {
                match s {
                    $( $str => Ok(Self::$variant), )+
                    other => Err($crate::Error::configuration(
                        format!(concat!("invalid ", $what, " value \"{}\""), other),
                        $crate::CallSite::caller("from_str"),
                    )),
                }
            }
        }
    };
}
