/// `FromStr` for clap value enums, accepting every name and alias the CLI
/// accepts (case-insensitive), so `str::parse` agrees with flag parsing.
macro_rules! value_enum_from_str {
    ($($enum_type:ty => $reason:literal),+ $(,)?) => {
        $(
            impl ::std::str::FromStr for $enum_type {
                type Err = $crate::primitives::ConfigError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <Self as ::clap::ValueEnum>::from_str(s, true).map_err(|_| {
                        $crate::primitives::ConfigError::ParseError {
                            value: s.to_string(),
                            reason: $reason.to_string(),
                        }
                    })
                }
            }
        )+
    };
}

pub(crate) use value_enum_from_str;
