use serde::{Deserialize, Serialize};

/// Parse failure for a fixed-choice field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The display string doubles as the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Disease {
    Malaria => "Malaria",
    Dengue => "Dengue",
    Typhoid => "Typhoid",
});

str_enum!(Region {
    SubSaharanAfrica => "Sub-Saharan Africa",
    PapuaNewGuinea => "Papua New Guinea",
    SoutheastAsia => "Southeast Asia",
    CentralAmericaWestOfPanama => "Central America west of Panama",
    Haiti => "Haiti",
    DominicanRepublic => "Dominican Republic",
});

str_enum!(Gender {
    Male => "Male",
    Female => "Female",
});

impl Default for Region {
    fn default() -> Self {
        Self::SubSaharanAfrica
    }
}

impl Default for Gender {
    fn default() -> Self {
        Self::Male
    }
}
