use serde::{Deserialize, Serialize};

/// Macro to generate a snake_case serde enum with an `as_str` + `Display` pair.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
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
    };
}

str_enum!(
    /// Severity attached to a pairwise interaction rule.
    InteractionSeverity {
        Mild => "mild",
        Moderate => "moderate",
        Severe => "severe",
    }
);

str_enum!(
    /// Structured severity of a contraindication entry.
    WarningSeverity {
        Caution => "caution",
        Unsafe => "unsafe",
    }
);

str_enum!(
    /// Why a contraindication finding was raised.
    ContraindicationReason {
        Pregnancy => "pregnancy",
        StomachSensitivity => "stomach_sensitivity",
        Allergy => "allergy",
    }
);

impl ContraindicationReason {
    /// Human-readable label used in rendered results.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pregnancy => "Pregnancy",
            Self::StomachSensitivity => "Sensitive Stomach",
            Self::Allergy => "Allergy",
        }
    }
}

str_enum!(
    /// Display variant a renderer maps a risk level onto.
    DisplayVariant {
        Success => "success",
        Warning => "warning",
        Danger => "danger",
    }
);
