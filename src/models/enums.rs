//! Enumerated text columns shared across the domain
//!
//! Every enum here is stored in Postgres as its display label (e.g.
//! `"Semi-Annual"`, `"Under Maintenance"`) and serialized to JSON the same
//! way, so existing rows and API clients see identical strings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Defines a label-backed enum and generates:
/// - derives (Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)
/// - `as_str`, `Display`, `FromStr` (exact label match)
/// - SQLx `Type`/`Decode`/`Encode` over a Postgres text column
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(format!("Invalid {}: {}", stringify!($name), other)),
                }
            }
        }

        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> sqlx::encode::IsNull {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

text_enum! {
    /// Nominal recurrence cadence of a maintenance schedule
    pub enum Frequency {
        Daily => "Daily",
        Weekly => "Weekly",
        Monthly => "Monthly",
        Quarterly => "Quarterly",
        SemiAnnual => "Semi-Annual",
        Annual => "Annual",
        AsNeeded => "As Needed",
    }
}

text_enum! {
    /// Operational status of a piece of equipment
    pub enum EquipmentStatus {
        Active => "Active",
        Inactive => "Inactive",
        UnderMaintenance => "Under Maintenance",
        Decommissioned => "Decommissioned",
    }
}

text_enum! {
    /// Clinical risk classification of a piece of equipment
    pub enum RiskLevel {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

text_enum! {
    pub enum WorkOrderType {
        Preventive => "Preventive",
        Corrective => "Corrective",
        Emergency => "Emergency",
        Calibration => "Calibration",
    }
}

text_enum! {
    pub enum WorkOrderPriority {
        Emergency => "Emergency",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

text_enum! {
    pub enum WorkOrderStatus {
        Open => "Open",
        InProgress => "In Progress",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

impl Default for EquipmentStatus {
    fn default() -> Self {
        EquipmentStatus::Active
    }
}

impl WorkOrderStatus {
    /// Statuses counted as "open" on the dashboard
    pub const OPEN_STATES: [WorkOrderStatus; 2] = [WorkOrderStatus::Open, WorkOrderStatus::InProgress];

    pub fn is_open(&self) -> bool {
        Self::OPEN_STATES.contains(self)
    }
}
