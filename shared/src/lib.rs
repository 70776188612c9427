use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format used for every date shown in the UI and persisted in the store
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Render a date in the `DD/MM/YYYY` form used by the UI mask and the store
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Error returned when a stored or submitted label matches no enum variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.label)
    }
}

impl std::error::Error for UnknownLabel {}

/// Physical kind of a shipping container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerType {
    Dry,
    Reefer,
    OpenTop,
    FlatRack,
    Tank,
}

impl ContainerType {
    /// All container types in picker order
    pub const ALL: [ContainerType; 5] = [
        ContainerType::Dry,
        ContainerType::Reefer,
        ContainerType::OpenTop,
        ContainerType::FlatRack,
        ContainerType::Tank,
    ];

    /// Label shown in the UI and stored in the `containerType` column
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::Dry => "Dry",
            ContainerType::Reefer => "Reefer",
            ContainerType::OpenTop => "Open Top",
            ContainerType::FlatRack => "Flat Rack",
            ContainerType::Tank => "Tank",
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainerType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "container type",
                label: s.to_string(),
            })
    }
}

/// Operational status of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerStatus {
    Available,
    InUse,
    NeedsMaintenance,
}

impl ContainerStatus {
    pub const ALL: [ContainerStatus; 3] = [
        ContainerStatus::Available,
        ContainerStatus::InUse,
        ContainerStatus::NeedsMaintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerStatus::Available => "Available",
            ContainerStatus::InUse => "In Use",
            ContainerStatus::NeedsMaintenance => "Needs Maintenance",
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerStatus {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainerStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "container status",
                label: s.to_string(),
            })
    }
}

/// Kind of operation planned against a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    Loading,
    Unloading,
    Maintenance,
}

impl OperationType {
    pub const ALL: [OperationType; 3] = [
        OperationType::Loading,
        OperationType::Unloading,
        OperationType::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Loading => "Loading",
            OperationType::Unloading => "Unloading",
            OperationType::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationType::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "operation type",
                label: s.to_string(),
            })
    }
}

/// The company account gating access to the system.
///
/// `tax_id` is the 14 digit form without separators and is the primary key.
/// The password is kept in plain text, exactly as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub company_name: String,
    pub tax_id: String,
    pub password: String,
}

impl Account {
    /// The account without its credential
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            company_name: self.company_name.clone(),
            tax_id: self.tax_id.clone(),
        }
    }
}

/// Account data safe to hand to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub company_name: String,
    pub tax_id: String,
}

/// A tracked shipping container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// User supplied identifier, unique across all containers
    pub id: String,
    pub container_type: ContainerType,
    /// Height in meters
    pub height: f64,
    /// Width in meters
    pub width: f64,
    /// Length in meters
    pub length: f64,
    pub status: ContainerStatus,
    pub origin: String,
    pub destination: String,
    /// Day the container was registered, assigned by the system
    pub entry_date: NaiveDate,
}

/// A planned operation against one container on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Store assigned identifier
    pub id: i64,
    pub container_id: String,
    pub scheduled_date: NaiveDate,
    pub operation_type: OperationType,
}

/// A schedule that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub container_id: String,
    pub scheduled_date: NaiveDate,
    pub operation_type: OperationType,
}

/// Which displayed lists must be re-queried after an operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshScope {
    /// The container table
    pub containers: bool,
    /// The schedule table
    pub schedules: bool,
    /// The container picker on the schedule form
    pub container_picker: bool,
}

impl RefreshScope {
    pub const NONE: RefreshScope = RefreshScope {
        containers: false,
        schedules: false,
        container_picker: false,
    };

    /// Containers changed, which also invalidates the schedule form picker
    pub const CONTAINERS: RefreshScope = RefreshScope {
        containers: true,
        schedules: false,
        container_picker: true,
    };

    pub const SCHEDULES: RefreshScope = RefreshScope {
        containers: false,
        schedules: true,
        container_picker: false,
    };

    pub const ALL: RefreshScope = RefreshScope {
        containers: true,
        schedules: true,
        container_picker: true,
    };

    pub fn is_empty(&self) -> bool {
        *self == RefreshScope::NONE
    }
}
