//! Install progress stages
//!
//! Installs move through a fixed sequence of statuses. The progress timeline
//! shows every stage with its position relative to the current status.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Ordered install statuses, serialized as their status value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InstallStage {
    Created,
    AwaitingDeposit,
    Ptc,
    Schedule,
    Review,
    AwaitingPayment,
    RetailerNotification,
    Stc,
    Complete,
}

impl InstallStage {
    pub const ALL: [InstallStage; 9] = [
        InstallStage::Created,
        InstallStage::AwaitingDeposit,
        InstallStage::Ptc,
        InstallStage::Schedule,
        InstallStage::Review,
        InstallStage::AwaitingPayment,
        InstallStage::RetailerNotification,
        InstallStage::Stc,
        InstallStage::Complete,
    ];

    /// Status value as stored on the install record
    pub fn status(self) -> &'static str {
        match self {
            InstallStage::Created => "Created",
            InstallStage::AwaitingDeposit => "Awaiting Deposit",
            InstallStage::Ptc => "PTC",
            InstallStage::Schedule => "Schedule",
            InstallStage::Review => "Review",
            InstallStage::AwaitingPayment => "Awaiting Payment",
            InstallStage::RetailerNotification => "Retailer Notification",
            InstallStage::Stc => "STC",
            InstallStage::Complete => "Complete",
        }
    }

    /// Human-readable step title
    pub fn title(self) -> &'static str {
        match self {
            InstallStage::Created => "Created",
            InstallStage::AwaitingDeposit => "Awaiting Deposit",
            InstallStage::Ptc => "Apply for PTC",
            InstallStage::Schedule => "Schedule Install",
            InstallStage::Review => "Review Installation",
            InstallStage::AwaitingPayment => "Awaiting Payment",
            InstallStage::RetailerNotification => "Retailer Notification",
            InstallStage::Stc => "STC Submission",
            InstallStage::Complete => "Complete",
        }
    }

    pub fn from_status(status: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.status() == status)
    }
}

impl Serialize for InstallStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.status())
    }
}

impl<'de> Deserialize<'de> for InstallStage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = String::deserialize(deserializer)?;
        Self::from_status(&status)
            .ok_or_else(|| de::Error::custom(format!("unknown install status `{}`", status)))
    }
}

/// Position of a stage relative to the current status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageState {
    Complete,
    Active,
    Inactive,
}

/// One step of the install progress timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    pub stage: InstallStage,
    pub title: &'static str,
    pub state: StageState,
}

/// Build the progress timeline for an install status
///
/// Stages before the current one are complete, the current one is active.
/// An unknown status leaves every stage inactive.
pub fn install_timeline(status: Option<&str>) -> Vec<TimelineItem> {
    let current = status.and_then(InstallStage::from_status);

    InstallStage::ALL
        .into_iter()
        .map(|stage| {
            let state = match current {
                Some(current) if stage < current => StageState::Complete,
                Some(current) if stage == current => StageState::Active,
                _ => StageState::Inactive,
            };
            TimelineItem {
                stage,
                title: stage.title(),
                state,
            }
        })
        .collect()
}
