use serde::{Deserialize, Serialize};

/// Whether an admin/volunteer account is allowed to act at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorStatus {
    Active,
    Inactive,
    Suspended,
}

impl ActorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorStatus::Active => "active",
            ActorStatus::Inactive => "inactive",
            ActorStatus::Suspended => "suspended",
        }
    }

    pub fn parse(raw: &str) -> Option<ActorStatus> {
        match raw {
            "active" => Some(ActorStatus::Active),
            "inactive" => Some(ActorStatus::Inactive),
            "suspended" => Some(ActorStatus::Suspended),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration outcome for a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Pending,
    Confirmed,
    Waitlisted,
    Denied,
    Declined,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Pending => "pending",
            ParticipantStatus::Confirmed => "confirmed",
            ParticipantStatus::Waitlisted => "waitlisted",
            ParticipantStatus::Denied => "denied",
            ParticipantStatus::Declined => "declined",
        }
    }

    pub fn parse(raw: &str) -> Option<ParticipantStatus> {
        match raw {
            "pending" => Some(ParticipantStatus::Pending),
            "confirmed" => Some(ParticipantStatus::Confirmed),
            "waitlisted" => Some(ParticipantStatus::Waitlisted),
            "denied" => Some(ParticipantStatus::Denied),
            "declined" => Some(ParticipantStatus::Declined),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
