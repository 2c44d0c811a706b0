//! Meeting and attendance models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Meeting row joined with its creator's name (`''` when unset).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reunion {
    pub id: i64,
    pub type_reunion: String,
    pub date_reunion: String,
    pub ordre_du_jour: Option<String>,
    pub description: Option<String>,
    pub lieu: Option<String>,
    pub statut_reunion: String,
    pub created_by: Option<i64>,
    pub created_by_name: String,
    pub created_at: i64,
}

/// Create meeting payload. `type_reunion` and `date_reunion` are required;
/// the rest default in the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReunionCreate {
    pub type_reunion: Option<String>,
    pub date_reunion: Option<String>,
    pub ordre_du_jour: Option<String>,
    pub description: Option<String>,
    pub lieu: Option<String>,
    pub statut_reunion: Option<String>,
    pub created_by: Option<i64>,
}

/// Attendance status. Attendance rows are created as `Absent` and moved
/// between statuses afterward, never recreated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PresenceStatut {
    Present,
    Absent,
    Excuse,
    Retard,
}

impl PresenceStatut {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatut::Present => "present",
            PresenceStatut::Absent => "absent",
            PresenceStatut::Excuse => "excuse",
            PresenceStatut::Retard => "retard",
        }
    }
}

impl FromStr for PresenceStatut {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(PresenceStatut::Present),
            "absent" => Ok(PresenceStatut::Absent),
            "excuse" => Ok(PresenceStatut::Excuse),
            "retard" => Ok(PresenceStatut::Retard),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PresenceStatut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attendance row joined with the member's name and phone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PresenceWithMembre {
    pub id: i64,
    pub reunion_id: i64,
    pub membre_id: i64,
    pub statut: PresenceStatut,
    pub heure_arrivee: Option<String>,
    pub commentaire: Option<String>,
    pub created_at: i64,
    pub nom_complet: String,
    pub telephone: String,
}

/// One entry of a single or bulk attendance update. `statut` stays a raw
/// string here: bulk updates skip unrecognized statuses instead of failing
/// the whole batch, so parsing happens per entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceUpdate {
    pub membre_id: Option<i64>,
    pub statut: Option<String>,
    pub heure_arrivee: Option<String>,
    pub commentaire: Option<String>,
}

/// Attendance counts per status for one meeting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PresenceStats {
    pub presents: i64,
    pub absents: i64,
    pub excuses: i64,
    pub retards: i64,
    pub total: i64,
}

impl PresenceStats {
    /// Participation rate in percent, rounded to 2 decimals. 0 when the
    /// meeting has no attendance rows.
    pub fn participation(&self) -> f64 {
        if self.total <= 0 {
            return 0.0;
        }
        let pct = self.presents as f64 / self.total as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }
}

/// Per-member attendance aggregate across all meetings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StatsMembre {
    pub total_reunions: i64,
    pub presents: i64,
    pub absents: i64,
    pub excuses: i64,
    pub retards: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statut_round_trips_through_str() {
        for s in ["present", "absent", "excuse", "retard"] {
            assert_eq!(s.parse::<PresenceStatut>().unwrap().as_str(), s);
        }
        assert!("en_retard".parse::<PresenceStatut>().is_err());
        assert!("".parse::<PresenceStatut>().is_err());
    }

    #[test]
    fn participation_handles_empty_meeting() {
        assert_eq!(PresenceStats::default().participation(), 0.0);
    }

    #[test]
    fn participation_rounds_to_two_decimals() {
        let stats = PresenceStats {
            presents: 7,
            total: 10,
            ..Default::default()
        };
        assert_eq!(stats.participation(), 70.0);

        let stats = PresenceStats {
            presents: 1,
            total: 3,
            ..Default::default()
        };
        assert_eq!(stats.participation(), 33.33);
    }
}
