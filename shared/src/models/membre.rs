//! Member model

use serde::{Deserialize, Serialize};

/// Member as exposed by the directory endpoints. The stored row also
/// carries `code_pin`, which only ever leaves through the dedicated
/// scalar accessor, never through a row mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MembrePublic {
    pub id: i64,
    pub username: String,
    pub nom: String,
    pub prenom: String,
    pub nom_complet: String,
    pub telephone: Option<String>,
    pub role: String,
    pub statut: String,
    pub est_membre_bureau: bool,
    pub date_adhesion: Option<String>,
    pub date_debut_arriere: Option<String>,
    pub statut_arriere: String,
    pub montant_arriere: f64,
}

/// Create member payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembreCreate {
    pub username: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub code_pin: Option<String>,
    pub telephone: Option<String>,
    pub role: Option<String>,
    pub statut: Option<String>,
    pub est_membre_bureau: Option<bool>,
    pub date_debut_arriere: Option<String>,
    pub montant_arriere: Option<f64>,
}

/// Partial update over the allowed-field whitelist. Absent fields are
/// skipped by type-level optionality, not by runtime key scanning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MembreUpdate {
    pub username: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub telephone: Option<String>,
    pub role: Option<String>,
    pub statut: Option<String>,
    pub est_membre_bureau: Option<bool>,
    pub date_debut_arriere: Option<String>,
    pub statut_arriere: Option<String>,
    pub montant_arriere: Option<f64>,
}

impl MembreUpdate {
    /// True when no recognized field is present (an empty update set).
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.nom.is_none()
            && self.prenom.is_none()
            && self.telephone.is_none()
            && self.role.is_none()
            && self.statut.is_none()
            && self.est_membre_bureau.is_none()
            && self.date_debut_arriere.is_none()
            && self.statut_arriere.is_none()
            && self.montant_arriere.is_none()
    }
}

/// Derived full name: `prenom nom`, trimmed.
pub fn nom_complet(prenom: &str, nom: &str) -> String {
    format!("{} {}", prenom.trim(), nom.trim())
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nom_complet_concatenates() {
        assert_eq!(nom_complet("Awa", "Diop"), "Awa Diop");
        assert_eq!(nom_complet(" Awa ", " Diop "), "Awa Diop");
        assert_eq!(nom_complet("", "Diop"), "Diop");
    }

    #[test]
    fn empty_update_detected() {
        assert!(MembreUpdate::default().is_empty());
        let u = MembreUpdate {
            nom: Some("Sow".into()),
            ..Default::default()
        };
        assert!(!u.is_empty());
    }
}
