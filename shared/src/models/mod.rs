//! Domain models.
//!
//! Field names follow the relational schema (French domain vocabulary:
//! membres, réunions, opérations) so rows map straight onto the structs.

mod categorie;
mod evenement;
mod membre;
mod operation;
mod reunion;

pub use categorie::ids as categorie_ids;
pub use evenement::Evenement;
pub use membre::{MembreCreate, MembrePublic, MembreUpdate, nom_complet};
pub use operation::{LedgerStats, OperationInput, OperationWithDetails, is_entree, is_sortie};
pub use reunion::{
    PresenceStats, PresenceStatut, PresenceUpdate, PresenceWithMembre, Reunion, ReunionCreate,
    StatsMembre,
};
