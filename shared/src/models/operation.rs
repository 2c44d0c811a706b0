//! Financial operation model

use serde::{Deserialize, Serialize};

/// Ledger entry joined with its category and optional member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OperationWithDetails {
    pub id: i64,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub kind: String,
    pub montant: f64,
    pub date_operation: String,
    pub description: Option<String>,
    pub categorie_id: i64,
    pub membre_id: Option<i64>,
    pub membre_nom: Option<String>,
    pub membre_prenom: Option<String>,
    pub categorie_nom: Option<String>,
    pub created_at: i64,
}

/// Add/update payload for a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationInput {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub montant: Option<f64>,
    pub date_operation: Option<String>,
    pub description: Option<String>,
}

/// Entry/exit totals over a set of operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_entrees: f64,
    pub total_sorties: f64,
    pub benefice: f64,
    pub nombre_operations: i64,
}

impl LedgerStats {
    /// Classify and total a set of operations. Types outside the known
    /// entry/exit vocabularies count toward neither total.
    pub fn compute(operations: &[OperationWithDetails]) -> Self {
        let mut total_entrees = 0.0;
        let mut total_sorties = 0.0;
        for op in operations {
            if is_entree(&op.kind) {
                total_entrees += op.montant;
            } else if is_sortie(&op.kind) {
                total_sorties += op.montant;
            }
        }
        Self {
            total_entrees,
            total_sorties,
            benefice: total_entrees - total_sorties,
            nombre_operations: operations.len() as i64,
        }
    }
}

/// Entry-side operation types.
pub fn is_entree(kind: &str) -> bool {
    matches!(kind, "recette" | "entree")
}

/// Exit-side operation types.
pub fn is_sortie(kind: &str) -> bool {
    matches!(kind, "depense" | "sortie")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(kind: &str, montant: f64) -> OperationWithDetails {
        OperationWithDetails {
            id: 0,
            kind: kind.to_string(),
            montant,
            date_operation: "2026-01-01".to_string(),
            description: None,
            categorie_id: 1,
            membre_id: None,
            membre_nom: None,
            membre_prenom: None,
            categorie_nom: None,
            created_at: 0,
        }
    }

    #[test]
    fn stats_on_empty_set_are_zero() {
        assert_eq!(LedgerStats::compute(&[]), LedgerStats::default());
    }

    #[test]
    fn stats_classify_and_total() {
        let stats = LedgerStats::compute(&[op("recette", 100.0), op("depense", 40.0)]);
        assert_eq!(stats.total_entrees, 100.0);
        assert_eq!(stats.total_sorties, 40.0);
        assert_eq!(stats.benefice, 60.0);
        assert_eq!(stats.nombre_operations, 2);
    }

    #[test]
    fn legacy_type_names_still_classified() {
        let stats = LedgerStats::compute(&[op("entree", 5.0), op("sortie", 2.0), op("autre", 9.0)]);
        assert_eq!(stats.total_entrees, 5.0);
        assert_eq!(stats.total_sorties, 2.0);
        // Unknown type still counts in the operation count.
        assert_eq!(stats.nombre_operations, 3);
    }
}
