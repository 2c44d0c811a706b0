//! Export Formatters
//!
//! Pure rendering of repository rows into delimited text. No queries and
//! no decision logic here; the handlers fetch, these functions format.

pub mod csv;

use shared::models::{MembrePublic, OperationWithDetails, PresenceWithMembre, is_entree};

use csv::{blank_row, format_date, format_datetime, format_montant, row, ucfirst, UTF8_BOM};

/// Download filename: `<base>_YYYY-MM-DD_HHMMSS.csv`.
pub fn export_filename(base: &str) -> String {
    format!(
        "{base}_{}.csv",
        chrono::Utc::now().format("%Y-%m-%d_%H%M%S")
    )
}

/// Member directory export: one row per active member, then a blank line
/// and a STATISTIQUES block.
pub fn membres_csv(membres: &[MembrePublic]) -> String {
    let mut out = String::from(UTF8_BOM);
    out.push_str(&row(&[
        "ID",
        "Username",
        "Nom",
        "Prénom",
        "Nom Complet",
        "Téléphone",
        "Rôle",
        "Statut",
        "Date Adhésion",
        "Date Début Arriéré",
        "Statut Arriéré",
        "Montant Arriéré (FCFA)",
    ]));

    let mut en_arriere = 0usize;
    let mut montant_arriere_total = 0.0;

    for m in membres {
        if m.statut_arriere == "en_arriere" {
            en_arriere += 1;
            montant_arriere_total += m.montant_arriere;
        }
        out.push_str(&row(&[
            m.id.to_string(),
            m.username.clone(),
            m.nom.clone(),
            m.prenom.clone(),
            m.nom_complet.clone(),
            m.telephone.clone().unwrap_or_default(),
            ucfirst(&m.role),
            ucfirst(&m.statut),
            format_date(m.date_adhesion.as_deref().unwrap_or_default()),
            format_date(m.date_debut_arriere.as_deref().unwrap_or_default()),
            if m.statut_arriere == "en_arriere" {
                "En Arriéré".to_string()
            } else {
                "À Jour".to_string()
            },
            format_montant(m.montant_arriere),
        ]));
    }

    out.push_str(&blank_row());
    out.push_str(&row(&["STATISTIQUES"]));
    out.push_str(&summary_row(
        "Total Membres Actifs",
        &membres.len().to_string(),
        12,
    ));
    out.push_str(&summary_row("Membres en Arriéré", &en_arriere.to_string(), 12));
    out.push_str(&summary_row(
        "Membres à Jour",
        &(membres.len() - en_arriere).to_string(),
        12,
    ));
    // The arrears total lands in the montant column (last of the 12).
    let mut fields = vec!["Total Montant Arriéré".to_string()];
    fields.resize(11, String::new());
    fields.push(format_montant(montant_arriere_total));
    out.push_str(&row(&fields));

    out
}

/// All-operations export with category/member labels and a
/// RECETTES / DÉPENSES / SOLDE summary.
pub fn operations_csv(operations: &[OperationWithDetails]) -> String {
    let mut out = String::from(UTF8_BOM);
    out.push_str(&row(&[
        "ID",
        "Type",
        "Montant (FCFA)",
        "Date Opération",
        "Description",
        "Catégorie",
        "Membre",
        "Date de Création",
    ]));

    let mut recettes = 0.0;
    let mut depenses = 0.0;

    for op in operations {
        let type_label = if is_entree(&op.kind) {
            recettes += op.montant;
            "Recette"
        } else {
            depenses += op.montant;
            "Dépense"
        };
        let membre = format!(
            "{} {}",
            op.membre_nom.as_deref().unwrap_or_default(),
            op.membre_prenom.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string();
        out.push_str(&row(&[
            op.id.to_string(),
            type_label.to_string(),
            format_montant(op.montant),
            format_date(&op.date_operation),
            op.description.clone().unwrap_or_default(),
            op.categorie_nom.clone().unwrap_or_default(),
            membre,
            format_datetime(op.created_at),
        ]));
    }

    out.push_str(&blank_row());
    out.push_str(&total_row("TOTAL RECETTES", recettes, 8));
    out.push_str(&total_row("TOTAL DÉPENSES", depenses, 8));
    out.push_str(&total_row("SOLDE", recettes - depenses, 8));

    out
}

/// Treasurer ledger export with a REVENUS / DÉPENSES / BÉNÉFICE summary.
pub fn tresorier_csv(operations: &[OperationWithDetails]) -> String {
    let mut out = String::from(UTF8_BOM);
    out.push_str(&row(&[
        "ID",
        "Type",
        "Montant (FCFA)",
        "Date",
        "Description",
        "Catégorie",
        "Date de création",
    ]));

    let mut entrees = 0.0;
    let mut sorties = 0.0;

    for op in operations {
        let type_label = if is_entree(&op.kind) {
            entrees += op.montant;
            "Revenu"
        } else {
            sorties += op.montant;
            "Dépense"
        };
        out.push_str(&row(&[
            op.id.to_string(),
            type_label.to_string(),
            format_montant(op.montant),
            format_date(&op.date_operation),
            op.description.clone().unwrap_or_default(),
            op.categorie_nom.clone().unwrap_or_default(),
            format_datetime(op.created_at),
        ]));
    }

    out.push_str(&blank_row());
    out.push_str(&total_row("TOTAL REVENUS", entrees, 7));
    out.push_str(&total_row("TOTAL DÉPENSES", sorties, 7));
    out.push_str(&total_row("BÉNÉFICE", entrees - sorties, 7));

    out
}

/// Tab-delimited attendance roll for one meeting (`.xls` download).
pub fn presence_roll(presences: &[PresenceWithMembre]) -> String {
    let mut out = String::from("Nom\tTéléphone\tStatut\tHeure Arrivée\tCommentaire\n");
    for p in presences {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            p.nom_complet,
            p.telephone,
            p.statut,
            p.heure_arrivee.as_deref().unwrap_or_default(),
            p.commentaire.as_deref().unwrap_or_default(),
        ));
    }
    out
}

/// `[label, value, "", ...]` padded to `width` columns.
fn summary_row(label: &str, value: &str, width: usize) -> String {
    let mut fields = vec![label.to_string(), value.to_string()];
    fields.resize(width, String::new());
    row(&fields)
}

/// `["", label, montant, "", ...]` padded to `width` columns.
fn total_row(label: &str, montant: f64, width: usize) -> String {
    let mut fields = vec![String::new(), label.to_string(), format_montant(montant)];
    fields.resize(width, String::new());
    row(&fields)
}
