//! Erreurs du noyau.
//!
//! - ErreurCalcul  : évaluation (validation, lecture des jetons, valeur non finie)
//! - ErreurStockage : service de persistance (lecture / écriture)
//!
//! Côté utilisateur, une erreur de calcul s’affiche toujours avec le même
//! indicateur fixe : le détail ne sert qu’aux traces.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Règle structurelle violée, ou expression illisible après normalisation.
    #[error("expression invalide: {0}")]
    ExpressionInvalide(String),

    /// Valeur non finie ou indéfinie (division par zéro, √ négatif, log ≤ 0…).
    #[error("résultat invalide")]
    ResultatInvalide,
}

#[derive(Debug, Error)]
pub enum ErreurStockage {
    #[error("lecture impossible ({cle}): {message}")]
    Lecture { cle: String, message: String },

    #[error("écriture impossible ({cle}): {message}")]
    Ecriture { cle: String, message: String },

    #[error("fichier de stockage: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}
