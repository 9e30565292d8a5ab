//! Noyau de la calculatrice scientifique
//!
//! Organisation interne :
//! - jetons.rs       : normalisation (glyphes, π, e, %, log) + tokenisation
//! - validation.rs   : règles structurelles avant évaluation
//! - rpn.rs          : shunting-yard + construction Expr
//! - expr.rs         : AST f64 + fonctions unaires
//! - eval.rs         : pipeline complet
//! - format.rs       : texte d’un résultat
//! - historique.rs   : historique borné, persisté
//! - memoire.rs      : registre MC/MR/M+/M-
//! - session.rs      : état de la calculatrice (machine à états d’erreur)
//! - notification.rs : messages temporaires à échéance
//! - preferences.rs  : thème / mode scientifique / panneau historique
//! - stockage.rs     : contrat de persistance clé/valeur
//! - erreur.rs       : erreurs typées

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod memoire;
pub mod notification;
pub mod preferences;
pub mod rpn;
pub mod session;
pub mod stockage;
pub mod validation;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::evaluer;
pub use session::Session;
