//! Session de calcul : l’unique état mutable de la calculatrice.
//!
//! Possède l’expression courante, la mémoire, l’historique, l’état d’erreur
//! et le service de persistance. L’UI la possède et ne fait que l’appeler.
//!
//! Machine à états de l’erreur :
//! - Propre -> Erreur : échec d’évaluation pendant `valider` (=)
//! - Erreur -> Propre : `effacer`, `retour_arriere`, ou nouvelle saisie
//!   (qui repart alors d’une expression vide)

use tracing::warn;

use super::erreur::ErreurCalcul;
use super::eval::evaluer;
use super::format::format_nombre;
use super::historique::Historique;
use super::memoire::Memoire;
use super::stockage::Stockage;

/// Indicateur fixe affiché en état d’erreur (aucun détail exposé).
pub const INDICATEUR_ERREUR: &str = "Erreur";

pub const MSG_MEMOIRE_EFFACEE: &str = "Mémoire effacée";
pub const MSG_MEMOIRE_AJOUT: &str = "Ajouté à la mémoire";
pub const MSG_MEMOIRE_RETRAIT: &str = "Soustrait de la mémoire";
pub const MSG_HISTORIQUE_EFFACE: &str = "Historique effacé";

/// Ouvertures de fonction retirées d’un seul coup par le retour arrière.
const OUVERTURES_FONCTION: [&str; 6] = ["sqrt(", "sin(", "cos(", "tan(", "log(", "ln("];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EtatErreur {
    #[default]
    Propre,
    Erreur,
}

pub struct Session {
    expression: String,
    memoire: Memoire,
    historique: Historique,
    etat: EtatErreur,
    dernier_resultat: Option<f64>,
    stockage: Box<dyn Stockage>,
}

impl Session {
    /// Ouvre une session ; l’historique est relu depuis le stockage.
    pub fn new(stockage: Box<dyn Stockage>) -> Self {
        let historique = Historique::charger(stockage.as_ref());
        Self {
            expression: String::new(),
            memoire: Memoire::default(),
            historique,
            etat: EtatErreur::Propre,
            dernier_resultat: None,
            stockage,
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn etat(&self) -> EtatErreur {
        self.etat
    }

    pub fn memoire(&self) -> f64 {
        self.memoire.rappel()
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    pub fn dernier_resultat(&self) -> Option<f64> {
        self.dernier_resultat
    }

    /// Texte de l’afficheur : indicateur d’erreur, expression, ou "0" si vide.
    pub fn affichage(&self) -> &str {
        match self.etat {
            EtatErreur::Erreur => INDICATEUR_ERREUR,
            EtatErreur::Propre if self.expression.is_empty() => "0",
            EtatErreur::Propre => &self.expression,
        }
    }

    pub fn stockage(&self) -> &dyn Stockage {
        self.stockage.as_ref()
    }

    pub fn stockage_mut(&mut self) -> &mut dyn Stockage {
        self.stockage.as_mut()
    }

    /* ------------------------ Saisie ------------------------ */

    /// Bouton générique : MC / MR / M+ / M- ou texte à ajouter.
    /// Renvoie le message temporaire à afficher, s’il y en a un.
    pub fn appuyer(&mut self, valeur: &str) -> Option<&'static str> {
        self.sortir_erreur();

        match valeur {
            "MC" => {
                self.memoire.effacer();
                Some(MSG_MEMOIRE_EFFACEE)
            }
            "MR" => {
                let rappel = format_nombre(self.memoire.rappel());
                self.expression.push_str(&rappel);
                None
            }
            "M+" => self
                .memoire
                .ajouter(&self.expression)
                .then_some(MSG_MEMOIRE_AJOUT),
            "M-" => self
                .memoire
                .soustraire(&self.expression)
                .then_some(MSG_MEMOIRE_RETRAIT),
            _ => {
                self.expression.push_str(valeur);
                None
            }
        }
    }

    /// Ajoute du texte à l’expression (chiffre, opérateur, "sin("…).
    pub fn saisir(&mut self, texte: &str) {
        self.sortir_erreur();
        self.expression.push_str(texte);
    }

    /// C : expression vide, état propre.
    pub fn effacer(&mut self) {
        self.expression.clear();
        self.etat = EtatErreur::Propre;
    }

    /// Retire le dernier symbole ("sin(" compte pour un symbole).
    /// En erreur : équivaut à effacer.
    pub fn retour_arriere(&mut self) {
        if self.etat == EtatErreur::Erreur {
            self.effacer();
            return;
        }

        for motif in OUVERTURES_FONCTION {
            if let Some(reste) = self.expression.strip_suffix(motif) {
                let n = reste.len();
                self.expression.truncate(n);
                return;
            }
        }

        self.expression.pop();
    }

    /* ------------------------ Validation (=) ------------------------ */

    /// Évalue l’expression courante.
    /// - succès : historique + expression remplacée par le résultat
    /// - échec  : état Erreur (le détail ne va qu’aux traces)
    /// Sans effet si l’expression est vide ou si on est déjà en erreur.
    pub fn valider(&mut self) -> Option<f64> {
        if self.expression.is_empty() || self.etat == EtatErreur::Erreur {
            return None;
        }

        match evaluer(&self.expression) {
            Ok(v) => {
                self.historique
                    .enregistrer(&self.expression, v, self.stockage.as_mut());
                self.expression = format_nombre(v);
                self.dernier_resultat = Some(v);
                self.etat = EtatErreur::Propre;
                Some(v)
            }
            Err(e) => {
                self.signaler(&e);
                self.etat = EtatErreur::Erreur;
                None
            }
        }
    }

    /* ------------------------ Historique ------------------------ */

    /// Recharge le résultat de l’entrée `index` comme expression courante.
    pub fn selectionner_historique(&mut self, index: usize) -> bool {
        let Some(resultat) = self.historique.selectionner(index) else {
            return false;
        };

        self.dernier_resultat = resultat.parse().ok();
        self.expression = resultat.to_string();
        self.etat = EtatErreur::Propre;
        true
    }

    pub fn effacer_historique(&mut self) -> &'static str {
        self.historique.effacer(self.stockage.as_mut());
        MSG_HISTORIQUE_EFFACE
    }

    /* ------------------------ Interne ------------------------ */

    fn sortir_erreur(&mut self) {
        if self.etat == EtatErreur::Erreur {
            self.expression.clear();
            self.etat = EtatErreur::Propre;
        }
    }

    fn signaler(&self, e: &ErreurCalcul) {
        warn!(expression = %self.expression, erreur = %e, "calcul refusé");
    }
}
