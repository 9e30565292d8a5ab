// src/noyau/memoire.rs
//
// Registre mémoire unique (MC / MR / M+ / M-).
// - initialisé à 0, durée de vie = session
// - M+ / M- évaluent l’expression COURANTE (non validée) ;
//   échec d’évaluation => aucune modification (trace debug seulement)
// - le registre reste toujours fini

use tracing::debug;

use super::eval::evaluer_courant;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memoire {
    valeur: f64,
}

impl Memoire {
    /// MC
    pub fn effacer(&mut self) {
        self.valeur = 0.0;
    }

    /// MR
    pub fn rappel(&self) -> f64 {
        self.valeur
    }

    /// M+ : vrai si le registre a été modifié.
    pub fn ajouter(&mut self, courant: &str) -> bool {
        self.ajuster(courant, 1.0)
    }

    /// M- : vrai si le registre a été modifié.
    pub fn soustraire(&mut self, courant: &str) -> bool {
        self.ajuster(courant, -1.0)
    }

    fn ajuster(&mut self, courant: &str, signe: f64) -> bool {
        let Some(v) = evaluer_courant(courant) else {
            return false;
        };

        let nouvelle = self.valeur + signe * v;
        if !nouvelle.is_finite() {
            debug!(registre = self.valeur, valeur = v, "mémoire : dépassement ignoré");
            return false;
        }

        self.valeur = nouvelle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ajouter_puis_soustraire() {
        let mut m = Memoire::default();
        assert_eq!(m.rappel(), 0.0);

        assert!(m.ajouter("2+3"));
        assert!(m.ajouter("10"));
        assert!(m.soustraire("4×2"));

        assert_eq!(m.rappel(), 7.0);
    }

    #[test]
    fn echec_evaluation_sans_effet() {
        let mut m = Memoire::default();
        assert!(m.ajouter("5"));

        assert!(!m.ajouter("1/0"));
        assert!(!m.ajouter("(1+2"));
        assert!(!m.soustraire("sqrt(-1)"));
        assert!(!m.ajouter(""));

        assert_eq!(m.rappel(), 5.0);
    }

    #[test]
    fn depassement_sans_effet() {
        let mut m = Memoire::default();
        assert!(m.ajouter("10**308"));
        let avant = m.rappel();
        assert!(!m.ajouter("10**308"));
        assert_eq!(m.rappel(), avant);
        assert!(m.rappel().is_finite());
    }

    #[test]
    fn effacer_remet_a_zero() {
        let mut m = Memoire::default();
        m.ajouter("42");
        m.effacer();
        assert_eq!(m.rappel(), 0.0);
    }
}
