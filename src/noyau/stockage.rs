// src/noyau/stockage.rs
//
// Service de persistance clé/valeur (collaborateur externe du noyau).
// - charger : None si la clé est absente
// - sauver  : écrit la valeur (synchrone, local)
//
// Les implémentations plateforme (fichier natif, localStorage web) vivent dans
// app/stockage.rs ; ici seulement le contrat + une version mémoire.

use std::collections::HashMap;

use super::erreur::ErreurStockage;

pub trait Stockage {
    fn charger(&self, cle: &str) -> Option<String>;
    fn sauver(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage>;
}

/// Stockage volatil : tests, et repli quand aucun support durable n’existe.
#[derive(Clone, Debug, Default)]
pub struct StockageMemoire {
    valeurs: HashMap<String, String>,
}

impl StockageMemoire {
    pub fn avec(cle: &str, valeur: &str) -> Self {
        let mut s = Self::default();
        s.valeurs.insert(cle.to_string(), valeur.to_string());
        s
    }
}

impl Stockage for StockageMemoire {
    fn charger(&self, cle: &str) -> Option<String> {
        self.valeurs.get(cle).cloned()
    }

    fn sauver(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        self.valeurs.insert(cle.to_string(), valeur.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memoire_absent_puis_present() {
        let mut s = StockageMemoire::default();
        assert_eq!(s.charger("k"), None);
        s.sauver("k", "v").unwrap();
        assert_eq!(s.charger("k").as_deref(), Some("v"));
        s.sauver("k", "w").unwrap();
        assert_eq!(s.charger("k").as_deref(), Some("w"));
    }
}
