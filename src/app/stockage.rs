//! src/app/stockage.rs
//!
//! Implémentations plateforme du service de persistance (noyau::stockage::Stockage).
//!
//! - NATIF : un seul fichier JSON (objet clé -> valeur) dans le dossier de données
//!           utilisateur ; réécrit à chaque sauvegarde (synchrone, petit).
//! - WEB   : window.localStorage (mêmes clés que la version navigateur d’origine).
//!
//! Si aucun support durable n’est disponible, on retombe sur StockageMemoire.

use crate::noyau::stockage::{Stockage, StockageMemoire};

/// Stockage par défaut de la plateforme courante.
pub fn stockage_plateforme() -> Box<dyn Stockage> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        match natif::StockageFichier::emplacement_par_defaut() {
            Some(chemin) => Box::new(natif::StockageFichier::ouvrir(chemin)),
            None => {
                tracing::warn!("aucun dossier de données : stockage en mémoire seulement");
                Box::new(StockageMemoire::default())
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        match web::StockageNavigateur::ouvrir() {
            Some(s) => Box::new(s),
            None => Box::new(StockageMemoire::default()),
        }
    }
}

/* ------------------------ NATIF ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
pub mod natif {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    use tracing::{info, warn};

    use crate::noyau::erreur::ErreurStockage;
    use crate::noyau::stockage::Stockage;

    const DOSSIER_APP: &str = "calculatrice-scientifique";
    const FICHIER: &str = "stockage.json";

    #[derive(Debug)]
    pub struct StockageFichier {
        chemin: PathBuf,
        valeurs: BTreeMap<String, String>,
    }

    impl StockageFichier {
        /// <data_dir>/calculatrice-scientifique/stockage.json
        pub fn emplacement_par_defaut() -> Option<PathBuf> {
            dirs::data_dir().map(|d| d.join(DOSSIER_APP).join(FICHIER))
        }

        /// Ouvre (ou crée à la première sauvegarde) le fichier `chemin`.
        /// Fichier absent => vide ; fichier illisible => vide + trace.
        pub fn ouvrir(chemin: PathBuf) -> Self {
            let valeurs = match lire(&chemin) {
                Ok(v) => v,
                Err(e) => {
                    warn!(chemin = %chemin.display(), erreur = %e, "stockage illisible, on repart à vide");
                    BTreeMap::new()
                }
            };
            info!(chemin = %chemin.display(), cles = valeurs.len(), "stockage ouvert");
            Self { chemin, valeurs }
        }

        fn ecrire(&self) -> Result<(), ErreurStockage> {
            if let Some(dossier) = self.chemin.parent() {
                fs::create_dir_all(dossier)?;
            }
            let json = serde_json::to_string_pretty(&self.valeurs)?;
            fs::write(&self.chemin, json)?;
            Ok(())
        }
    }

    fn lire(chemin: &Path) -> Result<BTreeMap<String, String>, ErreurStockage> {
        if !chemin.exists() {
            return Ok(BTreeMap::new());
        }
        let brut = fs::read_to_string(chemin)?;
        Ok(serde_json::from_str(&brut)?)
    }

    impl Stockage for StockageFichier {
        fn charger(&self, cle: &str) -> Option<String> {
            self.valeurs.get(cle).cloned()
        }

        fn sauver(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            self.valeurs.insert(cle.to_string(), valeur.to_string());
            self.ecrire()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn sauver_puis_rouvrir() {
            let dir = tempfile::tempdir().unwrap();
            let chemin = dir.path().join("sous").join(FICHIER);

            let mut s = StockageFichier::ouvrir(chemin.clone());
            assert_eq!(s.charger("calcHistory"), None);
            s.sauver("calcHistory", r#"["1+1 = 2"]"#).unwrap();
            s.sauver("calculatorTheme", "dark").unwrap();

            let relu = StockageFichier::ouvrir(chemin);
            assert_eq!(relu.charger("calcHistory").as_deref(), Some(r#"["1+1 = 2"]"#));
            assert_eq!(relu.charger("calculatorTheme").as_deref(), Some("dark"));
        }

        #[test]
        fn fichier_illisible_donne_vide() {
            let dir = tempfile::tempdir().unwrap();
            let chemin = dir.path().join(FICHIER);
            fs::write(&chemin, "pas du json").unwrap();

            let mut s = StockageFichier::ouvrir(chemin.clone());
            assert_eq!(s.charger("calculatorTheme"), None);

            // la sauvegarde suivante réécrit un fichier propre
            s.sauver("calculatorTheme", "light").unwrap();
            let relu = StockageFichier::ouvrir(chemin);
            assert_eq!(relu.charger("calculatorTheme").as_deref(), Some("light"));
        }

        #[test]
        fn session_persiste_l_historique_sur_disque() {
            use crate::noyau::historique::CLE_HISTORIQUE;
            use crate::noyau::Session;

            let dir = tempfile::tempdir().unwrap();
            let chemin = dir.path().join(FICHIER);

            let mut session = Session::new(Box::new(StockageFichier::ouvrir(chemin.clone())));
            session.saisir("6÷4");
            assert_eq!(session.valider(), Some(1.5));

            let relu = StockageFichier::ouvrir(chemin.clone());
            assert_eq!(relu.charger(CLE_HISTORIQUE).as_deref(), Some(r#"["6÷4 = 1.5"]"#));

            let session = Session::new(Box::new(StockageFichier::ouvrir(chemin)));
            assert_eq!(session.historique().selectionner(0), Some("1.5"));
        }
    }
}

/* ------------------------ WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
pub mod web {
    use tracing::warn;

    use crate::noyau::erreur::ErreurStockage;
    use crate::noyau::stockage::Stockage;

    pub struct StockageNavigateur {
        local: web_sys::Storage,
    }

    impl StockageNavigateur {
        /// None si localStorage est indisponible (navigation privée stricte, iframe…).
        pub fn ouvrir() -> Option<Self> {
            let local = web_sys::window()?.local_storage().ok().flatten();
            if local.is_none() {
                warn!("localStorage indisponible : stockage en mémoire seulement");
            }
            local.map(|local| Self { local })
        }
    }

    impl Stockage for StockageNavigateur {
        fn charger(&self, cle: &str) -> Option<String> {
            self.local.get_item(cle).ok().flatten()
        }

        fn sauver(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            self.local
                .set_item(cle, valeur)
                .map_err(|e| ErreurStockage::Ecriture {
                    cle: cle.to_string(),
                    message: format!("{e:?}"),
                })
        }
    }
}
