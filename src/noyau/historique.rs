// src/noyau/historique.rs
//
// Historique des calculs validés ("<expr> = <résultat>").
// - plus récent en tête
// - borné à CAPACITE_HISTORIQUE (le plus ancien est évincé)
// - persisté (tableau JSON de chaînes) après CHAQUE mutation
// - données stockées absentes ou illisibles => historique vide, jamais fatal

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::erreur::ErreurStockage;
use super::format::format_nombre;
use super::stockage::Stockage;

pub const CLE_HISTORIQUE: &str = "calcHistory";
pub const CAPACITE_HISTORIQUE: usize = 50;

const SEPARATEUR: &str = " = ";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

impl fmt::Display for EntreeHistorique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATEUR}{}", self.expression, self.resultat)
    }
}

impl From<EntreeHistorique> for String {
    fn from(e: EntreeHistorique) -> Self {
        e.to_string()
    }
}

impl TryFrom<String> for EntreeHistorique {
    type Error = ErreurStockage;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.split_once(SEPARATEUR) {
            Some((expression, resultat)) => Ok(Self {
                expression: expression.to_string(),
                resultat: resultat.to_string(),
            }),
            None => Err(ErreurStockage::Lecture {
                cle: CLE_HISTORIQUE.to_string(),
                message: format!("entrée sans '{}': {s:?}", SEPARATEUR.trim()),
            }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Historique {
    entrees: VecDeque<EntreeHistorique>,
}

impl Historique {
    /// Relit l’historique persisté.
    pub fn charger(stockage: &dyn Stockage) -> Self {
        let Some(brut) = stockage.charger(CLE_HISTORIQUE) else {
            return Self::default();
        };

        match decoder(&brut) {
            Ok(mut entrees) => {
                entrees.truncate(CAPACITE_HISTORIQUE);
                Self { entrees }
            }
            Err(e) => {
                warn!(erreur = %e, "historique stocké illisible, on repart à vide");
                Self::default()
            }
        }
    }

    /// Ajoute un calcul en tête, évince le plus ancien au-delà de la capacité, persiste.
    pub fn enregistrer(&mut self, expression: &str, resultat: f64, stockage: &mut dyn Stockage) {
        self.entrees.push_front(EntreeHistorique {
            expression: expression.to_string(),
            resultat: format_nombre(resultat),
        });
        self.entrees.truncate(CAPACITE_HISTORIQUE);
        self.persister(stockage);
    }

    pub fn effacer(&mut self, stockage: &mut dyn Stockage) {
        self.entrees.clear();
        self.persister(stockage);
    }

    /// Partie "résultat" de l’entrée `index` (0 = la plus récente).
    pub fn selectionner(&self, index: usize) -> Option<&str> {
        self.entrees.get(index).map(|e| e.resultat.as_str())
    }

    pub fn entrees(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.entrees.iter()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    fn persister(&self, stockage: &mut dyn Stockage) {
        let res = serde_json::to_string(&self.entrees)
            .map_err(ErreurStockage::from)
            .and_then(|json| stockage.sauver(CLE_HISTORIQUE, &json));

        if let Err(e) = res {
            warn!(erreur = %e, "historique non persisté");
        }
    }
}

fn decoder(brut: &str) -> Result<VecDeque<EntreeHistorique>, ErreurStockage> {
    Ok(serde_json::from_str(brut)?)
}
