// src/noyau/preferences.rs
//
// Préférences d’affichage persistées (une clé chacune) :
// - calculatorTheme      : "dark" | "light"   (défaut light)
// - calculatorScientific : "true" | "false"   (défaut false)
// - calculatorHistory    : "true" | "false"   (défaut false) : panneau historique visible
//
// Valeur absente ou inconnue => défaut (trace), jamais d’erreur remontée.

use std::str::FromStr;

use tracing::warn;

use super::erreur::ErreurStockage;
use super::stockage::Stockage;

pub const CLE_THEME: &str = "calculatorTheme";
pub const CLE_SCIENTIFIQUE: &str = "calculatorScientific";
pub const CLE_HISTORIQUE_VISIBLE: &str = "calculatorHistory";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Clair,
    Sombre,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Clair => "light",
            Theme::Sombre => "dark",
        }
    }

    pub fn bascule(self) -> Self {
        match self {
            Theme::Clair => Theme::Sombre,
            Theme::Sombre => Theme::Clair,
        }
    }
}

impl FromStr for Theme {
    type Err = ErreurStockage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Clair),
            "dark" => Ok(Theme::Sombre),
            _ => Err(ErreurStockage::Lecture {
                cle: CLE_THEME.to_string(),
                message: format!("thème inconnu: {s:?}"),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub scientifique: bool,
    pub historique_visible: bool,
}

impl Preferences {
    pub fn charger(stockage: &dyn Stockage) -> Self {
        Self {
            theme: lire(stockage, CLE_THEME, |s| s.parse()),
            scientifique: lire(stockage, CLE_SCIENTIFIQUE, lire_booleen(CLE_SCIENTIFIQUE)),
            historique_visible: lire(
                stockage,
                CLE_HISTORIQUE_VISIBLE,
                lire_booleen(CLE_HISTORIQUE_VISIBLE),
            ),
        }
    }

    pub fn basculer_theme(&mut self, stockage: &mut dyn Stockage) {
        self.theme = self.theme.bascule();
        ecrire(stockage, CLE_THEME, self.theme.as_str());
    }

    pub fn basculer_scientifique(&mut self, stockage: &mut dyn Stockage) {
        self.scientifique = !self.scientifique;
        ecrire(stockage, CLE_SCIENTIFIQUE, &self.scientifique.to_string());
    }

    pub fn basculer_historique(&mut self, stockage: &mut dyn Stockage) {
        self.historique_visible = !self.historique_visible;
        ecrire(
            stockage,
            CLE_HISTORIQUE_VISIBLE,
            &self.historique_visible.to_string(),
        );
    }
}

fn lire<T: Default>(
    stockage: &dyn Stockage,
    cle: &str,
    parse: impl Fn(&str) -> Result<T, ErreurStockage>,
) -> T {
    let Some(brut) = stockage.charger(cle) else {
        return T::default();
    };
    parse(&brut).unwrap_or_else(|e| {
        warn!(erreur = %e, "préférence ignorée");
        T::default()
    })
}

fn lire_booleen(cle: &'static str) -> impl Fn(&str) -> Result<bool, ErreurStockage> {
    move |s| {
        s.parse::<bool>().map_err(|_| ErreurStockage::Lecture {
            cle: cle.to_string(),
            message: format!("booléen attendu: {s:?}"),
        })
    }
}

fn ecrire(stockage: &mut dyn Stockage, cle: &str, valeur: &str) {
    if let Err(e) = stockage.sauver(cle, valeur) {
        warn!(erreur = %e, "préférence non persistée");
    }
}
