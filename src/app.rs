// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs + stockage.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Traduire le clavier physique en commandes de la calculatrice
//
// Important:
// - Pas de champ texte : le clavier est lu en événements globaux, une seule fois par frame.
// - Le message temporaire échoit ici (horloge egui), avec un repaint programmé.

pub mod etat;
pub mod stockage;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Duration;

use eframe::egui;

/// Commande issue d’une frappe clavier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commande {
    Inserer(&'static str),
    Valider,
    Effacer,
    RetourArriere,
}

/// Caractère tapé -> commande. Les lettres ne valent qu’en mode scientifique.
pub fn traduire_caractere(c: char, scientifique: bool) -> Option<Commande> {
    let insere = match c {
        '0' => "0",
        '1' => "1",
        '2' => "2",
        '3' => "3",
        '4' => "4",
        '5' => "5",
        '6' => "6",
        '7' => "7",
        '8' => "8",
        '9' => "9",
        '.' => ".",
        '+' => "+",
        '(' => "(",
        ')' => ")",
        '%' => "%",
        '-' => "−",
        '*' => "×",
        '/' => "÷",
        '=' => return Some(Commande::Valider),
        _ if scientifique => match c {
            's' => "sin(",
            'c' => "cos(",
            't' => "tan(",
            'l' => "log(",
            'n' => "ln(",
            'q' => "sqrt(",
            'p' => "π",
            'e' => "e",
            _ => return None,
        },
        _ => return None,
    };
    Some(Commande::Inserer(insere))
}

/// Touche spéciale -> commande.
pub fn traduire_touche(touche: egui::Key) -> Option<Commande> {
    match touche {
        egui::Key::Enter => Some(Commande::Valider),
        egui::Key::Escape | egui::Key::Delete => Some(Commande::Effacer),
        egui::Key::Backspace => Some(Commande::RetourArriere),
        _ => None,
    }
}

impl AppCalc {
    fn commandes_clavier(&self, ctx: &egui::Context) -> Vec<Commande> {
        let scientifique = self.preferences.scientifique;
        ctx.input(|i| {
            i.events
                .iter()
                .flat_map(|ev| -> Vec<Commande> {
                    match ev {
                        egui::Event::Text(t) => t
                            .chars()
                            .filter_map(|c| traduire_caractere(c, scientifique))
                            .collect(),
                        egui::Event::Key {
                            key, pressed: true, ..
                        } => traduire_touche(*key).into_iter().collect(),
                        _ => Vec::new(),
                    }
                })
                .collect()
        })
    }

    fn executer_commande(&mut self, commande: Commande) {
        match commande {
            Commande::Inserer(texte) => self.saisir(texte),
            Commande::Valider => self.valider(),
            Commande::Effacer => self.effacer(),
            Commande::RetourArriere => self.retour_arriere(),
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for commande in self.commandes_clavier(ctx) {
            self.executer_commande(commande);
        }

        let maintenant = ctx.input(|i| i.time);
        if let Some(reste) = self.tick(maintenant) {
            ctx.request_repaint_after(Duration::from_secs_f64(reste));
        }

        self.ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::stockage::StockageMemoire;

    #[test]
    fn glyphes_affichage() {
        assert_eq!(traduire_caractere('-', false), Some(Commande::Inserer("−")));
        assert_eq!(traduire_caractere('*', false), Some(Commande::Inserer("×")));
        assert_eq!(traduire_caractere('/', false), Some(Commande::Inserer("÷")));
        assert_eq!(traduire_caractere('%', false), Some(Commande::Inserer("%")));
        assert_eq!(traduire_caractere('=', false), Some(Commande::Valider));
    }

    #[test]
    fn lettres_seulement_en_scientifique() {
        assert_eq!(traduire_caractere('s', false), None);
        assert_eq!(traduire_caractere('s', true), Some(Commande::Inserer("sin(")));
        assert_eq!(traduire_caractere('q', true), Some(Commande::Inserer("sqrt(")));
        assert_eq!(traduire_caractere('p', true), Some(Commande::Inserer("π")));
        assert_eq!(traduire_caractere('x', true), None);
    }

    #[test]
    fn touches_speciales() {
        assert_eq!(traduire_touche(egui::Key::Enter), Some(Commande::Valider));
        assert_eq!(traduire_touche(egui::Key::Escape), Some(Commande::Effacer));
        assert_eq!(traduire_touche(egui::Key::Delete), Some(Commande::Effacer));
        assert_eq!(traduire_touche(egui::Key::Backspace), Some(Commande::RetourArriere));
        assert_eq!(traduire_touche(egui::Key::A), None);
    }

    #[test]
    fn frappe_complete() {
        let mut app = AppCalc::new(Box::new(StockageMemoire::default()));
        for c in "2*(3+4)=".chars() {
            if let Some(cmd) = traduire_caractere(c, false) {
                app.executer_commande(cmd);
            }
        }
        assert_eq!(app.texte_afficheur(), "14");
        assert_eq!(app.session.historique().len(), 1);
    }
}
