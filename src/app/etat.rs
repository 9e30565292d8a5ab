//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder la session du noyau + préférences + message temporaire,
//! et offrir les actions “boutons” sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par noyau::Session.
//! - Toute vraie mise à jour de l’afficheur annule le message temporaire (par identité).
//! - Le temps (secondes) vient de l’horloge egui, passé par la vue.

use eframe::egui;

use crate::noyau::notification::{IdNotification, Notificateur, DUREE_NOTIFICATION};
use crate::noyau::preferences::{Preferences, Theme};
use crate::noyau::session::EtatErreur;
use crate::noyau::stockage::Stockage;
use crate::noyau::Session;

pub struct AppCalc {
    pub session: Session,
    pub preferences: Preferences,
    pub notifications: Notificateur,
    /// Message temporaire affiché par l’application (à annuler à la prochaine mise à jour).
    message: Option<IdNotification>,
}

impl AppCalc {
    pub fn new(stockage: Box<dyn Stockage>) -> Self {
        let preferences = Preferences::charger(stockage.as_ref());
        Self {
            session: Session::new(stockage),
            preferences,
            notifications: Notificateur::default(),
            message: None,
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Bouton de saisie ou mémoire (MC/MR/M+/M-).
    pub fn appuyer(&mut self, valeur: &str, maintenant: f64) {
        self.interrompre_message();
        if let Some(msg) = self.session.appuyer(valeur) {
            self.afficher_message(msg, maintenant);
        }
    }

    /// Saisie clavier (jamais une commande mémoire).
    pub fn saisir(&mut self, texte: &str) {
        self.interrompre_message();
        self.session.saisir(texte);
    }

    /// C
    pub fn effacer(&mut self) {
        self.interrompre_message();
        self.session.effacer();
    }

    /// ⌫
    pub fn retour_arriere(&mut self) {
        self.interrompre_message();
        self.session.retour_arriere();
    }

    /// =
    pub fn valider(&mut self) {
        self.interrompre_message();
        self.session.valider();
    }

    pub fn selectionner_historique(&mut self, index: usize) {
        if self.session.selectionner_historique(index) {
            self.interrompre_message();
        }
    }

    pub fn effacer_historique(&mut self, maintenant: f64) {
        let msg = self.session.effacer_historique();
        self.afficher_message(msg, maintenant);
    }

    /* ------------------------ Message temporaire ------------------------ */

    fn afficher_message(&mut self, texte: &str, maintenant: f64) {
        self.interrompre_message();
        let id = self
            .notifications
            .afficher(texte, DUREE_NOTIFICATION, maintenant);
        self.message = Some(id);
    }

    /// Vraie mise à jour de l’afficheur : notre message, s’il est encore là, disparaît.
    fn interrompre_message(&mut self) {
        if let Some(id) = self.message.take() {
            self.notifications.annuler(id);
        }
    }

    /* ------------------------ Préférences ------------------------ */

    pub fn basculer_theme(&mut self, ctx: &egui::Context) {
        self.preferences.basculer_theme(self.session.stockage_mut());
        self.appliquer_theme(ctx);
    }

    pub fn basculer_scientifique(&mut self) {
        self.preferences
            .basculer_scientifique(self.session.stockage_mut());
    }

    pub fn basculer_historique(&mut self) {
        self.preferences
            .basculer_historique(self.session.stockage_mut());
    }

    pub fn appliquer_theme(&self, ctx: &egui::Context) {
        let visuals = match self.preferences.theme {
            Theme::Clair => egui::Visuals::light(),
            Theme::Sombre => egui::Visuals::dark(),
        };
        ctx.set_visuals(visuals);
    }

    /* ------------------------ Afficheur ------------------------ */

    /// Texte de l’afficheur : message temporaire en priorité.
    pub fn texte_afficheur(&self) -> &str {
        self.notifications
            .texte()
            .unwrap_or_else(|| self.session.affichage())
    }

    pub fn en_erreur(&self) -> bool {
        self.session.etat() == EtatErreur::Erreur
    }

    /// Retire le message temporaire échu ; renvoie le délai (s) avant la prochaine échéance.
    pub fn tick(&mut self, maintenant: f64) -> Option<f64> {
        if self.notifications.echoir(maintenant) {
            self.message = None;
        }
        self.notifications
            .echeance()
            .map(|t| (t - maintenant).max(0.0))
    }
}
