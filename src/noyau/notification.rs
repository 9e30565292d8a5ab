// src/noyau/notification.rs
//
// Messages temporaires ("Mémoire effacée"…) avec retour automatique.
//
// Chaque message reçoit une identité ; son échéance ne concerne que lui.
// - un message plus récent remplace le courant (l’ancienne échéance meurt avec lui)
// - annuler(id) n’agit que si ce message est encore affiché : l’appelant garde
//   l’identité de son message et l’annule lors d’une vraie mise à jour
//
// Le temps est fourni par l’appelant (secondes, f64) : l’UI passe l’horloge
// d’egui, les tests des valeurs fixes.

/// Durée d’affichage par défaut (secondes).
pub const DUREE_NOTIFICATION: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdNotification(u64);

#[derive(Clone, Debug)]
struct Notification {
    id: IdNotification,
    texte: String,
    echeance: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Notificateur {
    courante: Option<Notification>,
    prochain_id: u64,
}

impl Notificateur {
    /// Affiche `texte` jusqu’à `maintenant + duree`.
    pub fn afficher(
        &mut self,
        texte: impl Into<String>,
        duree: f64,
        maintenant: f64,
    ) -> IdNotification {
        let id = IdNotification(self.prochain_id);
        self.prochain_id += 1;

        self.courante = Some(Notification {
            id,
            texte: texte.into(),
            echeance: maintenant + duree,
        });
        id
    }

    /// Annule le message `id` s’il est encore affiché. Vrai si annulé.
    pub fn annuler(&mut self, id: IdNotification) -> bool {
        if self.courante.as_ref().is_some_and(|n| n.id == id) {
            self.courante = None;
            return true;
        }
        false
    }

    /// Retire le message courant si SON échéance est passée. Vrai si retiré.
    pub fn echoir(&mut self, maintenant: f64) -> bool {
        match &self.courante {
            Some(n) if maintenant >= n.echeance => {
                self.courante = None;
                true
            }
            _ => false,
        }
    }

    pub fn texte(&self) -> Option<&str> {
        self.courante.as_ref().map(|n| n.texte.as_str())
    }

    /// Échéance du message courant (pour programmer le prochain rafraîchissement).
    pub fn echeance(&self) -> Option<f64> {
        self.courante.as_ref().map(|n| n.echeance)
    }
}
