// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Afficheur : expression courante, "Erreur" en couleur d’erreur, message temporaire
// - Tactile : gros boutons, pavé 4 colonnes
// - Panneau historique (droite) + barre de préférences (haut)
//
// Note :
// - Le clavier est traité dans app.rs (événements globaux, pas de champ texte).

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::preferences::Theme;

const TAILLE_BOUTON: [f32; 2] = [64.0, 44.0];
const TAILLE_AFFICHEUR: f32 = 32.0;

const PAVE: [[&str; 4]; 4] = [
    ["7", "8", "9", "÷"],
    ["4", "5", "6", "×"],
    ["1", "2", "3", "−"],
    ["0", ".", "%", "+"],
];

/// Rangée scientifique : (étiquette, texte inséré).
const TOUCHES_SCIENTIFIQUES: [(&str, &str); 11] = [
    ("sin", "sin("),
    ("cos", "cos("),
    ("tan", "tan("),
    ("log", "log("),
    ("ln", "ln("),
    ("√", "sqrt("),
    ("π", "π"),
    ("e", "e"),
    ("xʸ", "**"),
    ("(", "("),
    (")", ")"),
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ctx: &egui::Context) {
        let maintenant = ctx.input(|i| i.time);

        egui::TopBottomPanel::top("barre_preferences").show(ctx, |ui| {
            self.ui_barre(ui, ctx);
        });

        if self.preferences.historique_visible {
            egui::SidePanel::right("panneau_historique")
                .resizable(true)
                .default_width(220.0)
                .show(ctx, |ui| {
                    self.ui_historique(ui, maintenant);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

            self.ui_afficheur(ui);

            ui.add_space(8.0);
            self.ui_memoire(ui, maintenant);

            if self.preferences.scientifique {
                ui.add_space(4.0);
                self.ui_scientifique(ui, maintenant);
            }

            ui.add_space(8.0);
            self.ui_pave(ui, maintenant);
        });
    }

    fn ui_barre(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.heading("Calculatrice");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut historique = self.preferences.historique_visible;
                if ui.toggle_value(&mut historique, "Historique").changed() {
                    self.basculer_historique();
                }

                let mut scientifique = self.preferences.scientifique;
                if ui.toggle_value(&mut scientifique, "Scientifique").changed() {
                    self.basculer_scientifique();
                }

                let icone = match self.preferences.theme {
                    Theme::Clair => "🌙",
                    Theme::Sombre => "☀",
                };
                if ui.button(icone).on_hover_text("Thème clair / sombre").clicked() {
                    self.basculer_theme(ctx);
                }
            });
        });
    }

    fn ui_afficheur(&self, ui: &mut egui::Ui) {
        let couleur = if self.en_erreur() && self.notifications.texte().is_none() {
            ui.visuals().error_fg_color
        } else {
            ui.visuals().strong_text_color()
        };

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(self.texte_afficheur())
                                .monospace()
                                .size(TAILLE_AFFICHEUR)
                                .color(couleur),
                        )
                        .truncate(),
                    );
                });
            });
    }

    fn ui_memoire(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        ui.horizontal(|ui| {
            for (touche, aide) in [
                ("MC", "Efface la mémoire"),
                ("MR", "Rappelle la mémoire"),
                ("M+", "Ajoute l’expression à la mémoire"),
                ("M-", "Soustrait l’expression de la mémoire"),
            ] {
                let resp = ui
                    .add_sized([TAILLE_BOUTON[0], 30.0], egui::Button::new(touche))
                    .on_hover_text(aide);
                if resp.clicked() {
                    self.appuyer(touche, maintenant);
                }
            }
        });
    }

    fn ui_scientifique(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        ui.horizontal_wrapped(|ui| {
            for (etiquette, insere) in TOUCHES_SCIENTIFIQUES {
                if ui
                    .add_sized([46.0, 32.0], egui::Button::new(etiquette))
                    .clicked()
                {
                    self.appuyer(insere, maintenant);
                }
            }
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "C", "Efface l’expression", Action::Effacer);
                self.bouton_action(ui, "⌫", "Efface le dernier symbole", Action::RetourArriere);
                self.bouton_insert(ui, "(", maintenant);
                self.bouton_insert(ui, ")", maintenant);
                ui.end_row();

                for rangee in PAVE {
                    for touche in rangee {
                        self.bouton_insert(ui, touche, maintenant);
                    }
                    ui.end_row();
                }
            });

        ui.add_space(6.0);
        let largeur = 4.0 * TAILLE_BOUTON[0] + 3.0 * 6.0;
        self.bouton_action_large(ui, largeur, "=", Action::Valider);
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        ui.horizontal(|ui| {
            ui.strong("Historique");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Effacer").clicked() {
                    self.effacer_historique(maintenant);
                }
            });
        });
        ui.separator();

        if self.session.historique().is_empty() {
            ui.weak("Aucun calcul");
            return;
        }

        let mut choisi = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, entree) in self.session.historique().entrees().enumerate() {
                    let texte = entree.to_string();
                    let resp = ui
                        .add(egui::Button::new(egui::RichText::new(texte).monospace()).frame(false))
                        .on_hover_text("Reprendre ce résultat");
                    if resp.clicked() {
                        choisi = Some(i);
                    }
                }
            });

        if let Some(i) = choisi {
            self.selectionner_historique(i);
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized(TAILLE_BOUTON, egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            self.executer(action);
        }
    }

    fn bouton_action_large(&mut self, ui: &mut egui::Ui, largeur: f32, label: &str, action: Action) {
        let bouton = egui::Button::new(egui::RichText::new(label).size(20.0));
        if ui.add_sized([largeur, TAILLE_BOUTON[1]], bouton).clicked() {
            self.executer(action);
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, touche: &str, maintenant: f64) {
        if ui.add_sized(TAILLE_BOUTON, egui::Button::new(touche)).clicked() {
            self.appuyer(touche, maintenant);
        }
    }

    fn executer(&mut self, action: Action) {
        match action {
            Action::Effacer => self.effacer(),
            Action::RetourArriere => self.retour_arriere(),
            Action::Valider => self.valider(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Effacer,
    RetourArriere,
    Valider,
}
