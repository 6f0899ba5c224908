// src/app/vue.rs
//
// Vue (UI egui), natif + web
// ---------------------------
// Objectifs :
// - Même AppPoly (etat.rs) pour natif + wasm
// - Clavier : Enter analyse (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)
// - Backspace est laissé au TextEdit (sinon double effacement)

use eframe::egui;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use polynome_qpur::noyau::lecture::lecture_decimale;
use polynome_qpur::noyau::{analyse, derive, evaluate, valeur_constante, Polynome};

use super::etat::{AppPoly, Demarche, Lectures, Sorties, DIGITS_MAX};

/// Pavé : chiffres, point décimal, monômes usuels et DEL.
const PAVE: [[&str; 4]; 4] = [
    ["7", "8", "9", "DEL"],
    ["4", "5", "6", "x"],
    ["1", "2", "3", "x^2"],
    ["0", "00", ".", "x^3"],
];

impl AppPoly {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Polynôme Q-pur");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Équation ou polynôme en x :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 3x + 5 = 3(1/2x - 4),  x^2 + 3x = (2x + 1)^2")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.analyser();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.label("Point x0 :");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.point)
                    .desired_width(140.0)
                    .hint_text("-34/3")
                    .id_source("point_edit")
                    .code_editor(),
            );
            if resp.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.analyser();
            }

            ui.separator();

            ui.label("Lecture :");
            let mut d = self.digits as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(0..=DIGITS_MAX as u32)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_digits(d as usize);
            }
        });

        ui.add_space(6.0);

        // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultats + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.add_space(10.0);

            let go = ui.add_sized([96.0, 30.0], egui::Button::new("Analyser"));
            if go.clicked() {
                self.analyser();
            }
        });

        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "x", "x", InsertKind::Inconnue);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);
            self.bouton_insert(ui, "=", "=", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_poly")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for touche in rangee {
                        match touche {
                            "DEL" => self.bouton_action(
                                ui,
                                "DEL",
                                "Efface le dernier caractère",
                                Action::Backspace,
                            ),
                            "x" | "x^2" | "x^3" => {
                                self.bouton_insert(ui, touche, touche, InsertKind::Inconnue)
                            }
                            _ => self.bouton_insert(ui, touche, touche, InsertKind::Digit),
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Forme canonique (R - L) :");
        Self::champ_monospace(ui, "canonique_out", &self.sorties.canonique, 1);

        ui.add_space(6.0);

        ui.label("Polynôme :");
        Self::champ_monospace(ui, "polynome_out", &self.sorties.polynome, 2);

        ui.add_space(6.0);

        ui.label("Dérivée :");
        Self::champ_monospace(ui, "derivee_out", &self.sorties.derivee, 1);

        ui.add_space(6.0);

        if self.lecture_dispo {
            ui.label("p(x0) :");
            Self::champ_monospace(ui, "valeur_p_out", &self.lectures.valeur_p, 1);
            ui.label("p'(x0) :");
            Self::champ_monospace(ui, "valeur_d_out", &self.lectures.valeur_d, 1);
        } else if !self.note_point.is_empty() {
            ui.monospace(format!("p(x0) indisponible : {}", self.note_point));
        } else {
            ui.monospace("p(x0) indisponible");
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Canonique", "demarche_canon", &self.demarche.canonique);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
                Self::champ_demarche(
                    ui,
                    "Coefficients",
                    "demarche_coeffs",
                    &self.demarche.coefficients,
                );
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            // "3" puis "x" => "3x", "3" puis "(" => "3(" : la normalisation ajoute le '*'
            InsertKind::Digit | InsertKind::Inconnue | InsertKind::OpenParen => {
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Analyse l’entrée via le noyau, puis dépose polynôme / dérivée / lectures / démarche.
    fn analyser(&mut self) {
        self.focus_entree = true;

        let s = self.entree.trim();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        let a = match analyse(s) {
            Ok(a) => a,
            Err(f) => {
                log::debug!("analyse refusée ({}) : {f}", f.genre());
                self.set_erreur(f.to_string());
                return;
            }
        };

        let d = match derive(Ok(&a.polynome)) {
            Ok(d) => d,
            Err(f) => {
                log::debug!("dérivation refusée : {f}");
                self.set_erreur(f.to_string());
                return;
            }
        };

        let lectures = match valeur_constante(self.point.trim()) {
            Ok(x0) => Ok(Lectures {
                valeur_p: lire(&a.polynome, &x0, self.digits),
                valeur_d: lire(&d, &x0, self.digits),
            }),
            Err(f) => {
                log::debug!("point illisible : {f}");
                Err(f.to_string())
            }
        };

        let n = a.demarche;
        let demarche = Demarche {
            canonique: n.canonique,
            jetons: n.jetons,
            rpn: n.rpn,
            arbre: n.arbre,
            coefficients: n.coefficients,
        };

        let sorties = Sorties {
            canonique: a.canonique,
            polynome: a.polynome.to_string(),
            derivee: d.to_string(),
        };

        self.set_resultats(sorties, lectures, demarche);
    }
}

/// "<lecture exacte tronquée>   (f64 : <valeur>)"
fn lire(p: &Polynome, x0: &BigRational, digits: usize) -> String {
    let exact = lecture_decimale(&p.evalue_exact(x0), digits);
    match x0.to_f64() {
        Some(x) => format!("{exact}   (f64 : {})", evaluate(p, x)),
        None => exact,
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Inconnue,
    Op,
    OpenParen,
    CloseParen,
}
