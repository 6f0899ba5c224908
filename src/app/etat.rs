//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de l’analyseur (entrée, point d’évaluation, résultats, erreur,
//! digits, démarche) et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune analyse ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur la précision de lecture (digits).

/// Précision de lecture par défaut (décimal tronqué).
const DIGITS_DEFAUT: usize = 20;

/// Garde-fou : on borne la précision (anti-gel).
pub const DIGITS_MAX: usize = 200;

/// Point d’évaluation proposé au démarrage.
const POINT_DEFAUT: &str = "0";

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub canonique: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    pub coefficients: String,
}

/// p(x0) et p'(x0) : lecture exacte tronquée + image f64.
#[derive(Clone, Default, Debug)]
pub struct Lectures {
    pub valeur_p: String,
    pub valeur_d: String,
}

/// Sorties d’une analyse réussie (déjà formatées).
#[derive(Clone, Default, Debug)]
pub struct Sorties {
    pub canonique: String,
    pub polynome: String,
    pub derivee: String,
}

#[derive(Clone, Debug)]
pub struct AppPoly {
    // --- entrées utilisateur ---
    pub entree: String,
    pub point: String,

    // --- sorties ---
    pub sorties: Sorties,
    pub lectures: Lectures,
    pub lecture_dispo: bool, // false si point invalide / rien analysé
    pub note_point: String,  // pourquoi la lecture manque (point illisible)
    pub erreur: String,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub digits: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppPoly {
    fn default() -> Self {
        Self {
            entree: String::new(),
            point: POINT_DEFAUT.to_string(),
            sorties: Sorties::default(),
            lectures: Lectures::default(),
            lecture_dispo: false,
            note_point: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            digits: DIGITS_DEFAUT,
            focus_entree: true,
        }
    }
}

impl AppPoly {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrées + résultats + digits par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.point = POINT_DEFAUT.to_string();
        self.clear_resultats();
        self.digits = DIGITS_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_lectures(&mut self) {
        self.lectures = Lectures::default();
        self.lecture_dispo = false;
        self.note_point.clear();
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher aux entrées).
    pub fn clear_resultats(&mut self) {
        self.sorties = Sorties::default();
        self.clear_lectures();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Place une erreur d’analyse.
    ///
    /// On CONSERVE le dernier polynôme affiché ; lectures et démarche sont coupées.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.clear_lectures();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Dépose un résultat complet. `lectures` : `Err(note)` si le point est illisible.
    pub fn set_resultats(
        &mut self,
        sorties: Sorties,
        lectures: Result<Lectures, String>,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.sorties = sorties;
        self.demarche = demarche;

        match lectures {
            Ok(l) => {
                self.lectures = l;
                self.lecture_dispo = true;
                self.note_point.clear();
            }
            Err(note) => {
                self.lectures = Lectures::default();
                self.lecture_dispo = false;
                self.note_point = note;
            }
        }

        self.focus_entree = true;
    }

    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
        self.focus_entree = true;
    }
}
