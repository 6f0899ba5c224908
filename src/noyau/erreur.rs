// src/noyau/erreur.rs
//
// Échec d’analyse typé : un ensemble FERMÉ de variantes.
// Chaque variante porte l’expression (canonique) tentée, pour le diagnostic.
//
// La surface publique (parse_polynomial / derive_p) écrase tout en None
// + une ligne sur stderr au format littéral :
//   Error when parsing '<expression>'!
//   Error when deriving '<polynôme>'!

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// Texte arithmétique mal formé après normalisation.
    #[error("syntaxe invalide dans '{expression}' : {detail}")]
    Syntaxe { expression: String, detail: String },

    /// Termes non exprimables en monômes x^n (fonctions, fractions rationnelles, ...).
    #[error("'{expression}' n’est pas un polynôme : {detail}")]
    NonPolynomiale { expression: String, detail: String },

    /// Symboles libres autres que l’inconnue.
    #[error("'{expression}' contient d’autres symboles que x : {liste}", liste = .symboles.join(", "))]
    MultiVariable {
        expression: String,
        symboles: Vec<String>,
    },

    /// Tout le reste (division par zéro, garde-fous, débordement flottant).
    #[error("réduction impossible de '{expression}' : {detail}")]
    Autre { expression: String, detail: String },
}

impl ParseFailure {
    /// Expression tentée (forme canonique, ou représentation du polynôme pour une dérivation).
    pub fn expression(&self) -> &str {
        match self {
            ParseFailure::Syntaxe { expression, .. }
            | ParseFailure::NonPolynomiale { expression, .. }
            | ParseFailure::MultiVariable { expression, .. }
            | ParseFailure::Autre { expression, .. } => expression,
        }
    }

    /// Nom court du genre d’échec (journal / UI).
    pub fn genre(&self) -> &'static str {
        match self {
            ParseFailure::Syntaxe { .. } => "syntaxe",
            ParseFailure::NonPolynomiale { .. } => "non polynomiale",
            ParseFailure::MultiVariable { .. } => "multi-variable",
            ParseFailure::Autre { .. } => "autre",
        }
    }

    /// Ligne de diagnostic (format contractuel).
    pub fn diagnostic(&self) -> String {
        format!("Error when parsing '{}'!", self.expression())
    }
}
