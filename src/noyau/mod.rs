//! Noyau exact Q-pur (polynômes en x)
//!
//! Organisation interne :
//! - normalise.rs : texte brut -> expression canonique (jamais d’échec)
//! - jetons.rs    : tokenisation
//! - rpn.rs       : shunting-yard + construction Expr
//! - expr.rs      : AST exact (+ fonctions appliquées)
//! - collecte.rs  : collecte des termes -> coefficients exacts
//! - polynome.rs  : Polynome dense (Horner, dérivée)
//! - format.rs    : affichage EXACT relisible (3x^2 + x + 1)
//! - lecture.rs   : lecture décimale tronquée d’un rationnel
//! - erreur.rs    : ParseFailure (ensemble fermé de variantes)
//! - analyse.rs   : pipeline complet + surface publique

pub mod analyse;
pub mod collecte;
pub mod erreur;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod normalise;
pub mod polynome;
pub mod rpn;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;


// API publique minimale
pub use analyse::{
    analyse, build, derive, derive_p, evaluate, parse_polynomial, valeur_constante, Analyse,
    DemarcheNoyau,
};
pub use erreur::ParseFailure;
pub use normalise::normalize;
pub use polynome::Polynome;
