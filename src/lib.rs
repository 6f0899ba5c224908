//! Polynôme Q-pur (bibliothèque)
//!
//! Analyse un polynôme (ou une équation) en une inconnue `x` et le ramène à un
//! vecteur de coefficients dense, degré décroissant :
//!
//! ```
//! use polynome_qpur::{derive_p, evaluate, parse_polynomial};
//!
//! let p = parse_polynomial("x^2 + 3x = (2x + 1) ^ 2").unwrap();
//! assert_eq!(p.coefficients(), vec![3.0, 1.0, 1.0]);
//! assert_eq!(evaluate(&p, -0.5), 1.25);
//!
//! let d = derive_p(Some(&p)).unwrap();
//! assert_eq!(evaluate(&d, -0.5), -2.0);
//! ```

pub mod noyau;

pub use noyau::{
    analyse, build, derive, derive_p, evaluate, normalize, parse_polynomial, valeur_constante,
    Analyse, DemarcheNoyau, ParseFailure, Polynome,
};
