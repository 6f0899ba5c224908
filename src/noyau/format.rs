// src/noyau/format.rs
//
// Affichage EXACT “joli” d’un polynôme, en ASCII relisible par le parseur :
//   3x^2 + x + 1
//   -3/2x - 17
//   x^3 - 1/2
//
// Relire l’affichage (parse_polynomial) redonne le même polynôme.

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::polynome::Polynome;

/* ------------------------ Helpers rationnels ------------------------ */

pub(crate) fn format_rat_pretty(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

/// |c|·x^d sans signe. Coefficient 1 omis devant x.
fn format_monome(c_abs: &BigRational, degre: usize) -> String {
    if degre == 0 {
        return format_rat_pretty(c_abs);
    }

    let coeff = if c_abs.is_one() {
        String::new()
    } else {
        format_rat_pretty(c_abs)
    };

    if degre == 1 {
        format!("{coeff}x")
    } else {
        format!("{coeff}x^{degre}")
    }
}

/// Polynôme -> texte (termes non nuls, degré décroissant).
pub fn format_polynome(p: &Polynome) -> String {
    if p.est_nul() {
        return "0".to_string();
    }

    let n = p.degre();
    let mut out = String::new();

    for (i, c) in p.coefficients_exacts().iter().enumerate() {
        if c.is_zero() {
            continue;
        }
        let degre = n - i;
        let negatif = c.is_negative();
        let monome = format_monome(&c.abs(), degre);

        if out.is_empty() {
            if negatif {
                out.push('-');
            }
        } else if negatif {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        out.push_str(&monome);
    }

    out
}

/// Coefficients exacts pour la “démarche” : [3, 1, 1] ou [-3/2, -17].
pub fn format_coefficients(p: &Polynome) -> String {
    let items: Vec<String> = p
        .coefficients_exacts()
        .iter()
        .map(format_rat_pretty)
        .collect();
    format!("[{}]", items.join(", "))
}
