// src/noyau/lecture.rs
//
// Lecture décimale tronquée d’un rationnel exact (ex: p(-34/3) affiché sans flottant).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

/// Lecture décimale tronquée (vers zéro) à `digits` chiffres après la virgule.
///
/// Entier “scalé” = trunc(r × 10^digits), puis découpe partie entière / fraction.
pub fn lecture_decimale(r: &BigRational, digits: usize) -> String {
    let echelle = BigInt::from(10).pow(digits as u32);
    let scale = (r.numer() * &echelle) / r.denom();

    let signe = if scale.is_negative() { "-" } else { "" };
    let scale = scale.abs();
    let entier = &scale / &echelle;

    if digits == 0 {
        return format!("{signe}{entier}");
    }

    let fraction = (&scale % &echelle).to_string();
    format!("{signe}{entier}.{fraction:0>digits$}")
}
