// src/noyau/polynome.rs
//
// Polynôme dense, coefficients EXACTS (rationnels), degré décroissant :
//   [a_n, ..., a_1, a_0]  avec a_n != 0 (sauf polynôme nul = [0])
//
// Invariants (garantis par les constructeurs) :
// - jamais vide
// - pas de zéros de tête
// - chaque coefficient a une image f64 FINIE
// - immuable : derivee() produit un nouveau vecteur (aucun partage)

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use std::fmt;

use super::format::format_polynome;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynome {
    coeffs: Vec<BigRational>,
}

impl Polynome {
    /// Polynôme nul : [0].
    pub fn zero() -> Self {
        Self {
            coeffs: vec![BigRational::zero()],
        }
    }

    /// Construit depuis des coefficients exacts (degré décroissant).
    /// Retire les zéros de tête ; refuse un coefficient sans image f64 finie.
    pub fn depuis_exacts(coeffs: Vec<BigRational>) -> Result<Self, String> {
        let debut = coeffs
            .iter()
            .position(|c| !c.is_zero())
            .unwrap_or(coeffs.len());
        let coeffs: Vec<BigRational> = coeffs.into_iter().skip(debut).collect();

        if coeffs.is_empty() {
            return Ok(Self::zero());
        }

        for c in &coeffs {
            if vers_f64(c).is_none() {
                return Err(format!("coefficient hors du domaine flottant: {c}"));
            }
        }

        Ok(Self { coeffs })
    }

    /// Construit depuis des coefficients flottants (degré décroissant).
    /// NaN / ±inf refusés.
    pub fn depuis_coefficients(coeffs: &[f64]) -> Result<Self, String> {
        let mut exacts = Vec::with_capacity(coeffs.len());
        for &c in coeffs {
            let r = BigRational::from_float(c).ok_or_else(|| format!("coefficient non fini: {c}"))?;
            exacts.push(r);
        }
        Self::depuis_exacts(exacts)
    }

    pub fn degre(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn est_nul(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Vue exacte (degré décroissant).
    pub fn coefficients_exacts(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// Vue numérique (degré décroissant).
    pub fn coefficients(&self) -> Vec<f64> {
        // l’invariant de construction garantit Some(..) fini
        self.coeffs
            .iter()
            .map(|c| vers_f64(c).unwrap_or(f64::NAN))
            .collect()
    }

    /// Horner en flottant IEEE (aucun cas particulier).
    pub fn evalue(&self, x: f64) -> f64 {
        self.coefficients()
            .into_iter()
            .fold(0.0, |acc, c| acc * x + c)
    }

    /// Horner en rationnels exacts.
    pub fn evalue_exact(&self, x: &BigRational) -> BigRational {
        let mut acc = BigRational::zero();
        for c in &self.coeffs {
            acc = acc * x + c;
        }
        acc
    }

    /// Dérivée (règle de la puissance) : a_d x^d -> d·a_d x^(d-1).
    ///
    /// Échoue seulement si un coefficient dérivé sort du domaine flottant.
    pub fn derivee(&self) -> Result<Polynome, String> {
        let n = self.degre();
        if n == 0 {
            return Ok(Self::zero());
        }

        let out: Vec<BigRational> = self.coeffs[..n]
            .iter()
            .enumerate()
            .map(|(i, c)| c * BigRational::from_integer(BigInt::from(n - i)))
            .collect();

        Self::depuis_exacts(out)
    }
}

impl fmt::Display for Polynome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_polynome(self))
    }
}

fn vers_f64(r: &BigRational) -> Option<f64> {
    r.to_f64().filter(|v| v.is_finite())
}
