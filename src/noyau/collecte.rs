// src/noyau/collecte.rs
//
// Collecte des termes : Expr -> coefficients exacts (une seule variable x).
//
// Représentation interne : coefficients CROISSANTS (indice = degré), sans zéros de tête.
// Le résultat public est remis en ordre décroissant par l’appelant.
//
// Règles (SAFE, sans heuristique) :
// - + - : coefficient par coefficient
// - *   : convolution
// - /   : division exacte seulement (diviseur constant non nul, ou reste nul)
// - **  : exposant constant ;
//         base non constante => entier >= 0
//         base constante     => entier quelconque (0**négatif refusé)
// - degré borné par DEGRE_MAX, taille des constantes par BITS_MAX (anti-gel)
//
// Parcours itératif (pile Entrer/Sortir) : pas de récursion sur l’entrée.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::expr::Expr;

/// Garde-fou : degré maximal accepté pendant la collecte.
pub const DEGRE_MAX: usize = 1024;

/// Garde-fou : taille (bits numérateur + dénominateur) d’une puissance constante.
pub const BITS_MAX: u64 = 1 << 16;

/// Pourquoi la collecte refuse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejet {
    NonPolynomial(String),
    Autre(String),
}

type Coeffs = Vec<BigRational>;

/// Collecte les termes d’une expression en x.
/// Retourne les coefficients CROISSANTS (au moins un élément).
pub fn collecte(expr: &Expr) -> Result<Coeffs, Rejet> {
    use Expr::*;

    #[derive(Copy, Clone)]
    enum Marque<'a> {
        Entrer(&'a Expr),
        Sortir(&'a Expr),
    }

    let mut pile: Vec<Marque<'_>> = Vec::with_capacity(64);
    let mut res: Vec<Coeffs> = Vec::with_capacity(64);

    pile.push(Marque::Entrer(expr));

    while let Some(m) = pile.pop() {
        match m {
            Marque::Entrer(e) => {
                pile.push(Marque::Sortir(e));
                match e {
                    Neg(x) => pile.push(Marque::Entrer(x.as_ref())),
                    Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                        pile.push(Marque::Entrer(b.as_ref()));
                        pile.push(Marque::Entrer(a.as_ref()));
                    }
                    _ => {}
                }
            }

            Marque::Sortir(e) => {
                let c = match e {
                    Rat(r) => constante(r.clone()),
                    Inconnue => vec![BigRational::zero(), BigRational::one()],

                    // déjà refusés en amont (analyse.rs)
                    Symbole(s) => return Err(Rejet::Autre(format!("symbole inattendu: {s}"))),
                    Fonction(nom, _) => {
                        return Err(Rejet::NonPolynomial(format!("fonction {nom}()")))
                    }

                    Neg(_) => {
                        let a = depile(&mut res)?;
                        neg(a)
                    }

                    Add(_, _) | Sub(_, _) | Mul(_, _) | Div(_, _) | Pow(_, _) => {
                        let b = depile(&mut res)?;
                        let a = depile(&mut res)?;
                        match e {
                            Add(_, _) => add(&a, &b),
                            Sub(_, _) => add(&a, &neg(b)),
                            Mul(_, _) => mul(&a, &b)?,
                            Div(_, _) => div(&a, &b)?,
                            _ => pow(&a, &b)?,
                        }
                    }
                };
                res.push(c);
            }
        }
    }

    match (res.pop(), res.is_empty()) {
        (Some(c), true) => Ok(c),
        _ => Err(Rejet::Autre("pile de collecte incohérente".into())),
    }
}

fn depile(res: &mut Vec<Coeffs>) -> Result<Coeffs, Rejet> {
    res.pop()
        .ok_or_else(|| Rejet::Autre("pile de collecte vide".into()))
}

/* ------------------------ Arithmétique dense (croissante) ------------------------ */

fn constante(r: BigRational) -> Coeffs {
    vec![r]
}

/// Retire les zéros de tête (en fin de vecteur croissant), garde au moins [0].
fn normalise(mut c: Coeffs) -> Coeffs {
    while c.len() > 1 && c.last().is_some_and(|x| x.is_zero()) {
        c.pop();
    }
    if c.is_empty() {
        c.push(BigRational::zero());
    }
    c
}

fn degre(c: &Coeffs) -> usize {
    c.len() - 1
}

fn est_constante(c: &Coeffs) -> bool {
    c.len() == 1
}

fn est_nul(c: &Coeffs) -> bool {
    c.len() == 1 && c[0].is_zero()
}

fn neg(c: Coeffs) -> Coeffs {
    c.into_iter().map(|x| -x).collect()
}

fn add(a: &Coeffs, b: &Coeffs) -> Coeffs {
    let len = a.len().max(b.len());
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let x = a.get(i).cloned().unwrap_or_else(BigRational::zero);
        let y = b.get(i).cloned().unwrap_or_else(BigRational::zero);
        out.push(x + y);
    }
    normalise(out)
}

fn mul(a: &Coeffs, b: &Coeffs) -> Result<Coeffs, Rejet> {
    if est_nul(a) || est_nul(b) {
        return Ok(constante(BigRational::zero()));
    }
    if degre(a) + degre(b) > DEGRE_MAX {
        return Err(degre_trop_grand());
    }

    let mut out = vec![BigRational::zero(); a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        if x.is_zero() {
            continue;
        }
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    Ok(normalise(out))
}

/// Division exacte : quotient si le reste est nul, sinon fraction rationnelle (refus).
///
/// Accepte volontairement plus qu’un simplificateur qui ne compense pas les facteurs :
/// `(x**2-1)/(x-1)` donne `x+1`.
fn div(a: &Coeffs, b: &Coeffs) -> Result<Coeffs, Rejet> {
    if est_nul(b) {
        return Err(Rejet::Autre("division par zéro".into()));
    }

    if est_constante(b) {
        let k = &b[0];
        return Ok(normalise(a.iter().map(|x| x / k).collect()));
    }

    if degre(a) < degre(b) && !est_nul(a) {
        return Err(fraction_rationnelle());
    }

    // division euclidienne (ordre croissant : tête = fin du vecteur)
    let mut reste = a.clone();
    let db = degre(b);
    let tete_b = &b[db];
    let mut quotient = vec![BigRational::zero(); (degre(a) + 1).saturating_sub(db).max(1)];

    while !est_nul(&reste) && degre(&reste) >= db {
        let dr = degre(&reste);
        let k = &reste[dr] / tete_b;
        let decal = dr - db;
        for (j, y) in b.iter().enumerate() {
            reste[decal + j] -= &k * y;
        }
        quotient[decal] = k;
        // la tête est annulée par construction
        reste.pop();
        reste = normalise(reste);
    }

    if !est_nul(&reste) {
        return Err(fraction_rationnelle());
    }
    Ok(normalise(quotient))
}

fn pow(base: &Coeffs, exposant: &Coeffs) -> Result<Coeffs, Rejet> {
    if !est_constante(exposant) {
        return Err(Rejet::NonPolynomial("exposant non constant".into()));
    }
    let k = &exposant[0];
    if !k.is_integer() {
        return Err(Rejet::NonPolynomial(format!(
            "exposant non entier: {}/{}",
            k.numer(),
            k.denom()
        )));
    }
    let n: &BigInt = k.numer();

    if est_constante(base) {
        return pow_constante(&base[0], n).map(constante);
    }

    if n.is_negative() {
        return Err(Rejet::NonPolynomial(format!("exposant négatif: {n}")));
    }
    let n = n
        .to_usize()
        .filter(|n| n.saturating_mul(degre(base)) <= DEGRE_MAX)
        .ok_or_else(degre_trop_grand)?;

    // carré-multiplication
    let mut acc = constante(BigRational::one());
    let mut b = base.clone();
    let mut e = n;
    while e > 0 {
        if e & 1 == 1 {
            acc = mul(&acc, &b)?;
        }
        e >>= 1;
        if e > 0 {
            b = mul(&b, &b)?;
        }
    }
    Ok(acc)
}

/// r^n exact, n entier de signe quelconque.
fn pow_constante(r: &BigRational, n: &BigInt) -> Result<BigRational, Rejet> {
    if n.is_zero() {
        // 0**0 = 1 (convention usuelle)
        return Ok(BigRational::one());
    }
    if r.is_zero() {
        if n.is_negative() {
            return Err(Rejet::Autre("division par zéro (0 à une puissance négative)".into()));
        }
        return Ok(BigRational::zero());
    }
    if r.abs().is_one() {
        let impair = !(n % BigInt::from(2)).is_zero();
        return Ok(if r.is_negative() && impair {
            -BigRational::one()
        } else {
            BigRational::one()
        });
    }

    // seul le coût compte ici : BITS_MAX borne la taille du résultat exact
    let m = n
        .abs()
        .to_u64()
        .ok_or_else(|| Rejet::Autre(format!("exposant trop grand: {n}")))?;

    let bits = (r.numer().bits() + r.denom().bits()).saturating_mul(m);
    if bits > BITS_MAX {
        return Err(Rejet::Autre(format!("constante trop grande (~{bits} bits)")));
    }

    let p = num_traits::pow(r.clone(), m as usize);
    Ok(if n.is_negative() { p.recip() } else { p })
}

fn degre_trop_grand() -> Rejet {
    Rejet::Autre(format!("degré trop grand (max {DEGRE_MAX})"))
}

fn fraction_rationnelle() -> Rejet {
    Rejet::NonPolynomial("division par un polynôme non constant (fraction rationnelle)".into())
}
