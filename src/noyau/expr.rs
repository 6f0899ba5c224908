// src/noyau/expr.rs
//
// AST exact (sans flottants).
// - Rat      : rationnel exact
// - Inconnue : le symbole réservé (x)
// - Symbole  : tout autre identifiant (y, pi, ...) => hors domaine (multi-variable)
// - Fonction : application nom(arg) => hors domaine (non polynomial)
//
// IMPORTANT (SAFE):
// - l’AST ne décide rien : la collecte des termes (collecte.rs) tranche.
// - les parcours sont itératifs + bornés (pas de récursion sur l’entrée brute).

use num_rational::BigRational;
use num_traits::One;

use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Rat(BigRational),
    Inconnue,
    Symbole(String),

    Fonction(String, Box<Expr>),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Fonctions appliquées dans l’arbre (triées, sans doublon). Parcours itératif.
    pub fn fonctions(&self) -> BTreeSet<String> {
        use Expr::*;

        let mut out = BTreeSet::new();
        let mut pile: Vec<&Expr> = Vec::with_capacity(64);
        pile.push(self);

        while let Some(e) = pile.pop() {
            match e {
                Rat(_) | Inconnue | Symbole(_) => {}
                Fonction(nom, arg) => {
                    out.insert(nom.clone());
                    pile.push(arg.as_ref());
                }
                Neg(x) => pile.push(x.as_ref()),
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    pile.push(a.as_ref());
                    pile.push(b.as_ref());
                }
            }
        }

        out
    }
}

/* ------------------------ Affichage debug (pas “joli” final) ------------------------ */

/// Rendu itératif (pile explicite) : un arbre de ~2000 niveaux ne doit pas déborder.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        enum Morceau<'a> {
            Noeud(&'a Expr),
            Texte(&'a str),
        }

        let mut pile: Vec<Morceau<'_>> = Vec::with_capacity(64);
        pile.push(Morceau::Noeud(self));

        while let Some(m) = pile.pop() {
            let e = match m {
                Morceau::Texte(t) => {
                    f.write_str(t)?;
                    continue;
                }
                Morceau::Noeud(e) => e,
            };

            match e {
                Rat(r) => {
                    let n = r.numer();
                    let d = r.denom();
                    if d.is_one() {
                        write!(f, "{n}")?;
                    } else {
                        write!(f, "{n}/{d}")?;
                    }
                }
                Inconnue => f.write_str("x")?,
                Symbole(s) => f.write_str(s)?,
                Fonction(nom, x) => {
                    write!(f, "{nom}(")?;
                    pile.push(Morceau::Texte(")"));
                    pile.push(Morceau::Noeud(x.as_ref()));
                }
                Neg(x) => {
                    f.write_str("(-")?;
                    pile.push(Morceau::Texte(")"));
                    pile.push(Morceau::Noeud(x.as_ref()));
                }
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    let op = match e {
                        Add(_, _) => "+",
                        Sub(_, _) => "-",
                        Mul(_, _) => "*",
                        Div(_, _) => "/",
                        _ => "**",
                    };
                    f.write_str("(")?;
                    pile.push(Morceau::Texte(")"));
                    pile.push(Morceau::Noeud(b.as_ref()));
                    pile.push(Morceau::Texte(op));
                    pile.push(Morceau::Noeud(a.as_ref()));
                }
            }
        }

        Ok(())
    }
}
