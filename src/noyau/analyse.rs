//! Noyau : analyse (pipeline réel)
//!
//! texte brut -> normalise -> jetons -> RPN -> Expr
//!            -> collecte des termes -> Polynome (coefficients exacts, degré décroissant)
//!
//! Ordre des refus (le premier qui s’applique gagne) :
//! 1) caractère inconnu (jetons)      => Syntaxe
//! 2) symboles autres que x           => MultiVariable (même si la suite est mal formée)
//! 3) structure (RPN / AST)           => Syntaxe
//! 4) fonctions appliquées            => NonPolynomiale
//! 5) collecte (fractions, exposants) => NonPolynomiale / Autre
//!
//! Le cœur ne journalise rien : seule la surface publique (parse_polynomial, derive_p)
//! écrit le diagnostic sur stderr et trace via `log`.

use num_rational::BigRational;

use super::collecte::{collecte, Rejet};
use super::erreur::ParseFailure;
use super::format::format_coefficients;
use super::jetons::{format_tokens, tokenize};
use super::normalise::normalize;
use super::polynome::Polynome;
use super::rpn::{from_rpn, symboles_libres, to_rpn};

/// Démarche du noyau : chaque étape en texte (panneau d’explication de l’UI).
#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub canonique: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    pub coefficients: String,
}

/// Résultat complet d’une analyse réussie.
#[derive(Clone, Debug, PartialEq)]
pub struct Analyse {
    pub canonique: String,
    pub polynome: Polynome,
    pub demarche: DemarcheNoyau,
}

/// Construit le polynôme d’une expression DÉJÀ canonique.
///
/// Le contexte symbolique (x seule inconnue) est local à l’appel : aucune table globale.
pub fn build(canonique: &str) -> Result<Polynome, ParseFailure> {
    construit(canonique).map(|(p, _)| p)
}

/// Normalise puis construit, en gardant la démarche.
pub fn analyse(brut: &str) -> Result<Analyse, ParseFailure> {
    let canonique = normalize(brut);
    let (polynome, demarche) = construit(&canonique)?;
    Ok(Analyse {
        canonique,
        polynome,
        demarche,
    })
}

fn construit(canonique: &str) -> Result<(Polynome, DemarcheNoyau), ParseFailure> {
    let syntaxe = |detail: String| ParseFailure::Syntaxe {
        expression: canonique.to_string(),
        detail,
    };

    let jetons = tokenize(canonique).map_err(syntaxe)?;

    let symboles = symboles_libres(&jetons);
    if !symboles.is_empty() {
        return Err(ParseFailure::MultiVariable {
            expression: canonique.to_string(),
            symboles,
        });
    }

    let rpn = to_rpn(&jetons).map_err(syntaxe)?;
    let expr = from_rpn(&rpn).map_err(syntaxe)?;

    let fonctions = expr.fonctions();
    if !fonctions.is_empty() {
        let noms: Vec<String> = fonctions.into_iter().collect();
        return Err(ParseFailure::NonPolynomiale {
            expression: canonique.to_string(),
            detail: format!("fonction(s) non polynomiale(s): {}", noms.join(", ")),
        });
    }

    // Collecte des termes (croissant) -> Polynome (décroissant)
    let mut coeffs = collecte(&expr).map_err(|r| match r {
        Rejet::NonPolynomial(detail) => ParseFailure::NonPolynomiale {
            expression: canonique.to_string(),
            detail,
        },
        Rejet::Autre(detail) => ParseFailure::Autre {
            expression: canonique.to_string(),
            detail,
        },
    })?;
    coeffs.reverse();

    let polynome = Polynome::depuis_exacts(coeffs).map_err(|detail| ParseFailure::Autre {
        expression: canonique.to_string(),
        detail,
    })?;

    let demarche = DemarcheNoyau {
        canonique: canonique.to_string(),
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
        arbre: expr.to_string(),
        coefficients: format_coefficients(&polynome),
    };

    Ok((polynome, demarche))
}

/// Dérivée d’un résultat d’analyse : un échec en entrée ressort tel quel (pas de panique).
pub fn derive(p: Result<&Polynome, &ParseFailure>) -> Result<Polynome, ParseFailure> {
    let p = p.map_err(Clone::clone)?;
    p.derivee().map_err(|detail| ParseFailure::Autre {
        expression: p.to_string(),
        detail,
    })
}

/// Évaluation flottante (Horner). Un polynôme absent ne peut pas être passé (type).
pub fn evaluate(p: &Polynome, x: f64) -> f64 {
    p.evalue(x)
}

/* ------------------------ Surface publique (échec => None + stderr) ------------------------ */

/// Analyse un polynôme / une équation. `None` en cas d’échec, avec sur stderr :
/// `Error when parsing '<expression normalisée>'!`
pub fn parse_polynomial(texte: &str) -> Option<Polynome> {
    match analyse(texte) {
        Ok(a) => {
            log::trace!("'{}' -> {}", a.canonique, a.polynome);
            Some(a.polynome)
        }
        Err(f) => {
            log::debug!("échec {} : {f}", f.genre());
            eprintln!("{}", f.diagnostic());
            None
        }
    }
}

/// Dérive un polynôme optionnel. `None` => `None`. En cas d’échec interne, sur stderr :
/// `Error when deriving '<polynôme>'!`
pub fn derive_p(p: Option<&Polynome>) -> Option<Polynome> {
    let p = p?;
    match derive(Ok(p)) {
        Ok(d) => Some(d),
        Err(f) => {
            log::debug!("échec de dérivation : {f}");
            eprintln!("Error when deriving '{}'!", f.expression());
            None
        }
    }
}

/// Lit une valeur constante exacte (ex: "-34/3", "1.5e-2") via le même pipeline.
/// Refuse toute expression de degré > 0.
pub fn valeur_constante(texte: &str) -> Result<BigRational, ParseFailure> {
    let a = analyse(texte)?;
    if a.polynome.degre() > 0 {
        return Err(ParseFailure::NonPolynomiale {
            expression: a.canonique,
            detail: "une constante est attendue (x interdit)".into(),
        });
    }
    let c = a.polynome.coefficients_exacts()[0].clone();
    Ok(c)
}
