//! Tests scénarios (campagne) : cas de référence + invariants + limites contrôlées.
//!
//! But : verrouiller le contrat observable de la surface publique.
//! - scénarios exacts (équations linéaire / carrée, multi-variable)
//! - invariants (racines d’une équation, dérivée, casse / espaces)
//! - stress borné (budget temps, tailles bornées)
//!
//! Tolérance flottante : 1e-9 (les coefficients sont exacts, seule l’évaluation est IEEE).

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use super::{analyse, derive_p, evaluate, parse_polynomial, ParseFailure, Polynome};

const TOL: f64 = 1e-9;

fn poly_ok(expr: &str) -> Polynome {
    parse_polynomial(expr).unwrap_or_else(|| panic!("parse_polynomial({expr:?}) a échoué"))
}

fn assert_proche(obtenu: f64, attendu: f64, ctx: &str) {
    assert!(
        (obtenu - attendu).abs() <= TOL,
        "{ctx}: obtenu {obtenu}, attendu {attendu}"
    );
}

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Scénarios de référence ------------------------ */

#[test]
fn scenario_equation_lineaire() {
    let p = poly_ok("3x + 5 = 3(1/2x - 4)");
    assert_proche(evaluate(&p, -34.0 / 3.0), 0.0, "p(-34/3)");

    let d = derive_p(Some(&p)).expect("dérivée");
    assert_proche(evaluate(&d, -34.0 / 3.0), -1.5, "p'(-34/3)");

    // et exactement, sans flottant
    assert!(p.evalue_exact(&rat(-34, 3)).is_zero());
}

#[test]
fn scenario_expression_deja_polynome() {
    let p = poly_ok("3(1/2x-4)-3x-5");
    assert_proche(evaluate(&p, -34.0 / 3.0), 0.0, "p(-34/3)");

    let d = derive_p(Some(&p)).expect("dérivée");
    assert_proche(evaluate(&d, -34.0 / 3.0), -1.5, "p'(-34/3)");
}

#[test]
fn scenario_equation_carree() {
    let p = poly_ok("x^2 + 3x = (2x + 1) ^ 2");
    assert_eq!(p.coefficients(), vec![3.0, 1.0, 1.0]);
    assert_proche(evaluate(&p, -0.5), 1.25, "p(-0.5)");

    let d = derive_p(Some(&p)).expect("dérivée");
    assert_proche(evaluate(&d, -0.5), -2.0, "p'(-0.5)");
}

#[test]
fn scenario_multi_variable() {
    let p = parse_polynomial("3x=(2y+1)^2-x^2");
    assert!(p.is_none());
    assert!(derive_p(p.as_ref()).is_none());

    // version typée : le genre est conservé
    assert!(matches!(
        analyse("3x=(2y+1)^2-x^2"),
        Err(ParseFailure::MultiVariable { .. })
    ));
}

#[test]
fn scenario_casse_et_espaces() {
    assert_eq!(poly_ok("X^2+3X"), poly_ok("x ^ 2 + 3 x"));
    assert_eq!(poly_ok("\tX ^2 +3x "), poly_ok("x^2+3x"));
}

/* ------------------------ Invariants ------------------------ */

#[test]
fn inv_racines_des_equations() {
    // (équation, racine de R - L)
    let cas = [
        ("2x + 1 = x - 3", -4.0),
        ("x^2 = 4", 2.0),
        ("x^2 = 4", -2.0),
        ("(x-1)(x+2)=0", 1.0),
        ("x^3 - 1/8 = 0", 0.5),
        ("5 = 10x", 0.5),
        ("1.5x = 3", 2.0),
    ];
    for (texte, racine) in cas {
        // "(x-1)(x+2)" : hors heuristique étroite => doit échouer proprement
        match parse_polynomial(texte) {
            Some(p) => assert_proche(evaluate(&p, racine), 0.0, texte),
            None => assert!(texte.contains(")("), "échec inattendu: {texte:?}"),
        }
    }
}

#[test]
fn inv_derivee_lineaire() {
    for (a, b, c) in [(3, 1, 1), (-2, 5, 7), (1, 0, -4), (7, -3, 0)] {
        let p = poly_ok(&format!("{a}*x^2+{b}*x+{c}"));
        let d = derive_p(Some(&p)).expect("dérivée");
        assert_eq!(
            d.coefficients(),
            vec![2.0 * a as f64, b as f64],
            "a={a} b={b} c={c}"
        );
    }
}

#[test]
fn inv_derivee_independante_de_la_source() {
    let p = poly_ok("x^3");
    let d = derive_p(Some(&p)).expect("dérivée");
    assert_eq!(p.coefficients(), vec![1.0, 0.0, 0.0, 0.0]);
    assert_eq!(d.coefficients(), vec![3.0, 0.0, 0.0]);
}

#[test]
fn inv_affichage_relisible() {
    for texte in ["x^2 + 3x = (2x + 1) ^ 2", "3x + 5 = 3(1/2x - 4)", "x^5-x", "0", "-7"] {
        let p = poly_ok(texte);
        let relu = poly_ok(&p.to_string());
        assert_eq!(relu, p, "texte={texte:?} affiché={p}");
    }
}

#[test]
fn inv_polynome_nul() {
    let p = poly_ok("x = x");
    assert_eq!(p.coefficients(), vec![0.0]);
    assert_eq!(p.degre(), 0);
    assert_eq!(derive_p(Some(&p)).expect("dérivée").coefficients(), vec![0.0]);
}

/* ------------------------ Échecs : jamais de panique ------------------------ */

#[test]
fn echecs_degrades_en_none() {
    for texte in [
        "",
        "x +",
        "x(x+1)",
        "sin(x)",
        "1/x = 2",
        "x^(1/2)",
        "2^x",
        "x = 1 = 2",
        "= x",
        "x ≥ 2",
        "x/0",
    ] {
        let p = parse_polynomial(texte);
        assert!(p.is_none(), "attendu None pour {texte:?}, obtenu {p:?}");
        assert!(derive_p(p.as_ref()).is_none());
    }
}

#[test]
fn echecs_genres_distincts() {
    assert!(matches!(analyse("x +"), Err(ParseFailure::Syntaxe { .. })));
    assert!(matches!(analyse("cos(x)"), Err(ParseFailure::NonPolynomiale { .. })));
    assert!(matches!(analyse("1/x"), Err(ParseFailure::NonPolynomiale { .. })));
    assert!(matches!(analyse("x+z"), Err(ParseFailure::MultiVariable { .. })));
    assert!(matches!(analyse("x/0"), Err(ParseFailure::Autre { .. })));
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn stress_somme_longue_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut expr = String::new();
    for k in 0..400 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1/2x");
        budget(t0, max);
    }

    // 400*(1/2 x) = 200x
    let p = poly_ok(&expr);
    budget(t0, max);
    assert_eq!(p.coefficients(), vec![200.0, 0.0]);
}

#[test]
fn stress_negations_imbriquees_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    // 2000 moins unaires : parcours itératif, pas de débordement de pile
    let expr = format!("{}x", "-".repeat(2000));
    let p = poly_ok(&expr);
    budget(t0, max);
    assert_eq!(p.coefficients(), vec![1.0, 0.0]);
}

#[test]
fn stress_somme_profonde_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    // 2000 termes : arbre gauche de ~2000 niveaux (collecte + démarche)
    let expr = vec!["x"; 2000].join("+");
    let p = poly_ok(&expr);
    budget(t0, max);
    assert_eq!(p.coefficients(), vec![2000.0, 0.0]);

    let a = analyse(&expr).expect("analyse");
    assert_eq!(a.demarche.arbre.matches('+').count(), 1999);
}

#[test]
fn stress_puissances_en_chaine_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    // x**x**…**x : associatif à droite, ~2000 niveaux, exposant non constant
    let tour = vec!["x"; 2000].join("**");
    assert!(parse_polynomial(&tour).is_none());
    assert!(matches!(analyse(&tour), Err(ParseFailure::NonPolynomiale { .. })));
    budget(t0, max);

    // 2**1**1**…**1 = 2 : même profondeur, succès
    let constante = format!("2**{}", vec!["1"; 1999].join("**"));
    assert_eq!(poly_ok(&constante).coefficients(), vec![2.0]);
    budget(t0, max);
}

#[test]
fn stress_degre_eleve_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let p = poly_ok("x^1000 - 1 = 0");
    budget(t0, max);
    assert_eq!(p.degre(), 1000);
    assert_proche(evaluate(&p, 1.0), 0.0, "p(1)");
    assert_proche(evaluate(&p, -1.0), 0.0, "p(-1)");

    // au-delà du garde-fou : échec propre
    assert!(parse_polynomial("x^100000").is_none());
}

#[test]
fn stress_bigint_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let big = "9".repeat(100);
    let p = poly_ok(&format!("{big}/7x + 1/7x"));
    budget(t0, max);

    // (10^100)/7 : fini en f64
    assert_eq!(p.degre(), 1);
    assert!(p.coefficients()[0].is_finite());
}
