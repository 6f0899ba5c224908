//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : normalize ne panique jamais, analyse rend Ok OU un échec typé
//! - invariant clé : un succès évalué aux points tests == évaluation directe de l’expression

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;

use super::{analyse, derive, normalize, ParseFailure};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Arbre témoin : on garde la structure pour l’évaluer exactement sans le parseur.
#[derive(Clone, Debug)]
enum Temoin {
    Nombre(i64, i64),
    X,
    Add(Box<Temoin>, Box<Temoin>),
    Sub(Box<Temoin>, Box<Temoin>),
    Mul(Box<Temoin>, Box<Temoin>),
    Carre(Box<Temoin>),
}

impl Temoin {
    /// Texte “humain” : multiplication implicite quand l’heuristique la couvre.
    fn texte(&self, rng: &mut Rng) -> String {
        match self {
            Temoin::Nombre(a, 1) => format!("{a}"),
            Temoin::Nombre(a, b) => format!("({a}/{b})"),
            Temoin::X => (if rng.coin() { "x" } else { "X" }).to_string(),
            Temoin::Add(a, b) => format!("({} + {})", a.texte(rng), b.texte(rng)),
            Temoin::Sub(a, b) => format!("({} - {})", a.texte(rng), b.texte(rng)),
            Temoin::Mul(a, b) => {
                let ta = a.texte(rng);
                let tb = b.texte(rng);
                // "3(…)" et "3x" : seulement si ta finit par un chiffre
                if ta.ends_with(|c: char| c.is_ascii_digit())
                    && (tb.starts_with('(') || tb == "x")
                    && rng.coin()
                {
                    format!("{ta}{tb}")
                } else {
                    format!("{ta}*{tb}")
                }
            }
            Temoin::Carre(a) => format!("({})^2", a.texte(rng)),
        }
    }

    fn valeur(&self, x: &BigRational) -> BigRational {
        match self {
            Temoin::Nombre(a, b) => BigRational::new(BigInt::from(*a), BigInt::from(*b)),
            Temoin::X => x.clone(),
            Temoin::Add(a, b) => a.valeur(x) + b.valeur(x),
            Temoin::Sub(a, b) => a.valeur(x) - b.valeur(x),
            Temoin::Mul(a, b) => a.valeur(x) * b.valeur(x),
            Temoin::Carre(a) => {
                let v = a.valeur(x);
                &v * &v
            }
        }
    }
}

fn gen_nombre(rng: &mut Rng) -> Temoin {
    let a = rng.pick(15) as i64 - 7;
    let b = if rng.coin() { 1 } else { rng.pick(6) as i64 + 2 };
    Temoin::Nombre(a, b)
}

fn gen_temoin(rng: &mut Rng, depth: usize) -> Temoin {
    if depth == 0 {
        return if rng.coin() { Temoin::X } else { gen_nombre(rng) };
    }

    let sous = |rng: &mut Rng| Box::new(gen_temoin(rng, depth - 1));
    match rng.pick(6) {
        0 => Temoin::X,
        1 => Temoin::Add(sous(rng), sous(rng)),
        2 => Temoin::Sub(sous(rng), sous(rng)),
        3 => Temoin::Mul(sous(rng), sous(rng)),
        4 => Temoin::Carre(sous(rng)),
        _ => gen_nombre(rng),
    }
}

/// Bruit textuel : caractères du domaine + quelques intrus.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        'x', 'X', 'y', '1', '2', '3', '.', '+', '-', '*', '/', '^', '(', ')', '=', ' ', '\t',
        's', 'i', 'n', 'é', '²',
    ];
    let n = rng.pick(24) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_polynomes_valides_coherents() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let points: Vec<BigRational> = [(-3, 2), (0, 1), (1, 3), (2, 1)]
        .iter()
        .map(|&(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
        .collect();

    for _ in 0..150 {
        budget(t0, max);

        let t = gen_temoin(&mut rng, 4);
        let texte = t.texte(&mut rng);

        let a = analyse(&texte).unwrap_or_else(|e| panic!("texte={texte:?} err={e}"));
        for x in &points {
            assert_eq!(a.polynome.evalue_exact(x), t.valeur(x), "texte={texte:?} x={x}");
        }
    }
}

#[test]
fn fuzz_safe_equations_racine_commune() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let x0 = BigRational::new(BigInt::from(5), BigInt::from(4));

    for _ in 0..100 {
        budget(t0, max);

        let g = gen_temoin(&mut rng, 3);
        let d = gen_temoin(&mut rng, 3);
        let texte = format!("{} = {}", g.texte(&mut rng), d.texte(&mut rng));

        let a = analyse(&texte).unwrap_or_else(|e| panic!("texte={texte:?} err={e}"));
        // p = d - g
        let attendu = d.valeur(&x0) - g.valeur(&x0);
        assert_eq!(a.polynome.evalue_exact(&x0), attendu, "texte={texte:?}");
    }
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);

    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let texte = gen_bruit(&mut rng);
        let canonique = normalize(&texte);

        match analyse(&texte) {
            Ok(a) => {
                assert_eq!(a.canonique, canonique);
                assert!(a.polynome.coefficients().iter().all(|c| c.is_finite()));
                assert!(derive(Ok(&a.polynome)).is_ok());
                seen_ok += 1;
            }
            Err(f) => {
                // l’échec porte toujours la forme canonique tentée
                assert_eq!(f.expression(), canonique, "texte={texte:?}");
                assert_eq!(derive(Err(&f)), Err(f.clone()));
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 0, "aucun succès: bruit trop “sale”");
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_multi_variable_toujours_detecte() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);

    let mut rng = Rng::new(0xFACE_u64);

    for _ in 0..80 {
        budget(t0, max);

        let t = gen_temoin(&mut rng, 3);
        let texte = format!("{} = 2y + {}", t.texte(&mut rng), rng.pick(9));

        match analyse(&texte) {
            Err(ParseFailure::MultiVariable { symboles, .. }) => {
                assert_eq!(symboles, vec!["y".to_string()]);
            }
            autre => panic!("texte={texte:?} attendu MultiVariable, obtenu {autre:?}"),
        }
    }
}
