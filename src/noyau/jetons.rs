// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),

    // Inconnue, symboles étrangers, noms de fonctions (normalisés en minuscules).
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction ou un symbole.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Pow, // ** (ou ^)

    LPar,
    RPar,

    // Produits seulement par to_rpn (jamais par tokenize) :
    Neg,           // moins unaire
    Appel(String), // nom(...) : application de fonction
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12)
/// - décimaux exacts (ex: 1.5, .25, 2e3, 1.5e-2) -> Num(rationnel exact)
/// - opérateurs + - * / ** ^
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
///
/// Tout autre caractère (y compris un '=' résiduel) est une erreur.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" => puissance
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Pow);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Pow);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Nombre : partie entière, partie décimale, exposant (tous optionnels sauf un chiffre)
        if c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit())
        {
            let (rat, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(rat));
            i = fin;
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Lit un littéral numérique à partir de `debut`, retourne (valeur exacte, index de fin).
fn lire_nombre(chars: &[char], debut: usize) -> Result<(BigRational, usize), String> {
    let mut i = debut;

    let mut chiffres = String::new();
    while i < chars.len() && chars[i].is_ascii_digit() {
        chiffres.push(chars[i]);
        i += 1;
    }

    // partie décimale
    let mut nb_decimales: usize = 0;
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            chiffres.push(chars[i]);
            nb_decimales += 1;
            i += 1;
        }
    }

    if chiffres.is_empty() {
        return Err("nombre invalide".into());
    }

    // exposant : e[+-]?chiffres (sinon 'e' appartient à l’identifiant suivant)
    let mut exposant: i64 = 0;
    if i < chars.len() && chars[i] == 'e' {
        let mut j = i + 1;
        let mut negatif = false;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            negatif = chars[j] == '-';
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            let start_e = j;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let e_str: String = chars[start_e..j].iter().collect();
            let e: i64 = e_str.parse().map_err(|_| "exposant trop grand")?;
            if e > EXPOSANT_LITTERAL_MAX {
                return Err("exposant trop grand".into());
            }
            exposant = if negatif { -e } else { e };
            i = j;
        }
    }

    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or("nombre invalide")?;
    let echelle = exposant - nb_decimales as i64;

    let rat = if echelle >= 0 {
        BigRational::from_integer(n * pow10(echelle as u32))
    } else {
        BigRational::new(n, pow10((-echelle) as u32))
    };

    Ok((rat, i))
}

/// Garde-fou : 1e999999999 ne doit pas geler la machine.
const EXPOSANT_LITTERAL_MAX: i64 = 4096;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Pow => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),

            Tok::Neg => "neg".to_string(),
            Tok::Appel(name) => format!("{name}()"),
        };
        out.push(s);
    }
    out.join(" ")
}
