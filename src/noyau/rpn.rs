// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name) suivi de '(' => application de fonction (Tok::Appel), sauf pour x
// - Ident("x")               => l’inconnue
// - autre Ident              => symbole étranger (voir symboles_libres)
// - Moins unaire : opérateur préfixe Tok::Neg
//     précédence : + - (1) < * / (2) < neg (3) < ** (4)
//     donc -x**2 = -(x**2) et 2*-x = 2*(-x)
// - Plus unaire : ignoré
// - ** est associatif à droite : 2**3**2 = 2**(3**2)
//
// NOTE:
// - Deux valeurs adjacentes ("x y", "x(", ")(") sont refusées ici :
//   la multiplication implicite n’est PAS généralisée.

use super::expr::Expr;
use super::jetons::Tok;
use super::normalise::INCONNUE;

/// Garde-fou : l’AST est affiché / libéré récursivement, on borne sa taille.
pub const MAX_JETONS: usize = 4096;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Pow => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Pow)
}

fn est_inconnue(name: &str) -> bool {
    let mut it = name.chars();
    it.next() == Some(INCONNUE) && it.next().is_none()
}

/// Symboles libres autres que l’inconnue (triés, sans doublon).
///
/// Lu sur les jetons, donc AVANT toute règle de syntaxe : "2y" (adjacence refusée plus loin)
/// est d’abord une expression à deux variables.
pub fn symboles_libres(tokens: &[Tok]) -> Vec<String> {
    let mut out: Vec<String> = tokens
        .iter()
        .enumerate()
        .filter_map(|(i, t)| match t {
            Tok::Ident(name)
                if !est_inconnue(name) && !matches!(tokens.get(i + 1), Some(Tok::LPar)) =>
            {
                Some(name.clone())
            }
            _ => None,
        })
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(3), Star, LPar, Ident("x"), Minus, Num(4), RPar]
///   rpn:    [Num(3), Ident("x"), Num(4), Minus, Star]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    if tokens.is_empty() {
        return Err("expression vide".into());
    }
    if tokens.len() > MAX_JETONS {
        return Err(format!("expression trop longue (max {MAX_JETONS} jetons)"));
    }

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les opérateurs unaires et les valeurs adjacentes.
    let mut prev_was_value = false;

    for (i, tok) in tokens.iter().cloned().enumerate() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err("opérateur manquant".into());
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err("opérateur manquant".into());
                }
                // "x(" n’est jamais un appel : la '(' suivante tombe sur "opérateur manquant"
                if !est_inconnue(&name) && matches!(tokens.get(i + 1), Some(Tok::LPar)) {
                    // fonction : reste sur la pile (sortira après son argument)
                    ops.push(Tok::Appel(name));
                    prev_was_value = false;
                } else {
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err("opérateur manquant avant '('".into());
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err("opérande manquant avant ')'".into());
                }

                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err("parenthèse fermante sans ouvrante".into());
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Appel(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            // unaires : seulement quand on n’attend PAS un opérateur binaire
            Tok::Plus if !prev_was_value => {}
            Tok::Minus if !prev_was_value => {
                // préfixe : rien à dépiler
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Pow => {
                if !prev_was_value {
                    return Err(format!("opérande manquant avant '{}'", symbole_op(&tok)));
                }

                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Appel(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg | Tok::Appel(_) => {
                return Err("jeton interne inattendu".into());
            }
        }
    }

    if !prev_was_value {
        return Err("expression incomplète".into());
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar | Tok::Appel(_)) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

fn symbole_op(t: &Tok) -> &'static str {
    match t {
        Tok::Plus => "+",
        Tok::Minus => "-",
        Tok::Star => "*",
        Tok::Slash => "/",
        Tok::Pow => "**",
        _ => "?",
    }
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push(Expr::Rat(r)),

            Tok::Ident(name) => {
                if est_inconnue(&name) {
                    st.push(Expr::Inconnue);
                } else {
                    st.push(Expr::Symbole(name));
                }
            }

            Tok::Neg => {
                let x = st.pop().ok_or("expression invalide")?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Appel(name) => {
                let x = st.pop().ok_or("fonction sans argument")?;
                st.push(Expr::Fonction(name, Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Pow => {
                let b = st.pop().ok_or("expression invalide")?;
                let a = st.pop().ok_or("expression invalide")?;

                let (a, b) = (Box::new(a), Box::new(b));
                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };

                st.push(e);
            }

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err("expression invalide".into()),
    }
}
