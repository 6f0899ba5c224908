// src/noyau/normalise.rs
//
// Normalisation texte -> texte (aucun échec possible).
//
// Ordre FIXE des étapes (chaque étape suppose les invariants de la précédente) :
// 1) nettoyage       : retire espaces/tabulations, passe en minuscules
// 2) équation        : "g=d" devient "d-(g)" (premier '=' seulement, position > 0)
// 3) caret           : '^' devient "**"
// 4) mul. implicite  : chiffre suivi de '(' ou de l'inconnue => insère '*'
//
// Note : l'étape 4 est une heuristique ÉTROITE (lookahead d'un caractère).
// "x(…)", ")x", "xx" restent des erreurs de syntaxe plus loin (volontaire).

/// Symbole réservé de l'inconnue.
pub const INCONNUE: char = 'x';

/// Opérateur puissance de la forme canonique.
pub const OP_PUISSANCE: &str = "**";

/// Pipeline complet : texte brut -> expression canonique.
pub fn normalize(brut: &str) -> String {
    let s = nettoie(brut);
    let s = equation_vers_polynome(&s);
    let s = remplace_caret(&s);
    ajoute_mul_implicite(&s)
}

/// Retire espaces + tabulations (seulement ceux-là) puis minuscules.
pub fn nettoie(s: &str) -> String {
    s.chars()
        .filter(|c| *c != ' ' && *c != '\t')
        .collect::<String>()
        .to_lowercase()
}

/// "g=d" => "d-(g)". Un '=' en tête compte comme absent.
pub fn equation_vers_polynome(s: &str) -> String {
    match s.find('=') {
        Some(pos) if pos > 0 => {
            let (gauche, reste) = s.split_at(pos);
            // reste commence par '=' (1 octet ASCII)
            let droite = &reste[1..];
            format!("{droite}-({gauche})")
        }
        _ => s.to_string(),
    }
}

/// Substitution purement textuelle, sans raisonnement de précédence.
pub fn remplace_caret(s: &str) -> String {
    s.replace('^', OP_PUISSANCE)
}

/// Insère '*' entre un chiffre et '(' ou l'inconnue.
pub fn ajoute_mul_implicite(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut it = s.chars().peekable();

    while let Some(c) = it.next() {
        out.push(c);
        if c.is_numeric() {
            if let Some(&suivant) = it.peek() {
                if suivant == '(' || suivant == INCONNUE {
                    out.push('*');
                }
            }
        }
    }

    out
}
