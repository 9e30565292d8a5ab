// src/noyau/jetons.rs
//
// Normalisation (glyphes d’affichage -> forme évaluable) + tokenisation.
//
// Normalisation = substitution textuelle seulement, aucune validation :
// - ÷ × −  -> / * -
// - π      -> (3.141592653589793)
// - e      -> (2.718281828459045), SEULEMENT si "e" est un identifiant isolé
//             (le "e" de "sqrt", "sec"… n’est jamais touché)
// - log    -> log10 (ln reste le logarithme népérien)
// - 12.5%  -> (12.5/100) ; aussi après une constante : π% -> ((3.14…)/100)
//
// Les constantes sont parenthésées : "2π" ne devient jamais "23.14…".

use std::f64::consts::{E, PI};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions (sin, cos, …) ; le parse décidera si le nom est connu.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    StarStar, // **

    // Moins unaire : produit par to_rpn, jamais par tokenize.
    Neg,

    LPar,
    RPar,
}

/// Réécrit une expression d’affichage en forme évaluable.
pub fn normaliser(brut: &str) -> String {
    let chars: Vec<char> = brut.chars().collect();
    let mut out = String::with_capacity(brut.len() + 16);
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        match c {
            '÷' => {
                out.push('/');
                i += 1;
                continue;
            }
            '×' => {
                out.push('*');
                i += 1;
                continue;
            }
            '−' => {
                out.push('-');
                i += 1;
                continue;
            }
            'π' => {
                i += 1;
                push_constante(&mut out, PI, &chars, &mut i);
                continue;
            }
            _ => {}
        }

        // Identifiants : on lit le mot entier avant de décider.
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            match mot.as_str() {
                "e" => push_constante(&mut out, E, &chars, &mut i),
                "log" => out.push_str("log10"),
                _ => out.push_str(&mot),
            }
            continue;
        }

        // Nombre (chiffres + points, la lecture stricte est faite par tokenize)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let nombre: String = chars[start..i].iter().collect();

            if i < chars.len() && chars[i] == '%' {
                out.push('(');
                out.push_str(&nombre);
                out.push_str("/100)");
                i += 1;
            } else {
                out.push_str(&nombre);
            }
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}

/// Constante parenthésée ; un '%' qui la suit est absorbé.
fn push_constante(out: &mut String, v: f64, chars: &[char], i: &mut usize) {
    let pourcent = chars.get(*i) == Some(&'%');
    if pourcent {
        out.push('(');
        *i += 1;
    }
    out.push('(');
    out.push_str(&v.to_string());
    out.push(')');
    if pourcent {
        out.push_str("/100)");
    }
}

/// Tokenize une chaîne normalisée.
/// Supporte:
/// - nombres décimaux (12, 1.5, 5., .5) ; un seul point par nombre
/// - opérateurs + - * / **
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (noms de fonctions)
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
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::StarStar);
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
            _ => {}
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word));
            continue;
        }

        // Nombre : chiffres, puis au plus un point suivi de chiffres.
        // "1.2.3" donne deux nombres collés, refusés plus loin (opérateur manquant).
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let txt: String = chars[start..i].iter().collect();
            let v: f64 = txt
                .parse()
                .map_err(|_| format!("nombre invalide: '{txt}'"))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Format utilitaire (traces) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => v.to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::StarStar => "**".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
