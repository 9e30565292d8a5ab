// src/noyau/validation.rs
//
// Validation structurelle, AVANT toute évaluation (sur la chaîne d’affichage).
//
// Règles (dans l’ordre, toutes obligatoires) :
// 1. non vide (après trim)
// 2. parenthèses équilibrées (le solde ne passe jamais sous 0, finit à 0)
// 3. pas de ".."
// 4. pas deux opérateurs + - * / consécutifs ("**" compte pour UN opérateur) ;
//    seul un "−" d’affichage peut suivre un opérateur : c’est un signe ("5×−3")
// 5. pas de groupe vide "()"
// 6. pas d’opérateur ni de point en fin
// 7. pas d’opérateur en tête (pas de moins unaire en tête)
// 8. pas de + * / juste après "(" ("(-" autorisé)
//
// Les espaces sont ignorés pour l’adjacence. × ÷ − comptent comme * / -.
// Ne garantit PAS l’évaluabilité (division par zéro, fonction inconnue…).

/// Classe d’un caractère : l’opérateur ASCII qu’il représente, s’il en est un.
fn classe_op(c: char) -> Option<char> {
    match c {
        '+' => Some('+'),
        '-' | '−' => Some('-'),
        '*' | '×' => Some('*'),
        '/' | '÷' => Some('/'),
        _ => None,
    }
}

fn est_op(c: char) -> bool {
    classe_op(c).is_some()
}

/// Vrai si l’expression passe toutes les règles.
pub fn est_valide(expr: &str) -> bool {
    verifier(expr).is_ok()
}

/// Comme est_valide, mais nomme la première règle violée.
pub fn verifier(expr: &str) -> Result<(), &'static str> {
    if expr.trim().is_empty() {
        return Err("expression vide");
    }

    let chars: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();

    let mut solde: i64 = 0;
    for &c in &chars {
        match c {
            '(' => solde += 1,
            ')' => {
                solde -= 1;
                if solde < 0 {
                    return Err("parenthèse fermante sans ouvrante");
                }
            }
            _ => {}
        }
    }
    if solde != 0 {
        return Err("parenthèses non fermées");
    }

    if chars.windows(2).any(|w| w[0] == '.' && w[1] == '.') {
        return Err("double point");
    }

    if a_operateurs_consecutifs(&chars) {
        return Err("opérateurs consécutifs");
    }

    if chars.windows(2).any(|w| w[0] == '(' && w[1] == ')') {
        return Err("groupe vide");
    }

    // non vide : garanti par la règle 1
    let (Some(&premier), Some(&dernier)) = (chars.first(), chars.last()) else {
        return Err("expression vide");
    };

    if est_op(dernier) || dernier == '.' {
        return Err("opérateur ou point en fin");
    }

    if est_op(premier) {
        return Err("opérateur en tête");
    }

    if chars
        .windows(2)
        .any(|w| w[0] == '(' && matches!(classe_op(w[1]), Some('+' | '*' | '/')))
    {
        return Err("opérateur après parenthèse ouvrante");
    }

    Ok(())
}

/// Cherche une suite d’au moins deux opérateurs, "**" étant un seul jeton.
/// Exception : un "−" d’affichage juste après un opérateur est un signe.
fn a_operateurs_consecutifs(chars: &[char]) -> bool {
    let mut i: usize = 0;
    let mut prev_op = false;
    let mut prev_signe = false;

    while i < chars.len() {
        if classe_op(chars[i]).is_none() {
            prev_op = false;
            prev_signe = false;
            i += 1;
            continue;
        }

        if prev_op {
            if chars[i] != '−' || prev_signe {
                return true;
            }
            prev_signe = true;
            i += 1;
            continue;
        }

        let puissance = classe_op(chars[i]) == Some('*')
            && i + 1 < chars.len()
            && classe_op(chars[i + 1]) == Some('*');
        i += if puissance { 2 } else { 1 };
        prev_op = true;
    }

    false
}
