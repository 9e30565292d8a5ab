// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur (ou AST pour les traces)
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Calculer la RPN sur une pile de f64 (itératif : aucune récursion,
//   même pour "1+1+…+1" sur des dizaines de milliers de termes)
// - Reconstruire Expr seulement pour l’affichage (profondeur non bornée => petites entrées)
//
// Règles:
// - Ident(name): doit être une fonction connue (sin, cos, tan, sqrt, log10, ln)
//   immédiatement suivie de '(' ; pas de variables.
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur => Tok::Neg (préfixe)
//    - précédence : Neg > ** > * / > + -
// - ** associatif à droite : 2**3**2 = 2**(3**2)
// - Deux valeurs collées ("2(3)", "2π") => erreur (pas de multiplication implicite)
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::expr::{Expr, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::StarStar => 3,
        Tok::Neg => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::StarStar | Tok::Neg)
}

fn symbole(t: &Tok) -> &'static str {
    match t {
        Tok::Plus => "+",
        Tok::Minus => "-",
        Tok::Star => "*",
        Tok::Slash => "/",
        Tok::StarStar => "**",
        _ => "?",
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sqrt"), LPar, Num(16), RPar, Plus, Num(1)]
///   rpn:    [Num(16), Ident("sqrt"), Num(1), Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les valeurs collées.
    let mut prev_was_value = false;

    for (i, tok) in tokens.iter().cloned().enumerate() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err("opérateur manquant entre deux valeurs".into());
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if Fonction::depuis_nom(&name).is_none() {
                    return Err(format!("identifiant inconnu: '{name}'"));
                }
                if !matches!(tokens.get(i + 1), Some(Tok::LPar)) {
                    return Err(format!("fonction sans parenthèse: '{name}'"));
                }
                if prev_was_value {
                    return Err("opérateur manquant avant une fonction".into());
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(Tok::Ident(name));
                prev_was_value = false;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err("opérateur manquant avant '('".into());
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err("parenthèse fermante sans ouvrante".into());
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Ident(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            // moins unaire : préfixe, ne dépile rien
            Tok::Minus if !prev_was_value => {
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::StarStar => {
                if !prev_was_value {
                    return Err(format!("opérande manquant avant '{}'", symbole(&tok)));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Ident(_)) {
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

            Tok::Neg => return Err("jeton inattendu: neg".into()),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Calcule une RPN sur une pile de valeurs.
/// Mêmes erreurs structurelles que from_rpn ; NaN / infini remontent tels quels.
pub fn valeur_rpn(rpn: &[Tok]) -> Result<f64, String> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),

            Tok::Neg => {
                let x = st.pop().ok_or("moins unaire sans opérande")?;
                st.push(-x);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::StarStar => {
                let b = st.pop().ok_or("expression invalide")?;
                let a = st.pop().ok_or("expression invalide")?;

                st.push(match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => a / b,
                    _ => a.powf(b),
                });
            }

            Tok::Ident(name) => {
                let f = Fonction::depuis_nom(name)
                    .ok_or_else(|| format!("fonction inconnue: '{name}'"))?;
                let x = st.pop().ok_or("fonction sans argument")?;
                st.push(f.appliquer(x));
            }

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err("expression invalide".into()),
    }
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Num(v)),

            Tok::Neg => {
                let x = st.pop().ok_or("moins unaire sans opérande")?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::StarStar => {
                let b = Box::new(st.pop().ok_or("expression invalide")?);
                let a = Box::new(st.pop().ok_or("expression invalide")?);

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };

                st.push(e);
            }

            Tok::Ident(name) => {
                let f = Fonction::depuis_nom(&name)
                    .ok_or_else(|| format!("fonction inconnue: '{name}'"))?;
                let x = st.pop().ok_or("fonction sans argument")?;
                st.push(Expr::Appel(f, Box::new(x)));
            }

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err("expression invalide".into()),
    }
}
