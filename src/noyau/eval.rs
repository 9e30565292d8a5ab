//! Noyau — évaluation (pipeline réel)
//!
//! validation (chaîne brute) -> normalisation -> jetons -> RPN -> f64 -> fini ?
//!
//! La valeur est calculée directement sur la RPN (pile de f64). L’arbre Expr
//! ne sert qu’aux traces, et seulement pour les petites expressions.
//!
//! Aucune exécution de code dynamique : tout passe par le shunting-yard.

use tracing::{debug, enabled, Level};

use super::erreur::ErreurCalcul;
use super::jetons::{format_tokens, normaliser, tokenize};
use super::rpn::{from_rpn, to_rpn, valeur_rpn};
use super::validation::verifier;

/// Au-delà, pas d’arbre Expr dans les traces (Display et Drop sont récursifs).
const TRACE_ARBRE_MAX: usize = 256;

/// API publique : évalue une expression d’affichage.
///
/// - ExpressionInvalide : validation structurelle, ou lecture impossible
///   (identifiant inconnu, valeurs collées, nombre mal formé…)
/// - ResultatInvalide   : valeur NaN ou infinie
pub fn evaluer(expr_str: &str) -> Result<f64, ErreurCalcul> {
    verifier(expr_str).map_err(|m| ErreurCalcul::ExpressionInvalide(m.to_string()))?;

    // 1) Normalisation + jetons
    let normal = normaliser(expr_str);
    let jetons = tokenize(&normal).map_err(ErreurCalcul::ExpressionInvalide)?;

    // 2) RPN
    let rpn = to_rpn(&jetons).map_err(ErreurCalcul::ExpressionInvalide)?;
    debug!(
        jetons = %format_tokens(&jetons),
        rpn = %format_tokens(&rpn),
        "évaluation"
    );

    // 3) valeur
    let v = valeur_rpn(&rpn).map_err(ErreurCalcul::ExpressionInvalide)?;

    if !v.is_finite() {
        if rpn.len() <= TRACE_ARBRE_MAX && enabled!(Level::DEBUG) {
            if let Ok(expr) = from_rpn(&rpn) {
                debug!(%expr, valeur = v, "résultat non fini");
            }
        }
        return Err(ErreurCalcul::ResultatInvalide);
    }

    Ok(v)
}

/// Valeur de l’expression courante, ou None si vide / invalide.
/// Utilisé là où un échec doit rester silencieux (opérations mémoire).
pub fn evaluer_courant(expr_str: &str) -> Option<f64> {
    if expr_str.is_empty() {
        return None;
    }
    match evaluer(expr_str) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(expression = expr_str, erreur = %e, "valeur courante indisponible");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{E, PI};

    fn ok(s: &str) -> f64 {
        evaluer(s).unwrap_or_else(|e| panic!("evaluer({s:?}) erreur: {e}"))
    }

    fn assert_proche(s: &str, attendu: f64) {
        let v = ok(s);
        if (v - attendu).abs() > 1e-9 {
            panic!("{s:?}: obtenu {v}, attendu {attendu}");
        }
    }

    fn assert_expression_invalide(s: &str) {
        match evaluer(s) {
            Err(ErreurCalcul::ExpressionInvalide(_)) => {}
            autre => panic!("{s:?}: attendu ExpressionInvalide, obtenu {autre:?}"),
        }
    }

    fn assert_resultat_invalide(s: &str) {
        assert_eq!(evaluer(s), Err(ErreurCalcul::ResultatInvalide), "expr={s:?}");
    }

    // --- Précédence ---

    #[test]
    fn precedence() {
        assert_eq!(ok("2+3*4"), 14.0);
        assert_eq!(ok("(2+3)*4"), 20.0);
        assert_eq!(ok("10-4-3"), 3.0);
        assert_eq!(ok("2*3**2"), 18.0);
        assert_eq!(ok("2**3**2"), 512.0);
    }

    #[test]
    fn moins_unaire_dans_un_groupe() {
        assert_eq!(ok("(-2**2)"), 4.0);
        assert_eq!(ok("3*(-2)"), -6.0);
        assert_eq!(ok("(−5)+8"), 3.0);
    }

    #[test]
    fn glyphes_affichage() {
        assert_eq!(ok("6÷3×2"), 4.0);
        assert_eq!(ok("7−2"), 5.0);
    }

    #[test]
    fn signe_apres_operateur_au_pave() {
        assert_eq!(ok("5×−3"), -15.0);
        assert_eq!(ok("8÷−2"), -4.0);
        assert_eq!(ok("5−−3"), 8.0);
        assert_eq!(ok("2**−1"), 0.5);
        assert_expression_invalide("5×+3");
        assert_expression_invalide("1+-2");
    }

    // --- Pourcentage ---

    #[test]
    fn pourcentage() {
        assert_eq!(ok("50%"), 0.5);
        assert_proche("200×10%", 20.0);
        assert_eq!(ok("12.5%"), 0.125);
        assert_proche("π%", PI / 100.0);
        assert_proche("e%×100", E);
    }

    // --- Fonctions + constantes ---

    #[test]
    fn fonctions() {
        assert_eq!(ok("sqrt(16)"), 4.0);
        assert_proche("log(100)", 2.0);
        assert_proche("ln(e)", 1.0);
        assert_proche("sin(π/2)", 1.0);
        assert_proche("cos(π)", -1.0);
        assert_proche("tan(0)", 0.0);
        assert_proche("sqrt(sqrt(16))+1", 3.0);
    }

    #[test]
    fn constantes() {
        assert_eq!(ok("π"), PI);
        assert_eq!(ok("e"), E);
        assert_proche("2×π", 2.0 * PI);
    }

    #[test]
    fn arithmetique_flottante() {
        assert_eq!(ok("0.1+0.2"), 0.1 + 0.2);
        assert_eq!(ok("5.+1"), 6.0);
        assert_eq!(ok(".5*4"), 2.0);
    }

    // --- Erreurs ---

    #[test]
    fn division_par_zero() {
        assert_resultat_invalide("1/0");
        assert_resultat_invalide("0/0");
    }

    #[test]
    fn hors_domaine() {
        assert_resultat_invalide("sqrt(-1)");
        assert_resultat_invalide("log(0)");
        assert_resultat_invalide("ln(-1)");
    }

    #[test]
    fn validation_avant_evaluation() {
        assert_expression_invalide("");
        assert_expression_invalide("(1+2");
        assert_expression_invalide("1+2)");
        assert_expression_invalide("-1");
        assert_expression_invalide("1++2");
        assert_expression_invalide("()");
    }

    #[test]
    fn lecture_impossible() {
        assert_expression_invalide("2π");
        assert_expression_invalide("2(3)");
        assert_expression_invalide("1.2.3");
        assert_expression_invalide("abc(1)");
        assert_expression_invalide("sin");
        assert_expression_invalide("5%3");
        assert_expression_invalide("2e");
    }

    #[test]
    fn longue_somme_a_plat() {
        let mut s = String::from("1");
        for _ in 1..50_000 {
            s.push_str("+1");
        }
        assert_eq!(ok(&s), 50_000.0);
    }

    #[test]
    fn longue_chaine_de_puissances_et_parentheses() {
        let profond = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
        assert_eq!(ok(&profond), 1.0);

        let mut s = String::from("1");
        for _ in 0..20_000 {
            s.push_str("**1");
        }
        assert_eq!(ok(&s), 1.0);
    }

    #[test]
    fn evaluer_courant_silencieux() {
        assert_eq!(evaluer_courant(""), None);
        assert_eq!(evaluer_courant("1/0"), None);
        assert_eq!(evaluer_courant("1+"), None);
        assert_eq!(evaluer_courant("1+1"), Some(2.0));
    }
}
