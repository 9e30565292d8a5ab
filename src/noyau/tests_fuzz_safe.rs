//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * Ok(v) => v fini
//!   * expression bien formée => jamais ExpressionInvalide
//!   * est_valide(s) == false => ExpressionInvalide
//!   * même entrée => même sortie

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::evaluer;
use super::validation::est_valide;

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
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(9) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(100), rng.pick(10)),
        3 => "π".to_string(),
        4 => "e".to_string(),
        5 => format!("{}%", rng.pick(200)),
        6 => format!("(−{})", rng.pick(10)),
        7 => "sqrt(2)".to_string(),
        _ => format!("{}", rng.pick(1000)),
    }
}

/// Expression bien formée par construction (affichage : × ÷ −).
fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(12) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}−{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}×{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}÷{})", gen_expr(rng, depth - 1)),
        5 => format!("({a}**{})", gen_atom(rng)),
        6 => format!("sin({a})"),
        7 => format!("cos({a})"),
        8 => format!("tan({a})"),
        9 => format!("log({a})"),
        10 => format!("ln({a})"),
        _ => format!("sqrt({a})"),
    }
}

/// Suite quelconque de symboles de clavier (souvent mal formée).
fn gen_bruit(rng: &mut Rng) -> String {
    const SYMBOLES: [&str; 22] = [
        "0", "1", "7", ".", "+", "-", "*", "/", "(", ")", "%", "π", "e", "×", "÷", "−", "**",
        "sin(", "ln(", "sqrt(", "log(", " ",
    ];
    let n = 1 + rng.pick(12);
    (0..n)
        .map(|_| SYMBOLES[rng.pick(SYMBOLES.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bien_formees_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        assert!(est_valide(&expr), "générateur: {expr:?} devrait être valide");

        let r1 = evaluer(&expr);
        let r2 = evaluer(&expr);
        assert_eq!(r1, r2, "non déterministe: {expr:?}");

        match r1 {
            Ok(v) => {
                assert!(v.is_finite(), "Ok non fini: expr={expr:?} v={v}");
                seen_ok += 1;
            }
            Err(ErreurCalcul::ResultatInvalide) => seen_err += 1,
            Err(e) => panic!("erreur non attendue: expr={expr:?} err={e}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_clavier() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_invalide = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_bruit(&mut rng);
        let r = evaluer(&expr);

        if !est_valide(&expr) {
            assert!(
                matches!(r, Err(ErreurCalcul::ExpressionInvalide(_))),
                "rejet structurel attendu: expr={expr:?} r={r:?}"
            );
            seen_invalide += 1;
        }
        if let Ok(v) = r {
            assert!(v.is_finite(), "Ok non fini: expr={expr:?} v={v}");
        }
    }

    assert!(seen_invalide > 0, "le bruit devrait produire des rejets");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = evaluer(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}
