// src/noyau/expr.rs
//
// AST numérique (f64).
// - Num  : littéral (constantes π / e déjà remplacées par leur valeur)
// - Neg  : moins unaire
// - Appel: fonction unaire nommée (trig en radians)
//
// eval() ne vérifie rien : une valeur NaN / infinie remonte telle quelle,
// c’est eval.rs qui la refuse.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log10,
    Ln,
}

impl Fonction {
    /// Nom (forme normalisée) -> fonction, si reconnue.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "sqrt" => Some(Self::Sqrt),
            "log10" => Some(Self::Log10),
            "ln" => Some(Self::Ln),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
            Self::Log10 => "log10",
            Self::Ln => "ln",
        }
    }

    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Sqrt => x.sqrt(),
            Self::Log10 => x.log10(),
            Self::Ln => x.ln(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>), // a ** b

    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn eval(&self) -> f64 {
        use Expr::*;

        match self {
            Num(v) => *v,
            Neg(x) => -x.eval(),

            Add(a, b) => a.eval() + b.eval(),
            Sub(a, b) => a.eval() - b.eval(),
            Mul(a, b) => a.eval() * b.eval(),
            Div(a, b) => a.eval() / b.eval(),
            Pow(a, b) => a.eval().powf(b.eval()),

            Appel(f, x) => f.appliquer(x.eval()),
        }
    }
}

/// Affichage entièrement parenthésé (traces : montre la précédence retenue).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Num(v) => write!(f, "{v}"),
            Neg(x) => write!(f, "(-{x})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}**{b})"),
            Appel(fun, x) => write!(f, "{}({x})", fun.nom()),
        }
    }
}
