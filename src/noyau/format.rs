// src/noyau/format.rs

/// Texte d’un résultat, tel qu’il est réinjecté dans l’expression.
///
/// - décimal le plus court qui relit la même valeur (0.1+0.2 => 0.30000000000000004)
/// - jamais de notation scientifique (le tokenizer ne la lit pas)
/// - -0 s’affiche 0
pub fn format_nombre(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{x}")
}

#[cfg(test)]
mod tests {
    use super::format_nombre;

    #[test]
    fn entiers_sans_decimales() {
        assert_eq!(format_nombre(14.0), "14");
        assert_eq!(format_nombre(-3.0), "-3");
    }

    #[test]
    fn zero_negatif() {
        assert_eq!(format_nombre(-0.0), "0");
    }

    #[test]
    fn decimaux() {
        assert_eq!(format_nombre(0.5), "0.5");
        assert_eq!(format_nombre(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_nombre(1e21), "1000000000000000000000");
    }
}
