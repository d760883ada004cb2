// src/common/cnpj.rs

// Utilidades de CNPJ: a coluna guarda só os 14 dígitos,
// a máscara 12.345.678/0001-95 é aplicada na saída da API.

/// Remove tudo que não for dígito.
pub fn strip_cnpj(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Aplica a máscara progressivamente. Entradas parciais nunca dão panic:
/// "1234" -> "12.34", "12345678000195" -> "12.345.678/0001-95".
pub fn format_cnpj(input: &str) -> String {
    let digits = strip_cnpj(input);
    let digits: &str = if digits.len() > 14 { &digits[..14] } else { &digits };

    let mut out = String::with_capacity(18);
    for (i, c) in digits.chars().enumerate() {
        match i {
            2 | 5 => out.push('.'),
            8 => out.push('/'),
            12 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Um CNPJ completo tem exatamente 14 dígitos.
pub fn is_complete_cnpj(input: &str) -> bool {
    strip_cnpj(input).len() == 14
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mascara_cnpj_completo() {
        assert_eq!(format_cnpj("12345678000195"), "12.345.678/0001-95");
    }

    #[test]
    fn mascara_cnpj_parcial_nao_quebra() {
        assert_eq!(format_cnpj(""), "");
        assert_eq!(format_cnpj("1"), "1");
        assert_eq!(format_cnpj("12"), "12");
        assert_eq!(format_cnpj("1234"), "12.34");
        assert_eq!(format_cnpj("12345678"), "12.345.678");
        assert_eq!(format_cnpj("123456780001"), "12.345.678/0001");
    }

    #[test]
    fn mascara_ignora_pontuacao_existente() {
        assert_eq!(format_cnpj("12.345.678/0001-95"), "12.345.678/0001-95");
        assert_eq!(strip_cnpj("12.345.678/0001-95"), "12345678000195");
    }

    #[test]
    fn mascara_trunca_excesso_de_digitos() {
        assert_eq!(format_cnpj("123456780001959999"), "12.345.678/0001-95");
    }

    #[test]
    fn cnpj_completo_detectado() {
        assert!(is_complete_cnpj("12345678000195"));
        assert!(!is_complete_cnpj("1234"));
    }
}
