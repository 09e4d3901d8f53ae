//! Check-digit validators for Brazilian taxpayer identifiers
//!
//! Both formats end in two check digits computed modulo 11 over the digits
//! before them. Inputs must be bare digit strings; punctuation such as
//! `111.444.777-35` is rejected.

/// Weight table for CNPJ check digits.
const CNPJ_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Parses exactly `len` ASCII digits.
fn digits<const N: usize>(value: &str) -> Option<[u32; N]> {
    let bytes = value.as_bytes();
    if bytes.len() != N {
        return None;
    }
    let mut out = [0; N];
    for (slot, byte) in out.iter_mut().zip(bytes) {
        *slot = char::from(*byte).to_digit(10)?;
    }
    Some(out)
}

/// Validates an 11-digit CPF.
///
/// Strings of one repeated digit are rejected even though their check digits
/// work out.
///
/// # Examples
///
/// ```
/// use verity_support::is_cpf;
///
/// assert!(is_cpf("11144477735"));
/// assert!(!is_cpf("11144477736"));
/// assert!(!is_cpf("00000000000"));
/// ```
#[must_use]
pub fn is_cpf(value: &str) -> bool {
    let Some(d) = digits::<11>(value) else {
        return false;
    };
    if d.iter().all(|&x| x == d[0]) {
        return false;
    }
    cpf_check_digit(&d[..9]) == d[9] && cpf_check_digit(&d[..10]) == d[10]
}

/// Weights run from `len + 1` down to 2.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits.iter().rev().zip(2..).map(|(d, w)| d * w).sum();
    match 11 - sum % 11 {
        10 | 11 => 0,
        rev => rev,
    }
}

/// Validates a 14-digit CNPJ.
///
/// # Examples
///
/// ```
/// use verity_support::is_cnpj;
///
/// assert!(is_cnpj("11222333000181"));
/// assert!(!is_cnpj("11222333000182"));
/// assert!(!is_cnpj("00000000000000"));
/// ```
#[must_use]
pub fn is_cnpj(value: &str) -> bool {
    let Some(d) = digits::<14>(value) else {
        return false;
    };
    if d.iter().all(|&x| x == 0) {
        return false;
    }
    cnpj_check_digit(&d[..12], &CNPJ_WEIGHTS[1..]) == d[12]
        && cnpj_check_digit(&d[..13], &CNPJ_WEIGHTS) == d[13]
}

fn cnpj_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let remainder = digits
        .iter()
        .zip(weights)
        .map(|(d, w)| d * w)
        .sum::<u32>()
        % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}
