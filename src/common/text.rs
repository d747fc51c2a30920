/// Canonical form for labels and header names: trimmed, upper-cased,
/// internal whitespace collapsed to single spaces.
pub(crate) fn canonical(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Join-key form for geographic names: canonical + Latin diacritics folded
/// to ASCII, so boundary features match aggregate entities regardless of
/// accent or case conventions in either source.
pub(crate) fn fold_name(raw: &str) -> String {
    canonical(raw).chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        'Ý' => 'Y',
        other => other,
    }
}
