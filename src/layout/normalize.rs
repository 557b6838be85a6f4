// Mon Aug 24 2026 - Alex

/// Normalizes a native field spelling into the naming convention the
/// downstream bindings use: title-case every segment, then drop the
/// underscores. A letter is uppercased when it follows a non-letter
/// (digits break segments too), everything else is lowercased, so
/// `buf_addr` becomes `BufAddr` and `cacheline1` becomes `Cacheline1`.
pub fn normalize_field_name(spelling: &str) -> String {
    let mut out = String::with_capacity(spelling.len());
    let mut prev_was_letter = false;

    for c in spelling.chars() {
        if c.is_alphabetic() {
            if prev_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_was_letter = true;
        } else {
            if c != '_' {
                out.push(c);
            }
            prev_was_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore_segments() {
        assert_eq!(normalize_field_name("buf_addr"), "BufAddr");
        assert_eq!(normalize_field_name("tx_offload"), "TxOffload");
        assert_eq!(normalize_field_name("nb_segs"), "NbSegs");
    }

    #[test]
    fn test_sentinel_spelling() {
        assert_eq!(normalize_field_name("cacheline1"), "Cacheline1");
        assert_eq!(normalize_field_name("cacheline0"), "Cacheline0");
    }

    #[test]
    fn test_digits_break_segments() {
        assert_eq!(normalize_field_name("seqn32_a"), "Seqn32A");
    }

    #[test]
    fn test_mixed_case_is_flattened() {
        assert_eq!(normalize_field_name("bufADDR"), "Bufaddr");
        assert_eq!(normalize_field_name("_pad"), "Pad");
    }

    #[test]
    fn test_single_word() {
        assert_eq!(normalize_field_name("next"), "Next");
        assert_eq!(normalize_field_name(""), "");
    }
}
