/// Greedy word wrap for the boxed error printer.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Cuts `s` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    match max_len {
        0 => String::new(),
        _ if s.chars().count() <= max_len => s.to_string(),
        1 => "…".to_string(),
        _ => {
            let mut out: String = s.chars().take(max_len - 1).collect();
            out.push('…');
            out
        }
    }
}

/// `1 request`, `3 requests`.
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_short_messages_whole() {
        assert_eq!(wrap("invalid sugar code", 30), vec!["invalid sugar code"]);
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(
            wrap("'ADM' cannot form a furanose", 12),
            vec!["'ADM' cannot", "form a", "furanose"]
        );
    }

    #[test]
    fn wrap_empty_yields_one_blank_line() {
        assert_eq!(wrap("   ", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_leaves_fitting_text() {
        assert_eq!(truncate("ARLRDM", 6), "ARLRDM");
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("alpha-D-Glucopyranose", 10), "alpha-D-G…");
        assert_eq!(truncate("ARLRDM", 1), "…");
        assert_eq!(truncate("ARLRDM", 0), "");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("α-D-Glc", 4), "α-D…");
    }

    #[test]
    fn count_pluralizes() {
        assert_eq!(count(1, "request"), "1 request");
        assert_eq!(count(0, "overlap"), "0 overlaps");
    }
}
