//! Formula tokenization.
//!
//! Splits formula text on the operator characters `+ - * / ( )`. Each
//! operator becomes its own token; everything between two operators
//! (numbers, references, stray text, whitespace) is kept as one run.

/// Characters that always form a token of their own.
pub const OPERATORS: [char; 6] = ['+', '-', '*', '/', '(', ')'];

pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Split `text` into operator tokens and maximal runs of other characters.
/// Never yields empty tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut run_start = 0;

    for (i, c) in text.char_indices() {
        if is_operator(c) {
            if run_start < i {
                tokens.push(&text[run_start..i]);
            }
            tokens.push(&text[i..i + c.len_utf8()]);
            run_start = i + c.len_utf8();
        }
    }
    if run_start < text.len() {
        tokens.push(&text[run_start..]);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_adjacent_operators() {
        assert_eq!(
            tokenize("A4-(A2+A3)"),
            vec!["A4", "-", "(", "A2", "+", "A3", ")"]
        );
    }

    #[test]
    fn test_tokenize_numbers_and_unary_minus() {
        assert_eq!(tokenize("-12.5*-3"), vec!["-", "12.5", "*", "-", "3"]);
    }

    #[test]
    fn test_tokenize_keeps_whitespace_in_runs() {
        assert_eq!(tokenize("A1 + 2"), vec!["A1 ", "+", " 2"]);
    }

    #[test]
    fn test_tokenize_edge_cases() {
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("42"), vec!["42"]);
        assert_eq!(tokenize("()"), vec!["(", ")"]);
        assert_eq!(tokenize("é+1"), vec!["é", "+", "1"]);
    }
}
