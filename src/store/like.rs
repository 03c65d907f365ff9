/// SQLite `LIKE` semantics without an `ESCAPE` clause.
///
/// `%` matches any run of characters (including none), `_` matches exactly one
/// character, and everything else compares ASCII case-insensitively. Non-ASCII
/// letters compare exactly, as SQLite's built-in collation does.
pub fn like_matches(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0, 0);
    // Last `%` seen in the pattern and the text position it is currently absorbing up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && p[pi] == '%' {
            backtrack = Some((pi, ti));
            pi += 1;
        } else if pi < p.len() && (p[pi] == '_' || p[pi].eq_ignore_ascii_case(&t[ti])) {
            pi += 1;
            ti += 1;
        } else if let Some((star, absorbed)) = backtrack {
            pi = star + 1;
            ti = absorbed + 1;
            backtrack = Some((star, absorbed + 1));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|c| *c == '%')
}
