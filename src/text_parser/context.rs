use super::patterns::BULLET_REGEX;

const MAX_TITLE_CHARS: usize = 120;
const MAX_DESCRIPTION_CHARS: usize = 200;

const TITLE_SEPARATORS: &[char] = &[
    ':', '-', '\u{2013}', '\u{2014}', '|', '(', '[', '>', ',', '\u{2022}', '\u{00B7}', '"', '\'',
];
const DESCRIPTION_SEPARATORS: &[char] = &[':', '-', '\u{2013}', '\u{2014}', '|', ')', ']', ',', '"', '\''];

/// Phrases that introduce a link rather than name it
const LEAD_IN_PHRASES: &[&str] = &[
    "check this out",
    "check out",
    "take a look at",
    "have a look at",
    "look at",
    "listen to",
];

/// Single words that only count as a lead-in when a separator or nothing follows,
/// so "Source: The Guardian" loses its label but "Here Comes the Sun" stays whole
const LEAD_IN_WORDS: &[&str] = &["reading", "read", "watch", "see", "via", "link", "here", "source"];

const LEAD_IN_WORD_SEPARATORS: &[char] = &[':', '-', '\u{2013}', '\u{2014}', '|'];

/// Guesses a title from the context before a link.
///
/// Uses the text on the link's own line, or failing that the line directly
/// above it. A blank line in between stops the search.
pub fn infer_title(before: &str) -> Option<String> {
    let mut lines = before.rsplit('\n').map(|line| line.trim_end_matches('\r'));
    let same_line = lines.next()?;
    if let Some(title) = clean_title(same_line) {
        return Some(title);
    }
    clean_title(lines.next()?)
}

/// Guesses a description from the context after a link.
///
/// Uses the rest of the link's own line, or failing that the next line. When
/// another link follows, a next line that runs straight into it is left alone
/// since it is more likely that link's title.
pub fn infer_description(after: &str, followed_by_link: bool) -> Option<String> {
    let lines: Vec<&str> = after.split('\n').map(|line| line.trim_end_matches('\r')).collect();
    if let Some(description) = lines.first().and_then(|line| clean_description(line)) {
        return Some(description);
    }

    let next = lines.get(1)?;
    let rest_blank = lines[2..].iter().all(|line| line.trim().is_empty());
    if followed_by_link && lines.len() <= 3 && rest_blank {
        return None;
    }
    clean_description(next)
}

fn clean_title(line: &str) -> Option<String> {
    let line = line.trim();
    let line = BULLET_REGEX.find(line).map_or(line, |m| &line[m.end()..]);
    let line = strip_brackets(trim_separators_end(line));
    let line = strip_lead_in(line);

    let line = if line.chars().count() > MAX_TITLE_CHARS {
        tail_chars(last_sentence(line), MAX_TITLE_CHARS)
    } else {
        line
    };

    let line = line.trim();
    if line.chars().count() < 2 || !line.chars().any(char::is_alphanumeric) {
        return None;
    }
    Some(line.to_string())
}

fn clean_description(line: &str) -> Option<String> {
    let line = line
        .trim_start_matches(|c: char| c.is_whitespace() || DESCRIPTION_SEPARATORS.contains(&c))
        .trim_end();
    // "(a quiet book)" reads as an aside about the link
    let line = line
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .map_or(line, str::trim);
    if !line.chars().any(char::is_alphanumeric) {
        return None;
    }
    Some(head_chars(line, MAX_DESCRIPTION_CHARS).trim_end().to_string())
}

fn trim_separators_end(s: &str) -> &str {
    s.trim_end_matches(|c: char| c.is_whitespace() || TITLE_SEPARATORS.contains(&c))
}

fn strip_lead_in(s: &str) -> &str {
    for lead in LEAD_IN_PHRASES {
        if let Some(rest) = strip_prefix_ignore_case(s, lead) {
            if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == ':') {
                return trim_separators_start(rest);
            }
        }
    }
    for word in LEAD_IN_WORDS {
        if let Some(rest) = strip_prefix_ignore_case(s, word) {
            let after = rest.trim_start();
            // "Source: x" and "via - x", but not "Here-after"
            let labelled = rest.starts_with([':', '|'])
                || (rest.len() > after.len() && after.starts_with(LEAD_IN_WORD_SEPARATORS));
            if after.is_empty() || labelled {
                return trim_separators_start(after);
            }
        }
    }
    s
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn trim_separators_start(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_whitespace() || TITLE_SEPARATORS.contains(&c))
}

/// Inner text of a markdown link label like "[Dune]"
fn strip_brackets(s: &str) -> &str {
    s.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .map_or(s, str::trim)
}

/// Text after the last sentence boundary, or the whole string
fn last_sentence(s: &str) -> &str {
    [". ", "! ", "? "]
        .iter()
        .filter_map(|boundary| s.rfind(boundary).map(|idx| idx + boundary.len()))
        .max()
        .map_or(s, |idx| &s[idx..])
}

fn head_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn tail_chars(s: &str, max: usize) -> &str {
    match max.checked_sub(1).and_then(|n| s.char_indices().rev().nth(n)) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_same_line() {
        assert_eq!(infer_title("Dune by Frank Herbert: "), Some("Dune by Frank Herbert".to_string()));
        assert_eq!(infer_title("3. Project Hail Mary - "), Some("Project Hail Mary".to_string()));
    }

    #[test]
    fn test_title_from_previous_line() {
        assert_eq!(infer_title("intro\n\nThe Hobbit\n"), Some("The Hobbit".to_string()));
        assert_eq!(infer_title("The Hobbit\n\n"), None);
    }

    #[test]
    fn test_lead_in_only_is_not_a_title() {
        assert_eq!(infer_title("Check out "), None);
        assert_eq!(infer_title("Listen to Hardcore History: "), Some("Hardcore History".to_string()));
        assert_eq!(infer_title("Seeing Red "), Some("Seeing Red".to_string()));
    }

    #[test]
    fn test_single_word_lead_in_needs_a_separator() {
        assert_eq!(infer_title("Here Comes the Sun "), Some("Here Comes the Sun".to_string()));
        assert_eq!(infer_title("See You Yesterday: "), Some("See You Yesterday".to_string()));
        assert_eq!(
            infer_title("Reading Lolita in Tehran "),
            Some("Reading Lolita in Tehran".to_string())
        );
        assert_eq!(infer_title("Source: The Guardian "), Some("The Guardian".to_string()));
        assert_eq!(infer_title("via - Longreads "), Some("Longreads".to_string()));
        assert_eq!(infer_title("Here: "), None);
    }

    #[test]
    fn test_markdown_label_is_the_title() {
        assert_eq!(infer_title("[Dune]("), Some("Dune".to_string()));
        assert_eq!(infer_title("- [ The Hobbit ]("), Some("The Hobbit".to_string()));
    }

    #[test]
    fn test_long_title_uses_last_sentence() {
        let before = format!("{}. The Left Hand of Darkness ", "word ".repeat(40));
        assert_eq!(infer_title(&before), Some("The Left Hand of Darkness".to_string()));
    }

    #[test]
    fn test_description_same_line() {
        assert_eq!(infer_description(" \u{2014} great read!", false), Some("great read!".to_string()));
        assert_eq!(infer_description("\nA classic.\n", false), Some("A classic.".to_string()));
        assert_eq!(infer_description(" (a quiet book)", false), Some("a quiet book".to_string()));
    }

    #[test]
    fn test_description_skips_next_links_title() {
        assert_eq!(infer_description("\nThe Hobbit - ", true), None);
        assert_eq!(infer_description("\nThe Hobbit\n", true), None);
        assert_eq!(
            infer_description("\nA classic\n\nThe Hobbit\n", true),
            Some("A classic".to_string())
        );
    }

    #[test]
    fn test_description_is_bounded() {
        let after = format!(" {}", "x".repeat(500));
        let description = infer_description(&after, false).unwrap();
        assert_eq!(description.chars().count(), MAX_DESCRIPTION_CHARS);
    }
}
