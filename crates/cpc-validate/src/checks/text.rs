//! Text field checks: presence, patterns, lengths, word limits.

use crate::issue::Issue;
use crate::rules::FieldRule;

/// Keystroke pass: format problems only, so an empty required field does
/// not flash an error mid-typing. Fields that opt into keystroke presence
/// checks also report emptiness here.
pub fn check_keystroke(rule: &FieldRule, value: &str) -> Option<Issue> {
    if value.is_empty() {
        if rule.keystroke_required {
            return Some(Issue::RequiredMissing {
                field: rule.name.clone(),
                label: rule.label.clone(),
            });
        }
        return None;
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.regex.is_match(value) {
            return Some(Issue::PatternMismatch {
                field: rule.name.clone(),
                message: pattern.message.clone(),
            });
        }
    }

    if let Some(min_len) = rule.min_len {
        if value.chars().count() < min_len {
            return Some(Issue::TooShort {
                field: rule.name.clone(),
                label: rule.label.clone(),
                min_len,
            });
        }
    }

    if let Some(max_len) = rule.max_len {
        if value.chars().count() > max_len {
            return Some(too_long(rule, max_len));
        }
    }

    if let Some(issue) = check_word_limits(rule, value) {
        return Some(issue);
    }

    None
}

/// Submit pass: everything the keystroke pass checks, plus required
/// presence and exact digit counts.
pub fn check_submit(rule: &FieldRule, value: Option<&str>) -> Option<Issue> {
    let value = value.unwrap_or("");

    if value.trim().is_empty() {
        if rule.required {
            return Some(Issue::RequiredMissing {
                field: rule.name.clone(),
                label: rule.label.clone(),
            });
        }
        return None;
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.regex.is_match(value) {
            return Some(Issue::PatternMismatch {
                field: rule.name.clone(),
                message: pattern.message.clone(),
            });
        }
    }

    if let Some(exact_len) = rule.exact_len {
        if value.chars().count() != exact_len {
            let message = rule
                .exact_len_message
                .clone()
                .unwrap_or_else(|| format!("{} must be {} digits", rule.label, exact_len));
            return Some(Issue::WrongLength {
                field: rule.name.clone(),
                message,
            });
        }
    }

    if let Some(min_len) = rule.min_len {
        if value.chars().count() < min_len {
            return Some(Issue::TooShort {
                field: rule.name.clone(),
                label: rule.label.clone(),
                min_len,
            });
        }
    }

    if let Some(max_len) = rule.max_len {
        if value.chars().count() > max_len {
            return Some(too_long(rule, max_len));
        }
    }

    check_word_limits(rule, value)
}

fn too_long(rule: &FieldRule, max_len: usize) -> Issue {
    let message = rule
        .max_len_message
        .clone()
        .unwrap_or_else(|| format!("{} cannot exceed {} characters", rule.label, max_len));
    Issue::TooLong {
        field: rule.name.clone(),
        message,
    }
}

/// Word-count checks, applied either to the whole value or, for name-list
/// fields, to each comma-separated entry.
fn check_word_limits(rule: &FieldRule, value: &str) -> Option<Issue> {
    let Some(limit) = rule.word_limit else {
        return None;
    };

    if let Some(max_names) = rule.max_names {
        let names: Vec<&str> = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();

        if names.len() > max_names {
            return Some(Issue::TooManyNames {
                field: rule.name.clone(),
                max_names,
            });
        }

        for name in names {
            if let Some(issue) = check_words(rule, name, limit.max_words, limit.max_chars_per_word)
            {
                return Some(issue);
            }
        }
        return None;
    }

    check_words(rule, value, limit.max_words, limit.max_chars_per_word)
}

fn check_words(rule: &FieldRule, value: &str, max_words: usize, max_chars: usize) -> Option<Issue> {
    let words: Vec<&str> = value.split_whitespace().collect();

    if words.len() > max_words {
        return Some(Issue::TooManyWords {
            field: rule.name.clone(),
            max_words,
        });
    }

    for word in words {
        if word.chars().count() > max_chars {
            return Some(Issue::WordTooLong {
                field: rule.name.clone(),
                max_chars,
            });
        }
    }

    None
}
