// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document number formatting.
//!
//! Templates are plain strings containing `{TOKEN}` placeholders. The
//! token set is part of the stored business profile and must stay stable:
//!
//! | Token    | Replacement                          |
//! |----------|--------------------------------------|
//! | `{YYYY}` | 4-digit year                         |
//! | `{YY}`   | last 2 digits of the year            |
//! | `{MM}`   | 2-digit month                        |
//! | `{DD}`   | 2-digit day                          |
//! | `{####}` | sequence, zero-padded to 4 digits    |
//! | `{###}`  | sequence, zero-padded to 3 digits    |
//!
//! Anything else, including unknown `{...}` groups and unbalanced braces,
//! is copied through verbatim.

use time::Date;

/// Tokens that embed the sequence value. A template needs at least one of
/// these for the numbers it produces to be unique.
pub const SEQUENCE_TOKENS: [&str; 2] = ["{####}", "{###}"];

/// Formats a document number from a template, a sequence value and a date.
///
/// Substitution is a single left-to-right pass, so replacement text is
/// never re-scanned for tokens.
#[must_use]
pub fn format_number(template: &str, sequence: u64, date: Date) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];

        let Some(close) = candidate.find('}') else {
            rest = candidate;
            break;
        };

        if let Some(expanded) = expand_token(&candidate[1..close], sequence, date) {
            out.push_str(&expanded);
            rest = &candidate[close + 1..];
        } else {
            // Not a token: keep the brace and rescan right after it, so a
            // token nested in stray braces is still found.
            out.push('{');
            rest = &candidate[1..];
        }
    }

    out.push_str(rest);
    out
}

fn expand_token(token: &str, sequence: u64, date: Date) -> Option<String> {
    let expanded = match token {
        "YYYY" => format!("{:04}", date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MM" => format!("{:02}", u8::from(date.month())),
        "DD" => format!("{:02}", date.day()),
        "####" => format!("{sequence:04}"),
        "###" => format!("{sequence:03}"),
        _ => return None,
    };
    Some(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_reference_invoice_format() {
        assert_eq!(
            format_number("GC-INV-{YY}{MM}{DD}-{####}", 7, date!(2026 - 01 - 02)),
            "GC-INV-260102-0007"
        );
    }

    #[test]
    fn test_all_tokens_in_any_order() {
        assert_eq!(
            format_number("{###}/{DD}.{MM}.{YYYY}", 42, date!(2025 - 11 - 09)),
            "042/09.11.2025"
        );
    }

    #[test]
    fn test_repeated_tokens_are_each_replaced() {
        assert_eq!(
            format_number("{YY}{YY}-{####}", 1, date!(2031 - 03 - 04)),
            "3131-0001"
        );
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        assert_eq!(
            format_number("{CLIENT}-{####}-{yyyy}", 5, date!(2026 - 01 - 02)),
            "{CLIENT}-0005-{yyyy}"
        );
    }

    #[test]
    fn test_unbalanced_brace_is_literal() {
        assert_eq!(
            format_number("INV-{####}-{YY", 12, date!(2026 - 01 - 02)),
            "INV-0012-{YY"
        );
        assert_eq!(format_number("}{####", 12, date!(2026 - 01 - 02)), "}{####");
    }

    #[test]
    fn test_tokens_inside_stray_braces_are_replaced() {
        let day = date!(2026 - 01 - 02);
        assert_eq!(format_number("{{####}", 7, day), "{0007");
        assert_eq!(format_number("INV{-{####}", 7, day), "INV{-0007");
        assert_eq!(format_number("INV{A-{####}", 8, day), "INV{A-0008");
        assert_eq!(format_number("{X{YY}}-{###}", 3, day), "{X26}-003");
    }

    #[test]
    fn test_sequence_wider_than_padding_is_not_truncated() {
        assert_eq!(
            format_number("{###}", 12_345, date!(2026 - 01 - 02)),
            "12345"
        );
    }

    #[test]
    fn test_template_without_tokens_is_unchanged() {
        assert_eq!(
            format_number("STATIC", 9, date!(2026 - 01 - 02)),
            "STATIC"
        );
    }

    #[test]
    fn test_year_before_2000_keeps_two_digit_suffix() {
        assert_eq!(format_number("{YY}", 1, date!(1999 - 12 - 31)), "99");
        assert_eq!(format_number("{YY}", 1, date!(2005 - 12 - 31)), "05");
    }
}
