// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Property tests for numbering and due-date arithmetic.

use super::helpers::create_test_invoice;
use crate::{InvoiceStatus, format_number};
use proptest::prelude::*;
use time::{Date, Duration, Month};

fn date_strategy() -> impl Strategy<Value = Date> {
    (1970i32..=2199, 1u8..=12, 1u8..=28).prop_map(|(year, month, day)| {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    })
}

proptest! {
    #[test]
    fn distinct_sequences_format_to_distinct_numbers(
        a in 0u64..1_000_000,
        b in 0u64..1_000_000,
        date in date_strategy(),
    ) {
        prop_assume!(a != b);
        let template = "INV-{YY}{MM}{DD}-{####}";
        prop_assert_ne!(format_number(template, a, date), format_number(template, b, date));
    }

    #[test]
    fn padded_sequence_is_never_truncated(seq in 0u64..u64::MAX, date in date_strategy()) {
        let number = format_number("{###}", seq, date);
        prop_assert!(number.len() >= 3);
        prop_assert_eq!(number.parse::<u64>().unwrap(), seq);
    }

    #[test]
    fn sequence_token_survives_surrounding_braces(
        prefix in "[A-Z{}-]{0,8}",
        suffix in "[A-Z{}-]{0,8}",
        a in 0u64..100_000,
        b in 0u64..100_000,
        date in date_strategy(),
    ) {
        prop_assume!(a != b);
        let template = format!("{prefix}{{####}}{suffix}");
        prop_assert_ne!(format_number(&template, a, date), format_number(&template, b, date));
    }

    #[test]
    fn text_without_braces_is_copied_verbatim(
        text in "[A-Za-z0-9 ./_-]{0,24}",
        date in date_strategy(),
    ) {
        prop_assert_eq!(format_number(&text, 7, date), text);
    }

    #[test]
    fn overdue_exactly_after_effective_due_date(offset in -60i64..60) {
        let invoice = create_test_invoice(InvoiceStatus::Sent);
        let today = invoice.effective_due_date() + Duration::days(offset);
        prop_assert_eq!(invoice.is_overdue(today), offset > 0);
    }
}
