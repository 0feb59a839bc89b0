use chrono::{NaiveDate, NaiveDateTime};
use tod_report::{BLANK_TIME, DateStyle, parse_due};

fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

#[test]
fn date_with_24_hour_time() {
    let due = parse_due("01/08/26 14:30").unwrap();
    assert!(due.has_time);
    assert_eq!(due.instant, dt(2026, 1, 8, 14, 30));
    assert_eq!(due.display_time(), "02:30 PM");
    assert_eq!(due.day_of_week(), "Thu");
}

#[test]
fn date_with_meridiem_time_in_any_case() {
    let due = parse_due("01/09/26 2:05 pm").unwrap();
    assert_eq!(due.instant, dt(2026, 1, 9, 14, 5));
    assert_eq!(due.display_time(), "02:05 PM");

    let due = parse_due("01/09/26 12:15AM").unwrap();
    assert_eq!(due.instant, dt(2026, 1, 9, 0, 15));
    assert_eq!(due.display_time(), "12:15 AM");
}

#[test]
fn text_between_date_and_time_is_skipped() {
    let due = parse_due("01/09/26 at 09:00").unwrap();
    assert_eq!(due.instant, dt(2026, 1, 9, 9, 0));
}

#[test]
fn date_only_is_local_midnight_with_blank_time() {
    let due = parse_due("  01/05/26 ").unwrap();
    assert!(!due.has_time);
    assert_eq!(due.instant, dt(2026, 1, 5, 0, 0));
    assert_eq!(due.display_time(), BLANK_TIME);
    assert_eq!(due.display_time().len(), "hh:mm AM".len());
    assert_eq!(due.day_of_week(), "Mon");
}

#[test]
fn year_is_expanded_into_the_2000s() {
    let due = parse_due("12/31/99").unwrap();
    assert_eq!(due.instant, dt(2099, 12, 31, 0, 0));
}

#[test]
fn unrecognised_text_yields_none() {
    for text in [
        "not a date",
        "",
        "2026-01-08",
        "01/08/2026",
        "Jan 8",
        "tomorrow at 5pm",
    ] {
        assert!(parse_due(text).is_none(), "expected '{text}' to be unparseable");
    }
}

#[test]
fn impossible_calendar_values_yield_none() {
    assert!(parse_due("02/30/26").is_none());
    assert!(parse_due("13/01/26").is_none());
    assert!(parse_due("01/08/26 25:00").is_none());
    assert!(parse_due("01/08/26 13:00 PM").is_none());
    assert!(parse_due("01/08/26 10:61").is_none());
}

#[test]
fn display_date_follows_style() {
    let due = parse_due("01/08/26").unwrap();
    assert_eq!(due.display_date(DateStyle::MonthFirst), "01/08/26");
    assert_eq!(due.display_date(DateStyle::DayFirst), "08/01/26");
}

#[test]
fn single_digit_month_and_day_are_zero_padded_on_display() {
    let due = parse_due("1/8/26 9:05").unwrap();
    assert_eq!(due.display_date(DateStyle::MonthFirst), "01/08/26");
    assert_eq!(due.display_time(), "09:05 AM");
}
