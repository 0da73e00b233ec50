use chrono::NaiveDate;

use crate::records::CalendarEvent;

/// Events dated today or later, soonest first, at most `limit` of them.
pub fn upcoming_events(
    events: &[CalendarEvent],
    today: NaiveDate,
    limit: usize,
) -> Vec<&CalendarEvent> {
    let mut upcoming: Vec<&CalendarEvent> =
        events.iter().filter(|e| e.event_date >= today).collect();
    upcoming.sort_by_key(|e| (e.event_date, e.start_time));
    upcoming.truncate(limit);
    upcoming
}

/// Events on a single date, ordered by start time.
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    let mut on_date: Vec<&CalendarEvent> =
        events.iter().filter(|e| e.event_date == date).collect();
    on_date.sort_by_key(|e| e.start_time);
    on_date
}

/// Inserts an event keeping the list ordered by date.
pub fn insert_sorted(events: &mut Vec<CalendarEvent>, event: CalendarEvent) {
    let index = events.partition_point(|e| e.event_date <= event.event_date);
    events.insert(index, event);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event(title: &str, date: NaiveDate) -> CalendarEvent {
        serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "title": title,
            "event_date": date,
        }))
        .unwrap()
    }

    #[test]
    fn test_upcoming_events_sorted_and_limited() {
        let today = make_date(2025, 5, 10);
        let events = vec![
            event("Past", make_date(2025, 5, 9)),
            event("Later", make_date(2025, 6, 1)),
            event("Today", today),
            event("Soon", make_date(2025, 5, 12)),
        ];

        let upcoming = upcoming_events(&events, today, 2);
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Today", "Soon"]);

        assert_eq!(upcoming_events(&events, today, 10).len(), 3);
    }

    #[test]
    fn test_events_on() {
        let date = make_date(2025, 5, 10);
        let events = vec![event("A", date), event("B", make_date(2025, 5, 11))];
        assert_eq!(events_on(&events, date).len(), 1);
    }

    #[test]
    fn test_insert_sorted() {
        let mut events = vec![
            event("First", make_date(2025, 1, 1)),
            event("Third", make_date(2025, 3, 1)),
        ];
        insert_sorted(&mut events, event("Second", make_date(2025, 2, 1)));
        insert_sorted(&mut events, event("Fourth", make_date(2025, 4, 1)));

        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third", "Fourth"]);
    }
}
