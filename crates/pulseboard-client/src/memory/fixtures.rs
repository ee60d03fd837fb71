//! Seed data for the in-memory client.

use chrono::{DateTime, TimeZone, Utc};
use pulseboard_core::{Metric, User, UserId, UserRole};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// The three seed users.
#[must_use]
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: UserId::new("1"),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            role: UserRole::Admin,
            is_active: true,
            created_at: at(2024, 1, 15, 9, 0),
            last_login: Some(at(2024, 3, 20, 14, 30)),
            avatar: Some("https://i.pravatar.cc/150?u=john".to_string()),
        },
        User {
            id: UserId::new("2"),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            role: UserRole::User,
            is_active: true,
            created_at: at(2024, 2, 1, 11, 15),
            last_login: Some(at(2024, 3, 19, 8, 45)),
            avatar: None,
        },
        User {
            id: UserId::new("3"),
            name: "Bob Wilson".to_string(),
            email: "bob@example.com".to_string(),
            role: UserRole::Moderator,
            is_active: false,
            created_at: at(2024, 2, 10, 16, 20),
            last_login: None,
            avatar: None,
        },
    ]
}

/// The four seed metrics.
#[must_use]
pub fn seed_metrics() -> Vec<Metric> {
    let observed = at(2024, 3, 20, 12, 0);
    vec![
        Metric::new("1", "Total Users", 1234.0, "users", 12.5, observed),
        Metric::new("2", "Revenue", 45_678.9, "USD", 8.2, observed),
        Metric::new("3", "Active Sessions", 342.0, "sessions", -3.1, observed),
        Metric::new("4", "Conversion Rate", 3.24, "%", 0.0, observed),
    ]
}
