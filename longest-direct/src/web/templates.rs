//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Connection;
use crate::finder::{DEFAULT_DURATION_MINS, DEFAULT_LIMIT, DURATION_RANGE, LIMIT_RANGE};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub default_limit: usize,
    pub max_limit: usize,
    pub default_duration: u32,
    pub min_duration: u32,
    pub max_duration: u32,
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: *LIMIT_RANGE.end(),
            default_duration: DEFAULT_DURATION_MINS,
            min_duration: *DURATION_RANGE.start(),
            max_duration: *DURATION_RANGE.end(),
        }
    }
}

/// Search results page.
#[derive(Template)]
#[template(path = "connections.html")]
pub struct ConnectionListTemplate {
    pub origin: String,
    pub connections: Vec<ConnectionView>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Connection view model for templates.
#[derive(Debug, Clone)]
pub struct ConnectionView {
    pub line_name: String,
    pub product: &'static str,
    pub direction: String,
    pub to_name: String,
    pub to_id: String,
    pub departure: String,
    pub arrival: String,
    pub duration_minutes: i64,
    pub stops_after_origin: usize,
}

impl ConnectionView {
    /// Create from a domain Connection.
    pub fn from_connection(connection: &Connection) -> Self {
        Self {
            line_name: connection.line_name.clone(),
            product: connection.product.as_str(),
            direction: connection.direction.clone(),
            to_name: connection.to_station.name().to_string(),
            to_id: connection.to_station.id().to_string(),
            departure: connection.departure.hhmm(),
            arrival: connection.arrival.hhmm(),
            duration_minutes: connection.duration_minutes,
            stops_after_origin: connection.stops_after_origin,
        }
    }

    /// Duration as hours and minutes, e.g. "3 h 05 min".
    pub fn duration_label(&self) -> String {
        let hours = self.duration_minutes / 60;
        let minutes = self.duration_minutes % 60;
        if hours == 0 {
            format!("{minutes} min")
        } else {
            format!("{hours} h {minutes:02} min")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, Station, Timestamp};

    fn view(minutes: i64) -> ConnectionView {
        ConnectionView {
            line_name: "RE 5".into(),
            product: "regional-express",
            direction: "Emmerich".into(),
            to_name: "Emmerich".into(),
            to_id: "8001763".into(),
            departure: "08:02".into(),
            arrival: "11:02".into(),
            duration_minutes: minutes,
            stops_after_origin: 2,
        }
    }

    #[test]
    fn duration_label() {
        assert_eq!(view(45).duration_label(), "45 min");
        assert_eq!(view(60).duration_label(), "1 h 00 min");
        assert_eq!(view(185).duration_label(), "3 h 05 min");
    }

    #[test]
    fn view_from_connection() {
        let connection = Connection {
            line_name: "S 8".into(),
            product: Product::Suburban,
            direction: "Mayen Ost".into(),
            from_station: Station::new("8000206", "Koblenz Hbf").unwrap(),
            to_station: Station::new("8003926", "Mayen Ost").unwrap(),
            departure: Timestamp::parse("2025-11-29T08:20:00+01:00").unwrap(),
            arrival: Timestamp::parse("2025-11-29T09:12:00+01:00").unwrap(),
            duration_minutes: 52,
            stops_after_origin: 6,
            trip_id: "1|2|3".into(),
        };

        let view = ConnectionView::from_connection(&connection);
        assert_eq!(view.product, "suburban");
        assert_eq!(view.departure, "08:20");
        assert_eq!(view.arrival, "09:12");
        assert_eq!(view.to_id, "8003926");
    }

    #[test]
    fn connection_list_renders_and_escapes() {
        let mut tricky = view(185);
        tricky.direction = "<script>".into();

        let html = ConnectionListTemplate {
            origin: "Koblenz Hbf".into(),
            connections: vec![tricky],
        }
        .render()
        .unwrap();

        assert!(html.contains("Koblenz Hbf"));
        assert!(html.contains("RE 5"));
        assert!(html.contains("3 h 05 min"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn index_renders_form() {
        let html = IndexTemplate::default().render().unwrap();
        assert!(html.contains("action=\"/longest-direct\""));
        assert!(html.contains("name=\"station\""));
    }
}
