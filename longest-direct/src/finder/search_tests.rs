//! Unit tests for the longest direct connection search.

use super::search::*;
use super::{FinderError, LongestDirectRequest, MAX_DEPARTURES_EXAMINED};
use crate::domain::Product;
use crate::transit::{DepartureDto, MockTransitClient, TripDto};
use serde_json::json;

const KOBLENZ: &str = "8000206";

fn departure(trip_id: &str, line: &str, product: &str, direction: &str) -> DepartureDto {
    serde_json::from_value(json!({
        "tripId": trip_id,
        "direction": direction,
        "line": {"name": line, "product": product, "mode": "train"},
        "plannedWhen": "2025-11-29T08:00:00+01:00",
    }))
    .unwrap()
}

/// A trip through `stops`: (id, name, arrival, departure), "" = absent.
fn trip(id: &str, stops: &[(&str, &str, &str, &str)]) -> TripDto {
    let at = |hhmm: &str| (!hhmm.is_empty()).then(|| format!("2025-11-29T{hhmm}:00+01:00"));
    let stopovers: Vec<serde_json::Value> = stops
        .iter()
        .map(|(stop_id, name, arr, dep)| {
            json!({
                "stop": {"type": "stop", "id": stop_id, "name": name},
                "plannedArrival": at(*arr),
                "plannedDeparture": at(*dep),
            })
        })
        .collect();

    serde_json::from_value(json!({"id": id, "stopovers": stopovers})).unwrap()
}

/// Koblenz with a board of RE/RB/S departures and one ICE.
fn koblenz_mock() -> MockTransitClient {
    MockTransitClient::new()
        .with_station(KOBLENZ, Some("Koblenz Hbf"))
        .with_departures(
            KOBLENZ,
            vec![
                departure("t-rb81", "RB 81", "regional", "Trier Hbf"),
                departure("t-re5", "RE 5", "regionalExpress", "Emmerich"),
                departure("t-s8", "S 8", "suburban", "Mayen Ost"),
                departure("t-ice", "ICE 27", "nationalExpress", "Basel SBB"),
                departure("t-re5-late", "RE 5", "regionalExpress", "Emmerich"),
                departure("t-rb23", "RB 23", "regional", "Mayen Ost"),
            ],
        )
        .with_trip(
            "t-rb81",
            trip(
                "t-rb81",
                &[
                    (KOBLENZ, "Koblenz Hbf", "", "08:10"),
                    ("8000134", "Trier Hbf", "09:40", ""),
                ],
            ),
        )
        .with_trip(
            "t-re5",
            trip(
                "t-re5",
                &[
                    ("8000240", "Mainz Hbf", "", "07:00"),
                    (KOBLENZ, "Koblenz Hbf", "07:58", "08:02"),
                    ("8000207", "Köln Hbf", "09:05", "09:08"),
                    ("8001763", "Emmerich", "11:02", ""),
                ],
            ),
        )
        .with_trip(
            "t-s8",
            trip(
                "t-s8",
                &[
                    (KOBLENZ, "Koblenz Hbf", "", "08:20"),
                    ("8003926", "Mayen Ost", "09:12", ""),
                ],
            ),
        )
        .with_trip(
            "t-re5-late",
            trip(
                "t-re5-late",
                &[
                    (KOBLENZ, "Koblenz Hbf", "", "10:02"),
                    ("8000207", "Köln Hbf", "11:05", "11:08"),
                    ("8001763", "Emmerich", "12:40", ""),
                ],
            ),
        )
        .with_trip(
            "t-rb23",
            trip(
                "t-rb23",
                &[
                    (KOBLENZ, "Koblenz Hbf", "", "08:30"),
                    ("8003926", "Mayen Ost", "09:15", ""),
                ],
            ),
        )
}

#[tokio::test]
async fn empty_station_makes_no_upstream_calls() {
    let mock = koblenz_mock();
    let finder = ConnectionFinder::new(&mock);

    let err = finder
        .find(&LongestDirectRequest::new("   "))
        .await
        .unwrap_err();

    assert!(matches!(err, FinderError::Validation(_)));
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn invalid_limit_makes_no_upstream_calls() {
    let mock = koblenz_mock();
    let finder = ConnectionFinder::new(&mock);

    let err = finder
        .find(&LongestDirectRequest::new("Koblenz").with_limit(0))
        .await
        .unwrap_err();

    assert!(matches!(err, FinderError::Validation(_)));
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn koblenz_longest_first() {
    let mock = koblenz_mock();
    let finder = ConnectionFinder::new(&mock);
    let request = LongestDirectRequest::new("Koblenz Hbf")
        .with_limit(5)
        .with_duration(360);

    let result = finder.find(&request).await.unwrap();

    assert_eq!(result.origin.id(), KOBLENZ);
    assert!(result.connections.len() <= 5);
    assert!(
        result
            .connections
            .iter()
            .all(|c| c.product.is_regional() && c.duration_minutes > 0)
    );
    for window in result.connections.windows(2) {
        assert!(window[0].duration_minutes >= window[1].duration_minutes);
    }

    let summary: Vec<(&str, &str, i64)> = result
        .connections
        .iter()
        .map(|c| (c.line_name.as_str(), c.to_station.id(), c.duration_minutes))
        .collect();
    assert_eq!(
        summary,
        [
            ("RE 5", "8001763", 180),
            ("RB 81", "8000134", 90),
            ("S 8", "8003926", 52),
            ("RB 23", "8003926", 45),
        ]
    );
}

#[tokio::test]
async fn connection_fields() {
    let mock = koblenz_mock();
    let request = LongestDirectRequest::new("Koblenz");

    let connections = find_longest_direct(&mock, &request).await.unwrap();
    let re5 = &connections[0];

    assert_eq!(re5.line_name, "RE 5");
    assert_eq!(re5.product, Product::RegionalExpress);
    assert_eq!(re5.direction, "Emmerich");
    assert_eq!(re5.from_station.name(), "Koblenz Hbf");
    assert_eq!(re5.to_station.name(), "Emmerich");
    assert_eq!(re5.departure.to_rfc3339(), "2025-11-29T08:02:00+01:00");
    assert_eq!(re5.arrival.to_rfc3339(), "2025-11-29T11:02:00+01:00");
    assert_eq!(re5.stops_after_origin, 2);
    assert_eq!(re5.trip_id, "t-re5");
}

#[tokio::test]
async fn same_route_keeps_the_longer_departure() {
    let mock = koblenz_mock();
    let request = LongestDirectRequest::new("Koblenz");

    let result = ConnectionFinder::new(&mock).find(&request).await.unwrap();
    let re5: Vec<_> = result
        .connections
        .iter()
        .filter(|c| c.line_name == "RE 5")
        .collect();

    // 180 minutes beats the later 158-minute run to the same terminus.
    assert_eq!(re5.len(), 1);
    assert_eq!(re5[0].duration_minutes, 180);
    assert_eq!(re5[0].trip_id, "t-re5");
}

#[tokio::test]
async fn non_regional_departures_are_not_fetched() {
    let mock = koblenz_mock();
    let request = LongestDirectRequest::new("Koblenz");

    let result = ConnectionFinder::new(&mock).find(&request).await.unwrap();

    assert_eq!(result.departures_examined, 6);
    assert_eq!(mock.trip_calls(), 5);
    assert!(
        result
            .connections
            .iter()
            .all(|c| c.line_name != "ICE 27")
    );
    // Only the ICE is skipped; the later RE 5 run is valid but shorter.
    assert_eq!(result.skipped, 1);
}

#[tokio::test]
async fn limit_truncates() {
    let mock = koblenz_mock();
    let request = LongestDirectRequest::new("Koblenz").with_limit(2);

    let connections = find_longest_direct(&mock, &request).await.unwrap();
    assert_eq!(connections.len(), 2);
    assert_eq!(connections[0].duration_minutes, 180);
    assert_eq!(connections[1].duration_minutes, 90);
}

#[tokio::test]
async fn unfetchable_trip_is_skipped() {
    let mock = MockTransitClient::new()
        .with_station(KOBLENZ, Some("Koblenz Hbf"))
        .with_departures(
            KOBLENZ,
            vec![
                departure("missing", "RE 1", "regionalExpress", "Saarbrücken"),
                departure("t-rb81", "RB 81", "regional", "Trier Hbf"),
            ],
        )
        .with_trip(
            "t-rb81",
            trip(
                "t-rb81",
                &[
                    (KOBLENZ, "Koblenz Hbf", "", "08:10"),
                    ("8000134", "Trier Hbf", "09:40", ""),
                ],
            ),
        );

    let result = ConnectionFinder::new(&mock)
        .find(&LongestDirectRequest::new("Koblenz"))
        .await
        .unwrap();

    assert_eq!(result.connections.len(), 1);
    assert_eq!(result.connections[0].line_name, "RB 81");
    assert_eq!(result.skipped, 1);
    assert_eq!(mock.trip_calls(), 2);
}

#[tokio::test]
async fn empty_board_is_no_connections() {
    let mock = MockTransitClient::new().with_station(KOBLENZ, Some("Koblenz Hbf"));

    let err = ConnectionFinder::new(&mock)
        .find(&LongestDirectRequest::new("Koblenz"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FinderError::NoConnections {
            station: "Koblenz Hbf".into()
        }
    );
    assert_eq!(mock.trip_calls(), 0);
}

#[tokio::test]
async fn all_skipped_is_no_connections() {
    let mock = MockTransitClient::new()
        .with_station(KOBLENZ, Some("Koblenz Hbf"))
        .with_departures(
            KOBLENZ,
            vec![
                departure("t-ice", "ICE 27", "nationalExpress", "Basel SBB"),
                departure("gone", "RB 81", "regional", "Trier Hbf"),
            ],
        );

    let err = ConnectionFinder::new(&mock)
        .find(&LongestDirectRequest::new("Koblenz"))
        .await
        .unwrap_err();

    assert!(matches!(err, FinderError::NoConnections { .. }));
}

#[tokio::test]
async fn at_most_eighty_departures_examined() {
    let board: Vec<DepartureDto> = (0..200)
        .map(|i| departure(&format!("t{i}"), &format!("RB {i}"), "regional", "Trier Hbf"))
        .collect();

    let mut mock = MockTransitClient::new()
        .with_station(KOBLENZ, Some("Koblenz Hbf"))
        .with_departures(KOBLENZ, board);
    for i in 0..200 {
        let id = format!("t{i}");
        mock = mock.with_trip(
            &id,
            trip(
                &id,
                &[
                    (KOBLENZ, "Koblenz Hbf", "", "08:00"),
                    ("8000134", "Trier Hbf", "09:30", ""),
                ],
            ),
        );
    }

    let result = ConnectionFinder::new(&mock)
        .find(&LongestDirectRequest::new("Koblenz").with_limit(50))
        .await
        .unwrap();

    assert_eq!(result.departures_examined, MAX_DEPARTURES_EXAMINED);
    assert_eq!(mock.trip_calls(), MAX_DEPARTURES_EXAMINED);
    assert_eq!(result.connections.len(), 50);

    // Only the first 80 board entries can appear.
    assert!(result.connections.iter().all(|c| {
        c.trip_id
            .trim_start_matches('t')
            .parse::<usize>()
            .is_ok_and(|i| i < MAX_DEPARTURES_EXAMINED)
    }));
}

#[tokio::test]
async fn unknown_station_is_not_found() {
    let mock = koblenz_mock();

    let err = ConnectionFinder::new(&mock)
        .find(&LongestDirectRequest::new("Atlantis"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FinderError::StationNotFound {
            query: "Atlantis".into()
        }
    );
    assert_eq!(mock.search_calls(), 1);
    assert_eq!(mock.departures_calls(), 0);
}

#[tokio::test]
async fn departures_failure_is_fatal() {
    let mock = koblenz_mock().with_departures_status(503);

    let err = ConnectionFinder::new(&mock)
        .find(&LongestDirectRequest::new("Koblenz"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FinderError::Upstream {
            status: Some(503),
            ..
        }
    ));
    assert_eq!(mock.trip_calls(), 0);
}

#[tokio::test]
async fn search_failure_is_fatal() {
    let mock = koblenz_mock().with_search_status(500);

    let err = ConnectionFinder::new(&mock)
        .find(&LongestDirectRequest::new("Koblenz"))
        .await
        .unwrap_err();

    assert!(matches!(err, FinderError::Upstream { .. }));
    assert_eq!(mock.departures_calls(), 0);
}

#[tokio::test]
async fn origin_terminating_here_is_skipped() {
    let mock = MockTransitClient::new()
        .with_station(KOBLENZ, Some("Koblenz Hbf"))
        .with_departures(
            KOBLENZ,
            vec![
                departure("t-in", "RB 81", "regional", "Koblenz Hbf"),
                departure("t-out", "RB 81", "regional", "Trier Hbf"),
            ],
        )
        .with_trip(
            "t-in",
            trip(
                "t-in",
                &[
                    ("8000134", "Trier Hbf", "", "06:30"),
                    (KOBLENZ, "Koblenz Hbf", "08:00", ""),
                ],
            ),
        )
        .with_trip(
            "t-out",
            trip(
                "t-out",
                &[
                    (KOBLENZ, "Koblenz Hbf", "", "08:10"),
                    ("8000134", "Trier Hbf", "09:40", ""),
                ],
            ),
        );

    let result = ConnectionFinder::new(&mock)
        .find(&LongestDirectRequest::new("Koblenz"))
        .await
        .unwrap();

    assert_eq!(result.connections.len(), 1);
    assert_eq!(result.connections[0].to_station.id(), "8000134");
    assert_eq!(result.skipped, 1);
}
