//! Connection ranking for search results.
//!
//! Longest first. Ties are broken on the route identity so that the same
//! set of connections always comes out in the same order.

use std::cmp::Ordering;

use crate::domain::Connection;

/// Compare two connections, best (longest) first.
///
/// Connections are ranked by:
/// 1. Duration (longer is better)
/// 2. Line name, ascending
/// 3. Direction, ascending
/// 4. Terminus id, ascending
pub fn compare_connections(a: &Connection, b: &Connection) -> Ordering {
    b.duration_minutes
        .cmp(&a.duration_minutes)
        .then_with(|| a.line_name.cmp(&b.line_name))
        .then_with(|| a.direction.cmp(&b.direction))
        .then_with(|| a.to_station.id().cmp(b.to_station.id()))
}

/// Sort connections best-first and keep at most `limit` of them.
pub fn rank_connections(mut connections: Vec<Connection>, limit: usize) -> Vec<Connection> {
    connections.sort_by(compare_connections);
    connections.truncate(limit);
    connections
}
