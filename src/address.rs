//! Endpoint address derivation for the two transports.

/// Address the simulator transport connects to.
pub const SIM_ADDRESS: &str = "127.0.0.1";

/// Placeholder robot address used before a team number is configured.
pub const DEFAULT_ROBOT_ADDRESS: &str = "10.0.0.2";

/// Network prefix for a team's robot subnet: `10.TE.AM.`
///
/// Team 4096 lives on `10.40.96.`.
pub fn team_prefix(team: u16) -> String {
    format!("10.{}.{}.", team / 100, team % 100)
}

/// Robot transport endpoint for a team: host `.2` on the team subnet.
pub fn team_address(team: u16) -> String {
    format!("{}2", team_prefix(team))
}
