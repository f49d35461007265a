use crate::core::{RolePools, TeamRoster};

/// Forms as many full teams as the pools allow, taking records from the
/// front of each pool. Records left over after the last full team are dropped.
pub fn group_teams(mut pools: RolePools) -> TeamRoster {
    let team_count = pools.team_capacity();
    let mut teams = Vec::with_capacity(team_count);

    while let Some(team) = pools.next_team() {
        teams.push(team);
    }

    debug_assert_eq!(teams.len(), team_count);
    tracing::debug!(
        "Formed {} team(s); unused: {} developers, {} business analysts, {} data analysts",
        teams.len(),
        pools.developers.len(),
        pools.business_analysts.len(),
        pools.data_analysts.len()
    );

    TeamRoster::new(teams)
}
