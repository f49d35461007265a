use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Field read for display; every other column is carried along untouched.
pub const NAME_FIELD: &str = "Name";

pub const TEAM_DEVELOPERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn with_name(name: &str) -> Self {
        let mut data = HashMap::new();
        data.insert(
            NAME_FIELD.to_string(),
            serde_json::Value::String(name.to_string()),
        );
        Self { data }
    }

    pub fn name(&self) -> String {
        match self.data.get(NAME_FIELD) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "Unknown".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub records: Vec<Record>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Developer,
    BusinessAnalyst,
    DataAnalyst,
}

impl Role {
    /// Classification order: the first role whose token appears in a sheet name wins.
    pub const PRIORITY: [Role; 3] = [Role::Developer, Role::BusinessAnalyst, Role::DataAnalyst];

    pub fn token(self) -> &'static str {
        match self {
            Role::Developer => "developer",
            Role::BusinessAnalyst => "business",
            Role::DataAnalyst => "data",
        }
    }

    pub fn pool_name(self) -> &'static str {
        match self {
            Role::Developer => "developers",
            Role::BusinessAnalyst => "business analysts",
            Role::DataAnalyst => "data analysts",
        }
    }

    pub fn classify(sheet_name: &str) -> Option<Role> {
        let lowered = sheet_name.to_lowercase();
        Role::PRIORITY
            .into_iter()
            .find(|role| lowered.contains(role.token()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pool_name())
    }
}

/// One queue per role, drained from the front as teams are formed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolePools {
    pub developers: VecDeque<Record>,
    pub business_analysts: VecDeque<Record>,
    pub data_analysts: VecDeque<Record>,
}

impl RolePools {
    pub fn new(
        developers: Vec<Record>,
        business_analysts: Vec<Record>,
        data_analysts: Vec<Record>,
    ) -> Self {
        Self {
            developers: developers.into(),
            business_analysts: business_analysts.into(),
            data_analysts: data_analysts.into(),
        }
    }

    pub fn pool(&self, role: Role) -> &VecDeque<Record> {
        match role {
            Role::Developer => &self.developers,
            Role::BusinessAnalyst => &self.business_analysts,
            Role::DataAnalyst => &self.data_analysts,
        }
    }

    pub fn pool_mut(&mut self, role: Role) -> &mut VecDeque<Record> {
        match role {
            Role::Developer => &mut self.developers,
            Role::BusinessAnalyst => &mut self.business_analysts,
            Role::DataAnalyst => &mut self.data_analysts,
        }
    }

    /// Number of full teams the remaining records can still form.
    pub fn team_capacity(&self) -> usize {
        (self.developers.len() / TEAM_DEVELOPERS)
            .min(self.business_analysts.len())
            .min(self.data_analysts.len())
    }

    pub fn next_team(&mut self) -> Option<Team> {
        if self.team_capacity() == 0 {
            return None;
        }

        let developers = [
            self.developers.pop_front()?,
            self.developers.pop_front()?,
            self.developers.pop_front()?,
        ];

        Some(Team {
            developers,
            business_analyst: self.business_analysts.pop_front()?,
            data_analyst: self.data_analysts.pop_front()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub developers: [Record; TEAM_DEVELOPERS],
    pub business_analyst: Record,
    pub data_analyst: Record,
}

impl Team {
    /// Three developers, one business analyst, one data analyst.
    pub const MEMBERS: usize = TEAM_DEVELOPERS + 2;

    pub fn member_count(&self) -> usize {
        Self::MEMBERS
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRoster {
    teams: Vec<Team>,
}

impl TeamRoster {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Teams paired with their 1-based number.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Team)> {
        self.teams.iter().enumerate().map(|(i, team)| (i + 1, team))
    }
}

/// Page geometry and spacing for the team report, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    pub title: String,
    pub page_width: f32,
    pub page_height: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub left_margin: f32,
    pub member_indent: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub heading_advance: f32,
    pub line_advance: f32,
    pub trailing_gap: f32,
}

impl Default for ReportLayout {
    // US Letter
    fn default() -> Self {
        Self {
            title: "Teams".to_string(),
            page_width: 612.0,
            page_height: 792.0,
            top_margin: 50.0,
            bottom_margin: 50.0,
            left_margin: 50.0,
            member_indent: 70.0,
            heading_size: 16.0,
            body_size: 12.0,
            heading_advance: 25.0,
            line_advance: 20.0,
            trailing_gap: 40.0,
        }
    }
}

impl ReportLayout {
    /// Vertical space reserved for one team block with `members` lines.
    pub fn block_footprint(&self, members: usize) -> f32 {
        self.heading_advance + members as f32 * self.line_advance + self.trailing_gap
    }

    /// Lowest cursor position a block may reach on a page.
    pub fn usable_bottom(&self) -> f32 {
        self.page_height - self.bottom_margin
    }
}

#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub team_count: usize,
    pub page_count: usize,
}
