//! Team representations

use serde::Serialize;

use super::person::PersonSummary;
use crate::api::types::ApiError;
use crate::domain::access::Operation;
use crate::domain::team::{Team, TeamId};
use crate::infrastructure::team::TeamRecord;

/// The shapes a team can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamShape {
    /// `{id, name}`, nested inside person detail
    Summary,
    /// `{id, name, members}` with members as display strings
    List,
    /// `{id, name, members}` with members as person summaries
    Detail,
}

impl TeamShape {
    /// Shape of the team body returned by an operation, if it returns one
    pub fn for_operation(operation: Operation) -> Option<Self> {
        match operation {
            Operation::List => Some(Self::List),
            Operation::Retrieve => Some(Self::Detail),
            Operation::Create | Operation::Update => Some(Self::List),
            Operation::Delete | Operation::AssignToTeam => None,
        }
    }

    /// Like `for_operation`, for handlers that must return a body
    pub fn resolve(operation: Operation) -> Result<Self, ApiError> {
        Self::for_operation(operation).ok_or_else(|| {
            ApiError::internal(format!("No team representation for {}", operation))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamListView {
    pub id: TeamId,
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamDetailView {
    pub id: TeamId,
    pub name: String,
    pub members: Vec<PersonSummary>,
}

/// A team rendered in one of its shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TeamView {
    Summary(TeamSummary),
    List(TeamListView),
    Detail(TeamDetailView),
}

impl TeamView {
    pub fn render(shape: TeamShape, record: &TeamRecord) -> Self {
        let team = &record.team;

        match shape {
            TeamShape::Summary => Self::Summary(TeamSummary::from(team)),
            TeamShape::List => Self::List(TeamListView {
                id: team.id(),
                name: team.name().to_string(),
                members: record.members.iter().map(|p| p.display_name()).collect(),
            }),
            TeamShape::Detail => Self::Detail(TeamDetailView {
                id: team.id(),
                name: team.name().to_string(),
                members: record.members.iter().map(PersonSummary::from).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::person::{NewPerson, Person, PersonId};
    use serde_json::json;

    fn record() -> TeamRecord {
        let team = Team::new(TeamId::new(1), "Team 1");
        let john = Person::from_new(
            PersonId::new(3),
            NewPerson::new("John", "Doe", "john.doe@gmail.com").unwrap(),
        )
        .with_team(Some(team.id()));

        TeamRecord::new(team, vec![john])
    }

    #[test]
    fn test_operation_to_shape() {
        assert_eq!(TeamShape::for_operation(Operation::List), Some(TeamShape::List));
        assert_eq!(
            TeamShape::for_operation(Operation::Retrieve),
            Some(TeamShape::Detail)
        );
        assert_eq!(TeamShape::for_operation(Operation::Create), Some(TeamShape::List));
        assert_eq!(TeamShape::for_operation(Operation::Update), Some(TeamShape::List));
        assert_eq!(TeamShape::for_operation(Operation::Delete), None);
        assert_eq!(TeamShape::for_operation(Operation::AssignToTeam), None);
    }

    #[test]
    fn test_render_list_shape() {
        let view = TeamView::render(TeamShape::List, &record());

        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({"id": 1, "name": "Team 1", "members": ["John Doe"]})
        );
    }

    #[test]
    fn test_render_detail_shape() {
        let view = TeamView::render(TeamShape::Detail, &record());

        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({
                "id": 1,
                "name": "Team 1",
                "members": [{
                    "id": 3,
                    "first_name": "John",
                    "last_name": "Doe",
                    "email": "john.doe@gmail.com"
                }]
            })
        );
    }

    #[test]
    fn test_render_summary_shape() {
        let view = TeamView::render(TeamShape::Summary, &record());

        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({"id": 1, "name": "Team 1"})
        );
    }

    #[test]
    fn test_resolve_without_body() {
        assert!(TeamShape::resolve(Operation::Delete).is_err());
        assert_eq!(TeamShape::resolve(Operation::Update).unwrap(), TeamShape::List);
    }
}
