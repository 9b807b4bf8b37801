//! Person representations

use serde::Serialize;

use super::team::TeamSummary;
use crate::api::types::ApiError;
use crate::domain::access::Operation;
use crate::domain::person::{Person, PersonId};
use crate::domain::team::TeamId;
use crate::infrastructure::person::PersonRecord;

/// The shapes a person can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonShape {
    /// `{id, first_name, last_name, email}`
    Summary,
    /// Summary plus `team_name`
    List,
    /// Summary plus the nested team summary
    Detail,
    /// `{id, team}` with the team id
    Assignment,
}

impl PersonShape {
    /// Shape of the person body returned by an operation, if it returns one
    pub fn for_operation(operation: Operation) -> Option<Self> {
        match operation {
            Operation::List => Some(Self::List),
            Operation::Retrieve => Some(Self::Detail),
            Operation::Create | Operation::Update => Some(Self::Summary),
            Operation::AssignToTeam => Some(Self::Assignment),
            Operation::Delete => None,
        }
    }

    /// Like `for_operation`, for handlers that must return a body
    pub fn resolve(operation: Operation) -> Result<Self, ApiError> {
        Self::for_operation(operation).ok_or_else(|| {
            ApiError::internal(format!("No person representation for {}", operation))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&Person> for PersonSummary {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id(),
            first_name: person.first_name().to_string(),
            last_name: person.last_name().to_string(),
            email: person.email().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonListView {
    #[serde(flatten)]
    pub person: PersonSummary,
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonDetailView {
    #[serde(flatten)]
    pub person: PersonSummary,
    pub team: Option<TeamSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentView {
    pub id: PersonId,
    pub team: Option<TeamId>,
}

/// A person rendered in one of its shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PersonView {
    Summary(PersonSummary),
    List(PersonListView),
    Detail(PersonDetailView),
    Assignment(AssignmentView),
}

impl PersonView {
    pub fn render(shape: PersonShape, record: &PersonRecord) -> Self {
        let person = &record.person;

        match shape {
            PersonShape::Summary => Self::Summary(PersonSummary::from(person)),
            PersonShape::List => Self::List(PersonListView {
                person: PersonSummary::from(person),
                team_name: record.team.as_ref().map(|t| t.name().to_string()),
            }),
            PersonShape::Detail => Self::Detail(PersonDetailView {
                person: PersonSummary::from(person),
                team: record.team.as_ref().map(TeamSummary::from),
            }),
            PersonShape::Assignment => Self::Assignment(AssignmentView {
                id: person.id(),
                team: person.team(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::person::NewPerson;
    use crate::domain::team::Team;
    use serde_json::json;

    fn john() -> Person {
        Person::from_new(
            PersonId::new(1),
            NewPerson::new("John", "Doe", "john.doe@gmail.com").unwrap(),
        )
    }

    fn with_team() -> PersonRecord {
        let team = Team::new(TeamId::new(2), "Team 2");
        PersonRecord::new(john().with_team(Some(team.id())), Some(team))
    }

    #[test]
    fn test_operation_to_shape() {
        assert_eq!(
            PersonShape::for_operation(Operation::List),
            Some(PersonShape::List)
        );
        assert_eq!(
            PersonShape::for_operation(Operation::Retrieve),
            Some(PersonShape::Detail)
        );
        assert_eq!(
            PersonShape::for_operation(Operation::Create),
            Some(PersonShape::Summary)
        );
        assert_eq!(
            PersonShape::for_operation(Operation::Update),
            Some(PersonShape::Summary)
        );
        assert_eq!(
            PersonShape::for_operation(Operation::AssignToTeam),
            Some(PersonShape::Assignment)
        );
        assert_eq!(PersonShape::for_operation(Operation::Delete), None);
    }

    #[test]
    fn test_render_list_shape() {
        let view = PersonView::render(PersonShape::List, &with_team());

        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({
                "id": 1,
                "first_name": "John",
                "last_name": "Doe",
                "email": "john.doe@gmail.com",
                "team_name": "Team 2"
            })
        );
    }

    #[test]
    fn test_render_list_shape_without_team() {
        let view = PersonView::render(PersonShape::List, &PersonRecord::new(john(), None));
        let value = serde_json::to_value(view).unwrap();

        assert_eq!(value["team_name"], serde_json::Value::Null);
    }

    #[test]
    fn test_render_detail_shape() {
        let view = PersonView::render(PersonShape::Detail, &with_team());
        let value = serde_json::to_value(view).unwrap();

        assert_eq!(value["team"], json!({"id": 2, "name": "Team 2"}));
        assert_eq!(value["email"], "john.doe@gmail.com");
    }

    #[test]
    fn test_render_detail_shape_without_team() {
        let view = PersonView::render(PersonShape::Detail, &PersonRecord::new(john(), None));
        let value = serde_json::to_value(view).unwrap();

        assert!(value.get("team").is_some());
        assert_eq!(value["team"], serde_json::Value::Null);
    }

    #[test]
    fn test_render_summary_shape() {
        let view = PersonView::render(PersonShape::Summary, &with_team());

        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({
                "id": 1,
                "first_name": "John",
                "last_name": "Doe",
                "email": "john.doe@gmail.com"
            })
        );
    }

    #[test]
    fn test_render_assignment_shape() {
        let view = PersonView::render(PersonShape::Assignment, &with_team());
        assert_eq!(serde_json::to_value(view).unwrap(), json!({"id": 1, "team": 2}));

        let view = PersonView::render(PersonShape::Assignment, &PersonRecord::new(john(), None));
        assert_eq!(serde_json::to_value(view).unwrap(), json!({"id": 1, "team": null}));
    }
}
