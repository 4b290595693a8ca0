//! Search and filter predicates shared by the list views.

use quickdesk_core::types::UserId;
use quickdesk_entity::user::User;
use quickdesk_entity::view::{QuestionView, TicketView};

/// Categorical filter value that matches everything.
pub const ALL: &str = "all";

fn category_active(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != ALL).then_some(value)
}

/// Case-insensitive substring match against any of `fields`.
/// An empty query matches.
pub fn matches_search<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Agent panel tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgentTab {
    #[default]
    All,
    /// Assigned to the signed-in agent.
    Assigned,
    /// Nobody assigned.
    Unassigned,
}

impl AgentTab {
    fn admits(self, ticket: &TicketView, actor: UserId) -> bool {
        match self {
            Self::All => true,
            Self::Assigned => ticket.assigned_to.as_ref().is_some_and(|a| a.id == actor),
            Self::Unassigned => ticket.assigned_to.is_none(),
        }
    }
}

/// Ticket list filter: free-text search plus status, priority and tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketFilter {
    /// Matched against title, description and tags.
    pub search: String,
    /// Status name, or [`ALL`].
    pub status: String,
    /// Priority name, or [`ALL`].
    pub priority: String,
    pub tab: AgentTab,
}

impl Default for TicketFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: ALL.to_string(),
            priority: ALL.to_string(),
            tab: AgentTab::All,
        }
    }
}

impl TicketFilter {
    /// True when every active criterion admits `ticket`. `actor` is the
    /// signed-in user, consulted by [`AgentTab::Assigned`].
    pub fn matches(&self, ticket: &TicketView, actor: UserId) -> bool {
        let text = [ticket.title.as_str(), ticket.description.as_str()]
            .into_iter()
            .chain(ticket.tags.iter().map(String::as_str));

        matches_search(&self.search, text)
            && category_active(&self.status).is_none_or(|s| ticket.status.as_str() == s)
            && category_active(&self.priority).is_none_or(|p| ticket.priority.as_str() == p)
            && self.tab.admits(ticket, actor)
    }
}

/// The tickets `filter` admits, in source order.
pub fn filter_tickets(tickets: &[TicketView], filter: &TicketFilter, actor: UserId) -> Vec<TicketView> {
    tickets
        .iter()
        .filter(|t| filter.matches(t, actor))
        .cloned()
        .collect()
}

/// Admin user list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    /// Matched against name and email.
    pub search: String,
    /// Role name, or [`ALL`].
    pub role: String,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            role: ALL.to_string(),
        }
    }
}

impl UserFilter {
    /// True when `user` passes both the search and the role criterion.
    pub fn matches(&self, user: &User) -> bool {
        matches_search(&self.search, [user.name.as_str(), user.email.as_str()])
            && category_active(&self.role).is_none_or(|r| user.role.as_str() == r)
    }
}

/// The users `filter` admits, in source order.
pub fn filter_users(users: &[User], filter: &UserFilter) -> Vec<User> {
    users.iter().filter(|u| filter.matches(u)).cloned().collect()
}

/// Question list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Matched against title, description and tags.
    pub search: String,
    /// Category id, or [`ALL`].
    pub category: String,
}

impl Default for QuestionFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_string(),
        }
    }
}

impl QuestionFilter {
    /// True when `question` passes the search and belongs to the selected
    /// category. Uncategorized questions only pass under [`ALL`].
    pub fn matches(&self, question: &QuestionView) -> bool {
        let text = [question.title.as_str(), question.description.as_str()]
            .into_iter()
            .chain(question.tags.iter().map(String::as_str));

        matches_search(&self.search, text)
            && category_active(&self.category).is_none_or(|c| {
                question
                    .category
                    .as_ref()
                    .is_some_and(|cat| cat.id.to_string() == c)
            })
    }
}

/// The questions `filter` admits, in source order.
pub fn filter_questions(questions: &[QuestionView], filter: &QuestionFilter) -> Vec<QuestionView> {
    questions
        .iter()
        .filter(|q| filter.matches(q))
        .cloned()
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{category, question, summary, ticket, user};
    use super::*;
    use quickdesk_entity::ticket::{TicketPriority, TicketStatus};
    use quickdesk_entity::user::UserRole;

    fn titles(tickets: &[TicketView]) -> Vec<&str> {
        tickets.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_search_and_status_filters() {
        let tickets = vec![
            ticket("A bug", TicketStatus::Open),
            ticket("B issue", TicketStatus::Closed),
        ];
        let actor = UserId::new();

        let by_search = TicketFilter {
            search: "bug".into(),
            ..Default::default()
        };
        assert_eq!(titles(&filter_tickets(&tickets, &by_search, actor)), ["A bug"]);

        let by_status = TicketFilter {
            status: "closed".into(),
            ..Default::default()
        };
        assert_eq!(titles(&filter_tickets(&tickets, &by_status, actor)), ["B issue"]);

        let impossible = TicketFilter {
            search: "bug".into(),
            status: "closed".into(),
            ..Default::default()
        };
        assert!(filter_tickets(&tickets, &impossible, actor).is_empty());
        assert_eq!(tickets.len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_over_tags() {
        let mut tagged = ticket("Printer", TicketStatus::Open);
        tagged.tags = vec!["hardware".into()];
        tagged.priority = TicketPriority::High;
        let tickets = vec![tagged, ticket("Login", TicketStatus::Open)];

        let filter = TicketFilter {
            search: "HARD".into(),
            priority: "high".into(),
            ..Default::default()
        };
        assert_eq!(titles(&filter_tickets(&tickets, &filter, UserId::new())), ["Printer"]);
    }

    #[test]
    fn test_agent_tabs() {
        let me = UserId::new();
        let mut mine = ticket("Mine", TicketStatus::Open);
        mine.assigned_to = Some(summary(me));
        let mut theirs = ticket("Theirs", TicketStatus::Open);
        theirs.assigned_to = Some(summary(UserId::new()));
        let free = ticket("Free", TicketStatus::Open);
        let tickets = vec![mine, theirs, free];

        let tab = |tab| TicketFilter {
            tab,
            ..Default::default()
        };
        assert_eq!(titles(&filter_tickets(&tickets, &tab(AgentTab::Assigned), me)), ["Mine"]);
        assert_eq!(titles(&filter_tickets(&tickets, &tab(AgentTab::Unassigned), me)), ["Free"]);
        assert_eq!(filter_tickets(&tickets, &tab(AgentTab::All), me).len(), 3);
    }

    #[test]
    fn test_user_filter() {
        let users = vec![
            user("Ann", "ann@example.com", UserRole::Admin),
            user("Bob", "bob@corp.io", UserRole::User),
        ];
        let by_email = UserFilter {
            search: "CORP".into(),
            ..Default::default()
        };
        assert_eq!(filter_users(&users, &by_email)[0].name, "Bob");

        let by_role = UserFilter {
            role: "admin".into(),
            ..Default::default()
        };
        assert_eq!(filter_users(&users, &by_role)[0].name, "Ann");
        assert_eq!(filter_users(&users, &UserFilter::default()).len(), 2);
    }

    #[test]
    fn test_question_category_filter() {
        let billing = category("Billing");
        let questions = vec![
            question("Refund?", Some(billing.clone())),
            question("Login fails", Some(category("Access"))),
            question("Loose question", None),
        ];

        let by_category = QuestionFilter {
            category: billing.id.to_string(),
            ..Default::default()
        };
        let hits = filter_questions(&questions, &by_category);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Refund?");

        let by_search = QuestionFilter {
            search: "login".into(),
            ..Default::default()
        };
        assert_eq!(filter_questions(&questions, &by_search)[0].title, "Login fails");
        assert_eq!(filter_questions(&questions, &QuestionFilter::default()).len(), 3);
    }
}
