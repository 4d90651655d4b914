use shared::domain::{Activity, ActivityDirectory};

pub const SELECT_PLACEHOLDER_LABEL: &str = "-- Select an activity --";
pub const LOADING_MESSAGE: &str = "Loading activities...";
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to load activities. Please try again later.";

/// Correlation data attached to a roster row's unregister control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisterAction {
    pub activity: String,
    pub participant: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub email: String,
    pub action: UnregisterAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantRow>,
}

impl ActivityCard {
    fn from_activity(name: &str, activity: &Activity) -> Self {
        let participants = activity
            .participants
            .iter()
            .map(|email| ParticipantRow {
                email: email.clone(),
                action: UnregisterAction {
                    activity: name.to_string(),
                    participant: email.clone(),
                },
            })
            .collect();

        Self {
            name: name.to_string(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.spots_left(),
            participants,
        }
    }

    pub fn availability(&self) -> String {
        format!("{} spots left", self.spots_left)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: SELECT_PLACEHOLDER_LABEL.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Output of one render pass: one card and one selector option per activity,
/// in directory order, after the placeholder option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDirectory {
    pub cards: Vec<ActivityCard>,
    pub options: Vec<SelectOption>,
}

pub fn render(directory: &ActivityDirectory) -> RenderedDirectory {
    let mut cards = Vec::with_capacity(directory.len());
    let mut options = Vec::with_capacity(directory.len() + 1);
    options.push(SelectOption::placeholder());

    for (name, activity) in directory.iter() {
        cards.push(ActivityCard::from_activity(name, activity));
        options.push(SelectOption {
            value: name.to_string(),
            label: name.to_string(),
        });
    }

    RenderedDirectory { cards, options }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRegion {
    Loading,
    Activities(Vec<ActivityCard>),
    Failed(String),
}

/// What the user currently sees. Only replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    list: ListRegion,
    selector: Vec<SelectOption>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            list: ListRegion::Loading,
            selector: vec![SelectOption::placeholder()],
        }
    }
}

impl DisplayState {
    pub fn replace(&mut self, rendered: RenderedDirectory) {
        self.list = ListRegion::Activities(rendered.cards);
        self.selector = rendered.options;
    }

    /// Replaces the list region with a failure message. The selector keeps
    /// whatever the last successful render produced.
    pub fn fail_list(&mut self, message: impl Into<String>) {
        self.list = ListRegion::Failed(message.into());
    }

    pub fn list(&self) -> &ListRegion {
        &self.list
    }

    pub fn selector(&self) -> &[SelectOption] {
        &self.selector
    }

    pub fn cards(&self) -> &[ActivityCard] {
        match &self.list {
            ListRegion::Activities(cards) => cards,
            ListRegion::Loading | ListRegion::Failed(_) => &[],
        }
    }

    /// Row `row` of card `card`, both zero-based.
    pub fn row(&self, card: usize, row: usize) -> Option<&ParticipantRow> {
        self.cards().get(card)?.participants.get(row)
    }

    /// The `position`-th activity option, zero-based, skipping the placeholder.
    pub fn activity_option(&self, position: usize) -> Option<&SelectOption> {
        self.selector
            .iter()
            .filter(|option| !option.is_placeholder())
            .nth(position)
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.selector
            .iter()
            .any(|option| !option.is_placeholder() && option.value == value)
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
