/// Metadata carried by a clickable trigger (e.g. a row's delete button).
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct TriggerData {
    pub href: Option<String>,
    pub id: Option<String>,
    pub bid: Option<String>,
    pub action: Option<String>,
    pub name: Option<String>,
}

impl TriggerData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_bid(mut self, bid: impl Into<String>) -> Self {
        self.bid = Some(bid.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The action waiting for the user's answer between show and confirm.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct PendingAction {
    pub target: Option<String>,
    pub id: Option<String>,
    pub bid: Option<String>,
    pub action: Option<String>,
}

impl PendingAction {
    pub fn from_trigger(trigger: &TriggerData) -> Self {
        Self {
            target: trigger.href.clone(),
            id: trigger.id.clone(),
            bid: trigger.bid.clone(),
            action: trigger.action.clone(),
        }
    }

    /// `target` is the destination, never a submitted field.
    pub fn into_submission(self) -> FormSubmission {
        FormSubmission::new(self.target.unwrap_or_default(), HttpMethod::Post)
            .field("id", self.id)
            .field("bid", self.bid)
            .field("action", self.action)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// A hidden form: destination, method and ordered fields.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FormSubmission {
    pub action: String,
    pub method: HttpMethod,
    pub values: Vec<FormField>,
}

impl FormSubmission {
    pub fn new(action: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            action: action.into(),
            method,
            values: Vec::new(),
        }
    }

    /// Appends a field. Absent values are submitted blank.
    pub fn field(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.values.push(FormField {
            name: name.into(),
            value: value.unwrap_or_default(),
        });
        self
    }

    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.values
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.values.iter().map(|f| f.name.as_str()).collect()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PageEffect {
    Reload { bypass_cache: bool },
}
