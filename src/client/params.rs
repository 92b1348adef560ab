/// The search form fields, in the order the backend documents them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SearchField {
    Query,
    Receiver,
    Status,
    Group,
    OwnPhone,
    Email,
    Phone,
    App,
    Deleted,
    StartDate,
    EndDate,
    Latitude,
    Longitude,
    Radius,
}

impl SearchField {
    pub const ALL: [SearchField; 14] = [
        SearchField::Query,
        SearchField::Receiver,
        SearchField::Status,
        SearchField::Group,
        SearchField::OwnPhone,
        SearchField::Email,
        SearchField::Phone,
        SearchField::App,
        SearchField::Deleted,
        SearchField::StartDate,
        SearchField::EndDate,
        SearchField::Latitude,
        SearchField::Longitude,
        SearchField::Radius,
    ];

    /// Wire name of the query parameter this field maps to.
    pub fn wire_name(self) -> &'static str {
        match self {
            SearchField::Query => "q",
            SearchField::Receiver => "name_of_receiver",
            SearchField::Status => "message_status",
            SearchField::Group => "group_name",
            SearchField::OwnPhone => "own_phone",
            SearchField::Email => "email",
            SearchField::Phone => "phone",
            SearchField::App => "app",
            SearchField::Deleted => "is_deleted",
            SearchField::StartDate => "start_date",
            SearchField::EndDate => "end_date",
            SearchField::Latitude => "latitude",
            SearchField::Longitude => "longitude",
            SearchField::Radius => "radius",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchField::Query => "Query",
            SearchField::Receiver => "Receiver name",
            SearchField::Status => "Message status",
            SearchField::Group => "Group name",
            SearchField::OwnPhone => "Own phone",
            SearchField::Email => "Email",
            SearchField::Phone => "Phone",
            SearchField::App => "Source app",
            SearchField::Deleted => "Deleted only",
            SearchField::StartDate => "Start date",
            SearchField::EndDate => "End date",
            SearchField::Latitude => "Latitude",
            SearchField::Longitude => "Longitude",
            SearchField::Radius => "Radius",
        }
    }

    /// The one checkbox-style field; everything else is free text.
    pub fn is_flag(self) -> bool {
        matches!(self, SearchField::Deleted)
    }
}

/// User-entered, unvalidated search state. Empty strings mean "unset";
/// the draft is never transmitted as-is, it always goes through
/// [`wire_params`] first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryDraft {
    pub q: String,
    pub name_of_receiver: String,
    pub message_status: String,
    pub group_name: String,
    pub own_phone: String,
    pub email: String,
    pub phone: String,
    pub app: String,
    pub is_deleted: bool,
    pub start_date: String,
    pub end_date: String,
    pub latitude: String,
    pub longitude: String,
    pub radius: String,
}

impl QueryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text value of a field, `None` for the deletion flag.
    pub fn text(&self, field: SearchField) -> Option<&str> {
        self.slot(field).map(|s| s.as_str())
    }

    pub fn text_mut(&mut self, field: SearchField) -> Option<&mut String> {
        match field {
            SearchField::Query => Some(&mut self.q),
            SearchField::Receiver => Some(&mut self.name_of_receiver),
            SearchField::Status => Some(&mut self.message_status),
            SearchField::Group => Some(&mut self.group_name),
            SearchField::OwnPhone => Some(&mut self.own_phone),
            SearchField::Email => Some(&mut self.email),
            SearchField::Phone => Some(&mut self.phone),
            SearchField::App => Some(&mut self.app),
            SearchField::Deleted => None,
            SearchField::StartDate => Some(&mut self.start_date),
            SearchField::EndDate => Some(&mut self.end_date),
            SearchField::Latitude => Some(&mut self.latitude),
            SearchField::Longitude => Some(&mut self.longitude),
            SearchField::Radius => Some(&mut self.radius),
        }
    }

    fn slot(&self, field: SearchField) -> Option<&String> {
        match field {
            SearchField::Query => Some(&self.q),
            SearchField::Receiver => Some(&self.name_of_receiver),
            SearchField::Status => Some(&self.message_status),
            SearchField::Group => Some(&self.group_name),
            SearchField::OwnPhone => Some(&self.own_phone),
            SearchField::Email => Some(&self.email),
            SearchField::Phone => Some(&self.phone),
            SearchField::App => Some(&self.app),
            SearchField::Deleted => None,
            SearchField::StartDate => Some(&self.start_date),
            SearchField::EndDate => Some(&self.end_date),
            SearchField::Latitude => Some(&self.latitude),
            SearchField::Longitude => Some(&self.longitude),
            SearchField::Radius => Some(&self.radius),
        }
    }
}

/// Canonical wire parameters for a search: every field whose draft value is
/// the empty string or an unset flag is dropped, everything else is forwarded
/// verbatim. Numeric and date fields are not validated here; rejecting
/// malformed values is the backend's job.
pub fn wire_params(draft: &QueryDraft) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    for field in SearchField::ALL {
        if field.is_flag() {
            if draft.is_deleted {
                params.push((field.wire_name(), "true".to_string()));
            }
        } else if let Some(value) = draft.text(field) {
            if !value.is_empty() {
                params.push((field.wire_name(), value.to_string()));
            }
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_draft_produces_no_params() {
        assert!(wire_params(&QueryDraft::new()).is_empty());
    }

    #[test]
    fn test_empty_and_false_values_are_dropped() {
        let draft = QueryDraft {
            q: "x".to_string(),
            phone: String::new(),
            is_deleted: false,
            ..QueryDraft::default()
        };

        let params = wire_params(&draft);
        assert_eq!(params, vec![("q", "x".to_string())]);
    }

    #[test]
    fn test_set_flag_serializes_as_true() {
        let draft = QueryDraft {
            q: "hello".to_string(),
            is_deleted: true,
            ..QueryDraft::default()
        };

        let params = wire_params(&draft);
        assert_eq!(
            params,
            vec![
                ("q", "hello".to_string()),
                ("is_deleted", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_values_are_forwarded_verbatim() {
        let draft = QueryDraft {
            latitude: "not-a-number".to_string(),
            start_date: "yesterday-ish".to_string(),
            ..QueryDraft::default()
        };

        let params = wire_params(&draft);
        assert_eq!(
            params,
            vec![
                ("start_date", "yesterday-ish".to_string()),
                ("latitude", "not-a-number".to_string()),
            ]
        );
    }

    #[test]
    fn test_all_fields_round_trip() {
        let draft = QueryDraft {
            q: "a".into(),
            name_of_receiver: "b".into(),
            message_status: "read".into(),
            group_name: "g".into(),
            own_phone: "1".into(),
            email: "e@example.com".into(),
            phone: "2".into(),
            app: "telegram".into(),
            is_deleted: true,
            start_date: "2024-01-01T00:00".into(),
            end_date: "2024-02-01T00:00".into(),
            latitude: "55.75".into(),
            longitude: "37.61".into(),
            radius: "10".into(),
        };

        let params = wire_params(&draft);
        assert_eq!(params.len(), 14);
        let names: Vec<&str> = params.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "q",
                "name_of_receiver",
                "message_status",
                "group_name",
                "own_phone",
                "email",
                "phone",
                "app",
                "is_deleted",
                "start_date",
                "end_date",
                "latitude",
                "longitude",
                "radius",
            ]
        );
    }

    #[test]
    fn test_field_accessors_cover_every_text_field() {
        let mut draft = QueryDraft::new();
        for field in SearchField::ALL {
            if field.is_flag() {
                assert!(draft.text(field).is_none());
                assert!(draft.text_mut(field).is_none());
            } else {
                draft.text_mut(field).unwrap().push('x');
                assert_eq!(draft.text(field), Some("x"));
            }
        }
    }
}
