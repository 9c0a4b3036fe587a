//! Typed parameter objects for SS12000 operations.
//!
//! Query structs serialize to flat camelCase caller keys; fields left as
//! `None` serialize to `null` and are dropped by the encoder. Construct them
//! with struct update syntax:
//!
//! ```
//! use ss12000_client::{MetaFilter, Paging, PersonsQuery};
//!
//! let query = PersonsQuery {
//!     name_contains: Some(vec!["Anna".to_owned()]),
//!     meta: MetaFilter {
//!         modified_after: Some("2024-01-01T00:00:00Z".to_owned()),
//!         ..MetaFilter::default()
//!     },
//!     paging: Paging::limit(50),
//!     ..PersonsQuery::default()
//! };
//! # let _ = query;
//! ```

use serde::Serialize;

/// `meta.created.*` / `meta.modified.*` filters.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MetaFilter {
    #[serde(rename = "metaCreatedBefore")]
    pub created_before: Option<String>,
    #[serde(rename = "metaCreatedAfter")]
    pub created_after: Option<String>,
    #[serde(rename = "metaModifiedBefore")]
    pub modified_before: Option<String>,
    #[serde(rename = "metaModifiedAfter")]
    pub modified_after: Option<String>,
}

/// `startDate.*` / `endDate.*` filters.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date_on_or_before: Option<String>,
    pub start_date_on_or_after: Option<String>,
    pub end_date_on_or_before: Option<String>,
    pub end_date_on_or_after: Option<String>,
}

/// `startTime.*` / `endTime.*` filters.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time_on_or_before: Option<String>,
    pub start_time_on_or_after: Option<String>,
    pub end_time_on_or_before: Option<String>,
    pub end_time_on_or_after: Option<String>,
}

/// Opaque cursor pagination. Loop with the `pageToken` returned by the server.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub limit: Option<u32>,
    pub page_token: Option<String>,
}

impl Paging {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            page_token: None,
        }
    }

    /// Continues a listing from a server-issued token.
    #[must_use]
    pub fn after_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = Some(page_token.into());
        self
    }
}

/// Response-shaping flags for get-by-id and lookup operations.
///
/// `expand` is only accepted by resources that support expansion.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOptions {
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
}

impl ItemOptions {
    pub fn expand<I, S>(relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expand: Some(relations.into_iter().map(Into::into).collect()),
            expand_reference_names: None,
        }
    }

    #[must_use]
    pub fn with_reference_names(mut self) -> Self {
        self.expand_reference_names = Some(true);
        self
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationsQuery {
    pub parent: Option<Vec<String>>,
    pub school_unit_code: Option<Vec<String>>,
    pub organisation_code: Option<Vec<String>>,
    pub municipality_code: Option<String>,
    #[serde(rename = "type")]
    pub organisation_type: Option<Vec<String>>,
    pub school_types: Option<Vec<String>>,
    #[serde(flatten)]
    pub dates: DateRange,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonsQuery {
    pub name_contains: Option<Vec<String>>,
    pub civic_no: Option<String>,
    pub edu_person_principal_name: Option<String>,
    pub identifier_value: Option<String>,
    pub identifier_context: Option<String>,
    pub relationship_entity_type: Option<String>,
    pub relationship_organisation: Option<String>,
    pub relationship_start_date_on_or_before: Option<String>,
    pub relationship_start_date_on_or_after: Option<String>,
    pub relationship_end_date_on_or_before: Option<String>,
    pub relationship_end_date_on_or_after: Option<String>,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementsQuery {
    pub organisation: Option<String>,
    pub group: Option<String>,
    pub child: Option<String>,
    pub owner: Option<String>,
    #[serde(flatten)]
    pub dates: DateRange,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DutiesQuery {
    pub organisation: Option<String>,
    pub duty_role: Option<String>,
    pub person: Option<String>,
    #[serde(flatten)]
    pub dates: DateRange,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsQuery {
    pub group_type: Option<Vec<String>>,
    pub school_types: Option<Vec<String>>,
    pub organisation: Option<Vec<String>>,
    #[serde(flatten)]
    pub dates: DateRange,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammesQuery {
    pub school_type: Option<Vec<String>>,
    pub code: Option<String>,
    pub parent_programme: Option<String>,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlansQuery {
    pub student: Option<Vec<String>>,
    #[serde(flatten)]
    pub dates: DateRange,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

/// Filters shared by syllabuses.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusesQuery {
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

/// Filters for collections scoped by owning organisation only
/// (school unit offerings, resources, rooms).
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationScopedQuery {
    pub organisation: Option<String>,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesQuery {
    pub member: Option<String>,
    pub teacher: Option<String>,
    pub organisation: Option<String>,
    pub group: Option<String>,
    #[serde(flatten)]
    pub dates: DateRange,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventsQuery {
    pub activity: Option<String>,
    pub student: Option<String>,
    pub teacher: Option<String>,
    pub organisation: Option<String>,
    pub group: Option<String>,
    #[serde(flatten)]
    pub times: TimeRange,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
    pub sortkey: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancesQuery {
    pub student: Option<String>,
    pub organisation: Option<String>,
    pub calendar_event: Option<String>,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand_reference_names: Option<bool>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEventsQuery {
    pub group: Option<String>,
    pub person: Option<String>,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSchedulesQuery {
    pub placement: Option<String>,
    pub group: Option<String>,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand_reference_names: Option<bool>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradesQuery {
    pub organisation: Option<String>,
    pub student: Option<String>,
    pub registered_by: Option<String>,
    pub grading_teacher: Option<String>,
    pub registered_date_on_or_after: Option<String>,
    pub registered_date_on_or_before: Option<String>,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
    #[serde(flatten)]
    pub paging: Paging,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsencesQuery {
    pub organisation: Option<String>,
    pub student: Option<String>,
    pub registered_by: Option<String>,
    #[serde(rename = "type")]
    pub absence_type: Option<String>,
    #[serde(flatten)]
    pub times: TimeRange,
    #[serde(flatten)]
    pub meta: MetaFilter,
    pub expand_reference_names: Option<bool>,
    #[serde(flatten)]
    pub paging: Paging,
}

/// `startDate` and `endDate` are required by the server for this listing.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedAttendanceQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub organisation: Option<String>,
    pub school_type: Option<Vec<String>>,
    pub student: Option<String>,
    pub expand: Option<Vec<String>>,
    pub expand_reference_names: Option<bool>,
    #[serde(flatten)]
    pub paging: Paging,
}

/// Reconciliation listing of entities removed after a point in time.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedEntitiesQuery {
    /// RFC 3339 timestamp.
    pub after: Option<String>,
    /// Entity type names, for example `Person` or `Organisation`.
    pub entities: Option<Vec<String>>,
    #[serde(flatten)]
    pub paging: Paging,
}

// Lookup bodies. Unset selectors are left out of the JSON body entirely.

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationsLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_unit_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation_codes: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonsLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub civic_nos: Option<Vec<String>>,
}

impl PersonsLookup {
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Some(ids.into_iter().map(Into::into).collect()),
            civic_nos: None,
        }
    }
}

/// Lookup body for resources selected by id only.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IdsLookup {
    pub ids: Vec<String>,
}

impl IdsLookup {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of `PATCH /subscriptions/{id}`.
#[derive(Clone, Debug, Serialize)]
pub struct SubscriptionUpdate {
    /// New RFC 3339 expiry timestamp.
    pub expires: String,
}
