//! Endpoint descriptors for every SS12000 operation.
//!
//! The table is the single source of truth for verbs, paths and query
//! parameters; typed client methods are thin wrappers over [`prepare`].

use std::fmt;

use serde_json::Value;
use url::form_urlencoded::byte_serialize;

use crate::params::{
    DATE_RANGE, EXPAND, META, PAGING, Param, ParamGroup, REFERENCE_NAMES, SORTKEY, TIME_RANGE,
    encode_query, flatten,
};
use crate::{ClientError, HttpMethod, PreparedRequest};

/// Resource families exposed by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Organisations,
    Persons,
    Placements,
    Duties,
    Groups,
    Programmes,
    StudyPlans,
    Syllabuses,
    SchoolUnitOfferings,
    Activities,
    CalendarEvents,
    Attendances,
    AttendanceEvents,
    AttendanceSchedules,
    Grades,
    Absences,
    AggregatedAttendance,
    Resources,
    Rooms,
    Subscriptions,
    DeletedEntities,
    Log,
    Statistics,
}

impl Resource {
    pub const ALL: [Self; 23] = [
        Self::Organisations,
        Self::Persons,
        Self::Placements,
        Self::Duties,
        Self::Groups,
        Self::Programmes,
        Self::StudyPlans,
        Self::Syllabuses,
        Self::SchoolUnitOfferings,
        Self::Activities,
        Self::CalendarEvents,
        Self::Attendances,
        Self::AttendanceEvents,
        Self::AttendanceSchedules,
        Self::Grades,
        Self::Absences,
        Self::AggregatedAttendance,
        Self::Resources,
        Self::Rooms,
        Self::Subscriptions,
        Self::DeletedEntities,
        Self::Log,
        Self::Statistics,
    ];

    /// Collection path segment, without leading slash.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Organisations => "organisations",
            Self::Persons => "persons",
            Self::Placements => "placements",
            Self::Duties => "duties",
            Self::Groups => "groups",
            Self::Programmes => "programmes",
            Self::StudyPlans => "studyplans",
            Self::Syllabuses => "syllabuses",
            Self::SchoolUnitOfferings => "schoolUnitOfferings",
            Self::Activities => "activities",
            Self::CalendarEvents => "calendarEvents",
            Self::Attendances => "attendances",
            Self::AttendanceEvents => "attendanceEvents",
            Self::AttendanceSchedules => "attendanceSchedules",
            Self::Grades => "grades",
            Self::Absences => "absences",
            Self::AggregatedAttendance => "aggregatedAttendance",
            Self::Resources => "resources",
            Self::Rooms => "rooms",
            Self::Subscriptions => "subscriptions",
            Self::DeletedEntities => "deletedEntities",
            Self::Log => "log",
            Self::Statistics => "statistics",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// What an operation does with its resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Filtered, paginated `GET` on the collection.
    List,
    /// `GET` of one entity by id.
    Get,
    /// Bulk fetch by id list via `POST .../lookup`.
    Lookup,
    Create,
    Update,
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Lookup => "lookup",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Metadata for one API operation.
#[derive(Clone, Copy, Debug)]
pub struct OperationDefinition {
    /// Stable operation identifier, for example `getOrganisations`.
    pub operation_id: &'static str,
    pub resource: Resource,
    pub kind: OperationKind,
    pub method: HttpMethod,
    /// Path template, potentially containing `{param}` placeholders.
    pub path_template: &'static str,
    /// Required path parameter names appearing in `path_template`.
    pub path_params: &'static [&'static str],
    /// Accepted query parameters, in emission order.
    pub query: &'static [ParamGroup],
    /// Whether the operation sends a JSON body.
    pub takes_body: bool,
}

const ID: &[&str] = &["id"];
const NO_QUERY: &[ParamGroup] = &[];

impl OperationDefinition {
    const fn list(
        resource: Resource,
        operation_id: &'static str,
        path_template: &'static str,
        query: &'static [ParamGroup],
    ) -> Self {
        Self {
            operation_id,
            resource,
            kind: OperationKind::List,
            method: HttpMethod::Get,
            path_template,
            path_params: &[],
            query,
            takes_body: false,
        }
    }

    const fn get(
        resource: Resource,
        operation_id: &'static str,
        path_template: &'static str,
        query: &'static [ParamGroup],
    ) -> Self {
        Self {
            operation_id,
            resource,
            kind: OperationKind::Get,
            method: HttpMethod::Get,
            path_template,
            path_params: ID,
            query,
            takes_body: false,
        }
    }

    const fn lookup(
        resource: Resource,
        operation_id: &'static str,
        path_template: &'static str,
        query: &'static [ParamGroup],
    ) -> Self {
        Self {
            operation_id,
            resource,
            kind: OperationKind::Lookup,
            method: HttpMethod::Post,
            path_template,
            path_params: &[],
            query,
            takes_body: true,
        }
    }

    const fn create(
        resource: Resource,
        operation_id: &'static str,
        path_template: &'static str,
    ) -> Self {
        Self {
            operation_id,
            resource,
            kind: OperationKind::Create,
            method: HttpMethod::Post,
            path_template,
            path_params: &[],
            query: NO_QUERY,
            takes_body: true,
        }
    }

    const fn update(
        resource: Resource,
        operation_id: &'static str,
        path_template: &'static str,
    ) -> Self {
        Self {
            operation_id,
            resource,
            kind: OperationKind::Update,
            method: HttpMethod::Patch,
            path_template,
            path_params: ID,
            query: NO_QUERY,
            takes_body: true,
        }
    }

    const fn delete(
        resource: Resource,
        operation_id: &'static str,
        path_template: &'static str,
    ) -> Self {
        Self {
            operation_id,
            resource,
            kind: OperationKind::Delete,
            method: HttpMethod::Delete,
            path_template,
            path_params: ID,
            query: NO_QUERY,
            takes_body: false,
        }
    }

    /// All accepted query parameters, in emission order.
    pub fn params(&self) -> impl Iterator<Item = &'static Param> {
        flatten(self.query)
    }

    /// Builds the request for this operation.
    ///
    /// `params` is a flat JSON object keyed by caller-facing names (or `null`).
    pub fn prepare(
        &self,
        path_params: &[(&str, &str)],
        params: &Value,
        body: Option<Value>,
    ) -> Result<PreparedRequest, ClientError> {
        let path = render_path(self, path_params)?;
        let query = encode_query(self.operation_id, self.query, params)?;
        let request = PreparedRequest::new(self.method, path).with_query(query);

        match (self.takes_body, body) {
            (true, Some(body)) => Ok(request.with_body(body)),
            (false, None) => Ok(request),
            (true, None) => Err(ClientError::MissingBody {
                operation_id: self.operation_id.to_owned(),
            }),
            (false, Some(_)) => Err(ClientError::UnexpectedBody {
                operation_id: self.operation_id.to_owned(),
            }),
        }
    }
}

const ORGANISATION_FILTERS: ParamGroup = &[
    Param::same("parent"),
    Param::same("schoolUnitCode"),
    Param::same("organisationCode"),
    Param::same("municipalityCode"),
    Param::same("type"),
    Param::same("schoolTypes"),
];

const PERSON_FILTERS: ParamGroup = &[
    Param::same("nameContains"),
    Param::same("civicNo"),
    Param::same("eduPersonPrincipalName"),
    Param::new("identifierValue", "identifier.value"),
    Param::new("identifierContext", "identifier.context"),
    Param::new("relationshipEntityType", "relationship.entity.type"),
    Param::new("relationshipOrganisation", "relationship.organisation"),
    Param::new(
        "relationshipStartDateOnOrBefore",
        "relationship.startDate.onOrBefore",
    ),
    Param::new(
        "relationshipStartDateOnOrAfter",
        "relationship.startDate.onOrAfter",
    ),
    Param::new(
        "relationshipEndDateOnOrBefore",
        "relationship.endDate.onOrBefore",
    ),
    Param::new(
        "relationshipEndDateOnOrAfter",
        "relationship.endDate.onOrAfter",
    ),
];

const PLACEMENT_FILTERS: ParamGroup = &[
    Param::same("organisation"),
    Param::same("group"),
    Param::same("child"),
    Param::same("owner"),
];

const DUTY_FILTERS: ParamGroup = &[
    Param::same("organisation"),
    Param::same("dutyRole"),
    Param::same("person"),
];

const GROUP_FILTERS: ParamGroup = &[
    Param::same("groupType"),
    Param::same("schoolTypes"),
    Param::same("organisation"),
];

const PROGRAMME_FILTERS: ParamGroup = &[
    Param::same("schoolType"),
    Param::same("code"),
    Param::same("parentProgramme"),
];

const STUDY_PLAN_FILTERS: ParamGroup = &[Param::same("student")];

const ORGANISATION_SCOPE: ParamGroup = &[Param::same("organisation")];

const ACTIVITY_FILTERS: ParamGroup = &[
    Param::same("member"),
    Param::same("teacher"),
    Param::same("organisation"),
    Param::same("group"),
];

const CALENDAR_EVENT_FILTERS: ParamGroup = &[
    Param::same("activity"),
    Param::same("student"),
    Param::same("teacher"),
    Param::same("organisation"),
    Param::same("group"),
];

const ATTENDANCE_FILTERS: ParamGroup = &[
    Param::same("student"),
    Param::same("organisation"),
    Param::same("calendarEvent"),
];

const ATTENDANCE_EVENT_FILTERS: ParamGroup = &[Param::same("group"), Param::same("person")];

const ATTENDANCE_SCHEDULE_FILTERS: ParamGroup = &[Param::same("placement"), Param::same("group")];

const GRADE_FILTERS: ParamGroup = &[
    Param::same("organisation"),
    Param::same("student"),
    Param::same("registeredBy"),
    Param::same("gradingTeacher"),
    Param::new("registeredDateOnOrAfter", "registeredDate.onOrAfter"),
    Param::new("registeredDateOnOrBefore", "registeredDate.onOrBefore"),
];

const ABSENCE_FILTERS: ParamGroup = &[
    Param::same("organisation"),
    Param::same("student"),
    Param::same("registeredBy"),
    Param::same("type"),
];

const AGGREGATED_ATTENDANCE_FILTERS: ParamGroup = &[
    Param::same("startDate"),
    Param::same("endDate"),
    Param::same("organisation"),
    Param::same("schoolType"),
    Param::same("student"),
];

const DELETED_ENTITY_FILTERS: ParamGroup = &[Param::same("after"), Param::same("entities")];

const NAMES_ONLY: &[ParamGroup] = &[REFERENCE_NAMES];
const EXPANDABLE: &[ParamGroup] = &[EXPAND, REFERENCE_NAMES];

use OperationDefinition as Op;
use Resource as R;

static OPERATIONS: &[OperationDefinition] = &[
    Op::list(
        R::Organisations,
        "getOrganisations",
        "/organisations",
        &[ORGANISATION_FILTERS, DATE_RANGE, META, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Organisations, "getOrganisationById", "/organisations/{id}", NAMES_ONLY),
    Op::lookup(R::Organisations, "lookupOrganisations", "/organisations/lookup", NAMES_ONLY),
    Op::list(
        R::Persons,
        "getPersons",
        "/persons",
        &[PERSON_FILTERS, META, EXPAND, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Persons, "getPersonById", "/persons/{id}", EXPANDABLE),
    Op::lookup(R::Persons, "lookupPersons", "/persons/lookup", EXPANDABLE),
    Op::list(
        R::Placements,
        "getPlacements",
        "/placements",
        &[PLACEMENT_FILTERS, DATE_RANGE, META, EXPAND, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Placements, "getPlacementById", "/placements/{id}", EXPANDABLE),
    Op::lookup(R::Placements, "lookupPlacements", "/placements/lookup", EXPANDABLE),
    Op::list(
        R::Duties,
        "getDuties",
        "/duties",
        &[DUTY_FILTERS, DATE_RANGE, META, EXPAND, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Duties, "getDutyById", "/duties/{id}", EXPANDABLE),
    Op::lookup(R::Duties, "lookupDuties", "/duties/lookup", EXPANDABLE),
    Op::list(
        R::Groups,
        "getGroups",
        "/groups",
        &[GROUP_FILTERS, DATE_RANGE, META, EXPAND, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Groups, "getGroupById", "/groups/{id}", EXPANDABLE),
    Op::lookup(R::Groups, "lookupGroups", "/groups/lookup", EXPANDABLE),
    Op::list(
        R::Programmes,
        "getProgrammes",
        "/programmes",
        &[PROGRAMME_FILTERS, META, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Programmes, "getProgrammeById", "/programmes/{id}", NAMES_ONLY),
    Op::lookup(R::Programmes, "lookupProgrammes", "/programmes/lookup", NAMES_ONLY),
    Op::list(
        R::StudyPlans,
        "getStudyPlans",
        "/studyplans",
        &[STUDY_PLAN_FILTERS, DATE_RANGE, META, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::StudyPlans, "getStudyPlanById", "/studyplans/{id}", NAMES_ONLY),
    Op::lookup(R::StudyPlans, "lookupStudyPlans", "/studyplans/lookup", NAMES_ONLY),
    Op::list(
        R::Syllabuses,
        "getSyllabuses",
        "/syllabuses",
        &[META, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Syllabuses, "getSyllabusById", "/syllabuses/{id}", NAMES_ONLY),
    Op::lookup(R::Syllabuses, "lookupSyllabuses", "/syllabuses/lookup", NAMES_ONLY),
    Op::list(
        R::SchoolUnitOfferings,
        "getSchoolUnitOfferings",
        "/schoolUnitOfferings",
        &[ORGANISATION_SCOPE, META, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(
        R::SchoolUnitOfferings,
        "getSchoolUnitOfferingById",
        "/schoolUnitOfferings/{id}",
        NAMES_ONLY,
    ),
    Op::lookup(
        R::SchoolUnitOfferings,
        "lookupSchoolUnitOfferings",
        "/schoolUnitOfferings/lookup",
        NAMES_ONLY,
    ),
    Op::list(
        R::Activities,
        "getActivities",
        "/activities",
        &[ACTIVITY_FILTERS, DATE_RANGE, META, EXPAND, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Activities, "getActivityById", "/activities/{id}", EXPANDABLE),
    Op::lookup(R::Activities, "lookupActivities", "/activities/lookup", EXPANDABLE),
    Op::list(
        R::CalendarEvents,
        "getCalendarEvents",
        "/calendarEvents",
        &[CALENDAR_EVENT_FILTERS, TIME_RANGE, META, EXPAND, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::CalendarEvents, "getCalendarEventById", "/calendarEvents/{id}", EXPANDABLE),
    Op::lookup(R::CalendarEvents, "lookupCalendarEvents", "/calendarEvents/lookup", EXPANDABLE),
    Op::list(
        R::Attendances,
        "getAttendances",
        "/attendances",
        &[ATTENDANCE_FILTERS, META, REFERENCE_NAMES, PAGING],
    ),
    Op::get(R::Attendances, "getAttendanceById", "/attendances/{id}", NAMES_ONLY),
    Op::lookup(R::Attendances, "lookupAttendances", "/attendances/lookup", NAMES_ONLY),
    Op::create(R::Attendances, "createAttendance", "/attendances"),
    Op::delete(R::Attendances, "deleteAttendance", "/attendances/{id}"),
    Op::list(
        R::AttendanceEvents,
        "getAttendanceEvents",
        "/attendanceEvents",
        &[ATTENDANCE_EVENT_FILTERS, META, EXPAND, REFERENCE_NAMES, PAGING],
    ),
    Op::get(R::AttendanceEvents, "getAttendanceEventById", "/attendanceEvents/{id}", EXPANDABLE),
    Op::lookup(
        R::AttendanceEvents,
        "lookupAttendanceEvents",
        "/attendanceEvents/lookup",
        EXPANDABLE,
    ),
    Op::create(R::AttendanceEvents, "createAttendanceEvent", "/attendanceEvents"),
    Op::delete(R::AttendanceEvents, "deleteAttendanceEvent", "/attendanceEvents/{id}"),
    Op::list(
        R::AttendanceSchedules,
        "getAttendanceSchedules",
        "/attendanceSchedules",
        &[ATTENDANCE_SCHEDULE_FILTERS, META, REFERENCE_NAMES, PAGING],
    ),
    Op::get(
        R::AttendanceSchedules,
        "getAttendanceScheduleById",
        "/attendanceSchedules/{id}",
        NAMES_ONLY,
    ),
    Op::lookup(
        R::AttendanceSchedules,
        "lookupAttendanceSchedules",
        "/attendanceSchedules/lookup",
        NAMES_ONLY,
    ),
    Op::create(R::AttendanceSchedules, "createAttendanceSchedule", "/attendanceSchedules"),
    Op::delete(R::AttendanceSchedules, "deleteAttendanceSchedule", "/attendanceSchedules/{id}"),
    Op::list(
        R::Grades,
        "getGrades",
        "/grades",
        &[GRADE_FILTERS, META, EXPAND, REFERENCE_NAMES, PAGING],
    ),
    Op::get(R::Grades, "getGradeById", "/grades/{id}", EXPANDABLE),
    Op::lookup(R::Grades, "lookupGrades", "/grades/lookup", EXPANDABLE),
    Op::list(
        R::Absences,
        "getAbsences",
        "/absences",
        &[ABSENCE_FILTERS, TIME_RANGE, META, REFERENCE_NAMES, PAGING],
    ),
    Op::get(R::Absences, "getAbsenceById", "/absences/{id}", NAMES_ONLY),
    Op::lookup(R::Absences, "lookupAbsences", "/absences/lookup", NAMES_ONLY),
    Op::create(R::Absences, "createAbsence", "/absences"),
    Op::list(
        R::AggregatedAttendance,
        "getAggregatedAttendance",
        "/aggregatedAttendance",
        &[AGGREGATED_ATTENDANCE_FILTERS, EXPAND, REFERENCE_NAMES, PAGING],
    ),
    Op::list(
        R::Resources,
        "getResources",
        "/resources",
        &[ORGANISATION_SCOPE, META, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Resources, "getResourceById", "/resources/{id}", NAMES_ONLY),
    Op::lookup(R::Resources, "lookupResources", "/resources/lookup", NAMES_ONLY),
    Op::list(
        R::Rooms,
        "getRooms",
        "/rooms",
        &[ORGANISATION_SCOPE, META, REFERENCE_NAMES, SORTKEY, PAGING],
    ),
    Op::get(R::Rooms, "getRoomById", "/rooms/{id}", NAMES_ONLY),
    Op::lookup(R::Rooms, "lookupRooms", "/rooms/lookup", NAMES_ONLY),
    Op::list(R::Subscriptions, "getSubscriptions", "/subscriptions", &[PAGING]),
    Op::get(R::Subscriptions, "getSubscriptionById", "/subscriptions/{id}", NO_QUERY),
    Op::create(R::Subscriptions, "createSubscription", "/subscriptions"),
    Op::update(R::Subscriptions, "updateSubscription", "/subscriptions/{id}"),
    Op::delete(R::Subscriptions, "deleteSubscription", "/subscriptions/{id}"),
    Op::list(
        R::DeletedEntities,
        "getDeletedEntities",
        "/deletedEntities",
        &[DELETED_ENTITY_FILTERS, PAGING],
    ),
    Op::create(R::Log, "createLogEntry", "/log"),
    Op::create(R::Statistics, "createStatistics", "/statistics"),
];

/// Returns every operation in the table.
pub fn operations() -> &'static [OperationDefinition] {
    OPERATIONS
}

/// Looks up an operation by its id.
pub fn find_operation(operation_id: &str) -> Result<&'static OperationDefinition, ClientError> {
    OPERATIONS
        .iter()
        .find(|op| op.operation_id == operation_id)
        .ok_or_else(|| ClientError::UnknownOperation(operation_id.to_owned()))
}

/// Looks up the operation of `kind` for `resource`.
pub fn find_resource_operation(
    resource: Resource,
    kind: OperationKind,
) -> Result<&'static OperationDefinition, ClientError> {
    OPERATIONS
        .iter()
        .find(|op| op.resource == resource && op.kind == kind)
        .ok_or(ClientError::UnsupportedOperation { resource, kind })
}

/// Builds the request for `operation_id` without sending it.
pub fn prepare(
    operation_id: &str,
    path_params: &[(&str, &str)],
    params: &Value,
    body: Option<Value>,
) -> Result<PreparedRequest, ClientError> {
    find_operation(operation_id)?.prepare(path_params, params, body)
}

fn render_path(
    operation: &OperationDefinition,
    path_params: &[(&str, &str)],
) -> Result<String, ClientError> {
    let mut rendered = operation.path_template.to_owned();

    for required_param in operation.path_params {
        let value = path_params
            .iter()
            .find(|(name, _)| name == required_param)
            .map(|(_, value)| *value)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ClientError::MissingPathParameter {
                operation_id: operation.operation_id.to_owned(),
                parameter: (*required_param).to_owned(),
            })?;

        // URL joining collapses dot segments, so `.` or `..` would address another resource.
        if matches!(value, "." | "..") {
            return Err(ClientError::InvalidParameter {
                operation_id: operation.operation_id.to_owned(),
                parameter: (*required_param).to_owned(),
                reason: format!("`{value}` is not a valid path segment"),
            });
        }

        let placeholder = format!("{{{required_param}}}");
        rendered = rendered.replace(&placeholder, &encode_path_segment(value));
    }

    Ok(rendered)
}

fn encode_path_segment(value: &str) -> String {
    // Form encoding writes spaces as '+', which a path would keep literally.
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::{
        OperationKind, Resource, find_operation, find_resource_operation, operations, prepare,
        render_path,
    };
    use crate::{ClientError, HttpMethod};

    #[test]
    fn operation_ids_are_unique() {
        let mut seen = HashSet::new();
        for op in operations() {
            assert!(seen.insert(op.operation_id), "duplicate {}", op.operation_id);
        }
    }

    #[test]
    fn wire_and_caller_keys_are_unique_per_operation() {
        for op in operations() {
            let mut wire = HashSet::new();
            let mut caller = HashSet::new();
            for param in op.params() {
                assert!(wire.insert(param.wire), "{}: {}", op.operation_id, param.wire);
                assert!(caller.insert(param.name), "{}: {}", op.operation_id, param.name);
                assert!(!param.name.contains('.'), "caller keys are flat");
            }
        }
    }

    #[test]
    fn path_params_match_template_placeholders() {
        for op in operations() {
            let placeholders = op.path_template.matches('{').count();
            assert_eq!(placeholders, op.path_params.len(), "{}", op.operation_id);
            for name in op.path_params {
                assert!(op.path_template.contains(&format!("{{{name}}}")));
            }
            assert!(
                op.path_template
                    .starts_with(&format!("/{}", op.resource.segment())),
                "{}",
                op.operation_id
            );
        }
    }

    #[test]
    fn at_most_one_operation_per_resource_and_kind() {
        let mut seen = HashSet::new();
        for op in operations() {
            assert!(seen.insert((op.resource, op.kind)), "{}", op.operation_id);
        }
        for resource in Resource::ALL {
            assert!(
                operations().iter().any(|op| op.resource == resource),
                "{resource} has no operations"
            );
        }
    }

    #[test]
    fn lookups_are_posts_without_paging() {
        for op in operations().iter().filter(|op| op.kind == OperationKind::Lookup) {
            assert_eq!(op.method, HttpMethod::Post);
            assert!(op.takes_body);
            assert!(op.path_template.ends_with("/lookup"));
            for param in op.params() {
                assert!(
                    ["expand", "expandReferenceNames"].contains(&param.wire),
                    "{} accepts {}",
                    op.operation_id,
                    param.wire
                );
            }
        }
    }

    #[test]
    fn render_path_replaces_required_path_params() {
        let op = find_operation("getOrganisationById").expect("operation exists");
        let path = render_path(op, &[("id", "org-1")]).expect("path renders");
        assert_eq!(path, "/organisations/org-1");

        let path = render_path(op, &[("id", "a b/c")]).expect("path renders");
        assert_eq!(path, "/organisations/a%20b%2Fc");
    }

    #[test]
    fn render_path_reports_missing_or_empty_parameter() {
        let op = find_operation("getOrganisationById").expect("operation exists");
        for params in [&[][..], &[("id", "")][..], &[("id", "  ")][..]] {
            let error = render_path(op, params).expect_err("missing parameter should error");
            match error {
                ClientError::MissingPathParameter {
                    operation_id,
                    parameter,
                } => {
                    assert_eq!(operation_id, "getOrganisationById");
                    assert_eq!(parameter, "id");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn render_path_rejects_dot_segments() {
        for operation_id in ["getOrganisationById", "deleteSubscription"] {
            let op = find_operation(operation_id).expect("operation exists");
            for id in [".", ".."] {
                let error = render_path(op, &[("id", id)]).expect_err("dot segment should error");
                assert!(matches!(
                    error,
                    ClientError::InvalidParameter { ref parameter, .. } if parameter == "id"
                ));
            }
        }

        let op = find_operation("getOrganisationById").expect("operation exists");
        let path = render_path(op, &[("id", "...")]).expect("path renders");
        assert_eq!(path, "/organisations/...");
    }

    #[test]
    fn list_with_limit_only() {
        let request =
            prepare("getOrganisations", &[], &json!({"limit": 5}), None).expect("request builds");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/organisations");
        assert_eq!(request.encoded_query(), "limit=5");
        assert!(request.body.is_none());
    }

    #[test]
    fn persons_scenario_repeats_array_keys() {
        let request = prepare(
            "getPersons",
            &[],
            &json!({
                "nameContains": ["Anna"],
                "limit": 10,
                "expandReferenceNames": true,
            }),
            None,
        )
        .expect("request builds");

        let mut pairs = request.query.clone();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("expandReferenceNames".to_owned(), "true".to_owned()),
                ("limit".to_owned(), "10".to_owned()),
                ("nameContains".to_owned(), "Anna".to_owned()),
            ]
        );
    }

    #[test]
    fn dotted_wire_keys_are_emitted_verbatim() {
        let request = prepare(
            "getPersons",
            &[],
            &json!({
                "metaModifiedAfter": "2024-01-01T00:00:00Z",
                "relationshipStartDateOnOrAfter": "2024-08-01",
            }),
            None,
        )
        .expect("request builds");
        assert_eq!(
            request.query_values("meta.modified.after"),
            ["2024-01-01T00:00:00Z"]
        );
        assert_eq!(
            request.query_values("relationship.startDate.onOrAfter"),
            ["2024-08-01"]
        );
    }

    #[test]
    fn lookup_splits_body_and_query() {
        let request = prepare(
            "lookupPersons",
            &[],
            &json!({"expand": ["duties"], "expandReferenceNames": true}),
            Some(json!({"ids": ["p1", "p2"]})),
        )
        .expect("request builds");

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/persons/lookup");
        assert_eq!(request.body, Some(json!({"ids": ["p1", "p2"]})));
        assert_eq!(
            request.encoded_query(),
            "expand=duties&expandReferenceNames=true"
        );
    }

    #[test]
    fn lookup_rejects_list_only_parameters() {
        let error = prepare(
            "lookupOrganisations",
            &[],
            &json!({"limit": 5}),
            Some(json!({"ids": ["o1"]})),
        )
        .expect_err("limit is not a lookup parameter");
        assert!(matches!(error, ClientError::UnknownParameter { .. }));
    }

    #[test]
    fn preparation_is_deterministic() {
        let params = json!({
            "nameContains": ["Anna", "Bo"],
            "metaCreatedBefore": "2024-05-01",
            "sortkey": "DisplayNameAsc",
            "pageToken": "opaque==",
        });
        let first = prepare("getPersons", &[], &params, None).expect("request builds");
        let second = prepare("getPersons", &[], &params, None).expect("request builds");
        assert_eq!(first, second);
        assert_eq!(first.encoded_query(), second.encoded_query());
    }

    #[test]
    fn body_presence_is_checked() {
        let error = prepare("createSubscription", &[], &json!(null), None)
            .expect_err("body is required");
        assert!(matches!(error, ClientError::MissingBody { .. }));

        let error = prepare("getOrganisations", &[], &json!(null), Some(json!({})))
            .expect_err("body is not accepted");
        assert!(matches!(error, ClientError::UnexpectedBody { .. }));
    }

    #[test]
    fn write_endpoints_use_expected_verbs() {
        let update = prepare(
            "updateSubscription",
            &[("id", "sub-1")],
            &json!(null),
            Some(json!({"expires": "2025-01-01T00:00:00Z"})),
        )
        .expect("request builds");
        assert_eq!(update.method, HttpMethod::Patch);
        assert_eq!(update.path, "/subscriptions/sub-1");

        let delete = prepare("deleteAttendance", &[("id", "a-1")], &json!(null), None)
            .expect("request builds");
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.path, "/attendances/a-1");
    }

    #[test]
    fn unsupported_resource_operation_is_reported() {
        let error = find_resource_operation(Resource::Syllabuses, OperationKind::Delete)
            .expect_err("syllabuses are read-only");
        assert!(matches!(
            error,
            ClientError::UnsupportedOperation {
                resource: Resource::Syllabuses,
                kind: OperationKind::Delete
            }
        ));
        assert!(find_resource_operation(Resource::Statistics, OperationKind::Create).is_ok());
    }

    #[test]
    fn unknown_operation_is_reported() {
        let error = find_operation("getUnicorns").expect_err("no such operation");
        assert!(matches!(error, ClientError::UnknownOperation(_)));
    }
}
