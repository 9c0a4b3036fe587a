use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::queries::{
    AbsencesQuery, ActivitiesQuery, AggregatedAttendanceQuery, AttendanceEventsQuery,
    AttendanceSchedulesQuery, AttendancesQuery, CalendarEventsQuery, DeletedEntitiesQuery,
    DutiesQuery, GradesQuery, GroupsQuery, IdsLookup, ItemOptions, OrganisationScopedQuery,
    OrganisationsLookup, OrganisationsQuery, Paging, PersonsLookup, PersonsQuery,
    PlacementsQuery, ProgrammesQuery, StudyPlansQuery, SubscriptionUpdate, SyllabusesQuery,
};
use crate::{
    ApiClient, BlockingApiClient, ClientConfig, ClientError, Diagnostic, OperationKind,
    PreparedRequest, Resource, find_operation, find_resource_operation,
};

/// Builds a filtered list request for `resource`.
pub fn list_request(
    resource: Resource,
    query: &impl Serialize,
) -> Result<PreparedRequest, ClientError> {
    let params = serde_json::to_value(query)?;
    find_resource_operation(resource, OperationKind::List)?.prepare(&[], &params, None)
}

/// Builds a get-by-id request for `resource`.
pub fn get_request(
    resource: Resource,
    id: &str,
    options: &ItemOptions,
) -> Result<PreparedRequest, ClientError> {
    let params = serde_json::to_value(options)?;
    find_resource_operation(resource, OperationKind::Get)?.prepare(&[("id", id)], &params, None)
}

/// Builds a bulk lookup: selectors go in the body, `options` in the query.
pub fn lookup_request(
    resource: Resource,
    selection: &impl Serialize,
    options: &ItemOptions,
) -> Result<PreparedRequest, ClientError> {
    let params = serde_json::to_value(options)?;
    let body = serde_json::to_value(selection)?;
    find_resource_operation(resource, OperationKind::Lookup)?.prepare(&[], &params, Some(body))
}

pub fn create_request(
    resource: Resource,
    body: &impl Serialize,
) -> Result<PreparedRequest, ClientError> {
    let body = serde_json::to_value(body)?;
    find_resource_operation(resource, OperationKind::Create)?.prepare(
        &[],
        &Value::Null,
        Some(body),
    )
}

pub fn update_request(
    resource: Resource,
    id: &str,
    body: &impl Serialize,
) -> Result<PreparedRequest, ClientError> {
    let body = serde_json::to_value(body)?;
    find_resource_operation(resource, OperationKind::Update)?.prepare(
        &[("id", id)],
        &Value::Null,
        Some(body),
    )
}

pub fn delete_request(resource: Resource, id: &str) -> Result<PreparedRequest, ClientError> {
    find_resource_operation(resource, OperationKind::Delete)?.prepare(
        &[("id", id)],
        &Value::Null,
        None,
    )
}

/// Async SS12000 API client.
///
/// Every method is a thin wrapper that builds a [`PreparedRequest`] from the
/// operation table and hands it to [`ApiClient`]. Responses are returned as
/// parsed JSON, unchanged.
#[derive(Clone, Debug)]
pub struct Ss12000Client {
    inner: ApiClient,
}

impl Ss12000Client {
    /// Creates a client with an explicit base URL and no access token.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            inner: ApiClient::from_config(config)?,
        })
    }

    /// Creates a client from `SS12000_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    /// Underlying transport client.
    pub fn transport(&self) -> &ApiClient {
        &self.inner
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.inner.diagnostics()
    }

    pub async fn send(&self, request: &PreparedRequest) -> Result<Value, ClientError> {
        self.inner.send(request).await
    }

    pub async fn send_with_timeout(
        &self,
        request: &PreparedRequest,
        timeout: Duration,
    ) -> Result<Value, ClientError> {
        self.inner.send_with_timeout(request, timeout).await
    }

    /// Calls an endpoint by operation id with a flat JSON object of caller parameters.
    ///
    /// `path_params` replaces `{param}` segments in the operation path template.
    /// Missing required parameters return [`ClientError::MissingPathParameter`].
    pub async fn call_operation(
        &self,
        operation_id: &str,
        path_params: &[(&str, &str)],
        params: &Value,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let request = find_operation(operation_id)?.prepare(path_params, params, body)?;
        self.send(&request).await
    }

    pub async fn list(
        &self,
        resource: Resource,
        query: &impl Serialize,
    ) -> Result<Value, ClientError> {
        self.send(&list_request(resource, query)?).await
    }

    pub async fn get(
        &self,
        resource: Resource,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.send(&get_request(resource, id, options)?).await
    }

    pub async fn lookup(
        &self,
        resource: Resource,
        selection: &impl Serialize,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.send(&lookup_request(resource, selection, options)?).await
    }

    pub async fn create(
        &self,
        resource: Resource,
        body: &impl Serialize,
    ) -> Result<Value, ClientError> {
        self.send(&create_request(resource, body)?).await
    }

    pub async fn update(
        &self,
        resource: Resource,
        id: &str,
        body: &impl Serialize,
    ) -> Result<Value, ClientError> {
        self.send(&update_request(resource, id, body)?).await
    }

    /// Deletes one entity. `204 No Content` is success.
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<(), ClientError> {
        self.send(&delete_request(resource, id)?).await?;
        Ok(())
    }

    // Organisations

    pub async fn get_organisations(
        &self,
        query: &OrganisationsQuery,
    ) -> Result<Value, ClientError> {
        self.list(Resource::Organisations, query).await
    }

    pub async fn get_organisation_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Organisations, id, options).await
    }

    pub async fn lookup_organisations(
        &self,
        selection: &OrganisationsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Organisations, selection, options).await
    }

    // Persons

    pub async fn get_persons(&self, query: &PersonsQuery) -> Result<Value, ClientError> {
        self.list(Resource::Persons, query).await
    }

    pub async fn get_person_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Persons, id, options).await
    }

    pub async fn lookup_persons(
        &self,
        selection: &PersonsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Persons, selection, options).await
    }

    // Placements

    pub async fn get_placements(&self, query: &PlacementsQuery) -> Result<Value, ClientError> {
        self.list(Resource::Placements, query).await
    }

    pub async fn get_placement_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Placements, id, options).await
    }

    pub async fn lookup_placements(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Placements, selection, options).await
    }

    // Duties

    pub async fn get_duties(&self, query: &DutiesQuery) -> Result<Value, ClientError> {
        self.list(Resource::Duties, query).await
    }

    pub async fn get_duty_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Duties, id, options).await
    }

    pub async fn lookup_duties(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Duties, selection, options).await
    }

    // Groups

    pub async fn get_groups(&self, query: &GroupsQuery) -> Result<Value, ClientError> {
        self.list(Resource::Groups, query).await
    }

    pub async fn get_group_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Groups, id, options).await
    }

    pub async fn lookup_groups(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Groups, selection, options).await
    }

    // Programmes

    pub async fn get_programmes(&self, query: &ProgrammesQuery) -> Result<Value, ClientError> {
        self.list(Resource::Programmes, query).await
    }

    pub async fn get_programme_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Programmes, id, options).await
    }

    pub async fn lookup_programmes(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Programmes, selection, options).await
    }

    // Study plans

    pub async fn get_study_plans(&self, query: &StudyPlansQuery) -> Result<Value, ClientError> {
        self.list(Resource::StudyPlans, query).await
    }

    pub async fn get_study_plan_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::StudyPlans, id, options).await
    }

    pub async fn lookup_study_plans(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::StudyPlans, selection, options).await
    }

    // Syllabuses

    pub async fn get_syllabuses(&self, query: &SyllabusesQuery) -> Result<Value, ClientError> {
        self.list(Resource::Syllabuses, query).await
    }

    pub async fn get_syllabus_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Syllabuses, id, options).await
    }

    pub async fn lookup_syllabuses(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Syllabuses, selection, options).await
    }

    // School unit offerings

    pub async fn get_school_unit_offerings(
        &self,
        query: &OrganisationScopedQuery,
    ) -> Result<Value, ClientError> {
        self.list(Resource::SchoolUnitOfferings, query).await
    }

    pub async fn get_school_unit_offering_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::SchoolUnitOfferings, id, options).await
    }

    pub async fn lookup_school_unit_offerings(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::SchoolUnitOfferings, selection, options)
            .await
    }

    // Activities

    pub async fn get_activities(&self, query: &ActivitiesQuery) -> Result<Value, ClientError> {
        self.list(Resource::Activities, query).await
    }

    pub async fn get_activity_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Activities, id, options).await
    }

    pub async fn lookup_activities(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Activities, selection, options).await
    }

    // Calendar events

    pub async fn get_calendar_events(
        &self,
        query: &CalendarEventsQuery,
    ) -> Result<Value, ClientError> {
        self.list(Resource::CalendarEvents, query).await
    }

    pub async fn get_calendar_event_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::CalendarEvents, id, options).await
    }

    pub async fn lookup_calendar_events(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::CalendarEvents, selection, options)
            .await
    }

    // Attendances

    pub async fn get_attendances(&self, query: &AttendancesQuery) -> Result<Value, ClientError> {
        self.list(Resource::Attendances, query).await
    }

    pub async fn get_attendance_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Attendances, id, options).await
    }

    pub async fn lookup_attendances(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Attendances, selection, options).await
    }

    pub async fn create_attendance(
        &self,
        attendance: &impl Serialize,
    ) -> Result<Value, ClientError> {
        self.create(Resource::Attendances, attendance).await
    }

    pub async fn delete_attendance(&self, id: &str) -> Result<(), ClientError> {
        self.delete(Resource::Attendances, id).await
    }

    // Attendance events

    pub async fn get_attendance_events(
        &self,
        query: &AttendanceEventsQuery,
    ) -> Result<Value, ClientError> {
        self.list(Resource::AttendanceEvents, query).await
    }

    pub async fn get_attendance_event_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::AttendanceEvents, id, options).await
    }

    pub async fn lookup_attendance_events(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::AttendanceEvents, selection, options)
            .await
    }

    pub async fn create_attendance_event(
        &self,
        event: &impl Serialize,
    ) -> Result<Value, ClientError> {
        self.create(Resource::AttendanceEvents, event).await
    }

    pub async fn delete_attendance_event(&self, id: &str) -> Result<(), ClientError> {
        self.delete(Resource::AttendanceEvents, id).await
    }

    // Attendance schedules

    pub async fn get_attendance_schedules(
        &self,
        query: &AttendanceSchedulesQuery,
    ) -> Result<Value, ClientError> {
        self.list(Resource::AttendanceSchedules, query).await
    }

    pub async fn get_attendance_schedule_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::AttendanceSchedules, id, options).await
    }

    pub async fn lookup_attendance_schedules(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::AttendanceSchedules, selection, options)
            .await
    }

    pub async fn create_attendance_schedule(
        &self,
        schedule: &impl Serialize,
    ) -> Result<Value, ClientError> {
        self.create(Resource::AttendanceSchedules, schedule).await
    }

    pub async fn delete_attendance_schedule(&self, id: &str) -> Result<(), ClientError> {
        self.delete(Resource::AttendanceSchedules, id).await
    }

    // Grades

    pub async fn get_grades(&self, query: &GradesQuery) -> Result<Value, ClientError> {
        self.list(Resource::Grades, query).await
    }

    pub async fn get_grade_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Grades, id, options).await
    }

    pub async fn lookup_grades(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Grades, selection, options).await
    }

    // Absences

    pub async fn get_absences(&self, query: &AbsencesQuery) -> Result<Value, ClientError> {
        self.list(Resource::Absences, query).await
    }

    pub async fn get_absence_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Absences, id, options).await
    }

    pub async fn lookup_absences(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Absences, selection, options).await
    }

    pub async fn create_absence(&self, absence: &impl Serialize) -> Result<Value, ClientError> {
        self.create(Resource::Absences, absence).await
    }

    // Aggregated attendance

    pub async fn get_aggregated_attendance(
        &self,
        query: &AggregatedAttendanceQuery,
    ) -> Result<Value, ClientError> {
        self.list(Resource::AggregatedAttendance, query).await
    }

    // Resources

    pub async fn get_resources(
        &self,
        query: &OrganisationScopedQuery,
    ) -> Result<Value, ClientError> {
        self.list(Resource::Resources, query).await
    }

    pub async fn get_resource_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Resources, id, options).await
    }

    pub async fn lookup_resources(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Resources, selection, options).await
    }

    // Rooms

    pub async fn get_rooms(&self, query: &OrganisationScopedQuery) -> Result<Value, ClientError> {
        self.list(Resource::Rooms, query).await
    }

    pub async fn get_room_by_id(
        &self,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.get(Resource::Rooms, id, options).await
    }

    pub async fn lookup_rooms(
        &self,
        selection: &IdsLookup,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.lookup(Resource::Rooms, selection, options).await
    }

    // Subscriptions

    pub async fn get_subscriptions(&self, paging: &Paging) -> Result<Value, ClientError> {
        self.list(Resource::Subscriptions, paging).await
    }

    pub async fn get_subscription_by_id(&self, id: &str) -> Result<Value, ClientError> {
        self.get(Resource::Subscriptions, id, &ItemOptions::default())
            .await
    }

    pub async fn create_subscription(
        &self,
        subscription: &impl Serialize,
    ) -> Result<Value, ClientError> {
        self.create(Resource::Subscriptions, subscription).await
    }

    /// Moves the expiry of an existing subscription.
    pub async fn update_subscription(
        &self,
        id: &str,
        update: &SubscriptionUpdate,
    ) -> Result<Value, ClientError> {
        self.update(Resource::Subscriptions, id, update).await
    }

    pub async fn delete_subscription(&self, id: &str) -> Result<(), ClientError> {
        self.delete(Resource::Subscriptions, id).await
    }

    // Reconciliation and ingestion

    /// Lists entities deleted after a point in time, for resynchronising a local copy.
    pub async fn get_deleted_entities(
        &self,
        query: &DeletedEntitiesQuery,
    ) -> Result<Value, ClientError> {
        self.list(Resource::DeletedEntities, query).await
    }

    /// Posts a log entry. The acknowledgment may be empty ([`Value::Null`]).
    pub async fn create_log_entry(&self, entry: &impl Serialize) -> Result<Value, ClientError> {
        self.create(Resource::Log, entry).await
    }

    /// Posts usage statistics. The acknowledgment may be empty ([`Value::Null`]).
    pub async fn create_statistics(
        &self,
        statistics: &impl Serialize,
    ) -> Result<Value, ClientError> {
        self.create(Resource::Statistics, statistics).await
    }
}

/// Blocking SS12000 API client.
///
/// This is the synchronous counterpart of [`Ss12000Client`], exposing the
/// generic resource methods.
#[derive(Debug)]
pub struct BlockingSs12000Client {
    inner: BlockingApiClient,
}

impl BlockingSs12000Client {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            inner: BlockingApiClient::from_config(config)?,
        })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn transport(&self) -> &BlockingApiClient {
        &self.inner
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.inner.diagnostics()
    }

    pub fn send(&self, request: &PreparedRequest) -> Result<Value, ClientError> {
        self.inner.send(request)
    }

    pub fn send_with_timeout(
        &self,
        request: &PreparedRequest,
        timeout: Duration,
    ) -> Result<Value, ClientError> {
        self.inner.send_with_timeout(request, timeout)
    }

    /// Calls an endpoint by operation id with a flat JSON object of caller parameters.
    pub fn call_operation(
        &self,
        operation_id: &str,
        path_params: &[(&str, &str)],
        params: &Value,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let request = find_operation(operation_id)?.prepare(path_params, params, body)?;
        self.send(&request)
    }

    pub fn list(&self, resource: Resource, query: &impl Serialize) -> Result<Value, ClientError> {
        self.send(&list_request(resource, query)?)
    }

    pub fn get(
        &self,
        resource: Resource,
        id: &str,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.send(&get_request(resource, id, options)?)
    }

    pub fn lookup(
        &self,
        resource: Resource,
        selection: &impl Serialize,
        options: &ItemOptions,
    ) -> Result<Value, ClientError> {
        self.send(&lookup_request(resource, selection, options)?)
    }

    pub fn create(&self, resource: Resource, body: &impl Serialize) -> Result<Value, ClientError> {
        self.send(&create_request(resource, body)?)
    }

    pub fn update(
        &self,
        resource: Resource,
        id: &str,
        body: &impl Serialize,
    ) -> Result<Value, ClientError> {
        self.send(&update_request(resource, id, body)?)
    }

    pub fn delete(&self, resource: Resource, id: &str) -> Result<(), ClientError> {
        self.send(&delete_request(resource, id)?)?;
        Ok(())
    }
}
