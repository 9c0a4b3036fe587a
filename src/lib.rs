//! Typed Rust client for the SS12000 educational data REST API.
//!
//! Public API layers:
//! - [`ApiClient`]/[`BlockingApiClient`]: generic JSON HTTP transports.
//! - [`Ss12000Client`]/[`BlockingSs12000Client`]: resource operations driven by
//!   the static operation table ([`operations`]).
//! - [`prepare`] and the `*_request` builders: request construction without I/O.
//! - [`ClientError`]: unified error type used by all clients.
//!
//! Caller parameters are always flat camelCase keys (`metaModifiedAfter`);
//! the operation table maps them to the dotted wire keys the API expects
//! (`meta.modified.after`).

mod blocking_client;
mod client;
mod config;
mod error;
mod operations;
mod params;
mod queries;
mod request;
mod session;
mod ss12000_client;

/// Generic blocking JSON REST client.
pub use blocking_client::BlockingApiClient;
/// Generic async JSON REST client.
pub use client::ApiClient;
pub use config::{
    ACCESS_TOKEN_ENV, BASE_URL_ENV, ClientConfig, Diagnostic, TIMEOUT_ENV, USER_AGENT,
};
/// Error type returned by all client operations.
pub use error::ClientError;
pub use operations::{
    OperationDefinition, OperationKind, Resource, find_operation, find_resource_operation,
    operations, prepare,
};
pub use params::{Param, ParamGroup, QueryValue};
pub use queries::{
    AbsencesQuery, ActivitiesQuery, AggregatedAttendanceQuery, AttendanceEventsQuery,
    AttendanceSchedulesQuery, AttendancesQuery, CalendarEventsQuery, DateRange,
    DeletedEntitiesQuery, DutiesQuery, GradesQuery, GroupsQuery, IdsLookup, ItemOptions,
    MetaFilter, OrganisationScopedQuery, OrganisationsLookup, OrganisationsQuery, Paging,
    PersonsLookup, PersonsQuery, PlacementsQuery, ProgrammesQuery, StudyPlansQuery,
    SubscriptionUpdate, SyllabusesQuery, TimeRange,
};
pub use request::{HttpMethod, PreparedRequest};
/// SS12000 resource clients and request builders.
///
/// See also [`Ss12000Client`] for the async variant.
pub use ss12000_client::{
    BlockingSs12000Client, Ss12000Client, create_request, delete_request, get_request,
    list_request, lookup_request, update_request,
};
