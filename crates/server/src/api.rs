//! HTTP surface for the back-office core: enquiry/quotation status
//! transitions, communication scheduling, and the derived worklist.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use enquire_core::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use enquire_core::config::AppConfig;
use enquire_core::domain::communication::{Communication, CommunicationId, CommunicationKind};
use enquire_core::domain::enquiry::{Enquiry, EnquiryId, EnquiryStatus};
use enquire_core::domain::quotation::{Quotation, QuotationId, QuotationStatus};
use enquire_core::domain::task::Task;
use enquire_core::errors::{ApplicationError, DomainError, EntityKind, InterfaceError};
use enquire_core::lifecycle::{EnquiryStatusMachine, QuotationStatusMachine, TransitionPayload};
use enquire_core::worklist::{
    CommunicationScheduler, NewCommunication, PriorityClassifier, PriorityConfig,
    TaskDerivationEngine,
};
use enquire_db::repositories::{
    CommunicationRepository, CustomerRepository, EnquiryRepository, QuotationRepository,
    RepositoryError, SqlCommunicationRepository, SqlCustomerRepository, SqlEnquiryRepository,
    SqlQuotationRepository,
};
use enquire_db::DbPool;

#[derive(Clone)]
pub struct ApiState {
    pub customers: Arc<dyn CustomerRepository>,
    pub enquiries: Arc<dyn EnquiryRepository>,
    pub quotations: Arc<dyn QuotationRepository>,
    pub communications: Arc<dyn CommunicationRepository>,
    pub engine: TaskDerivationEngine,
    pub audit: Arc<dyn AuditSink>,
}

impl ApiState {
    pub fn with_sqlite(pool: &DbPool, config: &AppConfig, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            customers: Arc::new(SqlCustomerRepository::new(pool.clone())),
            enquiries: Arc::new(SqlEnquiryRepository::new(pool.clone())),
            quotations: Arc::new(SqlQuotationRepository::new(pool.clone())),
            communications: Arc::new(SqlCommunicationRepository::new(pool.clone())),
            engine: TaskDerivationEngine::new(PriorityClassifier::new(PriorityConfig {
                due_soon_window_days: config.worklist.due_soon_window_days,
            })),
            audit,
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/enquiries", post(create_enquiry))
        .route("/enquiries/{id}", get(get_enquiry))
        .route("/enquiries/{id}/status", patch(update_enquiry_status))
        .route("/quotations", post(create_quotation))
        .route("/quotations/{id}", get(get_quotation))
        .route("/quotations/{id}/status", patch(update_quotation_status))
        .route("/communications", post(create_communication))
        .route("/communications/{id}/reschedule", post(reschedule_communication))
        .route("/tasks", get(upcoming_tasks))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateEnquiryRequest {
    company_ref: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateQuotationRequest {
    enquiry_ref: Uuid,
    total_value: Decimal,
    validity_period: NaiveDate,
    status: Option<QuotationStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TransitionRequest<S> {
    target: S,
    #[serde(default)]
    payload: TransitionPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateCommunicationRequest {
    enquiry_ref: Uuid,
    kind: CommunicationKind,
    description: String,
    next_communication_date: Option<NaiveDate>,
    proposed_next_action: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RescheduleRequest {
    next_communication_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: &'static str,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    correlation_id: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn from_application(error: ApplicationError, correlation_id: String) -> Self {
        let field = match &error {
            ApplicationError::Domain(domain) => domain.field(),
            _ => None,
        };
        let detail = error.to_string();
        let interface = error.into_interface(correlation_id.clone());
        let status = match &interface {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            body: ErrorBody { message: interface.user_message(), detail, field, correlation_id },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Per-request correlation scope; every failure path carries the same id so
/// log lines and the error body can be matched up.
struct RequestScope {
    correlation_id: String,
}

impl RequestScope {
    fn new() -> Self {
        Self { correlation_id: Uuid::new_v4().to_string() }
    }

    fn fail(&self, error: ApplicationError) -> ApiError {
        ApiError::from_application(error, self.correlation_id.clone())
    }

    fn domain(&self, error: DomainError) -> ApiError {
        self.fail(ApplicationError::Domain(error))
    }

    fn persistence(&self, error: RepositoryError) -> ApiError {
        self.fail(ApplicationError::Persistence(error.to_string()))
    }

    fn not_found(&self, kind: EntityKind, id: Uuid) -> ApiError {
        self.domain(DomainError::NotFound { kind, id: id.to_string() })
    }
}

async fn create_enquiry(
    State(state): State<ApiState>,
    Json(request): Json<CreateEnquiryRequest>,
) -> Result<(StatusCode, Json<Enquiry>), ApiError> {
    let scope = RequestScope::new();

    let customer = state
        .customers
        .find_by_id(&enquire_core::CustomerId(request.company_ref))
        .await
        .map_err(|error| scope.persistence(error))?
        .ok_or_else(|| scope.not_found(EntityKind::Customer, request.company_ref))?;

    let enquiry = Enquiry::new(customer.id);
    state.enquiries.save(enquiry.clone()).await.map_err(|error| scope.persistence(error))?;

    tracing::info!(
        event_name = "api.enquiry.created",
        correlation_id = %scope.correlation_id,
        enquiry_id = %enquiry.id.0,
        "enquiry created"
    );
    Ok((StatusCode::CREATED, Json(enquiry)))
}

async fn get_enquiry(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Enquiry>, ApiError> {
    let scope = RequestScope::new();
    let enquiry = state
        .enquiries
        .find_by_id(&EnquiryId(id))
        .await
        .map_err(|error| scope.persistence(error))?
        .ok_or_else(|| scope.not_found(EntityKind::Enquiry, id))?;
    Ok(Json(enquiry))
}

async fn update_enquiry_status(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest<EnquiryStatus>>,
) -> Result<Json<Enquiry>, ApiError> {
    let scope = RequestScope::new();

    let enquiry = state
        .enquiries
        .find_by_id(&EnquiryId(id))
        .await
        .map_err(|error| scope.persistence(error))?
        .ok_or_else(|| scope.not_found(EntityKind::Enquiry, id))?;

    let updated = EnquiryStatusMachine::apply_with_audit(
        &enquiry,
        request.target,
        &request.payload,
        state.audit.as_ref(),
        &AuditContext::new(Some(id.to_string()), scope.correlation_id.clone(), "api"),
    )
    .map_err(|error| scope.domain(error))?;

    state.enquiries.save(updated.clone()).await.map_err(|error| scope.persistence(error))?;

    tracing::info!(
        event_name = "api.enquiry.status_updated",
        correlation_id = %scope.correlation_id,
        enquiry_id = %id,
        from = enquiry.status.as_str(),
        to = updated.status.as_str(),
        "enquiry status transition applied"
    );
    Ok(Json(updated))
}

async fn create_quotation(
    State(state): State<ApiState>,
    Json(request): Json<CreateQuotationRequest>,
) -> Result<(StatusCode, Json<Quotation>), ApiError> {
    let scope = RequestScope::new();

    let enquiry = state
        .enquiries
        .find_by_id(&EnquiryId(request.enquiry_ref))
        .await
        .map_err(|error| scope.persistence(error))?
        .ok_or_else(|| scope.not_found(EntityKind::Enquiry, request.enquiry_ref))?;

    let mut quotation = Quotation::new(enquiry.id, request.total_value, request.validity_period);
    if let Some(status) = request.status {
        if !status.is_active() {
            return Err(scope.domain(DomainError::InvalidValue {
                field: "status",
                reason: format!("quotations are created DRAFT or LIVE, not {status}"),
            }));
        }
        quotation.status = status;
    }

    state.quotations.save(quotation.clone()).await.map_err(|error| scope.persistence(error))?;

    tracing::info!(
        event_name = "api.quotation.created",
        correlation_id = %scope.correlation_id,
        quotation_id = %quotation.id.0,
        "quotation created"
    );
    Ok((StatusCode::CREATED, Json(quotation)))
}

async fn get_quotation(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Quotation>, ApiError> {
    let scope = RequestScope::new();
    let quotation = state
        .quotations
        .find_by_id(&QuotationId(id))
        .await
        .map_err(|error| scope.persistence(error))?
        .ok_or_else(|| scope.not_found(EntityKind::Quotation, id))?;
    Ok(Json(quotation))
}

async fn update_quotation_status(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest<QuotationStatus>>,
) -> Result<Json<Quotation>, ApiError> {
    let scope = RequestScope::new();

    let quotation = state
        .quotations
        .find_by_id(&QuotationId(id))
        .await
        .map_err(|error| scope.persistence(error))?
        .ok_or_else(|| scope.not_found(EntityKind::Quotation, id))?;

    let updated = QuotationStatusMachine::apply_with_audit(
        &quotation,
        request.target,
        &request.payload,
        state.audit.as_ref(),
        &AuditContext::new(Some(id.to_string()), scope.correlation_id.clone(), "api"),
    )
    .map_err(|error| scope.domain(error))?;

    state.quotations.save(updated.clone()).await.map_err(|error| scope.persistence(error))?;

    tracing::info!(
        event_name = "api.quotation.status_updated",
        correlation_id = %scope.correlation_id,
        quotation_id = %id,
        from = quotation.status.as_str(),
        to = updated.status.as_str(),
        "quotation status transition applied"
    );
    Ok(Json(updated))
}

async fn create_communication(
    State(state): State<ApiState>,
    Json(request): Json<CreateCommunicationRequest>,
) -> Result<(StatusCode, Json<Communication>), ApiError> {
    let scope = RequestScope::new();

    let enquiry = state
        .enquiries
        .find_by_id(&EnquiryId(request.enquiry_ref))
        .await
        .map_err(|error| scope.persistence(error))?
        .ok_or_else(|| scope.not_found(EntityKind::Enquiry, request.enquiry_ref))?;

    let communication = CommunicationScheduler::schedule(NewCommunication {
        enquiry_ref: enquiry.id,
        kind: request.kind,
        description: request.description,
        next_communication_date: request.next_communication_date,
        proposed_next_action: request.proposed_next_action,
    })
    .map_err(|error| scope.domain(error))?;

    state
        .communications
        .save(communication.clone())
        .await
        .map_err(|error| scope.persistence(error))?;

    state.audit.emit(
        AuditEvent::new(
            Some(communication.id.0.to_string()),
            scope.correlation_id.clone(),
            "worklist.communication_scheduled",
            AuditCategory::Worklist,
            "api",
            AuditOutcome::Success,
        )
        .with_metadata("next_communication_date", communication.next_communication_date.to_string()),
    );

    Ok((StatusCode::CREATED, Json(communication)))
}

async fn reschedule_communication(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RescheduleRequest>,
) -> Result<Json<Communication>, ApiError> {
    let scope = RequestScope::new();

    let communication = state
        .communications
        .find_by_id(&CommunicationId(id))
        .await
        .map_err(|error| scope.persistence(error))?
        .ok_or_else(|| scope.not_found(EntityKind::Communication, id))?;

    let next = request.next_communication_date.ok_or_else(|| {
        scope.domain(DomainError::MissingRequiredField { field: "nextCommunicationDate" })
    })?;

    let rescheduled = CommunicationScheduler::reschedule(&communication, next);
    state
        .communications
        .save(rescheduled.clone())
        .await
        .map_err(|error| scope.persistence(error))?;

    state.audit.emit(
        AuditEvent::new(
            Some(id.to_string()),
            scope.correlation_id.clone(),
            "worklist.communication_rescheduled",
            AuditCategory::Worklist,
            "api",
            AuditOutcome::Success,
        )
        .with_metadata("from", communication.next_communication_date.to_string())
        .with_metadata("to", next.to_string()),
    );

    Ok(Json(rescheduled))
}

async fn upcoming_tasks(State(state): State<ApiState>) -> Result<Json<Vec<Task>>, ApiError> {
    let scope = RequestScope::new();

    let quotations = state.quotations.list().await.map_err(|error| scope.persistence(error))?;
    let communications =
        state.communications.list().await.map_err(|error| scope.persistence(error))?;
    let enquiries = state.enquiries.list().await.map_err(|error| scope.persistence(error))?;
    let customers = state.customers.list().await.map_err(|error| scope.persistence(error))?;

    let names_by_customer: HashMap<Uuid, String> =
        customers.into_iter().map(|customer| (customer.id.0, customer.name)).collect();
    let mut customer_names = HashMap::new();
    for enquiry in enquiries {
        if let Some(name) = names_by_customer.get(&enquiry.company_ref.0) {
            customer_names.insert(enquiry.id, name.clone());
        }
    }

    let today = Utc::now().date_naive();
    let tasks = state.engine.derive(&quotations, &communications, &customer_names, today);

    tracing::debug!(
        event_name = "api.worklist.derived",
        correlation_id = %scope.correlation_id,
        task_count = tasks.len(),
        "worklist derived"
    );
    Ok(Json(tasks))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use enquire_core::audit::InMemoryAuditSink;
    use enquire_core::domain::customer::{Customer, CustomerId};
    use enquire_core::domain::quotation::LostReason;
    use enquire_core::domain::task::{Priority, TaskKind};
    use enquire_db::repositories::{
        InMemoryCommunicationRepository, InMemoryCustomerRepository, InMemoryEnquiryRepository,
        InMemoryQuotationRepository,
    };

    use super::*;

    fn state() -> (ApiState, Arc<InMemoryAuditSink>) {
        let audit = Arc::new(InMemoryAuditSink::default());
        let state = ApiState {
            customers: Arc::new(InMemoryCustomerRepository::default()),
            enquiries: Arc::new(InMemoryEnquiryRepository::default()),
            quotations: Arc::new(InMemoryQuotationRepository::default()),
            communications: Arc::new(InMemoryCommunicationRepository::default()),
            engine: TaskDerivationEngine::default(),
            audit: audit.clone(),
        };
        (state, audit)
    }

    async fn seed_customer(state: &ApiState, name: &str) -> Customer {
        let customer = Customer {
            id: CustomerId(Uuid::new_v4()),
            name: name.to_owned(),
            segment: "industrial".to_owned(),
        };
        state.customers.save(customer.clone()).await.expect("save customer");
        customer
    }

    async fn seed_enquiry(state: &ApiState, customer: &Customer) -> Enquiry {
        let enquiry = Enquiry::new(customer.id.clone());
        state.enquiries.save(enquiry.clone()).await.expect("save enquiry");
        enquiry
    }

    async fn seed_quotation(state: &ApiState, enquiry: &Enquiry, validity: NaiveDate) -> Quotation {
        let quotation = Quotation::new(enquiry.id.clone(), Decimal::new(48_000, 0), validity);
        state.quotations.save(quotation.clone()).await.expect("save quotation");
        quotation
    }

    #[tokio::test]
    async fn create_enquiry_rejects_unknown_customer() {
        let (state, _) = state();

        let error = create_enquiry(
            State(state),
            Json(CreateEnquiryRequest { company_ref: Uuid::new_v4() }),
        )
        .await
        .expect_err("unknown customer must be rejected");

        assert_eq!(error.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn enquiry_rcd_without_receipt_date_is_rejected_and_not_stored() {
        let (state, audit) = state();
        let customer = seed_customer(&state, "Acme Process").await;
        let enquiry = seed_enquiry(&state, &customer).await;

        let error = update_enquiry_status(
            State(state.clone()),
            Path(enquiry.id.0),
            Json(TransitionRequest {
                target: EnquiryStatus::Rcd,
                payload: TransitionPayload::default(),
            }),
        )
        .await
        .expect_err("RCD without dateOfReceipt must be rejected");

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.body.field, Some("dateOfReceipt"));

        let stored = state
            .enquiries
            .find_by_id(&enquiry.id)
            .await
            .expect("find enquiry")
            .expect("enquiry present");
        assert_eq!(stored.status, EnquiryStatus::Live);

        let rejected = audit.events();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].event_type, "lifecycle.transition_rejected");
    }

    #[tokio::test]
    async fn quotation_won_with_purchase_order_persists_all_fields() {
        let (state, _) = state();
        let customer = seed_customer(&state, "Brightforge").await;
        let enquiry = seed_enquiry(&state, &customer).await;
        let validity = NaiveDate::from_ymd_opt(2026, 11, 15).expect("valid date");
        let quotation = seed_quotation(&state, &enquiry, validity).await;

        let Json(updated) = update_quotation_status(
            State(state.clone()),
            Path(quotation.id.0),
            Json(TransitionRequest {
                target: QuotationStatus::Won,
                payload: TransitionPayload {
                    purchase_order_number: Some("PO-2026-0091".to_owned()),
                    po_value: Some(Decimal::new(47_500, 0)),
                    po_date: NaiveDate::from_ymd_opt(2026, 9, 1),
                    ..TransitionPayload::default()
                },
            }),
        )
        .await
        .expect("WON with purchase order details must succeed");

        assert_eq!(updated.status, QuotationStatus::Won);
        assert_eq!(updated.purchase_order_number.as_deref(), Some("PO-2026-0091"));
        assert_eq!(updated.po_value, Some(Decimal::new(47_500, 0)));

        let stored = state
            .quotations
            .find_by_id(&quotation.id)
            .await
            .expect("find quotation")
            .expect("quotation present");
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn quotation_lost_requires_a_reason() {
        let (state, _) = state();
        let customer = seed_customer(&state, "Deltaline").await;
        let enquiry = seed_enquiry(&state, &customer).await;
        let validity = NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date");
        let quotation = seed_quotation(&state, &enquiry, validity).await;

        let error = update_quotation_status(
            State(state.clone()),
            Path(quotation.id.0),
            Json(TransitionRequest {
                target: QuotationStatus::Lost,
                payload: TransitionPayload::default(),
            }),
        )
        .await
        .expect_err("LOST without a reason must be rejected");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.body.field, Some("lostReason"));

        let Json(updated) = update_quotation_status(
            State(state.clone()),
            Path(quotation.id.0),
            Json(TransitionRequest {
                target: QuotationStatus::Lost,
                payload: TransitionPayload {
                    lost_reason: Some(LostReason::Price),
                    ..TransitionPayload::default()
                },
            }),
        )
        .await
        .expect("LOST with a reason must succeed");
        assert_eq!(updated.lost_reason, Some(LostReason::Price));
    }

    #[tokio::test]
    async fn quotation_created_with_terminal_status_is_rejected() {
        let (state, _) = state();
        let customer = seed_customer(&state, "Eastgate").await;
        let enquiry = seed_enquiry(&state, &customer).await;

        let error = create_quotation(
            State(state),
            Json(CreateQuotationRequest {
                enquiry_ref: enquiry.id.0,
                total_value: Decimal::new(12_000, 0),
                validity_period: NaiveDate::from_ymd_opt(2026, 12, 1).expect("valid date"),
                status: Some(QuotationStatus::Won),
            }),
        )
        .await
        .expect_err("terminal creation status must be rejected");

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.body.field, Some("status"));
    }

    #[tokio::test]
    async fn worklist_is_stable_across_repeated_reads() {
        let (state, _) = state();
        let customer = seed_customer(&state, "Faraday Fabrication").await;
        let enquiry = seed_enquiry(&state, &customer).await;
        let validity = Utc::now().date_naive() + Duration::days(14);
        seed_quotation(&state, &enquiry, validity).await;

        let Json(first) = upcoming_tasks(State(state.clone())).await.expect("first read");
        let Json(second) = upcoming_tasks(State(state)).await.expect("second read");

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].customer_name, "Faraday Fabrication");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn winning_a_quotation_removes_its_worklist_entry() {
        let (state, _) = state();
        let customer = seed_customer(&state, "Gullwing").await;
        let enquiry = seed_enquiry(&state, &customer).await;
        let validity = Utc::now().date_naive() + Duration::days(7);
        let quotation = seed_quotation(&state, &enquiry, validity).await;

        let Json(before) = upcoming_tasks(State(state.clone())).await.expect("tasks before");
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].kind, TaskKind::Quotation);

        update_quotation_status(
            State(state.clone()),
            Path(quotation.id.0),
            Json(TransitionRequest {
                target: QuotationStatus::Won,
                payload: TransitionPayload {
                    purchase_order_number: Some("PO-77".to_owned()),
                    ..TransitionPayload::default()
                },
            }),
        )
        .await
        .expect("transition to WON");

        let Json(after) = upcoming_tasks(State(state)).await.expect("tasks after");
        assert!(after.is_empty());
    }

    #[tokio::test]
    async fn overdue_communication_is_high_priority_until_rescheduled() {
        let (state, audit) = state();
        let customer = seed_customer(&state, "Harbor Metals").await;
        let enquiry = seed_enquiry(&state, &customer).await;
        let yesterday = Utc::now().date_naive() - Duration::days(1);

        let (status, Json(communication)) = create_communication(
            State(state.clone()),
            Json(CreateCommunicationRequest {
                enquiry_ref: enquiry.id.0,
                kind: CommunicationKind::Telephonic,
                description: "Discussed revised scope".to_owned(),
                next_communication_date: Some(yesterday),
                proposed_next_action: Some("Send revised drawings".to_owned()),
            }),
        )
        .await
        .expect("schedule communication");
        assert_eq!(status, StatusCode::CREATED);

        let Json(tasks) = upcoming_tasks(State(state.clone())).await.expect("tasks");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].kind, TaskKind::Communication);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].description, "Send revised drawings");

        let next_week = Utc::now().date_naive() + Duration::days(10);
        let Json(rescheduled) = reschedule_communication(
            State(state.clone()),
            Path(communication.id.0),
            Json(RescheduleRequest { next_communication_date: Some(next_week) }),
        )
        .await
        .expect("reschedule communication");
        assert_eq!(rescheduled.next_communication_date, next_week);

        let Json(tasks) = upcoming_tasks(State(state)).await.expect("tasks after reschedule");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].due_date, next_week);
        assert_eq!(tasks[0].priority, Priority::Low);

        let events = audit.events();
        assert!(events.iter().any(|e| e.event_type == "worklist.communication_scheduled"));
        assert!(events.iter().any(|e| e.event_type == "worklist.communication_rescheduled"));
    }

    #[tokio::test]
    async fn scheduling_without_a_date_is_rejected() {
        let (state, _) = state();
        let customer = seed_customer(&state, "Ironside").await;
        let enquiry = seed_enquiry(&state, &customer).await;

        let error = create_communication(
            State(state),
            Json(CreateCommunicationRequest {
                enquiry_ref: enquiry.id.0,
                kind: CommunicationKind::Email,
                description: "Intro email".to_owned(),
                next_communication_date: None,
                proposed_next_action: None,
            }),
        )
        .await
        .expect_err("missing follow-up date must be rejected");

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.body.field, Some("nextCommunicationDate"));
    }
}
