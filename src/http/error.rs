//! Uniform API error body and status mapping.

use crate::billing::{
    domain::BillingDomainError,
    ports::{InvoiceRepositoryError, OfferRepositoryError},
    services::{InvoiceServiceError, OfferServiceError},
};
use crate::client::{
    ports::{ClientRepositoryError, ProjectRepositoryError},
    services::ClientDirectoryError,
};
use crate::hosting::{ports::DomainRecordRepositoryError, services::HostingServiceError};
use crate::identity::{
    domain::IdentityDomainError,
    ports::{InviteRepositoryError, UserRepositoryError},
    services::{AuthError, TokenError},
};
use crate::task::{domain::TaskDomainError, ports::TaskRepositoryError, services::TaskWorkflowError};
use crate::timesheet::{ports::TimesheetRepositoryError, services::TimesheetServiceError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// API-level error carrying an HTTP status and a caller-facing message.
///
/// Every failure is rendered as `{ "error": <message> }`. Internal causes are
/// logged but never leaked to the caller.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 401 with a fixed message; token failures share one body so callers
    /// cannot distinguish them.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "authentication required")
    }

    fn internal(err: &dyn std::error::Error) -> Self {
        tracing::error!(error = %err, "internal error serving request");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }

    fn bad_request(err: &dyn std::error::Error) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }

    fn conflict(err: &dyn std::error::Error) -> Self {
        Self::new(StatusCode::CONFLICT, err.to_string())
    }

    fn not_found(err: &dyn std::error::Error) -> Self {
        Self::new(StatusCode::NOT_FOUND, err.to_string())
    }

    fn forbidden(err: &dyn std::error::Error) -> Self {
        Self::new(StatusCode::FORBIDDEN, err.to_string())
    }

    /// Returns the HTTP status this error renders with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid | TokenError::Expired => Self::unauthorized(),
            TokenError::Signing(_) => Self::internal(&err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::Domain(cause) => match cause {
                IdentityDomainError::AlreadyActivated(_)
                | IdentityDomainError::InviteConsumed(_)
                | IdentityDomainError::InviteExpired(_) => Self::conflict(&err),
                _ => Self::bad_request(&err),
            },
            AuthError::Users(cause) => match cause {
                UserRepositoryError::DuplicateUser(_)
                | UserRepositoryError::DuplicateEmail(_) => Self::conflict(&err),
                UserRepositoryError::NotFound(_) => Self::not_found(&err),
                UserRepositoryError::Persistence(_) => Self::internal(&err),
            },
            AuthError::Invites(cause) => match cause {
                InviteRepositoryError::DuplicateInvite(_) => Self::conflict(&err),
                InviteRepositoryError::NotFound(_) => Self::not_found(&err),
                InviteRepositoryError::Persistence(_) => Self::internal(&err),
            },
            AuthError::Forbidden => Self::forbidden(&err),
            AuthError::InvalidCredentials => Self::unauthorized(),
            AuthError::UnknownInvite | AuthError::UnknownUser(_) => Self::not_found(&err),
        }
    }
}

impl From<ClientDirectoryError> for ApiError {
    fn from(err: ClientDirectoryError) -> Self {
        match &err {
            ClientDirectoryError::Domain(_) => Self::bad_request(&err),
            ClientDirectoryError::Clients(cause) => match cause {
                ClientRepositoryError::DuplicateClient(_)
                | ClientRepositoryError::HasDependents(_) => Self::conflict(&err),
                ClientRepositoryError::NotFound(_) => Self::not_found(&err),
                ClientRepositoryError::Persistence(_) => Self::internal(&err),
            },
            ClientDirectoryError::Projects(cause) => match cause {
                ProjectRepositoryError::DuplicateProject(_) => Self::conflict(&err),
                ProjectRepositoryError::NotFound(_) => Self::not_found(&err),
                ProjectRepositoryError::Persistence(_) => Self::internal(&err),
            },
            ClientDirectoryError::Forbidden => Self::forbidden(&err),
            ClientDirectoryError::ClientMissing(_) | ClientDirectoryError::ProjectMissing(_) => {
                Self::not_found(&err)
            }
        }
    }
}

impl From<TaskWorkflowError> for ApiError {
    fn from(err: TaskWorkflowError) -> Self {
        match &err {
            TaskWorkflowError::Domain(cause) => match cause {
                TaskDomainError::EmptyTitle => Self::bad_request(&err),
                TaskDomainError::InvalidStatusTransition { .. }
                | TaskDomainError::WorkerAlreadyAssigned { .. }
                | TaskDomainError::WorkerNotAssigned { .. } => Self::conflict(&err),
            },
            TaskWorkflowError::Tasks(cause) => match cause {
                TaskRepositoryError::DuplicateTask(_) => Self::conflict(&err),
                TaskRepositoryError::NotFound(_) => Self::not_found(&err),
                TaskRepositoryError::Persistence(_) => Self::internal(&err),
            },
            TaskWorkflowError::Users(cause) => match cause {
                UserRepositoryError::DuplicateUser(_)
                | UserRepositoryError::DuplicateEmail(_) => Self::conflict(&err),
                UserRepositoryError::NotFound(_) => Self::not_found(&err),
                UserRepositoryError::Persistence(_) => Self::internal(&err),
            },
            TaskWorkflowError::Forbidden => Self::forbidden(&err),
            TaskWorkflowError::TaskMissing(_) => Self::not_found(&err),
            TaskWorkflowError::NotAWorker(_) => Self::bad_request(&err),
        }
    }
}

impl From<InvoiceServiceError> for ApiError {
    fn from(err: InvoiceServiceError) -> Self {
        match &err {
            InvoiceServiceError::Domain(cause) => billing_domain_error(&err, cause),
            InvoiceServiceError::Invoices(cause) => match cause {
                InvoiceRepositoryError::DuplicateInvoice(_)
                | InvoiceRepositoryError::DuplicateNumber(_) => Self::conflict(&err),
                InvoiceRepositoryError::NotFound(_) => Self::not_found(&err),
                InvoiceRepositoryError::Persistence(_) => Self::internal(&err),
            },
            InvoiceServiceError::Forbidden => Self::forbidden(&err),
            InvoiceServiceError::InvoiceMissing(_) => Self::not_found(&err),
            InvoiceServiceError::NotDraft(_) => Self::conflict(&err),
        }
    }
}

impl From<OfferServiceError> for ApiError {
    fn from(err: OfferServiceError) -> Self {
        match &err {
            OfferServiceError::Domain(cause) => billing_domain_error(&err, cause),
            OfferServiceError::Offers(cause) => match cause {
                OfferRepositoryError::DuplicateOffer(_) => Self::conflict(&err),
                OfferRepositoryError::NotFound(_) => Self::not_found(&err),
                OfferRepositoryError::Persistence(_) => Self::internal(&err),
            },
            OfferServiceError::Clients(cause) => match cause {
                ClientRepositoryError::DuplicateClient(_)
                | ClientRepositoryError::HasDependents(_) => Self::conflict(&err),
                ClientRepositoryError::NotFound(_) => Self::not_found(&err),
                ClientRepositoryError::Persistence(_) => Self::internal(&err),
            },
            OfferServiceError::Document(_) => Self::internal(&err),
            OfferServiceError::Forbidden => Self::forbidden(&err),
            OfferServiceError::OfferMissing(_) | OfferServiceError::ClientMissing(_) => {
                Self::not_found(&err)
            }
        }
    }
}

impl From<HostingServiceError> for ApiError {
    fn from(err: HostingServiceError) -> Self {
        match &err {
            HostingServiceError::Domain(_) => Self::bad_request(&err),
            HostingServiceError::Records(cause) => match cause {
                DomainRecordRepositoryError::DuplicateRecord(_) => Self::conflict(&err),
                DomainRecordRepositoryError::NotFound(_) => Self::not_found(&err),
                DomainRecordRepositoryError::Persistence(_) => Self::internal(&err),
            },
            HostingServiceError::Forbidden => Self::forbidden(&err),
            HostingServiceError::RecordMissing(_) => Self::not_found(&err),
        }
    }
}

impl From<TimesheetServiceError> for ApiError {
    fn from(err: TimesheetServiceError) -> Self {
        match &err {
            TimesheetServiceError::Domain(_) => Self::bad_request(&err),
            TimesheetServiceError::Entries(cause) => match cause {
                TimesheetRepositoryError::DuplicateEntry(_) => Self::conflict(&err),
                TimesheetRepositoryError::NotFound(_) => Self::not_found(&err),
                TimesheetRepositoryError::Persistence(_) => Self::internal(&err),
            },
            TimesheetServiceError::Tasks(cause) => match cause {
                TaskRepositoryError::DuplicateTask(_) => Self::conflict(&err),
                TaskRepositoryError::NotFound(_) => Self::not_found(&err),
                TaskRepositoryError::Persistence(_) => Self::internal(&err),
            },
            TimesheetServiceError::Forbidden => Self::forbidden(&err),
            TimesheetServiceError::EntryMissing(_) | TimesheetServiceError::TaskMissing(_) => {
                Self::not_found(&err)
            }
        }
    }
}

fn billing_domain_error(err: &dyn std::error::Error, cause: &BillingDomainError) -> ApiError {
    match cause {
        BillingDomainError::InvalidInvoiceTransition { .. }
        | BillingDomainError::InvalidOfferTransition { .. }
        | BillingDomainError::OfferExpired { .. } => ApiError::conflict(err),
        _ => ApiError::bad_request(err),
    }
}
